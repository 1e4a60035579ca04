#![warn(missing_docs)]

//!
//! A crate that grows decision trees for classification.
//!
//! A tree is grown top-down.
//! At each node every feature is split and scored,
//! and the best split becomes a branch node unless it carries
//! no information or leaves too few examples in a branch.
//!
//! - Criteria
//!     `Criterion::GainRatio` (information gain normalized by the split
//!     information) and `Criterion::Gini` (Gini impurity reduction).
//!
//! - Split styles
//!     `SplitStyle::Multiway` splits a nominal feature into one branch
//!     per value, and a numeric feature into equal-width bins.
//!     `SplitStyle::Binary` splits a nominal feature into the best
//!     bipartition of its values, and a numeric feature at the best
//!     observed threshold.
//!
//! Missing feature values are replaced by the training-set mean (numeric)
//! or mode (nominal) of the feature, both while growing and predicting.
//!
//! ```no_run
//! use minitree::prelude::*;
//!
//! let sample = SampleReader::new()
//!     .file("weather.csv")
//!     .has_header(true)
//!     .target_feature("play")
//!     .read()
//!     .unwrap();
//!
//! let tree = DecisionTreeBuilder::new()
//!     .criterion(Criterion::GainRatio)
//!     .split_style(SplitStyle::Multiway)
//!     .build()
//!     .unwrap();
//! let classifier = tree.produce(&sample).unwrap();
//!
//! let predictions = classifier.predict_all(&sample);
//! println!("{classifier}");
//! ```

pub mod error;
pub mod sample;
pub mod classifier;
pub mod decision_tree;
pub mod prelude;


pub use error::{MiniTreeError, Result};

pub use sample::{
    Sample,
    SampleReader,
    Feature,
    FeatureSchema,
};

pub use classifier::Classifier;

pub use decision_tree::{
    build,
    Criterion,
    SplitStyle,
    TreeConfig,
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
};
