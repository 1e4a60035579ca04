//! Exports the decision tree learner and traits.
//!
pub use crate::decision_tree::{
    // Learner
    DecisionTree,
    DecisionTreeBuilder,
    DecisionTreeClassifier,
    build,


    // Parameters
    Criterion,
    SplitStyle,
    TreeConfig,
};


pub use crate::classifier::Classifier;


pub use crate::sample::{
    Sample,
    SampleReader,
    Feature,
};


pub use crate::error::{MiniTreeError, Result};
