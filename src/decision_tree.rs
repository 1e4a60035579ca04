//! Decision tree induction with the gain ratio / Gini criteria.

/// Defines the decision tree learner.
pub mod dtree;
/// Defines the classifier produced by `DecisionTree`.
pub mod dtree_classifier;
/// Defines the builder of `DecisionTree`.
pub mod builder;
/// Impurity measures.
pub mod measure;
/// Binary partitions of nominal values.
pub mod bipartition;

/// Defines the inner representations of `DecisionTreeClassifier`.
pub mod node;
mod criterion;
mod split_rule;
mod splitter;


pub use dtree_classifier::DecisionTreeClassifier;
pub use dtree::DecisionTree;
pub use builder::{
    build,
    DecisionTreeBuilder,
    SplitStyle,
    TreeConfig,
    DEFAULT_MIN_LEAF_SIZE,
};
pub use criterion::{Criterion, Score};
pub use split_rule::{SplitRule, Routing};
pub use node::{Node, BranchNode, LeafNode};
