//! Errors
//!
//! Custom error types used throughout the `minitree` crate.
use thiserror::Error;

/// Errors that can occur while reading a sample,
/// growing a decision tree, or classifying an instance.
#[derive(Debug, Error)]
pub enum MiniTreeError {
    /// A configuration value is not supported.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The splitting criterion is not one of the known criteria.
    #[error("Unsupported splitting criterion `{0}`, expected one of [GainRatio, Gini].")]
    UnsupportedCriterion(String),
    /// The training sample carries no class schema at all.
    #[error("The training sample has no class values, cannot grow a tree.")]
    EmptyTrainingSet,
    /// The instance was routed to a branch that received
    /// too few training examples to grow a child.
    #[error("Instance routed to branch {branch} of feature `{feature}`, but the branch has no child.")]
    UnroutableInstance {
        /// Name of the splitting feature.
        feature: String,
        /// Index of the absent branch.
        branch: usize,
    },
    /// The instance reached a leaf that no training example reached.
    #[error("Instance reached a leaf without training examples.")]
    NoTrainingCoverage,
    /// The instance does not have the training schema's width.
    #[error("Instance has {got} feature values, but the tree expects {expected}.")]
    InstanceWidth {
        /// Number of features of the training sample.
        expected: usize,
        /// Number of values in the given instance.
        got: usize,
    },
    /// The given column does not exist.
    #[error("The column named `{0}` does not exist.")]
    MissingColumn(String),
    /// A cell could not be parsed.
    #[error("Failed to parse line {line}: {reason}")]
    Parse {
        /// 1-indexed line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// Columns have different lengths.
    #[error("Column `{name}` has {got} rows, expected {expected}.")]
    ShapeMismatch {
        /// Column name.
        name: String,
        /// Expected number of rows.
        expected: usize,
        /// Actual number of rows.
        got: usize,
    },
    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Failure inside `polars`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
    /// (De)serialization failure of a trained tree.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A `Result` alias whose error type is [`MiniTreeError`].
pub type Result<T> = std::result::Result<T, MiniTreeError>;
