use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;

use crate::Sample;
use crate::error::{MiniTreeError, Result};
use super::criterion::Criterion;
use super::dtree::DecisionTree;
use super::dtree_classifier::DecisionTreeClassifier;


/// The minimum leaf size set as default.
pub const DEFAULT_MIN_LEAF_SIZE: f64 = 2.0;


/// Shape of the splits.
/// * `SplitStyle::Binary` splits every node into two branches.
/// * `SplitStyle::Multiway` splits a nominal feature into one branch
///     per value and a numeric feature into equal-width bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitStyle {
    /// Two branches per node.
    Binary,
    /// One branch per value (nominal) or bin (numeric).
    Multiway,
}


impl fmt::Display for SplitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "Binary",
            Self::Multiway => "Multiway",
        };

        write!(f, "{name}")
    }
}


impl FromStr for SplitStyle {
    type Err = MiniTreeError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "multiway" | "multi-way" | "multi_way" => Ok(Self::Multiway),
            _ => Err(MiniTreeError::InvalidConfiguration(
                format!("unknown split style `{s}`")
            )),
        }
    }
}


/// Parameters of the tree induction,
/// fixed for the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Splitting criterion.
    pub criterion: Criterion,
    /// Shape of the splits.
    pub split_style: SplitStyle,
    /// A split is accepted only if every branch holds
    /// more than `min_leaf_size` rows.
    pub min_leaf_size: f64,
}


impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            criterion: Criterion::GainRatio,
            split_style: SplitStyle::Multiway,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
        }
    }
}


impl TreeConfig {
    /// Check the parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.min_leaf_size.is_finite() {
            return Err(MiniTreeError::InvalidConfiguration(
                format!("minimum leaf size must be finite, got {}", self.min_leaf_size)
            ));
        }
        Ok(())
    }
}


/// A struct that builds `DecisionTree`.
/// `DecisionTreeBuilder` keeps parameters for constructing `DecisionTree`.
///
/// # Example
///
/// ```no_run
/// use minitree::prelude::*;
///
/// let sample = SampleReader::new()
///     .file("weather.csv")
///     .has_header(true)
///     .target_feature("play")
///     .read()
///     .unwrap();
///
/// let tree = DecisionTreeBuilder::new()
///     .criterion(Criterion::GainRatio)
///     .split_style(SplitStyle::Binary)
///     .min_leaf_size(1.0)
///     .build()
///     .unwrap();
///
/// let classifier = tree.produce(&sample).unwrap();
/// println!("{classifier}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTreeBuilder {
    config: TreeConfig,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// By default, [`DecisionTreeBuilder`] sets the parameters as follows;
    /// ```text
    /// criterion: Criterion::GainRatio,
    /// split_style: SplitStyle::Multiway,
    /// min_leaf_size: DEFAULT_MIN_LEAF_SIZE == 2.0,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Start from an existing configuration.
    pub fn from_config(config: TreeConfig) -> Self {
        Self { config }
    }


    /// Set the node splitting rule.
    /// Default value is `Criterion::GainRatio`.
    #[inline]
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.config.criterion = criterion;
        self
    }


    /// Set the shape of the splits.
    /// Default value is `SplitStyle::Multiway`.
    #[inline]
    pub fn split_style(mut self, style: SplitStyle) -> Self {
        self.config.split_style = style;
        self
    }


    /// Set the minimum leaf size.
    /// Default value is `2.0`.
    #[inline]
    pub fn min_leaf_size(mut self, size: f64) -> Self {
        self.config.min_leaf_size = size;
        self
    }


    /// Build a `DecisionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<DecisionTree> {
        self.config.validate()?;
        Ok(DecisionTree::from_config(self.config))
    }
}


/// Grow a decision tree on `sample` with `config`.
pub fn build(sample: &Sample, config: &TreeConfig)
    -> Result<DecisionTreeClassifier>
{
    DecisionTreeBuilder::from_config(*config)
        .build()?
        .produce(sample)
}
