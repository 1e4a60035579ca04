//! This file defines split rules for decision tree.
use serde::{Serialize, Deserialize};

use crate::sample::FeatureSchema;


/// Routing data of a split.
/// Given a (non-missing) feature value,
/// it determines the branch the value goes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Routing {
    /// Value code `k` goes to branch `k`.
    NominalMultiway {
        /// Number of value codes (= number of branches).
        n_values: usize,
    },
    /// Value codes in `group` go to branch `0`, the others to branch `1`.
    NominalBinary {
        /// Ascending value codes assigned to branch `0`.
        group: Vec<usize>,
    },
    /// A value goes to the first bin whose upper boundary
    /// is greater than or equal to it.
    /// The last bin takes every remaining value.
    NumericMultiway {
        /// Ascending upper boundaries of the bins.
        thresholds: Vec<f64>,
    },
    /// `x <= threshold` goes to branch `0`, `x > threshold` to branch `1`.
    NumericBinary {
        /// The threshold.
        threshold: f64,
    },
}


/// A splitting rule: the feature to look at and how to route its value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRule {
    /// Index of the splitting feature.
    pub feature: usize,
    /// Routing data.
    pub routing: Routing,
}


impl SplitRule {
    #[inline]
    pub(crate) fn new(feature: usize, routing: Routing) -> Self {
        Self { feature, routing, }
    }


    /// Returns the number of branches of this rule.
    pub fn n_branches(&self) -> usize {
        match &self.routing {
            Routing::NominalMultiway { n_values } => *n_values,
            Routing::NumericMultiway { thresholds } => thresholds.len(),
            Routing::NominalBinary { .. }
            | Routing::NumericBinary { .. } => 2,
        }
    }


    /// Returns the branch index of the non-missing feature value `value`.
    /// For a nominal multi-way rule the index may be out of range
    /// if `value` is not a known value code.
    #[inline]
    pub fn branch(&self, value: f64) -> usize {
        match &self.routing {
            Routing::NominalMultiway { .. } => value as usize,
            Routing::NominalBinary { group } => {
                let code = value as usize;
                if group.binary_search(&code).is_ok() { 0 } else { 1 }
            },
            Routing::NumericMultiway { thresholds } => {
                thresholds.iter()
                    .position(|&t| value <= t)
                    .unwrap_or(thresholds.len().saturating_sub(1))
            },
            Routing::NumericBinary { threshold } => {
                if value <= *threshold { 0 } else { 1 }
            },
        }
    }


    /// Returns a human readable condition of `branch`.
    pub(crate) fn describe(&self, schema: &FeatureSchema, branch: usize)
        -> String
    {
        let name = &schema.name;
        match &self.routing {
            Routing::NominalMultiway { .. } => {
                format!("{name} = {}", schema.label(branch))
            },
            Routing::NominalBinary { group } => {
                let values = group.iter()
                    .map(|&code| schema.label(code))
                    .collect::<Vec<_>>()
                    .join(", ");
                if branch == 0 {
                    format!("{name} in {{{values}}}")
                } else {
                    format!("{name} not in {{{values}}}")
                }
            },
            Routing::NumericMultiway { thresholds } => {
                let last = thresholds.len().saturating_sub(1);
                if branch == 0 {
                    format!("{name} <= {}", round6(thresholds[0]))
                } else if branch == last {
                    format!("{name} > {}", round6(thresholds[last - 1]))
                } else {
                    format!(
                        "{} < {name} <= {}",
                        round6(thresholds[branch - 1]),
                        round6(thresholds[branch]),
                    )
                }
            },
            Routing::NumericBinary { threshold } => {
                let op = if branch == 0 { "<=" } else { ">" };
                format!("{name} {op} {}", round6(*threshold))
            },
        }
    }
}


/// Rounds `x` to 6 decimal places for printing.
#[inline]
fn round6(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}
