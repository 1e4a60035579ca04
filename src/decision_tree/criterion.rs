//! Splitting criteria for growing decision tree.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::str::FromStr;
use std::cmp::Ordering;

use crate::error::MiniTreeError;
use super::measure;


/// Two scores closer than this are regarded as equal
/// when testing for the no-information value.
const SMALL: f64 = 1e-6;


/// Score for a splitting.
/// This is just a wrapper for `f64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Score(pub f64);


impl From<f64> for Score {
    #[inline(always)]
    fn from(score: f64) -> Self {
        Self(score)
    }
}


impl Score {
    /// Returns `false` if this score is undefined.
    /// An undefined score never beats a defined one.
    #[inline]
    pub fn is_comparable(&self) -> bool {
        !self.0.is_nan()
    }
}


impl PartialEq for Score {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}


impl PartialOrd for Score {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}


impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


/// Splitting criteria for growing decision tree.
/// * `Criterion::GainRatio` maximizes the information gain ratio.
/// * `Criterion::Gini` selects the split of **minimal**
///     Gini impurity reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Information gain normalized by the split information.
    /// Higher is better.
    GainRatio,
    /// Gini impurity reduction.
    /// Lower is better.
    Gini,
}


impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GainRatio => "GainRatio",
            Self::Gini => "Gini",
        };

        write!(f, "{name}")
    }
}


impl FromStr for Criterion {
    type Err = MiniTreeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gainratio" | "gain_ratio" | "gain-ratio" => Ok(Self::GainRatio),
            "gini" | "giniindex" | "gini_index" | "gini-index" => Ok(Self::Gini),
            _ => Err(MiniTreeError::UnsupportedCriterion(s.to_string())),
        }
    }
}


/// Criteria are also known by the tags `0` (gain ratio) and `1` (Gini).
impl TryFrom<usize> for Criterion {
    type Error = MiniTreeError;
    fn try_from(tag: usize) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::GainRatio),
            1 => Ok(Self::Gini),
            _ => Err(MiniTreeError::InvalidConfiguration(
                format!("unknown criterion tag {tag}")
            )),
        }
    }
}


impl Criterion {
    /// Returns the score of the split `children` of `parent`.
    /// Both are given as class counts.
    ///
    /// The Gini score of a split with an empty branch is undefined
    /// (`f64::NAN`), since the impurity of an empty branch is.
    #[inline]
    pub fn score(&self, parent: &[f64], children: &[Vec<f64>]) -> Score {
        let score = match self {
            Self::GainRatio => measure::gain_ratio(parent, children),
            Self::Gini => {
                let has_empty = children.iter()
                    .any(|child| child.iter().sum::<f64>() <= 0f64);
                if has_empty {
                    f64::NAN
                } else {
                    measure::gini_reduction(parent, children)
                }
            },
        };
        Score::from(score)
    }


    /// The score of a split that carries no information.
    #[inline]
    pub fn no_information(&self) -> Score {
        Score(0f64)
    }


    /// Returns `true` if `score` equals the no-information value.
    #[inline]
    pub fn is_no_information(&self, score: Score) -> bool {
        (score.0 - self.no_information().0).abs() < SMALL
    }


    /// Returns `true` if `candidate` is strictly better than `best`.
    /// A defined score is better than an undefined one.
    #[inline]
    pub fn is_better(&self, candidate: Score, best: Score) -> bool {
        if !best.is_comparable() { return candidate.is_comparable(); }
        match self {
            Self::GainRatio => candidate > best,
            Self::Gini => candidate < best,
        }
    }


    /// Returns `true` if `candidate` is at least as good as `best`.
    #[inline]
    pub fn is_not_worse(&self, candidate: Score, best: Score) -> bool {
        if !best.is_comparable() { return candidate.is_comparable(); }
        match self {
            Self::GainRatio => candidate >= best,
            Self::Gini => candidate <= best,
        }
    }
}
