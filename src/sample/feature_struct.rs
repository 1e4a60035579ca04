use polars::prelude::*;
use serde::{Serialize, Deserialize};

use std::ops::Index;
use std::collections::HashMap;

use crate::error::Result;

const BUF_SIZE: usize = 256;


/// Nominal representation of a feature.
/// Each value is the code (index into `labels`) stored as `f64`.
/// A missing value is `f64::NAN`.
#[derive(Debug, Clone)]
pub struct NominalFeature {
    /// Feature name
    pub name: String,
    /// Value labels. The code of `labels[k]` is `k`.
    pub labels: Vec<String>,
    /// Value codes.
    pub sample: Vec<f64>,
}


/// Numeric representation of a feature.
/// A missing value is `f64::NAN`.
#[derive(Debug, Clone)]
pub struct NumericFeature {
    /// Feature name
    pub name: String,
    /// Feature values.
    pub sample: Vec<f64>,
}


/// An enumeration of nominal/numeric feature.
#[derive(Debug, Clone)]
pub enum Feature {
    /// A feature that takes finitely many values.
    Nominal(NominalFeature),
    /// An ordered scalar feature.
    Numeric(NumericFeature),
}


/// Name and kind of a feature,
/// kept by a trained tree to print and route instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Feature name.
    pub name: String,
    /// Value labels for a nominal feature, `None` for a numeric one.
    pub labels: Option<Vec<String>>,
}


impl FeatureSchema {
    /// Returns the label of value `code`,
    /// or the code itself for a numeric feature.
    pub fn label(&self, code: usize) -> String {
        match &self.labels {
            Some(labels) => labels.get(code)
                .cloned()
                .unwrap_or_else(|| format!("#{code}")),
            None => format!("{code}"),
        }
    }
}


impl Feature {
    /// Construct a numeric feature from its values.
    pub fn numeric<T: ToString>(name: T, sample: Vec<f64>) -> Self {
        Self::Numeric(NumericFeature { name: name.to_string(), sample, })
    }


    /// Construct a nominal feature from its labels and value codes.
    pub fn nominal<T, S>(name: T, labels: &[S], sample: Vec<f64>) -> Self
        where T: ToString,
              S: ToString,
    {
        let labels = labels.iter()
            .map(|s| s.to_string())
            .collect();
        Self::Nominal(NominalFeature { name: name.to_string(), labels, sample, })
    }


    /// Get the feature name.
    pub fn name(&self) -> &str {
        match self {
            Self::Nominal(feat) => &feat.name,
            Self::Numeric(feat) => &feat.name,
        }
    }


    /// Returns `true` if this feature is nominal.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Nominal(_))
    }


    /// Returns `true` if this feature is numeric.
    pub fn is_numeric(&self) -> bool {
        !self.is_nominal()
    }


    /// Returns the number of labels of a nominal feature.
    pub fn n_values(&self) -> Option<usize> {
        match self {
            Self::Nominal(feat) => Some(feat.labels.len()),
            Self::Numeric(_) => None,
        }
    }


    /// Returns the schema of this feature.
    pub fn schema(&self) -> FeatureSchema {
        let labels = match self {
            Self::Nominal(feat) => Some(feat.labels.clone()),
            Self::Numeric(_) => None,
        };
        FeatureSchema { name: self.name().to_string(), labels, }
    }


    fn values(&self) -> &[f64] {
        match self {
            Self::Nominal(feat) => &feat.sample[..],
            Self::Numeric(feat) => &feat.sample[..],
        }
    }


    /// Returns the number of items in this feature.
    pub fn len(&self) -> usize {
        self.values().len()
    }


    /// Returns `true` if the number of examples is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }


    /// Returns `true` if the value at `row` is missing.
    #[inline]
    pub fn is_missing(&self, row: usize) -> bool {
        self[row].is_nan()
    }


    /// Returns the value at `row`, or `None` if it is missing.
    #[inline]
    pub fn value(&self, row: usize) -> Option<f64> {
        let value = self[row];
        if value.is_nan() { None } else { Some(value) }
    }


    /// Returns the mean (numeric) or the mode (nominal)
    /// of the non-missing values at `rows`.
    /// If every value is missing, returns `0`.
    pub fn mean_or_mode(&self, rows: &[usize]) -> f64 {
        match self {
            Self::Numeric(feat) => {
                let (sum, count) = rows.iter()
                    .filter_map(|&i| {
                        let v = feat.sample[i];
                        if v.is_nan() { None } else { Some(v) }
                    })
                    .fold((0f64, 0usize), |(s, c), v| (s + v, c + 1));

                if count == 0 { 0f64 } else { sum / count as f64 }
            },
            Self::Nominal(feat) => {
                let mut counts = vec![0usize; feat.labels.len()];
                for &i in rows {
                    let v = feat.sample[i];
                    if v.is_nan() { continue; }
                    if let Some(c) = counts.get_mut(v as usize) { *c += 1; }
                }
                // The smallest code wins ties.
                let mut mode = 0;
                for (k, &c) in counts.iter().enumerate() {
                    if c > counts[mode] { mode = k; }
                }
                mode as f64
            },
        }
    }


    /// Convert this feature into a nominal one.
    /// Numeric values become labels in ascending order.
    pub(crate) fn into_nominal(self) -> NominalFeature {
        match self {
            Self::Nominal(feat) => feat,
            Self::Numeric(feat) => {
                let distinct = sorted_distinct(feat.sample.iter().copied());
                let labels = distinct.iter()
                    .map(|v| format!("{v}"))
                    .collect::<Vec<_>>();
                let sample = feat.sample.iter()
                    .map(|v| {
                        if v.is_nan() { return f64::NAN; }
                        distinct.binary_search_by(|d| d.total_cmp(v))
                            .map(|k| k as f64)
                            .unwrap_or(f64::NAN)
                    })
                    .collect();

                NominalFeature { name: feat.name, labels, sample, }
            },
        }
    }


    /// Convert `polars::Series` into `Feature`.
    /// String columns become nominal features,
    /// other columns are cast to `f64`.
    /// Null cells become missing values.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();

        if let DataType::Utf8 = series.dtype() {
            let mut feat = NominalBuilder::new(name);
            for cell in series.utf8()?.into_iter() {
                feat.push(cell);
            }
            return Ok(feat.finish());
        }

        let sample = series.cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        Ok(Self::numeric(name, sample))
    }
}


/// Returns the distinct non-missing values of `values`, ascending.
fn sorted_distinct<I>(values: I) -> Vec<f64>
    where I: Iterator<Item = f64>
{
    let mut values = values.filter(|v| !v.is_nan())
        .collect::<Vec<_>>();
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();
    values
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.values()[idx]
    }
}


/// Collects string cells into a nominal feature,
/// assigning codes in order of first appearance.
pub(crate) struct NominalBuilder {
    name: String,
    labels: Vec<String>,
    codes: HashMap<String, usize>,
    sample: Vec<f64>,
}


impl NominalBuilder {
    pub(crate) fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            labels: Vec::new(),
            codes: HashMap::new(),
            sample: Vec::with_capacity(BUF_SIZE),
        }
    }


    pub(crate) fn push(&mut self, cell: Option<&str>) {
        let Some(cell) = cell else {
            self.sample.push(f64::NAN);
            return;
        };
        let code = match self.codes.get(cell) {
            Some(&code) => code,
            None => {
                let code = self.labels.len();
                self.labels.push(cell.to_string());
                self.codes.insert(cell.to_string(), code);
                code
            },
        };
        self.sample.push(code as f64);
    }


    pub(crate) fn finish(self) -> Feature {
        Feature::Nominal(NominalFeature {
            name: self.name,
            labels: self.labels,
            sample: self.sample,
        })
    }
}
