use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;

use crate::error::{MiniTreeError, Result};
use super::feature_struct::*;


/// A cell that reads as a missing value.
const MISSING_CELL: &str = "?";


/// Struct `Sample` holds a batch sample of nominal/numeric features
/// and a nominal class column.
/// A missing feature value or a missing class is `f64::NAN`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) classes: Vec<String>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a `Sample` from feature columns and a class column.
    /// If `target` is numeric, its distinct values become
    /// the class labels in ascending order.
    pub fn new(features: Vec<Feature>, target: Feature) -> Result<Self> {
        let target = target.into_nominal();
        let n_sample = target.sample.len();

        for feat in features.iter() {
            if feat.len() != n_sample {
                return Err(MiniTreeError::ShapeMismatch {
                    name: feat.name().to_string(),
                    expected: n_sample,
                    got: feat.len(),
                });
            }
        }

        let n_feature = features.len();
        let name_to_index = index_names(&features[..]);
        let sample = Self {
            name_to_index,
            features,
            target: target.sample,
            classes: target.labels,
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Convert `polars::DataFrame` into `Sample`.
    /// The column named `target` becomes the class column.
    pub fn from_dataframe<S>(data: &DataFrame, target: S) -> Result<Self>
        where S: AsRef<str>
    {
        let target = target.as_ref();
        let mut class = None;
        let mut features = Vec::with_capacity(data.width());
        for series in data.get_columns() {
            let feature = Feature::from_series(series)?;
            if series.name() == target {
                class = Some(feature);
            } else {
                features.push(feature);
            }
        }

        let class = class.ok_or_else(|| {
            MiniTreeError::MissingColumn(target.to_string())
        })?;
        Self::new(features, class)
    }


    /// Read a CSV format file to `Sample` type.
    /// The returned sample has no class column yet;
    /// call [`Sample::set_target`] to assign one.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        Self::from_reader(BufReader::new(file), has_header)
    }


    /// Read comma-separated lines from `reader`.
    /// `?` and empty cells are missing values.
    /// A column whose present cells all parse as `f64` is numeric,
    /// otherwise it is nominal with labels in order of first appearance.
    pub fn from_reader<R>(reader: R, has_header: bool) -> Result<Self>
        where R: BufRead,
    {
        let mut lines = reader.lines().enumerate();

        let mut names = Vec::new();
        if has_header {
            if let Some((_, line)) = lines.next() {
                names = line?.split(',')
                    .map(|name| name.trim().to_string())
                    .collect::<Vec<_>>();
            }
        }

        let mut columns: Vec<Vec<Option<String>>> = Vec::new();
        for (i, line) in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let cells = line.split(',')
                .map(|cell| {
                    let cell = cell.trim();
                    if cell.is_empty() || cell == MISSING_CELL {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect::<Vec<_>>();

            // If the header does not exist,
            // construct a dummy header.
            if names.is_empty() {
                names = (1..=cells.len())
                    .map(|k| format!("Feat. [{k}]"))
                    .collect();
            }
            if columns.is_empty() {
                columns = vec![Vec::new(); names.len()];
            }

            if cells.len() != names.len() {
                return Err(MiniTreeError::Parse {
                    line: i + 1,
                    reason: format!(
                        "expected {} cells, found {}",
                        names.len(), cells.len()
                    ),
                });
            }
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }
        if columns.is_empty() {
            columns = vec![Vec::new(); names.len()];
        }

        let features = names.into_iter()
            .zip(columns)
            .map(|(name, cells)| column_to_feature(name, cells))
            .collect::<Vec<_>>();

        let n_sample = features.first().map(|f| f.len()).unwrap_or(0);
        let n_feature = features.len();
        let name_to_index = index_names(&features[..]);
        let sample = Self {
            name_to_index,
            features,
            target: Vec::new(),
            classes: Vec::new(),
            n_sample,
            n_feature,
        };
        Ok(sample)
    }


    /// Set the feature of name `target` to the class column.
    /// The old class column will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| MiniTreeError::MissingColumn(target.to_string()))?;

        let class = self.features.remove(pos).into_nominal();
        self.target = class.sample;
        self.classes = class.labels;
        self.n_feature -= 1;
        self.name_to_index = index_names(&self.features[..]);

        Ok(self)
    }


    /// Returns the pair of the number of examples and
    /// the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the class codes. A missing class is `f64::NAN`.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns the class labels.
    pub fn classes(&self) -> &[String] {
        &self.classes[..]
    }


    /// Returns the number of classes.
    pub fn n_class(&self) -> usize {
        self.classes.len()
    }


    /// Returns the class of `row`, or `None` if it is missing.
    #[inline]
    pub fn class_of(&self, row: usize) -> Option<usize> {
        let y = self.target[row];
        if y.is_nan() { None } else { Some(y as usize) }
    }


    /// Returns the rows whose class is not missing.
    pub fn labeled_rows(&self) -> Vec<usize> {
        (0..self.n_sample).filter(|&i| self.class_of(i).is_some())
            .collect()
    }


    /// Counts the classes of `rows`.
    /// The `k`-th entry is the number of rows whose class is `k`.
    pub fn class_counts(&self, rows: &[usize]) -> Vec<f64> {
        let mut counts = vec![0f64; self.n_class()];
        for &i in rows {
            if let Some(c) = self.class_of(i).and_then(|y| counts.get_mut(y)) {
                *c += 1f64;
            }
        }
        counts
    }


    /// Returns the feature values of `row`.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[row])
            .collect()
    }
}


impl Index<&str> for Sample {
    type Output = Feature;
    fn index(&self, name: &str) -> &Self::Output {
        let idx = self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature named `{name}` does not exist"));
        &self.features[*idx]
    }
}


fn index_names(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect()
}


fn column_to_feature(name: String, cells: Vec<Option<String>>) -> Feature {
    let parsed = cells.iter()
        .map(|cell| match cell {
            Some(cell) => cell.parse::<f64>().ok(),
            None => Some(f64::NAN),
        })
        .collect::<Option<Vec<_>>>();

    match parsed {
        Some(sample) => Feature::numeric(name, sample),
        None => {
            let mut feat = NominalBuilder::new(name);
            for cell in cells.iter() {
                feat.push(cell.as_deref());
            }
            feat.finish()
        },
    }
}
