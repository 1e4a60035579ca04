//! Defines the decision tree classifier.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufWriter};

use crate::Classifier;
use crate::error::{MiniTreeError, Result};
use crate::sample::FeatureSchema;
use super::node::*;


/// Decision tree classifier.
/// Holds the tree together with what it needs to classify
/// and print an instance: the feature schema, the class labels and
/// the training-set mean/mode of each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    root: Node,
    schema: Vec<FeatureSchema>,
    classes: Vec<String>,
    fill_values: Vec<f64>,
    majority_class: Option<usize>,
}


impl DecisionTreeClassifier {
    #[inline]
    pub(super) fn from_components(
        root: Node,
        schema: Vec<FeatureSchema>,
        classes: Vec<String>,
        fill_values: Vec<f64>,
        majority_class: Option<usize>,
    ) -> Self
    {
        Self { root, schema, classes, fill_values, majority_class, }
    }


    /// Returns the root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the schema of the training features.
    pub fn schema(&self) -> &[FeatureSchema] {
        &self.schema[..]
    }


    /// Returns the class labels.
    pub fn classes(&self) -> &[String] {
        &self.classes[..]
    }


    /// Returns the majority class of the training sample,
    /// or `None` if the sample has no labeled row.
    pub fn majority_class(&self) -> Option<usize> {
        self.majority_class
    }


    /// Returns a copy of `instance` whose missing values are replaced
    /// by the training-set mean (numeric) or mode (nominal).
    pub fn impute(&self, instance: &[f64]) -> Result<Vec<f64>> {
        self.check_width(instance)?;
        let filled = instance.iter()
            .zip(&self.fill_values)
            .map(|(&v, &fill)| if v.is_nan() { fill } else { v })
            .collect();
        Ok(filled)
    }


    /// Number of nodes. An empty child slot counts as one.
    pub fn tree_size(&self) -> usize {
        self.root.tree_size()
    }


    /// Number of leaves. An empty child slot counts as one.
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Number of rules. An empty child slot counts as one.
    pub fn n_rules(&self) -> usize {
        self.root.n_rules()
    }


    /// Serialize this tree as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Deserialize a tree from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }


    /// Write this tree to `path` as JSON.
    pub fn save<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }


    /// Read a tree written by [`DecisionTreeClassifier::save`].
    pub fn load<P>(path: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }


    fn check_width(&self, instance: &[f64]) -> Result<()> {
        let expected = self.schema.len();
        if instance.len() != expected {
            return Err(MiniTreeError::InstanceWidth {
                expected,
                got: instance.len(),
            });
        }
        Ok(())
    }


    fn leaf_of(&self, instance: &[f64]) -> Result<&LeafNode> {
        let instance = self.impute(instance)?;
        self.root.leaf_of(&instance[..], &self.schema[..])
    }
}


impl Classifier for DecisionTreeClassifier {
    fn classify(&self, instance: &[f64]) -> Result<usize> {
        self.leaf_of(instance)?
            .class()
            .ok_or(MiniTreeError::NoTrainingCoverage)
    }


    fn class_distribution(&self, instance: &[f64]) -> Result<Vec<f64>> {
        let leaf = self.leaf_of(instance)?;
        Ok(leaf.distribution().to_vec())
    }
}


impl fmt::Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MiniTree")?;
        write!(f, "------------------")?;
        if let Node::Leaf(_) = self.root {
            writeln!(f)?;
        }
        self.root.write_rules(f, &self.schema[..], &self.classes[..], 0)?;
        write!(f, "\n\nSize of the tree: {}", self.tree_size())?;
        write!(f, "\n\nNumber of leaves: {}", self.n_leaves())
    }
}
