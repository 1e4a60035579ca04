//! Defines the inner representation
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::{MiniTreeError, Result};
use crate::sample::FeatureSchema;
use super::split_rule::SplitRule;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that splits the examples by a rule.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of decision tree.
/// A `BranchNode` has one child slot per branch of its rule.
/// An empty slot is a branch that received too few examples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: SplitRule,
    pub(super) children: Vec<Option<Box<Node>>>,
}


impl BranchNode {
    #[inline]
    pub(super) fn from_raw(
        rule: SplitRule,
        children: Vec<Option<Box<Node>>>,
    ) -> Self
    {
        Self { rule, children, }
    }


    /// Returns the splitting rule of this node.
    pub fn rule(&self) -> &SplitRule {
        &self.rule
    }


    /// Returns the child slots of this node.
    pub fn children(&self) -> &[Option<Box<Node>>] {
        &self.children[..]
    }
}


/// Represents the leaf nodes of decision tree.
/// A leaf without training rows is degenerate:
/// its distribution is empty and it has no class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) rows: Vec<usize>,
    pub(super) distribution: Vec<f64>,
    pub(super) class: Option<usize>,
    pub(super) n_errors: usize,
}


impl LeafNode {
    /// Returns a `LeafNode` for the training `rows`
    /// whose class counts are `counts`.
    pub(crate) fn from_counts(rows: Vec<usize>, counts: Vec<f64>) -> Self {
        let total = counts.iter().sum::<f64>();
        if rows.is_empty() || total <= 0f64 {
            return Self::degenerate(rows);
        }

        // The first class wins ties.
        let mut class = 0;
        for (k, &c) in counts.iter().enumerate() {
            if c > counts[class] { class = k; }
        }
        let n_errors = (total - counts[class]) as usize;
        let distribution = counts.into_iter()
            .map(|c| c / total)
            .collect();

        Self { rows, distribution, class: Some(class), n_errors, }
    }


    /// Returns a leaf that no training example reached.
    #[inline]
    pub(crate) fn degenerate(rows: Vec<usize>) -> Self {
        Self { rows, distribution: Vec::new(), class: None, n_errors: 0, }
    }


    /// Returns the training rows that reached this leaf.
    pub fn rows(&self) -> &[usize] {
        &self.rows[..]
    }


    /// Returns the normalized class distribution.
    pub fn distribution(&self) -> &[f64] {
        &self.distribution[..]
    }


    /// Returns the majority class,
    /// or `None` if this leaf is degenerate.
    pub fn class(&self) -> Option<usize> {
        self.class
    }


    /// Returns `true` if no training example reached this leaf.
    pub fn is_degenerate(&self) -> bool {
        self.class.is_none()
    }
}


impl Node {
    /// Walks `instance` down to a leaf.
    /// Every value on the path must be non-missing.
    pub(crate) fn leaf_of(
        &self,
        instance: &[f64],
        schema: &[FeatureSchema],
    ) -> Result<&LeafNode>
    {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return Ok(leaf),
                Node::Branch(branch) => {
                    let feature = branch.rule.feature;
                    let b = branch.rule.branch(instance[feature]);
                    node = branch.children.get(b)
                        .and_then(|child| child.as_deref())
                        .ok_or_else(|| MiniTreeError::UnroutableInstance {
                            feature: schema[feature].name.clone(),
                            branch: b,
                        })?;
                },
            }
        }
    }


    /// Number of nodes.
    /// An empty child slot counts as one node.
    pub(crate) fn tree_size(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                1 + branch.children.iter()
                    .map(|child| child.as_ref().map_or(1, |c| c.tree_size()))
                    .sum::<usize>()
            },
        }
    }


    /// Number of leaves.
    /// An empty child slot counts as one leaf.
    pub(crate) fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                branch.children.iter()
                    .map(|child| child.as_ref().map_or(1, |c| c.n_leaves()))
                    .sum::<usize>()
            },
        }
    }


    /// Number of rules.
    /// An empty child slot counts as one rule.
    pub(crate) fn n_rules(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(branch) => {
                1 + branch.children.iter()
                    .map(|child| child.as_ref().map_or(1, |c| c.n_rules()))
                    .sum::<usize>()
            },
        }
    }


    /// Writes this subtree as indented rules, `|  ` per level.
    pub(crate) fn write_rules(
        &self,
        f: &mut fmt::Formatter<'_>,
        schema: &[FeatureSchema],
        classes: &[String],
        level: usize,
    ) -> fmt::Result
    {
        match self {
            Node::Leaf(leaf) => {
                let Some(class) = leaf.class else {
                    return write!(f, ": null");
                };
                let label = classes.get(class)
                    .map(String::as_str)
                    .unwrap_or("?");
                let n = leaf.rows.len();
                if leaf.n_errors == 0 {
                    write!(f, ": {label} ({n})")
                } else {
                    write!(f, ": {label} ({n}/{})", leaf.n_errors)
                }
            },
            Node::Branch(branch) => {
                let feature = &schema[branch.rule.feature];
                for (i, child) in branch.children.iter().enumerate() {
                    writeln!(f)?;
                    write!(f, "{}", "|  ".repeat(level))?;
                    write!(f, "{}", branch.rule.describe(feature, i))?;
                    if let Some(child) = child {
                        child.write_rules(f, schema, classes, level + 1)?;
                    }
                }
                Ok(())
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::super::split_rule::Routing;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn stump() -> (Node, Vec<FeatureSchema>) {
        let rule = SplitRule { feature: 0, routing: Routing::NumericBinary { threshold: 3.0 } };
        let left = LeafNode::from_counts(vec![0, 1, 2], vec![3.0, 0.0]);
        let children = vec![Some(Box::new(Node::Leaf(left))), None];
        let node = Node::Branch(BranchNode::from_raw(rule, children));
        let schema = vec![FeatureSchema { name: "x".to_string(), labels: None }];
        (node, schema)
    }

    #[test]
    fn test_leaf_from_counts() {
        let leaf = LeafNode::from_counts(vec![0, 1, 2, 3], vec![1.0, 3.0]);
        assert_eq!(leaf.class(), Some(1));
        assert_eq!(leaf.n_errors, 1);
        let p = leaf.distribution()[1];
        assert!((p - 0.75).abs() < TEST_TOLERANCE, "expected 0.75, got {p}.");

        let leaf = LeafNode::from_counts(vec![], vec![0.0, 0.0]);
        assert!(leaf.is_degenerate());
        assert!(leaf.distribution().is_empty());
    }

    #[test]
    fn test_leaf_tie_takes_first_class() {
        let leaf = LeafNode::from_counts(vec![0, 1], vec![1.0, 1.0]);
        assert_eq!(leaf.class(), Some(0));
    }

    #[test]
    fn test_traversal() {
        let (node, schema) = stump();
        let leaf = node.leaf_of(&[2.0], &schema).unwrap();
        assert_eq!(leaf.class(), Some(0));

        let err = node.leaf_of(&[5.0], &schema);
        assert!(matches!(
            err,
            Err(MiniTreeError::UnroutableInstance { branch: 1, .. })
        ));
    }

    #[test]
    fn test_measures() {
        let (node, _) = stump();
        assert_eq!(node.tree_size(), 3);
        assert_eq!(node.n_leaves(), 2);
        assert_eq!(node.n_rules(), 2);

        let leaf = Node::Leaf(LeafNode::degenerate(Vec::new()));
        assert_eq!(leaf.tree_size(), 1);
        assert_eq!(leaf.n_leaves(), 1);
        assert_eq!(leaf.n_rules(), 0);
    }
}
