use rayon::prelude::*;
use log::{debug, info, trace};


use crate::Sample;
use crate::error::{MiniTreeError, Result};


use super::{
    node::*,
    criterion::Criterion,
    splitter::{Split, Splitter},
    builder::TreeConfig,
    dtree_classifier::DecisionTreeClassifier,
};


/// Generates a `DecisionTreeClassifier` for a given sample.
/// Construct it with [`DecisionTreeBuilder`](super::DecisionTreeBuilder).
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    config: TreeConfig,
}


impl DecisionTree {
    #[inline]
    pub(super) fn from_config(config: TreeConfig) -> Self {
        Self { config }
    }


    /// Returns the parameters of this tree.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }


    /// Grow a decision tree on `sample`.
    ///
    /// This method computes as follows;
    /// 1. drop the rows whose class is missing,
    /// 2. compute the mean/mode of each feature and the majority class
    ///     over the remaining rows,
    /// 3. grow the tree top-down from the remaining rows.
    pub fn produce(&self, sample: &Sample) -> Result<DecisionTreeClassifier> {
        if sample.n_class() == 0 {
            return Err(MiniTreeError::EmptyTrainingSet);
        }

        let rows = sample.labeled_rows();
        let fill_values = sample.features()
            .iter()
            .map(|feat| feat.mean_or_mode(&rows[..]))
            .collect::<Vec<_>>();
        let majority_class = LeafNode::from_counts(
            rows.clone(), sample.class_counts(&rows[..])
        ).class();

        let splitter = Splitter::new(
            sample,
            self.config.criterion,
            self.config.split_style,
            &fill_values[..],
        );
        let root = self.grow(sample, &splitter, rows);

        info!(
            "grew a decision tree ({}, {}) with {} nodes and {} leaves",
            self.config.criterion,
            self.config.split_style,
            root.tree_size(),
            root.n_leaves(),
        );

        let schema = sample.features()
            .iter()
            .map(|feat| feat.schema())
            .collect();
        let classifier = DecisionTreeClassifier::from_components(
            root,
            schema,
            sample.classes().to_vec(),
            fill_values,
            majority_class,
        );
        Ok(classifier)
    }


    /// Grow the subtree for `rows`.
    fn grow(&self, sample: &Sample, splitter: &Splitter<'_>, rows: Vec<usize>)
        -> Node
    {
        debug!("new node with {} rows", rows.len());

        // Nothing reached this node.
        if rows.is_empty() {
            debug!("degenerate leaf");
            return Node::Leaf(LeafNode::degenerate(rows));
        }

        let Some(split) = self.best_split(sample, splitter, &rows[..]) else {
            return leaf(sample, rows);
        };

        let min_leaf_size = self.config.min_leaf_size;
        let passes = split.all_branches_exceed(min_leaf_size);
        let criterion = self.config.criterion;

        // NOTE: with the Gini criterion a split is only accepted
        // when every branch passes the size check,
        // whatever its score.
        let stop = (criterion.is_no_information(split.score) && !passes)
            || (criterion == Criterion::Gini && !passes)
            || split.n_nonempty() < 2;
        if stop {
            return leaf(sample, rows);
        }

        let name = sample.features()[split.rule.feature].name();
        debug!(
            "split on `{name}` into {} branches (score {})",
            split.rule.n_branches(), split.score,
        );

        let Split { rule, branches, .. } = split;
        let children = branches.into_iter()
            .map(|branch| {
                if branch.len() as f64 >= min_leaf_size {
                    Some(Box::new(self.grow(sample, splitter, branch)))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        Node::Branch(BranchNode::from_raw(rule, children))
    }


    /// Split `rows` by every feature and returns the best split.
    /// The first feature wins ties.
    fn best_split(&self, sample: &Sample, splitter: &Splitter<'_>, rows: &[usize])
        -> Option<Split>
    {
        let (_, n_feature) = sample.shape();
        let splits = (0..n_feature).into_par_iter()
            .map(|j| splitter.split(j, rows))
            .collect::<Vec<_>>();

        let criterion = self.config.criterion;
        let mut best: Option<Split> = None;
        for split in splits {
            trace!(
                "feature `{}` scores {}",
                sample.features()[split.rule.feature].name(),
                split.score,
            );
            let replace = match &best {
                None => true,
                Some(b) => criterion.is_better(split.score, b.score),
            };
            if replace {
                best = Some(split);
            }
        }
        best
    }
}


/// Construct a leaf for the training `rows`.
#[inline]
fn leaf(sample: &Sample, rows: Vec<usize>) -> Node {
    let counts = sample.class_counts(&rows[..]);
    let leaf = LeafNode::from_counts(rows, counts);
    debug!("leaf with {} rows, class {:?}", leaf.rows().len(), leaf.class());
    Node::Leaf(leaf)
}
