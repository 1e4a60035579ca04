//! Split generators.
//! Each generator partitions the rows at a node by one feature
//! and returns the routing data that reproduces the partition.
use super::builder::SplitStyle;
use super::criterion::{Criterion, Score};
use super::split_rule::{SplitRule, Routing};
use super::bipartition::best_bipartition;

use crate::sample::{Sample, Feature};


/// A candidate split of the rows at a node.
#[derive(Debug, Clone)]
pub(crate) struct Split {
    /// The routing data.
    pub(crate) rule: SplitRule,
    /// Rows of each branch.
    pub(crate) branches: Vec<Vec<usize>>,
    /// The score of this split.
    pub(crate) score: Score,
}


impl Split {
    /// Returns the number of branches holding at least one row.
    pub(crate) fn n_nonempty(&self) -> usize {
        self.branches.iter()
            .filter(|rows| !rows.is_empty())
            .count()
    }


    /// Returns `true` if every branch holds more than `min_leaf_size` rows.
    pub(crate) fn all_branches_exceed(&self, min_leaf_size: f64) -> bool {
        self.branches.iter()
            .all(|rows| rows.len() as f64 > min_leaf_size)
    }
}


/// Splits the rows at a node.
/// A missing value is replaced by `fill[feature]`,
/// except for the numeric multi-way split that drops such rows.
pub(crate) struct Splitter<'a> {
    sample: &'a Sample,
    criterion: Criterion,
    style: SplitStyle,
    fill: &'a [f64],
}


impl<'a> Splitter<'a> {
    pub(crate) fn new(
        sample: &'a Sample,
        criterion: Criterion,
        style: SplitStyle,
        fill: &'a [f64],
    ) -> Self
    {
        Self { sample, criterion, style, fill, }
    }


    /// Split `rows` by the `feature`-th feature.
    pub(crate) fn split(&self, feature: usize, rows: &[usize]) -> Split {
        let feat = &self.sample.features()[feature];
        match (feat, self.style) {
            (Feature::Nominal(_), SplitStyle::Multiway)
                => self.nominal_multiway(feature, rows),
            (Feature::Nominal(_), SplitStyle::Binary)
                => self.nominal_binary(feature, rows),
            (Feature::Numeric(_), SplitStyle::Multiway)
                => self.numeric_multiway(feature, rows),
            (Feature::Numeric(_), SplitStyle::Binary)
                => self.numeric_binary(feature, rows),
        }
    }


    /// Feature value at `row`, with the fill value for a missing one.
    #[inline]
    fn value(&self, feature: usize, row: usize) -> f64 {
        self.sample.features()[feature]
            .value(row)
            .unwrap_or(self.fill[feature])
    }


    fn score(&self, parent: &[f64], branches: &[Vec<usize>]) -> Score {
        let children = branches.iter()
            .map(|rows| self.sample.class_counts(rows))
            .collect::<Vec<_>>();
        self.criterion.score(parent, &children[..])
    }


    /// Route every row of `rows` with `rule`.
    /// Rows routed out of range are dropped.
    fn partition(&self, rule: &SplitRule, rows: &[usize]) -> Vec<Vec<usize>> {
        let mut branches = vec![Vec::new(); rule.n_branches()];
        for &i in rows {
            let b = rule.branch(self.value(rule.feature, i));
            if let Some(branch) = branches.get_mut(b) {
                branch.push(i);
            }
        }
        branches
    }


    /// One branch per value code.
    fn nominal_multiway(&self, feature: usize, rows: &[usize]) -> Split {
        let n_values = self.sample.features()[feature]
            .n_values()
            .unwrap_or(0);
        let rule = SplitRule::new(feature, Routing::NominalMultiway { n_values });
        let branches = self.partition(&rule, rows);

        let parent = self.sample.class_counts(rows);
        let score = self.score(&parent, &branches[..]);
        Split { rule, branches, score, }
    }


    /// Two groups of value codes, the best bipartition of the codes.
    fn nominal_binary(&self, feature: usize, rows: &[usize]) -> Split {
        let n_values = self.sample.features()[feature]
            .n_values()
            .unwrap_or(0);
        let parent = self.sample.class_counts(rows);

        let group = if n_values < 2 || rows.len() < 2 {
            // Degenerate split: every row goes to branch `0`.
            (0..n_values).collect::<Vec<_>>()
        } else {
            // Class counts per value code.
            let n_class = self.sample.n_class();
            let mut counts = vec![vec![0f64; n_class]; n_values];
            for &i in rows {
                let code = self.value(feature, i) as usize;
                let class = self.sample.class_of(i);
                if let Some(c) = counts.get_mut(code)
                    .zip(class)
                    .and_then(|(per_class, y)| per_class.get_mut(y))
                {
                    *c += 1f64;
                }
            }

            let best = best_bipartition(n_values, self.criterion, |group| {
                let mut children = vec![vec![0f64; n_class]; 2];
                for (code, per_class) in counts.iter().enumerate() {
                    let b = if group.contains(code) { 0 } else { 1 };
                    children[b].iter_mut()
                        .zip(per_class)
                        .for_each(|(c, k)| *c += k);
                }
                self.criterion.score(&parent, &children[..])
            });
            match best {
                Some((group, _)) => group.ones().collect(),
                None => (0..n_values).collect(),
            }
        };

        let rule = SplitRule::new(feature, Routing::NominalBinary { group });
        let branches = self.partition(&rule, rows);
        let score = self.score(&parent, &branches[..]);
        Split { rule, branches, score, }
    }


    /// `max(2, floor(log2 N))` equal-width bins over the observed range.
    /// Rows with a missing value are dropped.
    fn numeric_multiway(&self, feature: usize, rows: &[usize]) -> Split {
        let feat = &self.sample.features()[feature];
        let n_bins = ((rows.len() as f64).log2().floor() as usize).max(2);

        let (min, max) = rows.iter()
            .filter_map(|&i| feat.value(i))
            .fold(None, |range: Option<(f64, f64)>, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0f64, 0f64));

        let width = (max - min) / n_bins as f64;
        let thresholds = (1..=n_bins)
            .map(|k| min + k as f64 * width)
            .collect::<Vec<_>>();
        let rule = SplitRule::new(feature, Routing::NumericMultiway { thresholds });

        let mut branches = vec![Vec::new(); n_bins];
        for &i in rows {
            if let Some(v) = feat.value(i) {
                branches[rule.branch(v)].push(i);
            }
        }

        let parent = self.sample.class_counts(rows);
        let score = self.score(&parent, &branches[..]);
        Split { rule, branches, score, }
    }


    /// `x <= v` vs. `x > v` for the best observed value `v`.
    fn numeric_binary(&self, feature: usize, rows: &[usize]) -> Split {
        let parent = self.sample.class_counts(rows);

        let mut pairs = rows.iter()
            .map(|&i| (self.value(feature, i), i))
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = vec![0f64; parent.len()];
        let mut best: Option<(f64, Score)> = None;
        let mut iter = pairs.iter().peekable();
        while let Some(&(v, i)) = iter.next() {
            if let Some(y) = self.sample.class_of(i) {
                left[y] += 1f64;
            }
            // Evaluate a threshold once all rows of value `v` are on the left.
            if iter.peek().is_some_and(|(next, _)| *next == v) { continue; }

            let right = parent.iter()
                .zip(&left)
                .map(|(p, l)| p - l)
                .collect::<Vec<_>>();
            let score = self.criterion.score(&parent, &[left.clone(), right]);
            let replace = match best {
                None => true,
                Some((_, best_score)) => self.criterion.is_better(score, best_score),
            };
            if replace {
                best = Some((v, score));
            }
        }

        let threshold = best.map(|(v, _)| v).unwrap_or(0f64);
        let rule = SplitRule::new(feature, Routing::NumericBinary { threshold });
        let branches = self.partition(&rule, rows);
        let score = self.score(&parent, &branches[..]);
        Split { rule, branches, score, }
    }
}
