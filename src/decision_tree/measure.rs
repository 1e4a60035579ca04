//! Defines some functions that measure the node impurity.
//!
//! Every function takes class counts,
//! the `k`-th entry being the number of examples of class `k`.
//! A split is given as the counts of the parent node
//! and the counts of each branch.


/// Returns the number of examples in `counts`.
#[inline(always)]
fn total(counts: &[f64]) -> f64 {
    counts.iter().sum::<f64>()
}


/// Shannon entropy (base 2) of the class distribution.
/// Returns `0` for an empty node.
#[inline]
pub fn entropy(counts: &[f64]) -> f64 {
    let n = total(counts);
    if n <= 0f64 { return 0f64; }

    counts.iter()
        .map(|&c| {
            let p = c / n;
            if p <= 0f64 { 0f64 } else { -p * p.log2() }
        })
        .sum::<f64>()
}


/// Information gain of the split `children` of `parent`.
/// Empty branches do not contribute.
pub fn info_gain(parent: &[f64], children: &[Vec<f64>]) -> f64 {
    let n = total(parent);
    let mut gain = entropy(parent);
    if n <= 0f64 { return gain; }

    for child in children {
        let size = total(child);
        if size <= 0f64 { continue; }
        gain -= (size / n) * entropy(child);
    }
    gain
}


/// Split information, the entropy of the branch sizes.
/// Returns `0` if there are no (non-empty) branches.
pub fn split_info(parent: &[f64], children: &[Vec<f64>]) -> f64 {
    let n = total(parent);
    if n <= 0f64 { return 0f64; }

    children.iter()
        .map(|child| {
            let r = total(child) / n;
            if r <= 0f64 { 0f64 } else { -r * r.log2() }
        })
        .sum::<f64>()
}


/// Information gain normalized by the split information.
/// A split with zero split information,
/// e.g., a split with a single non-empty branch, has gain ratio `0`.
pub fn gain_ratio(parent: &[f64], children: &[Vec<f64>]) -> f64 {
    let si = split_info(parent, children);
    if si == 0f64 { return 0f64; }
    info_gain(parent, children) / si
}


/// Gini impurity `1 - Σ p_c^2`.
/// Returns `0` for an empty node.
#[inline]
pub fn gini_impurity(counts: &[f64]) -> f64 {
    let n = total(counts);
    if n <= 0f64 { return 0f64; }

    let correct = counts.iter()
        .map(|&c| (c / n).powi(2))
        .sum::<f64>();

    (1f64 - correct).max(0f64)
}


/// Decrease of the Gini impurity achieved by the split.
pub fn gini_reduction(parent: &[f64], children: &[Vec<f64>]) -> f64 {
    let n = total(parent);
    let mut reduction = gini_impurity(parent);
    if n <= 0f64 { return reduction; }

    for child in children {
        reduction -= (total(child) / n) * gini_impurity(child);
    }
    reduction
}
