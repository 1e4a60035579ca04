//! Enumeration of the binary partitions of nominal value codes.
//!
//! A partition of the codes `0..m` into two non-empty groups `A`, `B`
//! is represented by the bit set of `A`.
//! Code `0` always belongs to `A`,
//! so that no partition is visited together with its complement.
//! There are `2^(m-1) - 1` such partitions,
//! visited in reflected Gray-code order.
use fixedbitset::FixedBitSet;
use log::warn;

use super::criterion::{Criterion, Score};


/// Above this number of values the search is reported as expensive.
pub(crate) const LARGE_CARDINALITY: usize = 12;


/// Above this number of values no bipartition is searched.
pub const MAX_CARDINALITY: usize = 24;


/// An iterator over the group `A` of each bipartition of `0..m`.
pub struct Bipartitions {
    n_values: usize,
    next: usize,
    end: usize,
}


impl Bipartitions {
    /// Construct the enumeration of the bipartitions of `0..n_values`.
    /// Yields nothing if `n_values < 2` or `n_values > MAX_CARDINALITY`.
    pub fn new(n_values: usize) -> Self {
        let end = if (2..=MAX_CARDINALITY).contains(&n_values) {
            1usize << (n_values - 1)
        } else {
            1
        };
        Self { n_values, next: 1, end, }
    }


    /// Returns the number of bipartitions, `2^(m-1) - 1`.
    pub fn count_all(&self) -> usize {
        self.end - 1
    }
}


impl Iterator for Bipartitions {
    type Item = FixedBitSet;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end { return None; }

        let i = self.next;
        self.next += 1;
        let gray = i ^ (i >> 1);

        // Bits of `gray`, most significant first, decide codes `1..m`.
        // A zero bit puts the code into `A`.
        let m = self.n_values;
        let mut group = FixedBitSet::with_capacity(m);
        group.put(0);
        for code in 1..m {
            let bit = m - 1 - code;
            if (gray >> bit) & 1 == 0 {
                group.put(code);
            }
        }
        Some(group)
    }


    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.end - self.next;
        (rest, Some(rest))
    }
}


impl ExactSizeIterator for Bipartitions {}


/// Searches the bipartition of `0..n_values` of best score.
/// `score` evaluates the split induced by a group `A`.
/// A later candidate replaces the best one if it is at least as good.
///
/// Returns `None` if `n_values < 2` or `n_values > MAX_CARDINALITY`.
pub fn best_bipartition<F>(
    n_values: usize,
    criterion: Criterion,
    mut score: F,
) -> Option<(FixedBitSet, Score)>
    where F: FnMut(&FixedBitSet) -> Score
{
    if n_values > MAX_CARDINALITY {
        warn!(
            "{n_values} nominal values exceed {MAX_CARDINALITY}, \
            no bipartition is searched"
        );
        return None;
    }
    if n_values > LARGE_CARDINALITY {
        warn!(
            "searching {} bipartitions of {n_values} nominal values",
            Bipartitions::new(n_values).count_all()
        );
    }

    let mut best: Option<(FixedBitSet, Score)> = None;
    for group in Bipartitions::new(n_values) {
        let s = score(&group);
        let replace = match &best {
            None => true,
            Some((_, best_score)) => criterion.is_not_worse(s, *best_score),
        };
        if replace {
            best = Some((group, s));
        }
    }
    best
}
