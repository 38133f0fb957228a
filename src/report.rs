//! Reporting surface for the console layer.
//!
//! The core exposes its results as plain serializable values: the surviving
//! words grouped by length, the rejected and abelian-matched lists, and the
//! ordered scanner hits. Printing and formatting belong to the caller.
//!
//! # Determinism
//! Histogram groups live in a `BTreeMap` keyed by length; words within a
//! group appear in tree preorder, so two identical builds serialize
//! identically.

use crate::builder::BuildOutcome;
use crate::morphism::ScanHit;
use crate::tree::{BinaryTree, TreeError};
use crate::word::Word;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Surviving words grouped by length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthHistogram {
    groups: BTreeMap<usize, Vec<Word>>,
}

impl LengthHistogram {
    /// Collects every live word of `tree` in preorder, grouped by length.
    pub fn from_tree(tree: &BinaryTree<Word>) -> Result<Self, TreeError> {
        let mut groups: BTreeMap<usize, Vec<Word>> = BTreeMap::new();
        for id in tree.preorder() {
            let word = tree.get(id)?;
            groups.entry(word.len()).or_default().push(word.clone());
        }
        Ok(Self { groups })
    }

    /// Number of words of the given length.
    pub fn count(&self, len: usize) -> usize {
        self.groups.get(&len).map_or(0, Vec::len)
    }

    /// Total number of words across all groups.
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Iterates groups in increasing length order.
    pub fn groups(&self) -> impl Iterator<Item = (usize, &[Word])> {
        self.groups.iter().map(|(&len, words)| (len, words.as_slice()))
    }
}

/// Everything the reporting layer needs from one finished build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    /// Survivors grouped by length.
    pub histogram: LengthHistogram,
    /// Words rejected at insertion time, in generation order.
    pub rejected: Vec<Word>,
    /// Words matched during the abelian cleanup pass, in preorder.
    pub abelian_matched: Vec<Word>,
}

impl BuildReport {
    /// Summarizes a build outcome.
    pub fn from_outcome(outcome: &BuildOutcome) -> Result<Self, TreeError> {
        Ok(Self {
            histogram: LengthHistogram::from_tree(&outcome.tree)?,
            rejected: outcome.rejected.clone(),
            abelian_matched: outcome.abelian_matched.clone(),
        })
    }
}

/// The morphism scanner's result list, in expansion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Hits in the order the expansions produced them.
    pub hits: Vec<ScanHit>,
}

impl ScanReport {
    /// Wraps the scanner output.
    pub fn new(hits: Vec<ScanHit>) -> Self {
        Self { hits }
    }

    /// True when no expansion matched before the cap.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build, BuildConfig};
    use crate::forbidden::ForbiddenSet;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn unfiltered(max_len: usize) -> BuildOutcome {
        build(
            &BuildConfig {
                first: w("A"),
                second: w("B"),
                max_len,
            },
            &ForbiddenSet::empty(),
        )
        .unwrap()
    }

    #[test]
    fn histogram_of_complete_depth_three_tree() {
        let outcome = unfiltered(3);
        let histogram = LengthHistogram::from_tree(&outcome.tree).unwrap();
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.count(1), 2);
        assert_eq!(histogram.count(2), 4);
        assert_eq!(histogram.count(3), 8);
        assert_eq!(histogram.count(4), 0);
        assert_eq!(histogram.total(), 15);
    }

    #[test]
    fn groups_iterate_in_length_order() {
        let outcome = unfiltered(2);
        let histogram = LengthHistogram::from_tree(&outcome.tree).unwrap();
        let lengths: Vec<usize> = histogram.groups().map(|(len, _)| len).collect();
        assert_eq!(lengths, vec![0, 1, 2]);
    }

    #[test]
    fn report_round_trips_through_serde() {
        let outcome = unfiltered(2);
        let report = BuildReport::from_outcome(&outcome).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: BuildReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.histogram, report.histogram);
        assert_eq!(back.rejected, report.rejected);
    }
}
