//! Avoidance: brute-force search for abelian pattern avoidance in binary words.
//!
//! This crate implements two search procedures over words on a two-letter
//! alphabet, both built on an exhaustive abelian pattern matcher:
//! - pruned breadth-first construction of the complete length-bounded binary
//!   tree of concatenation words, with cascading removal of subtrees that
//!   become forbidden only after the fact;
//! - iterated morphism expansion with whole-word pattern scanning.
//!
//! A word is an *abelian instance* of a block-pattern when it can be sliced
//! into contiguous blocks, one per pattern position, such that blocks sharing
//! a meta-symbol have equal letter counts — a strictly weaker relation than
//! literal equality, which is what makes the search interesting: filters
//! tuned for exact substrings miss abelian repetitions, and the cleanup
//! passes exist to chase exactly those.
//!
//! # Mathematical background
//!
//! Avoidability of abelian repetitions is a classical thread of combinatorics
//! on words: Erdős asked in 1961 whether abelian squares are avoidable over a
//! finite alphabet; Keränen settled the four-letter case in 1992. Over two
//! letters nothing nontrivial is avoidable in the abelian sense, which is why
//! the searches here are length-bounded enumerations rather than proofs.
//!
//! # References
//!
//! - Thue, "Über unendliche Zeichenreihen" (1906)
//! - Erdős, "Some unsolved problems", Section 10 (1961)
//! - Keränen, "Abelian squares are avoidable on 4 letters" (1992)
//! - Lothaire, "Combinatorics on Words" (1983)
//!
//! # Example
//!
//! ```
//! use avoidance::prelude::*;
//!
//! let forbidden = ForbiddenSet::close(&["AA".parse().unwrap()]);
//! let config = BuildConfig {
//!     first: "A".parse().unwrap(),
//!     second: "B".parse().unwrap(),
//!     max_len: 4,
//! };
//! let outcome = build(&config, &forbidden).unwrap();
//! assert!(outcome.rejected.iter().all(|w| forbidden.is_forbidden(w)));
//! ```

pub mod builder;
pub mod forbidden;
pub mod morphism;
pub mod pattern;
pub mod report;
pub mod tree;
pub mod word;

pub use builder::{build, build_from_strs, build_to_fixpoint, BuildConfig, BuildError, BuildOutcome};
pub use forbidden::{default_base, ForbiddenSet};
pub use morphism::{scan, Morphism, MorphismError, ScanHit};
pub use pattern::{Instance, Pattern, PatternError, Symbol};
pub use report::{BuildReport, LengthHistogram, ScanReport};
pub use tree::{BinaryTree, NodeId, TreeError};
pub use word::{Alphabet, Letter, Profile, Word, WordError};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::builder::{
        build, build_from_strs, build_to_fixpoint, BuildConfig, BuildError, BuildOutcome,
    };
    pub use crate::forbidden::{default_base, ForbiddenSet};
    pub use crate::morphism::{scan, Morphism, MorphismError, ScanHit};
    pub use crate::pattern::{Instance, Pattern, PatternError, Symbol};
    pub use crate::report::{BuildReport, LengthHistogram, ScanReport};
    pub use crate::tree::{BinaryTree, NodeId, TreeError};
    pub use crate::word::{Alphabet, Letter, Profile, Word, WordError};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    /// The unfiltered depth-3 tree is the complete binary tree: root plus
    /// 2 + 4 + 8 descendants.
    #[test]
    fn complete_tree_without_filters() {
        let config = BuildConfig {
            first: w("A"),
            second: w("B"),
            max_len: 3,
        };
        let outcome = build(&config, &ForbiddenSet::empty()).unwrap();
        assert_eq!(outcome.tree.len(), 15);
        let histogram = LengthHistogram::from_tree(&outcome.tree).unwrap();
        assert_eq!(
            (0..=3).map(|l| histogram.count(l)).collect::<Vec<_>>(),
            vec![1, 2, 4, 8]
        );
    }

    /// End-to-end postconditions: no survivor contains an exact forbidden
    /// substring, and no survivor contains any abelian-matched word.
    #[test]
    fn build_postconditions_hold() {
        let forbidden = ForbiddenSet::close(&[w("AAB")]);
        let config = BuildConfig {
            first: w("A"),
            second: w("B"),
            max_len: 7,
        };
        let outcome = build(&config, &forbidden).unwrap();
        for id in outcome.tree.preorder() {
            let word = outcome.tree.get(id).unwrap();
            assert!(!forbidden.is_forbidden(word));
            for matched in &outcome.abelian_matched {
                assert!(!word.contains(matched));
            }
        }
    }

    /// The string-level entry point drives the whole pipeline with the stock
    /// base list, the way the original search is configured.
    #[test]
    fn stock_base_list_end_to_end() {
        let base: Vec<&str> = avoidance_base_subset();
        let outcome = build_from_strs("A", "B", 6, &base).unwrap();
        let forbidden = ForbiddenSet::close(
            &base.iter().map(|s| s.parse().unwrap()).collect::<Vec<Word>>(),
        );
        for id in outcome.tree.preorder() {
            assert!(!forbidden.is_forbidden(outcome.tree.get(id).unwrap()));
        }
    }

    // A small prefix of the stock list keeps the end-to-end test fast; the
    // full list is exercised by the forbidden-set unit tests.
    fn avoidance_base_subset() -> Vec<&'static str> {
        crate::forbidden::DEFAULT_BASE.iter().take(8).copied().collect()
    }

    /// Thue–Morse scan from the README-style configuration: seed "0",
    /// rules 0 ↦ 01 and 1 ↦ 10, target pattern the abelian square.
    #[test]
    fn thue_morse_abelian_square_scan() {
        let morphism = Morphism::new(
            Alphabet::BINARY.parse("01").unwrap(),
            Alphabet::BINARY.parse("10").unwrap(),
        )
        .unwrap();
        let pattern = Pattern::parse("AA").unwrap();
        let seed = Alphabet::BINARY.parse("0").unwrap();

        let hits = scan(&pattern, &seed, &morphism, 8);
        let report = ScanReport::new(hits);
        assert!(!report.is_empty());
        assert_eq!(report.hits[0].word.len(), 4);

        // A cap below the first matching length yields the empty list.
        let early = scan(&pattern, &seed, &morphism, 1);
        assert!(ScanReport::new(early).is_empty());
    }

    /// Stale ids must fail with a distinct error, never reach removed state.
    #[test]
    fn removed_nodes_error_cleanly() {
        let config = BuildConfig {
            first: w("A"),
            second: w("B"),
            max_len: 4,
        };
        let outcome = build(&config, &ForbiddenSet::close(&[w("AA")])).unwrap();
        let mut tree = outcome.tree;
        let root = tree.root().unwrap();
        let left = tree.left(root).unwrap().unwrap();
        tree.remove_subtree(left).unwrap();
        assert_eq!(tree.get(left), Err(TreeError::StaleNode(left)));
    }
}
