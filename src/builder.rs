//! Pruned breadth-first construction of the concatenation tree.
//!
//! The builder grows the complete binary tree of words formed by appending
//! two fixed extension words up to a maximum length, rejecting candidates
//! that contain an exact forbidden substring at insertion time, then runs two
//! cleanup passes:
//!
//! 1. **abelian cleanup** — every surviving word is searched for an abelian
//!    instance of each rejected word (the rejected word read as a
//!    block-pattern); matching nodes lose their whole subtree, and the
//!    matching words are recorded;
//! 2. **cascade** — any remaining word that exactly contains one of those
//!    recorded words loses its subtree too, because an abelian match can
//!    expose a literal substring the original forbidden set never listed.
//!
//! The passes communicate through explicit return values, never shared
//! mutable state, so each phase is testable in isolation and [`build`] is
//! reentrant. Scheduled removals carry [`NodeId`]s, not payload copies;
//! an id freed by an earlier ancestor removal is detected via
//! [`BinaryTree::contains`] and skipped.
//!
//! The default pipeline is a deliberate two-hop closure, not a fixpoint: a
//! survivor may still contain an abelian instance of an *original* base
//! pattern that never surfaced as a rejected witness. [`build_to_fixpoint`]
//! repeats the two passes until a full round removes nothing, for callers
//! who want the stronger guarantee.
//!
//! # Determinism
//! - BFS pops oldest-first; `first` is always tried before `second`, fixing
//!   the left/right child assignment and hence preorder output.
//! - Cleanup passes walk the preorder snapshot, so removal order is a
//!   function of tree shape alone.

use crate::forbidden::ForbiddenSet;
use crate::pattern::Pattern;
use crate::tree::{BinaryTree, NodeId, TreeError};
use crate::word::{Alphabet, Word, WordError};
use std::collections::VecDeque;
use std::fmt;

/// Error raised before or during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// One of the extension words is empty.
    EmptyExtension,
    /// The extension words jointly use more than two distinct letters.
    InvalidAlphabet(char),
    /// A tree operation failed; indicates a builder bug, surfaced rather
    /// than swallowed.
    Tree(TreeError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyExtension => write!(f, "extension words must be non-empty"),
            BuildError::InvalidAlphabet(c) => {
                write!(f, "extension words use a third letter {c:?}")
            }
            BuildError::Tree(err) => write!(f, "tree operation failed: {err}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for BuildError {
    fn from(err: TreeError) -> Self {
        BuildError::Tree(err)
    }
}

/// Configuration for one build: the two extension words and the length bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Appended first; successful insertions become left children.
    pub first: Word,
    /// Appended second; successful insertions become right children.
    pub second: Word,
    /// Maximum word length in letters; longer candidates are never generated.
    pub max_len: usize,
}

impl BuildConfig {
    /// Validates the extension words. Alphabet size is bounded by the `Word`
    /// type; emptiness still has to be checked.
    fn validate(&self) -> Result<(), BuildError> {
        if self.first.is_empty() || self.second.is_empty() {
            return Err(BuildError::EmptyExtension);
        }
        Ok(())
    }
}

/// Everything a finished build exposes to callers.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The pruned tree; the root holds the empty word.
    pub tree: BinaryTree<Word>,
    /// Words that failed the exact forbidden test at insertion time, in
    /// generation order.
    pub rejected: Vec<Word>,
    /// Words found during abelian cleanup to be (or contain) abelian
    /// instances of rejected words, in preorder.
    pub abelian_matched: Vec<Word>,
}

/// Runs the full pipeline: grow, abelian cleanup, cascade.
pub fn build(config: &BuildConfig, forbidden: &ForbiddenSet) -> Result<BuildOutcome, BuildError> {
    let (mut tree, rejected) = grow(config, forbidden)?;
    let abelian_matched = abelian_cleanup(&mut tree, &rejected)?;
    cascade(&mut tree, &abelian_matched)?;
    Ok(BuildOutcome {
        tree,
        rejected,
        abelian_matched,
    })
}

/// Like [`build`], but repeats cleanup and cascade until a full round
/// removes no node, closing the filter under its own consequences.
pub fn build_to_fixpoint(
    config: &BuildConfig,
    forbidden: &ForbiddenSet,
) -> Result<BuildOutcome, BuildError> {
    let (mut tree, rejected) = grow(config, forbidden)?;
    let mut abelian_matched = Vec::new();
    loop {
        let before = tree.len();
        let matched = abelian_cleanup(&mut tree, &rejected)?;
        cascade(&mut tree, &matched)?;
        abelian_matched.extend(matched);
        if tree.len() == before {
            break;
        }
    }
    Ok(BuildOutcome {
        tree,
        rejected,
        abelian_matched,
    })
}

/// String-level entry point: infers the alphabet jointly from `first` and
/// `second` (a third distinct character is [`BuildError::InvalidAlphabet`]),
/// parses the base patterns under the same spelling, and runs [`build`].
pub fn build_from_strs(
    first: &str,
    second: &str,
    max_len: usize,
    base_patterns: &[&str],
) -> Result<BuildOutcome, BuildError> {
    let foreign = |err: WordError| match err {
        WordError::ForeignLetter(c) => BuildError::InvalidAlphabet(c),
    };
    let alphabet = Alphabet::infer(&[first, second]).map_err(foreign)?;
    let config = BuildConfig {
        first: alphabet.parse(first).map_err(foreign)?,
        second: alphabet.parse(second).map_err(foreign)?,
        max_len,
    };
    let base: Vec<Word> = base_patterns
        .iter()
        .map(|s| alphabet.parse(s))
        .collect::<Result<_, _>>()
        .map_err(foreign)?;
    build(&config, &ForbiddenSet::close(&base))
}

/// Phase 1: breadth-first growth with insertion-time exact rejection.
///
/// Returns the grown tree and the rejected words. A rejected candidate is
/// never inserted, so its whole subtree is pruned by construction.
pub fn grow(
    config: &BuildConfig,
    forbidden: &ForbiddenSet,
) -> Result<(BinaryTree<Word>, Vec<Word>), BuildError> {
    config.validate()?;
    let mut tree = BinaryTree::new();
    let mut rejected = Vec::new();
    let root = tree.add_root(Word::empty())?;
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        let current = tree.get(node)?.clone();
        if current.len() >= config.max_len {
            continue;
        }
        if current.len() + config.first.len() <= config.max_len {
            let candidate = current.append(&config.first);
            if forbidden.is_forbidden(&candidate) {
                rejected.push(candidate);
            } else {
                queue.push_back(tree.add_left(node, candidate)?);
            }
        }
        if current.len() + config.second.len() <= config.max_len {
            let candidate = current.append(&config.second);
            if forbidden.is_forbidden(&candidate) {
                rejected.push(candidate);
            } else {
                queue.push_back(tree.add_right(node, candidate)?);
            }
        }
    }
    Ok((tree, rejected))
}

/// Phase 2: removes the subtree of every node whose word contains an abelian
/// instance of some rejected word, and returns the matching words.
///
/// Each rejected word is read as a block-pattern ([`Pattern::from_word`]) and
/// searched for with [`Pattern::find_instance`]; the *node's* word is what
/// gets recorded, since that is the literal string the cascade pass must hunt
/// for in the remaining tree.
pub fn abelian_cleanup(
    tree: &mut BinaryTree<Word>,
    rejected: &[Word],
) -> Result<Vec<Word>, TreeError> {
    let patterns: Vec<Pattern> = rejected.iter().map(Pattern::from_word).collect();
    let mut scheduled: Vec<NodeId> = Vec::new();
    let mut matched = Vec::new();

    for id in tree.preorder() {
        let word = tree.get(id)?;
        if patterns.iter().any(|p| p.find_instance(word).is_some()) {
            matched.push(word.clone());
            scheduled.push(id);
        }
    }
    remove_scheduled(tree, scheduled)?;
    Ok(matched)
}

/// Phase 3: removes the subtree of every node whose word exactly contains
/// any abelian-matched word. Returns the number of nodes removed.
pub fn cascade(tree: &mut BinaryTree<Word>, matched: &[Word]) -> Result<usize, TreeError> {
    let mut scheduled: Vec<NodeId> = Vec::new();
    for id in tree.preorder() {
        let word = tree.get(id)?;
        if matched.iter().any(|m| word.contains(m)) {
            scheduled.push(id);
        }
    }
    remove_scheduled(tree, scheduled)
}

/// Removes each scheduled subtree, skipping ids already freed by an earlier
/// ancestor removal. Returns the number of nodes removed.
fn remove_scheduled(tree: &mut BinaryTree<Word>, scheduled: Vec<NodeId>) -> Result<usize, TreeError> {
    let mut removed = 0;
    for id in scheduled {
        if tree.contains(id) {
            removed += tree.remove_subtree(id)?.len();
        }
    }
    Ok(removed)
}
