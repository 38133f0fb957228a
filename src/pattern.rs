//! Meta-symbol patterns and the abelian pattern matcher.
//!
//! A [`Pattern`] is a sequence over a meta-alphabet of at most two symbols.
//! It describes required block structure, not literal letters: a candidate
//! word is an *abelian instance* of a pattern if it can be sliced into
//! contiguous blocks, one per pattern position, such that all blocks sharing
//! a symbol are abelian-equal (same [`Profile`], not necessarily the same
//! string).
//!
//! The matcher is deliberately exhaustive: it enumerates every pair of block
//! lengths and every substring. Brute force is inherent to the problem, not a
//! shortcut; what matters is the first-match tie-break order, which makes the
//! output reproducible.
//!
//! # Determinism
//! - [`Pattern::matches_whole`] searches `len_a` ascending, then `len_b`
//!   ascending, and stops at the first viable assignment.
//! - [`Pattern::find_instance`] searches substrings by increasing length,
//!   then increasing start offset, with the same inner order.
//!
//! # Citations
//! - Erdős, "Some unsolved problems", Section 10 (1961) — abelian squares
//! - Keränen, "Abelian squares are avoidable on 4 letters" (1992)
//! - Dekking, "Strongly non-repetitive sequences and progression-free sets" (1979)

use crate::word::{Letter, Profile, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two meta-symbols a pattern may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    A,
    B,
}

/// Error raised while constructing a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern text is empty.
    Empty,
    /// The pattern references more than two distinct meta-symbols.
    TooManySymbols(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Empty => write!(f, "pattern is empty"),
            PatternError::TooManySymbols(c) => {
                write!(f, "pattern references a third meta-symbol {c:?}")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A block-pattern over at most two meta-symbols.
///
/// A pattern using only one symbol is degenerate but legal (e.g. `AA`, the
/// abelian square).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    symbols: Vec<Symbol>,
    count_a: usize,
    count_b: usize,
}

/// The first viable assignment found by [`Pattern::find_instance`].
///
/// `start..end` is the matched substring of the haystack; `block_a` and
/// `block_b` are the reference blocks (the first block sliced for each
/// symbol), `None` when the symbol does not occur in the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Start offset of the matched substring (inclusive).
    pub start: usize,
    /// End offset of the matched substring (exclusive).
    pub end: usize,
    /// Reference block for symbol `A`, if `A` occurs in the pattern.
    pub block_a: Option<Word>,
    /// Reference block for symbol `B`, if `B` occurs in the pattern.
    pub block_b: Option<Word>,
}

impl Pattern {
    /// Parses pattern text: the first distinct character becomes symbol `A`,
    /// the second becomes `B`; a third is [`PatternError::TooManySymbols`].
    pub fn parse(s: &str) -> Result<Self, PatternError> {
        if s.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut char_a = None;
        let mut char_b = None;
        let mut symbols = Vec::with_capacity(s.len());
        for c in s.chars() {
            if char_a.is_none() {
                char_a = Some(c);
            }
            let symbol = if char_a == Some(c) {
                Symbol::A
            } else {
                if char_b.is_none() {
                    char_b = Some(c);
                }
                if char_b == Some(c) {
                    Symbol::B
                } else {
                    return Err(PatternError::TooManySymbols(c));
                }
            };
            symbols.push(symbol);
        }
        Ok(Self::from_symbols(symbols))
    }

    /// Reinterprets a word as a pattern: `X` becomes symbol `A`, `Y` becomes
    /// `B`. The builder uses this to treat rejected words as block-patterns.
    ///
    /// An empty word yields the empty pattern, which matches nothing.
    pub fn from_word(word: &Word) -> Self {
        let symbols = word
            .letters()
            .iter()
            .map(|&l| match l {
                Letter::X => Symbol::A,
                Letter::Y => Symbol::B,
            })
            .collect();
        Self::from_symbols(symbols)
    }

    fn from_symbols(symbols: Vec<Symbol>) -> Self {
        let count_a = symbols.iter().filter(|&&s| s == Symbol::A).count();
        let count_b = symbols.len() - count_a;
        Self {
            symbols,
            count_a,
            count_b,
        }
    }

    /// Number of pattern positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True for the empty pattern.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Occurrences of symbol `A`.
    #[inline]
    pub fn count_a(&self) -> usize {
        self.count_a
    }

    /// Occurrences of symbol `B`.
    #[inline]
    pub fn count_b(&self) -> usize {
        self.count_b
    }

    /// Exact-length test: can the whole candidate be sliced into blocks
    /// forming an abelian instance of this pattern?
    ///
    /// Enumerates positive block-length pairs `(len_a, len_b)` satisfying
    /// `count_a * len_a + count_b * len_b == candidate.len()`, `len_a`
    /// ascending then `len_b` ascending, and stops at the first viable
    /// slicing. A pattern longer than the candidate fails without searching.
    pub fn matches_whole(&self, candidate: &Word) -> bool {
        self.assign(candidate.letters()).is_some()
    }

    /// Substring search: the first substring of `haystack` carrying an
    /// abelian instance of this pattern, by increasing substring length, then
    /// increasing start offset.
    ///
    /// Returns the matched range together with the reference block recorded
    /// for each symbol. A pattern longer than the haystack fails immediately.
    pub fn find_instance(&self, haystack: &Word) -> Option<Instance> {
        if self.is_empty() || self.len() > haystack.len() {
            return None;
        }
        for len in self.len()..=haystack.len() {
            for start in 0..=haystack.len() - len {
                if let Some((block_a, block_b)) = self.assign(haystack.block(start, len)) {
                    return Some(Instance {
                        start,
                        end: start + len,
                        block_a,
                        block_b,
                    });
                }
            }
        }
        None
    }

    /// Searches all viable block-length pairs for `candidate` and returns the
    /// reference blocks of the first assignment that fits.
    fn assign(&self, candidate: &[Letter]) -> Option<(Option<Word>, Option<Word>)> {
        if self.is_empty() || self.len() > candidate.len() {
            return None;
        }
        let total = candidate.len();
        for len_a in 1..=total {
            for len_b in 1..=total {
                if self.count_a * len_a + self.count_b * len_b != total {
                    continue;
                }
                if let Some(blocks) = self.slice(candidate, len_a, len_b) {
                    return Some(blocks);
                }
            }
        }
        None
    }

    /// Walks the pattern left to right, slicing `candidate` into consecutive
    /// blocks of `len_a` or `len_b` per symbol. The first block seen for each
    /// symbol is its reference; every later block for that symbol must have
    /// an equal profile.
    fn slice(
        &self,
        candidate: &[Letter],
        len_a: usize,
        len_b: usize,
    ) -> Option<(Option<Word>, Option<Word>)> {
        let mut index = 0;
        let mut ref_a: Option<(Profile, &[Letter])> = None;
        let mut ref_b: Option<(Profile, &[Letter])> = None;
        for &symbol in &self.symbols {
            let len = match symbol {
                Symbol::A => len_a,
                Symbol::B => len_b,
            };
            if index + len > candidate.len() {
                return None;
            }
            let block = &candidate[index..index + len];
            let profile = Profile::of(block);
            let reference = match symbol {
                Symbol::A => &mut ref_a,
                Symbol::B => &mut ref_b,
            };
            match reference {
                None => *reference = Some((profile, block)),
                Some((expected, _)) if *expected == profile => {}
                Some(_) => return None,
            }
            index += len;
        }
        let to_word =
            |r: Option<(Profile, &[Letter])>| r.map(|(_, block)| Word::from_letters(block.to_vec()));
        Some((to_word(ref_a), to_word(ref_b)))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &s in &self.symbols {
            f.write_str(match s {
                Symbol::A => "A",
                Symbol::B => "B",
            })?;
        }
        Ok(())
    }
}
