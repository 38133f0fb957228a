//! Letters, words, and the abelian profile.
//!
//! A [`Word`] is a finite sequence over a two-letter alphabet. Words are
//! immutable once produced: every operation that "changes" a word returns a
//! fresh one. Abelian equality of two blocks is equality of their
//! [`Profile`]s, the per-letter occurrence counts.
//!
//! # Determinism
//! - `Word` ordering is lexicographic over its letters, so words can live in
//!   `BTreeSet`/`BTreeMap` collections with a stable iteration order.
//! - Parsing and rendering go through an [`Alphabet`], a fixed pair of
//!   surface characters; the same input always yields the same word.
//!
//! # Citations
//! - Lothaire, "Combinatorics on Words", Chapter 1 (1983) — words, factors
//! - Erdős, "Some unsolved problems", Section 10 (1961) — abelian squares

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two alphabet letters.
///
/// The alphabet is fixed at two letters; `X` and `Y` are abstract names,
/// rendered through an [`Alphabet`] (by default as `A` and `B`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter {
    X,
    Y,
}

impl Letter {
    /// Returns the other letter.
    #[inline]
    pub const fn swapped(self) -> Self {
        match self {
            Letter::X => Letter::Y,
            Letter::Y => Letter::X,
        }
    }
}

/// Per-letter occurrence counts of a block.
///
/// Two blocks are abelian-equal iff their profiles are equal, regardless of
/// letter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Number of `X` letters.
    pub x: usize,
    /// Number of `Y` letters.
    pub y: usize,
}

impl Profile {
    /// Computes the profile of a letter slice.
    pub fn of(letters: &[Letter]) -> Self {
        let x = letters.iter().filter(|&&l| l == Letter::X).count();
        Self {
            x,
            y: letters.len() - x,
        }
    }
}

/// Error raised while parsing surface text into a [`Word`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordError {
    /// The input contains a character outside the two-letter alphabet.
    ForeignLetter(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordError::ForeignLetter(c) => {
                write!(f, "character {c:?} is outside the two-letter alphabet")
            }
        }
    }
}

impl std::error::Error for WordError {}

/// The surface spelling of the two letters.
///
/// `x` is the character rendered for [`Letter::X`], `y` for [`Letter::Y`].
/// The default spelling is `A`/`B`; morphism seeds conventionally use `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    /// Surface character for `X`.
    pub x: char,
    /// Surface character for `Y`.
    pub y: char,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self { x: 'A', y: 'B' }
    }
}

impl Alphabet {
    /// The `0`/`1` spelling used for morphism seeds and images.
    pub const BINARY: Alphabet = Alphabet { x: '0', y: '1' };

    /// Infers an alphabet from the characters of `inputs`, in order of first
    /// appearance: the first distinct character becomes `x`, the second `y`.
    ///
    /// Inputs jointly using a third distinct character are rejected with
    /// [`WordError::ForeignLetter`]. Inputs with fewer than two distinct
    /// characters fall back to the default spelling for the missing slots.
    pub fn infer(inputs: &[&str]) -> Result<Self, WordError> {
        let mut x = None;
        let mut y = None;
        for s in inputs {
            for c in s.chars() {
                if x.is_none() {
                    x = Some(c);
                } else if x == Some(c) {
                    continue;
                } else if y.is_none() {
                    y = Some(c);
                } else if y != Some(c) {
                    return Err(WordError::ForeignLetter(c));
                }
            }
        }
        let default = Alphabet::default();
        Ok(Self {
            x: x.unwrap_or(default.x),
            y: y.unwrap_or(default.y),
        })
    }

    /// Parses surface text into a [`Word`] under this spelling.
    pub fn parse(&self, s: &str) -> Result<Word, WordError> {
        let mut letters = Vec::with_capacity(s.len());
        for c in s.chars() {
            if c == self.x {
                letters.push(Letter::X);
            } else if c == self.y {
                letters.push(Letter::Y);
            } else {
                return Err(WordError::ForeignLetter(c));
            }
        }
        Ok(Word { letters })
    }

    /// Renders a word under this spelling.
    pub fn render(&self, word: &Word) -> String {
        word.letters
            .iter()
            .map(|&l| match l {
                Letter::X => self.x,
                Letter::Y => self.y,
            })
            .collect()
    }
}

/// A finite word over the two-letter alphabet.
///
/// Immutable once produced; concatenation and the symmetry operations return
/// fresh words. The empty word is a valid word (it is the tree builder's
/// root payload).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Word {
    letters: Vec<Letter>,
}

impl Word {
    /// The empty word.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a word from a letter sequence.
    pub fn from_letters(letters: Vec<Letter>) -> Self {
        Self { letters }
    }

    /// Number of letters.
    #[inline]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// True for the empty word.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The underlying letter slice.
    #[inline]
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// The contiguous block of `len` letters starting at `start`.
    ///
    /// # Panics
    /// Panics if the range overruns the word; callers slice within bounds
    /// they have already checked against `len()`.
    #[inline]
    pub fn block(&self, start: usize, len: usize) -> &[Letter] {
        &self.letters[start..start + len]
    }

    /// Concatenation, producing a fresh word.
    pub fn append(&self, other: &Word) -> Word {
        let mut letters = Vec::with_capacity(self.len() + other.len());
        letters.extend_from_slice(&self.letters);
        letters.extend_from_slice(&other.letters);
        Word { letters }
    }

    /// The letter-reversal of this word.
    pub fn reversed(&self) -> Word {
        let mut letters = self.letters.clone();
        letters.reverse();
        Word { letters }
    }

    /// The X↔Y letter-swapped image of this word.
    pub fn swapped(&self) -> Word {
        Word {
            letters: self.letters.iter().map(|l| l.swapped()).collect(),
        }
    }

    /// The abelian profile of the whole word.
    pub fn profile(&self) -> Profile {
        Profile::of(&self.letters)
    }

    /// True iff `needle` occurs as a contiguous substring (an empty needle
    /// occurs everywhere; equality counts as occurrence).
    pub fn contains(&self, needle: &Word) -> bool {
        if needle.is_empty() {
            return true;
        }
        if needle.len() > self.len() {
            return false;
        }
        self.letters
            .windows(needle.len())
            .any(|w| w == needle.letters())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Alphabet::default().render(self))
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::default().parse(s)
    }
}
