//! Substitution morphisms and the expansion scanner.
//!
//! A [`Morphism`] replaces every letter of a word with a fixed image word.
//! [`scan`] iterates a morphism from a seed and, after each expansion, tests
//! the whole current word against one target pattern, collecting every hit
//! until the word outgrows the length cap. Growth is monotonic for any
//! morphism with a growing image, so the cap is the termination guarantee;
//! a morphism that has reached a fixed point stops the scan early instead of
//! spinning forever.
//!
//! # Citations
//! - Thue, "Über unendliche Zeichenreihen" (1906) — iterated substitutions
//! - Allouche & Shallit, "Automatic Sequences", Chapter 6 (2003) — morphisms

use crate::pattern::{Instance, Pattern};
use crate::word::{Letter, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised while constructing a [`Morphism`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphismError {
    /// One of the letter images is the empty word. An empty image makes the
    /// iteration length-reducing or stationary, which never terminates under
    /// a pure length cap.
    EmptyImage,
}

impl fmt::Display for MorphismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphismError::EmptyImage => write!(f, "morphism images must be non-empty"),
        }
    }
}

impl std::error::Error for MorphismError {}

/// A two-letter substitution morphism: `X ↦ image_x`, `Y ↦ image_y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morphism {
    image_x: Word,
    image_y: Word,
}

impl Morphism {
    /// Creates a morphism; both images must be non-empty.
    pub fn new(image_x: Word, image_y: Word) -> Result<Self, MorphismError> {
        if image_x.is_empty() || image_y.is_empty() {
            return Err(MorphismError::EmptyImage);
        }
        Ok(Self { image_x, image_y })
    }

    /// The image of [`Letter::X`].
    pub fn image_x(&self) -> &Word {
        &self.image_x
    }

    /// The image of [`Letter::Y`].
    pub fn image_y(&self) -> &Word {
        &self.image_y
    }

    /// Applies the morphism once, replacing every letter with its image.
    pub fn apply(&self, word: &Word) -> Word {
        let grown_len = word
            .letters()
            .iter()
            .map(|&l| match l {
                Letter::X => self.image_x.len(),
                Letter::Y => self.image_y.len(),
            })
            .sum();
        let mut letters = Vec::with_capacity(grown_len);
        for &letter in word.letters() {
            let image = match letter {
                Letter::X => &self.image_x,
                Letter::Y => &self.image_y,
            };
            letters.extend_from_slice(image.letters());
        }
        Word::from_letters(letters)
    }
}

/// One scanner hit: an expanded word that matched the target pattern as a
/// whole, plus the position and reference blocks of the first assignment
/// found by the substring search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHit {
    /// The expanded word that matched.
    pub word: Word,
    /// First instance under the defined search order.
    pub instance: Instance,
}

/// Iterates `morphism` from `seed`, testing each expansion against `pattern`
/// with the whole-candidate matcher and recording every match in order.
///
/// Each expansion is tested as soon as it is produced; the scan then stops
/// once the current word's length exceeds `length_cap` (so the first word
/// past the cap is still tested, matching the generation-then-test loop
/// shape), or as soon as an expansion fails to grow the word. The length
/// check, not word equality, is what guarantees termination: a
/// length-preserving morphism can cycle through distinct words forever
/// without ever reaching the cap. The seed itself is not tested. An empty
/// result is a normal outcome.
pub fn scan(
    pattern: &Pattern,
    seed: &Word,
    morphism: &Morphism,
    length_cap: usize,
) -> Vec<ScanHit> {
    let mut hits = Vec::new();
    let mut current = seed.clone();
    while !current.is_empty() && current.len() <= length_cap {
        let next = morphism.apply(&current);
        let stagnant = next.len() <= current.len();
        current = next;
        if pattern.matches_whole(&current) {
            // matches_whole succeeded, so the substring search cannot fail;
            // it re-derives the first instance with its position and blocks.
            if let Some(instance) = pattern.find_instance(&current) {
                hits.push(ScanHit {
                    word: current.clone(),
                    instance,
                });
            }
        }
        if stagnant {
            break;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Alphabet;

    fn wb(s: &str) -> Word {
        Alphabet::BINARY.parse(s).unwrap()
    }

    fn p(s: &str) -> Pattern {
        Pattern::parse(s).unwrap()
    }

    fn thue_morse() -> Morphism {
        Morphism::new(wb("01"), wb("10")).unwrap()
    }

    #[test]
    fn empty_image_rejected() {
        assert_eq!(
            Morphism::new(Word::empty(), wb("1")),
            Err(MorphismError::EmptyImage)
        );
    }

    #[test]
    fn apply_substitutes_per_letter() {
        let m = thue_morse();
        assert_eq!(m.apply(&wb("0")), wb("01"));
        assert_eq!(m.apply(&wb("01")), wb("0110"));
        assert_eq!(m.apply(&wb("0110")), wb("01101001"));
        assert_eq!(m.apply(&Word::empty()), Word::empty());
    }

    #[test]
    fn thue_morse_scan_for_whole_word_abelian_square() {
        // Expansions of "0": 01, 0110, 01101001, ... — each prefix of the
        // Thue–Morse word of even length ≥ 4 splits into two halves with
        // equal profiles, so every expansion from length 4 on matches "AA"
        // as a whole.
        let hits = scan(&p("AA"), &wb("0"), &thue_morse(), 16);
        let lengths: Vec<usize> = hits.iter().map(|h| h.word.len()).collect();
        assert_eq!(lengths, vec![4, 8, 16, 32]);
        // First hit: "0110" — minimal instance reported by the substring
        // search is the literal square "11" at offset 1.
        assert_eq!(hits[0].word, wb("0110"));
        assert_eq!(
            (hits[0].instance.start, hits[0].instance.end),
            (1, 3)
        );
        assert_eq!(hits[0].instance.block_a, Some(wb("1")));
        assert_eq!(hits[0].instance.block_b, None);
    }

    #[test]
    fn cap_bounds_the_scan() {
        // Cap below the first matching length: empty result, normal outcome.
        let hits = scan(&p("AA"), &wb("0"), &thue_morse(), 1);
        // The word of length 2 is produced from the length-1 seed and tested,
        // then the loop stops; "01" is not an abelian square.
        assert!(hits.is_empty());
    }

    #[test]
    fn fixed_point_morphism_terminates() {
        let identity = Morphism::new(wb("0"), wb("1")).unwrap();
        let hits = scan(&p("AA"), &wb("0101"), &identity, 1_000_000);
        // "0101" is an abelian square; it is tested once, then the scan
        // stops at the fixed point instead of looping.
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, wb("0101"));
    }

    #[test]
    fn length_preserving_swap_morphism_terminates() {
        // 0 ↦ 1, 1 ↦ 0 cycles between distinct words of the same length, so
        // the word never reaches the cap; stagnation must stop the scan
        // after the first non-growing expansion.
        let swap = Morphism::new(wb("1"), wb("0")).unwrap();
        let hits = scan(&p("AA"), &wb("0"), &swap, 1000);
        assert!(hits.is_empty());

        // Same cycle from a word that is itself an abelian square: the
        // single tested expansion still counts as a hit.
        let hits = scan(&p("AA"), &wb("0110"), &swap, 1000);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, wb("1001"));
    }
}
