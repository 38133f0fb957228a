//! The forbidden set: symmetric closure of a base word list.
//!
//! A candidate word is forbidden when it equals or contains, as a contiguous
//! substring, any member of the closure of the base list under letter
//! reversal and the X↔Y letter swap. The closure is built in two passes —
//! reversal first, then one swap pass over the reversal-closed set — so
//! repeated swapping can never grow the set unboundedly; set semantics
//! collapse duplicates.
//!
//! # Determinism
//! Members live in a `BTreeSet`, so iteration order is the lexicographic
//! word order regardless of insertion order.

use crate::word::Word;
use std::collections::BTreeSet;

/// The symmetric (reversal + letter-swap) closure of a base pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenSet {
    members: BTreeSet<Word>,
}

impl ForbiddenSet {
    /// The empty forbidden set; nothing is forbidden.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from raw members, without any symmetry closure.
    ///
    /// Useful when the caller wants exactly the listed words forbidden —
    /// e.g. base `"AA"` on its own, without its swapped image `"BB"`.
    pub fn from_members(members: &[Word]) -> Self {
        Self {
            members: members.iter().cloned().collect(),
        }
    }

    /// Builds the closure: every base word, its reversal, and the letter-swap
    /// of each element of that reversal-closed set.
    pub fn close(base: &[Word]) -> Self {
        let mut members = BTreeSet::new();
        for word in base {
            members.insert(word.clone());
            members.insert(word.reversed());
        }
        // One swap pass over the reversal-closed set, not iterated to a
        // fixpoint: swap is an involution, so once is enough.
        let swapped: Vec<Word> = members.iter().map(Word::swapped).collect();
        members.extend(swapped);
        Self { members }
    }

    /// True iff `candidate` equals or contains any member as a contiguous
    /// substring.
    pub fn is_forbidden(&self, candidate: &Word) -> bool {
        self.members.iter().any(|m| candidate.contains(m))
    }

    /// Membership test for a single word (no substring search).
    pub fn is_member(&self, word: &Word) -> bool {
        self.members.contains(word)
    }

    /// Number of members after closure.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no word is forbidden.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over members in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.members.iter()
    }
}

/// The stock base list of forbidden block-patterns over `A`/`B`.
///
/// These are the minimal patterns whose abelian instances the search is
/// trying to avoid; [`ForbiddenSet::close`] adds their reversals and
/// letter-swapped images.
pub const DEFAULT_BASE: &[&str] = &[
    "AABBBAAAB", "ABAAABBBA", "AAABABABBB", "AAABABBABB", "AAABABBBAB",
    "AABBBABAAB", "AABBBABABA", "ABAABABBBA", "ABAABBBABA", "ABABAABBBA",
    "ABBBABAAAB", "AABAABBBAB", "AABBBAABAB", "AABBBAABAAB", "AAABABBAAAB",
    "AABBBABBBAA", "ABABABBBABA", "ABABBABBABA", "AAABAAABBAB", "AAABBABAAAB",
    "AAABAABAABAB", "AAABABAAABAB", "AABAAABABAAB", "AAABAAABABBA", "AAABAABABAAB",
    "AAABABAABAAB", "ABBABAAABAAB", "ABABBBABBBABA", "ABAABBBAAB", "AAABBABABB",
    "AAABBABBAB", "AABAABBABB", "AABABABBBA", "AABABBABBA", "AABABBBAAB",
    "AABABBBABA", "AABBAABBBA", "AABBABABBA", "AABBABBAAB", "AABBABBABA",
    "AABBBAABBA", "ABAABBABBA", "AABBABABBBA", "AABABBBABBBA", "AAAA",
    "AAABAABBB", "AAABBBABB", "AABBABBBA", "AABBBABBA", "AAABBAAABB",
    "AABABAAABB", "ABBBAABBBA", "AAABAABBAB", "AAABAABAABB", "AAABBAABAAB",
    "AABAABAABBA", "AABAABBAAAB", "AABABABAAAB", "AAABBAAABAB", "AABAAABABAB",
    "AABAAABBAAB", "AAABAABAAABAB", "AAABABBBAA", "AAABBAABBB", "AAABBABBAA",
    "ABABAAABBB", "ABABBBAABBA", "AABABBAAABA", "AAABBABAAABA", "AABBABBABBA",
    "AABABBABBBA", "AABBBABBBABA", "ABABBABBABBA", "ABABBABBBABA", "ABABBBABABBA",
    "ABBABABBABBA", "ABAABBBAAA", "AABABBBAAA", "AABAAABAAABAB", "ABBBABBBABBBA",
    "AAABAAABAAABAAA",
];

/// Parses [`DEFAULT_BASE`] into words under the default `A`/`B` spelling.
pub fn default_base() -> Vec<Word> {
    DEFAULT_BASE
        .iter()
        .map(|s| {
            s.chars()
                .map(|c| {
                    if c == 'A' {
                        crate::word::Letter::X
                    } else {
                        crate::word::Letter::Y
                    }
                })
                .collect::<Vec<_>>()
        })
        .map(Word::from_letters)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn closure_contains_both_symmetries() {
        let set = ForbiddenSet::close(&[w("AAB")]);
        for member in [w("AAB"), w("BAA"), w("BBA"), w("ABB")] {
            assert!(set.is_member(&member));
        }
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn closure_is_closed() {
        let set = ForbiddenSet::close(&[w("AABB"), w("ABAB")]);
        for member in set.iter() {
            assert!(set.is_member(&member.reversed()));
            assert!(set.is_member(&member.swapped()));
        }
    }

    #[test]
    fn palindromic_self_swap_words_collapse() {
        // "AB" reversed is "BA", swapped is "BA": duplicates must not
        // double-count.
        let set = ForbiddenSet::close(&[w("AB")]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn raw_members_skip_the_closure() {
        let set = ForbiddenSet::from_members(&[w("AA")]);
        assert_eq!(set.len(), 1);
        assert!(set.is_forbidden(&w("BAAB")));
        // Neither symmetry is added: "BB" and the reversal stay allowed.
        assert!(!set.is_forbidden(&w("ABBA")));
    }

    #[test]
    fn forbidden_by_equality_and_substring() {
        let set = ForbiddenSet::close(&[w("AAB")]);
        assert!(set.is_forbidden(&w("AAB")));
        assert!(set.is_forbidden(&w("BAABA"))); // contains "AAB"
        assert!(set.is_forbidden(&w("ABBA"))); // contains swapped reversal "BBA"... via "ABB"
        assert!(!set.is_forbidden(&w("ABAB")));
        assert!(!ForbiddenSet::empty().is_forbidden(&w("AAB")));
    }

    #[test]
    fn default_base_closes_without_blowup() {
        let set = ForbiddenSet::close(&default_base());
        assert!(set.len() <= DEFAULT_BASE.len() * 4);
        for member in set.iter() {
            assert!(set.is_member(&member.reversed()));
            assert!(set.is_member(&member.swapped()));
        }
        // "AAAA" is in the base, so its swap forbids four consecutive Bs.
        assert!(set.is_forbidden(&w("ABBBBA")));
    }
}
