//! Approximate DNA matching with a bounded number of mismatches.
//!
//! Builds a (position x mismatch-count) grid NFA over the same state arena
//! the regexp engine uses. Substitution is the only edit considered, so
//! every reported window has exactly the pattern's length; state (p, e)
//! means "p pattern symbols consumed with e mismatches so far", and every
//! (len, e) state accepts.

use crate::automaton::{Automaton, StateArena, StateId, BYTE_CEILING};
use crate::dna;
use crate::{CompileError, SyntaxError};

/// A fixed-width pattern matcher tolerating up to `max_mismatches`
/// substitutions. Compiled once, matched many times.
#[derive(Debug)]
pub struct MismatchMatcher {
    automaton: Automaton,
    pattern: Vec<u8>,
    max_mismatches: usize,
}

/// One approximate occurrence in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproxMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub mismatches: usize,
    pub text: &'t str,
}

/// An approximate occurrence on either strand. Positions on the reverse
/// strand are offsets into the reverse complement of the scanned sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandMatch {
    pub start: usize,
    pub end: usize,
    pub mismatches: usize,
    pub text: String,
    pub reverse: bool,
}

impl MismatchMatcher {
    /// Build a matcher for a plain DNA pattern (no metacharacters).
    pub fn new(pattern: &str, max_mismatches: usize) -> Result<Self, CompileError> {
        if pattern.is_empty() {
            return Err(CompileError::Syntax(SyntaxError {
                message: "empty mismatch pattern".into(),
                offset: 0,
            }));
        }
        if let Some(bad) = pattern.bytes().position(|b| !dna::is_base(b)) {
            return Err(CompileError::Syntax(SyntaxError {
                message: format!(
                    "'{}' is not a DNA base",
                    pattern.as_bytes()[bad] as char
                ),
                offset: bad,
            }));
        }
        let pattern: Vec<u8> = pattern.bytes().map(|b| b.to_ascii_uppercase()).collect();

        let n = pattern.len();
        let k = max_mismatches;
        let mut arena = StateArena::with_capacity((n + 1) * (k + 1) + 1);
        let accept = arena.alloc();

        // grid[p * (k + 1) + e] is the state for (p consumed, e mismatches)
        let mut grid = Vec::with_capacity((n + 1) * (k + 1));
        for _ in 0..(n + 1) * (k + 1) {
            grid.push(arena.alloc());
        }

        for p in 0..=n {
            for e in 0..=k {
                let id = grid[p * (k + 1) + e];
                if p == n {
                    arena[id].epsilons.push(accept);
                    continue;
                }
                let mut unpacked = [StateId::NONE; BYTE_CEILING];
                for &b in dna::ALPHABET.iter() {
                    if b == pattern[p] {
                        unpacked[b as usize] = grid[(p + 1) * (k + 1) + e];
                    } else if e < k {
                        unpacked[b as usize] = grid[(p + 1) * (k + 1) + e + 1];
                    }
                }
                arena[id].pack(&unpacked);
            }
        }

        let start = grid[0];
        let automaton = Automaton::from_parts(arena, start, accept, false, false);
        Ok(Self {
            automaton,
            pattern,
            max_mismatches,
        })
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    pub fn max_mismatches(&self) -> usize {
        self.max_mismatches
    }

    /// True when `window` matches the whole pattern within the mismatch
    /// budget (window length must equal the pattern length).
    pub fn matches(&self, window: &str) -> bool {
        self.automaton.match_full(window).matched
    }

    /// Every window of `text` matching within the budget, left to right.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<ApproxMatch<'t>> {
        let n = self.pattern.len();
        let mut out = Vec::new();
        if n > text.len() {
            return out;
        }
        for start in 0..=text.len() - n {
            let window = &text[start..start + n];
            if self.matches(window) {
                let mismatches = window
                    .bytes()
                    .zip(self.pattern.iter())
                    .filter(|(got, &want)| *got != want)
                    .count();
                out.push(ApproxMatch {
                    start,
                    end: start + n,
                    mismatches,
                    text: window,
                });
            }
        }
        out
    }

    /// Scan both the forward sequence and its reverse complement.
    pub fn find_both_strands(&self, seq: &str) -> Vec<StrandMatch> {
        let mut out: Vec<StrandMatch> = self
            .find_all(seq)
            .into_iter()
            .map(|m| StrandMatch {
                start: m.start,
                end: m.end,
                mismatches: m.mismatches,
                text: m.text.to_string(),
                reverse: false,
            })
            .collect();

        let revcomp = dna::reverse_complement(seq);
        for m in self.find_all(&revcomp) {
            out.push(StrandMatch {
                start: m.start,
                end: m.end,
                mismatches: m.mismatches,
                text: m.text.to_string(),
                reverse: true,
            });
        }
        out
    }
}
