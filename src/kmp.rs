//! Exact literal scanning with Knuth-Morris-Pratt preprocessing.
//!
//! This bypasses the automaton entirely: pure-literal needles get the
//! classic failure function (longest proper prefix that is also a suffix,
//! for every needle prefix) and an O(haystack) scan. Every occurrence is
//! reported left to right, *including overlapping ones* - the same sequence
//! a naive scan produces when it restarts one symbol past each match start.
//! After a hit the scanner keeps the needle's longest proper border instead
//! of skipping past the match.

use crate::MatchResult;

/// Compute the KMP failure function for `needle`.
///
/// `failure[i]` is the length of the longest proper prefix of
/// `needle[..=i]` that is also a suffix of it.
pub fn failure_function(needle: &[u8]) -> Vec<usize> {
    let mut failure = vec![0usize; needle.len()];
    let mut j = 0;
    for i in 1..needle.len() {
        while j > 0 && needle[i] != needle[j] {
            j = failure[j - 1];
        }
        if needle[i] == needle[j] {
            j += 1;
        }
        failure[i] = j;
    }
    failure
}

/// Lazy iterator over every occurrence of a literal needle.
///
/// The sequence is finite and restartable: `Clone` forks the scan state,
/// `reset` rewinds to the start of the haystack.
#[derive(Clone, Debug)]
pub struct LiteralMatches<'h> {
    haystack: &'h str,
    needle: Vec<u8>,
    failure: Vec<usize>,
    /// Next haystack position to examine.
    pos: usize,
    /// Length of the needle prefix matched so far.
    prefix_len: usize,
}

impl LiteralMatches<'_> {
    /// Rewind the scan to the start of the haystack.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.prefix_len = 0;
    }
}

impl<'h> Iterator for LiteralMatches<'h> {
    type Item = MatchResult<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let haystack = self.haystack.as_bytes();
        let needle_len = self.needle.len();

        if needle_len == 0 {
            // An empty needle matches the empty string at every offset.
            if self.pos > haystack.len() {
                return None;
            }
            let at = self.pos;
            self.pos += 1;
            return Some(MatchResult::span(self.haystack, at, at));
        }

        while self.pos < haystack.len() {
            let b = haystack[self.pos];
            while self.prefix_len > 0 && b != self.needle[self.prefix_len] {
                self.prefix_len = self.failure[self.prefix_len - 1];
            }
            if b == self.needle[self.prefix_len] {
                self.prefix_len += 1;
            }
            self.pos += 1;

            if self.prefix_len == needle_len {
                let start = self.pos - needle_len;
                // Keep the longest proper border so overlapping hits are
                // still reported.
                self.prefix_len = self.failure[needle_len - 1];
                return Some(MatchResult::span(self.haystack, start, self.pos));
            }
        }
        None
    }
}

/// Scan `haystack` for every occurrence of the literal `needle`.
pub fn find_all_literal<'h>(needle: &str, haystack: &'h str) -> LiteralMatches<'h> {
    LiteralMatches {
        haystack,
        failure: failure_function(needle.as_bytes()),
        needle: needle.as_bytes().to_vec(),
        pos: 0,
        prefix_len: 0,
    }
}
