//! Automaton-based matching engine.
//!
//! Patterns compile into a nondeterministic finite automaton held in a state
//! arena; matching is parallel state-set simulation with epsilon closures.
//!
//! # Module Organization
//!
//! - `arena`: index-based state storage and packed byte-range tables
//! - `builder`: Thompson-style construction from the parsed pattern
//! - `matcher`: epsilon-closure simulation (full match and search)
//! - `sparse_set`: O(1)-clear state sets used by the matcher

mod arena;
mod builder;
mod matcher;
mod sparse_set;

pub use arena::{SmallTable, StateArena, StateId, BYTE_CEILING};
pub use builder::{build, DEFAULT_MAX_STATES};

/// A compiled pattern: an arena NFA plus its anchor flags.
///
/// Immutable once built; share it freely (e.g. behind `Arc`) and match any
/// number of inputs against it.
pub struct Automaton {
    pub(crate) arena: StateArena,
    pub(crate) start: StateId,
    pub(crate) accept: StateId,
    pub(crate) anchored_start: bool,
    pub(crate) anchored_end: bool,
    alphabet_len: usize,
}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("states", &self.arena.len())
            .field("alphabet_len", &self.alphabet_len)
            .field("anchored_start", &self.anchored_start)
            .field("anchored_end", &self.anchored_end)
            .finish()
    }
}

impl Automaton {
    pub(crate) fn from_parts(
        arena: StateArena,
        start: StateId,
        accept: StateId,
        anchored_start: bool,
        anchored_end: bool,
    ) -> Self {
        let mut seen = [false; BYTE_CEILING];
        for table in arena.tables() {
            table.mark_consumed(&mut seen);
        }
        let alphabet_len = seen.iter().filter(|&&s| s).count();
        Self {
            arena,
            start,
            accept,
            anchored_start,
            anchored_end,
            alphabet_len,
        }
    }

    /// Number of states in the automaton.
    pub fn state_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of distinct byte values with a consuming transition.
    pub fn alphabet_len(&self) -> usize {
        self.alphabet_len
    }

    /// True when the pattern began with `^`.
    pub fn is_anchored_start(&self) -> bool {
        self.anchored_start
    }

    /// True when the pattern ended with `$`.
    pub fn is_anchored_end(&self) -> bool {
        self.anchored_end
    }
}
