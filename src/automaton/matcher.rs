//! Epsilon-closure simulation over the arena NFA.
//!
//! The matcher tracks the set of live states in a pair of sparse sets,
//! consuming one input byte per step. There is no backtracking: one step
//! costs O(live states), so matching terminates in time linear in input
//! length times state-set size per attempted start offset.

use super::arena::{StateArena, StateId};
use super::sparse_set::{SparseSet, SparseSets};
use super::Automaton;
use crate::MatchResult;

/// Reusable simulation buffers, sized to the arena.
pub(crate) struct NfaBuffers {
    sets: SparseSets,
    stack: Vec<StateId>,
}

impl NfaBuffers {
    pub(crate) fn new(state_count: usize) -> Self {
        Self {
            sets: SparseSets::new(state_count),
            stack: Vec::with_capacity(16),
        }
    }
}

impl Automaton {
    /// Anchored full match: the entire input must be consumed along some
    /// accepting path from the start state.
    pub fn match_full<'t>(&self, input: &'t str) -> MatchResult<'t> {
        let mut bufs = NfaBuffers::new(self.arena.len());
        match self.run(input.as_bytes(), 0, true, &mut bufs) {
            Some(end) => MatchResult::span(input, 0, end),
            None => MatchResult::none(),
        }
    }

    /// Unanchored search: the leftmost match and, among matches at that
    /// start offset, the longest extent.
    ///
    /// `^` pins the start offset to 0; `$` only counts extents reaching the
    /// end of the input. With both anchors this reduces to `match_full`.
    /// Empty extents are legal matches (`A*` matches the empty string at the
    /// leftmost offset).
    pub fn search<'t>(&self, input: &'t str) -> MatchResult<'t> {
        let bytes = input.as_bytes();
        let mut bufs = NfaBuffers::new(self.arena.len());
        let last_start = if self.anchored_start { 0 } else { bytes.len() };
        for from in 0..=last_start {
            if let Some(end) = self.run(bytes, from, self.anchored_end, &mut bufs) {
                return MatchResult::span(input, from, end);
            }
        }
        MatchResult::none()
    }

    /// Simulate from `from` and return the longest accepting end offset.
    /// With `require_end`, only extents consuming through the end of the
    /// input count as accepting.
    fn run(
        &self,
        bytes: &[u8],
        from: usize,
        require_end: bool,
        bufs: &mut NfaBuffers,
    ) -> Option<usize> {
        bufs.sets.clear();
        bufs.stack.clear();
        let NfaBuffers { sets, stack } = bufs;
        let SparseSets { current, next } = sets;
        insert_closure(&self.arena, current, stack, self.start);

        let mut best = None;
        let mut pos = from;
        loop {
            if current.contains(self.accept) && (!require_end || pos == bytes.len()) {
                best = Some(pos);
            }
            if pos == bytes.len() || current.is_empty() {
                break;
            }

            let byte = bytes[pos];
            next.clear();
            for id in current.iter() {
                let target = self.arena[id].dstep(byte);
                if !target.is_none() {
                    insert_closure(&self.arena, next, stack, target);
                }
            }
            std::mem::swap(current, next);
            pos += 1;
        }
        best
    }
}

/// Insert `id` and its full epsilon closure into `set`.
fn insert_closure(arena: &StateArena, set: &mut SparseSet, stack: &mut Vec<StateId>, id: StateId) {
    if !set.insert(id) {
        return;
    }
    stack.push(id);
    while let Some(state) = stack.pop() {
        for &eps in &arena[state].epsilons {
            if set.insert(eps) {
                stack.push(eps);
            }
        }
    }
}
