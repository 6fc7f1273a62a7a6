//! Thompson-style construction from the parsed pattern to an arena NFA.
//!
//! Construction is continuation-passing and runs back to front: every helper
//! receives the state to reach *after* its fragment matches and returns the
//! fragment's entry state. `*` and `+` become true cycles through a loopback
//! state instead of unrolled chains; bounded repeats are unrolled (`min`
//! mandatory copies, then optional copies or a star loop), which keeps the
//! simulation counter-free.

use super::arena::{SmallTable, StateArena, StateId, BYTE_CEILING};
use super::Automaton;
use crate::regexp::{AnchorKind, Ast};
use crate::CompileError;

/// Default cap on automaton size, enforced during construction.
pub const DEFAULT_MAX_STATES: usize = 10_000;

/// Compile a parsed pattern into an automaton, rejecting automata that
/// would exceed `max_states`.
pub fn build(ast: &Ast, max_states: usize) -> Result<Automaton, CompileError> {
    let mut builder = Builder {
        arena: StateArena::with_capacity(16),
        max_states,
        anchored_start: false,
        anchored_end: false,
    };
    let accept = builder.alloc()?;
    let start = builder.node_fa(ast, accept)?;
    Ok(Automaton::from_parts(
        builder.arena,
        start,
        accept,
        builder.anchored_start,
        builder.anchored_end,
    ))
}

struct Builder {
    arena: StateArena,
    max_states: usize,
    anchored_start: bool,
    anchored_end: bool,
}

impl Builder {
    fn alloc(&mut self) -> Result<StateId, CompileError> {
        if self.arena.len() >= self.max_states {
            return Err(CompileError::LimitExceeded {
                states: self.arena.len() + 1,
                limit: self.max_states,
            });
        }
        Ok(self.arena.alloc())
    }

    fn alloc_with_table(&mut self, table: SmallTable) -> Result<StateId, CompileError> {
        if self.arena.len() >= self.max_states {
            return Err(CompileError::LimitExceeded {
                states: self.arena.len() + 1,
                limit: self.max_states,
            });
        }
        Ok(self.arena.alloc_with_table(table))
    }

    /// A fresh state that matches nothing and epsilons to `next`.
    fn epsilon_to(&mut self, next: StateId) -> Result<StateId, CompileError> {
        let id = self.alloc()?;
        self.arena[id].epsilons.push(next);
        Ok(id)
    }

    /// Build the fragment for `node`, transitioning to `next` on match.
    ///
    /// Always returns a state allocated within this call, so callers may
    /// push extra epsilons onto the entry without aliasing `next`.
    fn node_fa(&mut self, node: &Ast, next: StateId) -> Result<StateId, CompileError> {
        match node {
            Ast::Empty => self.epsilon_to(next),
            Ast::Literal(b) => self.alloc_with_table(SmallTable::with_bytes(&[*b], next)),
            Ast::Dot => {
                let mut table = SmallTable::new();
                table.pack(&[next; BYTE_CEILING]);
                self.alloc_with_table(table)
            }
            Ast::Class { bytes, negated } => {
                let mut unpacked = if *negated {
                    [next; BYTE_CEILING]
                } else {
                    [StateId::NONE; BYTE_CEILING]
                };
                for &b in bytes {
                    unpacked[b as usize] = if *negated { StateId::NONE } else { next };
                }
                let mut table = SmallTable::new();
                table.pack(&unpacked);
                self.alloc_with_table(table)
            }
            Ast::Concat(parts) => {
                let mut current_next = next;
                for part in parts.iter().rev() {
                    current_next = self.node_fa(part, current_next)?;
                }
                Ok(current_next)
            }
            Ast::Alternate(branches) => {
                let mut entries = Vec::with_capacity(branches.len());
                for branch in branches {
                    entries.push(self.node_fa(branch, next)?);
                }
                let entry = self.alloc()?;
                self.arena[entry].epsilons.extend(entries);
                Ok(entry)
            }
            Ast::Star(child) => self.loop_fa(child, next, true),
            Ast::Plus(child) => self.loop_fa(child, next, false),
            Ast::Optional(child) => {
                let entry = self.node_fa(child, next)?;
                self.arena[entry].epsilons.push(next);
                Ok(entry)
            }
            Ast::Repeat { node: child, min, max } => self.repeat_fa(child, *min, *max, next),
            Ast::Group(child) => self.node_fa(child, next),
            Ast::Anchor(kind) => {
                match kind {
                    AnchorKind::Start => self.anchored_start = true,
                    AnchorKind::End => self.anchored_end = true,
                }
                // Zero-width: the position constraint is enforced by the
                // matcher through the automaton's anchor flags.
                self.epsilon_to(next)
            }
        }
    }

    /// Cyclic fragment for `*` (`allow_zero`) and `+`:
    ///
    /// ```text
    /// entry --atom--> loopback --e--> exit
    ///   ^                |
    ///   '-------e--------'
    /// ```
    ///
    /// For `*`, entry also has an epsilon straight to exit.
    fn loop_fa(&mut self, child: &Ast, exit: StateId, allow_zero: bool) -> Result<StateId, CompileError> {
        let loopback = self.alloc()?;
        let entry = self.node_fa(child, loopback)?;
        self.arena[loopback].epsilons.push(exit);
        self.arena[loopback].epsilons.push(entry);
        if allow_zero {
            self.arena[entry].epsilons.push(exit);
        }
        Ok(entry)
    }

    /// Unrolled `{min,max}`: optional copies are built first (back to
    /// front), then the mandatory ones; an unbounded tail is a star loop.
    fn repeat_fa(
        &mut self,
        child: &Ast,
        min: u32,
        max: Option<u32>,
        next: StateId,
    ) -> Result<StateId, CompileError> {
        let min = min as usize;
        match max {
            Some(max) => {
                let max = max as usize;
                // {0,0} matches exactly the empty string
                if max == 0 {
                    return self.epsilon_to(next);
                }
                let mut current_next = next;
                for _ in min..max {
                    let entry = self.node_fa(child, current_next)?;
                    self.arena[entry].epsilons.push(current_next);
                    current_next = entry;
                }
                for _ in 0..min {
                    current_next = self.node_fa(child, current_next)?;
                }
                Ok(current_next)
            }
            None => {
                let mut current_next = self.loop_fa(child, next, true)?;
                for _ in 0..min {
                    current_next = self.node_fa(child, current_next)?;
                }
                Ok(current_next)
            }
        }
    }
}
