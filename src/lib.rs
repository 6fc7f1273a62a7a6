//! seqrex: regular-expression matching for DNA-alphabet sequences.
//!
//! Patterns compile once into an immutable arena NFA and match many times,
//! with no backtracking anywhere. Two query modes are provided: anchored
//! full match and unanchored search with a leftmost-longest policy. Plain
//! literal needles have a separate KMP scanning path that bypasses the
//! automaton entirely.
//!
//! Supported syntax: literals, `.`, `[...]`/`[^...]` classes with ranges,
//! `|`, `(...)`, greedy `?`/`+`/`*`/`{n}`/`{n,}`/`{n,m}`, and `^`/`$`
//! anchors at the pattern edges. Patterns and inputs are treated as byte
//! strings; offsets are zero-based, half-open byte offsets. The engine does
//! not hardcode the DNA alphabet - any single-byte symbols work - but the
//! helpers in [`dna`] and [`approx`] are DNA-specific.
//!
//! ```
//! use seqrex::compile;
//!
//! let automaton = compile("^(AT|CG)*A?(GG+|T{2,3})(C|GA)?A+T$").unwrap();
//! let m = automaton.match_full("TTAAT");
//! assert!(m.matched);
//! assert_eq!(m.text, "TTAAT");
//! ```

pub mod approx;
mod automaton;
pub mod dna;
mod kmp;
mod regexp;

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

pub use approx::{ApproxMatch, MismatchMatcher, StrandMatch};
pub use automaton::{Automaton, DEFAULT_MAX_STATES};
pub use kmp::{find_all_literal, LiteralMatches};
pub use regexp::{parse, AnchorKind, Ast, SyntaxError};

/// Errors that can occur while compiling a pattern.
///
/// Matching itself cannot fail: unmatched input is a normal negative
/// [`MatchResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Malformed pattern.
    Syntax(SyntaxError),
    /// The pattern would compile to more states than the configured limit
    /// allows (e.g. an oversized bounded repeat).
    LimitExceeded { states: usize, limit: usize },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Syntax(e) => write!(f, "syntax error: {}", e),
            CompileError::LimitExceeded { states, limit } => {
                write!(f, "automaton needs {} states, limit is {}", states, limit)
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<SyntaxError> for CompileError {
    fn from(e: SyntaxError) -> Self {
        CompileError::Syntax(e)
    }
}

/// The outcome of a match query.
///
/// Offsets are zero-based, half-open byte positions; `text` borrows the
/// matched slice of the input. A negative result has `matched == false` and
/// an empty span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'t> {
    pub matched: bool,
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
}

impl<'t> MatchResult<'t> {
    pub(crate) fn span(input: &'t str, start: usize, end: usize) -> Self {
        Self {
            matched: true,
            start,
            end,
            text: &input[start..end],
        }
    }

    /// A negative result.
    pub fn none() -> MatchResult<'static> {
        MatchResult {
            matched: false,
            start: 0,
            end: 0,
            text: "",
        }
    }
}

/// Compile `pattern` with the default state limit.
pub fn compile(pattern: &str) -> Result<Automaton, CompileError> {
    compile_with_limit(pattern, DEFAULT_MAX_STATES)
}

/// Compile `pattern`, rejecting automata larger than `max_states`.
pub fn compile_with_limit(pattern: &str, max_states: usize) -> Result<Automaton, CompileError> {
    let ast = regexp::parse(pattern)?;
    automaton::build(&ast, max_states)
}

/// The matching engine: compiles patterns on demand and caches the compiled
/// automata by pattern string.
///
/// The cache is read-mostly: lookups take a lock-free snapshot, inserts
/// republish the map under a writer lock. Automata are immutable once
/// built, so an `Engine` can be shared across threads as-is:
///
/// ```
/// use seqrex::Engine;
///
/// let engine = Engine::new();
/// let m = engine.search("GG+|T{2,3}", "CATTAG").unwrap();
/// assert!(m.matched);
/// assert_eq!(m.text, "TT");
/// ```
pub struct Engine {
    cache: ArcSwap<FxHashMap<String, Arc<Automaton>>>,
    insert_lock: Mutex<()>,
    max_states: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with the default state limit.
    pub fn new() -> Self {
        Self::with_max_states(DEFAULT_MAX_STATES)
    }

    /// An engine rejecting automata larger than `max_states` at compile
    /// time.
    pub fn with_max_states(max_states: usize) -> Self {
        Self {
            cache: ArcSwap::from_pointee(FxHashMap::default()),
            insert_lock: Mutex::new(()),
            max_states,
        }
    }

    /// The automaton for `pattern`, compiled now or taken from the cache.
    pub fn compiled(&self, pattern: &str) -> Result<Arc<Automaton>, CompileError> {
        if let Some(automaton) = self.cache.load().get(pattern) {
            return Ok(automaton.clone());
        }

        // Compile outside the lock; a racing thread may build the same
        // automaton, and whichever insert loses is dropped. Compiles are
        // observably equivalent, so either copy serves.
        let built = Arc::new(compile_with_limit(pattern, self.max_states)?);

        let _guard = self.insert_lock.lock();
        let current = self.cache.load_full();
        if let Some(automaton) = current.get(pattern) {
            return Ok(automaton.clone());
        }
        let mut next = (*current).clone();
        next.insert(pattern.to_string(), built.clone());
        self.cache.store(Arc::new(next));
        Ok(built)
    }

    /// Anchored full match of `input` against `pattern`.
    pub fn match_full<'t>(
        &self,
        pattern: &str,
        input: &'t str,
    ) -> Result<MatchResult<'t>, CompileError> {
        Ok(self.compiled(pattern)?.match_full(input))
    }

    /// Unanchored leftmost-longest search of `input` for `pattern`.
    pub fn search<'t>(
        &self,
        pattern: &str,
        input: &'t str,
    ) -> Result<MatchResult<'t>, CompileError> {
        Ok(self.compiled(pattern)?.search(input))
    }

    /// Number of distinct patterns currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.cache.load().len()
    }
}
