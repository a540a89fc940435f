//! Error types for automaton model construction.

use crate::automaton::{StateId, SymbolId};
use thiserror::Error;

/// Errors reported while assembling an automaton.
///
/// The traversal components never produce errors themselves; a malformed
/// automaton is rejected here, at construction time, so the walkers only
/// ever see structurally valid state graphs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A transition was attached to a state id that was never created.
    #[error("transition origin state {origin} is out of bounds ({states} states)")]
    OriginOutOfBounds {
        /// Offending origin state id
        origin: StateId,
        /// Number of states in the automaton
        states: usize,
    },

    /// A transition points at a state id that was never created.
    #[error("transition target state {target} is out of bounds ({states} states)")]
    TargetOutOfBounds {
        /// Offending target state id
        target: StateId,
        /// Number of states in the automaton
        states: usize,
    },

    /// A set transition contains an interval with its bounds reversed.
    #[error("interval {lo}..={hi} is inverted")]
    InvertedInterval {
        /// Lower bound as given
        lo: SymbolId,
        /// Upper bound as given
        hi: SymbolId,
    },

    /// A set transition carries no intervals at all.
    ///
    /// Such an edge could never consume a symbol, which indicates the
    /// producing grammar compiler has drifted out of sync with the model.
    #[error("set transition from state {origin} has an empty interval set")]
    EmptySetTransition {
        /// Origin state of the offending transition
        origin: StateId,
    },

    /// A token rule's start state does not exist in the lexical automaton.
    #[error("token rule {rule} start state {start} is out of bounds ({states} states)")]
    RuleStartOutOfBounds {
        /// Zero-based rule index
        rule: usize,
        /// Offending start state id
        start: StateId,
        /// Number of states in the automaton
        states: usize,
    },

    /// A token rule's declared type breaks the shifted 1:1 rule mapping.
    ///
    /// Rule `i` must carry token type `i + 1` so that
    /// [`LexerAtn::rule_start_state`](crate::automaton::LexerAtn::rule_start_state)
    /// is a direct lookup rather than a search.
    #[error("token rule {rule} declares token type {token_type}, expected {expected}")]
    RuleTokenTypeMismatch {
        /// Zero-based rule index
        rule: usize,
        /// Declared token type
        token_type: SymbolId,
        /// The type the mapping requires
        expected: SymbolId,
    },

    /// The syntactic automaton's start state does not exist.
    #[error("start state {start} is out of bounds ({states} states)")]
    StartOutOfBounds {
        /// Offending start state id
        start: StateId,
        /// Number of states in the automaton
        states: usize,
    },
}

/// A specialized `Result` type for automaton construction.
pub type Result<T> = std::result::Result<T, ModelError>;
