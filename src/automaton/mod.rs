//! The shared automaton model: states, transitions, and the lexer/parser
//! automaton pair produced by an external grammar compiler.
//!
//! Both automata share one representation. States are arena-indexed and
//! immutable once built; every traversal component reads them through
//! shared references and nothing here is mutated after construction.
//!
//! The same transition alphabet serves two interpretations: in the lexical
//! automaton an atom label is a character code, in the syntactic automaton
//! it is a token type. Token types count from 1, and type `t` corresponds
//! to lexical rule `t - 1` — that shifted mapping is the bridge the
//! completion engine crosses when it turns an expected token type into a
//! lexical start state.

mod builder;
mod interval;
mod pair;

pub use builder::AtnBuilder;
pub use interval::{Interval, IntervalSet};
pub use pair::{AutomatonPair, LexerAtn, ParserAtn, TokenRule};

use smallvec::SmallVec;

/// Index of a state within one automaton's arena.
pub type StateId = usize;

/// A consumable symbol id: a character code in the lexical automaton,
/// a token type in the syntactic automaton.
pub type SymbolId = u32;

/// Identifier of a token channel.
pub type ChannelId = u32;

/// The channel whose tokens participate in syntactic replay. Tokens on any
/// other channel (skipped whitespace, comments) are hidden from the parser
/// but still consume input characters.
pub const DEFAULT_CHANNEL: ChannelId = 0;

/// An edge of an automaton.
///
/// This is a closed sum: the traversal components match it exhaustively,
/// so an automaton model and walker cannot silently drift apart over an
/// unhandled edge kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Consumes nothing and moves to `target`.
    Epsilon {
        /// Destination state
        target: StateId,
    },
    /// Consumes exactly one symbol equal to `label`.
    Atom {
        /// The single symbol this edge accepts
        label: SymbolId,
        /// Destination state
        target: StateId,
    },
    /// Consumes one symbol falling inside `set`.
    Set {
        /// Union of closed intervals this edge accepts
        set: IntervalSet,
        /// Destination state
        target: StateId,
    },
}

impl Transition {
    /// Destination state of this edge.
    pub fn target(&self) -> StateId {
        match self {
            Transition::Epsilon { target }
            | Transition::Atom { target, .. }
            | Transition::Set { target, .. } => *target,
        }
    }

    /// Whether this edge consumes no symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Transition::Epsilon { .. })
    }
}

/// An automaton state: an ordered list of outgoing transitions.
///
/// A state with zero transitions is an accept point (or a dead end, for
/// paths that carry nothing); a state with several transitions branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub(crate) transitions: SmallVec<[Transition; 4]>,
}

impl State {
    /// Outgoing transitions in definition order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

/// An immutable automaton: a state arena addressed by [`StateId`].
///
/// Built through [`AtnBuilder`], which guarantees every transition origin
/// and target is in bounds, so lookups here never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atn {
    states: Vec<State>,
}

impl Atn {
    pub(crate) fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Number of states in the arena.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Outgoing transitions of `state` in definition order.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        &self.states[state].transitions
    }
}
