//! Programmatic construction of automata.
//!
//! The grammar compiler that produces the automaton pair lives outside this
//! crate; this builder is the surface it (and the test suite) targets.
//! Edges are recorded as they come and validated in one pass when the
//! automaton is finished, so a malformed graph is rejected before any
//! traversal can see it.

use crate::automaton::{Atn, IntervalSet, State, StateId, SymbolId, Transition};
use crate::error::{ModelError, Result};

/// Builder for an [`Atn`].
///
/// # Examples
///
/// ```
/// use autosuggest::automaton::AtnBuilder;
///
/// let mut builder = AtnBuilder::new();
/// let start = builder.add_state();
/// let end = builder.add_state();
/// builder.atom(start, 'A' as u32, end);
///
/// let atn = builder.finish().unwrap();
/// assert_eq!(atn.state_count(), 2);
/// assert_eq!(atn.transitions(start).len(), 1);
/// assert!(atn.transitions(end).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct AtnBuilder {
    state_count: usize,
    edges: Vec<(StateId, Transition)>,
}

impl AtnBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh state and return its id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.state_count;
        self.state_count += 1;
        id
    }

    /// Record an epsilon edge from `origin` to `target`.
    pub fn epsilon(&mut self, origin: StateId, target: StateId) {
        self.edges.push((origin, Transition::Epsilon { target }));
    }

    /// Record an edge consuming the single symbol `label`.
    pub fn atom(&mut self, origin: StateId, label: SymbolId, target: StateId) {
        self.edges.push((origin, Transition::Atom { label, target }));
    }

    /// Record an edge consuming any symbol in `set`.
    pub fn set(&mut self, origin: StateId, set: IntervalSet, target: StateId) {
        self.edges.push((origin, Transition::Set { set, target }));
    }

    /// Validate the recorded graph and produce the automaton.
    ///
    /// Transition order per state is the order edges were recorded, which
    /// fixes the traversal order of every walker downstream.
    pub fn finish(self) -> Result<Atn> {
        let states = self.state_count;
        for (origin, transition) in &self.edges {
            if *origin >= states {
                return Err(ModelError::OriginOutOfBounds {
                    origin: *origin,
                    states,
                });
            }
            let target = transition.target();
            if target >= states {
                return Err(ModelError::TargetOutOfBounds { target, states });
            }
            if let Transition::Set { set, .. } = transition {
                if set.is_empty() {
                    return Err(ModelError::EmptySetTransition { origin: *origin });
                }
                for interval in set.intervals() {
                    if interval.is_empty() {
                        return Err(ModelError::InvertedInterval {
                            lo: interval.lo,
                            hi: interval.hi,
                        });
                    }
                }
            }
        }

        let mut arena: Vec<State> = (0..states).map(|_| State::default()).collect();
        for (origin, transition) in self.edges {
            arena[origin].transitions.push(transition);
        }
        Ok(Atn::from_states(arena))
    }
}
