//! Lexical completion walker.
//!
//! Given the token types a frontier parse state expects next, this walker
//! descends the lexical automaton from each corresponding rule start state
//! and enumerates the literal strings that would finish the token the user
//! has begun typing. The already-typed fragment pins the walk: a character
//! edge is followed only when the fragment is exhausted (the character
//! becomes part of the suggestion) or the character is exactly the next
//! one in the fragment (the walk resumes lexing mid-token and the
//! character is not re-suggested).

use crate::automaton::{LexerAtn, StateId, SymbolId, Transition};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use tracing::trace;

/// Enumerates literal completions for expected token types.
pub(crate) struct TokenSuggester<'a> {
    lexer: &'a LexerAtn,
    suggestions: BTreeSet<String>,
    /// States on the current DFS path; blocks re-entry so repetition
    /// loops in the automaton cannot recurse unboundedly.
    visited: FxHashSet<StateId>,
}

impl<'a> TokenSuggester<'a> {
    pub(crate) fn new(lexer: &'a LexerAtn) -> Self {
        Self {
            lexer,
            suggestions: BTreeSet::new(),
            visited: FxHashSet::default(),
        }
    }

    /// Enumerate completions of `remainder` into full tokens, for every
    /// token type in `labels`.
    ///
    /// A label with no lexical rule behind it (unknown type, or a type the
    /// grammar only defines as a fragment) contributes nothing.
    pub(crate) fn suggest(mut self, labels: &[SymbolId], remainder: &str) -> BTreeSet<String> {
        for &label in labels {
            match self.lexer.rule_start_state(label) {
                Some(start) => self.walk(start, "", remainder),
                None => trace!(label, "no lexical rule for expected token type"),
            }
        }
        self.suggestions
    }

    /// Depth-first walk accumulating net-new characters into `candidate`.
    fn walk(&mut self, state: StateId, candidate: &str, remaining: &str) {
        if !self.visited.insert(state) {
            return;
        }
        let transitions = self.lexer.transitions(state);
        if transitions.is_empty() {
            if !candidate.is_empty() {
                trace!(candidate, "token completion found");
                self.suggestions.insert(candidate.to_string());
            }
        } else {
            for transition in transitions {
                match transition {
                    Transition::Epsilon { target } => self.walk(*target, candidate, remaining),
                    Transition::Atom { label, target } => {
                        self.follow(*label, *target, candidate, remaining);
                    }
                    Transition::Set { set, target } => {
                        for label in set.iter() {
                            self.follow(label, *target, candidate, remaining);
                        }
                    }
                }
            }
        }
        self.visited.remove(&state);
    }

    /// Follow one character edge, either consuming the next typed
    /// character of `remaining` or extending the candidate text.
    fn follow(&mut self, label: SymbolId, target: StateId, candidate: &str, remaining: &str) {
        let Some(ch) = char::from_u32(label) else {
            // Set intervals may sweep across non-scalar code points;
            // those can never be typed.
            return;
        };
        if let Some(rest) = remaining.strip_prefix(ch) {
            self.walk(target, candidate, rest);
        } else if remaining.is_empty() {
            let mut extended = String::with_capacity(candidate.len() + ch.len_utf8());
            extended.push_str(candidate);
            extended.push(ch);
            self.walk(target, &extended, remaining);
        }
    }
}
