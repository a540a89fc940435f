//! The completion engine: token replay, frontier expansion, validation.
//!
//! [`suggest_completions`] is the crate's sole public entry point. It
//! tokenizes the input, replays the recognized tokens through the
//! syntactic automaton, and at every frontier state — a state reached with
//! all known tokens consumed — collects the token types the grammar
//! expects next, turns them into literal text with the lexical walker,
//! and keeps only the candidates that re-tokenize into exactly one new
//! token the parse can actually accept.

mod token_suggester;

use crate::automaton::{AutomatonPair, StateId, SymbolId, Transition};
use crate::tokenizer::Token;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use token_suggester::TokenSuggester;
use tracing::{debug, trace};

/// Suggest the literal strings that could legally extend `input` under the
/// grammar compiled into `pair`.
///
/// The result is a deduplicated, sorted set. An empty set is a legitimate
/// outcome: the input may already be complete, or the only continuations
/// may not be expressible as finite literal text.
///
/// # Examples
///
/// Grammar `r: 'AB' 'CD'` with the first token already typed:
///
/// ```
/// use autosuggest::prelude::*;
///
/// let mut lexer = AtnBuilder::new();
/// let ab = [lexer.add_state(), lexer.add_state(), lexer.add_state()];
/// lexer.atom(ab[0], 'A' as u32, ab[1]);
/// lexer.atom(ab[1], 'B' as u32, ab[2]);
/// let cd = [lexer.add_state(), lexer.add_state(), lexer.add_state()];
/// lexer.atom(cd[0], 'C' as u32, cd[1]);
/// lexer.atom(cd[1], 'D' as u32, cd[2]);
/// let lexer = LexerAtn::new(
///     lexer.finish()?,
///     vec![
///         TokenRule { token_type: 1, channel: DEFAULT_CHANNEL, start: ab[0] },
///         TokenRule { token_type: 2, channel: DEFAULT_CHANNEL, start: cd[0] },
///     ],
/// )?;
///
/// let mut parser = AtnBuilder::new();
/// let p = [parser.add_state(), parser.add_state(), parser.add_state()];
/// parser.atom(p[0], 1, p[1]);
/// parser.atom(p[1], 2, p[2]);
/// let parser = ParserAtn::new(parser.finish()?, p[0])?;
///
/// let pair = AutomatonPair::new(lexer, parser);
/// let suggestions = suggest_completions(&pair, "AB");
/// assert_eq!(suggestions.into_iter().collect::<Vec<_>>(), vec!["CD"]);
/// # Ok::<(), autosuggest::ModelError>(())
/// ```
pub fn suggest_completions(pair: &AutomatonPair, input: &str) -> BTreeSet<String> {
    SuggestionEngine::new(pair, input).run()
}

/// One completion query: owns the token list, the untokenized remainder,
/// and the result set. Nothing is shared across queries, so independent
/// queries over one [`AutomatonPair`] can run concurrently.
struct SuggestionEngine<'a> {
    pair: &'a AutomatonPair,
    input: &'a str,
    /// Default-channel tokens of `input`, in order.
    tokens: Vec<Token>,
    /// The partial-token fragment completions must extend.
    remainder: String,
    results: BTreeSet<String>,
}

impl<'a> SuggestionEngine<'a> {
    fn new(pair: &'a AutomatonPair, input: &'a str) -> Self {
        let (all_tokens, remainder) = pair.tokenize(input).into_parts();
        let tokens: Vec<Token> = all_tokens
            .into_iter()
            .filter(Token::is_default_channel)
            .collect();
        debug!(
            tokens = tokens.len(),
            remainder = %remainder,
            "tokenized completion input"
        );
        Self {
            pair,
            input,
            tokens,
            remainder,
            results: BTreeSet::new(),
        }
    }

    fn run(mut self) -> BTreeSet<String> {
        self.replay(self.pair.parser().start_state(), 0);
        self.results
    }

    /// Replay recognized tokens from `(state, index)`. Each recursive call
    /// carries its own index, so one state can be explored at different
    /// token positions on different branches.
    fn replay(&mut self, state: StateId, index: usize) {
        if index == self.tokens.len() {
            self.expand_frontier(state);
            return;
        }
        let token_type = self.tokens[index].token_type;
        for transition in self.pair.parser().transitions(state) {
            match transition {
                Transition::Epsilon { target } => self.replay(*target, index),
                Transition::Atom { label, target } => {
                    if *label == token_type {
                        trace!(state, label, "token follows atom transition");
                        self.replay(*target, index + 1);
                    }
                }
                Transition::Set { set, target } => {
                    if set.contains(token_type) {
                        trace!(state, token_type, "token follows set transition");
                        self.replay(*target, index + 1);
                    }
                }
            }
        }
    }

    /// All known tokens are consumed at `state`: collect the token types
    /// reachable over epsilon edges, spell them out lexically, and keep
    /// the candidates that survive validation.
    fn expand_frontier(&mut self, state: StateId) {
        debug!(state, "frontier state reached");
        let mut labels = Vec::new();
        let mut seen = FxHashSet::default();
        let mut visited = FxHashSet::default();
        self.collect_expected_labels(state, &mut labels, &mut seen, &mut visited);
        if labels.is_empty() {
            return;
        }
        trace!(?labels, "expected token types at frontier");

        let candidates =
            TokenSuggester::new(self.pair.lexer()).suggest(&labels, &self.remainder);
        for candidate in candidates {
            if self.completes_one_token(state, &candidate) {
                debug!(%candidate, "suggestion accepted");
                self.results.insert(candidate);
            } else {
                debug!(%candidate, "suggestion rejected by parse validation");
            }
        }
    }

    /// Epsilon-closure of `state` collecting every atom label and set
    /// member. The visited guard is keyed on `(origin, transition index)`
    /// pairs and released on backtrack, so self-looping epsilon chains
    /// from repetition constructs terminate.
    fn collect_expected_labels(
        &self,
        state: StateId,
        labels: &mut Vec<SymbolId>,
        seen: &mut FxHashSet<SymbolId>,
        visited: &mut FxHashSet<(StateId, usize)>,
    ) {
        let parser = self.pair.parser();
        for (index, transition) in parser.transitions(state).iter().enumerate() {
            match transition {
                Transition::Epsilon { target } => {
                    if visited.insert((state, index)) {
                        self.collect_expected_labels(*target, labels, seen, visited);
                        visited.remove(&(state, index));
                    }
                }
                Transition::Atom { label, .. } => {
                    if seen.insert(*label) {
                        labels.push(*label);
                    }
                }
                Transition::Set { set, .. } => {
                    for label in set.iter() {
                        if seen.insert(label) {
                            labels.push(label);
                        }
                    }
                }
            }
        }
    }

    /// Validate a candidate: appended to the input it must re-tokenize
    /// into exactly one additional default-channel token, and that token's
    /// type must be reachable from the originating frontier state.
    fn completes_one_token(&self, frontier: StateId, candidate: &str) -> bool {
        let completed = format!("{}{}", self.input, candidate);
        let run = self.pair.tokenize(&completed);
        let defaults: Vec<&Token> = run.on_default_channel().collect();
        if defaults.len() != self.tokens.len() + 1 {
            trace!(
                %candidate,
                tokens = defaults.len(),
                "candidate did not form exactly one new token"
            );
            return false;
        }
        let Some(added) = defaults.last() else {
            return false;
        };
        let mut visited = FxHashSet::default();
        self.next_token_reachable(frontier, added.token_type, &mut visited)
    }

    /// Fresh epsilon-closure reachability test: can `state` consume a
    /// token of type `token_type` next?
    fn next_token_reachable(
        &self,
        state: StateId,
        token_type: SymbolId,
        visited: &mut FxHashSet<(StateId, usize)>,
    ) -> bool {
        let parser = self.pair.parser();
        for (index, transition) in parser.transitions(state).iter().enumerate() {
            match transition {
                Transition::Epsilon { target } => {
                    if visited.insert((state, index)) {
                        if self.next_token_reachable(*target, token_type, visited) {
                            return true;
                        }
                        visited.remove(&(state, index));
                    }
                }
                Transition::Atom { label, .. } => {
                    if *label == token_type {
                        return true;
                    }
                }
                Transition::Set { set, .. } => {
                    if set.contains(token_type) {
                        return true;
                    }
                }
            }
        }
        false
    }
}
