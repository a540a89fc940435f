//! Greedy tokenization of input text over the lexical automaton.
//!
//! The tokenizer runs maximal munch: at each position every token rule is
//! simulated over the remaining text, the longest match wins, and ties go
//! to the earliest-defined rule. At the first position where no rule can
//! form a token the rest of the input is captured as the untokenized
//! remainder — the partial-token fragment the completion engine later
//! extends — and lexing stops rather than attempting any recovery.

use crate::automaton::{ChannelId, LexerAtn, StateId, SymbolId, Transition, DEFAULT_CHANNEL};
use rustc_hash::FxHashSet;
use tracing::trace;

/// A recognized unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token type, counting from 1.
    pub token_type: SymbolId,
    /// The literal matched text.
    pub text: String,
    /// Channel the producing rule emits on.
    pub channel: ChannelId,
}

impl Token {
    /// Whether this token participates in syntactic replay.
    pub fn is_default_channel(&self) -> bool {
        self.channel == DEFAULT_CHANNEL
    }
}

/// The outcome of tokenizing one input string: every recognized token
/// (all channels) plus the untokenized trailing fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    tokens: Vec<Token>,
    remainder: String,
}

impl Tokenization {
    /// All recognized tokens, hidden channels included, in input order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The input suffix starting at the first character the lexical
    /// automaton could not consume as part of a complete token. Empty when
    /// the whole input tokenized cleanly.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Tokens on the default channel, in input order.
    pub fn on_default_channel(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_default_channel())
    }

    /// Consume the tokenization, yielding its parts.
    pub fn into_parts(self) -> (Vec<Token>, String) {
        (self.tokens, self.remainder)
    }
}

/// Runs the lexical automaton over input text.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    lexer: &'a LexerAtn,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `lexer`.
    pub fn new(lexer: &'a LexerAtn) -> Self {
        Self { lexer }
    }

    /// Tokenize `input` greedily, capturing the untokenized remainder.
    pub fn tokenize(&self, input: &str) -> Tokenization {
        let mut tokens = Vec::new();
        let mut pos = 0;
        while pos < input.len() {
            match self.longest_match(&input[pos..]) {
                Some((len, rule_index)) => {
                    let rule = &self.lexer.rules()[rule_index];
                    let text = &input[pos..pos + len];
                    trace!(token_type = rule.token_type, text, "matched token");
                    tokens.push(Token {
                        token_type: rule.token_type,
                        text: text.to_string(),
                        channel: rule.channel,
                    });
                    pos += len;
                }
                None => {
                    trace!(offset = pos, "no token matches; capturing remainder");
                    break;
                }
            }
        }
        Tokenization {
            tokens,
            remainder: input[pos..].to_string(),
        }
    }

    /// The longest match over all rules at the start of `text`, as a
    /// `(byte length, rule index)` pair. Ties go to the earliest rule.
    fn longest_match(&self, text: &str) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (index, rule) in self.lexer.rules().iter().enumerate() {
            if let Some(len) = self.match_rule(rule.start, text) {
                if best.map_or(true, |(best_len, _)| len > best_len) {
                    best = Some((len, index));
                }
            }
        }
        best
    }

    /// Length in bytes of the longest prefix of `text` accepted by the
    /// rule starting at `start`, ignoring zero-length acceptance.
    fn match_rule(&self, start: StateId, text: &str) -> Option<usize> {
        let mut current = FxHashSet::default();
        current.insert(start);
        self.close_over_epsilon(&mut current);

        let mut matched = None;
        for (offset, ch) in text.char_indices() {
            let code = ch as SymbolId;
            let mut next = FxHashSet::default();
            for &state in &current {
                for transition in self.lexer.transitions(state) {
                    match transition {
                        Transition::Epsilon { .. } => {}
                        Transition::Atom { label, target } => {
                            if *label == code {
                                next.insert(*target);
                            }
                        }
                        Transition::Set { set, target } => {
                            if set.contains(code) {
                                next.insert(*target);
                            }
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            self.close_over_epsilon(&mut next);
            if next
                .iter()
                .any(|&state| self.lexer.transitions(state).is_empty())
            {
                matched = Some(offset + ch.len_utf8());
            }
            current = next;
        }
        matched
    }

    /// Extend `states` with everything reachable over epsilon edges alone.
    fn close_over_epsilon(&self, states: &mut FxHashSet<StateId>) {
        let mut stack: Vec<StateId> = states.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for transition in self.lexer.transitions(state) {
                if let Transition::Epsilon { target } = transition {
                    if states.insert(*target) {
                        stack.push(*target);
                    }
                }
            }
        }
    }
}
