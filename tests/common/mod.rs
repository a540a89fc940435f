//! Shared test support: a tiny grammar assembler.
//!
//! Compiling grammar text into automata is out of scope for the crate, so
//! the integration tests assemble automaton pairs from small combinator
//! descriptions instead: token rules from [`Lex`] elements, the parser
//! rule from [`Syn`] elements. The shapes mirror the usual compilation of
//! sequence, alternative, optional and repetition constructs into
//! epsilon-linked sub-automata.

#![allow(dead_code)]

use autosuggest::prelude::*;
use std::collections::BTreeSet;

/// A lexical rule element.
#[derive(Debug, Clone)]
pub enum Lex {
    /// A literal character sequence.
    Lit(String),
    /// One character from an inclusive range.
    Range(char, char),
    /// Elements in order.
    Seq(Vec<Lex>),
    /// Zero or more repetitions.
    Star(Box<Lex>),
    /// One or more repetitions.
    Plus(Box<Lex>),
}

pub fn lit(text: &str) -> Lex {
    Lex::Lit(text.to_string())
}

pub fn range(lo: char, hi: char) -> Lex {
    Lex::Range(lo, hi)
}

pub fn lex_seq(items: Vec<Lex>) -> Lex {
    Lex::Seq(items)
}

pub fn lex_star(inner: Lex) -> Lex {
    Lex::Star(Box::new(inner))
}

pub fn lex_plus(inner: Lex) -> Lex {
    Lex::Plus(Box::new(inner))
}

/// A parser rule element.
#[derive(Debug, Clone)]
pub enum Syn {
    /// Consume one token of the given type.
    Tok(SymbolId),
    /// Consume one token out of a type range, as a single set edge.
    TokRange(SymbolId, SymbolId),
    /// Elements in order.
    Seq(Vec<Syn>),
    /// Any one of the elements.
    Alt(Vec<Syn>),
    /// The element, or nothing.
    Opt(Box<Syn>),
    /// Zero or more repetitions.
    Star(Box<Syn>),
    /// One or more repetitions.
    Plus(Box<Syn>),
}

pub fn tok(token_type: SymbolId) -> Syn {
    Syn::Tok(token_type)
}

pub fn tok_range(lo: SymbolId, hi: SymbolId) -> Syn {
    Syn::TokRange(lo, hi)
}

pub fn seq(items: Vec<Syn>) -> Syn {
    Syn::Seq(items)
}

pub fn alt(items: Vec<Syn>) -> Syn {
    Syn::Alt(items)
}

pub fn opt(inner: Syn) -> Syn {
    Syn::Opt(Box::new(inner))
}

pub fn star(inner: Syn) -> Syn {
    Syn::Star(Box::new(inner))
}

pub fn plus(inner: Syn) -> Syn {
    Syn::Plus(Box::new(inner))
}

/// Assembles a lexical rule table and one parser rule into an
/// [`AutomatonPair`].
pub struct GrammarBuilder {
    lexer: AtnBuilder,
    rules: Vec<TokenRule>,
    phantoms: u32,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            lexer: AtnBuilder::new(),
            rules: Vec::new(),
            phantoms: 0,
        }
    }

    /// Add a default-channel token rule, returning its token type.
    pub fn token(&mut self, element: Lex) -> SymbolId {
        self.add_rule(element, DEFAULT_CHANNEL)
    }

    /// Add a hidden-channel token rule (skipped whitespace, comments).
    pub fn hidden_token(&mut self, element: Lex) -> SymbolId {
        self.add_rule(element, 1)
    }

    /// Allocate a token type with no lexical rule behind it, standing in
    /// for a fragment-only token the lexer can never produce. Must come
    /// after all real token rules.
    pub fn unlexable_token(&mut self) -> SymbolId {
        self.phantoms += 1;
        self.rules.len() as SymbolId + self.phantoms
    }

    fn add_rule(&mut self, element: Lex, channel: ChannelId) -> SymbolId {
        assert_eq!(self.phantoms, 0, "real token rules must come before unlexable ones");
        let (entry, _exit) = compile_lex(&mut self.lexer, &element);
        let token_type = self.rules.len() as SymbolId + 1;
        self.rules.push(TokenRule {
            token_type,
            channel,
            start: entry,
        });
        token_type
    }

    /// Finish both automata and link them into a pair.
    pub fn compile(self, rule: Syn) -> AutomatonPair {
        let lexer = LexerAtn::new(self.lexer.finish().unwrap(), self.rules).unwrap();
        let mut builder = AtnBuilder::new();
        let (start, _stop) = compile_syn(&mut builder, &rule);
        let parser = ParserAtn::new(builder.finish().unwrap(), start).unwrap();
        AutomatonPair::new(lexer, parser)
    }
}

fn compile_lex(builder: &mut AtnBuilder, element: &Lex) -> (StateId, StateId) {
    match element {
        Lex::Lit(text) => {
            assert!(!text.is_empty(), "empty literal");
            let entry = builder.add_state();
            let mut current = entry;
            for ch in text.chars() {
                let next = builder.add_state();
                builder.atom(current, ch as u32, next);
                current = next;
            }
            (entry, current)
        }
        Lex::Range(lo, hi) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            builder.set(entry, IntervalSet::of(*lo as u32, *hi as u32), exit);
            (entry, exit)
        }
        Lex::Seq(items) => chain(items, builder, compile_lex),
        Lex::Star(inner) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            let decision = builder.add_state();
            builder.epsilon(entry, decision);
            let (inner_entry, inner_exit) = compile_lex(builder, inner);
            builder.epsilon(decision, inner_entry);
            builder.epsilon(inner_exit, decision);
            builder.epsilon(decision, exit);
            (entry, exit)
        }
        Lex::Plus(inner) => {
            let (inner_entry, inner_exit) = compile_lex(builder, inner);
            let loop_back = builder.add_state();
            let exit = builder.add_state();
            builder.epsilon(inner_exit, loop_back);
            builder.epsilon(loop_back, inner_entry);
            builder.epsilon(loop_back, exit);
            (inner_entry, exit)
        }
    }
}

fn compile_syn(builder: &mut AtnBuilder, element: &Syn) -> (StateId, StateId) {
    match element {
        Syn::Tok(token_type) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            builder.atom(entry, *token_type, exit);
            (entry, exit)
        }
        Syn::TokRange(lo, hi) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            builder.set(entry, IntervalSet::of(*lo, *hi), exit);
            (entry, exit)
        }
        Syn::Seq(items) => chain(items, builder, compile_syn),
        Syn::Alt(items) => {
            assert!(!items.is_empty(), "empty alternative");
            let entry = builder.add_state();
            let exit = builder.add_state();
            for item in items {
                let (inner_entry, inner_exit) = compile_syn(builder, item);
                builder.epsilon(entry, inner_entry);
                builder.epsilon(inner_exit, exit);
            }
            (entry, exit)
        }
        Syn::Opt(inner) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            let (inner_entry, inner_exit) = compile_syn(builder, inner);
            builder.epsilon(entry, inner_entry);
            builder.epsilon(entry, exit);
            builder.epsilon(inner_exit, exit);
            (entry, exit)
        }
        Syn::Star(inner) => {
            let entry = builder.add_state();
            let exit = builder.add_state();
            let decision = builder.add_state();
            builder.epsilon(entry, decision);
            let (inner_entry, inner_exit) = compile_syn(builder, inner);
            builder.epsilon(decision, inner_entry);
            builder.epsilon(inner_exit, decision);
            builder.epsilon(decision, exit);
            (entry, exit)
        }
        Syn::Plus(inner) => {
            let (inner_entry, inner_exit) = compile_syn(builder, inner);
            let loop_back = builder.add_state();
            let exit = builder.add_state();
            builder.epsilon(inner_exit, loop_back);
            builder.epsilon(loop_back, inner_entry);
            builder.epsilon(loop_back, exit);
            (inner_entry, exit)
        }
    }
}

fn chain<E>(
    items: &[E],
    builder: &mut AtnBuilder,
    compile: fn(&mut AtnBuilder, &E) -> (StateId, StateId),
) -> (StateId, StateId) {
    assert!(!items.is_empty(), "empty sequence");
    let mut entry = None;
    let mut previous_exit: Option<StateId> = None;
    for item in items {
        let (item_entry, item_exit) = compile(builder, item);
        match previous_exit {
            Some(exit) => builder.epsilon(exit, item_entry),
            None => entry = Some(item_entry),
        }
        previous_exit = Some(item_exit);
    }
    (entry.unwrap(), previous_exit.unwrap())
}

/// Assert that completing `input` yields exactly `expected`.
pub fn assert_suggests(pair: &AutomatonPair, input: &str, expected: &[&str]) {
    let actual = suggest_completions(pair, input);
    let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, expected, "completions for input {input:?}");
}
