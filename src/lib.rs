//! # autosuggest
//!
//! Grammar-driven input completion using linked finite-state automata.
//!
//! Given a grammar compiled into a pair of automata — a lexical automaton
//! turning characters into tokens and a syntactic automaton turning tokens
//! into rule structure — this crate answers, for any prefix of input:
//! *what literal text(s) could legally come next?*
//!
//! The engine works in four passes:
//!
//! 1. **Tokenize** the input greedily, keeping the trailing fragment the
//!    lexer could not form into a complete token.
//! 2. **Replay** the recognized tokens through the syntactic automaton to
//!    find every frontier state reachable once all tokens are consumed.
//! 3. **Expand** each frontier into literal candidate strings by walking
//!    the lexical automaton from the start state of every expected token
//!    type, resuming mid-token through the trailing fragment.
//! 4. **Validate** each candidate by re-tokenizing the extended input and
//!    checking that the new token is one the frontier can actually
//!    consume, discarding candidates that are lexically plausible but
//!    syntactically unreachable.
//!
//! Compiling grammar source text into the automaton pair is an upstream
//! concern; automata are constructed through [`automaton::AtnBuilder`] and
//! handed in read-only. One [`automaton::AutomatonPair`] may serve
//! completion calls from many threads at once, since every call owns its
//! own traversal state.
//!
//! ## Example
//!
//! ```rust,ignore
//! use autosuggest::prelude::*;
//!
//! let pair: AutomatonPair = grammar_compiler::compile("r: 'AB' 'CD';")?;
//!
//! assert!(suggest_completions(&pair, "AB").contains("CD"));
//! assert!(suggest_completions(&pair, "ABC").contains("D"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod error;
pub mod suggest;
pub mod tokenizer;

pub use error::ModelError;
pub use suggest::suggest_completions;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{
        Atn, AtnBuilder, AutomatonPair, ChannelId, Interval, IntervalSet, LexerAtn,
        ParserAtn, State, StateId, SymbolId, TokenRule, Transition, DEFAULT_CHANNEL,
    };
    pub use crate::error::ModelError;
    pub use crate::suggest::suggest_completions;
    pub use crate::tokenizer::{Token, Tokenization, Tokenizer};
}
