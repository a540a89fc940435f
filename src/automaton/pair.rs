//! The linked lexer/parser automaton pair.
//!
//! A grammar compiles into two automata that share state representation but
//! consume different symbols: the lexical automaton consumes characters and
//! produces tokens, the syntactic automaton consumes tokens. The pair ties
//! them together with the rule table that maps an expected token type to
//! the lexical start state able to spell it.

use crate::automaton::{Atn, ChannelId, StateId, SymbolId, Transition};
use crate::error::{ModelError, Result};
use crate::tokenizer::{Tokenization, Tokenizer};

/// One token-producing lexical rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    /// Token type this rule produces; rule `i` must carry type `i + 1`.
    pub token_type: SymbolId,
    /// Channel its tokens are emitted on.
    pub channel: ChannelId,
    /// Start state of the rule's sub-automaton.
    pub start: StateId,
}

/// The lexical automaton plus its token rule table.
#[derive(Debug, Clone)]
pub struct LexerAtn {
    atn: Atn,
    rules: Vec<TokenRule>,
}

impl LexerAtn {
    /// Wrap an automaton with its rule table, validating that every rule
    /// start state exists and the shifted type mapping holds.
    pub fn new(atn: Atn, rules: Vec<TokenRule>) -> Result<Self> {
        let states = atn.state_count();
        for (index, rule) in rules.iter().enumerate() {
            if rule.start >= states {
                return Err(ModelError::RuleStartOutOfBounds {
                    rule: index,
                    start: rule.start,
                    states,
                });
            }
            let expected = index as SymbolId + 1;
            if rule.token_type != expected {
                return Err(ModelError::RuleTokenTypeMismatch {
                    rule: index,
                    token_type: rule.token_type,
                    expected,
                });
            }
        }
        Ok(Self { atn, rules })
    }

    /// The token rules in definition order.
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// The lexical start state for `token_type`, or `None` when no rule
    /// produces that type (an unknown type, or one backed only by a
    /// fragment the parser cannot actually receive).
    ///
    /// This is the typed cross-automaton lookup: token type `t` maps to
    /// rule `t - 1`, supplied by the grammar compiler rather than found
    /// by scanning.
    pub fn rule_start_state(&self, token_type: SymbolId) -> Option<StateId> {
        let rule = token_type.checked_sub(1)? as usize;
        self.rules.get(rule).map(|r| r.start)
    }

    /// Outgoing transitions of `state` in definition order.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        self.atn.transitions(state)
    }

    /// Number of states in the lexical automaton.
    pub fn state_count(&self) -> usize {
        self.atn.state_count()
    }
}

/// The syntactic automaton plus its start state.
#[derive(Debug, Clone)]
pub struct ParserAtn {
    atn: Atn,
    start: StateId,
}

impl ParserAtn {
    /// Wrap an automaton with its start state, validating that the start
    /// state exists.
    pub fn new(atn: Atn, start: StateId) -> Result<Self> {
        if start >= atn.state_count() {
            return Err(ModelError::StartOutOfBounds {
                start,
                states: atn.state_count(),
            });
        }
        Ok(Self { atn, start })
    }

    /// The state token replay begins from.
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// Outgoing transitions of `state` in definition order.
    pub fn transitions(&self, state: StateId) -> &[Transition] {
        self.atn.transitions(state)
    }

    /// Number of states in the syntactic automaton.
    pub fn state_count(&self) -> usize {
        self.atn.state_count()
    }
}

/// A grammar compiled into its two linked automata.
///
/// The pair is read-only: independent completion calls may share one pair
/// across threads, since every traversal owns its own guards and results.
#[derive(Debug, Clone)]
pub struct AutomatonPair {
    lexer: LexerAtn,
    parser: ParserAtn,
}

impl AutomatonPair {
    /// Combine a lexical and a syntactic automaton.
    pub fn new(lexer: LexerAtn, parser: ParserAtn) -> Self {
        Self { lexer, parser }
    }

    /// The lexical side.
    pub fn lexer(&self) -> &LexerAtn {
        &self.lexer
    }

    /// The syntactic side.
    pub fn parser(&self) -> &ParserAtn {
        &self.parser
    }

    /// Tokenize `input` with the lexical automaton, capturing the trailing
    /// fragment the lexer could not form into a token.
    pub fn tokenize(&self, input: &str) -> Tokenization {
        Tokenizer::new(&self.lexer).tokenize(input)
    }
}
