//! Error types for grammar analysis.

use thiserror::Error;

use crate::symbol::{NonTerminal, Terminal};

/// Errors that can occur while analyzing a context-free grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The grammar has no productions, or its start symbol is the lhs of none.
    #[error("grammar is empty: no productions, or start symbol has no production")]
    EmptyGrammar,

    /// A nonterminal appears on some production's rhs but is never the lhs of a production.
    #[error("nonterminal {0} is never defined by a production")]
    UndefinedNonTerminal(NonTerminal),

    /// A cell in the LL(1) table would need to hold two distinct productions.
    #[error("LL(1) conflict at M[{nonterminal}, {terminal}]:\n  {first}\n  {second}")]
    LL1Conflict {
        nonterminal: NonTerminal,
        terminal: Terminal,
        first: String,
        second: String,
    },

    /// An LR(1)/LALR(1) ACTION cell would need to both shift and reduce.
    #[error("shift/reduce conflict in state {state} on {terminal}: shift to {shift_to} vs reduce {reduce}")]
    LRShiftReduceConflict {
        state: usize,
        terminal: Terminal,
        shift_to: usize,
        reduce: String,
    },

    /// An LR(1)/LALR(1) ACTION cell would need to reduce by two distinct productions.
    #[error("reduce/reduce conflict in state {state} on {terminal}:\n  {first}\n  {second}")]
    LRReduceReduceConflict {
        state: usize,
        terminal: Terminal,
        first: String,
        second: String,
    },
}

/// Type alias for `Result`s returned by this crate's analyses.
pub type Result<T> = std::result::Result<T, GrammarError>;
