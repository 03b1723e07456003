//! Symbol types and utilities for context-free grammars.
//!
//! This module defines the core symbol types and utility functions for working with
//! grammar symbols (terminals, nonterminals) and the epsilon / end-of-input sentinels
//! that appear around them.

use std::fmt;
use std::rc::Rc;

/// The conventional end-of-input terminal name.
const END_OF_INPUT: &str = "$";

/// A terminal symbol, interned by name.
///
/// Equality, hashing and ordering are all by name. Cloning is an `Rc` bump, not a
/// string copy, so terminals can be passed around freely once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(Rc<str>);

impl Terminal {
    /// Creates a new terminal with the given display name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The distinguished end-of-input terminal, written `$`.
    pub fn end_of_input() -> Self {
        Self::new(END_OF_INPUT)
    }

    /// True iff this is the end-of-input terminal.
    pub fn is_end_of_input(&self) -> bool {
        &*self.0 == END_OF_INPUT
    }

    /// The terminal's display name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A nonterminal symbol, interned by name.
///
/// Equality, hashing and ordering are all by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(Rc<str>);

impl NonTerminal {
    /// Creates a new nonterminal with the given display name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The nonterminal's display name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns a fresh nonterminal whose name is this one with a prime appended.
    ///
    /// Used to disambiguate the augmented start symbol `S'` when the grammar already
    /// defines a nonterminal with that name.
    pub(crate) fn primed(&self) -> Self {
        Self::new(format!("{}'", self.0))
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grammar symbol: either a terminal or a nonterminal.
///
/// Epsilon is deliberately not a variant here — see [`crate::first_follow::FirstSetMember`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    /// True iff this symbol is a terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// True iff this symbol is a nonterminal.
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// Returns the terminal inside this symbol, if it is one.
    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::NonTerminal(_) => None,
        }
    }

    /// Returns the nonterminal inside this symbol, if it is one.
    pub fn as_nonterminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::NonTerminal(n) => Some(n),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Self {
        Symbol::NonTerminal(n)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(n) => write!(f, "{}", n),
        }
    }
}

/// Convenience batch constructor: builds one [`Terminal`] per name.
pub fn terminals<I, S>(names: I) -> Vec<Terminal>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(Terminal::new).collect()
}

/// Convenience batch constructor: builds one [`NonTerminal`] per name.
pub fn nonterminals<I, S>(names: I) -> Vec<NonTerminal>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(NonTerminal::new).collect()
}

/// Renders a sequence of symbols as a space-separated string, e.g. `"Expr + Term"`.
///
/// An empty sequence renders as `ε`, matching production `Display` conventions.
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    if symbols.is_empty() {
        return "ε".to_string();
    }
    symbols
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
