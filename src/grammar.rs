//! Grammar module for context-free grammars.
//!
//! This module provides data structures for working with context-free grammars:
//! productions, the grammar container itself, and the augmented-grammar construction
//! the LR builders need.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;

use crate::error::{GrammarError, Result};
use crate::symbol::{symbols_to_string, NonTerminal, Symbol, Terminal};

/// The stable identity of a [`Production`] within a [`Grammar`]: its insertion index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductionId(pub usize);

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A production rule in a context-free grammar.
///
/// Represents a rule of the form: LHS → RHS, where LHS is a single nonterminal and
/// RHS is a (possibly empty) sequence of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    /// Left-hand side.
    pub lhs: NonTerminal,
    /// Right-hand side.
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: NonTerminal, rhs: Vec<Symbol>) -> Self {
        Self { lhs, rhs }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, symbols_to_string(&self.rhs))
    }
}

/// A context-free grammar.
///
/// Productions are mutated only via [`Grammar::add_production`] during construction;
/// every analysis in this crate borrows the grammar read-only.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<Production>,
    by_lhs: HashMap<NonTerminal, Vec<ProductionId>>,
    /// Terminals in first-occurrence order, for deterministic GOTO-symbol iteration.
    terminal_order: Vec<Terminal>,
    seen_terminals: HashSet<Terminal>,
    /// Nonterminals in first-occurrence order.
    nonterminal_order: Vec<NonTerminal>,
    seen_nonterminals: HashSet<NonTerminal>,
}

impl Grammar {
    /// Creates an empty grammar with the given start symbol.
    pub fn new(start: NonTerminal) -> Self {
        let mut grammar = Self {
            start: start.clone(),
            productions: Vec::new(),
            by_lhs: HashMap::new(),
            terminal_order: Vec::new(),
            seen_terminals: HashSet::new(),
            nonterminal_order: Vec::new(),
            seen_nonterminals: HashSet::new(),
        };
        grammar.record_nonterminal(&start);
        grammar
    }

    /// Appends a production if an identical one is not already present.
    ///
    /// Returns the id of the production (whether freshly inserted or pre-existing).
    pub fn add_production(&mut self, lhs: NonTerminal, rhs: Vec<Symbol>) -> ProductionId {
        if let Some(existing) = self
            .productions_for(&lhs)
            .find(|(_, p)| p.rhs == rhs)
        {
            return existing.0;
        }

        self.record_nonterminal(&lhs);
        for symbol in &rhs {
            match symbol {
                Symbol::Terminal(t) => self.record_terminal(t),
                Symbol::NonTerminal(n) => self.record_nonterminal(n),
            }
        }

        let id = ProductionId(self.productions.len());
        self.productions.push(Production::new(lhs.clone(), rhs));
        self.by_lhs.entry(lhs).or_default().push(id);
        id
    }

    fn record_terminal(&mut self, t: &Terminal) {
        if self.seen_terminals.insert(t.clone()) {
            self.terminal_order.push(t.clone());
        }
    }

    fn record_nonterminal(&mut self, n: &NonTerminal) {
        if self.seen_nonterminals.insert(n.clone()) {
            self.nonterminal_order.push(n.clone());
        }
    }

    /// The start symbol.
    pub fn start(&self) -> &NonTerminal {
        &self.start
    }

    /// A production by id.
    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.0]
    }

    /// All productions, in insertion order.
    pub fn productions(&self) -> impl Iterator<Item = (ProductionId, &Production)> {
        self.productions
            .iter()
            .enumerate()
            .map(|(i, p)| (ProductionId(i), p))
    }

    /// The productions whose lhs is `nt`, in insertion order.
    pub fn productions_for<'g>(
        &'g self,
        nt: &NonTerminal,
    ) -> impl Iterator<Item = (ProductionId, &'g Production)> {
        self.by_lhs
            .get(nt)
            .into_iter()
            .flatten()
            .map(move |id| (*id, &self.productions[id.0]))
    }

    /// True iff `nt` is known to the grammar, either as a lhs or somewhere on a rhs.
    pub fn has_nonterminal(&self, nt: &NonTerminal) -> bool {
        self.seen_nonterminals.contains(nt)
    }

    /// All terminals referenced by the grammar, in first-occurrence order.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminal_order
    }

    /// All nonterminals referenced by the grammar, in first-occurrence order.
    pub fn nonterminals(&self) -> &[NonTerminal] {
        &self.nonterminal_order
    }

    /// True iff the grammar has no productions, or its start symbol has none.
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty() || self.productions_for(&self.start).next().is_none()
    }

    /// Fails fast if the grammar is unusable for any analysis.
    pub(crate) fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }
        Ok(())
    }

    /// Strictly validates that every nonterminal referenced on some rhs is also the lhs
    /// of at least one production.
    ///
    /// This is the opt-in, fatal counterpart to the lazy "degrade to empty set and log
    /// a warning" handling the FIRST/FOLLOW/closure engines use internally.
    pub fn validate(&self) -> Result<()> {
        for production in &self.productions {
            for symbol in &production.rhs {
                if let Symbol::NonTerminal(n) = symbol {
                    if !self.by_lhs.contains_key(n) {
                        return Err(GrammarError::UndefinedNonTerminal(n.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns a new grammar with a fresh augmented start production `S' -> start`
    /// prepended. `S'` is disambiguated (by appending primes) if it collides with an
    /// existing nonterminal.
    pub fn augmented(&self) -> Grammar {
        let mut augmented_start = NonTerminal::new("S'");
        while self.has_nonterminal(&augmented_start) {
            log::warn!(
                "augmented start symbol {augmented_start} collides with an existing nonterminal; disambiguating"
            );
            augmented_start = augmented_start.primed();
        }

        let mut grammar = Grammar::new(augmented_start.clone());
        grammar.add_production(augmented_start, vec![Symbol::from(self.start.clone())]);
        for (_, production) in self.productions() {
            grammar.add_production(production.lhs.clone(), production.rhs.clone());
        }
        grammar
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}
