//! LL(1) parsing table construction.
//!
//! This module builds the top-down predictive-parsing table M[nonterminal, terminal]
//! from a grammar's FIRST and FOLLOW sets. It only builds the table; a cell holding
//! more than one production is returned intact rather than treated as a hard error,
//! so the caller can inspect conflicts.

use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets, first_of_sequence, FirstSetMember};
use crate::grammar::{Grammar, ProductionId};
use crate::symbol::{NonTerminal, Terminal};

/// The LL(1) parsing table: M[nonterminal, terminal] -> productions.
///
/// A well-formed LL(1) grammar has at most one production per cell; [`LL1Table::conflicts`]
/// enumerates any cell that doesn't.
#[derive(Debug)]
pub struct LL1Table {
    cells: HashMap<(NonTerminal, Terminal), BTreeSet<ProductionId>>,
}

impl LL1Table {
    /// The productions (if any) at cell `M[nt, terminal]`.
    pub fn get(&self, nt: &NonTerminal, terminal: &Terminal) -> Option<&BTreeSet<ProductionId>> {
        self.cells.get(&(nt.clone(), terminal.clone()))
    }

    /// All populated cells.
    pub fn cells(&self) -> &HashMap<(NonTerminal, Terminal), BTreeSet<ProductionId>> {
        &self.cells
    }

    /// Cells that hold more than one production — i.e. the grammar is not LL(1) there.
    pub fn conflicts(
        &self,
    ) -> impl Iterator<Item = (&(NonTerminal, Terminal), &BTreeSet<ProductionId>)> {
        self.cells.iter().filter(|(_, prods)| prods.len() > 1)
    }

    /// True iff every cell holds at most one production.
    pub fn is_ll1(&self) -> bool {
        self.conflicts().next().is_none()
    }
}

/// Builds the LL(1) parsing table for `grammar`.
///
/// For each production `A -> alpha`:
/// - for each terminal `a` in FIRST(alpha), places `A -> alpha` at `M[A, a]`;
/// - if ε ∈ FIRST(alpha), places `A -> alpha` at `M[A, b]` for every `b` in FOLLOW(A).
///
/// Returns `Err(GrammarError::EmptyGrammar)` if the grammar has no usable productions;
/// otherwise always succeeds, even when the resulting table has conflicted cells.
pub fn construct_parsing_table(grammar: &Grammar) -> Result<LL1Table> {
    grammar.ensure_non_empty()?;

    let first_sets = compute_first_sets(grammar);
    let follow_sets = compute_follow_sets(grammar, &first_sets);

    let mut cells: HashMap<(NonTerminal, Terminal), BTreeSet<ProductionId>> = HashMap::new();

    for (id, production) in grammar.productions() {
        let lhs = &production.lhs;
        let first_alpha = first_of_sequence(&first_sets, &production.rhs);

        for member in &first_alpha {
            if let Some(terminal) = member.as_terminal() {
                let cell = cells.entry((lhs.clone(), terminal.clone())).or_default();
                if !cell.is_empty() && !cell.contains(&id) {
                    log::warn!("LL(1) conflict at M[{lhs}, {terminal}]");
                }
                cell.insert(id);
            }
        }

        if first_alpha.contains(&FirstSetMember::Epsilon) {
            if let Some(follow_lhs) = follow_sets.get(lhs) {
                for terminal in follow_lhs {
                    let cell = cells.entry((lhs.clone(), terminal.clone())).or_default();
                    if !cell.is_empty() && !cell.contains(&id) {
                        log::warn!("LL(1) conflict at M[{lhs}, {terminal}]");
                    }
                    cell.insert(id);
                }
            }
        }
    }

    Ok(LL1Table { cells })
}
