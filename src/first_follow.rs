//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! This module implements the fixed-point algorithms from Aho et al., "Compilers:
//! Principles, Techniques, and Tools" (2nd Edition), section 4.4.

use std::collections::{HashMap, HashSet};

use crate::grammar::Grammar;
use crate::symbol::{NonTerminal, Symbol, Terminal};

/// A member of a FIRST set: either a terminal, or the epsilon sentinel.
///
/// Epsilon is never a [`Symbol`] (see the symbol module's design note); it exists only
/// as a member of a FIRST set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstSetMember {
    Epsilon,
    Terminal(Terminal),
}

impl FirstSetMember {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, FirstSetMember::Epsilon)
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            FirstSetMember::Terminal(t) => Some(t),
            FirstSetMember::Epsilon => None,
        }
    }
}

/// FIRST(X) for every nonterminal X, keyed by nonterminal.
pub type FirstSets = HashMap<NonTerminal, HashSet<FirstSetMember>>;

/// FOLLOW(A) for every nonterminal A, keyed by nonterminal. Never contains epsilon.
pub type FollowSets = HashMap<NonTerminal, HashSet<Terminal>>;

/// The FIRST set of a single symbol or sequence, as returned by [`first`].
pub type FirstSet = HashSet<FirstSetMember>;

/// The FOLLOW set of a single nonterminal, as returned by [`follow`].
pub type FollowSet = HashSet<Terminal>;

/// Either a single symbol or a sequence of symbols — what [`first`] accepts.
pub enum FirstQuery<'a> {
    Symbol(&'a Symbol),
    Sequence(&'a [Symbol]),
}

impl<'a> From<&'a Symbol> for FirstQuery<'a> {
    fn from(symbol: &'a Symbol) -> Self {
        FirstQuery::Symbol(symbol)
    }
}

impl<'a> From<&'a [Symbol]> for FirstQuery<'a> {
    fn from(symbols: &'a [Symbol]) -> Self {
        FirstQuery::Sequence(symbols)
    }
}

impl<'a> From<&'a Vec<Symbol>> for FirstQuery<'a> {
    fn from(symbols: &'a Vec<Symbol>) -> Self {
        FirstQuery::Sequence(symbols)
    }
}

/// FIRST of a symbol or a sequence of symbols, computed from scratch against `grammar`.
///
/// This is the entry point a caller reaches for first: it runs the FIRST fixed point
/// over the whole grammar and then answers the one query. A caller asking FIRST of
/// many symbols or sequences against the same grammar should call
/// [`compute_first_sets`] once and drive [`first_of_symbol`]/[`first_of_sequence`]
/// directly instead of re-running the fixed point per query.
pub fn first<'a>(query: impl Into<FirstQuery<'a>>, grammar: &Grammar) -> FirstSet {
    let first_sets = compute_first_sets(grammar);
    match query.into() {
        FirstQuery::Symbol(symbol) => first_of_symbol(symbol, &first_sets),
        FirstQuery::Sequence(symbols) => first_of_sequence(&first_sets, symbols),
    }
}

/// Computes FIRST(X) for every nonterminal X in the grammar, to a fixed point.
///
/// Each sweep visits productions in insertion order; the sweep compares FIRST-set
/// *sizes* before and after to detect convergence, rather than comparing sets for deep
/// equality (growth is strictly monotone, so a size check is sufficient and cheap).
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets: FirstSets = grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), HashSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;

        for (_, production) in grammar.productions() {
            let before = first_sets.get(&production.lhs).map(HashSet::len).unwrap_or(0);
            let rhs_first = first_of_sequence(&first_sets, &production.rhs);

            let entry = first_sets.entry(production.lhs.clone()).or_default();
            entry.extend(rhs_first);

            if entry.len() != before {
                changed = true;
            }
        }
    }

    first_sets
}

/// FIRST of a single symbol.
///
/// For a terminal this is always `{t}`. For a nonterminal, looks up the (already
/// computed, or in-progress) fixed point in `first_sets`; a nonterminal with no entry
/// degrades to the empty set and is logged, since it can only mean the nonterminal is
/// undefined (see [`Grammar::validate`](crate::grammar::Grammar::validate)).
pub fn first_of_symbol(symbol: &Symbol, first_sets: &FirstSets) -> HashSet<FirstSetMember> {
    match symbol {
        Symbol::Terminal(t) => HashSet::from([FirstSetMember::Terminal(t.clone())]),
        Symbol::NonTerminal(n) => match first_sets.get(n) {
            Some(set) => set.clone(),
            None => {
                log::warn!("FIRST({n}) requested but {n} has no productions; treating as empty");
                HashSet::new()
            }
        },
    }
}

/// FIRST of a sequence of symbols `Y1 … Yk`.
///
/// - For i = 1..k, unions `FIRST(Yi) \ {ε}` into the result; stops as soon as some `Yi`
///   does not contain ε.
/// - If every `Yi` contains ε (including the empty sequence, k = 0), adds ε.
pub fn first_of_sequence(first_sets: &FirstSets, symbols: &[Symbol]) -> HashSet<FirstSetMember> {
    let mut result = HashSet::new();
    let mut all_nullable_so_far = true;

    for symbol in symbols {
        if !all_nullable_so_far {
            break;
        }

        let symbol_first = first_of_symbol(symbol, first_sets);
        result.extend(
            symbol_first
                .iter()
                .filter(|m| !m.is_epsilon())
                .cloned(),
        );
        all_nullable_so_far = symbol_first.contains(&FirstSetMember::Epsilon);
    }

    if all_nullable_so_far {
        result.insert(FirstSetMember::Epsilon);
    }

    result
}

/// FIRST(β a), where `a` is a terminal appended as the lookahead "tail" of the sequence
/// `beta`. Used by LR(1) closure to propagate lookaheads through `[A -> α·Bβ, a]`.
///
/// Always a set of terminals only — the tail `a` is itself a terminal, so ε can appear
/// in the intermediate computation but is always resolved away by the tail before this
/// function returns.
pub fn first_of_sequence_with_tail(
    first_sets: &FirstSets,
    beta: &[Symbol],
    tail: &Terminal,
) -> HashSet<Terminal> {
    let beta_first = first_of_sequence(first_sets, beta);
    let mut result: HashSet<Terminal> = beta_first
        .iter()
        .filter_map(FirstSetMember::as_terminal)
        .cloned()
        .collect();

    if beta_first.contains(&FirstSetMember::Epsilon) {
        result.insert(tail.clone());
    }

    result
}

/// True iff `nt` is nullable, i.e. ε ∈ FIRST(nt).
pub fn nullable(nt: &NonTerminal, first_sets: &FirstSets) -> bool {
    first_sets
        .get(nt)
        .map(|set| set.contains(&FirstSetMember::Epsilon))
        .unwrap_or(false)
}

/// Computes FOLLOW(A) for every nonterminal A in the grammar, to a fixed point.
///
/// FOLLOW(start) is seeded with `$`. For every production `B -> α A β`:
/// - FIRST(β) \ {ε} is added to FOLLOW(A).
/// - If ε ∈ FIRST(β) (including β empty), FOLLOW(B) is added to FOLLOW(A).
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), HashSet::new()))
        .collect();

    follow_sets
        .entry(grammar.start().clone())
        .or_default()
        .insert(Terminal::end_of_input());

    let mut changed = true;
    while changed {
        changed = false;

        for (_, production) in grammar.productions() {
            let rhs = &production.rhs;

            for (i, symbol) in rhs.iter().enumerate() {
                let Symbol::NonTerminal(a) = symbol else {
                    continue;
                };

                let before = follow_sets.get(a).map(HashSet::len).unwrap_or(0);
                let beta = &rhs[i + 1..];
                let beta_first = first_of_sequence(first_sets, beta);

                let mut to_add: HashSet<Terminal> = beta_first
                    .iter()
                    .filter_map(FirstSetMember::as_terminal)
                    .cloned()
                    .collect();

                if beta_first.contains(&FirstSetMember::Epsilon) {
                    if let Some(follow_lhs) = follow_sets.get(&production.lhs) {
                        to_add.extend(follow_lhs.iter().cloned());
                    }
                }

                let entry = follow_sets.entry(a.clone()).or_default();
                entry.extend(to_add);

                if entry.len() != before {
                    changed = true;
                }
            }
        }
    }

    follow_sets
}

/// FOLLOW(nt) for `grammar`, given its already-computed FIRST sets.
///
/// Runs the FOLLOW fixed point over the whole grammar and returns just the set for
/// `nt`; a nonterminal the grammar never defines has an empty FOLLOW set. A caller
/// asking FOLLOW of many nonterminals against the same grammar should call
/// [`compute_follow_sets`] once and index into the result directly instead of
/// recomputing the fixed point per query.
pub fn follow(nt: &NonTerminal, grammar: &Grammar, first_sets: &FirstSets) -> FollowSet {
    compute_follow_sets(grammar, first_sets)
        .remove(nt)
        .unwrap_or_default()
}
