//! LR(1) item sets, closure, GOTO, canonical-set construction, and ACTION/GOTO tables.
//!
//! This module implements the bottom-up LR(1) automaton: dotted items carrying a
//! single lookahead terminal, closure under lookahead propagation, GOTO as an
//! item-set transition, worklist construction of the canonical collection, and
//! translation of that collection into a shift/reduce/accept ACTION table plus a
//! GOTO table, with conflict detection.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

use crate::error::{GrammarError, Result};
use crate::first_follow::{compute_first_sets, first_of_sequence_with_tail, FirstSets};
use crate::grammar::{Grammar, Production, ProductionId};
use crate::symbol::{NonTerminal, Symbol, Terminal};

/// A dotted LR(1) item: `[production, dot position, lookahead]`.
///
/// The derived `Ord` (by production id, then dot, then lookahead name) is what lets an
/// item *set* be represented as a `BTreeSet` — giving structural equality and hashing
/// for free, per the State identity design note.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LR1Item {
    pub production: ProductionId,
    pub dot: usize,
    pub lookahead: Terminal,
}

impl LR1Item {
    /// The symbol immediately after the dot, if any.
    pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar.production(self.production).rhs.get(self.dot)
    }

    /// True iff the dot is at the end of the production (a reduce item).
    pub fn is_reduce(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.production).rhs.len()
    }

    fn advanced(&self) -> Self {
        Self {
            production: self.production,
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        }
    }

    /// Renders as `A -> alpha . beta, a`.
    pub fn display(&self, grammar: &Grammar) -> String {
        let production = grammar.production(self.production);
        let before: Vec<String> = production.rhs[..self.dot].iter().map(Symbol::to_string).collect();
        let after: Vec<String> = production.rhs[self.dot..].iter().map(Symbol::to_string).collect();
        let body = match (before.is_empty(), after.is_empty()) {
            (true, true) => ".".to_string(),
            (true, false) => format!(". {}", after.join(" ")),
            (false, true) => format!("{} .", before.join(" ")),
            (false, false) => format!("{} . {}", before.join(" "), after.join(" ")),
        };
        format!("{} -> {}, {}", production.lhs, body, self.lookahead)
    }
}

/// A closed set of LR(1) items; a state of the canonical collection.
pub type ItemSet = BTreeSet<LR1Item>;

/// Computes the closure of `items`: the least set containing `items` and closed under
/// lookahead-propagating prediction.
///
/// For every item `[A -> alpha . B beta, a]` and every production `B -> gamma`, adds
/// `[B -> . gamma, b]` for every `b` in FIRST(beta a).
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: ItemSet) -> ItemSet {
    let mut set = items;
    loop {
        let mut added = Vec::new();

        for item in &set {
            let Some(Symbol::NonTerminal(b)) = item.next_symbol(grammar) else {
                continue;
            };

            let rhs = &grammar.production(item.production).rhs;
            let beta = &rhs[item.dot + 1..];
            let lookaheads = first_of_sequence_with_tail(first_sets, beta, &item.lookahead);

            for (production_id, _) in grammar.productions_for(b) {
                for lookahead in &lookaheads {
                    let new_item = LR1Item {
                        production: production_id,
                        dot: 0,
                        lookahead: lookahead.clone(),
                    };
                    if !set.contains(&new_item) {
                        added.push(new_item);
                    }
                }
            }
        }

        if added.is_empty() {
            return set;
        }
        set.extend(added);
    }
}

/// GOTO(I, X): the closure of every item in `I` with the dot advanced past `X`.
///
/// Empty if no item in `I` has `X` immediately after the dot.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, x: &Symbol) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(x))
        .map(LR1Item::advanced)
        .collect();

    closure(grammar, first_sets, moved)
}

/// The canonical collection of LR(1) item sets for a grammar, plus the transitions
/// between them.
///
/// Carries the *augmented* grammar (`S' -> start` prepended) that the states and
/// transitions were built from, since table construction and production lookups both
/// need it.
#[derive(Debug, Clone)]
pub struct CanonicalCollection {
    pub augmented: Grammar,
    pub states: Vec<ItemSet>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

impl CanonicalCollection {
    /// The state index reached from `state` on `symbol`, if any.
    pub fn transition(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions.get(&(state, symbol.clone())).copied()
    }
}

/// Builds the canonical collection of LR(1) item sets for `grammar`.
///
/// State 0 is always `closure({ [S' -> . S, $] })`. States are discovered and
/// numbered by a worklist traversal that visits, for every state, all terminals used
/// by the grammar (in first-occurrence order) followed by all nonterminals (likewise)
/// — any fixed deterministic order would do, per the canonical-set design note, but
/// this one matches the order `Grammar` already tracks.
pub fn construct_canonical_set(grammar: &Grammar) -> Result<CanonicalCollection> {
    grammar.ensure_non_empty()?;

    let augmented = grammar.augmented();
    let first_sets = compute_first_sets(&augmented);

    let start_item = LR1Item {
        production: ProductionId(0),
        dot: 0,
        lookahead: Terminal::end_of_input(),
    };
    let start_state = closure(&augmented, &first_sets, ItemSet::from([start_item]));

    let mut states = vec![start_state.clone()];
    let mut index_of: HashMap<ItemSet, usize> = HashMap::from([(start_state, 0)]);
    let mut transitions = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::from([0]);

    let symbols: Vec<Symbol> = augmented
        .terminals()
        .iter()
        .cloned()
        .map(Symbol::from)
        .chain(augmented.nonterminals().iter().cloned().map(Symbol::from))
        .collect();

    while let Some(state_idx) = worklist.pop_front() {
        let state = states[state_idx].clone();

        for symbol in &symbols {
            let next = goto(&augmented, &first_sets, &state, symbol);
            if next.is_empty() {
                continue;
            }

            let next_idx = if let Some(&idx) = index_of.get(&next) {
                idx
            } else {
                let idx = states.len();
                index_of.insert(next.clone(), idx);
                states.push(next);
                worklist.push_back(idx);
                idx
            };

            transitions.insert((state_idx, symbol.clone()), next_idx);
        }
    }

    Ok(CanonicalCollection { augmented, states, transitions })
}

/// An LR(1)/LALR(1) ACTION-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(ProductionId),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "shift {s}"),
            Action::Reduce(p) => write!(f, "reduce {p}"),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// The assembled ACTION/GOTO parsing table for a canonical collection.
#[derive(Debug, Clone)]
pub struct ParsingTable {
    pub states: Vec<ItemSet>,
    pub action: HashMap<(usize, Terminal), Action>,
    pub goto: HashMap<(usize, NonTerminal), usize>,
    /// The augmented grammar's productions, in order (index 0 is `S' -> start`).
    pub productions: Vec<Production>,
}

fn describe_action(action: &Action, grammar: &Grammar) -> String {
    match action {
        Action::Shift(s) => format!("shift {s}"),
        Action::Reduce(p) => format!("reduce {}", grammar.production(*p)),
        Action::Accept => "accept".to_string(),
    }
}

fn conflict_error(
    state: usize,
    terminal: &Terminal,
    existing: &Action,
    incoming: &Action,
    grammar: &Grammar,
) -> GrammarError {
    match (existing, incoming) {
        (Action::Shift(s), Action::Reduce(p)) | (Action::Reduce(p), Action::Shift(s)) => {
            GrammarError::LRShiftReduceConflict {
                state,
                terminal: terminal.clone(),
                shift_to: *s,
                reduce: grammar.production(*p).to_string(),
            }
        }
        (Action::Reduce(p1), Action::Reduce(p2)) => GrammarError::LRReduceReduceConflict {
            state,
            terminal: terminal.clone(),
            first: grammar.production(*p1).to_string(),
            second: grammar.production(*p2).to_string(),
        },
        _ => GrammarError::LRReduceReduceConflict {
            state,
            terminal: terminal.clone(),
            first: describe_action(existing, grammar),
            second: describe_action(incoming, grammar),
        },
    }
}

/// Assigns `action` to cell `(state, terminal)`, detecting conflicts.
///
/// Re-assigning the identical action is idempotent (several items in the same state
/// can independently justify the same shift). In strict mode a genuine conflict is
/// returned immediately and the existing entry is left untouched; in permissive mode
/// it is recorded and the first-written entry wins.
fn set_action(
    table: &mut HashMap<(usize, Terminal), Action>,
    conflicts: &mut Vec<GrammarError>,
    strict: bool,
    grammar: &Grammar,
    state: usize,
    terminal: Terminal,
    action: Action,
) -> Result<()> {
    match table.get(&(state, terminal.clone())) {
        None => {
            table.insert((state, terminal), action);
        }
        Some(existing) if *existing == action => {}
        Some(existing) => {
            let conflict = conflict_error(state, &terminal, existing, &action, grammar);
            if strict {
                return Err(conflict);
            }
            conflicts.push(conflict);
        }
    }
    Ok(())
}

/// Builds an ACTION/GOTO table from an already-constructed canonical collection.
///
/// Shared by the LR(1) and LALR(1) public entry points: LALR(1) calls this over its
/// core-merged collection instead of duplicating conflict-detection logic.
pub(crate) fn build_table_from_collection(
    collection: &CanonicalCollection,
    strict: bool,
) -> Result<(ParsingTable, Vec<GrammarError>)> {
    let grammar = &collection.augmented;
    let start = grammar.start();

    let mut action: HashMap<(usize, Terminal), Action> = HashMap::new();
    let mut goto: HashMap<(usize, NonTerminal), usize> = HashMap::new();
    let mut conflicts = Vec::new();

    for (state_idx, items) in collection.states.iter().enumerate() {
        for item in items {
            if item.is_reduce(grammar) {
                let production = grammar.production(item.production);
                let action_entry = if production.lhs == *start {
                    Action::Accept
                } else {
                    Action::Reduce(item.production)
                };
                set_action(
                    &mut action,
                    &mut conflicts,
                    strict,
                    grammar,
                    state_idx,
                    item.lookahead.clone(),
                    action_entry,
                )?;
            } else if let Some(Symbol::Terminal(t)) = item.next_symbol(grammar) {
                if let Some(dest) = collection.transition(state_idx, &Symbol::Terminal(t.clone())) {
                    set_action(
                        &mut action,
                        &mut conflicts,
                        strict,
                        grammar,
                        state_idx,
                        t.clone(),
                        Action::Shift(dest),
                    )?;
                }
            }
        }

        for nonterminal in grammar.nonterminals() {
            if let Some(dest) =
                collection.transition(state_idx, &Symbol::NonTerminal(nonterminal.clone()))
            {
                goto.insert((state_idx, nonterminal.clone()), dest);
            }
        }
    }

    let productions = grammar.productions().map(|(_, p)| p.clone()).collect();

    Ok((
        ParsingTable { states: collection.states.clone(), action, goto, productions },
        conflicts,
    ))
}

/// Builds the LR(1) ACTION/GOTO table for `grammar`, failing fast on the first
/// shift/reduce or reduce/reduce conflict encountered.
pub fn construct_parsing_table(grammar: &Grammar) -> Result<ParsingTable> {
    let collection = construct_canonical_set(grammar)?;
    build_table_from_collection(&collection, true).map(|(table, _)| table)
}

/// Builds the LR(1) ACTION/GOTO table for `grammar`, collecting every conflict instead
/// of stopping at the first one. The returned table keeps the first-written entry for
/// every conflicted cell.
pub fn construct_parsing_table_permissive(
    grammar: &Grammar,
) -> Result<(ParsingTable, Vec<GrammarError>)> {
    let collection = construct_canonical_set(grammar)?;
    build_table_from_collection(&collection, false)
}
