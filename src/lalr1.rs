//! LALR(1) table construction via core-merge of the canonical LR(1) collection.
//!
//! This is the "efficient-ish but simple" construction: build the full LR(1) canonical
//! collection, then merge any states that share the same *core* (the set of
//! `(production, dot)` pairs, ignoring lookaheads) into one state, unioning their
//! lookaheads. This costs the same state-count blowup as full LR(1) during
//! construction — the direct Knuth/DeRemer kernel algorithm avoids that — but produces
//! an identical table to it, and is far simpler to get right.

use std::collections::HashMap;

use crate::error::Result;
use crate::grammar::ProductionId;
use crate::lr1::{self, CanonicalCollection, ItemSet, ParsingTable};
use crate::Grammar;

/// An item's core: its production and dot position, with the lookahead erased.
type Core = Vec<(ProductionId, usize)>;

fn core_of(items: &ItemSet) -> Core {
    items.iter().map(|item| (item.production, item.dot)).collect()
}

/// Merges states of an LR(1) canonical collection that share a core, unioning their
/// lookaheads, and remaps transitions onto the merged state indices.
///
/// Returns a new [`CanonicalCollection`] with (generally) fewer, lookahead-merged
/// states. The augmented grammar is carried through unchanged.
pub fn merge_by_core(collection: &CanonicalCollection) -> CanonicalCollection {
    let mut core_to_merged: HashMap<Core, usize> = HashMap::new();
    let mut merged_states: Vec<ItemSet> = Vec::new();
    let mut old_to_merged: Vec<usize> = Vec::with_capacity(collection.states.len());

    for state in &collection.states {
        let core = core_of(state);
        if let Some(&merged_idx) = core_to_merged.get(&core) {
            merged_states[merged_idx].extend(state.iter().cloned());
            old_to_merged.push(merged_idx);
        } else {
            let merged_idx = merged_states.len();
            core_to_merged.insert(core, merged_idx);
            merged_states.push(state.clone());
            old_to_merged.push(merged_idx);
        }
    }

    let mut transitions = HashMap::new();
    for (&(from, ref symbol), &to) in &collection.transitions {
        transitions.insert((old_to_merged[from], symbol.clone()), old_to_merged[to]);
    }

    CanonicalCollection {
        augmented: collection.augmented.clone(),
        states: merged_states,
        transitions,
    }
}

/// Builds the LALR(1) canonical collection for `grammar`: the LR(1) canonical
/// collection with same-core states merged.
///
/// A grammar that is LR(1) but not LALR(1) will still produce a collection here; any
/// reduce/reduce conflict the merge introduces only surfaces once the ACTION table is
/// built (see [`construct_parsing_table`]), matching how the merge genuinely can turn
/// a conflict-free LR(1) table into a conflicted LALR(1) one.
pub fn construct_canonical_set(grammar: &Grammar) -> Result<CanonicalCollection> {
    let lr1_collection = lr1::construct_canonical_set(grammar)?;
    Ok(merge_by_core(&lr1_collection))
}

/// Builds the LALR(1) ACTION/GOTO table for `grammar`, failing fast on the first
/// shift/reduce or reduce/reduce conflict — including ones introduced by the
/// core-merge itself.
pub fn construct_parsing_table(grammar: &Grammar) -> Result<ParsingTable> {
    let collection = construct_canonical_set(grammar)?;
    build_table_strict(&collection)
}

/// Builds the LALR(1) ACTION/GOTO table for `grammar`, collecting every conflict
/// instead of stopping at the first one.
pub fn construct_parsing_table_permissive(
    grammar: &Grammar,
) -> Result<(ParsingTable, Vec<crate::error::GrammarError>)> {
    let collection = construct_canonical_set(grammar)?;
    build_table_permissive(&collection)
}

fn build_table_strict(collection: &CanonicalCollection) -> Result<ParsingTable> {
    lr1::build_table_from_collection(collection, true).map(|(table, _)| table)
}

fn build_table_permissive(
    collection: &CanonicalCollection,
) -> Result<(ParsingTable, Vec<crate::error::GrammarError>)> {
    lr1::build_table_from_collection(collection, false)
}
