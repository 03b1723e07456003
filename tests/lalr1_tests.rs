//! Integration tests for LALR(1) table construction via core-merge.

use cfg_tables::grammar::Grammar;
use cfg_tables::lalr1::{construct_canonical_set, construct_parsing_table};
use cfg_tables::lr1;
use cfg_tables::symbol::{NonTerminal, Symbol, Terminal};

fn nt(name: &str) -> NonTerminal {
    NonTerminal::new(name)
}

fn t(name: &str) -> Symbol {
    Symbol::from(Terminal::new(name))
}

fn n(name: &str) -> Symbol {
    Symbol::from(NonTerminal::new(name))
}

fn expr_grammar() -> Grammar {
    let mut g = Grammar::new(nt("S"));
    g.add_production(nt("S"), vec![n("S"), t("+"), n("T")]);
    g.add_production(nt("S"), vec![n("T")]);
    g.add_production(nt("T"), vec![n("T"), t("*"), n("F")]);
    g.add_production(nt("T"), vec![n("F")]);
    g.add_production(nt("F"), vec![t("("), n("S"), t(")")]);
    g.add_production(nt("F"), vec![t("i")]);
    g
}

fn lr1_not_lalr1_witness() -> Grammar {
    // S -> a A d | b B d | a B e | b A e ; A -> c ; B -> c
    let mut g = Grammar::new(nt("S"));
    g.add_production(nt("S"), vec![t("a"), n("A"), t("d")]);
    g.add_production(nt("S"), vec![t("b"), n("B"), t("d")]);
    g.add_production(nt("S"), vec![t("a"), n("B"), t("e")]);
    g.add_production(nt("S"), vec![t("b"), n("A"), t("e")]);
    g.add_production(nt("A"), vec![t("c")]);
    g.add_production(nt("B"), vec![t("c")]);
    g
}

#[test]
fn expr_grammar_is_both_lr1_and_lalr1() {
    let g = expr_grammar();
    assert!(lr1::construct_parsing_table(&g).is_ok());
    assert!(construct_parsing_table(&g).is_ok());
}

#[test]
fn core_merge_reduces_or_preserves_state_count() {
    let g = expr_grammar();
    let lr1_states = lr1::construct_canonical_set(&g).unwrap().states.len();
    let lalr_states = construct_canonical_set(&g).unwrap().states.len();
    assert!(lalr_states <= lr1_states);
}

#[test]
fn witness_grammar_is_lr1_but_not_lalr1() {
    let g = lr1_not_lalr1_witness();
    assert!(lr1::construct_parsing_table(&g).is_ok(), "grammar is LR(1)");
    assert!(construct_parsing_table(&g).is_err(), "merge should introduce a reduce/reduce conflict");
}

#[test]
fn empty_grammar_is_rejected() {
    let g = Grammar::new(nt("S"));
    assert!(construct_canonical_set(&g).is_err());
}
