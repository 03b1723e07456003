//! Context-free grammar analysis: FIRST/FOLLOW sets, and LL(1), LR(1), and LALR(1)
//! parsing table construction.
//!
//! This crate builds parsing tables; it does not drive a parse itself. Given a
//! [`Grammar`], it computes FIRST/FOLLOW sets ([`first_follow`]), an LL(1) predictive
//! table ([`ll1`]), a canonical LR(1) automaton and ACTION/GOTO table ([`lr1`]), and
//! the corresponding LALR(1) table via core-merge ([`lalr1`]).

pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod lalr1;
pub mod ll1;
pub mod lr1;
pub mod symbol;

pub use error::{GrammarError, Result};
pub use grammar::{Grammar, Production, ProductionId};
pub use symbol::Symbol;
