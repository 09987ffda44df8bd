//! Chomsky hierarchy classification of rule lists, and a backtracking
//! derivation search over small single-letter context-free grammars.

pub mod classifier;
pub mod derivation;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod trace;
