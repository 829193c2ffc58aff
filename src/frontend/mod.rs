//! Stylesheet analysis frontend
//!
//! This module ties the syntax crates together:
//! - `ast`, `tree`, `parser`, `lexer`, `diagnostics`: re-exported from `stylelens_syntax`
//! - `symbols`: lexical scopes and symbol tables built from a syntax tree
//! - `analysis`: one-call parse + scope build
//! - `references`: the name under the cursor and its declaration

// Syntax components are provided by the shared stylelens_syntax crate.
pub use stylelens_syntax::{ast, diagnostics, lexer, parser, tree};

pub mod analysis;
pub mod references;
pub mod symbols;
