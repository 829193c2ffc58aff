//! Stylesheet language vocabulary registries.
//!
//! Callers work with **stable IDs** (`AtRuleId`, `Dialect`) and look up spellings and metadata through registry
//! tables, instead of comparing lowercased strings all over the parser.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The scanner/parser enforce syntax; registries only provide spellings, availability and categories.

pub mod at_rules;
pub mod dialect;
pub mod registry;
