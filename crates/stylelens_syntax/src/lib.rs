//! Shared syntax frontend for CSS, SCSS and Less: scanner, parser, syntax tree, diagnostics.
//!
//! This crate is dependency-light and intended for reuse by the analysis facade, the CLI and the language server.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names. Scopes and symbols are built on top of the tree by the
//!   `stylelens` crate.
//! - Parsing never fails. Every problem is recorded as an [`diagnostics::Issue`] attached to a node of the tree.
//! - Dialect identity and the at-rule vocabulary come from `stylelens_core::lang`.
//!
//! ## Examples
//! ```rust
//! use stylelens_core::lang::dialect::Dialect;
//! use stylelens_syntax::ast::NodeKind;
//! use stylelens_syntax::parser;
//!
//! let tree = parser::parse(".a { color: red; }", Dialect::Css);
//! assert!(tree.issues().is_empty());
//! let rule = tree.root().children().next().unwrap();
//! assert_eq!(rule.kind(), NodeKind::RuleSet);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
pub mod tree;
