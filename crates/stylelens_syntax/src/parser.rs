//! Error-tolerant parser for CSS, SCSS and Less.
//!
//! Converts source text into a [`SyntaxTree`]. The parser drives the [`Scanner`] directly, one token of lookahead
//! plus bounded backtracking through [`Mark`]s.
//!
//! ## Examples
//!
//! ```rust
//! use stylelens_core::lang::dialect::Dialect;
//! use stylelens_syntax::parser;
//!
//! let tree = parser::parse("$x: 1; .a { width: $x }", Dialect::Scss);
//! assert!(tree.issues().is_empty());
//! assert_eq!(tree.root().child_count(), 2);
//! ```

use stylelens_core::lang::at_rules::{self, AtRuleId};
use stylelens_core::lang::dialect::{Dialect, DialectCaps};

use crate::ast::{Node, NodeKind, Span};
use crate::diagnostics::{Issue, IssueCode};
use crate::lexer::{Scanner, ScannerMark, Token, TokenKind};
use crate::tree::SyntaxTree;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stylesheet.rs");
include!("parser/selectors.rs");
include!("parser/at_rules.rs");
include!("parser/expr.rs");
include!("parser/scss.rs");
include!("parser/less.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
