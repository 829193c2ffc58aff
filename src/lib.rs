#![forbid(unsafe_code)]
//! Stylelens: analysis core for CSS, SCSS and Less
//!
//! Turns raw, possibly broken stylesheet text into a navigable syntax tree, an ordered issue list and a tree of
//! lexical scopes. The scanner and parser live in `stylelens_syntax`; this crate adds the scope builder, the analysis
//! facade and two thin hosts (the `stylelens` CLI and the `stylelens-lsp` language server).
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `lsp` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.
//!
//! ## Examples
//! ```rust
//! use stylelens::{AnalysisConfig, analyze};
//! use stylelens_core::lang::dialect::Dialect;
//!
//! let analysis = analyze(".a { color: red", &AnalysisConfig::new(Dialect::Css));
//! assert_eq!(analysis.issues().len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod frontend;
pub mod lsp;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;
pub use frontend::symbols;
pub use frontend::tree;

pub use config::AnalysisConfig;
pub use frontend::analysis::{Analysis, analyze};
