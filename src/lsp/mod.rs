//! stylelens Language Server Protocol (LSP) implementation
//!
//! Provides IDE features:
//! - Real-time diagnostics (scanner and parser issues)
//! - Document symbols (variables, mixins, functions, imports, keyframes)
//! - Go-to-definition within the document

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod backend;
pub mod diagnostics;

pub use backend::StyleLanguageServer;
