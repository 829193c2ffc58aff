//! Provide the shared stylesheet vocabulary for the stylelens scanner, parser and tooling.
//!
//! This crate is intentionally small and dependency-free. It answers two questions that every other layer asks:
//! - *which grammar are we in?* ([`lang::dialect`]), and
//! - *what is this at-keyword?* ([`lang::at_rules`]).
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no syntax tree types, no mutable global state.
//! - The only process-wide data is the at-rule lookup index, built lazily once and never mutated afterwards.
//!
//! ## Examples
//! ```rust
//! use stylelens_core::lang::at_rules::{self, AtRuleId};
//! use stylelens_core::lang::dialect::Dialect;
//!
//! assert_eq!(at_rules::from_str("@-webkit-keyframes"), Some(AtRuleId::Keyframes));
//! assert!(at_rules::is_available(AtRuleId::Mixin, Dialect::Scss));
//! assert!(!at_rules::is_available(AtRuleId::Mixin, Dialect::Css));
//! ```

pub mod lang;
