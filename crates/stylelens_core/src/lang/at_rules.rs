//! Define the at-rule vocabulary shared by all three dialects.
//!
//! This module is the single source of truth for at-keywords the parser gives dedicated productions to: a stable
//! identifier ([`AtRuleId`]) plus a const metadata table ([`AT_RULES`]) recording the canonical spelling, the dialects
//! that define the rule and a coarse category.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive**, accepts an optional leading `@`, and strips vendor prefixes
//!   (`@-webkit-keyframes` resolves to [`AtRuleId::Keyframes`]).
//! - Anything not in this table is an *unknown* at-rule; the parser still accepts it generically.
//! - The spelling index behind [`from_str`] is built lazily once and is immutable afterwards, so concurrent parses can
//!   share it freely.
//!
//! ## Examples
//! ```rust
//! use stylelens_core::lang::at_rules::{self, AtRuleCategory, AtRuleId};
//!
//! assert_eq!(at_rules::from_str("media"), Some(AtRuleId::Media));
//! assert_eq!(at_rules::from_str("@MEDIA"), Some(AtRuleId::Media));
//! assert_eq!(at_rules::as_str(AtRuleId::FontFace), "font-face");
//! assert_eq!(at_rules::category(AtRuleId::Each), AtRuleCategory::ControlFlow);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use super::dialect::Dialect;
use super::registry::{DialectSet, Stability};

/// Stable identifier for every at-rule with a dedicated production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtRuleId {
    // CSS
    Charset,
    Import,
    Namespace,
    Media,
    Supports,
    FontFace,
    Keyframes,
    Page,
    Layer,
    Property,
    Container,

    // SCSS modules
    Use,
    Forward,

    // SCSS definitions and references
    Mixin,
    Include,
    Content,
    Function,
    Return,
    Extend,
    AtRoot,

    // SCSS control flow
    If,
    Else,
    Each,
    For,
    While,

    // SCSS diagnostics
    Debug,
    Warn,
    Error,

    // Less
    Plugin,
}

/// Coarse grouping for tooling and for the parser's "needs a semicolon" decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtRuleCategory {
    /// Ends with `;` (`@import`, `@charset`, `@use`).
    Statement,
    /// Has a `{ ... }` body (`@media`, `@font-face`).
    Block,
    /// Declares a named, callable entity (`@mixin`, `@function`).
    Definition,
    /// Refers to something declared elsewhere (`@include`, `@extend`, `@content`).
    Reference,
    /// Branches or loops (`@if`, `@each`).
    ControlFlow,
    /// Emits a compile-time message (`@debug`, `@warn`, `@error`).
    Diagnostic,
}

/// Metadata for an at-rule.
#[derive(Debug, Clone, Copy)]
pub struct AtRuleInfo {
    pub id: AtRuleId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: AtRuleCategory,
    pub dialects: DialectSet,
    pub stability: Stability,
}

/// Registry of all at-rules with dedicated productions.
pub const AT_RULES: &[AtRuleInfo] = &[
    // CSS (available everywhere)
    info(AtRuleId::Charset, "charset", AtRuleCategory::Statement, DialectSet::ALL),
    info(AtRuleId::Import, "import", AtRuleCategory::Statement, DialectSet::ALL),
    info(AtRuleId::Namespace, "namespace", AtRuleCategory::Statement, DialectSet::ALL),
    info(AtRuleId::Media, "media", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Supports, "supports", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::FontFace, "font-face", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Keyframes, "keyframes", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Page, "page", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Layer, "layer", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Property, "property", AtRuleCategory::Block, DialectSet::ALL),
    info(AtRuleId::Container, "container", AtRuleCategory::Block, DialectSet::ALL),
    // SCSS modules
    info(AtRuleId::Use, "use", AtRuleCategory::Statement, DialectSet::SCSS),
    info(AtRuleId::Forward, "forward", AtRuleCategory::Statement, DialectSet::SCSS),
    // SCSS definitions / references
    info(AtRuleId::Mixin, "mixin", AtRuleCategory::Definition, DialectSet::SCSS),
    info(AtRuleId::Include, "include", AtRuleCategory::Reference, DialectSet::SCSS),
    info(AtRuleId::Content, "content", AtRuleCategory::Reference, DialectSet::SCSS),
    info(AtRuleId::Function, "function", AtRuleCategory::Definition, DialectSet::SCSS),
    info(AtRuleId::Return, "return", AtRuleCategory::Statement, DialectSet::SCSS),
    info(AtRuleId::Extend, "extend", AtRuleCategory::Reference, DialectSet::SCSS),
    info(AtRuleId::AtRoot, "at-root", AtRuleCategory::Block, DialectSet::SCSS),
    // SCSS control flow
    info(AtRuleId::If, "if", AtRuleCategory::ControlFlow, DialectSet::SCSS),
    AtRuleInfo {
        id: AtRuleId::Else,
        canonical: "else",
        aliases: &["elseif"],
        category: AtRuleCategory::ControlFlow,
        dialects: DialectSet::SCSS,
        stability: Stability::Stable,
    },
    info(AtRuleId::Each, "each", AtRuleCategory::ControlFlow, DialectSet::SCSS),
    info(AtRuleId::For, "for", AtRuleCategory::ControlFlow, DialectSet::SCSS),
    info(AtRuleId::While, "while", AtRuleCategory::ControlFlow, DialectSet::SCSS),
    // SCSS diagnostics
    info(AtRuleId::Debug, "debug", AtRuleCategory::Diagnostic, DialectSet::SCSS),
    info(AtRuleId::Warn, "warn", AtRuleCategory::Diagnostic, DialectSet::SCSS),
    info(AtRuleId::Error, "error", AtRuleCategory::Diagnostic, DialectSet::SCSS),
    // Less
    info(AtRuleId::Plugin, "plugin", AtRuleCategory::Statement, DialectSet::LESS),
];

/// Vendor prefixes stripped before lookup.
pub const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Canonical spelling (without the `@`).
pub fn as_str(id: AtRuleId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: AtRuleId) -> AtRuleCategory {
    info_for(id).category
}

/// Return `true` if `dialect` gives `id` a dedicated production.
pub fn is_available(id: AtRuleId, dialect: Dialect) -> bool {
    info_for(id).dialects.contains(dialect)
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: AtRuleId) -> &'static AtRuleInfo {
    AT_RULES.iter().find(|r| r.id == id).expect("at-rule info missing")
}

/// Lookup by spelling (canonical or alias), ignoring case, a leading `@` and vendor prefixes.
///
/// ## Returns
/// - `Some(AtRuleId)` if the spelling is a known at-rule in *some* dialect. Use [`from_str_in`] to also check that
///   the dialect defines it.
pub fn from_str(s: &str) -> Option<AtRuleId> {
    let name = s.strip_prefix('@').unwrap_or(s);
    let index = spelling_index();
    if let Some(id) = lookup(index, name) {
        return Some(id);
    }
    let unprefixed = strip_vendor_prefix(name)?;
    lookup(index, unprefixed)
}

/// Lookup restricted to the at-rules `dialect` defines.
pub fn from_str_in(s: &str, dialect: Dialect) -> Option<AtRuleId> {
    from_str(s).filter(|id| is_available(*id, dialect))
}

/// Strip a known vendor prefix (case-insensitive); `None` if there is none.
pub fn strip_vendor_prefix(name: &str) -> Option<&str> {
    VENDOR_PREFIXES.iter().find_map(|prefix| {
        let head = name.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix).then(|| &name[prefix.len()..])
    })
}

// --- helpers -----------------------------------------------------------------

fn lookup(index: &HashMap<String, AtRuleId>, name: &str) -> Option<AtRuleId> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        index.get(&name.to_ascii_lowercase()).copied()
    } else {
        index.get(name).copied()
    }
}

fn spelling_index() -> &'static HashMap<String, AtRuleId> {
    static INDEX: OnceLock<HashMap<String, AtRuleId>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index = HashMap::with_capacity(AT_RULES.len() + 4);
        for rule in AT_RULES {
            index.insert(rule.canonical.to_string(), rule.id);
            for alias in rule.aliases {
                index.insert((*alias).to_string(), rule.id);
            }
        }
        index
    })
}

const fn info(id: AtRuleId, canonical: &'static str, category: AtRuleCategory, dialects: DialectSet) -> AtRuleInfo {
    AtRuleInfo {
        id,
        canonical,
        aliases: &[],
        category,
        dialects,
        stability: Stability::Stable,
    }
}
