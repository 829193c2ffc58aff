//! Shareable metadata for `stylelens_core::lang` registries.
//!
//! Every registry entry records which dialects define it and how stable it is. The types here are tiny and `Copy` so
//! that registries can live in `const` tables.
//!
//! ## See also
//! - [`crate::lang::at_rules`]
//! - [`crate::lang::dialect`]

use super::dialect::Dialect;

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Notes
/// - This is metadata for tooling (e.g. a linter layered on top may warn on deprecated spellings); the parser accepts
///   every stability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// A set of dialects, stored as a bit mask.
///
/// ## Examples
/// ```rust
/// use stylelens_core::lang::dialect::Dialect;
/// use stylelens_core::lang::registry::DialectSet;
///
/// let set = DialectSet::SUPERSETS;
/// assert!(set.contains(Dialect::Scss));
/// assert!(!set.contains(Dialect::Css));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialectSet(u8);

impl DialectSet {
    pub const CSS: DialectSet = DialectSet(0b001);
    pub const SCSS: DialectSet = DialectSet(0b010);
    pub const LESS: DialectSet = DialectSet(0b100);
    /// Everything that understands plain CSS (all three grammars).
    pub const ALL: DialectSet = DialectSet(0b111);
    /// The two preprocessor grammars.
    pub const SUPERSETS: DialectSet = DialectSet(0b110);

    const fn bit(dialect: Dialect) -> u8 {
        match dialect {
            Dialect::Css => 0b001,
            Dialect::Scss => 0b010,
            Dialect::Less => 0b100,
        }
    }

    /// Return `true` if `dialect` is a member of this set.
    pub const fn contains(self, dialect: Dialect) -> bool {
        self.0 & Self::bit(dialect) != 0
    }

    /// Union of two sets.
    pub const fn with(self, other: DialectSet) -> DialectSet {
        DialectSet(self.0 | other.0)
    }
}
