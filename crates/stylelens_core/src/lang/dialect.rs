//! Dialect selection and capabilities.
//!
//! The scanner and parser are a single engine parameterized by a [`DialectCaps`] value. Everything that differs
//! between CSS, SCSS and Less (variable sigils, comment syntax, interpolation markers, arithmetic, control flow) is
//! expressed here as plain data, so shared grammar stays in one place.
//!
//! ## Examples
//! ```rust
//! use stylelens_core::lang::dialect::{Dialect, InterpolationSyntax};
//!
//! let caps = Dialect::Scss.capabilities();
//! assert_eq!(caps.variable_sigil, Some('$'));
//! assert_eq!(caps.interpolation, Some(InterpolationSyntax::Hash));
//! assert_eq!(Dialect::from_language_id("less"), Some(Dialect::Less));
//! ```

use std::fmt;
use std::path::Path;

/// One of the three supported stylesheet grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Plain CSS.
    #[default]
    Css,
    /// Sass, curly-brace syntax.
    Scss,
    /// Less.
    Less,
}

/// Interpolation marker syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationSyntax {
    /// `#{ expr }`
    Hash,
    /// `@{ name }`
    At,
}

impl InterpolationSyntax {
    /// The sigil that precedes `{` when opening an interpolation.
    pub const fn sigil(self) -> char {
        match self {
            InterpolationSyntax::Hash => '#',
            InterpolationSyntax::At => '@',
        }
    }
}

/// Grammar switches for one dialect.
///
/// ## Notes
/// - This is a value type; parsers copy it at construction and never consult the dialect again per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectCaps {
    /// Sigil that introduces a variable name (`$` in SCSS, `@` in Less).
    pub variable_sigil: Option<char>,
    /// `// ...` comments.
    pub line_comments: bool,
    /// Interpolation markers, if any.
    pub interpolation: Option<InterpolationSyntax>,
    /// `+ - * / %` and comparison operators inside values.
    pub arithmetic: bool,
    /// `==`, `!=`, `<=`, `>=` as single tokens.
    pub comparison_tokens: bool,
    /// Mixin and function declarations.
    pub mixins: bool,
    /// `@if` / `@for` / `@each` / `@while`.
    pub control_flow: bool,
    /// Parenthesized maps and lists inside values.
    pub maps: bool,
    /// `when (...)` guards on mixins and rule sets.
    pub guards: bool,
}

impl Dialect {
    /// All dialects, in declaration order.
    pub const ALL: [Dialect; 3] = [Dialect::Css, Dialect::Scss, Dialect::Less];

    /// Capability switches for this dialect.
    pub const fn capabilities(self) -> DialectCaps {
        match self {
            Dialect::Css => DialectCaps {
                variable_sigil: None,
                line_comments: false,
                interpolation: None,
                arithmetic: false,
                comparison_tokens: false,
                mixins: false,
                control_flow: false,
                maps: false,
                guards: false,
            },
            Dialect::Scss => DialectCaps {
                variable_sigil: Some('$'),
                line_comments: true,
                interpolation: Some(InterpolationSyntax::Hash),
                arithmetic: true,
                comparison_tokens: true,
                mixins: true,
                control_flow: true,
                maps: true,
                guards: false,
            },
            Dialect::Less => DialectCaps {
                variable_sigil: Some('@'),
                line_comments: true,
                interpolation: Some(InterpolationSyntax::At),
                arithmetic: true,
                comparison_tokens: true,
                mixins: true,
                control_flow: false,
                maps: false,
                guards: true,
            },
        }
    }

    /// Editor language identifier.
    pub const fn language_id(self) -> &'static str {
        match self {
            Dialect::Css => "css",
            Dialect::Scss => "scss",
            Dialect::Less => "less",
        }
    }

    /// Resolve an editor language identifier (case-insensitive).
    pub fn from_language_id(id: &str) -> Option<Dialect> {
        Dialect::ALL.into_iter().find(|d| d.language_id().eq_ignore_ascii_case(id))
    }

    /// Infer the dialect from a file extension (`.css`, `.scss`, `.less`).
    pub fn from_path(path: &Path) -> Option<Dialect> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Dialect::from_language_id)
    }

    /// Return `true` for the two preprocessor grammars.
    pub const fn is_superset(self) -> bool {
        !matches!(self, Dialect::Css)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_id())
    }
}
