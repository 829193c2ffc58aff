//! Token types for the stylesheet scanner.

use crate::ast::Span;

/// Token kinds.
///
/// Tokens carry no text; slice the source with [`Token::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Names
    Ident,
    /// `@name` (also `@@name` in Less).
    AtKeyword,
    /// `$name` in SCSS.
    Variable,
    /// `#name`
    Hash,

    // Literals
    String,
    /// A string that hit end-of-line or end-of-input before its closing quote.
    BadString,
    /// `url(...)` with an unquoted body.
    Url,
    Number,
    Percentage,
    Dimension,
    /// `U+0-7F`, `u+4??`
    UnicodeRange,

    // Punctuation
    Colon,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    /// `...`
    Ellipsis,
    /// `!`
    Exclamation,

    // Attribute matchers
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    PrefixMatch,
    /// `$=`
    SuffixMatch,
    /// `*=`
    SubstringMatch,

    // Comparison
    EqEq,
    NotEq,
    GtEq,
    LtEq,

    // Interpolation
    /// `#{` (SCSS) or `@{` (Less).
    InterpolationStart,
    /// The `}` that closes an interpolation.
    InterpolationEnd,

    /// Any other single character.
    Delim(char),

    // Trivia (only produced when the scanner keeps trivia)
    Comment,
    Whitespace,

    /// Control characters and other bytes no production accepts.
    Unknown,
    Eof,
}

/// A token: kind plus byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Slice this token's text out of `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}
