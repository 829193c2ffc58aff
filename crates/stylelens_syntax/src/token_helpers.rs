//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites in the parser and the hosts.

use crate::lexer::{Token, TokenKind};

impl TokenKind {
    /// Return `true` for whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    /// Return `true` if this is the given delimiter character.
    pub fn is_delim(&self, c: char) -> bool {
        matches!(self, TokenKind::Delim(d) if *d == c)
    }

    /// Return `true` for tokens that close a bracketed region.
    pub fn is_closing(&self) -> bool {
        matches!(
            self,
            TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket | TokenKind::InterpolationEnd
        )
    }

    /// The token that closes a region opened by this token, if it opens one.
    pub fn closing_pair(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LBrace => Some(TokenKind::RBrace),
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBracket => Some(TokenKind::RBracket),
            TokenKind::InterpolationStart => Some(TokenKind::InterpolationEnd),
            _ => None,
        }
    }

    /// Return `true` for the numeric token family.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Percentage | TokenKind::Dimension)
    }

    /// Return `true` for string tokens, including unterminated ones.
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::String | TokenKind::BadString)
    }

    /// Short stable name, used by `stylelens tokens`.
    pub fn name(&self) -> String {
        match self {
            TokenKind::Delim(c) => format!("Delim({c})"),
            other => format!("{other:?}"),
        }
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.is_delim(c)`.
    pub fn is_delim(&self, c: char) -> bool {
        self.kind.is_delim(c)
    }

    /// Return `true` if `other` starts exactly where this token ends.
    pub fn touches(&self, other: &Token) -> bool {
        self.span.end == other.span.start
    }
}
