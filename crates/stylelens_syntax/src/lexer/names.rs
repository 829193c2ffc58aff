//! Name scanning: identifiers, escapes, unquoted `url(...)` bodies and unicode ranges.

use stylelens_core::lang::dialect::InterpolationSyntax;

use super::Scanner;
use super::tokens::{Token, TokenKind};

/// Letters, `_` and anything outside ASCII.
pub(super) fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

pub(super) fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0C')
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

impl<'a> Scanner<'a> {
    /// `\` at `k` followed by anything but a newline or end of input.
    pub(super) fn at_valid_escape(&self, k: usize) -> bool {
        self.peek_at(k) == Some('\\') && self.peek_at(k + 1).is_some_and(|c| !is_newline(c))
    }

    /// Same as [`Self::at_valid_escape`] when the backslash was already consumed.
    pub(super) fn at_valid_escape_after_backslash(&self) -> bool {
        self.peek().is_some_and(|c| !is_newline(c))
    }

    /// Return `true` if the characters starting `k` positions ahead begin an identifier.
    pub(super) fn would_start_ident(&self, k: usize) -> bool {
        match self.peek_at(k) {
            Some('-') => match self.peek_at(k + 1) {
                Some('-') => true,
                Some('\\') => self.at_valid_escape(k + 1),
                Some(c) => is_name_start(c),
                None => false,
            },
            Some('\\') => self.at_valid_escape(k),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// After a consumed `-`: does an identifier continue here?
    pub(super) fn starts_ident_after_minus(&self) -> bool {
        match self.peek() {
            Some('-') => true,
            Some('\\') => self.at_valid_escape(0),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// Consume the body of an escape whose backslash was already consumed.
    pub(super) fn consume_escape_body(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };
        if c.is_ascii_hexdigit() {
            let mut count = 1;
            while count < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
                count += 1;
            }
            if self.match_char('\r') {
                self.match_char('\n');
            } else if self.peek().is_some_and(is_whitespace) {
                self.advance();
            }
        }
    }

    pub(super) fn consume_name(&mut self) {
        loop {
            match self.peek() {
                Some(c) if is_name_char(c) => {
                    self.advance();
                }
                Some('\\') if self.at_valid_escape(0) => {
                    self.advance();
                    self.consume_escape_body();
                }
                _ => break,
            }
        }
    }

    /// Finish an identifier starting at `start`; `url(` with an unquoted body becomes a single [`TokenKind::Url`].
    pub(super) fn scan_ident_like(&mut self, start: usize) -> Token {
        let text = &self.source[start..self.pos];
        if text.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            if let Some(url) = self.try_scan_url(start) {
                return url;
            }
        }
        self.token(TokenKind::Ident, start)
    }

    fn try_scan_url(&mut self, start: usize) -> Option<Token> {
        let resume = self.pos;
        self.advance();
        self.skip_whitespace();
        loop {
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Some(self.token(TokenKind::Url, start));
                }
                Some(c) if is_whitespace(c) => {
                    self.skip_whitespace();
                    if self.match_char(')') {
                        return Some(self.token(TokenKind::Url, start));
                    }
                    break;
                }
                Some('"' | '\'' | '(') | None => break,
                Some('\\') => {
                    if !self.at_valid_escape(0) {
                        break;
                    }
                    self.advance();
                    self.consume_escape_body();
                }
                Some(c) if self.interrupts_url(c) => break,
                Some(_) => {
                    self.advance();
                }
            }
        }
        self.pos = resume;
        None
    }

    /// Variables and interpolation inside `url(...)` turn it into an ordinary function call.
    fn interrupts_url(&self, c: char) -> bool {
        match c {
            '$' => self.caps.variable_sigil == Some('$'),
            '#' => self.interpolation() == Some(InterpolationSyntax::Hash) && self.peek_at(1) == Some('{'),
            '@' => {
                self.caps.variable_sigil == Some('@') && (self.peek_at(1) == Some('{') || self.would_start_ident(1))
            }
            _ => false,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.advance();
        }
    }

    /// After a consumed `u`/`U`: is this `U+` followed by a hex digit or `?`
    pub(super) fn unicode_range_follows(&self) -> bool {
        self.peek() == Some('+') && self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit() || c == '?')
    }

    pub(super) fn scan_unicode_range(&mut self, start: usize) -> Token {
        self.advance();
        let mut count = 0;
        let mut wildcard = false;
        while count < 6 {
            match self.peek() {
                Some('?') => wildcard = true,
                Some(c) if c.is_ascii_hexdigit() && !wildcard => {}
                _ => break,
            }
            self.advance();
            count += 1;
        }
        if !wildcard && self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_hexdigit()) {
            self.advance();
            let mut count = 0;
            while count < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
                count += 1;
            }
        }
        self.token(TokenKind::UnicodeRange, start)
    }
}
