//! Number scanning: numbers, percentages and dimensions.

use super::Scanner;
use super::tokens::{Token, TokenKind};

impl<'a> Scanner<'a> {
    /// After a consumed `+` or `-`: does a number start here?
    pub(super) fn number_follows(&self) -> bool {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scan a number starting at `start` (which may hold a sign or a leading `.`), then its `%` or unit.
    pub(super) fn scan_number(&mut self, start: usize) -> Token {
        self.pos = start;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        self.consume_digits();

        // Fraction
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        // Exponent (`1e3`, `1e-3`) but not a unit (`1em`)
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent = match self.peek_at(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent {
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        if self.match_char('%') {
            self.token(TokenKind::Percentage, start)
        } else if self.would_start_ident(0) {
            self.consume_name();
            self.token(TokenKind::Dimension, start)
        } else {
            self.token(TokenKind::Number, start)
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }
}
