//! String and comment scanning.

use stylelens_core::lang::dialect::InterpolationSyntax;

use super::Scanner;
use super::tokens::{Token, TokenKind};
use crate::ast::Span;
use crate::diagnostics::{Issue, IssueCode};

impl<'a> Scanner<'a> {
    /// Scan a quoted string whose opening quote was consumed.
    ///
    /// ## Notes
    /// - A newline or end of input before the closing quote yields [`TokenKind::BadString`] (newline excluded) and
    ///   one lexical issue.
    /// - `\` followed by a newline continues the string on the next line.
    /// - In SCSS, `#{...}` inside the string is skipped as a unit, including any strings nested in it.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) -> Token {
        loop {
            match self.peek() {
                None | Some('\n' | '\r' | '\x0C') => {
                    let span = Span::new(start, self.pos);
                    self.report(Issue::lexical(IssueCode::UnterminatedString, span));
                    return self.token(TokenKind::BadString, start);
                }
                Some(c) if c == quote => {
                    self.advance();
                    return self.token(TokenKind::String, start);
                }
                Some('\\') => {
                    self.advance();
                    if self.match_char('\r') {
                        self.match_char('\n');
                    } else {
                        self.advance();
                    }
                }
                Some('#')
                    if self.interpolation() == Some(InterpolationSyntax::Hash) && self.peek_at(1) == Some('{') =>
                {
                    self.skip_embedded_interpolation();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Skip `#{ ... }` inside a string, balancing braces and stepping over nested strings.
    ///
    /// Stops before a line break so an unterminated string still ends on its own line.
    fn skip_embedded_interpolation(&mut self) {
        self.pos += 2;
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            if matches!(c, '\n' | '\r' | '\x0C') {
                return;
            }
            self.advance();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                '"' | '\'' => self.skip_nested_string(c),
                '\\' => {
                    if !matches!(self.peek(), Some('\n' | '\r' | '\x0C')) {
                        self.advance();
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip a string nested in an embedded interpolation. Problems surface through the enclosing string.
    fn skip_nested_string(&mut self, quote: char) {
        while let Some(c) = self.peek() {
            if c == quote {
                self.advance();
                return;
            }
            if matches!(c, '\n' | '\r' | '\x0C') {
                return;
            }
            self.advance();
            if c == '\\' && !matches!(self.peek(), Some('\n' | '\r' | '\x0C')) {
                self.advance();
            }
        }
    }

    /// Scan a `/* ... */` comment whose opening was consumed.
    pub(super) fn scan_block_comment(&mut self, start: usize) -> Token {
        match self.rest().find("*/") {
            Some(idx) => self.pos += idx + 2,
            None => {
                self.pos = self.source.len();
                let span = Span::new(start, self.pos);
                self.report(Issue::lexical(IssueCode::UnterminatedComment, span));
            }
        }
        self.token(TokenKind::Comment, start)
    }

    /// Scan a `// ...` comment up to (not including) the end of the line.
    pub(super) fn scan_line_comment(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if matches!(c, '\n' | '\r') {
                break;
            }
            self.advance();
        }
        self.token(TokenKind::Comment, start)
    }
}
