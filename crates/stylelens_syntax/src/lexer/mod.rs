//! Scanner for CSS, SCSS and Less.
//!
//! Handles tokenization including:
//! - Identifiers (with escapes and `--custom` names), at-keywords, SCSS `$variables`, `#hash` names
//! - Numbers, percentages and dimensions; unicode ranges
//! - Strings (with SCSS `#{...}` embedded in them) and unquoted `url(...)` bodies
//! - Block comments everywhere, `//` line comments in the supersets
//! - Interpolation markers (`#{` / `@{`) tracked on an explicit frame stack
//!
//! The scanner is pull-based: the parser calls [`Scanner::scan`] for each token and can rewind with
//! [`Scanner::mark`] / [`Scanner::restore`]. It never fails. Unterminated strings and comments are reported as
//! lexical [`Issue`]s and scanning continues.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `names` - identifiers, escapes, at-keywords, unicode ranges and `url(...)`
//! - `numbers` - numeric literal scanning
//! - `strings` - strings and comments

mod names;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind};

use stylelens_core::lang::dialect::{Dialect, DialectCaps, InterpolationSyntax};

use crate::ast::Span;
use crate::diagnostics::Issue;

// ============================================================================
// SCANNER STATE
// ----------------------------------------------------------------------------
// Brace frames (only tracked while an interpolation is open):
//
//   `#{`  → push Interpolation
//   `{`   → push Block            (stack non-empty only)
//   `}`   → top == Interpolation  → pop, InterpolationEnd
//           top == Block          → pop, RBrace
//           empty                 → RBrace
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Interpolation,
    Block,
}

/// Saved scanner state.
///
/// Restoring a mark rewinds the cursor, the interpolation frames and the lexical issue list together, so a
/// re-scanned region never reports the same issue twice.
#[derive(Debug, Clone)]
pub struct ScannerMark {
    pos: usize,
    frames: Vec<Frame>,
    issue_len: usize,
}

/// Dialect-aware pull scanner.
pub struct Scanner<'a> {
    source: &'a str,
    caps: DialectCaps,
    pos: usize,
    frames: Vec<Frame>,
    issues: Vec<Issue>,
    keep_trivia: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner that skips whitespace and comments.
    pub fn new(source: &'a str, dialect: Dialect) -> Self {
        Self {
            source,
            caps: dialect.capabilities(),
            pos: 0,
            frames: Vec::new(),
            issues: Vec::new(),
            keep_trivia: false,
        }
    }

    /// Emit [`TokenKind::Whitespace`] and [`TokenKind::Comment`] tokens instead of skipping them.
    pub fn with_trivia(mut self, keep: bool) -> Self {
        self.keep_trivia = keep;
        self
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn caps(&self) -> DialectCaps {
        self.caps
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mark(&self) -> ScannerMark {
        ScannerMark {
            pos: self.pos,
            frames: self.frames.clone(),
            issue_len: self.issues.len(),
        }
    }

    pub fn restore(&mut self, mark: ScannerMark) {
        self.pos = mark.pos;
        self.frames = mark.frames;
        self.issues.truncate(mark.issue_len);
    }

    /// The token [`Scanner::scan`] would return next, without moving the cursor or recording issues.
    pub fn peek_token(&self) -> Token {
        Scanner {
            source: self.source,
            caps: self.caps,
            pos: self.pos,
            frames: self.frames.clone(),
            issues: Vec::new(),
            keep_trivia: self.keep_trivia,
        }
        .scan()
    }

    /// Lexical issues recorded so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }

    /// Scan the next token. Returns [`TokenKind::Eof`] forever once the input is exhausted.
    pub fn scan(&mut self) -> Token {
        loop {
            let token = self.scan_raw();
            if self.keep_trivia || !token.kind.is_trivia() {
                return token;
            }
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Character `n` positions ahead of the cursor (`peek_at(0) == peek()`).
    fn peek_at(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, Span::new(start, self.pos))
    }

    fn report(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    fn interpolation(&self) -> Option<InterpolationSyntax> {
        self.caps.interpolation
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_raw(&mut self) -> Token {
        let start = self.pos;
        let Some(c) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::empty(self.source.len()));
        };

        match c {
            ' ' | '\t' | '\n' | '\r' | '\x0C' => {
                while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r' | '\x0C')) {
                    self.advance();
                }
                self.token(TokenKind::Whitespace, start)
            }

            // Comments
            '/' => {
                if self.match_char('*') {
                    self.scan_block_comment(start)
                } else if self.caps.line_comments && self.match_char('/') {
                    self.scan_line_comment(start)
                } else {
                    self.token(TokenKind::Delim('/'), start)
                }
            }

            // Strings
            '"' | '\'' => self.scan_string(start, c),

            // Hash names and SCSS interpolation
            '#' => {
                if self.interpolation() == Some(InterpolationSyntax::Hash) && self.match_char('{') {
                    self.frames.push(Frame::Interpolation);
                    self.token(TokenKind::InterpolationStart, start)
                } else if self.peek().is_some_and(names::is_name_char) || self.at_valid_escape(0) {
                    self.consume_name();
                    self.token(TokenKind::Hash, start)
                } else {
                    self.token(TokenKind::Delim('#'), start)
                }
            }

            // At-keywords and Less interpolation
            '@' => self.scan_at(start),

            // SCSS variables
            '$' => {
                if self.match_char('=') {
                    self.token(TokenKind::SuffixMatch, start)
                } else if self.caps.variable_sigil == Some('$') && self.would_start_ident(0) {
                    self.consume_name();
                    self.token(TokenKind::Variable, start)
                } else {
                    self.token(TokenKind::Delim('$'), start)
                }
            }

            // Braces (frame-aware)
            '{' => {
                if !self.frames.is_empty() {
                    self.frames.push(Frame::Block);
                }
                self.token(TokenKind::LBrace, start)
            }
            '}' => match self.frames.last() {
                Some(Frame::Interpolation) => {
                    self.frames.pop();
                    self.token(TokenKind::InterpolationEnd, start)
                }
                Some(Frame::Block) => {
                    self.frames.pop();
                    self.token(TokenKind::RBrace, start)
                }
                None => self.token(TokenKind::RBrace, start),
            },

            // Punctuation
            '(' => self.token(TokenKind::LParen, start),
            ')' => self.token(TokenKind::RParen, start),
            '[' => self.token(TokenKind::LBracket, start),
            ']' => self.token(TokenKind::RBracket, start),
            ':' => self.token(TokenKind::Colon, start),
            ';' => self.token(TokenKind::Semicolon, start),
            ',' => self.token(TokenKind::Comma, start),

            // Matchers and comparisons
            '~' => self.compound(start, '~', '=', TokenKind::Includes),
            '|' => self.compound(start, '|', '=', TokenKind::DashMatch),
            '^' => self.compound(start, '^', '=', TokenKind::PrefixMatch),
            '*' => self.compound(start, '*', '=', TokenKind::SubstringMatch),
            '=' => {
                if self.caps.comparison_tokens && self.match_char('=') {
                    self.token(TokenKind::EqEq, start)
                } else {
                    self.token(TokenKind::Delim('='), start)
                }
            }
            '!' => {
                if self.caps.comparison_tokens && self.match_char('=') {
                    self.token(TokenKind::NotEq, start)
                } else {
                    self.token(TokenKind::Exclamation, start)
                }
            }
            '<' => {
                if self.match_str("!--") {
                    self.token(TokenKind::Cdo, start)
                } else {
                    self.compound(start, '<', '=', TokenKind::LtEq)
                }
            }
            '>' => self.compound(start, '>', '=', TokenKind::GtEq),

            // Dots
            '.' => {
                if self.match_str("..") {
                    self.token(TokenKind::Ellipsis, start)
                } else if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start)
                } else {
                    self.token(TokenKind::Delim('.'), start)
                }
            }

            // Signs
            '+' => {
                if self.number_follows() {
                    self.scan_number(start)
                } else {
                    self.token(TokenKind::Delim('+'), start)
                }
            }
            '-' => {
                if self.number_follows() {
                    self.scan_number(start)
                } else if self.match_str("->") {
                    self.token(TokenKind::Cdc, start)
                } else if self.starts_ident_after_minus() {
                    self.consume_name();
                    self.scan_ident_like(start)
                } else {
                    self.token(TokenKind::Delim('-'), start)
                }
            }

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Unicode ranges
            'u' | 'U' if self.unicode_range_follows() => self.scan_unicode_range(start),

            // Escapes start identifiers
            '\\' => {
                if self.at_valid_escape_after_backslash() {
                    self.consume_escape_body();
                    self.consume_name();
                    self.scan_ident_like(start)
                } else {
                    self.token(TokenKind::Delim('\\'), start)
                }
            }

            // Identifiers
            _ if names::is_name_start(c) => {
                self.consume_name();
                self.scan_ident_like(start)
            }

            _ if c.is_control() => self.token(TokenKind::Unknown, start),

            _ => self.token(TokenKind::Delim(c), start),
        }
    }

    /// Emit `compound` if the next char is `second`, otherwise `Delim(first)`.
    fn compound(&mut self, start: usize, first: char, second: char, compound: TokenKind) -> Token {
        if self.match_char(second) {
            self.token(compound, start)
        } else {
            self.token(TokenKind::Delim(first), start)
        }
    }

    fn scan_at(&mut self, start: usize) -> Token {
        if self.interpolation() == Some(InterpolationSyntax::At) && self.match_char('{') {
            self.frames.push(Frame::Interpolation);
            return self.token(TokenKind::InterpolationStart, start);
        }
        // Less variable-variables: `@@name`
        if self.caps.variable_sigil == Some('@') && self.peek() == Some('@') && self.would_start_ident(1) {
            self.advance();
            self.consume_name();
            return self.token(TokenKind::AtKeyword, start);
        }
        if self.would_start_ident(0) {
            self.consume_name();
            return self.token(TokenKind::AtKeyword, start);
        }
        self.token(TokenKind::Delim('@'), start)
    }
}

/// Output of [`lex`].
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    /// All tokens, ending with [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    pub issues: Vec<Issue>,
}

/// Tokenize a whole document.
///
/// ## Parameters
/// - `source`: document text.
/// - `dialect`: grammar to scan.
/// - `keep_trivia`: include whitespace and comment tokens.
///
/// ## Returns
/// - All tokens (always ending with `Eof`) plus the lexical issues found along the way.
#[tracing::instrument(skip_all, fields(source_len = source.len(), dialect = %dialect))]
pub fn lex(source: &str, dialect: Dialect, keep_trivia: bool) -> Lexed {
    let mut scanner = Scanner::new(source, dialect).with_trivia(keep_trivia);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            break;
        }
    }
    Lexed {
        tokens,
        issues: scanner.take_issues(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::IssueCode;

    fn kinds(source: &str, dialect: Dialect) -> Vec<TokenKind> {
        lex(source, dialect, false).tokens.into_iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str, dialect: Dialect) -> Vec<&str> {
        lex(source, dialect, false)
            .tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text(source))
            .collect()
    }

    #[test]
    fn test_simple_rule() {
        use TokenKind::*;
        assert_eq!(
            kinds(".a { color: red; }", Dialect::Css),
            vec![Delim('.'), Ident, LBrace, Ident, Colon, Ident, Semicolon, RBrace, Eof]
        );
    }

    #[test]
    fn test_numbers_and_units() {
        use TokenKind::*;
        assert_eq!(
            kinds("10px 50% -3 +.5em 1e3 2n", Dialect::Css),
            vec![Dimension, Percentage, Number, Dimension, Number, Dimension, Eof]
        );
        assert_eq!(texts("1.5rem-2", Dialect::Css), vec!["1.5rem-2"]);
    }

    #[test]
    fn test_identifiers() {
        use TokenKind::*;
        assert_eq!(kinds("--main-color -webkit-box _x \\31 a", Dialect::Css), vec![Ident, Ident, Ident, Ident, Eof]);
        assert_eq!(texts("a\\:b", Dialect::Css), vec!["a\\:b"]);
    }

    #[test]
    fn test_trivia_kept_on_request() {
        let lexed = lex("a /* c */ b", Dialect::Css, true);
        let kinds: Vec<_> = lexed.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_line_comments_only_in_supersets() {
        assert_eq!(kinds("// x", Dialect::Scss), vec![TokenKind::Eof]);
        assert_eq!(kinds("// x", Dialect::Less), vec![TokenKind::Eof]);
        assert_eq!(
            kinds("// x", Dialect::Css),
            vec![TokenKind::Delim('/'), TokenKind::Delim('/'), TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string_is_bad_string_with_one_issue() {
        let source = "content: \"abc";
        let lexed = lex(source, Dialect::Css, false);
        let bad: Vec<_> = lexed.tokens.iter().filter(|t| t.kind == TokenKind::BadString).collect();
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].text(source), "\"abc");
        assert_eq!(lexed.issues.len(), 1);
        assert_eq!(lexed.issues[0].code, IssueCode::UnterminatedString);
    }

    #[test]
    fn test_bad_string_stops_at_end_of_line() {
        let source = "a: 'abc\nb: c;";
        let lexed = lex(source, Dialect::Css, false);
        let bad = lexed.tokens.iter().find(|t| t.kind == TokenKind::BadString).unwrap();
        assert_eq!(bad.text(source), "'abc");
        assert_eq!(lexed.tokens.iter().filter(|t| t.kind == TokenKind::Ident).count(), 3);
    }

    #[test]
    fn test_bad_string_with_interpolation_stops_at_end_of_line() {
        let source = "a { content: \"#{ $x\n.b { c: d; }";
        let lexed = lex(source, Dialect::Scss, false);
        let bad: Vec<_> = lexed.tokens.iter().filter(|t| t.kind == TokenKind::BadString).collect();
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].text(source), "\"#{ $x");
        assert_eq!(lexed.issues.len(), 1);
        assert_eq!(lexed.issues[0].code, IssueCode::UnterminatedString);
        // the next line is scanned normally
        let idents: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.text(source))
            .collect();
        assert_eq!(idents, vec!["a", "content", "b", "c", "d"]);
    }

    #[test]
    fn test_unclosed_interpolation_in_string_does_not_eat_next_line() {
        use TokenKind::*;
        let source = "\"#{\n}";
        let lexed = lex(source, Dialect::Scss, false);
        assert_eq!(lexed.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![BadString, RBrace, Eof]);
        assert_eq!(lexed.tokens[0].text(source), "\"#{");
        assert_eq!(lexed.issues.len(), 1);
    }

    #[test]
    fn test_peek_token_leaves_scanner_untouched() {
        let mut scanner = Scanner::new("\"abc", Dialect::Css);
        let peeked = scanner.peek_token();
        assert_eq!(peeked.kind, TokenKind::BadString);
        assert_eq!(scanner.position(), 0);
        assert!(scanner.issues().is_empty());
        assert_eq!(scanner.scan(), peeked);
        assert_eq!(scanner.issues().len(), 1);
    }

    #[test]
    fn test_unterminated_comment_reported() {
        let lexed = lex("a /* never closed", Dialect::Css, false);
        assert_eq!(lexed.issues.len(), 1);
        assert_eq!(lexed.issues[0].code, IssueCode::UnterminatedComment);
        assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_scss_interpolation_frames() {
        use TokenKind::*;
        assert_eq!(
            kinds("#{$a + {b}} }", Dialect::Scss),
            vec![InterpolationStart, Variable, Delim('+'), LBrace, Ident, RBrace, InterpolationEnd, RBrace, Eof]
        );
    }

    #[test]
    fn test_hash_brace_is_not_interpolation_in_css() {
        use TokenKind::*;
        assert_eq!(kinds("#{a}", Dialect::Css), vec![Delim('#'), LBrace, Ident, RBrace, Eof]);
    }

    #[test]
    fn test_scss_string_with_interpolation_is_one_token() {
        let source = r#""a #{"b" + $c} d""#;
        let lexed = lex(source, Dialect::Scss, false);
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.tokens[0].kind, TokenKind::String);
        assert_eq!(lexed.tokens[0].text(source), source);
        assert!(lexed.issues.is_empty());
    }

    #[test]
    fn test_less_variables_and_interpolation() {
        use TokenKind::*;
        assert_eq!(
            kinds("@a: @@b; .@{c} {}", Dialect::Less),
            vec![
                AtKeyword,
                Colon,
                AtKeyword,
                Semicolon,
                Delim('.'),
                InterpolationStart,
                Ident,
                InterpolationEnd,
                LBrace,
                RBrace,
                Eof
            ]
        );
        assert_eq!(texts("@@b", Dialect::Less), vec!["@@b"]);
    }

    #[test]
    fn test_unquoted_url() {
        use TokenKind::*;
        assert_eq!(kinds("url(a/b.png)", Dialect::Css), vec![Url, Eof]);
        assert_eq!(kinds("url( a.png )", Dialect::Css), vec![Url, Eof]);
        assert_eq!(kinds("url(\"a.png\")", Dialect::Css), vec![Ident, LParen, String, RParen, Eof]);
        assert_eq!(kinds("url($base)", Dialect::Scss), vec![Ident, LParen, Variable, RParen, Eof]);
    }

    #[test]
    fn test_unicode_ranges() {
        use TokenKind::*;
        assert_eq!(kinds("U+0-7F u+4?? u+a", Dialect::Css), vec![UnicodeRange, UnicodeRange, UnicodeRange, Eof]);
        assert_eq!(kinds("u+ x", Dialect::Css), vec![Ident, Delim('+'), Ident, Eof]);
    }

    #[test]
    fn test_matchers_and_comparisons() {
        use TokenKind::*;
        assert_eq!(
            kinds("~= |= ^= $= *= <= >=", Dialect::Css),
            vec![Includes, DashMatch, PrefixMatch, SuffixMatch, SubstringMatch, LtEq, GtEq, Eof]
        );
        assert_eq!(kinds("== !=", Dialect::Scss), vec![EqEq, NotEq, Eof]);
        assert_eq!(kinds("== !=", Dialect::Css), vec![Delim('='), Delim('='), Exclamation, Delim('='), Eof]);
    }

    #[test]
    fn test_cdo_cdc_and_ellipsis() {
        use TokenKind::*;
        assert_eq!(kinds("<!-- --> $args...", Dialect::Scss), vec![Cdo, Cdc, Variable, Ellipsis, Eof]);
    }

    #[test]
    fn test_mark_restore_rewinds_issues() {
        let mut scanner = Scanner::new("'abc", Dialect::Css);
        let mark = scanner.mark();
        assert_eq!(scanner.scan().kind, TokenKind::BadString);
        assert_eq!(scanner.issues().len(), 1);
        scanner.restore(mark);
        assert!(scanner.issues().is_empty());
        assert_eq!(scanner.scan().kind, TokenKind::BadString);
        assert_eq!(scanner.issues().len(), 1);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut scanner = Scanner::new("a", Dialect::Css);
        assert_eq!(scanner.scan().kind, TokenKind::Ident);
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
    }
}
