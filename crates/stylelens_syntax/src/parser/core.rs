/// Deepest bracket or block nesting the parser descends into. Deeper regions are skipped as balanced token runs.
const MAX_NESTING: u32 = 64;

/// Saved parser state for bounded backtracking.
#[derive(Debug, Clone)]
struct Mark {
    scanner: ScannerMark,
    token: Token,
    prev_token: Token,
    last_error_offset: Option<usize>,
}

/// What a `{ ... }` body (or the top level) may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockContent {
    /// Top level of a stylesheet: rule sets and at-rules.
    Statements,
    /// Inside a rule: declarations, nested rules and at-rules.
    Declarations,
    /// `@keyframes` body.
    Keyframes,
    /// `@page` body: declarations and margin boxes.
    Page,
}

/// Recursive-descent parser over a single source text.
///
/// ## Notes
/// - The parser never fails. Every problem becomes an [`Issue`] on the node under construction, followed by
///   resynchronization at the next statement boundary.
/// - At most one syntax issue is recorded per token start offset.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    source: &'a str,
    dialect: Dialect,
    caps: DialectCaps,
    token: Token,
    prev_token: Token,
    last_error_offset: Option<usize>,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, dialect: Dialect) -> Self {
        let mut scanner = Scanner::new(source, dialect);
        let token = scanner.scan();
        Self {
            scanner,
            source,
            dialect,
            caps: dialect.capabilities(),
            token,
            prev_token: Token::new(TokenKind::Eof, Span::empty(0)),
            last_error_offset: None,
            depth: 0,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse the whole input as a stylesheet.
    pub fn parse_stylesheet(mut self) -> SyntaxTree {
        let root = self.stylesheet();
        self.into_tree(root)
    }

    /// Freeze `root` together with the scanner's lexical issues.
    fn into_tree(mut self, root: Node) -> SyntaxTree {
        let lexical = self.scanner.take_issues();
        SyntaxTree::from_node(self.source, self.dialect, root, lexical)
    }

    fn is_scss(&self) -> bool {
        self.dialect == Dialect::Scss
    }

    fn is_less(&self) -> bool {
        self.dialect == Dialect::Less
    }
}
