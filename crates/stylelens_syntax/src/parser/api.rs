/// Which production a fragment is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FragmentKind {
    /// A whole stylesheet (same as [`parse`]).
    #[default]
    Stylesheet,
    /// One declaration, including SCSS and Less variable declarations. A trailing `;` is allowed.
    Declaration,
    /// One complex selector.
    Selector,
    /// One value expression.
    Expression,
}

impl<'a> Parser<'a> {
    /// Parse the whole input as a single fragment of `kind`, wrapped in a `Stylesheet` root.
    pub fn parse_fragment(mut self, kind: FragmentKind) -> SyntaxTree {
        if kind == FragmentKind::Stylesheet {
            return self.parse_stylesheet();
        }
        let mut root = Node::new(NodeKind::Stylesheet, Span::empty(0));
        let (fragment, missing, trailing) = match kind {
            FragmentKind::Declaration => (
                self.declaration_fragment(),
                IssueCode::PropertyValueExpected,
                IssueCode::SemicolonExpected,
            ),
            FragmentKind::Selector => (self.selector(true), IssueCode::SelectorExpected, IssueCode::LeftCurlyExpected),
            FragmentKind::Expression => (
                self.expression(false),
                IssueCode::ExpressionExpected,
                IssueCode::SemicolonExpected,
            ),
            FragmentKind::Stylesheet => (None, IssueCode::RuleOrSelectorExpected, IssueCode::RuleOrSelectorExpected),
        };
        if !root.push_opt(fragment) {
            self.error(&mut root, missing);
        }
        if kind == FragmentKind::Declaration {
            self.accept(TokenKind::Semicolon);
        }
        if !self.at_eof() {
            self.error(&mut root, trailing);
            while !self.at_eof() {
                self.bump();
            }
        }
        root.span = Span::new(0, self.source.len());
        self.into_tree(root)
    }

    fn declaration_fragment(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::Variable if self.is_scss() => self.scss_variable_declaration(),
            TokenKind::AtKeyword if self.is_less() && self.lookahead().kind == TokenKind::Colon => {
                Some(self.less_variable_declaration())
            }
            _ => self.declaration(),
        }
    }
}

/// Parse `source` as a stylesheet in `dialect`.
///
/// ## Parameters
/// - `source`: the full text; any string is accepted.
/// - `dialect`: fixed for the whole parse.
///
/// ## Returns
/// - A tree whose root `Stylesheet` spans the whole text. Problems are recorded as issues on the tree, never
///   returned as errors.
#[tracing::instrument(skip_all, fields(source_len = source.len(), dialect = %dialect))]
pub fn parse(source: &str, dialect: Dialect) -> SyntaxTree {
    let tree = Parser::new(source, dialect).parse_stylesheet();
    tracing::debug!(nodes = tree.len(), issues = tree.issues().len(), "parsed stylesheet");
    tree
}

/// Parse `source` as a single fragment (a declaration, selector or expression).
///
/// The fragment becomes the only child of a `Stylesheet` root spanning the whole text. Anything after it is
/// reported and skipped.
#[tracing::instrument(skip_all, fields(source_len = source.len(), dialect = %dialect, kind = ?kind))]
pub fn parse_fragment(source: &str, dialect: Dialect, kind: FragmentKind) -> SyntaxTree {
    Parser::new(source, dialect).parse_fragment(kind)
}
