/// Stylesheet structure: block bodies, rule sets and declarations.
impl<'a> Parser<'a> {
    // ========================================================================
    // Top level and blocks
    // ========================================================================

    fn stylesheet(&mut self) -> Node {
        let mut node = Node::new(NodeKind::Stylesheet, Span::empty(0));
        loop {
            self.items(&mut node, BlockContent::Statements);
            if self.at_eof() {
                break;
            }
            // stray `}` at top level
            self.error(&mut node, IssueCode::RuleOrSelectorExpected);
            self.bump();
        }
        node.span = Span::new(0, self.source.len());
        node
    }

    /// Parse items into `node` until `}` (left in place) or end of input.
    fn items(&mut self, node: &mut Node, content: BlockContent) {
        loop {
            match self.token.kind {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semicolon | TokenKind::Cdo | TokenKind::Cdc => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let before = self.token.span.start;
            match self.item(content) {
                Some(item) => {
                    let needs_semicolon = self.prev_token.kind != TokenKind::RBrace && !ends_with_block(item.kind);
                    node.push(item);
                    if needs_semicolon
                        && !self.accept(TokenKind::Semicolon)
                        && !matches!(self.token.kind, TokenKind::RBrace | TokenKind::Eof)
                    {
                        self.error(node, IssueCode::SemicolonExpected);
                        self.resync(&[TokenKind::Semicolon], &[TokenKind::RBrace]);
                    }
                }
                None => {
                    let code = match content {
                        BlockContent::Keyframes => IssueCode::KeyframeSelectorExpected,
                        BlockContent::Page => IssueCode::PageDirectiveOrDeclarationExpected,
                        BlockContent::Statements | BlockContent::Declarations => IssueCode::RuleOrSelectorExpected,
                    };
                    self.error(node, code);
                    self.skip_statement();
                }
            }
            self.ensure_progress(node, before, IssueCode::RuleOrSelectorExpected);
        }
    }

    fn item(&mut self, content: BlockContent) -> Option<Node> {
        match content {
            BlockContent::Keyframes => {
                if self.peek(TokenKind::AtKeyword) {
                    self.at_statement(true)
                } else {
                    self.keyframe_selector()
                }
            }
            BlockContent::Page if self.peek(TokenKind::AtKeyword) && is_margin_box(self.text()) => {
                Some(self.page_margin_box())
            }
            BlockContent::Page => self.statement(BlockContent::Declarations),
            _ => self.statement(content),
        }
    }

    /// One statement: an at-rule, a variable declaration, a mixin, a rule set or a declaration.
    fn statement(&mut self, content: BlockContent) -> Option<Node> {
        let nested = content != BlockContent::Statements;
        match self.token.kind {
            TokenKind::AtKeyword => return self.at_statement(nested),
            TokenKind::Variable if self.is_scss() => return self.scss_variable_declaration(),
            _ => {}
        }
        if self.is_less() {
            if let Some(mixin) = self.less_mixin_item() {
                return Some(mixin);
            }
        }
        if !nested && !self.dialect.is_superset() {
            return self.rule_set(false);
        }
        if self.at_property_start() {
            if let Some(rule) = self.try_rule_set(nested) {
                return Some(rule);
            }
            if let Some(decl) = self.declaration() {
                return Some(decl);
            }
        }
        self.rule_set(nested)
    }

    /// Body content for an at-rule block at the given nesting.
    fn content_for(nested: bool) -> BlockContent {
        if nested {
            BlockContent::Declarations
        } else {
            BlockContent::Statements
        }
    }

    /// Parse `{ items }` as a `Declarations` child of `node`.
    ///
    /// ## Returns
    /// - `false` if no `{` was found; `LeftCurlyExpected` has been recorded on `node`.
    fn body(&mut self, node: &mut Node, content: BlockContent) -> bool {
        if !self.peek(TokenKind::LBrace) {
            self.error(node, IssueCode::LeftCurlyExpected);
            self.resync(&[], &[TokenKind::LBrace, TokenKind::Semicolon, TokenKind::RBrace]);
            if !self.peek(TokenKind::LBrace) {
                return false;
            }
        }
        match self.nested(|p| p.declarations_block(content)) {
            Some(block) => node.push(block),
            None => {
                self.error(node, IssueCode::RuleOrSelectorExpected);
                self.skip_balanced();
            }
        }
        true
    }

    /// `{ items }` with the current token at `{`.
    fn declarations_block(&mut self, content: BlockContent) -> Node {
        let mut block = self.create(NodeKind::Declarations);
        self.bump();
        self.items(&mut block, content);
        if self.accept(TokenKind::RBrace) {
            return self.finish(block);
        }
        // end of input: the block runs to the end of the text
        self.error(&mut block, IssueCode::RightCurlyExpected);
        let mut block = self.finish(block);
        block.span.end = self.source.len();
        block
    }

    // ========================================================================
    // Rule sets
    // ========================================================================

    /// Parse a rule set only if the selectors are followed by `{` (or a Less guard).
    fn try_rule_set(&mut self, nested: bool) -> Option<Node> {
        self.attempt(|p| {
            let mut node = p.create(NodeKind::RuleSet);
            if !p.selectors_into(&mut node, nested) {
                return None;
            }
            if !(p.peek(TokenKind::LBrace) || p.is_less() && p.peek_ident("when")) {
                return None;
            }
            Some(p.rule_set_rest(node))
        })
    }

    fn rule_set(&mut self, nested: bool) -> Option<Node> {
        let mut node = self.create(NodeKind::RuleSet);
        if !self.selectors_into(&mut node, nested) {
            return None;
        }
        Some(self.rule_set_rest(node))
    }

    /// Guard and body of a rule set whose selectors are already parsed.
    fn rule_set_rest(&mut self, mut node: Node) -> Node {
        if self.is_less() {
            node.push_opt(self.less_guard());
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// Return `true` if the current token can start a property name.
    fn at_property_start(&mut self) -> bool {
        match self.token.kind {
            TokenKind::Ident | TokenKind::InterpolationStart => true,
            TokenKind::Delim('*') => self.next_touching(|k| k == TokenKind::Ident),
            _ => false,
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// `property: value [!important]`, a custom property, or SCSS nested properties.
    fn declaration(&mut self) -> Option<Node> {
        if self.peek(TokenKind::Ident) && self.text().starts_with("--") {
            return Some(self.custom_property_declaration());
        }
        let mut node = self.create(NodeKind::Declaration);
        node.push(self.property()?);
        if !self.accept(TokenKind::Colon) {
            self.error(&mut node, IssueCode::ColonExpected);
            self.resync(&[TokenKind::Colon], &[TokenKind::Semicolon, TokenKind::RBrace]);
            if self.prev_token.kind != TokenKind::Colon {
                return Some(self.finish(node));
            }
        }
        if self.is_scss() && self.peek(TokenKind::LBrace) {
            node.push(self.nested_properties());
            return Some(self.finish(node));
        }
        match self.expression(false) {
            Some(value) => node.push(value),
            None => {
                self.error(&mut node, IssueCode::PropertyValueExpected);
                return Some(self.finish(node));
            }
        }
        node.push_opt(self.prio());
        if self.is_scss() && self.peek(TokenKind::LBrace) {
            node.push(self.nested_properties());
        }
        Some(self.finish(node))
    }

    /// Property name, including the `*` hack prefix and interpolated pieces.
    fn property(&mut self) -> Option<Node> {
        let mark = self.mark();
        let mut node = self.create(NodeKind::Property);
        self.accept_delim('*');
        if !self.ident_parts(&mut node) {
            self.restore(mark);
            return None;
        }
        Some(self.finish(node))
    }

    /// `--name: <any balanced tokens>`
    fn custom_property_declaration(&mut self) -> Node {
        let mut node = self.create(NodeKind::CustomPropertyDeclaration);
        node.push(self.leaf(NodeKind::Property));
        if !self.accept(TokenKind::Colon) {
            self.error(&mut node, IssueCode::ColonExpected);
            self.resync(&[], &[TokenKind::Semicolon, TokenKind::RBrace]);
            return self.finish(node);
        }
        let mut value = self.create(NodeKind::CustomPropertyValue);
        let value_start = value.span.start;
        loop {
            match self.token.kind {
                TokenKind::Semicolon | TokenKind::Eof => break,
                kind if kind.is_closing() => break,
                kind if kind.closing_pair().is_some() => self.skip_balanced(),
                _ => self.bump(),
            }
        }
        if self.prev_token.span.end > value_start {
            value = self.finish(value);
        }
        node.push(value);
        self.finish(node)
    }

    /// `!important`
    fn prio(&mut self) -> Option<Node> {
        if !self.peek(TokenKind::Exclamation) {
            return None;
        }
        let mark = self.mark();
        let node = self.create(NodeKind::Prio);
        self.bump();
        if self.accept_ident("important") {
            Some(self.finish(node))
        } else {
            self.restore(mark);
            None
        }
    }

    /// `font: { family: x; size: y; }` (SCSS)
    fn nested_properties(&mut self) -> Node {
        let mut node = self.create(NodeKind::NestedProperties);
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }
}

/// Kinds that end with their own `{ ... }` body and need no `;` after it.
fn ends_with_block(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::RuleSet
            | NodeKind::Media
            | NodeKind::Supports
            | NodeKind::FontFace
            | NodeKind::Keyframe
            | NodeKind::KeyframeSelector
            | NodeKind::Page
            | NodeKind::PageBoxMarginBox
            | NodeKind::PropertyAtRule
            | NodeKind::Container
            | NodeKind::MixinDeclaration
            | NodeKind::FunctionDeclaration
            | NodeKind::IfStatement
            | NodeKind::ElseStatement
            | NodeKind::ForStatement
            | NodeKind::EachStatement
            | NodeKind::WhileStatement
            | NodeKind::AtRoot
    )
}
