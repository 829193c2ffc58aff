/// Less statements: `@var:` declarations, detached rulesets, mixins and guards.
impl<'a> Parser<'a> {
    /// `@name: value` or `@name: { ... }`
    fn less_variable_declaration(&mut self) -> Node {
        let mut node = self.create(NodeKind::VariableDeclaration);
        node.push(self.leaf(NodeKind::VariableName));
        self.bump();
        if self.peek(TokenKind::LBrace) {
            let mut ruleset = self.create(NodeKind::DetachedRuleset);
            self.body(&mut ruleset, BlockContent::Declarations);
            node.push(self.finish(ruleset));
            return self.finish(node);
        }
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::VariableValueExpected);
        }
        node.push_opt(self.prio());
        self.finish(node)
    }

    /// `@detached();`
    fn detached_ruleset_reference(&mut self) -> Node {
        let mut node = self.create(NodeKind::DetachedRulesetReference);
        node.push(self.leaf(NodeKind::Variable));
        self.bump();
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// `(reference, optional)` after `@import`.
    fn import_options(&mut self) -> Node {
        let mut node = self.create(NodeKind::ImportOptions);
        self.bump();
        while self.peek(TokenKind::Ident) {
            node.push(self.leaf(NodeKind::Identifier));
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// `@plugin "name";`
    fn plugin(&mut self) -> Node {
        let mut node = self.create(NodeKind::Plugin);
        self.bump();
        if !node.push_opt(self.import_target()) {
            self.error(&mut node, IssueCode::UriOrStringExpected);
        }
        self.finish(node)
    }

    // ========================================================================
    // Mixins
    // ========================================================================

    /// A mixin definition or call starting with `.` or `#`; `None` (nothing consumed) if it is a rule set.
    fn less_mixin_item(&mut self) -> Option<Node> {
        if !(self.peek_delim('.') || self.peek(TokenKind::Hash)) {
            return None;
        }
        self.attempt(|p| p.less_mixin_declaration())
            .or_else(|| self.attempt(|p| p.less_mixin_reference()))
    }

    /// `.name(params) [when guard] { ... }`
    fn less_mixin_declaration(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::MixinDeclaration);
        node.push(self.less_mixin_name()?);
        if !self.peek(TokenKind::LParen) {
            return None;
        }
        self.bump();
        while !self.peek(TokenKind::RParen) {
            node.push(self.function_parameter()?);
            if !(self.accept(TokenKind::Comma) || self.accept(TokenKind::Semicolon)) {
                break;
            }
        }
        if !self.accept(TokenKind::RParen) {
            return None;
        }
        node.push_opt(self.less_guard());
        if !self.peek(TokenKind::LBrace) {
            return None;
        }
        self.body(&mut node, BlockContent::Declarations);
        Some(self.finish(node))
    }

    /// `.name;`, `.name(args) [!important];`, `#ns > .name();`, `#ns.name();`
    fn less_mixin_reference(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::MixinReference);
        node.push(self.less_mixin_name()?);
        loop {
            let is_child = self.peek_delim('>');
            if is_child {
                self.bump();
            } else if self.has_whitespace() {
                break;
            }
            match self.less_mixin_name() {
                Some(name) => node.push(name),
                None if is_child => return None,
                None => break,
            }
        }
        if self.peek(TokenKind::LParen) {
            self.bump();
            if self.nested(|p| p.arguments(&mut node)).is_none() {
                return None;
            }
            self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        }
        node.push_opt(self.prio());
        if !matches!(self.token.kind, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof) {
            return None;
        }
        Some(self.finish(node))
    }

    /// `.name` or `#name` as an `Identifier`.
    fn less_mixin_name(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::Identifier);
        if self.peek(TokenKind::Hash) {
            self.bump();
        } else if self.peek_delim('.') && self.next_touching(|k| matches!(k, TokenKind::Ident | TokenKind::InterpolationStart)) {
            self.bump();
            self.ident_parts(&mut node);
        } else {
            return None;
        }
        Some(self.finish(node))
    }

    /// `when (cond) [and|, (cond)]*`
    fn less_guard(&mut self) -> Option<Node> {
        if !self.peek_ident("when") {
            return None;
        }
        let mut node = self.create(NodeKind::LessGuard);
        self.bump();
        loop {
            let mut condition = self.create(NodeKind::GuardCondition);
            self.accept_ident("not");
            if self.accept(TokenKind::LParen) {
                if !condition.push_opt(self.nested(|p| p.expression(false)).flatten()) {
                    self.error(&mut condition, IssueCode::ExpressionExpected);
                }
                self.expect_closing(&mut condition, TokenKind::RParen, IssueCode::RightParenthesisExpected);
            } else {
                self.error(&mut condition, IssueCode::LeftParenthesisExpected);
            }
            node.push(self.finish(condition));
            let joined = self.accept(TokenKind::Comma) || self.accept_ident("and") || self.accept_ident("or");
            if !joined {
                break;
            }
        }
        Some(self.finish(node))
    }
}
