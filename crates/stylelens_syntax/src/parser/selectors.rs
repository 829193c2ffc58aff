/// Selector lists, compound selectors and their parts.
impl<'a> Parser<'a> {
    /// Comma-separated selectors pushed onto `node`.
    ///
    /// ## Returns
    /// - `false` (consuming nothing) if no selector starts here.
    fn selectors_into(&mut self, node: &mut Node, nested: bool) -> bool {
        let Some(first) = self.selector(nested) else {
            return false;
        };
        node.push(first);
        while self.accept(TokenKind::Comma) {
            match self.selector(nested) {
                Some(selector) => node.push(selector),
                None => {
                    self.error(node, IssueCode::SelectorExpected);
                    break;
                }
            }
        }
        true
    }

    /// Compound selectors joined by combinators. Whitespace between them is the descendant combinator.
    fn selector(&mut self, nested: bool) -> Option<Node> {
        let mut node = self.create(NodeKind::Selector);
        let mut has_content = false;
        if nested {
            has_content = node.push_opt(self.combinator());
        }
        while let Some(simple) = self.simple_selector() {
            node.push(simple);
            has_content = true;
            node.push_opt(self.combinator());
        }
        has_content.then(|| self.finish(node))
    }

    /// `>`, `+`, `~`, and the deprecated `>>>`.
    fn combinator(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::Delim('>') => {
                let node = self.create(NodeKind::SelectorCombinator);
                self.bump();
                while self.peek_delim('>') && !self.has_whitespace() {
                    self.bump();
                }
                Some(self.finish(node))
            }
            TokenKind::Delim('+') | TokenKind::Delim('~') => Some(self.leaf(NodeKind::SelectorCombinator)),
            _ => None,
        }
    }

    /// Touching selector parts: `a.b#c[d]:e`.
    fn simple_selector(&mut self) -> Option<Node> {
        if self.is_less() && self.peek_ident("when") {
            return None;
        }
        let mut node = self.create(NodeKind::SimpleSelector);
        let mut has_content = false;
        loop {
            if has_content && self.has_whitespace() {
                break;
            }
            let part = match self.token.kind {
                TokenKind::Delim('&') => Some(self.nesting_selector()),
                TokenKind::Ident | TokenKind::Delim('*') | TokenKind::Delim('|') => self.element_name(),
                TokenKind::Delim('.') => self.class_selector(),
                TokenKind::Hash => Some(self.id_selector()),
                TokenKind::LBracket => Some(self.attribute_selector()),
                TokenKind::Colon => self.pseudo_selector(),
                TokenKind::Delim('%') if self.is_scss() => self.placeholder_selector(),
                TokenKind::InterpolationStart => self.selector_interpolation(),
                _ => None,
            };
            match part {
                Some(part) => {
                    node.push(part);
                    has_content = true;
                }
                None => break,
            }
        }
        has_content.then(|| self.finish(node))
    }

    /// `&`, optionally followed by a suffix (`&-item`, `&__el`).
    fn nesting_selector(&mut self) -> Node {
        let mut node = self.create(NodeKind::NestingSelector);
        self.bump();
        if !self.has_whitespace() && self.peek(TokenKind::Ident) {
            self.bump();
            self.ident_continuation(&mut node);
        } else if !self.has_whitespace() && self.peek(TokenKind::InterpolationStart) {
            self.ident_continuation(&mut node);
        }
        self.finish(node)
    }

    /// `div`, `*`, `ns|div`, `*|*`, `|div`
    fn element_name(&mut self) -> Option<Node> {
        let mark = self.mark();
        let mut node = self.create(NodeKind::ElementNameSelector);
        let has_name = match self.token.kind {
            TokenKind::Delim('*') => {
                self.bump();
                true
            }
            TokenKind::Ident => self.ident_parts(&mut node),
            _ => false,
        };
        if self.peek_delim('|') && (!has_name || !self.has_whitespace()) {
            if self.next_touching(|k| k == TokenKind::Ident || k.is_delim('*')) {
                self.bump();
                self.bump();
            } else if !has_name {
                self.restore(mark);
                return None;
            }
        }
        Some(self.finish(node))
    }

    /// `.name`
    fn class_selector(&mut self) -> Option<Node> {
        if !self.next_touching(|k| matches!(k, TokenKind::Ident | TokenKind::InterpolationStart)) {
            return None;
        }
        let mut node = self.create(NodeKind::ClassSelector);
        self.bump();
        self.ident_parts(&mut node);
        Some(self.finish(node))
    }

    /// `#name`
    fn id_selector(&mut self) -> Node {
        let mut node = self.create(NodeKind::IdSelector);
        self.bump();
        self.ident_continuation(&mut node);
        self.finish(node)
    }

    /// `%name` (SCSS)
    fn placeholder_selector(&mut self) -> Option<Node> {
        if !self.next_touching(|k| matches!(k, TokenKind::Ident | TokenKind::InterpolationStart)) {
            return None;
        }
        let mut node = self.create(NodeKind::SelectorPlaceholder);
        self.bump();
        self.ident_parts(&mut node);
        Some(self.finish(node))
    }

    /// An interpolation standing for a whole selector part.
    fn selector_interpolation(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::SelectorInterpolation);
        if !self.ident_parts(&mut node) {
            return None;
        }
        Some(self.finish(node))
    }

    /// `[name]`, `[ns|name op value flag]`
    fn attribute_selector(&mut self) -> Node {
        let mut node = self.create(NodeKind::AttributeSelector);
        self.bump();
        if self.peek_delim('*') || self.peek_delim('|') {
            // namespace prefix
            if self.accept_delim('*') {
                self.accept_delim('|');
            } else {
                self.bump();
            }
        }
        let mut name = self.create(NodeKind::Identifier);
        if self.ident_parts(&mut name) {
            if self.peek_delim('|') && self.next_touching(|k| k == TokenKind::Ident) {
                self.bump();
                self.bump();
            }
            node.push(self.finish(name));
        } else {
            self.error(&mut node, IssueCode::IdentifierExpected);
        }
        let is_operator = matches!(
            self.token.kind,
            TokenKind::Delim('=')
                | TokenKind::Includes
                | TokenKind::DashMatch
                | TokenKind::PrefixMatch
                | TokenKind::SuffixMatch
                | TokenKind::SubstringMatch
        );
        if is_operator {
            node.push(self.leaf(NodeKind::Operator));
            let value = match self.token.kind {
                TokenKind::Ident | TokenKind::InterpolationStart => {
                    let mut ident = self.create(NodeKind::Identifier);
                    self.ident_parts(&mut ident);
                    Some(self.finish(ident))
                }
                TokenKind::String | TokenKind::BadString => Some(self.leaf(NodeKind::StringLiteral)),
                TokenKind::Number | TokenKind::Dimension => Some(self.leaf(NodeKind::NumericValue)),
                TokenKind::Variable if self.is_scss() => Some(self.leaf(NodeKind::Variable)),
                TokenKind::AtKeyword if self.is_less() => Some(self.leaf(NodeKind::Variable)),
                _ => None,
            };
            if !node.push_opt(value) {
                self.error(&mut node, IssueCode::TermExpected);
            }
            if self.peek(TokenKind::Ident) {
                // case-sensitivity flag: `i` or `s`
                node.push(self.leaf(NodeKind::Identifier));
            }
        }
        if !self.accept(TokenKind::RBracket) {
            self.error(&mut node, IssueCode::RightSquareBracketExpected);
            self.resync(
                &[TokenKind::RBracket],
                &[TokenKind::LBrace, TokenKind::RBrace, TokenKind::Semicolon],
            );
        }
        self.finish(node)
    }

    /// `:name`, `::name`, `:name(args)`
    fn pseudo_selector(&mut self) -> Option<Node> {
        let mark = self.mark();
        let mut node = self.create(NodeKind::PseudoSelector);
        self.bump();
        if self.peek(TokenKind::Colon) && !self.has_whitespace() {
            self.bump();
        }
        if self.has_whitespace() || !self.ident_parts(&mut node) {
            self.restore(mark);
            return None;
        }
        if self.peek(TokenKind::LParen) && !self.has_whitespace() {
            self.bump();
            if self.nested(|p| p.pseudo_arguments(&mut node)).is_none() {
                self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
            }
            self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        }
        Some(self.finish(node))
    }

    /// Arguments of a functional pseudo-class: a selector list (`:not(.a, .b)`), an expression (`:nth-child(2n + 1)`),
    /// or anything balanced.
    fn pseudo_arguments(&mut self, node: &mut Node) {
        let mark = self.mark();
        let mut selectors = Vec::new();
        if let Some(first) = self.selector(true) {
            selectors.push(first);
            while self.accept(TokenKind::Comma) {
                match self.selector(true) {
                    Some(selector) => selectors.push(selector),
                    None => break,
                }
            }
        }
        if !selectors.is_empty() && self.peek(TokenKind::RParen) {
            for selector in selectors {
                node.push(selector);
            }
            return;
        }
        self.restore(mark);
        node.push_opt(self.expression(false));
        loop {
            match self.token.kind {
                TokenKind::RParen
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Semicolon
                | TokenKind::Eof => return,
                kind if kind.closing_pair().is_some() => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }
}
