/// At-rule dispatch and the CSS at-rules.
impl<'a> Parser<'a> {
    /// Parse the at-rule (or Less variable statement) at the current at-keyword.
    fn at_statement(&mut self, nested: bool) -> Option<Node> {
        if self.is_less() {
            let next = self.lookahead();
            if next.kind == TokenKind::Colon {
                return Some(self.less_variable_declaration());
            }
            if next.kind == TokenKind::LParen && self.token.touches(&next) {
                return Some(self.detached_ruleset_reference());
            }
        }
        let name = self.text().trim_start_matches('@');
        let content = Self::content_for(nested);
        let node = match at_rules::from_str_in(name, self.dialect) {
            Some(AtRuleId::Charset) => self.charset(),
            Some(AtRuleId::Import) => self.import(),
            Some(AtRuleId::Namespace) => self.namespace(),
            Some(AtRuleId::Media) => self.media(content),
            Some(AtRuleId::Supports) => self.supports(content),
            Some(AtRuleId::FontFace) => self.font_face(),
            Some(AtRuleId::Keyframes) => self.keyframes(),
            Some(AtRuleId::Page) => self.page(),
            Some(AtRuleId::Layer) => self.layer(content),
            Some(AtRuleId::Property) => self.property_at_rule(),
            Some(AtRuleId::Container) => self.container(content),
            Some(AtRuleId::Use) => self.use_rule(),
            Some(AtRuleId::Forward) => self.forward_rule(),
            Some(AtRuleId::Mixin) => self.mixin_declaration(),
            Some(AtRuleId::Include) => self.include(),
            Some(AtRuleId::Content) => self.content_reference(),
            Some(AtRuleId::Function) => self.function_declaration(),
            Some(AtRuleId::Return) => self.return_statement(),
            Some(AtRuleId::Extend) => self.extend(),
            Some(AtRuleId::AtRoot) => self.at_root(),
            Some(AtRuleId::If) => self.if_statement(),
            Some(AtRuleId::Else) => self.else_chain()?,
            Some(AtRuleId::Each) => self.each_statement(),
            Some(AtRuleId::For) => self.for_statement(),
            Some(AtRuleId::While) => self.while_statement(),
            Some(AtRuleId::Debug | AtRuleId::Warn | AtRuleId::Error) => self.debug_statement(),
            Some(AtRuleId::Plugin) => self.plugin(),
            None => self.unknown_at_rule(content),
        };
        Some(node)
    }

    /// `@charset "utf-8";`
    fn charset(&mut self) -> Node {
        let mut node = self.create(NodeKind::Charset);
        self.bump();
        if self.peek(TokenKind::String) {
            node.push(self.leaf(NodeKind::StringLiteral));
        } else {
            self.error(&mut node, IssueCode::StringLiteralExpected);
        }
        self.finish(node)
    }

    /// `@import url [layer(...)] [supports(...)] [media queries];`
    fn import(&mut self) -> Node {
        let mut node = self.create(NodeKind::Import);
        self.bump();
        if self.is_less() && self.peek(TokenKind::LParen) {
            node.push(self.import_options());
        }
        loop {
            match self.import_target() {
                Some(target) => node.push(target),
                None => {
                    self.error(&mut node, IssueCode::UriOrStringExpected);
                    return self.finish(node);
                }
            }
            if !(self.is_scss() && self.accept(TokenKind::Comma)) {
                break;
            }
        }
        if self.peek_ident("layer") {
            let layer = self.ident_term();
            node.push(layer);
        }
        if self.peek_ident("supports") && self.next_touching(|k| k == TokenKind::LParen) {
            node.push(self.import_supports());
        }
        if !matches!(self.token.kind, TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof) {
            self.media_query_list(&mut node);
        }
        self.finish(node)
    }

    fn import_target(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::String | TokenKind::BadString => Some(self.leaf(NodeKind::StringLiteral)),
            TokenKind::Url => Some(self.leaf(NodeKind::URILiteral)),
            TokenKind::Ident if self.peek_ident("url") && self.next_touching(|k| k == TokenKind::LParen) => {
                Some(self.uri_literal())
            }
            TokenKind::AtKeyword if self.is_less() => Some(self.leaf(NodeKind::Variable)),
            _ => None,
        }
    }

    /// `supports(display: grid)` inside `@import`.
    fn import_supports(&mut self) -> Node {
        let mut node = self.create(NodeKind::SupportsCondition);
        self.bump();
        self.bump();
        if let Some(decl) = self.attempt(|p| p.declaration().filter(|_| p.peek(TokenKind::RParen))) {
            node.push(decl);
        } else if !node.push_opt(self.supports_condition()) {
            self.error(&mut node, IssueCode::ConditionExpected);
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// `@namespace [prefix] url;`
    fn namespace(&mut self) -> Node {
        let mut node = self.create(NodeKind::Namespace);
        self.bump();
        if self.peek(TokenKind::Ident) && !(self.peek_ident("url") && self.next_touching(|k| k == TokenKind::LParen)) {
            node.push(self.leaf(NodeKind::Identifier));
        }
        if !node.push_opt(self.import_target()) {
            self.error(&mut node, IssueCode::UriOrStringExpected);
        }
        self.finish(node)
    }

    // ========================================================================
    // @media
    // ========================================================================

    fn media(&mut self, content: BlockContent) -> Node {
        let mut node = self.create(NodeKind::Media);
        self.bump();
        self.media_query_list(&mut node);
        self.body(&mut node, content);
        self.finish(node)
    }

    fn media_query_list(&mut self, node: &mut Node) {
        match self.media_query() {
            Some(query) => node.push(query),
            None => {
                self.error(node, IssueCode::MediaQueryExpected);
                return;
            }
        }
        while self.accept(TokenKind::Comma) {
            match self.media_query() {
                Some(query) => node.push(query),
                None => {
                    self.error(node, IssueCode::MediaQueryExpected);
                    return;
                }
            }
        }
    }

    /// `[not|only] type [and (feature)]*` or a bare condition.
    fn media_query(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::MediaQuery);
        let condition_only = self.peek(TokenKind::LParen)
            || self.peek_ident("not") && self.lookahead().kind == TokenKind::LParen;
        if condition_only {
            node.push(self.media_condition()?);
            return Some(self.finish(node));
        }
        let has_modifier = self.accept_ident("not") || self.accept_ident("only");
        let media_type = match self.token.kind {
            TokenKind::Ident | TokenKind::InterpolationStart => {
                let mut ident = self.create(NodeKind::Identifier);
                self.ident_parts(&mut ident);
                Some(self.finish(ident))
            }
            TokenKind::Variable if self.is_scss() => self.term(),
            TokenKind::AtKeyword if self.is_less() => self.term(),
            _ => None,
        };
        match media_type {
            Some(media_type) => node.push(media_type),
            None if has_modifier => self.error(&mut node, IssueCode::IdentifierExpected),
            None => return None,
        }
        while self.accept_ident("and") {
            match self.media_in_parens() {
                Some(feature) => node.push(feature),
                None => {
                    self.error(&mut node, IssueCode::ConditionExpected);
                    break;
                }
            }
        }
        Some(self.finish(node))
    }

    /// `not (a)` or `(a) [and|or (b)]*`
    fn media_condition(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::MediaCondition);
        if self.accept_ident("not") {
            if !node.push_opt(self.media_in_parens()) {
                self.error(&mut node, IssueCode::ConditionExpected);
            }
            return Some(self.finish(node));
        }
        node.push(self.media_in_parens()?);
        while self.peek_ident("and") || self.peek_ident("or") {
            self.bump();
            if !node.push_opt(self.media_in_parens()) {
                self.error(&mut node, IssueCode::ConditionExpected);
                break;
            }
        }
        Some(self.finish(node))
    }

    /// `(feature)`, `(feature: value)`, `(400px <= width < 700px)`, a nested condition, or a variable.
    fn media_in_parens(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::LParen => {}
            TokenKind::InterpolationStart | TokenKind::Variable | TokenKind::AtKeyword => return self.term(),
            TokenKind::Ident if self.next_touching(|k| k == TokenKind::LParen) => return Some(self.query_function()),
            _ => return None,
        }
        self.nested(|p| p.media_parens_body()).or_else(|| {
            let mut node = self.create(NodeKind::MediaCondition);
            self.error(&mut node, IssueCode::ConditionExpected);
            self.skip_balanced();
            Some(self.finish(node))
        })
    }

    fn media_parens_body(&mut self) -> Node {
        let next = self.lookahead();
        let inner_condition =
            next.kind == TokenKind::LParen || next.kind == TokenKind::Ident && next.text(self.source).eq_ignore_ascii_case("not");
        if inner_condition {
            let mut node = self.create(NodeKind::MediaCondition);
            self.bump();
            if !node.push_opt(self.media_condition()) {
                self.error(&mut node, IssueCode::ConditionExpected);
            }
            self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
            return self.finish(node);
        }
        let mut node = self.create(NodeKind::MediaFeature);
        self.bump();
        match self.binary_expression() {
            Some(name) => node.push(name),
            None => self.error(&mut node, IssueCode::IdentifierExpected),
        }
        if self.accept(TokenKind::Colon) {
            if !node.push_opt(self.expression(true)) {
                self.error(&mut node, IssueCode::TermExpected);
            }
        } else {
            while self.at_range_operator() {
                node.push(self.leaf(NodeKind::Operator));
                if !node.push_opt(self.binary_expression()) {
                    self.error(&mut node, IssueCode::TermExpected);
                    break;
                }
            }
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    fn at_range_operator(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Delim('<') | TokenKind::Delim('>') | TokenKind::Delim('=') | TokenKind::LtEq | TokenKind::GtEq
        )
    }

    /// `style(--x: 1)`, `selector(a > b)` and other functional conditions.
    fn query_function(&mut self) -> Node {
        let mut node = self.create(NodeKind::Function);
        let is_selector = self.peek_ident("selector");
        node.push(self.leaf(NodeKind::Identifier));
        self.bump();
        let parsed = self.nested(|p| {
            if is_selector {
                p.selectors_into(&mut node, true);
            } else if let Some(decl) = p.attempt(|p| p.declaration().filter(|_| p.peek(TokenKind::RParen))) {
                node.push(decl);
            } else {
                node.push_opt(p.expression(false));
            }
        });
        if parsed.is_none() {
            self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    // ========================================================================
    // @supports
    // ========================================================================

    fn supports(&mut self, content: BlockContent) -> Node {
        let mut node = self.create(NodeKind::Supports);
        self.bump();
        if !node.push_opt(self.supports_condition()) {
            self.error(&mut node, IssueCode::ConditionExpected);
        }
        self.body(&mut node, content);
        self.finish(node)
    }

    /// `not (a)` or `(a) [and|or (b)]*`
    fn supports_condition(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::SupportsCondition);
        if self.accept_ident("not") {
            if !node.push_opt(self.supports_in_parens()) {
                self.error(&mut node, IssueCode::ConditionExpected);
            }
            return Some(self.finish(node));
        }
        node.push(self.supports_in_parens()?);
        while self.peek_ident("and") || self.peek_ident("or") {
            self.bump();
            if !node.push_opt(self.supports_in_parens()) {
                self.error(&mut node, IssueCode::ConditionExpected);
                break;
            }
        }
        Some(self.finish(node))
    }

    /// `(decl)`, `(condition)`, `selector(...)` or an interpolation.
    fn supports_in_parens(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::LParen => {}
            TokenKind::InterpolationStart | TokenKind::Variable | TokenKind::AtKeyword => return self.term(),
            TokenKind::Ident if self.next_touching(|k| k == TokenKind::LParen) => return Some(self.query_function()),
            _ => return None,
        }
        let mut node = self.create(NodeKind::SupportsCondition);
        self.bump();
        let inner = self.nested(|p| {
            p.attempt(|p| p.declaration().filter(|_| p.peek(TokenKind::RParen)))
                .or_else(|| p.supports_condition())
        });
        match inner {
            Some(Some(inner)) => node.push(inner),
            Some(None) => self.error(&mut node, IssueCode::ConditionExpected),
            None => {
                self.error(&mut node, IssueCode::ConditionExpected);
                self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
            }
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        Some(self.finish(node))
    }

    // ========================================================================
    // Other CSS at-rules
    // ========================================================================

    fn font_face(&mut self) -> Node {
        let mut node = self.create(NodeKind::FontFace);
        self.bump();
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@keyframes name { from { } 50% { } to { } }`
    fn keyframes(&mut self) -> Node {
        let mut node = self.create(NodeKind::Keyframe);
        self.bump();
        let name = match self.token.kind {
            TokenKind::Ident | TokenKind::InterpolationStart => {
                let mut ident = self.create(NodeKind::Identifier);
                self.ident_parts(&mut ident);
                Some(self.finish(ident))
            }
            TokenKind::String => Some(self.leaf(NodeKind::StringLiteral)),
            TokenKind::Variable if self.is_scss() => Some(self.leaf(NodeKind::Variable)),
            TokenKind::AtKeyword if self.is_less() => Some(self.leaf(NodeKind::Variable)),
            _ => None,
        };
        if !node.push_opt(name) {
            self.error(&mut node, IssueCode::IdentifierExpected);
        }
        self.body(&mut node, BlockContent::Keyframes);
        self.finish(node)
    }

    /// `from, 50% { ... }`
    fn keyframe_selector(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::KeyframeSelector);
        loop {
            let selector = match self.token.kind {
                TokenKind::Ident | TokenKind::Percentage => Some(self.leaf(NodeKind::Identifier)),
                TokenKind::InterpolationStart | TokenKind::Variable | TokenKind::AtKeyword => self.term(),
                _ => None,
            };
            match selector {
                Some(selector) => node.push(selector),
                None if node.children.is_empty() => return None,
                None => {
                    self.error(&mut node, IssueCode::KeyframeSelectorExpected);
                    break;
                }
            }
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        self.body(&mut node, BlockContent::Declarations);
        Some(self.finish(node))
    }

    /// `@page [name][:pseudo] { ... }`
    fn page(&mut self) -> Node {
        let mut node = self.create(NodeKind::Page);
        self.bump();
        loop {
            if self.peek(TokenKind::Ident) {
                node.push(self.leaf(NodeKind::Identifier));
            }
            while self.peek(TokenKind::Colon) {
                match self.pseudo_selector() {
                    Some(pseudo) => node.push(pseudo),
                    None => break,
                }
            }
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        self.body(&mut node, BlockContent::Page);
        self.finish(node)
    }

    /// `@top-left { ... }` inside `@page`.
    fn page_margin_box(&mut self) -> Node {
        let mut node = self.create(NodeKind::PageBoxMarginBox);
        self.bump();
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@layer a, b.c;` or `@layer [name] { ... }`
    fn layer(&mut self, content: BlockContent) -> Node {
        let mut node = self.create(NodeKind::Layer);
        self.bump();
        while self.peek(TokenKind::Ident) {
            let name = self.create(NodeKind::Identifier);
            self.bump();
            while self.peek_delim('.') && !self.has_whitespace() && self.next_touching(|k| k == TokenKind::Ident) {
                self.bump();
                self.bump();
            }
            node.push(self.finish(name));
            if !self.accept(TokenKind::Comma) {
                break;
            }
            if !self.peek(TokenKind::Ident) {
                self.error(&mut node, IssueCode::IdentifierExpected);
            }
        }
        if self.peek(TokenKind::LBrace) {
            self.body(&mut node, content);
        }
        self.finish(node)
    }

    /// `@property --name { ... }`
    fn property_at_rule(&mut self) -> Node {
        let mut node = self.create(NodeKind::PropertyAtRule);
        self.bump();
        if self.peek(TokenKind::Ident) {
            node.push(self.leaf(NodeKind::Identifier));
        } else {
            self.error(&mut node, IssueCode::IdentifierExpected);
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@container [name] condition { ... }`
    fn container(&mut self, content: BlockContent) -> Node {
        let mut node = self.create(NodeKind::Container);
        self.bump();
        let is_name = self.peek(TokenKind::Ident)
            && !self.peek_ident("not")
            && !self.next_touching(|k| k == TokenKind::LParen);
        if is_name {
            node.push(self.leaf(NodeKind::Identifier));
        }
        if !node.push_opt(self.media_condition()) && !self.peek(TokenKind::LBrace) {
            self.error(&mut node, IssueCode::ConditionExpected);
        }
        self.body(&mut node, content);
        self.finish(node)
    }

    /// Any at-rule without a dedicated production: its prelude is kept as raw tokens.
    fn unknown_at_rule(&mut self, content: BlockContent) -> Node {
        let mut node = self.create(NodeKind::UnknownAtRule);
        node.push(self.leaf(NodeKind::Identifier));
        let mut value = self.create(NodeKind::UnknownAtRuleValue);
        let mut consumed = false;
        loop {
            match self.token.kind {
                TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace | TokenKind::Eof => break,
                kind if kind.closing_pair().is_some() => self.skip_balanced(),
                _ => self.bump(),
            }
            consumed = true;
        }
        if consumed {
            value = self.finish(value);
            node.push(value);
        }
        if self.peek(TokenKind::LBrace) {
            self.body(&mut node, content);
        }
        self.finish(node)
    }
}

/// Return `true` for the `@page` margin box at-keywords (`@top-left`, `@bottom-center`, ...).
fn is_margin_box(at_keyword: &str) -> bool {
    const MARGIN_BOXES: &[&str] = &[
        "top-left-corner",
        "top-left",
        "top-center",
        "top-right",
        "top-right-corner",
        "bottom-left-corner",
        "bottom-left",
        "bottom-center",
        "bottom-right",
        "bottom-right-corner",
        "left-top",
        "left-middle",
        "left-bottom",
        "right-top",
        "right-middle",
        "right-bottom",
    ];
    let name = at_keyword.trim_start_matches('@');
    MARGIN_BOXES.iter().any(|b| b.eq_ignore_ascii_case(name))
}
