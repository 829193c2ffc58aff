/// SCSS statements: variables, modules, mixins, functions and control flow.
impl<'a> Parser<'a> {
    /// `$name: value [!default] [!global]`
    fn scss_variable_declaration(&mut self) -> Option<Node> {
        if self.lookahead().kind != TokenKind::Colon {
            return None;
        }
        let mut node = self.create(NodeKind::VariableDeclaration);
        node.push(self.leaf(NodeKind::VariableName));
        self.bump();
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::VariableValueExpected);
        }
        self.flags(&mut node, &["default", "global"]);
        Some(self.finish(node))
    }

    /// `!name` flags from `allowed`, each pushed as a `Flag` child.
    fn flags(&mut self, node: &mut Node, allowed: &[&str]) {
        while self.peek(TokenKind::Exclamation) {
            let mark = self.mark();
            let flag = self.create(NodeKind::Flag);
            self.bump();
            if !allowed.iter().any(|name| self.peek_ident(name)) {
                self.restore(mark);
                return;
            }
            self.bump();
            node.push(self.finish(flag));
        }
    }

    // ========================================================================
    // Modules
    // ========================================================================

    /// `@use "url" [as ns|*] [with (...)]`
    fn use_rule(&mut self) -> Node {
        let mut node = self.create(NodeKind::Use);
        self.bump();
        if !self.peek(TokenKind::String) {
            self.error(&mut node, IssueCode::StringLiteralExpected);
            return self.finish(node);
        }
        node.push(self.leaf(NodeKind::StringLiteral));
        if self.accept_ident("as") {
            if self.peek(TokenKind::Ident) || self.peek_delim('*') {
                node.push(self.leaf(NodeKind::Identifier));
            } else {
                self.error(&mut node, IssueCode::IdentifierExpected);
            }
        }
        if self.accept_ident("with") {
            node.push(self.module_configuration());
        }
        self.finish(node)
    }

    /// `@forward "url" [as prefix-*] [show|hide members] [with (...)]`
    fn forward_rule(&mut self) -> Node {
        let mut node = self.create(NodeKind::Forward);
        self.bump();
        if !self.peek(TokenKind::String) {
            self.error(&mut node, IssueCode::StringLiteralExpected);
            return self.finish(node);
        }
        node.push(self.leaf(NodeKind::StringLiteral));
        if self.accept_ident("as") {
            if self.peek(TokenKind::Ident) {
                let prefix = self.create(NodeKind::Identifier);
                self.bump();
                if !self.has_whitespace() {
                    self.accept_delim('*');
                }
                node.push(self.finish(prefix));
            } else {
                self.error(&mut node, IssueCode::IdentifierExpected);
            }
        }
        if self.peek_ident("show") || self.peek_ident("hide") {
            let mut visibility = self.create(NodeKind::ForwardVisibility);
            self.bump();
            loop {
                match self.token.kind {
                    TokenKind::Ident => visibility.push(self.leaf(NodeKind::Identifier)),
                    TokenKind::Variable => visibility.push(self.leaf(NodeKind::Variable)),
                    _ => {
                        self.error(&mut visibility, IssueCode::IdentifierExpected);
                        break;
                    }
                }
                if !self.accept(TokenKind::Comma) {
                    break;
                }
            }
            node.push(self.finish(visibility));
        }
        if self.accept_ident("with") {
            node.push(self.module_configuration());
        }
        self.finish(node)
    }

    /// `($a: 1, $b: 2 !default)`
    fn module_configuration(&mut self) -> Node {
        let mut node = self.create(NodeKind::ModuleConfiguration);
        if !self.accept(TokenKind::LParen) {
            self.error(&mut node, IssueCode::LeftParenthesisExpected);
            return self.finish(node);
        }
        while self.peek(TokenKind::Variable) {
            let mut entry = self.create(NodeKind::ListEntry);
            entry.push(self.leaf(NodeKind::VariableName));
            if self.accept(TokenKind::Colon) {
                if !entry.push_opt(self.expression(true)) {
                    self.error(&mut entry, IssueCode::VariableValueExpected);
                }
                self.flags(&mut entry, &["default"]);
            } else {
                self.error(&mut entry, IssueCode::ColonExpected);
            }
            node.push(self.finish(entry));
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    // ========================================================================
    // Mixins and functions
    // ========================================================================

    /// `@mixin name[(params)] { ... }`
    fn mixin_declaration(&mut self) -> Node {
        let mut node = self.create(NodeKind::MixinDeclaration);
        self.bump();
        if !self.definition_name(&mut node) {
            self.error(&mut node, IssueCode::IdentifierExpected);
        }
        if self.peek(TokenKind::LParen) {
            self.parameters(&mut node);
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@function name(params) { ... }`
    fn function_declaration(&mut self) -> Node {
        let mut node = self.create(NodeKind::FunctionDeclaration);
        self.bump();
        if !self.definition_name(&mut node) {
            self.error(&mut node, IssueCode::IdentifierExpected);
        }
        if self.peek(TokenKind::LParen) {
            self.parameters(&mut node);
        } else {
            self.error(&mut node, IssueCode::LeftParenthesisExpected);
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// Name of a mixin or function definition, pushed as an `Identifier`.
    fn definition_name(&mut self, node: &mut Node) -> bool {
        let mut name = self.create(NodeKind::Identifier);
        if !self.ident_parts(&mut name) {
            return false;
        }
        node.push(self.finish(name));
        true
    }

    /// `($a, $b: default, $rest...)` pushed as `FunctionParameter` children of `node`.
    fn parameters(&mut self, node: &mut Node) {
        self.bump();
        while !self.peek(TokenKind::RParen) {
            match self.function_parameter() {
                Some(param) => node.push(param),
                None => {
                    self.error(node, IssueCode::VariableNameExpected);
                    self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
                    break;
                }
            }
            let separated = self.accept(TokenKind::Comma) || self.is_less() && self.accept(TokenKind::Semicolon);
            if !separated {
                break;
            }
        }
        self.expect_closing(node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
    }

    /// `$name`, `$name: default`, `$name...`; in Less also `@name` and literal patterns.
    fn function_parameter(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::FunctionParameter);
        let is_variable = match self.token.kind {
            TokenKind::Variable => self.is_scss(),
            TokenKind::AtKeyword => self.is_less(),
            _ => false,
        };
        if is_variable {
            node.push(self.leaf(NodeKind::VariableName));
            if self.accept(TokenKind::Colon) && !node.push_opt(self.expression(true)) {
                self.error(&mut node, IssueCode::VariableValueExpected);
            }
        } else if self.peek(TokenKind::Ellipsis) && self.is_less() {
            self.bump();
            return Some(self.finish(node));
        } else if self.is_less() {
            // pattern-matching parameter: `.m(dark; @color)`
            node.push(self.term()?);
        } else {
            return None;
        }
        self.accept(TokenKind::Ellipsis);
        Some(self.finish(node))
    }

    /// `@include name[(args)] [using ($params)] [{ ... }]`
    fn include(&mut self) -> Node {
        let mut node = self.create(NodeKind::MixinReference);
        self.bump();
        match self.token.kind {
            TokenKind::Ident if self.next_touching(|k| k.is_delim('.')) => match self.module_member() {
                Some(member) => node.push(member),
                None => node.push(self.leaf(NodeKind::Identifier)),
            },
            TokenKind::Ident | TokenKind::InterpolationStart => {
                self.definition_name(&mut node);
            }
            _ => self.error(&mut node, IssueCode::IdentifierExpected),
        }
        if self.peek(TokenKind::LParen) {
            self.bump();
            if self.nested(|p| p.arguments(&mut node)).is_none() {
                self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
            }
            self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        }
        if self.peek_ident("using") {
            let mut content = self.create(NodeKind::MixinContentDeclaration);
            self.bump();
            if self.peek(TokenKind::LParen) {
                self.parameters(&mut content);
            } else {
                self.error(&mut content, IssueCode::LeftParenthesisExpected);
            }
            self.body(&mut content, BlockContent::Declarations);
            node.push(self.finish(content));
        } else if self.peek(TokenKind::LBrace) {
            self.body(&mut node, BlockContent::Declarations);
        }
        self.finish(node)
    }

    /// `@content[(args)]`
    fn content_reference(&mut self) -> Node {
        let mut node = self.create(NodeKind::MixinContentReference);
        self.bump();
        if self.peek(TokenKind::LParen) {
            self.bump();
            self.arguments(&mut node);
            self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        }
        self.finish(node)
    }

    /// `@return value`
    fn return_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::ReturnStatement);
        self.bump();
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        self.finish(node)
    }

    /// `@extend selector[, selector] [!optional]`
    fn extend(&mut self) -> Node {
        let mut node = self.create(NodeKind::ExtendsReference);
        self.bump();
        if !self.selectors_into(&mut node, true) {
            self.error(&mut node, IssueCode::SelectorExpected);
        }
        self.flags(&mut node, &["optional"]);
        self.finish(node)
    }

    /// `@debug`, `@warn`, `@error`
    fn debug_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::Debug);
        self.bump();
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        self.finish(node)
    }

    /// `@at-root [selectors | (with: ...)] { ... }`
    fn at_root(&mut self) -> Node {
        let mut node = self.create(NodeKind::AtRoot);
        self.bump();
        if self.peek(TokenKind::LParen) {
            node.push_opt(self.term());
        } else if !self.peek(TokenKind::LBrace) {
            self.selectors_into(&mut node, true);
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    // ========================================================================
    // Control flow
    // ========================================================================

    /// `@if cond { ... } [@else if cond { ... }]* [@else { ... }]`
    fn if_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::IfStatement);
        self.bump();
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        self.body(&mut node, BlockContent::Declarations);
        if self.peek_at_keyword("else") || self.peek_at_keyword("elseif") {
            node.push_opt(self.else_chain());
        }
        self.finish(node)
    }

    /// One or more `@else` branches. Each `@else if` nests the following branch inside itself.
    fn else_chain(&mut self) -> Option<Node> {
        self.nested(|p| p.else_statement())
    }

    fn else_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::ElseStatement);
        let is_elseif = self.peek_at_keyword("elseif");
        self.bump();
        if is_elseif || self.accept_ident("if") {
            if !node.push_opt(self.expression(false)) {
                self.error(&mut node, IssueCode::ExpressionExpected);
            }
        }
        self.body(&mut node, BlockContent::Declarations);
        if self.peek_at_keyword("else") || self.peek_at_keyword("elseif") {
            node.push_opt(self.else_chain());
        }
        self.finish(node)
    }

    /// `@for $i from a through|to b { ... }`
    fn for_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::ForStatement);
        self.bump();
        if self.peek(TokenKind::Variable) {
            node.push(self.leaf(NodeKind::VariableName));
            if !self.accept_ident("from") {
                self.error(&mut node, IssueCode::FromExpected);
            } else {
                if !node.push_opt(self.binary_expression()) {
                    self.error(&mut node, IssueCode::ExpressionExpected);
                }
                if !(self.accept_ident("through") || self.accept_ident("to")) {
                    self.error(&mut node, IssueCode::ThroughOrToExpected);
                } else if !node.push_opt(self.binary_expression()) {
                    self.error(&mut node, IssueCode::ExpressionExpected);
                }
            }
        } else {
            self.error(&mut node, IssueCode::VariableNameExpected);
        }
        self.resync(&[], &[TokenKind::LBrace, TokenKind::Semicolon, TokenKind::RBrace]);
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@each $k[, $v]* in list { ... }`
    fn each_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::EachStatement);
        self.bump();
        loop {
            if !self.peek(TokenKind::Variable) {
                self.error(&mut node, IssueCode::VariableNameExpected);
                break;
            }
            node.push(self.leaf(NodeKind::VariableName));
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        if !self.accept_ident("in") {
            self.error(&mut node, IssueCode::InExpected);
        } else if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        self.resync(&[], &[TokenKind::LBrace, TokenKind::Semicolon, TokenKind::RBrace]);
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }

    /// `@while cond { ... }`
    fn while_statement(&mut self) -> Node {
        let mut node = self.create(NodeKind::WhileStatement);
        self.bump();
        if !node.push_opt(self.expression(false)) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        self.body(&mut node, BlockContent::Declarations);
        self.finish(node)
    }
}
