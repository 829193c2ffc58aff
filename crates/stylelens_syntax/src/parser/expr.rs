/// Values: space- and comma-separated terms, operators, functions and literals.
///
/// ## Notes
/// - Binary operators bind by precedence, loosest first: `or`, `and`, equality, relational, additive,
///   multiplicative. Logical and relational operators exist only in SCSS and Less.
/// - A `-` preceded by whitespace but not followed by it starts a new (negative) term instead of subtracting:
///   `1 -2` is two terms, `1 - 2` and `1-2` are subtractions.
impl<'a> Parser<'a> {
    /// A value list. Stops before `;`, `}`, `{`, `)`, `]`, `!`, `:` and end of input, and before `,` when
    /// `stop_on_comma` is set.
    fn expression(&mut self, stop_on_comma: bool) -> Option<Node> {
        let mut node = self.create(NodeKind::Expression);
        node.push(self.binary_expression()?);
        loop {
            if self.peek(TokenKind::Comma) {
                if stop_on_comma {
                    break;
                }
                self.bump();
                match self.binary_expression() {
                    Some(term) => node.push(term),
                    None => break,
                }
                continue;
            }
            match self.binary_expression() {
                Some(term) => node.push(term),
                None => break,
            }
        }
        Some(self.finish(node))
    }

    fn binary_expression(&mut self) -> Option<Node> {
        self.binary_at(0)
    }

    fn binary_at(&mut self, min_prec: u8) -> Option<Node> {
        let mut left = self.unary()?;
        let mut chain = 0u32;
        while let Some(prec) = self.binary_precedence() {
            if prec < min_prec {
                break;
            }
            chain += 1;
            if chain > MAX_NESTING && left.kind == NodeKind::BinaryExpression {
                // very long chains continue flat so the tree depth stays bounded
                left.push(self.leaf(NodeKind::Operator));
                match self.binary_at(prec + 1) {
                    Some(right) => left.push(right),
                    None => self.error(&mut left, IssueCode::TermExpected),
                }
                left = self.finish(left);
                continue;
            }
            let mut node = Node::new(NodeKind::BinaryExpression, Span::empty(left.span.start));
            node.push(left);
            node.push(self.leaf(NodeKind::Operator));
            match self.binary_at(prec + 1) {
                Some(right) => node.push(right),
                None => self.error(&mut node, IssueCode::TermExpected),
            }
            left = self.finish(node);
        }
        Some(left)
    }

    /// Precedence of the current token as a binary operator.
    fn binary_precedence(&self) -> Option<u8> {
        let arithmetic = self.caps.arithmetic;
        match self.token.kind {
            TokenKind::Delim('*') | TokenKind::Delim('/') => Some(6),
            TokenKind::Delim('%') if arithmetic => Some(6),
            TokenKind::Delim('+') => Some(5),
            TokenKind::Delim('-') => {
                if self.has_whitespace() && !self.next_has_whitespace() {
                    None
                } else {
                    Some(5)
                }
            }
            TokenKind::Delim('<') | TokenKind::Delim('>') | TokenKind::LtEq | TokenKind::GtEq if arithmetic => {
                Some(4)
            }
            TokenKind::EqEq | TokenKind::NotEq if arithmetic => Some(3),
            TokenKind::Delim('=') => Some(3),
            TokenKind::Ident if arithmetic && self.peek_ident("and") => Some(2),
            TokenKind::Ident if arithmetic && self.peek_ident("or") => Some(1),
            _ => None,
        }
    }

    fn next_has_whitespace(&self) -> bool {
        let current = self.token;
        let next = self.lookahead();
        !current.touches(&next)
    }

    /// `-x`, `+x`, `not x` (SCSS and Less), or a plain term.
    fn unary(&mut self) -> Option<Node> {
        let is_sign = self.peek_delim('-') || self.peek_delim('+');
        let is_not = self.caps.arithmetic && self.peek_ident("not") && self.next_has_whitespace();
        if !is_sign && !is_not {
            return self.term();
        }
        let mark = self.mark();
        let mut node = self.create(NodeKind::UnaryExpression);
        node.push(self.leaf(NodeKind::Operator));
        match self.term() {
            Some(operand) => node.push(operand),
            None if is_not => {
                // `not` on its own is a keyword value
                self.restore(mark);
                return self.term();
            }
            None => self.error(&mut node, IssueCode::TermExpected),
        }
        Some(self.finish(node))
    }

    /// A single value.
    fn term(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::Number | TokenKind::Percentage | TokenKind::Dimension => {
                let mut node = self.create(NodeKind::NumericValue);
                self.bump();
                self.ident_continuation(&mut node);
                Some(self.finish(node))
            }
            TokenKind::String | TokenKind::BadString => Some(self.leaf(NodeKind::StringLiteral)),
            TokenKind::Url => Some(self.leaf(NodeKind::URILiteral)),
            TokenKind::UnicodeRange => Some(self.leaf(NodeKind::UnicodeRange)),
            TokenKind::Hash => Some(self.hex_color()),
            TokenKind::Variable if self.is_scss() => Some(self.leaf(NodeKind::Variable)),
            TokenKind::AtKeyword if self.is_less() => Some(self.leaf(NodeKind::Variable)),
            TokenKind::Ident => Some(self.ident_term()),
            TokenKind::InterpolationStart => {
                let mut ident = self.create(NodeKind::Identifier);
                self.ident_parts(&mut ident);
                let ident = self.finish(ident);
                Some(self.maybe_function(ident))
            }
            TokenKind::LParen => self.nested(|p| p.parenthesized()),
            TokenKind::LBracket => self.nested(|p| p.bracketed_list()),
            TokenKind::Delim('&') if self.dialect.is_superset() => Some(self.leaf(NodeKind::NestingSelector)),
            TokenKind::Delim('~') if self.is_less() && self.next_touching(|k| k.is_string()) => {
                let mut node = self.create(NodeKind::EscapedValue);
                self.bump();
                node.push(self.leaf(NodeKind::StringLiteral));
                Some(self.finish(node))
            }
            TokenKind::Delim('%') if self.is_less() && self.next_touching(|k| k == TokenKind::LParen) => {
                let name = self.leaf(NodeKind::Identifier);
                Some(self.maybe_function(name))
            }
            _ => None,
        }
    }

    /// `#fff` and friends; any other hash is kept as an identifier.
    fn hex_color(&mut self) -> Node {
        let digits = self.text().trim_start_matches('#');
        let is_hex = matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit());
        let kind = if is_hex {
            NodeKind::HexColorValue
        } else {
            NodeKind::Identifier
        };
        let mut node = self.create(kind);
        self.bump();
        self.ident_continuation(&mut node);
        self.finish(node)
    }

    /// Identifier, function call, `url(...)`, or SCSS module member.
    fn ident_term(&mut self) -> Node {
        if self.peek_ident("url") && self.next_touching(|k| k == TokenKind::LParen) {
            return self.uri_literal();
        }
        if self.is_scss() {
            if let Some(member) = self.module_member() {
                return member;
            }
        }
        let mut ident = self.create(NodeKind::Identifier);
        self.ident_parts(&mut ident);
        let ident = self.finish(ident);
        self.maybe_function(ident)
    }

    /// Wrap `name` into a function call if `(` touches it.
    fn maybe_function(&mut self, name: Node) -> Node {
        if !self.peek(TokenKind::LParen) || self.has_whitespace() {
            return name;
        }
        let mut node = Node::new(NodeKind::Function, Span::empty(name.span.start));
        node.push(name);
        self.bump();
        if self.nested(|p| p.arguments(&mut node)).is_none() {
            self.resync(&[], &[TokenKind::RParen, TokenKind::LBrace, TokenKind::RBrace]);
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// Function arguments up to (not including) `)`.
    fn arguments(&mut self, node: &mut Node) {
        while !self.peek(TokenKind::RParen) {
            match self.function_argument() {
                Some(arg) => node.push(arg),
                None => {
                    self.error(node, IssueCode::TermExpected);
                    return;
                }
            }
            let separated = self.accept(TokenKind::Comma) || self.is_less() && self.accept(TokenKind::Semicolon);
            if !separated {
                return;
            }
        }
    }

    /// `value`, `$name: value` (keyword argument) or `$list...` (rest argument).
    fn function_argument(&mut self) -> Option<Node> {
        let mut node = self.create(NodeKind::FunctionArgument);
        let is_variable = self.peek(TokenKind::Variable) && self.is_scss() || self.peek(TokenKind::AtKeyword) && self.is_less();
        if is_variable && self.lookahead().kind == TokenKind::Colon {
            node.push(self.leaf(NodeKind::VariableName));
            self.bump();
            if !node.push_opt(self.expression(true)) {
                self.error(&mut node, IssueCode::VariableValueExpected);
            }
        } else {
            node.push(self.expression(true)?);
        }
        self.accept(TokenKind::Ellipsis);
        Some(self.finish(node))
    }

    /// `url(...)` written as a function: `url("a.png")`, `url($path)`.
    fn uri_literal(&mut self) -> Node {
        let mut node = self.create(NodeKind::URILiteral);
        self.bump();
        self.bump();
        if self.peek(TokenKind::String) || self.peek(TokenKind::BadString) {
            node.push(self.leaf(NodeKind::StringLiteral));
        } else {
            node.push_opt(self.expression(true));
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// `ns.$var` or `ns.fn(...)` (SCSS modules).
    fn module_member(&mut self) -> Option<Node> {
        let mark = self.mark();
        let mut node = self.create(NodeKind::ModuleMember);
        let namespace = self.leaf(NodeKind::Identifier);
        if !self.peek_delim('.') || self.has_whitespace() {
            self.restore(mark);
            return None;
        }
        self.bump();
        if self.has_whitespace() {
            self.restore(mark);
            return None;
        }
        node.push(namespace);
        match self.token.kind {
            TokenKind::Variable => node.push(self.leaf(NodeKind::Variable)),
            TokenKind::Ident => {
                let member = self.leaf(NodeKind::Identifier);
                let member = self.maybe_function(member);
                node.push(member);
            }
            _ => {
                self.restore(mark);
                return None;
            }
        }
        Some(self.finish(node))
    }

    /// `( ... )`: grouping, a list, or a SCSS map.
    fn parenthesized(&mut self) -> Node {
        let mut node = self.create(NodeKind::ParenthesizedExpression);
        self.bump();
        while !self.peek(TokenKind::RParen) {
            match self.list_item() {
                Some(item) => node.push(item),
                None => {
                    self.error(&mut node, IssueCode::ExpressionExpected);
                    break;
                }
            }
            if !self.accept(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing(&mut node, TokenKind::RParen, IssueCode::RightParenthesisExpected);
        self.finish(node)
    }

    /// A list element, or `key: value` inside a SCSS map.
    fn list_item(&mut self) -> Option<Node> {
        let key = self.expression(true)?;
        if !(self.caps.maps && self.peek(TokenKind::Colon)) {
            return Some(key);
        }
        let mut entry = Node::new(NodeKind::ListEntry, Span::empty(key.span.start));
        entry.push(key);
        self.bump();
        if !entry.push_opt(self.expression(true)) {
            self.error(&mut entry, IssueCode::TermExpected);
        }
        Some(self.finish(entry))
    }

    /// `[a b]`
    fn bracketed_list(&mut self) -> Node {
        let mut node = self.create(NodeKind::BracketedList);
        self.bump();
        node.push_opt(self.expression(false));
        self.expect_closing(&mut node, TokenKind::RBracket, IssueCode::RightSquareBracketExpected);
        self.finish(node)
    }
}
