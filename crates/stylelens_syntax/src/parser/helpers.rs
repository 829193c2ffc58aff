/// Token access, node construction, error recording and recovery helpers.
impl<'a> Parser<'a> {
    // ========================================================================
    // Token access
    // ========================================================================

    fn peek(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    fn peek_delim(&self, c: char) -> bool {
        self.token.kind.is_delim(c)
    }

    /// Case-insensitive match of an identifier token.
    fn peek_ident(&self, text: &str) -> bool {
        self.token.kind == TokenKind::Ident && self.text().eq_ignore_ascii_case(text)
    }

    /// Case-insensitive match of an at-keyword (without its `@`).
    fn peek_at_keyword(&self, name: &str) -> bool {
        self.token.kind == TokenKind::AtKeyword
            && self
                .text()
                .strip_prefix('@')
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    fn at_eof(&self) -> bool {
        self.token.kind == TokenKind::Eof
    }

    /// Text of the current token.
    fn text(&self) -> &'a str {
        self.token.text(self.source)
    }

    fn bump(&mut self) {
        self.prev_token = self.token;
        self.token = self.scanner.scan();
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.peek(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn accept_delim(&mut self, c: char) -> bool {
        if self.peek_delim(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn accept_ident(&mut self, text: &str) -> bool {
        if self.peek_ident(text) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Return `true` if whitespace or a comment separates the previous token from the current one.
    fn has_whitespace(&self) -> bool {
        self.prev_token.span.end != self.token.span.start
    }

    /// The token after the current one.
    fn lookahead(&self) -> Token {
        self.scanner.peek_token()
    }

    /// Return `true` if the next token satisfies `pred` and touches the current one.
    fn next_touching(&self, pred: impl Fn(TokenKind) -> bool) -> bool {
        let current = self.token;
        let next = self.lookahead();
        pred(next.kind) && current.touches(&next)
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    fn mark(&self) -> Mark {
        Mark {
            scanner: self.scanner.mark(),
            token: self.token,
            prev_token: self.prev_token,
            last_error_offset: self.last_error_offset,
        }
    }

    fn restore(&mut self, mark: Mark) {
        self.scanner.restore(mark.scanner);
        self.token = mark.token;
        self.prev_token = mark.prev_token;
        self.last_error_offset = mark.last_error_offset;
    }

    /// Run `f`; if it yields nothing, rewind to where it started.
    fn attempt(&mut self, f: impl FnOnce(&mut Self) -> Option<Node>) -> Option<Node> {
        let mark = self.mark();
        let node = f(self);
        if node.is_none() {
            self.restore(mark);
        }
        node
    }

    /// Run `f` one nesting level deeper, or return `None` once [`MAX_NESTING`] is reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= MAX_NESTING {
            return None;
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        Some(out)
    }

    // ========================================================================
    // Node construction
    // ========================================================================

    /// Start a node at the current token.
    fn create(&self, kind: NodeKind) -> Node {
        Node::new(kind, Span::empty(self.token.span.start))
    }

    /// Close a node at the end of the last consumed token (or its last child, if later).
    fn finish(&self, mut node: Node) -> Node {
        let mut end = node.span.start.max(self.prev_token.span.end);
        if let Some(child_end) = node.last_child_end() {
            end = end.max(child_end);
        }
        node.span.end = end;
        node
    }

    /// Consume the current token as a childless node.
    fn leaf(&mut self, kind: NodeKind) -> Node {
        let node = self.create(kind);
        self.bump();
        self.finish(node)
    }

    // ========================================================================
    // Errors and recovery
    // ========================================================================

    /// Record `code` at the current token on `node`.
    ///
    /// ## Notes
    /// - A second issue at the same token start is dropped, so one missing token never produces a cascade.
    fn error(&mut self, node: &mut Node, code: IssueCode) {
        let span = self.token.span;
        if self.last_error_offset == Some(span.start) {
            return;
        }
        self.last_error_offset = Some(span.start);
        tracing::debug!(code = %code, offset = span.start, "syntax issue");
        node.issues.push(Issue::syntax(code, span));
    }

    /// Skip tokens until one of `resync` (consumed) or `stop` (left in place).
    ///
    /// ## Returns
    /// - `true` if a resync or stop token was reached, `false` at end of input.
    ///
    /// ## Notes
    /// - Bracketed regions are skipped as a whole, so a `;` inside `( ... )` never ends recovery.
    fn resync(&mut self, resync: &[TokenKind], stop: &[TokenKind]) -> bool {
        loop {
            let kind = self.token.kind;
            if resync.contains(&kind) {
                self.bump();
                return true;
            }
            if stop.contains(&kind) {
                return true;
            }
            if kind == TokenKind::Eof {
                return false;
            }
            if kind.closing_pair().is_some() {
                self.skip_balanced();
            } else {
                self.bump();
            }
        }
    }

    /// Consume a bracketed region starting at the current opener, up to and including its closer.
    ///
    /// ## Notes
    /// - An unmatched `}` inside parentheses or brackets ends the region without being consumed; it belongs to
    ///   an enclosing block.
    fn skip_balanced(&mut self) {
        let Some(closer) = self.token.kind.closing_pair() else {
            self.bump();
            return;
        };
        let mut stack = vec![closer];
        self.bump();
        while let Some(&expected) = stack.last() {
            let kind = self.token.kind;
            if kind == TokenKind::Eof {
                return;
            }
            if kind == expected {
                stack.pop();
            } else if let Some(close) = kind.closing_pair() {
                stack.push(close);
            } else if kind == TokenKind::RBrace && !stack.contains(&TokenKind::RBrace) {
                return;
            }
            self.bump();
        }
    }

    /// Skip the rest of a malformed statement: through the next `;`, or past one balanced `{ ... }` block, stopping
    /// before a `}` that closes the enclosing block.
    fn skip_statement(&mut self) {
        loop {
            match self.token.kind {
                TokenKind::Eof | TokenKind::RBrace => return,
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::LBrace => {
                    self.skip_balanced();
                    return;
                }
                kind if kind.closing_pair().is_some() => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    /// Expect `kind` to close a construct on `node`; otherwise record `code` and resync to it.
    fn expect_closing(&mut self, node: &mut Node, kind: TokenKind, code: IssueCode) {
        if self.accept(kind) {
            return;
        }
        self.error(node, code);
        self.resync(&[kind], &[TokenKind::Semicolon, TokenKind::LBrace, TokenKind::RBrace]);
    }

    /// Force progress when a loop iteration consumed nothing.
    ///
    /// ## Panics
    /// - If the scanner itself fails to advance, which would make every loop in the parser infinite.
    fn ensure_progress(&mut self, node: &mut Node, before: usize, code: IssueCode) {
        if self.token.span.start != before || self.at_eof() {
            return;
        }
        self.error(node, code);
        self.bump();
        assert!(
            self.token.span.start != before || self.at_eof(),
            "INVARIANT: scanner failed to advance at offset {before}"
        );
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Consume an identifier made of touching pieces (`foo`, `foo-#{$x}`, `@{a}-b`).
    /// Interpolations become children of `node`.
    ///
    /// ## Returns
    /// - `false` (consuming nothing) if the current token cannot start an identifier.
    fn ident_parts(&mut self, node: &mut Node) -> bool {
        match self.token.kind {
            TokenKind::Ident => self.bump(),
            TokenKind::InterpolationStart => match self.interpolation() {
                Some(interp) => node.push(interp),
                None => return false,
            },
            _ => return false,
        }
        self.ident_continuation(node);
        true
    }

    /// Consume pieces that touch the previous token and continue an identifier.
    fn ident_continuation(&mut self, node: &mut Node) {
        loop {
            if self.has_whitespace() {
                return;
            }
            let after_interpolation = self.prev_token.kind == TokenKind::InterpolationEnd;
            match self.token.kind {
                TokenKind::InterpolationStart => match self.interpolation() {
                    Some(interp) => node.push(interp),
                    None => return,
                },
                TokenKind::Ident | TokenKind::Number | TokenKind::Dimension | TokenKind::Percentage
                    if after_interpolation =>
                {
                    self.bump()
                }
                TokenKind::Delim('-')
                    if self.next_touching(|k| k == TokenKind::InterpolationStart || k == TokenKind::Ident) =>
                {
                    self.bump()
                }
                _ => return,
            }
        }
    }

    /// `#{expr}` (SCSS) or `@{name}` (Less).
    fn interpolation(&mut self) -> Option<Node> {
        if !self.peek(TokenKind::InterpolationStart) {
            return None;
        }
        let mut node = self.create(NodeKind::Interpolation);
        self.bump();
        let inner = if self.is_less() {
            self.peek(TokenKind::Ident).then(|| self.leaf(NodeKind::Identifier))
        } else {
            self.nested(|p| p.expression(false)).flatten()
        };
        if !node.push_opt(inner) {
            self.error(&mut node, IssueCode::ExpressionExpected);
        }
        if !self.accept(TokenKind::InterpolationEnd) {
            self.error(&mut node, IssueCode::RightCurlyExpected);
            self.resync(
                &[TokenKind::InterpolationEnd],
                &[TokenKind::Semicolon, TokenKind::LBrace, TokenKind::RBrace],
            );
        }
        Some(self.finish(node))
    }
}
