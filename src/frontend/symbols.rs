//! Lexical scopes and symbol tables for CSS, SCSS and Less.
//!
//! [`ScopeTree::build`] walks a finished [`SyntaxTree`] once and mirrors its block structure: the root scope spans the
//! whole document and every block body (`Declarations` under a rule set, mixin, function, control-flow statement or
//! at-rule) opens a child scope. Declarations register [`Symbol`]s in the innermost scope that contains them.
//!
//! ## Notes
//! - Last write wins: a later declaration of the same name and kind in the same scope replaces the earlier one for
//!   lookup. Both stay listed in [`ScopeTree::symbols`].
//! - Hoisting: a symbol is visible over the whole span of its scope, including offsets before its own declaration.
//! - Mixin and function parameters and `@for` / `@each` loop variables belong to the body scope, not the scope the
//!   definition sits in.
//! - Custom properties (`--name`) are variables of the root scope: they cascade instead of following block nesting.
//!
//! ## Examples
//! ```rust
//! use stylelens::frontend::symbols::{ScopeTree, SymbolKind};
//! use stylelens_core::lang::dialect::Dialect;
//! use stylelens_syntax::parser;
//!
//! let source = "$x: 1; .a { $x: 2; width: $x; } width: $x;";
//! let tree = parser::parse(source, Dialect::Scss);
//! let scopes = ScopeTree::build(&tree);
//!
//! let inner = scopes.find_symbol("$x", source.find("width: $x").unwrap(), Some(SymbolKind::Variable)).unwrap();
//! assert_eq!(inner.value_text(&tree), Some("2"));
//! let outer = scopes.find_symbol("$x", source.rfind("$x").unwrap(), Some(SymbolKind::Variable)).unwrap();
//! assert_eq!(outer.value_text(&tree), Some("1"));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use stylelens_syntax::ast::{NodeKind, Span};
use stylelens_syntax::tree::{NodeId, NodeRef, SyntaxTree};

/// Index of a scope inside its [`ScopeTree`].
pub type ScopeId = usize;

/// Index of a symbol inside its [`ScopeTree`].
pub type SymbolId = usize;

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// `$x` (SCSS), `@x` (Less), `--x` custom properties, parameters and loop variables.
    Variable,
    /// `@mixin m` (SCSS) or `.m() { }` (Less).
    Mixin,
    /// `@function f` (SCSS).
    Function,
    /// `@import`, `@use` and `@forward` targets.
    Import,
    /// `@keyframes` names.
    Keyframes,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 5] = [
        SymbolKind::Variable,
        SymbolKind::Mixin,
        SymbolKind::Function,
        SymbolKind::Import,
        SymbolKind::Keyframes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Mixin => "mixin",
            SymbolKind::Function => "function",
            SymbolKind::Import => "import",
            SymbolKind::Keyframes => "keyframes",
        }
    }

    /// Parse a kind name as printed by [`SymbolKind::as_str`] (case-insensitive).
    pub fn from_name(name: &str) -> Option<SymbolKind> {
        SymbolKind::ALL.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, kinded declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// The declaring node (`VariableDeclaration`, `MixinDeclaration`, `Use`, ...).
    pub node: NodeId,
    /// Span of the declaring node.
    pub span: Span,
    /// Span of the name inside the declaration, used for go-to-definition.
    pub name_span: Span,
    /// Span of the assigned value, for variables that have one.
    pub value: Option<Span>,
    /// Owning scope.
    pub scope: ScopeId,
}

impl Symbol {
    /// Source text of the assigned value, if any.
    pub fn value_text<'t>(&self, tree: &'t SyntaxTree) -> Option<&'t str> {
        self.value.and_then(|span| tree.source().get(span.start..span.end))
    }
}

/// What kind of block a scope mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Stylesheet,
    RuleSet,
    Mixin,
    Function,
    ControlFlow,
    AtRule,
    /// Content blocks, nested properties and detached rulesets.
    Block,
}

impl ScopeKind {
    fn for_body_of(kind: NodeKind) -> ScopeKind {
        match kind {
            NodeKind::RuleSet => ScopeKind::RuleSet,
            NodeKind::MixinDeclaration | NodeKind::MixinContentDeclaration => ScopeKind::Mixin,
            NodeKind::FunctionDeclaration => ScopeKind::Function,
            NodeKind::IfStatement
            | NodeKind::ElseStatement
            | NodeKind::ForStatement
            | NodeKind::EachStatement
            | NodeKind::WhileStatement => ScopeKind::ControlFlow,
            NodeKind::MixinReference | NodeKind::NestedProperties | NodeKind::DetachedRuleset => ScopeKind::Block,
            _ => ScopeKind::AtRule,
        }
    }
}

/// A lexical region with its own symbol table.
#[derive(Debug, Clone)]
pub struct Scope {
    pub span: Span,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// Whether the region runs to the end of the document without a closing brace. Such a scope (and the root)
    /// also contains the offset right after its last character.
    pub open_ended: bool,
    /// Every symbol declared directly in this scope, in declaration order (shadowed ones included).
    pub declared: Vec<SymbolId>,
    table: HashMap<(SymbolKind, String), SymbolId>,
    shadowed: HashSet<SymbolId>,
}

impl Scope {
    fn new(span: Span, kind: ScopeKind, parent: Option<ScopeId>, open_ended: bool) -> Self {
        Self {
            span,
            kind,
            parent,
            children: Vec::new(),
            open_ended,
            declared: Vec::new(),
            table: HashMap::new(),
            shadowed: HashSet::new(),
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span.contains(offset, self.open_ended)
    }

    /// The visible symbol for `name` and `kind` declared directly in this scope.
    pub fn get(&self, name: &str, kind: SymbolKind) -> Option<SymbolId> {
        self.table.get(&(kind, name.to_string())).copied()
    }

    /// Visible symbols of this scope (last write per name and kind), in declaration order.
    pub fn visible(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.declared.iter().copied().filter(|id| !self.shadowed.contains(id))
    }
}

/// Scope tree and symbol table of one document.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    current_scope: ScopeId,
}

impl ScopeTree {
    /// Build the scope tree of a parsed document.
    #[tracing::instrument(skip_all, fields(nodes = tree.len()))]
    pub fn build(tree: &SyntaxTree) -> ScopeTree {
        let root = tree.root();
        let mut scopes = ScopeTree {
            scopes: vec![Scope::new(root.span(), ScopeKind::Stylesheet, None, true)],
            symbols: Vec::new(),
            current_scope: 0,
        };
        ScopeBuilder {
            tree,
            scopes: &mut scopes,
        }
        .walk(root);
        tracing::debug!(scopes = scopes.scopes.len(), symbols = scopes.symbols.len(), "built scopes");
        scopes
    }

    pub fn root(&self) -> ScopeId {
        0
    }

    /// Scope by id.
    ///
    /// ## Panics
    /// - If `id` does not belong to this tree.
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Symbol by id.
    ///
    /// ## Panics
    /// - If `id` does not belong to this tree.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    /// Every declared symbol in document order, shadowed redeclarations included.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Innermost scope containing `offset`, or `None` past the end of the document.
    pub fn scope_at_offset(&self, offset: usize) -> Option<ScopeId> {
        let mut current = self.root();
        if !self.scopes[current].contains(offset) {
            return None;
        }
        'descend: loop {
            for &child in &self.scopes[current].children {
                if self.scopes[child].contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Symbols visible at `offset`, nearest scope first.
    ///
    /// ## Parameters
    /// - `offset`: byte offset in the document.
    /// - `kind`: only return symbols of this kind.
    ///
    /// ## Returns
    /// - The first symbol found per distinct name (and kind) walking outward from the innermost scope containing
    ///   `offset`; nearer scopes shadow farther ones. Empty when the offset is outside the document.
    pub fn find_symbols_at_offset(&self, offset: usize, kind: Option<SymbolKind>) -> Vec<&Symbol> {
        let mut result = Vec::new();
        let mut seen: HashSet<(SymbolKind, &str)> = HashSet::new();
        let mut scope = self.scope_at_offset(offset);
        while let Some(id) = scope {
            for symbol in self.scopes[id].visible().map(|sid| &self.symbols[sid]) {
                if kind.is_some_and(|k| k != symbol.kind) {
                    continue;
                }
                if seen.insert((symbol.kind, symbol.name.as_str())) {
                    result.push(symbol);
                }
            }
            scope = self.scopes[id].parent;
        }
        result
    }

    /// The symbol `name` resolves to at `offset`.
    pub fn find_symbol(&self, name: &str, offset: usize, kind: Option<SymbolKind>) -> Option<&Symbol> {
        let scope = self.scope_at_offset(offset)?;
        self.lookup(scope, name, kind).map(|id| &self.symbols[id])
    }

    /// Look up `name` in `scope` and its ancestors.
    ///
    /// Without a kind filter the first kind in [`SymbolKind::ALL`] order wins within a scope.
    pub fn lookup(&self, scope: ScopeId, name: &str, kind: Option<SymbolKind>) -> Option<SymbolId> {
        let mut scope_idx = scope;
        loop {
            let found = match kind {
                Some(kind) => self.scopes[scope_idx].get(name, kind),
                None => SymbolKind::ALL
                    .into_iter()
                    .find_map(|kind| self.scopes[scope_idx].get(name, kind)),
            };
            if found.is_some() {
                return found;
            }
            scope_idx = self.scopes[scope_idx].parent?;
        }
    }

    fn enter_scope(&mut self, span: Span, kind: ScopeKind, open_ended: bool) {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(span, kind, Some(self.current_scope), open_ended));
        self.scopes[self.current_scope].children.push(id);
        self.current_scope = id;
    }

    fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope].parent {
            self.current_scope = parent;
        }
    }

    fn define(&mut self, scope: ScopeId, mut symbol: Symbol) -> SymbolId {
        symbol.scope = scope;
        let id = self.symbols.len();
        let entry = &mut self.scopes[scope];
        if let Some(previous) = entry.table.insert((symbol.kind, symbol.name.clone()), id) {
            entry.shadowed.insert(previous);
        }
        entry.declared.push(id);
        self.symbols.push(symbol);
        id
    }
}

// ============================================================================
// Builder
// ============================================================================

enum Step {
    Enter(NodeId),
    Exit,
}

struct ScopeBuilder<'t, 's> {
    tree: &'t SyntaxTree,
    scopes: &'s mut ScopeTree,
}

impl<'t> ScopeBuilder<'t, '_> {
    fn walk(&mut self, root: NodeRef<'t>) {
        let mut stack = vec![Step::Enter(root.id())];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Enter(id) => id,
                Step::Exit => {
                    self.scopes.exit_scope();
                    continue;
                }
            };
            let node = self.tree.node(id);
            if self.is_scope_body(node) {
                self.open_body(node);
                stack.push(Step::Exit);
            } else {
                self.declare(node);
            }
            stack.extend(node.children().collect::<Vec<_>>().into_iter().rev().map(|c| Step::Enter(c.id())));
        }
    }

    fn is_scope_body(&self, node: NodeRef<'t>) -> bool {
        node.kind() == NodeKind::Declarations && node.parent().is_some_and(|p| p.kind().introduces_body())
    }

    fn open_body(&mut self, body: NodeRef<'t>) {
        let Some(owner) = body.parent() else {
            return;
        };
        let span = body.span();
        let open_ended = !self.tree.source()[..span.end].ends_with('}');
        self.scopes.enter_scope(span, ScopeKind::for_body_of(owner.kind()), open_ended);

        // bindings introduced by the owner live in the body
        match owner.kind() {
            NodeKind::MixinDeclaration | NodeKind::FunctionDeclaration | NodeKind::MixinContentDeclaration => {
                for param in owner.children_of_kind(NodeKind::FunctionParameter) {
                    if let Some(name) = param.child_of_kind(NodeKind::VariableName) {
                        let value = param.child_of_kind(NodeKind::Expression).map(|e| e.span());
                        self.define_current(SymbolKind::Variable, param, name, value);
                    }
                }
            }
            NodeKind::ForStatement | NodeKind::EachStatement => {
                for name in owner.children_of_kind(NodeKind::VariableName) {
                    self.define_current(SymbolKind::Variable, name, name, None);
                }
            }
            _ => {}
        }
    }

    fn declare(&mut self, node: NodeRef<'t>) {
        match node.kind() {
            NodeKind::VariableDeclaration => {
                if let Some(name) = node.child_of_kind(NodeKind::VariableName) {
                    let value = node
                        .children()
                        .find(|c| matches!(c.kind(), NodeKind::Expression | NodeKind::DetachedRuleset))
                        .map(|c| c.span());
                    self.define_current(SymbolKind::Variable, node, name, value);
                }
            }
            NodeKind::CustomPropertyDeclaration => {
                if let Some(name) = node.child_of_kind(NodeKind::Property) {
                    let value = node.child_of_kind(NodeKind::CustomPropertyValue).map(|v| v.span());
                    let root = self.scopes.root();
                    self.define_in(root, SymbolKind::Variable, node, name, name.text().to_string(), value);
                }
            }
            NodeKind::MixinDeclaration => {
                if let Some(name) = node.child_of_kind(NodeKind::Identifier) {
                    self.define_current(SymbolKind::Mixin, node, name, None);
                }
            }
            NodeKind::FunctionDeclaration => {
                if let Some(name) = node.child_of_kind(NodeKind::Identifier) {
                    self.define_current(SymbolKind::Function, node, name, None);
                }
            }
            NodeKind::Keyframe => {
                let name = node
                    .children()
                    .find(|c| matches!(c.kind(), NodeKind::Identifier | NodeKind::StringLiteral | NodeKind::Variable));
                if let Some(name) = name {
                    let text = unquote(name.text()).to_string();
                    let scope = self.scopes.current_scope;
                    self.define_in(scope, SymbolKind::Keyframes, node, name, text, None);
                }
            }
            NodeKind::Use => self.declare_use(node),
            NodeKind::Forward | NodeKind::Import => {
                let targets: Vec<_> = node
                    .children()
                    .filter(|c| matches!(c.kind(), NodeKind::StringLiteral | NodeKind::URILiteral))
                    .collect();
                for target in targets {
                    let text = import_path(target.text()).to_string();
                    let scope = self.scopes.current_scope;
                    self.define_in(scope, SymbolKind::Import, node, target, text, None);
                }
            }
            _ => {}
        }
    }

    /// `@use "path"` binds a namespace: the `as` name, or the last path segment without partial prefix and
    /// extension. `as *` merges the module into the current scope, recorded under the full path.
    fn declare_use(&mut self, node: NodeRef<'t>) {
        let Some(target) = node.child_of_kind(NodeKind::StringLiteral) else {
            return;
        };
        let path = unquote(target.text());
        let (name_node, name) = match node.child_of_kind(NodeKind::Identifier) {
            Some(alias) if alias.text() == "*" => (target, path.to_string()),
            Some(alias) => (alias, alias.text().to_string()),
            None => (target, default_namespace(path).to_string()),
        };
        let scope = self.scopes.current_scope;
        self.define_in(scope, SymbolKind::Import, node, name_node, name, None);
    }

    fn define_current(&mut self, kind: SymbolKind, node: NodeRef<'t>, name: NodeRef<'t>, value: Option<Span>) {
        let scope = self.scopes.current_scope;
        self.define_in(scope, kind, node, name, name.text().to_string(), value);
    }

    fn define_in(
        &mut self,
        scope: ScopeId,
        kind: SymbolKind,
        node: NodeRef<'t>,
        name_node: NodeRef<'t>,
        name: String,
        value: Option<Span>,
    ) {
        if name.is_empty() {
            return;
        }
        self.scopes.define(
            scope,
            Symbol {
                name,
                kind,
                node: node.id(),
                span: node.span(),
                name_span: name_node.span(),
                value,
                scope,
            },
        );
    }
}

/// Strip one pair of matching quotes.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text.strip_prefix(quote) {
            return inner.strip_suffix(quote).unwrap_or(inner);
        }
    }
    text
}

/// Path inside a string or `url(...)` import target.
fn import_path(text: &str) -> &str {
    let lower = text.get(..4).map(|p| p.eq_ignore_ascii_case("url("));
    if lower == Some(true) {
        let inner = text[4..].strip_suffix(')').unwrap_or(&text[4..]);
        return unquote(inner.trim());
    }
    unquote(text)
}

/// Namespace `@use` binds when there is no `as` clause: `sass:math` → `math`, `src/_corners.scss` → `corners`.
fn default_namespace(path: &str) -> &str {
    let segment = path.rsplit(['/', ':']).next().unwrap_or(path);
    let segment = segment.strip_prefix('_').unwrap_or(segment);
    match segment.split_once('.') {
        Some((stem, _)) => stem,
        None => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylelens_core::lang::dialect::Dialect;
    use stylelens_syntax::parser;

    fn build(source: &str, dialect: Dialect) -> (SyntaxTree, ScopeTree) {
        let tree = parser::parse(source, dialect);
        let scopes = ScopeTree::build(&tree);
        (tree, scopes)
    }

    fn names(symbols: &[&Symbol]) -> Vec<String> {
        let mut names: Vec<String> = symbols.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_nested_rules_open_nested_scopes() {
        let (_, scopes) = build(".a { .b { color: blue; } }", Dialect::Css);
        assert_eq!(scopes.scopes().len(), 3);
        let outer = scopes.scope(1);
        assert_eq!(outer.parent, Some(0));
        assert_eq!(outer.children, vec![2]);
        assert_eq!(scopes.scope(2).kind, ScopeKind::RuleSet);
        assert_eq!(scopes.scope_at_offset(12), Some(2));
        assert_eq!(scopes.scope_at_offset(5), Some(1));
        assert_eq!(scopes.scope_at_offset(0), Some(0));
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let source = "$x: 1; .a { $x: 2; width: $x; } width: $x;";
        let (tree, scopes) = build(source, Dialect::Scss);
        let inside = source.find("width").unwrap();
        let found = scopes.find_symbols_at_offset(inside, Some(SymbolKind::Variable));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value_text(&tree), Some("2"));

        let after = source.rfind("$x").unwrap();
        let found = scopes.find_symbols_at_offset(after, Some(SymbolKind::Variable));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value_text(&tree), Some("1"));
    }

    #[test]
    fn test_last_write_wins_and_hoisting() {
        let source = ".a { width: $w; $w: 1px; $w: 2px; }";
        let (tree, scopes) = build(source, Dialect::Scss);
        let before = source.find("width").unwrap();
        let symbol = scopes.find_symbol("$w", before, Some(SymbolKind::Variable)).unwrap();
        assert_eq!(symbol.value_text(&tree), Some("2px"));
        // both declarations stay listed
        assert_eq!(scopes.symbols().len(), 2);
        assert_eq!(scopes.scope(1).declared.len(), 2);
        assert_eq!(scopes.scope(1).visible().count(), 1);
    }

    #[test]
    fn test_mixins_functions_and_parameters() {
        let source = "@mixin m($a, $b: 2) { width: $a; } @function f($n) { @return $n; }";
        let (tree, scopes) = build(source, Dialect::Scss);
        let top = scopes.find_symbols_at_offset(0, None);
        assert_eq!(names(&top), vec!["f", "m"]);
        assert!(top.iter().any(|s| s.kind == SymbolKind::Mixin && s.name == "m"));
        assert!(top.iter().any(|s| s.kind == SymbolKind::Function && s.name == "f"));

        let in_mixin = source.find("width").unwrap();
        let vars = scopes.find_symbols_at_offset(in_mixin, Some(SymbolKind::Variable));
        assert_eq!(names(&vars), vec!["$a", "$b"]);
        let b = vars.iter().find(|s| s.name == "$b").unwrap();
        assert_eq!(b.value_text(&tree), Some("2"));
        assert_eq!(scopes.scope(b.scope).kind, ScopeKind::Mixin);

        // parameters are not visible outside the body
        assert!(scopes.find_symbol("$a", 0, None).is_none());
        let in_function = source.find("@return").unwrap();
        assert!(scopes.find_symbol("$n", in_function, Some(SymbolKind::Variable)).is_some());
    }

    #[test]
    fn test_loop_variables_bind_in_body() {
        let source = "@for $i from 1 through 3 { .a { w: $i; } } @each $k, $v in $map { b: $v; }";
        let (_, scopes) = build(source, Dialect::Scss);
        let in_for = source.find("w: $i").unwrap();
        assert!(scopes.find_symbol("$i", in_for, None).is_some());
        let in_each = source.find("b: $v").unwrap();
        let vars = scopes.find_symbols_at_offset(in_each, Some(SymbolKind::Variable));
        assert_eq!(names(&vars), vec!["$k", "$v"]);
        assert!(scopes.find_symbol("$i", 0, None).is_none());
    }

    #[test]
    fn test_imports_and_namespaces() {
        let source = "@use \"sass:math\"; @use \"src/_corners.scss\"; @use \"config\" as cfg; @use \"theme\" as *; \
                      @forward \"src/list\"; @import \"a\", \"b\";";
        let (_, scopes) = build(source, Dialect::Scss);
        let imports = scopes.find_symbols_at_offset(0, Some(SymbolKind::Import));
        assert_eq!(names(&imports), vec!["a", "b", "cfg", "corners", "math", "src/list", "theme"]);
    }

    #[test]
    fn test_css_import_urls() {
        let (_, scopes) = build("@import url(\"reset.css\"); @import url(print.css) print;", Dialect::Css);
        let imports = scopes.find_symbols_at_offset(0, Some(SymbolKind::Import));
        assert_eq!(names(&imports), vec!["print.css", "reset.css"]);
    }

    #[test]
    fn test_less_scopes() {
        let source = "@c: red; .m(@a; @b: 2) when (@a > 0) { color: @c; } .x { @c: blue; .m(1); }";
        let (tree, scopes) = build(source, Dialect::Less);
        let mixins = scopes.find_symbols_at_offset(0, Some(SymbolKind::Mixin));
        assert_eq!(names(&mixins), vec![".m"]);
        let in_mixin = source.find("color").unwrap();
        let vars = scopes.find_symbols_at_offset(in_mixin, Some(SymbolKind::Variable));
        assert_eq!(names(&vars), vec!["@a", "@b", "@c"]);
        let in_x = source.find(".m(1)").unwrap();
        let c = scopes.find_symbol("@c", in_x, Some(SymbolKind::Variable)).unwrap();
        assert_eq!(c.value_text(&tree), Some("blue"));
    }

    #[test]
    fn test_keyframes_and_custom_properties() {
        let source = "@keyframes spin { to { opacity: 1 } } .a { --gap: 4px; } .b { margin: var(--gap); }";
        let (_, scopes) = build(source, Dialect::Css);
        let in_b = source.find("margin").unwrap();
        let keyframes = scopes.find_symbols_at_offset(in_b, Some(SymbolKind::Keyframes));
        assert_eq!(names(&keyframes), vec!["spin"]);
        let gap = scopes.find_symbol("--gap", in_b, Some(SymbolKind::Variable)).unwrap();
        assert_eq!(gap.scope, scopes.root());
    }

    #[test]
    fn test_unclosed_block_scope_reaches_end() {
        let source = "$x: 1; .a { $y: 2; width: ";
        let (_, scopes) = build(source, Dialect::Scss);
        let inner = scopes.scope(1);
        assert!(inner.open_ended);
        assert_eq!(scopes.scope_at_offset(source.len()), Some(1));
        let vars = scopes.find_symbols_at_offset(source.len(), Some(SymbolKind::Variable));
        assert_eq!(names(&vars), vec!["$x", "$y"]);
    }

    #[test]
    fn test_closed_block_excludes_offset_after_brace() {
        let source = ".a { $y: 2; }";
        let (_, scopes) = build(source, Dialect::Scss);
        assert!(!scopes.scope(1).open_ended);
        assert_eq!(scopes.scope_at_offset(source.len()), Some(0));
        assert!(scopes.find_symbol("$y", source.len(), None).is_none());
        assert_eq!(scopes.scope_at_offset(source.len() + 1), None);
    }

    #[test]
    fn test_unquote_and_namespace_helpers() {
        assert_eq!(unquote("\"a\""), "a");
        assert_eq!(unquote("'a"), "a");
        assert_eq!(import_path("url( 'x.css' )"), "x.css");
        assert_eq!(default_namespace("sass:math"), "math");
        assert_eq!(default_namespace("a/b/_c.scss"), "c");
        assert_eq!(default_namespace("config"), "config");
    }
}
