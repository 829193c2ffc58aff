//! Frozen, arena-backed syntax tree.
//!
//! [`SyntaxTree`] stores every node in one `Vec` in pre-order. Nodes refer to each other by [`NodeId`] index: children
//! are owned (listed in order by their parent), the parent link is a plain back-reference. [`NodeRef`] pairs an id
//! with its tree and is the handle most callers work with.
//!
//! ## Examples
//! ```rust
//! use stylelens_core::lang::dialect::Dialect;
//! use stylelens_syntax::ast::NodeKind;
//! use stylelens_syntax::parser;
//!
//! let tree = parser::parse(".a { color: red; }", Dialect::Css);
//! let path: Vec<_> = tree.node_path(6).into_iter().map(|id| tree.node(id).kind()).collect();
//! assert_eq!(
//!     path,
//!     vec![NodeKind::Stylesheet, NodeKind::RuleSet, NodeKind::Declarations, NodeKind::Declaration, NodeKind::Property]
//! );
//! ```

use std::fmt;
use std::fmt::Write as _;

use stylelens_core::lang::dialect::Dialect;

use crate::ast::{Node, NodeKind, Span};
use crate::diagnostics::Issue;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena slot for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub issues: Vec<Issue>,
}

/// Immutable result of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    source: String,
    dialect: Dialect,
    nodes: Vec<NodeData>,
}

/// Pre-order traversal callback.
///
/// Return `false` from [`Visitor::visit`] to skip the children of the visited node. Any
/// `FnMut(NodeRef<'_>) -> bool` closure is a visitor.
pub trait Visitor {
    fn visit(&mut self, node: NodeRef<'_>) -> bool;
}

impl<F> Visitor for F
where
    F: FnMut(NodeRef<'_>) -> bool,
{
    fn visit(&mut self, node: NodeRef<'_>) -> bool {
        self(node)
    }
}

impl SyntaxTree {
    /// Freeze an owned parse result.
    ///
    /// ## Parameters
    /// - `source`: the text that was parsed.
    /// - `dialect`: the grammar it was parsed with.
    /// - `root`: the owned root node.
    /// - `lexical`: scanner issues; each is attached to the innermost node containing its start.
    pub fn from_node(source: impl Into<String>, dialect: Dialect, root: Node, lexical: Vec<Issue>) -> Self {
        let mut nodes: Vec<NodeData> = Vec::with_capacity(root.subtree_len());
        let mut stack: Vec<(Node, Option<NodeId>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = NodeId(nodes.len() as u32);
            if let Some(parent) = parent {
                nodes[parent.index()].children.push(id);
            }
            let Node {
                kind,
                span,
                children,
                issues,
            } = node;
            nodes.push(NodeData {
                kind,
                span,
                parent,
                children: Vec::with_capacity(children.len()),
                issues,
            });
            for child in children.into_iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        let mut tree = Self {
            source: source.into(),
            dialect,
            nodes,
        };
        for issue in lexical {
            let root = tree.root_id();
            let target = tree
                .find_child_at_offset(root, issue.span.start, true)
                .unwrap_or(root);
            tree.nodes[target.index()].issues.push(issue);
        }
        tree
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root_id())
    }

    /// Handle for `id`.
    ///
    /// ## Panics
    /// - If `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.index() < self.nodes.len(), "INVARIANT: node id {} outside tree", id.index());
        NodeRef { tree: self, id }
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i as u32),
        })
    }

    /// Every issue in the tree, ordered by start offset (ties keep tree order).
    pub fn issues(&self) -> Vec<&Issue> {
        let mut issues: Vec<&Issue> = self.nodes.iter().flat_map(|n| n.issues.iter()).collect();
        issues.sort_by_key(|issue| issue.span.start);
        issues
    }

    /// Pre-order traversal from `id`. The visitor decides whether to descend.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if visitor.visit(self.node(current)) {
                stack.extend(self.nodes[current.index()].children.iter().rev().copied());
            }
        }
    }

    /// Innermost descendant of `id` whose span contains `offset`.
    ///
    /// ## Parameters
    /// - `include_right_boundary`: also accept a node that ends exactly at `offset` (the caret right after a word).
    ///   A node that strictly contains the offset is always preferred over one that merely ends there.
    ///
    /// ## Returns
    /// - `None` if no child of `id` contains the offset.
    pub fn find_child_at_offset(&self, id: NodeId, offset: usize, include_right_boundary: bool) -> Option<NodeId> {
        let mut found = None;
        let mut current = id;
        while let Some(child) = self.child_containing(current, offset, include_right_boundary) {
            found = Some(child);
            current = child;
        }
        found
    }

    /// Chain of nodes from the root to the innermost node at `offset` (right boundary inclusive).
    ///
    /// Empty if the offset lies outside the document.
    pub fn node_path(&self, offset: usize) -> Vec<NodeId> {
        let root = self.root_id();
        if !self.nodes[root.index()].span.contains(offset, true) {
            return Vec::new();
        }
        let mut path = vec![root];
        let mut current = root;
        while let Some(child) = self.child_containing(current, offset, true) {
            path.push(child);
            current = child;
        }
        path
    }

    fn child_containing(&self, id: NodeId, offset: usize, include_right_boundary: bool) -> Option<NodeId> {
        let children = &self.nodes[id.index()].children;
        let strict = children
            .iter()
            .copied()
            .find(|c| self.nodes[c.index()].span.contains(offset, false));
        if strict.is_some() || !include_right_boundary {
            return strict;
        }
        children
            .iter()
            .rev()
            .copied()
            .find(|c| self.nodes[c.index()].span.end == offset && self.nodes[c.index()].span.start <= offset)
    }

    /// Indented debug rendering: one line per node (`Kind start..end`), leaf text quoted, issues marked with `!`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root_id(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            let _ = write!(out, "{:indent$}{} {}", "", node.kind(), node.span(), indent = depth * 2);
            if node.data().children.is_empty() {
                let _ = write!(out, " {:?}", node.text());
            }
            out.push('\n');
            for issue in node.issues() {
                let _ = writeln!(
                    out,
                    "{:indent$}! {} {} @ {}",
                    "",
                    issue.code,
                    issue.message,
                    issue.span,
                    indent = depth * 2 + 2
                );
            }
            for child in node.data().children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }
}

/// Borrowed handle to one node.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.index()]
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    /// Source text covered by this node.
    pub fn text(&self) -> &'a str {
        let span = self.span();
        self.tree.source.get(span.start..span.end).unwrap_or("")
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |id| tree.node(*id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    /// First child of the given kind.
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.kind() == kind)
    }

    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(move |c| c.kind() == kind)
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// Issues attached directly to this node.
    pub fn issues(&self) -> &'a [Issue] {
        &self.data().issues
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        self.tree.accept(self.id, visitor);
    }

    pub fn find_child_at_offset(&self, offset: usize, include_right_boundary: bool) -> Option<NodeRef<'a>> {
        self.tree
            .find_child_at_offset(self.id, offset, include_right_boundary)
            .map(|id| self.tree.node(id))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind(), self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::IssueCode;

    fn leaf(kind: NodeKind, start: usize, end: usize) -> Node {
        Node::new(kind, Span::new(start, end))
    }

    /// `ab cd` as Stylesheet[Expression[Identifier, Identifier]]
    fn sample() -> SyntaxTree {
        let mut expr = Node::new(NodeKind::Expression, Span::new(0, 5));
        expr.push(leaf(NodeKind::Identifier, 0, 2));
        expr.push(leaf(NodeKind::Identifier, 3, 5));
        let mut root = Node::new(NodeKind::Stylesheet, Span::new(0, 5));
        root.push(expr);
        SyntaxTree::from_node("ab cd", Dialect::Css, root, Vec::new())
    }

    #[test]
    fn test_freeze_is_preorder_with_parent_links() {
        let tree = sample();
        let kinds: Vec<_> = tree.iter().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Stylesheet, NodeKind::Expression, NodeKind::Identifier, NodeKind::Identifier]
        );
        for node in tree.iter().skip(1) {
            let parent = node.parent().unwrap();
            assert!(parent.data().children.contains(&node.id()));
        }
    }

    #[test]
    fn test_find_child_at_offset_boundaries() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.find_child_at_offset(1, false).map(|n| n.text()), Some("ab"));
        // Between the identifiers: only the expression contains offset 2 strictly.
        assert_eq!(root.find_child_at_offset(2, false).map(|n| n.kind()), Some(NodeKind::Expression));
        assert_eq!(root.find_child_at_offset(2, true).map(|n| n.text()), Some("ab"));
        // End of document.
        assert_eq!(root.find_child_at_offset(5, false), None);
        assert_eq!(root.find_child_at_offset(5, true).map(|n| n.text()), Some("cd"));
    }

    #[test]
    fn test_node_path() {
        let tree = sample();
        let path: Vec<_> = tree.node_path(4).into_iter().map(|id| tree.node(id).text()).collect();
        assert_eq!(path, vec!["ab cd", "ab cd", "cd"]);
        assert!(tree.node_path(6).is_empty());
    }

    #[test]
    fn test_accept_can_skip_subtrees() {
        let tree = sample();
        let mut seen = Vec::new();
        tree.root().accept(&mut |node: NodeRef<'_>| {
            seen.push(node.kind());
            node.kind() != NodeKind::Expression
        });
        assert_eq!(seen, vec![NodeKind::Stylesheet, NodeKind::Expression]);
    }

    #[test]
    fn test_lexical_issues_attach_to_innermost_node() {
        let mut root = Node::new(NodeKind::Stylesheet, Span::new(0, 5));
        root.push(leaf(NodeKind::StringLiteral, 1, 5));
        let issue = Issue::lexical(IssueCode::UnterminatedString, Span::new(1, 5));
        let tree = SyntaxTree::from_node(" 'abc", Dialect::Css, root, vec![issue]);
        let literal = tree.root().children().next().unwrap();
        assert_eq!(literal.issues().len(), 1);
        assert_eq!(tree.issues().len(), 1);
    }

    #[test]
    fn test_dump() {
        let tree = sample();
        insta::assert_snapshot!(tree.dump(), @r#"
        Stylesheet 0..5
          Expression 0..5
            Identifier 0..2 "ab"
            Identifier 3..5 "cd"
        "#);
    }
}
