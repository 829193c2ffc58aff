//! Syntax node vocabulary for CSS, SCSS and Less.
//!
//! The parser builds owned [`Node`] values while it descends. Abandoned attempts (backtracking) simply drop their
//! subtree. Once a parse is complete the owned tree is frozen into the arena-backed [`crate::tree::SyntaxTree`], which
//! adds parent links and the query API.

use std::fmt;

use crate::diagnostics::Issue;

/// Byte range in the source, half open (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Return `true` if `offset` lies in `start..end`, or equals `end` when `include_end` is set.
    pub fn contains(&self, offset: usize, include_end: bool) -> bool {
        self.start <= offset && (offset < self.end || (include_end && offset == self.end))
    }

    /// Return `true` if `other` lies completely inside this span.
    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ============================================================================
// Node kinds
// ============================================================================

/// Closed set of syntax node kinds shared by the three dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Structure
    Stylesheet,
    RuleSet,
    Declarations,

    // Selectors
    Selector,
    SimpleSelector,
    ElementNameSelector,
    ClassSelector,
    IdSelector,
    AttributeSelector,
    PseudoSelector,
    NestingSelector,
    SelectorCombinator,
    SelectorPlaceholder,
    SelectorInterpolation,

    // Declarations
    Declaration,
    CustomPropertyDeclaration,
    CustomPropertyValue,
    NestedProperties,
    Property,
    Prio,
    Flag,

    // Values
    Expression,
    BinaryExpression,
    UnaryExpression,
    ParenthesizedExpression,
    BracketedList,
    ListEntry,
    Operator,
    Identifier,
    NumericValue,
    HexColorValue,
    StringLiteral,
    URILiteral,
    UnicodeRange,
    Function,
    FunctionArgument,
    FunctionParameter,
    Interpolation,
    Variable,
    VariableName,
    ModuleMember,

    // Preprocessor definitions and references
    VariableDeclaration,
    MixinDeclaration,
    MixinReference,
    MixinContentReference,
    MixinContentDeclaration,
    FunctionDeclaration,
    ReturnStatement,
    IfStatement,
    ElseStatement,
    ForStatement,
    EachStatement,
    WhileStatement,
    ExtendsReference,
    Debug,
    AtRoot,
    Use,
    Forward,
    ForwardVisibility,
    ModuleConfiguration,

    // CSS at-rules
    Charset,
    Import,
    Namespace,
    Media,
    MediaQuery,
    MediaCondition,
    MediaFeature,
    Supports,
    SupportsCondition,
    Page,
    PageBoxMarginBox,
    FontFace,
    Keyframe,
    KeyframeSelector,
    Layer,
    PropertyAtRule,
    Container,
    UnknownAtRule,
    UnknownAtRuleValue,

    // Less
    LessGuard,
    GuardCondition,
    EscapedValue,
    DetachedRuleset,
    DetachedRulesetReference,
    ImportOptions,
    Plugin,
}

impl NodeKind {
    /// Stable name, used by tree dumps and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Stylesheet => "Stylesheet",
            NodeKind::RuleSet => "RuleSet",
            NodeKind::Declarations => "Declarations",
            NodeKind::Selector => "Selector",
            NodeKind::SimpleSelector => "SimpleSelector",
            NodeKind::ElementNameSelector => "ElementNameSelector",
            NodeKind::ClassSelector => "ClassSelector",
            NodeKind::IdSelector => "IdSelector",
            NodeKind::AttributeSelector => "AttributeSelector",
            NodeKind::PseudoSelector => "PseudoSelector",
            NodeKind::NestingSelector => "NestingSelector",
            NodeKind::SelectorCombinator => "SelectorCombinator",
            NodeKind::SelectorPlaceholder => "SelectorPlaceholder",
            NodeKind::SelectorInterpolation => "SelectorInterpolation",
            NodeKind::Declaration => "Declaration",
            NodeKind::CustomPropertyDeclaration => "CustomPropertyDeclaration",
            NodeKind::CustomPropertyValue => "CustomPropertyValue",
            NodeKind::NestedProperties => "NestedProperties",
            NodeKind::Property => "Property",
            NodeKind::Prio => "Prio",
            NodeKind::Flag => "Flag",
            NodeKind::Expression => "Expression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::ParenthesizedExpression => "ParenthesizedExpression",
            NodeKind::BracketedList => "BracketedList",
            NodeKind::ListEntry => "ListEntry",
            NodeKind::Operator => "Operator",
            NodeKind::Identifier => "Identifier",
            NodeKind::NumericValue => "NumericValue",
            NodeKind::HexColorValue => "HexColorValue",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::URILiteral => "URILiteral",
            NodeKind::UnicodeRange => "UnicodeRange",
            NodeKind::Function => "Function",
            NodeKind::FunctionArgument => "FunctionArgument",
            NodeKind::FunctionParameter => "FunctionParameter",
            NodeKind::Interpolation => "Interpolation",
            NodeKind::Variable => "Variable",
            NodeKind::VariableName => "VariableName",
            NodeKind::ModuleMember => "ModuleMember",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::MixinDeclaration => "MixinDeclaration",
            NodeKind::MixinReference => "MixinReference",
            NodeKind::MixinContentReference => "MixinContentReference",
            NodeKind::MixinContentDeclaration => "MixinContentDeclaration",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ElseStatement => "ElseStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::EachStatement => "EachStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::ExtendsReference => "ExtendsReference",
            NodeKind::Debug => "Debug",
            NodeKind::AtRoot => "AtRoot",
            NodeKind::Use => "Use",
            NodeKind::Forward => "Forward",
            NodeKind::ForwardVisibility => "ForwardVisibility",
            NodeKind::ModuleConfiguration => "ModuleConfiguration",
            NodeKind::Charset => "Charset",
            NodeKind::Import => "Import",
            NodeKind::Namespace => "Namespace",
            NodeKind::Media => "Media",
            NodeKind::MediaQuery => "MediaQuery",
            NodeKind::MediaCondition => "MediaCondition",
            NodeKind::MediaFeature => "MediaFeature",
            NodeKind::Supports => "Supports",
            NodeKind::SupportsCondition => "SupportsCondition",
            NodeKind::Page => "Page",
            NodeKind::PageBoxMarginBox => "PageBoxMarginBox",
            NodeKind::FontFace => "FontFace",
            NodeKind::Keyframe => "Keyframe",
            NodeKind::KeyframeSelector => "KeyframeSelector",
            NodeKind::Layer => "Layer",
            NodeKind::PropertyAtRule => "PropertyAtRule",
            NodeKind::Container => "Container",
            NodeKind::UnknownAtRule => "UnknownAtRule",
            NodeKind::UnknownAtRuleValue => "UnknownAtRuleValue",
            NodeKind::LessGuard => "LessGuard",
            NodeKind::GuardCondition => "GuardCondition",
            NodeKind::EscapedValue => "EscapedValue",
            NodeKind::DetachedRuleset => "DetachedRuleset",
            NodeKind::DetachedRulesetReference => "DetachedRulesetReference",
            NodeKind::ImportOptions => "ImportOptions",
            NodeKind::Plugin => "Plugin",
        }
    }

    /// Return `true` for the kinds whose `Declarations` child opens a lexical scope.
    pub fn introduces_body(self) -> bool {
        matches!(
            self,
            NodeKind::RuleSet
                | NodeKind::MixinDeclaration
                | NodeKind::FunctionDeclaration
                | NodeKind::MixinContentDeclaration
                | NodeKind::IfStatement
                | NodeKind::ElseStatement
                | NodeKind::ForStatement
                | NodeKind::EachStatement
                | NodeKind::WhileStatement
                | NodeKind::Media
                | NodeKind::Supports
                | NodeKind::Page
                | NodeKind::PageBoxMarginBox
                | NodeKind::FontFace
                | NodeKind::Keyframe
                | NodeKind::KeyframeSelector
                | NodeKind::Layer
                | NodeKind::PropertyAtRule
                | NodeKind::Container
                | NodeKind::AtRoot
                | NodeKind::UnknownAtRule
                | NodeKind::DetachedRuleset
                | NodeKind::MixinReference
                | NodeKind::NestedProperties
        )
    }

    /// Return `true` for selector parts (children of [`NodeKind::SimpleSelector`]).
    pub fn is_selector_part(self) -> bool {
        matches!(
            self,
            NodeKind::ElementNameSelector
                | NodeKind::ClassSelector
                | NodeKind::IdSelector
                | NodeKind::AttributeSelector
                | NodeKind::PseudoSelector
                | NodeKind::NestingSelector
                | NodeKind::SelectorPlaceholder
                | NodeKind::SelectorInterpolation
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Owned nodes (parser output before freezing)
// ============================================================================

/// A node under construction.
///
/// ## Notes
/// - Children are kept in source order and never overlap; the parser only ever appends.
/// - Issues recorded here belong to the node that was being built when they were detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
    pub issues: Vec<Issue>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Append a child. The child must start at or after the end of the previous child.
    pub fn push(&mut self, child: Node) {
        debug_assert!(
            self.children.last().is_none_or(|last| last.span.end <= child.span.start),
            "INVARIANT: children must not overlap ({} after {:?})",
            child.kind,
            self.children.last().map(|c| c.span)
        );
        self.children.push(child);
    }

    /// Append a child if present. Returns whether a child was appended.
    pub fn push_opt(&mut self, child: Option<Node>) -> bool {
        match child {
            Some(child) => {
                self.push(child);
                true
            }
            None => false,
        }
    }

    pub fn last_child_end(&self) -> Option<usize> {
        self.children.last().map(|c| c.span.end)
    }

    /// Total number of nodes in this subtree.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}
