//! Name references under the cursor.
//!
//! [`reference_at`] looks at the innermost node at an offset and decides which symbol name and kind it refers to, so
//! a host can resolve it with [`crate::symbols::ScopeTree::find_symbol`].

use stylelens_syntax::ast::{NodeKind, Span};
use stylelens_syntax::tree::{NodeRef, SyntaxTree};

use crate::frontend::analysis::Analysis;
use crate::symbols::{Symbol, SymbolKind};

/// A name used (or declared) at some offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub kind: SymbolKind,
    pub span: Span,
}

/// Properties whose identifier values name `@keyframes`.
const ANIMATION_PROPERTIES: &[&str] = &["animation", "animation-name"];

/// The reference at `offset`, if the innermost node there names a variable, mixin, function or keyframes.
///
/// Module members (`math.$pi`, `math.div()`) live in other files and are not references here.
pub fn reference_at(tree: &SyntaxTree, offset: usize) -> Option<Reference> {
    let path = tree.node_path(offset);
    let node = tree.node(*path.last()?);
    let parent = node.parent()?;
    if parent.kind() == NodeKind::ModuleMember || parent.parent().is_some_and(|g| g.kind() == NodeKind::ModuleMember) {
        return None;
    }

    let kind = match node.kind() {
        NodeKind::Variable | NodeKind::VariableName => SymbolKind::Variable,
        NodeKind::Property if parent.kind() == NodeKind::CustomPropertyDeclaration => SymbolKind::Variable,
        NodeKind::Identifier => identifier_kind(node, parent)?,
        _ => return None,
    };
    Some(Reference {
        name: node.text().to_string(),
        kind,
        span: node.span(),
    })
}

fn identifier_kind(node: NodeRef<'_>, parent: NodeRef<'_>) -> Option<SymbolKind> {
    if node.text().starts_with("--") {
        return Some(SymbolKind::Variable);
    }
    let is_first = parent.children().next().is_some_and(|first| first == node);
    match parent.kind() {
        NodeKind::MixinReference | NodeKind::MixinDeclaration => Some(SymbolKind::Mixin),
        NodeKind::FunctionDeclaration if is_first => Some(SymbolKind::Function),
        NodeKind::Function if is_first => Some(SymbolKind::Function),
        NodeKind::Keyframe => Some(SymbolKind::Keyframes),
        NodeKind::Expression => {
            let declaration = parent.parent().filter(|d| d.kind() == NodeKind::Declaration)?;
            let property = declaration.child_of_kind(NodeKind::Property)?;
            ANIMATION_PROPERTIES
                .iter()
                .any(|p| property.text().eq_ignore_ascii_case(p))
                .then_some(SymbolKind::Keyframes)
        }
        _ => None,
    }
}

/// Resolve the reference at `offset` to its declaration.
pub fn definition_at(analysis: &Analysis, offset: usize) -> Option<&Symbol> {
    let reference = reference_at(&analysis.tree, offset)?;
    let scopes = analysis.scopes.as_ref()?;
    scopes.find_symbol(&reference.name, offset, Some(reference.kind))
}
