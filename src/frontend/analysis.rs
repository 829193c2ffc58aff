//! One-call analysis: parse a document and build its scopes.

use stylelens_syntax::diagnostics::Issue;
use stylelens_syntax::parser;
use stylelens_syntax::tree::SyntaxTree;

use crate::config::AnalysisConfig;
use crate::frontend::symbols::{ScopeTree, Symbol, SymbolKind};

/// Result of [`analyze`].
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tree: SyntaxTree,
    /// `None` when the config turned scope building off.
    pub scopes: Option<ScopeTree>,
    max_issues: Option<usize>,
}

impl Analysis {
    /// Issues in document order, capped at the configured maximum.
    pub fn issues(&self) -> Vec<&Issue> {
        let mut issues = self.tree.issues();
        if let Some(max) = self.max_issues {
            issues.truncate(max);
        }
        issues
    }

    pub fn has_issues(&self) -> bool {
        !self.tree.issues().is_empty()
    }

    /// Symbols visible at `offset`; empty when scopes were not built.
    pub fn symbols_at(&self, offset: usize, kind: Option<SymbolKind>) -> Vec<&Symbol> {
        self.scopes
            .as_ref()
            .map(|scopes| scopes.find_symbols_at_offset(offset, kind))
            .unwrap_or_default()
    }
}

/// Parse `source` and, unless disabled, build its scope tree.
#[tracing::instrument(skip_all, fields(source_len = source.len(), dialect = %config.dialect))]
pub fn analyze(source: &str, config: &AnalysisConfig) -> Analysis {
    let tree = parser::parse(source, config.dialect);
    let scopes = config.build_scopes.then(|| ScopeTree::build(&tree));
    Analysis {
        tree,
        scopes,
        max_issues: config.max_issues,
    }
}
