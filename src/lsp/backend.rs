//! LSP (Language Server Protocol) backend implementation for stylelens

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use stylelens_core::lang::dialect::Dialect;

use crate::config::AnalysisConfig;
use crate::frontend::analysis::{Analysis, analyze};
use crate::frontend::references::definition_at;
use crate::lsp::diagnostics::{issue_to_diagnostic, position_to_offset, span_to_range};
use crate::symbols::{Symbol, SymbolKind as StyleSymbolKind};

/// Document state stored by the LSP
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub dialect: Dialect,
    pub analysis: Analysis,
    pub version: i32,
}

impl DocumentState {
    pub fn source(&self) -> &str {
        self.analysis.tree.source()
    }
}

/// Stylesheet Language Server
pub struct StyleLanguageServer {
    client: Client,
    documents: Arc<RwLock<HashMap<Url, DocumentState>>>,
}

impl StyleLanguageServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Analyze a document, store the result and publish its diagnostics
    async fn analyze_document(&self, uri: &Url, dialect: Dialect, source: &str, version: i32) {
        let analysis = analyze(source, &AnalysisConfig::new(dialect));
        let diagnostics: Vec<Diagnostic> = analysis
            .issues()
            .into_iter()
            .map(|issue| issue_to_diagnostic(issue, source))
            .collect();
        tracing::debug!(%uri, version, diagnostics = diagnostics.len(), "analyzed document");

        {
            let mut docs = self.documents.write().await;
            docs.insert(
                uri.clone(),
                DocumentState {
                    dialect,
                    analysis,
                    version,
                },
            );
        }

        // Publish diagnostics (even if empty, to clear old ones)
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, Some(version))
            .await;
    }
}

/// Dialect of a document: the editor's language id, else the file extension, else plain CSS.
pub fn dialect_for(language_id: Option<&str>, uri: &Url) -> Dialect {
    language_id
        .and_then(Dialect::from_language_id)
        .or_else(|| uri.to_file_path().ok().and_then(|path| Dialect::from_path(&path)))
        .unwrap_or_default()
}

fn lsp_symbol_kind(kind: StyleSymbolKind) -> SymbolKind {
    match kind {
        StyleSymbolKind::Variable => SymbolKind::VARIABLE,
        StyleSymbolKind::Mixin => SymbolKind::METHOD,
        StyleSymbolKind::Function => SymbolKind::FUNCTION,
        StyleSymbolKind::Import => SymbolKind::MODULE,
        StyleSymbolKind::Keyframes => SymbolKind::CLASS,
    }
}

/// Flat document symbol list, in document order
#[allow(deprecated)]
pub fn document_symbols(uri: &Url, source: &str, symbols: &[Symbol]) -> Vec<SymbolInformation> {
    symbols
        .iter()
        .map(|symbol| SymbolInformation {
            name: symbol.name.clone(),
            kind: lsp_symbol_kind(symbol.kind),
            tags: None,
            deprecated: None,
            location: Location {
                uri: uri.clone(),
                range: span_to_range(source, symbol.span.start, symbol.span.end),
            },
            container_name: None,
        })
        .collect()
}

#[tower_lsp::async_trait]
impl LanguageServer for StyleLanguageServer {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Real-time diagnostics via text sync
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                // Go-to-definition
                definition_provider: Some(OneOf::Left(true)),
                // Outline
                document_symbol_provider: Some(OneOf::Left(true)),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "stylelens-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "stylelens LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        let dialect = dialect_for(Some(&document.language_id), &document.uri);
        self.analyze_document(&document.uri, dialect, &document.text, document.version)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let known = self.documents.read().await.get(&uri).map(|doc| doc.dialect);
        let dialect = known.unwrap_or_else(|| dialect_for(None, &uri));

        // We use FULL sync, so there's only one change with the full content
        if let Some(change) = params.content_changes.into_iter().next() {
            self.analyze_document(&uri, dialect, &change.text, version).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        // Remove document from cache
        let mut docs = self.documents.write().await;
        docs.remove(&uri);

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn goto_definition(&self, params: GotoDefinitionParams) -> Result<Option<GotoDefinitionResponse>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let docs = self.documents.read().await;
        let Some(doc) = docs.get(uri) else {
            return Ok(None);
        };
        let Some(offset) = position_to_offset(doc.source(), position) else {
            return Ok(None);
        };

        Ok(definition_at(&doc.analysis, offset).map(|symbol| {
            let range = span_to_range(doc.source(), symbol.name_span.start, symbol.name_span.end);
            GotoDefinitionResponse::Scalar(Location {
                uri: uri.clone(),
                range,
            })
        }))
    }

    async fn document_symbol(&self, params: DocumentSymbolParams) -> Result<Option<DocumentSymbolResponse>> {
        let uri = &params.text_document.uri;

        let docs = self.documents.read().await;
        let Some(doc) = docs.get(uri) else {
            return Ok(None);
        };
        let Some(scopes) = doc.analysis.scopes.as_ref() else {
            return Ok(None);
        };

        let symbols = document_symbols(uri, doc.source(), scopes.symbols());
        Ok(Some(DocumentSymbolResponse::Flat(symbols)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::symbols::ScopeTree;
    use stylelens_syntax::parser;

    #[test]
    fn test_dialect_for() {
        let uri = Url::parse("file:///project/theme.less").unwrap();
        assert_eq!(dialect_for(Some("scss"), &uri), Dialect::Scss);
        assert_eq!(dialect_for(None, &uri), Dialect::Less);
        assert_eq!(dialect_for(Some("plaintext"), &uri), Dialect::Less);
        let untitled = Url::parse("untitled:Untitled-1").unwrap();
        assert_eq!(dialect_for(None, &untitled), Dialect::Css);
    }

    #[test]
    fn test_document_symbols() {
        let source = "$gap: 4px;\n@mixin pad { padding: $gap; }\n@keyframes spin { to { opacity: 1 } }";
        let tree = parser::parse(source, Dialect::Scss);
        let scopes = ScopeTree::build(&tree);
        let uri = Url::parse("file:///a.scss").unwrap();
        let symbols = document_symbols(&uri, source, scopes.symbols());
        let summary: Vec<_> = symbols.iter().map(|s| (s.name.as_str(), s.kind)).collect();
        assert_eq!(
            summary,
            vec![("$gap", SymbolKind::VARIABLE), ("pad", SymbolKind::METHOD), ("spin", SymbolKind::CLASS)]
        );
        assert_eq!(symbols[1].location.range.start, Position::new(1, 0));
    }
}
