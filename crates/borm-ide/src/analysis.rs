//! Per-document analysis state.
//!
//! [`AnalysisHost`] owns the current text and tree of every open document,
//! keyed by URI, plus the function catalog. Each open or change rebuilds the
//! document's tree from scratch and replaces the old one wholesale.

use std::sync::Arc;

use borm_syntax::{parse, Position, Span, SyntaxTree};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::catalog::Catalog;
use crate::code_actions::{code_actions, CodeAction};
use crate::completion::{complete, CompletionItem};
use crate::diagnostics::{collect_diagnostics, Diagnostic, DiagnosticSettings};
use crate::goto_def::goto_definition;
use crate::hover::{hover, HoverResult};

/// An open document.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    text: String,
    version: i32,
    tree: Arc<SyntaxTree>,
}

impl DocumentAnalysis {
    /// The current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The client's version number for the text.
    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// The tree built from the current text.
    #[must_use]
    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }
}

/// Analysis state for all open documents.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    documents: FxHashMap<String, DocumentAnalysis>,
    catalog: Arc<Catalog>,
    settings: DiagnosticSettings,
}

impl AnalysisHost {
    /// Creates an empty host with an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the function catalog.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Arc::new(catalog);
    }

    /// The function catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Replaces the diagnostic settings. Takes effect on the next rebuild.
    pub fn set_diagnostic_settings(&mut self, settings: DiagnosticSettings) {
        self.settings = settings;
    }

    /// Starts tracking a document and returns its diagnostics.
    pub fn open(&mut self, uri: &str, text: String, version: i32) -> Vec<Diagnostic> {
        self.rebuild(uri, text, version)
    }

    /// Replaces a document's text and returns its new diagnostics.
    ///
    /// An unknown URI is treated like an open.
    pub fn update(&mut self, uri: &str, text: String, version: i32) -> Vec<Diagnostic> {
        self.rebuild(uri, text, version)
    }

    /// Stops tracking a document. Returns false if it was not open.
    pub fn close(&mut self, uri: &str) -> bool {
        self.documents.remove(uri).is_some()
    }

    fn rebuild(&mut self, uri: &str, text: String, version: i32) -> Vec<Diagnostic> {
        let tree = Arc::new(parse(uri, &text));
        let diagnostics = collect_diagnostics(&tree, &self.settings);
        debug!(
            uri,
            version,
            nodes = tree.len(),
            diagnostics = diagnostics.len(),
            "rebuilt syntax tree"
        );
        self.documents
            .insert(uri.to_string(), DocumentAnalysis { text, version, tree });
        diagnostics
    }

    /// Returns the document for `uri`, if open.
    #[must_use]
    pub fn document(&self, uri: &str) -> Option<&DocumentAnalysis> {
        self.documents.get(uri)
    }

    /// Current diagnostics for `uri`.
    #[must_use]
    pub fn diagnostics(&self, uri: &str) -> Vec<Diagnostic> {
        self.document(uri)
            .map(|doc| collect_diagnostics(&doc.tree, &self.settings))
            .unwrap_or_default()
    }

    /// Hover information at `position`.
    #[must_use]
    pub fn hover(&self, uri: &str, position: Position) -> Option<HoverResult> {
        let doc = self.document(uri)?;
        Some(hover(&doc.tree, position, &self.catalog))
    }

    /// Definition target for the symbol at `position`.
    #[must_use]
    pub fn definition(&self, uri: &str, position: Position) -> Option<Span> {
        self.document(uri)?;
        Some(goto_definition(position))
    }

    /// Quick fixes for the document.
    #[must_use]
    pub fn code_actions(&self, uri: &str) -> Vec<CodeAction> {
        self.document(uri)
            .map(|doc| code_actions(&doc.tree, &doc.text))
            .unwrap_or_default()
    }

    /// Completion items for the document.
    #[must_use]
    pub fn completions(&self, uri: &str) -> Vec<CompletionItem> {
        self.document(uri)
            .map(|doc| complete(&doc.tree, &self.catalog))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: &str = "file:///main.borm";

    #[test]
    fn open_and_update_replace_the_tree() {
        let mut host = AnalysisHost::new();
        let diagnostics = host.open(URI, "int x;\n#include <a.h>".to_string(), 1);
        assert_eq!(diagnostics.len(), 1);

        let diagnostics = host.update(URI, "#include <a.h>\nint x;".to_string(), 2);
        assert!(diagnostics.is_empty());
        let doc = host.document(URI).unwrap();
        assert_eq!(doc.version(), 2);
        assert_eq!(doc.text(), "#include <a.h>\nint x;");
        assert_eq!(doc.tree().node(doc.tree().root()).value(), URI);
    }

    #[test]
    fn close_forgets_the_document() {
        let mut host = AnalysisHost::new();
        host.open(URI, "int x;".to_string(), 1);
        assert!(host.close(URI));
        assert!(!host.close(URI));
        assert!(host.hover(URI, Position::new(0, 0)).is_none());
        assert!(host.diagnostics(URI).is_empty());
    }

    #[test]
    fn queries_on_unknown_documents_are_empty() {
        let host = AnalysisHost::new();
        assert!(host.hover(URI, Position::new(0, 0)).is_none());
        assert!(host.definition(URI, Position::new(1, 0)).is_none());
        assert!(host.code_actions(URI).is_empty());
        assert!(host.completions(URI).is_empty());
    }

    #[test]
    fn diagnostic_settings_apply_on_rebuild() {
        let mut host = AnalysisHost::new();
        host.set_diagnostic_settings(DiagnosticSettings {
            source: "custom".to_string(),
            severity: crate::Severity::Hint,
        });
        let diagnostics = host.open(URI, "bool".to_string(), 1);
        assert_eq!(diagnostics[0].source, "custom");
        assert_eq!(diagnostics[0].severity, crate::Severity::Hint);
    }
}
