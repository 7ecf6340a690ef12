//! Server state management.
//!
//! This module manages the state of the language server: the analysis host
//! holding every open document, the workspace folders and the project
//! configuration.

use std::path::PathBuf;

use borm_ide::{AnalysisHost, Catalog, Diagnostic};
use parking_lot::{RwLock, RwLockReadGuard};
use tower_lsp::lsp_types::Url;

use crate::config::ProjectConfig;

/// The server state.
pub struct ServerState {
    /// Open documents and the function catalog.
    analysis: RwLock<AnalysisHost>,
    /// Workspace folders.
    workspace_folders: RwLock<Vec<Url>>,
    /// Configuration of the first workspace folder.
    config: RwLock<Option<ProjectConfig>>,
    /// Catalog path given on the command line.
    catalog_override: Option<PathBuf>,
    /// Catalog path given in the client's initialization options.
    client_catalog: RwLock<Option<PathBuf>>,
}

impl ServerState {
    /// Creates a new server state.
    pub fn new(catalog_override: Option<PathBuf>) -> Self {
        Self {
            analysis: RwLock::new(AnalysisHost::new()),
            workspace_folders: RwLock::new(Vec::new()),
            config: RwLock::new(None),
            catalog_override,
            client_catalog: RwLock::new(None),
        }
    }

    /// Opens a document, returning its diagnostics.
    pub fn open_document(&self, uri: &Url, version: i32, content: String) -> Vec<Diagnostic> {
        self.analysis.write().open(uri.as_str(), content, version)
    }

    /// Replaces a document's content, returning its new diagnostics.
    pub fn update_document(&self, uri: &Url, version: i32, content: String) -> Vec<Diagnostic> {
        self.analysis.write().update(uri.as_str(), content, version)
    }

    /// Closes a document. Returns false if it was not open.
    pub fn close_document(&self, uri: &Url) -> bool {
        self.analysis.write().close(uri.as_str())
    }

    /// Returns the content of an open document.
    pub fn document_content(&self, uri: &Url) -> Option<String> {
        self.analysis
            .read()
            .document(uri.as_str())
            .map(|doc| doc.text().to_string())
    }

    /// Read access to the analysis host.
    pub fn analysis(&self) -> RwLockReadGuard<'_, AnalysisHost> {
        self.analysis.read()
    }

    /// Replaces the function catalog.
    pub fn set_catalog(&self, catalog: Catalog) {
        self.analysis.write().set_catalog(catalog);
    }

    /// Sets the workspace folders.
    pub fn set_workspace_folders(&self, folders: Vec<Url>) {
        *self.workspace_folders.write() = folders;
    }

    /// Gets the workspace folders.
    pub fn workspace_folders(&self) -> Vec<Url> {
        self.workspace_folders.read().clone()
    }

    /// Installs the project configuration and its diagnostic settings.
    pub fn set_config(&self, config: ProjectConfig) {
        self.analysis
            .write()
            .set_diagnostic_settings(config.diagnostics.clone());
        *self.config.write() = Some(config);
    }

    /// Records the catalog path sent by the client.
    pub fn set_client_catalog(&self, path: Option<PathBuf>) {
        *self.client_catalog.write() = path;
    }

    /// The catalog to load: the command line wins over the client's
    /// options, which win over the workspace configuration.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.catalog_override {
            return Some(path.clone());
        }
        if let Some(path) = self.client_catalog.read().clone() {
            return Some(path);
        }
        self.config.read().as_ref().and_then(ProjectConfig::catalog_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borm_ide::Severity;
    use std::path::Path;

    fn uri() -> Url {
        Url::parse("file:///main.borm").unwrap()
    }

    #[test]
    fn documents_round_trip_through_the_host() {
        let state = ServerState::new(None);
        let diagnostics = state.open_document(&uri(), 1, "int x;\n#include <a.h>".to_string());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            state.document_content(&uri()).as_deref(),
            Some("int x;\n#include <a.h>")
        );

        let diagnostics = state.update_document(&uri(), 2, "int x;".to_string());
        assert!(diagnostics.is_empty());
        assert_eq!(
            state.analysis().document(uri().as_str()).map(|doc| doc.version()),
            Some(2)
        );

        assert!(state.close_document(&uri()));
        assert!(state.document_content(&uri()).is_none());
    }

    #[test]
    fn config_applies_diagnostic_settings() {
        let state = ServerState::new(None);
        let config = ProjectConfig::from_contents(
            Path::new("/ws"),
            None,
            "[diagnostics]\nseverity = \"warning\"\n",
        );
        state.set_config(config);
        let diagnostics = state.open_document(&uri(), 1, "bool".to_string());
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn catalog_path_precedence() {
        let config = ProjectConfig::from_contents(
            Path::new("/ws"),
            None,
            "[catalog]\npath = \"funcs.csv\"\n",
        );

        let state = ServerState::new(None);
        assert_eq!(state.catalog_path(), None);
        state.set_config(config.clone());
        assert_eq!(state.catalog_path(), Some(PathBuf::from("/ws/funcs.csv")));
        state.set_client_catalog(Some(PathBuf::from("/client.csv")));
        assert_eq!(state.catalog_path(), Some(PathBuf::from("/client.csv")));

        let state = ServerState::new(Some(PathBuf::from("/cli.csv")));
        state.set_config(config);
        state.set_client_catalog(Some(PathBuf::from("/client.csv")));
        assert_eq!(state.catalog_path(), Some(PathBuf::from("/cli.csv")));
    }
}
