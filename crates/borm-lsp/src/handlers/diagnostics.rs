//! Diagnostics publishing helpers.

use borm_ide::Diagnostic as BormDiagnostic;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tower_lsp::Client;
use tracing::debug;

use super::lsp_utils::{span_to_range, to_lsp_severity};

pub(crate) fn to_lsp_diagnostic(diagnostic: BormDiagnostic) -> Diagnostic {
    Diagnostic {
        range: span_to_range(diagnostic.span),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        source: Some(diagnostic.source),
        message: diagnostic.message,
        ..Default::default()
    }
}

pub(crate) async fn publish_diagnostics(
    client: &Client,
    uri: &Url,
    diagnostics: Vec<BormDiagnostic>,
    version: Option<i32>,
) {
    debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
    let diagnostics = diagnostics.into_iter().map(to_lsp_diagnostic).collect();
    client
        .publish_diagnostics(uri.clone(), diagnostics, version)
        .await;
}
