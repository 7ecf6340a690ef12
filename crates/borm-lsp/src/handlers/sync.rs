//! Document synchronization handlers.

use tower_lsp::lsp_types::*;
use tower_lsp::Client;
use tracing::{info, warn};

use crate::state::ServerState;

use super::diagnostics::publish_diagnostics;
use super::lsp_utils::position_to_offset;

pub async fn did_open(client: &Client, state: &ServerState, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    info!("Document opened: {}", uri);
    let diagnostics = state.open_document(&uri, version, params.text_document.text);
    publish_diagnostics(client, &uri, diagnostics, Some(version)).await;
}

pub async fn did_change(client: &Client, state: &ServerState, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    info!("Document changed: {}", uri);
    if params.content_changes.is_empty() {
        return;
    }

    // A change for a document we never saw opened only makes sense as a
    // full replacement.
    let content = state.document_content(&uri).unwrap_or_else(|| {
        warn!("Received change for unknown document: {}", uri);
        String::new()
    });

    let Some(updated) = apply_content_changes(&content, &params.content_changes) else {
        warn!("Failed to apply content changes for {}", uri);
        return;
    };

    let diagnostics = state.update_document(&uri, version, updated);
    publish_diagnostics(client, &uri, diagnostics, Some(version)).await;
}

pub(crate) fn apply_content_changes(
    content: &str,
    changes: &[TextDocumentContentChangeEvent],
) -> Option<String> {
    let mut updated = content.to_string();
    for change in changes {
        match change.range {
            Some(range) => {
                let start = position_to_offset(&updated, range.start)?;
                let end = position_to_offset(&updated, range.end)?;
                if start > end {
                    return None;
                }
                updated.replace_range(start..end, &change.text);
            }
            None => updated.clone_from(&change.text),
        }
    }
    Some(updated)
}

pub async fn did_save(client: &Client, state: &ServerState, params: DidSaveTextDocumentParams) {
    let uri = params.text_document.uri;
    info!("Document saved: {}", uri);

    let diagnostics = match params.text {
        Some(text) => {
            let version = state
                .analysis()
                .document(uri.as_str())
                .map_or(0, |doc| doc.version());
            state.update_document(&uri, version, text)
        }
        None => state.analysis().diagnostics(uri.as_str()),
    };
    publish_diagnostics(client, &uri, diagnostics, None).await;
}

pub async fn did_close(client: &Client, state: &ServerState, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    info!("Document closed: {}", uri);

    if !state.close_document(&uri) {
        warn!("Received close for unknown document: {}", uri);
    }
    client.publish_diagnostics(uri, vec![], None).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::{Position, Range};

    fn ranged(range: Range, text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(range),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn apply_content_changes_inserts_text() {
        let original = "#include <io.h>\nint x;\n";
        let change = ranged(
            Range::new(Position::new(1, 0), Position::new(1, 0)),
            "using namespace std::io;\n",
        );
        let updated = apply_content_changes(original, &[change]).expect("apply change");
        assert_eq!(updated, "#include <io.h>\nusing namespace std::io;\nint x;\n");
    }

    #[test]
    fn apply_content_changes_replaces_range() {
        let original = "int x = 1;\n";
        let change = ranged(Range::new(Position::new(0, 8), Position::new(0, 9)), "42");
        let updated = apply_content_changes(original, &[change]).expect("apply change");
        assert_eq!(updated, "int x = 42;\n");
    }

    #[test]
    fn apply_content_changes_in_order() {
        let original = "int x;";
        let changes = [
            TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "bool b;".to_string(),
            },
            ranged(Range::new(Position::new(0, 5), Position::new(0, 6)), "ok"),
        ];
        let updated = apply_content_changes(original, &changes).expect("apply changes");
        assert_eq!(updated, "bool ok;");
    }

    #[test]
    fn apply_content_changes_rejects_out_of_range_lines() {
        let change = ranged(Range::new(Position::new(4, 0), Position::new(4, 1)), "x");
        assert!(apply_content_changes("int x;", &[change]).is_none());
    }
}
