//! Language feature handlers: hover, definition, code actions and completion.

use std::collections::HashMap;

use borm_ide::{CodeAction as BormCodeAction, CompletionItem as BormCompletionItem};
use tower_lsp::lsp_types::*;

use crate::state::ServerState;

use super::lsp_utils::{from_lsp_position, span_to_range, to_lsp_completion_kind};

pub fn hover(state: &ServerState, params: HoverParams) -> Option<Hover> {
    let position = params.text_document_position_params;
    let uri = position.text_document.uri;
    let result = state
        .analysis()
        .hover(uri.as_str(), from_lsp_position(position.position))?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: result.contents,
        }),
        range: result.span.map(span_to_range),
    })
}

pub fn goto_definition(
    state: &ServerState,
    params: GotoDefinitionParams,
) -> Option<GotoDefinitionResponse> {
    let position = params.text_document_position_params;
    let uri = position.text_document.uri;
    let span = state
        .analysis()
        .definition(uri.as_str(), from_lsp_position(position.position))?;
    Some(GotoDefinitionResponse::Scalar(Location::new(
        uri,
        span_to_range(span),
    )))
}

pub fn code_action(state: &ServerState, params: CodeActionParams) -> Option<CodeActionResponse> {
    let uri = params.text_document.uri;
    let actions = state.analysis().code_actions(uri.as_str());
    if actions.is_empty() {
        return None;
    }
    Some(
        actions
            .into_iter()
            .map(|action| CodeActionOrCommand::CodeAction(to_lsp_code_action(&uri, action)))
            .collect(),
    )
}

fn to_lsp_code_action(uri: &Url, action: BormCodeAction) -> CodeAction {
    let edits = action
        .edits
        .into_iter()
        .map(|edit| TextEdit::new(span_to_range(edit.span), edit.new_text))
        .collect();
    let mut changes = HashMap::new();
    changes.insert(uri.clone(), edits);

    CodeAction {
        title: action.title,
        kind: Some(CodeActionKind::QUICKFIX),
        edit: Some(WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn completion(state: &ServerState, params: CompletionParams) -> Option<CompletionResponse> {
    let uri = params.text_document_position.text_document.uri;
    let items = state.analysis().completions(uri.as_str());
    if items.is_empty() {
        return None;
    }
    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| to_lsp_completion_item(index, item))
        .collect();
    Some(CompletionResponse::Array(items))
}

fn to_lsp_completion_item(index: usize, item: BormCompletionItem) -> CompletionItem {
    CompletionItem {
        label: item.label.to_string(),
        kind: Some(to_lsp_completion_kind(item.kind)),
        detail: item.detail.map(|detail| detail.to_string()),
        documentation: item.documentation.map(|value| {
            Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            })
        }),
        insert_text: item.insert_text.map(|text| text.to_string()),
        // Items arrive ranked; keep that order in clients that sort by text.
        sort_text: Some(format!("{:03}_{index:04}", item.sort_priority)),
        ..Default::default()
    }
}
