//! LSP conversion helpers.

use borm_ide::{CompletionKind, Severity};
use borm_syntax::{Position as SyntaxPosition, Span};
use tower_lsp::lsp_types::{CompletionItemKind, DiagnosticSeverity, Position, Range};

pub(crate) fn to_lsp_position(position: SyntaxPosition) -> Position {
    Position {
        line: position.line,
        character: position.column,
    }
}

pub(crate) fn from_lsp_position(position: Position) -> SyntaxPosition {
    SyntaxPosition::new(position.line, position.character)
}

pub(crate) fn span_to_range(span: Span) -> Range {
    Range {
        start: to_lsp_position(span.start),
        end: to_lsp_position(span.end),
    }
}

pub(crate) fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

pub(crate) fn to_lsp_completion_kind(kind: CompletionKind) -> CompletionItemKind {
    match kind {
        CompletionKind::Keyword => CompletionItemKind::KEYWORD,
        CompletionKind::Type => CompletionItemKind::TYPE_PARAMETER,
        CompletionKind::Function => CompletionItemKind::FUNCTION,
        CompletionKind::Snippet => CompletionItemKind::SNIPPET,
    }
}

/// Byte offset of `position` in `content`.
///
/// A column past the end of its line clamps to the line end. A line past the
/// end of the document has no offset.
pub(crate) fn position_to_offset(content: &str, position: Position) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..position.line {
        line_start += content[line_start..].find('\n')? + 1;
    }
    let line = content[line_start..].split('\n').next().unwrap_or_default();
    let column = line
        .char_indices()
        .nth(position.character as usize)
        .map_or(line.len(), |(idx, _)| idx);
    Some(line_start + column)
}
