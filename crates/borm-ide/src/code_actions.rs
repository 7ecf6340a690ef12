//! Quick fixes for Borm.
//!
//! The only fix today pairs resource calls: a call to `fooOpen(` with fewer
//! matching `fooClose(` calls in the document gets an action inserting the
//! missing close at the end of the enclosing function body.

use borm_syntax::{tokenize, Position, Span, SyntaxKind, SyntaxTree, Token, TokenKind};
use rustc_hash::FxHashMap;

/// A text replacement in the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// The span to replace. Empty for insertions.
    pub span: Span,
    /// The replacement text.
    pub new_text: String,
}

/// A quick fix for the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAction {
    /// Title shown to the user.
    pub title: String,
    /// Edits applied when the action is chosen.
    pub edits: Vec<TextEdit>,
}

const PAIRS: [(&str, &str); 3] = [("open", "close"), ("Open", "Close"), ("OPEN", "CLOSE")];

/// A call to an `open` function.
#[derive(Debug)]
struct OpenCall<'a> {
    close: String,
    position: Position,
    handle: Option<&'a str>,
}

/// Computes quick fixes for a document from its text and tree.
pub fn code_actions(tree: &SyntaxTree, text: &str) -> Vec<CodeAction> {
    let tokens = tokenize(text);
    let calls = calls(&tokens);

    let mut opens: Vec<OpenCall<'_>> = Vec::new();
    let mut closes: FxHashMap<&str, usize> = FxHashMap::default();
    for &(idx, callee) in &calls {
        *closes.entry(callee).or_default() += 1;
        if let Some(close) = counterpart(callee) {
            opens.push(OpenCall {
                close,
                position: tokens[idx].position,
                handle: handle(&tokens, idx),
            });
        }
    }

    // Earlier opens are taken to be the ones already closed.
    let mut missing: FxHashMap<String, usize> = FxHashMap::default();
    for open in &opens {
        *missing.entry(open.close.clone()).or_default() += 1;
    }
    for (close, count) in &mut missing {
        *count = count.saturating_sub(closes.get(close.as_str()).copied().unwrap_or(0));
    }

    let mut actions = Vec::new();
    for open in opens.iter().rev() {
        let Some(count) = missing.get_mut(&open.close) else {
            continue;
        };
        if *count == 0 {
            continue;
        }
        *count -= 1;
        actions.push(close_action(tree, text, open));
    }
    actions.reverse();
    actions
}

/// Calls in the document: `(index of the callee token, callee name)`.
///
/// Strings and `//` comments are skipped.
fn calls(tokens: &[Token]) -> Vec<(usize, &str)> {
    let mut calls = Vec::new();
    let mut line = None;
    let mut quote: Option<TokenKind> = None;
    let mut comment = false;

    for (idx, token) in tokens.iter().enumerate() {
        if line != Some(token.position.line) {
            line = Some(token.position.line);
            quote = None;
            comment = false;
        }
        if comment {
            continue;
        }
        if let Some(open) = quote {
            if token.kind == open {
                quote = None;
            }
            continue;
        }
        if token.kind.is_quote() {
            quote = Some(token.kind);
            continue;
        }
        if token.kind == TokenKind::Slash
            && tokens.get(idx + 1).is_some_and(|next| {
                next.kind == TokenKind::Slash
                    && next.position.line == token.position.line
                    && next.position.column == token.position.column + 1
            })
        {
            comment = true;
            continue;
        }

        let next_is_paren = tokens.get(idx + 1).is_some_and(|next| {
            next.kind == TokenKind::LParen && next.position.line == token.position.line
        });
        if token.kind == TokenKind::Word && next_is_paren {
            let callee = token.text.rsplit('=').next().unwrap_or_default();
            if !callee.is_empty() {
                calls.push((idx, callee));
            }
        }
    }
    calls
}

/// `fooOpen` -> `fooClose`.
fn counterpart(callee: &str) -> Option<String> {
    PAIRS.iter().find_map(|(open, close)| {
        callee
            .strip_suffix(open)
            .map(|prefix| format!("{prefix}{close}"))
    })
}

/// The variable an open call is assigned to: `h = fooOpen(` or `h=fooOpen(`.
fn handle(tokens: &[Token], idx: usize) -> Option<&str> {
    let token = &tokens[idx];
    if let Some((name, _)) = token.text.rsplit_once('=') {
        let name = name.trim_end_matches('=');
        return (!name.is_empty()).then_some(name);
    }

    let prev = idx.checked_sub(1).map(|i| &tokens[i])?;
    if prev.position.line != token.position.line || !prev.text.ends_with('=') {
        return None;
    }
    let name = prev.text.trim_end_matches('=');
    if !name.is_empty() {
        return Some(name);
    }
    let name = idx.checked_sub(2).map(|i| &tokens[i])?;
    (name.kind == TokenKind::Word && name.position.line == token.position.line)
        .then_some(name.text.as_str())
}

fn close_action(tree: &SyntaxTree, text: &str, open: &OpenCall<'_>) -> CodeAction {
    let call = format!("{}({});", open.close, open.handle.unwrap_or_default());
    let lines: Vec<&str> = text.split('\n').collect();

    let (node, _) = tree.find_at(open.position);
    let block = std::iter::once(node)
        .chain(tree.ancestors(node))
        .map(|id| tree.node(id))
        .find(|node| node.kind() == SyntaxKind::Block && !node.is_bad());

    let edit = match block {
        Some(block) => {
            let end = block.span().end;
            let close_line = lines.get(end.line as usize).copied().unwrap_or_default();
            let brace_column = end.column.saturating_sub(1);
            if close_line.chars().take(brace_column as usize).all(char::is_whitespace) {
                let indent = indentation(lines.get(open.position.line as usize).copied());
                insert(Position::new(end.line, 0), format!("{indent}{call}\n"))
            } else {
                insert(Position::new(end.line, brace_column), format!("{call} "))
            }
        }
        None => {
            let last = lines.len().saturating_sub(1);
            let last_len = lines.last().map_or(0, |line| line.chars().count());
            if last_len == 0 {
                insert(Position::new(last as u32, 0), format!("{call}\n"))
            } else {
                insert(Position::new(last as u32, last_len as u32), format!("\n{call}"))
            }
        }
    };

    CodeAction {
        title: format!("Add missing call to `{}`", open.close),
        edits: vec![edit],
    }
}

fn insert(position: Position, new_text: String) -> TextEdit {
    TextEdit {
        span: Span::new(position, position),
        new_text,
    }
}

fn indentation(line: Option<&str>) -> &str {
    let line = line.unwrap_or_default();
    let line = line.strip_suffix('\r').unwrap_or(line);
    &line[..line.len() - line.trim_start().len()]
}
