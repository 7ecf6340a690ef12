//! Functions, prototypes and variable declarations.

use text_size::{TextRange, TextSize};

use crate::lexer::{Token, TokenKind};
use crate::parser::scan::{self, reconstruct};
use crate::parser::{Marker, Parser};
use crate::syntax::{Position, Span, SyntaxKind};

const MALFORMED: &str = "Malformed function declaration";

/// `T function name(params) { ... }` or `T function name(params);`.
///
/// `void` heads without the `function` keyword also land here and are
/// reported as malformed.
pub(super) fn function(p: &mut Parser<'_>) {
    let line = p.line();
    let head = &line[..scan::statement_len(line, true)];
    if head.len() == 1 {
        lone_type(p, &head[0]);
        return;
    }

    let prototype = head.last().is_some_and(|token| token.kind == TokenKind::Semicolon);
    let has_keyword = head[1].is("function");
    let name = head
        .get(2)
        .filter(|token| has_keyword && token.kind == TokenKind::Word);
    let kind = if prototype {
        SyntaxKind::Declaration
    } else {
        SyntaxKind::Function
    };

    let node = p.start(kind, name.map_or("", |token| token.text.as_str()));
    p.bump_leaf(SyntaxKind::Type, 1, head[0].text.as_str());
    let signature_end = if prototype { head.len() - 1 } else { head.len() };

    if has_keyword {
        p.bump_leaf(SyntaxKind::Keyword, 1, "function");
        let mut idx = 2;
        match name {
            Some(name) => {
                p.bump_leaf(SyntaxKind::Name, 1, name.text.as_str());
                idx = 3;
            }
            None => node.error(p, "A function must have a name"),
        }
        let rest = &head[idx..signature_end];
        if name.is_some() || !rest.is_empty() {
            parameters(p, &node, rest);
        }
    } else {
        node.error(p, MALFORMED);
        if signature_end > 1 {
            p.bump_text_leaf(SyntaxKind::Text, signature_end - 1);
        }
    }
    if prototype {
        p.bump_text_leaf(SyntaxKind::Text, 1);
    }

    if kind == SyntaxKind::Function {
        match p.current() {
            Some(token) if token.kind == TokenKind::LBrace => block(p),
            _ => node.error(p, "Function declarations must be closed with a semi colon."),
        }
    }
    node.complete(p);
}

/// `(params)` and anything left before the `;` or `{`.
fn parameters(p: &mut Parser<'_>, node: &Marker, rest: &[Token]) {
    let close = match rest.first() {
        Some(open) if open.kind == TokenKind::LParen => matching_paren(rest),
        _ => None,
    };
    let Some(close) = close else {
        node.error(p, MALFORMED);
        if !rest.is_empty() {
            p.bump_text_leaf(SyntaxKind::Text, rest.len());
        }
        return;
    };

    p.bump_text_leaf(SyntaxKind::Text, 1);
    let inner = close - 1;
    if inner > 0 {
        p.bump_text_leaf(SyntaxKind::Type, inner);
    }
    p.bump_text_leaf(SyntaxKind::Text, 1);

    let junk = rest.len() - close - 1;
    if junk > 0 {
        node.error(p, MALFORMED);
        p.bump_text_leaf(SyntaxKind::Text, junk);
    }
}

fn matching_paren(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// `{ ... }` after a function head. The inner tokens are dispatched like
/// top-level ones.
fn block(p: &mut Parser<'_>) {
    let close = scan::matching_brace(p.remaining());
    let block = p.start(SyntaxKind::Block, "");
    p.bump_text_leaf(SyntaxKind::Text, 1);
    match close {
        Some(close) => {
            p.with_limit(close - 1, super::items);
            p.bump_text_leaf(SyntaxKind::Text, 1);
        }
        None => {
            block.error(p, "Unclosed function body");
            super::items(p);
        }
    }
    block.complete(p);
}

/// `T name;` or `T name = value;`.
pub(super) fn variable(p: &mut Parser<'_>) {
    let line = p.line();
    let head = &line[..scan::statement_len(line, false)];
    if head.len() == 1 {
        lone_type(p, &head[0]);
        return;
    }

    let decl = p.start(SyntaxKind::Declaration, reconstruct(head));
    p.bump_leaf(SyntaxKind::Type, 1, head[0].text.as_str());

    let terminated = head.last().is_some_and(|token| token.kind == TokenKind::Semicolon);
    let body = &head[1..if terminated { head.len() - 1 } else { head.len() }];
    let text = reconstruct(body);
    let eq = text.find('=');
    let (name_part, value_part) = match eq {
        Some(eq) => (&text[..eq], Some((eq + 1, &text[eq + 1..]))),
        None => (text.as_str(), None),
    };

    match trimmed(name_part, 0) {
        Some((start, name)) => {
            let (span, range) = sub_span(body, &text, start, start + name.len());
            let variable = p.partial_leaf(SyntaxKind::Variable, span, range, name);
            if !is_valid_name(name) {
                p.error(variable, format!("`{name}` is not a valid variable name"));
            }
        }
        None => decl.error(p, "A declaration must have a name"),
    }

    if let Some(eq) = eq {
        let (span, range) = sub_span(body, &text, eq, eq + 1);
        p.partial_leaf(SyntaxKind::Text, span, range, "=");
    }
    if let Some((offset, value_part)) = value_part {
        match trimmed(value_part, offset) {
            Some((start, value)) => {
                let (span, range) = sub_span(body, &text, start, start + value.len());
                p.partial_leaf(SyntaxKind::Value, span, range, value);
            }
            None => decl.error(p, "Expected a value after '='"),
        }
    }
    p.advance(body.len());
    if terminated {
        p.bump_text_leaf(SyntaxKind::Text, 1);
    } else {
        decl.error(p, "Expected ';' at the end of a declaration");
    }
    decl.complete(p);
}

/// A type keyword with nothing after it on the line.
fn lone_type(p: &mut Parser<'_>, token: &Token) {
    let decl = p.start(SyntaxKind::Declaration, token.text.as_str());
    p.bump_leaf(SyntaxKind::Type, 1, token.text.as_str());
    decl.error(p, format!("{} is not an expression", token.text));
    decl.complete(p);
}

/// Trims spaces from `part`, which starts at byte `offset` of its line text.
/// Returns the byte offset and text of what is left, if anything.
fn trimmed(part: &str, offset: usize) -> Option<(usize, &str)> {
    let text = part.trim_matches(' ');
    if text.is_empty() {
        return None;
    }
    let leading = part.len() - part.trim_start_matches(' ').len();
    Some((offset + leading, text))
}

/// Span and byte range of `text[start..end]`, where `text` was reconstructed
/// from the single-line `tokens`.
fn sub_span(tokens: &[Token], text: &str, start: usize, end: usize) -> (Span, TextRange) {
    let first = &tokens[0];
    let column = |byte: usize| first.position.column + text[..byte].chars().count() as u32;
    let offset = |byte: usize| first.range.start() + TextSize::from(byte as u32);

    let span = Span::new(
        Position::new(first.position.line, column(start)),
        Position::new(first.position.line, column(end)),
    );
    (span, TextRange::new(offset(start), offset(end)))
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
