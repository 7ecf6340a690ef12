//! `#include` directives and `using namespace` lines.

use crate::lexer::{Token, TokenKind};
use crate::parser::scan::{self, reconstruct};
use crate::parser::Parser;
use crate::syntax::SyntaxKind;

const ACCEPTED_FORMATS: &str =
    "Syntax error. Accepted include formats: <header.h> or \"file_path\".";
const SINGLE_TARGET: &str = "Syntax error. Please attach a single header or file per include.";
const MISSING_TARGET: &str = "You must supply a file or header to be included.";

/// `#include <header.h>` or `#include "path"`, plus a trailing comment and
/// a `using namespace` line directly below it.
pub(super) fn include(p: &mut Parser<'_>) {
    let line = p.line();
    let tokens = &line[..scan::code_len(line)];
    let misplaced = p.parent_kind() != Some(SyntaxKind::File) || p.passed_header();

    let include = p.start(SyntaxKind::Include, reconstruct(tokens));
    if misplaced {
        include.error(p, "include statements must appear before other declarations");
    }
    p.bump_leaf(SyntaxKind::Keyword, 1, tokens[0].text.as_str());

    let target = &tokens[1..];
    if target.is_empty() {
        include.error(p, MISSING_TARGET);
    } else {
        let (value, message) = check_target(target);
        let reference = p.bump_leaf(SyntaxKind::Reference, target.len(), value);
        if let Some(message) = message {
            p.error(reference, message);
        }
    }

    let comment = line.len() - tokens.len();
    if comment > 0 {
        p.bump_text_leaf(SyntaxKind::Comment, comment);
    }

    let include_line = tokens[0].position.line;
    if p
        .current()
        .is_some_and(|next| next.position.line == include_line + 1 && next.is("using"))
    {
        namespace(p);
    }
    include.complete(p);
}

/// Validates the tokens after `#include`. Returns the Reference value and
/// the first problem found.
fn check_target(target: &[Token]) -> (String, Option<&'static str>) {
    let open = &target[0];
    let (close_kind, unclosed) = match open.kind {
        TokenKind::LAngle => (TokenKind::RAngle, "Unclosed angle brackets."),
        TokenKind::DoubleQuote => (TokenKind::DoubleQuote, "Unclosed quotation marks."),
        _ => return (reconstruct(target), Some(ACCEPTED_FORMATS)),
    };

    let Some(close) = target
        .iter()
        .skip(1)
        .position(|token| token.kind == close_kind)
        .map(|idx| idx + 1)
    else {
        return (reconstruct(&target[1..]), Some(unclosed));
    };

    let inner = &target[1..close];
    let value = reconstruct(inner);
    if inner.is_empty() {
        return (value, Some(MISSING_TARGET));
    }
    let contiguous = target[..=close]
        .windows(2)
        .all(|pair| pair[0].end() == pair[1].position);
    if !contiguous || close + 1 < target.len() {
        return (value, Some(SINGLE_TARGET));
    }
    (value, None)
}

/// `using namespace name;`
///
/// The Namespace value is the imported name, e.g. `std::io`.
pub(super) fn namespace(p: &mut Parser<'_>) {
    let line = p.line();
    let len = scan::statement_len(line, false);
    let namespace = p.start(SyntaxKind::Namespace, "");
    p.bump_leaf(SyntaxKind::Keyword, 1, "using");

    let mut keyword = false;
    let mut name = None;
    let mut terminated = false;
    p.with_limit(len - 1, |p| {
        while let Some(token) = p.current() {
            if token.kind == TokenKind::Semicolon {
                terminated = true;
                p.bump_text_leaf(SyntaxKind::Text, 1);
            } else if token.is("namespace") && !keyword && name.is_none() {
                keyword = true;
                p.bump_leaf(SyntaxKind::Keyword, 1, "namespace");
            } else if is_name_part(token) && name.is_none() {
                let rest = p.remaining();
                let run = rest.iter().take_while(|token| is_name_part(token)).count();
                let value = reconstruct(&rest[..run]);
                p.bump_leaf(SyntaxKind::Name, run, value.clone());
                name = Some(value);
            } else {
                let id = p.bump_leaf(SyntaxKind::Text, 1, token.text.as_str());
                p.error(id, format!("Unexpected `{}` in namespace directive", token.text));
            }
        }
    });

    if !keyword {
        namespace.error(p, "Expected `namespace` after `using`");
    }
    match name {
        Some(value) => p.set_value(namespace.id(), value),
        None => namespace.error(p, "A namespace directive must name a namespace"),
    }
    if !terminated {
        namespace.error(p, "Expected ';' after namespace directive");
    }
    namespace.complete(p);
}

fn is_name_part(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Word | TokenKind::Colon) && !token.is("namespace")
}
