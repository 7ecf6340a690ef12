//! Grammar rules for Borm.
//!
//! - `include.rs` - `#include` directives and `using namespace`
//! - `declarations.rs` - functions, prototypes and variable declarations

mod declarations;
mod include;

use crate::parser::scan::{self, Quotes};
use crate::parser::Parser;
use crate::syntax::SyntaxKind;

/// Type keywords that start a declaration.
pub const PRIMITIVE_TYPES: &[&str] = &["int", "double", "float", "char", "bool", "string"];

/// Dispatches items until the cursor reaches its limit.
pub(crate) fn items(p: &mut Parser<'_>) {
    let mut quotes = Quotes::default();
    let mut line = None;

    while let Some(token) = p.current() {
        if line != Some(token.position.line) {
            line = Some(token.position.line);
            quotes = Quotes::default();
        }
        if quotes.active() || token.kind.is_quote() {
            quotes.feed(token.kind);
            p.bump_leaf(SyntaxKind::Text, 1, token.text.as_str());
            continue;
        }
        item(p);
    }
}

fn item(p: &mut Parser<'_>) {
    if scan::is_comment_opener(p.remaining(), 0) {
        comment(p);
        return;
    }
    let Some(token) = p.current() else {
        return;
    };

    match token.text.as_str() {
        "#include" => include::include(p),
        "using" => include::namespace(p),
        "void" => declarations::function(p),
        ty if PRIMITIVE_TYPES.contains(&ty) => {
            if p.line().get(1).is_some_and(|next| next.is("function")) {
                declarations::function(p);
            } else {
                declarations::variable(p);
            }
        }
        text => {
            p.bump_leaf(SyntaxKind::Text, 1, text);
        }
    }
}

/// `// ...` up to the end of the line.
fn comment(p: &mut Parser<'_>) {
    let len = p.line().len();
    p.bump_text_leaf(SyntaxKind::Comment, len);
}
