//! Tree builder for Borm.
//!
//! A hand-written, single pass builder over the token sequence:
//!
//! - **Error-tolerant**: malformed constructs become bad nodes carrying
//!   diagnostics, and the pass continues with the next token
//! - **Total**: every token ends up inside some node
//!
//! Tokens are classified by their leading word and dispatched to a node
//! constructor in `grammar`. Constructors open nodes with a `Marker` that
//! must be completed before the parser moves on.

#![allow(clippy::module_inception)]

mod grammar;
mod parser;
pub(crate) mod scan;

pub use grammar::PRIMITIVE_TYPES;
pub use parser::build_tree;
pub(crate) use parser::{Marker, Parser};

use crate::lexer::tokenize;
use crate::syntax::SyntaxTree;

/// Tokenizes `text` and builds its syntax tree.
#[must_use]
pub fn parse(document_id: &str, text: &str) -> SyntaxTree {
    build_tree(document_id, &tokenize(text))
}
