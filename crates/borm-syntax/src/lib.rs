//! `borm-syntax` - Tokenizer, tree builder, and position resolver for Borm.
//!
//! Borm is a small C-like language. This crate provides its syntactic
//! analysis:
//!
//! - **Lexer**: splits text into position-tagged tokens
//! - **Parser**: builds a tree of typed nodes, flagging malformed constructs
//!   with diagnostics instead of failing
//! - **Resolver**: maps a cursor position to the tightest node, or the
//!   closest candidate
//!
//! # Example
//!
//! ```
//! use borm_syntax::{collect_bad, parse, Position, SyntaxKind};
//!
//! let tree = parse("main.borm", "#include <io.h>\nint x = 1;\n#include <b.h>");
//! let bad = collect_bad(&tree);
//! assert_eq!(bad.len(), 1);
//! assert_eq!(tree.node(bad[0]).kind(), SyntaxKind::Include);
//!
//! let (id, matched) = tree.find_at(Position::new(1, 0));
//! assert!(matched);
//! assert_eq!(tree.node(id).kind(), SyntaxKind::Type);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod bad_nodes;
pub mod lexer;
pub mod parser;
mod resolve;
pub mod syntax;

pub use bad_nodes::collect_bad;
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parser::{build_tree, parse, PRIMITIVE_TYPES};
pub use resolve::find_at;
pub use syntax::{NodeId, Position, Span, SyntaxKind, SyntaxNode, SyntaxTree};
