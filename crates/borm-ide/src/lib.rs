//! `borm-ide` - Editor features for the Borm language.
//!
//! This crate provides editor functionality built on top of `borm-syntax`:
//!
//! - **Diagnostics**: one per malformed node
//! - **Hover**: node kind and value, or the closest node
//! - **Go to Definition**: a placeholder target
//! - **Code Actions**: missing `close` calls for `open` calls
//! - **Completion**: keywords and the library function catalog
//!
//! # Architecture
//!
//! Features are plain functions over a tree (and the document text where
//! needed). [`AnalysisHost`] keeps the tree of every open document and
//! routes queries to them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analysis;
pub mod catalog;
pub mod code_actions;
pub mod completion;
pub mod diagnostics;
pub mod goto_def;
pub mod hover;

pub use analysis::{AnalysisHost, DocumentAnalysis};
pub use catalog::{Catalog, CatalogError, CatalogFunction};
pub use code_actions::{code_actions, CodeAction, TextEdit};
pub use completion::{complete, CompletionItem, CompletionKind};
pub use diagnostics::{collect_diagnostics, Diagnostic, DiagnosticSettings, Severity};
pub use goto_def::goto_definition;
pub use hover::{hover, HoverResult};
