//! LSP request handlers.
//!
//! This module wires handler submodules together.

mod diagnostics;
mod features;
mod lsp_utils;
mod sync;
mod workspace;

pub use features::{code_action, completion, goto_definition, hover};
pub use sync::{did_change, did_close, did_open, did_save};
pub use workspace::{configure_workspace, load_catalog};
