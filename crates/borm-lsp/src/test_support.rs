//! Test helpers shared across LSP unit tests.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{InitializeParams, InitializeResult};
use tower_lsp::{Client, LanguageServer, LspService};

/// Holds on to the client tower-lsp hands to a new server.
struct ClientSlot(Client);

#[tower_lsp::async_trait]
impl LanguageServer for ClientSlot {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult::default())
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

/// A client with no transport behind it; notifications go nowhere.
pub(crate) fn test_client() -> Client {
    let (service, _socket) = LspService::new(ClientSlot);
    service.inner().0.clone()
}
