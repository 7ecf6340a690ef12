//! `borm-lsp` - Language Server Protocol implementation for the Borm language.
//!
//! This is the main entry point for the Borm language server.

mod config;
mod handlers;
mod state;
#[cfg(test)]
mod test_support;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::ServerState;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "borm-lsp", version, about = "Borm language server (stdio)")]
struct Args {
    /// Function catalog (CSV) used for hover and completion.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// The main language server struct.
pub struct BormLanguageServer {
    /// LSP client for sending notifications.
    client: Client,
    /// Server state.
    state: Arc<ServerState>,
}

impl BormLanguageServer {
    /// Creates a new language server instance.
    fn new(client: Client, catalog: Option<PathBuf>) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new(catalog)),
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for BormLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Borm Language Server initializing");

        let mut workspace_folders = Vec::new();
        if let Some(folders) = params.workspace_folders {
            workspace_folders.extend(folders.into_iter().map(|folder| folder.uri));
        } else if let Some(root_uri) = params.root_uri {
            workspace_folders.push(root_uri);
        }
        handlers::configure_workspace(
            &self.state,
            workspace_folders,
            params.initialization_options,
        );

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                // Text document sync - the whole document on every change
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(true),
                        })),
                        ..Default::default()
                    },
                )),

                // Hover support
                hover_provider: Some(HoverProviderCapability::Simple(true)),

                // Completion support
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["#".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),

                // Go to definition
                definition_provider: Some(OneOf::Left(true)),

                // Code actions
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        ..Default::default()
                    },
                )),

                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "borm-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        info!(
            "Borm Language Server initialized ({} workspace folders)",
            self.state.workspace_folders().len()
        );
        self.client
            .log_message(MessageType::INFO, "Borm Language Server initialized!")
            .await;
        handlers::load_catalog(&self.client, &self.state).await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Borm Language Server shutting down");
        Ok(())
    }

    // =========================================================================
    // Document Synchronization
    // =========================================================================

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::did_open(&self.client, &self.state, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::did_change(&self.client, &self.state, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::did_save(&self.client, &self.state, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::did_close(&self.client, &self.state, params).await;
    }

    // =========================================================================
    // Language Features
    // =========================================================================

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        Ok(handlers::hover(&self.state, params))
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        Ok(handlers::goto_definition(&self.state, params))
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        Ok(handlers::code_action(&self.state, params))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(handlers::completion(&self.state, params))
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    info!("Starting Borm Language Server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let catalog = args.catalog;
    let (service, socket) =
        LspService::new(move |client| BormLanguageServer::new(client, catalog.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}
