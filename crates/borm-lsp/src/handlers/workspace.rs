//! Workspace setup: project configuration and the function catalog.

use std::path::PathBuf;

use borm_ide::Catalog;
use serde::Deserialize;
use serde_json::Value;
use tower_lsp::lsp_types::{MessageType, Url};
use tower_lsp::Client;
use tracing::{info, warn};

use crate::config::ProjectConfig;
use crate::state::ServerState;

/// Options a client may send in `initializationOptions`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializationOptions {
    catalog_path: Option<PathBuf>,
}

/// Records the workspace folders and loads the configuration of the first one.
pub fn configure_workspace(state: &ServerState, folders: Vec<Url>, options: Option<Value>) {
    if let Some(options) = options {
        match serde_json::from_value::<InitializationOptions>(options) {
            Ok(options) => state.set_client_catalog(options.catalog_path),
            Err(err) => warn!("Ignoring malformed initialization options: {err}"),
        }
    }

    if folders.is_empty() {
        return;
    }
    info!("Workspace folders: {:?}", folders);
    let root = folders.iter().find_map(|folder| folder.to_file_path().ok());
    state.set_workspace_folders(folders);

    if let Some(root) = root {
        let config = ProjectConfig::load(&root);
        if let Some(path) = &config.config_path {
            info!("Loaded borm-lsp config from {}", path.display());
        }
        state.set_config(config);
    }
}

/// Loads the function catalog. A failure is reported once and leaves the
/// catalog empty.
pub async fn load_catalog(client: &Client, state: &ServerState) {
    let Some(path) = state.catalog_path() else {
        info!("No function catalog configured");
        return;
    };

    match Catalog::load(&path) {
        Ok(catalog) => {
            info!(
                "Loaded {} catalog functions from {}",
                catalog.len(),
                path.display()
            );
            state.set_catalog(catalog);
        }
        Err(err) => {
            warn!("Failed to load function catalog: {err}");
            client
                .show_message(
                    MessageType::WARNING,
                    format!("borm-lsp: could not load the function catalog: {err}"),
                )
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_client;
    use serde_json::json;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{prefix}-{stamp}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[tokio::test]
    async fn workspace_catalog_is_loaded_from_the_root() {
        let root = temp_dir("borm-lsp-workspace");
        std::fs::write(
            root.join("borm-lsp.toml"),
            "[catalog]\npath = \"lib.csv\"\n",
        )
        .expect("write config");
        std::fs::write(root.join("lib.csv"), "io,std::io,int,deviceOpen,string name,Opens.\n")
            .expect("write catalog");

        let state = ServerState::new(None);
        let folder = Url::from_directory_path(&root).expect("folder uri");
        configure_workspace(&state, vec![folder.clone()], None);
        assert_eq!(state.workspace_folders(), vec![folder]);

        load_catalog(&test_client(), &state).await;
        assert!(state.analysis().catalog().find("deviceOpen").is_some());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[tokio::test]
    async fn malformed_catalog_leaves_it_empty() {
        let root = temp_dir("borm-lsp-bad-catalog");
        let path = root.join("funcs.csv");
        std::fs::write(&path, "too,few,fields\n").expect("write catalog");

        let state = ServerState::new(Some(path));
        load_catalog(&test_client(), &state).await;
        assert!(state.analysis().catalog().is_empty());

        std::fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn initialization_options_name_the_catalog() {
        let state = ServerState::new(None);
        configure_workspace(
            &state,
            Vec::new(),
            Some(json!({ "catalogPath": "/opt/borm/funcs.csv" })),
        );
        assert_eq!(
            state.catalog_path(),
            Some(PathBuf::from("/opt/borm/funcs.csv"))
        );
    }
}
