//! Workspace configuration for borm-lsp.

use std::path::{Path, PathBuf};

use borm_ide::{DiagnosticSettings, Severity};
use serde::Deserialize;
use tracing::warn;

pub(crate) const CONFIG_FILES: &[&str] = &["borm-lsp.toml", ".borm-lsp.toml"];

/// Catalog file looked up in the workspace root when nothing else is configured.
pub(crate) const DEFAULT_CATALOG_FILE: &str = "bormfuncs.csv";

/// Project configuration loaded from `borm-lsp.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Root directory for the workspace.
    pub root: PathBuf,
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Function catalog path, resolved against the root.
    pub catalog_path: Option<PathBuf>,
    /// Diagnostics configuration.
    pub diagnostics: DiagnosticSettings,
}

impl ProjectConfig {
    /// Load configuration for a workspace root.
    pub fn load(root: &Path) -> Self {
        let config_path = find_config_file(root);
        let Some(path) = config_path.clone() else {
            return ProjectConfig::base(root, None);
        };
        let Ok(contents) = std::fs::read_to_string(&path) else {
            warn!("Failed to read borm-lsp config at {}", path.display());
            return ProjectConfig::base(root, config_path);
        };
        ProjectConfig::from_contents(root, config_path, &contents)
    }

    /// Parse configuration from TOML text. Invalid TOML yields the defaults.
    pub fn from_contents(root: &Path, config_path: Option<PathBuf>, contents: &str) -> Self {
        let mut config = ProjectConfig::base(root, config_path);
        let parsed: ConfigFile = match toml::from_str(contents) {
            Ok(parsed) => parsed,
            Err(err) => {
                if let Some(path) = &config.config_path {
                    warn!(
                        "Failed to parse borm-lsp config at {}: {err}",
                        path.display()
                    );
                } else {
                    warn!("Failed to parse borm-lsp config: {err}");
                }
                return config;
            }
        };

        config.catalog_path = parsed
            .catalog
            .path
            .as_deref()
            .map(|path| resolve_path(root, path));
        if let Some(source) = parsed.diagnostics.source {
            config.diagnostics.source = source;
        }
        if let Some(severity) = parsed.diagnostics.severity {
            match severity.parse::<Severity>() {
                Ok(severity) => config.diagnostics.severity = severity,
                Err(err) => warn!("Ignoring diagnostics severity: {err}"),
            }
        }
        config
    }

    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path,
            catalog_path: None,
            diagnostics: DiagnosticSettings::default(),
        }
    }

    /// The catalog named by the config file, or `bormfuncs.csv` in the root
    /// if that file exists.
    pub fn catalog_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.catalog_path {
            return Some(path.clone());
        }
        let fallback = self.root.join(DEFAULT_CATALOG_FILE);
        fallback.is_file().then_some(fallback)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    catalog: CatalogSection,
    #[serde(default)]
    diagnostics: DiagnosticsSection,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogSection {
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DiagnosticsSection {
    source: Option<String>,
    severity: Option<String>,
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

fn resolve_path(root: &Path, entry: &str) -> PathBuf {
    let path = PathBuf::from(entry);
    if path.is_absolute() {
        path
    } else {
        root.join(path)
    }
}
