use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{
    CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TOGGL_TIMEOUT_SECS, TOGGL_API_BASE_URL,
    TOGGL_UI_BASE_URL,
};

// =============================================================================
// File Config Structs (all fields optional for partial configs)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Toggl endpoint configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TogglFileConfig {
    pub api_base_url: Option<String>,
    pub ui_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// File-based configuration (YAML, or JSON by extension)
///
/// Credentials sit at the top level (`toggl_api_token`, `toggl_workspace_id`)
/// so existing `config.yaml` files keep working.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub toggl_api_token: Option<String>,
    pub toggl_workspace_id: Option<u64>,
    pub server: Option<ServerFileConfig>,
    pub toggl: Option<TogglFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileConfig {
    /// Load configuration from a YAML or JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(path, &content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(
            server = ?config.server,
            toggl = ?config.toggl,
            "Parsed config file"
        );
        Ok(config)
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(content)?)
        } else if content.trim().is_empty() {
            // An empty YAML document deserializes as null
            Ok(Self::default())
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if !self.extra.is_empty() {
            let keys_str: String = self
                .extra
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Toggl credentials and endpoints
#[derive(Clone)]
pub struct TogglConfig {
    pub api_token: String,
    pub workspace_id: u64,
    pub api_base_url: String,
    pub ui_base_url: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TogglConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TogglConfig")
            .field("api_token", &"***")
            .field("workspace_id", &self.workspace_id)
            .field("api_base_url", &self.api_base_url)
            .field("ui_base_url", &self.ui_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub toggl: TogglConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. CLI-specified config path OR `config.yaml` in the working directory
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with_default_file(cli, Path::new(CONFIG_FILE_NAME))
    }

    /// `default_file` is read when no `--config` path is given and it exists
    fn load_with_default_file(cli: &CliConfig, default_file: &Path) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let config_path = if let Some(ref path) = cli.config {
            let expanded = expand_home(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            default_file
                .exists()
                .then(|| default_file.to_path_buf())
        };

        let file_config = match config_path {
            Some(path) => {
                let file_config = FileConfig::load_from_file(&path)?;
                file_config.warn_unknown_fields();
                tracing::debug!(path = %path.display(), "Config file loaded");
                file_config
            }
            None => {
                tracing::debug!("No config file found, using defaults and CLI/env");
                FileConfig::default()
            }
        };

        let file_server = file_config.server.unwrap_or_default();
        let file_toggl = file_config.toggl.unwrap_or_default();

        // Layer configs: defaults -> file config -> CLI/env overrides
        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let api_token = cli
            .api_token
            .clone()
            .or(file_config.toggl_api_token)
            .unwrap_or_default();

        let workspace_id = cli
            .workspace_id
            .or(file_config.toggl_workspace_id)
            .context(
                "Configuration error: toggl_workspace_id is required \
                 (config file, --workspace-id or TOGGL_EFFORT_WORKSPACE_ID)",
            )?;

        let toggl = TogglConfig {
            api_token,
            workspace_id,
            api_base_url: file_toggl
                .api_base_url
                .unwrap_or_else(|| TOGGL_API_BASE_URL.to_string()),
            ui_base_url: file_toggl
                .ui_base_url
                .unwrap_or_else(|| TOGGL_UI_BASE_URL.to_string()),
            timeout_secs: file_toggl
                .timeout_secs
                .unwrap_or(DEFAULT_TOGGL_TIMEOUT_SECS),
        };

        let config = Self {
            server: ServerConfig { host, port },
            toggl,
        };

        config.validate()?;
        tracing::debug!(config = ?config, "Configuration loaded");
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.toggl.api_token.trim().is_empty() {
            anyhow::bail!(
                "Configuration error: toggl_api_token is required \
                 (config file, --api-token or TOGGL_EFFORT_API_TOKEN)"
            );
        }

        if self.toggl.timeout_secs == 0 {
            anyhow::bail!("Configuration error: toggl.timeout_secs must be greater than 0");
        }

        for (key, url) in [
            ("toggl.api_base_url", &self.toggl.api_base_url),
            ("toggl.ui_base_url", &self.toggl.ui_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("Configuration error: {key} must be an http(s) URL, got '{url}'");
            }
        }

        Ok(())
    }
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
