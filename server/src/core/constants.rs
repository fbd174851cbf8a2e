// =============================================================================
// Application Identity
// =============================================================================

/// Application name (for display)
pub const APP_NAME: &str = "toggl-effort";

/// Crate name as it appears in tracing targets
pub const APP_TARGET: &str = "toggl_effort_server";

/// User agent sent to Toggl
pub const USER_AGENT: &str = concat!("toggl-effort/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file looked up in the working directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "TOGGL_EFFORT_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "TOGGL_EFFORT_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "TOGGL_EFFORT_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "TOGGL_EFFORT_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "TOGGL_EFFORT_LOG";

/// Environment variable for the Toggl API token
pub const ENV_API_TOKEN: &str = "TOGGL_EFFORT_API_TOKEN";

/// Environment variable for the Toggl workspace id
pub const ENV_WORKSPACE_ID: &str = "TOGGL_EFFORT_WORKSPACE_ID";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

// =============================================================================
// Toggl
// =============================================================================

/// Base URL of the Toggl reports API
pub const TOGGL_API_BASE_URL: &str = "https://track.toggl.com";

/// Base URL of the Toggl web UI (deep links)
pub const TOGGL_UI_BASE_URL: &str = "https://track.toggl.com";

/// Basic-auth password that marks the username as an API token
pub const TOGGL_API_TOKEN_PASSWORD: &str = "api_token";

/// Default timeout for Toggl requests
pub const DEFAULT_TOGGL_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Rendering
// =============================================================================

/// User-agent substring sent by Google Sheets (`IMPORTDATA`); such callers
/// get a bare number instead of HTML
pub const SPREADSHEET_USER_AGENT_MARKER: &str = "GoogleDocs";
