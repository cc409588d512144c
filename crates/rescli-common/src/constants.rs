//! System-wide constants and default paths.

use std::path::PathBuf;

/// Base URL of the hosted authentication service.
pub const DEFAULT_API_URL: &str = "https://server.resilientdb.com";

/// Path of the sign-up endpoint, relative to the API base URL.
pub const SIGN_UP_PATH: &str = "/setUser";

/// Path of the login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/getUser";

/// Path of the liveness endpoint, relative to the API base URL.
pub const TEST_PATH: &str = "/test";

/// Container runtime binary invoked by default.
pub const DEFAULT_RUNTIME: &str = "docker";

/// Image repository instance images are pulled from.
pub const DEFAULT_IMAGE_REPO: &str = "expolab";

/// Image tag selecting the instance architecture.
pub const DEFAULT_IMAGE_TAG: &str = "arm64";

/// Go template passed to `container ls --format`.
pub const LIST_FORMAT: &str = "table {{.ID}}\t{{.Image}}\t{{.Names}}";

/// Config section holding session state.
pub const USER_SECTION: &str = "User";

/// Config key holding the raw logged-in identity.
pub const CURRENT_USER_KEY: &str = "Current_User";

/// Application name used in CLI output and default paths.
pub const APP_NAME: &str = "rescli";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "res-cli";

/// Returns the default config file path.
///
/// Prefers `$HOME/.rescli/config.toml`; falls back to `./config.toml`
/// when no home directory is set.
#[must_use]
pub fn default_config_file() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(
            || PathBuf::from("config.toml"),
            |home| PathBuf::from(home).join(format!(".{APP_NAME}")).join("config.toml"),
        )
}
