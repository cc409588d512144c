//! Global configuration model for ResCli.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::PasswordTransport;

/// Root configuration for a ResCli invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResCliConfig {
    /// Key-value file holding the session state.
    pub config_file: PathBuf,
    /// Base URL of the authentication service.
    pub api_url: String,
    /// Container runtime binary.
    pub runtime: String,
    /// Repository prefix for instance images.
    pub image_repo: String,
    /// Tag appended to instance images.
    pub image_tag: String,
    /// How passwords are encoded on the wire.
    pub password_transport: PasswordTransport,
}

impl Default for ResCliConfig {
    fn default() -> Self {
        Self {
            config_file: constants::default_config_file(),
            api_url: constants::DEFAULT_API_URL.to_string(),
            runtime: constants::DEFAULT_RUNTIME.to_string(),
            image_repo: constants::DEFAULT_IMAGE_REPO.to_string(),
            image_tag: constants::DEFAULT_IMAGE_TAG.to_string(),
            password_transport: PasswordTransport::default(),
        }
    }
}
