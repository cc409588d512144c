//! Collaborators shared by the actions of one invocation.

use rescli_auth::client::AuthClient;
use rescli_auth::session::SessionManager;
use rescli_common::config::ResCliConfig;
use rescli_common::error::Result;
use rescli_common::store::ConfigStore;
use rescli_runtime::instance::InstanceManager;
use rescli_runtime::runner::RuntimeCli;

/// Per-invocation state handed to every action.
///
/// The config store is opened on first use and then reused, so actions
/// that never touch the session do not require a readable config file.
#[derive(Debug)]
pub struct Context {
    config: ResCliConfig,
    session: Option<SessionManager>,
}

impl Context {
    /// Creates a context for the given configuration.
    #[must_use]
    pub const fn new(config: ResCliConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Returns the invocation's configuration.
    #[must_use]
    pub const fn config(&self) -> &ResCliConfig {
        &self.config
    }

    /// Returns the session manager, opening the config file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be opened or is malformed.
    pub fn session(&mut self) -> Result<&mut SessionManager> {
        let session = match self.session.take() {
            Some(session) => session,
            None => SessionManager::new(ConfigStore::open(&self.config.config_file)?),
        };
        Ok(self.session.insert(session))
    }

    /// Builds a client for the configured authentication service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn auth_client(&self) -> Result<AuthClient> {
        AuthClient::new(&self.config.api_url, self.config.password_transport)
    }

    /// Builds an instance manager for the configured runtime and images.
    #[must_use]
    pub fn instances(&self) -> InstanceManager<RuntimeCli> {
        InstanceManager::new(
            RuntimeCli::new(self.config.runtime.as_str()),
            self.config.image_repo.as_str(),
            self.config.image_tag.as_str(),
        )
    }
}
