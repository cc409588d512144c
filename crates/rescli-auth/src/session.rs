//! Persisted session state: who is currently logged in.

use rescli_common::constants::{CURRENT_USER_KEY, USER_SECTION};
use rescli_common::error::Result;
use rescli_common::store::ConfigStore;

/// Reads and writes the logged-in identity through a [`ConfigStore`].
#[derive(Debug)]
pub struct SessionManager {
    store: ConfigStore,
}

impl SessionManager {
    /// Wraps an opened config store.
    #[must_use]
    pub const fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Returns the raw stored identity, or `None` when logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is malformed.
    pub fn current_identity(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(USER_SECTION, CURRENT_USER_KEY)?
            .filter(|identity| !identity.is_empty()))
    }

    /// Returns the display name of the logged-in user.
    ///
    /// The empty string means nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is malformed.
    pub fn display_name(&self) -> Result<String> {
        Ok(self
            .current_identity()?
            .map(|identity| display_name_of(&identity).to_string())
            .unwrap_or_default())
    }

    /// Persists `identity` as the logged-in user, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn set_identity(&mut self, identity: &str) -> Result<()> {
        tracing::info!(identity, "storing session identity");
        self.store.set(USER_SECTION, CURRENT_USER_KEY, identity)
    }

    /// Logs the current user out.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn clear_identity(&mut self) -> Result<()> {
        tracing::info!("clearing session identity");
        self.store.set(USER_SECTION, CURRENT_USER_KEY, "")
    }
}

/// Truncates an identity at its first `@`.
#[must_use]
pub fn display_name_of(identity: &str) -> &str {
    identity
        .split_once('@')
        .map_or(identity, |(local, _)| local)
}
