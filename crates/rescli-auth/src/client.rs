//! Blocking HTTP client for the remote authentication service.
//!
//! Each call performs exactly one request. No retries and no timeout: a
//! hung server blocks the invocation until the user interrupts it.

use std::error::Error as _;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;

use rescli_common::constants::{LOGIN_PATH, SIGN_UP_PATH, TEST_PATH};
use rescli_common::error::{ResCliError, Result};
use rescli_common::types::PasswordTransport;

use crate::outcome::{self, AuthOutcome};
use crate::password;

/// JSON body of login and sign-up requests.
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the login, sign-up and liveness endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    password_transport: PasswordTransport,
}

impl AuthClient {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(base_url: &str, password_transport: PasswordTransport) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| ResCliError::Config {
                message: format!("failed to build HTTP client: {}", error_chain(&e)),
            })?;
        Ok(Self::with_client(client, base_url, password_transport))
    }

    /// Creates a client that sends requests through an existing
    /// `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: Client,
        base_url: &str,
        password_transport: PasswordTransport,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            password_transport,
        }
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attempts to log in as `username`.
    pub fn login(&self, username: &str, password: &str) -> AuthOutcome {
        let url = self.url(LOGIN_PATH);
        tracing::info!(url = %url, username, "sending login request");
        match self.post_credentials(&url, username, password) {
            Ok((status, body)) => {
                tracing::debug!(status, "login response received");
                outcome::classify_login(username, status, &body)
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                outcome::login_transport_failure(&e)
            }
        }
    }

    /// Attempts to register `email`.
    pub fn sign_up(&self, email: &str, password: &str) -> AuthOutcome {
        let url = self.url(SIGN_UP_PATH);
        tracing::info!(url = %url, email, "sending sign-up request");
        match self.post_credentials(&url, email, password) {
            Ok((status, _)) => {
                tracing::debug!(status, "sign-up response received");
                outcome::classify_sign_up(email, status)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign-up request failed");
                outcome::sign_up_transport_failure(&e)
            }
        }
    }

    /// Calls the liveness endpoint and returns its body.
    ///
    /// # Errors
    ///
    /// Returns `ResCliError::Rejected` for any status other than 200 and
    /// `ResCliError::Transport` if the service cannot be reached.
    pub fn health_check(&self) -> Result<String> {
        let url = self.url(TEST_PATH);
        tracing::info!(url = %url, "testing API");
        let response = self.client.get(&url).send().map_err(|e| ResCliError::Transport {
            url: url.clone(),
            message: error_chain(&e),
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ResCliError::Rejected {
                url,
                status: status.as_u16(),
            });
        }
        response.text().map_err(|e| ResCliError::Transport {
            url,
            message: error_chain(&e),
        })
    }

    /// Posts credentials, returning the status and body, or the transport
    /// error text.
    fn post_credentials(
        &self,
        url: &str,
        email: &str,
        password: &str,
    ) -> std::result::Result<(u16, String), String> {
        let encoded = password::encode(self.password_transport, password);
        let body = Credentials {
            email,
            password: &encoded,
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .map_err(|e| error_chain(&e))?;
        let status = response.status().as_u16();
        let text = response.text().unwrap_or_default();
        Ok((status, text))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Formats an error together with its chain of sources.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
