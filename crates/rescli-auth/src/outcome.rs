//! Classification of authentication responses.
//!
//! The functions here map an HTTP status (and body) onto an
//! [`AuthOutcome`] without touching the network, so the mapping is total
//! and can be checked exhaustively.

use std::fmt;

use serde::Deserialize;

/// Why an authentication attempt did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Wrong username or password, or an unrecognized rejection.
    InvalidCredentials,
    /// The account already exists.
    Conflict,
    /// The service failed while handling the request.
    ServerError,
    /// The service could not be reached.
    TransportError,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Conflict => write!(f, "conflict"),
            Self::ServerError => write!(f, "server error"),
            Self::TransportError => write!(f, "transport error"),
        }
    }
}

/// Result of a login or sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The service accepted the credentials.
    Success {
        /// Identity to store as the logged-in user.
        identity: String,
        /// Message to show the user.
        message: String,
    },
    /// The attempt failed.
    Failure {
        /// Classified cause.
        reason: FailureReason,
        /// Message to show the user.
        message: String,
    },
}

impl AuthOutcome {
    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }

    /// Returns `true` for [`AuthOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    fn failure(reason: FailureReason, message: String) -> Self {
        Self::Failure { reason, message }
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    success: Option<bool>,
}

/// Classifies the response to a login request.
#[must_use]
pub fn classify_login(username: &str, status: u16, body: &str) -> AuthOutcome {
    match status {
        200 => {
            let accepted = serde_json::from_str::<LoginBody>(body)
                .ok()
                .and_then(|b| b.success)
                .unwrap_or(false);
            if accepted {
                AuthOutcome::Success {
                    identity: username.to_string(),
                    message: format!("Login successful. Welcome, {username}!"),
                }
            } else {
                invalid_login()
            }
        }
        500 => AuthOutcome::failure(
            FailureReason::ServerError,
            "Login failed. The server encountered an error.".to_string(),
        ),
        _ => invalid_login(),
    }
}

/// Classifies a login request that never got a response.
#[must_use]
pub fn login_transport_failure(error: &str) -> AuthOutcome {
    AuthOutcome::failure(
        FailureReason::TransportError,
        format!("Login failed. {error}"),
    )
}

fn invalid_login() -> AuthOutcome {
    AuthOutcome::failure(
        FailureReason::InvalidCredentials,
        "Login failed. Invalid username or password.".to_string(),
    )
}

/// Classifies the response to a sign-up request.
#[must_use]
pub fn classify_sign_up(email: &str, status: u16) -> AuthOutcome {
    match status {
        200 => AuthOutcome::Success {
            identity: email.to_string(),
            message: format!("Sign up successful. Welcome, {email}!"),
        },
        409 => AuthOutcome::failure(
            FailureReason::Conflict,
            format!("Sign up failed. User with email {email} already exists."),
        ),
        _ => AuthOutcome::failure(
            FailureReason::ServerError,
            format!("Sign up failed. Error registering user with email {email}."),
        ),
    }
}

/// Classifies a sign-up request that never got a response.
#[must_use]
pub fn sign_up_transport_failure(error: &str) -> AuthOutcome {
    AuthOutcome::failure(
        FailureReason::TransportError,
        format!("Sign up failed. {error}"),
    )
}
