//! Domain primitive types used across the ResCli workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResCliError;

/// Identifier of a container instance, as assigned by the runtime.
///
/// Container names are accepted wherever an ID is, since the runtime
/// resolves both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    /// Creates a new instance ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of instance that can be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceKind {
    /// A ResilientDB node.
    Resdb,
    /// A Python SDK environment.
    Sdk,
}

impl InstanceKind {
    /// Every accepted kind name, in help order.
    pub const NAMES: [&'static str; 2] = ["resdb", "sdk"];

    /// Returns the lowercase name used in image and container names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resdb => "resdb",
            Self::Sdk => "sdk",
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceKind {
    type Err = ResCliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resdb" => Ok(Self::Resdb),
            "sdk" => Ok(Self::Sdk),
            other => Err(ResCliError::Config {
                message: format!(
                    "unknown instance type '{other}' (expected one of: {})",
                    Self::NAMES.join(", ")
                ),
            }),
        }
    }
}

/// How a password is encoded before it leaves the machine.
///
/// The same policy applies to login and sign-up so the server always sees
/// the same value for the same password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordTransport {
    /// Send the password unchanged.
    Plain,
    /// Send the lowercase hex SHA-256 digest of the password.
    #[default]
    Sha256,
}

impl PasswordTransport {
    /// Every accepted policy name.
    pub const NAMES: [&'static str; 2] = ["plain", "sha256"];
}

impl fmt::Display for PasswordTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("plain"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

impl FromStr for PasswordTransport {
    type Err = ResCliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "sha256" => Ok(Self::Sha256),
            other => Err(ResCliError::Config {
                message: format!("unknown password transport '{other}'"),
            }),
        }
    }
}
