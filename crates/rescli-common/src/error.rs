//! Unified error types for the ResCli workspace.
//!
//! Library crates return [`Result`]; the CLI binary converts these into
//! `anyhow` errors at the action boundary and prints them.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ResCliError {
    /// An I/O operation on a local file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration file or value is malformed.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The remote service could not be reached.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// URL that was being requested.
        url: String,
        /// Underlying transport error text.
        message: String,
    },

    /// The remote service answered with a non-success status.
    #[error("{url} responded with HTTP {status}")]
    Rejected {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// The container runtime could not be started at all.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        /// Program that could not be spawned.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The container runtime exited with a non-zero status.
    #[error("`{command}` exited with status {exit_code}: {output}")]
    Runtime {
        /// Full command line that was executed.
        command: String,
        /// Exit status reported by the child (-1 when killed by a signal).
        exit_code: i32,
        /// Combined stdout and stderr captured from the child.
        output: String,
    },
}

impl ResCliError {
    /// Exit code of a failed runtime invocation, if this is one.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Runtime { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ResCliError>;
