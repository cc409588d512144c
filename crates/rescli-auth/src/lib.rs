//! Identity handling for ResCli.
//!
//! [`session`] persists the logged-in identity; [`client`] talks to the
//! remote authentication service and classifies its answers into
//! [`outcome::AuthOutcome`] values.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod outcome;
pub mod password;
pub mod session;
