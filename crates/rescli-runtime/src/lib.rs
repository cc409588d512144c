//! Container runtime invocation for ResCli.
//!
//! [`runner`] spawns the runtime binary; [`instance`] builds the create,
//! list, delete and exec operations on top of it.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

pub mod instance;
pub mod runner;
