//! # rescli-common
//!
//! Shared types, error definitions, configuration model, constants and the
//! on-disk key-value store used across the ResCli workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod store;
pub mod types;
