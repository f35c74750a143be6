//! # warden_core
//!
//! Core domain logic for Warden: accounts, credentials, tokens and the
//! policies that decide who may touch which account.

pub mod accounts;
pub mod auth;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
