//! Domain models shared by the core and the HTTP layer.

pub mod account;
pub mod auth;
pub mod page;
