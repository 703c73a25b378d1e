//! Request extraction helpers.

pub mod auth;

pub use auth::{bearer_token, client_ip};
