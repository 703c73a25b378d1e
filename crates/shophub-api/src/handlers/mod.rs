//! HTTP request handlers, organized by domain.

pub mod admin;
pub mod auth;
pub mod health;
pub mod products;
pub mod user;
