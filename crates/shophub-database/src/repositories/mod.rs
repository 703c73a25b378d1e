//! Repository implementations.

pub mod product;
pub mod profile;
pub mod role_history;
