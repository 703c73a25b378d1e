//! User and role administration.

mod service;

pub use service::RoleService;
