//! Sign-in and role resolution.

mod service;

pub use service::IdentityService;
