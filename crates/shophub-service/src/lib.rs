//! # shophub-service
//!
//! Business logic service layer for Shophub. Each service orchestrates
//! repositories and the auth layer to implement application-level use
//! cases; role enforcement happens before these services are called.
//!
//! Services follow constructor injection — all dependencies are
//! provided at construction time via `Arc` references.

pub mod account;
pub mod catalog;
pub mod context;
pub mod identity;
pub mod roles;

pub use account::AccountService;
pub use catalog::CatalogService;
pub use context::RequestContext;
pub use identity::IdentityService;
pub use roles::RoleService;
