//! # shophub-entity
//!
//! Domain entity models for Shophub: roles, profiles, products, and the
//! append-only role-change history.

pub mod product;
pub mod profile;
pub mod role;
pub mod role_history;

pub use product::Product;
pub use profile::{Profile, RoleAssignment};
pub use role::{Role, RoleId};
pub use role_history::{RoleChange, RoleChangeRecord};
