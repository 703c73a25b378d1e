//! # shophub-database
//!
//! PostgreSQL connection management, migrations, and repositories for
//! Shophub. Repositories issue declarative queries against the hosted
//! database; the storage engine itself is an external collaborator.

pub mod connection;
pub mod migration;
pub mod repositories;
