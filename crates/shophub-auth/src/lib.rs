//! # shophub-auth
//!
//! The authorization core of Shophub:
//!
//! - [`provider`]: the [`AuthProvider`] seam over the hosted auth
//!   service (token verification, sign-in, password updates).
//! - [`verify`]: the [`PermissionVerifier`] that resolves a bearer
//!   credential to a role and enforces per-route role floors, emitting
//!   one audit event per decision.
//! - [`ratelimit`]: per-route-class fixed-window throttling with an
//!   injectable store.
//! - [`password`]: the password complexity policy.
//!
//! [`AuthProvider`]: provider::AuthProvider
//! [`PermissionVerifier`]: verify::PermissionVerifier

pub mod password;
pub mod provider;
pub mod ratelimit;
pub mod verify;

pub use provider::{AuthProvider, SignInSession, VerifiedIdentity};
pub use verify::{AuthenticatedUser, PermissionVerifier, RoleDirectory};
