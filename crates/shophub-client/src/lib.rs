//! # shophub-client
//!
//! Client-side session handling for Shophub frontends:
//!
//! - [`machine`]: the pure session state machine — tagged states, one
//!   transition function, no I/O. This is where the manual-login race
//!   guard lives.
//! - [`controller`]: an async driver that runs the machine against the
//!   [`AuthGateway`] and [`RoleGateway`] seams with explicit timeouts.
//! - [`http`]: reqwest implementations of the gateways against the
//!   Shophub API.
//!
//! [`AuthGateway`]: controller::AuthGateway
//! [`RoleGateway`]: controller::RoleGateway

pub mod controller;
pub mod http;
pub mod machine;

pub use controller::{AuthGateway, RoleGateway, SessionController};
pub use machine::{Effect, Identity, LoadOwner, SessionEvent, SessionState};
