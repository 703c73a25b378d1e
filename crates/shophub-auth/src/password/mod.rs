//! Password complexity policy.

mod policy;

pub use policy::PasswordPolicy;
