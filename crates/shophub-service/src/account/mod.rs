//! Account self-service operations.

mod service;

pub use service::AccountService;
