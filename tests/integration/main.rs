//! Integration tests for the HTTP surface.
//!
//! These exercise the real router and middleware stack against fake
//! auth seams; no database or auth service is required. Routes whose
//! success path needs Postgres are covered by the database-gated tests
//! in `crates/shophub-database/tests/` and
//! `crates/shophub-service/tests/` instead.

mod helpers;
mod password_test;
mod permission_test;
mod rate_limit_test;
