//! Audit trail for permission decisions.
//!
//! Every terminal state of the verifier emits exactly one structured
//! event through [`log_access`]; this is the only audit trail for
//! permission decisions and must never be skipped, success or failure.

/// Emit one structured access-decision event.
///
/// `actor` is the acting user id when known, or `"unknown"` before a
/// credential has been resolved. The subscriber supplies the timestamp.
pub fn log_access(actor: &str, action: &str, resource: &str, success: bool) {
    tracing::info!(
        target: "audit",
        actor = %actor,
        action = %action,
        resource = %resource,
        success = success,
        "access decision"
    );
}
