//! Role reference records and the numeric role hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric role identifier.
///
/// Role ids form a dense ascending sequence starting at 1, and the id
/// encodes a total privilege order: a larger id is strictly more
/// privileged. Every permission check is an "at least this role" floor
/// comparison against this order; there are no exact-set checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct RoleId(pub i16);

impl RoleId {
    /// Regular storefront user.
    pub const USER: RoleId = RoleId(1);
    /// Catalog administrator.
    pub const ADMIN: RoleId = RoleId(2);
    /// Super administrator (user and role management).
    pub const SUPER_ADMIN: RoleId = RoleId(3);

    /// Check whether this role meets the given minimum-role floor.
    pub fn has_at_least(self, floor: RoleId) -> bool {
        self.0 >= floor.0
    }

    /// Canonical display name for the built-in roles.
    pub fn name(self) -> &'static str {
        match self {
            Self::USER => "user",
            Self::ADMIN => "admin",
            Self::SUPER_ADMIN => "super_admin",
            _ => "unknown",
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable role reference record.
///
/// Exactly three rows exist (seeded by migration); never created or
/// deleted at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    /// Numeric id encoding the privilege order.
    pub id: RoleId,
    /// Machine name (`user`, `admin`, `super_admin`).
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// When the row was seeded.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_check_is_numeric_comparison() {
        let all = [RoleId::USER, RoleId::ADMIN, RoleId::SUPER_ADMIN];
        for a in all {
            for b in all {
                assert_eq!(a.has_at_least(b), a.0 >= b.0);
            }
        }
    }

    #[test]
    fn test_hierarchy() {
        assert!(!RoleId::USER.has_at_least(RoleId::ADMIN));
        assert!(RoleId::SUPER_ADMIN.has_at_least(RoleId::ADMIN));
        assert!(RoleId::ADMIN.has_at_least(RoleId::ADMIN));
        assert!(RoleId::ADMIN.has_at_least(RoleId::USER));
        assert!(!RoleId::ADMIN.has_at_least(RoleId::SUPER_ADMIN));
    }

    #[test]
    fn test_names() {
        assert_eq!(RoleId::USER.name(), "user");
        assert_eq!(RoleId::SUPER_ADMIN.name(), "super_admin");
        assert_eq!(RoleId(9).name(), "unknown");
    }
}
