//! Route classes and their fixed `(window, quota)` pairs.

use std::fmt;
use std::time::Duration;

/// Rate-limit class of a route. Each class carries its own window,
/// quota, and rejection message; these are enumerated constants, not
/// derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteClass {
    /// Sign-in attempts.
    Auth,
    /// Password changes.
    Password,
    /// General admin operations.
    Admin,
    /// Super-admin operations (stricter).
    SuperAdmin,
    /// Product management.
    Products,
    /// User management.
    Users,
    /// Everything else.
    Default,
}

/// The configured limits for one route class.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitRule {
    /// Window length.
    pub window: Duration,
    /// Maximum requests allowed per window.
    pub max_requests: u32,
    /// Message returned on breach.
    pub message: &'static str,
}

impl RouteClass {
    /// Return the configured rule for this class.
    pub fn rule(self) -> RateLimitRule {
        match self {
            Self::Auth => RateLimitRule {
                window: Duration::from_secs(15 * 60),
                max_requests: 5,
                message: "Too many sign-in attempts, try again in 15 minutes",
            },
            Self::Password => RateLimitRule {
                window: Duration::from_secs(60 * 60),
                max_requests: 3,
                message: "Too many password changes, try again in 1 hour",
            },
            Self::Admin => RateLimitRule {
                window: Duration::from_secs(5 * 60),
                max_requests: 30,
                message: "Too many admin operations, try again in 5 minutes",
            },
            Self::SuperAdmin => RateLimitRule {
                window: Duration::from_secs(10 * 60),
                max_requests: 10,
                message: "Too many super-admin operations, try again in 10 minutes",
            },
            Self::Products => RateLimitRule {
                window: Duration::from_secs(5 * 60),
                max_requests: 50,
                message: "Too many product operations, try again in 5 minutes",
            },
            Self::Users => RateLimitRule {
                window: Duration::from_secs(10 * 60),
                max_requests: 20,
                message: "Too many user operations, try again in 10 minutes",
            },
            Self::Default => RateLimitRule {
                window: Duration::from_secs(10 * 60),
                max_requests: 60,
                message: "Too many requests, try again later",
            },
        }
    }

    /// Key prefix for this class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Password => "password",
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
            Self::Products => "products",
            Self::Users => "users",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_constants() {
        assert_eq!(RouteClass::Auth.rule().max_requests, 5);
        assert_eq!(RouteClass::Auth.rule().window, Duration::from_secs(900));
        assert_eq!(RouteClass::Password.rule().max_requests, 3);
        assert_eq!(RouteClass::SuperAdmin.rule().max_requests, 10);
        assert_eq!(RouteClass::Default.rule().max_requests, 60);
    }
}
