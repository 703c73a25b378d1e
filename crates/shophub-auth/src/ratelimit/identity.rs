//! Throttle-key derivation from request identity.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::rules::RouteClass;

/// Build the counter key `class:ip:subject` for a request.
///
/// The subject comes from a best-effort decode of the bearer token's
/// payload, WITHOUT signature verification — a forged subject only
/// gives the caller their own counter, it grants nothing. The real
/// credential check happens in the permission verifier. Anonymous
/// callers share the `"anonymous"` subject per IP.
pub fn throttle_key(class: RouteClass, client_ip: &str, bearer: Option<&str>) -> String {
    let subject = bearer.and_then(unverified_subject);
    format!(
        "{}:{}:{}",
        class.as_str(),
        client_ip,
        subject.as_deref().unwrap_or("anonymous")
    )
}

/// Extract the `sub` claim from a JWT payload without verifying it.
fn unverified_subject(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.as_bytes()).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    claims.get("sub")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_sub(sub: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{sub}"}}"#));
        format!("header.{payload}.signature")
    }

    #[test]
    fn test_key_includes_class_ip_and_subject() {
        let token = token_with_sub("11111111-2222-3333-4444-555555555555");
        let key = throttle_key(RouteClass::Auth, "10.0.0.1", Some(&token));
        assert_eq!(
            key,
            "auth:10.0.0.1:11111111-2222-3333-4444-555555555555"
        );
    }

    #[test]
    fn test_anonymous_without_bearer() {
        let key = throttle_key(RouteClass::Products, "10.0.0.1", None);
        assert_eq!(key, "products:10.0.0.1:anonymous");
    }

    #[test]
    fn test_malformed_token_falls_back_to_anonymous() {
        for garbage in ["not-a-jwt", "a.b.c", "a.!!!.c"] {
            let key = throttle_key(RouteClass::Default, "10.0.0.1", Some(garbage));
            assert_eq!(key, "default:10.0.0.1:anonymous");
        }
    }
}
