//! Server-side password complexity rules.
//!
//! The policy is evaluated in full: every violated rule is reported,
//! not just the first, so clients can show the complete checklist.

use shophub_core::error::AppError;
use shophub_core::result::AppResult;

/// Passwords that are rejected outright regardless of complexity.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password123",
    "12345678",
    "qwertyuiop",
    "abcdefgh",
    "1234567890",
    "welcome",
    "admin",
    "letmein",
    "monkey",
];

/// Longest allowed run of one repeated character.
const MAX_REPEAT_RUN: usize = 3;

/// Longest allowed ascending character sequence (`abcd`, `1234`).
const MAX_SEQUENTIAL_RUN: usize = 3;

/// Complexity policy for new passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl PasswordPolicy {
    /// Create a policy with the given length bounds.
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// All rules the candidate violates, in evaluation order. Empty
    /// when the password is acceptable.
    pub fn violations(&self, candidate: &str, email: &str) -> Vec<String> {
        let mut reasons = Vec::new();
        let length = candidate.chars().count();

        if length < self.min_length {
            reasons.push(format!(
                "must be at least {} characters long",
                self.min_length
            ));
        }
        if length > self.max_length {
            reasons.push(format!(
                "must be at most {} characters long",
                self.max_length
            ));
        }
        if !candidate.chars().any(|c| c.is_ascii_lowercase()) {
            reasons.push("must contain a lowercase letter".to_string());
        }
        if !candidate.chars().any(|c| c.is_ascii_uppercase()) {
            reasons.push("must contain an uppercase letter".to_string());
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            reasons.push("must contain a digit".to_string());
        }
        if !candidate
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace())
        {
            reasons.push("must contain a special character".to_string());
        }

        let lowered = candidate.to_lowercase();
        if COMMON_PASSWORDS.contains(&lowered.as_str()) {
            reasons.push("is too common".to_string());
        }

        if let Some(local_part) = email.split('@').next() {
            let local_part = local_part.to_lowercase();
            if local_part.len() >= 3 && lowered.contains(&local_part) {
                reasons.push("must not contain your email address".to_string());
            }
        }

        if has_repeat_run(candidate, MAX_REPEAT_RUN + 1) {
            reasons.push(format!(
                "must not repeat a character more than {MAX_REPEAT_RUN} times in a row"
            ));
        }
        if has_sequential_run(&lowered, MAX_SEQUENTIAL_RUN + 1) {
            reasons.push(format!(
                "must not contain more than {MAX_SEQUENTIAL_RUN} sequential characters"
            ));
        }

        reasons
    }

    /// Validate a candidate, returning every violation in one error.
    pub fn validate(&self, candidate: &str, email: &str) -> AppResult<()> {
        let reasons = self.violations(candidate, email);
        if reasons.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Password {}",
                reasons.join("; ")
            )))
        }
    }

    /// Reject reusing the current password.
    pub fn validate_not_same(&self, current: &str, candidate: &str) -> AppResult<()> {
        if current == candidate {
            Err(AppError::validation(
                "New password must differ from the current password",
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(8, 128)
    }
}

/// True when `run` identical characters appear consecutively.
fn has_repeat_run(s: &str, run: usize) -> bool {
    let mut count = 0usize;
    let mut previous = None;
    for c in s.chars() {
        if previous == Some(c) {
            count += 1;
        } else {
            count = 1;
            previous = Some(c);
        }
        if count >= run {
            return true;
        }
    }
    false
}

/// True when `run` consecutively ascending ASCII characters appear
/// (`abcd`, `2345`).
fn has_sequential_run(s: &str, run: usize) -> bool {
    let mut count = 1usize;
    let mut previous: Option<char> = None;
    for c in s.chars() {
        count = match previous {
            Some(p) if (p as u32) + 1 == c as u32 && c.is_ascii_alphanumeric() => count + 1,
            _ => 1,
        };
        previous = Some(c);
        if count >= run {
            return true;
        }
    }
    false
}
