//! Email address validation for the capture forms.
//!
//! The check is deliberately shallow: one `@`, no whitespace, and a dot
//! somewhere after the `@`. Some odd addresses pass (`a@b..c`) and some valid
//! ones fail (quoted local parts). Tightening it changes which users can
//! submit, so it stays as is.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    Empty,

    #[error("Please enter a valid email address")]
    Malformed,

    #[error("Please agree to receive course information")]
    ConsentRequired,
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Validates `email` exactly as typed. Only `""` counts as empty; padded or
/// whitespace-only input is malformed.
pub fn validate_email(email: &str) -> Result<&str, ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::Malformed);
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_address_passes() {
        assert_eq!(validate_email("a@b.c"), Ok("a@b.c"));
    }

    #[test]
    fn test_empty_is_empty_error() {
        assert_eq!(validate_email(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_missing_at_or_dot_is_malformed() {
        assert_eq!(validate_email("abc"), Err(ValidationError::Malformed));
        assert_eq!(validate_email("a@b"), Err(ValidationError::Malformed));
    }

    #[test]
    fn test_double_at_and_inner_space_are_malformed() {
        assert_eq!(validate_email("a@@b.c"), Err(ValidationError::Malformed));
        assert_eq!(validate_email("a b@c.d"), Err(ValidationError::Malformed));
    }

    #[test]
    fn test_whitespace_is_never_trimmed() {
        assert_eq!(validate_email("   "), Err(ValidationError::Malformed));
        assert_eq!(validate_email(" a@b.c"), Err(ValidationError::Malformed));
        assert_eq!(validate_email("ada@example.com\n"), Err(ValidationError::Malformed));
    }

    #[test]
    fn test_permissive_cases_stay_permissive() {
        // Known to be accepted; see module docs.
        assert!(validate_email("a@b..c").is_ok());
        assert!(validate_email("first.last@sub.example.co.uk").is_ok());
        assert_eq!(
            validate_email("\"quoted user\"@example.com"),
            Err(ValidationError::Malformed)
        );
    }
}
