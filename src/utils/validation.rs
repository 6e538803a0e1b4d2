//! Input validation

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Empty(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Thai mobile (0[689]xxxxxxxx), Thai landline (0[2-7]xxxxxxx) or E.164
    RE.get_or_init(|| {
        Regex::new(r"^(0[689]\d{8}|0[2-7]\d{7}|\+[1-9]\d{7,14})$").expect("valid phone regex")
    })
}

pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Empty("Email"));
    }
    if !email_regex().is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_lowercase())
}

/// Returns the number with spaces, dashes and parentheses removed
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    let normalized: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if normalized.is_empty() {
        return Err(ValidationError::Empty("Phone number"));
    }
    if !phone_regex().is_match(&normalized) {
        return Err(ValidationError::InvalidPhone(phone.to_string()));
    }
    Ok(normalized)
}

pub fn validate_date(date: &str) -> Result<NaiveDate, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::Empty("Date"));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}

pub fn is_valid_phone(phone: &str) -> bool {
    validate_phone(phone).is_ok()
}

pub fn is_valid_date(date: &str) -> bool {
    validate_date(date).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert_eq!(validate_email(" A.B@Example.com ").unwrap(), "a.b@example.com");
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@example.com"));
        assert_eq!(validate_email(""), Err(ValidationError::Empty("Email")));
    }

    #[test]
    fn test_phone() {
        assert_eq!(validate_phone("081-234-5678").unwrap(), "0812345678");
        assert!(is_valid_phone("02 123 4567"));
        assert!(is_valid_phone("+66812345678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("0112345678"));
    }

    #[test]
    fn test_date() {
        assert_eq!(
            validate_date("2026-11-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap()
        );
        assert!(!is_valid_date("2026-02-30"));
        assert!(matches!(
            validate_date("01/11/2026"),
            Err(ValidationError::InvalidDate(_))
        ));
    }
}
