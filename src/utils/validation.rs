//! Input validation utilities
//!
//! Field-level primitives shared by every schema. Each check reports only the
//! first condition it finds unmet, so a field contributes at most one message.
//! The signatures match what `#[validate(custom(function = ...))]` expects.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;
use validator::{ValidateEmail, ValidationError};

use crate::constants::{
    ALLOWED_URL_SCHEMES, MAX_EMAIL_LENGTH, MAX_NICKNAME_LENGTH, MAX_URL_LENGTH,
    MIN_NICKNAME_LENGTH, MIN_PASSWORD_LENGTH, NICKNAME_PATTERN, PASSWORD_SPECIAL_CHARACTERS,
};

static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NICKNAME_PATTERN).expect("nickname pattern is a valid regex"));

fn rejection(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Validate nickname length and charset
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let len = nickname.chars().count();
    if len < MIN_NICKNAME_LENGTH {
        return Err(rejection(
            "nickname_length",
            format!("Nickname must be at least {MIN_NICKNAME_LENGTH} characters"),
        ));
    }
    if len > MAX_NICKNAME_LENGTH {
        return Err(rejection(
            "nickname_length",
            format!("Nickname must be at most {MAX_NICKNAME_LENGTH} characters"),
        ));
    }
    if !NICKNAME_RE.is_match(nickname) {
        return Err(rejection(
            "nickname_charset",
            "Nickname may only contain letters, numbers, underscores, and hyphens",
        ));
    }
    Ok(())
}

/// Validate email format
///
/// Stricter than the `validator` crate alone: the domain must contain a dot.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(rejection(
            "email_length",
            format!("Email must be at most {MAX_EMAIL_LENGTH} characters"),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(rejection("email", "Invalid email format"));
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(rejection("email", "Invalid email format"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(rejection("email_domain", "Invalid email domain"));
    }
    if !email.validate_email() {
        return Err(rejection("email", "Invalid email format"));
    }
    Ok(())
}

/// Lowercase the domain part of an already validated email
pub fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
        None => email.to_string(),
    }
}

/// Validate that a URL is absolute and uses an allowed scheme
pub fn validate_url_scheme(url: &str) -> Result<(), ValidationError> {
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(rejection(
            "url_length",
            format!("URL must be at most {MAX_URL_LENGTH} characters"),
        ));
    }

    let parsed = Url::parse(url).map_err(|_| rejection("url", "Invalid URL format"))?;
    // Url::parse accepts "http:host" and "https:/host"; the authority must be spelled out.
    // Schemes are ASCII, so the byte offset is a char boundary.
    let after_scheme = url.get(parsed.scheme().len()..).unwrap_or_default();
    if !after_scheme.starts_with("://") {
        return Err(rejection("url", "Invalid URL format"));
    }
    // Url::parse lowercases the scheme
    if !ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) {
        return Err(rejection("url_scheme", "URL scheme must be http or https"));
    }
    Ok(())
}

/// Validate password strength
///
/// Composition is checked before length, in a fixed order, and only the first
/// unmet condition is reported.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;
    let mut len = 0usize;

    for c in password.chars() {
        len += 1;
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SPECIAL_CHARACTERS.contains(c) {
            has_special = true;
        }
    }

    if !has_upper {
        return Err(rejection(
            "password_uppercase",
            "Password must include at least one uppercase letter.",
        ));
    }
    if !has_lower {
        return Err(rejection(
            "password_lowercase",
            "Password must include at least one lowercase letter.",
        ));
    }
    if !has_digit {
        return Err(rejection(
            "password_number",
            "Password must include at least one number.",
        ));
    }
    if !has_special {
        return Err(rejection(
            "password_special",
            "Password must include at least one special character.",
        ));
    }
    if len < MIN_PASSWORD_LENGTH {
        return Err(rejection(
            "password_length",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long."),
        ));
    }
    Ok(())
}

/// Sanitize free text (remove control characters, trim whitespace).
///
/// Returns `None` when nothing is left.
pub fn sanitize_text(input: &str) -> Option<String> {
    let mut clean = String::with_capacity(input.len());
    clean.extend(input.chars().filter(|c| matches!(c, '\n' | '\t') || !c.is_control()));

    let trimmed = clean.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: ValidationError) -> String {
        err.message.map(|m| m.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("test_user").is_ok());
        assert!(validate_nickname("test-user").is_ok());
        assert!(validate_nickname("testuser123").is_ok());
        assert!(validate_nickname("123test").is_ok());
        assert!(validate_nickname(&"a".repeat(50)).is_ok());

        assert!(validate_nickname("test user").is_err());
        assert!(validate_nickname("test?user").is_err());
        assert!(validate_nickname("invalid!").is_err());
        assert!(validate_nickname("us").is_err());
        assert!(validate_nickname(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_empty_nickname_reports_length_only() {
        let err = validate_nickname("").unwrap_err();
        assert_eq!(message(err), "Nickname must be at least 3 characters");
    }

    #[test]
    fn test_nickname_rejects_non_ascii_letters() {
        assert!(validate_nickname("jöhn").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john.doe@example.com").is_ok());
        assert!(validate_email("john_doe_123@emai.com").is_ok());
        assert!(validate_email("invalidemail").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("a@b@example.com").is_err());
        assert!(validate_email("user name@example.com").is_err());
    }

    #[test]
    fn test_email_domain_message() {
        let err = validate_email("user@localhost").unwrap_err();
        assert_eq!(message(err), "Invalid email domain");
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("John.Doe@Example.COM"), "John.Doe@example.com");
    }

    #[test]
    fn test_validate_url_scheme() {
        assert!(validate_url_scheme("http://valid.com/profile.jpg").is_ok());
        assert!(validate_url_scheme("https://valid.com/profile.png").is_ok());
        assert!(validate_url_scheme("HTTPS://valid.com/profile.png").is_ok());

        assert!(validate_url_scheme("ftp://invalid.com/profile.jpg").is_err());
        assert!(validate_url_scheme("http//invalid").is_err());
        assert!(validate_url_scheme("https//invalid").is_err());
        assert!(validate_url_scheme("htp://invalid-url.com").is_err());

        assert!(validate_url_scheme("http:example.com").is_err());
        assert!(validate_url_scheme("https:/example.com").is_err());
        assert!(validate_url_scheme("HTTP:example.com/a").is_err());
    }

    #[test]
    fn test_url_scheme_message() {
        let err = validate_url_scheme("ftp://invalid.com").unwrap_err();
        assert_eq!(message(err), "URL scheme must be http or https");

        let err = validate_url_scheme("http//invalid").unwrap_err();
        assert_eq!(message(err), "Invalid URL format");

        let err = validate_url_scheme("http:example.com").unwrap_err();
        assert_eq!(message(err), "Invalid URL format");
    }

    #[test]
    fn test_validate_password_strength() {
        assert!(validate_password_strength("SecurePassword123!").is_ok());

        let cases = [
            ("weakpass", "uppercase"),
            ("SHORT1!", "lowercase"),
            ("noupper123!", "uppercase"),
            ("NOLOWER123!", "lowercase"),
            ("NoNumber!", "number"),
            ("NoSpecial123", "special character"),
            ("Ab1!", "at least 8 characters"),
        ];
        for (password, expected) in cases {
            let err = validate_password_strength(password).unwrap_err();
            let text = message(err);
            assert!(text.contains(expected), "{password}: {text}");
        }
    }

    #[test]
    fn test_password_reports_uppercase_before_lowercase() {
        // neither case present: uppercase wins
        let err = validate_password_strength("12345678!").unwrap_err();
        assert_eq!(message(err), "Password must include at least one uppercase letter.");
    }

    #[test]
    fn test_long_password_accepted() {
        let password = format!("Aa1!{}", "x".repeat(196));
        assert!(validate_password_strength(&password).is_ok());
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  John \u{0007}"), Some("John".to_string()));
        assert_eq!(sanitize_text("   "), None);
        assert_eq!(sanitize_text("line\nbreak"), Some("line\nbreak".to_string()));
    }
}
