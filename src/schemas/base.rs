//! Base identity schema

use serde::Serialize;
use serde_json::Value;

use super::fields::{EMAIL, NICKNAME, ROLE, RawIdentity, require};
use super::run_pipeline;
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::models::UserRole;
use crate::utils::raw::RawRecord;
use crate::utils::validation::normalize_email;

/// Validated identity fields common to every user-representing structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBase {
    nickname: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    role: UserRole,
    bio: Option<String>,
    profile_picture_url: Option<String>,
    linkedin_profile_url: Option<String>,
    github_profile_url: Option<String>,
}

impl UserBase {
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Email with its domain lowercased
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    pub fn linkedin_profile_url(&self) -> Option<&str> {
        self.linkedin_profile_url.as_deref()
    }

    pub fn github_profile_url(&self) -> Option<&str> {
        self.github_profile_url.as_deref()
    }

    /// Coerce, check and require the base fields of `raw`.
    ///
    /// Returns `None` when a required field is missing; other violations are
    /// only recorded in `errors`.
    pub(crate) fn from_raw(
        raw: &RawRecord<'_>,
        record: &str,
        errors: &mut ValidationErrors,
    ) -> Option<Self> {
        let fields = RawIdentity::collect(raw, errors);
        fields.check(record, errors);

        let nickname = require(NICKNAME, fields.nickname, errors);
        let email = require(EMAIL, fields.email, errors);
        let role = require(ROLE, fields.role, errors);

        Some(Self {
            nickname: nickname?,
            email: normalize_email(&email?),
            role: role?,
            first_name: fields.first_name.into_option(),
            last_name: fields.last_name.into_option(),
            bio: fields.bio.into_option(),
            profile_picture_url: fields.profile_picture_url.into_option(),
            linkedin_profile_url: fields.linkedin_profile_url.into_option(),
            github_profile_url: fields.github_profile_url.into_option(),
        })
    }
}

/// Validate a raw mapping against the base identity schema
pub fn validate_base(raw: &Value) -> Result<UserBase, ValidationErrors> {
    run_pipeline(records::USER_BASE, raw, |fields, errors| {
        UserBase::from_raw(fields, records::USER_BASE, errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_base_data() -> Value {
        json!({
            "nickname": "john_doe_123",
            "email": "john.doe@example.com",
            "first_name": "John",
            "last_name": "Doe",
            "role": "AUTHENTICATED",
            "bio": "I am a software engineer with over 5 years of experience.",
            "profile_picture_url": "https://example.com/profile_pictures/john_doe.jpg",
            "linkedin_profile_url": "https://linkedin.com/in/johndoe",
            "github_profile_url": "https://github.com/johndoe"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut data = user_base_data();
        data[field] = value;
        data
    }

    #[test]
    fn test_user_base_valid() {
        let user = validate_base(&user_base_data()).unwrap();
        assert_eq!(user.nickname(), "john_doe_123");
        assert_eq!(user.email(), "john.doe@example.com");
        assert_eq!(user.role(), UserRole::Authenticated);
        assert_eq!(user.github_profile_url(), Some("https://github.com/johndoe"));
    }

    #[test]
    fn test_minimum_required_fields() {
        let raw = json!({ "email": "test@example.com", "nickname": "testuser", "role": "AUTHENTICATED" });
        let user = validate_base(&raw).unwrap();
        assert_eq!(user.email(), "test@example.com");
        assert!(user.first_name().is_none());
        assert!(user.last_name().is_none());
        assert!(user.bio().is_none());
    }

    #[test]
    fn test_valid_nicknames() {
        for nickname in ["test_user", "test-user", "testuser123", "123test", "a".repeat(50).as_str()] {
            let user = validate_base(&with("nickname", json!(nickname))).unwrap();
            assert_eq!(user.nickname(), nickname);
        }
    }

    #[test]
    fn test_invalid_nicknames() {
        for nickname in ["test user", "test?user", "invalid!", "", "us", "a".repeat(51).as_str()] {
            let err = validate_base(&with("nickname", json!(nickname))).unwrap_err();
            assert_eq!(err.messages_for("nickname").len(), 1, "{nickname:?}");
        }
    }

    #[test]
    fn test_generated_nicknames_in_charset_accepted() {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
        for len in 3..=50 {
            let nickname: String = (0..len)
                .map(|i| CHARSET[(i * 7 + len) % CHARSET.len()] as char)
                .collect();
            assert!(validate_base(&with("nickname", json!(nickname))).is_ok(), "{nickname}");
        }
    }

    #[test]
    fn test_invalid_email() {
        let raw = json!({ "email": "invalidemail", "nickname": "test", "role": "AUTHENTICATED" });
        let err = validate_base(&raw).unwrap_err();
        assert!(err.has_field("email"));
    }

    #[test]
    fn test_email_domain_normalized() {
        let user = validate_base(&with("email", json!("John.Doe@EXAMPLE.com"))).unwrap();
        assert_eq!(user.email(), "John.Doe@example.com");
    }

    #[test]
    fn test_url_fields() {
        for url in ["http://valid.com/profile.jpg", "https://valid.com/profile.png"] {
            let user = validate_base(&with("profile_picture_url", json!(url))).unwrap();
            assert_eq!(user.profile_picture_url(), Some(url));
        }

        let user = validate_base(&with("profile_picture_url", Value::Null)).unwrap();
        assert!(user.profile_picture_url().is_none());

        for url in ["ftp://invalid.com/profile.jpg", "http//invalid", "https//invalid"] {
            assert!(validate_base(&with("profile_picture_url", json!(url))).is_err());
        }
    }

    #[test]
    fn test_url_without_authority_separator_rejected() {
        for url in ["http:example.com", "https:/example.com", "HTTP:example.com/a"] {
            let err = validate_base(&with("profile_picture_url", json!(url))).unwrap_err();
            assert_eq!(err.messages_for("profile_picture_url"), vec!["Invalid URL format"]);
        }
    }

    #[test]
    fn test_invalid_url_scheme_on_every_url_field() {
        for field in ["profile_picture_url", "linkedin_profile_url", "github_profile_url"] {
            let err = validate_base(&with(field, json!("htp://invalid-url.com"))).unwrap_err();
            assert!(err.has_field(field));
        }
    }

    #[test]
    fn test_accepts_none_urls() {
        let mut data = user_base_data();
        data["linkedin_profile_url"] = Value::Null;
        data["github_profile_url"] = Value::Null;
        data["profile_picture_url"] = Value::Null;
        let user = validate_base(&data).unwrap();
        assert!(user.linkedin_profile_url().is_none());
    }

    #[test]
    fn test_role_must_be_canonical() {
        let err = validate_base(&with("role", json!("admin"))).unwrap_err();
        assert!(err.messages_for("role")[0].contains("Invalid role"));

        let user = validate_base(&with("role", json!("MANAGER"))).unwrap();
        assert_eq!(user.role(), UserRole::Manager);
    }

    #[test]
    fn test_aggregates_all_violations() {
        let raw = json!({
            "nickname": "a?",
            "email": 17,
            "profile_picture_url": "ftp://x.com/a.png",
        });
        let err = validate_base(&raw).unwrap_err();

        assert!(err.has_field("nickname"));
        assert_eq!(err.messages_for("email"), vec!["email must be a string"]);
        assert_eq!(err.messages_for("role"), vec!["Field required"]);
        assert!(err.has_field("profile_picture_url"));
        assert_eq!(err.len(), 4);
    }

    #[test]
    fn test_null_required_field_rejected() {
        let err = validate_base(&with("email", Value::Null)).unwrap_err();
        assert_eq!(err.messages_for("email"), vec!["Field required"]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let user = validate_base(&with("shoe_size", json!(44))).unwrap();
        assert_eq!(user, validate_base(&user_base_data()).unwrap());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = validate_base(&json!("john")).unwrap_err();
        assert!(err.has_field("user_base"));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let raw = user_base_data();
        assert_eq!(validate_base(&raw).unwrap(), validate_base(&raw).unwrap());
    }
}
