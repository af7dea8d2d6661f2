//! Shared identity field definitions
//!
//! The base, creation and update schemas all start from the same nine fields
//! and the same per-field rules. Each schema then adds its own record-level
//! rules on top: required presence, password strength, or "at least one".

use validator::Validate;

use crate::constants::{MAX_BIO_LENGTH, MAX_NAME_LENGTH};
use crate::error::ValidationErrors;
use crate::models::UserRole;
use crate::utils::raw::{RawField, RawRecord};
use crate::utils::validation::{sanitize_text, validate_email, validate_nickname, validate_url_scheme};

pub(crate) const NICKNAME: &str = "nickname";
pub(crate) const EMAIL: &str = "email";
pub(crate) const FIRST_NAME: &str = "first_name";
pub(crate) const LAST_NAME: &str = "last_name";
pub(crate) const ROLE: &str = "role";
pub(crate) const BIO: &str = "bio";
pub(crate) const PROFILE_PICTURE_URL: &str = "profile_picture_url";
pub(crate) const LINKEDIN_PROFILE_URL: &str = "linkedin_profile_url";
pub(crate) const GITHUB_PROFILE_URL: &str = "github_profile_url";
pub(crate) const PASSWORD: &str = "password";

/// Per-field rules; `None` fields are skipped
#[derive(Debug, Default, Validate)]
struct IdentityFields {
    #[validate(custom(function = "validate_nickname"))]
    nickname: Option<String>,

    #[validate(custom(function = "validate_email"))]
    email: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH, message = "First name must be at most 100 characters"))]
    first_name: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH, message = "Last name must be at most 100 characters"))]
    last_name: Option<String>,

    #[validate(length(max = MAX_BIO_LENGTH, message = "Bio must be at most 500 characters"))]
    bio: Option<String>,

    #[validate(custom(function = "validate_url_scheme"))]
    profile_picture_url: Option<String>,

    #[validate(custom(function = "validate_url_scheme"))]
    linkedin_profile_url: Option<String>,

    #[validate(custom(function = "validate_url_scheme"))]
    github_profile_url: Option<String>,
}

/// The identity fields as coerced from raw input, before any rule has run
#[derive(Debug, Clone)]
pub(crate) struct RawIdentity {
    pub nickname: RawField<String>,
    pub email: RawField<String>,
    pub first_name: RawField<String>,
    pub last_name: RawField<String>,
    pub role: RawField<UserRole>,
    pub bio: RawField<String>,
    pub profile_picture_url: RawField<String>,
    pub linkedin_profile_url: RawField<String>,
    pub github_profile_url: RawField<String>,
}

impl RawIdentity {
    /// Coerce the identity keys of `raw`, recording type and role errors.
    ///
    /// Names and bio are sanitized here; text that sanitizes to nothing is
    /// treated as an explicit null.
    pub fn collect(raw: &RawRecord<'_>, errors: &mut ValidationErrors) -> Self {
        Self {
            nickname: raw.string(NICKNAME, errors),
            email: raw.string(EMAIL, errors),
            first_name: free_text(raw.string(FIRST_NAME, errors)),
            last_name: free_text(raw.string(LAST_NAME, errors)),
            role: collect_role(raw, errors),
            bio: free_text(raw.string(BIO, errors)),
            profile_picture_url: raw.string(PROFILE_PICTURE_URL, errors),
            linkedin_profile_url: raw.string(LINKEDIN_PROFILE_URL, errors),
            github_profile_url: raw.string(GITHUB_PROFILE_URL, errors),
        }
    }

    /// Run the per-field rules against every supplied value
    pub fn check(&self, record: &str, errors: &mut ValidationErrors) {
        let fields = IdentityFields {
            nickname: self.nickname.clone().into_option(),
            email: self.email.clone().into_option(),
            first_name: self.first_name.clone().into_option(),
            last_name: self.last_name.clone().into_option(),
            bio: self.bio.clone().into_option(),
            profile_picture_url: self.profile_picture_url.clone().into_option(),
            linkedin_profile_url: self.linkedin_profile_url.clone().into_option(),
            github_profile_url: self.github_profile_url.clone().into_option(),
        };

        if let Err(field_errors) = fields.validate() {
            errors.merge_validator(record, &field_errors);
        }
    }

    /// Names of the fields whose key was present in the input
    pub fn provided(&self) -> Vec<&'static str> {
        [
            (NICKNAME, self.nickname.is_absent()),
            (EMAIL, self.email.is_absent()),
            (FIRST_NAME, self.first_name.is_absent()),
            (LAST_NAME, self.last_name.is_absent()),
            (ROLE, self.role.is_absent()),
            (BIO, self.bio.is_absent()),
            (PROFILE_PICTURE_URL, self.profile_picture_url.is_absent()),
            (LINKEDIN_PROFILE_URL, self.linkedin_profile_url.is_absent()),
            (GITHUB_PROFILE_URL, self.github_profile_url.is_absent()),
        ]
        .into_iter()
        .filter(|(_, absent)| !absent)
        .map(|(name, _)| name)
        .collect()
    }
}

fn free_text(field: RawField<String>) -> RawField<String> {
    match field {
        RawField::Value(text) => match sanitize_text(&text) {
            Some(clean) => RawField::Value(clean),
            None => RawField::Null,
        },
        other => other,
    }
}

fn collect_role(raw: &RawRecord<'_>, errors: &mut ValidationErrors) -> RawField<UserRole> {
    match raw.string(ROLE, errors) {
        RawField::Value(label) => match label.parse::<UserRole>() {
            Ok(role) => RawField::Value(role),
            Err(err) => {
                errors.push(ROLE, err.to_string());
                RawField::Invalid
            }
        },
        RawField::Absent => RawField::Absent,
        RawField::Null => RawField::Null,
        RawField::Invalid => RawField::Invalid,
    }
}

/// Presence rule for required fields: absent and null both fail.
///
/// Fields already rejected during coercion are not reported twice.
pub(crate) fn require<T>(
    field: &'static str,
    value: RawField<T>,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match value {
        RawField::Value(value) => Some(value),
        RawField::Invalid => None,
        RawField::Absent | RawField::Null => {
            if !errors.has_field(field) {
                errors.push(field, "Field required");
            }
            None
        }
    }
}
