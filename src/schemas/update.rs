//! Partial update schema

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::fields::{EMAIL, NICKNAME, ROLE, RawIdentity};
use super::run_pipeline;
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::models::UserRole;
use crate::utils::raw::RawField;
use crate::utils::validation::normalize_email;

/// Requested change to a clearable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Field not supplied
    Unchanged,
    /// Field supplied as `null`
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    fn from_raw(field: RawField<T>) -> Self {
        match field {
            RawField::Value(value) => FieldUpdate::Set(value),
            RawField::Null => FieldUpdate::Clear,
            RawField::Absent | RawField::Invalid => FieldUpdate::Unchanged,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            FieldUpdate::Clear | FieldUpdate::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Validated partial update; at least one field is always supplied.
///
/// `nickname`, `email` and `role` can be changed but never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    first_name: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    last_name: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<UserRole>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    bio: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    profile_picture_url: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    linkedin_profile_url: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_unchanged")]
    github_profile_url: FieldUpdate<String>,
    #[serde(skip)]
    provided: Vec<&'static str>,
}

impl UserUpdate {
    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn first_name(&self) -> &FieldUpdate<String> {
        &self.first_name
    }

    pub fn last_name(&self) -> &FieldUpdate<String> {
        &self.last_name
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn bio(&self) -> &FieldUpdate<String> {
        &self.bio
    }

    pub fn profile_picture_url(&self) -> &FieldUpdate<String> {
        &self.profile_picture_url
    }

    pub fn linkedin_profile_url(&self) -> &FieldUpdate<String> {
        &self.linkedin_profile_url
    }

    pub fn github_profile_url(&self) -> &FieldUpdate<String> {
        &self.github_profile_url
    }

    /// Names of the fields present in the input, in declaration order
    pub fn provided_fields(&self) -> &[&'static str] {
        &self.provided
    }
}

/// Non-clearable fields reject an explicit null
fn settable<T>(field: &'static str, value: RawField<T>, errors: &mut ValidationErrors) -> Option<T> {
    match value {
        RawField::Value(value) => Some(value),
        RawField::Null => {
            if !errors.has_field(field) {
                errors.push(field, format!("{field} cannot be null"));
            }
            None
        }
        RawField::Absent | RawField::Invalid => None,
    }
}

/// Validate a raw mapping against the partial update schema.
///
/// An explicit `null` counts as supplied; only keys missing from the input
/// count toward the "at least one field" rule.
pub fn validate_update(raw: &Value) -> Result<UserUpdate, ValidationErrors> {
    run_pipeline(records::USER_UPDATE, raw, |fields, errors| {
        let identity = RawIdentity::collect(fields, errors);
        identity.check(records::USER_UPDATE, errors);

        let provided = identity.provided();
        if provided.is_empty() {
            errors.push(
                records::USER_UPDATE,
                "At least one field must be provided for update",
            );
        }

        Some(UserUpdate {
            nickname: settable(NICKNAME, identity.nickname, errors),
            email: settable(EMAIL, identity.email, errors).map(|email| normalize_email(&email)),
            role: settable(ROLE, identity.role, errors),
            first_name: FieldUpdate::from_raw(identity.first_name),
            last_name: FieldUpdate::from_raw(identity.last_name),
            bio: FieldUpdate::from_raw(identity.bio),
            profile_picture_url: FieldUpdate::from_raw(identity.profile_picture_url),
            linkedin_profile_url: FieldUpdate::from_raw(identity.linkedin_profile_url),
            github_profile_url: FieldUpdate::from_raw(identity.github_profile_url),
            provided,
        })
    })
}
