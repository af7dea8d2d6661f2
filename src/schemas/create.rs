//! Account creation schema

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::base::UserBase;
use super::fields::{PASSWORD, require};
use super::run_pipeline;
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::utils::validation::validate_password_strength;

/// Validated payload for admitting a brand-new account.
///
/// Composed of the base identity plus a password that passed the strength
/// rule. The password is never serialized and is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserCreate {
    #[serde(flatten)]
    base: UserBase,
    #[serde(skip_serializing)]
    password: String,
}

impl UserCreate {
    pub fn base(&self) -> &UserBase {
        &self.base
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn into_parts(self) -> (UserBase, String) {
        (self.base, self.password)
    }
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("base", &self.base)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validate a raw mapping against the creation schema
pub fn validate_creation(raw: &Value) -> Result<UserCreate, ValidationErrors> {
    run_pipeline(records::USER_CREATE, raw, |fields, errors| {
        let base = UserBase::from_raw(fields, records::USER_CREATE, errors);

        let password = require(PASSWORD, fields.string(PASSWORD, errors), errors);
        if let Some(password) = &password {
            if let Err(err) = validate_password_strength(password) {
                errors.push_rejection(PASSWORD, &err);
            }
        }

        Some(UserCreate {
            base: base?,
            password: password?,
        })
    })
}
