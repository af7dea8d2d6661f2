//! Login request schema

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::fields::{EMAIL, PASSWORD, require};
use super::run_pipeline;
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::utils::validation::{normalize_email, validate_email};

/// Validated credential pair. Password strength is not checked at login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    email: String,
    #[serde(skip_serializing)]
    password: String,
}

impl LoginRequest {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Validate)]
struct LoginFields {
    #[validate(custom(function = "validate_email"))]
    email: Option<String>,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    password: Option<String>,
}

/// Validate a raw mapping against the login schema
pub fn validate_login(raw: &Value) -> Result<LoginRequest, ValidationErrors> {
    run_pipeline(records::LOGIN_REQUEST, raw, |fields, errors| {
        let email = fields.string(EMAIL, errors);
        let password = fields.string(PASSWORD, errors);

        let checked = LoginFields {
            email: email.clone().into_option(),
            password: password.clone().into_option(),
        };
        if let Err(field_errors) = checked.validate() {
            errors.merge_validator(records::LOGIN_REQUEST, &field_errors);
        }

        let email = require(EMAIL, email, errors);
        let password = require(PASSWORD, password, errors);

        Some(LoginRequest {
            email: normalize_email(&email?),
            password: password?,
        })
    })
}
