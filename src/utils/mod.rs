//! Utility functions

pub mod raw;
pub mod validation;

pub use raw::{RawField, RawRecord};
pub use validation::{
    validate_email, validate_nickname, validate_password_strength, validate_url_scheme,
};
