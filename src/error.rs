//! Custom error types and handling
//!
//! `ValidationErrors` is the single rejection type produced by every schema.
//! `AppError` wraps the failure modes of the command-line front end and
//! renders them as a JSON error body.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use validator::ValidationErrorsKind;

use crate::config::ConfigError;

/// A single rejected field: where it happened and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field_path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_path: field_path.into(),
            message: message.into(),
        }
    }
}

/// Aggregated list of violations collected during one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", summarize(.violations))]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    let mut out = String::new();
    for (idx, v) in violations.iter().enumerate() {
        if idx > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{}: {}", v.field_path, v.message);
    }
    out
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejection carrying exactly one violation
    pub fn single(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field_path, message);
        errors
    }

    pub fn push(&mut self, field_path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field_path, message));
    }

    /// Record a `validator` rejection against `field_path`
    pub fn push_rejection(&mut self, field_path: &str, err: &validator::ValidationError) {
        self.push(field_path, describe(field_path, err));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether any violation was recorded against `field_path`
    pub fn has_field(&self, field_path: &str) -> bool {
        self.violations.iter().any(|v| v.field_path == field_path)
    }

    /// All messages recorded against `field_path`, in order
    pub fn messages_for(&self, field_path: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.field_path == field_path)
            .map(|v| v.message.as_str())
            .collect()
    }

    /// Fold the result of a `validator` run into this list.
    ///
    /// Nested struct errors become `a.b`, list errors become `a[0].b`, and
    /// schema-level (`__all__`) errors are reported against `record`. Fields
    /// that already carry a violation are skipped so each field is reported
    /// at most once.
    pub fn merge_validator(&mut self, record: &str, errors: &validator::ValidationErrors) {
        let mut flattened = Vec::new();
        flatten(None, record, errors, &mut flattened);
        for violation in flattened {
            if !self.has_field(&violation.field_path) {
                self.violations.push(violation);
            }
        }
    }

    /// Ok when nothing was recorded, otherwise the aggregated rejection
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldViolation;
    type IntoIter = std::vec::IntoIter<FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl From<FieldViolation> for ValidationErrors {
    fn from(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn flatten(
    prefix: Option<&str>,
    record: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldViolation>,
) {
    // HashMap order is unstable; sort so output is deterministic
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        let field: &str = &**field;
        let path = match (prefix, field) {
            (None, "__all__") => record.to_string(),
            (Some(prefix), "__all__") => prefix.to_string(),
            (None, field) => field.to_string(),
            (Some(prefix), field) => format!("{prefix}.{field}"),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    out.push(FieldViolation::new(path.clone(), describe(field, err)));
                }
            }
            ValidationErrorsKind::Struct(nested) => flatten(Some(&path), record, nested, out),
            ValidationErrorsKind::List(items) => {
                for (idx, nested) in items {
                    let item_path = format!("{path}[{idx}]");
                    flatten(Some(&item_path), record, nested, out);
                }
            }
        }
    }
}

/// Human-readable text for a `validator` error, preferring its own message
fn describe(field: &str, err: &validator::ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    match &*err.code {
        "required" => "Field required".to_string(),
        "length" => format!("{field} has an invalid length"),
        "email" => "Invalid email format".to_string(),
        "url" => "Invalid URL format".to_string(),
        code => format!("{field} is invalid ({code})"),
    }
}

/// Failure modes of the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "INPUT_ERROR",
            Self::Json(_) => "MALFORMED_JSON",
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Json(_) | Self::Io(_) => 3,
            Self::Configuration(_) => 1,
        }
    }

    /// Render the JSON error body; validation errors carry their violations
    pub fn to_response(&self) -> ErrorResponse {
        let (message, details) = match self {
            AppError::Validation(errors) => (
                format!("{} field(s) failed validation", errors.len()),
                serde_json::to_value(errors).ok(),
            ),
            _ => (self.to_string(), None),
        };

        ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
