//! User schemas
//!
//! Every schema runs the same pipeline: coerce the raw mapping into declared
//! fields, run per-field rules, run record-level rules, then either hand back
//! an immutable validated value or every violation found.

pub mod base;
pub mod create;
pub(crate) mod fields;
pub mod login;
pub mod pagination;
pub mod response;
pub mod update;

pub use base::*;
pub use create::*;
pub use login::*;
pub use pagination::*;
pub use response::*;
pub use update::*;

use serde_json::Value;

use crate::error::ValidationErrors;
use crate::utils::raw::RawRecord;

/// Shared validation pipeline.
///
/// `build` coerces and checks the fields, pushing violations into the error
/// list, and returns the value when all required parts were present. The
/// value is only released when no violation was recorded.
pub(crate) fn run_pipeline<T>(
    record: &'static str,
    raw: &Value,
    build: impl FnOnce(&RawRecord<'_>, &mut ValidationErrors) -> Option<T>,
) -> Result<T, ValidationErrors> {
    let outcome = RawRecord::from_value(raw, record).and_then(|fields| {
        let mut errors = ValidationErrors::new();
        match build(&fields, &mut errors) {
            Some(value) if errors.is_empty() => Ok(value),
            _ => {
                if errors.is_empty() {
                    errors.push(record, "Invalid input");
                }
                Err(errors)
            }
        }
    });

    match &outcome {
        Ok(_) => tracing::trace!(record, "validation accepted"),
        Err(errors) => tracing::debug!(record, violations = errors.len(), "validation rejected"),
    }
    outcome
}
