//! identity-schemas - Validation schemas for user identity payloads
//!
//! This library turns untrusted JSON mappings into validated, normalized
//! user records and shapes stored records into public representations.
//!
//! # Schemas
//!
//! - **Base**: the shared profile fields (`validate_base`)
//! - **Create**: base fields plus a strength-checked password (`validate_creation`)
//! - **Update**: partial changes with at least one field (`validate_update`)
//! - **Login**: email and password credentials (`validate_login`)
//! - **Pagination**: page and size coordinates (`validate_page_query`)
//!
//! Every validator reports all violations at once through `ValidationErrors`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod schemas;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult, FieldViolation, ValidationErrors};
pub use models::{Link, UserRecord, UserRole};
pub use schemas::{
    FieldUpdate, LoginRequest, PageQuery, UserBase, UserCreate, UserListResponse, UserResponse,
    UserUpdate, build_collection, build_response, validate_base, validate_creation,
    validate_login, validate_page_query, validate_update,
};
pub use services::LinkService;
