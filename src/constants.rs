//! Application-wide constants
//!
//! Field limits, fixed character sets and configuration defaults.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// CONFIGURATION DEFAULTS
// =============================================================================

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_RUST_LOG: &str = "info";

/// Default base URL used when building navigation links
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

// =============================================================================
// NICKNAME
// =============================================================================

/// Nickname minimum length
pub const MIN_NICKNAME_LENGTH: usize = 3;

/// Nickname maximum length
pub const MAX_NICKNAME_LENGTH: usize = 50;

/// Allowed nickname characters
pub const NICKNAME_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

// =============================================================================
// EMAIL / PROFILE TEXT / URLS
// =============================================================================

/// An email address must not exceed 254 characters
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum first/last name length
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum bio length
pub const MAX_BIO_LENGTH: u64 = 500;

/// Maximum profile/social URL length
pub const MAX_URL_LENGTH: usize = 2048;

/// URL schemes accepted for profile and social links
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https"];

// =============================================================================
// PASSWORD
// =============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length

/// Characters that count toward the "special character" requirement
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

// =============================================================================
// RECORD PATHS
// =============================================================================

/// Record-level paths reported for violations not tied to a single field
pub mod records {
    pub const USER_BASE: &str = "user_base";
    pub const USER_CREATE: &str = "user_create";
    pub const USER_UPDATE: &str = "user_update";
    pub const LOGIN_REQUEST: &str = "login_request";
    pub const PAGE_QUERY: &str = "page_query";
    pub const USER_LIST: &str = "user_list";
}

// =============================================================================
// LINKS
// =============================================================================

/// Media type advertised on navigation links
pub const LINK_MEDIA_TYPE: &str = "application/json";

/// Collection path segment for user resources
pub const USERS_PATH: &str = "users";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
