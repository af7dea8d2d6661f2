//! Outbound user representations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pagination::{PAGE, SIZE};
use crate::constants::records;
use crate::error::ValidationErrors;
use crate::models::{Link, UserRecord, UserRole};

/// User public representation (never carries a password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nickname: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub email: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Paginated user list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub items: Vec<UserResponse>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl UserListResponse {
    /// Attach pagination links
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }
}

/// Shape a stored record into its public representation
pub fn build_response(record: &UserRecord, links: Vec<Link>) -> UserResponse {
    UserResponse {
        id: record.id,
        nickname: record.nickname.clone(),
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        role: record.role,
        email: record.email.clone(),
        bio: record.bio.clone(),
        profile_picture_url: record.profile_picture_url.clone(),
        linkedin_profile_url: record.linkedin_profile_url.clone(),
        github_profile_url: record.github_profile_url.clone(),
        last_login_at: record.last_login_at,
        created_at: Some(record.created_at),
        updated_at: Some(record.updated_at),
        links,
    }
}

/// Wrap one page of representations; `page` and `size` must be at least 1
pub fn build_collection(
    items: Vec<UserResponse>,
    total: u64,
    page: u32,
    size: u32,
) -> Result<UserListResponse, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if page == 0 {
        errors.push(PAGE, "Page must be at least 1");
    }
    if size == 0 {
        errors.push(SIZE, "Size must be at least 1");
    }
    if let Err(errors) = errors.into_result() {
        tracing::debug!(record = records::USER_LIST, violations = errors.len(), "collection rejected");
        return Err(errors);
    }

    Ok(UserListResponse {
        items,
        total,
        page,
        size,
        links: Vec::new(),
    })
}
