//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserRole;
use crate::schemas::UserBase;

/// User record as supplied by the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub nickname: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Fresh record for a newly admitted user; no password hash is attached
    pub fn admit(id: Uuid, base: &UserBase, now: DateTime<Utc>) -> Self {
        Self {
            id,
            nickname: base.nickname().to_string(),
            email: base.email().to_string(),
            first_name: base.first_name().map(str::to_string),
            last_name: base.last_name().map(str::to_string),
            role: base.role(),
            bio: base.bio().map(str::to_string),
            profile_picture_url: base.profile_picture_url().map(str::to_string),
            linkedin_profile_url: base.linkedin_profile_url().map(str::to_string),
            github_profile_url: base.github_profile_url().map(str::to_string),
            hashed_password: String::new(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
