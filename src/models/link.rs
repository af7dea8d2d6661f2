//! Navigation link model

use serde::{Deserialize, Serialize};

use crate::constants::LINK_MEDIA_TYPE;

/// A navigation or action reference attached to outbound representations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
    /// HTTP method used to follow the link
    pub action: String,
    #[serde(rename = "type", default = "default_media_type")]
    pub media_type: String,
}

fn default_media_type() -> String {
    LINK_MEDIA_TYPE.to_string()
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            action: action.into(),
            media_type: default_media_type(),
        }
    }
}
