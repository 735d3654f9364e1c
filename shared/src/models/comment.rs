//! Comment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserSummary;

/// Comment on an issue. No client-side edit or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default, with = "crate::util::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub replies_count: i64,
}

/// Create comment payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    /// Reply to another comment
    pub fn reply(content: impl Into<String>, parent_id: i64) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent_id),
        }
    }
}
