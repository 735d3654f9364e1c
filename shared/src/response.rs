//! Response envelopes
//!
//! The backend wraps every payload in a single-key object, e.g.
//! ```json
//! { "message": "Login successful", "user": { ... } }
//! ```
//! These types peel that wrapper off.

use serde::{Deserialize, Serialize};

use crate::models::{Category, Comment, Issue, Location, User};

/// `{ "user": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{ "issue": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEnvelope {
    pub issue: Issue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{ "comment": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEnvelope {
    pub comment: Comment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `{ "location": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationEnvelope {
    pub location: Location,
}

/// Pagination metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

/// `GET /issues`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueList {
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationList {
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentList {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvinceList {
    pub provinces: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityList {
    pub cities: Vec<String>,
}

/// `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Bodies that only carry a status message (logout)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}
