//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Registered citizen or administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_role", deserialize_with = "role_or_default")]
    pub role: String,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub is_verified: bool,
    #[serde(default, with = "crate::util::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Location reference; shape varies between backend versions
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

fn default_role() -> String {
    "citizen".to_string()
}

fn role_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_role))
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }

    /// First letter of the name, for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

/// Author summary embedded in issues and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Partial profile update. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.avatar_url.is_none()
    }
}
