//! Category Model

use serde::{Deserialize, Deserializer, Serialize};

/// Issue category (lookup entity for selectors)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_color_code", deserialize_with = "color_code_or_default")]
    pub color_code: String,
    #[serde(default = "default_icon_name", deserialize_with = "icon_name_or_default")]
    pub icon_name: String,
}

fn default_color_code() -> String {
    "#3B82F6".to_string()
}

fn default_icon_name() -> String {
    "folder".to_string()
}

fn color_code_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_color_code))
}

fn icon_name_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_icon_name))
}
