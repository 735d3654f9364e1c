//! Session cache - the signed-in user as a JSON file
//!
//! Convenience only: a cached user is always re-validated against the
//! server before the session counts as authenticated.

use std::fs;
use std::path::{Path, PathBuf};

use shared::User;

/// JSON file holding the last signed-in user
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Save the user, creating parent directories as needed
    pub fn save(&self, user: &User) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, json)
    }

    /// Load the cached user. Missing or corrupt files read as `None`.
    pub fn load(&self) -> Option<User> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring corrupt session cache: {}", e);
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
