//! Data models
//!
//! Entities as the backend serializes them. The client consumes these and
//! never owns them: every mutation goes through the API and the returned
//! representation replaces the local copy.
//! All IDs are `i64`.

pub mod admin_stats;
pub mod category;
pub mod comment;
pub mod issue;
pub mod location;
pub mod user;

// Re-exports
pub use admin_stats::*;
pub use category::*;
pub use comment::*;
pub use issue::*;
pub use location::*;
pub use user::*;
