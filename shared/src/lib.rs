//! Shared types for the SunoAid client
//!
//! Wire DTOs, domain enums and response envelopes used when talking to the
//! SunoAid REST backend. Nothing here performs I/O.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use error::{ErrorBody, ParseEnumError};
pub use models::*;
pub use request::{LoginRequest, RegisterRequest};
pub use response::*;
pub use types::{IssueStatus, Severity, SortKey, VoteType};
