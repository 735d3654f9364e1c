//! SunoAid Client - SDK for the SunoAid civic issue API
//!
//! Session handling, the community feed, issue reporting with photo
//! uploads, map-based location picking, issue detail with comments and the
//! admin dashboard, over the backend's REST API.

pub mod admin;
pub mod api;
pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod feed;
pub mod geocode;
pub mod http;
pub mod media;
pub mod picker;
pub mod report;
pub mod sequence;
pub mod session;

pub use admin::AdminDashboard;
pub use api::SunoApi;
pub use client::SunoClient;
pub use config::{ClientConfig, GeoPoint, UploadPolicy};
pub use detail::IssueDetail;
pub use error::{ClientError, ClientResult};
pub use feed::{FeedFilter, FeedUpdate, IssueFeed};
pub use geocode::{Address, Geocoder, NominatimGeocoder};
pub use http::{HttpClient, NetworkHttpClient};
pub use media::MediaFile;
pub use picker::{FixedPosition, LocationPicker, NoPosition, PickUpdate, PositionSource};
pub use report::{IssueReporter, ReportDraft, ReportOutcome};
pub use session::{SessionManager, SessionState};

// Re-export shared types for convenience
pub use shared;
