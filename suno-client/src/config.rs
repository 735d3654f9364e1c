//! Client configuration

use std::path::PathBuf;

use shared::MAX_MEDIA_PER_ISSUE;

/// Default API base (the backend mounts everything under `/api`)
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Public Nominatim instance used by the location picker
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Map centre used when the device position is unavailable (Ottawa)
pub const DEFAULT_POSITION: GeoPoint = GeoPoint {
    latitude: 45.4215,
    longitude: -75.6919,
};

/// WGS84 coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// What to do when some media uploads of a report fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPolicy {
    /// Create the issue with whichever uploads succeeded
    #[default]
    BestEffort,
    /// Abort the report if any upload fails
    AllOrNothing,
}

/// Client configuration for connecting to the SunoAid API
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SUNO_API_URL | http://localhost:5000/api | REST API base |
/// | SUNO_TIMEOUT_SECS | 30 | request timeout |
/// | SUNO_GEOCODER_URL | https://nominatim.openstreetmap.org | geocoding service |
/// | SUNO_SESSION_CACHE | (unset) | file caching the signed-in user |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Reverse/forward geocoding service base URL
    pub geocoder_url: String,

    /// User-Agent header; Nominatim rejects anonymous clients
    pub user_agent: String,

    /// Where the signed-in user is cached between runs
    pub session_cache: Option<PathBuf>,

    /// Fallback map centre for the location picker
    pub default_position: GeoPoint,

    /// Partial media upload failure handling
    pub upload_policy: UploadPolicy,

    /// Photos allowed per report
    pub max_media: usize,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: format!("suno-client/{}", env!("CARGO_PKG_VERSION")),
            session_cache: None,
            default_position: DEFAULT_POSITION,
            upload_policy: UploadPolicy::default(),
            max_media: MAX_MEDIA_PER_ISSUE,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config =
            Self::new(std::env::var("SUNO_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));
        if let Some(timeout) = std::env::var("SUNO_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(url) = std::env::var("SUNO_GEOCODER_URL") {
            config.geocoder_url = url;
        }
        if let Ok(path) = std::env::var("SUNO_SESSION_CACHE") {
            config.session_cache = Some(PathBuf::from(path));
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the geocoding service URL
    pub fn with_geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.geocoder_url = url.into();
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Cache the signed-in user at this path
    pub fn with_session_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_cache = Some(path.into());
        self
    }

    /// Set the fallback map centre
    pub fn with_default_position(mut self, position: GeoPoint) -> Self {
        self.default_position = position;
        self
    }

    /// Set the media upload failure policy
    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = policy;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkHttpClient> {
        crate::NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
