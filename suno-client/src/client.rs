//! Client entry point
//!
//! [`SunoClient`] owns the shared transport and the session and hands out
//! the per-page components, all talking through the same cookie session.

use std::sync::Arc;

use crate::admin::AdminDashboard;
use crate::api::SunoApi;
use crate::detail::IssueDetail;
use crate::feed::IssueFeed;
use crate::geocode::NominatimGeocoder;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::picker::{LocationPicker, PositionSource};
use crate::report::IssueReporter;
use crate::session::{SessionManager, SessionStore};
use crate::{ClientConfig, ClientResult};

/// SunoAid client
///
/// # Example
///
/// ```no_run
/// use suno_client::{ClientConfig, SunoClient};
///
/// # async fn example() -> Result<(), suno_client::ClientError> {
/// let client = SunoClient::new(ClientConfig::from_env())?;
/// client.session().init().await;
/// client.session().login("amina@example.com", "secret").await?;
///
/// let feed = client.feed();
/// feed.load().await?;
/// # Ok(())
/// # }
/// ```
pub struct SunoClient<H: HttpClient = NetworkHttpClient> {
    config: ClientConfig,
    api: SunoApi<H>,
    session: Arc<SessionManager<H>>,
}

impl SunoClient<NetworkHttpClient> {
    /// Creates a client with a network transport built from `config`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        Ok(Self::with_http(config, http))
    }

    /// Location picker backed by the configured geocoding service
    pub fn picker<P: PositionSource>(
        &self,
        position: P,
    ) -> ClientResult<LocationPicker<NominatimGeocoder, P>> {
        let geocoder = NominatimGeocoder::new(&self.config)?;
        Ok(LocationPicker::new(geocoder, position).with_fallback(self.config.default_position))
    }
}

impl<H: HttpClient> SunoClient<H> {
    /// Creates a client over any transport
    pub fn with_http(config: ClientConfig, http: H) -> Self {
        let api = SunoApi::new(http);
        let mut session = SessionManager::new(api.clone());
        if let Some(path) = &config.session_cache {
            session = session.with_store(SessionStore::new(path));
        }
        Self {
            config,
            api,
            session: Arc::new(session),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &SunoApi<H> {
        &self.api
    }

    /// The process-wide session
    pub fn session(&self) -> &Arc<SessionManager<H>> {
        &self.session
    }

    pub fn feed(&self) -> IssueFeed<H> {
        IssueFeed::new(self.api.clone())
    }

    pub fn reporter(&self) -> IssueReporter<H> {
        IssueReporter::new(self.api.clone())
            .with_policy(self.config.upload_policy)
            .with_max_media(self.config.max_media)
    }

    pub fn issue_detail(&self, issue_id: i64) -> IssueDetail<H> {
        IssueDetail::new(self.api.clone(), issue_id)
    }

    pub fn admin_dashboard(&self) -> AdminDashboard<H> {
        AdminDashboard::new(self.api.clone())
    }
}
