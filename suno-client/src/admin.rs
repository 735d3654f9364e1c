//! Admin dashboard

use shared::AdminStats;
use tokio::sync::watch;

use crate::ClientResult;
use crate::api::SunoApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::sequence::RequestSequencer;

#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub stats: Option<AdminStats>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Aggregate statistics, computed server-side
pub struct AdminDashboard<H: HttpClient = NetworkHttpClient> {
    api: SunoApi<H>,
    state: watch::Sender<AdminState>,
    sequencer: RequestSequencer,
}

impl<H: HttpClient> AdminDashboard<H> {
    pub fn new(api: SunoApi<H>) -> Self {
        let (state, _) = watch::channel(AdminState {
            loading: true,
            ..Default::default()
        });
        Self {
            api,
            state,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn stats(&self) -> Option<AdminStats> {
        self.state.borrow().stats.clone()
    }

    pub fn state(&self) -> AdminState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AdminState> {
        self.state.subscribe()
    }

    /// Resolved share in percent, `None` until stats are loaded
    pub fn resolution_rate(&self) -> Option<f64> {
        self.state.borrow().stats.as_ref().map(AdminStats::resolution_rate)
    }

    /// Fetches the stats. Only the newest load updates the dashboard; an
    /// overtaken one still returns what it received.
    pub async fn load(&self) -> ClientResult<AdminStats> {
        let ticket = self.sequencer.begin();
        self.state.send_modify(|s| s.loading = true);
        let result = self.api.admin_stats().await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, "Dropping stale admin stats response");
            return result;
        }
        match result {
            Ok(stats) => {
                self.state.send_modify(|s| {
                    s.stats = Some(stats.clone());
                    s.loading = false;
                    s.error = None;
                });
                Ok(stats)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch admin stats: {}", e);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.user_message());
                });
                Err(e)
            }
        }
    }
}
