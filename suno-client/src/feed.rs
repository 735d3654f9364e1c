//! Community issue feed
//!
//! Holds the current filter and the issue list it produced. Every filter
//! change issues exactly one list request carrying all current filter
//! values, and the response replaces the whole list. Responses to requests
//! that have since been superseded are dropped.
//!
//! Votes apply the server's returned tally to the local issue instead of
//! refetching the list.

use shared::{Category, Issue, IssueQuery, IssueStatus, Pagination, SortKey, VoteTally, VoteType};
use tokio::sync::watch;

use crate::ClientResult;
use crate::api::SunoApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::sequence::RequestSequencer;

/// Feed filter as selected in the UI
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedFilter {
    pub search: String,
    pub category_id: Option<i64>,
    pub status: Option<IssueStatus>,
    pub sort: SortKey,
    pub location_id: Option<i64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl FeedFilter {
    /// Query parameters for `GET /issues`; blank search is omitted.
    pub fn to_query(&self) -> IssueQuery {
        let search = self.search.trim();
        IssueQuery {
            search: (!search.is_empty()).then(|| search.to_string()),
            category_id: self.category_id,
            location_id: self.location_id,
            status: self.status,
            sort: self.sort,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// What the feed currently shows
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub filter: FeedFilter,
    pub issues: Vec<Issue>,
    pub pagination: Option<Pagination>,
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Outcome of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The response replaced the displayed list
    Applied { count: usize },
    /// A newer request was issued meanwhile; the response was dropped
    Stale,
}

/// Issue feed / dashboard
pub struct IssueFeed<H: HttpClient = NetworkHttpClient> {
    api: SunoApi<H>,
    state: watch::Sender<FeedSnapshot>,
    sequencer: RequestSequencer,
}

impl<H: HttpClient> IssueFeed<H> {
    pub fn new(api: SunoApi<H>) -> Self {
        let (state, _) = watch::channel(FeedSnapshot {
            loading: true,
            ..Default::default()
        });
        Self {
            api,
            state,
            sequencer: RequestSequencer::new(),
        }
    }

    // ========== State access ==========

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.borrow().clone()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.state.borrow().issues.clone()
    }

    pub fn filter(&self) -> FeedFilter {
        self.state.borrow().filter.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.borrow().categories.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.state.subscribe()
    }

    // ========== Loading ==========

    /// Fetches the list for the current filter
    pub async fn load(&self) -> ClientResult<FeedUpdate> {
        let ticket = self.sequencer.begin();
        self.state.send_modify(|s| s.loading = true);
        let query = self.state.borrow().filter.to_query();
        tracing::debug!(%ticket, ?query, "Fetching issue list");

        let result = self.api.list_issues(&query).await;
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, "Dropping stale issue list response");
            return Ok(FeedUpdate::Stale);
        }

        match result {
            Ok(list) => {
                let count = list.issues.len();
                self.state.send_modify(|s| {
                    s.issues = list.issues;
                    s.pagination = list.pagination;
                    s.loading = false;
                    s.error = None;
                });
                Ok(FeedUpdate::Applied { count })
            }
            Err(e) => {
                tracing::warn!("Failed to fetch issues: {}", e);
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.user_message());
                });
                Err(e)
            }
        }
    }

    /// Populates the category selector. The previous list is kept on failure.
    pub async fn load_categories(&self) -> ClientResult<Vec<Category>> {
        match self.api.categories().await {
            Ok(categories) => {
                self.state.send_modify(|s| s.categories = categories.clone());
                Ok(categories)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch categories: {}", e);
                Err(e)
            }
        }
    }

    // ========== Filter changes ==========

    /// Replaces the whole filter and reloads
    pub async fn set_filter(&self, filter: FeedFilter) -> ClientResult<FeedUpdate> {
        self.state.send_modify(|s| s.filter = filter);
        self.load().await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> ClientResult<FeedUpdate> {
        let search = search.into();
        self.update_filter(|f| f.search = search).await
    }

    pub async fn set_category(&self, category_id: Option<i64>) -> ClientResult<FeedUpdate> {
        self.update_filter(|f| f.category_id = category_id).await
    }

    pub async fn set_status(&self, status: Option<IssueStatus>) -> ClientResult<FeedUpdate> {
        self.update_filter(|f| f.status = status).await
    }

    pub async fn set_sort(&self, sort: SortKey) -> ClientResult<FeedUpdate> {
        self.update_filter(|f| f.sort = sort).await
    }

    pub async fn set_location(&self, location_id: Option<i64>) -> ClientResult<FeedUpdate> {
        self.update_filter(|f| f.location_id = location_id).await
    }

    /// Moves to another page, keeping the rest of the filter
    pub async fn set_page(&self, page: u32) -> ClientResult<FeedUpdate> {
        self.state.send_modify(|s| s.filter.page = Some(page.max(1)));
        self.load().await
    }

    /// Any change other than paging starts again from the first page
    async fn update_filter(&self, change: impl FnOnce(&mut FeedFilter)) -> ClientResult<FeedUpdate> {
        self.state.send_modify(|s| {
            change(&mut s.filter);
            s.filter.page = None;
        });
        self.load().await
    }

    // ========== Voting ==========

    /// Votes on an issue and applies the returned tally locally
    pub async fn vote(&self, issue_id: i64, vote_type: VoteType) -> ClientResult<VoteTally> {
        let tally = match self.api.vote(issue_id, vote_type).await {
            Ok(tally) => tally,
            Err(e) => {
                tracing::warn!(issue_id, "Failed to vote: {}", e);
                self.state.send_modify(|s| s.error = Some(e.user_message()));
                return Err(e);
            }
        };
        self.state.send_modify(|s| {
            if let Some(issue) = s.issues.iter_mut().find(|i| i.id == issue_id) {
                issue.apply_tally(&tally);
            }
        });
        tracing::debug!(issue_id, upvotes = tally.upvotes, downvotes = tally.downvotes, "Vote applied");
        Ok(tally)
    }
}
