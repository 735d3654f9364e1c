//! Issue detail page: one issue and its comment thread
//!
//! Loads are sequenced. A confirmed comment or vote also takes a ticket, so
//! a load that was already in flight cannot put back the state from before
//! the mutation.

use shared::{Comment, Issue, NewComment, VoteTally, VoteType};
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use crate::api::SunoApi;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::sequence::RequestSequencer;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub issue: Option<Issue>,
    /// Newest first, as the server orders them
    pub comments: Vec<Comment>,
    /// Text in the comment box; cleared once a post is confirmed
    pub comment_draft: String,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Issue detail
pub struct IssueDetail<H: HttpClient = NetworkHttpClient> {
    api: SunoApi<H>,
    issue_id: i64,
    state: watch::Sender<DetailState>,
    sequencer: RequestSequencer,
    /// Loads still awaiting a response, stale ones included
    pending_loads: AtomicUsize,
}

impl<H: HttpClient> IssueDetail<H> {
    pub fn new(api: SunoApi<H>, issue_id: i64) -> Self {
        let (state, _) = watch::channel(DetailState::default());
        Self {
            api,
            issue_id,
            state,
            sequencer: RequestSequencer::new(),
            pending_loads: AtomicUsize::new(0),
        }
    }

    pub fn issue_id(&self) -> i64 {
        self.issue_id
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn issue(&self) -> Option<Issue> {
        self.state.borrow().issue.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.borrow().comments.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// Absolute URLs for the issue's photos
    pub fn media_urls(&self) -> Vec<String> {
        self.state
            .borrow()
            .issue
            .as_ref()
            .map(|issue| issue.media_urls.iter().map(|u| self.api.media_url(u)).collect())
            .unwrap_or_default()
    }

    /// Loads the issue and its comments concurrently.
    ///
    /// Each half is applied on its own; the issue's error (if any) is the
    /// one returned, a comment failure is only logged. A load overtaken by a
    /// newer load or a confirmed mutation is dropped whole and returns `Ok`.
    pub async fn load(&self) -> ClientResult<()> {
        let ticket = self.sequencer.begin();
        self.pending_loads.fetch_add(1, Ordering::AcqRel);
        self.state.send_modify(|s| s.loading = true);
        let (issue, comments) = tokio::join!(
            self.api.issue(self.issue_id),
            self.api.comments(self.issue_id)
        );
        let still_loading = self.pending_loads.fetch_sub(1, Ordering::AcqRel) > 1;

        if !self.sequencer.is_current(ticket) {
            tracing::debug!(%ticket, issue_id = self.issue_id, "Dropping stale issue detail response");
            if !still_loading {
                self.state.send_modify(|s| s.loading = false);
            }
            return Ok(());
        }

        let mut error = None;
        self.state.send_modify(|s| {
            match issue {
                Ok(issue) => s.issue = Some(issue),
                Err(e) => {
                    tracing::warn!(issue_id = self.issue_id, "Failed to fetch issue: {}", e);
                    s.error = Some(e.user_message());
                    error = Some(e);
                }
            }
            match comments {
                Ok(comments) => s.comments = comments,
                Err(e) => tracing::warn!(issue_id = self.issue_id, "Failed to fetch comments: {}", e),
            }
            s.loading = false;
        });
        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Edits the comment box
    pub fn set_comment_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_modify(|s| s.comment_draft = text);
    }

    /// Posts the comment box contents
    pub async fn submit_comment(&self) -> ClientResult<Comment> {
        let content = self.state.borrow().comment_draft.clone();
        self.post_comment(&content).await
    }

    /// Posts a comment. The confirmed comment is put at the top of the
    /// thread and the comment box is cleared; on failure the box is kept.
    pub async fn post_comment(&self, content: &str) -> ClientResult<Comment> {
        self.post(NewComment::new(content.trim())).await
    }

    /// Replies to another comment
    pub async fn reply(&self, parent_id: i64, content: &str) -> ClientResult<Comment> {
        self.post(NewComment::reply(content.trim(), parent_id)).await
    }

    async fn post(&self, comment: NewComment) -> ClientResult<Comment> {
        if comment.content.is_empty() {
            return Err(ClientError::Validation("Comment content is required".into()));
        }
        self.state.send_modify(|s| s.submitting = true);
        match self.api.add_comment(self.issue_id, &comment).await {
            Ok(created) => {
                tracing::info!(issue_id = self.issue_id, comment_id = created.id, "Comment posted");
                self.sequencer.invalidate();
                self.state.send_modify(|s| {
                    if let Some(parent_id) = comment.parent_id {
                        if let Some(parent) = s.comments.iter_mut().find(|c| c.id == parent_id) {
                            parent.replies_count += 1;
                        }
                    } else {
                        s.comments.insert(0, created.clone());
                    }
                    if let Some(issue) = s.issue.as_mut() {
                        issue.comments_count += 1;
                    }
                    s.comment_draft.clear();
                    s.submitting = false;
                    s.error = None;
                });
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(issue_id = self.issue_id, "Failed to post comment: {}", e);
                self.state.send_modify(|s| {
                    s.submitting = false;
                    s.error = Some(e.user_message());
                });
                Err(e)
            }
        }
    }

    /// Votes and applies the returned tally to the loaded issue
    pub async fn vote(&self, vote_type: VoteType) -> ClientResult<VoteTally> {
        let tally = self.api.vote(self.issue_id, vote_type).await?;
        self.sequencer.invalidate();
        self.state.send_modify(|s| {
            if let Some(issue) = s.issue.as_mut() {
                issue.apply_tally(&tally);
            }
        });
        Ok(tally)
    }
}
