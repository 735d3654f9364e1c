//! Report-issue flow
//!
//! A [`ReportDraft`] collects the form; [`IssueReporter::submit`] validates
//! it, uploads every photo concurrently (one request per file), then
//! creates the issue with the URLs that came back.

use futures::future::join_all;
use shared::{Category, Issue, Location, LocationFilter, MAX_MEDIA_PER_ISSUE, NewIssue, Severity};

use crate::api::SunoApi;
use crate::config::UploadPolicy;
use crate::geocode::Address;
use crate::http::{HttpClient, NetworkHttpClient};
use crate::media::MediaFile;
use crate::{ClientError, ClientResult};

/// Issue report being filled in
#[derive(Debug, Clone)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    pub severity: Severity,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    media: Vec<MediaFile>,
    max_media: usize,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::with_max_media(MAX_MEDIA_PER_ISSUE)
    }

    pub fn with_max_media(max_media: usize) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category_id: None,
            location_id: None,
            severity: Severity::default(),
            address: None,
            latitude: None,
            longitude: None,
            media: Vec::new(),
            max_media,
        }
    }

    pub fn media(&self) -> &[MediaFile] {
        &self.media
    }

    pub fn max_media(&self) -> usize {
        self.max_media
    }

    /// Adds a batch of photos. The whole batch is refused if it would push
    /// the draft over the limit.
    pub fn add_media(&mut self, files: impl IntoIterator<Item = MediaFile>) -> ClientResult<()> {
        let files: Vec<MediaFile> = files.into_iter().collect();
        if self.media.len() + files.len() > self.max_media {
            return Err(ClientError::Validation(format!(
                "You can upload a maximum of {} images",
                self.max_media
            )));
        }
        self.media.extend(files);
        Ok(())
    }

    pub fn remove_media(&mut self, index: usize) -> Option<MediaFile> {
        (index < self.media.len()).then(|| self.media.remove(index))
    }

    /// Takes address and coordinates from the location picker
    pub fn set_position(&mut self, address: &Address) {
        self.address = Some(address.display_name.clone());
        self.latitude = Some(address.latitude);
        self.longitude = Some(address.longitude);
    }

    /// Checks the required fields, in form order
    pub fn validate(&self) -> ClientResult<()> {
        let missing = if self.title.trim().is_empty() {
            Some("Title is required")
        } else if self.description.trim().is_empty() {
            Some("Description is required")
        } else if self.category_id.is_none() {
            Some("Category is required")
        } else if self.location_id.is_none() {
            Some("Location is required")
        } else {
            None
        };
        match missing {
            Some(msg) => Err(ClientError::Validation(msg.to_string())),
            None => Ok(()),
        }
    }

    /// Creation payload for the given uploaded media URLs.
    ///
    /// Does not re-run [`validate`](Self::validate); only the ids it needs
    /// are checked.
    pub fn to_new_issue(&self, media_urls: Vec<String>) -> ClientResult<NewIssue> {
        let (Some(category_id), Some(location_id)) = (self.category_id, self.location_id) else {
            return Err(ClientError::Validation("Category and location are required".into()));
        };
        Ok(NewIssue {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category_id,
            location_id,
            severity: self.severity,
            address: self.address.clone().filter(|a| !a.trim().is_empty()),
            latitude: self.latitude,
            longitude: self.longitude,
            media_urls,
        })
    }
}

/// A photo that could not be uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFailure {
    /// Position in the draft's media list
    pub index: usize,
    pub file_name: String,
    pub error: String,
}

/// Result of a submitted report
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    /// The created issue; its id is where the caller navigates next
    pub issue: Issue,
    /// Photos left out of the issue (best-effort policy only)
    pub failed_uploads: Vec<UploadFailure>,
}

impl ReportOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_uploads.is_empty()
    }
}

/// Selector contents for the report form
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub categories: Vec<Category>,
    pub locations: Vec<Location>,
}

/// Submits issue reports
pub struct IssueReporter<H: HttpClient = NetworkHttpClient> {
    api: SunoApi<H>,
    policy: UploadPolicy,
    max_media: usize,
}

impl<H: HttpClient> IssueReporter<H> {
    pub fn new(api: SunoApi<H>) -> Self {
        Self {
            api,
            policy: UploadPolicy::default(),
            max_media: MAX_MEDIA_PER_ISSUE,
        }
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_media(mut self, max_media: usize) -> Self {
        self.max_media = max_media;
        self
    }

    /// Empty draft with this reporter's photo limit
    pub fn draft(&self) -> ReportDraft {
        ReportDraft::with_max_media(self.max_media)
    }

    /// Categories and locations, fetched concurrently. A failed lookup
    /// leaves its list empty.
    pub async fn load_options(&self) -> ReportOptions {
        let filter = LocationFilter::default();
        let (categories, locations) = tokio::join!(self.api.categories(), self.api.locations(&filter));
        ReportOptions {
            categories: categories.unwrap_or_else(|e| {
                tracing::warn!("Failed to fetch categories: {}", e);
                Vec::new()
            }),
            locations: locations.unwrap_or_else(|e| {
                tracing::warn!("Failed to fetch locations: {}", e);
                Vec::new()
            }),
        }
    }

    /// Validates, uploads media, creates the issue.
    ///
    /// The photo count is held to this reporter's limit, which may be lower
    /// than the one the draft was built with.
    pub async fn submit(&self, draft: &ReportDraft) -> ClientResult<ReportOutcome> {
        draft.validate()?;
        if draft.media().len() > self.max_media {
            return Err(ClientError::Validation(format!(
                "You can upload a maximum of {} images",
                self.max_media
            )));
        }

        let (media_urls, failed_uploads) = self.upload_all(draft.media()).await;
        if !failed_uploads.is_empty() && self.policy == UploadPolicy::AllOrNothing {
            let names: Vec<&str> = failed_uploads.iter().map(|f| f.file_name.as_str()).collect();
            return Err(ClientError::Upload(names.join(", ")));
        }

        let new_issue = draft.to_new_issue(media_urls)?;
        let issue = self.api.create_issue(&new_issue).await?;
        tracing::info!(
            issue_id = issue.id,
            media = issue.media_urls.len(),
            failed = failed_uploads.len(),
            "Issue reported"
        );
        Ok(ReportOutcome {
            issue,
            failed_uploads,
        })
    }

    /// One concurrent upload per file. URLs keep the selection order.
    async fn upload_all(&self, media: &[MediaFile]) -> (Vec<String>, Vec<UploadFailure>) {
        if media.is_empty() {
            return (Vec::new(), Vec::new());
        }
        tracing::debug!(count = media.len(), "Uploading media");

        let results = join_all(media.iter().map(|file| self.api.upload(file))).await;

        let mut urls = Vec::with_capacity(media.len());
        let mut failures = Vec::new();
        for (index, (file, result)) in media.iter().zip(results).enumerate() {
            match result {
                Ok(url) => urls.push(url),
                Err(e) => {
                    tracing::warn!(index, file = %file.file_name, "Media upload failed: {}", e);
                    failures.push(UploadFailure {
                        index,
                        file_name: file.file_name.clone(),
                        error: e.user_message(),
                    });
                }
            }
        }
        (urls, failures)
    }
}
