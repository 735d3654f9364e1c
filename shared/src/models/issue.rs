//! Issue Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Location, UserSummary};
use crate::types::{IssueStatus, Severity, VoteType};

/// Upper bound on photos attached to one report (client-side check only)
pub const MAX_MEDIA_PER_ISSUE: usize = 5;

/// Reported civic problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub status: IssueStatus,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub severity: Severity,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub media_urls: Vec<String>,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub upvotes: i64,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub downvotes: i64,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub views: i64,
    #[serde(default, deserialize_with = "crate::util::null_as_default")]
    pub comments_count: i64,
    #[serde(default, with = "crate::util::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    // -- Relations (embedded by the backend) --
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Issue {
    pub fn net_votes(&self) -> i64 {
        self.upvotes - self.downvotes
    }

    /// Replaces the vote counters with the server's tally.
    pub fn apply_tally(&mut self, tally: &VoteTally) {
        self.upvotes = tally.upvotes;
        self.downvotes = tally.downvotes;
    }

    /// Relative age for feed cards, `None` when the timestamp is missing.
    pub fn time_ago(&self, now: DateTime<Utc>) -> Option<String> {
        self.created_at.map(|then| crate::util::time_ago(then, now))
    }
}

/// Create issue payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category_id: i64,
    pub location_id: i64,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Vote payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub vote_type: VoteType,
}

/// Authoritative counters returned by the vote endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
}

/// Query for `GET /issues`. Unset values are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IssueStatus>,
    pub sort: crate::types::SortKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Issue {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Pothole on Bank St",
            "description": "Deep pothole near the crosswalk",
            "status": "in_progress",
            "severity": "high",
            "media_urls": ["/static/uploads/a.jpg"],
            "upvotes": 9,
            "downvotes": 2,
            "created_at": "2024-06-10T08:00:00",
            "user": {"id": 1, "name": "amina"},
            "category": {"id": 2, "name": "Roads", "color_code": "#EF4444", "icon_name": "road"},
            "location": null
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_backend_issue() {
        let issue = sample();
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.views, 0);
        assert_eq!(issue.net_votes(), 7);
        assert_eq!(issue.category.as_ref().map(|c| c.name.as_str()), Some("Roads"));
        assert!(issue.location.is_none());
    }

    #[test]
    fn test_null_counters_and_enums_use_defaults() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Flooded underpass",
            "description": "Water up to the curb",
            "status": null,
            "severity": null,
            "media_urls": null,
            "upvotes": null,
            "downvotes": null,
            "views": null,
            "comments_count": null,
            "category": {"id": 2, "name": "Roads", "color_code": null, "icon_name": null}
        }))
        .unwrap();
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.severity, Severity::Medium);
        assert!(issue.media_urls.is_empty());
        assert_eq!(issue.net_votes(), 0);
        assert_eq!(issue.category.map(|c| c.icon_name), Some("folder".to_string()));
    }

    #[test]
    fn test_apply_tally_replaces_counts() {
        let mut issue = sample();
        issue.apply_tally(&VoteTally { upvotes: 10, downvotes: 1 });
        assert_eq!((issue.upvotes, issue.downvotes), (10, 1));
    }

    #[test]
    fn test_time_ago() {
        let issue = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 11, 30, 0).unwrap();
        assert_eq!(issue.time_ago(now).as_deref(), Some("3h ago"));
    }

    #[test]
    fn test_query_omits_unset_fields() {
        let query = IssueQuery {
            status: Some(IssueStatus::Open),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"status": "open", "sort": "recent"}));
    }
}
