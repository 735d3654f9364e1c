//! Admin dashboard statistics

use serde::{Deserialize, Serialize};

/// Aggregate counts computed by the backend. Read-only projection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_issues: u64,
    pub total_users: u64,
    pub open_issues: u64,
    pub in_progress_issues: u64,
    pub resolved_issues: u64,
    /// Issues reported in the trailing seven days
    #[serde(rename = "issuesLast7Days")]
    pub issues_last_7_days: u64,
    #[serde(default)]
    pub top_categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u64,
}

impl AdminStats {
    /// Share of all issues that are resolved, in percent.
    pub fn resolution_rate(&self) -> f64 {
        if self.total_issues == 0 {
            return 0.0;
        }
        self.resolved_issues as f64 * 100.0 / self.total_issues as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_shape() {
        let stats: AdminStats = serde_json::from_str(
            r#"{
                "totalIssues": 40, "totalUsers": 12,
                "openIssues": 20, "inProgressIssues": 10, "resolvedIssues": 10,
                "issuesLast7Days": 6,
                "topCategories": [{"name": "Roads", "count": 15}]
            }"#,
        )
        .unwrap();
        assert_eq!(stats.issues_last_7_days, 6);
        assert_eq!(stats.top_categories[0].name, "Roads");
        assert_eq!(stats.resolution_rate(), 25.0);
        assert_eq!(AdminStats::default().resolution_rate(), 0.0);
    }
}
