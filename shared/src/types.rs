//! Domain enums
//!
//! Closed value sets the backend uses on the wire. All of them serialize as
//! `snake_case` strings and parse back through `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Client-displayed urgency tier of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Display colour used by the feed badges.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "yellow",
            Self::High => "orange",
            Self::Critical => "red",
        }
    }
}

/// Issue lifecycle stage. Authoritative on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::Open,
        IssueStatus::InProgress,
        IssueStatus::Resolved,
        IssueStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Human label ("In Progress")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

/// Direction of a community vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Server-defined feed orderings. The client never sorts locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Recent,
    Popular,
    Urgent,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Popular => "popular",
            Self::Urgent => "urgent",
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                $(
                    if normalized == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseEnumError::new($kind, s))
            }
        }
    };
}

impl_str_enum!(Severity, "severity", [Low, Medium, High, Critical]);
impl_str_enum!(IssueStatus, "status", [Open, InProgress, Resolved, Closed]);
impl_str_enum!(VoteType, "vote type", [Up, Down]);
impl_str_enum!(SortKey, "sort key", [Recent, Popular, Urgent]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: IssueStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, IssueStatus::Resolved);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("Critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!(" up ".parse::<VoteType>().unwrap(), VoteType::Up);
        assert_eq!("IN_PROGRESS".parse::<IssueStatus>().unwrap(), IssueStatus::InProgress);
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = "sideways".parse::<VoteType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid vote type: sideways");
        assert!("newest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Severity::default(), Severity::Medium);
        assert_eq!(IssueStatus::default(), IssueStatus::Open);
        assert_eq!(SortKey::default(), SortKey::Recent);
    }
}
