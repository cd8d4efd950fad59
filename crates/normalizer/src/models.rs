use std::fmt;
use std::str::FromStr;

use common::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub user: String,
    pub state: IssueState,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub open_duration_days: Option<i64>,
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side state filter for the issues listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StateFilter {
    Open,
    Closed,
    #[default]
    All,
}

impl StateFilter {
    pub const ALL: [StateFilter; 3] = [StateFilter::All, StateFilter::Open, StateFilter::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::Open => "open",
            StateFilter::Closed => "closed",
            StateFilter::All => "all",
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateFilter {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(StateFilter::Open),
            "closed" => Ok(StateFilter::Closed),
            "all" => Ok(StateFilter::All),
            other => Err(AppError::validation(format!(
                "invalid issue state {other:?}, expected one of all, open, closed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_filter_parses_case_insensitively() {
        assert_eq!("OPEN".parse::<StateFilter>().unwrap(), StateFilter::Open);
        assert_eq!(" closed ".parse::<StateFilter>().unwrap(), StateFilter::Closed);
        assert_eq!("all".parse::<StateFilter>().unwrap(), StateFilter::All);
        assert_eq!(StateFilter::default(), StateFilter::All);
    }

    #[test]
    fn unknown_state_is_a_validation_error() {
        let err = "merged".parse::<StateFilter>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("merged"));
    }

    #[test]
    fn state_filter_round_trips_through_display() {
        for filter in StateFilter::ALL {
            assert_eq!(filter.to_string().parse::<StateFilter>().unwrap(), filter);
        }
    }
}
