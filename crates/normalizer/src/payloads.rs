//! Wire shapes of the REST responses the collector reads. Only the fields the
//! exports need are modelled; everything else is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::IssueState;

#[derive(Debug, Clone, Deserialize)]
pub struct RepoPayload {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: GitCommit,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub author: GitSignature,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub user: Option<UserRef>,
    pub state: IssueState,
    pub comments: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pull_request: Option<serde_json::Value>,
}

impl IssuePayload {
    /// The issues endpoint also lists pull requests; those carry a
    /// `pull_request` object.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub login: String,
}
