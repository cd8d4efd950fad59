use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use common::config::GithubConfig;
use common::{AppError, Result};
use futures::stream::BoxStream;
use normalizer::{CommitPayload, IssuePayload, RepoPayload, StateFilter};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::client::{GithubClient, RestGithubClient};
use crate::pagination::paginate;

/// `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoId {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::validation(format!(
                "invalid repository {input:?}, expected owner/name"
            ))
        };
        let (owner, name) = input.split_once('/').ok_or_else(invalid)?;
        let valid_part = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid_part(owner) || !valid_part(name) {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A repository confirmed to exist and be readable with the configured
/// credential. Listings are lazy and independent of each other.
pub struct RepoHandle {
    client: Arc<dyn GithubClient>,
    repo: RepoId,
    id: i64,
    full_name: String,
    per_page: u32,
}

impl fmt::Debug for RepoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoHandle")
            .field("repo", &self.repo)
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("per_page", &self.per_page)
            .finish()
    }
}

/// Connects with the credential carried in `config` and resolves
/// `identifier`. Validation and credential checks happen before any request.
pub async fn acquire_repository(config: &GithubConfig, identifier: &str) -> Result<RepoHandle> {
    let repo: RepoId = identifier.parse()?;
    let client = RestGithubClient::connect(config)?;
    RepoHandle::open(Arc::new(client), repo, config.effective_page_size()).await
}

impl RepoHandle {
    pub async fn open(
        client: Arc<dyn GithubClient>,
        repo: RepoId,
        per_page: u32,
    ) -> Result<Self> {
        let value = client.get_repo(&repo.owner, &repo.name).await?;
        let payload: RepoPayload = decode("repository", value)?;
        info!(
            full_name = %payload.full_name,
            id = payload.id,
            private = payload.private,
            default_branch = payload.default_branch.as_deref().unwrap_or("-"),
            "resolved repository"
        );
        Ok(Self {
            client,
            repo,
            id: payload.id,
            full_name: payload.full_name,
            per_page,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Commits in API order (newest first on the default branch).
    pub fn list_commits(&self) -> BoxStream<'static, Result<CommitPayload>> {
        let client = self.client.clone();
        let repo = self.repo.clone();
        let per_page = self.per_page;
        paginate(per_page, move |page| {
            let client = client.clone();
            let repo = repo.clone();
            async move {
                let values = client
                    .list_commits(&repo.owner, &repo.name, page, per_page)
                    .await?;
                decode_all("commit", values)
            }
        })
    }

    /// Issues filtered server-side by `state`. Pull requests are included, as
    /// the endpoint returns them.
    pub fn list_issues(&self, state: StateFilter) -> BoxStream<'static, Result<IssuePayload>> {
        let client = self.client.clone();
        let repo = self.repo.clone();
        let per_page = self.per_page;
        paginate(per_page, move |page| {
            let client = client.clone();
            let repo = repo.clone();
            async move {
                let values = client
                    .list_issues(&repo.owner, &repo.name, state, page, per_page)
                    .await?;
                decode_all("issue", values)
            }
        })
    }
}

fn decode<T: DeserializeOwned>(what: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| AppError::decode(what, err))
}

fn decode_all<T: DeserializeOwned>(what: &'static str, values: Vec<Value>) -> Result<Vec<T>> {
    values.into_iter().map(|value| decode(what, value)).collect()
}
