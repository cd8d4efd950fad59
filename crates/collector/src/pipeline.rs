use common::config::GithubConfig;
use common::Result;
use futures::stream::{StreamExt, TryStreamExt};
use normalizer::{normalize_commit, normalize_issue, CommitRecord, Frame, IssueRecord, StateFilter};
use tracing::{info, instrument};

use crate::metrics;
use crate::repository::{acquire_repository, RepoHandle};

/// `None` and `Some(0)` both mean "no cap".
fn item_cap(max: Option<usize>) -> Option<usize> {
    max.filter(|max| *max > 0)
}

/// Resolves `identifier` and collects its commits. Each call sets up its own
/// connection.
pub async fn fetch_commits(
    config: &GithubConfig,
    identifier: &str,
    max: Option<usize>,
) -> Result<Frame<CommitRecord>> {
    let repo = acquire_repository(config, identifier).await?;
    collect_commits(&repo, max).await
}

/// Resolves `identifier` and collects its issues, excluding pull requests.
pub async fn fetch_issues(
    config: &GithubConfig,
    identifier: &str,
    state: StateFilter,
    max: Option<usize>,
) -> Result<Frame<IssueRecord>> {
    let repo = acquire_repository(config, identifier).await?;
    collect_issues(&repo, state, max).await
}

#[instrument(skip(repo), fields(repo = %repo.full_name()))]
pub async fn collect_commits(
    repo: &RepoHandle,
    max: Option<usize>,
) -> Result<Frame<CommitRecord>> {
    let commits = match item_cap(max) {
        Some(cap) => repo.list_commits().take(cap).boxed(),
        None => repo.list_commits(),
    };

    let records: Vec<CommitRecord> = commits
        .inspect_ok(|_| {
            metrics::ITEMS_VISITED_TOTAL
                .with_label_values(&["commits"])
                .inc()
        })
        .map_ok(|commit| normalize_commit(&commit))
        .try_collect()
        .await?;

    metrics::RECORDS_EMITTED_TOTAL
        .with_label_values(&["commits"])
        .inc_by(records.len() as u64);
    info!(count = records.len(), "fetched commits");
    Ok(Frame::new(records))
}

#[instrument(skip(repo), fields(repo = %repo.full_name()))]
pub async fn collect_issues(
    repo: &RepoHandle,
    state: StateFilter,
    max: Option<usize>,
) -> Result<Frame<IssueRecord>> {
    let cap = item_cap(max);
    let mut items = repo.list_issues(state);
    let mut records = Vec::new();
    let mut visited = 0usize;
    let mut pull_requests = 0usize;

    // The cap bounds items visited, pull requests included, not records
    // emitted.
    loop {
        if cap.is_some_and(|cap| visited >= cap) {
            break;
        }
        let Some(issue) = items.try_next().await? else {
            break;
        };
        visited += 1;
        metrics::ITEMS_VISITED_TOTAL
            .with_label_values(&["issues"])
            .inc();

        if issue.is_pull_request() {
            pull_requests += 1;
            metrics::PULL_REQUESTS_SKIPPED_TOTAL.inc();
            continue;
        }
        records.push(normalize_issue(&issue));
    }

    metrics::RECORDS_EMITTED_TOTAL
        .with_label_values(&["issues"])
        .inc_by(records.len() as u64);
    info!(
        visited,
        pull_requests,
        count = records.len(),
        "fetched issues"
    );
    Ok(Frame::new(records))
}
