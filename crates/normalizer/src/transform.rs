use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::models::{CommitRecord, IssueRecord};
use crate::payloads::{CommitPayload, IssuePayload};

/// RFC 3339 in UTC with second precision, e.g. `2024-01-05T00:00:00Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Text before the first `\n`, without a trailing `\r`.
pub fn first_line(message: &str) -> &str {
    let line = message.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Whole days between creation and closure, floored. `None` while the item is
/// still open. A closure stamped before creation yields zero.
pub fn open_duration_days(
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
) -> Option<i64> {
    let closed_at = closed_at?;
    let days = (closed_at - created_at).num_days();
    if days < 0 {
        warn!(%created_at, %closed_at, "closed_at precedes created_at");
    }
    Some(days.max(0))
}

pub fn normalize_commit(payload: &CommitPayload) -> CommitRecord {
    let author = &payload.commit.author;
    CommitRecord {
        sha: payload.sha.clone(),
        author: author.name.clone(),
        email: author.email.clone(),
        date: format_timestamp(&author.date),
        message: first_line(&payload.commit.message).to_string(),
    }
}

pub fn normalize_issue(payload: &IssuePayload) -> IssueRecord {
    IssueRecord {
        id: payload.id,
        number: payload.number,
        title: payload.title.clone(),
        user: payload
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default(),
        state: payload.state,
        created_at: format_timestamp(&payload.created_at),
        closed_at: payload.closed_at.as_ref().map(format_timestamp),
        open_duration_days: open_duration_days(payload.created_at, payload.closed_at),
        comments: payload.comments,
    }
}
