pub mod models;
pub mod payloads;
pub mod table;
pub mod transform;

pub use models::{CommitRecord, IssueRecord, IssueState, StateFilter};
pub use payloads::{CommitPayload, IssuePayload, RepoPayload, UserRef};
pub use table::{Frame, Tabular};
pub use transform::{first_line, normalize_commit, normalize_issue, open_duration_days};
