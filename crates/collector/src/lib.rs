pub mod client;
pub mod export;
pub mod metrics;
pub mod pagination;
pub mod pipeline;
pub mod repository;

pub use client::{GithubClient, RestGithubClient};
pub use export::{write_csv, write_frame};
pub use pipeline::{collect_commits, collect_issues, fetch_commits, fetch_issues};
pub use repository::{acquire_repository, RepoHandle, RepoId};
