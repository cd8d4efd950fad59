#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use collector::{GithubClient, RepoHandle, RestGithubClient};
use common::config::GithubConfig;
use gh_http::HttpExec;
use http::{Request, Response, StatusCode};
use serde_json::{json, Value};

pub const OWNER: &str = "octocat";
pub const NAME: &str = "hello";

pub fn config(page_size: u32) -> GithubConfig {
    GithubConfig {
        api_base: "https://api.github.test/".to_string(),
        page_size,
        ..GithubConfig::default()
    }
    .with_token("test-token")
}

/// Serves a single repository: its metadata plus pre-paged commit and issue
/// listings. Every request URI is recorded.
#[derive(Default)]
pub struct StubGithub {
    repo_status: Option<StatusCode>,
    listing_failures: HashMap<&'static str, (usize, StatusCode)>,
    commit_pages: Vec<Vec<Value>>,
    issue_pages: Vec<Vec<Value>>,
    requests: Mutex<Vec<String>>,
}

impl StubGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo_status(mut self, status: StatusCode) -> Self {
        self.repo_status = Some(status);
        self
    }

    pub fn listing_status(self, listing: &'static str, status: StatusCode) -> Self {
        self.listing_fails_from(listing, 1, status)
    }

    /// Pages before `from_page` are served normally; later ones fail.
    pub fn listing_fails_from(
        mut self,
        listing: &'static str,
        from_page: usize,
        status: StatusCode,
    ) -> Self {
        self.listing_failures.insert(listing, (from_page, status));
        self
    }

    pub fn commits(mut self, items: Vec<Value>, per_page: usize) -> Self {
        self.commit_pages = items.chunks(per_page).map(<[Value]>::to_vec).collect();
        self
    }

    pub fn issues(mut self, items: Vec<Value>, per_page: usize) -> Self {
        self.issue_pages = items.chunks(per_page).map(<[Value]>::to_vec).collect();
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn listing_requests(&self, listing: &str) -> Vec<String> {
        let suffix = format!("/{listing}");
        self.requests()
            .into_iter()
            .filter(|uri| uri.split('?').next().unwrap_or_default().ends_with(&suffix))
            .collect()
    }

    fn respond(&self, path: &str, query: &str) -> (StatusCode, Value) {
        let repo_path = format!("/repos/{OWNER}/{NAME}");
        let page = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))
            .and_then(|page| page.parse::<usize>().ok())
            .unwrap_or(1);

        let listing = |name: &'static str, pages: &[Vec<Value>]| {
            if let Some((from_page, status)) = self.listing_failures.get(name) {
                if page >= *from_page {
                    return (*status, json!({ "message": "stubbed failure" }));
                }
            }
            let items = pages.get(page - 1).cloned().unwrap_or_default();
            (StatusCode::OK, Value::Array(items))
        };

        if path == repo_path {
            match self.repo_status {
                Some(status) => (status, json!({ "message": "stubbed failure" })),
                None => (
                    StatusCode::OK,
                    json!({
                        "id": 1296269,
                        "full_name": format!("{OWNER}/{NAME}"),
                        "private": false,
                        "default_branch": "main"
                    }),
                ),
            }
        } else if path == format!("{repo_path}/commits") {
            listing("commits", self.commit_pages.as_slice())
        } else if path == format!("{repo_path}/issues") {
            listing("issues", self.issue_pages.as_slice())
        } else {
            (StatusCode::NOT_FOUND, json!({ "message": "Not Found" }))
        }
    }
}

#[async_trait]
impl HttpExec for StubGithub {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        assert!(req.headers().contains_key(http::header::USER_AGENT));
        assert_eq!(req.headers()[http::header::AUTHORIZATION], "Bearer test-token");

        let uri = req.uri();
        self.requests.lock().unwrap().push(
            uri.path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_default(),
        );
        let (status, body) = self.respond(uri.path(), uri.query().unwrap_or_default());
        let response = Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .header("x-ratelimit-limit", "5000")
            .header("x-ratelimit-remaining", "4990")
            .header("x-ratelimit-reset", "1700000000")
            .body(body.to_string().into_bytes())?;
        Ok(response)
    }
}

pub async fn open_repo(stub: Arc<StubGithub>, page_size: u32) -> common::Result<RepoHandle> {
    let github = config(page_size);
    let client: Arc<dyn GithubClient> = Arc::new(RestGithubClient::new(&github, stub)?);
    RepoHandle::open(
        client,
        format!("{OWNER}/{NAME}").parse()?,
        github.effective_page_size(),
    )
    .await
}

pub fn commit(sha: &str, message: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "author": { "name": "Ada Lovelace", "email": "ada@example.com", "date": date },
            "committer": { "name": "GitHub", "email": "noreply@github.com", "date": date },
            "message": message
        },
        "author": { "id": 1, "login": "ada" }
    })
}

pub fn issue(id: i64, number: i64, created_at: &str, closed_at: Option<&str>) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": format!("Issue {number}"),
        "user": { "id": 7, "login": "octocat" },
        "state": if closed_at.is_some() { "closed" } else { "open" },
        "comments": number % 3,
        "created_at": created_at,
        "closed_at": closed_at,
        "labels": []
    })
}

pub fn pull_request(id: i64, number: i64, created_at: &str) -> Value {
    let mut value = issue(id, number, created_at, None);
    value["pull_request"] = json!({
        "url": format!("https://api.github.test/repos/{OWNER}/{NAME}/pulls/{number}")
    });
    value
}

pub fn day(n: u32) -> String {
    format!("2024-01-{:02}T00:00:00Z", n + 1)
}
