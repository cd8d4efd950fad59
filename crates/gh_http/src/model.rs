use chrono::{DateTime, Utc};
use http::{header, HeaderMap, HeaderValue, Request};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// A GET against the REST API with the headers GitHub requires.
#[derive(Debug)]
pub struct GithubRequest {
    inner: Request<Vec<u8>>,
    endpoint: String,
}

impl GithubRequest {
    pub fn get(url: &str, user_agent: &str, token: &str) -> anyhow::Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(anyhow::anyhow!("user-agent header required"));
        }

        let uri: http::Uri = url.parse()?;
        let endpoint = uri.path().trim_start_matches('/').to_string();

        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))?;
        authorization.set_sensitive(true);

        let inner = Request::builder()
            .method(http::Method::GET)
            .uri(uri)
            .header(header::USER_AGENT, user_agent)
            .header(header::ACCEPT, ACCEPT)
            .header(header::AUTHORIZATION, authorization)
            .header("X-GitHub-Api-Version", API_VERSION)
            .body(Vec::new())?;

        Ok(Self { inner, endpoint })
    }

    /// Path without the leading slash, e.g. `repos/octocat/hello/issues`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn uri(&self) -> &http::Uri {
        self.inner.uri()
    }

    pub fn into_request(self) -> Request<Vec<u8>> {
        self.inner
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitUpdate {
    pub limit: i64,
    pub remaining: i64,
    pub reset: DateTime<Utc>,
}

pub fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimitUpdate> {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<i64>().ok())
    };
    let limit = read("x-ratelimit-limit")?;
    let remaining = read("x-ratelimit-remaining")?;
    let reset = DateTime::from_timestamp(read("x-ratelimit-reset")?, 0)?;
    Some(RateLimitUpdate {
        limit,
        remaining,
        reset,
    })
}
