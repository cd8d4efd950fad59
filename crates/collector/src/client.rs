use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::config::GithubConfig;
use common::{AppError, Result};
use gh_http::{parse_rate_limit, GithubRequest, HttpExec, ReqwestExecutor};
use normalizer::StateFilter;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::metrics;

#[async_trait]
pub trait GithubClient: Send + Sync {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<Value>;
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;
    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>>;
}

pub struct RestGithubClient {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_agent: String,
    token: String,
}

impl RestGithubClient {
    /// Builds a client over an arbitrary executor. Fails with
    /// `AppError::Authentication` when no token is configured.
    pub fn new(config: &GithubConfig, exec: Arc<dyn HttpExec>) -> Result<Self> {
        let token = config
            .token()
            .ok_or_else(|| AppError::Authentication("no GitHub token configured".to_string()))?
            .to_string();

        let mut base = Url::parse(&config.api_base).map_err(|err| {
            AppError::validation(format!("invalid api base {:?}: {err}", config.api_base))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            exec,
            base,
            user_agent: config.user_agent.clone(),
            token,
        })
    }

    /// Builds a client backed by reqwest.
    pub fn connect(config: &GithubConfig) -> Result<Self> {
        if config.token().is_none() {
            return Err(AppError::Authentication(
                "no GitHub token configured".to_string(),
            ));
        }
        let exec = ReqwestExecutor::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Self::new(config, Arc::new(exec))
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn get_json(&self, url: Url, op: &'static str) -> Result<Value> {
        let request = GithubRequest::get(url.as_str(), &self.user_agent, &self.token)?;
        let endpoint = request.endpoint().to_string();
        debug!(endpoint = %endpoint, "dispatching GitHub request");

        let response = match self.exec.execute(request.into_request()).await {
            Ok(response) => response,
            Err(err) => {
                metrics::record_request(op, "error");
                return Err(AppError::network(err));
            }
        };

        if let Some(rate) = parse_rate_limit(response.headers()) {
            metrics::RATE_LIMIT_REMAINING.set(rate.remaining);
            debug!(
                limit = rate.limit,
                remaining = rate.remaining,
                reset = %rate.reset,
                "rate limit"
            );
        }

        let status = response.status();
        if !status.is_success() {
            metrics::record_request(op, "error");
            return Err(AppError::from_status(status.as_u16(), endpoint));
        }

        metrics::record_request(op, "success");
        serde_json::from_slice(response.body())
            .map_err(|err| AppError::decode("response body", err))
    }

    async fn get_json_array(&self, url: Url, op: &'static str) -> Result<Vec<Value>> {
        match self.get_json(url, op).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(AppError::Other(anyhow::anyhow!(
                "expected array response, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| AppError::validation(format!("invalid request path {path:?}: {err}")))
    }

    fn with_query(url: &mut Url, params: &[(&str, String)]) {
        let mut query_pairs = url.query_pairs_mut();
        for (key, val) in params {
            query_pairs.append_pair(key, val);
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl GithubClient for RestGithubClient {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<Value> {
        let url = self.join(&format!("repos/{owner}/{repo}"))?;
        self.get_json(url, "repo").await
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let mut url = self.join(&format!("repos/{owner}/{repo}/commits"))?;
        let params = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url, "commits").await
    }

    async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: StateFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Value>> {
        let mut url = self.join(&format!("repos/{owner}/{repo}/issues"))?;
        let params = [
            ("state", state.as_str().to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        Self::with_query(&mut url, &params);
        self.get_json_array(url, "issues").await
    }
}
