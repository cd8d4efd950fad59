pub mod exec;
pub mod model;

pub use exec::{HttpExec, ReqwestExecutor};
pub use model::{parse_rate_limit, GithubRequest, RateLimitUpdate};
