pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(#[source] anyhow::Error),
    #[error("unexpected status {status} for {endpoint}")]
    Http { status: u16, endpoint: String },
    #[error("could not decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn network(err: impl Into<anyhow::Error>) -> Self {
        Self::Network(err.into())
    }

    pub fn decode(what: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { what, source }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Maps a non-success HTTP status onto the error taxonomy.
    pub fn from_status(status: u16, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        match status {
            401 | 403 => Self::Authentication(format!("status {status} for {endpoint}")),
            404 => Self::NotFound(endpoint),
            500..=599 => Self::Network(anyhow::anyhow!("status {status} for {endpoint}")),
            _ => Self::Http { status, endpoint },
        }
    }
}
