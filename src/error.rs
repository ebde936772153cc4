use std::path::PathBuf;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ClauselensError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal for the whole request: no tasks are dispatched and the caller
/// receives an empty report with an explanatory summary.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No API key configured (set --api-key or CLAUSELENS_API_KEY)")]
    MissingApiKey,

    #[error("max_chunk_chars must be greater than zero")]
    ZeroChunkSize,

    #[error("concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("Duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("Category with empty name")]
    UnnamedCategory,
}

/// Per-task transport failure. Recovered locally: the task's slot is
/// marked failed, sibling tasks are unaffected.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("Empty response body")]
    EmptyBody,
}

/// Errors that can say whether a fresh attempt might succeed.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ClientError {
    fn is_retryable(&self) -> bool {
        match self {
            // Request-construction faults fail identically on every
            // attempt; transient connection conditions do not.
            ClientError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            ClientError::RateLimited | ClientError::EmptyBody => true,
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
