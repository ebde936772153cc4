use serde::{Deserialize, Serialize};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub client: ClientKind,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Threaded explicitly from the CLI/environment into the client;
    /// nothing reads the process environment after startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default)]
    pub retry: RetryConfig,

    /// Empty: one task per chunk. Non-empty: one task per (category, chunk).
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientKind {
    #[default]
    Openai,
    Keyword,
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientKind::Openai => write!(f, "openai"),
            ClientKind::Keyword => write!(f, "keyword"),
        }
    }
}

impl std::str::FromStr for ClientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ClientKind::Openai),
            "keyword" => Ok(ClientKind::Keyword),
            _ => Err(format!("Unknown client kind: {}", s)),
        }
    }
}

/// Transport-level retry used inside the HTTP client. Task outcomes are
/// still final per pipeline run; the dispatcher itself never retries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

/// A named analytical lens applied to the document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Category {
    pub name: String,

    /// Instruction fragment appended to the analysis prompt.
    pub focus: String,

    /// Sentence-matching terms for the offline keyword client.
    #[serde(default)]
    pub keywords: Vec<String>,
}
