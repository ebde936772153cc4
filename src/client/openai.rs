use super::retry::retry_with_backoff;
use super::{AnalysisClient, RawResponse};
use crate::config::{Config, RetryConfig};
use crate::error::ClientError;
use crate::pipeline::AnalysisTask;
use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// The response body is returned verbatim, whatever the HTTP status: a
/// provider error envelope is a valid, informative payload that the parser
/// turns into a recovered partial failure. Only transport-level problems
/// surface as `ClientError`, and those are retried with backoff within the
/// task's single timeout window.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    retry: RetryConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl OpenAiClient {
    pub fn new(config: &Config, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            retry: config.retry.clone(),
        }
    }

    async fn attempt(&self, task: &AnalysisTask) -> Result<RawResponse, ClientError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &task.context,
                },
                ChatMessage {
                    role: "user",
                    content: &task.text,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ClientError::EmptyBody);
        }
        Ok(body)
    }
}

#[async_trait]
impl AnalysisClient for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn call(&self, task: &AnalysisTask) -> Result<RawResponse, ClientError> {
        debug!(
            "requesting {} analysis of {} ({} chars)",
            self.model,
            task.label,
            task.text.len()
        );
        retry_with_backoff(&self.retry, || self.attempt(task)).await
    }
}
