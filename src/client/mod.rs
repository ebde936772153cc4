mod keyword;
mod openai;
mod retry;

pub use keyword::KeywordClient;
pub use openai::OpenAiClient;

use crate::config::{ClientKind, Config};
use crate::error::{ClientError, ConfigError};
use crate::pipeline::AnalysisTask;
use async_trait::async_trait;
use std::sync::Arc;

/// Opaque payload returned by the remote analysis service. May be empty,
/// non-JSON, wrong-shaped JSON, or a nested envelope; only the response
/// parser interprets it.
pub type RawResponse = String;

#[async_trait]
pub trait AnalysisClient: Send + Sync {
    #[allow(dead_code)]
    fn name(&self) -> &'static str;

    async fn call(&self, task: &AnalysisTask) -> Result<RawResponse, ClientError>;
}

/// Create a client based on the configured kind. A missing credential is a
/// configuration fault caught here, before any task is planned.
pub fn create_client(config: &Config) -> Result<Arc<dyn AnalysisClient>, ConfigError> {
    match config.client {
        ClientKind::Openai => {
            let api_key = config.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
            Ok(Arc::new(OpenAiClient::new(config, api_key)))
        }
        ClientKind::Keyword => Ok(Arc::new(KeywordClient::new(config.categories.clone()))),
    }
}
