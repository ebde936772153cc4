use super::{AnalysisClient, RawResponse};
use crate::config::Category;
use crate::error::ClientError;
use crate::pipeline::{AnalysisTask, TaskLabel};
use async_trait::async_trait;
use serde_json::json;

/// Offline analyzer: scans sentences for legal/privacy terms instead of
/// calling a remote model. The result is wrapped in the same nested
/// chat-completion envelope the HTTP service returns, so the full parse
/// path is exercised and the tool stays usable without a credential.
pub struct KeywordClient {
    categories: Vec<Category>,
}

const GENERAL_KEYWORDS: &[&str] = &[
    "privacy",
    "data",
    "personal information",
    "personal info",
    "liability",
    "arbitration",
    "dispute",
    "termination",
    "fees",
    "billing",
    "third party",
    "third-party",
    "tracking",
    "cookies",
];

impl KeywordClient {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    fn keywords_for(&self, label: &TaskLabel) -> Vec<String> {
        let general = || GENERAL_KEYWORDS.iter().map(|s| s.to_string()).collect();
        match label {
            TaskLabel::Category { name } => self
                .categories
                .iter()
                .find(|c| &c.name == name)
                .filter(|c| !c.keywords.is_empty())
                .map(|c| c.keywords.clone())
                .unwrap_or_else(general),
            TaskLabel::Chunk { .. } => general(),
        }
    }
}

#[async_trait]
impl AnalysisClient for KeywordClient {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn call(&self, task: &AnalysisTask) -> Result<RawResponse, ClientError> {
        let keywords: Vec<String> = self
            .keywords_for(&task.label)
            .iter()
            .map(|kw| kw.to_lowercase())
            .collect();

        let mut highlights = Vec::new();
        for sentence in task.text.split_inclusive(['.', '!', '?']) {
            let lower = sentence.to_lowercase();
            if keywords.iter().any(|kw| lower.contains(kw)) {
                highlights.push(sentence.trim().to_string());
            }
        }

        let summary = if highlights.is_empty() {
            "No sentences matched the clause keyword list.".to_string()
        } else {
            format!(
                "Matched {} sentence(s) against {} keyword term(s).",
                highlights.len(),
                keywords.len()
            )
        };

        let inner = json!({ "summary": summary, "highlights": highlights });
        let envelope = json!({
            "choices": [{ "message": { "content": inner.to_string() } }]
        });
        Ok(envelope.to_string())
    }
}
