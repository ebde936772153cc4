mod partial;

pub use partial::PartialResult;

use crate::pipeline::TaskLabel;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Extract a structured result from one raw service response.
///
/// The service is untrusted: the payload may be non-JSON prose, a provider
/// error envelope, a truncated answer, or a legitimate chat-completion
/// envelope whose content is itself JSON-encoded. Each stage runs only if
/// the prior stage's expected shape is absent, and every path returns a
/// `PartialResult`; this function never fails.
pub fn parse(raw: &str, label: TaskLabel) -> PartialResult {
    let outer = match parse_outer(raw) {
        Some(value) => value,
        None => {
            debug!("response for {} was not parseable as JSON", label);
            return PartialResult::failure(label, "response was not valid JSON");
        }
    };

    // An explicit error payload is a valid, informative response, not a
    // transport failure.
    if let Some(message) = provider_error(&outer) {
        debug!("provider error for {}: {}", label, message);
        return PartialResult::failure(label, format!("provider error: {message}"));
    }

    let content = match outer
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        Some(content) => content.to_string(),
        None => {
            return PartialResult::failure(label, "response envelope has no answer content");
        }
    };

    // The answer content is JSON-encoded a second time by the model.
    let inner = match parse_inner(&content) {
        Some(value) => value,
        None => {
            // Keep the raw content so the failure is diagnosable.
            return PartialResult::failure(
                label,
                format!("model answer was not valid JSON: {content}"),
            );
        }
    };

    let summary = inner
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string);

    // Non-string elements are skipped rather than failing the whole parse;
    // a missing array is an empty result, not an error.
    let highlights = inner
        .get("highlights")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    PartialResult::success(label, summary, highlights)
}

/// Parse the outer payload, recovering from leading/trailing junk by
/// retrying on the substring between the first `{` and the last `}`.
fn parse_outer(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

fn provider_error(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    if error.is_null() {
        return None;
    }
    if let Some(message) = error.as_str() {
        return Some(message.to_string());
    }
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    Some(error.to_string())
}

/// Parse the model's answer content, tolerating markdown code fences and
/// surrounding prose.
fn parse_inner(content: &str) -> Option<Value> {
    let trimmed = content.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    // Models frequently fence their JSON despite instructions not to.
    if let Ok(fence) = Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```") {
        for cap in fence.captures_iter(trimmed) {
            if let Some(candidate) = cap.get(1) {
                if let Ok(value) = serde_json::from_str(candidate.as_str().trim()) {
                    return Some(value);
                }
            }
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&trimmed[start..=end]).ok()
}
