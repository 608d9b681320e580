use serde::{Deserialize, Serialize};

pub const DEFAULT_ERROR_TYPE: &str = "UnknownError";
pub const DEFAULT_EXPLANATION: &str = "No explanation available.";
pub const DEFAULT_SUGGESTED_FIX: &str = "No fix available.";
pub const PROVIDER_DOCS_URL: &str = "https://openrouter.ai/docs";

/// The record handed back to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub error_type: String,
    pub explanation: String,
    pub suggested_fix: String,
    pub relevant_links: Vec<String>,
}

impl Explanation {
    pub fn model_unavailable() -> Self {
        Self {
            error_type: "ModelUnavailable".to_string(),
            explanation: "Model temporarily unavailable - try again later.".to_string(),
            suggested_fix: String::new(),
            relevant_links: vec![PROVIDER_DOCS_URL.to_string()],
        }
    }

    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self {
            error_type: "InternalError".to_string(),
            explanation: "Internal error occurred.".to_string(),
            suggested_fix: detail.into(),
            relevant_links: Vec::new(),
        }
    }
}

/// Model reply before link cleaning. Links stay raw JSON so non-string entries
/// can be dropped later instead of failing the whole parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ReplyFields")]
pub struct RawExplanation {
    pub error_type: String,
    pub explanation: String,
    pub suggested_fix: String,
    pub relevant_links: Vec<serde_json::Value>,
}

/// Reply fields as sent. Models get types wrong often enough that a mistyped
/// field falls back to its default rather than rejecting the reply.
#[derive(Debug, Default, Deserialize)]
struct ReplyFields {
    #[serde(default)]
    error_type: Option<serde_json::Value>,
    #[serde(default)]
    explanation: Option<serde_json::Value>,
    #[serde(default)]
    suggested_fix: Option<serde_json::Value>,
    #[serde(default)]
    relevant_links: Option<serde_json::Value>,
}

fn text_or(value: Option<serde_json::Value>, fallback: &str) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s,
        _ => fallback.to_string(),
    }
}

impl From<ReplyFields> for RawExplanation {
    fn from(fields: ReplyFields) -> Self {
        let relevant_links = match fields.relevant_links {
            Some(serde_json::Value::Array(links)) => links,
            Some(other) => {
                tracing::debug!("Ignoring non-list relevant_links: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        Self {
            error_type: text_or(fields.error_type, DEFAULT_ERROR_TYPE),
            explanation: text_or(fields.explanation, DEFAULT_EXPLANATION),
            suggested_fix: text_or(fields.suggested_fix, DEFAULT_SUGGESTED_FIX),
            relevant_links,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FewShotExample {
    pub input: String,
    pub output: Explanation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}
