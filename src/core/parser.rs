use crate::domain::model::RawExplanation;
use crate::utils::error::{ExplainError, Result};

/// Removes a surrounding Markdown code fence, if the reply starts with one.
pub fn strip_code_fences(content: &str) -> String {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    let without_opening = rest.strip_prefix("json").unwrap_or(rest);
    without_opening
        .trim()
        .trim_end_matches('`')
        .trim()
        .to_string()
}

pub fn parse_explanation(content: &str) -> Result<RawExplanation> {
    let cleaned = strip_code_fences(content);
    let value: serde_json::Value = serde_json::from_str(&cleaned)?;

    if !value.is_object() {
        return Err(ExplainError::ResponseParseError {
            message: format!("expected a JSON object, got {}", json_kind(&value)),
        });
    }

    let raw: RawExplanation = serde_json::from_value(value)?;
    Ok(raw)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
