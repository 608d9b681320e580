use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model unavailable (HTTP {status}): {message}")]
    ModelUnavailableError { status: u16, message: String },

    #[error("Rate limited by model provider: {message}")]
    RateLimitedError { message: String },

    #[error("API returned HTTP {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("Model returned an empty completion")]
    EmptyCompletionError,

    #[error("Could not parse model reply: {message}")]
    ResponseParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Model,
    Parsing,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExplainError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ExplainError::HttpError(_) => ErrorCategory::Network,
            ExplainError::ModelUnavailableError { .. }
            | ExplainError::RateLimitedError { .. }
            | ExplainError::ApiStatusError { .. }
            | ExplainError::EmptyCompletionError => ErrorCategory::Model,
            ExplainError::SerializationError(_) | ExplainError::ResponseParseError { .. } => {
                ErrorCategory::Parsing
            }
            ExplainError::ConfigError { .. }
            | ExplainError::MissingConfigError { .. }
            | ExplainError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ExplainError::ValidationError { .. } | ExplainError::ClipboardError { .. } => {
                ErrorCategory::Input
            }
            ExplainError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Model | ErrorCategory::Parsing => {
                if self.is_retryable() {
                    ErrorSeverity::Medium
                } else {
                    ErrorSeverity::High
                }
            }
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether another attempt at the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExplainError::HttpError(_)
            | ExplainError::ModelUnavailableError { .. }
            | ExplainError::RateLimitedError { .. }
            | ExplainError::EmptyCompletionError
            | ExplainError::SerializationError(_)
            | ExplainError::ResponseParseError { .. } => true,
            ExplainError::ApiStatusError { status, .. } => *status == 408,
            _ => false,
        }
    }

    /// Server-side trouble at the provider, as opposed to a bad reply or a local fault.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(
            self,
            ExplainError::ModelUnavailableError { .. } | ExplainError::RateLimitedError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ExplainError::HttpError(_) => "Could not reach the model provider".to_string(),
            ExplainError::ModelUnavailableError { .. } => {
                "The model is temporarily unavailable".to_string()
            }
            ExplainError::RateLimitedError { .. } => {
                "Too many requests to the model provider".to_string()
            }
            ExplainError::ApiStatusError { status, .. } => {
                format!("The model provider rejected the request (HTTP {})", status)
            }
            ExplainError::EmptyCompletionError | ExplainError::ResponseParseError { .. } => {
                "The model returned a reply that could not be understood".to_string()
            }
            ExplainError::SerializationError(_) => "Invalid JSON data".to_string(),
            ExplainError::ConfigError { message } => format!("Configuration problem: {}", message),
            ExplainError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            ExplainError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {}: {}", field, reason)
            }
            ExplainError::ValidationError { message } => message.clone(),
            ExplainError::ClipboardError { message } => {
                format!("Could not read the clipboard: {}", message)
            }
            ExplainError::IoError(e) => format!("I/O failure: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the API base URL",
            ErrorCategory::Model => match self {
                ExplainError::ApiStatusError { status: 401, .. }
                | ExplainError::ApiStatusError { status: 403, .. } => {
                    "Check that OPENROUTER_API_KEY is set to a valid key"
                }
                _ => "Wait a moment and try again, or pick another model with --model",
            },
            ErrorCategory::Parsing => "Try again; free models occasionally return malformed JSON",
            ErrorCategory::Configuration => "Review the config file and environment variables",
            ErrorCategory::Input => "Pass the error message as an argument or pipe it on stdin",
            ErrorCategory::System => "Check file permissions and available resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable_and_unavailable() {
        let err = ExplainError::ModelUnavailableError {
            status: 503,
            message: "busy".to_string(),
        };
        assert!(err.is_retryable());
        assert!(err.is_model_unavailable());
        assert_eq!(err.category(), ErrorCategory::Model);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_auth_errors_are_not_retryable() {
        let err = ExplainError::ApiStatusError {
            status: 401,
            message: "no key".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!err.is_model_unavailable());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_parse_errors_are_retryable() {
        let err = ExplainError::ResponseParseError {
            message: "not an object".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Parsing);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = ExplainError::MissingConfigError {
            field: "api_key".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Missing required setting: api_key");
    }
}
