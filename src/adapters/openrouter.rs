use crate::core::{ChatCompletion, ConfigProvider};
use crate::domain::model::{ChatCompletionRequest, ChatMessage};
use crate::utils::error::{ExplainError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// OpenAI-compatible chat-completions client, pointed at OpenRouter by default.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    base_url: String,
    api_key: String,
    app_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenRouter can answer 200 with an `error` object when the upstream model fails.
#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl OpenRouterClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stackexplain/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            app_name: None,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| ExplainError::MissingConfigError {
                field: crate::config::ENV_API_KEY.to_string(),
            })?;

        let mut client = Self::new(config.api_base_url(), api_key, config.request_timeout())?;
        client.app_name = config.app_name().map(str::to_string);
        Ok(client)
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn status_error(status: StatusCode, message: String) -> ExplainError {
    if status.is_server_error() {
        ExplainError::ModelUnavailableError {
            status: status.as_u16(),
            message,
        }
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        ExplainError::RateLimitedError { message }
    } else {
        ExplainError::ApiStatusError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        };

        let url = self.completions_url();
        tracing::debug!("POST {} (model {})", url, model);

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request);
        if let Some(app_name) = &self.app_name {
            builder = builder.header("X-Title", app_name);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Completion response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        let body: CompletionBody = response.json().await?;

        if let Some(err) = body.error {
            let code = err
                .code
                .as_ref()
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok())
                .and_then(|c| StatusCode::from_u16(c).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(status_error(code, err.message));
        }

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ExplainError::EmptyCompletionError)
    }
}
