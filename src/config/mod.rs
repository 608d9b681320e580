#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{ExplainError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_MODEL: &str = "STACKEXPLAIN_MODEL";

/// Short model names accepted on the command line and in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ModelChoice {
    #[default]
    Deepseek,
    Gemini,
    Mistral,
}

impl ModelChoice {
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelChoice::Deepseek => "deepseek/deepseek-chat-v3-0324:free",
            ModelChoice::Gemini => "google/gemini-2.0-flash-exp:free",
            ModelChoice::Mistral => "mistralai/mistral-small-3.2-24b-instruct:free",
        }
    }

    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Some(ModelChoice::Deepseek),
            "gemini" => Some(ModelChoice::Gemini),
            "mistral" => Some(ModelChoice::Mistral),
            _ => None,
        }
    }
}

/// Maps an alias to its model id. Anything shaped like `vendor/model` passes through.
pub fn resolve_model(name: &str) -> Result<String> {
    if let Some(choice) = ModelChoice::from_alias(name) {
        return Ok(choice.model_id().to_string());
    }

    let trimmed = name.trim();
    if trimmed.contains('/') && !trimmed.contains(char::is_whitespace) {
        return Ok(trimmed.to_string());
    }

    Err(ExplainError::InvalidConfigValueError {
        field: "model".to_string(),
        value: name.to_string(),
        reason: "Unknown model. Use deepseek, gemini, mistral or a full provider/model id"
            .to_string(),
    })
}

/// Effective settings after defaults, config file, environment and flags are layered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub retries: usize,
    pub retry_base_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub verify_links: bool,
    pub link_timeout_secs: u64,
    pub max_links: usize,
    pub max_link_len: usize,
    pub max_title_len: usize,
    pub app_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: ModelChoice::default().model_id().to_string(),
            retries: 3,
            retry_base_delay_ms: 1000,
            request_timeout_secs: 60,
            verify_links: true,
            link_timeout_secs: 5,
            max_links: 3,
            max_link_len: 200,
            max_title_len: 100,
            app_name: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then the optional TOML file, then the process environment (with `.env`).
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded variables from .env");
        }

        let mut config = Self::default();

        if let Some(path) = config_path {
            tracing::debug!("Loading configuration from {}", path.display());
            let file = toml_config::TomlConfig::from_file(path)?;
            file.apply_to(&mut config)?;
        }

        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = base_url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.model = resolve_model(&model)?;
        }
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn retries(&self) -> usize {
        self.retries
    }

    fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn verify_links(&self) -> bool {
        self.verify_links
    }

    fn link_timeout(&self) -> Duration {
        Duration::from_secs(self.link_timeout_secs)
    }

    fn max_links(&self) -> usize {
        self.max_links
    }

    fn max_link_len(&self) -> usize {
        self.max_link_len
    }

    fn max_title_len(&self) -> usize {
        self.max_title_len
    }

    fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api_base_url)?;
        validation::validate_required_field("OPENROUTER_API_KEY", &self.api_key)?;
        validation::validate_non_empty_string("api.model", &self.model)?;
        validation::validate_range("retry.attempts", self.retries, 1, 10)?;
        validation::validate_positive_number("api.timeout_seconds", self.request_timeout_secs as usize, 1)?;
        validation::validate_positive_number("links.timeout_seconds", self.link_timeout_secs as usize, 1)?;
        validation::validate_range("links.max_links", self.max_links, 0, 10)?;
        Ok(())
    }
}
