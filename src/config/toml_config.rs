use crate::config::{resolve_model, AppConfig};
use crate::utils::error::{ExplainError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `stackexplain.toml`. Every key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub retry: Option<RetryConfig>,
    pub links: Option<LinksConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub app_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetryConfig {
    pub attempts: Option<usize>,
    pub base_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    pub verify: Option<bool>,
    pub timeout_seconds: Option<u64>,
    pub max_links: Option<usize>,
    pub max_link_len: Option<usize>,
    pub max_title_len: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExplainError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExplainError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExplainError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_to(&self, config: &mut AppConfig) -> Result<()> {
        if let Some(api) = &self.api {
            if let Some(base_url) = &api.base_url {
                config.api_base_url = base_url.clone();
            }
            if let Some(key) = &api.api_key {
                if key.contains("${") {
                    tracing::warn!("api.api_key references an unset environment variable; ignoring it");
                } else {
                    config.api_key = Some(key.clone());
                }
            }
            if let Some(model) = &api.model {
                config.model = resolve_model(model)?;
            }
            if let Some(timeout) = api.timeout_seconds {
                config.request_timeout_secs = timeout;
            }
            if let Some(app_name) = &api.app_name {
                config.app_name = Some(app_name.clone());
            }
        }

        if let Some(retry) = &self.retry {
            if let Some(attempts) = retry.attempts {
                config.retries = attempts;
            }
            if let Some(delay) = retry.base_delay_ms {
                config.retry_base_delay_ms = delay;
            }
        }

        if let Some(links) = &self.links {
            if let Some(verify) = links.verify {
                config.verify_links = verify;
            }
            if let Some(timeout) = links.timeout_seconds {
                config.link_timeout_secs = timeout;
            }
            if let Some(max_links) = links.max_links {
                config.max_links = max_links;
            }
            if let Some(max_link_len) = links.max_link_len {
                config.max_link_len = max_link_len;
            }
            if let Some(max_title_len) = links.max_title_len {
                config.max_title_len = max_title_len;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "http://localhost:8080/v1"
model = "gemini"
timeout_seconds = 30
app_name = "stackexplain-test"

[retry]
attempts = 5
base_delay_ms = 10

[links]
verify = false
max_links = 2
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "google/gemini-2.0-flash-exp:free");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.app_name.as_deref(), Some("stackexplain-test"));
        assert_eq!(config.retries, 5);
        assert_eq!(config.retry_base_delay_ms, 10);
        assert!(!config.verify_links);
        assert_eq!(config.max_links, 2);
        assert_eq!(config.max_link_len, 200);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = TomlConfig::from_toml_str("").unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config).unwrap();
        assert_eq!(config.retries, 3);
        assert!(config.verify_links);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STACKEXPLAIN_TEST_KEY", "sk-from-env");

        let toml_content = r#"
[api]
api_key = "${STACKEXPLAIN_TEST_KEY}"
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-from-env"));

        std::env::remove_var("STACKEXPLAIN_TEST_KEY");
    }

    #[test]
    fn test_unresolved_key_is_ignored() {
        let toml_content = r#"
[api]
api_key = "${STACKEXPLAIN_SURELY_UNSET_VAR}"
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = AppConfig::default();
        file.apply_to(&mut config).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[api\nmodel = ");
        assert!(matches!(result, Err(ExplainError::ConfigError { .. })));
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let file = TomlConfig::from_toml_str("[api]\nmodel = \"llama\"\n").unwrap();
        let mut config = AppConfig::default();
        assert!(file.apply_to(&mut config).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[retry]\nattempts = 2\n")
            .unwrap();

        let file = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(file.retry.unwrap().attempts, Some(2));
    }
}
