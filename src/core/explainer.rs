use crate::core::links::{clean_links, LinkPolicy};
use crate::core::parser::parse_explanation;
use crate::core::prompt::PromptBuilder;
use crate::core::{ChatCompletion, ConfigProvider, LinkVerifier};
use crate::domain::model::Explanation;
use crate::utils::error::{ExplainError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExplainerSettings {
    pub model: String,
    pub retries: usize,
    pub retry_base_delay: Duration,
    pub link_policy: LinkPolicy,
}

impl ExplainerSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            model: config.model().to_string(),
            retries: config.retries(),
            retry_base_delay: config.retry_base_delay(),
            link_policy: LinkPolicy::from_config(config),
        }
    }
}

/// Delay before retry number `attempt + 1`: `base * 2^attempt`.
pub fn backoff_delay(base: Duration, attempt: usize) -> Duration {
    let factor = 2u32.saturating_pow(attempt.min(31) as u32);
    base.saturating_mul(factor)
}

/// The fixed-shape record returned once retries are exhausted.
pub fn failure_record(err: &ExplainError) -> Explanation {
    if err.is_model_unavailable() {
        Explanation::model_unavailable()
    } else {
        Explanation::internal_error(err.to_string())
    }
}

pub struct Explainer<C: ChatCompletion> {
    client: C,
    verifier: Box<dyn LinkVerifier>,
    prompts: PromptBuilder,
    settings: ExplainerSettings,
}

impl<C: ChatCompletion> Explainer<C> {
    pub fn new(client: C, verifier: Box<dyn LinkVerifier>, settings: ExplainerSettings) -> Self {
        Self {
            client,
            verifier,
            prompts: PromptBuilder::default(),
            settings,
        }
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn settings(&self) -> &ExplainerSettings {
        &self.settings
    }

    pub async fn explain(&self, error: &str) -> Explanation {
        self.explain_with_model(error, &self.settings.model).await
    }

    /// Runs the full pipeline with retries. Never fails: exhaustion yields a failure record.
    pub async fn explain_with_model(&self, error: &str, model: &str) -> Explanation {
        self.explain_with_retries(error, model)
            .await
            .unwrap_or_else(|e| failure_record(&e))
    }

    /// Like `explain_with_model`, but hands back the last error once retries are
    /// exhausted so callers can tell a failure apart from a real explanation.
    pub async fn explain_with_retries(&self, error: &str, model: &str) -> Result<Explanation> {
        let prompt = self.prompts.build(error, model);
        let attempts = self.settings.retries.max(1);

        let mut attempt = 0;
        loop {
            tracing::debug!("Attempt {}/{} using model {}", attempt + 1, attempts, model);

            match self.attempt(&prompt, model).await {
                Ok(explanation) => {
                    tracing::info!(
                        "Explained {} after {} attempt(s), {} link(s) kept",
                        explanation.error_type,
                        attempt + 1,
                        explanation.relevant_links.len()
                    );
                    return Ok(explanation);
                }
                Err(e) if e.is_retryable() && attempt + 1 < attempts => {
                    let delay = backoff_delay(self.settings.retry_base_delay, attempt);
                    tracing::warn!(
                        "Attempt {} failed: {} (retrying in {:?})",
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Giving up after attempt {}: {} (Category: {:?})",
                        attempt + 1,
                        e,
                        e.category()
                    );
                    return Err(e);
                }
            }
        }
    }

    /// A single attempt without retries, surfacing the underlying error.
    pub async fn try_explain(&self, error: &str, model: &str) -> Result<Explanation> {
        let prompt = self.prompts.build(error, model);
        self.attempt(&prompt, model).await
    }

    async fn attempt(&self, prompt: &str, model: &str) -> Result<Explanation> {
        let content = self.client.complete(model, prompt).await?;
        let raw = parse_explanation(&content)?;
        let relevant_links =
            clean_links(&raw.relevant_links, self.verifier.as_ref(), &self.settings.link_policy)
                .await;

        Ok(Explanation {
            error_type: raw.error_type,
            explanation: raw.explanation,
            suggested_fix: raw.suggested_fix,
            relevant_links,
        })
    }
}
