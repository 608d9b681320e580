#[cfg(feature = "cli")]
pub mod input;

use crate::adapters::{HttpLinkVerifier, OpenRouterClient};
use crate::core::explainer::{Explainer, ExplainerSettings};
use crate::core::links::NoopLinkVerifier;
use crate::core::{ConfigProvider, Explanation, LinkVerifier};
use crate::utils::error::Result;

pub fn build_verifier<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn LinkVerifier>> {
    if config.verify_links() {
        Ok(Box::new(HttpLinkVerifier::from_config(config)?))
    } else {
        tracing::debug!("Link verification disabled");
        Ok(Box::new(NoopLinkVerifier))
    }
}

/// Wires the OpenRouter client and the configured link verifier into an explainer.
pub fn build_explainer<C: ConfigProvider + ?Sized>(config: &C) -> Result<Explainer<OpenRouterClient>> {
    let client = OpenRouterClient::from_config(config)?;
    Ok(Explainer::new(
        client,
        build_verifier(config)?,
        ExplainerSettings::from_config(config),
    ))
}

/// Human-readable layout printed by the CLI.
pub fn format_report(result: &Explanation) -> String {
    let mut lines = vec![
        format!("• Error Type:    {}", result.error_type),
        format!("• Explanation:   {}", result.explanation),
        format!("• Suggested Fix: {}", result.suggested_fix),
    ];

    if !result.relevant_links.is_empty() {
        lines.push("• More Info:".to_string());
        for link in &result.relevant_links {
            lines.push(format!("    • {}", link));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_format_report_with_links() {
        let result = Explanation {
            error_type: "IndexError".to_string(),
            explanation: "Out of range.".to_string(),
            suggested_fix: "Check bounds.".to_string(),
            relevant_links: vec![
                "https://docs.python.org/3/".to_string(),
                "https://stackoverflow.com/q/1".to_string(),
            ],
        };

        assert_eq!(
            format_report(&result),
            "• Error Type:    IndexError\n\
             • Explanation:   Out of range.\n\
             • Suggested Fix: Check bounds.\n\
             • More Info:\n\
             \x20   • https://docs.python.org/3/\n\
             \x20   • https://stackoverflow.com/q/1"
        );
    }

    #[test]
    fn test_format_report_without_links() {
        let report = format_report(&Explanation::internal_error("boom"));
        assert!(report.ends_with("• Suggested Fix: boom"));
        assert!(!report.contains("More Info"));
    }

    #[test]
    fn test_build_explainer_requires_api_key() {
        let config = AppConfig::default();
        assert!(build_explainer(&config).is_err());

        let config = AppConfig {
            api_key: Some("sk-test".to_string()),
            verify_links: false,
            ..AppConfig::default()
        };
        let explainer = build_explainer(&config).unwrap();
        assert_eq!(explainer.settings().retries, 3);
        assert_eq!(explainer.settings().model, config.model);
    }
}
