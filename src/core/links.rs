use crate::core::{ConfigProvider, LinkVerifier};
use async_trait::async_trait;

/// Search-result pages are never useful as documentation.
pub const BLOCKED_LINK_FRAGMENTS: &[&str] = &["duckduckgo.com", "google.com/search"];

#[derive(Debug, Clone)]
pub struct LinkPolicy {
    pub max_links: usize,
    pub max_link_len: usize,
    pub blocked_fragments: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            max_links: 3,
            max_link_len: 200,
            blocked_fragments: BLOCKED_LINK_FRAGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LinkPolicy {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            max_links: config.max_links(),
            max_link_len: config.max_link_len(),
            ..Self::default()
        }
    }

    fn is_blocked(&self, link: &str) -> bool {
        self.blocked_fragments.iter().any(|f| link.contains(f.as_str()))
    }
}

/// Accepts every link. Used when liveness checks are turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLinkVerifier;

#[async_trait]
impl LinkVerifier for NoopLinkVerifier {
    async fn verify(&self, _url: &str) -> bool {
        true
    }
}

/// Filters model-suggested links in order, keeping at most `policy.max_links`.
pub async fn clean_links(
    links: &[serde_json::Value],
    verifier: &dyn LinkVerifier,
    policy: &LinkPolicy,
) -> Vec<String> {
    let mut cleaned = Vec::new();

    for value in links {
        if cleaned.len() >= policy.max_links {
            break;
        }

        let Some(link) = value.as_str() else {
            tracing::debug!("Skipping non-string link entry: {}", value);
            continue;
        };

        if link.chars().count() > policy.max_link_len {
            tracing::debug!("Skipping overlong link ({} chars)", link.chars().count());
            continue;
        }

        if policy.is_blocked(link) {
            tracing::debug!("Skipping search-engine link: {}", link);
            continue;
        }

        if verifier.verify(link).await {
            cleaned.push(link.to_string());
        } else {
            tracing::debug!("Discarded invalid or unreachable link: {}", link);
        }
    }

    cleaned
}
