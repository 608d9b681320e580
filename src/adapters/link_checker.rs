use crate::core::{ConfigProvider, LinkVerifier};
use crate::utils::error::{ExplainError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Titles live in `<head>`; nothing past this many bytes is downloaded.
pub const MAX_TITLE_SCAN_BYTES: usize = 64 * 1024;

/// Treats a link as real when it answers with an HTML page carrying a sensible `<title>`.
#[derive(Debug, Clone)]
pub struct HttpLinkVerifier {
    client: Client,
    max_title_len: usize,
    title_re: Regex,
}

impl HttpLinkVerifier {
    pub fn new(timeout: Duration, max_title_len: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stackexplain/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let title_re =
            Regex::new(r"(?is)<title[^>]*>(.*?)</title>").map_err(|e| ExplainError::ConfigError {
                message: format!("invalid title pattern: {}", e),
            })?;

        Ok(Self {
            client,
            max_title_len,
            title_re,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.link_timeout(), config.max_title_len())
    }

    pub fn extract_title(&self, html: &str) -> Option<String> {
        self.title_re
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    pub fn is_reasonable_title(&self, title: &str) -> bool {
        !title.is_empty() && title.chars().count() <= self.max_title_len
    }

    async fn check(&self, url: &str) -> Result<bool> {
        // HEAD is only used to drop dead links early; plenty of sites refuse it.
        let head = self.client.head(url).send().await?;
        if matches!(head.status(), StatusCode::NOT_FOUND | StatusCode::GONE) {
            tracing::debug!("HEAD {} -> {}", url, head.status());
            return Ok(false);
        }

        let mut response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("GET {} -> {}", url, response.status());
            return Ok(false);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() >= MAX_TITLE_SCAN_BYTES {
                body.truncate(MAX_TITLE_SCAN_BYTES);
                break;
            }
        }

        let body = String::from_utf8_lossy(&body);
        Ok(self
            .extract_title(&body)
            .map(|title| self.is_reasonable_title(&title))
            .unwrap_or(false))
    }
}

#[async_trait]
impl LinkVerifier for HttpLinkVerifier {
    async fn verify(&self, url: &str) -> bool {
        match self.check(url).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::debug!("Link check failed for {}: {}", url, e);
                false
            }
        }
    }
}
