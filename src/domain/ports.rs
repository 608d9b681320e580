use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A chat-completion backend. Returns the assistant message text.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T: ChatCompletion + ?Sized> ChatCompletion for Arc<T> {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        (**self).complete(model, prompt).await
    }
}

/// Decides whether a suggested documentation link is worth showing.
#[async_trait]
pub trait LinkVerifier: Send + Sync {
    async fn verify(&self, url: &str) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn model(&self) -> &str;
    fn retries(&self) -> usize;
    fn retry_base_delay(&self) -> Duration;
    fn request_timeout(&self) -> Duration;
    fn verify_links(&self) -> bool;
    fn link_timeout(&self) -> Duration;
    fn max_links(&self) -> usize;
    fn max_link_len(&self) -> usize;
    fn max_title_len(&self) -> usize;
    fn app_name(&self) -> Option<&str>;
}
