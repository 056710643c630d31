use crate::models::ListingSummary;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for generative-text backends answering buyer questions
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Answer `question` with the current catalog as context.
    /// An empty answer is returned as `Ok` with an empty string.
    async fn advise(&self, question: &str, listings: &[ListingSummary]) -> Result<String>;

    /// Get the name of the backing provider
    fn provider_name(&self) -> &'static str;
}
