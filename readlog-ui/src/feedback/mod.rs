//! Outbound feedback requests
//!
//! One chat completion per submitted write-up. No retry: a failure is
//! reported to the page and nothing is saved.

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Feedback provider errors
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model returned no feedback text")]
    EmptyResponse,
}

/// A hosted model that reviews write-ups
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    /// Provider name for logs and the page header
    fn name(&self) -> &'static str;

    /// Request feedback text for one write-up
    async fn request_feedback(
        &self,
        book_title: &str,
        writeup: &str,
    ) -> Result<String, FeedbackError>;
}
