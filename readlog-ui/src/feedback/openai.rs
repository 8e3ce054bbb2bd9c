//! OpenAI Chat Completions client

use std::time::Duration;

use async_trait::async_trait;
use readlog_common::config::OpenAiSettings;
use readlog_common::feedback::build_prompt;
use serde::{Deserialize, Serialize};

use super::{FeedbackError, FeedbackProvider};

const USER_AGENT: &str = concat!("readlog/", env!("CARGO_PKG_VERSION"));

/// OpenAI API client
pub struct OpenAiClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, settings: &OpenAiSettings) -> Result<Self, FeedbackError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FeedbackError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl FeedbackProvider for OpenAiClient {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn request_feedback(
        &self,
        book_title: &str,
        writeup: &str,
    ) -> Result<String, FeedbackError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(book_title, writeup),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "Sending chat completion request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedbackError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FeedbackError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FeedbackError::Api(status.as_u16(), error_text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| FeedbackError::Parse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(FeedbackError::EmptyResponse)?;

        tracing::info!(chars = content.chars().count(), "Feedback received");
        Ok(content)
    }
}
