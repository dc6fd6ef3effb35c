use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::config::CompletionConfig;
use crate::error::{AppError, ProxyError};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
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

/// Client for an OpenAI-style chat-completion endpoint.
///
/// One request per call; failures are returned as-is, never retried.
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, AppError> {
        let endpoint = Url::parse(&config.api_url)
            .map_err(|e| AppError::ConfigError(format!("invalid completion.api_url: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProxyError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
        };

        let res = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            warn!(%status, "Completion API returned an error");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProxyError::InvalidApiKey,
                StatusCode::TOO_MANY_REQUESTS => ProxyError::RateLimited,
                _ => ProxyError::ResponseError(format!("{}: {}", status, detail)),
            });
        }

        let parsed: ChatResponse = res.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProxyError::ResponseError("completion contained no text".into()))?;

        info!(model = %self.model, chars = content.len(), "Completion received");
        Ok(content)
    }
}
