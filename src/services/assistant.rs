use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{config::AppConfig, error::AppError};

/// The text-generation collaborator: a system instruction plus a user prompt
/// in, free text out. No schema is enforced on the completion content.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError>;
}

/// Chat-completion client for an OpenAI-compatible endpoint. Credentials and
/// endpoint come from the application config, never from module state.
#[derive(Clone)]
pub struct ChatApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

impl ChatApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.ai_base_url.clone(),
            api_key: config.ai_api_key.clone(),
            model: config.ai_model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Assistant for ChatApi {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Assistant("AI_API_KEY is not configured".into()));
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 512,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Assistant(format!("API error {status}: {body}")));
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Assistant("completion contained no choices".into()))
    }
}
