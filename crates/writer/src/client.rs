//! HTTP client for the chat-completions endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::prompt::{build_prompt, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE};
use crate::ArticleWriter;

/// Connection settings for an OpenAI-compatible API.
#[derive(Clone)]
pub struct WriterConfig {
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Base URL, e.g. `https://api.openai.com/v1`.
    pub api_url: String,
    /// Model id, e.g. `gpt-4o-mini`.
    pub model: String,
}

impl std::fmt::Debug for WriterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterConfig")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// [`ArticleWriter`] that calls an OpenAI-compatible chat-completions API.
pub struct OpenAiWriter {
    client: reqwest::Client,
    config: WriterConfig,
}

impl OpenAiWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a writer reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, mut config: WriterConfig) -> Self {
        let trimmed = config.api_url.trim_end_matches('/').len();
        config.api_url.truncate(trimmed);
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn request_completion(&self, topic: &str) -> Result<String, GenerationError> {
        let prompt = build_prompt(topic);
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 => GenerationError::Authentication(text),
                429 => GenerationError::RateLimited(text),
                code => GenerationError::Api {
                    status: code,
                    body: text,
                },
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::MalformedResponse("response contained no generated text".into())
            })
    }
}

#[async_trait]
impl ArticleWriter for OpenAiWriter {
    async fn generate(&self, topic: &str) -> Result<String, GenerationError> {
        match self.request_completion(topic).await {
            Ok(content) => {
                tracing::info!(
                    topic,
                    model = %self.config.model,
                    chars = content.len(),
                    "Article generated"
                );
                Ok(content)
            }
            Err(err) => {
                tracing::warn!(topic, model = %self.config.model, error = %err, "Article generation failed");
                Err(err)
            }
        }
    }
}
