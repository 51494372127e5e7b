//! Groq chat completions backend.
//! See: <https://console.groq.com/docs/api-reference#chat-create>

use crate::config::AiConfig;
use crate::error::{BotError, Result};
use crate::generator::ContentBackend;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

const TIMEOUT_SEC: u64 = 60;
const DEFAULT_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";

pub struct GroqBackend {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

impl GroqBackend {
    /// Reads the API key (and an optional base URL) from `env`
    pub fn from_env(config: &AiConfig, env: &HashMap<String, String>) -> Result<Self> {
        let api_key = env
            .get(API_KEY_VAR)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BotError::Config(format!("{API_KEY_VAR} is not set")))?;
        let base_url = env
            .get(BASE_URL_VAR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_BASE_URL);
        Self::new(config, api_key, base_url)
    }

    pub fn new(config: &AiConfig, api_key: &str, base_url: &str) -> Result<Self> {
        let endpoint = Url::from_str(base_url)
            .and_then(|mut base| {
                // Keep any path prefix, e.g. a proxy mounted at /groq
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join("openai/v1/chat/completions")
            })
            .map_err(|e| BotError::Config(format!("Invalid Groq base URL {base_url:?}: {e}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SEC))
            .build()
            .map_err(|e| BotError::Config(format!("Unable to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoint,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_completion_tokens: self.max_completion_tokens,
            top_p: 1.0,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Generation(e.into()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_response(status, &body));
        }
        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| BotError::Generation(e.into()))?;
        Ok(response
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .collect())
    }
}

fn error_response(status: StatusCode, body: &str) -> BotError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => format!(
            "Groq error ({}): {}",
            error.error_type.as_deref().unwrap_or("unknown"),
            error.message
        ),
        Err(_) => format!("HTTP {status}: {body}"),
    };
    BotError::Generation(message.into())
}

#[async_trait]
impl ContentBackend for GroqBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let result = self.complete(prompt).await;
        if let Err(BotError::Generation(cause)) = &result {
            log::error!("Failed to generate content: {}", cause);
        }
        result
    }
}
