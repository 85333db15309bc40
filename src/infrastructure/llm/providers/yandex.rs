//! YandexGPT Provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::llm::{LLMError, LLMMessage, LLMResponse, LLMResult, LLMUsage, LLM};

/// Yandex Foundation Models API endpoint
const API_BASE: &str = "https://llm.api.cloud.yandex.net/foundationModels/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// YandexGPT provider
pub struct YandexProvider {
    api_key: String,
    folder_id: String,
    client: Client,
    model: String,
}

impl YandexProvider {
    pub fn new(
        api_key: impl Into<String>,
        folder_id: impl Into<String>,
        model: Option<&str>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            folder_id: folder_id.into(),
            client: Client::new(),
            model: model.unwrap_or("yandexgpt-lite").to_string(),
        }
    }

    /// Get base URL for API
    fn base_url(&self) -> String {
        format!("{}/completion", API_BASE)
    }

    /// Models are addressed as `gpt://{folder}/{model}`
    fn model_uri(&self, model: &str) -> String {
        format!("gpt://{}/{}", self.folder_id, model)
    }
}

/// API request structure
#[derive(Serialize)]
struct CompletionRequest {
    #[serde(rename = "modelUri")]
    model_uri: String,
    #[serde(rename = "completionOptions")]
    completion_options: CompletionOptions,
    messages: Vec<YandexMessage>,
}

#[derive(Serialize)]
struct CompletionOptions {
    stream: bool,
    temperature: f32,
    #[serde(rename = "maxTokens")]
    max_tokens: u32,
}

/// Yandex message format carries `text` instead of `content`
#[derive(Serialize)]
struct YandexMessage {
    role: String,
    text: String,
}

impl From<&LLMMessage> for YandexMessage {
    fn from(msg: &LLMMessage) -> Self {
        Self {
            role: msg.role.clone(),
            text: msg.content.clone(),
        }
    }
}

/// API response structure
#[derive(Deserialize, Debug)]
struct CompletionResponse {
    result: CompletionResult,
}

#[derive(Deserialize, Debug)]
struct CompletionResult {
    alternatives: Vec<Alternative>,
    usage: Option<Usage>,
}

#[derive(Deserialize, Debug)]
struct Alternative {
    message: AlternativeMessage,
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct AlternativeMessage {
    text: String,
}

/// Usage counters arrive as decimal strings
#[derive(Deserialize, Debug)]
struct Usage {
    #[serde(rename = "inputTextTokens")]
    input_text_tokens: Option<String>,
    #[serde(rename = "completionTokens")]
    completion_tokens: Option<String>,
    #[serde(rename = "totalTokens")]
    total_tokens: Option<String>,
}

fn parse_tokens(value: Option<String>) -> Option<u32> {
    value.and_then(|s| s.parse().ok())
}

#[async_trait]
impl LLM for YandexProvider {
    fn name(&self) -> &str {
        "yandex"
    }

    async fn chat(
        &self,
        messages: Vec<LLMMessage>,
        model: Option<&str>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LLMResult<LLMResponse> {
        let model = model.unwrap_or(&self.model);

        let yandex_messages: Vec<YandexMessage> =
            messages.iter().map(YandexMessage::from).collect();

        let request = CompletionRequest {
            model_uri: self.model_uri(model),
            completion_options: CompletionOptions {
                stream: false,
                temperature: temperature.unwrap_or(0.3),
                max_tokens: max_tokens.unwrap_or(2000),
            },
            messages: yandex_messages,
        };

        let response = self
            .client
            .post(self.base_url())
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Api-Key {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(e.to_string()))?;

        if response.status() == 429 {
            return Err(LLMError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError(format!(
                "status: {}, body: {}",
                status, body
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        let alternative = completion
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::ApiError("No alternatives in response".to_string()))?;

        let usage = completion.result.usage.map(|u| LLMUsage {
            prompt_tokens: parse_tokens(u.input_text_tokens),
            completion_tokens: parse_tokens(u.completion_tokens),
            total_tokens: parse_tokens(u.total_tokens),
        });

        Ok(LLMResponse {
            content: alternative.message.text,
            model: model.to_string(),
            usage,
            finish_reason: alternative.status,
        })
    }
}
