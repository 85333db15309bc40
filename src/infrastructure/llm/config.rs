//! LLM Configuration

use serde::{Deserialize, Serialize};

/// LLM Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Yandex,
}

impl Default for LLMProvider {
    fn default() -> Self {
        Self::OpenAI
    }
}

/// LLM Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LLMConfig {
    /// Default provider
    pub provider: LLMProvider,

    /// Provider-specific API keys
    pub openai_api_key: Option<String>,
    pub yandex_api_key: Option<String>,
    pub yandex_folder_id: Option<String>,

    /// Default model for each provider
    pub openai_model: Option<String>,
    pub yandex_model: Option<String>,

    /// Default settings
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::OpenAI,
            openai_api_key: None,
            yandex_api_key: None,
            yandex_folder_id: None,
            openai_model: Some("gpt-4".to_string()),
            yandex_model: Some("yandexgpt-lite".to_string()),
            temperature: 0.7,
            max_tokens: Some(2000),
            system_prompt: Some(
                "You are a corporate assistant. Answer clearly and concisely.".to_string(),
            ),
        }
    }
}

impl LLMConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("YANDEX_GPT_API_KEY") {
            config.yandex_api_key = Some(key);
        }
        if let Ok(folder) = std::env::var("YANDEX_FOLDER_ID") {
            config.yandex_folder_id = Some(folder);
        }

        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            match provider.to_lowercase().as_str() {
                "openai" => config.provider = LLMProvider::OpenAI,
                "yandex" => config.provider = LLMProvider::Yandex,
                other => tracing::warn!("Unknown LLM_PROVIDER '{}', keeping default", other),
            }
        }

        if let Ok(prompt) = std::env::var("LLM_SYSTEM_PROMPT") {
            config.system_prompt = Some(prompt);
        }

        if let Ok(temp) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                config.temperature = t;
            }
        }

        config
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider: LLMProvider) -> Option<&str> {
        match provider {
            LLMProvider::OpenAI => self.openai_api_key.as_deref(),
            LLMProvider::Yandex => self.yandex_api_key.as_deref(),
        }
    }

    /// Get model for a provider
    pub fn model(&self, provider: LLMProvider) -> &str {
        match provider {
            LLMProvider::OpenAI => self.openai_model.as_deref().unwrap_or("gpt-4"),
            LLMProvider::Yandex => self.yandex_model.as_deref().unwrap_or("yandexgpt-lite"),
        }
    }
}
