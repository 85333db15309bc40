//! LLM integration - Multi-provider chat-completion support

pub mod config;
pub mod providers;
pub mod traits;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use config::{LLMConfig, LLMProvider};
pub use providers::{OpenAIProvider, YandexProvider};
pub use traits::{LLMError, LLMMessage, LLMResponse, LLMResult, LLMUsage, LLM};

/// Build the configured provider, or None when its credentials are missing
pub fn build_provider(config: &LLMConfig) -> Option<Arc<dyn LLM>> {
    match config.provider {
        LLMProvider::OpenAI => match config.api_key(LLMProvider::OpenAI) {
            Some(key) => Some(Arc::new(OpenAIProvider::new(
                key,
                Some(config.model(LLMProvider::OpenAI)),
            ))),
            None => {
                tracing::warn!("OPENAI_API_KEY not set, LLM replies disabled");
                None
            }
        },
        LLMProvider::Yandex => match (config.api_key(LLMProvider::Yandex), &config.yandex_folder_id)
        {
            (Some(key), Some(folder)) => Some(Arc::new(YandexProvider::new(
                key,
                folder.as_str(),
                Some(config.model(LLMProvider::Yandex)),
            ))),
            _ => {
                tracing::warn!(
                    "YANDEX_GPT_API_KEY or YANDEX_FOLDER_ID not set, LLM replies disabled"
                );
                None
            }
        },
    }
}
