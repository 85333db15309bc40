//! LLM Providers

pub mod openai;
pub mod yandex;

pub use openai::OpenAIProvider;
pub use yandex::YandexProvider;
