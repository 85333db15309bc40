//! Integration tests for LLM providers

use crate::infrastructure::llm::{
    build_provider, LLMConfig, LLMMessage, LLMProvider, OpenAIProvider, LLM,
};

#[test]
fn test_llm_message_builder() {
    let msg = LLMMessage::user("Hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "Hello");

    let system_msg = LLMMessage::system("You are a corporate assistant.");
    assert_eq!(system_msg.role, "system");
}

#[test]
fn test_llm_config_from_env() {
    // Set environment variable for testing
    std::env::set_var("OPENAI_API_KEY", "test-key-123");

    let config = LLMConfig::from_env();

    assert_eq!(config.api_key(LLMProvider::OpenAI), Some("test-key-123"));
    assert_eq!(config.model(LLMProvider::OpenAI), "gpt-4");
    assert_eq!(config.model(LLMProvider::Yandex), "yandexgpt-lite");

    // Clean up
    std::env::remove_var("OPENAI_API_KEY");
}

#[test]
fn test_yandex_provider_requires_folder() {
    let config = LLMConfig {
        provider: LLMProvider::Yandex,
        yandex_api_key: Some("key".to_string()),
        yandex_folder_id: None,
        ..LLMConfig::default()
    };
    assert!(build_provider(&config).is_none());

    let config = LLMConfig {
        provider: LLMProvider::Yandex,
        yandex_api_key: Some("key".to_string()),
        yandex_folder_id: Some("b1gfolder".to_string()),
        ..LLMConfig::default()
    };
    let provider = build_provider(&config).expect("provider should build");
    assert_eq!(provider.name(), "yandex");
}

#[tokio::test]
#[ignore] // Requires OPENAI_API_KEY environment variable
async fn test_openai_chat() {
    let config = LLMConfig::from_env();
    let api_key = config
        .api_key(LLMProvider::OpenAI)
        .expect("OPENAI_API_KEY not set");

    let provider = OpenAIProvider::new(api_key, None);

    let messages = vec![
        LLMMessage::system("You are a helpful assistant."),
        LLMMessage::user("What is 2+2?"),
    ];

    let response = provider
        .chat(messages, None, Some(0.7), Some(100))
        .await
        .expect("Chat request failed");

    println!("Response: {}", response.content);
    println!("Model: {}", response.model);

    assert!(!response.content.is_empty());
}
