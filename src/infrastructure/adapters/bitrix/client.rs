//! Bitrix24 REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::{BotError, ConfigError};
use crate::domain::entities::{MenuButton, OutboundReply};
use crate::domain::traits::Messenger;
use crate::infrastructure::config::BitrixConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire form of one keyboard button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "TEXT")]
    pub text: String,
    #[serde(rename = "COMMAND")]
    pub command: String,
    #[serde(rename = "DISPLAY")]
    pub display: String,
}

impl From<&MenuButton> for KeyboardButton {
    fn from(button: &MenuButton) -> Self {
        Self {
            kind: "BUTTON".to_string(),
            text: button.label().to_string(),
            command: button.command().to_string(),
            display: "LINE".to_string(),
        }
    }
}

/// Payload for `imbot.message.add`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAddRequest {
    #[serde(rename = "BOT_ID")]
    pub bot_id: String,
    #[serde(rename = "DIALOG_ID")]
    pub dialog_id: String,
    #[serde(rename = "CLIENT_ID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "MESSAGE")]
    pub message: String,
    #[serde(rename = "KEYBOARD", skip_serializing_if = "Vec::is_empty", default)]
    pub keyboard: Vec<KeyboardButton>,
}

impl MessageAddRequest {
    pub fn from_reply(reply: &OutboundReply, client_id: Option<String>) -> Self {
        Self {
            bot_id: reply.bot_id.clone(),
            dialog_id: reply.dialog_id.clone(),
            client_id,
            message: reply.message.clone(),
            keyboard: reply.keyboard.iter().map(KeyboardButton::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct DialogWritingRequest {
    #[serde(rename = "DIALOG_ID")]
    dialog_id: String,
}

/// Bitrix24 REST adapter
pub struct BitrixAdapter {
    config: BitrixConfig,
    client: Client,
}

impl BitrixAdapter {
    pub fn new(config: BitrixConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// REST method URL: incoming-webhook base, or portal base URL plus token
    fn api_url(&self, method: &str) -> Result<String, BotError> {
        if let Some(url) = &self.config.webhook_url {
            return Ok(format!("{}/{}", url.trim_end_matches('/'), method));
        }
        if let (Some(base), Some(token)) = (&self.config.base_url, &self.config.access_token) {
            return Ok(format!(
                "{}/rest/{}/{}",
                base.trim_end_matches('/'),
                token,
                method
            ));
        }
        Err(BotError::Config(ConfigError::MissingField(
            "bitrix.webhook-url or bitrix.base-url + bitrix.access-token".to_string(),
        )))
    }

    async fn post_json<T: Serialize>(
        &self,
        method: &str,
        body: &T,
    ) -> Result<serde_json::Value, BotError> {
        let url = self.api_url(method)?;

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Api(format!(
                "{} returned {}",
                method,
                response.status()
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        // Bitrix reports failures inside a 200 body
        if value.get("result").is_none() {
            let description = value
                .get("error_description")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            return Err(BotError::Api(format!("{} failed: {}", method, description)));
        }

        Ok(value)
    }
}

#[async_trait]
impl Messenger for BitrixAdapter {
    async fn send(&self, reply: &OutboundReply) -> Result<(), BotError> {
        let request = MessageAddRequest::from_reply(reply, self.config.client_id.clone());
        self.post_json("imbot.message.add.json", &request).await?;
        tracing::info!(dialog = %reply.dialog_id, "message delivered");
        Ok(())
    }

    async fn send_typing(&self, dialog_id: &str) -> Result<(), BotError> {
        let request = DialogWritingRequest {
            dialog_id: dialog_id.to_string(),
        };
        self.post_json("im.dialog.writing", &request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reply() -> OutboundReply {
        OutboundReply::text("7", "chat42", "Main menu").with_keyboard(vec![
            MenuButton::new("HR", "hr"),
            MenuButton::new("Vacation", "vacation"),
        ])
    }

    #[test]
    fn keyboard_buttons_use_line_display() {
        let request = MessageAddRequest::from_reply(&sample_reply(), None);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["BOT_ID"], "7");
        assert_eq!(value["DIALOG_ID"], "chat42");
        assert_eq!(value["MESSAGE"], "Main menu");
        assert_eq!(value["KEYBOARD"][0]["TYPE"], "BUTTON");
        assert_eq!(value["KEYBOARD"][0]["TEXT"], "HR");
        assert_eq!(value["KEYBOARD"][0]["COMMAND"], "hr");
        assert_eq!(value["KEYBOARD"][0]["DISPLAY"], "LINE");
        assert_eq!(value["KEYBOARD"][1]["TEXT"], "Vacation");
        assert!(value.get("CLIENT_ID").is_none());
    }

    #[test]
    fn empty_keyboard_is_omitted_from_the_payload() {
        let reply = OutboundReply::text("7", "chat42", "Command not found. Type /menu.");
        let request = MessageAddRequest::from_reply(&reply, None);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("KEYBOARD").is_none());
    }

    #[test]
    fn payload_round_trips() {
        let request = MessageAddRequest::from_reply(&sample_reply(), Some("app.123".to_string()));
        let json = serde_json::to_string(&request).unwrap();
        let parsed: MessageAddRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.message, "Main menu");
        assert_eq!(parsed.keyboard.len(), 2);
    }

    #[test]
    fn api_url_prefers_incoming_webhook() {
        let adapter = BitrixAdapter::new(BitrixConfig {
            webhook_url: Some("https://portal.example/rest/1/secret/".to_string()),
            base_url: Some("https://portal.example".to_string()),
            access_token: Some("token".to_string()),
            client_id: None,
        });
        assert_eq!(
            adapter.api_url("imbot.message.add.json").unwrap(),
            "https://portal.example/rest/1/secret/imbot.message.add.json"
        );
    }

    #[test]
    fn api_url_falls_back_to_token_addressing() {
        let adapter = BitrixAdapter::new(BitrixConfig {
            webhook_url: None,
            base_url: Some("https://portal.example".to_string()),
            access_token: Some("token".to_string()),
            client_id: None,
        });
        assert_eq!(
            adapter.api_url("im.dialog.writing").unwrap(),
            "https://portal.example/rest/token/im.dialog.writing"
        );
    }

    #[test]
    fn api_url_without_credentials_is_an_error() {
        let adapter = BitrixAdapter::new(BitrixConfig {
            webhook_url: None,
            base_url: None,
            access_token: None,
            client_id: None,
        });
        assert!(adapter.api_url("imbot.message.add.json").is_err());
    }
}
