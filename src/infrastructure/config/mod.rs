//! Configuration management

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;

/// Reply strategy for the single webhook endpoint. The variants are mutually
/// exclusive; one is selected at startup and never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Static menu-tree command dispatch
    Menu,
    /// Keyword rule matching
    Keywords,
    /// Forward everything to the configured LLM
    Llm,
    /// Keyword match first, LLM fallback when nothing matches
    Auto,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Menu
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "menu" => Ok(Strategy::Menu),
            "keywords" => Ok(Strategy::Keywords),
            "llm" => Ok(Strategy::Llm),
            "auto" => Ok(Strategy::Auto),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown strategy '{}', expected menu|keywords|llm|auto",
                other
            ))),
        }
    }
}

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub server: ServerConfig,
    pub menu: MenuConfig,
    pub knowledge: KnowledgeConfig,
    pub bitrix: Option<BitrixConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub strategy: Strategy,
    pub fallback_reply: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ServerConfig {
    pub bind: String,
    pub webhook_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MenuConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct KnowledgeConfig {
    pub path: Option<PathBuf>,
}

/// Bitrix24 REST credentials. Either an incoming-webhook URL or a portal base
/// URL plus access token must be present for outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BitrixConfig {
    pub webhook_url: Option<String>,
    pub base_url: Option<String>,
    pub access_token: Option<String>,
    pub client_id: Option<String>,
}

impl BitrixConfig {
    pub fn is_usable(&self) -> bool {
        self.webhook_url.is_some() || (self.base_url.is_some() && self.access_token.is_some())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "otvet-bot".to_string(),
                strategy: Strategy::Menu,
                fallback_reply: crate::application::services::dispatch_service::FALLBACK_REPLY
                    .to_string(),
            },
            server: ServerConfig {
                bind: "0.0.0.0:8080".to_string(),
                webhook_path: "/webhook/bitrix".to_string(),
            },
            menu: MenuConfig {
                path: PathBuf::from("menu.json"),
            },
            knowledge: KnowledgeConfig { path: None },
            bitrix: None,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load from environment variables
    pub fn load_env() -> Self {
        let mut config = Config::default();

        let webhook_url = std::env::var("BITRIX_WEBHOOK_URL").ok();
        let base_url = std::env::var("BITRIX_BASE_URL").ok();
        let access_token = std::env::var("BITRIX_ACCESS_TOKEN").ok();
        let client_id = std::env::var("BITRIX_CLIENT_ID").ok();

        if webhook_url.is_some() || base_url.is_some() || access_token.is_some() {
            config.bitrix = Some(BitrixConfig {
                webhook_url,
                base_url,
                access_token,
                client_id,
            });
        }

        if let Ok(strategy) = std::env::var("BOT_STRATEGY") {
            match strategy.parse() {
                Ok(s) => config.bot.strategy = s,
                Err(e) => tracing::warn!("Ignoring BOT_STRATEGY: {}", e),
            }
        }

        if let Ok(bind) = std::env::var("BIND_ADDR") {
            config.server.bind = bind;
        }

        if let Ok(path) = std::env::var("MENU_PATH") {
            config.menu.path = PathBuf::from(path);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_is_menu() {
        assert_eq!(Config::default().bot.strategy, Strategy::Menu);
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("MENU".parse::<Strategy>().unwrap(), Strategy::Menu);
        assert_eq!("keywords".parse::<Strategy>().unwrap(), Strategy::Keywords);
        assert_eq!("llm".parse::<Strategy>().unwrap(), Strategy::Llm);
        assert_eq!("Auto".parse::<Strategy>().unwrap(), Strategy::Auto);
        assert!("fuzzy".parse::<Strategy>().is_err());
    }

    #[test]
    fn parses_yaml_document() {
        let config: Config = serde_yaml::from_str(
            r#"
bot:
  name: test-bot
  strategy: auto
  fallback-reply: "Nope."
server:
  bind: "127.0.0.1:9000"
  webhook-path: /hooks/b24
menu:
  path: custom-menu.json
knowledge:
  path: rules.yaml
bitrix:
  webhook-url: "https://portal.example/rest/1/abc"
"#,
        )
        .unwrap();

        assert_eq!(config.bot.strategy, Strategy::Auto);
        assert_eq!(config.bot.fallback_reply, "Nope.");
        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.menu.path, PathBuf::from("custom-menu.json"));
        let bitrix = config.bitrix.unwrap();
        assert!(bitrix.is_usable());
        assert!(bitrix.client_id.is_none());
    }

    #[test]
    fn bitrix_usability_requires_an_addressing_mode() {
        let incomplete = BitrixConfig {
            webhook_url: None,
            base_url: Some("https://portal.example".to_string()),
            access_token: None,
            client_id: None,
        };
        assert!(!incomplete.is_usable());

        let token_mode = BitrixConfig {
            webhook_url: None,
            base_url: Some("https://portal.example".to_string()),
            access_token: Some("secret".to_string()),
            client_id: None,
        };
        assert!(token_mode.is_usable());
    }

    #[test]
    fn default_config_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.bot.strategy, Strategy::Menu);
        assert_eq!(parsed.server.webhook_path, "/webhook/bitrix");
    }
}
