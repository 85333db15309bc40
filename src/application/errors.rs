//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Menu error: {0}")]
    Menu(#[from] MenuError),

    #[error("API error: {0}")]
    Api(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Menu definition errors
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse menu definition: {0}")]
    Parse(String),

    #[error("Button in node '{node}' points at unknown command '{target}'")]
    DanglingTarget { node: String, target: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Webhook envelope errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WebhookError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("unhandled event '{0}'")]
    UnhandledEvent(String),
}
