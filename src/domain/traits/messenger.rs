use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundReply;

/// Messenger trait - abstraction for the chat platform's send side
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Deliver a reply (message plus optional keyboard) to its dialog
    async fn send(&self, reply: &OutboundReply) -> Result<(), BotError>;

    /// Show a typing indicator in a dialog
    async fn send_typing(&self, dialog_id: &str) -> Result<(), BotError>;
}
