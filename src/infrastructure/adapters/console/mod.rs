//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundReply;
use crate::domain::traits::Messenger;

/// Console messenger for local development
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok()?;
        Some(input.trim().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for ConsoleAdapter {
    async fn send(&self, reply: &OutboundReply) -> Result<(), BotError> {
        println!("[BOT] {}", reply.message);
        for button in &reply.keyboard {
            println!("  [{}] -> /{}", button.label(), button.command());
        }
        Ok(())
    }

    async fn send_typing(&self, _dialog_id: &str) -> Result<(), BotError> {
        Ok(())
    }
}
