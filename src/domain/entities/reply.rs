use super::menu::MenuButton;

/// Reply payload handed to the outbound messenger. Built per request, sent
/// once, discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub bot_id: String,
    pub dialog_id: String,
    pub message: String,
    pub keyboard: Vec<MenuButton>,
}

impl OutboundReply {
    pub fn text(
        bot_id: impl Into<String>,
        dialog_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            bot_id: bot_id.into(),
            dialog_id: dialog_id.into(),
            message: message.into(),
            keyboard: Vec::new(),
        }
    }

    pub fn with_keyboard(mut self, keyboard: Vec<MenuButton>) -> Self {
        self.keyboard = keyboard;
        self
    }
}
