use chrono::{DateTime, Utc};

/// Bot-platform event kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A chat-menu command was invoked (`ONIMCOMMANDADD`)
    CommandAdd,
    /// A plain message was sent to the bot (`ONIMBOTMESSAGEADD`)
    MessageAdd,
    Other(String),
}

impl EventKind {
    pub fn from_event_name(name: &str) -> Self {
        match name {
            "ONIMCOMMANDADD" => EventKind::CommandAdd,
            "ONIMBOTMESSAGEADD" => EventKind::MessageAdd,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::CommandAdd => "command-add",
            EventKind::MessageAdd => "message-add",
            EventKind::Other(s) => s,
        }
    }
}

/// Represents a normalized inbound event, built per request and discarded
/// after handling
#[derive(Debug, Clone)]
pub struct IncomingEvent {
    pub id: String,
    pub kind: EventKind,
    pub command: Option<String>,
    pub text: Option<String>,
    pub dialog_id: String,
    pub bot_id: String,
    pub received_at: DateTime<Utc>,
}

impl IncomingEvent {
    pub fn new(kind: EventKind, dialog_id: impl Into<String>, bot_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            command: None,
            text: None,
            dialog_id: dialog_id.into(),
            bot_id: bot_id.into(),
            received_at: Utc::now(),
        }
    }

    /// Command events are stored without the leading slash the client sends
    pub fn from_command(
        dialog_id: impl Into<String>,
        bot_id: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(EventKind::CommandAdd, dialog_id, bot_id);
        event.command = Some(command.into().trim_start_matches('/').to_string());
        event
    }

    pub fn from_text(
        dialog_id: impl Into<String>,
        bot_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let mut event = Self::new(EventKind::MessageAdd, dialog_id, bot_id);
        event.text = Some(text.into());
        event
    }

    /// Body for text-matching strategies: the message text, or the command
    /// name when the platform delivered the input as a command event
    pub fn body(&self) -> Option<&str> {
        self.text.as_deref().or(self.command.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_event_names() {
        assert_eq!(
            EventKind::from_event_name("ONIMCOMMANDADD"),
            EventKind::CommandAdd
        );
        assert_eq!(
            EventKind::from_event_name("ONIMBOTMESSAGEADD"),
            EventKind::MessageAdd
        );
        assert_eq!(
            EventKind::from_event_name("ONAPPINSTALL"),
            EventKind::Other("ONAPPINSTALL".to_string())
        );
    }

    #[test]
    fn command_events_are_stored_unprefixed() {
        let event = IncomingEvent::from_command("chat42", "7", "/menu");
        assert_eq!(event.command.as_deref(), Some("menu"));
        assert_eq!(event.body(), Some("menu"));
    }

    #[test]
    fn text_events_keep_their_body() {
        let event = IncomingEvent::from_text("chat42", "7", "how do I book vacation?");
        assert_eq!(event.kind, EventKind::MessageAdd);
        assert_eq!(event.body(), Some("how do I book vacation?"));
    }
}
