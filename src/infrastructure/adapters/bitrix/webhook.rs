//! Bitrix24 webhook receiver
//!
//! Receives bot-platform events (`ONIMCOMMANDADD`, `ONIMBOTMESSAGEADD`) and
//! acknowledges every request with `{"result": "OK"}`. The platform has no
//! channel for signaling errors back to the caller.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::application::errors::WebhookError;
use crate::application::services::ReplyService;
use crate::domain::entities::{EventKind, IncomingEvent};
use crate::domain::traits::Messenger;

/// Top-level event envelope posted by the bot platform
#[derive(Deserialize, Debug)]
pub struct BitrixEnvelope {
    pub event: String,
    pub data: Option<EventData>,
}

#[derive(Deserialize, Debug, Default)]
pub struct EventData {
    #[serde(rename = "COMMAND")]
    pub command: Option<String>,
    #[serde(rename = "DIALOG_ID")]
    pub dialog_id: Option<String>,
    #[serde(rename = "BOT_ID")]
    pub bot_id: Option<String>,
    #[serde(rename = "PARAMS")]
    pub params: Option<EventParams>,
}

/// Message events nest their payload under `PARAMS`
#[derive(Deserialize, Debug, Default)]
pub struct EventParams {
    #[serde(rename = "MESSAGE")]
    pub message: Option<String>,
    #[serde(rename = "DIALOG_ID")]
    pub dialog_id: Option<String>,
}

impl BitrixEnvelope {
    /// Normalize into a domain event. `Err` names the first missing field.
    pub fn into_event(self) -> Result<IncomingEvent, WebhookError> {
        let kind = EventKind::from_event_name(&self.event);
        let data = self.data.ok_or(WebhookError::MissingField("data object"))?;
        let bot_id = data.bot_id.ok_or(WebhookError::MissingField("BOT_ID"))?;

        match kind {
            EventKind::CommandAdd => {
                let command = data.command.ok_or(WebhookError::MissingField("COMMAND"))?;
                let dialog_id = data
                    .dialog_id
                    .ok_or(WebhookError::MissingField("DIALOG_ID"))?;
                Ok(IncomingEvent::from_command(dialog_id, bot_id, command))
            }
            EventKind::MessageAdd => {
                let params = data.params.ok_or(WebhookError::MissingField("PARAMS"))?;
                let message = params
                    .message
                    .ok_or(WebhookError::MissingField("PARAMS.MESSAGE"))?;
                let dialog_id = params
                    .dialog_id
                    .or(data.dialog_id)
                    .ok_or(WebhookError::MissingField("DIALOG_ID"))?;
                Ok(IncomingEvent::from_text(dialog_id, bot_id, message))
            }
            EventKind::Other(name) => Err(WebhookError::UnhandledEvent(name)),
        }
    }
}

struct AppState<M: Messenger> {
    replies: Arc<ReplyService<M>>,
}

impl<M: Messenger> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            replies: self.replies.clone(),
        }
    }
}

pub fn build_router<M: Messenger + 'static>(
    webhook_path: &str,
    replies: Arc<ReplyService<M>>,
) -> Router {
    Router::new()
        .route(webhook_path, post(handle_event::<M>))
        .with_state(AppState { replies })
}

/// The body is read raw: a malformed payload must still be acknowledged,
/// so the Json extractor's automatic 400 is no good here.
async fn handle_event<M: Messenger + 'static>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> Json<Value> {
    let envelope: BitrixEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!("rejecting malformed webhook payload: {}", err);
            return ack();
        }
    };

    if let EventKind::Other(name) = EventKind::from_event_name(&envelope.event) {
        tracing::debug!(event = %name, "unhandled event kind");
        return ack();
    }

    let event = match envelope.into_event() {
        Ok(event) => event,
        Err(e) => {
            warn!("webhook payload incomplete: {}", e);
            return ack();
        }
    };

    info!(
        id = %event.id,
        kind = event.kind.as_str(),
        dialog = %event.dialog_id,
        "event received"
    );
    state.replies.handle(event).await;

    ack()
}

fn ack() -> Json<Value> {
    Json(json!({ "result": "OK" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_event() {
        let envelope: BitrixEnvelope = serde_json::from_str(
            r#"{"event": "ONIMCOMMANDADD", "data": {"COMMAND": "/menu", "DIALOG_ID": "chat42", "BOT_ID": "7"}}"#,
        )
        .unwrap();

        let event = envelope.into_event().unwrap();
        assert_eq!(event.kind, EventKind::CommandAdd);
        assert_eq!(event.command.as_deref(), Some("menu"));
        assert_eq!(event.dialog_id, "chat42");
        assert_eq!(event.bot_id, "7");
    }

    #[test]
    fn parses_message_event_with_nested_params() {
        let envelope: BitrixEnvelope = serde_json::from_str(
            r#"{"event": "ONIMBOTMESSAGEADD", "data": {"BOT_ID": "7", "PARAMS": {"MESSAGE": "hello", "DIALOG_ID": "chat42"}}}"#,
        )
        .unwrap();

        let event = envelope.into_event().unwrap();
        assert_eq!(event.kind, EventKind::MessageAdd);
        assert_eq!(event.text.as_deref(), Some("hello"));
        assert_eq!(event.dialog_id, "chat42");
    }

    #[test]
    fn message_event_dialog_falls_back_to_data_level() {
        let envelope: BitrixEnvelope = serde_json::from_str(
            r#"{"event": "ONIMBOTMESSAGEADD", "data": {"BOT_ID": "7", "DIALOG_ID": "chat42", "PARAMS": {"MESSAGE": "hello"}}}"#,
        )
        .unwrap();

        let event = envelope.into_event().unwrap();
        assert_eq!(event.dialog_id, "chat42");
    }

    #[test]
    fn missing_fields_name_the_culprit() {
        let envelope: BitrixEnvelope = serde_json::from_str(
            r#"{"event": "ONIMCOMMANDADD", "data": {"DIALOG_ID": "chat42", "BOT_ID": "7"}}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.into_event().unwrap_err(),
            WebhookError::MissingField("COMMAND")
        );

        let envelope: BitrixEnvelope =
            serde_json::from_str(r#"{"event": "ONIMCOMMANDADD"}"#).unwrap();
        assert_eq!(
            envelope.into_event().unwrap_err(),
            WebhookError::MissingField("data object")
        );
    }

    #[test]
    fn unhandled_events_are_rejected_by_name() {
        let envelope: BitrixEnvelope = serde_json::from_str(
            r#"{"event": "ONAPPINSTALL", "data": {"BOT_ID": "7"}}"#,
        )
        .unwrap();
        assert_eq!(
            envelope.into_event().unwrap_err(),
            WebhookError::UnhandledEvent("ONAPPINSTALL".to_string())
        );
    }
}
