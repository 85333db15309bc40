//! Reply orchestration - routes events to the configured strategy and
//! delivers the result through the platform messenger

use std::sync::Arc;

use crate::application::services::DispatchService;
use crate::domain::entities::{EventKind, IncomingEvent, OutboundReply};
use crate::domain::traits::Messenger;
use crate::infrastructure::config::Strategy;
use crate::infrastructure::knowledge::KnowledgeBase;
use crate::infrastructure::llm::{LLMConfig, LLMMessage, LLM};

/// Reply when the model is unavailable or fails. The platform has no error
/// channel, so the user gets an apology instead of silence.
const LLM_APOLOGY: &str =
    "Sorry, the assistant is temporarily unavailable. Please try again later or contact HR directly.";

/// Service for turning incoming events into delivered replies
pub struct ReplyService<M: Messenger> {
    strategy: Strategy,
    dispatcher: DispatchService,
    knowledge: KnowledgeBase,
    llm: Option<Arc<dyn LLM>>,
    llm_config: LLMConfig,
    messenger: M,
}

impl<M: Messenger> ReplyService<M> {
    pub fn new(
        strategy: Strategy,
        dispatcher: DispatchService,
        knowledge: KnowledgeBase,
        llm: Option<Arc<dyn LLM>>,
        llm_config: LLMConfig,
        messenger: M,
    ) -> Self {
        Self {
            strategy,
            dispatcher,
            knowledge,
            llm,
            llm_config,
            messenger,
        }
    }

    /// Handle one inbound event end to end. Outbound failures are logged and
    /// swallowed; the webhook acknowledgment never reflects them.
    pub async fn handle(&self, event: IncomingEvent) {
        let Some(reply) = self.build_reply(&event).await else {
            tracing::debug!(id = %event.id, kind = event.kind.as_str(), "event ignored");
            return;
        };

        if let Err(e) = self.messenger.send(&reply).await {
            tracing::error!(dialog = %reply.dialog_id, "failed to deliver reply: {}", e);
        }
    }

    async fn build_reply(&self, event: &IncomingEvent) -> Option<OutboundReply> {
        match self.strategy {
            Strategy::Menu => match event.kind {
                EventKind::CommandAdd => Some(self.dispatcher.dispatch(event)),
                _ => None,
            },
            Strategy::Keywords => {
                let text = event.body()?;
                let message = self
                    .knowledge
                    .lookup(text)
                    .unwrap_or_else(|| self.knowledge.no_match_reply())
                    .to_string();
                Some(OutboundReply::text(&event.bot_id, &event.dialog_id, message))
            }
            Strategy::Llm => {
                let text = event.body()?.to_string();
                let answer = self.ask_llm(&text, &event.dialog_id).await;
                Some(OutboundReply::text(&event.bot_id, &event.dialog_id, answer))
            }
            Strategy::Auto => {
                let text = event.body()?.to_string();
                let message = match self.knowledge.lookup(&text) {
                    Some(reply) => reply.to_string(),
                    None => self.ask_llm(&text, &event.dialog_id).await,
                };
                Some(OutboundReply::text(&event.bot_id, &event.dialog_id, message))
            }
        }
    }

    async fn ask_llm(&self, text: &str, dialog_id: &str) -> String {
        let Some(llm) = &self.llm else {
            tracing::warn!("no LLM provider configured");
            return LLM_APOLOGY.to_string();
        };

        // Typing indicator while the model works
        if let Err(e) = self.messenger.send_typing(dialog_id).await {
            tracing::debug!(dialog = %dialog_id, "typing indicator failed: {}", e);
        }

        let system_prompt = self
            .llm_config
            .system_prompt
            .as_deref()
            .unwrap_or("You are a corporate assistant.");
        let messages = vec![LLMMessage::system(system_prompt), LLMMessage::user(text)];

        match llm
            .chat(
                messages,
                None,
                Some(self.llm_config.temperature),
                self.llm_config.max_tokens,
            )
            .await
        {
            Ok(response) => response.content,
            Err(e) => {
                tracing::error!("LLM request failed: {}", e);
                LLM_APOLOGY.to_string()
            }
        }
    }
}
