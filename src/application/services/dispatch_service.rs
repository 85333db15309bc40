use crate::domain::entities::{IncomingEvent, MenuTree, OutboundReply};

/// Default reply for commands absent from the menu tree
pub const FALLBACK_REPLY: &str = "Command not found. Type /menu.";

/// Maps an incoming command to a reply message and its follow-up keyboard
/// using the static menu tree. Pure per-request lookup, no carried state.
pub struct DispatchService {
    tree: MenuTree,
    fallback: String,
}

impl DispatchService {
    pub fn new(tree: MenuTree) -> Self {
        Self {
            tree,
            fallback: FALLBACK_REPLY.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Exact-match lookup. A hit yields the node's text with its buttons in
    /// source order; a miss yields the fallback with an empty keyboard.
    pub fn dispatch(&self, event: &IncomingEvent) -> OutboundReply {
        let command = event.command.as_deref().unwrap_or("");
        match self.tree.get(command) {
            Some(node) => OutboundReply::text(&event.bot_id, &event.dialog_id, &node.text)
                .with_keyboard(node.buttons.clone()),
            None => OutboundReply::text(&event.bot_id, &event.dialog_id, &self.fallback),
        }
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }
}
