use crate::models::{ChatMessage, MessageRole};
use crate::utils::JuristError;

/// Returned by [`History::clear`]
pub const CLEAR_CONFIRMATION: &str =
    "Chat history cleared. The AI will not remember this conversation in the current session display.";

/// Ordered, append-only log of a session's messages
///
/// Insertion order is conversation order. No deduplication and no size cap.
#[derive(Debug, Clone, Default)]
pub struct History {
    messages: Vec<ChatMessage>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(role, content));
    }

    /// Append with a role given as text; only system, user and assistant are accepted
    pub fn append_raw(&mut self, role: &str, content: impl Into<String>) -> Result<(), JuristError> {
        let role = role.parse::<MessageRole>()?;
        self.append(role, content);
        Ok(())
    }

    /// Drop every message, seeded context included
    pub fn clear(&mut self) -> &'static str {
        self.messages = Vec::new();
        CLEAR_CONFIRMATION
    }

    /// Owned copy of the log; later appends are not visible through it
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages the end user may see, in order
    pub fn visible(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|m| m.role().is_visible())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
