use super::history::History;
use crate::models::ChatMessage;

/// One user's conversation: its history, the selected jurisdiction and the
/// jurisdiction the history was last seeded for
///
/// Nothing here is shared between sessions, and nothing is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    history: Option<History>,
    jurisdiction: String,
    seeded_for: Option<String>,
}

impl Session {
    pub fn new(jurisdiction_id: impl Into<String>) -> Self {
        Self {
            history: None,
            jurisdiction: jurisdiction_id.into(),
            seeded_for: None,
        }
    }

    /// Create the history if it does not exist yet. Calling it again is a no-op.
    pub fn initialize(&mut self) {
        self.history.get_or_insert_with(History::new);
    }

    pub fn is_initialized(&self) -> bool {
        self.history.is_some()
    }

    // Crate-only: every clear must also reset `seeded_for`
    pub(crate) fn history_mut(&mut self) -> &mut History {
        self.history.get_or_insert_with(History::new)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.history.as_ref().map(History::messages).unwrap_or(&[])
    }

    /// User and assistant messages, in order
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.history.iter().flat_map(|history| history.visible())
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn seeded_for(&self) -> Option<&str> {
        self.seeded_for.as_deref()
    }

    /// True when the history must be rebuilt before the next turn
    pub fn needs_seeding(&self) -> bool {
        self.seeded_for.as_deref() != Some(self.jurisdiction.as_str())
    }

    pub(super) fn set_jurisdiction(&mut self, jurisdiction_id: impl Into<String>) {
        self.jurisdiction = jurisdiction_id.into();
    }

    pub(super) fn invalidate_seed(&mut self) {
        self.seeded_for = None;
    }

    pub(super) fn mark_seeded(&mut self) {
        self.seeded_for = Some(self.jurisdiction.clone());
    }
}
