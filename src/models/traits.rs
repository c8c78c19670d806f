use anyhow::Result;
use async_trait::async_trait;

use super::types::ChatMessage;

/// Capability that produces the assistant's reply for a turn
///
/// Implementations may block for as long as the provider takes; there is no
/// timeout or retry at the call site.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce assistant text for `prompt`, given the full history (which already
    /// ends with the user's message)
    async fn respond(
        &self,
        prompt: &str,
        jurisdiction_id: &str,
        history: &[ChatMessage],
    ) -> Result<String>;

    /// Get the name of the backing model
    fn name(&self) -> &str;

    /// Validate that the responder is reachable
    async fn validate_connection(&self) -> Result<bool> {
        Ok(true)
    }
}
