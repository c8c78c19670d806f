use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::traits::Responder;
use super::types::ChatMessage;

/// Canned responder that records the history length of every call
pub(crate) struct StubResponder {
    reply: std::result::Result<String, String>,
    calls: Mutex<Vec<(String, String, usize)>>,
}

impl StubResponder {
    pub(crate) fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// (prompt, jurisdiction, history length) per call
    pub(crate) fn calls(&self) -> Vec<(String, String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for StubResponder {
    async fn respond(
        &self,
        prompt: &str,
        jurisdiction_id: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        self.calls.lock().unwrap().push((
            prompt.to_string(),
            jurisdiction_id.to_string(),
            history.len(),
        ));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(anyhow::anyhow!("{}", e)),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

// Shared references let tests keep inspecting the stub after handing it over
#[async_trait]
impl<T: Responder + ?Sized> Responder for std::sync::Arc<T> {
    async fn respond(
        &self,
        prompt: &str,
        jurisdiction_id: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        (**self).respond(prompt, jurisdiction_id, history).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
