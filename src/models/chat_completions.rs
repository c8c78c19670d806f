use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::traits::Responder;
use super::types::{ChatMessage, MessageRole};
use crate::app::ResponderSettings;
use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;

/// Responder backed by any OpenAI-compatible chat-completions endpoint
pub struct ChatCompletionsResponder {
    client: Client,
    base_url: String,
    model_name: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: usize,
}

impl ChatCompletionsResponder {
    /// Create a responder; the API key is read from the configured env var, if set
    pub fn new(settings: &ResponderSettings) -> Result<Self> {
        let api_key = std::env::var(&settings.api_key_env).ok();

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .context("Failed to build HTTP client")?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model_name: settings.model.clone(),
            api_key,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    fn request_body(&self, prompt: &str, history: &[ChatMessage]) -> Value {
        json!({
            "model": self.model_name,
            "messages": build_messages(prompt, history),
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": false,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

/// Convert the history to the wire format, making sure it ends with the prompt
fn build_messages(prompt: &str, history: &[ChatMessage]) -> Vec<Value> {
    let mut messages: Vec<Value> = history
        .iter()
        .map(|msg| {
            json!({
                "role": msg.role().as_str(),
                "content": msg.content(),
            })
        })
        .collect();

    let ends_with_prompt = history
        .last()
        .map(|m| m.role() == MessageRole::User && m.content() == prompt)
        .unwrap_or(false);
    if !ends_with_prompt {
        messages.push(json!({ "role": "user", "content": prompt }));
    }

    messages
}

#[async_trait]
impl Responder for ChatCompletionsResponder {
    async fn respond(
        &self,
        prompt: &str,
        jurisdiction_id: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(
            model = %self.model_name,
            jurisdiction = jurisdiction_id,
            messages = history.len(),
            "sending chat completion request"
        );

        let response = self
            .authorize(self.client.post(&url).json(&self.request_body(prompt, history)))
            .send()
            .await
            .with_context(|| format!("Failed to connect to the model endpoint at {}", self.base_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Model endpoint returned {}: {}", status, error_text);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Model endpoint returned no choices")
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    async fn validate_connection(&self) -> Result<bool> {
        let health_client = Client::builder()
            .timeout(Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS))
            .build()?;

        let health_url = format!("{}/health", self.base_url);
        if let Ok(response) = self.authorize(health_client.get(&health_url)).send().await {
            if response.status().is_success() {
                return Ok(true);
            }
        }

        // Not every endpoint exposes /health; fall back to the models listing
        let models_url = format!("{}/v1/models", self.base_url);
        match self.authorize(health_client.get(&models_url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

// Response structures (OpenAI format)

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}
