use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::{
    cli::OutputFormat,
    console::Notice,
    models::ChatMessage,
    session::{Session, SessionController},
};

/// Result of a non-interactive run
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// Jurisdiction the question was asked under
    pub jurisdiction: String,
    /// The prompt that was executed
    pub prompt: String,
    /// The assistant's reply, empty if the turn failed
    pub response: String,
    /// Non-fatal problems, such as a missing constitution file
    pub warnings: Vec<String>,
    /// Any errors that occurred
    pub errors: Vec<String>,
    /// User and assistant messages of the session
    pub transcript: Vec<ChatMessage>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Model used
    pub model: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Runs a single question against a freshly seeded session
pub struct NonInteractiveRunner<'a> {
    controller: &'a SessionController,
    session: Session,
}

impl<'a> NonInteractiveRunner<'a> {
    pub fn new(controller: &'a SessionController, session: Session) -> Self {
        Self {
            controller,
            session,
        }
    }

    /// Execute a single prompt and return the result
    pub async fn execute(mut self, prompt: String) -> NonInteractiveResult {
        let start_time = Instant::now();
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if let Some(outcome) = self.controller.ensure_seeded(&mut self.session) {
            if let Some(notice) = Notice::from_seed(&outcome) {
                warnings.push(notice.text().to_string());
            }
        }

        let response = match self.controller.handle_turn(&mut self.session, &prompt).await {
            Ok(turn) => turn.reply,
            Err(e) => {
                errors.push(e.to_string());
                String::new()
            }
        };

        let transcript = self.session.visible_messages().cloned().collect();

        NonInteractiveResult {
            jurisdiction: self.session.jurisdiction().to_string(),
            prompt,
            response,
            warnings,
            errors,
            transcript,
            metadata: ExecutionMetadata {
                model: self.controller.responder().name().to_string(),
                duration_ms: start_time.elapsed().as_millis(),
            },
        }
    }
}

/// Format the result according to the output format
pub fn format_result(result: &NonInteractiveResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
            format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
        }),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&result.response);

            if !result.warnings.is_empty() {
                output.push_str("\n\n--- Warnings ---\n");
                for warning in &result.warnings {
                    output.push_str(&format!("• {}\n", warning));
                }
            }

            if !result.errors.is_empty() {
                output.push_str("\n--- Errors ---\n");
                for error in &result.errors {
                    output.push_str(&format!("• {}\n", error));
                }
            }

            output
        }
        OutputFormat::Markdown => {
            let mut output = String::new();

            output.push_str(&format!("## Question ({})\n\n", result.jurisdiction));
            output.push_str(&result.prompt);
            output.push_str("\n\n## Answer\n\n");
            output.push_str(&result.response);
            output.push_str("\n\n");

            if !result.warnings.is_empty() {
                output.push_str("## Warnings\n\n");
                for warning in &result.warnings {
                    output.push_str(&format!("- {}\n", warning));
                }
                output.push('\n');
            }

            if !result.errors.is_empty() {
                output.push_str("## Errors\n\n");
                for error in &result.errors {
                    output.push_str(&format!("- {}\n", error));
                }
                output.push('\n');
            }

            output.push_str("---\n");
            output.push_str(&format!(
                "*Model: {} | Duration: {}ms*\n",
                result.metadata.model, result.metadata.duration_ms
            ));

            output
        }
    }
}
