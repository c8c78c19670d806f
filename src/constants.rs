/// Constants module to avoid magic numbers in the codebase

// Responder Configuration
pub const DEFAULT_RESPONDER_URL: &str = "http://localhost:4000";
pub const DEFAULT_RESPONDER_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "JURIST_API_KEY";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: usize = 2048;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 600; // 10 minutes for long constitutional answers
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 3;

// Document Source
pub const DEFAULT_DATA_DIR: &str = "data";

// Config
pub const CONFIG_DIR_NAME: &str = "jurist";
pub const LOCAL_CONFIG_PATH: &str = ".jurist/config.toml";
pub const ENV_PREFIX: &str = "JURIST_";

// Presentation
pub const DISCLAIMER: &str = "This is a prototype. Always consult a qualified human lawyer.";
pub const SHOW_CONSTITUTION_HINT: &str =
    "Ask 'show constitution' to view the loaded constitutional text.";

/// Fixed instruction payload that opens every seeded conversation
pub const SYSTEM_PROMPT: &str = "You are an AI legal information assistant. \
You help people understand the constitution of the jurisdiction they have selected. \
The full constitutional text is provided in the next system message; ground every answer in it \
and cite the relevant articles by number. \
If the text does not address a question, say so plainly instead of guessing, and do not draw on \
the law of other jurisdictions unless the user asks for a comparison. \
You are not a lawyer and your answers are not legal advice; remind the user to consult a qualified \
lawyer before acting on anything you say. \
When the user asks to \"show constitution\", reproduce the provided constitutional text verbatim.";

/// First line of the seeded jurisdiction message
pub fn constitution_header(jurisdiction_id: &str) -> String {
    format!("--- CONSTITUTION OF {} ---", jurisdiction_id.to_uppercase())
}
