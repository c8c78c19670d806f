use thiserror::Error;

/// Main error type for Jurist
#[derive(Error, Debug)]
pub enum JuristError {
    #[error("Constitution text for '{jurisdiction}' not found at {location}")]
    ResourceMissing {
        jurisdiction: String,
        location: String,
    },

    #[error("Responder error: {0}")]
    Responder(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    #[error("Invalid message role: {0}")]
    InvalidRole(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
