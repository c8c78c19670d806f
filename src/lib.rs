pub mod app;
pub mod cli;
pub mod console;
pub mod constants;
pub mod jurisdictions;
pub mod models;
pub mod runtime;
pub mod session;
pub mod utils;

pub use app::{load_config, Config};
pub use jurisdictions::{DocumentSource, Jurisdiction, JurisdictionRegistry};
pub use models::{ChatMessage, MessageRole, Responder};
pub use session::{History, Session, SessionController, Turn};
pub use utils::JuristError;
