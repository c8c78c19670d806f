/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::{format_result, ExecutionMetadata, NonInteractiveResult, NonInteractiveRunner};
pub use orchestrator::{build_controller, open_session, resolve_config, Orchestrator};
