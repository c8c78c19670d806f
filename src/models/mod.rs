// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod chat_completions;
mod traits;
mod types;

#[cfg(test)]
mod testing;

// Public re-exports - the ONLY way to access model functionality
pub use chat_completions::ChatCompletionsResponder;
pub use traits::Responder;
pub use types::{ChatMessage, MessageRole};

#[cfg(test)]
pub(crate) use testing::StubResponder;
#[cfg(test)]
pub(crate) use traits::MockResponder;
