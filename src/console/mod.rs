/// Terminal presentation layer - Gateway

mod chat_loop;
mod presenter;

pub use chat_loop::{ChatLoop, Command};
pub use presenter::{Notice, Presenter, TerminalPresenter};

#[cfg(test)]
pub(crate) use presenter::RecordingPresenter;
