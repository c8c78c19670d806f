use colored::Colorize;
use std::io::{self, Stdout, Write};

use crate::jurisdictions::DataFileIssue;
use crate::models::MessageRole;
use crate::session::SeedOutcome;

/// Free-text notice for the user, outside the conversation itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text)
            | Notice::Success(text)
            | Notice::Warning(text)
            | Notice::Error(text) => text,
        }
    }

    /// Warning for a seed that went ahead without the constitution text
    pub fn from_seed(outcome: &SeedOutcome) -> Option<Self> {
        match outcome {
            SeedOutcome::Seeded => None,
            SeedOutcome::SeededWithoutDocument(e) => Some(Notice::Warning(format!(
                "{}. The assistant has no constitutional text for this jurisdiction.",
                e
            ))),
        }
    }
}

impl From<&DataFileIssue> for Notice {
    fn from(issue: &DataFileIssue) -> Self {
        match issue {
            DataFileIssue::MissingDirectory(_) => Notice::Error(issue.to_string()),
            DataFileIssue::MissingFile { .. } => Notice::Warning(issue.to_string()),
        }
    }
}

/// Where conversation output goes
pub trait Presenter {
    /// Render one user or assistant message
    fn show_message(&mut self, role: MessageRole, content: &str);

    fn show_notice(&mut self, notice: &Notice);

    fn show_title(&mut self, title: &str) {
        self.show_notice(&Notice::Info(title.to_string()));
    }

    /// Transient progress text, e.g. while the responder works
    fn show_status(&mut self, _text: &str) {}

    /// Input prompt before reading the next line
    fn show_prompt(&mut self, _placeholder: &str) {}
}

/// Colored terminal output
pub struct TerminalPresenter<W: Write> {
    out: W,
}

impl TerminalPresenter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Terminal write failures are not recoverable here and are dropped
impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_message(&mut self, role: MessageRole, content: &str) {
        let label = match role {
            MessageRole::User => "You".cyan().bold(),
            MessageRole::Assistant => "Lawyer".green().bold(),
            MessageRole::System => return,
        };
        let _ = writeln!(self.out, "\n{}\n{}", label, content);
    }

    fn show_notice(&mut self, notice: &Notice) {
        let line = match notice {
            Notice::Info(text) => text.blue(),
            Notice::Success(text) => format!("[OK] {}", text).green(),
            Notice::Warning(text) => format!("[WARNING] {}", text).yellow(),
            Notice::Error(text) => format!("[ERROR] {}", text).red(),
        };
        let _ = writeln!(self.out, "{}", line);
    }

    fn show_title(&mut self, title: &str) {
        let _ = writeln!(self.out, "{}", title.bold());
    }

    fn show_status(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text.dimmed());
    }

    fn show_prompt(&mut self, placeholder: &str) {
        let _ = write!(self.out, "\n{}\n> ", placeholder.dimmed());
        let _ = self.out.flush();
    }
}

/// Presenter that keeps everything it is given
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingPresenter {
    pub messages: Vec<(MessageRole, String)>,
    pub notices: Vec<Notice>,
    pub titles: Vec<String>,
}

#[cfg(test)]
impl Presenter for RecordingPresenter {
    fn show_message(&mut self, role: MessageRole, content: &str) {
        self.messages.push((role, content.to_string()));
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn show_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}
