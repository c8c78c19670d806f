use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::presenter::{Notice, Presenter};
use crate::constants::{DISCLAIMER, SHOW_CONSTITUTION_HINT};
use crate::models::MessageRole;
use crate::session::{Session, SessionController};

/// One line of terminal input, as an event for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectJurisdiction(String),
    ListJurisdictions,
    Clear,
    History,
    Help,
    Quit,
    Ask(String),
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if !line.starts_with('/') {
            return Command::Ask(line.to_string());
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "/jurisdiction" | "/j" if !arg.is_empty() => Command::SelectJurisdiction(arg.to_string()),
            "/jurisdiction" | "/j" | "/jurisdictions" => Command::ListJurisdictions,
            "/clear" => Command::Clear,
            "/history" => Command::History,
            "/help" | "/?" => Command::Help,
            "/quit" | "/exit" | "/q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

const HELP: &str = "Commands:
  /jurisdiction <id>   switch jurisdiction (starts a new conversation)
  /jurisdictions       list supported jurisdictions
  /clear               clear the conversation history
  /history             show the conversation so far
  /quit                leave
Anything else is sent to the assistant.";

/// Interactive session over a line-based input
pub struct ChatLoop<'a, P: Presenter> {
    controller: &'a SessionController,
    session: Session,
    presenter: P,
}

impl<'a, P: Presenter> ChatLoop<'a, P> {
    pub fn new(controller: &'a SessionController, session: Session, presenter: P) -> Self {
        Self {
            controller,
            session,
            presenter,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Show the banner for the current jurisdiction, reseeding if needed
    pub fn start(&mut self) {
        let name = self
            .controller
            .registry()
            .display_name(self.session.jurisdiction())
            .to_string();
        self.presenter.show_title(&format!("AI Lawyer ({})", name));
        self.presenter.show_notice(&Notice::Info(DISCLAIMER.to_string()));
        self.presenter
            .show_notice(&Notice::Info(SHOW_CONSTITUTION_HINT.to_string()));
        self.refresh();
    }

    /// Seed if the marker is stale, then redraw the visible conversation
    fn refresh(&mut self) {
        if let Some(outcome) = self.controller.ensure_seeded(&mut self.session) {
            if let Some(notice) = Notice::from_seed(&outcome) {
                self.presenter.show_notice(&notice);
            }
        }
        self.controller.render(&self.session, &mut self.presenter);
    }

    /// Handle one line of input. Returns false when the user wants to leave.
    pub async fn handle_line(&mut self, line: &str) -> bool {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Quit => return false,
            Command::Help => self.presenter.show_notice(&Notice::Info(HELP.to_string())),
            Command::History => self.controller.render(&self.session, &mut self.presenter),
            Command::ListJurisdictions => self.list_jurisdictions(),
            Command::Clear => {
                let confirmation = self.controller.clear_conversation(&mut self.session);
                self.presenter.show_notice(&Notice::Success(confirmation));
                // Reseed right away so the next question already has context
                self.refresh();
            }
            Command::SelectJurisdiction(id) => {
                match self.controller.select_jurisdiction(&mut self.session, &id) {
                    Ok(true) => self.start(),
                    Ok(false) => {}
                    Err(e) => self.presenter.show_notice(&Notice::Error(e.to_string())),
                }
            }
            Command::Unknown(name) => self.presenter.show_notice(&Notice::Warning(format!(
                "Unknown command '{}'. Type /help for the list.",
                name
            ))),
            Command::Ask(prompt) => self.ask(&prompt).await,
        }
        true
    }

    async fn ask(&mut self, prompt: &str) {
        self.presenter.show_message(MessageRole::User, prompt);
        self.presenter.show_status("Researching...");

        match self.controller.handle_turn(&mut self.session, prompt).await {
            Ok(turn) => {
                if let Some(notice) = turn.seed.as_ref().and_then(Notice::from_seed) {
                    self.presenter.show_notice(&notice);
                }
                self.presenter.show_message(MessageRole::Assistant, &turn.reply);
            }
            Err(e) => self.presenter.show_notice(&Notice::Error(e.to_string())),
        }
    }

    fn list_jurisdictions(&mut self) {
        let current = self.session.jurisdiction().to_string();
        let lines: Vec<String> = self
            .controller
            .registry()
            .iter()
            .map(|j| {
                let marker = if j.id == current { "*" } else { " " };
                format!("{} {:<6} {}", marker, j.id, j.name)
            })
            .collect();
        self.presenter.show_notice(&Notice::Info(lines.join("\n")));
    }

    /// Read lines until EOF or /quit
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.start();

        let mut lines = input.lines();
        loop {
            let name = self
                .controller
                .registry()
                .display_name(self.session.jurisdiction())
                .to_string();
            self.presenter.show_prompt(&format!("Ask about {} law...", name));

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if !self.handle_line(&line).await {
                break;
            }
        }

        Ok(())
    }
}
