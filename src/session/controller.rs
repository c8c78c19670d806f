use tracing::{debug, info};

use super::seeding::{ensure_seeded, SeedOutcome};
use super::state::Session;
use crate::console::Presenter;
use crate::jurisdictions::{DataFileIssue, DocumentSource, JurisdictionRegistry};
use crate::models::{MessageRole, Responder};
use crate::utils::JuristError;

/// A completed turn
#[derive(Debug)]
pub struct Turn {
    /// The assistant's reply, already appended to the history
    pub reply: String,
    /// Set when the turn had to seed the session first
    pub seed: Option<SeedOutcome>,
}

/// Drives sessions: seeding, turns, jurisdiction changes and clears
///
/// Holds only read-only collaborators. All mutable state lives in the [`Session`]
/// passed to each call, so any number of sessions can share one controller.
pub struct SessionController {
    registry: JurisdictionRegistry,
    documents: Box<dyn DocumentSource>,
    responder: Box<dyn Responder>,
}

impl SessionController {
    pub fn new(
        registry: JurisdictionRegistry,
        documents: Box<dyn DocumentSource>,
        responder: Box<dyn Responder>,
    ) -> Self {
        Self {
            registry,
            documents,
            responder,
        }
    }

    pub fn registry(&self) -> &JurisdictionRegistry {
        &self.registry
    }

    pub fn responder(&self) -> &dyn Responder {
        self.responder.as_ref()
    }

    /// Start a session on the default jurisdiction with an empty history
    pub fn new_session(&self) -> Session {
        let mut session = Session::new(self.registry.default_jurisdiction().id.clone());
        session.initialize();
        session
    }

    /// Seed the session if its marker is stale; `None` when nothing had to be done
    pub fn ensure_seeded(&self, session: &mut Session) -> Option<SeedOutcome> {
        ensure_seeded(session, self.documents.as_ref())
    }

    /// Change the selected jurisdiction. History is left alone until the next seed.
    ///
    /// Returns whether the selection actually changed.
    pub fn select_jurisdiction(&self, session: &mut Session, id: &str) -> Result<bool, JuristError> {
        if !self.registry.contains(id) {
            return Err(JuristError::UnknownJurisdiction(id.to_string()));
        }
        if session.jurisdiction() == id {
            return Ok(false);
        }

        info!(from = session.jurisdiction(), to = id, "jurisdiction changed");
        session.set_jurisdiction(id);
        session.invalidate_seed();
        Ok(true)
    }

    /// Erase the conversation and force a reseed on next access
    pub fn clear_conversation(&self, session: &mut Session) -> String {
        let confirmation = session.history_mut().clear();
        session.invalidate_seed();
        info!(jurisdiction = session.jurisdiction(), "conversation cleared");
        confirmation.to_string()
    }

    /// Record the user's message, ask the responder, record its reply
    ///
    /// A stale session is seeded first and the outcome returned with the reply.
    /// On responder failure the user message stays in the history, no assistant
    /// message is added, and a seed warning from this call is only logged; call
    /// [`Self::ensure_seeded`] beforehand to observe it.
    pub async fn handle_turn(&self, session: &mut Session, user_text: &str) -> Result<Turn, JuristError> {
        // A turn against a stale seed is never allowed
        let seed = self.ensure_seeded(session);

        session.history_mut().append(MessageRole::User, user_text);
        let snapshot = session.history_mut().snapshot();
        let jurisdiction = session.jurisdiction().to_string();

        debug!(jurisdiction = %jurisdiction, history = snapshot.len(), "asking responder");
        let reply = self
            .responder
            .respond(user_text, &jurisdiction, &snapshot)
            .await
            .map_err(|e| JuristError::Responder(format!("{:#}", e)))?;

        session.history_mut().append(MessageRole::Assistant, reply.clone());
        Ok(Turn { reply, seed })
    }

    /// Hand every user and assistant message to the presenter, in order
    pub fn render(&self, session: &Session, presenter: &mut dyn Presenter) {
        for message in session.visible_messages() {
            presenter.show_message(message.role(), message.content());
        }
    }

    /// Availability problems of the configured documents
    pub fn check_documents(&self) -> Vec<DataFileIssue> {
        self.documents.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::RecordingPresenter;
    use crate::constants::SYSTEM_PROMPT;
    use crate::jurisdictions::{InMemoryDocumentSource, Jurisdiction};
    use crate::models::{MockResponder, StubResponder};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn registry() -> JurisdictionRegistry {
        JurisdictionRegistry::new(vec![
            Jurisdiction::new("JP", "Japan", "japan_constitution.txt"),
            Jurisdiction::new("MC", "Monaco", "monaco_constitution.txt"),
        ])
        .unwrap()
    }

    fn documents() -> InMemoryDocumentSource {
        InMemoryDocumentSource::new()
            .with_document("JP", "Article 9. Aspiring sincerely to an international peace ...")
            .with_document("MC", "Article 1. The Principality of Monaco is a sovereign State ...")
    }

    fn controller(responder: impl Responder + 'static) -> SessionController {
        SessionController::new(registry(), Box::new(documents()), Box::new(responder))
    }

    #[test]
    fn test_new_session_starts_empty_on_default() {
        let controller = controller(StubResponder::replying("unused"));
        let mut session = controller.new_session();
        session.initialize();

        assert!(session.messages().is_empty());
        assert_eq!(session.jurisdiction(), "JP");
        assert!(session.needs_seeding());
    }

    #[test]
    fn test_seeding_produces_instruction_then_constitution() {
        let controller = controller(StubResponder::replying("unused"));
        let mut session = controller.new_session();

        assert!(matches!(
            controller.ensure_seeded(&mut session),
            Some(SeedOutcome::Seeded)
        ));

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), MessageRole::System);
        assert_eq!(messages[0].content(), SYSTEM_PROMPT);
        assert_eq!(messages[1].role(), MessageRole::System);
        assert!(messages[1].content().starts_with("--- CONSTITUTION OF JP ---\nArticle 9."));
        assert_eq!(session.seeded_for(), Some("JP"));
    }

    #[tokio::test]
    async fn test_switching_jurisdiction_reseeds_from_scratch() {
        let controller = controller(StubResponder::replying("An answer."));
        let mut session = controller.new_session();
        controller.handle_turn(&mut session, "Hello").await.unwrap();
        assert_eq!(session.messages().len(), 4);

        assert!(controller.select_jurisdiction(&mut session, "MC").unwrap());
        // Selection alone does not clear
        assert_eq!(session.messages().len(), 4);
        assert_eq!(session.seeded_for(), None);

        controller.ensure_seeded(&mut session);
        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.role() == MessageRole::System));
        assert!(messages[1].content().starts_with("--- CONSTITUTION OF MC ---"));
        assert_eq!(session.seeded_for(), Some("MC"));
    }

    #[test]
    fn test_reselecting_same_jurisdiction_keeps_seed() {
        let controller = controller(StubResponder::replying("unused"));
        let mut session = controller.new_session();
        controller.ensure_seeded(&mut session);

        assert!(!controller.select_jurisdiction(&mut session, "JP").unwrap());
        assert_eq!(session.seeded_for(), Some("JP"));
    }

    #[test]
    fn test_unknown_jurisdiction_rejected() {
        let controller = controller(StubResponder::replying("unused"));
        let mut session = controller.new_session();
        controller.ensure_seeded(&mut session);

        assert!(matches!(
            controller.select_jurisdiction(&mut session, "FR"),
            Err(JuristError::UnknownJurisdiction(_))
        ));
        assert_eq!(session.jurisdiction(), "JP");
        assert_eq!(session.seeded_for(), Some("JP"));
    }

    #[tokio::test]
    async fn test_turn_appends_user_then_assistant() {
        let responder = Arc::new(StubResponder::replying("Article 9 renounces war."));
        let controller = controller(responder.clone());
        let mut session = controller.new_session();
        controller.ensure_seeded(&mut session);

        let turn = controller
            .handle_turn(&mut session, "What rights does Article 9 grant?")
            .await
            .unwrap();
        assert_eq!(turn.reply, "Article 9 renounces war.");
        assert!(turn.seed.is_none());

        let messages = session.messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role(), MessageRole::User);
        assert_eq!(messages[2].content(), "What rights does Article 9 grant?");
        assert_eq!(messages[3].role(), MessageRole::Assistant);
        assert_eq!(messages[3].content(), "Article 9 renounces war.");

        // The responder saw the seed plus the user message, not its own reply
        assert_eq!(
            responder.calls(),
            vec![(
                "What rights does Article 9 grant?".to_string(),
                "JP".to_string(),
                3
            )]
        );
    }

    #[tokio::test]
    async fn test_failed_turn_records_only_user_message() {
        let controller = controller(StubResponder::failing("connection refused"));
        let mut session = controller.new_session();
        controller.ensure_seeded(&mut session);
        let before = session.messages().len();

        match controller.handle_turn(&mut session, "Is this legal?").await {
            Err(JuristError::Responder(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("Expected responder error, got {:?}", other),
        }

        let messages = session.messages();
        assert_eq!(messages.len(), before + 1);
        assert_eq!(messages.last().unwrap().role(), MessageRole::User);
    }

    #[tokio::test]
    async fn test_turn_seeds_stale_session_first() {
        let controller = controller(StubResponder::replying("ok"));
        let mut session = controller.new_session();

        let turn = controller.handle_turn(&mut session, "Hi").await.unwrap();
        assert!(matches!(turn.seed, Some(SeedOutcome::Seeded)));

        let roles: Vec<_> = session.messages().iter().map(|m| m.role()).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant
            ]
        );
    }

    #[tokio::test]
    async fn test_clear_conversation_forces_reseed() {
        let controller = controller(StubResponder::replying("ok"));
        let mut session = controller.new_session();
        controller.handle_turn(&mut session, "Hi").await.unwrap();

        let confirmation = controller.clear_conversation(&mut session);
        assert!(confirmation.contains("cleared"));
        assert!(session.messages().is_empty());
        assert!(session.needs_seeding());
        assert_eq!(session.jurisdiction(), "JP");

        controller.ensure_seeded(&mut session);
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_turn_after_clear_sends_fresh_seed() {
        let responder = Arc::new(StubResponder::replying("ok"));
        let controller = controller(responder.clone());
        let mut session = controller.new_session();
        controller.handle_turn(&mut session, "Hi").await.unwrap();

        controller.clear_conversation(&mut session);
        let turn = controller.handle_turn(&mut session, "Q").await.unwrap();

        assert!(matches!(turn.seed, Some(SeedOutcome::Seeded)));
        assert_eq!(session.seeded_for(), Some("JP"));
        assert_eq!(session.messages()[0].content(), SYSTEM_PROMPT);
        assert!(session.messages()[1]
            .content()
            .starts_with("--- CONSTITUTION OF JP ---"));
        // Seed plus the new question, nothing from before the clear
        assert_eq!(responder.calls().last().unwrap(), &("Q".to_string(), "JP".to_string(), 3));
        assert_eq!(session.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_turn_returns_missing_document_warning() {
        let controller = SessionController::new(
            registry(),
            Box::new(InMemoryDocumentSource::new()),
            Box::new(StubResponder::replying("ok")),
        );
        let mut session = controller.new_session();

        let turn = controller.handle_turn(&mut session, "Hi").await.unwrap();

        assert!(matches!(
            turn.seed,
            Some(SeedOutcome::SeededWithoutDocument(JuristError::ResourceMissing { .. }))
        ));
        assert_eq!(session.messages().len(), 4);
    }

    #[test]
    fn test_check_documents_delegates_to_source() {
        let controller = controller(StubResponder::replying("unused"));
        // In-memory documents have nothing to check
        assert!(controller.check_documents().is_empty());
    }

    #[tokio::test]
    async fn test_render_skips_system_messages() {
        let controller = controller(StubResponder::replying("Here you go."));
        let mut session = controller.new_session();
        controller.handle_turn(&mut session, "show constitution").await.unwrap();

        let mut presenter = RecordingPresenter::default();
        controller.render(&session, &mut presenter);

        assert_eq!(
            presenter.messages,
            vec![
                (MessageRole::User, "show constitution".to_string()),
                (MessageRole::Assistant, "Here you go.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let controller = controller(StubResponder::replying("ok"));
        let mut first = controller.new_session();
        let mut second = controller.new_session();

        controller.handle_turn(&mut first, "only in first").await.unwrap();
        controller.select_jurisdiction(&mut second, "MC").unwrap();
        controller.ensure_seeded(&mut second);

        assert_eq!(first.jurisdiction(), "JP");
        assert_eq!(first.messages().len(), 4);
        assert_eq!(second.messages().len(), 2);
        assert!(second
            .messages()
            .iter()
            .all(|m| m.content() != "only in first"));
    }

    #[tokio::test]
    async fn test_end_to_end_show_constitution() {
        let mut responder = MockResponder::new();
        responder
            .expect_respond()
            .withf(|prompt, jurisdiction, history| {
                prompt.to_string() == "show constitution"
                    && jurisdiction.to_string() == "JP"
                    && history.len() == 3
                    && history[0].role() == MessageRole::System
            })
            .times(1)
            .returning(|_, _, _| Ok("Here is JP's constitution: ...".to_string()));

        let controller = controller(responder);
        let mut session = controller.new_session();
        controller.ensure_seeded(&mut session);

        assert_eq!(session.messages()[0].role(), MessageRole::System);
        assert!(session.messages()[1]
            .content()
            .starts_with("--- CONSTITUTION OF JP"));

        let turn = controller
            .handle_turn(&mut session, "show constitution")
            .await
            .unwrap();
        assert_eq!(turn.reply, "Here is JP's constitution: ...");
        assert_eq!(session.messages().len(), 4);
    }
}
