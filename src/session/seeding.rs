use tracing::{info, warn};

use super::state::Session;
use crate::constants::{constitution_header, SYSTEM_PROMPT};
use crate::jurisdictions::DocumentSource;
use crate::models::MessageRole;
use crate::utils::JuristError;

/// What happened when a session was seeded
#[derive(Debug)]
pub enum SeedOutcome {
    /// Instruction and full constitution are in place
    Seeded,
    /// The constitution could not be loaded; the jurisdiction message has a header
    /// and an empty body
    SeededWithoutDocument(JuristError),
}

/// Rebuild the history for the session's current jurisdiction
///
/// Always clears first, so any earlier turns are gone afterwards. A document that
/// cannot be loaded does not stop seeding.
pub fn seed_session(session: &mut Session, documents: &dyn DocumentSource) -> SeedOutcome {
    let jurisdiction = session.jurisdiction().to_string();
    session.history_mut().clear();

    let (text, outcome) = match documents.load(&jurisdiction) {
        Ok(text) => (text, SeedOutcome::Seeded),
        Err(e) => {
            warn!(jurisdiction = %jurisdiction, error = %e, "seeding without constitution text");
            (String::new(), SeedOutcome::SeededWithoutDocument(e))
        }
    };

    let history = session.history_mut();
    history.append(MessageRole::System, SYSTEM_PROMPT);
    history.append(
        MessageRole::System,
        format!("{}\n{}", constitution_header(&jurisdiction), text),
    );
    session.mark_seeded();

    info!(jurisdiction = %jurisdiction, "seeded conversation");
    outcome
}

/// Seed only if the marker does not match the selected jurisdiction
pub fn ensure_seeded(session: &mut Session, documents: &dyn DocumentSource) -> Option<SeedOutcome> {
    if session.needs_seeding() {
        Some(seed_session(session, documents))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdictions::InMemoryDocumentSource;

    #[test]
    fn test_seed_produces_two_system_messages() {
        let documents = InMemoryDocumentSource::new().with_document("JP", "Article 9 ...");
        let mut session = Session::new("JP");

        let outcome = seed_session(&mut session, &documents);
        assert!(matches!(outcome, SeedOutcome::Seeded));

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role(), MessageRole::System);
        assert_eq!(messages[0].content(), SYSTEM_PROMPT);
        assert_eq!(messages[1].role(), MessageRole::System);
        assert_eq!(messages[1].content(), "--- CONSTITUTION OF JP ---\nArticle 9 ...");
        assert_eq!(session.seeded_for(), Some("JP"));
    }

    #[test]
    fn test_seed_discards_prior_turns() {
        let documents = InMemoryDocumentSource::new().with_document("MC", "Art. 1");
        let mut session = Session::new("MC");
        session.history_mut().append(MessageRole::User, "unrelated");
        session.history_mut().append(MessageRole::Assistant, "reply");

        seed_session(&mut session, &documents);

        assert_eq!(session.messages().len(), 2);
        assert!(session.messages().iter().all(|m| m.role() == MessageRole::System));
    }

    #[test]
    fn test_missing_document_leaves_empty_section() {
        let documents = InMemoryDocumentSource::new();
        let mut session = Session::new("mc");

        let outcome = seed_session(&mut session, &documents);
        assert!(matches!(
            outcome,
            SeedOutcome::SeededWithoutDocument(JuristError::ResourceMissing { .. })
        ));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].content(), "--- CONSTITUTION OF MC ---\n");
        assert_eq!(session.seeded_for(), Some("mc"));
    }

    #[test]
    fn test_ensure_seeded_runs_once() {
        let documents = InMemoryDocumentSource::new().with_document("JP", "text");
        let mut session = Session::new("JP");

        assert!(ensure_seeded(&mut session, &documents).is_some());
        session.history_mut().append(MessageRole::User, "question");
        assert!(ensure_seeded(&mut session, &documents).is_none());
        assert_eq!(session.messages().len(), 3);
    }
}
