/// Jurisdiction registry and constitution sources - Gateway

mod documents;
mod registry;

pub use documents::{DataFileIssue, DocumentSource, FileDocumentSource, InMemoryDocumentSource};
pub use registry::{Jurisdiction, JurisdictionRegistry};
