use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::registry::JurisdictionRegistry;
use crate::utils::JuristError;

/// Source of a jurisdiction's full constitutional text
pub trait DocumentSource: Send + Sync {
    /// Load the whole document for `jurisdiction_id`
    fn load(&self, jurisdiction_id: &str) -> Result<String, JuristError>;

    /// Availability problems worth telling the operator about
    fn check(&self) -> Vec<DataFileIssue> {
        Vec::new()
    }
}

/// Problem found by [`FileDocumentSource::check_data_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFileIssue {
    MissingDirectory(PathBuf),
    MissingFile { jurisdiction: String, path: PathBuf },
}

impl fmt::Display for DataFileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFileIssue::MissingDirectory(dir) => {
                write!(f, "The '{}/' directory is missing. Please create it.", dir.display())
            }
            DataFileIssue::MissingFile { path, .. } => {
                write!(f, "File '{}' not found. Please add and populate it.", path.display())
            }
        }
    }
}

/// Reads constitutions from text files under a data directory
pub struct FileDocumentSource {
    data_dir: PathBuf,
    files: Vec<(String, PathBuf)>,
}

impl FileDocumentSource {
    /// Map every registered jurisdiction to `data_dir/<document>`
    pub fn from_registry(data_dir: impl AsRef<Path>, registry: &JurisdictionRegistry) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let files = registry
            .iter()
            .map(|j| (j.id.clone(), data_dir.join(&j.document)))
            .collect();
        Self { data_dir, files }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the document for `jurisdiction_id`, if it is registered
    pub fn path_for(&self, jurisdiction_id: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|(id, _)| id == jurisdiction_id)
            .map(|(_, path)| path.as_path())
    }

    /// Report a missing data directory, or else every missing document file
    pub fn check_data_files(&self) -> Vec<DataFileIssue> {
        if !self.data_dir.is_dir() {
            return vec![DataFileIssue::MissingDirectory(self.data_dir.clone())];
        }

        self.files
            .iter()
            .filter(|(_, path)| !path.exists())
            .map(|(id, path)| DataFileIssue::MissingFile {
                jurisdiction: id.clone(),
                path: path.clone(),
            })
            .collect()
    }
}

impl DocumentSource for FileDocumentSource {
    fn load(&self, jurisdiction_id: &str) -> Result<String, JuristError> {
        let path = self
            .path_for(jurisdiction_id)
            .ok_or_else(|| JuristError::UnknownJurisdiction(jurisdiction_id.to_string()))?;

        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(jurisdiction = jurisdiction_id, bytes = text.len(), "loaded constitution");
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(JuristError::ResourceMissing {
                jurisdiction: jurisdiction_id.to_string(),
                location: path.display().to_string(),
            }),
            Err(e) => Err(JuristError::Io(e)),
        }
    }

    fn check(&self) -> Vec<DataFileIssue> {
        self.check_data_files()
    }
}

/// Keeps documents in memory; handy for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentSource {
    documents: HashMap<String, String>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, jurisdiction_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(jurisdiction_id.into(), text.into());
        self
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn load(&self, jurisdiction_id: &str) -> Result<String, JuristError> {
        self.documents
            .get(jurisdiction_id)
            .cloned()
            .ok_or_else(|| JuristError::ResourceMissing {
                jurisdiction: jurisdiction_id.to_string(),
                location: "memory".to_string(),
            })
    }
}
