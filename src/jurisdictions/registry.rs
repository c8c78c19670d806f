use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::utils::JuristError;

/// A supported legal territory and where its constitution lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// Short identifier, e.g. "JP"
    pub id: String,
    /// Display name, e.g. "Japan"
    pub name: String,
    /// Constitution text file, relative to the data directory
    pub document: PathBuf,
}

impl Jurisdiction {
    pub fn new(id: impl Into<String>, name: impl Into<String>, document: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            document: document.into(),
        }
    }
}

/// Ordered, non-empty set of jurisdictions. The first entry is the default selection.
#[derive(Debug, Clone)]
pub struct JurisdictionRegistry {
    entries: Vec<Jurisdiction>,
}

impl JurisdictionRegistry {
    pub fn new(entries: Vec<Jurisdiction>) -> Result<Self, JuristError> {
        if entries.is_empty() {
            return Err(JuristError::Config(
                "no jurisdictions configured; at least one is required to pick a default"
                    .to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.id.trim().is_empty() {
                return Err(JuristError::Config(format!(
                    "jurisdiction '{}' has an empty id",
                    entry.name
                )));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(JuristError::Config(format!(
                    "jurisdiction '{}' is configured twice",
                    entry.id
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn default_jurisdiction(&self) -> &Jurisdiction {
        // Non-empty by construction
        &self.entries[0]
    }

    pub fn get(&self, id: &str) -> Option<&Jurisdiction> {
        self.entries.iter().find(|j| j.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Display name for `id`, falling back to the id itself
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|j| j.name.as_str()).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
