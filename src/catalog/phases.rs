//! Phase data model
//!
//! A catalog file looks like:
//! `{ "phases": [ { "phase": 1, "description": "...", "sentences": ["..."] } ] }`

use super::errors::CatalogError;
use serde::Deserialize;
use std::collections::HashSet;

/// One learning unit: an ordered list of sentences to type
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Phase {
    /// Stable, unique phase number
    #[serde(rename = "phase")]
    pub id: u32,
    pub description: String,
    #[serde(default)]
    pub sentences: Vec<String>,
}

impl Phase {
    #[cfg(test)]
    pub fn new(id: u32, description: impl Into<String>, sentences: Vec<String>) -> Self {
        Phase {
            id,
            description: description.into(),
            sentences,
        }
    }

    /// Menu label, e.g. "Phase 2: Animals and friends"
    pub fn label(&self) -> String {
        format!("Phase {}: {}", self.id, self.description)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogPayload {
    phases: Option<Vec<Phase>>,
}

/// Parse a catalog payload, keeping phase order as written
pub fn parse_catalog(raw: &str) -> Result<Vec<Phase>, CatalogError> {
    let payload: CatalogPayload = serde_json::from_str(raw)?;
    let phases = payload.phases.ok_or(CatalogError::MissingPhases)?;

    let mut seen = HashSet::new();
    for phase in &phases {
        if !seen.insert(phase.id) {
            return Err(CatalogError::DuplicatePhaseId(phase.id));
        }
    }

    Ok(phases)
}
