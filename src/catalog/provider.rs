//! Phase providers
//!
//! Fetching happens once at startup and again only when the learner asks
//! for a reload. Providers never retry on their own.

use super::errors::CatalogError;
use super::phases::{parse_catalog, Phase};
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the bundled catalog
pub const DEFAULT_CATALOG_PATH: &str = "assets/typing_learning_phases.json";

/// Source of learning phases
pub trait PhaseProvider {
    fn fetch_phases(&self) -> Result<Vec<Phase>, CatalogError>;
}

/// Reads the catalog from a JSON file on disk
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileProvider { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PhaseProvider for JsonFileProvider {
    fn fetch_phases(&self) -> Result<Vec<Phase>, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let phases = parse_catalog(&raw)?;
        tracing::info!(path = %self.path.display(), count = phases.len(), "phase catalog loaded");
        Ok(phases)
    }
}

/// In-memory phases
#[cfg(test)]
pub struct StaticProvider {
    phases: Vec<Phase>,
}

#[cfg(test)]
impl StaticProvider {
    pub fn new(phases: Vec<Phase>) -> Self {
        StaticProvider { phases }
    }
}

#[cfg(test)]
impl PhaseProvider for StaticProvider {
    fn fetch_phases(&self) -> Result<Vec<Phase>, CatalogError> {
        Ok(self.phases.clone())
    }
}
