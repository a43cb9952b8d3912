//! Catalog fetch failures
//!
//! The game core treats every variant as an opaque failure; the message is
//! shown in the phase panel and the learner decides when to retry.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid JSON structure: missing \"phases\" field")]
    MissingPhases,

    #[error("phase {0} appears more than once")]
    DuplicatePhaseId(u32),
}
