//! Recoverable game errors
//!
//! None of these end the program. The controller stores the message in
//! `GameState::error_message` and settles in `Idle` or `Error`.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Please select a learning phase to start.")]
    NoPhaseSelected,

    #[error("No sentences found in the selected phase. Please select another phase.")]
    EmptyPhase,

    #[error("Failed to load typing phases: {0}")]
    CatalogFetchFailed(String),
}

/// Prompt shown after the learner drops the current phase
pub const CHOOSE_NEW_PHASE: &str = "Please select a new learning phase.";
