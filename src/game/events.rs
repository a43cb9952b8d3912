//! Events consumed by the state machine and commands it emits

use crate::catalog::Phase;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Learner picked a phase; discards any running session
    SelectPhase(Arc<Phase>),
    /// Learner dropped the current phase to pick another
    ClearSelection,
    /// Explicit start or restart
    Start,
    /// Sentences for load `generation` are ready to be prepared
    LoadCompleted { generation: u64 },
    /// Input box contents changed
    InputChanged(String),
    /// Delayed advance scheduled by session `generation`
    AdvanceDue { generation: u64 },
    /// Feedback banner `id` has been visible long enough
    FeedbackExpired { id: u64 },
}

/// Follow-up work requested by a transition
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Process right after the current event
    Dispatch(GameEvent),
    /// Process once `after` has elapsed
    Schedule { after: Duration, event: GameEvent },
}
