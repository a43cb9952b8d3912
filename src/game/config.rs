//! Game timing and start behaviour

use std::time::Duration;

/// Pause between a completed sentence and the next one
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1000);

/// How long a feedback banner stays visible
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub advance_delay: Duration,
    pub feedback_duration: Duration,
    /// Start loading as soon as a phase is selected
    pub auto_start: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            advance_delay: ADVANCE_DELAY,
            feedback_duration: FEEDBACK_DURATION,
            auto_start: true,
        }
    }
}
