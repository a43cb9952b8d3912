//! Transient feedback banner
//!
//! A banner expires on its own after `GameConfig::feedback_duration`,
//! whatever the game status is by then.

pub const CORRECT_MESSAGE: &str = "Correct!";
pub const GAME_OVER_MESSAGE: &str = "Great Job! All sentences typed!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    /// Distinguishes banners so an old expiry can't hide a newer one
    pub id: u64,
    pub message: String,
}

impl Feedback {
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Feedback {
            id,
            message: message.into(),
        }
    }
}
