//! Session lifecycle states

/// Where the game currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Nothing running; a phase may or may not be selected
    #[default]
    Idle,
    /// Sentences for the selected phase are being prepared
    LoadingWords,
    /// Learner is typing the current sentence
    Playing,
    /// Current sentence matched; waiting for the delayed advance
    WordCompleted,
    /// Every sentence of the session was typed
    GameOver,
    /// Load failed (e.g. empty phase)
    Error,
}

impl GameStatus {
    /// Only `Playing` accepts typed input
    pub fn accepts_input(self) -> bool {
        self == GameStatus::Playing
    }

    /// States from which an explicit start/restart is honoured
    pub fn can_start(self) -> bool {
        matches!(
            self,
            GameStatus::Idle | GameStatus::GameOver | GameStatus::Error
        )
    }

    /// A session with an active sentence exists
    pub fn in_session(self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::WordCompleted)
    }
}
