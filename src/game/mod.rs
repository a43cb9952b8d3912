//! Game Session: the typing game state machine
//!
//! # Components
//! - `status.rs`: GameStatus lifecycle states
//! - `matching.rs`: Input matching, shuffling and progress helpers
//! - `session.rs`: Session value (targets, index, typed text, score)
//! - `state.rs`: GameState and the pure transition function
//! - `events.rs`: Events fed into the state machine and commands it emits
//! - `timer.rs`: One-shot delayed events
//! - `controller.rs`: GameController driving events in arrival order
//! - `config.rs`: Timing and auto-start settings
//! - `feedback.rs`: Transient feedback banner
//! - `errors.rs`: Recoverable game errors

pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod feedback;
pub mod matching;
pub mod session;
pub mod state;
pub mod status;
pub mod timer;

pub use config::GameConfig;
pub use controller::GameController;
pub use errors::GameError;
pub use state::GameState;
pub use status::GameStatus;
