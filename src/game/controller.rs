//! Game controller: feeds events through the state machine one at a time
//!
//! Inputs arrive from the presentation layer (selection, start, input) and
//! from the timer queue (`tick`). Follow-up events produced by a transition
//! are queued behind the current one, so no handler ever runs inside
//! another.

use super::config::GameConfig;
use super::events::{Command, GameEvent};
use super::state::GameState;
use super::timer::TimerQueue;
use crate::catalog::Phase;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

pub struct GameController<R: Rng = StdRng> {
    state: GameState,
    config: GameConfig,
    rng: R,
    timers: TimerQueue,
    queue: VecDeque<GameEvent>,
}

impl GameController<StdRng> {
    /// Controller with an entropy-seeded shuffle
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Controller with a reproducible shuffle
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        GameController {
            state: GameState::new(),
            config,
            rng,
            timers: TimerQueue::new(),
            queue: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Select a phase, discarding whatever session is running
    pub fn select_phase(&mut self, phase: Arc<Phase>, now: Instant) {
        self.dispatch(GameEvent::SelectPhase(phase), now);
    }

    /// Drop the selected phase
    pub fn clear_selection(&mut self, now: Instant) {
        self.dispatch(GameEvent::ClearSelection, now);
    }

    /// Start, or restart after game over / error
    pub fn start(&mut self, now: Instant) {
        self.dispatch(GameEvent::Start, now);
    }

    /// New contents of the input box
    pub fn input_changed(&mut self, text: impl Into<String>, now: Instant) {
        self.dispatch(GameEvent::InputChanged(text.into()), now);
    }

    /// Fire every timer due at `now`, earliest first.
    /// Returns whether anything fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut fired = false;
        while let Some((due, event)) = self.timers.pop_due(now) {
            fired = true;
            self.dispatch(event, due);
        }
        fired
    }

    /// When `tick` next has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn dispatch(&mut self, event: GameEvent, now: Instant) {
        self.queue.push_back(event);

        while let Some(event) = self.queue.pop_front() {
            tracing::trace!(?event, "dispatch");
            let transition = self.state.apply(event, &self.config, &mut self.rng);
            self.state = transition.state;

            for command in transition.commands {
                match command {
                    Command::Dispatch(next) => self.queue.push_back(next),
                    Command::Schedule { after, event } => self.timers.schedule(now + after, event),
                }
            }
        }
    }
}
