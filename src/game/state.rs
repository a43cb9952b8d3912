//! Game state and transitions
//!
//! `GameState::apply` is a pure function of the current state, one event,
//! the configuration and a random source. It returns the next state plus
//! any follow-up commands; the controller owns scheduling.
//!
//! Generations: every load or discard bumps `generation`. A session is
//! stamped with the generation of the load that created it, and delayed
//! events carry that stamp, so an event meant for a replaced session
//! matches nothing and is dropped.

use super::config::GameConfig;
use super::errors::{GameError, CHOOSE_NEW_PHASE};
use super::events::{Command, GameEvent};
use super::feedback::{Feedback, CORRECT_MESSAGE, GAME_OVER_MESSAGE};
use super::matching::{fisher_yates, is_match, normalize, remaining_count};
use super::session::Session;
use super::status::GameStatus;
use crate::catalog::Phase;
use rand::Rng;
use std::sync::Arc;

/// Everything the presentation layer observes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameState {
    status: GameStatus,
    selection: Option<Arc<Phase>>,
    session: Option<Session>,
    error_message: Option<String>,
    feedback: Option<Feedback>,
    generation: u64,
    feedback_seq: u64,
}

/// Result of applying one event
#[derive(Debug)]
pub struct Transition {
    pub state: GameState,
    pub commands: Vec<Command>,
}

impl Transition {
    fn to(state: GameState) -> Self {
        Transition {
            state,
            commands: Vec::new(),
        }
    }

    fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selection(&self) -> Option<&Phase> {
        self.selection.as_deref()
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, Session::score)
    }

    pub fn typed_text(&self) -> &str {
        self.session.as_ref().map_or("", Session::typed_text)
    }

    /// Active sentence while a session is shown
    pub fn current_target(&self) -> Option<&str> {
        match (&self.session, self.status) {
            (Some(session), GameStatus::Playing | GameStatus::WordCompleted) => {
                Some(session.current_target())
            }
            _ => None,
        }
    }

    /// Sentences left, not counting the active one until it is completed
    pub fn remaining(&self) -> usize {
        self.session.as_ref().map_or(0, |s| {
            remaining_count(
                s.len(),
                s.current_index(),
                self.status == GameStatus::WordCompleted,
            )
        })
    }

    /// Apply one event
    pub fn apply<R: Rng + ?Sized>(
        &self,
        event: GameEvent,
        config: &GameConfig,
        rng: &mut R,
    ) -> Transition {
        match event {
            GameEvent::SelectPhase(phase) => self.select_phase(phase, config),
            GameEvent::ClearSelection => self.clear_selection(),
            GameEvent::Start => self.start(),
            GameEvent::LoadCompleted { generation } => self.complete_load(generation, rng),
            GameEvent::InputChanged(text) => self.input_changed(text, config),
            GameEvent::AdvanceDue { generation } => self.advance(generation, config),
            GameEvent::FeedbackExpired { id } => self.expire_feedback(id),
        }
    }

    fn select_phase(&self, phase: Arc<Phase>, config: &GameConfig) -> Transition {
        tracing::info!(phase = phase.id, "phase selected");
        let state = GameState {
            status: GameStatus::Idle,
            selection: Some(phase),
            session: None,
            error_message: None,
            generation: self.generation + 1,
            ..self.clone()
        };

        let transition = Transition::to(state);
        if config.auto_start {
            transition.with(Command::Dispatch(GameEvent::Start))
        } else {
            transition
        }
    }

    fn clear_selection(&self) -> Transition {
        Transition::to(GameState {
            status: GameStatus::Idle,
            selection: None,
            session: None,
            error_message: Some(CHOOSE_NEW_PHASE.to_string()),
            generation: self.generation + 1,
            ..self.clone()
        })
    }

    fn start(&self) -> Transition {
        if !self.status.can_start() {
            tracing::debug!(status = ?self.status, "start ignored");
            return Transition::to(self.clone());
        }

        if self.selection.is_none() {
            tracing::warn!("start requested without a phase");
            return Transition::to(GameState {
                status: GameStatus::Idle,
                session: None,
                error_message: Some(GameError::NoPhaseSelected.to_string()),
                ..self.clone()
            });
        }

        let generation = self.generation + 1;
        Transition::to(GameState {
            status: GameStatus::LoadingWords,
            session: None,
            error_message: None,
            generation,
            ..self.clone()
        })
        .with(Command::Dispatch(GameEvent::LoadCompleted { generation }))
    }

    fn complete_load<R: Rng + ?Sized>(&self, generation: u64, rng: &mut R) -> Transition {
        if self.status != GameStatus::LoadingWords || generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale load dropped");
            return Transition::to(self.clone());
        }

        let Some(phase) = self.selection.as_ref() else {
            return Transition::to(GameState {
                status: GameStatus::Idle,
                error_message: Some(GameError::NoPhaseSelected.to_string()),
                ..self.clone()
            });
        };

        let mut targets: Vec<String> = phase.sentences.iter().map(|s| normalize(s)).collect();
        fisher_yates(&mut targets, rng);

        match Session::new(generation, targets) {
            Some(session) => {
                tracing::info!(
                    phase = phase.id,
                    sentences = session.len(),
                    generation,
                    "session started"
                );
                Transition::to(GameState {
                    status: GameStatus::Playing,
                    session: Some(session),
                    error_message: None,
                    feedback: None,
                    ..self.clone()
                })
            }
            None => {
                tracing::warn!(phase = phase.id, "selected phase has no sentences");
                Transition::to(GameState {
                    status: GameStatus::Error,
                    session: None,
                    error_message: Some(GameError::EmptyPhase.to_string()),
                    ..self.clone()
                })
            }
        }
    }

    fn input_changed(&self, text: String, config: &GameConfig) -> Transition {
        let session = match &self.session {
            Some(session) if self.status.accepts_input() => session.clone(),
            _ => {
                tracing::debug!(status = ?self.status, "input ignored");
                return Transition::to(self.clone());
            }
        };

        let matched = is_match(&text, session.current_target());
        let session = session.with_typed_text(text);

        if !matched {
            return Transition::to(GameState {
                session: Some(session),
                ..self.clone()
            });
        }

        let session = session.completed();
        let generation = session.generation();
        tracing::info!(
            index = session.current_index(),
            score = session.score(),
            "sentence completed"
        );

        let feedback_id = self.feedback_seq + 1;
        Transition::to(GameState {
            status: GameStatus::WordCompleted,
            session: Some(session),
            feedback: Some(Feedback::new(feedback_id, CORRECT_MESSAGE)),
            feedback_seq: feedback_id,
            ..self.clone()
        })
        .with(Command::Schedule {
            after: config.advance_delay,
            event: GameEvent::AdvanceDue { generation },
        })
        .with(Command::Schedule {
            after: config.feedback_duration,
            event: GameEvent::FeedbackExpired { id: feedback_id },
        })
    }

    fn advance(&self, generation: u64, config: &GameConfig) -> Transition {
        let session = match (&self.session, self.status) {
            (Some(session), GameStatus::WordCompleted) if session.generation() == generation => {
                session.clone()
            }
            _ => {
                tracing::debug!(generation, current = self.generation, "stale advance dropped");
                return Transition::to(self.clone());
            }
        };

        if session.is_last() {
            tracing::info!(score = session.score(), "game over");
            let feedback_id = self.feedback_seq + 1;
            return Transition::to(GameState {
                status: GameStatus::GameOver,
                session: Some(session),
                feedback: Some(Feedback::new(feedback_id, GAME_OVER_MESSAGE)),
                feedback_seq: feedback_id,
                ..self.clone()
            })
            .with(Command::Schedule {
                after: config.feedback_duration,
                event: GameEvent::FeedbackExpired { id: feedback_id },
            });
        }

        Transition::to(GameState {
            status: GameStatus::Playing,
            session: Some(session.advanced()),
            feedback: None,
            ..self.clone()
        })
    }

    fn expire_feedback(&self, id: u64) -> Transition {
        match &self.feedback {
            Some(feedback) if feedback.id == id => Transition::to(GameState {
                feedback: None,
                ..self.clone()
            }),
            _ => Transition::to(self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn phase(sentences: &[&str]) -> Arc<Phase> {
        Arc::new(Phase::new(
            1,
            "test",
            sentences.iter().map(|s| s.to_string()).collect(),
        ))
    }

    fn manual() -> GameConfig {
        GameConfig {
            auto_start: false,
            ..GameConfig::default()
        }
    }

    /// Apply an event and follow `Dispatch` commands, returning scheduled ones
    fn run(state: &GameState, event: GameEvent, rng: &mut StdRng) -> (GameState, Vec<Command>) {
        let config = manual();
        let mut state = state.clone();
        let mut pending = vec![event];
        let mut scheduled = Vec::new();
        while let Some(event) = pending.pop() {
            let t = state.apply(event, &config, rng);
            state = t.state;
            for command in t.commands {
                match command {
                    Command::Dispatch(e) => pending.insert(0, e),
                    other => scheduled.push(other),
                }
            }
        }
        (state, scheduled)
    }

    fn playing(sentences: &[&str]) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(3);
        let (state, _) = run(&GameState::new(), GameEvent::SelectPhase(phase(sentences)), &mut rng);
        let (state, _) = run(&state, GameEvent::Start, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.status(), GameStatus::Idle);
        assert!(state.selection().is_none());
        assert_eq!(state.remaining(), 0);
        assert_eq!(state.current_target(), None);
    }

    #[test]
    fn test_select_without_auto_start_stays_idle() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = GameState::new().apply(GameEvent::SelectPhase(phase(&["a"])), &manual(), &mut rng);
        assert_eq!(t.state.status(), GameStatus::Idle);
        assert_eq!(t.state.selection().map(|p| p.id), Some(1));
        assert!(t.commands.is_empty());
    }

    #[test]
    fn test_select_with_auto_start_dispatches_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = GameState::new().apply(
            GameEvent::SelectPhase(phase(&["a"])),
            &GameConfig::default(),
            &mut rng,
        );
        assert_eq!(t.state.status(), GameStatus::Idle);
        assert_eq!(t.commands, vec![Command::Dispatch(GameEvent::Start)]);
    }

    #[test]
    fn test_start_enters_loading() {
        let mut rng = StdRng::seed_from_u64(1);
        let (state, _) = run(&GameState::new(), GameEvent::SelectPhase(phase(&["a"])), &mut rng);
        let t = state.apply(GameEvent::Start, &manual(), &mut rng);
        assert_eq!(t.state.status(), GameStatus::LoadingWords);
        assert_eq!(
            t.commands,
            vec![Command::Dispatch(GameEvent::LoadCompleted {
                generation: t.state.generation()
            })]
        );
    }

    #[test]
    fn test_start_without_selection() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..3 {
            let t = GameState::new().apply(GameEvent::Start, &manual(), &mut rng);
            assert_eq!(t.state.status(), GameStatus::Idle);
            assert!(t.state.error_message().is_some());
            assert!(t.commands.is_empty());
        }
    }

    #[test]
    fn test_empty_phase_is_error() {
        let (state, _) = playing(&[]);
        assert_eq!(state.status(), GameStatus::Error);
        assert_eq!(
            state.error_message(),
            Some(GameError::EmptyPhase.to_string().as_str())
        );
        assert_eq!(state.score(), 0);
        assert!(state.session().is_none());
    }

    #[test]
    fn test_load_lowercases_and_permutes() {
        let (state, _) = playing(&["Hi There", "Good Job", "Big Dog"]);
        assert_eq!(state.status(), GameStatus::Playing);
        let session = state.session().unwrap();
        let mut targets = session.target_sentences().to_vec();
        targets.sort();
        assert_eq!(targets, vec!["big dog", "good job", "hi there"]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.typed_text(), "");
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_partial_input_keeps_playing() {
        let (state, mut rng) = playing(&["the cat sat"]);
        let (state, scheduled) = run(&state, GameEvent::InputChanged("the cat sa".into()), &mut rng);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.typed_text(), "the cat sa");
        assert_eq!(state.score(), 0);
        assert!(scheduled.is_empty());
    }

    #[test]
    fn test_case_insensitive_completion() {
        let (state, mut rng) = playing(&["the cat sat"]);
        let (state, scheduled) =
            run(&state, GameEvent::InputChanged("The Cat Sat".into()), &mut rng);
        assert_eq!(state.status(), GameStatus::WordCompleted);
        assert_eq!(state.score(), 1);
        assert_eq!(state.feedback().map(|f| f.message.as_str()), Some(CORRECT_MESSAGE));
        let generation = state.session().unwrap().generation();
        assert!(scheduled.contains(&Command::Schedule {
            after: manual().advance_delay,
            event: GameEvent::AdvanceDue { generation },
        }));
    }

    #[test]
    fn test_input_ignored_while_completed() {
        let (state, mut rng) = playing(&["ab", "cd"]);
        let target = state.current_target().unwrap().to_string();
        let (state, _) = run(&state, GameEvent::InputChanged(target.clone()), &mut rng);
        let (after, scheduled) = run(&state, GameEvent::InputChanged("zzz".into()), &mut rng);
        assert_eq!(after, state);
        assert!(scheduled.is_empty());
        assert_eq!(after.typed_text(), target);
    }

    #[test]
    fn test_advance_to_next_sentence() {
        let (state, mut rng) = playing(&["ab", "cd"]);
        let target = state.current_target().unwrap().to_string();
        let (state, _) = run(&state, GameEvent::InputChanged(target), &mut rng);
        assert_eq!(state.remaining(), 2);
        let generation = state.generation();
        let (state, _) = run(&state, GameEvent::AdvanceDue { generation }, &mut rng);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.session().unwrap().current_index(), 1);
        assert_eq!(state.typed_text(), "");
        assert!(state.feedback().is_none());
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_last_sentence_ends_game() {
        let (state, mut rng) = playing(&["ab"]);
        let (state, _) = run(&state, GameEvent::InputChanged("AB".into()), &mut rng);
        let generation = state.generation();
        let (state, scheduled) = run(&state, GameEvent::AdvanceDue { generation }, &mut rng);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.score(), 1);
        assert_eq!(state.feedback().map(|f| f.message.as_str()), Some(GAME_OVER_MESSAGE));
        assert_eq!(scheduled.len(), 1);
    }

    #[test]
    fn test_stale_advance_dropped_after_reselect() {
        let (state, mut rng) = playing(&["ab", "cd"]);
        let target = state.current_target().unwrap().to_string();
        let (state, _) = run(&state, GameEvent::InputChanged(target), &mut rng);
        let old_generation = state.generation();

        let (state, _) = run(&state, GameEvent::SelectPhase(phase(&["xy", "zw"])), &mut rng);
        let (state, _) = run(&state, GameEvent::Start, &mut rng);
        assert_eq!(state.status(), GameStatus::Playing);

        let (after, _) = run(
            &state,
            GameEvent::AdvanceDue {
                generation: old_generation,
            },
            &mut rng,
        );
        assert_eq!(after, state);
        assert_eq!(after.session().unwrap().current_index(), 0);
    }

    #[test]
    fn test_stale_load_dropped() {
        let (state, mut rng) = playing(&["ab"]);
        let (after, _) = run(&state, GameEvent::LoadCompleted { generation: 0 }, &mut rng);
        assert_eq!(after, state);
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let (state, mut rng) = playing(&["ab"]);
        let (after, _) = run(&state, GameEvent::Start, &mut rng);
        assert_eq!(after, state);
    }

    #[test]
    fn test_restart_after_game_over_resets_score() {
        let (state, mut rng) = playing(&["ab"]);
        let (state, _) = run(&state, GameEvent::InputChanged("ab".into()), &mut rng);
        let generation = state.generation();
        let (state, _) = run(&state, GameEvent::AdvanceDue { generation }, &mut rng);
        assert_eq!(state.status(), GameStatus::GameOver);

        let (state, _) = run(&state, GameEvent::Start, &mut rng);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.score(), 0);
        assert!(state.generation() > generation);
    }

    #[test]
    fn test_clear_selection() {
        let (state, mut rng) = playing(&["ab"]);
        let (state, _) = run(&state, GameEvent::ClearSelection, &mut rng);
        assert_eq!(state.status(), GameStatus::Idle);
        assert!(state.selection().is_none());
        assert_eq!(state.error_message(), Some(CHOOSE_NEW_PHASE));

        let (state, _) = run(&state, GameEvent::Start, &mut rng);
        assert_eq!(state.status(), GameStatus::Idle);
    }

    #[test]
    fn test_feedback_expiry_matches_id() {
        let (state, mut rng) = playing(&["ab", "cd"]);
        let target = state.current_target().unwrap().to_string();
        let (state, _) = run(&state, GameEvent::InputChanged(target), &mut rng);
        let id = state.feedback().unwrap().id;

        let (same, _) = run(&state, GameEvent::FeedbackExpired { id: id + 1 }, &mut rng);
        assert!(same.feedback().is_some());
        let (cleared, _) = run(&state, GameEvent::FeedbackExpired { id }, &mut rng);
        assert!(cleared.feedback().is_none());
        assert_eq!(cleared.status(), GameStatus::WordCompleted);
    }
}
