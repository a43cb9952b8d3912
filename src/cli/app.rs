//! Application glue: phase catalog, highlighted menu entry and the game
//! controller, driven by UI commands

use super::display::Display;
use super::input::{InputHandler, UiCommand};
use crate::catalog::{Phase, PhaseProvider};
use crate::game::{GameController, GameError, GameState};
use std::sync::Arc;
use std::time::Instant;

pub struct App {
    provider: Box<dyn PhaseProvider>,
    phases: Vec<Arc<Phase>>,
    catalog_error: Option<String>,
    highlighted: usize,
    controller: GameController,
}

impl App {
    /// Fetches the catalog once; later fetches only happen on request
    pub fn new(provider: Box<dyn PhaseProvider>, controller: GameController) -> Self {
        let mut app = App {
            provider,
            phases: Vec::new(),
            catalog_error: None,
            highlighted: 0,
            controller,
        };
        app.reload_catalog();
        app
    }

    pub fn reload_catalog(&mut self) {
        match self.provider.fetch_phases() {
            Ok(phases) => {
                self.phases = phases.into_iter().map(Arc::new).collect();
                self.catalog_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "phase catalog unavailable");
                self.phases.clear();
                self.catalog_error = Some(GameError::CatalogFetchFailed(e.to_string()).to_string());
            }
        }
        self.highlighted = self.highlighted.min(self.phases.len().saturating_sub(1));
    }

    pub fn phases(&self) -> &[Arc<Phase>] {
        &self.phases
    }

    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    /// The input box is on screen (it is disabled while a completion is shown)
    pub fn typing_active(&self) -> bool {
        self.state().status().in_session()
    }

    /// Apply one command. Returns false when the learner wants to quit.
    pub fn handle(&mut self, command: UiCommand, now: Instant) -> bool {
        match command {
            UiCommand::Quit => return false,
            UiCommand::Type(c) => {
                let mut text = self.state().typed_text().to_string();
                text.push(c);
                self.controller.input_changed(text, now);
            }
            UiCommand::Backspace => {
                let mut text = self.state().typed_text().to_string();
                if text.pop().is_some() {
                    self.controller.input_changed(text, now);
                }
            }
            UiCommand::HighlightPrev => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            UiCommand::HighlightNext => {
                if self.highlighted + 1 < self.phases.len() {
                    self.highlighted += 1;
                }
            }
            UiCommand::SelectHighlighted => {
                if let Some(phase) = self.phases.get(self.highlighted) {
                    // Enter inside the typing box must not restart the running phase
                    let same_phase = self.state().selection().map(|p| p.id) == Some(phase.id);
                    if !(self.typing_active() && same_phase) {
                        self.controller.select_phase(Arc::clone(phase), now);
                    }
                }
            }
            UiCommand::Start => self.controller.start(now),
            UiCommand::ChooseDifferentPhase => self.controller.clear_selection(now),
            UiCommand::ReloadCatalog => self.reload_catalog(),
        }
        true
    }

    /// Fire due timers; true if the state may have changed
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(now)
    }

    /// Event loop: render, read one key, fire timers
    pub fn run(&mut self, display: &Display, input: &InputHandler) -> std::io::Result<()> {
        let mut dirty = true;

        loop {
            if dirty {
                display.render(self)?;
                dirty = false;
            }

            let limit = self
                .controller
                .next_deadline()
                .map(|due| due.saturating_duration_since(Instant::now()));

            if let Some(key) = input.read_key(limit)? {
                if let Some(command) = InputHandler::to_command(&key, self.typing_active()) {
                    if !self.handle(command, Instant::now()) {
                        return Ok(());
                    }
                    dirty = true;
                }
            }

            if self.tick(Instant::now()) {
                dirty = true;
            }
        }
    }
}
