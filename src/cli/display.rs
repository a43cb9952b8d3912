//! Terminal display and UI rendering
//!
//! Features:
//! - Phase list with highlight and selection markers
//! - Target sentence with per-character color coding
//! - Score, remaining sentences and feedback banner
//! - Idle, error and game over screens

use super::app::App;
use crate::game::matching::{mark_chars, CharMark};
use crate::game::GameStatus;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{stdout, Stdout, Write};

const MASCOT: [&str; 4] = [r"   /\_/\  ", r"  ( o.o ) ", r"   > ^ <  ", r"  (\_ _/) "];

/// Terminal display manager
pub struct Display {
    /// Whether we're using alternate screen
    use_alternate_screen: bool,
}

impl Display {
    /// Create display on the alternate screen with a hidden cursor
    pub fn alternate() -> std::io::Result<Self> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Display {
            use_alternate_screen: true,
        })
    }

    /// Draw the whole screen for the current app state
    pub fn render(&self, app: &App) -> std::io::Result<()> {
        let mut out = stdout();
        queue!(out, terminal::Clear(ClearType::All))?;

        line(&mut out, 0, Color::Magenta, "KidType Challenge")?;
        let mut row = self.show_phases(&mut out, app, 2)? + 1;

        let state = app.state();
        row = match state.status() {
            GameStatus::LoadingWords => {
                line(&mut out, row, Color::Magenta, "Getting sentences...")?;
                row + 1
            }
            GameStatus::Error => self.show_error(&mut out, app, row)?,
            GameStatus::Idle => self.show_idle(&mut out, app, row)?,
            GameStatus::Playing | GameStatus::WordCompleted => self.show_play(&mut out, app, row)?,
            GameStatus::GameOver => self.show_game_over(&mut out, app, row)?,
        };

        if let Some(feedback) = state.feedback() {
            let color = match state.status() {
                GameStatus::WordCompleted | GameStatus::GameOver => Color::Green,
                _ => Color::Blue,
            };
            queue!(
                out,
                cursor::MoveTo(0, row + 1),
                SetForegroundColor(color),
                SetAttribute(Attribute::Bold),
                Print(format!("🎉 {}", feedback.message)),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }

        self.show_help(&mut out, app.typing_active(), row + 3)?;
        out.flush()
    }

    /// Phase menu; returns the next free row
    fn show_phases(&self, out: &mut Stdout, app: &App, top: u16) -> std::io::Result<u16> {
        line(out, top, Color::Cyan, "Learning Phases")?;

        if let Some(error) = app.catalog_error() {
            line(out, top + 1, Color::Red, &format!("Error: {error}"))?;
            line(out, top + 2, Color::DarkGrey, "Press L to reload phases")?;
            return Ok(top + 3);
        }

        let selected = app.state().selection().map(|p| p.id);
        let mut row = top + 1;
        for (i, phase) in app.phases().iter().enumerate() {
            let cursor_mark = if i == app.highlighted() { '>' } else { ' ' };
            let selected_mark = if Some(phase.id) == selected { '*' } else { ' ' };
            let color = if Some(phase.id) == selected {
                Color::Cyan
            } else {
                Color::White
            };
            line(
                out,
                row,
                color,
                &format!("{cursor_mark}{selected_mark} {}", phase.label()),
            )?;
            row += 1;
        }
        Ok(row)
    }

    fn show_idle(&self, out: &mut Stdout, app: &App, top: u16) -> std::io::Result<u16> {
        let row = mascot(out, top, Color::Yellow)?;
        let state = app.state();

        match state.selection() {
            Some(phase) => {
                line(out, row, Color::Blue, &format!("Phase {} Selected", phase.id))?;
                line(
                    out,
                    row + 1,
                    Color::White,
                    "Ready to type the selected sentences? Press S to start!",
                )?;
            }
            None => {
                line(out, row, Color::Blue, "KidType Challenge!")?;
                match state.error_message() {
                    Some(error) => line(out, row + 1, Color::Red, error)?,
                    None => line(out, row + 1, Color::White, "Please select a phase to begin.")?,
                }
            }
        }
        Ok(row + 2)
    }

    fn show_error(&self, out: &mut Stdout, app: &App, top: u16) -> std::io::Result<u16> {
        let state = app.state();
        line(out, top, Color::Red, "Oops! Something went wrong.")?;
        line(
            out,
            top + 1,
            Color::Red,
            state.error_message().unwrap_or("An error occurred."),
        )?;
        let retry = if state.selection().is_some() {
            "[S] Try Again"
        } else {
            "[S] Select Phase"
        };
        line(out, top + 2, Color::Yellow, retry)?;
        Ok(top + 3)
    }

    fn show_play(&self, out: &mut Stdout, app: &App, top: u16) -> std::io::Result<u16> {
        let state = app.state();
        let completed = state.status() == GameStatus::WordCompleted;

        queue!(
            out,
            cursor::MoveTo(0, top),
            SetForegroundColor(Color::Magenta),
            Print("Score: "),
            SetForegroundColor(Color::Red),
            Print(state.score()),
            ResetColor
        )?;

        let target = state.current_target().unwrap_or_default();
        queue!(out, cursor::MoveTo(0, top + 2))?;
        for (c, mark) in mark_chars(target, state.typed_text(), completed) {
            let color = match mark {
                CharMark::Matched => Color::Green,
                CharMark::Mismatched => Color::Red,
                CharMark::Pending => Color::DarkGrey,
            };
            queue!(out, SetForegroundColor(color), Print(c))?;
        }
        queue!(out, ResetColor)?;

        let input_color = if completed {
            Color::DarkGrey
        } else {
            Color::Yellow
        };
        line(
            out,
            top + 4,
            input_color,
            &format!("> {}", state.typed_text()),
        )?;
        line(
            out,
            top + 6,
            Color::DarkGrey,
            &format!("Sentences remaining: {}", state.remaining()),
        )?;
        Ok(top + 7)
    }

    fn show_game_over(&self, out: &mut Stdout, app: &App, top: u16) -> std::io::Result<u16> {
        let row = mascot(out, top, Color::Green)?;
        line(out, row, Color::Blue, "Awesome Typing!")?;
        line(
            out,
            row + 1,
            Color::White,
            &format!("Your final score is: {}", app.state().score()),
        )?;
        line(
            out,
            row + 3,
            Color::Yellow,
            "[R] Play Again With Same Phase   [C] Choose Different Phase",
        )?;
        Ok(row + 4)
    }

    /// Show help text
    fn show_help(&self, out: &mut Stdout, typing: bool, row: u16) -> std::io::Result<()> {
        let help = if typing {
            "Type the sentence  |  Up/Down + Enter to switch phase  |  Esc to exit"
        } else {
            "Up/Down + Enter to pick a phase  |  S start  |  C change phase  |  L reload  |  Esc to exit"
        };
        line(out, row, Color::DarkGrey, help)
    }

    /// Reset terminal state and cleanup
    pub fn shutdown(&self) -> std::io::Result<()> {
        let mut stdout = stdout();

        if self.use_alternate_screen {
            execute!(stdout, LeaveAlternateScreen, cursor::Show)?;
        }

        terminal::disable_raw_mode()
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}

fn line(out: &mut Stdout, row: u16, color: Color, text: &str) -> std::io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, row),
        SetForegroundColor(color),
        Print(text),
        ResetColor
    )
}

/// Returns the row below the mascot
fn mascot(out: &mut Stdout, top: u16, color: Color) -> std::io::Result<u16> {
    for (i, art) in MASCOT.iter().enumerate() {
        line(out, top + i as u16, color, art)?;
    }
    Ok(top + MASCOT.len() as u16 + 1)
}
