//! CLI Interface: Terminal input, rendering and the event loop
//!
//! # Components
//! - `input.rs`: Keystroke capture using crossterm
//! - `display.rs`: Terminal rendering and UI
//! - `app.rs`: Catalog + controller glue driven by UI commands

pub mod app;
pub mod display;
pub mod input;

pub use app::App;
pub use display::Display;
pub use input::InputHandler;
