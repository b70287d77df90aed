//! Presentation layer handling terminal UI and user input.
//!
//! This module renders the wizard using ratatui and maps key presses to
//! operations on the application state.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
