//! Terminal front end for the blockfall engine.
//!
//! [`TerminalUi`] implements [`blockfall_engine::Ui`] on top of ratatui and
//! crossterm. Key presses are read on a dedicated thread and forwarded to the
//! engine through its bounded key queue.

pub use self::{terminal_ui::*, theme::*};

mod input;
mod terminal_ui;
mod theme;
pub mod widgets;
