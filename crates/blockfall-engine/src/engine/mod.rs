//! Game engine logic and state management.
//!
//! This module ties the core geometry together into a playable game:
//!
//! - [`Board`] - Settled blocks and the line-clear pass
//! - [`GameStats`] - Score, level and line counters
//! - [`GameConfig`] - Board size, spawn point and timing
//! - [`PieceFactory`] - Seeded, uniformly random piece construction
//! - [`PieceQueue`] - Fixed-length lookahead of upcoming pieces
//! - [`Session`] - Single-threaded game state driven by explicit timestamps
//! - [`Game`] - The real-time loop that connects a [`Session`] to a [`Ui`](crate::Ui)
//!
//! # Game Flow
//!
//! 1. [`Game::run`] asks the user interface for block styles and builds a
//!    [`Session`]
//! 2. Every gravity tick moves the active piece down one row, or settles it
//!    once it has been grounded for the grace period
//! 3. Completed rows are removed and the rows above collapse
//! 4. The game is over once a settled block reaches the top row
//! 5. The loop runs until a stop key or a [`StopHandle`] ends it
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Game, GameConfig, KeyPress, MockUi};
//!
//! let (ui, probe) = MockUi::new();
//! let game = Game::new(ui, GameConfig::default()).unwrap();
//! probe.send_key(KeyPress::Stop);
//!
//! let stats = game.run().unwrap();
//! assert_eq!(stats.score(), 0);
//! assert_eq!(probe.stop_calls(), 1);
//! ```

pub use self::{
    board::*, config::*, game::*, game_stats::*, piece_factory::*, piece_queue::*, session::*,
};

mod board;
mod config;
mod game;
mod game_stats;
mod piece_factory;
mod piece_queue;
mod session;
