//! The boundary between the engine and a front end.
//!
//! A front end implements [`Ui`]: it picks the style tokens for each shape,
//! draws every [`Snapshot`] it receives and feeds [`KeyPress`] events into a
//! bounded queue created with [`channel`].

use crate::{
    core::{Block, BlockStyles, Dimensions, Tetromino},
    engine::{GameStats, PieceQueue},
};

pub use self::{input::*, mock::*};

pub mod input;
mod mock;

/// Commands a player can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPress {
    /// Rotate the active piece.
    Up,
    /// Move the active piece down one row.
    Down,
    Left,
    Right,
    /// Toggle pause.
    Pause,
    /// End the game loop.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Status {
    Running,
    Paused,
    GameOver,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum UiError {
    #[display("terminal I/O failed: {_0}")]
    #[from]
    Io(std::io::Error),
    #[display("board of {width}x{height} cells does not fit a {columns}x{rows} terminal")]
    TooSmall {
        height: i32,
        width: i32,
        columns: u16,
        rows: u16,
    },
    #[display("key press stream was already taken")]
    InputTaken,
    #[display("key press stream closed before the game was stopped")]
    InputClosed,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug)]
pub struct Snapshot<'a, S> {
    pub dims: Dimensions,
    pub active: &'a Tetromino<S>,
    pub settled: &'a [Block<S>],
    pub queue: &'a PieceQueue<S>,
    pub stats: &'a GameStats,
    pub status: Status,
}

impl<S> Clone for Snapshot<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Snapshot<'_, S> {}

impl<'a, S> Snapshot<'a, S> {
    /// Active piece blocks followed by the settled blocks.
    pub fn blocks(&self) -> impl Iterator<Item = &'a Block<S>> + use<'a, S> {
        self.active.blocks().iter().chain(self.settled)
    }
}

/// A front end driven by [`Game`](crate::Game).
///
/// The game calls, in order: [`block_styles`](Self::block_styles) once,
/// [`init`](Self::init) once, [`key_presses`](Self::key_presses) once,
/// [`start`](Self::start) once, then [`update`](Self::update) after every
/// state change, and finally [`stop`](Self::stop) exactly once.
///
/// Dropping every sender of the key press queue while the game is running
/// ends it with [`UiError::InputClosed`].
pub trait Ui {
    /// Opaque token attached to every block. The engine never inspects it.
    type Style: Clone;

    fn init(&mut self, dims: Dimensions) -> Result<(), UiError>;

    fn block_styles(&self) -> BlockStyles<Self::Style>;

    fn update(&mut self, snapshot: &Snapshot<'_, Self::Style>) -> Result<(), UiError>;

    /// Hands out the receiving end of the input queue.
    ///
    /// Fails with [`UiError::InputTaken`] on the second call.
    fn key_presses(&mut self) -> Result<KeyReceiver, UiError>;

    fn start(&mut self) -> Result<(), UiError>;

    /// Releases resources and stops producing input. Must be idempotent.
    ///
    /// Returns the failure that ended input early, if any.
    fn stop(&mut self) -> Result<(), UiError>;
}

