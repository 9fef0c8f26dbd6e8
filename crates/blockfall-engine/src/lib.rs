pub use self::{core::*, engine::*, ui::*};

pub mod core;
pub mod engine;
pub mod ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid board dimensions {height}x{width}: both must be positive")]
pub struct InvalidDimensions {
    pub height: i32,
    pub width: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("{_0}")]
    #[from]
    Dimensions(InvalidDimensions),
    #[display("lookahead queue must hold at least one piece")]
    EmptyQueue,
    #[display("spawn point ({x}, {y}) is outside the board")]
    SpawnOutsideBoard { x: i32, y: i32 },
    #[display("a freshly spawned {kind:?} piece has a block at ({x}, {y}) outside the board")]
    PieceOutsideBoard { kind: ShapeKind, x: i32, y: i32 },
    #[display("gravity interval must stay positive up to level {max_level}")]
    GravityTooFast { max_level: usize },
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    #[display("invalid game configuration: {_0}")]
    Config(ConfigError),
    #[display("user interface failed: {_0}")]
    Ui(UiError),
}
