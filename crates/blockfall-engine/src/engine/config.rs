use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{Dimensions, ShapeKind, ShapeStyle, Tetromino},
};

use super::game_stats::MAX_LEVEL;

/// Board geometry and timing of a game.
///
/// Durations are stored in milliseconds so a configuration file stays
/// readable. Any field missing from a file falls back to its default.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "board_height": 24 }"#).unwrap();
/// assert_eq!(config.board_height, 24);
/// assert_eq!(config.board_width, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_height: i32,
    pub board_width: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// Number of upcoming pieces kept in the lookahead queue.
    pub queue_size: usize,
    /// Gravity interval at level 0.
    pub base_gravity_ms: u64,
    /// Amount the gravity interval shrinks per level.
    pub gravity_step_ms: u64,
    /// How long a grounded piece may still be moved before it settles.
    pub grace_period_ms: u64,
    /// Wake-up interval while paused or after game over.
    pub pause_poll_ms: u64,
    /// Pause between removing a completed row and collapsing the rows above.
    pub collapse_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_height: 20,
            board_width: 10,
            spawn_x: 5,
            spawn_y: 0,
            queue_size: 5,
            base_gravity_ms: 500,
            gravity_step_ms: 20,
            grace_period_ms: 500,
            pause_poll_ms: 100,
            collapse_delay_ms: 100,
        }
    }
}

impl GameConfig {
    /// Checks every constraint a game relies on and returns the board size.
    pub fn validate(&self) -> Result<Dimensions, ConfigError> {
        let dims = self.dimensions()?;
        if self.queue_size == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if !dims.contains(self.spawn_x, self.spawn_y) {
            return Err(ConfigError::SpawnOutsideBoard {
                x: self.spawn_x,
                y: self.spawn_y,
            });
        }
        self.check_spawned_pieces(dims)?;
        let max_step = self.gravity_step_ms.saturating_mul(MAX_LEVEL as u64);
        if self.base_gravity_ms <= max_step {
            return Err(ConfigError::GravityTooFast {
                max_level: MAX_LEVEL,
            });
        }
        Ok(dims)
    }

    /// Every block of every freshly spawned piece must lie within the board
    /// columns and above the floor. Blocks above the top edge are allowed.
    fn check_spawned_pieces(&self, dims: Dimensions) -> Result<(), ConfigError> {
        let anchor = (self.spawn_x, self.spawn_y);
        for kind in ShapeKind::ALL {
            let piece = Tetromino::spawn(kind, anchor, &ShapeStyle::Uniform(()));
            let outside = piece
                .blocks()
                .iter()
                .find(|block| !dims.contains(block.x(), block.y().max(0)));
            if let Some(block) = outside {
                return Err(ConfigError::PieceOutsideBoard {
                    kind,
                    x: block.x(),
                    y: block.y(),
                });
            }
        }
        Ok(())
    }

    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions::new(self.board_height, self.board_width)?)
    }

    /// Time between gravity steps at `level`.
    #[must_use]
    pub fn gravity_interval(&self, level: usize) -> Duration {
        let level = level.min(MAX_LEVEL) as u64;
        let step = self.gravity_step_ms.saturating_mul(level);
        Duration::from_millis(self.base_gravity_ms.saturating_sub(step))
    }

    #[must_use]
    pub const fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    #[must_use]
    pub const fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms)
    }

    #[must_use]
    pub const fn collapse_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_delay_ms)
    }
}
