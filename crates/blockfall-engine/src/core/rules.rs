//! Collision rules.
//!
//! Every predicate here is a pure function of a block set, the board
//! dimensions, and the settled blocks. Nothing is mutated and no board object
//! is consulted, so a rotation preview can reuse the same checks on a cloned
//! piece.
//!
//! The move predicates only guard the edge the piece is moving towards and
//! never look at `y < 0`; [`fits`] (used for rotation) bounds `x` on both
//! sides and `y` from below only, so rotating above the top edge is allowed.

use crate::InvalidDimensions;

use super::block::Block;

/// Size of the playfield in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    height: i32,
    width: i32,
}

impl Dimensions {
    /// Validates that both dimensions are positive.
    pub const fn new(height: i32, width: i32) -> Result<Self, InvalidDimensions> {
        if height <= 0 || width <= 0 {
            return Err(InvalidDimensions { height, width });
        }
        Ok(Self { height, width })
    }

    #[must_use]
    pub const fn height(self) -> i32 {
        self.height
    }

    #[must_use]
    pub const fn width(self) -> i32 {
        self.width
    }

    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }
}

fn is_settled<S>(settled: &[Block<S>], x: i32, y: i32) -> bool {
    settled.iter().any(|block| block.is_at(x, y))
}

/// Returns whether every block can drop one row.
pub fn can_move_down<S>(blocks: &[Block<S>], dims: Dimensions, settled: &[Block<S>]) -> bool {
    blocks.iter().all(|block| {
        let (x, y) = block.position();
        y < dims.height() - 1 && !is_settled(settled, x, y + 1)
    })
}

/// Returns whether every block can shift one column to the right.
pub fn can_move_right<S>(blocks: &[Block<S>], dims: Dimensions, settled: &[Block<S>]) -> bool {
    blocks.iter().all(|block| {
        let (x, y) = block.position();
        x < dims.width() - 1 && !is_settled(settled, x + 1, y)
    })
}

/// Returns whether every block can shift one column to the left.
pub fn can_move_left<S>(blocks: &[Block<S>], settled: &[Block<S>]) -> bool {
    blocks.iter().all(|block| {
        let (x, y) = block.position();
        x > 0 && !is_settled(settled, x - 1, y)
    })
}

/// Returns whether the blocks may occupy their current cells.
///
/// Cells above the board (`y < 0`) are accepted.
pub fn fits<S>(blocks: &[Block<S>], dims: Dimensions, settled: &[Block<S>]) -> bool {
    blocks.iter().all(|block| {
        let (x, y) = block.position();
        0 <= x && x < dims.width() && y < dims.height() && !is_settled(settled, x, y)
    })
}
