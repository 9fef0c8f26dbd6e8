use crate::core::{Block, Dimensions};

/// Stage of a line clear reported to the observer of
/// [`Board::clear_completed_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LineClearPhase {
    /// The blocks of a completed row were removed; rows above have not moved.
    Removed,
    /// Every row above the removed one moved down by one.
    Collapsed,
}

/// The settled blocks of the playfield.
///
/// Blocks are kept in the order they settled. No two blocks share a cell.
#[derive(Debug, Clone)]
pub struct Board<S> {
    dims: Dimensions,
    blocks: Vec<Block<S>>,
}

impl<S> Board<S> {
    #[must_use]
    pub const fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            blocks: Vec::new(),
        }
    }

    /// Builds a board from already settled blocks, dropping duplicates.
    pub fn with_blocks(dims: Dimensions, blocks: impl IntoIterator<Item = Block<S>>) -> Self {
        let mut board = Self::new(dims);
        board.settle(blocks);
        board
    }

    #[must_use]
    pub const fn dims(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block<S>] {
        &self.blocks
    }

    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.blocks.iter().any(|block| block.is_at(x, y))
    }

    /// Adds blocks to the settled set.
    ///
    /// A block landing on an occupied cell is discarded so positions stay
    /// unique.
    pub fn settle(&mut self, blocks: impl IntoIterator<Item = Block<S>>) {
        for block in blocks {
            if !self.is_occupied(block.x(), block.y()) {
                self.blocks.push(block);
            }
        }
    }

    /// Returns whether any settled block sits in the top row or above it.
    #[must_use]
    pub fn reached_top(&self) -> bool {
        self.blocks.iter().any(|block| block.y() < 1)
    }

    #[must_use]
    pub fn is_row_complete(&self, y: i32) -> bool {
        (0..self.dims.width()).all(|x| self.is_occupied(x, y))
    }

    fn remove_row(&mut self, y: i32) {
        self.blocks.retain(|block| block.y() != y);
    }

    fn collapse_above(&mut self, y: i32) {
        for block in &mut self.blocks {
            if block.y() < y {
                block.move_down();
            }
        }
    }

    /// Removes every completed row and collapses the rows above it.
    ///
    /// Rows are scanned from the bottom up. After a collapse the same row is
    /// examined again, since the row that fell into it may be complete too.
    /// `on_change` observes the board after each removal and each collapse.
    ///
    /// Returns the number of rows cleared.
    pub fn clear_completed_lines(
        &mut self,
        mut on_change: impl FnMut(&Self, LineClearPhase),
    ) -> usize {
        let mut cleared = 0;
        let mut y = self.dims.height() - 1;
        while y >= 0 {
            if !self.is_row_complete(y) {
                y -= 1;
                continue;
            }
            cleared += 1;
            self.remove_row(y);
            on_change(self, LineClearPhase::Removed);
            self.collapse_above(y);
            on_change(self, LineClearPhase::Collapsed);
        }
        cleared
    }
}
