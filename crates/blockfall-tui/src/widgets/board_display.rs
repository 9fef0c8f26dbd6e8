use std::collections::BTreeMap;

use blockfall_engine::{Block, Dimensions};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::{theme::CellStyle, widgets::BlockDisplay};

/// The playfield: settled blocks and the active piece over an empty grid.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    dims: Dimensions,
    cells: BTreeMap<(i32, i32), CellStyle>,
    background: CellStyle,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(dims: Dimensions, background: CellStyle) -> Self {
        Self {
            dims,
            cells: BTreeMap::new(),
            background,
            block: None,
        }
    }

    /// Paints `blocks` onto the grid.
    ///
    /// When two blocks share a cell the one painted first stays visible.
    /// Blocks outside the board, such as the part of a piece above the top
    /// edge, are not drawn.
    pub fn blocks<'b, I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = &'b Block<CellStyle>>,
    {
        for block in blocks {
            let (x, y) = block.position();
            if !self.dims.contains(x, y) {
                continue;
            }
            self.cells.entry((x, y)).or_insert(*block.style());
        }
        self
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::outer_size(self.dims, self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        Self::outer_size(self.dims, self.block.as_ref()).1
    }

    /// Columns and rows a board of `dims` takes inside `block`, saturating
    /// at `u16::MAX`.
    pub fn outer_size(dims: Dimensions, block: Option<&BlockWidget>) -> (u16, u16) {
        let columns = super::cells(dims.width())
            .saturating_mul(BlockDisplay::width())
            .saturating_add(super::block_horizontal_margin(block));
        let rows = super::cells(dims.height())
            .saturating_mul(BlockDisplay::height())
            .saturating_add(super::block_vertical_margin(block));
        (columns, rows)
    }
}


impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.dims.width()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.dims.height()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (y, grid_row) in (0..).zip(grid_rows) {
            for (x, grid_cell) in (0..).zip(grid_row) {
                let cell = self.cells.get(&(x, y)).copied();
                BlockDisplay::from_cell(cell.unwrap_or(self.background)).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Style;

    use super::*;

    fn cell(symbol: &'static str) -> CellStyle {
        CellStyle::new(Style::new(), symbol)
    }

    fn symbols(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_size_includes_border() {
        let dims = Dimensions::new(20, 10).unwrap();
        let board = BoardDisplay::new(dims, cell(".")).block(BlockWidget::bordered());
        assert_eq!((board.width(), board.height()), (22, 22));
    }

    #[test]
    fn test_size_saturates_for_huge_boards() {
        let dims = Dimensions::new(20, 40_000).unwrap();
        let block = BlockWidget::bordered();
        assert_eq!(BoardDisplay::outer_size(dims, Some(&block)), (u16::MAX, 22));

        let dims = Dimensions::new(i32::MAX, i32::MAX).unwrap();
        let board = BoardDisplay::new(dims, cell(".")).blocks(&[Block::new(3, 3, cell("a"))]);
        assert_eq!((board.width(), board.height()), (u16::MAX, u16::MAX));
    }

    #[test]
    fn test_render_blocks_over_background() {
        let dims = Dimensions::new(2, 3).unwrap();
        let blocks = [
            Block::new(1, 0, cell("a")),
            Block::new(1, 0, cell("b")),
            Block::new(2, 1, cell("c")),
            Block::new(0, -1, cell("d")),
        ];
        let board = BoardDisplay::new(dims, cell(".")).blocks(&blocks);

        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        board.render(buf.area, &mut buf);

        assert_eq!(symbols(&buf, 0), ". a . ");
        assert_eq!(symbols(&buf, 1), ". . c ");
    }
}
