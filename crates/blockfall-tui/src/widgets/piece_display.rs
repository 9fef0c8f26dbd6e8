use blockfall_engine::Tetromino;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{theme::CellStyle, widgets::BlockDisplay};

/// A single piece drawn in its own bounding box, detached from the board.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a Tetromino<CellStyle>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a Tetromino<CellStyle>) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    /// Rows taken by the piece in its current rotation.
    pub fn height(&self) -> u16 {
        let rows = self.piece.map_or(0, |piece| bounds(piece).size().1);
        rows * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Default for PieceDisplay<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    fn size(self) -> (u16, u16) {
        (
            super::cells(self.max_x - self.min_x + 1),
            super::cells(self.max_y - self.min_y + 1),
        )
    }
}

fn bounds(piece: &Tetromino<CellStyle>) -> Bounds {
    let init = Bounds {
        min_x: i32::MAX,
        min_y: i32::MAX,
        max_x: i32::MIN,
        max_y: i32::MIN,
    };
    piece.blocks().iter().fold(init, |acc, block| Bounds {
        min_x: acc.min_x.min(block.x()),
        min_y: acc.min_y.min(block.y()),
        max_x: acc.max_x.max(block.x()),
        max_y: acc.max_y.max(block.y()),
    })
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let bounds = bounds(piece);
        let (columns, rows) = bounds.size();
        let piece_area = area.centered(
            Constraint::Length(columns * BlockDisplay::width()),
            Constraint::Length(rows * BlockDisplay::height()),
        );

        for block in piece.blocks() {
            let column = super::cells(block.x() - bounds.min_x);
            let row = super::cells(block.y() - bounds.min_y);
            let cell = Rect::new(
                piece_area.x + column * BlockDisplay::width(),
                piece_area.y + row * BlockDisplay::height(),
                BlockDisplay::width(),
                BlockDisplay::height(),
            )
            .intersection(area);
            if !cell.is_empty() {
                BlockDisplay::from_cell(*block.style()).render(cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{ShapeKind, ShapeStyle};
    use ratatui::style::Style;

    use super::*;

    fn piece(kind: ShapeKind) -> Tetromino<CellStyle> {
        let style = ShapeStyle::PerBlock(
            ["0", "1", "2", "3"].map(|symbol| CellStyle::new(Style::new(), symbol)),
        );
        Tetromino::spawn(kind, (5, 0), &style)
    }

    #[test]
    fn test_height_follows_rotation() {
        let mut i = piece(ShapeKind::I);
        assert_eq!(PieceDisplay::new().piece(&i).height(), 1);
        i.rotate();
        assert_eq!(PieceDisplay::new().piece(&i).height(), 4);
        assert_eq!(PieceDisplay::new().height(), 0);
    }

    #[test]
    fn test_render_normalizes_position() {
        let o = piece(ShapeKind::O);
        let display = PieceDisplay::new().piece(&o);
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        display.render(buf.area, &mut buf);

        let drawn: usize = (0..2)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter(|&pos| buf[pos].symbol() != " ")
            .count();
        assert_eq!(drawn, 4);
        // the 2x2 piece is centered in the 8 column area
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_ne!(buf[(2, 0)].symbol(), " ");
        assert_ne!(buf[(4, 1)].symbol(), " ");
    }
}
