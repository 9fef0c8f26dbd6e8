use std::iter;

use blockfall_engine::Tetromino;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::{
    theme::CellStyle,
    widgets::{BlockDisplay, PieceDisplay},
};

const GAP: u16 = 1;

/// The upcoming pieces, front of the queue on top.
#[derive(Debug)]
pub struct PieceStackDisplay<'a> {
    pieces: Vec<PieceDisplay<'a>>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceStackDisplay<'a> {
    pub fn new<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = &'a Tetromino<CellStyle>>,
    {
        Self {
            pieces: pieces
                .into_iter()
                .map(|piece| PieceDisplay::new().piece(piece))
                .collect(),
            block: None,
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

    pub fn height(&self) -> u16 {
        let gaps = super::cells(self.pieces.len().saturating_sub(1)) * GAP;
        self.pieces
            .iter()
            .map(PieceDisplay::height)
            .fold(gaps, u16::saturating_add)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceStackDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceStackDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let layout = Layout::vertical(
            self.pieces
                .iter()
                .map(|piece| Constraint::Length(piece.height())),
        )
        .spacing(GAP);
        let cells = area.layout_vec(&layout);

        for (cell, piece) in iter::zip(cells, &self.pieces) {
            piece.render(cell, buf);
        }
    }
}
