use blockfall_engine::{BlockStyles, ShapeKind, ShapeStyle};
use ratatui::style::Style;

use crate::widgets::style;

/// How one board cell is painted: a style and the text drawn in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub style: Style,
    pub symbol: &'static str,
}

impl CellStyle {
    #[must_use]
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }
}

/// Visual theme of the terminal front end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Theme {
    /// Solid colored blocks on a dotted board.
    #[default]
    Standard,
    /// Every block shows its index within its piece, which makes rotation
    /// tables visible while playing.
    Dev,
}

const BLOCK_INDEX_SYMBOLS: [&str; 4] = ["0", "1", "2", "3"];

fn shape_style(kind: ShapeKind) -> Style {
    match kind {
        ShapeKind::O => style::O_BLOCK,
        ShapeKind::I => style::I_BLOCK,
        ShapeKind::S => style::S_BLOCK,
        ShapeKind::Z => style::Z_BLOCK,
        ShapeKind::L => style::L_BLOCK,
        ShapeKind::J => style::J_BLOCK,
        ShapeKind::T => style::T_BLOCK,
    }
}

impl Theme {
    #[must_use]
    pub fn block_styles(self) -> BlockStyles<CellStyle> {
        BlockStyles::from_fn(|kind| match self {
            Theme::Standard => ShapeStyle::Uniform(CellStyle::new(shape_style(kind), "")),
            Theme::Dev => {
                let style = shape_style(kind).fg(crate::widgets::color::BLACK);
                let cells = BLOCK_INDEX_SYMBOLS.map(|symbol| CellStyle::new(style, symbol));
                ShapeStyle::PerBlock(cells)
            }
        })
    }

    /// Style of an empty board cell.
    #[must_use]
    pub const fn background(self) -> CellStyle {
        match self {
            Theme::Standard => CellStyle::new(style::EMPTY_DOT, "."),
            Theme::Dev => CellStyle::new(style::EMPTY_DOT, "·"),
        }
    }
}
