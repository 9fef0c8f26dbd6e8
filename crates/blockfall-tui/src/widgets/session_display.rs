use std::iter;

use blockfall_engine::{Dimensions, GameStats, Snapshot, Status};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::{
    theme::{CellStyle, Theme},
    widgets::{
        BoardDisplay, KeyBindingDisplay, PieceStackDisplay, SessionStatsDisplay, color, style,
    },
};

const HORIZONTAL_PADDING: u16 = 1;
const COLUMN_SPACING: u16 = 1;

/// The whole game screen: statistics, board, upcoming pieces and key help.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a Snapshot<'a, CellStyle>,
    theme: Theme,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot<'a, CellStyle>, theme: Theme) -> Self {
        Self { snapshot, theme }
    }

    /// Smallest terminal, in columns and rows, that shows a board of `dims`.
    ///
    /// The upcoming pieces may be clipped at the bottom; everything else is
    /// drawn in full.
    #[must_use]
    pub fn min_size(dims: Dimensions) -> (u16, u16) {
        let (board_columns, board_rows) =
            BoardDisplay::outer_size(dims, Some(&Block::bordered()));
        let stats = GameStats::new();
        let stats = SessionStatsDisplay::new(&stats).block(panel_block(""));
        let stack = PieceStackDisplay::new(iter::empty()).block(panel_block(""));
        let columns = [board_columns, stack.width(), 2 * COLUMN_SPACING]
            .into_iter()
            .fold(stats.width(), u16::saturating_add);
        let rows = board_rows.max(stats.height()).saturating_add(1);
        (columns, rows)
    }

    fn border_color(&self) -> Color {
        match self.snapshot.status {
            Status::Running => color::WHITE,
            Status::Paused => color::YELLOW,
            Status::GameOver => color::RED,
        }
    }
}

fn panel_block(title: &str) -> Block<'_> {
    Block::bordered()
        .title(Line::from(title).centered())
        .padding(Padding::horizontal(HORIZONTAL_PADDING))
        .style(style::DEFAULT)
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let snapshot = self.snapshot;
        let border_style = self.border_color();

        let game_board = BoardDisplay::new(snapshot.dims, self.theme.background())
            .blocks(snapshot.blocks())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let piece_stack = PieceStackDisplay::new(snapshot.queue)
            .block(panel_block("NEXT").border_style(border_style));
        let session_stats = SessionStatsDisplay::new(snapshot.stats)
            .block(panel_block("STATS").border_style(border_style));
        let key_bindings = KeyBindingDisplay::for_status(snapshot.status);

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(piece_stack.width()),
        ])
        .flex(Flex::Center)
        .spacing(COLUMN_SPACING)
        .areas(main_area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [piece_stack_area] =
            Layout::vertical([Constraint::Length(piece_stack.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        piece_stack.render(piece_stack_area, buf);
        key_bindings.render(help_area, buf);

        let popup = match snapshot.status {
            Status::Running => None,
            Status::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            Status::GameOver => Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED))),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use blockfall_engine::{GameConfig, PieceSeed, Session};

    use super::*;

    fn screen(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(session: &Session<CellStyle>) -> Buffer {
        let (columns, rows) = SessionDisplay::min_size(session.dims());
        let mut buf = Buffer::empty(Rect::new(0, 0, columns, rows + 10));
        let snapshot = session.snapshot();
        SessionDisplay::new(&snapshot, Theme::Standard).render(buf.area, &mut buf);
        buf
    }

    fn session() -> Session<CellStyle> {
        Session::new(
            &GameConfig::default(),
            Theme::Standard.block_styles(),
            PieceSeed::from(1),
            Instant::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_min_size_for_default_board() {
        let dims = Dimensions::new(20, 10).unwrap();
        assert_eq!(SessionDisplay::min_size(dims), (24 + 22 + 12 + 2, 23));
    }

    #[test]
    fn test_min_size_saturates_for_huge_boards() {
        let dims = Dimensions::new(20, 40_000).unwrap();
        assert_eq!(SessionDisplay::min_size(dims), (u16::MAX, 23));
        let dims = Dimensions::new(70_000, 10).unwrap();
        assert_eq!(SessionDisplay::min_size(dims), (60, u16::MAX));
    }

    #[test]
    fn test_render_running_session() {
        let text = screen(&render(&session()));
        assert!(text.contains("STATS"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("SCORE:"));
        assert!(text.contains("Rotate"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn test_render_paused_popup() {
        let mut session = session();
        assert!(session.toggle_pause());
        let text = screen(&render(&session));
        assert!(text.contains("PAUSED"));
        assert!(text.contains("Resume"));
    }
}
