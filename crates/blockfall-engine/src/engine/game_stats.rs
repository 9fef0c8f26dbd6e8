/// Base points for line clears, multiplied by `level + 1`.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Clearing more than four lines at once scores nothing.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Highest reachable level.
pub const MAX_LEVEL: usize = 20;

/// Lines needed to advance one level.
const LINES_PER_LEVEL: usize = 10;

/// Game statistics tracking score, level, lines cleared and piece count.
///
/// # Scoring
///
/// Points are awarded per line-clear pass using the level in effect before
/// the cleared lines are counted. The level is then recomputed as
/// `min(20, lines / 10)`.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_line_clear(4);
///
/// assert_eq!(stats.score(), 1200);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[3], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    settled_pieces: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; 4],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            settled_pieces: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; 4],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level: one per ten lines, capped at [`MAX_LEVEL`].
    #[must_use]
    pub fn level(&self) -> usize {
        usize::min(MAX_LEVEL, self.cleared_lines / LINES_PER_LEVEL)
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns the number of pieces that have been settled on the board.
    #[must_use]
    pub const fn settled_pieces(&self) -> usize {
        self.settled_pieces
    }

    /// Returns how often 1, 2, 3 and 4 lines were cleared in one pass.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 4] {
        &self.line_cleared_counter
    }

    pub const fn record_settled_piece(&mut self) {
        self.settled_pieces += 1;
    }

    /// Updates score, lines and level after a line-clear pass.
    pub fn record_line_clear(&mut self, cleared_lines: usize) {
        if cleared_lines == 0 {
            return;
        }
        let base = SCORE_TABLE.get(cleared_lines).copied().unwrap_or(0);
        self.score += base * (self.level() + 1);
        self.cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines - 1) {
            *count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table_at_level_zero() {
        for (lines, expected) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
            let mut stats = GameStats::new();
            stats.record_line_clear(lines);
            assert_eq!(stats.score(), expected, "{lines} lines");
        }
    }

    #[test]
    fn test_score_scales_with_level() {
        let mut stats = GameStats::new();
        for _ in 0..5 {
            stats.record_line_clear(4);
        }
        assert_eq!(stats.level(), 2);
        let before = stats.score();
        stats.record_line_clear(1);
        assert_eq!(stats.score() - before, 120);
    }

    #[test]
    fn test_level_uses_previous_lines_for_score() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.record_line_clear(1);
        }
        assert_eq!(stats.level(), 0);
        stats.record_line_clear(1);
        assert_eq!(stats.score(), 400);
        assert_eq!(stats.level(), 1);
    }

    #[test]
    fn test_more_than_four_lines_scores_nothing() {
        let mut stats = GameStats::new();
        stats.record_line_clear(5);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.cleared_lines(), 5);
        assert_eq!(stats.line_cleared_counter(), &[0; 4]);
    }

    #[test]
    fn test_level_is_capped() {
        let mut stats = GameStats::new();
        for _ in 0..60 {
            stats.record_line_clear(4);
            assert_eq!(stats.level(), usize::min(20, stats.cleared_lines() / 10));
        }
        assert_eq!(stats.level(), MAX_LEVEL);
    }

    #[test]
    fn test_counters() {
        let mut stats = GameStats::new();
        stats.record_settled_piece();
        stats.record_settled_piece();
        stats.record_line_clear(0);
        stats.record_line_clear(2);
        stats.record_line_clear(2);
        stats.record_line_clear(3);
        assert_eq!(stats.settled_pieces(), 2);
        assert_eq!(stats.line_cleared_counter(), &[0, 2, 1, 0]);
        assert_eq!(stats.cleared_lines(), 7);
    }
}
