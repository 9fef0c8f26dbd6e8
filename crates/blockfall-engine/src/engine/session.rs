use std::{
    mem,
    time::{Duration, Instant},
};

use crate::{
    ConfigError,
    core::{BlockStyles, Dimensions, Tetromino},
    ui::{Snapshot, Status},
};

use super::{
    board::{Board, LineClearPhase},
    config::GameConfig,
    game_stats::GameStats,
    piece_factory::{PieceConfig, PieceFactory, PieceSeed},
    piece_queue::PieceQueue,
};

/// Result of [`Session::step_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece is blocked and its grace period has not run out yet.
    Grounded,
    /// The piece settled and the next piece from the queue became active.
    Settled,
    /// Nothing happened because the game is paused or over.
    Ignored,
}

/// The state of one game.
///
/// A session never reads the clock itself: every time-dependent operation
/// takes the current [`Instant`], so it can be driven by the real-time
/// [`Game`](super::Game) loop or stepped deterministically.
///
/// # Grace period
///
/// A piece that cannot move down is not settled immediately. The grace timer
/// restarts whenever the piece moves down, a new piece becomes active, or a
/// lateral move or rotation leaves the piece still grounded. A blocked
/// downward step settles the piece once the timer has run for the grace
/// period.
#[derive(Debug, Clone)]
pub struct Session<S> {
    board: Board<S>,
    active: Tetromino<S>,
    queue: PieceQueue<S>,
    factory: PieceFactory<S>,
    stats: GameStats,
    status: Status,
    grace_period: Duration,
    grace_started: Instant,
}

impl<S> Session<S>
where
    S: Clone,
{
    pub fn new(
        config: &GameConfig,
        styles: BlockStyles<S>,
        seed: PieceSeed,
        now: Instant,
    ) -> Result<Self, ConfigError> {
        let dims = config.validate()?;
        let mut factory = PieceFactory::new(
            PieceConfig {
                spawn_x: config.spawn_x,
                spawn_y: config.spawn_y,
                styles,
            },
            seed,
        );
        let active = factory.random();
        let queue = PieceQueue::filled(config.queue_size, &mut factory);
        Ok(Self {
            board: Board::new(dims),
            active,
            queue,
            factory,
            stats: GameStats::new(),
            status: Status::Running,
            grace_period: config.grace_period(),
            grace_started: now,
        })
    }

    fn is_grounded(&self) -> bool {
        !self
            .active
            .can_move_down(self.board.dims(), self.board.blocks())
    }

    fn restart_grace_if_grounded(&mut self, now: Instant) {
        if self.is_grounded() {
            self.grace_started = now;
        }
    }

    /// Moves the active piece one column left if nothing blocks it.
    ///
    /// Returns whether the piece moved.
    pub fn try_move_left(&mut self, now: Instant) -> bool {
        if !self.status.is_running() || !self.active.can_move_left(self.board.blocks()) {
            return false;
        }
        self.active.move_left();
        self.restart_grace_if_grounded(now);
        true
    }

    /// Moves the active piece one column right if nothing blocks it.
    ///
    /// Returns whether the piece moved.
    pub fn try_move_right(&mut self, now: Instant) -> bool {
        if !self.status.is_running()
            || !self
                .active
                .can_move_right(self.board.dims(), self.board.blocks())
        {
            return false;
        }
        self.active.move_right();
        self.restart_grace_if_grounded(now);
        true
    }

    /// Rotates the active piece if the rotated piece fits.
    ///
    /// Returns whether the piece rotated.
    pub fn try_rotate(&mut self, now: Instant) -> bool {
        if !self.status.is_running()
            || !self
                .active
                .can_rotate(self.board.dims(), self.board.blocks())
        {
            return false;
        }
        self.active.rotate();
        self.restart_grace_if_grounded(now);
        true
    }

    /// Moves the active piece down one row, or settles it once its grace
    /// period has expired.
    pub fn step_down(&mut self, now: Instant) -> StepOutcome {
        if !self.status.is_running() {
            return StepOutcome::Ignored;
        }
        if !self.is_grounded() {
            self.active.move_down();
            self.grace_started = now;
            return StepOutcome::Moved;
        }
        if now.saturating_duration_since(self.grace_started) < self.grace_period {
            return StepOutcome::Grounded;
        }
        self.settle(now);
        StepOutcome::Settled
    }

    /// Moves the active piece onto the board and activates the next piece.
    fn settle(&mut self, now: Instant) {
        let next = self.queue.advance(&mut self.factory);
        let landed = mem::replace(&mut self.active, next);
        self.board.settle(landed.into_blocks());
        self.stats.record_settled_piece();
        self.grace_started = now;
    }

    #[cfg(test)]
    pub(crate) fn settle_blocks(
        &mut self,
        blocks: impl IntoIterator<Item = crate::core::Block<S>>,
    ) {
        self.board.settle(blocks);
    }

    /// Replaces the configuration used for pieces built from now on.
    pub fn set_piece_config(&mut self, config: PieceConfig<S>) {
        self.factory.set_config(config);
    }
}

impl<S> Session<S> {
    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.board.dims()
    }

    #[must_use]
    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    #[must_use]
    pub fn active(&self) -> &Tetromino<S> {
        &self.active
    }

    #[must_use]
    pub fn queue(&self) -> &PieceQueue<S> {
        &self.queue
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_, S> {
        Snapshot {
            dims: self.board.dims(),
            active: &self.active,
            settled: self.board.blocks(),
            queue: &self.queue,
            stats: &self.stats,
            status: self.status,
        }
    }

    /// Switches between running and paused. Has no effect after game over.
    ///
    /// Returns whether the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            Status::GameOver => return false,
        };
        true
    }

    /// Ends the game if a settled block reached the top row.
    ///
    /// Returns whether the game is over.
    pub fn check_game_over(&mut self) -> bool {
        if self.board.reached_top() {
            self.status = Status::GameOver;
        }
        self.status.is_game_over()
    }

    /// Runs the line-clear pass, reporting every intermediate board to
    /// `on_change`.
    ///
    /// Returns the number of rows cleared. Statistics are left untouched; see
    /// [`Self::record_cleared_lines`].
    pub fn clear_completed_lines(
        &mut self,
        mut on_change: impl FnMut(LineClearPhase, Snapshot<'_, S>),
    ) -> usize {
        let Self {
            board,
            active,
            queue,
            stats,
            status,
            ..
        } = self;
        let (active, queue, stats, status) = (&*active, &*queue, &*stats, *status);
        board.clear_completed_lines(|board, phase| {
            on_change(
                phase,
                Snapshot {
                    dims: board.dims(),
                    active,
                    settled: board.blocks(),
                    queue,
                    stats,
                    status,
                },
            );
        })
    }

    pub fn record_cleared_lines(&mut self, cleared_lines: usize) {
        self.stats.record_line_clear(cleared_lines);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Block, ShapeKind};

    use super::*;

    fn config() -> GameConfig {
        GameConfig {
            grace_period_ms: 500,
            ..GameConfig::default()
        }
    }

    fn session(config: &GameConfig, now: Instant) -> Session<char> {
        let styles = BlockStyles::uniform('#');
        Session::new(config, styles, PieceSeed::from(7), now).unwrap()
    }

    fn positions(piece: &Tetromino<char>) -> Vec<(i32, i32)> {
        piece.blocks().iter().map(Block::position).collect()
    }

    /// Steps down until a step no longer moves the piece.
    fn drop_to_floor(session: &mut Session<char>, now: Instant) {
        while session.step_down(now).is_moved() {}
    }

    #[test]
    fn test_new_session() {
        let now = Instant::now();
        let session = session(&config(), now);
        assert_eq!(session.status(), Status::Running);
        assert_eq!(session.queue().len(), 5);
        assert!(session.board().blocks().is_empty());
        assert!(session.active().blocks().iter().all(|b| *b.style() == '#'));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            board_height: -3,
            ..GameConfig::default()
        };
        let styles = BlockStyles::uniform('#');
        let result = Session::new(&config, styles, PieceSeed::from(7), Instant::now());
        assert!(matches!(result, Err(ConfigError::Dimensions(_))));
    }

    #[test]
    fn test_grounded_piece_settles_after_grace_period() {
        let now = Instant::now();
        let mut session = session(&config(), now);
        drop_to_floor(&mut session, now);

        let landed = positions(session.active());
        let next_kind = session.queue().front().unwrap().kind();

        let later = now + Duration::from_millis(499);
        assert_eq!(session.step_down(later), StepOutcome::Grounded);

        let later = now + Duration::from_millis(500);
        assert_eq!(session.step_down(later), StepOutcome::Settled);

        let mut settled: Vec<_> = session.board().blocks().iter().map(Block::position).collect();
        let mut expected = landed;
        settled.sort_unstable();
        expected.sort_unstable();
        assert_eq!(settled, expected);
        assert_eq!(session.active().kind(), next_kind);
        assert_eq!(session.queue().len(), 5);
        assert_eq!(session.stats().settled_pieces(), 1);
    }

    #[test]
    fn test_lateral_move_while_grounded_restarts_grace() {
        let now = Instant::now();
        let mut session = session(&config(), now);
        drop_to_floor(&mut session, now);

        let moved_at = now + Duration::from_millis(400);
        let moved = session.try_move_left(moved_at) || session.try_move_right(moved_at);
        assert!(moved);

        let later = now + Duration::from_millis(600);
        assert_eq!(session.step_down(later), StepOutcome::Grounded);
        let later = moved_at + Duration::from_millis(500);
        assert_eq!(session.step_down(later), StepOutcome::Settled);
    }

    #[test]
    fn test_pause_ignores_commands() {
        let now = Instant::now();
        let mut session = session(&config(), now);
        let before = positions(session.active());

        assert!(session.toggle_pause());
        assert_eq!(session.status(), Status::Paused);
        assert!(!session.try_move_left(now));
        assert!(!session.try_move_right(now));
        assert!(!session.try_rotate(now));
        assert_eq!(session.step_down(now), StepOutcome::Ignored);
        assert_eq!(positions(session.active()), before);

        assert!(session.toggle_pause());
        assert_eq!(session.step_down(now), StepOutcome::Moved);
    }

    #[test]
    fn test_game_over_when_block_reaches_top() {
        let now = Instant::now();
        let mut session = session(&config(), now);
        assert!(!session.check_game_over());

        session.board.settle([Block::new(0, 0, '#')]);
        assert!(session.check_game_over());
        assert_eq!(session.status(), Status::GameOver);

        let before = positions(session.active());
        assert!(!session.try_move_left(now));
        assert!(!session.try_move_right(now));
        assert!(!session.try_rotate(now));
        assert_eq!(session.step_down(now), StepOutcome::Ignored);
        assert!(!session.toggle_pause());
        assert_eq!(session.status(), Status::GameOver);
        assert_eq!(positions(session.active()), before);
    }

    #[test]
    fn test_stacking_pieces_ends_game() {
        let config = GameConfig {
            board_height: 6,
            board_width: 4,
            spawn_x: 1,
            grace_period_ms: 0,
            ..GameConfig::default()
        };
        let now = Instant::now();
        let mut session = session(&config, now);
        let mut ticks = 0;
        while !session.check_game_over() {
            session.step_down(now);
            let cleared = session.clear_completed_lines(|_, _| {});
            session.record_cleared_lines(cleared);
            ticks += 1;
            assert!(ticks < 1000, "game never ended");
        }
        assert!(session.board().reached_top());
    }

    #[test]
    fn test_clear_completed_lines_reports_snapshots() {
        let now = Instant::now();
        let mut session = session(&config(), now);
        let row = (0..10).map(|x| Block::new(x, 19, 'r'));
        session.board.settle(row.chain([Block::new(3, 18, 'a')]));

        let mut seen = vec![];
        let cleared = session.clear_completed_lines(|phase, snapshot| {
            seen.push((phase, snapshot.settled.len(), snapshot.status));
        });
        session.record_cleared_lines(cleared);

        assert_eq!(cleared, 1);
        assert_eq!(
            seen,
            [
                (LineClearPhase::Removed, 1, Status::Running),
                (LineClearPhase::Collapsed, 1, Status::Running),
            ]
        );
        assert_eq!(session.board().blocks()[0].position(), (3, 19));
        assert_eq!(session.stats().score(), 40);
    }

    #[test]
    fn test_set_piece_config_applies_to_new_pieces() {
        let config = GameConfig {
            grace_period_ms: 0,
            queue_size: 1,
            ..GameConfig::default()
        };
        let now = Instant::now();
        let mut session = session(&config, now);
        session.set_piece_config(PieceConfig {
            spawn_x: 2,
            spawn_y: 4,
            styles: BlockStyles::uniform('*'),
        });

        // with no grace period the floor step settles, and the queued piece
        // was built before the change
        drop_to_floor(&mut session, now);
        assert!(session.active().blocks().iter().all(|b| *b.style() == '#'));

        drop_to_floor(&mut session, now);
        let active = session.active();
        assert_eq!(active.anchor(), (2, 4));
        assert!(active.blocks().iter().all(|b| *b.style() == '*'));
        assert!(ShapeKind::ALL.contains(&active.kind()));
    }
}
