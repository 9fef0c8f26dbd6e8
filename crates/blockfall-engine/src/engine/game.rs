use std::{
    ops::ControlFlow,
    panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::RecvTimeoutError,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use rand::Rng as _;

use crate::{
    ConfigError, GameError,
    ui::{KeyPress, KeyReceiver, Status, Ui, UiError},
};

use super::{
    board::LineClearPhase,
    config::GameConfig,
    game_stats::GameStats,
    piece_factory::PieceSeed,
    session::Session,
};

/// Requests a running game to stop from any thread.
///
/// Stopping is idempotent. The game finishes the step it is executing,
/// stops its user interface and returns.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// The real-time game loop.
///
/// A single thread owns the [`Session`] and performs every mutation. It waits
/// on the key press queue with a timeout, so gravity ticks and player
/// commands interleave without locking.
#[derive(Debug)]
pub struct Game<U> {
    ui: U,
    config: GameConfig,
    seed: PieceSeed,
    stop: StopHandle,
}

impl<U> Game<U>
where
    U: Ui,
{
    /// Creates a game with a random seed.
    pub fn new(ui: U, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            ui,
            config,
            seed: rand::rng().random(),
            stop: StopHandle::new(),
        })
    }

    /// Replaces the seed so the piece sequence is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: PieceSeed) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs the game on the current thread until it is stopped.
    ///
    /// Returns the final statistics. Configuration and user interface
    /// failures during setup are returned before the loop starts; a failure
    /// while drawing or reading input ends the loop and is returned after the
    /// user interface has been stopped.
    pub fn run(mut self) -> Result<GameStats, GameError> {
        let styles = self.ui.block_styles();
        let mut session = Session::new(&self.config, styles, self.seed, Instant::now())?;
        self.ui.init(session.dims())?;
        let keys = self.ui.key_presses()?;

        let result = self
            .ui
            .start()
            .and_then(|()| self.play(&mut session, &keys));
        let stopped = self.ui.stop();
        if let Err(err) = result {
            // the failure reported by `stop` explains why input closed
            return Err(match (err, stopped) {
                (UiError::InputClosed, Err(cause)) => cause,
                (err, _) => err,
            }
            .into());
        }
        stopped?;
        Ok(session.stats().clone())
    }

    /// Runs the game on a new thread.
    pub fn spawn(self) -> GameHandle
    where
        U: Send + 'static,
    {
        let stop = self.stop_handle();
        let thread = thread::spawn(move || self.run());
        GameHandle { stop, thread }
    }

    fn play(
        &mut self,
        session: &mut Session<U::Style>,
        keys: &KeyReceiver,
    ) -> Result<(), UiError> {
        self.ui.update(&session.snapshot())?;
        let mut next_tick = Instant::now() + self.tick_interval(session);

        while !self.stop.is_stopped() {
            // wake up at least every poll interval to notice a stop request
            let timeout = next_tick
                .saturating_duration_since(Instant::now())
                .min(self.config.pause_poll());
            match keys.recv_timeout(timeout) {
                Ok(key) => {
                    if self.apply_key(session, key)?.is_break() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if Instant::now() >= next_tick {
                        self.tick(session)?;
                        next_tick = Instant::now() + self.tick_interval(session);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    if self.stop.is_stopped() {
                        break;
                    }
                    return Err(UiError::InputClosed);
                }
            }
        }
        Ok(())
    }

    fn tick_interval(&self, session: &Session<U::Style>) -> Duration {
        match session.status() {
            Status::Running => self.config.gravity_interval(session.stats().level()),
            Status::Paused | Status::GameOver => self.config.pause_poll(),
        }
    }

    fn apply_key(
        &mut self,
        session: &mut Session<U::Style>,
        key: KeyPress,
    ) -> Result<ControlFlow<()>, UiError> {
        let now = Instant::now();
        let changed = match key {
            KeyPress::Stop => return Ok(ControlFlow::Break(())),
            KeyPress::Up => session.try_rotate(now),
            KeyPress::Left => session.try_move_left(now),
            KeyPress::Right => session.try_move_right(now),
            KeyPress::Down => !session.step_down(now).is_ignored(),
            KeyPress::Pause => session.toggle_pause(),
        };
        if changed {
            self.ui.update(&session.snapshot())?;
        }
        Ok(ControlFlow::Continue(()))
    }

    /// One gravity step followed by the game-over check and the line clear.
    fn tick(&mut self, session: &mut Session<U::Style>) -> Result<(), UiError> {
        if !session.status().is_running() {
            return self.ui.update(&session.snapshot());
        }

        session.step_down(Instant::now());
        self.ui.update(&session.snapshot())?;
        if session.check_game_over() {
            return self.ui.update(&session.snapshot());
        }

        let collapse_delay = self.config.collapse_delay();
        let ui = &mut self.ui;
        let mut result = Ok(());
        let cleared = session.clear_completed_lines(|phase, snapshot| {
            if result.is_err() {
                return;
            }
            result = ui.update(&snapshot);
            if phase == LineClearPhase::Removed {
                thread::sleep(collapse_delay);
            }
        });
        result?;

        if cleared > 0 {
            session.record_cleared_lines(cleared);
            self.ui.update(&session.snapshot())?;
        }
        Ok(())
    }
}

/// A game running on its own thread.
#[derive(Debug)]
pub struct GameHandle {
    stop: StopHandle,
    thread: JoinHandle<Result<GameStats, GameError>>,
}

impl GameHandle {
    /// Asks the game to stop without waiting for it.
    pub fn stop(&self) {
        self.stop.stop();
    }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the game to end and returns its result.
    ///
    /// A panic on the game thread is resumed on the caller.
    pub fn join(self) -> Result<GameStats, GameError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
