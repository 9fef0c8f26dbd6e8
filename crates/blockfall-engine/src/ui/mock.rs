use std::{
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::core::{Block, BlockStyles, Dimensions, ShapeKind};

use super::{
    KeyPress, KeyReceiver, KeySender, Snapshot, Status, Ui, UiError,
    input::{self, DEFAULT_KEY_BUFFER},
};

/// Style token used for every block drawn by [`MockUi`].
pub const MOCK_STYLE: &str = "mockStyle";

/// The parts of a [`Snapshot`] a test usually asserts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub status: Status,
    pub score: usize,
    pub level: usize,
    pub lines: usize,
    pub active: Vec<(i32, i32)>,
    pub settled: Vec<(i32, i32)>,
    pub queue: Vec<ShapeKind>,
}

impl Frame {
    fn capture<S>(snapshot: &Snapshot<'_, S>) -> Self {
        Self {
            status: snapshot.status,
            score: snapshot.stats.score(),
            level: snapshot.stats.level(),
            lines: snapshot.stats.cleared_lines(),
            active: snapshot.active.blocks().iter().map(Block::position).collect(),
            settled: snapshot.settled.iter().map(Block::position).collect(),
            queue: snapshot.queue.iter().map(|piece| piece.kind()).collect(),
        }
    }
}

#[derive(Debug, Default)]
struct MockRecord {
    dims: Option<Dimensions>,
    reject_init: bool,
    fail_stop: bool,
    start_calls: usize,
    stop_calls: usize,
    frames: Vec<Frame>,
    sender: Option<KeySender>,
    receiver: Option<KeyReceiver>,
}

fn lock(record: &Mutex<MockRecord>) -> MutexGuard<'_, MockRecord> {
    record.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A user interface that draws nothing and records every call.
///
/// Pair it with the [`MockProbe`] returned by [`MockUi::new`] to inject key
/// presses and inspect the record while a game runs on another thread.
#[derive(Debug)]
pub struct MockUi {
    record: Arc<Mutex<MockRecord>>,
}

/// Test-side handle to a [`MockUi`].
#[derive(Debug, Clone)]
pub struct MockProbe {
    record: Arc<Mutex<MockRecord>>,
}

impl MockUi {
    #[must_use]
    pub fn new() -> (Self, MockProbe) {
        Self::with_key_buffer(DEFAULT_KEY_BUFFER)
    }

    #[must_use]
    pub fn with_key_buffer(capacity: usize) -> (Self, MockProbe) {
        let (sender, receiver) = input::channel(capacity);
        let record = Arc::new(Mutex::new(MockRecord {
            sender: Some(sender),
            receiver: Some(receiver),
            ..MockRecord::default()
        }));
        let probe = MockProbe {
            record: Arc::clone(&record),
        };
        (Self { record }, probe)
    }

    /// Makes [`Ui::init`] fail as if the board did not fit the screen.
    #[must_use]
    pub fn rejecting_init(self) -> Self {
        lock(&self.record).reject_init = true;
        self
    }

    /// Makes [`Ui::stop`] report an I/O failure, as a front end whose input
    /// reader crashed would.
    #[must_use]
    pub fn failing_stop(self) -> Self {
        lock(&self.record).fail_stop = true;
        self
    }
}

impl Ui for MockUi {
    type Style = &'static str;

    fn init(&mut self, dims: Dimensions) -> Result<(), UiError> {
        let mut record = lock(&self.record);
        if record.reject_init {
            return Err(UiError::TooSmall {
                height: dims.height(),
                width: dims.width(),
                columns: 0,
                rows: 0,
            });
        }
        record.dims = Some(dims);
        Ok(())
    }

    fn block_styles(&self) -> BlockStyles<Self::Style> {
        BlockStyles::uniform(MOCK_STYLE)
    }

    fn update(&mut self, snapshot: &Snapshot<'_, Self::Style>) -> Result<(), UiError> {
        lock(&self.record).frames.push(Frame::capture(snapshot));
        Ok(())
    }

    fn key_presses(&mut self) -> Result<KeyReceiver, UiError> {
        lock(&self.record).receiver.take().ok_or(UiError::InputTaken)
    }

    fn start(&mut self) -> Result<(), UiError> {
        lock(&self.record).start_calls += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), UiError> {
        let mut record = lock(&self.record);
        record.stop_calls += 1;
        record.sender = None;
        if record.fail_stop {
            return Err(io::Error::other("input reader failed").into());
        }
        Ok(())
    }
}

impl MockProbe {
    /// Queues a key press unless the queue is full or the UI was stopped.
    pub fn send_key(&self, key: KeyPress) -> bool {
        lock(&self.record)
            .sender
            .as_ref()
            .is_some_and(|sender| sender.send(key))
    }

    /// Drops the sending side of the key press queue.
    pub fn close_input(&self) {
        lock(&self.record).sender = None;
    }

    #[must_use]
    pub fn dims(&self) -> Option<Dimensions> {
        lock(&self.record).dims
    }

    #[must_use]
    pub fn start_calls(&self) -> usize {
        lock(&self.record).start_calls
    }

    #[must_use]
    pub fn stop_calls(&self) -> usize {
        lock(&self.record).stop_calls
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        lock(&self.record).frames.len()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<Frame> {
        lock(&self.record).frames.last().cloned()
    }

    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        lock(&self.record).frames.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_presses_taken_once() {
        let (mut ui, _probe) = MockUi::new();
        assert!(ui.key_presses().is_ok());
        assert!(matches!(ui.key_presses(), Err(UiError::InputTaken)));
    }

    #[test]
    fn test_probe_drops_keys_when_full_or_stopped() {
        let (mut ui, probe) = MockUi::with_key_buffer(1);
        let keys = ui.key_presses().unwrap();
        assert!(probe.send_key(KeyPress::Left));
        assert!(!probe.send_key(KeyPress::Right));
        assert_eq!(keys.try_recv(), Ok(KeyPress::Left));

        ui.stop().unwrap();
        ui.stop().unwrap();
        assert!(!probe.send_key(KeyPress::Left));
        assert_eq!(probe.stop_calls(), 2);
        assert!(keys.try_recv().is_err());
    }

    #[test]
    fn test_failing_stop() {
        let (ui, probe) = MockUi::new();
        let mut ui = ui.failing_stop();
        assert!(matches!(ui.stop(), Err(UiError::Io(_))));
        assert_eq!(probe.stop_calls(), 1);
    }

    #[test]
    fn test_rejecting_init() {
        let (ui, probe) = MockUi::new();
        let mut ui = ui.rejecting_init();
        let dims = Dimensions::new(20, 10).unwrap();
        assert!(matches!(ui.init(dims), Err(UiError::TooSmall { .. })));
        assert_eq!(probe.dims(), None);
    }
}
