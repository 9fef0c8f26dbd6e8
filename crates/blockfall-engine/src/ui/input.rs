//! Bounded, non-blocking key press queue.
//!
//! The producer side never waits: when the queue is full the key press is
//! dropped. The consumer waits with a timeout so it can interleave input with
//! gravity ticks.

use std::{
    sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TryRecvError},
    time::Duration,
};

use super::KeyPress;

/// Queue capacity used by the bundled front ends.
pub const DEFAULT_KEY_BUFFER: usize = 10;

/// Creates a queue holding at most `capacity` unread key presses (at least one).
#[must_use]
pub fn channel(capacity: usize) -> (KeySender, KeyReceiver) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (KeySender(tx), KeyReceiver(rx))
}

#[derive(Debug, Clone)]
pub struct KeySender(SyncSender<KeyPress>);

impl KeySender {
    /// Queues `key` without blocking.
    ///
    /// Returns `false` if the key was dropped because the queue is full or
    /// the receiver is gone.
    pub fn send(&self, key: KeyPress) -> bool {
        self.0.try_send(key).is_ok()
    }
}

#[derive(Debug)]
pub struct KeyReceiver(Receiver<KeyPress>);

impl KeyReceiver {
    /// Waits up to `timeout` for the next key press.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<KeyPress, RecvTimeoutError> {
        self.0.recv_timeout(timeout)
    }

    /// Returns the next key press if one is already queued.
    pub fn try_recv(&self) -> Result<KeyPress, TryRecvError> {
        self.0.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_queue_drops_keys() {
        let (tx, rx) = channel(2);
        assert!(tx.send(KeyPress::Left));
        assert!(tx.send(KeyPress::Right));
        assert!(!tx.send(KeyPress::Up));

        assert_eq!(rx.try_recv(), Ok(KeyPress::Left));
        assert_eq!(rx.try_recv(), Ok(KeyPress::Right));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert!(tx.send(KeyPress::Down));
    }

    #[test]
    fn test_zero_capacity_still_buffers_one() {
        let (tx, rx) = channel(0);
        assert!(tx.send(KeyPress::Pause));
        assert_eq!(rx.recv_timeout(Duration::ZERO), Ok(KeyPress::Pause));
    }

    #[test]
    fn test_disconnect() {
        let (tx, rx) = channel(DEFAULT_KEY_BUFFER);
        drop(rx);
        assert!(!tx.send(KeyPress::Stop));

        let (tx, rx) = channel(DEFAULT_KEY_BUFFER);
        drop(tx);
        assert_eq!(
            rx.recv_timeout(Duration::from_millis(1)),
            Err(RecvTimeoutError::Disconnected)
        );
    }
}
