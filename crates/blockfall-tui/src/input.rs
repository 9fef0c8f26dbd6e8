use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use blockfall_engine::{KeyPress, KeySender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Maps a terminal key event to a player command.
///
/// Only presses count; repeats and releases reported by some terminals are
/// ignored. Ctrl-C is read as a key in raw mode and stops the game.
pub(crate) fn key_press(key_event: &KeyEvent) -> Option<KeyPress> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match key_event.code {
        KeyCode::Up => KeyPress::Up,
        KeyCode::Down => KeyPress::Down,
        KeyCode::Left => KeyPress::Left,
        KeyCode::Right => KeyPress::Right,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyPress::Stop
        }
        KeyCode::Char(' ' | 'p' | 'P') => KeyPress::Pause,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => KeyPress::Stop,
        _ => return None,
    };
    Some(key)
}

/// Reads terminal events on a background thread and forwards key presses.
#[derive(Debug)]
pub(crate) struct InputThread {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<io::Result<()>>>,
}

impl InputThread {
    pub(crate) fn spawn(sender: KeySender) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = thread::spawn({
            let stop = Arc::clone(&stop);
            move || read_keys(&sender, &stop)
        });
        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Stops reading and waits for the thread to exit.
    ///
    /// Returns the error that ended the thread early, if any.
    pub(crate) fn stop(&mut self) -> io::Result<()> {
        self.stop.store(true, Ordering::Release);
        match self.thread.take().map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(io::Error::other("input thread panicked")),
            None => Ok(()),
        }
    }
}

fn read_keys(sender: &KeySender, stop: &AtomicBool) -> io::Result<()> {
    while !stop.load(Ordering::Acquire) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key_event) = event::read()?
            && let Some(key) = key_press(&key_event)
        {
            // a full queue drops the key
            sender.send(key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_map() {
        let cases = [
            (KeyCode::Up, Some(KeyPress::Up)),
            (KeyCode::Down, Some(KeyPress::Down)),
            (KeyCode::Left, Some(KeyPress::Left)),
            (KeyCode::Right, Some(KeyPress::Right)),
            (KeyCode::Char(' '), Some(KeyPress::Pause)),
            (KeyCode::Char('p'), Some(KeyPress::Pause)),
            (KeyCode::Esc, Some(KeyPress::Stop)),
            (KeyCode::Char('q'), Some(KeyPress::Stop)),
            (KeyCode::Char('c'), None),
            (KeyCode::Enter, None),
        ];
        for (code, expected) in cases {
            assert_eq!(key_press(&press(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn test_ctrl_c_stops() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_press(&event), Some(KeyPress::Stop));
    }

    #[test]
    fn test_release_is_ignored() {
        let event = KeyEvent {
            kind: KeyEventKind::Release,
            ..KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)
        };
        assert_eq!(key_press(&event), None);
        let event = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::NONE,
        );
        assert_eq!(key_press(&event), None);
    }
}
