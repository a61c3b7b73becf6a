//! Single-slot keystroke channel.
//!
//! A console-style line reader blocks on [`KeystrokeReader::read_key`] while the
//! interface keeps dispatching events on its own thread. The interface holds a
//! [`KeystrokeSender`] and offers every key it receives. At most one keystroke
//! is outstanding; while the slot is full further offers are dropped.
//!
//! Dropping every sender wakes a blocked reader with `None`, which is how a
//! pending read is cancelled.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use super::input::KeyEvent;

/// Create a connected sender/reader pair.
pub fn keystroke_channel() -> (KeystrokeSender, KeystrokeReader) {
    let (tx, rx) = mpsc::channel(1);
    (KeystrokeSender { tx }, KeystrokeReader { rx })
}

/// The producing half. Cloneable; each clone keeps the channel open.
#[derive(Debug, Clone)]
pub struct KeystrokeSender {
    tx: mpsc::Sender<KeyEvent>,
}

impl KeystrokeSender {
    /// Offer a keystroke without blocking.
    ///
    /// Returns `false` when the previous keystroke has not been read yet or
    /// the reader is gone.
    pub fn offer(&self, key: KeyEvent) -> bool {
        match self.tx.try_send(key) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                debug!(?dropped, "keystroke slot occupied, dropping key");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    /// Whether the reader has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The consuming half. There is exactly one reader per channel, and reading
/// takes `&mut self`, so reads never overlap.
#[derive(Debug)]
pub struct KeystrokeReader {
    rx: mpsc::Receiver<KeyEvent>,
}

impl KeystrokeReader {
    /// Block until a keystroke arrives.
    ///
    /// Returns `None` once every sender has been dropped and the slot is
    /// empty. Must not be called from within an async runtime.
    pub fn read_key(&mut self) -> Option<KeyEvent> {
        self.rx.blocking_recv()
    }

    /// Take the outstanding keystroke, if any, without blocking.
    pub fn try_read_key(&mut self) -> Option<KeyEvent> {
        self.rx.try_recv().ok()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
