//! Key-event stream contract.
//!
//! The engine never talks to a platform input API directly. It consumes an
//! injected [`KeyEventSource`]: the host subscribes the engine to whatever
//! rate-limited stream it has (a DOM listener bridge, a terminal event loop, a
//! test harness), and the contract is only that events arrive in temporal
//! order, at most one per minimum quantum, never reordered.

use std::sync::Mutex;

use tokio::sync::mpsc;

/// One key-press event as delivered by the external input stream.
///
/// `key` is a single printable character or a named control key. The modifier
/// flags describe chording keys held during the press; shifted characters
/// arrive already uppercased, so Shift is not tracked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyEvent {
    /// A plain key press with no modifiers held.
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, ctrl: bool, alt: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            alt,
            meta,
        }
    }
}

/// Injected capability delivering key-press events.
///
/// `subscribe` hands out an unbounded receiver; dropping the receiver (or
/// aborting the task that drains it) is the unsubscribe half of the contract.
/// Unbounded is safe here because the source is rate-limited upstream.
pub trait KeyEventSource: Send + Sync {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<KeyEvent>;
}

/// Channel-backed fan-out source for embedders and tests.
///
/// Every subscriber gets its own channel; `emit` clones the event to each live
/// subscription and prunes the closed ones.
#[derive(Default)]
pub struct KeyEventBus {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<KeyEvent>>>,
}

impl KeyEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every live subscriber.
    pub fn emit(&self, event: KeyEvent) {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl KeyEventSource for KeyEventBus {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<KeyEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().unwrap().push(tx);
        rx
    }
}
