//! Content-key filter.
//!
//! Only keys that edit text belong in a recording. Modifier and navigation
//! keys, and any press with a chording modifier held, are dropped before they
//! reach the recorder.

use super::events::KeyEvent;

/// Keys that never reach the recorder.
pub const IGNORED_KEYS: [&str; 11] = [
    "Control",
    "Shift",
    "Alt",
    "Meta",
    "CapsLock",
    "Tab",
    "Escape",
    "ArrowUp",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
];

/// True iff `event` should be forwarded to the recorder.
pub fn is_content_key(event: &KeyEvent) -> bool {
    if event.ctrl || event.alt || event.meta {
        return false;
    }
    !IGNORED_KEYS.contains(&event.key.as_str())
}
