//! Session control subsystem.
//!
//! Binds the engine to its host: an injected key-event source feeds the
//! controller, which filters non-content keys and forwards the rest to the
//! recorder.
//!
//! Components:
//! - `events`: `KeyEvent`, the `KeyEventSource` capability, `KeyEventBus`.
//! - `key_filter`: the fixed ignore-set/modifier filter.
//! - `controller`: the `SessionController` facade.

pub mod controller;
pub mod events;
#[cfg(test)]
mod integration_tests;
pub mod key_filter;

pub use controller::SessionController;
pub use events::{KeyEvent, KeyEventBus, KeyEventSource};
pub use key_filter::{is_content_key, IGNORED_KEYS};
