//! keyecho — keystroke capture and timed replay engine.
//!
//! Records a keystroke session with precise relative timing and replays it —
//! deletions included — into a text surface with the original pacing. The
//! engine is host-agnostic: key events come in through an injected
//! [`KeyEventSource`](session_control::KeyEventSource) and replays write into
//! a [`TextSurface`](surface::TextSurface) resolved by locator. Recordings are
//! ephemeral and live in memory for the lifetime of the process.

pub mod configuration;
pub mod error_handling;
pub mod recording;
pub mod session_control;
pub mod surface;

pub use configuration::EngineConfig;
pub use error_handling::types::{ConfigError, ReplayError, SurfaceError};
pub use recording::{Keystroke, Recorder, RecorderState, Recording};
pub use session_control::{KeyEvent, KeyEventBus, KeyEventSource, SessionController};
pub use surface::{BufferSurface, SurfaceRegistry, SurfaceResolver, TextSurface};
