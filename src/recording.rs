//! Keystroke recording subsystem.
//!
//! This module provides the core types and submodules for capturing keystroke
//! sessions with relative timing and replaying them with the original pacing.
//!
//! Components:
//! - `types`: `Keystroke`, `Recording` and the `RecorderState` machine states.
//! - `recorder`: the `Recorder` owning buffer, timers and replay scheduling.
//! - `replay`: the mutation rule applied to the target during a replay.

pub mod recorder;
pub mod replay;
pub mod types;

pub use recorder::{Recorder, DEFAULT_INACTIVITY_TIMEOUT};
pub use types::{Keystroke, RecorderState, Recording};
