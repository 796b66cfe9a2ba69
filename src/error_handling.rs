//! Error types shared across the engine.

pub mod types;

pub use types::{ConfigError, ReplayError, SurfaceError};
