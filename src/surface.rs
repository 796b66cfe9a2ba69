//! Replay target surfaces
//!
//! This module provides the contract a replay writes into and the lookup
//! machinery that turns a locator string into a live surface.
//!
//! Components:
//! - `surface_trait`: the `TextSurface` and `SurfaceResolver` traits defining a
//!   uniform API.
//! - `buffer`: in-memory mutex-guarded implementation used by the demo binary
//!   and tests.
//! - `registry`: named-surface directory resolving `#name` locators.

pub mod buffer;
pub mod registry;
pub mod surface_trait;

pub use buffer::BufferSurface;
pub use registry::SurfaceRegistry;
pub use surface_trait::{SurfaceResolver, TextSurface};
