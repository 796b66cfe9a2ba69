//! Surface Traits
//!
//! This module defines the `TextSurface` trait, the contract a replay target
//! must satisfy, and the `SurfaceResolver` trait that maps locator strings to
//! live surfaces.
//!
//! Implementors of `TextSurface` are responsible for:
//! - Exposing the current textual content
//! - Accepting full-content replacement writes
//!
//! During a replay the engine assumes it is the only writer; arbitrating
//! against concurrent external writers is the caller's obligation.

use std::sync::Arc;

/// The `TextSurface` trait defines the interface for a mutable text-bearing
/// replay target.
///
/// Methods take `&self`; implementations guard their content internally so a
/// surface can be shared across the scheduled replay tasks as an
/// `Arc<dyn TextSurface>`.
pub trait TextSurface: Send + Sync {
    /// Returns the current content of the surface.
    fn content(&self) -> String;

    /// Replaces the entire content of the surface.
    fn set_content(&self, text: String);
}

/// The `SurfaceResolver` trait turns a locator string into a live surface.
///
/// Resolution failure is the sole documented failure mode of
/// [`Recorder::replay`](crate::recording::Recorder::replay); a resolver returns
/// `None` rather than an error so the caller decides how to surface it.
pub trait SurfaceResolver: Send + Sync {
    /// Resolves `locator` to a surface, or `None` if nothing is registered
    /// under that locator.
    fn resolve(&self, locator: &str) -> Option<Arc<dyn TextSurface>>;
}
