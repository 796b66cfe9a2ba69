//! Named-surface directory.
//!
//! `SurfaceRegistry` maps `#name` locators to registered surfaces and acts as
//! the [`SurfaceResolver`] handed to the recorder. Registration validates the
//! locator format up front so a typo fails at wiring time, not at replay time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use regex::Regex;

use crate::error_handling::types::SurfaceError;

use super::surface_trait::{SurfaceResolver, TextSurface};

/// Locators are `#` followed by an identifier: letters, digits, `_` or `-`,
/// starting with a letter.
pub(crate) const LOCATOR_FORMAT: &str = r"^#[A-Za-z][A-Za-z0-9_-]*$";

/// Directory of named surfaces.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use keyecho::surface::{BufferSurface, SurfaceRegistry, SurfaceResolver};
///
/// let registry = SurfaceRegistry::new();
/// registry
///     .register("#output", Arc::new(BufferSurface::new()))
///     .expect("register surface");
/// assert!(registry.resolve("#output").is_some());
/// assert!(registry.resolve("#other").is_none());
/// ```
pub struct SurfaceRegistry {
    surfaces: Mutex<HashMap<String, Arc<dyn TextSurface>>>,
    locator_format: Regex,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            surfaces: Mutex::new(HashMap::new()),
            locator_format: Regex::new(LOCATOR_FORMAT).expect("locator format regex"),
        }
    }

    /// Registers `surface` under `locator`.
    ///
    /// # Errors
    /// - [`SurfaceError::InvalidLocator`] if `locator` does not match the
    ///   `#name` format.
    /// - [`SurfaceError::AlreadyRegistered`] if the locator is taken; existing
    ///   registrations are never silently replaced.
    pub fn register(
        &self,
        locator: &str,
        surface: Arc<dyn TextSurface>,
    ) -> Result<(), SurfaceError> {
        if !self.locator_format.is_match(locator) {
            return Err(SurfaceError::InvalidLocator(locator.to_string()));
        }
        let mut surfaces = self.surfaces.lock().unwrap();
        if surfaces.contains_key(locator) {
            return Err(SurfaceError::AlreadyRegistered(locator.to_string()));
        }
        debug!("[registry] registered surface {}", locator);
        surfaces.insert(locator.to_string(), surface);
        Ok(())
    }

    /// Removes the registration for `locator`, returning the surface if one
    /// was present.
    pub fn unregister(&self, locator: &str) -> Option<Arc<dyn TextSurface>> {
        let removed = self.surfaces.lock().unwrap().remove(locator);
        if removed.is_some() {
            debug!("[registry] unregistered surface {}", locator);
        }
        removed
    }

    pub fn is_valid_locator(&self, locator: &str) -> bool {
        self.locator_format.is_match(locator)
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceResolver for SurfaceRegistry {
    fn resolve(&self, locator: &str) -> Option<Arc<dyn TextSurface>> {
        self.surfaces.lock().unwrap().get(locator).cloned()
    }
}
