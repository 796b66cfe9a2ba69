use std::sync::Mutex;

use super::surface_trait::TextSurface;

/// In-memory text surface backed by a mutex-guarded `String`.
///
/// This is the surface the demo binary replays into and the building block for
/// test probes; an embedding application would typically adapt its own text
/// widget to [`TextSurface`] instead.
#[derive(Debug, Default)]
pub struct BufferSurface {
    text: Mutex<String>,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self {
            text: Mutex::new(String::new()),
        }
    }

    /// Creates a surface pre-seeded with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
        }
    }
}

impl TextSurface for BufferSurface {
    fn content(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    fn set_content(&self, text: String) {
        *self.text.lock().unwrap() = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_roundtrip() {
        let surface = BufferSurface::new();
        assert_eq!(surface.content(), "");

        surface.set_content("hello".to_string());
        assert_eq!(surface.content(), "hello");
    }

    #[test]
    fn with_text_seeds_content() {
        let surface = BufferSurface::with_text("seed");
        assert_eq!(surface.content(), "seed");
    }
}
