//! Replay mutation rule.
//!
//! A replay reproduces a recording against a [`TextSurface`] one keystroke at
//! a time. Only two key shapes mutate the target: a single printable character
//! appends, and `"Backspace"` deletes the last character. Every other named
//! control key was recorded for pacing fidelity but is not replayable.

use crate::surface::surface_trait::TextSurface;

pub(crate) const BACKSPACE_KEY: &str = "Backspace";

/// Applies one recorded keystroke to `surface`.
///
/// Content is read, edited and written back whole; the surface contract gives
/// the engine exclusive write access for the duration of a replay.
pub(crate) fn apply_keystroke(surface: &dyn TextSurface, key: &str) {
    if key == BACKSPACE_KEY {
        let mut text = surface.content();
        text.pop();
        surface.set_content(text);
    } else if key.chars().count() == 1 {
        let mut text = surface.content();
        text.push_str(key);
        surface.set_content(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::buffer::BufferSurface;

    #[test]
    fn printable_key_appends() {
        let surface = BufferSurface::with_text("hell");
        apply_keystroke(&surface, "o");
        assert_eq!(surface.content(), "hello");
    }

    #[test]
    fn backspace_removes_last_character() {
        let surface = BufferSurface::with_text("hi");
        apply_keystroke(&surface, BACKSPACE_KEY);
        assert_eq!(surface.content(), "h");
    }

    #[test]
    fn backspace_on_empty_surface_is_a_no_op() {
        let surface = BufferSurface::new();
        apply_keystroke(&surface, BACKSPACE_KEY);
        assert_eq!(surface.content(), "");
    }

    #[test]
    fn named_control_keys_do_not_mutate() {
        let surface = BufferSurface::with_text("abc");
        for key in ["Enter", "Delete", "Home", "F5"] {
            apply_keystroke(&surface, key);
        }
        assert_eq!(surface.content(), "abc");
    }

    #[test]
    fn multibyte_characters_append_and_pop_whole() {
        let surface = BufferSurface::new();
        apply_keystroke(&surface, "é");
        apply_keystroke(&surface, "あ");
        assert_eq!(surface.content(), "éあ");
        apply_keystroke(&surface, BACKSPACE_KEY);
        assert_eq!(surface.content(), "é");
    }
}
