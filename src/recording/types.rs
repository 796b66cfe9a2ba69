//! Common data types used across the recording subsystem.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One accepted key-press with its offset from the start of the session.
///
/// `key` is either a single printable character or a named control key
/// (e.g. `"Backspace"`); timestamps within one recording are non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    /// Key identifier as delivered by the input stream.
    pub key: String,
    /// Offset from the recording's start instant.
    pub timestamp: Duration,
}

/// Current state of the recorder's session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// No session in progress. Initial state, and the state after an explicit
    /// stop or an inactivity timeout.
    #[default]
    Idle,
    /// A session is in progress; accepted keystrokes are being buffered.
    Recording,
}

impl RecorderState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecorderState::Recording)
    }
}

/// Ordered sequence of keystrokes from one session.
///
/// Recordings are transient: they live in memory, are overwritten when a new
/// session starts, and are never persisted. The `id` correlates log lines for
/// one session; `started_at` is wall-clock metadata only — replay timing uses
/// the keystroke offsets, not this value.
#[derive(Debug, Clone)]
pub struct Recording {
    /// Unique session identifier (used to correlate logs).
    pub id: Uuid,
    /// Wall-clock time the session started.
    pub started_at: DateTime<Utc>,
    /// Captured keystrokes in delivery order.
    pub keystrokes: Vec<Keystroke>,
}

impl Recording {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            keystrokes: Vec::new(),
        }
    }

    /// Offset of the last keystroke, i.e. the pacing length of a replay.
    pub fn duration(&self) -> Duration {
        self.keystrokes
            .last()
            .map(|k| k.timestamp)
            .unwrap_or(Duration::ZERO)
    }

    pub fn keystroke_count(&self) -> usize {
        self.keystrokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keystrokes.is_empty()
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_state_flags() {
        assert!(RecorderState::Recording.is_recording());
        assert!(!RecorderState::Idle.is_recording());
        assert_eq!(RecorderState::default(), RecorderState::Idle);
    }

    #[test]
    fn empty_recording() {
        let recording = Recording::new();
        assert!(recording.is_empty());
        assert_eq!(recording.keystroke_count(), 0);
        assert_eq!(recording.duration(), Duration::ZERO);
    }

    #[test]
    fn duration_is_last_timestamp() {
        let mut recording = Recording::new();
        recording.keystrokes.push(Keystroke {
            key: "h".to_string(),
            timestamp: Duration::ZERO,
        });
        recording.keystrokes.push(Keystroke {
            key: "i".to_string(),
            timestamp: Duration::from_millis(120),
        });

        assert!(!recording.is_empty());
        assert_eq!(recording.keystroke_count(), 2);
        assert_eq!(recording.duration(), Duration::from_millis(120));
    }
}
