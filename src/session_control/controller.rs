//! # Session Controller
//!
//! This module binds an external key-event stream to a [`Recorder`] and gives
//! the embedding application a small status-and-replay facade.
//!
//! ```text
//! ┌─────────────────┐    ┌────────────────────┐    ┌─────────────────┐
//! │ Key-event       │───▶│ SessionController  │───▶│ Recorder        │
//! │ source          │    │                    │    │ (buffer/timers) │
//! └─────────────────┘    │ - content filter   │    └─────────────────┘
//!                        │ - state mirror
//!                        │ - replay delegate
//!                        └────────────────────┘
//! ```
//!
//! The controller subscribes at construction and pumps the subscription with
//! one spawned task; [`detach`](SessionController::detach) aborts the pump,
//! which is the unsubscribe half of the source contract.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, trace};
use tokio::task::JoinHandle;

use crate::error_handling::types::ReplayError;
use crate::recording::recorder::Recorder;

use super::events::KeyEventSource;
use super::key_filter::is_content_key;

/// Routes accepted keys into a shared [`Recorder`] and mirrors its state.
///
/// `has_recording` deliberately delegates to the recorder's buffer-derived
/// answer so that status and replay can never disagree about whether there is
/// something to replay.
pub struct SessionController {
    recorder: Arc<Recorder>,
    /// Locator every replay goes against.
    target_locator: String,
    recording_flag: Arc<AtomicBool>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl SessionController {
    /// Subscribes to `source` and starts forwarding accepted keys into
    /// `recorder`. Replays go against `target_locator`.
    ///
    /// Registers itself as the recorder's state listener (replacing any prior
    /// listener) to keep [`is_recording`](Self::is_recording) current.
    pub fn new(
        recorder: Arc<Recorder>,
        source: &dyn KeyEventSource,
        target_locator: impl Into<String>,
    ) -> Self {
        let recording_flag = Arc::new(AtomicBool::new(recorder.state().is_recording()));
        {
            let flag = Arc::clone(&recording_flag);
            recorder.set_state_listener(move |recording| flag.store(recording, Ordering::SeqCst));
        }

        let mut events = source.subscribe();
        let forward_to = Arc::clone(&recorder);
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if !is_content_key(&event) {
                    trace!("dropping non-content key {:?}", event.key);
                    continue;
                }
                forward_to.handle_keystroke(event.key);
            }
            debug!("key event source closed, forwarding ended");
        });

        Self {
            recorder,
            target_locator: target_locator.into(),
            recording_flag,
            pump: Mutex::new(Some(pump)),
        }
    }

    /// Mirror of the recorder's state, updated by its state-change
    /// notifications.
    pub fn is_recording(&self) -> bool {
        self.recording_flag.load(Ordering::SeqCst)
    }

    /// Whether a captured session is available for replay.
    pub fn has_recording(&self) -> bool {
        self.recorder.has_recording()
    }

    /// Replays the captured session against the fixed target locator.
    ///
    /// Clears the local recording flag up front; the recorder's own `stop`
    /// notification keeps it consistent from there.
    ///
    /// # Errors
    /// - [`ReplayError::TargetNotFound`] if the fixed locator does not
    ///   resolve.
    pub fn replay(&self) -> Result<impl Future<Output = ()> + Send + 'static, ReplayError> {
        self.recording_flag.store(false, Ordering::SeqCst);
        self.recorder.replay(&self.target_locator)
    }

    /// Ends the subscription; no further events reach the recorder.
    /// Idempotent.
    pub fn detach(&self) {
        if let Some(pump) = self.pump.lock().unwrap().take() {
            pump.abort();
            debug!("detached from key event source");
        }
    }
}
