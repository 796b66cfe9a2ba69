//! Keystroke recording and timed replay for a single session.
//!
//! This module provides `Recorder`, the component that owns the keystroke
//! buffer, the Idle/Recording state machine, the inactivity timer and the
//! replay scheduler. Keystrokes arrive through [`handle_keystroke`], already
//! filtered and rate-limited by the session controller; a later [`replay`]
//! reproduces the captured sequence into a [`TextSurface`] resolved through
//! the injected [`SurfaceResolver`], preserving the original pacing.
//!
//! Highlights
//! - Offsets are measured from the session's start instant on the tokio clock,
//!   so paused-clock tests are deterministic
//! - One cancellable timer task per scheduled replay mutation, registered in
//!   buffer order and aborted collectively by [`cleanup`]
//! - Inactivity timeout (default 5 s) auto-stops a quiet session
//! - State-change notifications fire exactly on Idle↔Recording transitions
//! - Logging at DEBUG for lifecycle milestones, TRACE per captured keystroke
//!
//! Timer tasks are spawned onto the ambient tokio runtime; every method that
//! arms a timer must therefore run inside one.
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use keyecho::recording::Recorder;
//! use keyecho::surface::{BufferSurface, SurfaceRegistry};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(SurfaceRegistry::new());
//!     registry.register("#output", Arc::new(BufferSurface::new()))?;
//!
//!     let recorder = Recorder::new(registry);
//!     recorder.handle_keystroke("h");
//!     recorder.handle_keystroke("i");
//!     recorder.stop();
//!
//!     recorder.replay("#output")?.await;
//!     Ok(())
//! }
//! ```
//!
//! [`handle_keystroke`]: Recorder::handle_keystroke
//! [`replay`]: Recorder::replay
//! [`cleanup`]: Recorder::cleanup
//! [`TextSurface`]: crate::surface::TextSurface
//! [`SurfaceResolver`]: crate::surface::SurfaceResolver

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{debug, info, trace};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::configuration::config::EngineConfig;
use crate::error_handling::types::ReplayError;
use crate::surface::surface_trait::SurfaceResolver;

use super::replay::apply_keystroke;
use super::types::{Keystroke, RecorderState, Recording};

/// Sessions quiet for this long are stopped automatically.
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_millis(5000);

type StateListener = Arc<dyn Fn(bool) + Send + Sync>;

/// Buffer, state machine and timers for one keystroke session at a time.
///
/// A `Recorder` holds only lightweight mutex-guarded state; the guarded
/// sections never span an await point. It is shared between the session
/// controller, its own timer tasks and the caller.
pub struct Recorder {
    inactivity_timeout: Duration,
    /// Buffer cap; 0 means unlimited.
    max_keystrokes: usize,
    resolver: Arc<dyn SurfaceResolver>,
    /// State the inactivity timer task keeps alive alongside the recorder.
    shared: Arc<Shared>,
    /// Pending inactivity timer, aborted and re-armed on every keystroke.
    inactivity_timer: Mutex<Option<JoinHandle<()>>>,
    /// One handle per scheduled mutation of the replay in flight.
    replay_tasks: Mutex<Vec<JoinHandle<()>>>,
}

struct Shared {
    inner: Mutex<RecorderInner>,
    state_listener: Mutex<Option<StateListener>>,
}

struct RecorderInner {
    state: RecorderState,
    recording: Recording,
    /// Start instant of the current session; `Some` whenever recording.
    origin: Option<Instant>,
}

impl Shared {
    /// Recording→Idle transition. No-op (and no notification) when already
    /// Idle. The buffer survives so the session stays replayable.
    fn end_session(&self) {
        let stopped = {
            let mut inner = self.inner.lock().unwrap();
            if inner.state.is_recording() {
                inner.state = RecorderState::Idle;
                Some((inner.recording.id, inner.recording.keystroke_count()))
            } else {
                None
            }
        };
        if let Some((id, count)) = stopped {
            debug!("[{}] session stopped ({} keystrokes buffered)", id, count);
            self.emit_state_change(false);
        }
    }

    fn emit_state_change(&self, recording: bool) {
        let listener = {
            let guard = self.state_listener.lock().unwrap();
            guard.as_ref().map(Arc::clone)
        };
        if let Some(listener) = listener {
            listener(recording);
        }
    }
}

impl Recorder {
    /// Creates a recorder with the default inactivity timeout.
    pub fn new(resolver: Arc<dyn SurfaceResolver>) -> Self {
        Self::with_inactivity_timeout(resolver, DEFAULT_INACTIVITY_TIMEOUT)
    }

    pub fn with_inactivity_timeout(
        resolver: Arc<dyn SurfaceResolver>,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            inactivity_timeout,
            max_keystrokes: 0,
            resolver,
            shared: Arc::new(Shared {
                inner: Mutex::new(RecorderInner {
                    state: RecorderState::Idle,
                    recording: Recording::new(),
                    origin: None,
                }),
                state_listener: Mutex::new(None),
            }),
            inactivity_timer: Mutex::new(None),
            replay_tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(config: &EngineConfig, resolver: Arc<dyn SurfaceResolver>) -> Self {
        let mut recorder = Self::with_inactivity_timeout(resolver, config.inactivity_timeout());
        recorder.max_keystrokes = config.max_keystrokes;
        recorder
    }

    /// Registers the state-change listener, replacing any prior one.
    ///
    /// The listener is invoked with the new `recording` flag exactly on
    /// Idle↔Recording transitions, outside internal locks.
    pub fn set_state_listener<F>(&self, listener: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        *self.shared.state_listener.lock().unwrap() = Some(Arc::new(listener));
    }

    /// Accepts one keystroke from the (already filtered) input stream.
    ///
    /// Behavior
    /// - When Idle: cancels any still-pending replay mutations, starts a fresh
    ///   session (the previous un-replayed buffer is discarded), and emits the
    ///   state-change notification.
    /// - Appends `{key, now − start}` to the buffer, unless the configured cap
    ///   is reached.
    /// - Re-arms the inactivity timer.
    ///
    /// Never fails; `key` is trusted to be a single printable character or a
    /// named control key per the input-stream contract.
    pub fn handle_keystroke(&self, key: impl Into<String>) {
        let key = key.into();
        let mut started = false;
        let mut discarded = None;
        {
            let mut inner = self.shared.inner.lock().unwrap();
            if !inner.state.is_recording() {
                if !inner.recording.is_empty() {
                    discarded = Some((inner.recording.id, inner.recording.keystroke_count()));
                }
                inner.recording = Recording::new();
                inner.origin = Some(Instant::now());
                inner.state = RecorderState::Recording;
                started = true;
            }
            let Some(origin) = inner.origin else {
                return;
            };
            let timestamp = origin.elapsed();
            if self.max_keystrokes > 0
                && inner.recording.keystroke_count() >= self.max_keystrokes
            {
                trace!(
                    "[{}] buffer cap {} reached, dropping {:?}",
                    inner.recording.id,
                    self.max_keystrokes,
                    key
                );
            } else {
                trace!(
                    "[{}] captured {:?} at {:?}",
                    inner.recording.id,
                    key,
                    timestamp
                );
                inner.recording.keystrokes.push(Keystroke { key, timestamp });
            }
        }
        if started {
            if let Some((id, count)) = discarded {
                debug!(
                    "[{}] discarding un-replayed recording ({} keystrokes)",
                    id, count
                );
            }
            // a new session invalidates whatever the previous replay still had queued
            self.cleanup();
            self.shared.emit_state_change(true);
        }
        self.reset_inactivity_timer();
    }

    /// Stops the current session, if any.
    ///
    /// Aborts the pending inactivity timer and emits the state-change
    /// notification on a Recording→Idle transition. Idempotent: calling while
    /// already Idle changes nothing and notifies nobody.
    pub fn stop(&self) {
        if let Some(timer) = self.inactivity_timer.lock().unwrap().take() {
            timer.abort();
        }
        self.shared.end_session();
    }

    /// True iff the buffer is non-empty, regardless of the current state.
    pub fn has_recording(&self) -> bool {
        !self.shared.inner.lock().unwrap().recording.is_empty()
    }

    pub fn state(&self) -> RecorderState {
        self.shared.inner.lock().unwrap().state
    }

    /// Snapshot of the current buffer and its session metadata.
    pub fn recording(&self) -> Recording {
        self.shared.inner.lock().unwrap().recording.clone()
    }

    /// Schedules a replay of the buffered session into the surface behind
    /// `locator` and returns its completion future.
    ///
    /// Behavior
    /// - Stops any session in progress and cancels a prior in-flight replay.
    /// - An empty buffer resolves immediately and leaves the target untouched.
    /// - Otherwise the target is cleared and one timer task per keystroke is
    ///   spawned at its absolute offset from replay start, in buffer order.
    ///   Single-character keys append, `"Backspace"` deletes the last
    ///   character, other named keys replay as no-ops.
    /// - The future resolves once the mutation with the largest offset has
    ///   executed — or as soon as the replay is cancelled.
    ///
    /// # Errors
    /// - [`ReplayError::TargetNotFound`] if `locator` does not resolve; the
    ///   recorder state is left untouched in that case.
    pub fn replay(
        &self,
        locator: &str,
    ) -> Result<impl Future<Output = ()> + Send + 'static, ReplayError> {
        let surface = self
            .resolver
            .resolve(locator)
            .ok_or_else(|| ReplayError::TargetNotFound(locator.to_string()))?;

        self.stop();
        self.cleanup();

        let recording = self.recording();
        let (done_tx, done_rx) = oneshot::channel();

        if recording.is_empty() {
            debug!(
                "[{}] replay of empty buffer, resolving immediately",
                recording.id
            );
            let _ = done_tx.send(());
        } else {
            info!(
                "[{}] replaying {} keystrokes over {:?} into {}",
                recording.id,
                recording.keystroke_count(),
                recording.duration(),
                locator
            );
            surface.set_content(String::new());

            let origin = Instant::now();
            let last = recording.keystrokes.len() - 1;
            let mut done_tx = Some(done_tx);
            let mut tasks = self.replay_tasks.lock().unwrap();
            for (index, keystroke) in recording.keystrokes.into_iter().enumerate() {
                let surface = Arc::clone(&surface);
                let final_tx = if index == last { done_tx.take() } else { None };
                tasks.push(tokio::spawn(async move {
                    time::sleep_until(origin + keystroke.timestamp).await;
                    apply_keystroke(surface.as_ref(), &keystroke.key);
                    if let Some(tx) = final_tx {
                        let _ = tx.send(());
                    }
                }));
            }
        }

        Ok(async move {
            let _ = done_rx.await;
        })
    }

    /// Cancels every outstanding scheduled replay mutation.
    ///
    /// Aborted tasks never execute their mutation; aborting a task that has
    /// already fired (or was already aborted) is a defined no-op. Idempotent
    /// and safe to call when nothing is pending.
    pub fn cleanup(&self) {
        let tasks: Vec<JoinHandle<()>> = {
            let mut pending = self.replay_tasks.lock().unwrap();
            pending.drain(..).collect()
        };
        if !tasks.is_empty() {
            debug!("cancelled {} scheduled replay mutations", tasks.len());
        }
        for task in tasks {
            task.abort();
        }
    }

    fn reset_inactivity_timer(&self) {
        let mut slot = self.inactivity_timer.lock().unwrap();
        if let Some(timer) = slot.take() {
            timer.abort();
        }
        let shared = Arc::clone(&self.shared);
        let timeout = self.inactivity_timeout;
        *slot = Some(tokio::spawn(async move {
            time::sleep(timeout).await;
            debug!("inactivity timeout after {:?}, stopping session", timeout);
            shared.end_session();
        }));
    }
}
