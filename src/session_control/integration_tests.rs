//! End-to-end tests: key-event bus → controller filter → recorder buffer →
//! timed replay into a registered surface, on the paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::recording::recorder::Recorder;
use crate::recording::types::RecorderState;
use crate::session_control::controller::SessionController;
use crate::session_control::events::{KeyEvent, KeyEventBus};
use crate::surface::buffer::BufferSurface;
use crate::surface::registry::SurfaceRegistry;
use crate::surface::surface_trait::TextSurface;

struct Harness {
    controller: SessionController,
    recorder: Arc<Recorder>,
    bus: Arc<KeyEventBus>,
    surface: Arc<BufferSurface>,
}

fn harness(inactivity_timeout: Duration) -> Harness {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = Arc::new(SurfaceRegistry::new());
    let surface = Arc::new(BufferSurface::new());
    registry
        .register("#entry", surface.clone() as Arc<dyn TextSurface>)
        .expect("register surface");

    let recorder = Arc::new(Recorder::with_inactivity_timeout(registry, inactivity_timeout));
    let bus = Arc::new(KeyEventBus::new());
    let controller = SessionController::new(Arc::clone(&recorder), bus.as_ref(), "#entry");
    Harness {
        controller,
        recorder,
        bus,
        surface,
    }
}

async fn type_key(bus: &KeyEventBus, key: &str, after: Duration) {
    time::sleep(after).await;
    bus.emit(KeyEvent::plain(key));
    // let the pump forward it before the clock moves on
    time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn typo_and_correction_replays_verbatim() {
    let h = harness(Duration::from_secs(5));

    type_key(&h.bus, "h", Duration::ZERO).await;
    type_key(&h.bus, "u", Duration::from_millis(90)).await;
    type_key(&h.bus, "Backspace", Duration::from_millis(200)).await;
    type_key(&h.bus, "i", Duration::from_millis(110)).await;
    assert!(h.controller.is_recording());

    h.recorder.stop();
    assert!(!h.controller.is_recording());
    assert!(h.controller.has_recording());

    let done = h.controller.replay().expect("resolve target");
    done.await;

    assert_eq!(h.surface.content(), "hi");
    // the correction happened live: "h" -> "hu" -> "h" -> "hi"
    assert_eq!(h.recorder.recording().keystroke_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn inactivity_auto_stop_flows_through_controller() {
    let h = harness(Duration::from_millis(300));

    type_key(&h.bus, "a", Duration::ZERO).await;
    assert!(h.controller.is_recording());

    time::sleep(Duration::from_millis(400)).await;
    assert_eq!(h.recorder.state(), RecorderState::Idle);
    assert!(!h.controller.is_recording());
    assert!(h.controller.has_recording());
}

#[tokio::test(start_paused = true)]
async fn next_session_replaces_timed_out_one() {
    let h = harness(Duration::from_millis(300));

    type_key(&h.bus, "o", Duration::ZERO).await;
    type_key(&h.bus, "l", Duration::from_millis(50)).await;
    type_key(&h.bus, "d", Duration::from_millis(50)).await;
    time::sleep(Duration::from_millis(400)).await; // times out

    type_key(&h.bus, "n", Duration::ZERO).await;
    type_key(&h.bus, "e", Duration::from_millis(50)).await;
    type_key(&h.bus, "w", Duration::from_millis(50)).await;
    h.recorder.stop();

    let done = h.controller.replay().expect("resolve target");
    done.await;
    assert_eq!(h.surface.content(), "new");
}

#[tokio::test(start_paused = true)]
async fn replay_is_repeatable() {
    let h = harness(Duration::from_secs(5));

    type_key(&h.bus, "o", Duration::ZERO).await;
    type_key(&h.bus, "k", Duration::from_millis(60)).await;
    h.recorder.stop();

    h.controller.replay().expect("resolve target").await;
    assert_eq!(h.surface.content(), "ok");

    // the buffer survives a replay, so the session can be replayed again
    h.controller.replay().expect("resolve target").await;
    assert_eq!(h.surface.content(), "ok");
}
