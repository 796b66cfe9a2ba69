use clap::Parser;
use keyecho::configuration::config::EngineConfig;
use keyecho::recording::Recorder;
use keyecho::session_control::{KeyEvent, KeyEventBus, SessionController};
use keyecho::surface::{BufferSurface, SurfaceRegistry, TextSurface};
use log::{error, info};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "keyecho")]
#[command(version = "0.1.0")]
#[command(about = "Keystroke capture and timed replay demo")]
struct Args {
    /// Optional TOML configuration file
    #[arg(long, env = "KEYECHO_CONFIG")]
    config_file: Option<String>,

    /// Text typed by the scripted demo session
    #[arg(long, env = "KEYECHO_TEXT", default_value = "hello")]
    text: String,

    /// Pause between scripted keystrokes in milliseconds
    #[arg(long, default_value_t = 120)]
    keystroke_pause_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
==============================================================================
           keyecho — keystroke capture and timed replay engine demo
==============================================================================
"
    );

    let args = Args::parse();

    let config = match &args.config_file {
        Some(path) => match EngineConfig::from_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Unable to import configuration from file: {:?}", e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    info!(
        "Configuration loaded, replay target is {}",
        config.target_locator
    );

    let registry = Arc::new(SurfaceRegistry::new());
    let surface = Arc::new(BufferSurface::new());
    if let Err(e) = registry.register(&config.target_locator, surface.clone()) {
        error!("Unable to register the demo surface: {}, exiting...", e);
        std::process::exit(1);
    }

    let recorder = Arc::new(Recorder::from_config(&config, registry));
    let bus = Arc::new(KeyEventBus::new());
    let controller = SessionController::new(
        Arc::clone(&recorder),
        bus.as_ref(),
        config.target_locator.clone(),
    );

    // Scripted session: type the text, fumble the last character, fix it.
    let pause = Duration::from_millis(args.keystroke_pause_ms);
    info!("Recording a scripted session: {:?}", args.text);
    for ch in args.text.chars() {
        bus.emit(KeyEvent::plain(ch.to_string()));
        tokio::time::sleep(pause).await;
    }
    bus.emit(KeyEvent::plain("#"));
    tokio::time::sleep(pause * 2).await;
    bus.emit(KeyEvent::plain("Backspace"));
    tokio::time::sleep(pause).await;

    recorder.stop();

    let recording = recorder.recording();
    info!(
        "Captured {} keystrokes over {:?}",
        recording.keystroke_count(),
        recording.duration()
    );

    let done = match controller.replay() {
        Ok(done) => done,
        Err(e) => {
            error!("Unable to replay the session: {}, exiting...", e);
            std::process::exit(1);
        }
    };
    info!("Replaying with original pacing...");
    done.await;

    controller.detach();
    println!("replayed text: {}", surface.content());
}
