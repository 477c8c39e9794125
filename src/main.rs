//! Flapper entry point
//!
//! Sets up logging and the terminal, shows the title, then runs the scene
//! until it quits or fails. Terminal events are pumped from a blocking thread.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::thread;

use crossterm::event;
use tokio::sync::mpsc;

use flapper::shell::TermCanvas;
use flapper::shell::term::TerminalGuard;
use flapper::{GameError, InputEvent, Scene, Settings};

const TITLE: &str = "Flappy Gopher";

#[tokio::main]
async fn main() {
    let config = std::env::args_os().nth(1).map(PathBuf::from);
    let (settings, source) = Settings::load(config.as_deref());
    init_logging(&settings);
    source.log();
    log::info!("Flapper starting...");

    if let Err(e) = run(settings).await {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(2);
    }
    log::info!("Bye");
}

fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &settings.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("could not open log file {}: {}", path.display(), e),
        }
    }
    builder.init();
}

async fn run(settings: Settings) -> Result<(), GameError> {
    let _terminal = TerminalGuard::enter().map_err(GameError::Terminal)?;
    let canvas = TermCanvas::new(BufWriter::new(io::stdout())).map_err(GameError::Terminal)?;
    let mut scene = Scene::new(canvas, &settings)?;

    scene.show_title(TITLE)?;
    tokio::time::sleep(settings.title_duration()).await;

    let (events, events_rx) = mpsc::unbounded_channel();
    let mut errors = scene.run(events_rx);
    // Blocks on terminal reads; torn down with the process
    thread::spawn(move || pump_events(events));

    match errors.recv().await {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn pump_events(events: mpsc::UnboundedSender<InputEvent>) {
    loop {
        match event::read() {
            Ok(ev) => {
                if events.send(InputEvent::from(ev)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("Reading terminal events failed: {}", e);
                let _ = events.send(InputEvent::Quit);
                break;
            }
        }
    }
}
