mod commands;
pub mod clock;
pub mod display;
pub mod scheduler;
mod settings;
pub mod stopwatch;
pub mod time_source;
mod utils;

use std::rc::Rc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    signal,
    task::LocalSet,
};

use clock::{ClockController, ClockFace};
use commands::{dispatch, Flow, WidgetCommand};
use display::{JsonSurface, RenderSink, TerminalSurface, Theme};
use scheduler::{LocalScheduler, Scheduler};
use settings::{OutputMode, SettingsStore, WidgetSettings};
use stopwatch::{format_elapsed, StopwatchAccumulator, StopwatchController};

pub use settings::{DEBUG_VAR, SETTINGS_PATH_VAR};

pub(crate) struct AppState {
    pub(crate) clock: ClockController,
    pub(crate) stopwatch: StopwatchController,
}

impl AppState {
    pub(crate) fn new(
        settings: &WidgetSettings,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn RenderSink>,
    ) -> Self {
        Self {
            clock: ClockController::new(
                ClockFace::new(settings.use_24_hour),
                scheduler.clone(),
                sink.clone(),
                settings.clock_interval(),
            ),
            stopwatch: StopwatchController::new(
                StopwatchAccumulator::new(),
                scheduler,
                sink,
                settings.stopwatch_interval(),
            ),
        }
    }
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    let level = if settings::debug_mode() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    info!("neonclock starting up...");

    let store = SettingsStore::from_env()?;
    if let Some(path) = store.path() {
        info!("Using settings path {}", path.display());
    }
    let settings = store.settings().clone();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the tokio runtime")?;

    // Every tick, command and redraw runs on this one thread.
    LocalSet::new().block_on(&runtime, run_widget(settings))
}

async fn run_widget(settings: WidgetSettings) -> Result<()> {
    let theme = Theme::from_hex(&settings.accent).context("Invalid accent color in settings")?;
    let sink: Rc<dyn RenderSink> = match settings.output {
        OutputMode::Terminal => Rc::new(TerminalSurface::new(
            theme,
            ClockFace::new(settings.use_24_hour).toggle_label().to_string(),
            format_elapsed(0),
        )),
        OutputMode::Json => Rc::new(JsonSurface),
    };

    let state = AppState::new(&settings, Rc::new(LocalScheduler), sink);
    state.clock.start();

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read command from stdin")? else {
                    info!("stdin closed; shutting down");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<WidgetCommand>() {
                    Ok(command) => {
                        if dispatch(&state, command) == Flow::Exit {
                            break;
                        }
                    }
                    Err(err) => warn!("{}", err),
                }
            }
            _ = signal::ctrl_c() => {
                info!("Interrupted; shutting down");
                break;
            }
        }
    }

    state.clock.stop();
    state.stopwatch.stop();
    if settings.output == OutputMode::Terminal {
        println!();
    }
    Ok(())
}
