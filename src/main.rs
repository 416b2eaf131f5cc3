//! SCADA Console - Main Entry Point
//!
//! Supervisory dashboard with simulated process variables

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use scada_console::app::actions::ConsoleAction;
use scada_console::app::console;
use scada_console::app::entities::{AppEntities, Flow};
use scada_console::app::input::{CommandLine, InputEvent};
use scada_console::constants::LOG_FILE_PREFIX;
use scada_console::domain::config::{AppConfig, LogFilter};
use scada_console::helpers::get_or_create_data_dir;
use scada_console::services::{SimulationTask, Simulator, SimulatorEvent, SystemClock};
use scada_console::state::log_state::LogLevel;
use scada_console::utils::config_store::{config_path, load_config_from};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

/// Initialize tracing: a daily log file in the data directory, plus stderr
/// when the dashboard isn't drawing on the terminal
fn init_tracing(level: LogFilter, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(level.as_level().into())
        .from_env_lossy();

    let (file_layer, guard) = match get_or_create_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    let stderr_layer = to_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Forward terminal events from a blocking reader thread
///
/// The thread exits once the receiver is gone.
fn spawn_event_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to poll terminal: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// Redraw on every store change or key press until quit
async fn run_dashboard<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppEntities,
    events: &Receiver<SimulatorEvent>,
) -> anyhow::Result<()> {
    let mut snapshots = app.store.subscribe();
    let mut terminal_events = spawn_event_reader();
    let mut command = CommandLine::default();

    loop {
        terminal.draw(|f| console::draw(f, app, &command))?;

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                app.drain_events(events);
            }
            ev = terminal_events.recv() => {
                let Some(ev) = ev else {
                    break;
                };
                if let Event::Key(key) = ev {
                    match command.handle_key(key) {
                        InputEvent::Submit(line) => match ConsoleAction::parse(&line) {
                            Ok(action) => {
                                if app.apply(action) == Flow::Quit {
                                    break;
                                }
                            }
                            Err(e) => app.logs.push_now(LogLevel::Warn, e.to_string()),
                        },
                        InputEvent::Quit => break,
                        InputEvent::None => {}
                    }
                }
                app.drain_events(events);
            }
        }
    }
    Ok(())
}

/// No terminal to draw on: keep simulating until interrupted
async fn run_headless(app: &mut AppEntities, events: &Receiver<SimulatorEvent>) {
    let mut snapshots = app.store.subscribe();
    tracing::info!("stdout is not a terminal, running without dashboard");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                app.drain_events(events);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path();
    let (config, config_error) = match path.as_ref().map(|p| load_config_from(p)) {
        Ok(Ok(config)) => (config, None),
        Ok(Err(e)) => (AppConfig::default(), Some(e.to_string())),
        Err(e) => (AppConfig::default(), Some(e.to_string())),
    };

    let interactive = io::stdout().is_terminal();
    let _guard = init_tracing(config.monitoring.log_level, !interactive);
    tracing::info!("Starting SCADA Console...");
    if let Some(e) = &config_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    let clock = Arc::new(SystemClock);
    let mut app = AppEntities::init(config, clock.clone());
    if let Ok(path) = path {
        app = app.with_config_path(path);
    }
    if let Some(e) = config_error {
        app.logs.push_now(LogLevel::Warn, format!("Config not loaded: {e}"));
    }

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let task = SimulationTask::spawn(
        app.store.clone(),
        Simulator::from_config(&app.config.simulation),
        app.config.simulation.tick_interval(),
        clock,
        event_tx,
    );

    if interactive {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = run_dashboard(&mut terminal, &mut app, &event_rx).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result?;
    } else {
        run_headless(&mut app, &event_rx).await;
    }

    task.stop().await;
    app.drain_events(&event_rx);
    tracing::info!(
        "SCADA Console exiting after {} ticks (revision {})",
        app.logs.ticks(),
        app.store.revision()
    );
    Ok(())
}
