//! mini-apps - a page of small terminal widgets
//!
//! Todo list, Pomodoro timer, stopwatch, tic-tac-toe, a music player shell
//! and a scratchpad, sharing one tick scheduler and one persistent store.

mod clipboard;
mod config;
mod core;
mod frontend;
mod scheduler;
mod sound;
mod store;
mod widgets;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(ClapParser)]
#[command(name = "mini-apps")]
#[command(about = "A page of small terminal widgets", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.mini-apps)
    /// Can also be set via MINI_APPS_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Key namespace for persisted state (overrides store.namespace)
    #[arg(short, long, value_name = "NS")]
    namespace: Option<String>,

    /// Keep all state in memory; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every persisted key and value, then exit
    ShowState,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }
    let base_dir = config::Config::base_dir()?;
    std::fs::create_dir_all(&base_dir)
        .context(format!("Failed to create data directory: {:?}", base_dir))?;

    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Using data directory {:?}", base_dir);

    if let Some(command) = cli.command {
        match command {
            Commands::ShowState => return show_state(),
        }
    }

    let mut config = if let Some(config_path) = &cli.config {
        config::Config::load_from_path(config_path)?
    } else {
        config::Config::load()?
    };
    if let Some(namespace) = cli.namespace {
        config.store.namespace = namespace;
    }

    let backend: store::SharedStore = if cli.ephemeral {
        tracing::info!("Ephemeral session, state is kept in memory only");
        Rc::new(RefCell::new(store::MemoryStore::new()))
    } else {
        Rc::new(RefCell::new(store::FileStore::open(
            config::Config::store_path()?,
        )?))
    };
    let widget_store = store::WidgetStore::new(backend, config.store.namespace.clone());

    let alert = match config.expiry_sound_path() {
        Ok(path) => sound::AlertPlayer::new(config.sound.enabled, path, config.sound.volume),
        Err(e) => {
            tracing::warn!("Could not resolve expiry sound: {:#}", e);
            sound::AlertPlayer::silent()
        }
    };

    let app_core = core::AppCore::new(config, widget_store).with_alert(alert);
    run_tui(app_core)
}

/// Dump the store file to stdout without modifying it
fn show_state() -> Result<()> {
    let path = config::Config::store_path()?;
    let entries = store::FileStore::read_entries(&path)?;
    if entries.is_empty() {
        println!("No saved state in {:?}", path);
        return Ok(());
    }

    println!("Saved state in {:?}:", path);
    for (key, value) in &entries {
        println!("  {} = {}", key, value);
    }
    Ok(())
}

/// Run TUI frontend
fn run_tui(app_core: core::AppCore) -> Result<()> {
    // Current-thread runtime: widget state is Rc-based and lives on one task
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async_run_tui(app_core))
}

/// Async TUI main loop: terminal events and frame ticks
async fn async_run_tui(mut app_core: core::AppCore) -> Result<()> {
    use crossterm::event::EventStream;
    use frontend::{Frontend, FrontendEvent, TuiFrontend};
    use futures::StreamExt;
    use std::time::Instant;
    use tokio::time::MissedTickBehavior;

    let mut frontend = TuiFrontend::new(&app_core)?;
    let mut events = EventStream::new();
    let (width, height) = frontend.size();
    tracing::info!("Terminal size {}x{}", width, height);

    let mut frame = tokio::time::interval(app_core.config.ui.frame_interval());
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Entering main loop");
    while app_core.running {
        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    if let Some(event) = FrontendEvent::from_crossterm(event) {
                        handle_frontend_event(&mut app_core, &mut frontend, event);
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("Terminal event error: {}", e);
                    app_core.quit();
                }
                None => handle_frontend_event(&mut app_core, &mut frontend, FrontendEvent::Quit),
            },
            _ = frame.tick() => {}
        }

        app_core.poll_ticks(Instant::now());

        if app_core.needs_render && app_core.running {
            frontend.render(&app_core)?;
            app_core.needs_render = false;
        }
    }

    frontend.cleanup()?;
    tracing::info!("Exited cleanly");
    Ok(())
}

fn handle_frontend_event(
    app_core: &mut core::AppCore,
    frontend: &mut frontend::TuiFrontend,
    event: frontend::FrontendEvent,
) {
    use frontend::{FrontendEvent, KeyPress};
    use std::time::Instant;

    match event {
        FrontendEvent::Key(KeyPress { code, modifiers }) => {
            // Status messages last until the next key press
            if !app_core.status_text.is_empty() {
                app_core.status_text.clear();
                app_core.needs_render = true;
            }
            frontend
                .editors
                .handle_key(app_core, code, modifiers, Instant::now());
        }
        FrontendEvent::Resize(width, height) => {
            tracing::debug!("Resized to {}x{}", width, height);
            app_core.needs_render = true;
        }
        FrontendEvent::Paste(text) => frontend.editors.handle_paste(app_core, &text),
        FrontendEvent::Quit => app_core.quit(),
    }
}
