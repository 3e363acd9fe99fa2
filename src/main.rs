mod action;
mod app;
mod config;
mod model;
mod store;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;
use store::Store;

#[derive(Parser, Debug)]
#[command(name = "habitflow")]
#[command(about = "Terminal habit tracker and journal")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/habitflow/config.toml")]
    config: String,

    /// Data file path (overrides [data] path from the config)
    #[arg(long)]
    data: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<String>,
}

fn init_logging(log_file: Option<&str>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "habitflow=info".into());

    match log_file {
        Some(path) => {
            let path = shellexpand::tilde(path);
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path.as_ref())
                .with_context(|| format!("Failed to open log file {}", path))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(data) = cli.data {
        config.data.path = Some(data);
    }

    // Open the data file
    let data_path = config.data_path();
    let store = Store::open(&data_path)
        .await
        .with_context(|| format!("Failed to open data file {}", data_path.display()))?;

    // Create app state before touching the terminal so config errors print cleanly
    let mut app = App::new(config, store)?;
    tracing::info!(
        "Loaded {} habits and {} journal entries",
        app.snapshot().habits.len(),
        app.snapshot().entries.len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(action) = app.handle_key(key) {
                    app.apply(action).await;
                }
            }
        } else {
            // Idle tick: pick up a date change so streaks and the header stay current
            app.refresh();
        }

        if app.should_quit() {
            tracing::debug!("Exiting");
            return Ok(());
        }
    }
}
