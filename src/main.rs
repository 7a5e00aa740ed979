mod app;
mod config;
mod input;
mod sim;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use sim::clock::SystemClock;
use sim::game::Game;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let mut game = match config.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::from_entropy(),
    };
    info!(seed = ?config.seed, fps = config.fps, "studio opening");

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut game, config.frame_interval()).await;
    restore_terminal(&mut terminal)?;

    info!(
        money = game.state.money,
        days = game.state.days,
        fans = game.state.fans,
        "studio closed"
    );
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    frame_interval: Duration,
) -> Result<()> {
    let mut app = App::new(SystemClock::new(), game);

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    // the reader exits within one poll interval of `input_rx` being dropped
    task::spawn_blocking(move || {
        input::forward_events(|| input::next_terminal_event(input::POLL_INTERVAL), input_tx)
    });

    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app.snapshot()))?;
        if app.should_quit() {
            break;
        }

        let timeout = frame_interval
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        tokio::select! {
            Some(event) = input_rx.recv() => {
                handle_event(event, &mut app, game);
            }
            _ = tokio::time::sleep(timeout) => {
                last_frame = Instant::now();
                app.refresh(game);
            }
        }
    }

    drop(input_rx);
    Ok(())
}

fn handle_event(event: Event, app: &mut App, game: &mut Game) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(key, app, game),
        _ => {}
    }
}

fn handle_key_event(key: KeyEvent, app: &mut App, game: &mut Game) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.request_quit();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.request_quit(),
        KeyCode::Enter => app.submit(game),
        KeyCode::Backspace => app.backspace(game),
        KeyCode::Char(ch) => app.type_char(game, ch),
        _ => {}
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
