//! Two-thread TUI orchestration.
//!
//! Terminal I/O runs on a dedicated OS thread; all HTTP work stays on the
//! tokio runtime. Communication via `tokio::sync::mpsc` channels.

mod input;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::{App, AppCommand, FetchResult};
use crate::cache::{FetchEpoch, MutationId};
use crate::client::ApiClient;
use crate::sync::{self, MutationResult};
use crate::ui;

pub use input::handle_key;

/// How often cached data is considered stale and refetched.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Terminal events forwarded from the UI reader thread.
pub enum TermEvent {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

/// Results of background API work.
pub enum ApiEvent {
    Fetched {
        epoch: FetchEpoch,
        result: FetchResult,
    },
    Mutated {
        id: MutationId,
        what: String,
        result: MutationResult,
    },
}

/// Spawn the task that carries out `command`, reporting back on `tx`.
fn spawn_command(api: &ApiClient, tx: &mpsc::UnboundedSender<ApiEvent>, command: AppCommand) {
    let api = api.clone();
    let tx = tx.clone();
    match command {
        AppCommand::Refresh(epoch) => {
            tokio::spawn(async move {
                let result = sync::fetch_all(&api).await;
                let _ = tx.send(ApiEvent::Fetched { epoch, result });
            });
        }
        AppCommand::Mutate { id, request } => {
            let what = request.describe();
            tokio::spawn(async move {
                let result = sync::run_mutation(&api, request).await;
                let _ = tx.send(ApiEvent::Mutated { id, what, result });
            });
        }
    }
}

/// Run the interactive TUI mode until the user quits.
pub async fn run(api: ApiClient) -> anyhow::Result<()> {
    // 1. Enter raw mode, create terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 2. Channels + cancellation token
    let cancel = CancellationToken::new();
    let (term_tx, mut term_rx) = mpsc::channel::<TermEvent>(64);
    let (api_tx, mut api_rx) = mpsc::unbounded_channel::<ApiEvent>();

    // 3. Spawn dedicated OS thread for crossterm::event::read()
    let cancel_clone = cancel.clone();
    let ui_thread = std::thread::spawn(move || {
        loop {
            if cancel_clone.is_cancelled() {
                break;
            }
            // Poll with 50ms timeout so we can check cancellation
            if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        // Filter out Release events (Windows emits Press + Release per keystroke)
                        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                            continue;
                        }
                        if term_tx.blocking_send(TermEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Resize(w, h)) => {
                        if term_tx.blocking_send(TermEvent::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    });

    // 4. Main loop. The first interval tick fires immediately and triggers the initial load.
    let mut app = App::new(api.base_url(), chrono::Local::now().date_naive());
    let mut tick = tokio::time::interval(Duration::from_millis(50));
    let mut refresh = tokio::time::interval(REFRESH_INTERVAL);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            _ = tick.tick() => {
                if let Err(e) = terminal.draw(|f| ui::draw(f, &app)) {
                    break Err(e.into());
                }
            }
            _ = refresh.tick() => {
                if let Some(command) = app.request_refresh() {
                    debug!("Periodic refresh");
                    spawn_command(&api, &api_tx, command);
                }
            }
            Some(term_event) = term_rx.recv() => {
                match term_event {
                    TermEvent::Key(key) => {
                        if let Some(command) = input::handle_key(&mut app, key) {
                            spawn_command(&api, &api_tx, command);
                        }
                    }
                    TermEvent::Resize(_, _) => { /* terminal auto-handles resize on next draw */ }
                }
            }
            Some(api_event) = api_rx.recv() => {
                match api_event {
                    ApiEvent::Fetched { epoch, result } => {
                        if let Some(command) = app.finish_fetch(epoch, result) {
                            debug!("Refetching after a discarded first load");
                            spawn_command(&api, &api_tx, command);
                        }
                    }
                    ApiEvent::Mutated { id, what, result } => {
                        app.finish_mutation(id, &what, result);
                    }
                }
            }
        }
        if app.should_quit {
            break Ok(());
        }
    };

    // 5. Shutdown: signal UI thread to stop
    cancel.cancel();
    let _ = ui_thread.join(); // fast — <50ms due to poll timeout

    // 6. Restore terminal
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}
