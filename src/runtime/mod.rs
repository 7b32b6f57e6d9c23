use std::env;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions::ActionWorker;
use crate::app::App;
use crate::audio::AudioPlayer;
use crate::logging::init_logging;
use crate::notify::Notifications;

mod audio_sync;
mod event_loop;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let (settings, config_problem) = settings::load_settings();

    // Keep the guard alive until the terminal is restored.
    let _log_guard = match init_logging(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("playdeck: logging disabled: {e}");
            None
        }
    };
    tracing::info!("=== playdeck starting ===");
    if let Some(msg) = &config_problem {
        tracing::warn!("{msg}");
    }

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let tracks = startup::load_tracks(Path::new(&dir), &settings.library)?;
    let notices = Notifications::new(
        Duration::from_millis(settings.ui.notice_ttl_ms),
        settings.ui.max_notices,
    );
    let mut app = App::new(tracks, startup::build_session(&settings), notices);
    app.set_current_dir(dir);
    if let Some(msg) = config_problem {
        app.notices.error(msg);
    }

    let mut worker = ActionWorker::spawn(
        startup::open_playlists(&settings.actions),
        settings.actions.downloads_dir.clone(),
    );
    app.set_playlists(worker.initial_playlists().to_vec());

    let audio_player = AudioPlayer::new(settings.audio.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if settings.ui.mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &worker);

    disable_raw_mode()?;
    if settings.ui.mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    worker.shutdown();
    if let Err(e) = &run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("=== playdeck stopped ===");
    run_result
}
