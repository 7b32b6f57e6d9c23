use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions::ActionWorker;
use crate::app::{App, Intent};
use crate::audio::AudioPlayer;
use crate::config;
use crate::runtime::audio_sync::AudioSync;
use crate::ui::{self, FrameAreas};

/// Main terminal event loop: folds in action outcomes, keeps the audio
/// thread in step with the session, draws, then handles one input event.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    worker: &ActionWorker,
) -> anyhow::Result<()> {
    let playback = audio_player.playback_handle();
    let mut sync = AudioSync::new();

    loop {
        for outcome in worker.drain() {
            app.apply_outcome(outcome);
        }

        let info = playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default();

        if sync.should_advance(&app.session, &info, settings.playback.auto_advance) {
            app.session.next();
        }
        for cmd in sync.commands(&app.session, &info) {
            audio_player.send(cmd);
        }

        app.notices.prune(Instant::now());

        let mut areas = FrameAreas::default();
        terminal.draw(|f| areas = ui::draw(f, app, &settings.ui, &info))?;
        app.list = areas.list;
        if app.menu.open_track_id().is_some() {
            app.menu.set_bounds(areas.menu);
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let intent = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            _ => Intent::None,
        };

        match intent {
            Intent::None => {}
            Intent::Quit => {
                audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
                return Ok(());
            }
            Intent::Send(req) => {
                if let Err(e) = worker.send(req.clone()) {
                    tracing::warn!(error = %e, "dropping action request");
                    app.request_failed(&req, &e.to_string());
                }
            }
        }
    }
}
