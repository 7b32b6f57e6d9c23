use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// Sink plus the bookkeeping needed to report elapsed time.
struct Current {
    sink: Sink,
    generation: u64,
    paused: bool,
    /// Sticky until the next load, so a slow reader still sees it.
    finished: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Current {
    fn report(&self) -> SinkReport {
        SinkReport {
            generation: self.generation,
            elapsed: self.elapsed(),
            finished: self.finished,
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.sink.pause();
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
        self.paused = true;
    }

    fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.sink.play();
        self.started_at = Some(Instant::now());
        self.paused = false;
    }
}

/// What the thread exposes about its loaded sink.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SinkReport {
    generation: u64,
    elapsed: Duration,
    finished: bool,
}

fn publish_sink(info: &mut PlaybackInfo, report: Option<SinkReport>) {
    match report {
        Some(r) => {
            info.generation = Some(r.generation);
            info.elapsed = r.elapsed;
            info.finished = r.finished;
        }
        None => {
            info.generation = None;
            info.elapsed = Duration::ZERO;
            info.finished = false;
        }
    }
}

/// The error reflects the latest load only; a good load clears it.
fn record_load(info: &mut PlaybackInfo, result: Result<(), String>) {
    info.error = result.err();
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "no audio output device; playback will be silent");
                if let Ok(mut info) = playback_info.lock() {
                    info.error = Some(format!("no audio output: {e}"));
                }
                // Keep draining so senders never notice.
                while let Ok(cmd) = rx.recv() {
                    if matches!(cmd, AudioCmd::Quit { .. }) {
                        break;
                    }
                }
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);

        let volume = audio_settings.volume;
        let mut current: Option<Current> = None;

        let publish = |current: &Option<Current>| {
            if let Ok(mut info) = playback_info.lock() {
                publish_sink(&mut info, current.as_ref().map(Current::report));
            }
        };
        let record = |result: Result<(), String>| {
            if let Ok(mut info) = playback_info.lock() {
                record_load(&mut info, result);
            }
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Load { path, generation }) => {
                    if let Some(old) = current.take() {
                        old.sink.stop();
                    }
                    match create_sink(&stream, &path) {
                        Ok(sink) => {
                            sink.set_volume(volume);
                            sink.play();
                            tracing::debug!(path = %path.display(), generation, "sink started");
                            current = Some(Current {
                                sink,
                                generation,
                                paused: false,
                                finished: false,
                                started_at: Some(Instant::now()),
                                accumulated: Duration::ZERO,
                            });
                            record(Ok(()));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "cannot play media");
                            record(Err(e.to_string()));
                        }
                    }
                    publish(&current);
                }
                Ok(AudioCmd::Pause) => {
                    if let Some(c) = current.as_mut() {
                        c.pause();
                    }
                    publish(&current);
                }
                Ok(AudioCmd::Resume) => {
                    if let Some(c) = current.as_mut() {
                        c.resume();
                    }
                    publish(&current);
                }
                Ok(AudioCmd::Stop) => {
                    if let Some(old) = current.take() {
                        old.sink.stop();
                    }
                    publish(&current);
                }
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(c) = current.take() {
                        if !c.paused {
                            fade_out_sink(&c.sink, volume, fade_out_ms);
                        }
                        c.sink.stop();
                    }
                    publish(&None);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic progress update and end-of-track detection.
                    if let Some(c) = current.as_mut() {
                        if !c.paused && c.sink.empty() {
                            tracing::debug!(generation = c.generation, "track finished");
                            c.pause();
                            c.finished = true;
                        }
                    }
                    if current.is_some() {
                        publish(&current);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread stopped");
    })
}
