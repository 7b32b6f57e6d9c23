use crate::audio::{AudioCmd, PlaybackInfo};
use crate::session::{PlaybackSession, SessionSnapshot};

/// Mirrors the playback session onto the audio thread.
///
/// The session is the source of truth. Each tick the runtime diffs it
/// against the last snapshot and sends only what changed.
#[derive(Debug, Default)]
pub struct AudioSync {
    last: SessionSnapshot,
    /// Generation whose end-of-track already advanced the session.
    advanced: Option<u64>,
}

impl AudioSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current track ran out and the session should move on.
    ///
    /// Fires once per generation, and only while the session still wants
    /// that generation playing.
    pub fn should_advance(
        &mut self,
        session: &PlaybackSession,
        info: &PlaybackInfo,
        auto_advance: bool,
    ) -> bool {
        let generation = session.snapshot().generation;
        if !auto_advance
            || !session.is_playing()
            || !info.finished
            || info.generation != Some(generation)
            || self.advanced == Some(generation)
        {
            return false;
        }
        self.advanced = Some(generation);
        true
    }

    /// Commands that bring the audio thread in line with `session`.
    pub fn commands(&mut self, session: &PlaybackSession, info: &PlaybackInfo) -> Vec<AudioCmd> {
        let now = session.snapshot();
        if now == self.last {
            return Vec::new();
        }
        let prev = std::mem::replace(&mut self.last, now.clone());

        let Some(track) = session.current() else {
            return if prev.current_id.is_some() {
                vec![AudioCmd::Stop]
            } else {
                Vec::new()
            };
        };

        if now.generation != prev.generation {
            let Some(path) = track.local_path() else {
                tracing::warn!(track = %track.id, url = %track.media_url, "no local media to play");
                return vec![AudioCmd::Stop];
            };
            let mut cmds = vec![AudioCmd::Load {
                path,
                generation: now.generation,
            }];
            if !now.is_playing {
                cmds.push(AudioCmd::Pause);
            }
            return cmds;
        }

        match (prev.is_playing, now.is_playing) {
            (false, true) => {
                // A finished sink has nothing left to resume; start it over.
                if info.finished && info.generation == Some(now.generation) {
                    match track.local_path() {
                        Some(path) => vec![AudioCmd::Load {
                            path,
                            generation: now.generation,
                        }],
                        None => Vec::new(),
                    }
                } else {
                    vec![AudioCmd::Resume]
                }
            }
            (true, false) => vec![AudioCmd::Pause],
            _ => Vec::new(),
        }
    }
}
