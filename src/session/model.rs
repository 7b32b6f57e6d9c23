use crate::catalog::{Track, TrackId};
use crate::config::LoopModeSetting;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop at the ends of the queue.
    NoLoop,
    /// Wrap around to the other end of the queue.
    #[default]
    LoopAll,
}

impl LoopMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoLoop => "No-loop",
            Self::LoopAll => "Loop-around",
        }
    }
}

impl From<LoopModeSetting> for LoopMode {
    fn from(s: LoopModeSetting) -> Self {
        match s {
            LoopModeSetting::NoLoop => Self::NoLoop,
            LoopModeSetting::LoopAll => Self::LoopAll,
        }
    }
}

/// Cheap copy of the observable session state, used for change detection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub current_id: Option<TrackId>,
    pub is_playing: bool,
    /// Bumped by every `play`, including replays of the same track.
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct PlaybackSession {
    queue: Vec<Track>,
    current: Option<Track>,
    is_playing: bool,
    loop_mode: LoopMode,
    generation: u64,
}

impl PlaybackSession {
    pub fn new(loop_mode: LoopMode) -> Self {
        Self {
            loop_mode,
            ..Self::default()
        }
    }

    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current.as_ref().map(|t| &t.id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Flip between `NoLoop` and `LoopAll`.
    pub fn cycle_loop_mode(&mut self) {
        self.loop_mode = match self.loop_mode {
            LoopMode::NoLoop => LoopMode::LoopAll,
            LoopMode::LoopAll => LoopMode::NoLoop,
        };
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_id: self.current_track_id().cloned(),
            is_playing: self.is_playing,
            generation: self.generation,
        }
    }

    /// Replace the queue wholesale. Current track and playing flag are left alone.
    ///
    /// An empty list is ignored and the previous queue stays loaded; returns
    /// whether the queue was replaced.
    pub fn load_queue(&mut self, tracks: Vec<Track>) -> bool {
        if tracks.is_empty() {
            tracing::debug!("ignoring empty queue");
            return false;
        }
        tracing::debug!(len = tracks.len(), "queue loaded");
        self.queue = tracks;
        true
    }

    /// Make `track` current and start it, whether or not it is queued.
    ///
    /// A track without a media URL still becomes current; it just plays silence.
    pub fn play(&mut self, track: &Track) {
        if !track.is_playable() {
            tracing::warn!(track = %track.id, "track has no media url; nothing will be audible");
        }
        self.current = Some(track.clone());
        self.is_playing = true;
        self.generation = self.generation.wrapping_add(1);
        tracing::debug!(track = %track.id, generation = self.generation, "play");
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle(&mut self) {
        if self.current.is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    /// The play button behaviour: the current track toggles, any other track
    /// replaces it and starts.
    pub fn toggle_play_pause_for(&mut self, track: &Track) {
        if self.current_track_id() == Some(&track.id) {
            self.toggle();
        } else {
            self.play(track);
        }
    }

    /// Clear the current track entirely.
    pub fn stop(&mut self) {
        self.current = None;
        self.is_playing = false;
    }

    /// Advance to the next queued track.
    ///
    /// A current track that is not in the queue behaves as a queue of one.
    /// With `NoLoop`, stepping past the end pauses on the last track.
    /// Returns the track that started, if any.
    pub fn next(&mut self) -> Option<&Track> {
        self.step(Direction::Forward)
    }

    /// Go back to the previous queued track. At the start (or for a track
    /// outside the queue under `NoLoop`) the current track restarts.
    pub fn previous(&mut self) -> Option<&Track> {
        self.step(Direction::Backward)
    }

    fn step(&mut self, dir: Direction) -> Option<&Track> {
        let target = match self.current_track_id() {
            None => match dir {
                Direction::Forward => self.queue.first().cloned(),
                Direction::Backward => self.queue.last().cloned(),
            },
            Some(id) => match self.queue.iter().position(|t| &t.id == id) {
                Some(pos) => self.neighbour(pos, self.queue.len(), dir).map(|p| self.queue[p].clone()),
                None => self
                    .neighbour(0, 1, dir)
                    .and_then(|_| self.current.clone()),
            },
        };

        match target {
            Some(t) => {
                self.play(&t);
                self.current.as_ref()
            }
            None => {
                if self.current.is_some() {
                    tracing::debug!("end of queue");
                }
                self.pause();
                None
            }
        }
    }

    /// Position adjacent to `pos` in a list of `len`, honouring the loop mode.
    fn neighbour(&self, pos: usize, len: usize, dir: Direction) -> Option<usize> {
        match (dir, self.loop_mode) {
            (Direction::Forward, _) if pos + 1 < len => Some(pos + 1),
            (Direction::Forward, LoopMode::LoopAll) => Some(0),
            (Direction::Forward, LoopMode::NoLoop) => None,
            (Direction::Backward, _) if pos > 0 => Some(pos - 1),
            (Direction::Backward, LoopMode::LoopAll) => Some(len - 1),
            (Direction::Backward, LoopMode::NoLoop) => Some(0),
        }
    }
}

#[derive(Debug, Copy, Clone)]
enum Direction {
    Forward,
    Backward,
}
