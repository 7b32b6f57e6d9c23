//! Audio-related small types and handles.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Start `path` from the beginning, tagged with the session generation.
    Load { path: PathBuf, generation: u64 },
    Pause,
    Resume,
    /// Stop and forget the current sink.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the event loop.
pub struct PlaybackInfo {
    /// Generation of the loaded sink, if any.
    pub generation: Option<u64>,
    /// Elapsed playback time for the current sink.
    pub elapsed: Duration,
    /// The loaded sink ran out of samples.
    pub finished: bool,
    /// Why the last load or the output device failed.
    pub error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}
