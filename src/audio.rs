//! Audio output: renders the session's current track through `rodio`.
//!
//! The player thread only knows about local files. The runtime translates
//! session changes into `AudioCmd`s; anything the thread cannot open is
//! logged and stays silent.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;
