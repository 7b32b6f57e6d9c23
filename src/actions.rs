//! Per-track actions behind the context menu and their status side-channels.
//!
//! Requests run on a background worker; the event loop marks the track as
//! in flight in `ActionStatus`, and applies the `ActionOutcome` when it
//! arrives. Playback state is never touched by any of this.

mod playlists;
mod status;
mod types;
mod worker;

pub use playlists::{Playlist, PlaylistStore};
pub use status::{ActionStatus, LikeState};
pub use types::*;
pub use worker::ActionWorker;

#[cfg(test)]
mod tests;
