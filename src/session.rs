//! Playback session: the single source of truth for which track is active
//! and whether it is playing.
//!
//! One `PlaybackSession` is built at startup and handed by reference to
//! every consumer. It never touches audio or the network; the runtime
//! watches `snapshot()` and drives the output from it.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
