//! Application module: the model the TUI renders and the input handling
//! that drives it.
//!
//! `App` owns the playback session and the menu coordinator for the track
//! list; `app::input` maps key and mouse events onto them.

mod input;
mod model;

pub use model::*;
