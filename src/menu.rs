//! Per-track context menu coordination.
//!
//! One `MenuCoordinator` serves a whole rendered list: at most one track's
//! menu is open, its playlist submenu may be shown, and the "create
//! playlist" modal may sit on top of the submenu.

mod model;

pub use model::*;
