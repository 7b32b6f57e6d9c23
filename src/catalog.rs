//! Track catalog: the read-only list of tracks every view renders.
//!
//! Tracks come from two places. A directory scan produces locally owned
//! files (`TrackId::Local`), and an optional JSON catalog supplies
//! externally sourced tracks (`TrackId::External`). Local ids belong to the
//! scan alone, so catalog records marked `"source": "local"` are rejected.

mod display;
mod id;
mod load;
mod model;
mod scan;

pub use id::TrackId;
pub use load::{load_catalog_file, merge};
pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
