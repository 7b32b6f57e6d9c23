use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a track, namespaced by where it came from.
///
/// Local ids are assigned by the directory scan; external ids are the
/// third-party string ids kept verbatim. The two spaces never overlap, so
/// `Local(7)` and `External("7")` are different tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "lowercase")]
pub enum TrackId {
    Local(u64),
    External(String),
}

impl TrackId {
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(n) => write!(f, "local:{n}"),
            Self::External(s) => write!(f, "external:{s}"),
        }
    }
}
