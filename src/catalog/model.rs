use std::path::PathBuf;
use std::time::Duration;

use super::id::TrackId;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_name: Option<String>,
    pub album_title: Option<String>,
    pub duration: Option<Duration>,
    /// Empty when the track has nothing to play.
    pub media_url: String,
    pub genre: Option<String>,
    pub display: String,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.media_url.trim().is_empty()
    }

    pub fn artist_or_unknown(&self) -> &str {
        self.artist_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_ARTIST)
    }

    pub fn album_or_unknown(&self) -> &str {
        self.album_title
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_ALBUM)
    }

    /// Local filesystem path behind `media_url`, if it names one.
    ///
    /// Accepts plain paths and `file://` URLs; anything with another scheme
    /// (http, https, spotify, ...) is not local.
    pub fn local_path(&self) -> Option<PathBuf> {
        let url = self.media_url.trim();
        if url.is_empty() {
            return None;
        }
        if let Some(rest) = url.strip_prefix("file://") {
            return Some(PathBuf::from(rest));
        }
        if url.contains("://") {
            return None;
        }
        Some(PathBuf::from(url))
    }
}
