use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::LibrarySettings;

use super::display::display_from_fields;
use super::id::TrackId;
use super::model::Track;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog record {0:?} is marked local; local tracks only come from the directory scan")]
    LocalSource(String),
    #[error("duplicate track id {0}")]
    DuplicateId(TrackId),
    #[error("track {id} has an invalid duration {seconds}")]
    BadDuration { id: TrackId, seconds: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawSource {
    Local,
    #[default]
    External,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrack {
    id: RawId,
    #[serde(default)]
    source: RawSource,
    title: String,
    #[serde(default, alias = "artist")]
    artist_name: Option<String>,
    #[serde(default, alias = "album")]
    album_title: Option<String>,
    #[serde(default, alias = "duration_seconds")]
    duration_seconds: Option<f64>,
    #[serde(default, alias = "media_url", alias = "url")]
    media_url: Option<String>,
    #[serde(default)]
    genre: Option<String>,
}

impl RawTrack {
    fn track_id(&self) -> Result<TrackId, CatalogError> {
        let id = match &self.id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.clone(),
        };
        match self.source {
            RawSource::Local => Err(CatalogError::LocalSource(id)),
            RawSource::External => Ok(TrackId::External(id)),
        }
    }

    fn into_track(self, settings: &LibrarySettings) -> Result<Track, CatalogError> {
        let id = self.track_id()?;

        let duration = match self.duration_seconds {
            None => None,
            Some(s) if s.is_finite() && s >= 0.0 => Some(Duration::from_secs_f64(s)),
            Some(seconds) => return Err(CatalogError::BadDuration { id, seconds }),
        };

        let display = display_from_fields(
            &self.title,
            self.artist_name.as_deref(),
            self.album_title.as_deref(),
            self.genre.as_deref(),
            &settings.display_fields,
            &settings.display_separator,
        );

        Ok(Track {
            id,
            title: self.title,
            artist_name: self.artist_name,
            album_title: self.album_title,
            duration,
            media_url: self.media_url.unwrap_or_default(),
            genre: self.genre,
            display,
        })
    }
}

/// Parse a JSON array of track records.
///
/// `source` defaults to `"external"`; `"local"` is an error because the
/// scan owns the local id space. Ids must be unique across the file.
pub fn parse_catalog(json: &str, settings: &LibrarySettings) -> Result<Vec<Track>, CatalogError> {
    let raw: Vec<RawTrack> = serde_json::from_str(json)?;

    let mut seen: HashSet<TrackId> = HashSet::with_capacity(raw.len());
    let mut tracks = Vec::with_capacity(raw.len());
    for r in raw {
        let track = r.into_track(settings)?;
        if !seen.insert(track.id.clone()) {
            return Err(CatalogError::DuplicateId(track.id));
        }
        tracks.push(track);
    }
    Ok(tracks)
}

pub fn load_catalog_file(path: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tracks = parse_catalog(&json, settings)?;
    tracing::debug!(path = %path.display(), count = tracks.len(), "loaded catalog file");
    Ok(tracks)
}

/// Scanned tracks first, then catalog tracks. Fails on an id present in both.
pub fn merge(scanned: Vec<Track>, catalog: Vec<Track>) -> Result<Vec<Track>, CatalogError> {
    let mut seen: HashSet<TrackId> = scanned.iter().map(|t| t.id.clone()).collect();
    let mut tracks = scanned;
    tracks.reserve(catalog.len());
    for t in catalog {
        if !seen.insert(t.id.clone()) {
            return Err(CatalogError::DuplicateId(t.id));
        }
        tracks.push(t);
    }
    Ok(tracks)
}
