use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::TrackId;

use super::types::{ActionError, PlaylistId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub tracks: Vec<TrackId>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    next_id: PlaylistId,
    playlists: Vec<Playlist>,
}

/// User playlists, optionally persisted as JSON.
#[derive(Debug, Default)]
pub struct PlaylistStore {
    file: StoreFile,
    path: Option<PathBuf>,
}

impl PlaylistStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `dir/playlists.json`. A missing file starts empty;
    /// an unreadable one is logged and replaced on the next save.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join("playlists.json");
        let file = match std::fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed playlists file");
                StoreFile::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read playlists file");
                StoreFile::default()
            }
        };
        Self {
            file,
            path: Some(path),
        }
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.file.playlists
    }

    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.file.playlists.iter().find(|p| p.id == id)
    }

    /// Append `track` to playlist `id`. Returns the playlist name.
    pub fn add_track(&mut self, id: PlaylistId, track: TrackId) -> Result<String, ActionError> {
        let playlist = self
            .file
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ActionError::UnknownPlaylist)?;
        if playlist.tracks.contains(&track) {
            return Err(ActionError::AlreadyInPlaylist(playlist.name.clone()));
        }
        playlist.tracks.push(track);
        let name = playlist.name.clone();
        if let Err(e) = self.save() {
            if let Some(p) = self.file.playlists.iter_mut().find(|p| p.id == id) {
                p.tracks.pop();
            }
            return Err(e);
        }
        Ok(name)
    }

    /// Create a playlist holding just `track`. Names are trimmed and must be
    /// unique ignoring case.
    pub fn create(&mut self, name: &str, track: TrackId) -> Result<&Playlist, ActionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::EmptyPlaylistName);
        }
        if self
            .file
            .playlists
            .iter()
            .any(|p| p.name.to_lowercase() == name.to_lowercase())
        {
            return Err(ActionError::DuplicatePlaylistName(name.to_string()));
        }

        self.file.next_id += 1;
        let id = self.file.next_id;
        self.file.playlists.push(Playlist {
            id,
            name: name.to_string(),
            tracks: vec![track],
        });
        if let Err(e) = self.save() {
            self.file.playlists.pop();
            self.file.next_id -= 1;
            return Err(e);
        }
        self.get(id).ok_or(ActionError::UnknownPlaylist)
    }

    fn save(&self) -> Result<(), ActionError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ActionError::Persist(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&self.file)
            .map_err(|e| ActionError::Persist(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| ActionError::Persist(e.to_string()))
    }
}
