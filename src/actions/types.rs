use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Track, TrackId};

pub type PlaylistId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    AddToPlaylist { playlist: PlaylistId, track: TrackId },
    CreatePlaylist { name: String, track: TrackId },
    Download { track: Track },
    ToggleLike { track: TrackId },
}

impl ActionRequest {
    pub fn track_id(&self) -> &TrackId {
        match self {
            Self::AddToPlaylist { track, .. }
            | Self::CreatePlaylist { track, .. }
            | Self::ToggleLike { track } => track,
            Self::Download { track } => &track.id,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::AddToPlaylist { .. } => ActionKind::AddToPlaylist,
            Self::CreatePlaylist { .. } => ActionKind::CreatePlaylist,
            Self::Download { .. } => ActionKind::Download,
            Self::ToggleLike { .. } => ActionKind::ToggleLike,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActionKind {
    AddToPlaylist,
    CreatePlaylist,
    Download,
    ToggleLike,
}

/// What a successful request produced, beyond its message.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    Playlists(Vec<super::Playlist>),
    Downloaded(PathBuf),
    Like { liked: bool, count: u64 },
}

#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub track: TrackId,
    pub kind: ActionKind,
    pub result: Result<(String, ActionPayload), ActionError>,
}

impl ActionOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The user-facing notice text for this outcome.
    pub fn message(&self) -> String {
        match &self.result {
            Ok((msg, _)) => msg.clone(),
            Err(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("playlist not found")]
    UnknownPlaylist,
    #[error("track is already in \"{0}\"")]
    AlreadyInPlaylist(String),
    #[error("playlist name cannot be empty")]
    EmptyPlaylistName,
    #[error("a playlist named \"{0}\" already exists")]
    DuplicatePlaylistName(String),
    #[error("track has nothing to download")]
    NotDownloadable,
    #[error("downloads directory is not configured")]
    NoDownloadsDir,
    #[error("download failed: {0}")]
    Download(String),
    #[error("could not save playlists: {0}")]
    Persist(String),
    #[error("action service is unavailable")]
    Unavailable,
}
