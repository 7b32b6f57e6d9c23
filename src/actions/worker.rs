use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::catalog::{Track, TrackId};

use super::playlists::{Playlist, PlaylistStore};
use super::types::{ActionError, ActionOutcome, ActionPayload, ActionRequest};

/// Executes action requests. Owned by the worker thread.
pub(super) struct ActionBackend {
    pub(super) playlists: PlaylistStore,
    pub(super) downloads_dir: Option<PathBuf>,
    pub(super) likes: HashMap<TrackId, u64>,
}

impl ActionBackend {
    pub(super) fn new(playlists: PlaylistStore, downloads_dir: Option<PathBuf>) -> Self {
        Self {
            playlists,
            downloads_dir,
            likes: HashMap::new(),
        }
    }

    pub(super) fn handle(&mut self, req: ActionRequest) -> ActionOutcome {
        let track = req.track_id().clone();
        let kind = req.kind();

        let result = match req {
            ActionRequest::AddToPlaylist { playlist, track } => self
                .playlists
                .add_track(playlist, track)
                .map(|name| (format!("Added to \"{name}\""), self.playlists_payload())),
            ActionRequest::CreatePlaylist { name, track } => self
                .playlists
                .create(&name, track)
                .map(|p| format!("Created \"{}\" with this track", p.name))
                .map(|msg| (msg, self.playlists_payload())),
            ActionRequest::Download { track } => self.download(&track).map(|dest| {
                (
                    format!("Downloaded to {}", dest.display()),
                    ActionPayload::Downloaded(dest),
                )
            }),
            ActionRequest::ToggleLike { track } => {
                let (liked, count) = self.toggle_like(track);
                let msg = if liked { "Liked" } else { "Like removed" };
                Ok((msg.to_string(), ActionPayload::Like { liked, count }))
            }
        };

        match &result {
            Ok(_) => tracing::info!(track = %track, ?kind, "action succeeded"),
            Err(e) => tracing::warn!(track = %track, ?kind, error = %e, "action failed"),
        }

        ActionOutcome {
            track,
            kind,
            result,
        }
    }

    fn playlists_payload(&self) -> ActionPayload {
        ActionPayload::Playlists(self.playlists.playlists().to_vec())
    }

    fn download(&self, track: &Track) -> Result<PathBuf, ActionError> {
        let src = track.local_path().ok_or(ActionError::NotDownloadable)?;
        let dir = self.downloads_dir.as_deref().ok_or(ActionError::NoDownloadsDir)?;
        let file_name = src.file_name().ok_or(ActionError::NotDownloadable)?;

        std::fs::create_dir_all(dir).map_err(|e| ActionError::Download(e.to_string()))?;
        let dest = dir.join(file_name);
        copy_file(&src, &dest)?;
        Ok(dest)
    }

    /// Single-user likes: the count is 0 or 1.
    fn toggle_like(&mut self, track: TrackId) -> (bool, u64) {
        let count = self.likes.entry(track).or_insert(0);
        *count = if *count == 0 { 1 } else { 0 };
        (*count > 0, *count)
    }
}

fn copy_file(src: &Path, dest: &Path) -> Result<(), ActionError> {
    std::fs::copy(src, dest)
        .map(|_| ())
        .map_err(|e| ActionError::Download(format!("{}: {e}", src.display())))
}

/// Handle to the background action thread.
pub struct ActionWorker {
    tx: Option<Sender<ActionRequest>>,
    rx: Receiver<ActionOutcome>,
    join: Option<JoinHandle<()>>,
    initial: Vec<Playlist>,
}

impl ActionWorker {
    pub fn spawn(playlists: PlaylistStore, downloads_dir: Option<PathBuf>) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<ActionRequest>();
        let (out_tx, out_rx) = mpsc::channel::<ActionOutcome>();
        let initial = playlists.playlists().to_vec();
        let mut backend = ActionBackend::new(playlists, downloads_dir);

        let join = thread::spawn(move || {
            // Ends when the request sender is dropped.
            while let Ok(req) = req_rx.recv() {
                tracing::debug!(track = %req.track_id(), kind = ?req.kind(), "action request");
                if out_tx.send(backend.handle(req)).is_err() {
                    break;
                }
            }
            tracing::debug!("action worker stopped");
        });

        Self {
            tx: Some(req_tx),
            rx: out_rx,
            join: Some(join),
            initial,
        }
    }

    /// Playlists as they were when the worker started.
    pub fn initial_playlists(&self) -> &[Playlist] {
        &self.initial
    }

    pub fn send(&self, req: ActionRequest) -> Result<(), ActionError> {
        self.tx
            .as_ref()
            .ok_or(ActionError::Unavailable)?
            .send(req)
            .map_err(|_| ActionError::Unavailable)
    }

    /// Outcomes that completed since the last call, in completion order.
    pub fn drain(&self) -> Vec<ActionOutcome> {
        self.rx.try_iter().collect()
    }

    /// Block until the next outcome arrives.
    #[cfg(test)]
    pub fn recv(&self) -> Option<ActionOutcome> {
        self.rx.recv().ok()
    }

    /// Stop accepting requests and wait for the thread to finish.
    pub fn shutdown(&mut self) {
        self.tx = None;
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for ActionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
