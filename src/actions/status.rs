use std::collections::{HashMap, HashSet};

use crate::catalog::TrackId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct LikeState {
    pub liked: bool,
    pub count: u64,
}

/// Per-track asynchronous status, keyed by track id.
///
/// Different tracks never interfere. Requests for the same id are not
/// deduplicated here; callers check `is_downloading`/`is_like_pending`
/// before sending another.
#[derive(Debug, Default)]
pub struct ActionStatus {
    downloading: HashSet<TrackId>,
    like_pending: HashSet<TrackId>,
    likes: HashMap<TrackId, LikeState>,
}

impl ActionStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_download(&mut self, id: &TrackId) {
        self.downloading.insert(id.clone());
    }

    pub fn finish_download(&mut self, id: &TrackId) {
        self.downloading.remove(id);
    }

    pub fn is_downloading(&self, id: &TrackId) -> bool {
        self.downloading.contains(id)
    }

    pub fn begin_like(&mut self, id: &TrackId) {
        self.like_pending.insert(id.clone());
    }

    /// Clear the pending flag and, on success, record the new like state.
    pub fn finish_like(&mut self, id: &TrackId, updated: Option<LikeState>) {
        self.like_pending.remove(id);
        if let Some(state) = updated {
            self.likes.insert(id.clone(), state);
        }
    }

    pub fn is_like_pending(&self, id: &TrackId) -> bool {
        self.like_pending.contains(id)
    }

    pub fn like(&self, id: &TrackId) -> LikeState {
        self.likes.get(id).copied().unwrap_or_default()
    }

    pub fn in_flight(&self) -> usize {
        self.downloading.len() + self.like_pending.len()
    }
}
