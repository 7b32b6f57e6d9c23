//! Application model: the catalog, selection and filter state, plus the
//! playback session, menu coordinator and action side-channels the views
//! share.

use std::time::Duration;

use ratatui::layout::Rect;

use crate::actions::{
    ActionKind, ActionOutcome, ActionPayload, ActionRequest, ActionStatus, LikeState, Playlist,
};
use crate::catalog::{Track, TrackId};
use crate::menu::MenuCoordinator;
use crate::notify::Notifications;
use crate::session::PlaybackSession;

/// Entries of the per-track context menu, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuItem {
    PlayPause,
    AddToPlaylist,
    Like,
    Download,
}

pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem::PlayPause,
    MenuItem::AddToPlaylist,
    MenuItem::Like,
    MenuItem::Download,
];

/// What the event loop should do after an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    None,
    Quit,
    Send(ActionRequest),
}

/// Where the list was drawn last frame, for mapping mouse rows to tracks.
#[derive(Debug, Copy, Clone, Default)]
pub struct ListGeometry {
    pub area: Rect,
    /// Position in `display_indices()` of the first visible row.
    pub first: usize,
}

pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,

    lower_titles: Option<Vec<String>>,
    pub filter_mode: bool,
    pub filter_query: String,

    pub session: PlaybackSession,
    pub menu: MenuCoordinator,
    pub menu_cursor: usize,
    pub submenu_cursor: usize,
    pub modal_input: String,

    pub playlists: Vec<Playlist>,
    pub status: ActionStatus,
    pub notices: Notifications,

    pub list: ListGeometry,
    pub current_dir: Option<String>,
}

impl App {
    /// Create a new `App` over `tracks`, sharing the given session.
    pub fn new(tracks: Vec<Track>, session: PlaybackSession, notices: Notifications) -> Self {
        // For larger libraries, precompute lowercase labels so filtering does
        // not lowercase every title on every keystroke.
        let lower_titles = if tracks.len() > 100 {
            Some(
                tracks
                    .iter()
                    .map(|t| t.display.to_ascii_lowercase())
                    .collect(),
            )
        } else {
            None
        };

        Self {
            tracks,
            selected: 0,
            lower_titles,
            filter_mode: false,
            filter_query: String::new(),
            session,
            menu: MenuCoordinator::new(),
            menu_cursor: 0,
            submenu_cursor: 0,
            modal_input: String::new(),
            playlists: Vec::new(),
            status: ActionStatus::new(),
            notices,
            list: ListGeometry::default(),
            current_dir: None,
        }
    }

    pub fn set_playlists(&mut self, playlists: Vec<Playlist>) {
        self.playlists = playlists;
        self.submenu_cursor = self.submenu_cursor.min(self.playlists.len());
    }

    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    pub fn track_by_id(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// The track whose context menu is open.
    pub fn menu_track(&self) -> Option<&Track> {
        self.menu.open_track_id().and_then(|id| self.track_by_id(id))
    }

    /// Track indices in display order, after filtering.
    pub fn display_indices(&self) -> Vec<usize> {
        let all = 0..self.tracks.len();
        let query = self.filter_query.trim();
        if query.is_empty() {
            return all.collect();
        }

        match self.lower_titles.as_deref() {
            Some(lower_titles) => {
                let query_lower = query.to_ascii_lowercase();
                all.filter(|&i| fuzzy_match_positions_lower(&lower_titles[i], &query_lower).is_some())
                    .collect()
            }
            None => all
                .filter(|&i| fuzzy_match_positions(&self.tracks[i].display, query).is_some())
                .collect(),
        }
    }

    /// The visible tracks, in order. This is what play controls queue up.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.display_indices()
            .into_iter()
            .map(|i| self.tracks[i].clone())
            .collect()
    }

    /// Play control for `idx`: queue the visible list, then toggle or switch.
    pub fn play_pause_index(&mut self, idx: usize) {
        let Some(track) = self.tracks.get(idx).cloned() else {
            return;
        };
        self.session.load_queue(self.visible_tracks());
        self.session.toggle_play_pause_for(&track);
    }

    pub fn play_pause_selected(&mut self) {
        if self.has_tracks() {
            self.play_pause_index(self.selected);
        }
    }

    pub fn next(&mut self) {
        if let Some(next) = self.next_in_view_from(self.selected) {
            self.selected = next;
        }
    }

    pub fn prev(&mut self) {
        if let Some(prev) = self.prev_in_view_from(self.selected) {
            self.selected = prev;
        }
    }

    /// Return the next visible index after `current`, wrapping to the first.
    pub fn next_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(p) => Some(display[(p + 1) % display.len()]),
            None => Some(display[0]),
        }
    }

    /// Return the previous visible index before `current`, wrapping to the last.
    pub fn prev_in_view_from(&self, current: usize) -> Option<usize> {
        let display = self.display_indices();
        if display.is_empty() {
            return None;
        }

        let pos = display.iter().position(|&i| i == current);
        match pos {
            Some(0) | None => Some(display[display.len() - 1]),
            Some(p) => Some(display[p - 1]),
        }
    }

    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
        self.ensure_selected_visible();
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
        self.ensure_selected_visible();
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Keep `selected` inside the filtered view, else move it to the first
    /// visible track.
    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
            return;
        }

        if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }

    /// Open (or close) the context menu for `idx`.
    pub fn toggle_menu_for(&mut self, idx: usize) {
        let Some(id) = self.tracks.get(idx).map(|t| t.id.clone()) else {
            return;
        };
        self.menu.toggle(id);
        self.menu_cursor = 0;
        self.submenu_cursor = 0;
    }

    pub fn like_state(&self, id: &TrackId) -> LikeState {
        self.status.like(id)
    }

    /// Build the request for a menu item, marking the track in flight.
    ///
    /// Returns `None` when the item is disabled (its request for this track
    /// is still pending) or acts locally.
    pub fn request_for(&mut self, item: MenuItem, track: &Track) -> Option<ActionRequest> {
        match item {
            MenuItem::PlayPause | MenuItem::AddToPlaylist => None,
            MenuItem::Like => {
                if self.status.is_like_pending(&track.id) {
                    return None;
                }
                self.status.begin_like(&track.id);
                Some(ActionRequest::ToggleLike {
                    track: track.id.clone(),
                })
            }
            MenuItem::Download => {
                if self.status.is_downloading(&track.id) {
                    return None;
                }
                self.status.begin_download(&track.id);
                Some(ActionRequest::Download {
                    track: track.clone(),
                })
            }
        }
    }

    /// A request could not be sent: undo its in-flight mark and tell the user.
    pub fn request_failed(&mut self, req: &ActionRequest, reason: &str) {
        let id = req.track_id();
        match req {
            ActionRequest::Download { .. } => self.status.finish_download(id),
            ActionRequest::ToggleLike { .. } => self.status.finish_like(id, None),
            _ => {}
        }
        self.notices.error(reason.to_string());
    }

    /// Fold a finished action back into the model.
    ///
    /// Successes close the menu (or modal) they came from; failures leave it
    /// open so the user can retry.
    pub fn apply_outcome(&mut self, outcome: ActionOutcome) {
        let message = outcome.message();
        let ok = outcome.is_ok();

        match outcome.result {
            Ok((_, ActionPayload::Playlists(lists))) => self.set_playlists(lists),
            Ok((_, ActionPayload::Like { liked, count })) => {
                self.status
                    .finish_like(&outcome.track, Some(LikeState { liked, count }));
            }
            Ok((_, ActionPayload::Downloaded(_))) => self.status.finish_download(&outcome.track),
            Err(_) => match outcome.kind {
                ActionKind::Download => self.status.finish_download(&outcome.track),
                ActionKind::ToggleLike => self.status.finish_like(&outcome.track, None),
                _ => {}
            },
        }

        if ok {
            self.notices.info(message);
            if self.menu.open_track_id() == Some(&outcome.track) {
                if self.menu.modal_open() {
                    self.menu.close_modal();
                    self.modal_input.clear();
                } else {
                    self.menu.close();
                }
            }
        } else {
            self.notices.error(message);
        }
    }

    /// Seconds-only `m:ss` label for a track length.
    pub fn format_duration(d: Option<Duration>) -> String {
        match d {
            Some(d) => {
                let secs = d.as_secs();
                format!("{}:{:02}", secs / 60, secs % 60)
            }
            None => "--:--".to_string(),
        }
    }
}

/// Fuzzy/subsequence match: return the character positions in `title`
/// that match `query`, or `None` if not matched.
pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut title_iter = title.chars().enumerate();

    for qc in query.chars() {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match title_iter.next() {
                Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                    positions.push(ti);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}

fn fuzzy_match_positions_lower(title_lower: &str, query_lower: &str) -> Option<Vec<usize>> {
    let mut title_iter = title_lower.chars().enumerate();
    let mut positions = Vec::new();

    for qc in query_lower.chars() {
        positions.push(title_iter.find(|&(_, tc)| tc == qc)?.0);
    }

    Some(positions)
}
