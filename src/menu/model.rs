use ratatui::layout::{Position, Rect};

use crate::catalog::TrackId;

/// Whether the cell at `(column, row)` lies in `rect`. Right and bottom
/// edges are exclusive.
pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}

/// Visible menu state for a rendered list.
///
/// `ModalOpen` keeps the submenu visible underneath; the modal acts on the
/// submenu's track, so only `CloseModal` can leave it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    MenuOpen { track: TrackId },
    SubmenuOpen { track: TrackId },
    ModalOpen { track: TrackId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle(TrackId),
    OpenSubmenu,
    CloseSubmenu,
    OpenModal,
    CloseModal,
    /// Dismiss the menu: escape key, a finished action, or a click outside it.
    Dismiss,
}

impl MenuState {
    /// The transition table. Events that do not apply leave the state as is.
    pub fn apply(self, event: MenuEvent) -> MenuState {
        use MenuEvent as E;
        use MenuState as S;

        match (self, event) {
            (S::ModalOpen { .. }, E::CloseModal) => S::Closed,
            (state @ S::ModalOpen { .. }, _) => state,

            (S::Closed, E::Toggle(id)) => S::MenuOpen { track: id },
            (S::MenuOpen { track } | S::SubmenuOpen { track }, E::Toggle(id)) => {
                if track == id {
                    S::Closed
                } else {
                    S::MenuOpen { track: id }
                }
            }

            (S::MenuOpen { track }, E::OpenSubmenu) => S::SubmenuOpen { track },
            (S::SubmenuOpen { track }, E::CloseSubmenu) => S::MenuOpen { track },

            (S::MenuOpen { track } | S::SubmenuOpen { track }, E::OpenModal) => {
                S::ModalOpen { track }
            }

            (S::MenuOpen { .. } | S::SubmenuOpen { .. }, E::Dismiss) => S::Closed,

            (state, _) => state,
        }
    }

    pub fn open_track_id(&self) -> Option<&TrackId> {
        match self {
            Self::Closed => None,
            Self::MenuOpen { track } | Self::SubmenuOpen { track } | Self::ModalOpen { track } => {
                Some(track)
            }
        }
    }

    pub fn submenu_visible(&self) -> bool {
        matches!(self, Self::SubmenuOpen { .. } | Self::ModalOpen { .. })
    }

    pub fn modal_open(&self) -> bool {
        matches!(self, Self::ModalOpen { .. })
    }
}

/// Owns the `MenuState` for a list plus the screen areas the menu was last
/// drawn in, for outside-click detection.
#[derive(Debug, Default)]
pub struct MenuCoordinator {
    state: MenuState,
    bounds: Vec<Rect>,
}

impl MenuCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn open_track_id(&self) -> Option<&TrackId> {
        self.state.open_track_id()
    }

    pub fn submenu_visible(&self) -> bool {
        self.state.submenu_visible()
    }

    pub fn modal_open(&self) -> bool {
        self.state.modal_open()
    }

    fn fire(&mut self, event: MenuEvent) {
        let before = std::mem::take(&mut self.state);
        tracing::trace!(?before, ?event, "menu event");
        self.state = before.apply(event);
        if self.state == MenuState::Closed {
            self.bounds.clear();
        }
    }

    pub fn toggle(&mut self, track: TrackId) {
        self.fire(MenuEvent::Toggle(track));
    }

    pub fn open_submenu(&mut self) {
        self.fire(MenuEvent::OpenSubmenu);
    }

    pub fn close_submenu(&mut self) {
        self.fire(MenuEvent::CloseSubmenu);
    }

    pub fn open_modal(&mut self) {
        self.fire(MenuEvent::OpenModal);
    }

    pub fn close_modal(&mut self) {
        self.fire(MenuEvent::CloseModal);
    }

    pub fn close(&mut self) {
        self.fire(MenuEvent::Dismiss);
    }

    /// Record where the menu (and submenu) were drawn this frame.
    pub fn set_bounds(&mut self, bounds: Vec<Rect>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> &[Rect] {
        &self.bounds
    }

    /// A pointer press or scroll at `(column, row)`.
    ///
    /// Interactions outside every recorded menu area dismiss the menu. Nothing
    /// counts as outside while the modal is open. Returns whether the press
    /// landed outside an open menu.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> bool {
        if self.state == MenuState::Closed || self.state.modal_open() {
            return false;
        }
        if self.bounds.iter().any(|r| hit(*r, column, row)) {
            return false;
        }
        self.close();
        true
    }
}
