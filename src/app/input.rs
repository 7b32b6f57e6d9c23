//! Keyboard and mouse handling for the `App` model.
//!
//! Input is routed to the innermost visible layer: modal, then submenu,
//! then context menu, then filter prompt, then the track list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Margin;

use crate::actions::ActionRequest;
use crate::menu::hit;

use super::model::{App, Intent, MENU_ITEMS, MenuItem};

/// Which part of an open menu a click landed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MenuHit {
    Menu(usize),
    Submenu(usize),
    Border,
}

impl App {
    pub fn on_key(&mut self, key: KeyEvent) -> Intent {
        if self.menu.modal_open() {
            return self.modal_key(key);
        }
        if self.menu.submenu_visible() {
            return self.submenu_key(key);
        }
        if self.menu.open_track_id().is_some() {
            return self.menu_key(key);
        }
        if self.filter_mode {
            self.filter_key(key);
            return Intent::None;
        }
        self.list_key(key)
    }

    fn list_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Char('q') => {
                self.session.stop();
                return Intent::Quit;
            }
            KeyCode::Char('j') | KeyCode::Down => self.next(),
            KeyCode::Char('k') | KeyCode::Up => self.prev(),
            KeyCode::Char('g') | KeyCode::Home => {
                if let Some(&first) = self.display_indices().first() {
                    self.set_selected(first);
                }
            }
            KeyCode::Char('G') | KeyCode::End => {
                if let Some(&last) = self.display_indices().last() {
                    self.set_selected(last);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play_pause_selected(),
            KeyCode::Char('p') => self.session.toggle(),
            KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => {
                self.session.next();
            }
            KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => {
                self.session.previous();
            }
            KeyCode::Char('m') | KeyCode::Tab => self.toggle_menu_for(self.selected),
            KeyCode::Char('r') => {
                self.session.cycle_loop_mode();
                self.notices
                    .info(format!("Loop mode: {}", self.session.loop_mode().label()));
            }
            KeyCode::Char('/') => self.enter_filter_mode(),
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Char('L') => return self.shortcut(MenuItem::Like),
            KeyCode::Char('d') => return self.shortcut(MenuItem::Download),
            _ => {}
        }
        Intent::None
    }

    fn filter_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Backspace => self.pop_filter_char(),
            KeyCode::Down => self.next(),
            KeyCode::Up => self.prev(),
            KeyCode::Char('j') | KeyCode::Char('n') if ctrl => self.next(),
            KeyCode::Char('k') | KeyCode::Char('p') if ctrl => self.prev(),
            KeyCode::Enter => {
                if self.display_indices().is_empty() {
                    return;
                }
                self.exit_filter_mode();
                self.play_pause_selected();
            }
            KeyCode::Char(c) if !c.is_control() => self.push_filter_char(c),
            _ => {}
        }
    }

    fn menu_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1) % MENU_ITEMS.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor = (self.menu_cursor + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                return self.activate_menu_item(self.menu_cursor);
            }
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('h') | KeyCode::Left | KeyCode::Tab => {
                self.menu.close();
            }
            _ => {}
        }
        Intent::None
    }

    fn submenu_len(&self) -> usize {
        // Every playlist plus "New playlist".
        self.playlists.len() + 1
    }

    fn submenu_key(&mut self, key: KeyEvent) -> Intent {
        let len = self.submenu_len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.submenu_cursor = (self.submenu_cursor + 1) % len;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.submenu_cursor = (self.submenu_cursor + len - 1) % len;
            }
            KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
                return self.activate_submenu_item(self.submenu_cursor);
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => self.menu.close_submenu(),
            _ => {}
        }
        Intent::None
    }

    fn modal_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Esc => {
                self.menu.close_modal();
                self.modal_input.clear();
            }
            KeyCode::Backspace => {
                self.modal_input.pop();
            }
            KeyCode::Enter => {
                if let Some(track) = self.menu.open_track_id().cloned() {
                    return Intent::Send(ActionRequest::CreatePlaylist {
                        name: self.modal_input.clone(),
                        track,
                    });
                }
            }
            KeyCode::Char(c) if !c.is_control() => self.modal_input.push(c),
            _ => {}
        }
        Intent::None
    }

    fn activate_menu_item(&mut self, pos: usize) -> Intent {
        let Some(&item) = MENU_ITEMS.get(pos) else {
            return Intent::None;
        };
        let Some(track) = self.menu_track().cloned() else {
            return Intent::None;
        };
        self.menu_cursor = pos;

        match item {
            MenuItem::PlayPause => {
                if let Some(idx) = self.tracks.iter().position(|t| t.id == track.id) {
                    self.play_pause_index(idx);
                }
                self.menu.close();
                Intent::None
            }
            MenuItem::AddToPlaylist => {
                self.submenu_cursor = 0;
                self.menu.open_submenu();
                Intent::None
            }
            MenuItem::Like | MenuItem::Download => match self.request_for(item, &track) {
                Some(req) => Intent::Send(req),
                None => Intent::None,
            },
        }
    }

    fn activate_submenu_item(&mut self, pos: usize) -> Intent {
        let Some(track) = self.menu.open_track_id().cloned() else {
            return Intent::None;
        };
        self.submenu_cursor = pos;

        match self.playlists.get(pos) {
            Some(p) => Intent::Send(ActionRequest::AddToPlaylist {
                playlist: p.id,
                track,
            }),
            None => {
                self.modal_input.clear();
                self.menu.open_modal();
                Intent::None
            }
        }
    }

    /// Like/download for the selected track without opening the menu.
    fn shortcut(&mut self, item: MenuItem) -> Intent {
        let Some(track) = self.selected_track().cloned() else {
            return Intent::None;
        };
        match self.request_for(item, &track) {
            Some(req) => Intent::Send(req),
            None => Intent::None,
        }
    }

    pub fn on_mouse(&mut self, ev: MouseEvent) -> Intent {
        let (column, row) = (ev.column, ev.row);
        let button = match ev.kind {
            MouseEventKind::Down(button) => button,
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                // Scrolling away from an open menu dismisses it, like a click.
                if self.menu.open_track_id().is_some() {
                    self.menu.pointer_down(column, row);
                } else if ev.kind == MouseEventKind::ScrollDown {
                    self.next();
                } else {
                    self.prev();
                }
                return Intent::None;
            }
            _ => return Intent::None,
        };

        // The modal captures the pointer; nothing behind it reacts.
        if self.menu.modal_open() {
            return Intent::None;
        }

        if let Some(hit) = self.menu_hit(column, row) {
            return match hit {
                MenuHit::Menu(i) => self.activate_menu_item(i),
                MenuHit::Submenu(i) => self.activate_submenu_item(i),
                MenuHit::Border => Intent::None,
            };
        }

        // A press that closes a menu does nothing else.
        if self.menu.pointer_down(column, row) {
            return Intent::None;
        }

        let Some(idx) = self.row_to_index(column, row) else {
            return Intent::None;
        };
        match button {
            MouseButton::Right => {
                self.set_selected(idx);
                self.toggle_menu_for(idx);
            }
            MouseButton::Left if idx == self.selected => self.play_pause_index(idx),
            MouseButton::Left => self.set_selected(idx),
            MouseButton::Middle => self.play_pause_index(idx),
        }
        Intent::None
    }

    fn menu_hit(&self, column: u16, row: u16) -> Option<MenuHit> {
        let bounds = self.menu.bounds();
        for (layer, &rect) in bounds.iter().enumerate() {
            if !hit(rect, column, row) {
                continue;
            }
            // One bordered row per item.
            let items = rect.inner(Margin::new(0, 1));
            if !hit(items, column, row) {
                return Some(MenuHit::Border);
            }
            let pos = (row - items.y) as usize;
            return Some(match layer {
                0 if pos < MENU_ITEMS.len() => MenuHit::Menu(pos),
                1 if pos < self.submenu_len() => MenuHit::Submenu(pos),
                _ => MenuHit::Border,
            });
        }
        None
    }

    /// Map a screen cell in the list to a track index.
    fn row_to_index(&self, column: u16, row: u16) -> Option<usize> {
        let rows = self.list.area.inner(Margin::new(1, 1));
        if !hit(rows, column, row) {
            return None;
        }
        let pos = self.list.first + (row - rows.y) as usize;
        self.display_indices().get(pos).copied()
    }
}
