//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, ListGeometry, MENU_ITEMS, MenuItem, fuzzy_match_positions};
use crate::audio::PlaybackInfo;
use crate::catalog::Track;
use crate::config::UiSettings;
use crate::notify::NoticeLevel;

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("g/G", "top/bottom"),
    ("enter", "play/pause selected"),
    ("p", "play/pause"),
    ("h/l", "prev/next"),
    ("m", "menu"),
    ("L", "like"),
    ("d", "download"),
    ("/", "filter"),
    ("r", "loop mode"),
    ("q", "quit"),
];

const MENU_WIDTH: u16 = 26;
const SUBMENU_WIDTH: u16 = 28;

/// Screen areas the event loop needs to map mouse input back onto the model.
#[derive(Debug, Clone, Default)]
pub struct FrameAreas {
    pub list: ListGeometry,
    /// Context menu, then submenu, when drawn.
    pub menu: Vec<Rect>,
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Place a `width` x `height` popup at `(x, y)`, shifted to stay inside `bounds`.
fn anchored_rect(x: u16, y: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let right = bounds.x + bounds.width;
    let bottom = bounds.y + bounds.height;
    Rect {
        x: x.min(right.saturating_sub(width)).max(bounds.x),
        y: y.min(bottom.saturating_sub(height)).max(bounds.y),
        width,
        height,
    }
}

/// Title with fuzzy-matched characters uppercased, as a plain string.
fn highlighted_title(title: &str, query: &str) -> String {
    let Some(positions) = fuzzy_match_positions(title, query) else {
        return title.to_string();
    };

    let mut rendered = String::new();
    let mut pos_iter = positions.into_iter();
    let mut next_pos = pos_iter.next();
    for (ci, ch) in title.chars().enumerate() {
        if next_pos == Some(ci) {
            rendered.extend(ch.to_uppercase());
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

fn status_text(app: &App, playback: &PlaybackInfo) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.session.current() {
        Some(track) => {
            let state = if app.session.is_playing() {
                "Playing"
            } else {
                "Paused"
            };
            let elapsed = (playback.generation == Some(app.session.snapshot().generation))
                .then_some(playback.elapsed);
            let time = match (elapsed, track.duration) {
                (Some(e), Some(total)) => format!(" [{}/{}]", format_mmss(e), format_mmss(total)),
                (Some(e), None) => format!(" [{}]", format_mmss(e)),
                (None, _) => String::new(),
            };
            parts.push(format!(" Song: {}{}", track.display, time));
            parts.push(format!(
                "{} / {}",
                track.artist_or_unknown(),
                track.album_or_unknown()
            ));
            parts.push(state.to_string());
            if !track.is_playable() {
                parts.push("no preview".to_string());
            }
        }
        None => parts.push(" Stopped".to_string()),
    }

    parts.push(format!("PLAYBACK: {}", app.session.loop_mode().label()));

    let q = app.filter_query.trim();
    if app.filter_mode || !q.is_empty() {
        let mut filter_part = String::from("FILTER:");
        if !q.is_empty() {
            filter_part.push(' ');
            filter_part.push_str(q);
        }
        parts.push(filter_part);
    }

    let in_flight = app.status.in_flight();
    if in_flight > 0 {
        parts.push(format!("Pending: {in_flight}"));
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }

    if let Some(err) = &playback.error {
        parts.push(format!("Audio: {err}"));
    }

    parts.join(" • ")
}

fn track_item(app: &App, track: &Track, query: &str) -> ListItem<'static> {
    let marker = if app.session.current_track_id() == Some(&track.id) {
        if app.session.is_playing() { "▶ " } else { "⏸ " }
    } else {
        "  "
    };

    let title = if query.is_empty() {
        track.display.clone()
    } else {
        highlighted_title(&track.display, query)
    };

    let mut spans = vec![Span::raw(marker), Span::raw(title)];
    if !track.id.is_local() {
        spans.push(Span::raw(" [ext]").dim());
    }
    if app.like_state(&track.id).liked {
        spans.push(Span::styled(" ♥", Style::default().fg(Color::Red)));
    }
    if app.status.is_downloading(&track.id) {
        spans.push(Span::raw(" ↓").dim());
    }
    if let Some(d) = track.duration {
        spans.push(Span::raw(format!("  {}", App::format_duration(Some(d)))).dim());
    }
    ListItem::new(Line::from(spans))
}

fn menu_label(app: &App, item: MenuItem, track: &Track) -> (String, bool) {
    match item {
        MenuItem::PlayPause => {
            let playing = app.session.is_playing()
                && app.session.current_track_id() == Some(&track.id);
            let label = if playing { "Pause" } else { "Play" };
            (label.to_string(), true)
        }
        MenuItem::AddToPlaylist => ("Add to playlist ›".to_string(), true),
        MenuItem::Like => {
            let state = app.like_state(&track.id);
            let verb = if state.liked { "Unlike" } else { "Like" };
            if app.status.is_like_pending(&track.id) {
                (format!("{verb}…"), false)
            } else {
                (format!("{verb} ({})", state.count), true)
            }
        }
        MenuItem::Download => {
            if app.status.is_downloading(&track.id) {
                ("Downloading…".to_string(), false)
            } else {
                ("Download".to_string(), true)
            }
        }
    }
}

fn popup_list(lines: Vec<(String, bool)>, title: &str, focused: bool) -> List<'static> {
    let items: Vec<ListItem> = lines
        .into_iter()
        .map(|(text, enabled)| {
            let item = ListItem::new(text);
            if enabled { item } else { item.dim() }
        })
        .collect();
    let highlight = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(highlight)
}

/// Draw the context menu, submenu and modal for the open track.
/// Returns the menu and submenu areas.
fn draw_menu(frame: &mut Frame, app: &App, list_area: Rect, selected_row: Option<u16>) -> Vec<Rect> {
    let Some(track) = app.menu_track() else {
        return Vec::new();
    };
    let screen = frame.area();
    let mut bounds = Vec::new();

    let anchor_y = selected_row.unwrap_or(list_area.y + 1);
    let menu_area = anchored_rect(
        list_area.x + 4,
        anchor_y,
        MENU_WIDTH,
        MENU_ITEMS.len() as u16 + 2,
        screen,
    );
    let lines = MENU_ITEMS
        .iter()
        .map(|&item| menu_label(app, item, track))
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.menu_cursor));
    frame.render_widget(Clear, menu_area);
    frame.render_stateful_widget(
        popup_list(lines, " track ", !app.menu.submenu_visible()),
        menu_area,
        &mut state,
    );
    bounds.push(menu_area);

    if app.menu.submenu_visible() {
        let mut lines: Vec<(String, bool)> = app
            .playlists
            .iter()
            .map(|p| {
                let has = p.tracks.contains(&track.id);
                let mark = if has { "✓ " } else { "  " };
                (format!("{mark}{}", p.name), !has)
            })
            .collect();
        lines.push(("+ New playlist".to_string(), true));

        let sub_area = anchored_rect(
            menu_area.x + menu_area.width,
            menu_area.y + 2,
            SUBMENU_WIDTH,
            lines.len() as u16 + 2,
            screen,
        );
        let mut state = ListState::default();
        state.select(Some(app.submenu_cursor));
        frame.render_widget(Clear, sub_area);
        frame.render_stateful_widget(
            popup_list(lines, " playlists ", !app.menu.modal_open()),
            sub_area,
            &mut state,
        );
        bounds.push(sub_area);
    }

    if app.menu.modal_open() {
        let modal_area = centered_rect_sized(44, 5, screen);
        frame.render_widget(Clear, modal_area);
        let body = vec![
            Line::from(format!("{}▏", app.modal_input)),
            Line::from("[enter] create | [esc] cancel").dim(),
        ];
        let modal = Paragraph::new(body).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" new playlist ")
                .padding(Padding {
                    left: 1,
                    right: 1,
                    top: 0,
                    bottom: 0,
                }),
        );
        frame.render_widget(modal, modal_area);
    }

    bounds
}

fn draw_notices(frame: &mut Frame, app: &App, area: Rect) {
    if app.notices.is_empty() {
        return;
    }
    let lines: Vec<Line> = app
        .notices
        .iter()
        .map(|n| match n.level {
            NoticeLevel::Info => Line::from(n.text.clone()),
            NoticeLevel::Error => Line::from(n.text.clone()).fg(Color::Red),
        })
        .collect();
    let width = 48.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::bordered().title(" notices "))
            .wrap(Wrap { trim: true }),
        rect,
    );
}

/// Render the entire UI into `frame` and report where the list and menus landed.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    playback: &PlaybackInfo,
) -> FrameAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playdeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app, playback))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list. Only build items for the visible window, centered on the
    // selection when possible.
    let display = app.display_indices();
    let q = app.filter_query.trim();
    let total = display.len();
    let list_height = chunks[2].height.saturating_sub(2) as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height)
    };

    let visible_items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| track_item(app, &app.tracks[i], q))
        .collect();

    let list = List::new(visible_items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    let selected_row = if total > 0 && (start..end).contains(&sel_pos) {
        state.select(Some(sel_pos - start));
        Some(chunks[2].y + 1 + (sel_pos - start) as u16)
    } else {
        None
    };
    frame.render_stateful_widget(list, chunks[2], &mut state);

    draw_notices(frame, app, chunks[2]);
    let menu = draw_menu(frame, app, chunks[2], selected_row);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    FrameAreas {
        list: ListGeometry {
            area: chunks[2],
            first: start,
        },
        menu,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_rect_stays_on_screen() {
        let screen = Rect::new(0, 0, 80, 24);
        let r = anchored_rect(70, 20, 26, 6, screen);
        assert_eq!(r, Rect::new(54, 18, 26, 6));

        let r = anchored_rect(4, 3, 26, 6, screen);
        assert_eq!(r, Rect::new(4, 3, 26, 6));
    }

    #[test]
    fn highlighted_title_uppercases_matches() {
        assert_eq!(highlighted_title("hello world", "hw"), "Hello World");
        assert_eq!(highlighted_title("hello", "zz"), "hello");
    }

    #[test]
    fn format_mmss_pads() {
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
    }
}
