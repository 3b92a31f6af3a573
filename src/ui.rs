//! UI rendering for the three screens: folder list, song list and player.
//!
//! Rendering is a pure function of the app state. Every draw also records
//! the clickable regions into a `HitMap` so mouse events can be resolved
//! back into user intents.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph},
};

use crate::app::{App, View};
use crate::audio::Speed;
use crate::config::{ControlsSettings, UiSettings};

/// Format seconds as `M:SS` (minutes unpadded, seconds zero-padded).
/// Unknown, zero and negative inputs all come out as the idle "00:00".
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Fraction of the progress bar at `column`, clamped to `[0, 1]`. Clicks
/// left of the bar resolve to 0, right of it to 1.
pub fn seek_fraction(column: u16, bar: Rect) -> f64 {
    if bar.width == 0 {
        return 0.0;
    }
    ((column as f64 - bar.x as f64) / bar.width as f64).clamp(0.0, 1.0)
}

/// A user intent resolved from a mouse click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Activate a list row (open a folder / play a song).
    Activate(usize),
    Back,
    PlayPause,
    Restart,
    Stop,
    SetSpeed(Speed),
    /// Seek to a fraction of the track.
    Seek(f64),
}

/// Clickable regions recorded during the last draw.
#[derive(Default)]
pub struct HitMap {
    rows: Vec<(usize, Rect)>,
    back: Option<Rect>,
    play_pause: Option<Rect>,
    restart: Option<Rect>,
    stop: Option<Rect>,
    progress_bar: Option<Rect>,
    speeds: Vec<(Speed, Rect)>,
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

impl HitMap {
    pub fn clear(&mut self) {
        self.rows.clear();
        self.back = None;
        self.play_pause = None;
        self.restart = None;
        self.stop = None;
        self.progress_bar = None;
        self.speeds.clear();
    }

    /// Resolve a click into an intent. A click that lands on no region
    /// resolves to `None` and is a no-op for the caller.
    pub fn hit(&self, column: u16, row: u16) -> Option<Intent> {
        if self.back.is_some_and(|r| contains(r, column, row)) {
            return Some(Intent::Back);
        }
        if self.play_pause.is_some_and(|r| contains(r, column, row)) {
            return Some(Intent::PlayPause);
        }
        if self.restart.is_some_and(|r| contains(r, column, row)) {
            return Some(Intent::Restart);
        }
        if self.stop.is_some_and(|r| contains(r, column, row)) {
            return Some(Intent::Stop);
        }
        if let Some(bar) = self.progress_bar {
            if contains(bar, column, row) {
                return Some(Intent::Seek(seek_fraction(column, bar)));
            }
        }
        for (speed, r) in &self.speeds {
            if contains(*r, column, row) {
                return Some(Intent::SetSpeed(*speed));
            }
        }
        for (index, r) in &self.rows {
            if contains(*r, column, row) {
                return Some(Intent::Activate(*index));
            }
        }
        None
    }
}

/// Compute the `[start, end)` window of a list that fits `height` rows,
/// keeping the cursor centered when possible. Returns the cursor position
/// inside the window as the third element.
fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize, usize) {
    if height == 0 {
        (0, 0, 0)
    } else if total <= height {
        (0, total, cursor.min(total.saturating_sub(1)))
    } else {
        let half = height / 2;
        let mut start = if cursor > half { cursor - half } else { 0 };
        if start + height > total {
            start = total - height;
        }
        (start, start + height, cursor - start)
    }
}

fn controls_text(view: View, scrub_seconds: u64) -> String {
    match view {
        View::Folders => "[j/k] up/down | [enter] open folder | [q] quit".to_string(),
        View::Songs => "[j/k] up/down | [enter] play song | [esc] back | [q] quit".to_string(),
        View::Player => format!(
            "[space] play/pause | [r] restart | [s] stop | [1/2/3] speed | [H/L] scrub -/+{scrub_seconds}s | [esc] back | [q] quit"
        ),
    }
}

/// Render the active view and refresh the hit map.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    hits: &mut HitMap,
) {
    hits.clear();
    match app.view() {
        View::Folders => draw_folders(frame, app, ui_settings, controls_settings, hits),
        View::Songs => draw_songs(frame, app, ui_settings, controls_settings, hits),
        View::Player => draw_player(frame, app, ui_settings, controls_settings, hits),
    }
}

fn header(frame: &mut Frame, ui_settings: &UiSettings, area: Rect) {
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lento ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, area);
}

fn footer(frame: &mut Frame, view: View, controls_settings: &ControlsSettings, area: Rect) {
    let footer = Paragraph::new(controls_text(view, controls_settings.scrub_seconds)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(footer, area);
}

fn back_button(frame: &mut Frame, area: Rect, hits: &mut HitMap) {
    let back = Paragraph::new("< back")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(back, area);
    hits.back = Some(area);
}

/// Render `labels` as a windowed list into `area`, recording one hit row
/// per visible item.
fn draw_list(
    frame: &mut Frame,
    title: &str,
    labels: &[String],
    cursor: usize,
    area: Rect,
    hits: &mut HitMap,
) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);

    let total = labels.len();
    let (start, end, cursor_in_window) = visible_window(total, inner.height as usize, cursor);

    let visible: Vec<ListItem> = labels[start..end]
        .iter()
        .map(|l| ListItem::new(l.as_str()))
        .collect();

    for (offset, index) in (start..end).enumerate() {
        hits.rows.push((
            index,
            Rect {
                x: inner.x,
                y: inner.y + offset as u16,
                width: inner.width,
                height: 1,
            },
        ));
    }

    let list = List::new(visible)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(cursor_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_folders(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    hits: &mut HitMap,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    header(frame, ui_settings, chunks[0]);

    let labels: Vec<String> = app
        .catalog
        .folders()
        .iter()
        .map(|f| {
            let n = f.tracks.len();
            if n == 1 {
                format!("{}  (1 song)", f.name)
            } else {
                format!("{}  ({} songs)", f.name, n)
            }
        })
        .collect();
    draw_list(frame, " folders ", &labels, app.folder_cursor, chunks[1], hits);

    footer(frame, View::Folders, controls_settings, chunks[2]);
}

fn draw_songs(
    frame: &mut Frame,
    app: &App,
    _ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    hits: &mut HitMap,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(1)])
        .split(chunks[0]);
    back_button(frame, cols[0], hits);

    let folder_name = app.selected_folder().map(|f| f.name.as_str()).unwrap_or("");
    let title = Paragraph::new(folder_name)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" folder ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(title, cols[1]);

    let labels: Vec<String> = app
        .selected_folder()
        .map(|f| {
            f.tracks
                .iter()
                .map(|t| match t.duration {
                    Some(d) => format!("{}  [{}]", t.name, format_time(d.as_secs_f64())),
                    None => t.name.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    draw_list(frame, " songs ", &labels, app.song_cursor, chunks[1], hits);

    footer(frame, View::Songs, controls_settings, chunks[2]);
}

fn draw_player(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
    hits: &mut HitMap,
) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let mirror = session.mirror();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Top row: back button + track display.
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(1)])
        .split(chunks[0]);
    back_button(frame, cols[0], hits);

    let track = Paragraph::new(session.track().name.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" now playing ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(track, cols[1]);

    // Transport buttons.
    let transport = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    let play_label = if mirror.playing { "pause" } else { "play" };
    let buttons = [
        (play_label, transport[0]),
        ("restart", transport[1]),
        ("stop", transport[2]),
    ];
    for (label, area) in buttons {
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, area);
    }
    hits.play_pause = Some(transport[0]);
    hits.restart = Some(transport[1]);
    hits.stop = Some(transport[2]);

    // Progress bar; clicking it seeks.
    let progress_block = Block::default().borders(Borders::ALL).title(" progress ");
    let bar = progress_block.inner(chunks[2]);
    let gauge = Gauge::default()
        .block(progress_block)
        .ratio((mirror.progress_percent / 100.0).clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[2]);
    hits.progress_bar = Some(bar);

    // Elapsed / total time.
    let time_text = format!(
        "{}{}{}",
        format_time(mirror.current.as_secs_f64()),
        ui_settings.time_separator,
        format_time(mirror.duration.as_secs_f64()),
    );
    let time = Paragraph::new(time_text).alignment(Alignment::Center);
    frame.render_widget(time, chunks[3]);

    // Speed buttons, active one highlighted.
    let speeds = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[4]);
    for (speed, area) in Speed::ALL.into_iter().zip(speeds.iter().copied()) {
        let mut style = Style::default();
        if mirror.speed == speed {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let button = Paragraph::new(speed.label())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, area);
        hits.speeds.push((speed, area));
    }

    footer(frame, View::Player, controls_settings, chunks[6]);
}

#[cfg(test)]
mod tests;
