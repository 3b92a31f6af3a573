use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState, View};
use crate::audio::{AudioPlayer, Speed};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::session::PlaybackSession;
use crate::ui::{self, HitMap, Intent};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last track title as emitted to MPRIS.
    pub last_mpris_title: Option<String>,
    /// Last playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris_title: None,
            last_mpris_playback: app.playback_state(),
        }
    }
}

/// Main terminal event loop: pumps engine notifications into the mirror,
/// draws, and handles MPRIS commands plus key/mouse input. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
    hits: &mut HitMap,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Fold pending engine notifications into the mirror before drawing.
        if let Some(session) = app.session.as_mut() {
            session.pump();
        }

        // Keep MPRIS in sync even when changes come from media keys or from
        // the engine itself (track ended, playback rejected).
        let title = app.session.as_ref().map(|s| s.track().name.clone());
        let playback = app.playback_state();
        if title != state.last_mpris_title || playback != state.last_mpris_playback {
            update_mpris(mpris, app);
            state.last_mpris_title = title;
            state.last_mpris_playback = playback;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls, hits))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key_event(key, settings, app, audio_player, state)? {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, audio_player, hits),
                _ => {}
            }
        }
    }

    Ok(())
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => {
            if let Some(session) = app.session.as_mut() {
                if !session.mirror().playing {
                    session.toggle_play_pause();
                }
            }
        }
        ControlCmd::Pause => {
            if let Some(session) = app.session.as_mut() {
                if session.mirror().playing {
                    session.toggle_play_pause();
                }
            }
        }
        ControlCmd::PlayPause => {
            if let Some(session) = app.session.as_mut() {
                session.toggle_play_pause();
            }
        }
        ControlCmd::Stop => {
            if let Some(session) = app.session.as_mut() {
                session.stop();
            }
        }
    }

    Ok(false)
}

/// Start a playback session for the selected track. The navigation change
/// has already happened; this is the side the state transition triggers.
fn start_session(app: &mut App, audio_player: &AudioPlayer) {
    if let Some(track) = app.selected_track().cloned() {
        app.session = Some(PlaybackSession::start(
            audio_player.command_sender(),
            track,
            app.speed,
        ));
    }
}

fn activate_row(app: &mut App, audio_player: &AudioPlayer, index: usize) {
    match app.view() {
        View::Folders => {
            // An out-of-range row is a contract violation; ignore it.
            let _ = app.select_folder(index);
        }
        View::Songs => {
            if app.select_song(index).is_ok() {
                start_session(app, audio_player);
            }
        }
        View::Player => {}
    }
}

fn set_speed(app: &mut App, speed: Speed) {
    app.speed = speed;
    if let Some(session) = app.session.as_mut() {
        session.set_speed(speed);
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    if key.code == KeyCode::Char('q') {
        state.pending_gg = false;
        audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
        return Ok(true);
    }

    match app.view() {
        View::Folders | View::Songs => handle_list_keys(key, app, audio_player, state),
        View::Player => handle_player_keys(key, settings, app, state),
    }

    Ok(false)
}

fn handle_list_keys(
    key: KeyEvent,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.cursor_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.cursor_up();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.cursor_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.cursor_last();
        }
        KeyCode::Enter | KeyCode::Char('l') => {
            state.pending_gg = false;
            activate_row(app, audio_player, app.cursor());
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            state.pending_gg = false;
            if app.view() == View::Songs {
                app.back_to_folders();
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char.
            state.pending_gg = false;
        }
        _ => {}
    }
}

fn handle_player_keys(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) {
    state.pending_gg = false;
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if let Some(session) = app.session.as_mut() {
                session.toggle_play_pause();
            }
        }
        KeyCode::Char('r') => {
            if let Some(session) = app.session.as_mut() {
                session.restart();
            }
        }
        KeyCode::Char('s') => {
            if let Some(session) = app.session.as_mut() {
                session.stop();
            }
        }
        KeyCode::Char('1') => set_speed(app, Speed::Half),
        KeyCode::Char('2') => set_speed(app, Speed::ThreeQuarters),
        KeyCode::Char('3') => set_speed(app, Speed::Normal),
        KeyCode::Char('L') | KeyCode::Right => {
            if let Some(session) = app.session.as_mut() {
                session.seek_by(scrub);
            }
        }
        KeyCode::Char('H') | KeyCode::Left => {
            if let Some(session) = app.session.as_mut() {
                session.seek_by(-scrub);
            }
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.back_to_songs();
        }
        _ => {}
    }
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut App, audio_player: &AudioPlayer, hits: &HitMap) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A click that lands on no region is a no-op, not an error.
            let Some(intent) = hits.hit(mouse.column, mouse.row) else {
                return;
            };
            match intent {
                Intent::Activate(index) => {
                    app.cursor_to(index);
                    activate_row(app, audio_player, index);
                }
                Intent::Back => match app.view() {
                    View::Player => app.back_to_songs(),
                    View::Songs => app.back_to_folders(),
                    View::Folders => {}
                },
                Intent::PlayPause => {
                    if let Some(session) = app.session.as_mut() {
                        session.toggle_play_pause();
                    }
                }
                Intent::Restart => {
                    if let Some(session) = app.session.as_mut() {
                        session.restart();
                    }
                }
                Intent::Stop => {
                    if let Some(session) = app.session.as_mut() {
                        session.stop();
                    }
                }
                Intent::SetSpeed(speed) => set_speed(app, speed),
                Intent::Seek(fraction) => {
                    if let Some(session) = app.session.as_mut() {
                        session.seek_to_fraction(fraction);
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => app.cursor_down(),
        MouseEventKind::ScrollUp => app.cursor_up(),
        _ => {}
    }
}
