use std::path::PathBuf;
use std::sync::mpsc;

use super::*;
use crate::audio::{AudioCmd, EngineEvent, Speed};
use crate::catalog::{Catalog, Folder, TrackRef};
use crate::session::PlaybackSession;

fn track(name: &str) -> TrackRef {
    TrackRef {
        name: name.into(),
        file_name: format!("{name}.mp3"),
        path: PathBuf::from(format!("/GOLDENS/{name}.mp3")),
        duration: None,
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        Folder {
            name: "ADULT".into(),
            tracks: vec![track("WATER")],
        },
        Folder {
            name: "GOLDENS".into(),
            tracks: vec![track("MATRIX")],
        },
    ])
}

#[test]
fn starts_on_the_folder_list_with_nothing_selected() {
    let app = App::new(catalog());

    assert_eq!(app.view(), View::Folders);
    assert!(app.selected_folder().is_none());
    assert!(app.selected_track().is_none());
    assert!(app.session.is_none());
    assert_eq!(app.speed, Speed::Normal);
    assert_eq!(app.playback_state(), PlaybackState::Stopped);
}

#[test]
fn selecting_a_folder_enters_the_song_list() {
    let mut app = App::new(catalog());

    app.select_folder(1).unwrap();

    assert_eq!(app.view(), View::Songs);
    assert_eq!(app.selected_folder().unwrap().name, "GOLDENS");
    assert!(app.selected_track().is_none());
}

#[test]
fn selecting_an_unknown_folder_is_rejected() {
    let mut app = App::new(catalog());

    assert_eq!(app.select_folder(7), Err(NavError::UnknownFolder));
    assert_eq!(app.view(), View::Folders);
}

#[test]
fn selecting_a_folder_outside_the_folder_view_is_rejected() {
    let mut app = App::new(catalog());
    app.select_folder(0).unwrap();

    assert_eq!(app.select_folder(1), Err(NavError::WrongView));
    assert_eq!(app.selected_folder().unwrap().name, "ADULT");
}

#[test]
fn selecting_a_song_enters_the_player() {
    let mut app = App::new(catalog());
    app.select_folder(1).unwrap();

    app.select_song(0).unwrap();

    assert_eq!(app.view(), View::Player);
    assert_eq!(app.selected_track().unwrap().name, "MATRIX");
}

#[test]
fn selecting_a_song_outside_the_selected_folder_is_rejected() {
    let mut app = App::new(catalog());
    app.select_folder(1).unwrap();

    assert_eq!(app.select_song(1), Err(NavError::UnknownSong));
    assert_eq!(app.view(), View::Songs);
}

#[test]
fn selecting_a_song_outside_the_song_view_is_rejected() {
    let mut app = App::new(catalog());

    assert_eq!(app.select_song(0), Err(NavError::WrongView));
    assert_eq!(app.view(), View::Folders);
}

#[test]
fn back_from_player_keeps_the_folder_and_drops_the_session() {
    let mut app = App::new(catalog());
    app.select_folder(1).unwrap();
    app.select_song(0).unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel();
    app.session = Some(PlaybackSession::start(
        cmd_tx,
        app.selected_track().unwrap().clone(),
        app.speed,
    ));

    app.back_to_songs();

    assert_eq!(app.view(), View::Songs);
    assert_eq!(app.selected_folder().unwrap().name, "GOLDENS");
    assert!(app.selected_track().is_none());
    assert!(app.session.is_none());

    // Dropping the session released the engine binding.
    let sent: Vec<AudioCmd> = cmd_rx.try_iter().collect();
    assert!(matches!(sent.last(), Some(AudioCmd::Unload)));
}

#[test]
fn back_from_song_list_clears_everything() {
    let mut app = App::new(catalog());
    app.select_folder(0).unwrap();

    app.back_to_folders();

    assert_eq!(app.view(), View::Folders);
    assert!(app.selected_folder().is_none());
}

#[test]
fn playback_state_follows_the_session_mirror() {
    let mut app = App::new(catalog());
    app.select_folder(1).unwrap();
    app.select_song(0).unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel();
    app.session = Some(PlaybackSession::start(
        cmd_tx,
        app.selected_track().unwrap().clone(),
        app.speed,
    ));
    assert_eq!(app.playback_state(), PlaybackState::Paused);

    let events = match cmd_rx.recv().unwrap() {
        AudioCmd::Load { events, .. } => events,
        other => panic!("expected Load, got {other:?}"),
    };
    events.send(EngineEvent::Started).unwrap();
    app.session.as_mut().unwrap().pump();

    assert_eq!(app.playback_state(), PlaybackState::Playing);
}

#[test]
fn cursor_wraps_within_the_visible_list() {
    let mut app = App::new(catalog());

    assert_eq!(app.cursor(), 0);
    app.cursor_down();
    assert_eq!(app.cursor(), 1);
    app.cursor_down();
    assert_eq!(app.cursor(), 0);
    app.cursor_up();
    assert_eq!(app.cursor(), 1);

    app.cursor_first();
    assert_eq!(app.cursor(), 0);
    app.cursor_last();
    assert_eq!(app.cursor(), 1);
}

#[test]
fn song_cursor_resets_when_a_folder_is_opened() {
    let mut app = App::new(catalog());
    app.song_cursor = 5;

    app.select_folder(0).unwrap();

    assert_eq!(app.cursor(), 0);
}
