use super::*;
use std::sync::mpsc;

#[test]
fn handle_updates_shared_playback_and_title() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_playback(PlaybackState::Playing);
    handle.set_title(Some("MATRIX".to_string()));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.playback, PlaybackState::Playing);
        assert_eq!(s.title.as_deref(), Some("MATRIX"));
    }

    handle.set_title(None);
    assert_eq!(state.lock().unwrap().title, None);
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Stopped;
    }
    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Playing;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackState::Paused;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn player_iface_forwards_transport_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.play();
    iface.pause();
    iface.stop();
    // No queue: Next/Previous are deliberately inert.
    iface.next();
    iface.previous();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert!(matches!(
        got.as_slice(),
        [
            ControlCmd::PlayPause,
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::Stop
        ]
    ));
}

#[test]
fn metadata_carries_the_current_title() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    state.lock().unwrap().title = Some("WATER".to_string());

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
}
