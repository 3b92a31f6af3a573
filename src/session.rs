//! Playback session: binds the UI's playback mirror to a live engine
//! binding for exactly one track.
//!
//! A session is created when a song is selected and dropped when the player
//! view is exited. Each session owns a fresh notification channel, so
//! events from a previous track can never leak into a new one.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::audio::{AudioCmd, EngineEvent, Speed};
use crate::catalog::TrackRef;

/// UI-owned copy of the engine's playback status, kept eventually
/// consistent through notifications and updated eagerly on direct actions.
#[derive(Clone, Debug, PartialEq)]
pub struct Mirror {
    pub playing: bool,
    pub current: Duration,
    pub duration: Duration,
    pub progress_percent: f64,
    pub speed: Speed,
}

impl Mirror {
    fn new(speed: Speed) -> Self {
        Self {
            playing: false,
            current: Duration::ZERO,
            duration: Duration::ZERO,
            progress_percent: 0.0,
            speed,
        }
    }
}

/// `current/duration` as a percentage; zero while the duration is unknown.
pub fn progress_percent(current: Duration, duration: Duration) -> f64 {
    if duration > Duration::ZERO {
        current.as_secs_f64() / duration.as_secs_f64() * 100.0
    } else {
        0.0
    }
}

pub struct PlaybackSession {
    track: TrackRef,
    mirror: Mirror,
    cmds: Sender<AudioCmd>,
    events: Receiver<EngineEvent>,
}

impl PlaybackSession {
    /// Bind a new session: reset the mirror, hand the engine the track plus
    /// the event sender, and attempt to start playback immediately (song
    /// selection counts as a user gesture). The attempt resolves later as
    /// `Started` or `Rejected`.
    pub fn start(cmds: Sender<AudioCmd>, track: TrackRef, speed: Speed) -> Self {
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();

        let session = Self {
            track: track.clone(),
            mirror: Mirror::new(speed),
            cmds,
            events: events_rx,
        };
        let _ = session.cmds.send(AudioCmd::Load {
            track,
            speed,
            events: events_tx,
        });
        let _ = session.cmds.send(AudioCmd::Play);
        session
    }

    pub fn track(&self) -> &TrackRef {
        &self.track
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Drain pending engine notifications into the mirror.
    pub fn pump(&mut self) {
        while let Ok(ev) = self.events.try_recv() {
            self.apply(ev);
        }
    }

    fn apply(&mut self, ev: EngineEvent) {
        match ev {
            EngineEvent::MetadataLoaded { duration } => {
                self.mirror.duration = duration;
                self.refresh_progress();
            }
            EngineEvent::TimeUpdate { elapsed } => {
                self.mirror.current = elapsed;
                self.refresh_progress();
            }
            EngineEvent::Started => self.mirror.playing = true,
            EngineEvent::Rejected => self.mirror.playing = false,
            EngineEvent::Ended => self.mirror.playing = false,
        }
    }

    fn refresh_progress(&mut self) {
        self.mirror.progress_percent = progress_percent(self.mirror.current, self.mirror.duration);
    }

    /// Pause synchronously, or request an asynchronous start. `playing`
    /// only turns true on the engine's `Started` confirmation.
    pub fn toggle_play_pause(&mut self) {
        if self.mirror.playing {
            let _ = self.cmds.send(AudioCmd::Pause);
            self.mirror.playing = false;
        } else {
            let _ = self.cmds.send(AudioCmd::Play);
        }
    }

    /// Rewind to the start without changing play state.
    pub fn restart(&mut self) {
        self.seek_to(Duration::ZERO);
    }

    /// Pause and rewind.
    pub fn stop(&mut self) {
        let _ = self.cmds.send(AudioCmd::Pause);
        self.mirror.playing = false;
        self.seek_to(Duration::ZERO);
    }

    /// Apply a playback rate immediately, regardless of play state.
    pub fn set_speed(&mut self, speed: Speed) {
        self.mirror.speed = speed;
        let _ = self.cmds.send(AudioCmd::SetSpeed(speed));
    }

    /// Absolute seek to a fraction of the track. A no-op until the duration
    /// is known; otherwise the mirror updates in the same interaction
    /// rather than waiting for the next notification.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if self.mirror.duration == Duration::ZERO {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let target = self.mirror.duration.mul_f64(fraction);
        self.seek_to(target);
    }

    /// Relative seek (scrub keys), clamped to the track bounds.
    pub fn seek_by(&mut self, seconds: i64) {
        let current = self.mirror.current;
        let target = if seconds >= 0 {
            current.saturating_add(Duration::from_secs(seconds as u64))
        } else {
            current.saturating_sub(Duration::from_secs(seconds.unsigned_abs()))
        };
        let target = if self.mirror.duration > Duration::ZERO {
            target.min(self.mirror.duration)
        } else {
            target
        };
        self.seek_to(target);
    }

    fn seek_to(&mut self, target: Duration) {
        let _ = self.cmds.send(AudioCmd::SeekTo(target));
        self.mirror.current = target;
        self.refresh_progress();
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        // Exiting the player view must release the engine binding no matter
        // how the exit happened; the dropped receiver makes any in-flight
        // notifications undeliverable.
        let _ = self.cmds.send(AudioCmd::Unload);
    }
}
