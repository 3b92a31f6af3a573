//! Engine-facing small types: playback speed, commands and notifications.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::catalog::TrackRef;

/// Playback speed multiplier. The three variants are the only speeds the
/// player offers, so an out-of-range rate is unrepresentable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Speed {
    Half,
    ThreeQuarters,
    Normal,
}

impl Default for Speed {
    fn default() -> Self {
        Self::Normal
    }
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Half, Speed::ThreeQuarters, Speed::Normal];

    pub fn multiplier(self) -> f32 {
        match self {
            Speed::Half => 0.5,
            Speed::ThreeQuarters => 0.75,
            Speed::Normal => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Half => "0.5x",
            Speed::ThreeQuarters => "0.75x",
            Speed::Normal => "1x",
        }
    }
}

/// Commands accepted by the playback engine thread.
#[derive(Debug)]
pub enum AudioCmd {
    /// Bind a new session: prepare `track` paused at position zero with
    /// `speed` applied, reporting back through `events`. Replaces any
    /// previous binding (the old event sender is dropped).
    Load {
        track: TrackRef,
        speed: Speed,
        events: Sender<EngineEvent>,
    },
    /// Attempt to start playback; answered with `Started` or `Rejected`.
    Play,
    /// Pause playback immediately.
    Pause,
    /// Move playback to the given position, preserving pause state.
    SeekTo(Duration),
    /// Apply a playback rate, regardless of play state.
    SetSpeed(Speed),
    /// Release the current session: stop the sink, drop the event sender.
    Unload,
    /// Shut the engine thread down, fading out over `fade_out_ms`.
    Quit { fade_out_ms: u64 },
}

/// Notifications emitted by the engine for the currently bound session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Total duration became known (zero when the decoder cannot tell).
    MetadataLoaded { duration: Duration },
    /// Playback position report.
    TimeUpdate { elapsed: Duration },
    /// A `Play` attempt succeeded.
    Started,
    /// A `Play` attempt failed (unreadable or undecodable resource).
    Rejected,
    /// The track ran out. The engine parks paused; no auto-advance.
    Ended,
}
