//! Utilities for creating `rodio` sinks from `TrackRef` values.
//!
//! The helper encapsulates opening/decoding a file and preparing a paused
//! `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::catalog::TrackRef;

/// Create a paused `Sink` for `track` starting at `start_at`, along with
/// the decoder-reported total duration. `None` means the file could not be
/// opened or decoded; callers treat that as a rejected playback attempt.
pub(super) fn prepare_sink(
    handle: &OutputStream,
    track: &TrackRef,
    start_at: Duration,
) -> Option<(Sink, Option<Duration>)> {
    let file = File::open(&track.path).ok()?;
    let source = Decoder::new(BufReader::new(file)).ok()?;

    let total = source.total_duration();
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = source.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Some((sink, total))
}
