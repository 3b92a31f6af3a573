use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::catalog::TrackRef;

use super::sink::prepare_sink;
use super::types::{AudioCmd, EngineEvent, Speed};

/// Command receive timeout; doubles as the time-update cadence.
const TICK: Duration = Duration::from_millis(100);

/// Wall-clock time scaled by the playback rate: at 0.5x, one second of wall
/// time advances the track by half a second.
pub(super) fn scaled(wall: Duration, speed: Speed) -> Duration {
    wall.mul_f64(speed.multiplier() as f64)
}

/// Clamp a position to the known duration. Zero duration means "unknown",
/// in which case there is nothing to cap against.
pub(super) fn clamp_to_duration(pos: Duration, duration: Duration) -> Duration {
    if duration > Duration::ZERO {
        pos.min(duration)
    } else {
        pos
    }
}

struct Engine {
    stream: rodio::OutputStream,
    track: Option<TrackRef>,
    sink: Option<Sink>,
    events: Option<Sender<EngineEvent>>,
    duration: Duration,
    speed: Speed,
    paused: bool,
    // Start time of the current play stretch and position accumulated
    // across previous stretches (pauses, seeks, rate changes).
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Engine {
    fn new(stream: rodio::OutputStream) -> Self {
        Self {
            stream,
            track: None,
            sink: None,
            events: None,
            duration: Duration::ZERO,
            speed: Speed::default(),
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn emit(&self, ev: EngineEvent) {
        // A send to a torn-down session lands on a disconnected channel;
        // stale notifications are simply not deliverable.
        if let Some(tx) = &self.events {
            let _ = tx.send(ev);
        }
    }

    fn position(&self) -> Duration {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |st| scaled(st.elapsed(), self.speed));
        clamp_to_duration(self.accumulated + running, self.duration)
    }

    fn load(&mut self, track: TrackRef, speed: Speed, events: Sender<EngineEvent>) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.events = Some(events);
        self.speed = speed;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.track = None;

        // An unreadable or undecodable file leaves no sink behind; the
        // session's pending Play is then answered with Rejected.
        if let Some((sink, total)) = prepare_sink(&self.stream, &track, Duration::ZERO) {
            sink.set_speed(speed.multiplier());
            self.duration = total.or(track.duration).unwrap_or(Duration::ZERO);
            self.sink = Some(sink);
            self.track = Some(track);
            self.emit(EngineEvent::MetadataLoaded {
                duration: self.duration,
            });
            self.emit(EngineEvent::TimeUpdate {
                elapsed: Duration::ZERO,
            });
        }
    }

    /// Replace the sink with one positioned at `pos`, paused. Returns false
    /// when the file can no longer be opened.
    fn rebuild_at(&mut self, pos: Duration) -> bool {
        let Some(track) = self.track.clone() else {
            return false;
        };
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        match prepare_sink(&self.stream, &track, pos) {
            Some((sink, _)) => {
                sink.set_speed(self.speed.multiplier());
                self.accumulated = pos;
                self.sink = Some(sink);
                true
            }
            None => {
                self.paused = true;
                self.started_at = None;
                false
            }
        }
    }

    fn play(&mut self) {
        if self.sink.is_none() {
            self.emit(EngineEvent::Rejected);
            return;
        }

        // Replaying after the track ran out restarts from the top.
        if self.sink.as_ref().is_some_and(|s| s.empty()) {
            if !self.rebuild_at(Duration::ZERO) {
                self.emit(EngineEvent::Rejected);
                return;
            }
            self.emit(EngineEvent::TimeUpdate {
                elapsed: Duration::ZERO,
            });
        }

        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        self.paused = false;
        self.started_at = Some(Instant::now());
        self.emit(EngineEvent::Started);
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += scaled(st.elapsed(), self.speed);
        }
        self.paused = true;
    }

    fn seek_to(&mut self, pos: Duration) {
        if self.track.is_none() {
            return;
        }

        let target = clamp_to_duration(pos, self.duration);
        if !self.rebuild_at(target) {
            return;
        }
        if self.paused {
            self.started_at = None;
        } else if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.started_at = Some(Instant::now());
        }
        self.emit(EngineEvent::TimeUpdate { elapsed: target });
    }

    fn set_speed(&mut self, speed: Speed) {
        // Fold the stretch played at the old rate before switching.
        if let Some(st) = self.started_at {
            self.accumulated += scaled(st.elapsed(), self.speed);
            self.started_at = Some(Instant::now());
        }
        self.speed = speed;
        if let Some(sink) = self.sink.as_ref() {
            sink.set_speed(speed.multiplier());
        }
    }

    fn unload(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.track = None;
        self.events = None;
        self.duration = Duration::ZERO;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn tick(&mut self) {
        if self.paused {
            return;
        }
        let Some(empty) = self.sink.as_ref().map(|s| s.empty()) else {
            return;
        };

        if empty {
            // The decoder ran out: park at the end. No auto-advance.
            self.accumulated = if self.duration > Duration::ZERO {
                self.duration
            } else {
                self.position()
            };
            self.started_at = None;
            self.paused = true;
            self.emit(EngineEvent::TimeUpdate {
                elapsed: self.accumulated,
            });
            self.emit(EngineEvent::Ended);
        } else {
            self.emit(EngineEvent::TimeUpdate {
                elapsed: self.position(),
            });
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_engine_thread(rx: Receiver<AudioCmd>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut engine = Engine::new(stream);

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load {
                        track,
                        speed,
                        events,
                    } => engine.load(track, speed, events),
                    AudioCmd::Play => engine.play(),
                    AudioCmd::Pause => engine.pause(),
                    AudioCmd::SeekTo(pos) => engine.seek_to(pos),
                    AudioCmd::SetSpeed(speed) => engine.set_speed(speed),
                    AudioCmd::Unload => engine.unload(),
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(sink) = engine.sink.as_ref() {
                            if !engine.paused {
                                // Fade out gently before stopping.
                                fade_out_sink(sink, fade_out_ms);
                            }
                            sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
