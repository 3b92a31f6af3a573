use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_engine_thread;
use super::types::AudioCmd;

/// Handle to the playback engine thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let handle = spawn_engine_thread(rx);

        Self {
            tx,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Clone of the command sender, for playback sessions to own.
    pub fn command_sender(&self) -> Sender<AudioCmd> {
        self.tx.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}
