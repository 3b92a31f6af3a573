//! Application model types: `App`, `View`, `PlaybackState` and `NavError`.
//!
//! Navigation is a two-level state machine over the catalog: no folder
//! selected = folder list, folder selected = song list, folder + song
//! selected = player. The active view is always derived from the selection
//! pair, never stored on its own.

use thiserror::Error;

use crate::audio::Speed;
use crate::catalog::{Catalog, Folder, TrackRef};
use crate::session::PlaybackSession;

/// Which of the three screens is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Folders,
    Songs,
    Player,
}

/// Coarse playback state, as reported to MPRIS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Rejected navigation requests. The UI only offers valid choices, so one
/// of these indicates a caller bug; handlers ignore them defensively.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("action not valid in the current view")]
    WrongView,
    #[error("folder is not part of the catalog")]
    UnknownFolder,
    #[error("song does not belong to the selected folder")]
    UnknownSong,
}

/// The main application model.
pub struct App {
    pub catalog: Catalog,
    selected_folder: Option<usize>,
    selected_song: Option<usize>,

    pub folder_cursor: usize,
    pub song_cursor: usize,

    /// Chosen playback speed; survives across sessions.
    pub speed: Speed,
    /// The live playback session while the player view is active.
    pub session: Option<PlaybackSession>,
}

impl App {
    /// Create a new `App` over an immutable `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected_folder: None,
            selected_song: None,
            folder_cursor: 0,
            song_cursor: 0,
            speed: Speed::default(),
            session: None,
        }
    }

    /// The active view, derived from the selection pair. A selected song
    /// implies a selected folder by construction.
    pub fn view(&self) -> View {
        match (self.selected_folder, self.selected_song) {
            (None, _) => View::Folders,
            (Some(_), None) => View::Songs,
            (Some(_), Some(_)) => View::Player,
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        match &self.session {
            None => PlaybackState::Stopped,
            Some(s) if s.mirror().playing => PlaybackState::Playing,
            Some(_) => PlaybackState::Paused,
        }
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.selected_folder.and_then(|i| self.catalog.folder(i))
    }

    pub fn selected_track(&self) -> Option<&TrackRef> {
        let folder = self.selected_folder()?;
        folder.tracks.get(self.selected_song?)
    }

    /// Open a folder. Valid only in the folder-list view; the folder must
    /// exist in the catalog.
    pub fn select_folder(&mut self, index: usize) -> Result<(), NavError> {
        if self.view() != View::Folders {
            return Err(NavError::WrongView);
        }
        if index >= self.catalog.len() {
            return Err(NavError::UnknownFolder);
        }
        self.selected_folder = Some(index);
        self.song_cursor = 0;
        Ok(())
    }

    /// Pick a song. Valid only in the song-list view; the song must belong
    /// to the selected folder's track list. Does not touch the engine —
    /// the runtime starts a session off the resulting state change.
    pub fn select_song(&mut self, index: usize) -> Result<(), NavError> {
        if self.view() != View::Songs {
            return Err(NavError::WrongView);
        }
        let in_folder = self.selected_folder().map_or(0, |f| f.tracks.len());
        if index >= in_folder {
            return Err(NavError::UnknownSong);
        }
        self.selected_song = Some(index);
        Ok(())
    }

    /// Clear both selections; any playback session goes with them.
    pub fn back_to_folders(&mut self) {
        self.selected_song = None;
        self.selected_folder = None;
        self.session = None;
    }

    /// Clear the song selection only; the folder stays put.
    pub fn back_to_songs(&mut self) {
        self.selected_song = None;
        self.session = None;
    }

    /// Number of rows in the currently visible list.
    pub fn visible_len(&self) -> usize {
        match self.view() {
            View::Folders => self.catalog.len(),
            View::Songs => self.selected_folder().map_or(0, |f| f.tracks.len()),
            View::Player => 0,
        }
    }

    /// Cursor position in the currently visible list.
    pub fn cursor(&self) -> usize {
        match self.view() {
            View::Folders => self.folder_cursor,
            _ => self.song_cursor,
        }
    }

    fn cursor_slot(&mut self) -> Option<&mut usize> {
        match self.view() {
            View::Folders => Some(&mut self.folder_cursor),
            View::Songs => Some(&mut self.song_cursor),
            View::Player => None,
        }
    }

    /// Move the cursor down, wrapping at the end of the list.
    pub fn cursor_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if let Some(c) = self.cursor_slot() {
            *c = (*c + 1) % len;
        }
    }

    /// Move the cursor up, wrapping at the top of the list.
    pub fn cursor_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if let Some(c) = self.cursor_slot() {
            *c = if *c == 0 { len - 1 } else { *c - 1 };
        }
    }

    /// Place the cursor on a specific row (mouse hover/click path).
    pub fn cursor_to(&mut self, index: usize) {
        let len = self.visible_len();
        if index >= len {
            return;
        }
        if let Some(c) = self.cursor_slot() {
            *c = index;
        }
    }

    pub fn cursor_first(&mut self) {
        if self.visible_len() > 0 {
            if let Some(c) = self.cursor_slot() {
                *c = 0;
            }
        }
    }

    pub fn cursor_last(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            if let Some(c) = self.cursor_slot() {
                *c = len - 1;
            }
        }
    }
}
