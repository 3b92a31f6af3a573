use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lento/config.toml` or `~/.config/lento/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LENTO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            audio: AudioSettings::default(),
            library: LibrarySettings::default(),
            playback: PlaybackSettings::default(),
            ui: UiSettings::default(),
            controls: ControlsSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library root; its first-level subdirectories become the folders.
    /// The first CLI argument overrides this.
    pub root: String,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: "Music".to_string(),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Speed selected when the player starts.
    pub default_speed: SpeedSetting,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_speed: SpeedSetting::Normal,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedSetting {
    #[serde(alias = "0.5", alias = "0.5x")]
    Half,
    #[serde(alias = "0.75", alias = "0.75x", alias = "three_quarters")]
    ThreeQuarters,
    #[serde(alias = "1", alias = "1.0", alias = "1x", alias = "full")]
    Normal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "lento" header box.
    pub header_text: String,

    /// Separator between the elapsed and total time labels.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ lento: unhurried listening ~ ".to_string(),
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}
