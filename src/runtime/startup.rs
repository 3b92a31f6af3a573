use crate::app::App;
use crate::audio::Speed;
use crate::config;

/// Seed the app with the configured playback defaults.
pub fn apply_playback_defaults(app: &mut App, settings: &config::Settings) {
    app.speed = match settings.playback.default_speed {
        config::SpeedSetting::Half => Speed::Half,
        config::SpeedSetting::ThreeQuarters => Speed::ThreeQuarters,
        config::SpeedSetting::Normal => Speed::Normal,
    };
}
