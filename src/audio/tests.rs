use std::time::Duration;

use super::thread::{clamp_to_duration, scaled};
use super::types::Speed;

#[test]
fn scaled_elapsed_follows_playback_rate() {
    assert_eq!(
        scaled(Duration::from_secs(10), Speed::Normal),
        Duration::from_secs(10)
    );
    assert_eq!(
        scaled(Duration::from_secs(10), Speed::Half),
        Duration::from_secs(5)
    );
    assert_eq!(
        scaled(Duration::from_secs(8), Speed::ThreeQuarters),
        Duration::from_secs(6)
    );
}

#[test]
fn positions_clamp_to_known_duration_only() {
    let d = Duration::from_secs(100);
    assert_eq!(clamp_to_duration(Duration::from_secs(150), d), d);
    assert_eq!(
        clamp_to_duration(Duration::from_secs(50), d),
        Duration::from_secs(50)
    );
    // Zero duration means "unknown": nothing to cap against.
    assert_eq!(
        clamp_to_duration(Duration::from_secs(150), Duration::ZERO),
        Duration::from_secs(150)
    );
}

#[test]
fn speed_multipliers_and_labels_line_up() {
    assert_eq!(Speed::Half.multiplier(), 0.5);
    assert_eq!(Speed::ThreeQuarters.multiplier(), 0.75);
    assert_eq!(Speed::Normal.multiplier(), 1.0);
    assert_eq!(Speed::Half.label(), "0.5x");
    assert_eq!(Speed::ThreeQuarters.label(), "0.75x");
    assert_eq!(Speed::Normal.label(), "1x");
    assert_eq!(Speed::default(), Speed::Normal);
}
