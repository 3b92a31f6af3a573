use ratatui::layout::Rect;

use super::*;

#[test]
fn format_time_falls_back_to_idle_label() {
    assert_eq!(format_time(f64::NAN), "00:00");
    assert_eq!(format_time(f64::INFINITY), "00:00");
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(-5.0), "00:00");
}

#[test]
fn format_time_pads_seconds_but_not_minutes() {
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(120.0), "2:00");
    assert_eq!(format_time(50.0), "0:50");
    assert_eq!(format_time(200.0), "3:20");
    // Partial seconds floor.
    assert_eq!(format_time(59.9), "0:59");
    assert_eq!(format_time(3600.0), "60:00");
}

#[test]
fn seek_fraction_clamps_to_the_bar() {
    let bar = Rect::new(10, 5, 100, 1);

    assert_eq!(seek_fraction(3, bar), 0.0);
    assert_eq!(seek_fraction(10, bar), 0.0);
    assert_eq!(seek_fraction(60, bar), 0.5);
    assert_eq!(seek_fraction(110, bar), 1.0);
    assert_eq!(seek_fraction(200, bar), 1.0);
}

#[test]
fn seek_fraction_on_a_zero_width_bar_is_zero() {
    assert_eq!(seek_fraction(42, Rect::new(0, 0, 0, 1)), 0.0);
}

#[test]
fn hits_resolve_regions_and_fall_through_to_none() {
    let mut hits = HitMap::default();
    hits.back = Some(Rect::new(0, 0, 10, 3));
    hits.play_pause = Some(Rect::new(0, 3, 10, 3));
    hits.restart = Some(Rect::new(10, 3, 10, 3));
    hits.stop = Some(Rect::new(20, 3, 10, 3));
    hits.progress_bar = Some(Rect::new(1, 7, 50, 1));
    hits.speeds.push((Speed::Half, Rect::new(0, 9, 8, 3)));

    assert_eq!(hits.hit(2, 1), Some(Intent::Back));
    assert_eq!(hits.hit(5, 4), Some(Intent::PlayPause));
    assert_eq!(hits.hit(12, 4), Some(Intent::Restart));
    assert_eq!(hits.hit(25, 4), Some(Intent::Stop));
    assert_eq!(hits.hit(3, 10), Some(Intent::SetSpeed(Speed::Half)));
    // Dead space resolves to no intent: a no-op, not an error.
    assert_eq!(hits.hit(70, 20), None);
}

#[test]
fn progress_bar_hits_carry_the_resolved_fraction() {
    let mut hits = HitMap::default();
    hits.progress_bar = Some(Rect::new(0, 7, 100, 1));

    assert_eq!(hits.hit(50, 7), Some(Intent::Seek(0.5)));
    assert_eq!(hits.hit(0, 7), Some(Intent::Seek(0.0)));
}

#[test]
fn row_hits_map_back_to_list_indices() {
    let mut hits = HitMap::default();
    hits.rows.push((3, Rect::new(1, 4, 30, 1)));
    hits.rows.push((4, Rect::new(1, 5, 30, 1)));

    assert_eq!(hits.hit(10, 4), Some(Intent::Activate(3)));
    assert_eq!(hits.hit(10, 5), Some(Intent::Activate(4)));
    assert_eq!(hits.hit(10, 6), None);
}

#[test]
fn clear_resets_every_region() {
    let mut hits = HitMap::default();
    hits.back = Some(Rect::new(0, 0, 10, 3));
    hits.rows.push((0, Rect::new(0, 4, 10, 1)));

    hits.clear();

    assert_eq!(hits.hit(2, 1), None);
    assert_eq!(hits.hit(2, 4), None);
}

#[test]
fn visible_window_keeps_the_cursor_centered() {
    // Everything fits: window is the whole list.
    assert_eq!(visible_window(3, 10, 1), (0, 3, 1));
    // Cursor near the top: window pinned to the start.
    assert_eq!(visible_window(100, 10, 2), (0, 10, 2));
    // Cursor in the middle: centered.
    assert_eq!(visible_window(100, 10, 50), (45, 55, 5));
    // Cursor near the end: window pinned to the tail.
    assert_eq!(visible_window(100, 10, 99), (90, 100, 9));
}
