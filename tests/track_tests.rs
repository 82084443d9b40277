// Host-side tests for the scroll, idle, and drag trackers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core"]
mod core {
    pub mod entity;
    pub mod track;
}
#[path = "../src/input.rs"]
mod input;

use crate::core::entity::Rect;
use crate::core::track::*;
use glam::Vec2;

// ---------------- scroll progress ----------------

#[test]
fn scroll_progress_maps_the_document_range() {
    assert_eq!(scroll_progress(0.0, 1400.0, 800.0), 0.0);
    assert!((scroll_progress(300.0, 1400.0, 800.0) - 0.5).abs() < 1e-6);
    assert_eq!(scroll_progress(600.0, 1400.0, 800.0), 1.0);
}

#[test]
fn scroll_progress_clamps_out_of_range_offsets() {
    assert_eq!(scroll_progress(9000.0, 1400.0, 800.0), 1.0);
    assert_eq!(scroll_progress(-50.0, 1400.0, 800.0), 0.0);
}

#[test]
fn degenerate_scroll_range_yields_zero_not_nan() {
    assert_eq!(scroll_progress(100.0, 800.0, 800.0), 0.0);
    assert_eq!(scroll_progress(100.0, 500.0, 800.0), 0.0);
    assert_eq!(scroll_progress(0.0, 0.0, 0.0), 0.0);
}

// ---------------- scroll follower ----------------

#[test]
fn direct_mode_assigns_immediately() {
    let mut f = ScrollFollower::new(FollowMode::Direct);
    f.set_target(0.37);
    assert_eq!(f.value(), 0.37);
    f.step();
    assert_eq!(f.value(), 0.37);
}

#[test]
fn smoothed_mode_converges_monotonically_then_snaps_exactly() {
    let mut f = ScrollFollower::new(FollowMode::Smoothed);
    f.set_target(1.0);
    let mut residual = 1.0f32;
    let mut steps = 0;
    while f.value() != 1.0 {
        let v = f.step();
        let r = (1.0 - v).abs();
        assert!(r <= residual, "residual grew: {} > {}", r, residual);
        residual = r;
        steps += 1;
        assert!(steps < 200, "did not converge within 200 frames");
    }
    assert_eq!(f.value(), 1.0);
}

#[test]
fn smoothed_mode_tracks_a_moving_target() {
    let mut f = ScrollFollower::new(FollowMode::Smoothed);
    f.set_target(1.0);
    for _ in 0..10 {
        f.step();
    }
    let mid = f.value();
    assert!(mid > 0.0 && mid < 1.0);
    // Target reverses; the follower turns around without snapping first.
    f.set_target(0.0);
    f.step();
    assert!(f.value() < mid);
}

#[test]
fn follower_clamps_targets_to_unit_range() {
    let mut f = ScrollFollower::new(FollowMode::Direct);
    f.set_target(1.7);
    assert_eq!(f.value(), 1.0);
    f.set_target(-0.3);
    assert_eq!(f.value(), 0.0);
}

// ---------------- idle tracker ----------------

#[test]
fn idle_resets_on_a_real_scroll_delta() {
    let mut idle = IdleTracker::new(1000.0);
    idle.observe(0.2, 2000.0);
    assert_eq!(idle.idle_ms(2000.0), 0.0);
    assert_eq!(idle.idle_ms(2600.0), 600.0);
}

#[test]
fn idle_ignores_sub_threshold_jitter() {
    let mut idle = IdleTracker::new(1000.0);
    idle.observe(0.2, 1000.0);
    idle.observe(0.2 + 1e-5, 1500.0);
    // The jitter did not reset the clock.
    assert_eq!(idle.idle_ms(2000.0), 1000.0);
}

#[test]
fn idle_ramp_normalizes_and_saturates() {
    let mut idle = IdleTracker::new(0.0);
    idle.observe(0.5, 0.0);
    assert_eq!(idle.ramp(0.0), 0.0);
    assert!((idle.ramp(500.0) - 0.5).abs() < 1e-6);
    assert_eq!(idle.ramp(5000.0), 1.0);
}

#[test]
fn idle_grows_monotonically_with_wall_clock() {
    let mut idle = IdleTracker::new(0.0);
    idle.observe(0.3, 0.0);
    let mut prev = 0.0;
    for ms in (0..5000).step_by(250) {
        let d = idle.idle_ms(ms as f64);
        assert!(d >= prev);
        prev = d;
    }
}

// ---------------- drag board ----------------

#[test]
fn drag_offset_is_damped_pointer_delta() {
    let mut drags = DragBoard::default();
    drags.begin(1, 100.0);
    drags.update(1, 150.0);
    assert!((drags.offset(1) - 10.0).abs() < 1e-6);
    drags.update(1, 40.0);
    assert!((drags.offset(1) + 12.0).abs() < 1e-6);
}

#[test]
fn drags_are_scoped_per_entity() {
    let mut drags = DragBoard::default();
    drags.begin(1, 100.0);
    drags.update(1, 150.0);
    drags.begin(2, 0.0);
    drags.update(2, -40.0);
    assert!((drags.offset(1) - 10.0).abs() < 1e-6);
    assert!((drags.offset(2) + 8.0).abs() < 1e-6);
    // Releasing one leaves the other dragging.
    drags.release(2, 1000.0);
    assert!(drags.is_dragging(1));
    assert!(!drags.is_dragging(2));
}

#[test]
fn offset_survives_ticks_while_dragging() {
    let mut drags = DragBoard::default();
    drags.begin(1, 0.0);
    drags.update(1, 50.0);
    for ms in 0..100 {
        drags.tick(ms as f64 * 1000.0);
    }
    assert!((drags.offset(1) - 10.0).abs() < 1e-6);
}

#[test]
fn offset_clears_no_earlier_than_the_delay() {
    let mut drags = DragBoard::default();
    drags.begin(1, 0.0);
    drags.update(1, 50.0);
    drags.release(1, 1000.0);
    drags.tick(1399.0);
    assert!((drags.offset(1) - 10.0).abs() < 1e-6, "cleared too early");
    drags.tick(1401.0);
    assert_eq!(drags.offset(1), 0.0);
}

#[test]
fn a_new_drag_cancels_a_pending_clear() {
    let mut drags = DragBoard::default();
    drags.begin(1, 0.0);
    drags.update(1, 50.0);
    drags.release(1, 1000.0);
    // Grab again before the deadline fires.
    drags.begin(1, 200.0);
    drags.update(1, 230.0);
    drags.tick(2000.0);
    assert!(drags.is_dragging(1));
    assert!((drags.offset(1) - 6.0).abs() < 1e-6);
}

#[test]
fn updates_after_release_are_ignored() {
    let mut drags = DragBoard::default();
    drags.begin(1, 0.0);
    drags.update(1, 50.0);
    drags.release(1, 1000.0);
    drags.update(1, 500.0);
    assert!((drags.offset(1) - 10.0).abs() < 1e-6);
}

// ---------------- spill point ----------------

#[test]
fn spill_point_uses_package_box_ratios() {
    let rect = Rect {
        left: 100.0,
        top: 50.0,
        width: 300.0,
        height: 400.0,
    };
    let p = spill_point(Some(rect), Vec2::new(1280.0, 800.0), FormFactor::Desktop);
    assert!((p.x - (100.0 + 300.0 * 0.67)).abs() < 1e-3);
    assert!((p.y - (50.0 + 400.0 * 0.18)).abs() < 1e-3);
}

#[test]
fn spill_point_falls_back_without_a_measurable_box() {
    let viewport = Vec2::new(1280.0, 800.0);
    let fallback = spill_point(None, viewport, FormFactor::Desktop);
    assert_eq!(fallback, Vec2::new(740.0, 350.0));

    let unmeasured = Rect::default();
    assert_eq!(
        spill_point(Some(unmeasured), viewport, FormFactor::Desktop),
        fallback
    );

    // A box parked far off-screen is as good as unmeasured.
    let offscreen = Rect {
        left: -5000.0,
        top: 50.0,
        width: 300.0,
        height: 400.0,
    };
    assert_eq!(
        spill_point(Some(offscreen), viewport, FormFactor::Desktop),
        fallback
    );
}

#[test]
fn form_factor_breakpoints() {
    assert_eq!(FormFactor::from_width(500.0), FormFactor::Mobile);
    assert_eq!(FormFactor::from_width(800.0), FormFactor::Tablet);
    assert_eq!(FormFactor::from_width(1280.0), FormFactor::Desktop);
    assert!(FormFactor::from_width(500.0).is_mobile());
}

// ---------------- tilt mapping ----------------

#[test]
fn tilt_maps_and_clamps_orientation_angles() {
    let t = input::tilt_from_orientation(Some(14.0), Some(59.0));
    assert!((t.x - 0.5).abs() < 1e-6);
    assert!((t.y - 0.5).abs() < 1e-6);

    let saturated = input::tilt_from_orientation(Some(90.0), Some(-90.0));
    assert_eq!(saturated, Vec2::new(1.0, -1.0));

    let absent = input::tilt_from_orientation(None, None);
    assert_eq!(absent, Vec2::ZERO);
}
