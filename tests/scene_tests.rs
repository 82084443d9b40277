// Host-side end-to-end tests for the three choreography scenes and the
// conductor. The main crate is wasm-only, so we include the pure-Rust modules
// directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core"]
mod core {
    pub mod conductor;
    pub mod ease;
    pub mod entity;
    pub mod math;
    pub mod timeline;
    pub mod track;
    pub mod tumble;
    pub mod scene {
        pub mod cascade;
        pub mod common;
        pub mod orbit;
        pub mod spill;
        pub use common::*;
    }
}

use crate::core::conductor::{Conductor, TickInput};
use crate::core::entity::topmost_hit;
use crate::core::scene::cascade::{CascadeScene, Phase as CascadePhase};
use crate::core::scene::orbit::{OrbitScene, Phase as OrbitPhase};
use crate::core::scene::spill::{Phase as SpillPhase, SpillScene};
use crate::core::scene::{FrameInput, Scene};
use crate::core::track::{DragBoard, FollowMode, FormFactor};
use glam::Vec2;

fn desktop_input(progress: f32, clock_sec: f32) -> FrameInput {
    FrameInput {
        progress,
        viewport: Vec2::new(1280.0, 800.0),
        spill: Vec2::new(500.0, 300.0),
        clock_sec,
        idle_ramp: 0.0,
        tilt: Vec2::ZERO,
        form: FormFactor::Desktop,
    }
}

fn desktop_tick(now_ms: f64) -> TickInput {
    TickInput {
        now_ms,
        viewport: Vec2::new(1280.0, 800.0),
        package_rect: None,
        tilt: Vec2::ZERO,
    }
}

// ---------------- cascade ----------------

#[test]
fn cascade_everything_hidden_before_the_pour() {
    let scene = CascadeScene::new();
    let frame = scene.frame(&desktop_input(0.0, 0.0));
    assert_eq!(frame.transforms.len(), 9);
    for t in &frame.transforms {
        assert!(!t.visible, "entity {} visible at p=0", t.id);
        assert_eq!(t.opacity, 0.0);
        assert!(!t.interactive);
    }
}

#[test]
fn cascade_first_fall_matches_the_interval_math() {
    let scene = CascadeScene::new();
    let first = &scene.entities()[0];
    assert_eq!(first.timing_offset, 0.0);

    // Interval [0.06, 0.20): halfway lands at intra-progress 0.5.
    let (phase, t) = scene.phase_at(first, 0.13);
    assert_eq!(phase, CascadePhase::FallRightOne);
    assert!((t - 0.5).abs() < 1e-3, "t = {}", t);

    let input = desktop_input(0.13, 0.0);
    let frame = scene.frame(&input);
    let falling = frame.transforms.iter().find(|t| t.id == 1).unwrap();
    assert!(falling.visible);
    assert!(falling.opacity > 0.0);
    // Falling right: strictly past the spawn point, on the way to the first
    // waypoint.
    assert!(falling.x > input.spill.x);
}

#[test]
fn cascade_holds_its_end_pose_at_full_scroll() {
    let scene = CascadeScene::new();
    for entity in scene.entities() {
        let (phase, t) = scene.phase_at(entity, 1.0);
        assert_eq!(phase, CascadePhase::Landed, "entity {}", entity.id);
        assert_eq!(t, 1.0);
    }
    let frame = scene.frame(&desktop_input(1.0, 0.0));
    for t in &frame.transforms {
        assert!(t.visible);
        assert!(t.interactive, "landed entity {} not draggable", t.id);
        assert!(t.opacity >= 0.84);
        for v in [t.x, t.y, t.scale, t.rotation_x, t.rotation_y, t.rotation_z] {
            assert!(v.is_finite(), "entity {} has a non-finite channel", t.id);
        }
    }
}

#[test]
fn cascade_phase_boundaries_do_not_pop() {
    let scene = CascadeScene::new();
    // Boundaries of entity 1 (timing offset 0).
    for boundary in [0.20f32, 0.27, 0.41, 0.48, 0.62, 0.69, 0.83] {
        let before = scene.frame(&desktop_input(boundary - 1e-3, 0.0));
        let after = scene.frame(&desktop_input(boundary + 1e-3, 0.0));
        let a = before.transforms.iter().find(|t| t.id == 1).unwrap();
        let b = after.transforms.iter().find(|t| t.id == 1).unwrap();
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        assert!(
            dx < 12.0 && dy < 12.0,
            "position pops at {}: d=({}, {})",
            boundary,
            dx,
            dy
        );
        assert!(
            (a.opacity - b.opacity).abs() < 0.02,
            "opacity pops at {}",
            boundary
        );
    }
}

#[test]
fn cascade_reverses_without_hysteresis() {
    let scene = CascadeScene::new();
    let entity = &scene.entities()[4];
    let steps: Vec<f32> = (0..=400).map(|i| i as f32 / 400.0).collect();
    let forward: Vec<_> = steps.iter().map(|p| scene.phase_at(entity, *p)).collect();
    let backward: Vec<_> = steps
        .iter()
        .rev()
        .map(|p| scene.phase_at(entity, *p))
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();
    assert_eq!(backward, reversed);
}

#[test]
fn cascade_drag_perturbs_only_the_dragged_entity() {
    let scene = Scene::by_name("cascade");
    let input = desktop_input(1.0, 0.0);

    let calm = scene.frame(&input, &DragBoard::default());

    let mut drags = DragBoard::default();
    drags.begin(9, 100.0);
    drags.update(9, 150.0);
    let dragged = scene.frame(&input, &drags);

    let calm9 = calm.transforms.iter().find(|t| t.id == 9).unwrap();
    let drag9 = dragged.transforms.iter().find(|t| t.id == 9).unwrap();
    assert!((drag9.x - calm9.x - 10.0).abs() < 1e-3);
    assert!((drag9.rotation_y - calm9.rotation_y - 3.0).abs() < 1e-3);

    let calm8 = calm.transforms.iter().find(|t| t.id == 8).unwrap();
    let drag8 = dragged.transforms.iter().find(|t| t.id == 8).unwrap();
    assert_eq!(calm8.x, drag8.x);
    assert_eq!(calm8.rotation_y, drag8.rotation_y);
}

#[test]
fn tilt_leans_every_visible_entity() {
    let scene = Scene::by_name("cascade");
    let mut input = desktop_input(1.0, 0.0);
    let level = scene.frame(&input, &DragBoard::default());
    input.tilt = Vec2::new(1.0, 0.0);
    let tilted = scene.frame(&input, &DragBoard::default());

    let expected_yaw = 0.18f32.to_degrees();
    for (a, b) in level.transforms.iter().zip(tilted.transforms.iter()) {
        assert!((b.rotation_y - a.rotation_y - expected_yaw).abs() < 1e-3);
        assert_eq!(a.rotation_x, b.rotation_x);
    }
}

// ---------------- orbit ----------------

#[test]
fn orbit_opens_dark() {
    let scene = OrbitScene::new();
    let frame = scene.frame(&desktop_input(0.0, 0.0));
    assert_eq!(frame.transforms.len(), 4);
    for t in &frame.transforms {
        assert!(!t.visible);
        assert_eq!(t.opacity, 0.0);
    }
}

#[test]
fn orbit_everything_orbits_at_full_scroll() {
    let scene = OrbitScene::new();
    for entity in scene.entities() {
        let (phase, t) = scene.phase_at(entity, 1.0);
        assert_eq!(phase, OrbitPhase::Orbit);
        assert_eq!(t, 1.0);
    }
    let frame = scene.frame(&desktop_input(1.0, 5.0));
    for t in &frame.transforms {
        assert!(t.visible);
        assert!(t.interactive);
        assert_eq!(t.opacity, 1.0);
        assert!(t.size_px > 0.0);
    }
}

#[test]
fn orbit_speed_ramps_with_idle_time() {
    let scene = OrbitScene::new();
    let mut calm_input = desktop_input(0.6, 10.0);
    let calm = scene.frame(&calm_input);
    calm_input.idle_ramp = 1.0;
    let excited = scene.frame(&calm_input);

    let a = calm.transforms.iter().find(|t| t.id == 1).unwrap();
    let b = excited.transforms.iter().find(|t| t.id == 1).unwrap();
    let moved = (a.x - b.x).abs() + (a.y - b.y).abs();
    assert!(moved > 1.0, "idle ramp had no effect on the orbit");
}

#[test]
fn orbit_stack_phase_is_independent_of_idle() {
    let scene = OrbitScene::new();
    let mut input = desktop_input(0.15, 3.0);
    let calm = scene.frame(&input);
    input.idle_ramp = 1.0;
    let idle = scene.frame(&input);
    for (a, b) in calm.transforms.iter().zip(idle.transforms.iter()) {
        assert_eq!((a.x, a.y), (b.x, b.y));
        assert_eq!(a.rotation_y, b.rotation_y);
        assert_eq!(a.blur_px, b.blur_px);
    }
}

#[test]
fn orbit_slam_lands_on_the_pyramid_slot() {
    let scene = OrbitScene::new();
    let first = &scene.entities()[0];
    // Just below and above the first entity's slam end (0.08).
    let before = scene.frame(&desktop_input(0.08 - 1e-3, 0.0));
    let after = scene.frame(&desktop_input(0.08 + 1e-3, 0.0));
    let a = before.transforms.iter().find(|t| t.id == first.id).unwrap();
    let b = after.transforms.iter().find(|t| t.id == first.id).unwrap();
    assert!((a.x - b.x).abs() < 16.0);
    assert!((a.y - b.y).abs() < 16.0);
}

#[test]
fn orbit_package_fades_out_early() {
    let scene = OrbitScene::new();
    assert!(scene.frame(&desktop_input(0.0, 0.0)).package.opacity >= 1.0 - 1e-6);
    let mid = scene.frame(&desktop_input(0.035, 0.0)).package.opacity;
    assert!(mid > 0.0 && mid < 1.0);
    assert_eq!(scene.frame(&desktop_input(0.2, 0.0)).package.opacity, 0.0);
}

// ---------------- spill ----------------

#[test]
fn spill_phases_follow_the_pour() {
    let scene = SpillScene::new();
    let first = scene.entity_params().next().unwrap().clone();
    let last = scene.entity_params().last().unwrap().clone();

    assert_eq!(scene.phase_at(&first, 0.10).0, SpillPhase::Hidden);

    let (phase, t) = scene.phase_at(&first, 0.29);
    assert_eq!(phase, SpillPhase::Emerging);
    assert!((t - 0.5).abs() < 1e-3);

    assert_eq!(scene.phase_at(&first, 0.45).0, SpillPhase::Drifting);
    assert_eq!(scene.phase_at(&first, 0.55).0, SpillPhase::Settling);
    assert_eq!(scene.phase_at(&first, 0.80).0, SpillPhase::Hovering);

    // The last entity is still emerging while the first already drifts.
    let (phase, t) = scene.phase_at(&last, 0.45);
    assert_eq!(phase, SpillPhase::Emerging);
    assert!((t - 0.5556).abs() < 1e-3);

    let (phase, t) = scene.phase_at(&first, 1.0);
    assert_eq!(phase, SpillPhase::Falling);
    assert_eq!(t, 1.0);
}

#[test]
fn spill_package_tilts_then_recedes() {
    let scene = SpillScene::new();
    assert_eq!(scene.frame(&desktop_input(0.0, 0.0)).package.rotation_deg, 0.0);

    let tilting = scene.frame(&desktop_input(0.11, 0.0)).package;
    assert!(tilting.rotation_deg < 0.0 && tilting.rotation_deg > -32.0);

    let pouring = scene.frame(&desktop_input(0.25, 0.0)).package;
    assert!((pouring.rotation_deg + 32.0).abs() < 1e-3);
    assert_eq!(pouring.recede_px, 0.0);

    let sinking = scene.frame(&desktop_input(0.5, 0.0)).package;
    assert!(sinking.recede_px > 0.0);
    assert!(sinking.blur_px > 0.0);

    let falling = scene.frame(&desktop_input(0.95, 0.0)).package;
    assert!(falling.recede_px > 420.0);
}

#[test]
fn spill_fades_out_at_the_bottom() {
    let scene = SpillScene::new();
    let frame = scene.frame(&desktop_input(1.0, 0.0));
    for t in &frame.transforms {
        assert_eq!(t.opacity, 0.0, "entity {} still lit at p=1", t.id);
        assert!(!t.visible);
        assert!(t.x.is_finite() && t.y.is_finite());
    }
}

// ---------------- conductor ----------------

#[test]
fn conductor_smooths_toward_the_target_and_settles() {
    let mut c = Conductor::new(Scene::by_name("orbit"), 0.0);
    assert_eq!(c.follower.value(), 0.0);
    c.set_scroll_target(1.0);

    let mut prev = 0.0;
    let mut settled_at = None;
    for frame_index in 0..200 {
        let out = c.tick(&desktop_tick(frame_index as f64 * 16.0));
        assert_eq!(out.transforms.len(), 4);
        let v = c.follower.value();
        assert!(v >= prev, "progress went backwards");
        prev = v;
        if v == 1.0 {
            settled_at = Some(frame_index);
            break;
        }
    }
    assert!(settled_at.is_some(), "smoothing never settled");
}

#[test]
fn conductor_routes_pointer_hits_and_drags() {
    let mut c = Conductor::new(Scene::by_name("spill"), 0.0);
    c.set_scroll_target(0.8);

    let base = c.tick(&desktop_tick(1000.0));
    let hover: Vec<_> = base.transforms.iter().filter(|t| t.interactive).collect();
    assert_eq!(hover.len(), 6, "all entities hover at p=0.8");

    // The interaction overlay routes a press through the bounding boxes.
    let grab = topmost_hit(&base.transforms, 920.0, 480.0);
    assert_eq!(grab, Some(2), "z band 5 wins the overlap");

    c.drags.begin(2, 100.0);
    c.drags.update(2, 150.0);
    let dragged = c.tick(&desktop_tick(1000.0));

    let base2 = base.transforms.iter().find(|t| t.id == 2).unwrap();
    let drag2 = dragged.transforms.iter().find(|t| t.id == 2).unwrap();
    assert!((drag2.x - base2.x - 10.0).abs() < 1e-3);

    let base3 = base.transforms.iter().find(|t| t.id == 3).unwrap();
    let drag3 = dragged.transforms.iter().find(|t| t.id == 3).unwrap();
    assert_eq!(base3.x, drag3.x);
}

#[test]
fn conductor_honors_the_drag_release_deadline() {
    let mut c = Conductor::new(Scene::by_name("spill"), 0.0);
    c.set_scroll_target(0.8);
    let base = c.tick(&desktop_tick(1000.0));
    let base_x = base.transforms.iter().find(|t| t.id == 2).unwrap().x;

    c.drags.begin(2, 100.0);
    c.drags.update(2, 150.0);
    c.drags.release(2, 1000.0);

    let held = c.tick(&desktop_tick(1399.0));
    let held_x = held.transforms.iter().find(|t| t.id == 2).unwrap().x;
    assert!((held_x - base_x - 10.0).abs() < 1e-3, "offset vanished early");

    let cleared = c.tick(&desktop_tick(1401.0));
    let cleared_x = cleared.transforms.iter().find(|t| t.id == 2).unwrap().x;
    assert!((cleared_x - base_x).abs() < 1e-3, "offset survived its deadline");
}

#[test]
fn scenes_declare_their_follow_mode() {
    assert_eq!(Scene::by_name("orbit").follow_mode(), FollowMode::Smoothed);
    assert_eq!(Scene::by_name("cascade").follow_mode(), FollowMode::Direct);
    assert_eq!(Scene::by_name("spill").follow_mode(), FollowMode::Direct);
    // Unknown names fall back to the cascade.
    assert_eq!(Scene::by_name("").name(), "cascade");
}
