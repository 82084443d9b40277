//! Cascade scene: nine entities pour out of the package mouth and zigzag
//! down the page in alternating fall and drift beats, then land in a loose
//! cluster and wait to be dragged.

use crate::core::ease::{ease_in_out_quad, ease_out_cubic, ease_out_quad};
use crate::core::entity::{DepthTier, EntityParams, EntityTransform};
use crate::core::math::rand;
use crate::core::scene::common::{FrameInput, PackagePose, SceneFrame, TransformList};
use crate::core::timeline::{Cursor, Timeline};
use crate::core::tumble::{impulse, tumble};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const ANIMATION_START: f32 = 0.06;
const FALL_DURATION: f32 = 0.14;
const PAUSE_DURATION: f32 = 0.07;

// Package image fade as the pour completes.
const PACKAGE_FADE_START: f32 = 0.50;
const PACKAGE_FADE_END: f32 = 0.65;

const IMPULSE_SALT: u32 = 300;
const IMPULSE_AMPLITUDE: Vec3 = Vec3::new(2.5, 3.0, 1.8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    FallRightOne,
    PauseOne,
    FallLeftOne,
    PauseTwo,
    FallRightTwo,
    PauseThree,
    FallLeftTwo,
    Landed,
}

pub struct CascadeScene {
    entities: [EntityParams; 9],
    timeline: Timeline,
}

impl CascadeScene {
    pub fn new() -> Self {
        let entity = |id: u32, tier: DepthTier, depth: f32, delay: f32, size: f32| EntityParams {
            id,
            tier,
            depth_factor: depth,
            timing_offset: delay,
            size_multiplier: size,
        };
        let entities = [
            entity(1, DepthTier::FarBack, -1.0, 0.00, 0.87),
            entity(2, DepthTier::FarBack, -1.0, 0.06, 0.87),
            entity(3, DepthTier::FarBack, -1.0, 0.12, 0.87),
            entity(4, DepthTier::Mid, 0.0, 0.03, 0.87),
            entity(5, DepthTier::Mid, 0.0, 0.09, 0.87),
            entity(6, DepthTier::Mid, 0.0, 0.15, 0.87),
            entity(7, DepthTier::Front, 1.0, 0.05, 0.84),
            entity(8, DepthTier::Front, 1.0, 0.11, 0.84),
            entity(9, DepthTier::Front, 1.0, 0.17, 0.84),
        ];
        let timeline = Timeline::new(
            ANIMATION_START,
            &[
                FALL_DURATION,
                PAUSE_DURATION,
                FALL_DURATION,
                PAUSE_DURATION,
                FALL_DURATION,
                PAUSE_DURATION,
                FALL_DURATION,
            ],
        );
        Self { entities, timeline }
    }

    pub fn entities(&self) -> &[EntityParams] {
        &self.entities
    }

    pub fn phase_at(&self, entity: &EntityParams, progress: f32) -> (Phase, f32) {
        match self.timeline.sample(progress, entity.timing_offset) {
            Cursor::Before => (Phase::Hidden, 0.0),
            Cursor::Within { segment, t } => {
                let phase = match segment {
                    0 => Phase::FallRightOne,
                    1 => Phase::PauseOne,
                    2 => Phase::FallLeftOne,
                    3 => Phase::PauseTwo,
                    4 => Phase::FallRightTwo,
                    5 => Phase::PauseThree,
                    _ => Phase::FallLeftTwo,
                };
                (phase, t)
            }
            Cursor::After => (Phase::Landed, 1.0),
        }
    }

    pub fn frame(&self, input: &FrameInput) -> SceneFrame {
        let mut transforms = TransformList::new();
        for entity in &self.entities {
            transforms.push(evaluate(self, entity, input));
        }
        SceneFrame {
            transforms,
            package: package_pose(input),
            stage: stage(input.progress),
        }
    }
}

impl Default for CascadeScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Zigzag waypoints plus the landing-cluster rest position. Jitter comes from
/// the noise source, so the path is fixed per entity for a given viewport.
fn waypoints(entity: &EntityParams, input: &FrameInput) -> (Vec2, Vec2, Vec2, Vec2) {
    let vw = input.viewport.x;
    let vh = input.viewport.y;
    let mobile = input.form.is_mobile();
    let id = entity.id;

    let spread = entity.tier.spread();
    let id_offset = (id as f32 - 5.0) * (if mobile { 35.0 } else { 55.0 }) * spread;
    let vertical = (rand(id, 150) - 0.5) * vh * 0.15;

    let wp1 = Vec2::new(
        vw * 0.72 + id_offset + (rand(id, 100) - 0.5) * vw * 0.08,
        vh * 0.35 + vertical,
    );
    let wp2 = Vec2::new(
        vw * 0.28 + id_offset * 0.8 + (rand(id, 101) - 0.5) * vw * 0.08,
        vh * 0.50 + vertical * 0.8,
    );
    let wp3 = Vec2::new(
        vw * 0.70 + id_offset * 0.6 + (rand(id, 102) - 0.5) * vw * 0.06,
        vh * 0.65 + vertical * 0.6,
    );

    let landing = Vec2::new(vw * 0.32, vh * 0.80);
    let cluster_radius = vw.min(vh) * (if mobile { 0.22 } else { 0.28 }) * spread;
    let index_in_tier = ((id - 1) % 3) as f32;
    let angle = index_in_tier / 3.0 * TAU + (rand(id, 102) - 0.5) * PI * 0.3;
    let distance = (0.45 + rand(id, 103) * 0.45) * cluster_radius;
    let rest = landing + Vec2::new(angle.cos() * distance, angle.sin() * distance * 0.6);

    (wp1, wp2, wp3, rest)
}

// Later falls push against the accumulated spin rather than resetting it.
fn second_impulse(v0: Vec3) -> Vec3 {
    Vec3::new(v0.x * 0.7, -v0.y * 0.8, v0.z * 0.6)
}

fn third_impulse(v0: Vec3) -> Vec3 {
    Vec3::new(v0.x * 0.5, v0.y * 0.6, -v0.z * 0.4)
}

// Scattered pose held through the last drift beat.
fn scatter_rest(id: u32) -> Vec3 {
    Vec3::new(
        (rand(id, 600) - 0.5) * 180.0,
        (rand(id, 601) - 0.5) * 220.0,
        (rand(id, 602) - 0.5) * 120.0,
    )
}

// Final rest angles once landed, tipped slightly toward the viewer.
fn landed_rest(id: u32) -> Vec3 {
    Vec3::new(
        (rand(id, 700) - 0.5) * 30.0 + 10.0,
        (rand(id, 701) - 0.5) * 40.0,
        (rand(id, 702) - 0.5) * 20.0,
    )
}

fn evaluate(scene: &CascadeScene, entity: &EntityParams, input: &FrameInput) -> EntityTransform {
    let (phase, t) = scene.phase_at(entity, input.progress);
    let mobile = input.form.is_mobile();
    let vh = input.viewport.y;
    let id = entity.id;
    let idf = id as f32;

    let base_scale = if mobile { 0.14 } else { 0.38 };
    let target_scale = base_scale * entity.size_multiplier * (0.9 + rand(id, 400) * 0.2);
    let target_opacity = entity.tier.rest_opacity();
    let rest_blur = entity.tier.rest_blur_px(mobile);

    let (wp1, wp2, wp3, rest) = waypoints(entity, input);
    let v0 = impulse(id, IMPULSE_SALT, IMPULSE_AMPLITUDE);

    let mut pos = input.spill;
    let mut opacity = 0.0;
    let mut scale = target_scale * 0.001; // tiny, not zero, so growth never pops
    let mut rot = Vec3::ZERO;
    let mut blur = rest_blur;

    match phase {
        Phase::Hidden => {
            blur = 0.0;
        }
        Phase::FallRightOne => {
            pos.x = input.spill.x + (wp1.x - input.spill.x) * ease_out_quad(t);
            let arc = -vh * 0.08;
            pos.y = input.spill.y + (wp1.y - input.spill.y) * t + arc * (t * PI).sin();

            rot = tumble(t, id, v0, 0.25);

            // Opacity leads, scale trails from 0.15x, so the entity fades in
            // while already moving.
            let appear = ease_out_cubic((t * 1.2).min(1.0));
            opacity = appear * target_opacity;
            scale = target_scale * (0.15 + 0.85 * appear);
            blur = rest_blur * appear;
        }
        Phase::PauseOne => {
            let float_time = t * TAU;
            pos = wp1
                + Vec2::new(
                    (float_time * 0.7 + idf * 0.3).cos() * 3.0,
                    (float_time + idf * 0.5).sin() * 5.0,
                );

            let base = tumble(1.0, id, v0, 0.25);
            rot = base
                + Vec3::new(
                    (float_time * 0.3).sin() * 5.0,
                    t * 10.0,
                    (float_time * 0.4).cos() * 3.0,
                );

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::FallLeftOne => {
            pos.x = wp1.x + (wp2.x - wp1.x) * ease_in_out_quad(t);
            let arc = -vh * 0.06;
            pos.y = wp1.y + (wp2.y - wp1.y) * t + arc * (t * PI).sin();

            let carried = tumble(1.0, id, v0, 0.25);
            rot = carried + tumble(t, id + 100, second_impulse(v0), 0.3) * 0.6;

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::PauseTwo => {
            let float_time = t * TAU;
            pos = wp2
                + Vec2::new(
                    (float_time * 0.8 + idf * 0.4).cos() * 2.5,
                    (float_time + idf * 0.6).sin() * 4.0,
                );

            let carried = tumble(1.0, id, v0, 0.25);
            let added = tumble(1.0, id + 100, second_impulse(v0), 0.3);
            rot = carried
                + added * 0.6
                + Vec3::new(
                    (float_time * 0.35).sin() * 4.0,
                    t * 8.0,
                    (float_time * 0.45).cos() * 2.5,
                );

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::FallRightTwo => {
            pos.x = wp2.x + (wp3.x - wp2.x) * ease_in_out_quad(t);
            let arc = -vh * 0.05;
            pos.y = wp2.y + (wp3.y - wp2.y) * t + arc * (t * PI).sin();

            let carried = tumble(1.0, id, v0, 0.25);
            let added = tumble(1.0, id + 100, second_impulse(v0), 0.3);
            rot = carried + added * 0.6 + tumble(t, id + 200, third_impulse(v0), 0.35) * 0.4;

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::PauseThree => {
            let float_time = t * TAU;
            pos = wp3
                + Vec2::new(
                    (float_time * 0.9 + idf * 0.5).cos() * 2.0,
                    (float_time + idf * 0.7).sin() * 3.5,
                );

            rot = scatter_rest(id)
                + Vec3::new(
                    (float_time * 0.4).sin() * 3.0,
                    t * 6.0,
                    (float_time * 0.5).cos() * 2.0,
                );

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::FallLeftTwo => {
            pos.x = wp3.x + (rest.x - wp3.x) * ease_in_out_quad(t);
            let arc = -vh * 0.03;
            pos.y = wp3.y + (rest.y - wp3.y) * ease_out_quad(t) + arc * (t * PI).sin();

            let from = scatter_rest(id);
            let to = landed_rest(id);
            let eased = ease_out_cubic(t);
            let settle = (t * PI * 3.0).sin() * (1.0 - t) * 15.0;
            rot = from + (to - from) * eased + Vec3::new(settle, settle * 0.8, settle * 0.5);

            opacity = target_opacity;
            scale = target_scale;
        }
        Phase::Landed => {
            // Breathing runs on the wall clock so the cluster never freezes,
            // even with scroll parked.
            let breathe = input.clock_sec / 3.5 + idf * 0.7;
            pos = rest + Vec2::new((breathe * 0.6).cos(), breathe.sin() * 2.0);
            rot = landed_rest(id)
                + Vec3::new(
                    (breathe * 0.4).sin() * 1.5,
                    (breathe * 0.3).cos() * 2.0,
                    (breathe * 0.5 + 1.0).sin(),
                );

            opacity = target_opacity;
            scale = target_scale;
        }
    }

    let scale = scale.clamp(0.0, base_scale * 2.0);
    let size_px = ((if mobile { 500.0 } else { 750.0 }) * scale / base_scale).round();

    EntityTransform {
        id,
        x: pos.x,
        y: pos.y,
        scale,
        rotation_x: rot.x % 360.0,
        rotation_y: rot.y % 360.0,
        rotation_z: rot.z % 360.0,
        opacity: opacity.clamp(0.0, 1.0),
        blur_px: blur,
        z_order: (200.0 + entity.depth_factor * 100.0) as i32 + id as i32,
        size_px,
        visible: phase != Phase::Hidden,
        interactive: phase == Phase::Landed,
    }
}

fn package_pose(input: &FrameInput) -> PackagePose {
    let width = match input.form {
        crate::core::track::FormFactor::Mobile => 450.0,
        crate::core::track::FormFactor::Tablet => 760.0,
        crate::core::track::FormFactor::Desktop => 1250.0,
    };
    let p = input.progress;
    let opacity = if p < PACKAGE_FADE_START {
        1.0
    } else if p < PACKAGE_FADE_END {
        1.0 - (p - PACKAGE_FADE_START) / (PACKAGE_FADE_END - PACKAGE_FADE_START)
    } else {
        0.0
    };
    let mut pose = PackagePose::resting(input.viewport / 2.0, width);
    pose.opacity = opacity;
    pose.visible = opacity > 0.005;
    pose
}

fn stage(progress: f32) -> &'static str {
    if progress < ANIMATION_START {
        "scroll to begin"
    } else if progress < 0.20 {
        "falling right"
    } else if progress < 0.30 {
        "floating"
    } else if progress < 0.42 {
        "flowing left"
    } else if progress < 0.50 {
        "floating"
    } else if progress < 0.62 {
        "falling right"
    } else if progress < 0.70 {
        "floating"
    } else if progress < 0.85 {
        "final descent"
    } else {
        "settled, drag to spin"
    }
}
