//! Orbit scene: four entities slam in from the screen edges, stack into a
//! pyramid, then morph onto an elliptical orbit around the package slot. The
//! orbit spins up the longer the user stays idle and settles the moment they
//! scroll again.

use crate::core::ease::{ease_in_out_cubic, ease_out_back, ease_out_elastic, ease_out_expo};
use crate::core::entity::{DepthTier, EntityParams, EntityTransform};
use crate::core::math::{lerp, rand};
use crate::core::scene::common::{FrameInput, PackagePose, SceneFrame, TransformList};
use crate::core::tumble::impulse;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

const SLAM_END: f32 = 0.08;
const STACK_END: f32 = 0.22;
const MORPH_END: f32 = 0.40;

const SLAM_STAGGER: f32 = 0.006;
const PYRAMID_STEP: f32 = 108.0;
const PYRAMID_SLOTS: [Vec2; 4] = [
    Vec2::new(0.0, -0.8),
    Vec2::new(-2.3, 1.1),
    Vec2::new(2.3, 1.1),
    Vec2::new(0.0, 2.1),
];

// Idle-ramped orbit speed (radians per second against the wall clock).
const ORBIT_SPEED_MIN: f32 = 0.10;
const ORBIT_SPEED_MAX: f32 = 0.42;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Slam,
    Stack,
    Morph,
    Orbit,
}

pub struct OrbitScene {
    entities: [EntityParams; 4],
}

impl OrbitScene {
    pub fn new() -> Self {
        let entity = |i: u32| {
            let tier = match i % 3 {
                0 => DepthTier::FarBack,
                1 => DepthTier::Mid,
                _ => DepthTier::Front,
            };
            let size = match i % 3 {
                0 => 0.74,
                1 => 0.90,
                _ => 1.12,
            };
            EntityParams {
                id: i + 1,
                tier,
                depth_factor: 0.0,
                timing_offset: i as f32 * SLAM_STAGGER,
                size_multiplier: size,
            }
        };
        Self {
            entities: [entity(0), entity(1), entity(2), entity(3)],
        }
    }

    pub fn entities(&self) -> &[EntityParams] {
        &self.entities
    }

    pub fn phase_at(&self, entity: &EntityParams, progress: f32) -> (Phase, f32) {
        let slam_start = entity.timing_offset;
        let slam_end = SLAM_END + entity.timing_offset * 0.3;
        if progress < slam_start {
            (Phase::Hidden, 0.0)
        } else if progress < slam_end {
            (Phase::Slam, (progress - slam_start) / (slam_end - slam_start))
        } else if progress < STACK_END {
            (Phase::Stack, (progress - slam_end) / (STACK_END - slam_end))
        } else if progress < MORPH_END {
            (Phase::Morph, (progress - STACK_END) / (MORPH_END - STACK_END))
        } else {
            (
                Phase::Orbit,
                ((progress - MORPH_END) / (1.0 - MORPH_END)).clamp(0.0, 1.0),
            )
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

impl Default for OrbitScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Off-screen start position on the entity's assigned edge, padded so even a
/// large blurred billboard never peeks in early.
fn entry_point(index: usize, id: u32, size_multiplier: f32, viewport: Vec2) -> Vec2 {
    let pad = 600.0 * size_multiplier * 1.4;
    match index {
        0 => Vec2::new(viewport.x * (0.25 + rand(id, 210) * 0.5), -pad),
        1 => Vec2::new(-pad, viewport.y + pad),
        2 => Vec2::new(viewport.x + pad, viewport.y + pad),
        _ => Vec2::new(viewport.x / 2.0, -(800.0 * size_multiplier)),
    }
}

fn evaluate(scene: &OrbitScene, entity: &EntityParams, input: &FrameInput) -> EntityTransform {
    let (phase, t) = scene.phase_at(entity, input.progress);
    let vw = input.viewport.x;
    let vh = input.viewport.y;
    let id = entity.id;
    let index = (id - 1) as usize;
    let fi = index as f32;
    let clock = input.clock_sec;

    let size = 800.0 * entity.size_multiplier;
    let rest_scale = 0.30 * entity.size_multiplier;
    let rest_blur = match entity.tier {
        DepthTier::FarBack => 1.5,
        DepthTier::Mid => 0.6,
        DepthTier::Front => 0.0,
    };
    let order = entity.tier.order_base() + index as i32;

    let entry = entry_point(index, id, entity.size_multiplier, input.viewport);
    let pyramid = Vec2::new(vw * 0.70, vh * 0.50)
        + PYRAMID_SLOTS.get(index).copied().unwrap_or(Vec2::ZERO) * PYRAMID_STEP;
    let orbit_center = Vec2::new(vw * 0.74, vh * 0.50);
    let orbit_radius = Vec2::new(vw * 0.22, vh * 0.34);

    let ramp = input.idle_ramp;
    let eased_idle = ease_in_out_cubic(ramp);
    let orbit_speed = lerp(ORBIT_SPEED_MIN, ORBIT_SPEED_MAX, eased_idle);
    let base_angle = fi / 4.0 * TAU;
    let cur_angle = base_angle + clock * orbit_speed;
    let orbit_pos = orbit_center
        + Vec2::new(
            cur_angle.cos() * orbit_radius.x,
            cur_angle.sin() * orbit_radius.y * 0.65,
        );
    let depth_t = (cur_angle.cos() + 1.0) / 2.0;
    let orbit_depth_scale = lerp(0.40, 1.8, depth_t);
    let depth_order = order + (depth_t.clamp(0.0, 0.999) * 5.0).floor() as i32 * 10;

    let spin = impulse(id, 20, Vec3::new(5.0, 6.0, 4.0));
    let direction = if rand(id, 30) > 0.5 { 1.0 } else { -1.0 };

    let mut pos = entry;
    let mut opacity = 0.0;
    let mut scale = 0.0;
    let mut rot = Vec3::ZERO;
    let mut blur = rest_blur;
    let mut depth_scale = 1.0;

    match phase {
        Phase::Hidden => {}
        Phase::Slam => {
            // Two-stage arrival: an expo rush covers 88% of the distance, an
            // elastic tail closes the rest and overshoots into the slot.
            let pos_t = if t < 0.6 {
                ease_out_expo(t / 0.6) * 0.88
            } else {
                lerp(0.88, 1.0, ease_out_elastic((t - 0.6) / 0.4))
            };
            pos = entry + (pyramid - entry) * pos_t;

            opacity = (t / 0.04).clamp(0.0, 1.0);

            let impact_t = ((t - 0.55) / 0.15).clamp(0.0, 1.0);
            let squash = if t > 0.6 {
                1.0 - (ease_out_elastic(impact_t) * PI).sin() * 0.12
            } else {
                1.0
            };
            scale = rest_scale * ease_out_back((t * 1.2).clamp(0.0, 1.0)) * squash;

            let spin_decay = (-4.0 * t).exp();
            rot = Vec3::new(
                spin.x * t * 380.0 * spin_decay,
                spin.y * t * 460.0 * spin_decay,
                spin.z * t * 280.0 * spin_decay,
            );
            blur = rest_blur + lerp(6.0, 0.0, ease_out_expo(t));
        }
        Phase::Stack => {
            let shake_amp = lerp(12.0, 0.0, ease_out_expo(t));
            let shake_freq = 6.0 + fi * 0.4;
            pos = pyramid
                + Vec2::new(
                    (t * PI * shake_freq + fi * 1.1).cos() * shake_amp * (rand(id, 40) - 0.5) * 2.0,
                    (t * PI * shake_freq + fi * 0.9).sin() * shake_amp * (rand(id, 41) - 0.5) * 2.0,
                );

            opacity = 1.0;
            scale = rest_scale;
            rot = Vec3::new(
                (clock * 0.9 + fi).sin() * 8.0,
                clock * 20.0 * direction,
                (clock * 0.6 + fi * 1.2).cos() * 5.0,
            );
        }
        Phase::Morph => {
            let te = ease_in_out_cubic(t);
            // Rewind the clock contribution so the hand-off angle matches
            // where the orbit actually is when the morph completes.
            let morph_angle = base_angle + (clock - (MORPH_END - STACK_END) * t) * orbit_speed;
            pos = Vec2::new(
                lerp(pyramid.x, orbit_center.x + morph_angle.cos() * orbit_radius.x, te),
                lerp(
                    pyramid.y,
                    orbit_center.y + morph_angle.sin() * orbit_radius.y * 0.65,
                    te,
                ),
            );

            opacity = 1.0;
            scale = rest_scale;
            depth_scale = lerp(1.0, orbit_depth_scale, te);
            rot = Vec3::new(
                (clock * lerp(0.9, 2.0, te) + fi).sin() * lerp(8.0, 20.0, te),
                clock * lerp(20.0, 70.0, te) * direction,
                (clock * lerp(0.6, 1.5, te) + fi * 1.2).cos() * lerp(5.0, 15.0, te),
            );
            blur = lerp(rest_blur, lerp(3.5, 0.0, ease_out_expo(depth_t)), te);
        }
        Phase::Orbit => {
            pos = orbit_pos;
            opacity = 1.0;
            depth_scale = orbit_depth_scale;

            let spin_speed = lerp(28.0, 95.0, eased_idle);
            rot = Vec3::new(
                (clock * lerp(1.1, 2.4, ramp) + fi * 0.9).sin() * lerp(9.0, 24.0, ramp),
                clock * spin_speed * direction,
                (clock * lerp(0.7, 1.7, ramp) + fi * 1.3).cos() * lerp(6.0, 18.0, ramp),
            );
            scale = rest_scale * (1.0 + (clock * 1.1 + fi * 0.7).sin() * lerp(0.0, 0.07, ramp));
            blur = lerp(3.5, 0.0, ease_out_expo(depth_t));
        }
    }

    let scale = scale.clamp(0.0, rest_scale * 2.0);
    let size_px = (size * (scale / rest_scale) * depth_scale).max(0.0);
    let visible = phase != Phase::Hidden && opacity > 0.01;

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
        z_order: if phase == Phase::Orbit { depth_order } else { order },
        size_px,
        visible,
        interactive: phase == Phase::Orbit,
    }
}

fn package_pose(input: &FrameInput) -> PackagePose {
    let vw = input.viewport.x;
    let vh = input.viewport.y;
    let float_t = input.clock_sec * 0.55;
    let float_y = float_t.sin() * 14.0 + (float_t * 0.52).sin() * 6.0;
    let float_r = (float_t * 0.62).sin() * 1.8 + (float_t * 0.27).sin() * 0.7;

    let height = vh * 1.7;
    let width = height * 0.70;
    let center = Vec2::new(
        vw * 0.38 + width / 2.0,
        (vh - height) / 1.5 + float_y + height / 2.0,
    );

    let p = input.progress;
    let opacity = if p < 0.01 {
        1.0
    } else if p < 0.06 {
        1.0 - (p - 0.01) / 0.05
    } else {
        0.0
    };

    let mut pose = PackagePose::resting(center, width);
    pose.rotation_deg = float_r;
    pose.opacity = opacity;
    pose.visible = opacity > 0.005;
    pose
}

fn stage(progress: f32) -> &'static str {
    if progress < SLAM_END {
        "slam"
    } else if progress < STACK_END {
        "pyramid"
    } else if progress < MORPH_END {
        "morph"
    } else {
        "orbit"
    }
}
