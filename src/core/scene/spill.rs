//! Spill scene: the package tilts into a pour, six entities emerge one by
//! one, drift aside, settle with a small bounce, hang in the air for the drag
//! section, then fall away as the page runs out.

use crate::core::ease::{ease_in_out_cubic, ease_in_out_quad, ease_out_cubic};
use crate::core::entity::{DepthTier, EntityParams, EntityTransform};
use crate::core::scene::common::{FrameInput, PackagePose, SceneFrame, TransformList};
use crate::core::timeline::{Cursor, Timeline};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

// Entity timeline: segments are shifted per entity by its delay; the hover
// and fall windows are absolute so the whole group lets go together.
const POUR_START: f32 = 0.20;
const EMERGE_DURATION: f32 = 0.18;
const DRIFT_DURATION: f32 = 0.12;
const SETTLE_DURATION: f32 = 0.08;
const FALL_START: f32 = 0.90;

// Package pose beats.
const TILT_START: f32 = 0.02;
const TILT_END: f32 = 0.20;
const SINK_START: f32 = 0.35;
const SINK_END: f32 = 0.70;
const POUR_ANGLE_DEG: f32 = -32.0;

// Drift geometry: sideways slide plus a small drop.
const DRIFT_DROP: f32 = 80.0;
// Fraction of the drift segment spent moving; the rest is a deliberate hold.
const DRIFT_MOVE_FRACTION: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Emerging,
    Drifting,
    Settling,
    Hovering,
    Falling,
}

struct SpillEntity {
    base: EntityParams,
    offset_y: f32,
    drift_x: f32,
    rest_rot: Vec3,
    size_desktop: f32,
    size_mobile: f32,
    z_band: i32,
}

pub struct SpillScene {
    entities: [SpillEntity; 6],
    timeline: Timeline,
}

impl SpillScene {
    pub fn new() -> Self {
        let entity = |id: u32,
                      delay: f32,
                      offset_y: f32,
                      drift_x: f32,
                      rest_rot: (f32, f32, f32),
                      size_desktop: f32,
                      size_mobile: f32,
                      z_band: i32| SpillEntity {
            base: EntityParams {
                id,
                tier: DepthTier::Mid,
                depth_factor: 0.0,
                timing_offset: delay,
                size_multiplier: 1.0,
            },
            offset_y,
            drift_x,
            rest_rot: Vec3::new(rest_rot.0, rest_rot.1, rest_rot.2),
            size_desktop,
            size_mobile,
            z_band,
        };
        let entities = [
            entity(1, 0.00, 50.0, 180.0, (45.0, 25.0, -15.0), 850.0, 600.0, 3),
            entity(2, 0.03, 150.0, 200.0, (60.0, -30.0, 20.0), 830.0, 590.0, 5),
            entity(3, 0.06, 250.0, 160.0, (-45.0, 45.0, 10.0), 880.0, 620.0, 4),
            entity(4, 0.09, 350.0, 220.0, (30.0, -60.0, -25.0), 860.0, 605.0, 2),
            entity(5, 0.12, 450.0, 170.0, (-30.0, 70.0, 15.0), 870.0, 615.0, 1),
            entity(6, 0.15, 550.0, 190.0, (50.0, -45.0, -10.0), 865.0, 610.0, 1),
        ];
        let timeline = Timeline::new(
            POUR_START,
            &[EMERGE_DURATION, DRIFT_DURATION, SETTLE_DURATION],
        );
        Self { entities, timeline }
    }

    pub fn entity_params(&self) -> impl Iterator<Item = &EntityParams> {
        self.entities.iter().map(|e| &e.base)
    }

    pub fn phase_at(&self, entity: &EntityParams, progress: f32) -> (Phase, f32) {
        match self.timeline.sample(progress, entity.timing_offset) {
            Cursor::Before => (Phase::Hidden, 0.0),
            Cursor::Within { segment, t } => {
                let phase = match segment {
                    0 => Phase::Emerging,
                    1 => Phase::Drifting,
                    _ => Phase::Settling,
                };
                (phase, t)
            }
            Cursor::After => {
                if progress < FALL_START {
                    (Phase::Hovering, 1.0)
                } else {
                    (
                        Phase::Falling,
                        ((progress - FALL_START) / (1.0 - FALL_START)).clamp(0.0, 1.0),
                    )
                }
            }
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

impl Default for SpillScene {
    fn default() -> Self {
        Self::new()
    }
}

fn evaluate(scene: &SpillScene, entity: &SpillEntity, input: &FrameInput) -> EntityTransform {
    let (phase, t) = scene.phase_at(&entity.base, input.progress);
    let id = entity.base.id;

    // Poured entities drop straight down, then slide aside and hold.
    let dropped = input.spill + Vec2::new(0.0, entity.offset_y);
    let drifted = dropped + Vec2::new(entity.drift_x, DRIFT_DROP);

    let mut pos = input.spill;
    let mut opacity = 0.0;
    let mut scale = 0.0;
    let mut spin = 0.0;

    match phase {
        Phase::Hidden => {}
        Phase::Emerging => {
            let eased = ease_in_out_cubic(t);
            pos = input.spill + (dropped - input.spill) * eased;

            // Opacity rises fast, scale slow, so the entity is visible while
            // still tiny.
            opacity = t.sqrt();
            scale = 0.01 + t * t * 0.69;
            spin = t * 100.0;
        }
        Phase::Drifting => {
            let move_progress = (t / DRIFT_MOVE_FRACTION).min(1.0);
            let eased = ease_in_out_cubic(move_progress);
            pos = if t < DRIFT_MOVE_FRACTION {
                dropped + (drifted - dropped) * eased
            } else {
                drifted
            };

            opacity = 1.0;
            scale = 0.7;
            spin = 100.0 + move_progress * 50.0;
        }
        Phase::Settling => {
            let bounce = (t * PI).sin() * 15.0;
            pos = drifted + Vec2::new(0.0, bounce);

            opacity = 1.0;
            scale = 0.7;
            spin = 150.0 + t * 30.0;
        }
        Phase::Hovering => {
            let float_time = input.clock_sec * 0.5 + id as f32;
            pos = drifted + Vec2::new(0.0, float_time.sin() * 5.0);

            opacity = 1.0;
            scale = 0.7;
            spin = 180.0;
        }
        Phase::Falling => {
            let eased = ease_in_out_cubic(t);
            pos = drifted + Vec2::new(0.0, eased * 800.0);

            opacity = (1.0 - eased * 1.2).max(0.0);
            scale = 0.7 - eased * 0.4;
            spin = 180.0 + t * 180.0;
        }
    }

    let size = if input.form.is_mobile() {
        entity.size_mobile
    } else {
        entity.size_desktop
    };
    let size_px = (size * scale / 0.7).max(0.0);

    EntityTransform {
        id,
        x: pos.x,
        y: pos.y,
        scale,
        rotation_x: (entity.rest_rot.x + spin) % 360.0,
        rotation_y: entity.rest_rot.y % 360.0,
        rotation_z: entity.rest_rot.z % 360.0,
        opacity: opacity.clamp(0.0, 1.0),
        blur_px: 0.0,
        z_order: entity.z_band * 100 + id as i32,
        size_px,
        visible: phase != Phase::Hidden && opacity > 0.004,
        interactive: phase == Phase::Hovering,
    }
}

fn package_pose(input: &FrameInput) -> PackagePose {
    let p = input.progress;
    let width = if input.form.is_mobile() { 450.0 } else { 650.0 };
    let mut pose = PackagePose::resting(input.viewport / 2.0, width);

    if p < TILT_START {
        // resting
    } else if p < TILT_END {
        let t = (p - TILT_START) / (TILT_END - TILT_START);
        pose.rotation_deg = POUR_ANGLE_DEG * ease_in_out_quad(t);
    } else if p < SINK_START {
        pose.rotation_deg = POUR_ANGLE_DEG;
    } else if p < SINK_END {
        let t = (p - SINK_START) / (SINK_END - SINK_START);
        let eased = ease_out_cubic(t);
        pose.rotation_deg = POUR_ANGLE_DEG;
        pose.recede_px = eased * 420.0;
        pose.blur_px = eased * 4.0;
    } else {
        let t = ((p - SINK_END) / 0.30).min(1.0);
        let eased = ease_in_out_quad(t);
        pose.rotation_deg = POUR_ANGLE_DEG;
        pose.recede_px = 420.0 + eased * 480.0;
        pose.blur_px = 4.0 + eased * 3.0;
    }
    pose
}

fn stage(progress: f32) -> &'static str {
    if progress < TILT_START {
        "scroll slowly to begin"
    } else if progress < TILT_END {
        "package tilting"
    } else if progress < 0.45 {
        "nuggets pouring"
    } else if progress < 0.62 {
        "drifting right"
    } else if progress < 0.73 {
        "settling"
    } else if progress < FALL_START {
        "drag the nuggets"
    } else {
        "falling away"
    }
}
