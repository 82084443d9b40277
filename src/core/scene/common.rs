//! Shared inputs and outputs of the choreography scenes.
//!
//! A scene is one configuration of the engine: a fixed entity list, a phase
//! timeline, and a motion rule per phase. All three ship behind the `Scene`
//! enum; the dispatch is exhaustive so a scene without motion rules cannot
//! compile.

use crate::constants::{DRAG_ROT_Y_DEG_PER_PX, TILT_PITCH_RAD, TILT_YAW_RAD};
use crate::core::entity::EntityTransform;
use crate::core::track::{DragBoard, FollowMode, FormFactor};
use glam::Vec2;
use smallvec::SmallVec;

/// Inputs of one recomputation. Every entity sees the same values; no entity
/// transform depends on another entity's transform.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// Scroll progress in [0,1], already smoothed when the scene asks for it.
    pub progress: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    /// Spawn point entities emerge from, in CSS pixels.
    pub spill: Vec2,
    /// Wall-clock seconds, used only by idle and breathing motion.
    pub clock_sec: f32,
    /// Idle duration normalized onto [0,1].
    pub idle_ramp: f32,
    /// Device tilt in [-1,1] per axis.
    pub tilt: Vec2,
    pub form: FormFactor,
}

/// Pose of the 2D package image element.
#[derive(Clone, Copy, Debug)]
pub struct PackagePose {
    /// Screen center in CSS pixels.
    pub center: Vec2,
    pub width_px: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
    pub blur_px: f32,
    /// Push-back along the z axis, in CSS pixels of perspective translation.
    pub recede_px: f32,
    pub visible: bool,
}

impl PackagePose {
    pub fn resting(center: Vec2, width_px: f32) -> Self {
        Self {
            center,
            width_px,
            rotation_deg: 0.0,
            opacity: 1.0,
            blur_px: 0.0,
            recede_px: 0.0,
            visible: true,
        }
    }
}

pub type TransformList = SmallVec<[EntityTransform; 12]>;

/// Everything one frame produces for the render and overlay layers.
#[derive(Clone, Debug)]
pub struct SceneFrame {
    pub transforms: TransformList,
    pub package: PackagePose,
    /// Short status line for the progress overlay.
    pub stage: &'static str,
}

pub enum Scene {
    Cascade(super::cascade::CascadeScene),
    Orbit(super::orbit::OrbitScene),
    Spill(super::spill::SpillScene),
}

impl Scene {
    /// Scene selected by the host page; unknown names fall back to the
    /// cascade, the richest instance.
    pub fn by_name(name: &str) -> Self {
        match name {
            "orbit" => Scene::Orbit(super::orbit::OrbitScene::new()),
            "spill" => Scene::Spill(super::spill::SpillScene::new()),
            _ => Scene::Cascade(super::cascade::CascadeScene::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scene::Cascade(_) => "cascade",
            Scene::Orbit(_) => "orbit",
            Scene::Spill(_) => "spill",
        }
    }

    /// Scroll-follow mode this scene was tuned for. Mixing modes within one
    /// scene causes visible jitter, so the choice lives here.
    pub fn follow_mode(&self) -> FollowMode {
        match self {
            Scene::Orbit(_) => FollowMode::Smoothed,
            Scene::Cascade(_) | Scene::Spill(_) => FollowMode::Direct,
        }
    }

    /// Recompute every entity transform and the package pose for one frame.
    pub fn frame(&self, input: &FrameInput, drags: &DragBoard) -> SceneFrame {
        let mut frame = match self {
            Scene::Cascade(s) => s.frame(input),
            Scene::Orbit(s) => s.frame(input),
            Scene::Spill(s) => s.frame(input),
        };
        apply_pointer_offsets(&mut frame.transforms, input, drags);
        frame
    }
}

/// Drag and tilt perturb the computed pose additively. Drag is scoped to the
/// dragged entity; tilt leans everything visible the same way.
fn apply_pointer_offsets(transforms: &mut [EntityTransform], input: &FrameInput, drags: &DragBoard) {
    let tilt_pitch = input.tilt.y * TILT_PITCH_RAD.to_degrees();
    let tilt_yaw = input.tilt.x * TILT_YAW_RAD.to_degrees();
    for t in transforms.iter_mut() {
        if !t.visible {
            continue;
        }
        t.rotation_x += tilt_pitch;
        t.rotation_y += tilt_yaw;
        let offset = drags.offset(t.id);
        if offset != 0.0 {
            t.x += offset;
            t.rotation_y += offset * DRAG_ROT_Y_DEG_PER_PX;
        }
    }
}
