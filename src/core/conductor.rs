//! The frame-tick source.
//!
//! One `tick` fans out to the trackers and the scene in a fixed order:
//! scroll smoothing, idle clock, drag expiry, then the transform pass. The
//! caller (the frame loop) submits the result to the renderer and the DOM;
//! nothing here touches a display, so the whole schedule is testable.

use crate::core::entity::Rect;
use crate::core::scene::{FrameInput, Scene, SceneFrame};
use crate::core::track::{spill_point, DragBoard, FormFactor, IdleTracker, ScrollFollower};
use glam::Vec2;

/// Host-side inputs of one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickInput {
    pub now_ms: f64,
    pub viewport: Vec2,
    /// Bounding box of the package image element, when measurable.
    pub package_rect: Option<Rect>,
    pub tilt: Vec2,
}

pub struct Conductor {
    pub scene: Scene,
    pub follower: ScrollFollower,
    pub idle: IdleTracker,
    pub drags: DragBoard,
}

impl Conductor {
    pub fn new(scene: Scene, now_ms: f64) -> Self {
        let follower = ScrollFollower::new(scene.follow_mode());
        Self {
            scene,
            follower,
            idle: IdleTracker::new(now_ms),
            drags: DragBoard::default(),
        }
    }

    /// Feed a raw scroll-progress sample from a scroll event.
    pub fn set_scroll_target(&mut self, raw: f32) {
        self.follower.set_target(raw);
    }

    /// Advance one frame and recompute every entity transform.
    pub fn tick(&mut self, inp: &TickInput) -> SceneFrame {
        let progress = self.follower.step();
        self.idle.observe(progress, inp.now_ms);
        self.drags.tick(inp.now_ms);

        let form = FormFactor::from_width(inp.viewport.x);
        let input = FrameInput {
            progress,
            viewport: inp.viewport,
            spill: spill_point(inp.package_rect, inp.viewport, form),
            clock_sec: (inp.now_ms / 1000.0) as f32,
            idle_ramp: self.idle.ramp(inp.now_ms),
            tilt: inp.tilt,
            form,
        };
        self.scene.frame(&input, &self.drags)
    }
}
