//! Frame-to-frame trackers: scroll progress, idle clock, and drag offsets.
//!
//! These are the only pieces of mutable animation state in the engine; the
//! entity transforms themselves are recomputed from scratch every frame.

use crate::constants::*;
use crate::core::entity::Rect;
use fnv::FnvHashMap;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactor {
    Mobile,
    Tablet,
    Desktop,
}

impl FormFactor {
    #[inline]
    pub fn from_width(width: f32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            FormFactor::Mobile
        } else if width < TABLET_MAX_WIDTH {
            FormFactor::Tablet
        } else {
            FormFactor::Desktop
        }
    }

    #[inline]
    pub fn is_mobile(self) -> bool {
        self == FormFactor::Mobile
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            FormFactor::Mobile => 0,
            FormFactor::Tablet => 1,
            FormFactor::Desktop => 2,
        }
    }
}

/// Raw scroll progress in [0,1]. A degenerate scroll range (document no
/// taller than the viewport) yields 0, never NaN or infinity.
#[inline]
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f32 {
    let range = document_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    ((scroll_y / range) as f32).clamp(0.0, 1.0)
}

/// How progress follows the raw scroll value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowMode {
    /// Progress equals the raw value on every event; no per-frame stepping.
    Direct,
    /// A per-frame step consumes a fixed fraction of the remaining distance
    /// and snaps once the residual drops below epsilon. Requires the frame
    /// loop to keep ticking between scroll events.
    Smoothed,
}

#[derive(Clone, Debug)]
pub struct ScrollFollower {
    mode: FollowMode,
    value: f32,
    target: f32,
}

impl ScrollFollower {
    pub fn new(mode: FollowMode) -> Self {
        Self {
            mode,
            value: 0.0,
            target: 0.0,
        }
    }

    pub fn set_target(&mut self, raw: f32) {
        self.target = raw.clamp(0.0, 1.0);
        if self.mode == FollowMode::Direct {
            self.value = self.target;
        }
    }

    /// Advance one frame toward the target and return the current value.
    pub fn step(&mut self) -> f32 {
        if self.mode == FollowMode::Smoothed {
            let next = self.value + (self.target - self.value) * SCROLL_FOLLOW_PER_FRAME;
            self.value = if (self.target - next).abs() < SCROLL_SNAP_EPSILON {
                self.target
            } else {
                next
            };
        }
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Wall-clock time since scroll progress last moved, used to ramp idle-only
/// motion up while the user rests and cut it the moment they scroll again.
#[derive(Clone, Debug)]
pub struct IdleTracker {
    last_change_ms: f64,
    last_seen: f32,
}

impl IdleTracker {
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_change_ms: now_ms,
            last_seen: 0.0,
        }
    }

    pub fn observe(&mut self, progress: f32, now_ms: f64) {
        if (progress - self.last_seen).abs() > IDLE_DELTA_THRESHOLD {
            self.last_change_ms = now_ms;
            self.last_seen = progress;
        }
    }

    #[inline]
    pub fn idle_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_change_ms).max(0.0)
    }

    /// Idle duration normalized onto [0,1] over the ramp window. Callers feed
    /// this through whichever easing their motion wants.
    #[inline]
    pub fn ramp(&self, now_ms: f64) -> f32 {
        ((self.idle_ms(now_ms) / IDLE_RAMP_MS) as f32).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug)]
struct DragSlot {
    start_x: f32,
    offset: f32,
    dragging: bool,
    clear_at_ms: Option<f64>,
}

/// Per-entity horizontal drag offsets. An offset lives from pointer-down
/// until a fixed delay after release; the expiry is a deadline checked on the
/// frame tick, so there is never more than one pending clear per entity.
#[derive(Clone, Debug, Default)]
pub struct DragBoard {
    slots: FnvHashMap<u32, DragSlot>,
}

impl DragBoard {
    pub fn begin(&mut self, id: u32, x: f32) {
        // Restarting a drag cancels any pending clear for the same entity.
        let slot = self.slots.entry(id).or_insert(DragSlot {
            start_x: x,
            offset: 0.0,
            dragging: false,
            clear_at_ms: None,
        });
        slot.start_x = x;
        slot.dragging = true;
        slot.clear_at_ms = None;
    }

    pub fn update(&mut self, id: u32, x: f32) {
        if let Some(slot) = self.slots.get_mut(&id) {
            if slot.dragging {
                slot.offset = (x - slot.start_x) * DRAG_DAMPING;
            }
        }
    }

    pub fn release(&mut self, id: u32, now_ms: f64) {
        if let Some(slot) = self.slots.get_mut(&id) {
            if slot.dragging {
                slot.dragging = false;
                slot.clear_at_ms = Some(now_ms + DRAG_CLEAR_DELAY_MS);
            }
        }
    }

    /// Drop offsets whose release deadline has passed.
    pub fn tick(&mut self, now_ms: f64) {
        self.slots
            .retain(|_, s| s.dragging || s.clear_at_ms.map_or(false, |at| now_ms < at));
    }

    #[inline]
    pub fn offset(&self, id: u32) -> f32 {
        self.slots.get(&id).map_or(0.0, |s| s.offset)
    }

    #[inline]
    pub fn is_dragging(&self, id: u32) -> bool {
        self.slots.get(&id).map_or(false, |s| s.dragging)
    }

    #[inline]
    pub fn any_dragging(&self) -> bool {
        self.slots.values().any(|s| s.dragging)
    }
}

/// Screen point entities emerge from: a fixed fraction of the package image
/// box, or a deterministic viewport-center fallback while the box cannot be
/// measured yet.
pub fn spill_point(package_rect: Option<Rect>, viewport: Vec2, form: FormFactor) -> Vec2 {
    if let Some(rect) = package_rect {
        if rect.is_measurable() {
            let x = rect.left + rect.width * SPILL_X_RATIO[form.index()];
            let y = rect.top + rect.height * SPILL_Y_RATIO[form.index()];
            if x > 0.0 && y > 0.0 {
                return Vec2::new(x, y);
            }
        }
    }
    let [dx, dy] = SPILL_FALLBACK_OFFSET[form.index()];
    Vec2::new(viewport.x / 2.0 + dx, viewport.y / 2.0 + dy)
}
