//! Entity descriptions and the per-frame transform record handed to the
//! renderer and the pointer router.

/// Depth tier controlling the paint band, rest opacity, and rest blur of an
/// entity. Blur and opacity fade the far tiers back for cheap parallax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthTier {
    FarBack,
    Mid,
    Front,
}

impl DepthTier {
    #[inline]
    pub fn rest_opacity(self) -> f32 {
        match self {
            DepthTier::FarBack => 0.85,
            DepthTier::Mid => 0.95,
            DepthTier::Front => 1.0,
        }
    }

    #[inline]
    pub fn rest_blur_px(self, mobile: bool) -> f32 {
        match self {
            DepthTier::FarBack => {
                if mobile {
                    3.5
                } else {
                    2.0
                }
            }
            DepthTier::Mid => {
                if mobile {
                    1.2
                } else {
                    1.0
                }
            }
            DepthTier::Front => 0.0,
        }
    }

    /// Base of the paint-order band; entity ids index inside the band.
    #[inline]
    pub fn order_base(self) -> i32 {
        match self {
            DepthTier::FarBack => 100,
            DepthTier::Mid => 200,
            DepthTier::Front => 300,
        }
    }

    /// Horizontal spread multiplier: far entities scatter wider.
    #[inline]
    pub fn spread(self) -> f32 {
        match self {
            DepthTier::FarBack => 1.4,
            DepthTier::Mid => 1.0,
            DepthTier::Front => 0.7,
        }
    }
}

/// Static per-entity parameters. Everything else is derived per frame.
#[derive(Clone, Copy, Debug)]
pub struct EntityParams {
    /// Stable identity; seeds the noise source and keys drag offsets.
    pub id: u32,
    pub tier: DepthTier,
    /// Signed multiplier for parallax depth.
    pub depth_factor: f32,
    /// Delay in progress units, staggering this entity against the baseline.
    pub timing_offset: f32,
    pub size_multiplier: f32,
}

/// Axis-aligned screen rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }

    #[inline]
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Per-frame pose of one entity, recomputed from shared inputs every frame
/// and never stored across frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct EntityTransform {
    pub id: u32,
    /// Screen center in CSS pixels.
    pub x: f32,
    pub y: f32,
    /// Raw scale value of the underlying object.
    pub scale: f32,
    /// Euler angles in degrees.
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    pub opacity: f32,
    pub blur_px: f32,
    /// Paint order only; not physical depth.
    pub z_order: i32,
    /// Final on-screen edge of the billboard in CSS pixels.
    pub size_px: f32,
    pub visible: bool,
    /// Whether pointer events may start a drag on this entity right now.
    pub interactive: bool,
}

impl EntityTransform {
    /// Screen-space box used to route pointer events back to this entity.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect {
            left: self.x - self.size_px / 2.0,
            top: self.y - self.size_px / 2.0,
            width: self.size_px,
            height: self.size_px,
        }
    }
}

/// Id of the topmost interactive entity under the pointer, by paint order.
pub fn topmost_hit(transforms: &[EntityTransform], x: f32, y: f32) -> Option<u32> {
    let mut best: Option<(i32, u32)> = None;
    for t in transforms {
        if !t.visible || !t.interactive || !t.bounding_box().contains(x, y) {
            continue;
        }
        match best {
            Some((order, _)) if order >= t.z_order => {}
            _ => best = Some((t.z_order, t.id)),
        }
    }
    best.map(|(_, id)| id)
}
