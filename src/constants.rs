/// Scroll, idle, and interaction tuning constants.
///
/// These constants express intended behavior (time constants, clamp limits,
/// layout ratios) and keep magic numbers out of the code.
// Smoothed scroll follower: fraction of the remaining distance consumed per
// animation frame, and the residual below which the value snaps to the target.
pub const SCROLL_FOLLOW_PER_FRAME: f32 = 0.09;
pub const SCROLL_SNAP_EPSILON: f32 = 5e-4;

// Idle clock
pub const IDLE_DELTA_THRESHOLD: f32 = 5e-4; // progress change that counts as scrolling
pub const IDLE_RAMP_MS: f64 = 1000.0; // idle duration mapped onto [0,1]

// Drag interaction
pub const DRAG_DAMPING: f32 = 0.2; // pointer delta to published offset (1:5)
pub const DRAG_CLEAR_DELAY_MS: f64 = 400.0; // release to offset removal
pub const DRAG_ROT_Y_DEG_PER_PX: f32 = 0.3; // offset to additive yaw

// Device tilt: gamma/beta mapped onto [-1,1], then radians of added rotation
pub const TILT_GAMMA_DIVISOR: f64 = 28.0;
pub const TILT_BETA_CENTER: f64 = 40.0;
pub const TILT_BETA_DIVISOR: f64 = 38.0;
pub const TILT_PITCH_RAD: f32 = 0.38;
pub const TILT_YAW_RAD: f32 = 0.18;

// Form-factor breakpoints (CSS px)
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const TABLET_MAX_WIDTH: f32 = 1024.0;

// Spill point: fractional position of the package mouth inside the image box,
// indexed mobile / tablet / desktop.
pub const SPILL_X_RATIO: [f32; 3] = [0.66, 0.67, 0.67];
pub const SPILL_Y_RATIO: [f32; 3] = [0.20, 0.19, 0.18];
// Offsets from viewport center used while the box is not yet measurable.
pub const SPILL_FALLBACK_OFFSET: [[f32; 2]; 3] = [[60.0, -30.0], [100.0, -50.0], [100.0, -50.0]];
