//! Device-orientation input mapping.
//!
//! Kept free of platform types so the host-side tests can exercise it; the
//! event wiring extracts raw numbers from the browser event and feeds them
//! in here.

use crate::constants::{TILT_BETA_CENTER, TILT_BETA_DIVISOR, TILT_GAMMA_DIVISOR};
use glam::Vec2;

/// Map device-orientation angles onto the [-1,1] tilt square. Angles arrive
/// as options because the browser reports null on devices without sensors.
#[inline]
pub fn tilt_from_orientation(gamma: Option<f64>, beta: Option<f64>) -> Vec2 {
    let x = gamma.map_or(0.0, |g| (g / TILT_GAMMA_DIVISOR).clamp(-1.0, 1.0) as f32);
    let y = beta.map_or(0.0, |b| {
        ((b - TILT_BETA_CENTER) / TILT_BETA_DIVISOR).clamp(-1.0, 1.0) as f32
    });
    Vec2::new(x, y)
}
