//! Physics-flavored tumbling rotation.
//!
//! An entity gets an initial angular velocity from the noise source, spins
//! fast, decays against air resistance, and wobbles with a turbulence term
//! that dies out as the phase completes. Fall phases chain impulses on top of
//! the accumulated rotation of earlier phases so the motion reads as one
//! continuous tumble.

use crate::core::math::rand;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_4, PI};

/// Per-axis angular velocity derived deterministically from the entity id.
/// Consecutive salts keep the three axes decorrelated.
#[inline]
pub fn impulse(id: u32, salt: u32, amplitude: Vec3) -> Vec3 {
    Vec3::new(
        (rand(id, salt) - 0.5) * amplitude.x,
        (rand(id, salt + 1) - 0.5) * amplitude.y,
        (rand(id, salt + 2) - 0.5) * amplitude.z,
    )
}

/// Euler angles (degrees) after `t` of a phase, for an initial angular
/// velocity and an air-resistance decay constant.
pub fn tumble(t: f32, id: u32, velocity: Vec3, air_resistance: f32) -> Vec3 {
    let decay = (-air_resistance * t * 3.0).exp();

    let turbulence_freq = 2.0 + rand(id, 500) * 2.0;
    let turbulence_amp = 15.0 * (1.0 - t);

    let wobble = Vec3::new(
        (t * turbulence_freq * PI).sin() * turbulence_amp,
        (t * turbulence_freq * 0.7 * PI).cos() * turbulence_amp * 1.2,
        (t * turbulence_freq * 0.5 * PI + FRAC_PI_4).sin() * turbulence_amp * 0.8,
    );

    velocity * (t * decay * 360.0) + wobble
}
