//! Deterministic noise and interpolation helpers shared by every scene.

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Multiply-xor-shift mix hash mapped onto [0, 1).
///
/// Pure: the same seed always yields the same value, on every platform
/// (32-bit arithmetic with wraparound). The top 24 bits feed the mantissa so
/// the result is exact and strictly below 1.0.
#[inline]
pub fn prng(seed: u32) -> f32 {
    let mut t = seed.wrapping_add(0x6d2b_79f5);
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    ((t ^ (t >> 14)) >> 8) as f32 * (1.0 / 16_777_216.0)
}

/// Per-entity, per-use-site draw from the noise source.
///
/// The salt is a small integer constant at each call site, so one entity can
/// draw many independent-looking values without storing any random state.
#[inline]
pub fn rand(id: u32, salt: u32) -> f32 {
    prng(id.wrapping_mul(1000).wrapping_add(salt))
}
