//! Explicit per-tick integrator.
//!
//! One step per frame, no sub-stepping, in this fixed order:
//!
//! ```text
//! v += a
//! v *= 1 - friction * 0.01
//! |v| <= kind ceiling (uniform rescale)
//! p += v
//! ```
//!
//! Units are pixels per tick, so the frame's wall-clock delta does not scale
//! the step.

use glam::Vec2;

use crate::particle::Particle;

/// Friction coefficient to per-tick damping.
pub const FRICTION_SCALE: f32 = 0.01;

/// Advance one particle by one tick.
pub fn integrate(particle: &mut Particle, friction: f32) {
    let damping = 1.0 - friction * FRICTION_SCALE;

    particle.velocity += particle.acceleration;
    particle.velocity *= damping;
    particle.velocity = clamp_speed(particle.velocity, particle.kind.max_speed());
    particle.position += particle.velocity;
}

/// Rescale `velocity` so its length does not exceed `ceiling`.
///
/// Non-finite input collapses to zero so a bad frame can't poison the
/// position.
#[inline]
pub fn clamp_speed(velocity: Vec2, ceiling: f32) -> Vec2 {
    if !velocity.is_finite() {
        return Vec2::ZERO;
    }
    velocity.clamp_length_max(ceiling.max(0.0))
}
