//! Bounded motion trails.
//!
//! Each tick the current position is pushed to the front of the particle's
//! trail; older points age and fade, and the trail is cut back to the
//! configured length and to points that are still visible.

use crate::particle::{Particle, TrailPoint};

/// Per-tick opacity factor for older trail points.
pub const TRAIL_DECAY: f32 = 0.95;

/// Points at or below this opacity are dropped.
pub const TRAIL_MIN_OPACITY: f32 = 0.01;

/// Record the particle's current position into its trail.
///
/// A `trail_length` of zero disables trails and clears any history left over
/// from an earlier configuration.
pub fn record(particle: &mut Particle, trail_length: usize) {
    if trail_length == 0 {
        particle.trail.clear();
        return;
    }

    for point in particle.trail.iter_mut() {
        point.age += 1;
        point.opacity *= TRAIL_DECAY;
    }

    particle.trail.push_front(TrailPoint {
        position: particle.position,
        opacity: particle.opacity,
        age: 0,
    });

    particle.trail.truncate(trail_length);
    particle.trail.retain(|point| point.opacity > TRAIL_MIN_OPACITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{ParticleId, ParticleKind};
    use glam::Vec2;

    fn particle() -> Particle {
        Particle::new(ParticleId(3), ParticleKind::Constellation, Vec2::ZERO, Vec2::ZERO, 2.0, 1.0, 500)
    }

    #[test]
    fn test_most_recent_first() {
        let mut p = particle();
        for i in 0..3 {
            p.position = Vec2::new(i as f32, 0.0);
            record(&mut p, 8);
        }

        let trail = p.trail();
        assert_eq!(trail.len(), 3);
        assert_eq!(trail[0].position.x, 2.0);
        assert_eq!(trail[0].age, 0);
        assert_eq!(trail[2].age, 2);
        assert!(trail[2].opacity < trail[0].opacity);
        assert!((trail[1].opacity - TRAIL_DECAY).abs() < 1e-6);
    }

    #[test]
    fn test_length_cap() {
        let mut p = particle();
        for _ in 0..20 {
            record(&mut p, 5);
            assert!(p.trail().len() <= 5);
        }
        assert_eq!(p.trail().len(), 5);
    }

    #[test]
    fn test_faded_points_dropped() {
        let mut p = particle();
        p.opacity = 0.02;
        record(&mut p, 50);
        assert_eq!(p.trail().len(), 1);

        // 0.02 * 0.95^14 < 0.01
        for _ in 0..14 {
            p.opacity = 0.0;
            record(&mut p, 50);
        }
        assert!(p.trail().is_empty());
    }

    #[test]
    fn test_disabled_clears() {
        let mut p = particle();
        record(&mut p, 4);
        record(&mut p, 0);
        assert!(p.trail().is_empty());
    }
}
