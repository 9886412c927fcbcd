//! Force model.
//!
//! Accelerations are rebuilt from zero every tick. Terms are accumulated in
//! a fixed order:
//!
//! | # | Term | Source | Magnitude |
//! |---|------|--------|-----------|
//! | 1 | Gravity | `config.gravity` | `gravity * 0.1` downward, only when positive |
//! | 2 | Wind | `config.wind_strength` | `wind * (0.05 + 0.02 * noise(time, id))` along +x |
//! | 3 | Pointer | last pointer position | `(1 - d/100) * mouse_influence * 0.1`, sign by kind |
//! | 4 | Magnetic points | `config.magnetic_points` | `strength / (d² + 1) * 0.1`, attractive |
//! | 5 | Repulsion | other particles | `overlap_fraction * 0.05` when closer than `r_i + r_j + 10` |
//! | 6 | Queued forces | [`Force`] list | as 4 for magnetic, `strength * 0.05` along direction for wind |
//!
//! Every distance-based term skips its contribution at zero distance.
//!
//! # Scaling
//!
//! Repulsion compares every pair of live particles, O(n²) per tick. That is
//! fine for the 10 to 100 particles a card preview runs; larger populations
//! need a different engine rather than a spatial grid bolted on here, since
//! a grid changes which pairs interact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::particle::{Particle, ParticleId};

pub const GRAVITY_SCALE: f32 = 0.1;
pub const WIND_SCALE: f32 = 0.05;
/// Noise amplitude, relative to wind strength.
pub const WIND_NOISE_SCALE: f32 = 0.02;
/// Angular frequency of the wind noise, radians per second of sim time.
pub const WIND_NOISE_FREQUENCY: f32 = 1.3;
/// Pointer influence radius in pixels.
pub const POINTER_RADIUS: f32 = 100.0;
pub const POINTER_SCALE: f32 = 0.1;
pub const MAGNETIC_SCALE: f32 = 0.1;
pub const REPULSION_SCALE: f32 = 0.05;
/// Extra separation added to the radius sum before particles push apart.
pub const REPULSION_PADDING: f32 = 10.0;

/// A queued external force.
///
/// Queued forces act on every particle on every tick until
/// [`Simulation::clear_forces`](crate::Simulation::clear_forces) is called;
/// they are persistent, not one-shot impulses.
///
/// Serialized with a `type` tag so control surfaces can send
/// `{"type": "magnetic", "x": 10, "y": 20, "strength": 5}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Force {
    /// Inverse-square-like pull toward a point.
    Magnetic {
        x: f32,
        y: f32,
        strength: f32,
    },
    /// Constant push along `direction` (radians, 0 = +x, y down).
    Wind {
        strength: f32,
        direction: f32,
    },
}

impl Force {
    pub fn magnetic(point: Vec2, strength: f32) -> Self {
        Force::Magnetic {
            x: point.x,
            y: point.y,
            strength,
        }
    }

    pub fn wind(strength: f32, direction: f32) -> Self {
        Force::Wind { strength, direction }
    }

    /// Acceleration this force applies at `position`.
    pub fn acceleration_at(&self, position: Vec2) -> Vec2 {
        match *self {
            Force::Magnetic { x, y, strength } => magnetic_pull(position, Vec2::new(x, y), strength),
            Force::Wind { strength, direction } => Vec2::from_angle(direction) * strength * WIND_SCALE,
        }
    }
}

/// A persistent attractor living in [`PhysicsConfig::magnetic_points`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagneticPoint {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
}

impl MagneticPoint {
    pub fn new(point: Vec2, strength: f32) -> Self {
        Self {
            x: point.x,
            y: point.y,
            strength,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Everything the force model reads for one tick.
pub struct ForceField<'a> {
    pub config: &'a PhysicsConfig,
    /// Simulation time in seconds.
    pub time: f32,
    pub pointer: Option<Vec2>,
    pub queued: &'a [Force],
}

impl ForceField<'_> {
    /// Compute the net acceleration of every particle into `out`.
    ///
    /// `out` is resized to match `particles`; index `i` belongs to
    /// `particles[i]`.
    pub fn accumulate_accels(&self, particles: &[Particle], out: &mut Vec<Vec2>) {
        out.clear();
        out.resize(particles.len(), Vec2::ZERO);

        for (p, acc) in particles.iter().zip(out.iter_mut()) {
            *acc += self.local_acceleration(p);
        }

        if self.config.inter_particle_forces && self.config.enable_collisions {
            repulsion(particles, out);
        }

        for (p, acc) in particles.iter().zip(out.iter_mut()) {
            for force in self.queued {
                *acc += force.acceleration_at(p.position);
            }
        }
    }

    /// Terms 1 to 4: everything that doesn't look at other particles.
    fn local_acceleration(&self, p: &Particle) -> Vec2 {
        let config = self.config;
        let mut acc = gravity(config.gravity);
        acc += wind(config.wind_strength, self.time, p.id);

        if let Some(pointer) = self.pointer {
            acc += pointer_pull(p, pointer, config.mouse_influence);
        }

        for point in &config.magnetic_points {
            acc += magnetic_pull(p.position, point.position(), point.strength);
        }

        acc
    }
}

/// Downward pull; non-positive gravity contributes nothing.
#[inline]
pub fn gravity(gravity: f32) -> Vec2 {
    if gravity > 0.0 {
        Vec2::new(0.0, gravity * GRAVITY_SCALE)
    } else {
        Vec2::ZERO
    }
}

/// Smooth deterministic noise in `[-1, 1]` for a particle at a given time.
///
/// Pure function of its inputs: no hidden phase state, identical output for
/// identical `(time, id)`.
#[inline]
pub fn wind_noise(time: f32, id: ParticleId) -> f32 {
    (time * WIND_NOISE_FREQUENCY + id.noise_basis()).sin()
}

/// Horizontal wind with per-particle drift.
#[inline]
pub fn wind(strength: f32, time: f32, id: ParticleId) -> Vec2 {
    let ax = strength * WIND_SCALE + strength * WIND_NOISE_SCALE * wind_noise(time, id);
    Vec2::new(ax, 0.0)
}

/// Pointer attraction or repulsion, depending on the particle's kind.
pub fn pointer_pull(p: &Particle, pointer: Vec2, influence: f32) -> Vec2 {
    let to_pointer = pointer - p.position;
    let distance = to_pointer.length();
    if distance == 0.0 || distance >= POINTER_RADIUS {
        return Vec2::ZERO;
    }

    let magnitude = (1.0 - distance / POINTER_RADIUS) * influence * POINTER_SCALE;
    to_pointer / distance * magnitude * p.kind.profile().pointer.sign()
}

/// Always-attractive pull toward `point`, falling off with `1 / (d² + 1)`.
pub fn magnetic_pull(position: Vec2, point: Vec2, strength: f32) -> Vec2 {
    let to_point = point - position;
    let distance_sq = to_point.length_squared();
    if distance_sq == 0.0 {
        return Vec2::ZERO;
    }

    let distance = distance_sq.sqrt();
    let magnitude = strength / (distance_sq + 1.0) * MAGNETIC_SCALE;
    to_point / distance * magnitude
}

/// Pairwise soft repulsion between overlapping particles.
///
/// Each unordered pair is visited once and both sides get equal and
/// opposite pushes.
pub fn repulsion(particles: &[Particle], out: &mut [Vec2]) {
    let n = particles.len();
    for i in 0..n {
        let pi = &particles[i];
        for j in (i + 1)..n {
            let pj = &particles[j];

            // Points from j to i: the direction i gets pushed.
            let delta = pi.position - pj.position;
            let distance = delta.length();
            let min_distance = pi.radius + pj.radius + REPULSION_PADDING;
            if distance == 0.0 || distance >= min_distance {
                continue;
            }

            let overlap = (min_distance - distance) / min_distance;
            let push = delta / distance * overlap * REPULSION_SCALE;
            out[i] += push;
            out[j] -= push;
        }
    }
}
