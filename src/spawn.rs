//! Particle factory.
//!
//! The [`Spawner`] owns the engine's RNG and id counter. Every particle the
//! engine creates, explicitly or by respawn, comes from here.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;

use crate::boundary::Bounds;
use crate::particle::{Particle, ParticleId, ParticleKind};

/// Creates particles with per-kind randomized defaults.
///
/// ```ignore
/// let mut spawner = Spawner::seeded(7);
/// let p = spawner.create(ParticleKind::Creative, bounds, None);
/// assert!(bounds.contains(p.position));
/// ```
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SmallRng,
    next_id: u64,
}

impl Spawner {
    /// Spawner seeded from the system clock.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Spawner with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
        }
    }

    /// Hand out the next id. Ids are never reused.
    pub fn next_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a particle of `kind`.
    ///
    /// Without a `position` the particle lands uniformly inside `bounds`.
    pub fn create(&mut self, kind: ParticleKind, bounds: Bounds, position: Option<Vec2>) -> Particle {
        let profile = kind.profile();

        let position = match position {
            Some(p) => p,
            None => Vec2::new(
                self.random_range(0.0..bounds.width()),
                self.random_range(0.0..bounds.height()),
            ),
        };

        let velocity = Vec2::new(
            (self.random() - 0.5) * profile.base_speed,
            (self.random() - 0.5) * profile.base_speed,
        );

        let radius = self.random_range(profile.radius.clone());
        let mass = self.random_range(profile.mass.clone());
        let max_life = self.random_uint(profile.max_life.clone());

        Particle::new(self.next_id(), kind, position, velocity, radius, mass, max_life)
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `range`; an empty range yields its start.
    #[inline]
    fn random_range(&mut self, range: Range<f32>) -> f32 {
        if range.start < range.end {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }

    /// Random u32 in `range`; an empty range yields its start.
    #[inline]
    fn random_uint(&mut self, range: Range<u32>) -> u32 {
        if range.start < range.end {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}
