//! Particle lifecycle: ageing, fade, removal and respawn.
//!
//! Every particle carries a `max_life` countdown in ticks. Each tick:
//!
//! 1. the countdown drops by one (saturating at zero),
//! 2. `life = m / (m + 100)` is recomputed from the countdown `m`,
//! 3. `opacity` is recomputed from `life` and how fast the particle moves
//!    relative to its kind's speed ceiling.
//!
//! After the per-particle pass the population is compacted once, keeping
//! only particles with `life > 0`. If the population falls under the respawn
//! floor a single replacement is spawned.
//!
//! # Respawn Defaults
//!
//! The floor of 10 and the `Floating` respawn kind are empirical defaults
//! carried over as literals; nothing derives them from configuration. Both
//! can be overridden through the [`Lifecycle`] builder.
//!
//! ```ignore
//! Simulation::new(350.0, 200.0)
//!     .with_lifecycle(Lifecycle::new().respawn_floor(24).respawn_kind(ParticleKind::Constellation))
//! ```

use crate::particle::{Particle, ParticleKind};

/// Countdown value at which `life` reaches one half.
pub const LIFE_HALF_POINT: f32 = 100.0;

/// Population below which the engine spawns a replacement each tick.
pub const RESPAWN_FLOOR: usize = 10;

/// Kind spawned when the population is below the floor.
pub const RESPAWN_KIND: ParticleKind = ParticleKind::Floating;

/// Asymptotic life curve: 0 at `max_life == 0`, approaching 1 for long countdowns.
#[inline]
pub fn life_curve(max_life: u32) -> f32 {
    let m = max_life as f32;
    (m / (m + LIFE_HALF_POINT)).max(0.0)
}

/// Opacity from life and relative speed.
///
/// Slow particles sit at half of their life value, particles at the speed
/// ceiling get the full life value.
#[inline]
pub fn opacity_for(life: f32, speed: f32, max_speed: f32) -> f32 {
    let ratio = speed / max_speed;
    let speed_ratio = if max_speed > 0.0 && ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let opacity = life * (0.5 + 0.5 * speed_ratio);
    if opacity.is_finite() {
        opacity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Respawn policy.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    respawn_floor: usize,
    respawn_kind: ParticleKind,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            respawn_floor: RESPAWN_FLOOR,
            respawn_kind: RESPAWN_KIND,
        }
    }
}

impl Lifecycle {
    /// Literal defaults: floor of 10, `Floating` replacements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the population floor. Zero disables respawning.
    pub fn respawn_floor(mut self, floor: usize) -> Self {
        self.respawn_floor = floor;
        self
    }

    /// Set the kind spawned to refill the floor.
    pub fn respawn_kind(mut self, kind: ParticleKind) -> Self {
        self.respawn_kind = kind;
        self
    }

    pub fn floor(&self) -> usize {
        self.respawn_floor
    }

    pub fn kind(&self) -> ParticleKind {
        self.respawn_kind
    }

    /// Advance one particle by one tick.
    pub fn age(&self, particle: &mut Particle) {
        particle.max_life = particle.max_life.saturating_sub(1);
        particle.life = life_curve(particle.max_life);
        particle.opacity = opacity_for(particle.life, particle.speed(), particle.kind.max_speed());
    }

    /// Drop dead particles in one compaction pass. Returns how many were removed.
    pub fn purge(&self, particles: &mut Vec<Particle>) -> usize {
        let before = particles.len();
        particles.retain(Particle::is_alive);
        before - particles.len()
    }

    /// Whether a replacement should be spawned for this population.
    #[inline]
    pub fn needs_respawn(&self, population: usize) -> bool {
        population < self.respawn_floor
    }
}
