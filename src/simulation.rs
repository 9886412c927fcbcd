//! Simulation engine.
//!
//! [`Simulation`] owns the particle population, the queued forces, the
//! bounds, the last pointer position and the configuration. A host calls
//! [`Simulation::update`] once per animation frame and reads
//! [`Simulation::particles`] (or [`Simulation::instances`]) to draw.
//!
//! # Tick
//!
//! ```text
//! update(delta_ms)
//!   time += delta
//!   forces      -> acceleration of every particle
//!   integrator  -> velocity, position
//!   boundary    -> wrap / bounce / absorb
//!   trail       -> record position
//!   lifecycle   -> age, fade
//!   purge dead, respawn one if below the floor
//! ```
//!
//! A zero, negative or non-finite delta is a still frame: accelerations
//! are refreshed and dead particles purged, but nothing moves, ages or
//! records a trail point, and time stays put.

use glam::Vec2;
use serde::Serialize;

use crate::boundary::Bounds;
use crate::config::{ConfigPatch, PhysicsConfig};
use crate::forces::{Force, ForceField};
use crate::integrator::{clamp_speed, integrate};
use crate::lifecycle::Lifecycle;
use crate::particle::{Particle, ParticleId, ParticleInstance, ParticleKind};
use crate::spawn::Spawner;
use crate::trail;

/// Most particles a single `add_particles` call will create.
pub const MAX_SPAWN_BATCH: usize = 1_000;

/// Aggregate numbers for a debug overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SimulationStats {
    pub particle_count: usize,
    /// Number of queued forces.
    pub forces: usize,
    /// Mean speed, 0 for an empty population.
    pub average_velocity: f32,
    /// Mean normalized life, 0 for an empty population.
    pub average_life: f32,
    /// Simulation time in seconds.
    pub time: f32,
    /// Moving ticks since construction or the last reset.
    pub frame: u64,
}

/// A 2D particle simulation.
///
/// ```ignore
/// let mut sim = Simulation::new(350.0, 200.0).with_config(PhysicsConfig::constellation());
/// sim.add_particles(ParticleKind::Constellation, 40);
///
/// // every animation frame
/// sim.update(16.0);
/// for p in sim.particles() {
///     draw(p.position, p.radius, p.opacity());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    particles: Vec<Particle>,
    forces: Vec<Force>,
    bounds: Bounds,
    pointer: Option<Vec2>,
    config: PhysicsConfig,
    lifecycle: Lifecycle,
    spawner: Spawner,
    time: f32,
    frame: u64,
    accels: Vec<Vec2>,
}

impl Simulation {
    /// Empty simulation covering `[0, width] x [0, height]`.
    ///
    /// Invalid dimensions fall back to the default card size.
    pub fn new(width: f32, height: f32) -> Self {
        let bounds = Bounds::new(width, height).unwrap_or_else(|| {
            log::warn!("Invalid bounds {}x{}, using default card size", width, height);
            Bounds::default()
        });

        Self {
            particles: Vec::new(),
            forces: Vec::new(),
            bounds,
            pointer: None,
            config: PhysicsConfig::default(),
            lifecycle: Lifecycle::default(),
            spawner: Spawner::new(),
            time: 0.0,
            frame: 0,
            accels: Vec::new(),
        }
    }

    /// Use `config` as is. Values are trusted; see [`Simulation::update_config`]
    /// for the clamped path.
    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the particle factory for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawner = Spawner::seeded(seed);
        self
    }

    /// Override the respawn policy.
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Start with `count` particles of `kind`.
    pub fn with_particles(mut self, kind: ParticleKind, count: usize) -> Self {
        self.add_particles(kind, count);
        self
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Advance the simulation by one frame.
    ///
    /// `delta_ms` only drives the clock that the wind noise reads; motion is
    /// one fixed step per call.
    pub fn update(&mut self, delta_ms: f32) {
        let moving = delta_ms.is_finite() && delta_ms > 0.0;
        if moving {
            self.time += delta_ms / 1000.0;
            self.frame += 1;
        }

        let field = ForceField {
            config: &self.config,
            time: self.time,
            pointer: self.pointer,
            queued: &self.forces,
        };
        field.accumulate_accels(&self.particles, &mut self.accels);
        for (particle, acc) in self.particles.iter_mut().zip(&self.accels) {
            particle.acceleration = *acc;
        }

        if moving {
            let friction = self.config.friction;
            let boundary = self.config.boundary;
            let trail_length = self.config.trail_length;

            for particle in &mut self.particles {
                integrate(particle, friction);
                boundary.resolve(particle, self.bounds);
                trail::record(particle, trail_length);
                self.lifecycle.age(particle);
            }
        }

        let removed = self.lifecycle.purge(&mut self.particles);
        if removed > 0 {
            log::trace!("Frame {}: {} particles expired", self.frame, removed);
        }

        if moving && self.lifecycle.needs_respawn(self.particles.len()) {
            let particle = self.spawner.create(self.lifecycle.kind(), self.bounds, None);
            log::debug!(
                "Population {} below floor {}, respawned {:?}",
                self.particles.len(),
                self.lifecycle.floor(),
                particle.id()
            );
            self.particles.push(particle);
        }
    }

    // =========================================================================
    // POPULATION
    // =========================================================================

    /// Spawn `count` particles of `kind` at random positions.
    ///
    /// `count` is capped at [`MAX_SPAWN_BATCH`].
    pub fn add_particles(&mut self, kind: ParticleKind, count: usize) {
        if count > MAX_SPAWN_BATCH {
            log::warn!("Spawn of {} particles capped at {}", count, MAX_SPAWN_BATCH);
        }
        let count = count.min(MAX_SPAWN_BATCH);
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.spawner.create(kind, self.bounds, None);
            self.particles.push(particle);
        }
        log::debug!("Added {} {} particles ({} total)", count, kind, self.particles.len());
    }

    /// Build a particle with this engine's factory without adding it.
    ///
    /// Tweak the returned particle and pass it to [`Simulation::add_particle`].
    pub fn create_particle(&mut self, kind: ParticleKind, position: Option<Vec2>) -> Particle {
        self.spawner.create(kind, self.bounds, position)
    }

    /// Add a particle from [`Simulation::create_particle`].
    ///
    /// The velocity is clamped to the kind's speed ceiling and the position
    /// goes through the boundary policy before the particle joins.
    ///
    /// Returns `None` and leaves the population untouched when the particle's
    /// id is already present or its state is not finite. An `Absorb`
    /// boundary rejects particles placed outside the bounds the same way.
    pub fn add_particle(&mut self, mut particle: Particle) -> Option<ParticleId> {
        let id = particle.id();
        let finite = particle.position.is_finite()
            && particle.velocity.is_finite()
            && particle.radius.is_finite()
            && particle.radius > 0.0;
        if !finite {
            log::warn!("Rejected particle {:?} with non-finite state", id);
            return None;
        }
        if self.particles.iter().any(|p| p.id() == id) {
            log::warn!("Rejected duplicate particle {:?}", id);
            return None;
        }

        particle.velocity = clamp_speed(particle.velocity, particle.kind().max_speed());
        self.config.boundary.resolve(&mut particle, self.bounds);
        if !particle.is_alive() {
            log::debug!("Particle {:?} absorbed on entry", id);
            return None;
        }

        self.particles.push(particle);
        Some(id)
    }

    // =========================================================================
    // FORCES
    // =========================================================================

    /// Queue a force. It acts on every tick until [`Simulation::clear_forces`].
    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    /// Drop every queued force.
    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Record the pointer position in element-local pixels.
    pub fn update_mouse_position(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if position.is_finite() {
            self.pointer = Some(position);
        }
    }

    /// Forget the pointer, e.g. when it leaves the element.
    pub fn clear_mouse_position(&mut self) {
        self.pointer = None;
    }

    /// Resize the simulation space. Non-positive or non-finite sizes are ignored.
    ///
    /// Returns whether the bounds changed.
    pub fn set_bounds(&mut self, width: f32, height: f32) -> bool {
        match Bounds::new(width, height) {
            Some(bounds) => {
                if bounds != self.bounds {
                    log::debug!("Bounds set to {}x{}", width, height);
                }
                self.bounds = bounds;
                true
            }
            None => {
                log::warn!("Ignoring invalid bounds {}x{}", width, height);
                false
            }
        }
    }

    // =========================================================================
    // CONFIG
    // =========================================================================

    /// Apply a clamped patch and return the resulting configuration.
    pub fn update_config(&mut self, patch: &ConfigPatch) -> PhysicsConfig {
        self.config = self.config.patched(patch);
        log::debug!("Config updated: {:?}", self.config);
        self.config.clone()
    }

    #[inline]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    #[inline]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Empty the population and force queue and rewind time.
    ///
    /// Bounds, pointer and configuration survive; ids keep counting.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.forces.clear();
        self.accels.clear();
        self.time = 0.0;
        self.frame = 0;
        log::debug!("Simulation reset");
    }

    // =========================================================================
    // READ SIDE
    // =========================================================================

    /// Current population, in insertion order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Renderer instance data for the current population.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(Particle::to_instance).collect()
    }

    #[inline]
    pub fn forces(&self) -> &[Force] {
        &self.forces
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Simulation time in seconds.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> SimulationStats {
        let count = self.particles.len();
        let (speed_sum, life_sum) = self
            .particles
            .iter()
            .fold((0.0, 0.0), |(s, l), p| (s + p.speed(), l + p.life()));
        let mean = |sum: f32| if count > 0 { sum / count as f32 } else { 0.0 };

        SimulationStats {
            particle_count: count,
            forces: self.forces.len(),
            average_velocity: mean(speed_sum),
            average_life: mean(life_sum),
            time: self.time,
            frame: self.frame,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        let bounds = Bounds::default();
        Self::new(bounds.width(), bounds.height())
    }
}
