//! # motes - decorative 2D particle physics
//!
//! A small CPU particle engine for the "intelligent particles" effect behind
//! business-card and slide previews. It simulates a few dozen particles
//! under gravity, wind, pointer attraction, magnetic points and soft mutual
//! repulsion, and leaves drawing to the host.
//!
//! ## Quick Start
//!
//! ```ignore
//! use motes::prelude::*;
//!
//! let mut sim = Simulation::new(350.0, 200.0)
//!     .with_config(PhysicsConfig::constellation())
//!     .with_particles(ParticleKind::Constellation, 40);
//!
//! // Every animation frame:
//! sim.update(16.0);
//! for p in sim.particles() {
//!     draw_circle(p.position, p.radius, p.color, p.opacity());
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! Every [`Particle`] has a [`ParticleKind`] that fixes its size, lifespan,
//! color, speed ceiling and whether it is drawn to or pushed from the
//! pointer. Particles age one tick per update and fade out; when the
//! population drops under ten, the engine respawns one `Floating` particle
//! per tick.
//!
//! ### Forces
//!
//! Accelerations are rebuilt every tick from the [`PhysicsConfig`] (gravity,
//! wind, pointer influence, magnetic points, repulsion) plus any queued
//! [`Force`]s. See [`forces`] for the exact terms.
//!
//! ### Boundaries
//!
//! | Policy | Effect |
//! |--------|--------|
//! | [`BoundaryPolicy::Wrap`] | Leave one side, re-enter on the other |
//! | [`BoundaryPolicy::Bounce`] | Reflect off the edges with damping |
//! | [`BoundaryPolicy::Absorb`] | Remove particles that drift out |
//!
//! ### Driving
//!
//! Hosts either call [`Simulation::update`] from their own frame loop or
//! hand timestamps and events to a [`FrameDriver`].
//!
//! ## Rendering
//!
//! [`Simulation::particles`] exposes the full state. Renderers that draw
//! instanced quads can use [`Simulation::instances`], which packs each
//! particle into a 32-byte [`ParticleInstance`] ready for
//! `bytemuck::cast_slice`.
//!
//! ## Custom Kind Enums
//!
//! The [`ParticleKind`](macro@ParticleKind) derive used by the built-in kind
//! enum is exported for renderer-side enums that key strategy tables:
//!
//! ```ignore
//! #[derive(ParticleKind, Clone, Copy, PartialEq)]
//! enum Shape {
//!     Dot,
//!     Star,
//! }
//!
//! let index: u32 = Shape::Star.into();
//! assert_eq!(Shape::from_name("dot"), Some(Shape::Dot));
//! ```

pub mod boundary;
pub mod config;
mod driver;
mod error;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod lifecycle;
mod particle;
mod simulation;
mod spawn;
pub mod time;
pub mod trail;

pub use boundary::{BoundaryPolicy, Bounds};
pub use bytemuck;
pub use config::{ConfigPatch, PhysicsConfig};
pub use driver::FrameDriver;
pub use error::ConfigError;
pub use forces::{Force, MagneticPoint};
pub use glam::{Vec2, Vec3};
pub use input::InputEvent;
pub use lifecycle::Lifecycle;
pub use motes_derive::ParticleKind;
pub use particle::{KindProfile, Particle, ParticleId, ParticleInstance, ParticleKind, PointerResponse, TrailPoint};
pub use simulation::{Simulation, SimulationStats, MAX_SPAWN_BATCH};
pub use spawn::Spawner;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use motes::prelude::*;
/// ```
///
/// This imports:
/// - [`Simulation`] and [`FrameDriver`] - the engine and its frame adapter
/// - [`PhysicsConfig`], [`ConfigPatch`], [`BoundaryPolicy`] - configuration
/// - [`Force`], [`MagneticPoint`] - external forces
/// - [`Particle`], [`ParticleKind`] - particle data and the kind enum/derive
/// - [`Vec2`], [`Vec3`] - glam vector types
pub mod prelude {
    pub use crate::boundary::{BoundaryPolicy, Bounds};
    pub use crate::config::{ConfigPatch, PhysicsConfig};
    pub use crate::driver::FrameDriver;
    pub use crate::forces::{Force, MagneticPoint};
    pub use crate::input::InputEvent;
    pub use crate::lifecycle::Lifecycle;
    pub use crate::particle::{Particle, ParticleInstance, ParticleKind};
    pub use crate::simulation::{Simulation, SimulationStats};
    pub use crate::time::FrameClock;
    pub use crate::{Vec2, Vec3};
    pub use motes_derive::ParticleKind;
}
