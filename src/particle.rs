//! Particle data model.
//!
//! A [`Particle`] is a point entity with kinematics, a couple of physical
//! attributes, a lifecycle countdown and rendering hints. Its [`ParticleKind`]
//! selects a [`KindProfile`] of constants used by the factory, the integrator
//! (speed ceiling) and the force model (pointer response).
//!
//! # Kinds
//!
//! | Kind | Pointer | Speed ceiling | Feel |
//! |------|---------|---------------|------|
//! | `Floating` | repel | 2.0 | soft drifting dots |
//! | `Constellation` | attract | 2.0 | slow stars, linked by the renderer |
//! | `Professional` | attract | 2.0 | calm, larger, long-lived |
//! | `Creative` | repel | 3.0 | fast, short-lived, saturated |

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

use crate::lifecycle::life_curve;

/// Opaque particle identity.
///
/// Ids come from a monotonic counter owned by the engine, so an id is never
/// handed out twice during the engine's lifetime (not even across `reset`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub u64);

impl ParticleId {
    /// Phase offset used by the wind noise so particles don't drift in lockstep.
    ///
    /// Pure function of the id; no per-particle phase is stored.
    #[inline]
    pub fn noise_basis(self) -> f32 {
        // Wrap before converting so large ids keep f32 precision.
        (self.0 % 10_000) as f32 * 0.7
    }
}

/// How a kind reacts to the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerResponse {
    /// Pulled toward the pointer.
    Attract,
    /// Pushed away from the pointer.
    Repel,
}

impl PointerResponse {
    /// Sign applied to the pointer force along the particle-to-pointer line.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            PointerResponse::Attract => 1.0,
            PointerResponse::Repel => -1.0,
        }
    }
}

/// Visual archetype of a particle. Fixed at creation.
#[derive(
    crate::ParticleKind,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Soft drifting dots; the respawn kind.
    #[default]
    Floating,
    /// Slow star-like points.
    Constellation,
    /// Calm, larger, long-lived.
    Professional,
    /// Fast and short-lived.
    Creative,
}

/// Per-kind constants.
#[derive(Clone, Debug)]
pub struct KindProfile {
    /// Radius range in pixels.
    pub radius: Range<f32>,
    /// Mass range. Only informs defaults; no force reads it.
    pub mass: Range<f32>,
    /// Countdown range in ticks.
    pub max_life: Range<u32>,
    /// Base color, RGB 0..1.
    pub color: Vec3,
    /// Initial velocity is `(rand - 0.5) * base_speed` per axis.
    pub base_speed: f32,
    /// Speed ceiling enforced by the integrator.
    pub max_speed: f32,
    /// Pointer reaction.
    pub pointer: PointerResponse,
}

static FLOATING: KindProfile = KindProfile {
    radius: 1.0..3.0,
    mass: 0.5..1.0,
    max_life: 300..600,
    color: Vec3::new(0.58, 0.77, 0.99),
    base_speed: 0.5,
    max_speed: 2.0,
    pointer: PointerResponse::Repel,
};

static CONSTELLATION: KindProfile = KindProfile {
    radius: 1.5..3.5,
    mass: 1.0..2.0,
    max_life: 600..1200,
    color: Vec3::new(0.9, 0.92, 1.0),
    base_speed: 0.3,
    max_speed: 2.0,
    pointer: PointerResponse::Attract,
};

static PROFESSIONAL: KindProfile = KindProfile {
    radius: 2.0..4.0,
    mass: 1.5..2.5,
    max_life: 800..1500,
    color: Vec3::new(0.39, 0.45, 0.55),
    base_speed: 0.2,
    max_speed: 2.0,
    pointer: PointerResponse::Attract,
};

static CREATIVE: KindProfile = KindProfile {
    radius: 2.0..6.0,
    mass: 0.8..1.6,
    max_life: 200..500,
    color: Vec3::new(0.93, 0.28, 0.6),
    base_speed: 1.0,
    max_speed: 3.0,
    pointer: PointerResponse::Repel,
};

impl ParticleKind {
    /// The constant table for this kind.
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            ParticleKind::Floating => &FLOATING,
            ParticleKind::Constellation => &CONSTELLATION,
            ParticleKind::Professional => &PROFESSIONAL,
            ParticleKind::Creative => &CREATIVE,
        }
    }

    /// Speed ceiling for this kind.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.profile().max_speed
    }
}

/// One remembered position in a particle's motion trail.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrailPoint {
    pub position: Vec2,
    pub opacity: f32,
    /// Ticks since this point was recorded.
    pub age: u32,
}

/// A simulated particle.
///
/// Identity, kind, life and trail are owned by the engine and only readable
/// from outside. Kinematic fields are public so hosts can pin state on a
/// freshly created particle before handing it to
/// [`Simulation::add_particle`](crate::Simulation::add_particle).
#[derive(Clone, Debug, Serialize)]
pub struct Particle {
    pub(crate) id: ParticleId,
    pub(crate) kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Recomputed from scratch every tick.
    pub acceleration: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub(crate) life: f32,
    pub(crate) max_life: u32,
    pub color: Vec3,
    pub(crate) opacity: f32,
    pub(crate) trail: VecDeque<TrailPoint>,
}

impl Particle {
    pub(crate) fn new(
        id: ParticleId,
        kind: ParticleKind,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        mass: f32,
        max_life: u32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            velocity,
            acceleration: Vec2::ZERO,
            radius,
            mass,
            life: life_curve(max_life),
            max_life,
            color: kind.profile().color,
            opacity: 1.0,
            trail: VecDeque::new(),
        }
    }

    /// Replace the velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Replace the radius. Non-positive values are ignored.
    pub fn with_radius(mut self, radius: f32) -> Self {
        if radius > 0.0 && radius.is_finite() {
            self.radius = radius;
        }
        self
    }

    /// Replace the life countdown; `life` follows.
    pub fn with_max_life(mut self, max_life: u32) -> Self {
        self.max_life = max_life;
        self.life = life_curve(max_life);
        self
    }

    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    /// Normalized life in `[0, 1]`.
    #[inline]
    pub fn life(&self) -> f32 {
        self.life
    }

    /// Remaining ticks.
    #[inline]
    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Recent positions, most recent first.
    #[inline]
    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Zero the life and the countdown so the next lifecycle pass drops it.
    pub(crate) fn kill(&mut self) {
        self.life = 0.0;
        self.max_life = 0;
    }

    /// Pack into the renderer instance layout.
    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: self.position.to_array(),
            radius: self.radius,
            opacity: self.opacity,
            color: self.color.to_array(),
            kind: self.kind.into(),
        }
    }
}

/// GPU-friendly per-particle instance data (32 bytes).
///
/// Renderers that draw with instanced quads can upload
/// `bytemuck::cast_slice(&sim.instances())` straight into a vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub opacity: f32,
    pub color: [f32; 3],
    /// `u32::from(ParticleKind)`.
    pub kind: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_profiles() {
        for kind in ParticleKind::ALL {
            let p = kind.profile();
            assert!(p.radius.start > 0.0 && p.radius.start < p.radius.end);
            assert!(p.mass.start > 0.0 && p.mass.start < p.mass.end);
            assert!(p.max_life.start < p.max_life.end);
        }
        assert_eq!(ParticleKind::Creative.max_speed(), 3.0);
        assert_eq!(ParticleKind::Floating.max_speed(), 2.0);
    }

    #[test]
    fn test_pointer_response_by_kind() {
        assert_eq!(ParticleKind::Constellation.profile().pointer, PointerResponse::Attract);
        assert_eq!(ParticleKind::Professional.profile().pointer, PointerResponse::Attract);
        assert_eq!(ParticleKind::Floating.profile().pointer, PointerResponse::Repel);
        assert_eq!(ParticleKind::Creative.profile().pointer, PointerResponse::Repel);
    }

    #[test]
    fn test_kind_serde_tags() {
        let json = serde_json::to_string(&ParticleKind::Constellation).unwrap();
        assert_eq!(json, "\"constellation\"");
        let back: ParticleKind = serde_json::from_str("\"creative\"").unwrap();
        assert_eq!(back, ParticleKind::Creative);
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);

        let p = Particle::new(
            ParticleId(7),
            ParticleKind::Creative,
            Vec2::new(10.0, 20.0),
            Vec2::ZERO,
            3.0,
            1.0,
            100,
        );
        let instance = p.to_instance();
        assert_eq!(instance.position, [10.0, 20.0]);
        assert_eq!(instance.kind, 3);

        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_builders() {
        let p = Particle::new(
            ParticleId(1),
            ParticleKind::Floating,
            Vec2::ZERO,
            Vec2::ONE,
            2.0,
            1.0,
            100,
        )
        .with_velocity(Vec2::ZERO)
        .with_radius(-1.0)
        .with_max_life(0);

        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.radius, 2.0);
        assert_eq!(p.life(), 0.0);
        assert!(!p.is_alive());
    }
}
