//! Simulation bounds and edge policies.
//!
//! Space is the rectangle `[0, width] x [0, height]` in element-local pixels,
//! y pointing down. After integration every particle is passed through the
//! configured [`BoundaryPolicy`]:
//!
//! | Policy | Effect |
//! |--------|--------|
//! | [`BoundaryPolicy::Wrap`] | Teleport to the opposite edge, velocity kept |
//! | [`BoundaryPolicy::Bounce`] | Reflect with 0.8 damping, position clamped inside |
//! | [`BoundaryPolicy::Absorb`] | Kill particles that drift fully outside |

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Velocity factor applied to the offending component on a bounce.
pub const BOUNCE_DAMPING: f32 = -0.8;

/// Edge behavior selected by configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Toroidal space: leave on one side, come back on the other.
    #[default]
    Wrap,
    /// Inelastic reflection off the edges.
    Bounce,
    /// Edges swallow particles.
    Absorb,
}

/// Positive simulation extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        // Typical business-card preview.
        Self {
            width: 350.0,
            height: 200.0,
        }
    }
}

impl Bounds {
    /// Returns `None` unless both sides are finite and positive.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl BoundaryPolicy {
    /// Correct a particle's position/velocity (or kill it) after integration.
    pub fn resolve(self, particle: &mut Particle, bounds: Bounds) {
        match self {
            BoundaryPolicy::Wrap => wrap(particle, bounds),
            BoundaryPolicy::Bounce => bounce(particle, bounds),
            BoundaryPolicy::Absorb => absorb(particle, bounds),
        }
    }
}

fn wrap(p: &mut Particle, bounds: Bounds) {
    p.position.x = wrap_axis(p.position.x, bounds.width);
    p.position.y = wrap_axis(p.position.y, bounds.height);
}

fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

fn bounce(p: &mut Particle, bounds: Bounds) {
    let r = p.radius;
    bounce_axis(&mut p.position.x, &mut p.velocity.x, r, bounds.width);
    bounce_axis(&mut p.position.y, &mut p.velocity.y, r, bounds.height);
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) {
    // Only reflect when heading into the wall, otherwise a particle sitting
    // inside the radius band would flip back and forth every tick.
    if (*pos < radius && *vel < 0.0) || (*pos > extent - radius && *vel > 0.0) {
        *vel *= BOUNCE_DAMPING;
    }

    // Particles wider than the space settle on the midline.
    let lo = radius.min(extent * 0.5);
    let hi = (extent - radius).max(extent * 0.5);
    *pos = pos.clamp(lo, hi);
}

fn absorb(p: &mut Particle, bounds: Bounds) {
    let r = p.radius;
    let outside = p.position.x < -r
        || p.position.x > bounds.width + r
        || p.position.y < -r
        || p.position.y > bounds.height + r;

    if outside {
        p.kill();
    }
}
