//! Physics configuration.
//!
//! [`PhysicsConfig`] is a plain value: the engine stores one and replaces it
//! wholesale when a [`ConfigPatch`] is applied through
//! [`Simulation::update_config`](crate::Simulation::update_config). Patches
//! are clamped on the way in so the per-tick force loop never has to
//! validate anything.
//!
//! A config passed straight to
//! [`Simulation::with_config`](crate::Simulation::with_config) is trusted as
//! is; extreme values produce extreme but bounded motion because the speed
//! ceiling still applies.
//!
//! # Presets
//!
//! ```ignore
//! Simulation::new(350.0, 200.0).with_config(PhysicsConfig::constellation())
//! ```
//!
//! # JSON
//!
//! Configs round-trip through JSON; missing fields take their defaults.
//!
//! ```json
//! {
//!   "gravity": 0.0,
//!   "friction": 1.0,
//!   "boundary": "bounce",
//!   "mouse_influence": 1.0,
//!   "inter_particle_forces": true,
//!   "trail_length": 8,
//!   "enable_collisions": true,
//!   "wind_strength": 0.2,
//!   "magnetic_points": [{ "x": 175.0, "y": 100.0, "strength": 20.0 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::boundary::BoundaryPolicy;
use crate::error::ConfigError;
use crate::forces::MagneticPoint;

/// Accepted range for `gravity` when set through a patch.
pub const GRAVITY_RANGE: (f32, f32) = (0.0, 1.0);
/// Accepted range for `friction` when set through a patch.
pub const FRICTION_RANGE: (f32, f32) = (0.0, 1.0);
/// Accepted range for `mouse_influence` when set through a patch.
pub const MOUSE_INFLUENCE_RANGE: (f32, f32) = (0.0, 2.0);
/// Accepted range for `wind_strength` when set through a patch.
pub const WIND_RANGE: (f32, f32) = (-1.0, 1.0);
/// Longest trail a patch can request.
pub const MAX_TRAIL_LENGTH: usize = 50;
/// Accepted range for magnetic point strength when set through a patch.
pub const MAGNETIC_STRENGTH_RANGE: (f32, f32) = (-100.0, 100.0);

/// Simulation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward pull; only positive values act.
    pub gravity: f32,
    /// Velocity damping coefficient; each tick keeps `1 - friction * 0.01`.
    pub friction: f32,
    /// Edge behavior.
    pub boundary: BoundaryPolicy,
    /// Pointer force multiplier.
    pub mouse_influence: f32,
    /// Enables pairwise repulsion.
    pub inter_particle_forces: bool,
    /// Trail points kept per particle; 0 disables trails.
    pub trail_length: usize,
    /// Second gate on pairwise repulsion; both flags must be set.
    pub enable_collisions: bool,
    /// Horizontal wind strength.
    pub wind_strength: f32,
    /// Persistent attractors.
    pub magnetic_points: Vec<MagneticPoint>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            friction: 1.0,
            boundary: BoundaryPolicy::Wrap,
            mouse_influence: 1.0,
            inter_particle_forces: false,
            trail_length: 0,
            enable_collisions: true,
            wind_strength: 0.0,
            magnetic_points: Vec::new(),
        }
    }
}

impl PhysicsConfig {
    // =========================================================================
    // PRESETS
    // =========================================================================

    /// Ambient preset: slow drift with a light breeze, no interaction between particles.
    ///
    /// The quiet background used behind text-heavy cards.
    pub fn ambient() -> Self {
        Self {
            friction: 1.0,
            wind_strength: 0.1,
            mouse_influence: 0.5,
            ..Default::default()
        }
    }

    /// Interactive preset: strong pointer response, particles keep their distance.
    pub fn interactive() -> Self {
        Self {
            friction: 1.0,
            mouse_influence: 2.0,
            inter_particle_forces: true,
            boundary: BoundaryPolicy::Bounce,
            ..Default::default()
        }
    }

    /// Constellation preset: near-frictionless stars with short trails.
    pub fn constellation() -> Self {
        Self {
            friction: 0.5,
            mouse_influence: 1.5,
            inter_particle_forces: true,
            trail_length: 6,
            ..Default::default()
        }
    }

    /// Playful preset: gravity, bouncing and long trails.
    pub fn playful() -> Self {
        Self {
            gravity: 0.3,
            friction: 0.5,
            boundary: BoundaryPolicy::Bounce,
            mouse_influence: 1.0,
            trail_length: 12,
            wind_strength: 0.2,
            ..Default::default()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default()),
            "ambient" => Some(Self::ambient()),
            "interactive" => Some(Self::interactive()),
            "constellation" => Some(Self::constellation()),
            "playful" => Some(Self::playful()),
            _ => None,
        }
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Copy with every numeric field forced into its accepted range.
    ///
    /// Non-finite values fall back to the default for that field.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        Self {
            gravity: clamp_or(self.gravity, GRAVITY_RANGE, defaults.gravity),
            friction: clamp_or(self.friction, FRICTION_RANGE, defaults.friction),
            boundary: self.boundary,
            mouse_influence: clamp_or(self.mouse_influence, MOUSE_INFLUENCE_RANGE, defaults.mouse_influence),
            inter_particle_forces: self.inter_particle_forces,
            trail_length: self.trail_length.min(MAX_TRAIL_LENGTH),
            enable_collisions: self.enable_collisions,
            wind_strength: clamp_or(self.wind_strength, WIND_RANGE, defaults.wind_strength),
            magnetic_points: self
                .magnetic_points
                .iter()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
                .map(|p| MagneticPoint {
                    strength: clamp_or(p.strength, MAGNETIC_STRENGTH_RANGE, 0.0),
                    ..*p
                })
                .collect(),
        }
    }

    /// New config with `patch` applied and clamped.
    pub fn patched(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.gravity {
            next.gravity = v;
        }
        if let Some(v) = patch.friction {
            next.friction = v;
        }
        if let Some(v) = patch.boundary {
            next.boundary = v;
        }
        if let Some(v) = patch.mouse_influence {
            next.mouse_influence = v;
        }
        if let Some(v) = patch.inter_particle_forces {
            next.inter_particle_forces = v;
        }
        if let Some(v) = patch.trail_length {
            next.trail_length = v;
        }
        if let Some(v) = patch.enable_collisions {
            next.enable_collisions = v;
        }
        if let Some(v) = patch.wind_strength {
            next.wind_strength = v;
        }
        if let Some(points) = &patch.magnetic_points {
            next.magnetic_points = points.clone();
        }
        next.clamped()
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file. The result is clamped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a configuration from a JSON string. The result is clamped.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }
}

/// Partial update for [`PhysicsConfig`]. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub gravity: Option<f32>,
    pub friction: Option<f32>,
    pub boundary: Option<BoundaryPolicy>,
    pub mouse_influence: Option<f32>,
    pub inter_particle_forces: Option<bool>,
    pub trail_length: Option<usize>,
    pub enable_collisions: Option<bool>,
    pub wind_strength: Option<f32>,
    pub magnetic_points: Option<Vec<MagneticPoint>>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravity(mut self, value: f32) -> Self {
        self.gravity = Some(value);
        self
    }

    pub fn friction(mut self, value: f32) -> Self {
        self.friction = Some(value);
        self
    }

    pub fn boundary(mut self, value: BoundaryPolicy) -> Self {
        self.boundary = Some(value);
        self
    }

    pub fn mouse_influence(mut self, value: f32) -> Self {
        self.mouse_influence = Some(value);
        self
    }

    pub fn inter_particle_forces(mut self, value: bool) -> Self {
        self.inter_particle_forces = Some(value);
        self
    }

    pub fn trail_length(mut self, value: usize) -> Self {
        self.trail_length = Some(value);
        self
    }

    pub fn enable_collisions(mut self, value: bool) -> Self {
        self.enable_collisions = Some(value);
        self
    }

    pub fn wind_strength(mut self, value: f32) -> Self {
        self.wind_strength = Some(value);
        self
    }

    pub fn magnetic_points(mut self, points: Vec<MagneticPoint>) -> Self {
        self.magnetic_points = Some(points);
        self
    }
}

fn clamp_or(value: f32, (min, max): (f32, f32), fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
