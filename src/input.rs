//! Host input for a running simulation.
//!
//! The host's event layer (DOM listeners, a winit loop, a test script)
//! translates its native events into [`InputEvent`]s and hands them to
//! [`FrameDriver::handle`](crate::FrameDriver::handle). Coordinates are
//! element-local pixels, the same space the particles live in.
//!
//! Events deserialize from tagged JSON so a host can forward messages
//! straight through:
//!
//! ```json
//! {"event": "pointer_moved", "x": 120.0, "y": 48.5}
//! {"event": "spawn", "kind": "creative", "count": 12}
//! {"event": "force", "force": {"type": "wind", "strength": 0.5, "direction": 0.0}}
//! ```

use serde::{Deserialize, Serialize};

use crate::forces::Force;
use crate::particle::ParticleKind;

/// One host event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Pointer moved inside the element.
    PointerMoved { x: f32, y: f32 },
    /// Pointer left the element.
    PointerLeft,
    /// Element resized.
    Resized { width: f32, height: f32 },
    /// Control surface: add particles.
    Spawn { kind: ParticleKind, count: usize },
    /// Control surface: queue a force.
    Force { force: Force },
    /// Control surface: drop queued forces.
    ClearForces,
    /// Control surface: empty the simulation.
    Reset,
    /// Freeze or unfreeze the frame clock.
    TogglePause,
}
