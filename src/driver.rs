//! Frame driver adapter.
//!
//! [`FrameDriver`] is the piece a host wires to its animation-frame
//! callback: it owns a [`Simulation`] and a [`FrameClock`], applies queued
//! [`InputEvent`]s, and runs exactly one update per frame.
//!
//! ```ignore
//! let mut driver = FrameDriver::new(Simulation::new(350.0, 200.0).with_particles(ParticleKind::Floating, 30));
//!
//! // pointer listener
//! driver.handle(InputEvent::PointerMoved { x, y });
//!
//! // animation-frame callback
//! driver.frame(timestamp_ms);
//! renderer.draw(driver.simulation().particles());
//! ```

use crate::input::InputEvent;
use crate::simulation::Simulation;
use crate::time::FrameClock;

/// Owns a simulation and drives it from host frames and events.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    simulation: Simulation,
    clock: FrameClock,
}

impl FrameDriver {
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            clock: FrameClock::new(),
        }
    }

    /// Replace the default clock, e.g. with a fixed delta.
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Apply one host event. Takes effect on the next frame.
    pub fn handle(&mut self, event: InputEvent) {
        let sim = &mut self.simulation;
        match event {
            InputEvent::PointerMoved { x, y } => sim.update_mouse_position(x, y),
            InputEvent::PointerLeft => sim.clear_mouse_position(),
            InputEvent::Resized { width, height } => {
                sim.set_bounds(width, height);
            }
            InputEvent::Spawn { kind, count } => sim.add_particles(kind, count),
            InputEvent::Force { force } => sim.add_force(force),
            InputEvent::ClearForces => sim.clear_forces(),
            InputEvent::Reset => sim.reset(),
            InputEvent::TogglePause => {
                self.clock.toggle_pause();
                log::debug!("Frame clock {}", if self.clock.is_paused() { "paused" } else { "resumed" });
            }
        }
    }

    /// Run the frame for `timestamp_ms`. Returns the delta that was simulated.
    ///
    /// The first frame, and every frame while paused, is a still frame.
    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        let delta = self.clock.tick(timestamp_ms);
        self.simulation.update(delta);
        delta
    }

    #[inline]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[inline]
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    /// Hand the simulation back, e.g. to reuse it after the element unmounts.
    pub fn into_simulation(self) -> Simulation {
        self.simulation
    }
}
