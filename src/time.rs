//! Frame timing from host timestamps.
//!
//! Browsers and most windowing layers hand the frame callback a monotonic
//! timestamp in milliseconds. [`FrameClock`] turns those into the per-frame
//! delta that [`Simulation::update`](crate::Simulation::update) expects.
//!
//! # Example
//!
//! ```ignore
//! use motes::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In the animation-frame callback:
//! let delta_ms = clock.tick(timestamp_ms);
//! sim.update(delta_ms);
//!
//! println!("Frame: {}", clock.frame());
//! println!("FPS: {:.1}", clock.fps());
//! ```

/// Longest delta handed to the simulation, in milliseconds.
///
/// A backgrounded tab can stall for seconds; the first frame back is capped.
pub const MAX_DELTA_MS: f32 = 100.0;

/// How often the FPS estimate is refreshed, in milliseconds.
const FPS_UPDATE_INTERVAL_MS: f64 = 500.0;

/// Converts frame timestamps into clamped, scaled deltas.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the last frame, `None` before the first.
    last_timestamp: Option<f64>,
    /// Delta returned by the last tick, in milliseconds.
    delta_ms: f32,
    /// Sum of returned deltas, in milliseconds.
    elapsed_ms: f64,
    /// Ticks that produced a non-zero delta.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_window_start: Option<f64>,
    paused: bool,
    /// Fixed delta for deterministic stepping (optional).
    fixed_delta: Option<f32>,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp: None,
            delta_ms: 0.0,
            elapsed_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window_start: None,
            paused: false,
            fixed_delta: None,
            time_scale: 1.0,
        }
    }

    /// Feed the timestamp of the current frame and get the delta to simulate.
    ///
    /// The first tick, ticks while paused, and timestamps that go backwards
    /// all return 0.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        if !timestamp_ms.is_finite() {
            self.delta_ms = 0.0;
            return 0.0;
        }

        let previous = self.last_timestamp.replace(timestamp_ms);
        let raw = match previous {
            Some(prev) if timestamp_ms > prev => (timestamp_ms - prev) as f32,
            _ => 0.0,
        };

        if self.paused || raw == 0.0 {
            self.delta_ms = 0.0;
            return 0.0;
        }

        self.delta_ms = self.fixed_delta.unwrap_or(raw.min(MAX_DELTA_MS)) * self.time_scale;
        self.elapsed_ms += self.delta_ms as f64;
        if self.delta_ms > 0.0 {
            self.frame_count += 1;
        }

        // Update FPS periodically
        match self.fps_window_start {
            None => {
                self.fps_window_start = Some(timestamp_ms);
                self.fps_frame_count = self.frame_count;
            }
            Some(start) => {
                let window = timestamp_ms - start;
                if window >= FPS_UPDATE_INTERVAL_MS {
                    let frames_since = self.frame_count - self.fps_frame_count;
                    self.fps = (frames_since as f64 / (window / 1000.0)) as f32;
                    self.fps_frame_count = self.frame_count;
                    self.fps_window_start = Some(timestamp_ms);
                }
            }
        }

        self.delta_ms
    }

    /// Delta returned by the last tick, in milliseconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_ms
    }

    /// Total simulated milliseconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop producing deltas. The simulation stays frozen until [`FrameClock::resume`].
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The time spent paused is not simulated.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Step by a fixed delta regardless of timestamps. `None` restores real timing.
    pub fn set_fixed_delta(&mut self, delta_ms: Option<f32>) {
        self.fixed_delta = delta_ms.filter(|d| d.is_finite() && *d >= 0.0);
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed
    /// - `0.0` = frozen
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    /// Forget all history; the next tick is treated as the first.
    pub fn reset(&mut self) {
        let fixed_delta = self.fixed_delta;
        let time_scale = self.time_scale;
        *self = Self::new();
        self.fixed_delta = fixed_delta;
        self.time_scale = time_scale;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
