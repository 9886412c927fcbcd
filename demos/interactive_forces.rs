//! # Interactive Forces
//!
//! Replays a scripted session through the frame driver: the pointer sweeps
//! across the card, a control surface adds a magnetic force and a burst of
//! creative particles, then clears everything.
//!
//! Events are written as the JSON messages a browser host would post.
//!
//! Run with: `RUST_LOG=motes=debug cargo run --example interactive_forces`

use motes::prelude::*;

const SCRIPT: &[(u32, &str)] = &[
    (30, r#"{"event": "spawn", "kind": "constellation", "count": 20}"#),
    (90, r#"{"event": "force", "force": {"type": "magnetic", "x": 175.0, "y": 100.0, "strength": 40.0}}"#),
    (150, r#"{"event": "spawn", "kind": "creative", "count": 10}"#),
    (240, r#"{"event": "resized", "width": 420.0, "height": 240.0}"#),
    (300, r#"{"event": "clear_forces"}"#),
    (330, r#"{"event": "pointer_left"}"#),
    (360, r#"{"event": "toggle_pause"}"#),
    (400, r#"{"event": "toggle_pause"}"#),
    (450, r#"{"event": "reset"}"#),
];

fn main() {
    env_logger::init();

    let sim = Simulation::new(350.0, 200.0)
        .with_config(PhysicsConfig::interactive())
        .with_particles(ParticleKind::Floating, 12);
    let mut driver = FrameDriver::new(sim);

    println!("=== Interactive Forces ===");

    let mut script = SCRIPT.iter().peekable();
    for frame in 0..480u32 {
        while let Some((_, json)) = script.next_if(|(at, _)| *at == frame) {
            match serde_json::from_str::<InputEvent>(json) {
                Ok(event) => {
                    println!("frame {:>3}: {:?}", frame, event);
                    driver.handle(event);
                }
                Err(e) => eprintln!("frame {:>3}: bad event: {}", frame, e),
            }
        }

        // Pointer sweeps left to right along the card's midline.
        if frame < 330 {
            let bounds = driver.simulation().bounds();
            let x = (frame as f32 * 2.0) % bounds.width();
            driver.handle(InputEvent::PointerMoved { x, y: bounds.height() * 0.5 });
        }

        driver.frame(frame as f64 * 1000.0 / 60.0);

        if frame % 60 == 59 {
            let stats = driver.simulation().stats();
            println!(
                "frame {:>3}: particles={:>3} forces={} avg speed={:.3} fps={:.0}",
                frame,
                stats.particle_count,
                stats.forces,
                stats.average_velocity,
                driver.clock().fps()
            );
        }
    }
}
