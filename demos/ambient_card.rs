//! # Ambient Card
//!
//! Headless run of the quiet background effect behind a business card.
//! Drives the simulation at 60 Hz for ten simulated seconds and prints the
//! stats overlay once per second.
//!
//! Run with: `RUST_LOG=debug cargo run --example ambient_card`

use motes::prelude::*;

fn main() {
    env_logger::init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    let mut sim = Simulation::new(350.0, 200.0)
        .with_config(PhysicsConfig::ambient())
        .with_particles(ParticleKind::Floating, 24)
        .with_particles(ParticleKind::Professional, 6);

    println!("=== Ambient Card ===");
    println!("Bounds: {}x{}", sim.bounds().width(), sim.bounds().height());
    println!("Frames: {}", frames);
    println!();

    for frame in 1..=frames {
        sim.update(1000.0 / 60.0);

        if frame % 60 == 0 {
            let stats = sim.stats();
            println!(
                "t={:>5.2}s  particles={:>3}  avg speed={:.3}  avg life={:.3}",
                stats.time, stats.particle_count, stats.average_velocity, stats.average_life
            );
        }
    }

    let instances = sim.instances();
    let bytes: &[u8] = motes::bytemuck::cast_slice(&instances);
    println!();
    println!("Instance buffer: {} particles, {} bytes", instances.len(), bytes.len());
}
