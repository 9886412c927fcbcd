//! # Config Presets
//!
//! Saves every preset to a JSON file, loads it back, and runs each for two
//! simulated seconds to compare how lively they are.
//!
//! Run with: `cargo run --example config_presets [output_dir]`

use std::path::PathBuf;

use motes::prelude::*;

fn main() -> Result<(), motes::ConfigError> {
    env_logger::init();

    let dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);

    println!("=== Config Presets ===");
    println!("Writing to {}", dir.display());
    println!();

    for name in ["ambient", "interactive", "constellation", "playful"] {
        let Some(preset) = PhysicsConfig::preset(name) else {
            continue;
        };

        let path = dir.join(format!("motes-{}.json", name));
        preset.save(&path)?;
        let config = PhysicsConfig::load(&path)?;

        let mut sim = Simulation::new(350.0, 200.0)
            .with_seed(1)
            .with_config(config)
            .with_particles(ParticleKind::Constellation, 20);
        sim.update_mouse_position(175.0, 100.0);
        for _ in 0..120 {
            sim.update(16.0);
        }

        let stats = sim.stats();
        let trail_points: usize = sim.particles().iter().map(|p| p.trail().len()).sum();
        println!(
            "{:<14} boundary={:<7} avg speed={:.3} trail points={:>4}",
            name,
            format!("{:?}", sim.config().boundary),
            stats.average_velocity,
            trail_points
        );
    }

    Ok(())
}
