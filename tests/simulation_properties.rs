//! Behavioral tests for the simulation engine.
//!
//! Each test drives a [`Simulation`] through its public API only, the way a
//! host would, and checks an invariant or a small scripted scenario.

use motes::prelude::*;

fn sim(config: PhysicsConfig) -> Simulation {
    Simulation::new(350.0, 200.0).with_seed(42).with_config(config)
}

/// A particle pinned at `position` with the given velocity.
fn pinned(sim: &mut Simulation, kind: ParticleKind, position: Vec2, velocity: Vec2) -> Particle {
    sim.create_particle(kind, Some(position)).with_velocity(velocity)
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_life_and_opacity_stay_normalized() {
    let config = PhysicsConfig {
        gravity: 1.0,
        wind_strength: 1.0,
        inter_particle_forces: true,
        trail_length: 10,
        ..PhysicsConfig::playful()
    };
    let mut sim = sim(config);
    for kind in ParticleKind::ALL {
        sim.add_particles(kind, 15);
    }
    sim.update_mouse_position(175.0, 100.0);

    for frame in 0..600 {
        sim.update(16.0);
        for p in sim.particles() {
            assert!((0.0..=1.0).contains(&p.life()), "life {} on frame {}", p.life(), frame);
            assert!((0.0..=1.0).contains(&p.opacity()), "opacity {} on frame {}", p.opacity(), frame);
            for point in p.trail() {
                assert!((0.0..=1.0).contains(&point.opacity));
            }
        }
    }
}

#[test]
fn test_speed_never_exceeds_ceiling() {
    let mut sim = sim(PhysicsConfig {
        gravity: 1.0,
        friction: 0.0,
        mouse_influence: 2.0,
        ..Default::default()
    });
    sim.add_force(Force::wind(50.0, 0.3));
    sim.add_force(Force::magnetic(Vec2::new(175.0, 100.0), 500.0));
    for kind in ParticleKind::ALL {
        sim.add_particles(kind, 10);
    }

    for _ in 0..200 {
        sim.update(16.0);
        for p in sim.particles() {
            assert!(
                p.speed() <= p.kind().max_speed() + 1e-4,
                "{} moving at {}",
                p.kind(),
                p.speed()
            );
        }
    }
}

#[test]
fn test_hostile_velocity_is_clamped_on_next_update() {
    let mut sim = sim(PhysicsConfig::default());
    let p = pinned(&mut sim, ParticleKind::Creative, Vec2::new(100.0, 100.0), Vec2::new(400.0, -300.0));
    sim.add_particle(p);

    sim.update(16.0);
    assert!(sim.particles()[0].speed() <= 3.0 + 1e-4);
}

#[test]
fn test_wrap_and_bounce_keep_particles_inside() {
    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
        let mut sim = sim(PhysicsConfig {
            boundary,
            gravity: 1.0,
            friction: 0.0,
            ..Default::default()
        });
        sim.add_force(Force::wind(40.0, 2.0));
        sim.add_particles(ParticleKind::Creative, 30);

        for _ in 0..300 {
            sim.update(16.0);
            let bounds = sim.bounds();
            for p in sim.particles() {
                assert!(bounds.contains(p.position), "{:?} escaped to {:?}", boundary, p.position);
            }
        }
    }
}

#[test]
fn test_bounce_reflects_with_damping() {
    let mut sim = sim(PhysicsConfig {
        boundary: BoundaryPolicy::Bounce,
        friction: 0.0,
        ..Default::default()
    });
    let p = pinned(&mut sim, ParticleKind::Floating, Vec2::new(348.0, 100.0), Vec2::new(1.5, 0.0)).with_radius(2.0);
    sim.add_particle(p);

    sim.update(16.0);
    let p = &sim.particles()[0];
    assert!((p.velocity.x + 1.5 * 0.8).abs() < 1e-5, "vx = {}", p.velocity.x);
    assert!(p.position.x <= 348.0);
}

#[test]
fn test_absorb_removes_particles_outside() {
    let mut sim = sim(PhysicsConfig {
        boundary: BoundaryPolicy::Absorb,
        ..Default::default()
    })
    .with_lifecycle(Lifecycle::new().respawn_floor(0));

    let leaving = pinned(&mut sim, ParticleKind::Professional, Vec2::new(1.0, 100.0), Vec2::new(-2.0, 0.0));
    let gone = sim.add_particle(leaving).unwrap();
    let inside = pinned(&mut sim, ParticleKind::Professional, Vec2::new(100.0, 100.0), Vec2::ZERO);
    let kept = sim.add_particle(inside).unwrap();

    sim.update(16.0);

    let ids: Vec<_> = sim.particles().iter().map(|p| p.id()).collect();
    assert!(!ids.contains(&gone));
    assert!(ids.contains(&kept));
    assert!(sim.particles().iter().all(|p| p.life() > 0.0));
}

#[test]
fn test_absorb_rejects_particle_added_outside() {
    let mut sim = sim(PhysicsConfig {
        boundary: BoundaryPolicy::Absorb,
        ..Default::default()
    });

    let outside = pinned(&mut sim, ParticleKind::Professional, Vec2::new(-50.0, 100.0), Vec2::ZERO);
    assert_eq!(sim.add_particle(outside), None);
    assert!(sim.particles().is_empty());
}

#[test]
fn test_added_particle_is_clamped_before_still_frame() {
    let mut sim = sim(PhysicsConfig::default());
    let p = pinned(&mut sim, ParticleKind::Creative, Vec2::new(100.0, 100.0), Vec2::new(400.0, -300.0));
    sim.add_particle(p).unwrap();

    sim.update(0.0);
    assert!(sim.particles()[0].speed() <= 3.0 + 1e-4);
}

#[test]
fn test_added_particle_is_inside_before_still_frame() {
    for boundary in [BoundaryPolicy::Wrap, BoundaryPolicy::Bounce] {
        let mut sim = sim(PhysicsConfig {
            boundary,
            ..Default::default()
        });
        let p = pinned(&mut sim, ParticleKind::Floating, Vec2::new(-40.0, 100.0), Vec2::ZERO);
        sim.add_particle(p).unwrap();

        sim.update(0.0);
        let p = &sim.particles()[0];
        assert!(sim.bounds().contains(p.position), "{:?} left it at {:?}", boundary, p.position);
    }
}

#[test]
fn test_oversized_spawn_is_capped() {
    let mut sim = sim(PhysicsConfig::default());
    sim.add_particles(ParticleKind::Floating, usize::MAX);
    assert_eq!(sim.particles().len(), motes::MAX_SPAWN_BATCH);

    sim.add_particles(ParticleKind::Floating, 5);
    assert_eq!(sim.particles().len(), motes::MAX_SPAWN_BATCH + 5);
}

#[test]
fn test_stats_count_matches_particles() {
    let mut sim = sim(PhysicsConfig::ambient());
    sim.add_particles(ParticleKind::Floating, 12);
    sim.add_particles(ParticleKind::Creative, 3);

    for _ in 0..50 {
        sim.update(16.0);
        assert_eq!(sim.stats().particle_count, sim.particles().len());
    }

    let stats = sim.stats();
    assert!(stats.average_velocity > 0.0);
    assert!(stats.average_life > 0.0 && stats.average_life <= 1.0);
}

#[test]
fn test_trail_never_exceeds_length() {
    let mut sim = sim(PhysicsConfig {
        trail_length: 7,
        ..Default::default()
    });
    sim.add_particles(ParticleKind::Constellation, 10);

    for _ in 0..30 {
        sim.update(16.0);
        assert!(sim.particles().iter().all(|p| p.trail().len() <= 7));
    }
    assert!(sim.particles().iter().any(|p| p.trail().len() == 7));

    // Shrinking the limit applies on the next tick.
    sim.update_config(&ConfigPatch::new().trail_length(2));
    sim.update(16.0);
    assert!(sim.particles().iter().all(|p| p.trail().len() <= 2));
}

#[test]
fn test_queued_magnetic_force_pulls_toward_point() {
    let mut sim = sim(PhysicsConfig::default()).with_lifecycle(Lifecycle::new().respawn_floor(0));
    let p = pinned(&mut sim, ParticleKind::Floating, Vec2::new(100.0, 100.0), Vec2::ZERO);
    sim.add_particle(p);
    sim.add_force(Force::magnetic(Vec2::new(110.0, 100.0), 20.0));

    sim.update(16.0);
    let p = &sim.particles()[0];
    assert!(p.acceleration.x > 0.0);
    assert!(p.velocity.x > 0.0);
    assert!(p.position.x > 100.0);
}

#[test]
fn test_pointer_attracts_or_repels_by_kind() {
    let mut sim = sim(PhysicsConfig::default()).with_lifecycle(Lifecycle::new().respawn_floor(0));
    let star = pinned(&mut sim, ParticleKind::Constellation, Vec2::new(100.0, 50.0), Vec2::ZERO);
    let dot = pinned(&mut sim, ParticleKind::Floating, Vec2::new(100.0, 150.0), Vec2::ZERO);
    sim.add_particle(star);
    sim.add_particle(dot);
    sim.update_mouse_position(140.0, 100.0);

    sim.update(16.0);
    let star = &sim.particles()[0];
    let dot = &sim.particles()[1];
    assert!(star.velocity.x > 0.0, "constellation should move toward the pointer");
    assert!(dot.velocity.x < 0.0, "floating should move away from the pointer");

    sim.clear_mouse_position();
    sim.update(0.0);
    assert!(sim.particles().iter().all(|p| p.acceleration == Vec2::ZERO));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_gravity_scenario() {
    let mut sim = sim(PhysicsConfig {
        gravity: 0.5,
        friction: 0.0,
        boundary: BoundaryPolicy::Bounce,
        ..Default::default()
    });
    let center = sim.bounds().center();
    let p = pinned(&mut sim, ParticleKind::Floating, center, Vec2::ZERO);
    let id = sim.add_particle(p).unwrap();

    sim.update(16.0);

    let p = sim.particles().iter().find(|p| p.id() == id).unwrap();
    assert!(p.velocity.y > 0.0);
    assert_eq!(p.position.x, center.x);
}

#[test]
fn test_repulsion_scenario() {
    let mut sim = sim(PhysicsConfig {
        inter_particle_forces: true,
        ..Default::default()
    })
    .with_lifecycle(Lifecycle::new().respawn_floor(0));

    // Radii 5 + 5 + padding 10 = 20 minimum separation.
    let a = pinned(&mut sim, ParticleKind::Floating, Vec2::new(100.0, 100.0), Vec2::ZERO).with_radius(5.0);
    let b = pinned(&mut sim, ParticleKind::Floating, Vec2::new(105.0, 100.0), Vec2::ZERO).with_radius(5.0);
    sim.add_particle(a);
    sim.add_particle(b);

    sim.update(16.0);

    let ps = sim.particles();
    assert!(ps[0].position.distance(ps[1].position) > 5.0);
}

#[test]
fn test_repulsion_needs_collisions_enabled() {
    let mut sim = sim(PhysicsConfig {
        inter_particle_forces: true,
        enable_collisions: false,
        ..Default::default()
    })
    .with_lifecycle(Lifecycle::new().respawn_floor(0));

    let a = pinned(&mut sim, ParticleKind::Floating, Vec2::new(100.0, 100.0), Vec2::ZERO).with_radius(5.0);
    let b = pinned(&mut sim, ParticleKind::Floating, Vec2::new(105.0, 100.0), Vec2::ZERO).with_radius(5.0);
    sim.add_particle(a);
    sim.add_particle(b);

    sim.update(16.0);

    let ps = sim.particles();
    assert_eq!(ps[0].position.distance(ps[1].position), 5.0);
}

#[test]
fn test_reset_then_add_scenario() {
    let mut sim = sim(PhysicsConfig::default());
    sim.add_particles(ParticleKind::Creative, 20);
    sim.add_force(Force::wind(1.0, 0.0));
    sim.update(16.0);

    sim.reset();
    sim.add_particles(ParticleKind::Constellation, 5);

    let stats = sim.stats();
    assert_eq!(stats.particle_count, 5);
    assert_eq!(stats.forces, 0);
    assert_eq!(stats.time, 0.0);
}

#[test]
fn test_cleared_force_contributes_nothing() {
    let mut sim = sim(PhysicsConfig::default()).with_lifecycle(Lifecycle::new().respawn_floor(0));
    let p = pinned(&mut sim, ParticleKind::Professional, Vec2::new(100.0, 100.0), Vec2::ZERO);
    sim.add_particle(p);

    sim.add_force(Force::magnetic(Vec2::new(120.0, 100.0), 80.0));
    sim.clear_forces();
    sim.update(16.0);

    let p = &sim.particles()[0];
    assert_eq!(p.acceleration, Vec2::ZERO);
    assert_eq!(p.position, Vec2::new(100.0, 100.0));
}

#[test]
fn test_population_floor_refills() {
    let mut sim = sim(PhysicsConfig::default());
    sim.add_particles(ParticleKind::Creative, 3);

    for _ in 0..7 {
        sim.update(16.0);
    }
    assert_eq!(sim.particles().len(), 10);
    let floating = sim.particles().iter().filter(|p| p.kind() == ParticleKind::Floating).count();
    assert_eq!(floating, 7);
}

#[test]
fn test_config_round_trip_drives_same_motion() {
    let config = PhysicsConfig::playful();
    let json = serde_json::to_string(&config).unwrap();
    let loaded = PhysicsConfig::from_json(&json).unwrap();

    let mut a = Simulation::new(350.0, 200.0).with_seed(9).with_config(config);
    let mut b = Simulation::new(350.0, 200.0).with_seed(9).with_config(loaded);
    a.add_particles(ParticleKind::Creative, 8);
    b.add_particles(ParticleKind::Creative, 8);
    for _ in 0..30 {
        a.update(16.0);
        b.update(16.0);
    }

    let pa: Vec<_> = a.particles().iter().map(|p| p.position).collect();
    let pb: Vec<_> = b.particles().iter().map(|p| p.position).collect();
    assert_eq!(pa, pb);
}
