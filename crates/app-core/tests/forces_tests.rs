// Native tests for the force field: pointer speed regimes, pulse impulses,
// and boundary containment.

use app_core::constants::EDGE_MARGIN;
use app_core::{FieldEngine, FrameInput, ParticleId, ParticleKind};
use glam::Vec2;
use std::f32::consts::TAU;

const DT: f32 = 1.0 / 60.0;

/// Ten sparks ringed around `center`, velocities zeroed so force directions
/// are unambiguous. Spawning before `resize` suppresses density seeding.
fn ring_fixture(center: Vec2, ring_radius: f32) -> (FieldEngine, Vec<ParticleId>) {
    let mut engine = FieldEngine::new(9);
    let mut ids = Vec::new();
    for i in 0..10 {
        let dir = Vec2::from_angle(TAU * i as f32 / 10.0);
        ids.push(engine.spawn(ParticleKind::Spark, center + dir * ring_radius, Vec2::ZERO));
    }
    for p in engine.store.particles_mut() {
        p.vel = Vec2::ZERO;
    }
    engine.resize(800.0, 600.0, false);
    (engine, ids)
}

#[test]
fn fast_drag_repels_particles_in_the_inner_radius() {
    let center = Vec2::new(400.0, 300.0);
    let (mut engine, ids) = ring_fixture(center, 40.0);
    engine.pointer.press(center);
    engine.pointer.vel = Vec2::new(20.0, 0.0); // above the fast threshold
    engine.step(DT, &FrameInput::default());
    for id in &ids {
        let p = engine.store.get(*id).expect("spark");
        assert!(
            p.vel.dot(p.pos - center) > 0.0,
            "expected an outward velocity delta"
        );
    }
}

#[test]
fn slow_drag_attracts_the_same_particles() {
    let center = Vec2::new(400.0, 300.0);
    let (mut engine, ids) = ring_fixture(center, 40.0);
    engine.pointer.press(center);
    engine.pointer.vel = Vec2::new(2.0, 0.0); // below the slow threshold
    engine.step(DT, &FrameInput::default());
    for id in &ids {
        let p = engine.store.get(*id).expect("spark");
        assert!(
            p.vel.dot(p.pos - center) < 0.0,
            "expected an inward velocity delta"
        );
    }
}

#[test]
fn medium_drag_swirls_tangentially() {
    let center = Vec2::new(400.0, 300.0);
    let (mut engine, ids) = ring_fixture(center, 60.0);
    engine.pointer.press(center);
    engine.pointer.vel = Vec2::new(10.0, 0.0); // between the thresholds
    engine.step(DT, &FrameInput::default());
    for id in &ids {
        let p = engine.store.get(*id).expect("spark");
        let dir = (p.pos - center).normalize_or_zero();
        let radial = p.vel.dot(dir).abs();
        let tangential = p.vel.perp_dot(dir).abs();
        assert!(
            tangential > radial,
            "swirl should dominate the radial component"
        );
    }
}

#[test]
fn pulse_shoves_particles_away_from_the_surface_center() {
    let mut engine = FieldEngine::new(5);
    let id = engine.spawn(ParticleKind::Spark, Vec2::new(150.0, 150.0), Vec2::ZERO);
    for p in engine.store.particles_mut() {
        p.vel = Vec2::ZERO;
    }
    engine.resize(800.0, 600.0, false);
    let input = FrameInput {
        pulse: 0.8,
        ..FrameInput::default()
    };
    engine.step(DT, &input);
    let p = engine.store.get(id).expect("spark");
    let outward = Vec2::new(150.0, 150.0) - Vec2::new(400.0, 300.0);
    assert!(p.vel.dot(outward) > 0.0);
}

#[test]
fn containment_clamps_everything_inside_the_margins() {
    let mut engine = FieldEngine::new(1);
    for i in 0..20 {
        engine.spawn(
            ParticleKind::Spark,
            Vec2::new(-60.0 + i as f32 * 50.0, 700.0),
            Vec2::new(30.0, 30.0),
        );
    }
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());
    for p in engine.particles() {
        assert!(p.pos.x >= EDGE_MARGIN - 1e-3 && p.pos.x <= 800.0 - EDGE_MARGIN + 1e-3);
        assert!(p.pos.y >= EDGE_MARGIN - 1e-3 && p.pos.y <= 600.0 - EDGE_MARGIN + 1e-3);
    }
}
