// Native tests for pulse-gated dyad coupling and the shared wave profile.

use app_core::{wave_profile, FieldEngine, FrameInput, ParticleKind};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn square_of_permanents(engine: &mut FieldEngine, center: Vec2, half: f32) {
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(-half, half),
        Vec2::new(half, half),
    ];
    for c in corners {
        engine.spawn(ParticleKind::Permanent, center + c, Vec2::ZERO);
    }
}

fn two_quartet_engine(separation: f32) -> FieldEngine {
    let mut engine = FieldEngine::new(13);
    square_of_permanents(&mut engine, Vec2::new(200.0, 300.0), 20.0);
    square_of_permanents(&mut engine, Vec2::new(200.0 + separation, 300.0), 20.0);
    engine.resize(900.0, 600.0, false);
    engine
}

fn pulsed(pulse: f32) -> FrameInput {
    FrameInput {
        pulse,
        ..FrameInput::default()
    }
}

#[test]
fn active_pulse_pairs_nearby_quartets_within_one_frame() {
    // centroids 150 px apart; the threshold at pulse 0.5 is 230 px
    let mut engine = two_quartet_engine(150.0);
    engine.step(DT, &pulsed(0.5));
    assert_eq!(engine.quartets().len(), 2);
    assert_eq!(engine.dyads().len(), 1);
    assert_eq!(engine.dyad_geometry().len(), 1);
}

#[test]
fn dyad_tears_down_below_the_release_threshold() {
    let mut engine = two_quartet_engine(150.0);
    engine.step(DT, &pulsed(0.5));
    assert_eq!(engine.dyads().len(), 1);
    engine.step(DT, &pulsed(0.05));
    assert!(engine.dyads().is_empty());
}

#[test]
fn mid_band_pulse_keeps_existing_dyads_but_forms_none() {
    let mut engine = two_quartet_engine(150.0);
    engine.step(DT, &pulsed(0.2)); // above release, below activation
    assert_eq!(engine.quartets().len(), 2);
    assert!(engine.dyads().is_empty());
    engine.step(DT, &pulsed(0.5));
    assert_eq!(engine.dyads().len(), 1);
    engine.step(DT, &pulsed(0.2)); // hysteresis: the pair survives
    assert_eq!(engine.dyads().len(), 1);
}

#[test]
fn distant_quartets_do_not_pair() {
    let mut engine = two_quartet_engine(500.0);
    engine.step(DT, &pulsed(0.5));
    assert_eq!(engine.quartets().len(), 2);
    assert!(engine.dyads().is_empty());
}

#[test]
fn dyad_dies_with_its_quartet() {
    let mut engine = two_quartet_engine(150.0);
    engine.step(DT, &pulsed(0.5));
    assert_eq!(engine.dyads().len(), 1);
    // break one quartet by teleporting a member far away
    let id = engine.quartets()[0].members[0];
    if let Some(p) = engine.store.particles_mut().iter_mut().find(|p| p.id == id) {
        p.pos += Vec2::new(0.0, 260.0);
    }
    engine.step(DT, &pulsed(0.5));
    assert!(engine.dyads().is_empty());
}

#[test]
fn wave_profile_is_bounded_by_its_harmonics() {
    for ti in 0..=20 {
        for pi in 0..8 {
            for wi in 0..10 {
                let w = wave_profile(ti as f32 / 20.0, pi as f32 * 0.8, wi as f32 * 0.55);
                assert!(w.abs() <= 1.75 + 1e-4);
            }
        }
    }
}
