// Native tests for quartet detection, rigid rotation, and dissolution.

use app_core::{FieldEngine, FrameInput, ParticleId, ParticleKind};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn square_of_permanents(engine: &mut FieldEngine, center: Vec2, half: f32) -> Vec<ParticleId> {
    let corners = [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(-half, half),
        Vec2::new(half, half),
    ];
    corners
        .iter()
        .map(|c| engine.spawn(ParticleKind::Permanent, center + *c, Vec2::ZERO))
        .collect()
}

#[test]
fn four_close_permanents_confirm_a_quartet() {
    let mut engine = FieldEngine::new(11);
    let ids = square_of_permanents(&mut engine, Vec2::new(300.0, 300.0), 20.0);
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());

    assert_eq!(engine.quartets().len(), 1);
    let group = engine.store.get(ids[0]).unwrap().group;
    assert!(group.is_some());
    for id in &ids {
        assert_eq!(engine.store.get(*id).unwrap().group, group);
    }
}

#[test]
fn partial_groups_stay_unassigned() {
    let mut engine = FieldEngine::new(11);
    for i in 0..3 {
        engine.spawn(
            ParticleKind::Permanent,
            Vec2::new(300.0 + i as f32 * 25.0, 300.0),
            Vec2::ZERO,
        );
    }
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());

    assert!(engine.quartets().is_empty());
    for p in engine.particles() {
        assert!(p.group.is_none());
    }
}

#[test]
fn fifth_candidate_is_left_for_the_next_frame() {
    let mut engine = FieldEngine::new(11);
    square_of_permanents(&mut engine, Vec2::new(300.0, 300.0), 20.0);
    let extra = engine.spawn(ParticleKind::Permanent, Vec2::new(305.0, 300.0), Vec2::ZERO);
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());

    assert_eq!(engine.quartets().len(), 1);
    assert!(engine.store.get(extra).unwrap().group.is_none());
}

#[test]
fn quartet_rotation_is_rigid() {
    let mut engine = FieldEngine::new(11);
    let ids = square_of_permanents(&mut engine, Vec2::new(300.0, 300.0), 20.0);
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());
    let formed: Vec<Vec2> = ids
        .iter()
        .map(|id| engine.store.get(*id).unwrap().pos)
        .collect();

    for _ in 0..60 {
        engine.step(DT, &FrameInput::default());
    }
    assert_eq!(engine.quartets().len(), 1);
    assert!(engine.quartets()[0].angle > 0.0);
    let rotated: Vec<Vec2> = ids
        .iter()
        .map(|id| engine.store.get(*id).unwrap().pos)
        .collect();
    for i in 0..4 {
        for j in (i + 1)..4 {
            let before = formed[i].distance(formed[j]);
            let after = rotated[i].distance(rotated[j]);
            assert!(
                (before - after).abs() < 0.5,
                "pairwise distance drifted: {before} -> {after}"
            );
        }
    }
}

#[test]
fn spread_quartet_dissolves_and_clears_groups() {
    let mut engine = FieldEngine::new(11);
    let ids = square_of_permanents(&mut engine, Vec2::new(300.0, 300.0), 20.0);
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());
    assert_eq!(engine.quartets().len(), 1);

    if let Some(p) = engine
        .store
        .particles_mut()
        .iter_mut()
        .find(|p| p.id == ids[0])
    {
        p.pos += Vec2::new(450.0, 0.0);
    }
    engine.step(DT, &FrameInput::default());

    assert!(engine.quartets().is_empty());
    for id in &ids {
        assert!(engine.store.get(*id).unwrap().group.is_none());
    }
}

#[test]
fn member_loss_dissolves_the_quartet_within_one_frame() {
    let mut engine = FieldEngine::new(11);
    let ids = square_of_permanents(&mut engine, Vec2::new(300.0, 300.0), 20.0);
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());
    assert_eq!(engine.quartets().len(), 1);

    engine.store.particles_mut().retain(|p| p.id != ids[0]);
    engine.step(DT, &FrameInput::default());

    assert!(engine.quartets().is_empty());
    for id in &ids[1..] {
        assert!(engine.store.get(*id).unwrap().group.is_none());
    }
}
