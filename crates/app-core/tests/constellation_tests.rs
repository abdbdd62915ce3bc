// Native tests for template instancing, edge topology, cohesion, and the
// group cap.

use app_core::constants::MAX_CONSTELLATIONS;
use app_core::{
    ConstellationError, FieldEngine, FrameInput, ParticleKind, TEMPLATES,
};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

#[test]
fn templates_are_well_formed() {
    assert!(TEMPLATES.len() >= 5);
    for tpl in &TEMPLATES {
        assert!(!tpl.stars.is_empty());
        for s in tpl.stars {
            assert!((0.0..=1.0).contains(&s.pos[0]));
            assert!((0.0..=1.0).contains(&s.pos[1]));
            assert!(s.magnitude > 0.0);
        }
        for e in tpl.edges {
            assert!((e[0] as usize) < tpl.stars.len());
            assert!((e[1] as usize) < tpl.stars.len());
        }
    }
    // the dipper drives the seven-star scenario below
    assert_eq!(TEMPLATES[0].stars.len(), 7);
    assert_eq!(TEMPLATES[0].edges.len(), 7);
}

#[test]
fn seven_star_drop_tags_one_fresh_group_and_draws_seven_edges() {
    let mut engine = FieldEngine::new(3);
    let anchor = Vec2::new(400.0, 300.0);
    let gid = engine
        .drop_constellation(Some(0), anchor, 120.0)
        .expect("template 0");

    assert_eq!(engine.particles().len(), 7);
    for (p, s) in engine.particles().iter().zip(TEMPLATES[0].stars) {
        assert_eq!(p.kind, ParticleKind::ConstellationStar);
        assert_eq!(p.group, Some(gid));
        let expected = anchor + (Vec2::new(s.pos[0], s.pos[1]) - Vec2::splat(0.5)) * 120.0;
        assert!(p.pos.distance(expected) < 1e-3);
    }
    assert_eq!(engine.constellation_edges().len(), 7);
}

#[test]
fn unknown_template_index_is_an_error() {
    let mut engine = FieldEngine::new(3);
    let result = engine.drop_constellation(Some(99), Vec2::new(100.0, 100.0), 80.0);
    assert!(matches!(
        result,
        Err(ConstellationError::UnknownTemplate(99))
    ));
    assert!(engine.particles().is_empty());
}

#[test]
fn oldest_group_is_evicted_wholesale_over_the_cap() {
    let mut engine = FieldEngine::new(3);
    let mut groups = Vec::new();
    for i in 0..(MAX_CONSTELLATIONS + 1) {
        let pos = Vec2::new(150.0 + 150.0 * i as f32, 300.0);
        groups.push(engine.drop_constellation(Some(0), pos, 100.0).unwrap());
    }
    assert_eq!(engine.constellations().len(), MAX_CONSTELLATIONS);
    let evicted = groups[0];
    assert!(
        engine.particles().iter().all(|p| p.group != Some(evicted)),
        "evicted group must lose every particle"
    );
    assert_eq!(
        engine.particles().len(),
        MAX_CONSTELLATIONS * TEMPLATES[0].stars.len()
    );
}

#[test]
fn stars_are_exempt_from_links_and_quartets() {
    let mut engine = FieldEngine::new(3);
    engine
        .drop_constellation(Some(0), Vec2::new(400.0, 300.0), 120.0)
        .unwrap();
    engine.resize(800.0, 600.0, false);
    engine.step(DT, &FrameInput::default());
    assert!(engine.quartets().is_empty());
    assert!(engine.links().is_empty());
}

#[test]
fn cohesion_keeps_stars_near_their_formation_slots() {
    let mut engine = FieldEngine::new(3);
    engine
        .drop_constellation(Some(0), Vec2::new(400.0, 300.0), 120.0)
        .unwrap();
    engine.resize(800.0, 600.0, false);
    for _ in 0..120 {
        engine.step(DT, &FrameInput::default());
    }
    let live: Vec<Vec2> = engine.particles().iter().map(|p| p.pos).collect();
    let centroid = live.iter().copied().sum::<Vec2>() / live.len() as f32;
    for p in engine.particles() {
        let slot = centroid + p.base_offset;
        assert!(
            p.pos.distance(slot) < 30.0,
            "star strayed {:.1} px from its slot",
            p.pos.distance(slot)
        );
    }
}

#[test]
fn edges_skip_members_that_no_longer_exist() {
    let mut engine = FieldEngine::new(3);
    engine
        .drop_constellation(Some(0), Vec2::new(400.0, 300.0), 120.0)
        .unwrap();
    // star 3 participates in three of the seven dipper edges
    let gone = engine.constellations()[0].members[3];
    engine.store.particles_mut().retain(|p| p.id != gone);
    assert_eq!(engine.constellation_edges().len(), 4);
}

#[test]
fn empty_group_is_torn_down_within_one_frame() {
    let mut engine = FieldEngine::new(3);
    engine
        .drop_constellation(Some(1), Vec2::new(300.0, 300.0), 100.0)
        .unwrap();
    engine.resize(800.0, 600.0, false);
    engine.store.particles_mut().clear();
    engine.step(DT, &FrameInput::default());
    assert!(engine.constellations().is_empty());
}
