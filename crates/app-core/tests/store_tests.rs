// Native tests for the particle store: aging, merging, cap enforcement.

use app_core::constants::{MAX_NODES, MAX_RADIUS, MAX_SPARKS, MERGE_AGE, TRAIL_LIFE};
use app_core::{ParticleKind, ParticleStore};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn trail_expires_after_its_lifetime() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Trail,
        Vec2::new(10.0, 10.0),
        Vec2::ZERO,
        None,
    );
    assert_eq!(store.len(), 1);
    for _ in 0..(TRAIL_LIFE as usize + 2) {
        store.step(DT);
    }
    assert!(store.is_empty(), "trail should expire at life <= 0");
}

#[test]
fn permanent_nodes_never_expire() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(10.0, 10.0),
        Vec2::ZERO,
        None,
    );
    for _ in 0..2_000 {
        store.step(DT);
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn aged_spark_merges_into_nearby_node() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(100.0, 100.0),
        Vec2::ZERO,
        None,
    );
    store.spawn(
        &mut rng,
        ParticleKind::Spark,
        Vec2::new(105.0, 100.0),
        Vec2::ZERO,
        None,
    );
    for p in store.particles_mut() {
        if p.kind == ParticleKind::Spark {
            p.age = MERGE_AGE + 1.0;
        }
    }
    store.merge_into_nodes();
    // count-conserving minus one: the spark is absorbed
    assert_eq!(store.len(), 1);
    let node = &store.particles()[0];
    assert_eq!(node.kind, ParticleKind::Permanent);
    assert!(node.radius <= MAX_RADIUS);
    assert!(node.bond_bonus > 0.0);
}

#[test]
fn young_spark_does_not_merge() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(100.0, 100.0),
        Vec2::ZERO,
        None,
    );
    store.spawn(
        &mut rng,
        ParticleKind::Spark,
        Vec2::new(104.0, 100.0),
        Vec2::ZERO,
        None,
    );
    store.merge_into_nodes();
    assert_eq!(store.len(), 2);
}

#[test]
fn merge_never_grows_radius_past_cap() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(50.0, 50.0),
        Vec2::ZERO,
        None,
    );
    store.spawn(
        &mut rng,
        ParticleKind::Spark,
        Vec2::new(52.0, 50.0),
        Vec2::ZERO,
        None,
    );
    for p in store.particles_mut() {
        match p.kind {
            ParticleKind::Permanent => p.radius = MAX_RADIUS,
            _ => p.age = MERGE_AGE + 1.0,
        }
    }
    store.merge_into_nodes();
    assert_eq!(store.len(), 1);
    assert!((store.particles()[0].radius - MAX_RADIUS).abs() < 1e-6);
}

#[test]
fn cap_eviction_prefers_low_structural_score() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    let anchored = store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(100.0, 100.0),
        Vec2::ZERO,
        None,
    );
    let old_loner = store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(300.0, 100.0),
        Vec2::ZERO,
        None,
    );
    let young_loner = store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(500.0, 100.0),
        Vec2::ZERO,
        None,
    );
    for p in store.particles_mut() {
        p.radius = 2.0;
        if p.id == anchored {
            p.link_count = 5;
        }
        p.age = if p.id == old_loner { 50.0 } else { 10.0 };
    }
    store.enforce_cap(ParticleKind::Permanent, 2);
    assert_eq!(store.len(), 2);
    assert!(store.get(anchored).is_some(), "linked node survives");
    assert!(store.get(young_loner).is_some(), "tie broken oldest-first");
    assert!(store.get(old_loner).is_none());
}

#[test]
fn per_kind_cap_holds_after_enforcement() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    store.spawn(
        &mut rng,
        ParticleKind::Permanent,
        Vec2::new(10.0, 10.0),
        Vec2::ZERO,
        None,
    );
    for i in 0..(MAX_SPARKS + 40) {
        store.spawn(
            &mut rng,
            ParticleKind::Spark,
            Vec2::new(10.0 + i as f32, 200.0),
            Vec2::ZERO,
            None,
        );
    }
    store.enforce_cap(ParticleKind::Spark, MAX_SPARKS);
    assert_eq!(store.count_kind(ParticleKind::Spark), MAX_SPARKS);
    assert_eq!(store.count_kind(ParticleKind::Permanent), 1);
}

#[test]
fn total_cap_clamps_population() {
    let mut rng = rng();
    let mut store = ParticleStore::new();
    for i in 0..(MAX_NODES + 50) {
        store.spawn(
            &mut rng,
            ParticleKind::Permanent,
            Vec2::new((i % 40) as f32 * 20.0, (i / 40) as f32 * 20.0),
            Vec2::ZERO,
            None,
        );
    }
    store.enforce_total(MAX_NODES);
    assert_eq!(store.len(), MAX_NODES);
}
