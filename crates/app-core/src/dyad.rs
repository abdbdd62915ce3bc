//! Pulse-gated coupling between quartet pairs, driven by a shared
//! multi-harmonic traveling wave.

use crate::cluster::Quartet;
use crate::constants::{
    DYAD_ACTIVATE_PULSE, DYAD_AMP_MIN, DYAD_AMP_VAR, DYAD_AXIAL_FORCE, DYAD_BASE_DISTANCE,
    DYAD_DISTANCE_PER_PULSE, DYAD_FORCE, DYAD_RELEASE_PULSE, DYAD_WAVE_RATE, DYAD_WAVE_RATE_PULSE,
};
use crate::particle::{GroupId, ParticleId};
use crate::store::ParticleStore;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// A live coupling between two quartets.
#[derive(Clone, Debug)]
pub struct Dyad {
    pub a: GroupId,
    pub b: GroupId,
    pub phase: f32,
    /// Rendered wave amplitude, px.
    pub amp: f32,
}

/// Three-harmonic wave sampled at a normalized position along the
/// inter-centroid axis. Descending amplitudes at rising frequencies give the
/// ripple its fractal look; the same profile drives forces and rendering.
#[inline]
pub fn wave_profile(t01: f32, phase: f32, wave_time: f32) -> f32 {
    let x = t01 * TAU + phase;
    (x + wave_time).sin()
        + 0.5 * (2.0 * x + wave_time * 1.7).sin()
        + 0.25 * (4.0 * x + wave_time * 2.3).sin()
}

pub(crate) fn update(
    store: &mut ParticleStore,
    quartets: &[Quartet],
    dyads: &mut Vec<Dyad>,
    wave_time: &mut f32,
    pulse: f32,
    dt: f32,
    rng: &mut StdRng,
) {
    // hysteresis floor: everything tears down at once, no grace period
    if pulse < DYAD_RELEASE_PULSE {
        dyads.clear();
        return;
    }
    *wave_time += dt * (DYAD_WAVE_RATE + pulse * DYAD_WAVE_RATE_PULSE);

    let index: FnvHashMap<ParticleId, usize> = store
        .particles()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();
    let mut centroids: FnvHashMap<GroupId, Vec2> = FnvHashMap::default();
    for q in quartets {
        let mut c = Vec2::ZERO;
        let mut n = 0;
        for id in &q.members {
            if let Some(&i) = index.get(id) {
                c += store.particles()[i].pos;
                n += 1;
            }
        }
        if n == 4 {
            centroids.insert(q.group, c / 4.0);
        }
    }

    // drop couplings whose quartets dissolved
    dyads.retain(|d| centroids.contains_key(&d.a) && centroids.contains_key(&d.b));

    if pulse >= DYAD_ACTIVATE_PULSE {
        let linked: FnvHashSet<(GroupId, GroupId)> =
            dyads.iter().map(|d| pair_key(d.a, d.b)).collect();
        let max_dist = DYAD_BASE_DISTANCE + pulse * DYAD_DISTANCE_PER_PULSE;
        let groups: Vec<(GroupId, Vec2)> = centroids.iter().map(|(&g, &c)| (g, c)).collect();
        for i in 0..groups.len() {
            for j in (i + 1)..groups.len() {
                let key = pair_key(groups[i].0, groups[j].0);
                if linked.contains(&key) {
                    continue;
                }
                if groups[i].1.distance(groups[j].1) <= max_dist {
                    dyads.push(Dyad {
                        a: key.0,
                        b: key.1,
                        phase: rng.gen::<f32>() * TAU,
                        amp: DYAD_AMP_MIN + rng.gen::<f32>() * DYAD_AMP_VAR,
                    });
                }
            }
        }
    }

    // wave forces: perpendicular ripple plus a gentler in-axis pulsing
    for d in dyads.iter() {
        let (ca, cb) = (centroids[&d.a], centroids[&d.b]);
        let axis = cb - ca;
        let len = axis.length();
        if len < 1.0 {
            continue;
        }
        let dir = axis / len;
        let perp = Vec2::new(-dir.y, dir.x);
        for q in quartets.iter().filter(|q| q.group == d.a || q.group == d.b) {
            for id in &q.members {
                if let Some(&i) = index.get(id) {
                    let p = &mut store.particles_mut()[i];
                    let t01 = ((p.pos - ca).dot(dir) / len).clamp(0.0, 1.0);
                    let wave = wave_profile(t01, d.phase, *wave_time);
                    p.vel += perp * wave * DYAD_FORCE * dt;
                    p.vel += dir * (t01 * TAU + *wave_time).cos() * DYAD_AXIAL_FORCE * dt;
                }
            }
        }
    }
}

#[inline]
fn pair_key(a: GroupId, b: GroupId) -> (GroupId, GroupId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
