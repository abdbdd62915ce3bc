//! Quartet clustering: greedy detection of four mutually close permanent
//! particles and their rigid rotation around a recomputed centroid.

use crate::constants::{
    CLUSTER_ANGULAR_SPEED, CLUSTER_BREAK_FACTOR, CLUSTER_DISTANCE, VORTEX_GAIN, VORTEX_RADIUS_FREQ,
    VORTEX_TIME_FREQ,
};
use crate::particle::{GroupId, ParticleId, ParticleKind};
use crate::store::ParticleStore;
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// A confirmed rigid group of exactly four permanent particles.
#[derive(Clone, Debug)]
pub struct Quartet {
    pub group: GroupId,
    pub members: [ParticleId; 4],
    /// Member offsets from the centroid at formation time.
    pub offsets: [Vec2; 4],
    pub angle: f32,
}

pub(crate) fn update(
    store: &mut ParticleStore,
    quartets: &mut Vec<Quartet>,
    next_group: &mut GroupId,
    dt: f32,
    time: f32,
) {
    let index: FnvHashMap<ParticleId, usize> = store
        .particles()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    // tear down quartets that lost members or spread too far
    let break_dist = CLUSTER_DISTANCE * CLUSTER_BREAK_FACTOR;
    let mut dissolved: Vec<[ParticleId; 4]> = Vec::new();
    quartets.retain(|q| {
        let mut centroid = Vec2::ZERO;
        let mut ok = true;
        for id in &q.members {
            match index.get(id) {
                Some(&i) if store.particles()[i].kind == ParticleKind::Permanent => {
                    centroid += store.particles()[i].pos;
                }
                _ => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            centroid /= 4.0;
            for id in &q.members {
                if store.particles()[index[id]].pos.distance(centroid) > break_dist {
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            dissolved.push(q.members);
        }
        ok
    });
    for members in dissolved {
        for id in members {
            if let Some(&i) = index.get(&id) {
                let p = &mut store.particles_mut()[i];
                p.group = None;
                p.base_offset = Vec2::ZERO;
            }
        }
    }

    // greedy confirmation of new quartets among unassigned permanents;
    // partial groups stay unassigned and retry next frame
    let candidates: Vec<(usize, ParticleId, Vec2)> = store
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == ParticleKind::Permanent && p.group.is_none())
        .map(|(i, p)| (i, p.id, p.pos))
        .collect();
    let mut taken = vec![false; candidates.len()];
    for seed in 0..candidates.len() {
        if taken[seed] {
            continue;
        }
        let mut picked: SmallVec<[usize; 4]> = SmallVec::new();
        picked.push(seed);
        for other in (seed + 1)..candidates.len() {
            if picked.len() == 4 {
                break;
            }
            if taken[other] {
                continue;
            }
            let d_sq = candidates[seed].2.distance_squared(candidates[other].2);
            if d_sq < CLUSTER_DISTANCE * CLUSTER_DISTANCE {
                picked.push(other);
            }
        }
        if picked.len() != 4 {
            continue;
        }
        let centroid = picked.iter().map(|&c| candidates[c].2).sum::<Vec2>() / 4.0;
        let gid = *next_group;
        *next_group += 1;
        let mut members = [0 as ParticleId; 4];
        let mut offsets = [Vec2::ZERO; 4];
        for (k, &c) in picked.iter().enumerate() {
            taken[c] = true;
            members[k] = candidates[c].1;
            offsets[k] = candidates[c].2 - centroid;
            let p = &mut store.particles_mut()[candidates[c].0];
            p.group = Some(gid);
            p.base_offset = offsets[k];
        }
        quartets.push(Quartet {
            group: gid,
            members,
            offsets,
            angle: 0.0,
        });
    }

    // rigid rotation: recompute the centroid from live positions, advance the
    // angle, and place members on the rotated formation with tangential
    // velocities so the group moves as a unit
    for q in quartets.iter_mut() {
        let mut centroid = Vec2::ZERO;
        for id in &q.members {
            centroid += store.particles()[index[id]].pos;
        }
        centroid /= 4.0;
        let mean_radius = q.offsets.iter().map(|o| o.length()).sum::<f32>() / 4.0;
        let vortex = VORTEX_GAIN * (time * VORTEX_TIME_FREQ + mean_radius * VORTEX_RADIUS_FREQ).sin();
        let step = dt * CLUSTER_ANGULAR_SPEED * (1.0 + vortex);
        q.angle += step;
        let rot = Vec2::from_angle(q.angle);
        for (k, id) in q.members.iter().enumerate() {
            let arm = rot.rotate(q.offsets[k]);
            let p = &mut store.particles_mut()[index[id]];
            p.pos = centroid + arm;
            p.vel = Vec2::new(-arm.y, arm.x) * step;
        }
    }
}
