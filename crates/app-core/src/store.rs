//! Authoritative particle collection: creation, aging, merging, pruning.

use crate::constants::{
    MAX_RADIUS, MERGE_AGE, MERGE_DAMPING, MERGE_DISTANCE, MERGE_RADIUS_STEP, MERGE_VELOCITY_KEEP,
    SCORE_PERMANENCE_BONUS, SCORE_RADIUS_WEIGHT, SPARK_LIFE_MIN, SPARK_LIFE_VAR, TICK_RATE,
    TRAIL_LIFE,
};
use crate::particle::{GroupId, Particle, ParticleId, ParticleKind};
use fnv::FnvHashSet;
use glam::Vec2;
use rand::prelude::*;
use std::cmp::Ordering;

#[derive(Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    next_id: ParticleId,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    pub fn count_kind(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Create a particle with kind-dependent size, lifetime, and spawn jitter.
    pub fn spawn(
        &mut self,
        rng: &mut StdRng,
        kind: ParticleKind,
        pos: Vec2,
        vel: Vec2,
        group: Option<GroupId>,
    ) -> ParticleId {
        let (base_radius, radius_var) = match kind {
            ParticleKind::Trail => (1.5, 1.0),
            ParticleKind::Spark => (2.0, 2.0),
            ParticleKind::Permanent => (2.5, 2.0),
            ParticleKind::ConstellationStar => (2.0, 1.5),
        };
        let life = match kind {
            ParticleKind::Trail => TRAIL_LIFE,
            ParticleKind::Spark => SPARK_LIFE_MIN + rng.gen::<f32>() * SPARK_LIFE_VAR,
            _ => f32::INFINITY,
        };
        let jitter = if kind == ParticleKind::Spark { 2.0 } else { 0.5 };
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            pos,
            vel: vel
                + Vec2::new(
                    (rng.gen::<f32>() - 0.5) * jitter,
                    (rng.gen::<f32>() - 0.5) * jitter,
                ),
            radius: base_radius + rng.gen::<f32>() * radius_var,
            kind,
            life,
            age: 0.0,
            hue_shift: rng.gen::<f32>() * 60.0 - 30.0,
            group,
            base_offset: Vec2::ZERO,
            link_count: 0,
            bond_bonus: 0.0,
        });
        id
    }

    /// Advance ages and lifetimes; expired entries are removed.
    pub fn step(&mut self, dt: f32) {
        let ticks = dt * TICK_RATE;
        for p in &mut self.particles {
            p.age += ticks;
            if p.expires() {
                p.life -= ticks;
            }
        }
        self.particles.retain(|p| !p.expires() || p.life > 0.0);
    }

    /// Absorb aged sparks into nearby permanent nodes. The node keeps a
    /// damped blend of both velocities, grows up to the radius cap, and the
    /// spark disappears.
    pub fn merge_into_nodes(&mut self) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &self.particles[i];
            if p.kind != ParticleKind::Spark || p.age <= MERGE_AGE {
                i += 1;
                continue;
            }
            let (pos, vel) = (p.pos, p.vel);
            let target = self.particles.iter().position(|q| {
                q.kind == ParticleKind::Permanent
                    && q.pos.distance_squared(pos) < MERGE_DISTANCE * MERGE_DISTANCE
            });
            match target {
                Some(j) => {
                    let node = &mut self.particles[j];
                    node.vel = (node.vel + vel * MERGE_VELOCITY_KEEP) * MERGE_DAMPING;
                    node.radius = (node.radius + MERGE_RADIUS_STEP).min(MAX_RADIUS);
                    node.bond_bonus += 1.0;
                    self.particles.remove(i);
                }
                None => i += 1,
            }
        }
    }

    /// Evict the excess of one kind, lowest structural score first.
    pub fn enforce_cap(&mut self, kind: ParticleKind, max: usize) {
        let count = self.count_kind(kind);
        if count > max {
            self.evict(count - max, |p| p.kind == kind);
        }
    }

    /// Evict across all kinds down to the global cap.
    pub fn enforce_total(&mut self, max: usize) {
        if self.particles.len() > max {
            self.evict(self.particles.len() - max, |_| true);
        }
    }

    fn evict(&mut self, excess: usize, eligible: impl Fn(&Particle) -> bool) {
        let mut candidates: Vec<(f32, f32, ParticleId)> = self
            .particles
            .iter()
            .filter(|p| eligible(p))
            .map(|p| (structural_score(p), p.age, p.id))
            .collect();
        // lowest score first; ties shed the oldest
        candidates.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
        });
        let doomed: FnvHashSet<ParticleId> =
            candidates.into_iter().take(excess).map(|c| c.2).collect();
        self.particles.retain(|p| !doomed.contains(&p.id));
    }
}

/// Connection count plus size and permanence bonuses: visually anchored
/// structures survive cap pressure, transient debris goes first.
fn structural_score(p: &Particle) -> f32 {
    let permanence = match p.kind {
        ParticleKind::Permanent | ParticleKind::ConstellationStar => SCORE_PERMANENCE_BONUS,
        _ => 0.0,
    };
    p.link_count as f32 + p.radius * SCORE_RADIUS_WEIGHT + permanence + p.bond_bonus
}
