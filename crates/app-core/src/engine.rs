//! The per-frame simulation driver.
//!
//! One `step` runs the fixed pass order — forces, clusters, dyads,
//! constellations, lifecycle, links — against an injected snapshot of the
//! host application context, and reports aggregate stats back out.

use crate::cluster::{self, Quartet};
use crate::constants::{
    BURST_CLUSTERS, BURST_CLUSTER_SIZE, BURST_SPAWN_THRESHOLD, BURST_SPREAD, DRAG_RING_COUNT,
    LINK_BASE_ALPHA, LINK_DIST_MAX, LINK_DIST_MIN, LINK_DIST_WIDTH_FRACTION, LINK_LIVE_BOOST,
    LINK_LIVE_SCALE, LINK_PULSE_BOOST, MAX_NODES, MAX_PERMANENT, MAX_SPARKS, MAX_TRAILS,
    PRESS_RING_COUNT, RELEASE_SPAWN_MAX, RELEASE_SPAWN_SPEED, SEED_AREA_DESKTOP, SEED_AREA_MOBILE,
    SEED_MAX_DESKTOP, SEED_MAX_MOBILE, SEED_MIN, SPARK_SPAWN_SPEED, TRAIL_SPAWN_SPEED,
};
use crate::constellation::{self, ConstellationError, ConstellationInstance, TEMPLATES};
use crate::dyad::{self, Dyad};
use crate::forces;
use crate::particle::{GroupId, Particle, ParticleId, ParticleKind};
use crate::pointer::PointerTracker;
use crate::store::ParticleStore;
use crate::theme::{Mode, Theme};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Read-only snapshot of the host application context for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub mode: Mode,
    pub theme: Theme,
    /// Decaying pulse intensity in [0, 1]; gates dyads and radial impulses.
    pub pulse: f32,
    /// Decaying burst intensity in [0, 1]; gates one-shot center bursts.
    pub burst: f32,
    /// Page scroll ratio in [0, 1]; drives the parallax factor.
    pub scroll: f32,
}

/// Aggregate stats published to the host once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// A connective line between two particles; indices are valid for the frame
/// the link pass built them.
#[derive(Clone, Copy, Debug)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Linear distance falloff in (0, 1].
    pub strength: f32,
}

impl Link {
    /// Base stroke alpha before mode/pulse boosts.
    #[inline]
    pub fn base_alpha(&self) -> f32 {
        LINK_BASE_ALPHA * self.strength
    }
}

pub struct FieldEngine {
    pub store: ParticleStore,
    pub pointer: PointerTracker,
    quartets: Vec<Quartet>,
    dyads: Vec<Dyad>,
    constellations: Vec<ConstellationInstance>,
    links: Vec<Link>,
    width: f32,
    height: f32,
    time: f32,
    wave_time: f32,
    next_group: GroupId,
    burst_armed: bool,
    rng: StdRng,
    stats: FrameStats,
}

impl FieldEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            store: ParticleStore::new(),
            pointer: PointerTracker::new(),
            quartets: Vec::new(),
            dyads: Vec::new(),
            constellations: Vec::new(),
            links: Vec::new(),
            width: 0.0,
            height: 0.0,
            time: 0.0,
            wave_time: 0.0,
            next_group: 1,
            burst_armed: true,
            rng: StdRng::seed_from_u64(seed),
            stats: FrameStats::default(),
        }
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn quartets(&self) -> &[Quartet] {
        &self.quartets
    }

    pub fn dyads(&self) -> &[Dyad] {
        &self.dyads
    }

    pub fn constellations(&self) -> &[ConstellationInstance] {
        &self.constellations
    }

    pub fn wave_time(&self) -> f32 {
        self.wave_time
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Adopt new surface dimensions. Existing particles are clamped into the
    /// new bounds; an empty field is seeded density-proportionally.
    pub fn resize(&mut self, width: f32, height: f32, mobile: bool) {
        self.width = width;
        self.height = height;
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        for p in self.store.particles_mut() {
            p.pos.x = p.pos.x.clamp(0.0, width);
            p.pos.y = p.pos.y.clamp(0.0, height);
        }
        if self.store.is_empty() {
            let area = if mobile { SEED_AREA_MOBILE } else { SEED_AREA_DESKTOP };
            let max = if mobile { SEED_MAX_MOBILE } else { SEED_MAX_DESKTOP };
            let count = ((width * height / area) as usize).clamp(SEED_MIN, max);
            for _ in 0..count {
                let pos = Vec2::new(
                    self.rng.gen::<f32>() * width,
                    self.rng.gen::<f32>() * height,
                );
                self.store
                    .spawn(&mut self.rng, ParticleKind::Permanent, pos, Vec2::ZERO, None);
            }
            log::info!("seeded {count} nodes for {width:.0}x{height:.0}");
        }
    }

    /// Lifecycle-manager spawn API for ungrouped particles.
    pub fn spawn(&mut self, kind: ParticleKind, pos: Vec2, vel: Vec2) -> ParticleId {
        self.store.spawn(&mut self.rng, kind, pos, vel, None)
    }

    // ---------------- pointer interface ----------------

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer.press(pos);
        self.spawn_ring(pos, PRESS_RING_COUNT, Vec2::ZERO);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer.sample(pos);
    }

    pub fn pointer_pair(&mut self, a: Vec2, b: Vec2) {
        self.pointer.sample_pair(a, b);
    }

    pub fn pointer_pair_end(&mut self) {
        self.pointer.end_pair();
    }

    /// Release burst scales with the accumulated drag velocity.
    pub fn pointer_up(&mut self) {
        if self.pointer.down {
            let speed = self.pointer.speed();
            if speed > RELEASE_SPAWN_SPEED {
                let count = (speed as usize).min(RELEASE_SPAWN_MAX);
                let vel = self.pointer.vel * 0.5;
                self.spawn_ring(self.pointer.pos, count, vel);
            }
        }
        self.pointer.release();
    }

    pub fn drop_constellation(
        &mut self,
        template: Option<usize>,
        pos: Vec2,
        scale: f32,
    ) -> Result<GroupId, ConstellationError> {
        constellation::drop_at(
            &mut self.store,
            &mut self.constellations,
            &mut self.next_group,
            &mut self.rng,
            template,
            pos,
            scale,
        )
    }

    /// Advance one frame. `dt` is in seconds, already clamped by the caller.
    /// Degenerate dimensions skip all work and report the last stats.
    pub fn step(&mut self, dt: f32, input: &FrameInput) -> FrameStats {
        if self.width <= 0.0 || self.height <= 0.0 || dt <= 0.0 {
            return self.stats;
        }
        self.time += dt;
        self.pointer.step(dt);
        self.spawn_from_drag();
        self.spawn_burst(input);

        forces::apply(
            &mut self.store,
            &self.pointer,
            input,
            &mut self.rng,
            Vec2::new(self.width, self.height),
            dt,
        );
        cluster::update(
            &mut self.store,
            &mut self.quartets,
            &mut self.next_group,
            dt,
            self.time,
        );
        dyad::update(
            &mut self.store,
            &self.quartets,
            &mut self.dyads,
            &mut self.wave_time,
            input.pulse,
            dt,
            &mut self.rng,
        );
        constellation::update(&mut self.store, &mut self.constellations, dt);

        // lifecycle: age, expire, merge, then cap enforcement
        self.store.step(dt);
        self.store.merge_into_nodes();
        self.store.enforce_cap(ParticleKind::Trail, MAX_TRAILS);
        self.store.enforce_cap(ParticleKind::Spark, MAX_SPARKS);
        self.store.enforce_cap(ParticleKind::Permanent, MAX_PERMANENT);
        self.store.enforce_total(MAX_NODES);

        self.link_pass(input);
        self.stats = FrameStats {
            particles: self.store.len(),
            links: self.links.len(),
        };
        self.stats
    }

    /// World-space segments for every live constellation edge whose
    /// endpoints still exist.
    pub fn constellation_edges(&self) -> Vec<(Vec2, Vec2)> {
        let index = self.id_index();
        let mut out = Vec::new();
        for inst in &self.constellations {
            let tpl = &TEMPLATES[inst.template];
            for edge in tpl.edges {
                let (a, b) = (edge[0] as usize, edge[1] as usize);
                if a >= inst.members.len() || b >= inst.members.len() {
                    continue;
                }
                if let (Some(&ia), Some(&ib)) = (
                    index.get(&inst.members[a]),
                    index.get(&inst.members[b]),
                ) {
                    out.push((
                        self.store.particles()[ia].pos,
                        self.store.particles()[ib].pos,
                    ));
                }
            }
        }
        out
    }

    /// Centroid pairs plus wave parameters for every live dyad.
    pub fn dyad_geometry(&self) -> Vec<(Vec2, Vec2, f32, f32)> {
        let index = self.id_index();
        let centroid = |group: GroupId| -> Option<Vec2> {
            let q = self.quartets.iter().find(|q| q.group == group)?;
            let mut c = Vec2::ZERO;
            for id in &q.members {
                c += self.store.particles()[*index.get(id)?].pos;
            }
            Some(c / 4.0)
        };
        self.dyads
            .iter()
            .filter_map(|d| Some((centroid(d.a)?, centroid(d.b)?, d.phase, d.amp)))
            .collect()
    }

    /// Mode- and pulse-boosted alpha for a link this frame.
    pub fn link_alpha(&self, link: &Link, input: &FrameInput) -> f32 {
        let boost = if input.mode.is_live() { LINK_LIVE_BOOST } else { 1.0 }
            + input.pulse * LINK_PULSE_BOOST;
        link.base_alpha() * boost
    }

    fn id_index(&self) -> FnvHashMap<ParticleId, usize> {
        self.store
            .particles()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect()
    }

    /// Ring of sparks around `pos`, inheriting a fraction of `vel`.
    fn spawn_ring(&mut self, pos: Vec2, count: usize, vel: Vec2) {
        for i in 0..count {
            let angle = TAU * i as f32 / count.max(1) as f32 + self.rng.gen::<f32>() * 0.5;
            let dist = 10.0 + self.rng.gen::<f32>() * 30.0;
            let dir = Vec2::from_angle(angle);
            self.store.spawn(
                &mut self.rng,
                ParticleKind::Spark,
                pos + dir * dist,
                vel * 0.3 + dir * 0.5,
                None,
            );
        }
    }

    /// Trail dots while dragging, plus spark rings on fast strokes.
    fn spawn_from_drag(&mut self) {
        if !self.pointer.down {
            return;
        }
        let speed = self.pointer.speed();
        let (pos, vel) = (self.pointer.pos, self.pointer.vel);
        if speed > TRAIL_SPAWN_SPEED {
            self.store
                .spawn(&mut self.rng, ParticleKind::Trail, pos, vel * 0.1, None);
        }
        if speed > SPARK_SPAWN_SPEED && self.rng.gen_bool(0.5) {
            self.spawn_ring(pos, DRAG_RING_COUNT, vel);
        }
    }

    /// Edge-latched so one external trigger produces exactly one burst.
    fn spawn_burst(&mut self, input: &FrameInput) {
        if input.burst > BURST_SPAWN_THRESHOLD {
            if self.burst_armed {
                self.burst_armed = false;
                let center = Vec2::new(self.width * 0.5, self.height * 0.32);
                for _ in 0..BURST_CLUSTERS {
                    let at = center
                        + Vec2::new(
                            (self.rng.gen::<f32>() - 0.5) * BURST_SPREAD,
                            (self.rng.gen::<f32>() - 0.5) * BURST_SPREAD,
                        );
                    self.spawn_ring(at, BURST_CLUSTER_SIZE, Vec2::ZERO);
                }
            }
        } else {
            self.burst_armed = true;
        }
    }

    /// One O(n^2) pass: collect connective lines for rendering and refresh
    /// the per-particle link counts consumed by the next lifecycle pass.
    fn link_pass(&mut self, input: &FrameInput) {
        self.links.clear();
        let mut max_dist =
            (self.width * LINK_DIST_WIDTH_FRACTION).clamp(LINK_DIST_MIN, LINK_DIST_MAX);
        if input.mode.is_live() {
            max_dist *= LINK_LIVE_SCALE;
        }
        let max_sq = max_dist * max_dist;

        let particles = self.store.particles_mut();
        for p in particles.iter_mut() {
            p.link_count = 0;
        }
        for i in 0..particles.len() {
            if !particles[i].links_connectable() {
                continue;
            }
            for j in (i + 1)..particles.len() {
                if !particles[j].links_connectable() {
                    continue;
                }
                let d_sq = particles[i].pos.distance_squared(particles[j].pos);
                if d_sq > max_sq {
                    continue;
                }
                let strength = 1.0 - d_sq.sqrt() / max_dist;
                self.links.push(Link { a: i, b: j, strength });
                particles[i].link_count += 1;
                particles[j].link_count += 1;
            }
        }
    }
}
