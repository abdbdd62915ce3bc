//! Named star templates and the live constellation instances stamped from
//! them. Templates are static and never mutated; instancing copies positions
//! into world space.

use crate::constants::{CONSTELLATION_SPRING, MAX_CONSTELLATIONS, TICK_RATE};
use crate::particle::{GroupId, ParticleId, ParticleKind};
use crate::store::ParticleStore;
use fnv::FnvHashMap;
use glam::Vec2;
use rand::prelude::*;
use thiserror::Error;

#[derive(Clone, Copy, Debug)]
pub struct TemplateStar {
    /// Normalized position within the template square, 0..1.
    pub pos: [f32; 2],
    /// Relative brightness; scales the star radius.
    pub magnitude: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ConstellationTemplate {
    pub name: &'static str,
    pub stars: &'static [TemplateStar],
    /// Index pairs into `stars`.
    pub edges: &'static [[u8; 2]],
}

const fn star(x: f32, y: f32, magnitude: f32) -> TemplateStar {
    TemplateStar {
        pos: [x, y],
        magnitude,
    }
}

pub static TEMPLATES: [ConstellationTemplate; 5] = [
    ConstellationTemplate {
        name: "Ursa Major",
        stars: &[
            star(0.05, 0.38, 0.85), // Alkaid
            star(0.20, 0.30, 0.9),  // Mizar
            star(0.33, 0.26, 0.8),  // Alioth
            star(0.46, 0.25, 0.6),  // Megrez
            star(0.52, 0.44, 0.75), // Phecda
            star(0.72, 0.47, 0.8),  // Merak
            star(0.74, 0.22, 1.0),  // Dubhe
        ],
        edges: &[[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 6], [6, 3]],
    },
    ConstellationTemplate {
        name: "Cassiopeia",
        stars: &[
            star(0.08, 0.62, 0.8),
            star(0.30, 0.34, 0.9),
            star(0.50, 0.55, 1.0),
            star(0.70, 0.28, 0.85),
            star(0.92, 0.46, 0.7),
        ],
        edges: &[[0, 1], [1, 2], [2, 3], [3, 4]],
    },
    ConstellationTemplate {
        name: "Cygnus",
        stars: &[
            star(0.50, 0.12, 1.0),  // Deneb
            star(0.50, 0.44, 0.85), // Sadr
            star(0.50, 0.88, 0.7),  // Albireo
            star(0.18, 0.52, 0.75),
            star(0.82, 0.38, 0.75),
        ],
        edges: &[[0, 1], [1, 2], [1, 3], [1, 4]],
    },
    ConstellationTemplate {
        name: "Lyra",
        stars: &[
            star(0.28, 0.18, 1.0), // Vega
            star(0.44, 0.34, 0.65),
            star(0.38, 0.60, 0.6),
            star(0.54, 0.76, 0.8), // Sulafat
            star(0.62, 0.50, 0.7), // Sheliak
        ],
        edges: &[[0, 1], [1, 2], [2, 3], [3, 4], [4, 1]],
    },
    ConstellationTemplate {
        name: "Orion",
        stars: &[
            star(0.30, 0.18, 1.0),  // Betelgeuse
            star(0.68, 0.22, 0.8),  // Bellatrix
            star(0.42, 0.50, 0.75), // Alnitak
            star(0.50, 0.52, 0.8),  // Alnilam
            star(0.58, 0.54, 0.75), // Mintaka
            star(0.36, 0.85, 0.7),  // Saiph
            star(0.76, 0.80, 1.0),  // Rigel
        ],
        edges: &[
            [0, 1],
            [0, 2],
            [1, 4],
            [2, 3],
            [3, 4],
            [2, 5],
            [4, 6],
            [5, 6],
        ],
    },
];

#[derive(Debug, Error)]
pub enum ConstellationError {
    #[error("unknown constellation template index {0}")]
    UnknownTemplate(usize),
}

/// One stamped template; members follow template star order. Entries can
/// disappear individually under extreme cap pressure, so edge rendering
/// resolves ids defensively.
#[derive(Clone, Debug)]
pub struct ConstellationInstance {
    pub group: GroupId,
    pub template: usize,
    pub members: Vec<ParticleId>,
    pub age: f32,
}

pub(crate) fn drop_at(
    store: &mut ParticleStore,
    instances: &mut Vec<ConstellationInstance>,
    next_group: &mut GroupId,
    rng: &mut StdRng,
    template: Option<usize>,
    pos: Vec2,
    scale: f32,
) -> Result<GroupId, ConstellationError> {
    let ti = match template {
        Some(i) if i < TEMPLATES.len() => i,
        Some(i) => return Err(ConstellationError::UnknownTemplate(i)),
        None => rng.gen_range(0..TEMPLATES.len()),
    };
    let tpl = &TEMPLATES[ti];
    let gid = *next_group;
    *next_group += 1;

    let world: Vec<Vec2> = tpl
        .stars
        .iter()
        .map(|s| pos + (Vec2::new(s.pos[0], s.pos[1]) - Vec2::splat(0.5)) * scale)
        .collect();
    let centroid = world.iter().copied().sum::<Vec2>() / world.len() as f32;

    let mut members = Vec::with_capacity(world.len());
    for (s, w) in tpl.stars.iter().zip(&world) {
        let id = store.spawn(rng, ParticleKind::ConstellationStar, *w, Vec2::ZERO, Some(gid));
        if let Some(p) = store.particles_mut().last_mut() {
            p.radius = 2.0 + s.magnitude * 1.5;
            p.base_offset = *w - centroid;
        }
        members.push(id);
    }
    instances.push(ConstellationInstance {
        group: gid,
        template: ti,
        members,
        age: 0.0,
    });
    log::info!("dropped constellation '{}' at ({:.0},{:.0})", tpl.name, pos.x, pos.y);

    // oldest groups go wholesale once over the cap
    while instances.len() > MAX_CONSTELLATIONS {
        let gone = instances.remove(0);
        store.particles_mut().retain(|p| p.group != Some(gone.group));
    }
    Ok(gid)
}

/// Cohesion springs pull every star toward its formation slot around the
/// live centroid; empty groups are torn down.
pub(crate) fn update(
    store: &mut ParticleStore,
    instances: &mut Vec<ConstellationInstance>,
    dt: f32,
) {
    let index: FnvHashMap<ParticleId, usize> = store
        .particles()
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();
    instances.retain_mut(|inst| {
        inst.age += dt * TICK_RATE;
        let live: Vec<usize> = inst
            .members
            .iter()
            .filter_map(|id| index.get(id).copied())
            .collect();
        if live.is_empty() {
            return false;
        }
        let centroid = live
            .iter()
            .map(|&i| store.particles()[i].pos)
            .sum::<Vec2>()
            / live.len() as f32;
        for &i in &live {
            let p = &mut store.particles_mut()[i];
            let target = centroid + p.base_offset;
            p.vel += (target - p.pos) * CONSTELLATION_SPRING * dt;
        }
        true
    });
}
