//! Per-frame force field: pointer speed regimes, ambient drift, pulse
//! impulses, friction, integration, and boundary containment.

use crate::constants::{
    ATTRACTION_FORCE, ATTRACTION_RADIUS, DRIFT_JITTER_CALM, DRIFT_JITTER_LIVE, EDGE_BOUNCE,
    EDGE_MARGIN, FAST_DRAG_SPEED, PULSE_FORCE, PULSE_IMPULSE_MIN, PULSE_SPIRAL, REPULSION_FORCE,
    REPULSION_RADIUS, REPULSION_SPEED_SCALE, SCROLL_PARALLAX, SLOW_DRAG_SPEED, SWIRL_FORCE,
    TWIST_SWIRL_GAIN,
};
use crate::engine::FrameInput;
use crate::particle::ParticleKind;
use crate::pointer::PointerTracker;
use crate::store::ParticleStore;
use glam::Vec2;
use rand::prelude::*;

pub(crate) fn apply(
    store: &mut ParticleStore,
    pointer: &PointerTracker,
    input: &FrameInput,
    rng: &mut StdRng,
    bounds: Vec2,
    dt: f32,
) {
    let speed = pointer.speed();
    let drag_sign = if pointer.vel.x >= 0.0 { 1.0 } else { -1.0 };
    let jitter = if input.mode.is_live() {
        DRIFT_JITTER_LIVE
    } else {
        DRIFT_JITTER_CALM
    };
    let center = bounds * 0.5;
    let pulse_on = input.pulse > PULSE_IMPULSE_MIN;
    let scroll_factor = 1.0 + input.scroll * SCROLL_PARALLAX;

    for p in store.particles_mut() {
        // pointer influence while pressed
        if pointer.down {
            let offset = p.pos - pointer.pos;
            let dist = offset.length();
            if dist > 0.0 && dist < ATTRACTION_RADIUS {
                let dir = offset / dist;
                if speed > FAST_DRAG_SPEED && dist < REPULSION_RADIUS {
                    // fast drag: explosive repulsion
                    let force = (1.0 - dist / REPULSION_RADIUS) * REPULSION_FORCE;
                    p.vel += dir * force * speed * REPULSION_SPEED_SCALE;
                } else if speed < SLOW_DRAG_SPEED {
                    // slow drag: gravitational pull
                    let force = (1.0 - dist / ATTRACTION_RADIUS) * ATTRACTION_FORCE;
                    p.vel -= dir * force;
                } else {
                    // medium speed: swirl, signed by horizontal drag direction
                    let force = (1.0 - dist / ATTRACTION_RADIUS) * SWIRL_FORCE;
                    p.vel += Vec2::new(dir.y, -dir.x) * force * drag_sign;
                }
                if pointer.twist.abs() > 1e-3 {
                    let force = (1.0 - dist / ATTRACTION_RADIUS) * TWIST_SWIRL_GAIN * pointer.twist;
                    p.vel += Vec2::new(-dir.y, dir.x) * force;
                }
            }
        }

        // ambient drift keeps permanent nodes from going visually stale
        if p.kind == ParticleKind::Permanent {
            p.vel += Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * jitter * dt;
        }

        // pulse: radial shove away from the surface center, with a spiral lean
        if pulse_on {
            let dir = (p.pos - center).normalize_or_zero();
            let spiral = Vec2::new(-dir.y, dir.x) * PULSE_SPIRAL;
            p.vel += (dir + spiral) * input.pulse * PULSE_FORCE * dt;
        }

        // friction once per frame, then integrate with the scroll parallax
        p.vel *= p.friction();
        p.pos += p.vel * scroll_factor;

        // soft boundary bounce
        if p.pos.x < EDGE_MARGIN {
            p.pos.x = EDGE_MARGIN;
            p.vel.x *= EDGE_BOUNCE;
        } else if p.pos.x > bounds.x - EDGE_MARGIN {
            p.pos.x = bounds.x - EDGE_MARGIN;
            p.vel.x *= EDGE_BOUNCE;
        }
        if p.pos.y < EDGE_MARGIN {
            p.pos.y = EDGE_MARGIN;
            p.vel.y *= EDGE_BOUNCE;
        } else if p.pos.y > bounds.y - EDGE_MARGIN {
            p.pos.y = bounds.y - EDGE_MARGIN;
            p.vel.y *= EDGE_BOUNCE;
        }
    }
}
