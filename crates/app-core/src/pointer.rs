//! Normalized pointer state: smoothed motion, press state, a bounded trail,
//! and two-finger pinch/twist deltas.
//!
//! The web frontend feeds raw samples in; everything here is platform-free so
//! the smoothing and trail behavior can be tested natively.

use crate::constants::{
    POINTER_GESTURE_DECAY, POINTER_SMOOTHING, POINTER_TRAIL_LIFE, POINTER_TRAIL_MAX, TICK_RATE,
};
use glam::Vec2;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub age: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    pub pos: Vec2,
    /// Exponentially blended velocity, px per frame.
    pub vel: Vec2,
    pub down: bool,
    pub trail: Vec<TrailPoint>,
    /// Accumulated two-finger distance delta, px; relaxes every step.
    pub pinch: f32,
    /// Accumulated two-finger rotation delta, radians; relaxes every step.
    pub twist: f32,
    last: Option<Vec2>,
    pair: Option<(f32, f32)>, // (distance, angle) of the previous two-finger sample
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn press(&mut self, pos: Vec2) {
        self.pos = pos;
        self.last = Some(pos);
        self.vel = Vec2::ZERO;
        self.trail.clear();
        self.down = true;
    }

    pub fn release(&mut self) {
        self.down = false;
        self.pair = None;
    }

    /// Feed one position sample; the caller rate-limits event delivery.
    pub fn sample(&mut self, pos: Vec2) {
        let delta = match self.last {
            Some(last) => pos - last,
            None => Vec2::ZERO,
        };
        self.vel = self.vel * POINTER_SMOOTHING + delta * (1.0 - POINTER_SMOOTHING);
        self.pos = pos;
        self.last = Some(pos);
        if self.down {
            self.trail.push(TrailPoint { pos, age: 0.0 });
            if self.trail.len() > POINTER_TRAIL_MAX {
                self.trail.remove(0);
            }
        }
    }

    /// Feed a two-finger sample; accumulates pinch and twist deltas and
    /// tracks the midpoint as the pointer position.
    pub fn sample_pair(&mut self, a: Vec2, b: Vec2) {
        let span = b - a;
        let dist = span.length();
        let angle = span.y.atan2(span.x);
        if let Some((prev_dist, prev_angle)) = self.pair {
            self.pinch += dist - prev_dist;
            let mut da = angle - prev_angle;
            // unwrap across the +-pi seam
            if da > PI {
                da -= TAU;
            } else if da < -PI {
                da += TAU;
            }
            self.twist += da;
        }
        self.pair = Some((dist, angle));
        self.sample((a + b) * 0.5);
    }

    pub fn end_pair(&mut self) {
        self.pair = None;
    }

    /// Advance trail ages and relax the gesture deltas.
    pub fn step(&mut self, dt: f32) {
        let ticks = dt * TICK_RATE;
        for point in &mut self.trail {
            point.age += ticks;
        }
        self.trail.retain(|point| point.age <= POINTER_TRAIL_LIFE);
        let decay = (1.0 - dt * POINTER_GESTURE_DECAY).max(0.0);
        self.pinch *= decay;
        self.twist *= decay;
    }
}
