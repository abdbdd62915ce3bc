use crate::constants::{FRICTION, TRAIL_FRICTION};
use glam::Vec2;

/// Monotonic particle identifier, unique within one engine.
pub type ParticleId = u32;
/// Shared id for quartet and constellation membership.
pub type GroupId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Structural backbone of the field; never expires.
    Permanent,
    /// Short-lived interaction particle; may merge into a permanent node.
    Spark,
    /// Very short-lived dot tracing the pointer path.
    Trail,
    /// Member of a named constellation instance; lives as long as its group.
    ConstellationStar,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: Vec2,
    /// Velocity in px per frame.
    pub vel: Vec2,
    pub radius: f32,
    pub kind: ParticleKind,
    /// Remaining ticks for expiring kinds; untouched otherwise.
    pub life: f32,
    /// Ticks since spawn.
    pub age: f32,
    /// Small per-particle offset folded into the warm color channel.
    pub hue_shift: f32,
    pub group: Option<GroupId>,
    /// Offset from the group centroid at formation time.
    pub base_offset: Vec2,
    /// Connective lines recorded by the last link pass.
    pub link_count: u16,
    /// Accumulated merge bonus feeding the structural score.
    pub bond_bonus: f32,
}

impl Particle {
    #[inline]
    pub fn expires(&self) -> bool {
        matches!(self.kind, ParticleKind::Spark | ParticleKind::Trail)
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        if self.kind == ParticleKind::Trail {
            TRAIL_FRICTION
        } else {
            FRICTION
        }
    }

    /// Whether this particle participates in generic connective lines.
    #[inline]
    pub fn links_connectable(&self) -> bool {
        !matches!(
            self.kind,
            ParticleKind::Trail | ParticleKind::ConstellationStar
        )
    }
}
