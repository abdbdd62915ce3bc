//! Constellation-field simulation core shared with the web frontend.
//!
//! Platform-free: surface interaction arrives through [`FieldEngine`] calls
//! and the per-frame [`FrameInput`] snapshot, so every pass is natively
//! testable.

pub mod cluster;
pub mod constants;
pub mod constellation;
pub mod dyad;
pub mod engine;
mod forces;
pub mod particle;
pub mod pointer;
pub mod store;
pub mod theme;

pub use cluster::Quartet;
pub use constellation::{
    ConstellationError, ConstellationInstance, ConstellationTemplate, TemplateStar, TEMPLATES,
};
pub use dyad::{wave_profile, Dyad};
pub use engine::{FieldEngine, FrameInput, FrameStats, Link};
pub use particle::{GroupId, Particle, ParticleId, ParticleKind};
pub use pointer::{PointerTracker, TrailPoint};
pub use store::ParticleStore;
pub use theme::{Backdrop, Mode, Theme};
