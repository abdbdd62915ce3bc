// Frontend tuning constants for the scheduler, signals, and DOM wiring.

pub const CANVAS_ID: &str = "field-canvas";
pub const STAT_PARTICLES_ID: &str = "stat-particles";
pub const STAT_LINKS_ID: &str = "stat-links";

// Scheduler
pub const DT_MAX: f32 = 0.05; // clamp so a backgrounded tab cannot step far
pub const POINTER_THROTTLE_MS: f64 = 16.0; // decouple input sampling from the frame rate
pub const RESIZE_DEBOUNCE_MS: i32 = 100;

// Backing-store sizing
pub const DPR_MAX: f64 = 2.0;
pub const DPR_MAX_MOBILE: f64 = 1.5;
pub const MOBILE_WIDTH: f64 = 768.0;
pub const MIN_DIM: f64 = 100.0;
pub const MAX_DIM: f64 = 4096.0;

// External signal decay (per second)
pub const PULSE_DECAY_PER_SEC: f32 = 0.75;
pub const BURST_DECAY_PER_SEC: f32 = 0.44;

// Constellation drop footprint, px
pub const DROP_SCALE: f32 = 140.0;
