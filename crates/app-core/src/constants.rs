// Simulation tuning constants shared by the core passes and the web frontend.
// Distances are in CSS pixels, speeds in px/frame, durations in 60 Hz ticks
// unless noted otherwise.

// Population caps
pub const MAX_NODES: usize = 360; // hard cap across every kind
pub const MAX_PERMANENT: usize = 120;
pub const MAX_SPARKS: usize = 160;
pub const MAX_TRAILS: usize = 60;
pub const MAX_CONSTELLATIONS: usize = 3; // live template groups

// Density-based seeding (surface area per permanent node)
pub const SEED_AREA_DESKTOP: f32 = 22_000.0;
pub const SEED_AREA_MOBILE: f32 = 28_000.0;
pub const SEED_MIN: usize = 24;
pub const SEED_MAX_DESKTOP: usize = 100;
pub const SEED_MAX_MOBILE: usize = 60;

// Pointer force model
pub const ATTRACTION_RADIUS: f32 = 180.0;
pub const REPULSION_RADIUS: f32 = 80.0;
pub const FAST_DRAG_SPEED: f32 = 15.0; // above: explosive repulsion
pub const SLOW_DRAG_SPEED: f32 = 8.0; // below: gentle attraction
pub const REPULSION_FORCE: f32 = 0.8;
pub const REPULSION_SPEED_SCALE: f32 = 0.05;
pub const ATTRACTION_FORCE: f32 = 0.15;
pub const SWIRL_FORCE: f32 = 0.1;
pub const TWIST_SWIRL_GAIN: f32 = 0.6; // two-finger twist contribution

// Ambient drift and integration
pub const DRIFT_JITTER_CALM: f32 = 0.06;
pub const DRIFT_JITTER_LIVE: f32 = 0.1;
pub const FRICTION: f32 = 0.985;
pub const TRAIL_FRICTION: f32 = 0.92;
pub const SCROLL_PARALLAX: f32 = 0.2;

// Boundary containment
pub const EDGE_MARGIN: f32 = 20.0;
pub const EDGE_BOUNCE: f32 = -0.5; // velocity reflection factor at the margin

// Pulse / burst signals
pub const PULSE_IMPULSE_MIN: f32 = 0.05; // radial impulse gate
pub const PULSE_FORCE: f32 = 14.0;
pub const PULSE_SPIRAL: f32 = 0.35; // tangential fraction of the radial shove
pub const BURST_SPAWN_THRESHOLD: f32 = 0.8;
pub const BURST_CLUSTERS: usize = 3;
pub const BURST_CLUSTER_SIZE: usize = 6;
pub const BURST_SPREAD: f32 = 220.0;

// Lifecycle
pub const TICK_RATE: f32 = 60.0; // age/life advance per second
pub const SPARK_LIFE_MIN: f32 = 180.0;
pub const SPARK_LIFE_VAR: f32 = 120.0;
pub const TRAIL_LIFE: f32 = 60.0;
pub const MERGE_AGE: f32 = 60.0; // sparks younger than this never merge
pub const MERGE_DISTANCE: f32 = 15.0;
pub const MERGE_VELOCITY_KEEP: f32 = 0.3;
pub const MERGE_DAMPING: f32 = 0.8;
pub const MERGE_RADIUS_STEP: f32 = 0.1;
pub const MAX_RADIUS: f32 = 6.0;
pub const SCORE_RADIUS_WEIGHT: f32 = 0.5;
pub const SCORE_PERMANENCE_BONUS: f32 = 4.0;

// Quartet clustering
pub const CLUSTER_DISTANCE: f32 = 80.0;
pub const CLUSTER_BREAK_FACTOR: f32 = 1.5;
pub const CLUSTER_ANGULAR_SPEED: f32 = 0.8; // rad/s
pub const VORTEX_GAIN: f32 = 0.4;
pub const VORTEX_TIME_FREQ: f32 = 0.3;
pub const VORTEX_RADIUS_FREQ: f32 = 0.01;

// Dyad coupling
pub const DYAD_ACTIVATE_PULSE: f32 = 0.3;
pub const DYAD_RELEASE_PULSE: f32 = 0.1; // hysteresis: instant teardown below
pub const DYAD_BASE_DISTANCE: f32 = 180.0;
pub const DYAD_DISTANCE_PER_PULSE: f32 = 100.0;
pub const DYAD_WAVE_RATE: f32 = 2.0; // wave-time advance per second
pub const DYAD_WAVE_RATE_PULSE: f32 = 3.0; // extra advance per unit pulse
pub const DYAD_FORCE: f32 = 9.0;
pub const DYAD_AXIAL_FORCE: f32 = 2.5;
pub const DYAD_AMP_MIN: f32 = 6.0;
pub const DYAD_AMP_VAR: f32 = 6.0;

// Connective links
pub const LINK_DIST_MIN: f32 = 130.0;
pub const LINK_DIST_MAX: f32 = 230.0;
pub const LINK_DIST_WIDTH_FRACTION: f32 = 0.18;
pub const LINK_LIVE_SCALE: f32 = 1.15;
pub const LINK_BASE_ALPHA: f32 = 0.07;
pub const LINK_LIVE_BOOST: f32 = 1.2;
pub const LINK_PULSE_BOOST: f32 = 0.8;

// Pointer tracking and interaction spawning
pub const POINTER_TRAIL_MAX: usize = 50;
pub const POINTER_TRAIL_LIFE: f32 = 30.0;
pub const POINTER_SMOOTHING: f32 = 0.7; // old-velocity weight in the blend
pub const POINTER_GESTURE_DECAY: f32 = 4.0; // pinch/twist relaxation, 1/s
pub const TRAIL_SPAWN_SPEED: f32 = 3.0;
pub const SPARK_SPAWN_SPEED: f32 = 20.0;
pub const RELEASE_SPAWN_SPEED: f32 = 5.0;
pub const RELEASE_SPAWN_MAX: usize = 20;
pub const PRESS_RING_COUNT: usize = 8;
pub const DRAG_RING_COUNT: usize = 3;

// Constellations
pub const CONSTELLATION_SPRING: f32 = 1.6; // cohesion pull toward the formation slot, 1/s
