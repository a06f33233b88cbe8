//! Single source of truth for shared spreading constants.

/// Maximum charge a single cursor may carry.
pub const MAX_CHARGE: u32 = 1000;

/// Maximum number of simultaneously active cursors per spreader.
pub const MAX_CURSORS: usize = 32;

/// Upper bound of a cursor's decay delay.
pub const MAX_CURSOR_DECAY_DELAY: u8 = 1;

/// Chebyshev distance from the origin beyond which a cursor is discarded.
pub const MAX_CURSOR_DISTANCE: i32 = 1024;

/// Horizontal radius a world-generation cursor may wander from its origin.
pub const WORLD_GEN_HORIZONTAL_RADIUS: i32 = 15;

/// Radius over which the sculk decay penalty ramps from zero to full.
pub const MAX_GROWTH_RATE_RADIUS: u32 = 24;

/// One in this many growths placed by sculk is a shrieker rather than a sensor.
pub const SHRIEKER_PLACEMENT_RATE: u32 = 11;

/// Maximum number of sensors/shriekers tolerated near a growth site.
pub const MAX_NEARBY_GROWTHS: u32 = 2;

/// Divisor applied to `ln(1 + charge)` when computing spread particle density.
pub const PARTICLE_DENSITY_DIVISOR: f64 = 2.3;

/// Side length of a chunk in blocks.
pub const CHUNK_SIZE: u32 = 16;

/// Total blocks per chunk (16^3).
pub const BLOCKS_PER_CHUNK: u32 = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Consecutive idle ticks before an active chunk goes to sleep.
pub const CHUNK_SLEEP_TICKS: u32 = 600;
