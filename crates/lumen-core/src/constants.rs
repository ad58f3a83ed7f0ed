//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- World bounds ---

/// Entities beyond this distance from the origin are despawned.
pub const WORLD_HALF_EXTENT: f32 = 100.0;

// --- Beam ---

/// Number of rays synthesized per tick.
pub const BEAM_RAY_COUNT: u32 = 100;

/// Spread of ray start points across the emitting face (world units).
pub const BEAM_APERTURE: f32 = 45.0;

/// Maximum number of reflection expansions per tick. This bound is what
/// keeps cyclic mirror arrangements (two facing mirrors) from looping
/// forever, so it must always be enforced.
pub const MAX_REFLECTIONS: u32 = 3;

/// Offset applied along the surface normal and the reflected direction when
/// spawning a reflected ray, so it cannot re-intersect the reflecting
/// surface at distance zero.
pub const REFLECTION_ORIGIN_OFFSET: f32 = 0.01;

/// Exponential rate at which live beam parameters settle toward the
/// equipped preset (per second).
pub const PRESET_SETTLE_RATE: f32 = 10.0;

/// Fraction of the shortest angular arc the flashlight rotates toward its
/// aim point each tick.
pub const AIM_SMOOTHING: f32 = 0.03;

// --- Player ---

/// Player collider radius.
pub const PLAYER_RADIUS: f32 = 0.5;

// --- Enemies ---

/// Enemy health pool. The beam drains one point per tick of full exposure.
pub const ENEMY_MAX_HEALTH: f32 = 5.0;

/// Enemy patrol speed (m/s).
pub const ENEMY_BASE_SPEED: f32 = 2.0;

/// Speed multiplier while chasing the player.
pub const ENEMY_CHASE_FACTOR: f32 = 1.3;

/// Range within which an enemy notices the player.
pub const ENEMY_DETECTION_RANGE: f32 = 6.0;

/// Enemy collider radius.
pub const ENEMY_RADIUS: f32 = 0.45;

/// Distance of the forward wall probe.
pub const WALL_CHECK_DISTANCE: f32 = 0.8;

/// Distance to a blocking wall below which a chasing enemy slows down
/// while its teleport winds up.
pub const ENEMY_SLOW_DISTANCE: f32 = 2.0;

/// Speed multiplier applied while slowed.
pub const ENEMY_SLOW_FACTOR: f32 = 0.5;

/// Seconds a chasing enemy must be held at a wall before it teleports past.
pub const TELEPORT_COOLDOWN: f32 = 1.2;

/// How far beyond the blocking surface a teleport lands.
pub const TELEPORT_CLEARANCE: f32 = 1.0;

// --- Boss ---

/// Boss health pool.
pub const BOSS_MAX_HEALTH: f32 = 40.0;

/// Seconds between weak point rotations.
pub const WEAKPOINT_CHANGE_INTERVAL: f32 = 6.0;

/// Weak point collider radius.
pub const WEAKPOINT_RADIUS: f32 = 0.4;

// --- Spawning ---

/// Seconds between spawn attempts per spawn area.
pub const SPAWN_INTERVAL: f32 = 4.0;

/// Global cap on live enemies.
pub const MAX_ENEMIES: u32 = 4;
