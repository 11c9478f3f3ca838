// World scale

/// Edge length of one map tile, in world units
pub const TILE_SIZE: f32 = 1.0;

// Timing

/// Fixed duration of one simulated frame, in seconds
pub const SIMULATION_PERIOD_S: f32 = 1.0 / 60.0;

/// Number of frames between sampling local input and the frame it is stamped
/// for. Masks one-way latency to the server.
pub const CLIENT_INPUT_DELAY: u32 = 3;

/// Window size of the diagnostic running averages (three seconds of frames)
pub const DIAGNOSTIC_WINDOW: usize = 3 * 60;

// Spatial index

pub const QUADTREE_MAX_ITEMS: usize = 8;

// Tanks

pub const TANK_SPEED: f32 = 3.0 * TILE_SIZE;
pub const TANK_ROT_SPEED: f32 = std::f32::consts::PI;
pub const PLAYER_HEALTH: f32 = 10.0;

// Weapons

/// Minimum number of frames between two shots of the same shooter
pub const SHOOTER_COOLDOWN_FRAMES: u32 = 15;
pub const BULLET_SPAWN_OFFSET: f32 = TILE_SIZE * 0.25;
pub const BULLET_DAMAGE: f32 = 1.0;

pub const STANDARD_BULLET_SPEED: f32 = 15.0 * TILE_SIZE;
pub const STANDARD_BULLET_RANGE: f32 = 8.0 * TILE_SIZE;

pub const ROCKET_INITIAL_SPEED: f32 = 3.0;
pub const ROCKET_RANGE: f32 = 12.0 * TILE_SIZE;
/// Seconds after launch at which a rocket ignites its booster
pub const ROCKET_BOOST_TIME: f32 = 0.5;
pub const ROCKET_LAUNCH_ACCELERATION: f32 = 3.0;
pub const ROCKET_BOOST_ACCELERATION: f32 = 50.0;

pub const MORTAR_SPEED: f32 = 6.0 * TILE_SIZE;
pub const MORTAR_RANGE: f32 = 10.0 * TILE_SIZE;

pub const EXPLOSION_RADIUS: f32 = 0.75 * TILE_SIZE;
pub const EXPLOSION_DAMAGE: f32 = 2.0;
/// Frames an explosion stays live when it damages nothing
pub const EXPLOSION_FRAMES: u32 = 2;

// Turrets

pub const TURRET_HEALTH: f32 = 4.0;
pub const TURRET_RANGE: f32 = 6.0 * TILE_SIZE;
pub const TURRET_ROT_SPEED: f32 = std::f32::consts::FRAC_PI_2;
pub const TURRET_COOLDOWN_S: f32 = 1.0;
/// Turrets only fire when aimed within this many radians of their target
pub const TURRET_FIRING_ARC: f32 = 0.05;

// Scenery

pub const WALL_HEALTH: f32 = 4.0;
pub const TREE_HEALTH: f32 = 0.1;

// Builders

pub const BUILDER_SPEED: f32 = 4.0 * TILE_SIZE;
/// Distance at which a builder counts as having reached its destination
pub const BUILDER_ARRIVAL_RADIUS: f32 = 0.1 * TILE_SIZE;
pub const HARVEST_DAMAGE: f32 = 1.0;
pub const WALL_COST: u32 = 1;
pub const TURRET_COST: u32 = 3;

// Emitters

pub const ROCKET_EXHAUST_TTL: f32 = 5.0;
pub const EXPLOSION_EMITTER_TTL: f32 = 0.5;
