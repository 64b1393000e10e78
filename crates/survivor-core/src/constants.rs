//! Simulation constants and tuning defaults.

/// Fixed physics tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per fixed tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest frame delta accepted by the variable-step entry point.
/// Longer frames are clamped to avoid a catch-up spiral.
pub const MAX_FRAME_DT: f64 = 0.25;

// --- Player ---

pub const PLAYER_MAX_HEALTH: f64 = 10.0;

pub const PLAYER_MOVE_SPEED: f64 = 5.0;

pub const PLAYER_RADIUS: f64 = 0.5;

// --- Weapon ---

/// Seconds between shots.
pub const WEAPON_FIRE_RATE: f64 = 1.0;

pub const WEAPON_DETECTION_RANGE: f64 = 10.0;

pub const BULLET_SPEED: f64 = 10.0;

pub const BULLET_DAMAGE: f64 = 1.0;

/// Seconds a projectile stays in flight before it is reclaimed.
pub const BULLET_LIFETIME: f64 = 5.0;

pub const BULLET_RADIUS: f64 = 0.1;

// --- Projectile pool ---

pub const PROJECTILE_POOL_SIZE: usize = 20;

// --- Enemies ---

pub const ENEMY_BASE_HEALTH: f64 = 3.0;

pub const ENEMY_BASE_DAMAGE: f64 = 1.0;

pub const ENEMY_BASE_SPEED: f64 = 3.0;

pub const ENEMY_ATTACK_COOLDOWN: f64 = 0.5;

pub const ENEMY_ATTACK_RANGE: f64 = 1.0;

pub const ENEMY_EXPERIENCE_VALUE: u32 = 1;

pub const ENEMY_RADIUS: f64 = 0.5;

/// Delay between an enemy's death and its removal from the world.
pub const DEATH_REMOVAL_DELAY: f64 = 0.2;

/// Duration of the hit flash scheduled when an enemy takes damage.
pub const HIT_FLASH_DURATION: f64 = 0.1;

// --- Waves ---

pub const ENEMIES_PER_WAVE: u32 = 5;

/// Seconds between wave boundaries.
pub const SPAWN_INTERVAL: f64 = 3.0;

pub const SPAWN_RADIUS: f64 = 10.0;

pub const WAVE_HEALTH_MULTIPLIER: f64 = 1.1;

pub const WAVE_DAMAGE_MULTIPLIER: f64 = 1.1;

pub const WAVE_SPEED_MULTIPLIER: f64 = 1.05;

// --- Progression ---

pub const BASE_EXPERIENCE_REQUIRED: u32 = 10;

pub const HEALTH_INCREASE_PER_LEVEL: f64 = 3.0;
