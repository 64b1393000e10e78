//! Tunables for a session.
//!
//! Every value has a default taken from [`constants`](crate::constants).
//! All structs deserialize with `#[serde(default)]`, so a host can override a
//! single field from JSON. Validation runs once at setup; the running
//! simulation assumes a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// A setup-time precondition that a config failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be greater than 1.0, got {value}")]
    MultiplierTooSmall { field: &'static str, value: f64 },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // `!(value > 0.0)` also rejects NaN.
    if !(value > 0.0) {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

fn multiplier(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(value > 1.0) {
        return Err(ConfigError::MultiplierTooSmall { field, value });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f64,
    pub move_speed: f64,
    pub radius: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            move_speed: PLAYER_MOVE_SPEED,
            radius: PLAYER_RADIUS,
        }
    }
}

/// Auto-fire weapon tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Seconds between shots.
    pub fire_rate: f64,
    pub detection_range: f64,
    pub bullet_speed: f64,
    pub bullet_damage: f64,
    /// Projectile time-to-live in seconds.
    pub bullet_lifetime: f64,
    pub bullet_radius: f64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_rate: WEAPON_FIRE_RATE,
            detection_range: WEAPON_DETECTION_RANGE,
            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            bullet_lifetime: BULLET_LIFETIME,
            bullet_radius: BULLET_RADIUS,
        }
    }
}

/// Per-enemy constants that waves don't scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub attack_cooldown: f64,
    pub attack_range: f64,
    pub experience_value: u32,
    pub radius: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            attack_range: ENEMY_ATTACK_RANGE,
            experience_value: ENEMY_EXPERIENCE_VALUE,
            radius: ENEMY_RADIUS,
        }
    }
}

/// Wave timing and difficulty scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub enemies_per_wave: u32,
    pub spawn_interval: f64,
    pub spawn_radius: f64,
    pub base_health: f64,
    pub base_damage: f64,
    pub base_speed: f64,
    pub health_multiplier: f64,
    pub damage_multiplier: f64,
    pub speed_multiplier: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enemies_per_wave: ENEMIES_PER_WAVE,
            spawn_interval: SPAWN_INTERVAL,
            spawn_radius: SPAWN_RADIUS,
            base_health: ENEMY_BASE_HEALTH,
            base_damage: ENEMY_BASE_DAMAGE,
            base_speed: ENEMY_BASE_SPEED,
            health_multiplier: WAVE_HEALTH_MULTIPLIER,
            damage_multiplier: WAVE_DAMAGE_MULTIPLIER,
            speed_multiplier: WAVE_SPEED_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Projectiles constructed up front.
    pub initial_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_size: PROJECTILE_POOL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub base_experience_required: u32,
    pub health_increase_per_level: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_experience_required: BASE_EXPERIENCE_REQUIRED,
            health_increase_per_level: HEALTH_INCREASE_PER_LEVEL,
        }
    }
}

/// All gameplay tunables for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub waves: WaveConfig,
    pub pool: PoolConfig,
    pub progression: ProgressionConfig,
}

impl GameTuning {
    /// Check every setup-time precondition. Returns the first failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.max_health", self.player.max_health)?;
        positive("player.move_speed", self.player.move_speed)?;
        positive("player.radius", self.player.radius)?;

        positive("weapon.fire_rate", self.weapon.fire_rate)?;
        positive("weapon.detection_range", self.weapon.detection_range)?;
        positive("weapon.bullet_speed", self.weapon.bullet_speed)?;
        positive("weapon.bullet_damage", self.weapon.bullet_damage)?;
        positive("weapon.bullet_lifetime", self.weapon.bullet_lifetime)?;
        positive("weapon.bullet_radius", self.weapon.bullet_radius)?;

        positive("enemy.attack_cooldown", self.enemy.attack_cooldown)?;
        positive("enemy.attack_range", self.enemy.attack_range)?;
        positive("enemy.radius", self.enemy.radius)?;

        if self.waves.enemies_per_wave == 0 {
            return Err(ConfigError::Zero {
                field: "waves.enemies_per_wave",
            });
        }
        positive("waves.spawn_interval", self.waves.spawn_interval)?;
        positive("waves.spawn_radius", self.waves.spawn_radius)?;
        positive("waves.base_health", self.waves.base_health)?;
        positive("waves.base_damage", self.waves.base_damage)?;
        positive("waves.base_speed", self.waves.base_speed)?;
        multiplier("waves.health_multiplier", self.waves.health_multiplier)?;
        multiplier("waves.damage_multiplier", self.waves.damage_multiplier)?;
        multiplier("waves.speed_multiplier", self.waves.speed_multiplier)?;

        if self.progression.base_experience_required == 0 {
            return Err(ConfigError::Zero {
                field: "progression.base_experience_required",
            });
        }
        Ok(())
    }
}
