//! Events emitted by the simulation for UI, audio and render feedback.

use serde::{Deserialize, Serialize};

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A projectile left the weapon.
    ProjectileFired { projectile: u32, target_id: u64 },
    /// A projectile's time-to-live ran out without contact.
    ProjectileExpired { projectile: u32 },
    EnemyHit {
        enemy_id: u64,
        damage: f64,
        remaining_health: f64,
    },
    EnemyKilled { enemy_id: u64, experience: u32 },
    PlayerDamaged { damage: f64, remaining_health: f64 },
    PlayerDied,
    WaveSpawned { wave: u32, count: u32 },
    ExperienceGained { experience: u32, required: u32 },
    LevelUp { level: u32 },
}

/// Visual effect handed to the render collaborator when due.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualEffect {
    /// Start (`on = true`) or end a damage tint on an entity.
    HitFlash { entity_id: u64, on: bool },
}

/// An effect waiting for its fire time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEffect {
    pub fire_at: f64,
    pub effect: VisualEffect,
}
