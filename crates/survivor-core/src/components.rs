//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems; the one
//! exception is [`CombatEntity`](crate::combat::CombatEntity), whose state
//! machine is shared by every damage source.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyBehavior;

/// Marks the player character.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Enemy-only data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Experience granted to the player on death.
    pub experience_value: u32,
    pub behavior: EnemyBehavior,
    /// Distance at which the enemy stops and strikes.
    pub attack_range: f64,
}

/// Monotonic spawn sequence number. Systems that scan enemies iterate in
/// this order so tie-breaks are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Circular contact bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

// Position and Velocity (types.rs) are also used as components.
