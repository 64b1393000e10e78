//! Game state snapshot: the complete visible state handed to collaborators
//! after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, VisualEffect};
use crate::types::{Position, SimTime};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub wave: WaveView,
    pub pool: PoolView,
    pub progression: ProgressionView,
    pub events: Vec<GameEvent>,
    pub effects: Vec<VisualEffect>,
    pub score: ScoreView,
}

/// The player character, for the health display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub current_health: f64,
    pub max_health: f64,
    pub is_dead: bool,
}

/// A live or dying enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u64,
    pub position: Position,
    pub current_health: f64,
    pub max_health: f64,
    pub behavior: EnemyBehavior,
    pub is_dead: bool,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub index: u32,
    pub position: Position,
    /// Heading in radians, counter-clockwise from +x.
    pub rotation: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub current_wave: u32,
    pub state: SpawnerState,
    pub enemies_alive: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoolView {
    pub size: u32,
    pub active: u32,
    pub free: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionView {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
}

/// Running totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub projectiles_fired: u32,
    pub survival_time_secs: f64,
}
