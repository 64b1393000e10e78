//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running yet.
    #[default]
    MainMenu,
    /// Systems run every tick.
    Active,
    /// Time frozen; commands still processed.
    Paused,
    /// The player died. Terminal until a new session is started.
    GameOver,
}

/// Enemy behaviour phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Moving toward the player.
    #[default]
    Chase,
    /// Inside attack range, stationary, striking on cooldown.
    Attack,
    /// Dead, awaiting removal.
    Dead,
}

/// Wave spawner timer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnerState {
    /// Timer frozen.
    #[default]
    Idle,
    /// Timer advancing; waves spawn on each boundary.
    Spawning,
}

/// Result of applying damage to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    /// Health reduced, target still alive.
    Damaged,
    /// This hit caused the Alive -> Dead transition.
    Killed,
}
