//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible host/player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Spawn the player and start spawning waves.
    StartSession,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal). Used by the host loop for pacing.
    SetTimeScale { scale: f64 },

    // --- Movement (from the input collaborator) ---
    /// Desired movement direction; normalized by the engine.
    SetMoveInput { x: f64, y: f64 },

    // --- Waves ---
    StartSpawning,
    StopSpawning,
    /// Back to wave 0 with the timer primed.
    ResetWaves,

    // --- Progression ---
    ResetProgression,
}
