//! Simulation engine for SURVIVOR.
//!
//! Owns the hecs ECS world and the projectile pool, runs systems on a fixed
//! physics step plus a per-frame logic step, and produces
//! `GameStateSnapshot`s for collaborators.

pub mod effects;
pub mod engine;
pub mod pool;
pub mod progression;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use survivor_core as core;

#[cfg(test)]
mod tests;
