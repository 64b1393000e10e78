//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` plus the engine-owned state
//! they need. Fixed-step systems (projectiles, movement) run first, then the
//! per-frame ones (enemy AI, weapon, spawner, cleanup).

pub mod cleanup;
pub mod damage;
pub mod enemy_ai;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
pub mod weapon;
