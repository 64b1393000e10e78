//! Kinematic integration system.
//!
//! Updates Position from Velocity each fixed step: position += velocity * dt.
//! Dead characters never move.

use glam::DVec2;
use hecs::{Entity, World};

use survivor_core::combat::CombatEntity;
use survivor_core::types::{Position, Velocity};

/// Integrate every living character with Position + Velocity.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pos, vel, combat)) in
        world.query_mut::<(&mut Position, &Velocity, &CombatEntity)>()
    {
        if combat.is_dead() {
            continue;
        }
        pos.0 += vel.0 * dt;
    }
}

/// Turn the movement input into the player's velocity.
/// The input is normalized, so diagonal movement isn't faster.
pub fn apply_player_input(world: &mut World, player: Entity, input: DVec2) {
    let speed = match world.get::<&CombatEntity>(player) {
        Ok(combat) if !combat.is_dead() => combat.move_speed,
        _ => 0.0,
    };
    if let Ok(mut vel) = world.get::<&mut Velocity>(player) {
        vel.0 = input.normalize_or_zero() * speed;
    }
}
