//! Entity spawn factories.
//!
//! Creates the player and enemy entities with their component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;

use survivor_core::combat::CombatEntity;
use survivor_core::components::*;
use survivor_core::config::{EnemyConfig, PlayerConfig};
use survivor_core::constants::{ENEMY_BASE_DAMAGE, ENEMY_BASE_HEALTH, ENEMY_BASE_SPEED};
use survivor_core::enums::EnemyBehavior;
use survivor_core::types::{Position, Velocity};

use crate::systems::wave_spawner::WaveStats;

/// Spawn the player character at `position`.
pub fn spawn_player(world: &mut World, config: &PlayerConfig, position: DVec2) -> Entity {
    world.spawn((
        Player,
        Position(position),
        Velocity::default(),
        CombatEntity::new(config.max_health, 0.0, 0.0, config.move_speed),
        Collider {
            radius: config.radius,
        },
    ))
}

/// Spawn one enemy at `position` and initialise it with wave-scaled stats.
pub fn spawn_enemy(
    world: &mut World,
    position: DVec2,
    stats: WaveStats,
    config: &EnemyConfig,
    spawn_order: u64,
) -> Entity {
    let mut combat = CombatEntity::new(
        ENEMY_BASE_HEALTH,
        ENEMY_BASE_DAMAGE,
        config.attack_cooldown,
        ENEMY_BASE_SPEED,
    );
    combat.set_stats(stats.health, stats.damage, stats.speed);

    world.spawn((
        Enemy {
            experience_value: config.experience_value,
            behavior: EnemyBehavior::Chase,
            attack_range: config.attack_range,
        },
        SpawnOrder(spawn_order),
        Position(position),
        Velocity::default(),
        combat,
        Collider {
            radius: config.radius,
        },
    ))
}

/// A point sampled uniformly on the circle of `radius` around `center`.
pub fn spawn_position_around(rng: &mut impl Rng, center: DVec2, radius: f64) -> DVec2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    center + DVec2::new(angle.cos(), angle.sin()) * radius
}
