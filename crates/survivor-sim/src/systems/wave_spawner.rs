//! Wave spawning system: spawns escalating enemy waves around the player.
//!
//! Difficulty scales multiplicatively: a stat at wave `n` is
//! `base * multiplier^(n - 1)`.

use glam::DVec2;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use survivor_core::config::{EnemyConfig, WaveConfig};
use survivor_core::enums::SpawnerState;
use survivor_core::events::GameEvent;

use crate::world_setup::{spawn_enemy, spawn_position_around};

/// Enemy stats for one wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStats {
    pub health: f64,
    pub damage: f64,
    pub speed: f64,
}

/// Timer-driven wave spawner.
#[derive(Debug, Clone)]
pub struct WaveSpawner {
    config: WaveConfig,
    enemy: EnemyConfig,
    state: SpawnerState,
    /// Number of the most recently spawned wave; 0 before the first.
    wave: u32,
    /// Seconds since the last wave boundary.
    elapsed_since_spawn: f64,
}

impl WaveSpawner {
    /// A new, idle spawner. The timer starts primed, so the first wave
    /// spawns on the first tick after `start_spawning`.
    pub fn new(config: WaveConfig, enemy: EnemyConfig) -> Self {
        let elapsed_since_spawn = config.spawn_interval;
        Self {
            config,
            enemy,
            state: SpawnerState::Idle,
            wave: 0,
            elapsed_since_spawn,
        }
    }

    pub fn start_spawning(&mut self) {
        self.state = SpawnerState::Spawning;
    }

    /// Freeze the timer. Wave number and timer phase are kept.
    pub fn stop_spawning(&mut self) {
        self.state = SpawnerState::Idle;
    }

    /// Back to wave 0 with the timer primed. Running state is kept.
    pub fn reset(&mut self) {
        self.wave = 0;
        self.elapsed_since_spawn = self.config.spawn_interval;
    }

    /// The wave most recently spawned (1 before the first spawn).
    pub fn current_wave(&self) -> u32 {
        self.wave.max(1)
    }

    pub fn state(&self) -> SpawnerState {
        self.state
    }

    pub fn is_spawning(&self) -> bool {
        self.state == SpawnerState::Spawning
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn enemy_config(&self) -> &EnemyConfig {
        &self.enemy
    }

    /// Scaled enemy stats for wave `wave` (1-based).
    pub fn scaled_stats(&self, wave: u32) -> WaveStats {
        let exponent = wave.saturating_sub(1) as i32;
        WaveStats {
            health: self.config.base_health * self.config.health_multiplier.powi(exponent),
            damage: self.config.base_damage * self.config.damage_multiplier.powi(exponent),
            speed: self.config.base_speed * self.config.speed_multiplier.powi(exponent),
        }
    }

    /// Advance the timer by `dt`. Returns the new wave number when a wave
    /// boundary is crossed. Does nothing while idle.
    pub fn advance(&mut self, dt: f64) -> Option<u32> {
        if self.state == SpawnerState::Idle {
            return None;
        }
        self.elapsed_since_spawn += dt;
        if self.elapsed_since_spawn < self.config.spawn_interval {
            return None;
        }
        self.elapsed_since_spawn = 0.0;
        self.wave += 1;
        Some(self.wave)
    }
}

/// Run the spawner for one frame. Without a player there is no spawn
/// center, so the timer does not advance.
pub fn run(
    world: &mut World,
    spawner: &mut WaveSpawner,
    rng: &mut ChaCha8Rng,
    center: Option<DVec2>,
    next_spawn_order: &mut u64,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    let Some(center) = center else {
        return;
    };
    let Some(wave) = spawner.advance(dt) else {
        return;
    };

    let stats = spawner.scaled_stats(wave);
    let count = spawner.config.enemies_per_wave;
    for _ in 0..count {
        let position = spawn_position_around(rng, center, spawner.config.spawn_radius);
        spawn_enemy(world, position, stats, &spawner.enemy, *next_spawn_order);
        *next_spawn_order += 1;
    }

    log::info!(
        "wave {wave}: {count} enemies (health {:.2}, damage {:.2}, speed {:.2})",
        stats.health,
        stats.damage,
        stats.speed
    );
    events.push(GameEvent::WaveSpawned { wave, count });
}
