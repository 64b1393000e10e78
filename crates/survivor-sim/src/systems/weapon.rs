//! Auto-fire weapon. Once the cooldown has elapsed it acquires the nearest
//! target and launches a pooled projectile at it.
//!
//! The cooldown is measured in sim time, not frames.

use glam::DVec2;
use hecs::{Entity, World};

use survivor_core::combat::CombatEntity;
use survivor_core::config::WeaponConfig;
use survivor_core::events::GameEvent;
use survivor_core::types::Position;

use crate::pool::{ProjectileHandle, ProjectilePool};
use crate::progression::ScoreState;
use crate::systems::targeting::{collect_enemy_candidates, find_nearest, Candidate, Target};

/// A projectile that was just launched.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub handle: ProjectileHandle,
    pub target: Target,
}

/// Fire loop state for the player's weapon.
#[derive(Debug, Clone)]
pub struct WeaponFireController {
    config: WeaponConfig,
    next_fire_time: f64,
}

impl WeaponFireController {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            config,
            next_fire_time: 0.0,
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    /// Replace the tunables. The current cooldown is kept.
    pub fn set_config(&mut self, config: WeaponConfig) {
        self.config = config;
    }

    pub fn next_fire_time(&self) -> f64 {
        self.next_fire_time
    }

    /// Make the weapon ready to fire immediately.
    pub fn reset(&mut self) {
        self.next_fire_time = 0.0;
    }

    /// Fire at the nearest living candidate if the cooldown has elapsed.
    ///
    /// With no target in range nothing is spawned and the cooldown is left
    /// alone, so the next tick retries.
    pub fn try_fire(
        &mut self,
        now: f64,
        origin: DVec2,
        candidates: &[Candidate],
        pool: &mut ProjectilePool,
    ) -> Option<Shot> {
        if now < self.next_fire_time {
            return None;
        }
        let target = find_nearest(origin, candidates.iter().copied(), self.config.detection_range)?;

        let direction = (target.position - origin).normalize_or_zero();
        let handle = pool.acquire();
        if let Some(projectile) = pool.get_mut(handle) {
            projectile.launch(
                origin,
                direction * self.config.bullet_speed,
                self.config.bullet_damage,
                self.config.bullet_lifetime,
                now,
            );
        }
        self.next_fire_time = now + self.config.fire_rate;
        Some(Shot { handle, target })
    }
}

/// Run the weapon for one frame. No-op without a living player.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &World,
    player: Option<Entity>,
    weapon: &mut WeaponFireController,
    pool: &mut ProjectilePool,
    candidates: &mut Vec<Candidate>,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
    now: f64,
) {
    let Some(player) = player else {
        return;
    };
    let origin = match (
        world.get::<&Position>(player),
        world.get::<&CombatEntity>(player),
    ) {
        (Ok(pos), Ok(combat)) if !combat.is_dead() => pos.0,
        _ => return,
    };
    if now < weapon.next_fire_time() {
        return;
    }

    collect_enemy_candidates(world, candidates);
    if let Some(shot) = weapon.try_fire(now, origin, candidates, pool) {
        score.projectiles_fired += 1;
        events.push(GameEvent::ProjectileFired {
            projectile: shot.handle.index(),
            target_id: shot.target.entity.to_bits().get(),
        });
    }
}
