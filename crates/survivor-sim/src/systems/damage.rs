//! Damage resolution and the one-shot reactions to a kill.
//!
//! Every damage source (projectiles, enemy strikes, external callers) goes
//! through here so the death side-effects fire exactly once. A kill grants
//! experience to the player and schedules removal on the pending-removal
//! queue. Contact and targeting skip dead enemies on their own.

use hecs::{Entity, World};

use survivor_core::combat::CombatEntity;
use survivor_core::components::{Enemy, Player};
use survivor_core::constants::{DEATH_REMOVAL_DELAY, HIT_FLASH_DURATION};
use survivor_core::enums::{DamageOutcome, EnemyBehavior};
use survivor_core::events::{GameEvent, VisualEffect};
use survivor_core::types::Velocity;

use crate::effects::EffectQueue;
use crate::progression::{Progression, ScoreState};
use crate::systems::cleanup::PendingRemovals;

/// Engine state that damage resolution writes to.
pub struct DamageSinks<'a> {
    pub player: Option<Entity>,
    pub progression: &'a mut Progression,
    pub score: &'a mut ScoreState,
    pub removals: &'a mut PendingRemovals,
    pub effects: &'a mut EffectQueue,
    pub events: &'a mut Vec<GameEvent>,
}

/// Apply damage to whichever character `entity` is.
/// Missing entities and non-combatants are ignored.
pub fn damage_entity(
    world: &mut World,
    entity: Entity,
    amount: f64,
    now: f64,
    sinks: &mut DamageSinks,
) -> DamageOutcome {
    if world.get::<&Enemy>(entity).is_ok() {
        damage_enemy(world, entity, amount, now, sinks)
    } else if world.get::<&Player>(entity).is_ok() {
        damage_player(world, entity, amount, sinks.events)
    } else {
        DamageOutcome::Ignored
    }
}

/// Apply damage to an enemy and run the death reaction if this hit killed it.
pub fn damage_enemy(
    world: &mut World,
    enemy: Entity,
    amount: f64,
    now: f64,
    sinks: &mut DamageSinks,
) -> DamageOutcome {
    let (outcome, remaining) = match world.get::<&mut CombatEntity>(enemy) {
        Ok(mut combat) => (combat.apply_damage(amount), combat.current_health()),
        Err(_) => return DamageOutcome::Ignored,
    };
    if outcome == DamageOutcome::Ignored {
        return outcome;
    }

    let enemy_id = enemy.to_bits().get();
    sinks.events.push(GameEvent::EnemyHit {
        enemy_id,
        damage: amount,
        remaining_health: remaining,
    });
    sinks
        .effects
        .schedule(now, VisualEffect::HitFlash { entity_id: enemy_id, on: true });
    sinks.effects.schedule(
        now + HIT_FLASH_DURATION,
        VisualEffect::HitFlash {
            entity_id: enemy_id,
            on: false,
        },
    );

    if outcome == DamageOutcome::Killed {
        let experience = match world.get::<&mut Enemy>(enemy) {
            Ok(mut data) => {
                data.behavior = EnemyBehavior::Dead;
                data.experience_value
            }
            Err(_) => 0,
        };
        if let Ok(mut vel) = world.get::<&mut Velocity>(enemy) {
            *vel = Velocity::default();
        }

        sinks.score.enemies_killed += 1;
        sinks.events.push(GameEvent::EnemyKilled {
            enemy_id,
            experience,
        });
        sinks.removals.schedule(enemy, now + DEATH_REMOVAL_DELAY);
        grant_experience(world, experience, sinks);
    }

    outcome
}

/// Apply damage to the player.
pub fn damage_player(
    world: &mut World,
    player: Entity,
    amount: f64,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    let (outcome, remaining) = match world.get::<&mut CombatEntity>(player) {
        Ok(mut combat) => (combat.apply_damage(amount), combat.current_health()),
        Err(_) => return DamageOutcome::Ignored,
    };
    match outcome {
        DamageOutcome::Ignored => {}
        DamageOutcome::Damaged => events.push(GameEvent::PlayerDamaged {
            damage: amount,
            remaining_health: remaining,
        }),
        DamageOutcome::Killed => {
            events.push(GameEvent::PlayerDamaged {
                damage: amount,
                remaining_health: remaining,
            });
            events.push(GameEvent::PlayerDied);
            if let Ok(mut vel) = world.get::<&mut Velocity>(player) {
                *vel = Velocity::default();
            }
        }
    }
    outcome
}

/// Credit experience to the player and apply any level-ups.
fn grant_experience(world: &mut World, amount: u32, sinks: &mut DamageSinks) {
    if amount == 0 {
        return;
    }
    let levels = sinks.progression.add_experience(amount);
    sinks.events.push(GameEvent::ExperienceGained {
        experience: sinks.progression.experience(),
        required: sinks.progression.experience_to_next_level(),
    });
    if levels == 0 {
        return;
    }

    let bonus = sinks.progression.health_increase_per_level() * levels as f64;
    if let Some(player) = sinks.player {
        if let Ok(mut combat) = world.get::<&mut CombatEntity>(player) {
            combat.increase_max_health(bonus);
        }
    }
    let level = sinks.progression.level();
    log::info!("player reached level {level}");
    sinks.events.push(GameEvent::LevelUp { level });
}
