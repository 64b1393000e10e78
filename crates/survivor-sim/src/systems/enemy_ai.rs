//! Enemy AI system: chase the player, stop inside attack range, strike on
//! cooldown.
//!
//! Calls the FSM from survivor-ai for each living enemy, then applies the
//! velocity and any strikes.

use hecs::{Entity, World};

use survivor_ai::fsm::{evaluate, EnemyAction, EnemyContext};
use survivor_core::combat::CombatEntity;
use survivor_core::components::Enemy;
use survivor_core::enums::DamageOutcome;
use survivor_core::events::GameEvent;
use survivor_core::types::{Position, Velocity};

use crate::systems::damage::damage_player;

/// Run the enemy AI for one frame. Returns the outcome of the last strike
/// that landed on the player, if any.
pub fn run(
    world: &mut World,
    player: Option<Entity>,
    now: f64,
    events: &mut Vec<GameEvent>,
) -> Option<DamageOutcome> {
    let player = player?;
    let target = match (
        world.get::<&Position>(player),
        world.get::<&CombatEntity>(player),
    ) {
        (Ok(pos), Ok(combat)) if !combat.is_dead() => pos.0,
        _ => return None,
    };

    let mut strikes: Vec<f64> = Vec::new();

    for (_entity, (enemy, combat, pos, vel)) in
        world.query_mut::<(&mut Enemy, &mut CombatEntity, &Position, &mut Velocity)>()
    {
        let ctx = EnemyContext {
            behavior: enemy.behavior,
            position: pos.0,
            target,
            attack_range: enemy.attack_range,
            attack_ready: combat.can_attack(now),
            is_dead: combat.is_dead(),
        };
        let update = evaluate(&ctx);
        enemy.behavior = update.new_behavior;

        match update.action {
            EnemyAction::Chase { direction } => {
                vel.0 = direction * combat.move_speed;
            }
            EnemyAction::Hold { strike } => {
                *vel = Velocity::default();
                if strike {
                    combat.last_attack_time = Some(now);
                    strikes.push(combat.attack_damage);
                }
            }
            EnemyAction::Idle => {
                *vel = Velocity::default();
            }
        }
    }

    let mut last = None;
    for damage in strikes {
        let outcome = damage_player(world, player, damage, events);
        if outcome == DamageOutcome::Ignored {
            break;
        }
        last = Some(outcome);
    }
    last
}
