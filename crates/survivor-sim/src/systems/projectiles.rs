//! Projectile lifecycle from launch back to the pool.
//!
//! Each in-flight projectile either hits the first living enemy it overlaps
//! (damage, then straight back to the pool) or runs out its time-to-live.
//! Both paths go through `ProjectilePool::release`, so whichever happens
//! second is a no-op.

use hecs::World;

use survivor_core::combat::CombatEntity;
use survivor_core::events::GameEvent;

use crate::pool::{ProjectileHandle, ProjectilePool};
use crate::systems::damage::{damage_enemy, DamageSinks};
use crate::systems::targeting::{collect_enemy_candidates, Candidate};

/// Scratch buffers reused across ticks.
#[derive(Debug, Default)]
pub struct LifecycleBuffers {
    pub handles: Vec<ProjectileHandle>,
    pub candidates: Vec<Candidate>,
}

/// Advance every in-flight projectile by `dt` and resolve contact/timeout.
pub fn run(
    world: &mut World,
    pool: &mut ProjectilePool,
    buffers: &mut LifecycleBuffers,
    projectile_radius: f64,
    now: f64,
    dt: f64,
    sinks: &mut DamageSinks,
) {
    buffers.handles.clear();
    buffers.handles.extend(pool.active_handles());
    if buffers.handles.is_empty() {
        return;
    }
    collect_enemy_candidates(world, &mut buffers.candidates);

    for &handle in &buffers.handles {
        let (position, damage, expired) = match pool.get_mut(handle) {
            Some(projectile) => {
                projectile.position += projectile.velocity * dt;
                (
                    projectile.position,
                    projectile.damage,
                    projectile.is_expired(now),
                )
            }
            None => continue,
        };

        // Dead state is read from the world, not the buffer: an earlier
        // projectile this tick may have killed a candidate.
        let contact = buffers.candidates.iter().find(|c| {
            let reach = projectile_radius + c.radius;
            position.distance_squared(c.position) < reach * reach && is_alive(world, c)
        });

        if let Some(candidate) = contact {
            damage_enemy(world, candidate.entity, damage, now, sinks);
            pool.release(handle);
            continue;
        }

        if expired && pool.release(handle) {
            sinks.events.push(GameEvent::ProjectileExpired {
                projectile: handle.index(),
            });
        }
    }
}

fn is_alive(world: &World, candidate: &Candidate) -> bool {
    world
        .get::<&CombatEntity>(candidate.entity)
        .is_ok_and(|combat| !combat.is_dead())
}
