//! Snapshot builder: assembles the visible game state after a tick.

use hecs::{Entity, World};

use survivor_core::combat::CombatEntity;
use survivor_core::components::{Enemy, SpawnOrder};
use survivor_core::enums::GamePhase;
use survivor_core::events::{GameEvent, VisualEffect};
use survivor_core::state::*;
use survivor_core::types::{Position, SimTime};

use crate::pool::ProjectilePool;
use crate::progression::{Progression, ScoreState};
use crate::systems::wave_spawner::WaveSpawner;

/// Build a complete snapshot. Enemies are listed in spawn order.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    player: Option<Entity>,
    time: &SimTime,
    phase: GamePhase,
    pool: &ProjectilePool,
    spawner: &WaveSpawner,
    progression: &Progression,
    score: &ScoreState,
    events: Vec<GameEvent>,
    effects: Vec<VisualEffect>,
) -> GameStateSnapshot {
    let player_view = player
        .and_then(|p| {
            let pos = world.get::<&Position>(p).ok()?;
            let combat = world.get::<&CombatEntity>(p).ok()?;
            Some(PlayerView {
                position: *pos,
                current_health: combat.current_health(),
                max_health: combat.max_health,
                is_dead: combat.is_dead(),
            })
        })
        .unwrap_or_default();

    let mut enemies: Vec<(u64, EnemyView)> = Vec::new();
    let mut enemies_alive = 0;
    {
        let mut query = world.query::<(&Enemy, &SpawnOrder, &Position, &CombatEntity)>();
        for (entity, (enemy, order, pos, combat)) in query.iter() {
            if !combat.is_dead() {
                enemies_alive += 1;
            }
            enemies.push((
                order.0,
                EnemyView {
                    id: entity.to_bits().get(),
                    position: *pos,
                    current_health: combat.current_health(),
                    max_health: combat.max_health,
                    behavior: enemy.behavior,
                    is_dead: combat.is_dead(),
                },
            ));
        }
    }
    enemies.sort_unstable_by_key(|(order, _)| *order);

    let projectiles = pool
        .active()
        .map(|p| ProjectileView {
            index: p.handle().index(),
            position: Position(p.position),
            rotation: p.velocity.y.atan2(p.velocity.x),
        })
        .collect();

    GameStateSnapshot {
        time: *time,
        phase,
        player: player_view,
        enemies: enemies.into_iter().map(|(_, view)| view).collect(),
        projectiles,
        wave: WaveView {
            current_wave: spawner.current_wave(),
            state: spawner.state(),
            enemies_alive,
        },
        pool: PoolView {
            size: pool.size() as u32,
            active: pool.active_count() as u32,
            free: pool.free_count() as u32,
        },
        progression: ProgressionView {
            level: progression.level(),
            experience: progression.experience(),
            experience_to_next_level: progression.experience_to_next_level(),
        },
        events,
        effects,
        score: ScoreView {
            enemies_killed: score.enemies_killed,
            projectiles_fired: score.projectiles_fired,
            survival_time_secs: time.elapsed_secs,
        },
    }
}
