//! Nearest-living-enemy search.
//!
//! A full linear scan over the candidate set each call. Candidates are
//! gathered in spawn order, so the strict `<` comparison makes the earliest
//! spawned enemy win a distance tie.

use glam::DVec2;
use hecs::{Entity, World};

use survivor_core::combat::CombatEntity;
use survivor_core::components::{Collider, Enemy, SpawnOrder};
use survivor_core::types::Position;

/// One enemy as seen by targeting and contact checks.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub order: u64,
    pub position: DVec2,
    pub radius: f64,
    pub is_dead: bool,
}

/// Result of a successful acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub entity: Entity,
    pub position: DVec2,
    pub distance: f64,
}

/// Find the nearest living candidate strictly within `max_radius` of `origin`.
pub fn find_nearest<I>(origin: DVec2, candidates: I, max_radius: f64) -> Option<Target>
where
    I: IntoIterator<Item = Candidate>,
{
    // Also rejects NaN.
    if !(max_radius > 0.0) {
        return None;
    }
    let mut best: Option<Candidate> = None;
    let mut best_distance_sq = max_radius * max_radius;

    for candidate in candidates {
        if candidate.is_dead {
            continue;
        }
        let distance_sq = origin.distance_squared(candidate.position);
        if distance_sq < best_distance_sq {
            best_distance_sq = distance_sq;
            best = Some(candidate);
        }
    }

    best.map(|c| Target {
        entity: c.entity,
        position: c.position,
        distance: best_distance_sq.sqrt(),
    })
}

/// Gather every enemy into `out`, sorted by spawn order.
/// Reuses the buffer to avoid per-tick allocation.
pub fn collect_enemy_candidates(world: &World, out: &mut Vec<Candidate>) {
    out.clear();
    let mut query = world.query::<(&Enemy, &SpawnOrder, &Position, &Collider, &CombatEntity)>();
    for (entity, (_enemy, order, pos, collider, combat)) in query.iter() {
        out.push(Candidate {
            entity,
            order: order.0,
            position: pos.0,
            radius: collider.radius,
            is_dead: combat.is_dead(),
        });
    }
    out.sort_unstable_by_key(|c| c.order);
}
