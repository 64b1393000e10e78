//! Cleanup system: deferred removal of dead entities.
//!
//! Dead enemies linger for a short delay (so the renderer can show the kill)
//! and are despawned once the queue entry comes due.

use hecs::{Entity, World};

/// Entities waiting to be despawned, with their removal time.
#[derive(Debug, Clone, Default)]
pub struct PendingRemovals {
    entries: Vec<(Entity, f64)>,
}

impl PendingRemovals {
    /// Queue `entity` for removal at `remove_at`. Re-scheduling an entity
    /// that is already queued keeps the earlier time.
    pub fn schedule(&mut self, entity: Entity, remove_at: f64) {
        match self.entries.iter_mut().find(|(e, _)| *e == entity) {
            Some((_, at)) => *at = at.min(remove_at),
            None => self.entries.push((entity, remove_at)),
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.iter().any(|(e, _)| *e == entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Despawn every queued entity whose removal time has come.
/// Returns how many entries were processed.
pub fn run(world: &mut World, removals: &mut PendingRemovals, now: f64) -> usize {
    let before = removals.entries.len();
    removals.entries.retain(|&(entity, remove_at)| {
        if remove_at <= now {
            // Already gone is fine.
            let _ = world.despawn(entity);
            false
        } else {
            true
        }
    });
    before - removals.entries.len()
}
