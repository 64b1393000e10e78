//! Scheduled visual effects.
//!
//! Effects are `(fire_at, effect)` pairs. The engine drains the due ones at
//! the end of each tick into the snapshot for the render collaborator.

use survivor_core::events::{ScheduledEffect, VisualEffect};

#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Vec<ScheduledEffect>,
}

impl EffectQueue {
    pub fn schedule(&mut self, fire_at: f64, effect: VisualEffect) {
        self.pending.push(ScheduledEffect { fire_at, effect });
    }

    /// Move every effect with `fire_at <= now` into `out`, in scheduling order.
    pub fn drain_due(&mut self, now: f64, out: &mut Vec<VisualEffect>) {
        self.pending.retain(|scheduled| {
            if scheduled.fire_at <= now {
                out.push(scheduled.effect);
                false
            } else {
                true
            }
        });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_only_due_effects() {
        let mut queue = EffectQueue::default();
        let on = VisualEffect::HitFlash {
            entity_id: 1,
            on: true,
        };
        let off = VisualEffect::HitFlash {
            entity_id: 1,
            on: false,
        };
        queue.schedule(1.0, on);
        queue.schedule(1.1, off);

        let mut out = Vec::new();
        queue.drain_due(1.05, &mut out);
        assert_eq!(out, vec![on]);
        assert_eq!(queue.len(), 1);

        out.clear();
        queue.drain_due(1.1, &mut out);
        assert_eq!(out, vec![off]);
        assert!(queue.is_empty());
    }
}
