//! Enemy behaviour finite state machine.
//!
//! Pure functions that compute the next behaviour and the action to take for
//! one enemy, given where it is relative to the player. No ECS dependency.

use glam::DVec2;

use survivor_core::enums::EnemyBehavior;

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext {
    pub behavior: EnemyBehavior,
    pub position: DVec2,
    /// Player position.
    pub target: DVec2,
    pub attack_range: f64,
    /// Whether the attack cooldown has elapsed.
    pub attack_ready: bool,
    pub is_dead: bool,
}

/// What the enemy does this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    /// Move along `direction` (unit vector) at move speed.
    Chase { direction: DVec2 },
    /// Stand still; `strike` means damage the player now.
    Hold { strike: bool },
    /// Do nothing (dead).
    Idle,
}

/// Output from the enemy FSM.
pub struct EnemyUpdate {
    pub new_behavior: EnemyBehavior,
    pub action: EnemyAction,
    pub behavior_changed: bool,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    if ctx.is_dead || ctx.behavior == EnemyBehavior::Dead {
        return EnemyUpdate {
            new_behavior: EnemyBehavior::Dead,
            action: EnemyAction::Idle,
            behavior_changed: ctx.behavior != EnemyBehavior::Dead,
        };
    }

    let distance = ctx.position.distance(ctx.target);
    let (new_behavior, action) = if distance <= ctx.attack_range {
        (
            EnemyBehavior::Attack,
            EnemyAction::Hold {
                strike: ctx.attack_ready,
            },
        )
    } else {
        let direction = (ctx.target - ctx.position).normalize_or_zero();
        (EnemyBehavior::Chase, EnemyAction::Chase { direction })
    };

    EnemyUpdate {
        new_behavior,
        action,
        behavior_changed: new_behavior != ctx.behavior,
    }
}
