//! Health, damage and death state machine shared by the player and enemies.
//!
//! A combatant is either alive or dead. The transition fires exactly once,
//! on the hit that takes health to zero or below, and is never undone.
//! Side-effects of death (experience, removal) are the caller's job and
//! are keyed on [`DamageOutcome::Killed`].

use serde::{Deserialize, Serialize};

use crate::enums::DamageOutcome;

/// Anything that can be hurt. Implemented by [`CombatEntity`]; external
/// damage sources and health displays only need this surface.
pub trait Character {
    /// Apply damage. Returns what happened.
    fn take_damage(&mut self, amount: f64) -> DamageOutcome;
    fn current_health(&self) -> f64;
    fn is_dead(&self) -> bool;
}

/// Combat stats and health for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub max_health: f64,
    current_health: f64,
    dead: bool,
    pub attack_damage: f64,
    /// Minimum seconds between two attacks.
    pub attack_cooldown: f64,
    /// Sim time of the last attack, `None` if it never attacked.
    pub last_attack_time: Option<f64>,
    pub move_speed: f64,
}

impl CombatEntity {
    /// A fresh, alive combatant at full health.
    pub fn new(max_health: f64, attack_damage: f64, attack_cooldown: f64, move_speed: f64) -> Self {
        Self {
            max_health,
            current_health: max_health,
            dead: false,
            attack_damage,
            attack_cooldown,
            last_attack_time: None,
            move_speed,
        }
    }

    /// Subtract `amount` from health. No-op once dead.
    ///
    /// Health may go negative; `is_dead` reports true at and below zero.
    pub fn apply_damage(&mut self, amount: f64) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.current_health -= amount;
        if self.current_health <= 0.0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Overwrite health, damage and speed; current health becomes the new max.
    /// Meant for initialising freshly spawned entities.
    pub fn set_stats(&mut self, health: f64, damage: f64, speed: f64) {
        self.max_health = health;
        self.current_health = health;
        self.attack_damage = damage;
        self.move_speed = speed;
    }

    /// Raise max health and heal to full. Ignored once dead.
    pub fn increase_max_health(&mut self, amount: f64) {
        if self.dead {
            return;
        }
        self.max_health += amount;
        self.current_health = self.max_health;
    }

    pub fn current_health(&self) -> f64 {
        self.current_health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Whether the attack cooldown has elapsed at time `now`.
    pub fn can_attack(&self, now: f64) -> bool {
        match self.last_attack_time {
            Some(last) => now - last >= self.attack_cooldown,
            None => true,
        }
    }
}

impl Character for CombatEntity {
    fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        self.apply_damage(amount)
    }

    fn current_health(&self) -> f64 {
        self.current_health
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
