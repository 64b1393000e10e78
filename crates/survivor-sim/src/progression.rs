//! Experience, level and running score, owned by the engine.

use survivor_core::config::ProgressionConfig;

/// Experience and level tracker for the player.
///
/// The requirement per level is constant; leftover experience carries over,
/// and a single large grant can produce several level-ups.
#[derive(Debug, Clone)]
pub struct Progression {
    level: u32,
    experience: u32,
    experience_to_next_level: u32,
    config: ProgressionConfig,
}

impl Progression {
    pub fn new(config: ProgressionConfig) -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next_level: config.base_experience_required,
            config,
        }
    }

    /// Add experience. Returns how many levels were gained.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        // A zero requirement would loop forever; config validation rejects it.
        while self.experience_to_next_level > 0 && self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level += 1;
            self.experience_to_next_level = self.config.base_experience_required;
            gained += 1;
        }
        gained
    }

    /// Back to level 1 with no experience.
    pub fn reset(&mut self) {
        self.level = 1;
        self.experience = 0;
        self.experience_to_next_level = self.config.base_experience_required;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_to_next_level
    }

    /// Max-health bonus granted per level gained.
    pub fn health_increase_per_level(&self) -> f64 {
        self.config.health_increase_per_level
    }
}

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub projectiles_fired: u32,
}
