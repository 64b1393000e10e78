//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and every piece of session
//! state (projectile pool, weapon, spawner, progression), processes
//! commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.
//!
//! Each step runs zero or more fixed physics ticks (projectile lifecycle,
//! movement) followed by one frame-logic pass (enemy AI, targeting and
//! firing, spawning, pending removals). Damage is therefore always resolved
//! before the next acquisition scan reads enemy state.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use survivor_core::combat::CombatEntity;
use survivor_core::commands::PlayerCommand;
use survivor_core::config::{ConfigError, GameTuning};
use survivor_core::constants::{DT, MAX_FRAME_DT};
use survivor_core::enums::{DamageOutcome, GamePhase};
use survivor_core::events::{GameEvent, VisualEffect};
use survivor_core::state::GameStateSnapshot;
use survivor_core::types::{Position, SimTime};

use crate::effects::EffectQueue;
use crate::pool::ProjectilePool;
use crate::progression::{Progression, ScoreState};
use crate::systems;
use crate::systems::cleanup::PendingRemovals;
use crate::systems::damage::DamageSinks;
use crate::systems::projectiles::LifecycleBuffers;
use crate::systems::targeting::Candidate;
use crate::systems::wave_spawner::WaveSpawner;
use crate::systems::weapon::WeaponFireController;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Gameplay tunables.
    pub tuning: GameTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: GameTuning::default(),
        }
    }
}

impl SimConfig {
    /// Setup-time check; the engine assumes a valid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tuning.validate()
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    tuning: GameTuning,
    command_queue: VecDeque<PlayerCommand>,
    player: Option<Entity>,
    move_input: DVec2,
    /// Frame time not yet consumed by fixed ticks.
    accumulator: f64,
    next_spawn_order: u64,

    pool: ProjectilePool,
    weapon: WeaponFireController,
    spawner: WaveSpawner,
    progression: Progression,
    score: ScoreState,
    removals: PendingRemovals,
    effects: EffectQueue,
    events: Vec<GameEvent>,
    due_effects: Vec<VisualEffect>,

    lifecycle_buffers: LifecycleBuffers,
    candidates: Vec<Candidate>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let tuning = config.tuning;
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            player: None,
            move_input: DVec2::ZERO,
            accumulator: 0.0,
            next_spawn_order: 0,
            pool: ProjectilePool::new(tuning.pool.initial_size),
            weapon: WeaponFireController::new(tuning.weapon.clone()),
            spawner: WaveSpawner::new(tuning.waves.clone(), tuning.enemy.clone()),
            progression: Progression::new(tuning.progression.clone()),
            score: ScoreState::default(),
            removals: PendingRemovals::default(),
            effects: EffectQueue::default(),
            events: Vec::new(),
            due_effects: Vec::new(),
            lifecycle_buffers: LifecycleBuffers::default(),
            candidates: Vec::new(),
            tuning,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by exactly one fixed tick.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.step(DT)
    }

    /// Advance by a variable frame duration: as many fixed ticks as fit,
    /// then one frame-logic pass over the whole `frame_dt`.
    /// A non-finite `frame_dt` is treated as an empty frame.
    pub fn step(&mut self, frame_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let frame_dt = if frame_dt.is_finite() {
                frame_dt.clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.accumulator += frame_dt;
            while self.accumulator >= DT {
                self.accumulator -= DT;
                self.time.advance_by(DT);
                self.fixed_update(DT);
            }
            self.frame_update(frame_dt);
        }

        let now = self.now();
        self.effects.drain_due(now, &mut self.due_effects);
        let events = std::mem::take(&mut self.events);
        let effects = std::mem::take(&mut self.due_effects);
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            &self.time,
            self.phase,
            &self.pool,
            &self.spawner,
            &self.progression,
            &self.score,
            events,
            effects,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time (fixed ticks).
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Frame-clock time: fixed time plus unconsumed frame time.
    pub fn now(&self) -> f64 {
        self.time.elapsed_secs + self.accumulator
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity, if a session has been started.
    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn pool(&self) -> &ProjectilePool {
        &self.pool
    }

    pub fn weapon(&self) -> &WeaponFireController {
        &self.weapon
    }

    /// Mutable weapon access, for retuning fire rate, range, speed and damage.
    pub fn weapon_mut(&mut self) -> &mut WeaponFireController {
        &mut self.weapon
    }

    pub fn spawner(&self) -> &WaveSpawner {
        &self.spawner
    }

    pub fn current_wave(&self) -> u32 {
        self.spawner.current_wave()
    }

    pub fn start_spawning(&mut self) {
        self.spawner.start_spawning();
    }

    pub fn stop_spawning(&mut self) {
        self.spawner.stop_spawning();
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    /// Damage any character from outside the core (e.g. a hazard).
    /// Unknown entities are ignored.
    pub fn damage_entity(&mut self, entity: Entity, amount: f64) -> DamageOutcome {
        let now = self.now();
        let mut sinks = DamageSinks {
            player: self.player,
            progression: &mut self.progression,
            score: &mut self.score,
            removals: &mut self.removals,
            effects: &mut self.effects,
            events: &mut self.events,
        };
        let outcome =
            systems::damage::damage_entity(&mut self.world, entity, amount, now, &mut sinks);
        self.check_player_death();
        outcome
    }

    /// Current health of a character, `None` if it no longer exists.
    pub fn current_health(&self, entity: Entity) -> Option<f64> {
        self.world
            .get::<&CombatEntity>(entity)
            .ok()
            .map(|c| c.current_health())
    }

    /// Whether a character is dead. Removed entities count as dead.
    pub fn is_dead(&self, entity: Entity) -> bool {
        self.world
            .get::<&CombatEntity>(entity)
            .map_or(true, |c| c.is_dead())
    }

    /// Spawn a stationary-or-moving enemy directly (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        position: DVec2,
        stats: systems::wave_spawner::WaveStats,
    ) -> Entity {
        let order = self.next_spawn_order;
        self.next_spawn_order += 1;
        world_setup::spawn_enemy(
            &mut self.world,
            position,
            stats,
            &self.tuning.enemy,
            order,
        )
    }

    /// Number of entities waiting on the removal queue (for testing).
    #[cfg(test)]
    pub fn pending_removals(&self) -> usize {
        self.removals.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.start_session();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::SetMoveInput { x, y } => {
                let input = DVec2::new(x, y);
                self.move_input = if input.is_finite() { input } else { DVec2::ZERO };
            }
            PlayerCommand::StartSpawning => self.spawner.start_spawning(),
            PlayerCommand::StopSpawning => self.spawner.stop_spawning(),
            PlayerCommand::ResetWaves => self.spawner.reset(),
            PlayerCommand::ResetProgression => self.progression.reset(),
        }
    }

    /// Clear the world and spawn a fresh player at the origin.
    /// The pool is kept; in-flight projectiles go back to the free list.
    fn start_session(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.accumulator = 0.0;
        self.next_spawn_order = 0;
        self.move_input = DVec2::ZERO;

        let in_flight: Vec<_> = self.pool.active_handles().collect();
        for handle in in_flight {
            self.pool.release(handle);
        }
        self.weapon.reset();
        self.spawner = WaveSpawner::new(self.tuning.waves.clone(), self.tuning.enemy.clone());
        self.progression.reset();
        self.score = ScoreState::default();
        self.removals.clear();
        self.effects.clear();
        self.events.clear();

        self.player = Some(world_setup::spawn_player(
            &mut self.world,
            &self.tuning.player,
            DVec2::ZERO,
        ));
        self.spawner.start_spawning();
        self.phase = GamePhase::Active;
        log::info!("session started, pool size {}", self.pool.size());
    }

    /// Physics: projectile flight/contact/timeout, then movement.
    fn fixed_update(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        let projectile_radius = self.weapon.config().bullet_radius;
        let mut sinks = DamageSinks {
            player: self.player,
            progression: &mut self.progression,
            score: &mut self.score,
            removals: &mut self.removals,
            effects: &mut self.effects,
            events: &mut self.events,
        };
        systems::projectiles::run(
            &mut self.world,
            &mut self.pool,
            &mut self.lifecycle_buffers,
            projectile_radius,
            now,
            dt,
            &mut sinks,
        );
        systems::movement::run(&mut self.world, dt);
    }

    /// Per-frame logic in order: enemy AI, targeting + firing, spawning,
    /// pending removals.
    fn frame_update(&mut self, dt: f64) {
        let now = self.now();

        // 1. Player input and enemy AI
        if let Some(player) = self.player {
            systems::movement::apply_player_input(&mut self.world, player, self.move_input);
        }
        systems::enemy_ai::run(&mut self.world, self.player, now, &mut self.events);
        self.check_player_death();

        // 2. Targeting + firing
        systems::weapon::run(
            &self.world,
            self.player,
            &mut self.weapon,
            &mut self.pool,
            &mut self.candidates,
            &mut self.score,
            &mut self.events,
            now,
        );

        // 3. Wave spawning
        let center = self.living_player_position();
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.spawner,
            &mut self.rng,
            center,
            &mut self.next_spawn_order,
            &mut self.events,
            dt,
        );

        // 4. Deferred removals
        systems::cleanup::run(&mut self.world, &mut self.removals, now);
    }

    fn living_player_position(&self) -> Option<DVec2> {
        let player = self.player?;
        let combat = self.world.get::<&CombatEntity>(player).ok()?;
        if combat.is_dead() {
            return None;
        }
        let pos = self.world.get::<&Position>(player).ok()?;
        Some(pos.0)
    }

    /// End the session once the player is dead.
    fn check_player_death(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        if self.is_dead(player) {
            self.phase = GamePhase::GameOver;
            self.spawner.stop_spawning();
            log::info!(
                "player died at {:.2}s on wave {} with {} kills",
                self.now(),
                self.spawner.current_wave(),
                self.score.enemies_killed
            );
        }
    }
}
