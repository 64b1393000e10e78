#[cfg(test)]
mod tests {
    use glam::DVec2;

    use survivor_core::commands::PlayerCommand;
    use survivor_core::config::GameTuning;
    use survivor_core::constants::DT;
    use survivor_core::enums::{DamageOutcome, EnemyBehavior, GamePhase, SpawnerState};
    use survivor_core::events::{GameEvent, VisualEffect};
    use survivor_core::state::GameStateSnapshot;

    use crate::engine::{SimConfig, SimulationEngine};
    use crate::systems::wave_spawner::WaveStats;

    const STATIONARY: WaveStats = WaveStats {
        health: 3.0,
        damage: 1.0,
        speed: 0.0,
    };

    /// Engine with a live session and the spawner stopped, one tick in.
    fn active_engine_with(config: SimConfig) -> SimulationEngine {
        let mut engine = SimulationEngine::new(config);
        engine.queue_commands([PlayerCommand::StartSession, PlayerCommand::StopSpawning]);
        engine.tick();
        engine
    }

    fn active_engine() -> SimulationEngine {
        active_engine_with(SimConfig::default())
    }

    fn run_ticks(engine: &mut SimulationEngine, n: usize) -> Vec<GameStateSnapshot> {
        (0..n).map(|_| engine.tick()).collect()
    }

    fn all_events(snaps: &[GameStateSnapshot]) -> Vec<GameEvent> {
        snaps.iter().flat_map(|s| s.events.iter().cloned()).collect()
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_engine_starts_in_main_menu() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        assert_eq!(engine.phase(), GamePhase::MainMenu);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::MainMenu);
        assert_eq!(snap.time.tick, 0, "time is frozen outside a session");
        assert_eq!(snap.pool.size, 20);
        assert_eq!(snap.pool.free, 20);
    }

    #[test]
    fn test_start_session_spawns_player_and_first_wave() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);
        let snap = engine.tick();

        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.player.current_health, 10.0);
        assert_eq!(snap.wave.current_wave, 1);
        assert_eq!(snap.wave.state, SpawnerState::Spawning);
        assert_eq!(snap.enemies.len(), 5);
        assert!(snap
            .events
            .contains(&GameEvent::WaveSpawned { wave: 1, count: 5 }));
        for enemy in &snap.enemies {
            let d = enemy.position.0.length();
            // Spawned on the radius-10 circle, then moved at most one tick.
            assert!((d - 10.0).abs() < 0.1, "spawn distance {d}");
        }
    }

    #[test]
    fn test_fifty_ticks_is_one_second() {
        let mut engine = active_engine();
        run_ticks(&mut engine, 49);
        assert_eq!(engine.time().tick, 50);
        assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_variable_step_accumulates_fixed_ticks() {
        let mut engine = active_engine();
        let start = engine.time().tick;
        engine.step(0.05);
        assert_eq!(engine.time().tick, start + 2);
        assert!((engine.now() - (engine.time().elapsed_secs + 0.01)).abs() < 1e-9);

        // Oversized frames are clamped.
        engine.step(10.0);
        assert!(engine.time().tick <= start + 2 + 13);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut engine = active_engine();
        run_ticks(&mut engine, 5);
        let paused_at = engine.time().tick;

        engine.queue_command(PlayerCommand::Pause);
        run_ticks(&mut engine, 10);
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert_eq!(engine.time().tick, paused_at);

        engine.queue_command(PlayerCommand::Resume);
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Active);
        assert_eq!(engine.time().tick, paused_at + 1);
    }

    #[test]
    fn test_determinism_same_seed() {
        let config = SimConfig {
            seed: 7,
            ..Default::default()
        };
        let mut a = SimulationEngine::new(config.clone());
        let mut b = SimulationEngine::new(config);
        a.queue_command(PlayerCommand::StartSession);
        b.queue_command(PlayerCommand::StartSession);

        for _ in 0..500 {
            let sa = serde_json::to_string(&a.tick()).unwrap();
            let sb = serde_json::to_string(&b.tick()).unwrap();
            assert_eq!(sa, sb);
        }
    }

    #[test]
    fn test_different_seeds_place_enemies_differently() {
        let run = |seed| {
            let mut engine = SimulationEngine::new(SimConfig {
                seed,
                ..Default::default()
            });
            engine.queue_command(PlayerCommand::StartSession);
            engine.tick()
        };
        let a = run(1);
        let b = run(2);
        let pa: Vec<_> = a.enemies.iter().map(|e| e.position.0).collect();
        let pb: Vec<_> = b.enemies.iter().map(|e| e.position.0).collect();
        assert_ne!(pa, pb);
    }

    #[test]
    fn test_weapon_fires_at_nearest_enemy() {
        let mut engine = active_engine();
        let far = engine.spawn_test_enemy(DVec2::new(0.0, 6.0), STATIONARY);
        let near = engine.spawn_test_enemy(DVec2::new(3.0, 0.0), STATIONARY);

        let snap = engine.tick();
        let fired: Vec<_> = snap
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ProjectileFired { target_id, .. } => Some(*target_id),
                _ => None,
            })
            .collect();
        assert_eq!(fired, vec![near.to_bits().get()]);
        assert_ne!(fired[0], far.to_bits().get());
        assert_eq!(snap.projectiles.len(), 1);
        // Heading along +x.
        assert!(snap.projectiles[0].rotation.abs() < 1e-9);
    }

    #[test]
    fn test_weapon_respects_fire_rate() {
        let mut engine = active_engine();
        engine.spawn_test_enemy(
            DVec2::new(5.0, 0.0),
            WaveStats {
                health: 100.0,
                ..STATIONARY
            },
        );
        let snaps = run_ticks(&mut engine, 148);
        let events = all_events(&snaps);
        // Shots at ~0.04s, ~1.04s and ~2.04s inside a 3s window.
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ProjectileFired { .. })),
            3
        );
        assert_eq!(engine.score().projectiles_fired, 3);
    }

    #[test]
    fn test_no_fire_without_target_in_range() {
        let mut engine = active_engine();
        engine.spawn_test_enemy(DVec2::new(10.0, 0.0), STATIONARY);
        let snaps = run_ticks(&mut engine, 100);
        let events = all_events(&snaps);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ProjectileFired { .. })),
            0,
            "detection range is exclusive"
        );
        assert_eq!(engine.pool().active_count(), 0);
    }

    #[test]
    fn test_overlapping_enemies_take_single_hit() {
        let mut engine = active_engine();
        let first = engine.spawn_test_enemy(DVec2::new(2.0, 0.0), STATIONARY);
        let second = engine.spawn_test_enemy(DVec2::new(2.0, 0.0), STATIONARY);

        let snaps = run_ticks(&mut engine, 20);
        let events = all_events(&snaps);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::EnemyHit { .. })),
            1
        );
        assert_eq!(engine.current_health(first), Some(2.0));
        assert_eq!(engine.current_health(second), Some(3.0));
        assert_eq!(engine.pool().active_count(), 0);
        assert_eq!(engine.pool().free_count(), 20);
    }

    #[test]
    fn test_hit_schedules_flash_on_and_off() {
        let mut engine = active_engine();
        let enemy = engine.spawn_test_enemy(DVec2::new(2.0, 0.0), STATIONARY);
        let id = enemy.to_bits().get();

        let snaps = run_ticks(&mut engine, 30);
        let effects: Vec<VisualEffect> = snaps
            .iter()
            .flat_map(|s| s.effects.iter().cloned())
            .collect();
        assert_eq!(
            effects,
            vec![
                VisualEffect::HitFlash {
                    entity_id: id,
                    on: true
                },
                VisualEffect::HitFlash {
                    entity_id: id,
                    on: false
                },
            ]
        );
    }

    #[test]
    fn test_projectile_times_out_after_lifetime() {
        let mut engine = active_engine();
        let enemy = engine.spawn_test_enemy(DVec2::new(5.0, 0.0), STATIONARY);

        let snap = engine.tick();
        assert_eq!(snap.projectiles.len(), 1);
        let fired_at = engine.now();

        // Dead enemies are passed through, so the shot flies until timeout.
        assert_eq!(engine.damage_entity(enemy, 100.0), DamageOutcome::Killed);

        let mut expired_at = None;
        let mut last_active_at = fired_at;
        for _ in 0..300 {
            let snap = engine.tick();
            if snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileExpired { .. }))
            {
                expired_at = Some(engine.now());
                break;
            }
            assert_eq!(snap.projectiles.len(), 1);
            last_active_at = engine.now();
        }
        let expired_at = expired_at.expect("projectile should time out");
        assert!(
            expired_at >= fired_at + 5.0,
            "released early at {expired_at}, fired at {fired_at}"
        );
        assert!(
            expired_at - (fired_at + 5.0) <= DT + 1e-9,
            "expired at {expired_at}, fired at {fired_at}"
        );
        // Still in flight on the tick just before the deadline.
        assert!(last_active_at < fired_at + 5.0);
        assert!(fired_at + 5.0 - last_active_at <= DT + 1e-9);
        assert_eq!(engine.pool().active_count(), 0);
    }

    #[test]
    fn test_non_finite_frame_time_is_an_empty_frame() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);
        let snap = engine.tick();
        assert_eq!(snap.wave.current_wave, 1);
        let ticks_before = engine.time().tick;

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let snap = engine.step(bad);
            assert!(engine.now().is_finite());
            assert_eq!(snap.wave.current_wave, 1, "no wave forced by {bad}");
            assert_eq!(snap.enemies.len(), 5);
        }
        assert_eq!(engine.time().tick, ticks_before);

        for _ in 0..10 {
            engine.step(DT);
        }
        assert_eq!(engine.time().tick, ticks_before + 10);
        assert!(engine.now().is_finite());
        assert_eq!(engine.current_wave(), 1);
    }

    #[test]
    fn test_dead_enemy_is_not_targeted_and_removed_after_delay() {
        let mut engine = active_engine();
        let enemy = engine.spawn_test_enemy(DVec2::new(3.0, 0.0), STATIONARY);
        assert_eq!(engine.damage_entity(enemy, 5.0), DamageOutcome::Killed);
        assert!(engine.is_dead(enemy));

        let snaps = run_ticks(&mut engine, 9);
        let events = all_events(&snaps);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::ProjectileFired { .. })),
            0
        );
        assert!(engine.world().contains(enemy), "removal is deferred");
        assert_eq!(engine.pending_removals(), 1);
        let snap = snaps.last().unwrap();
        assert_eq!(snap.enemies.len(), 1);
        assert_eq!(snap.enemies[0].behavior, EnemyBehavior::Dead);

        run_ticks(&mut engine, 3);
        assert!(!engine.world().contains(enemy));
        assert!(engine.is_dead(enemy));
        assert_eq!(engine.current_health(enemy), None);
        assert_eq!(engine.pending_removals(), 0);
    }

    #[test]
    fn test_experience_granted_once_per_kill() {
        let mut engine = active_engine();
        let enemy = engine.spawn_test_enemy(
            DVec2::new(2.0, 0.0),
            WaveStats {
                health: 1.0,
                ..STATIONARY
            },
        );
        let snaps = run_ticks(&mut engine, 20);
        let events = all_events(&snaps);
        assert_eq!(
            count(&events, |e| matches!(e, GameEvent::EnemyKilled { .. })),
            1
        );
        assert_eq!(engine.progression().experience(), 1);
        assert_eq!(engine.score().enemies_killed, 1);

        // Further damage on the corpse is ignored.
        assert_eq!(engine.damage_entity(enemy, 1.0), DamageOutcome::Ignored);
        assert_eq!(engine.progression().experience(), 1);
        assert_eq!(engine.score().enemies_killed, 1);
    }

    #[test]
    fn test_level_up_raises_player_max_health() {
        let mut tuning = GameTuning::default();
        tuning.enemy.experience_value = 10;
        let mut engine = active_engine_with(SimConfig {
            tuning,
            ..Default::default()
        });
        let player = engine.player().unwrap();
        engine.damage_entity(player, 4.0);
        assert_eq!(engine.current_health(player), Some(6.0));

        engine.spawn_test_enemy(
            DVec2::new(2.0, 0.0),
            WaveStats {
                health: 1.0,
                ..STATIONARY
            },
        );
        let snaps = run_ticks(&mut engine, 20);
        let events = all_events(&snaps);
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));

        let snap = snaps.last().unwrap();
        assert_eq!(snap.progression.level, 2);
        assert_eq!(snap.progression.experience, 0);
        assert_eq!(snap.player.max_health, 13.0);
        assert_eq!(snap.player.current_health, 13.0);
    }

    #[test]
    fn test_enemy_strikes_respect_cooldown() {
        let mut engine = active_engine();
        let player = engine.player().unwrap();
        engine.spawn_test_enemy(
            DVec2::new(0.5, 0.0),
            WaveStats {
                health: 100.0,
                damage: 2.0,
                speed: 0.0,
            },
        );

        let snap = engine.tick();
        assert!(snap.events.contains(&GameEvent::PlayerDamaged {
            damage: 2.0,
            remaining_health: 8.0
        }));
        assert_eq!(snap.enemies[0].behavior, EnemyBehavior::Attack);

        run_ticks(&mut engine, 10);
        assert_eq!(engine.current_health(player), Some(8.0));

        run_ticks(&mut engine, 30);
        assert_eq!(engine.current_health(player), Some(6.0));
    }

    #[test]
    fn test_enemies_chase_player() {
        let mut engine = active_engine();
        let enemy = engine.spawn_test_enemy(
            DVec2::new(8.0, 0.0),
            WaveStats {
                speed: 2.0,
                ..STATIONARY
            },
        );
        run_ticks(&mut engine, 50);
        let snap = engine.tick();
        let view = snap
            .enemies
            .iter()
            .find(|e| e.id == enemy.to_bits().get())
            .unwrap();
        assert!(view.position.0.x < 7.0, "enemy at {:?}", view.position);
        assert_eq!(view.behavior, EnemyBehavior::Chase);
    }

    #[test]
    fn test_player_moves_with_input() {
        let mut engine = active_engine();
        engine.queue_command(PlayerCommand::SetMoveInput { x: 1.0, y: 0.0 });
        run_ticks(&mut engine, 51);
        let snap = engine.tick();
        // 5 units/s for roughly one second.
        assert!((snap.player.position.0.x - 5.0).abs() < 0.25);
        assert!(snap.player.position.0.y.abs() < 1e-9);
    }

    #[test]
    fn test_player_death_ends_session() {
        let mut engine = active_engine();
        engine.queue_command(PlayerCommand::StartSpawning);
        engine.spawn_test_enemy(
            DVec2::new(0.5, 0.0),
            WaveStats {
                health: 100.0,
                damage: 50.0,
                speed: 0.0,
            },
        );

        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert!(snap.player.is_dead);
        assert!(snap.events.contains(&GameEvent::PlayerDied));
        assert_eq!(snap.wave.state, SpawnerState::Idle);

        let frozen = engine.time().tick;
        run_ticks(&mut engine, 5);
        assert_eq!(engine.time().tick, frozen);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = active_engine();
        let player = engine.player().unwrap();
        engine.spawn_test_enemy(DVec2::new(3.0, 0.0), STATIONARY);
        engine.tick();
        assert_eq!(engine.pool().active_count(), 1);
        engine.damage_entity(player, 100.0);
        assert_eq!(engine.phase(), GamePhase::GameOver);

        engine.queue_command(PlayerCommand::StartSession);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.player.current_health, 10.0);
        assert_eq!(snap.score.enemies_killed, 0);
        assert_eq!(snap.wave.current_wave, 1);
        assert_eq!(snap.pool.size, 20, "pool survives the restart");
        assert_eq!(snap.time.tick, 1);
    }

    #[test]
    fn test_waves_escalate() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);
        let snaps = run_ticks(&mut engine, 160);
        let events = all_events(&snaps);
        let waves: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::WaveSpawned { wave, .. } => Some(*wave),
                _ => None,
            })
            .collect();
        assert_eq!(waves, vec![1, 2]);
        assert_eq!(engine.current_wave(), 2);
    }

    #[test]
    fn test_reset_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);
        run_ticks(&mut engine, 160);
        assert_eq!(engine.current_wave(), 2);

        engine.queue_commands([PlayerCommand::ResetWaves, PlayerCommand::ResetProgression]);
        let snap = engine.tick();
        // Still running, so wave 1 comes straight back.
        assert_eq!(snap.wave.state, SpawnerState::Spawning);
        assert_eq!(snap.wave.current_wave, 1);
        assert!(snap
            .events
            .contains(&GameEvent::WaveSpawned { wave: 1, count: 5 }));
        assert_eq!(snap.progression.level, 1);
        assert_eq!(snap.progression.experience, 0);
    }

    #[test]
    fn test_time_scale_command_clamps() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::SetTimeScale { scale: 10.0 });
        engine.tick();
        assert_eq!(engine.time_scale(), 4.0);
        engine.queue_command(PlayerCommand::SetTimeScale { scale: -1.0 });
        engine.tick();
        assert_eq!(engine.time_scale(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.tuning.weapon.fire_rate = 0.0;
        assert!(config.validate().is_err());
        assert!(SimConfig::default().validate().is_ok());
    }
}
