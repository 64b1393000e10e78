//! Game loop thread: runs the simulation engine at `TICK_RATE` and publishes
//! snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary after construction. Commands arrive via an `mpsc` channel and the
//! latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use survivor_core::constants::TICK_RATE;
use survivor_core::events::GameEvent;
use survivor_core::state::GameStateSnapshot;
use survivor_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("survivor-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    log::debug!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::debug!("game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        log_events(&snapshot.events);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let effective_tick_duration = scaled_tick_duration(engine.time_scale());
        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Wall-clock duration of one tick at the given time scale.
/// A (near) zero scale falls back to the nominal rate.
pub fn scaled_tick_duration(time_scale: f64) -> Duration {
    if time_scale > 0.001 {
        TICK_DURATION.div_f64(time_scale)
    } else {
        TICK_DURATION
    }
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PlayerDied | GameEvent::LevelUp { .. } | GameEvent::WaveSpawned { .. } => {
                log::debug!("{event:?}")
            }
            _ => log::trace!("{event:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survivor_core::commands::PlayerCommand;
    use survivor_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartSession)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartSession);

        // Run enough ticks to populate enemies and projectiles
        for _ in 0..200 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut phase = None;
        while Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            phase = latest.lock().unwrap().as_ref().map(|s| s.phase);
            if phase == Some(GamePhase::Active) {
                break;
            }
        }
        assert_eq!(phase, Some(GamePhase::Active));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_tick_duration_constant() {
        // 50Hz = 20ms per tick
        assert_eq!(TICK_DURATION, Duration::from_millis(20));
        assert_eq!(scaled_tick_duration(2.0), Duration::from_millis(10));
        assert_eq!(scaled_tick_duration(0.0), TICK_DURATION);
    }
}
