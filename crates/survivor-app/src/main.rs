use std::process::ExitCode;
use std::time::Duration;

use survivor_app::control;
use survivor_app::options::{RunOptions, USAGE};
use survivor_app::state::AppState;
use survivor_core::commands::PlayerCommand;
use survivor_core::constants::TICK_RATE;
use survivor_core::enums::GamePhase;
use survivor_core::state::GameStateSnapshot;
use survivor_sim::engine::SimulationEngine;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match RunOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = options.config.validate() {
        log::error!("invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let result = if options.realtime {
        run_realtime(&options)
    } else {
        Ok(run_headless(&options))
    };

    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run as fast as possible on this thread.
fn run_headless(options: &RunOptions) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(options.config.clone());
    engine.queue_command(PlayerCommand::StartSession);

    let ticks = (options.seconds * TICK_RATE as f64).ceil() as u64;
    let mut snapshot = engine.tick();
    for _ in 1..ticks {
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        snapshot = engine.tick();
    }
    log::info!(
        "finished at {:.2}s: wave {}, {} kills, level {}",
        snapshot.time.elapsed_secs,
        snapshot.wave.current_wave,
        snapshot.score.enemies_killed,
        snapshot.progression.level
    );
    snapshot
}

/// Run on the game loop thread at wall-clock pace.
fn run_realtime(
    options: &RunOptions,
) -> Result<GameStateSnapshot, survivor_app::error::ControlError> {
    let state = AppState::new();
    control::start_simulation(&state, options.config.clone())?;
    control::send_command(&state, PlayerCommand::StartSession)?;

    std::thread::sleep(Duration::from_secs_f64(options.seconds));
    let snapshot = control::get_snapshot(&state)?;
    control::stop_simulation(&state)?;
    Ok(snapshot.unwrap_or_default())
}
