//! Control surface over the game loop thread.
//!
//! These functions bridge a host (the binary, or an embedding front end) to
//! the game loop through the shared `AppState`.

use survivor_core::commands::PlayerCommand;
use survivor_core::state::GameStateSnapshot;
use survivor_sim::engine::SimConfig;

use crate::error::ControlError;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Validate `config` and spawn the game loop thread.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<(), ControlError> {
    config.validate()?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(ControlError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())
        .map_err(ControlError::Spawn)?;

    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| ControlError::Poisoned)? = Some(handle);
    log::info!("simulation started");
    Ok(())
}

/// Forward a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), ControlError> {
    let tx_lock = state.command_tx.lock().map_err(|_| ControlError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(GameLoopCommand::PlayerCommand(command))
            .map_err(|_| ControlError::Disconnected),
        None => Err(ControlError::NotStarted),
    }
}

/// Latest published snapshot, `None` before the first tick.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, ControlError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| ControlError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the game loop to shut down and wait for it.
pub fn stop_simulation(state: &AppState) -> Result<(), ControlError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take()
        .ok_or(ControlError::NotStarted)?;
    // The loop may already be gone; joining below is what matters.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| ControlError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::warn!("game loop thread panicked");
        }
    }
    log::info!("simulation stopped");
    Ok(())
}
