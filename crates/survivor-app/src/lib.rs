//! SURVIVOR headless host.
//!
//! Runs the simulation engine on a dedicated game-loop thread and exposes a
//! small control surface (start, send command, poll snapshot, stop) to the
//! binary or any embedding front end.

pub mod control;
pub mod error;
pub mod game_loop;
pub mod options;
pub mod state;

pub use survivor_core as core;
