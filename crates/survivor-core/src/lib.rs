//! Core types and definitions for the SURVIVOR simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the combat state machine, commands, state snapshots,
//! events, tunables and constants. It has no dependency on the ECS or any
//! runtime framework.

pub mod combat;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
