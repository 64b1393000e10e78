//! Enemy AI for SURVIVOR.
//!
//! Implements the chase/attack behaviour state machine as pure functions
//! over plain data.

pub mod fsm;

pub use survivor_core as core;
