//! Per-tick phase systems.
//!
//! Systems are plain functions over `&mut SimState` (or `&mut World` when they
//! need nothing else). They keep no state of their own.

pub mod autopilot;
pub mod cleanup;
pub mod collision;
pub mod cue_scheduler;
pub mod enemy_fire;
pub mod enemy_motion;
pub mod pressure;
pub mod projectiles;
pub mod snapshot;
pub mod spawner;
pub mod weapons;
