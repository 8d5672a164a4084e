//! Simulation engine for Syncopate.
//!
//! Owns the hecs ECS world, advances every phase by a caller-supplied `dt`,
//! and produces `SimulationSnapshot`s for the renderer.

pub mod cue;
pub mod engine;
pub mod intensity;
pub mod profiles;
pub mod state;
pub mod systems;

pub use engine::{SimConfig, SimulationEngine};
pub use syncopate_core as core;

#[cfg(test)]
mod tests;
