//! Ship autopilot for SYNCOPATE.
//!
//! Retargeting, threat analysis, the edge-breakout state machine, the
//! escape-target grid search and the velocity-controlled flight model.
//! Pure functions over plain data; no ECS dependency.

pub mod breakout;
pub mod escape;
pub mod flight;
pub mod pilot;
pub mod threat;

pub use pilot::{drive, AutopilotState, Body, PilotContext, PilotOutput};
pub use syncopate_core as core;

#[cfg(test)]
mod tests;
