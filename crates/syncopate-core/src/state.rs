//! Simulation snapshot: the complete visible state handed to the renderer each frame.
//!
//! Every entity list is sorted by id so the renderer can map entities 1:1.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity};

/// Immutable render-ready projection of the simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub time: SimTime,
    pub ship: ShipView,
    pub enemies: Vec<EnemyView>,
    pub shots: Vec<ProjectileView>,
    pub enemy_shots: Vec<ProjectileView>,
    pub missiles: Vec<ProjectileView>,
    pub beams: Vec<BeamView>,
    pub explosions: Vec<ExplosionView>,
    pub counts: EntityCounts,
    pub score: ScoreView,
    pub intensity: IntensityView,
    pub mood: MoodProfile,
    pub weapons: Vec<WeaponView>,
    pub pending_cues: u32,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub velocity: Velocity,
    /// Bank angle from lateral velocity (radians).
    pub bank: f64,
    pub shield_alpha: f64,
    pub breakout: BreakoutState,
    /// Autopilot panic factor (0..1).
    pub panic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub archetype: EnemyArchetype,
    pub position: Position,
    /// Facing from the motion direction (radians).
    pub rotation: f64,
    pub radius: f64,
    pub flash_alpha: f64,
    pub cue_bound: bool,
    pub primed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub position: Position,
    /// Heading (radians).
    pub rotation: f64,
    pub radius: f64,
    /// Fired for a cue.
    pub cue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamView {
    pub id: u32,
    pub from: Position,
    pub to: Position,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: u32,
    pub position: Position,
    /// Normalized age (0..1).
    pub progress: f64,
    pub variant: u8,
    pub power: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub enemy_count: u32,
    pub shot_count: u32,
    pub enemy_shot_count: u32,
    pub missile_count: u32,
    pub beam_count: u32,
    pub explosion_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Track cues that landed.
    pub cue_resolved_count: u32,
    /// Track cues that missed.
    pub cue_missed_count: u32,
    pub catch_up_resolved_count: u32,
    pub catch_up_missed_count: u32,
    /// Mean |resolution time - cue time| over all resolved cues.
    pub avg_cue_error_ms: f64,
    pub ambient_kills: u32,
    pub shield_hits: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityView {
    pub current: f64,
    /// Current value normalized into the floor..ceiling band.
    pub relative: f64,
    pub floor: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub enabled: bool,
}
