//! Commands sent by the host to the simulation.
//!
//! Commands are queued and applied at the start of the next step.

use serde::{Deserialize, Serialize};

use crate::config::{CombatConfigPatch, EnemyRosterPatch, ShipWeaponsPatch};
use crate::enums::MoodProfile;
use crate::types::IntensitySample;

/// Every externally driven mutation of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Replace pending cues with offsets relative to the current time.
    SetCueTimeline { times: Vec<f64> },
    /// Full reset, then install an absolute cue timeline.
    StartTrackRun { times: Vec<f64> },
    SetIntensityTimeline { samples: Vec<IntensitySample> },
    SetRandomSeed { seed: u64 },
    SetMoodProfile { mood: MoodProfile },
    SetEnemyBulletRatio { ratio: f64 },
    PatchShipWeapons { patch: ShipWeaponsPatch },
    PatchEnemyRoster { patch: EnemyRosterPatch },
    PatchCombatConfig { patch: CombatConfigPatch },
}
