//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Feedback events, drained into the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A cue landed on time.
    CueHit {
        cue_time: f64,
        error_ms: f64,
        combo: u32,
        score_delta: u64,
        origin: CueOrigin,
    },
    /// A cue resolved without a kill.
    CueMiss {
        cue_time: f64,
        reason: CueMissReason,
        origin: CueOrigin,
    },
    /// An enemy died outside the cue path.
    EnemyDestroyed { enemy_id: u32 },
    /// An enemy projectile struck the craft's shield.
    ShieldHit,
    /// The craft fired a weapon.
    WeaponFired { weapon: WeaponKind, cue: bool },
}
