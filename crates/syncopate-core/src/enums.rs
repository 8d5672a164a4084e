//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Player weapon kinds. Closed set; behavior lives in the sim's weapon modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Guided projectile fired on an intercept solution.
    Blaster,
    /// Instant beam fired at the cue time.
    Laser,
    /// Fire-and-forget homing missile (the "purple" weapon).
    Homing,
}

impl WeaponKind {
    /// Canonical order; the cue weapon pool is built in this order.
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Blaster, WeaponKind::Laser, WeaponKind::Homing];
}

/// Enemy template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Baseline fighter.
    #[default]
    Scout,
    /// Fast, small, never shoots.
    Striker,
    /// Slow, large, heavy fire.
    Bruiser,
    /// Small weaving craft with light fire.
    Swarmer,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 4] = [
        EnemyArchetype::Scout,
        EnemyArchetype::Striker,
        EnemyArchetype::Bruiser,
        EnemyArchetype::Swarmer,
    ];
}

/// Lateral motion pattern of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPatternKind {
    Straight,
    Sine,
    #[default]
    Arc,
    Zigzag,
    Weave,
}

/// Music mood; scales spawn cadence, fire rate and enemy speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodProfile {
    Calm,
    #[default]
    Driving,
    Aggressive,
}

/// Autopilot edge-breakout state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakoutState {
    #[default]
    Normal,
    PreBreakout,
    Breakout,
}

/// One of the two lateral bounds of the craft rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LateralEdge {
    Low,
    High,
}

/// Where a scheduled cue came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueOrigin {
    /// Supplied by the caller's timeline.
    #[default]
    Track,
    /// Synthesized for an enemy that slipped past normal planning.
    CatchUp,
}

/// Why a cue resolved as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueMissReason {
    /// The cue was never bound to an enemy and weapon.
    Unplanned,
    /// The bound weapon was disabled before the cue.
    WeaponDisabled,
    /// The bound enemy vanished and the weapon needs a real contact.
    TargetLost,
    /// The enemy was alive but nothing touched it.
    NoContact,
}
