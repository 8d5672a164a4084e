//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Closed-form lateral motion parameters. The lateral position at age `t`
/// is `base_y + offset(kind, phase, amplitude, frequency, t)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionPattern {
    pub kind: MotionPatternKind,
    pub phase: f64,
    pub amplitude: f64,
    /// Angular frequency (rad/s).
    pub frequency: f64,
    pub base_y: f64,
}

/// Hostile craft. Paired with a `Position`; x advances by `vx`, y follows the pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub archetype: EnemyArchetype,
    /// Longitudinal velocity (negative: toward the craft).
    pub vx: f64,
    pub age: f64,
    pub pattern: MotionPattern,
    pub fire_cooldown: f64,
    pub radius: f64,
    /// Cue this enemy is sacrificed to. Set means no other cue may claim it.
    pub scheduled_cue_time: Option<f64>,
    /// A projectile already touched this cue-bound enemy.
    pub cue_primed: bool,
    /// Damage flash alpha, decays toward 0.
    pub flash: f64,
    /// Latched once the enemy crosses into view.
    pub has_entered_view: bool,
    /// Spawned by the scheduler for a specific cue.
    pub reserved: bool,
}

/// Homing data carried by a projectile fired for a cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CueShotGuide {
    pub enemy_id: u32,
    pub cue_time: f64,
}

/// Player projectile. Paired with `Position` + `Velocity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShot {
    pub id: u32,
    pub age: f64,
    pub life: f64,
    pub radius: f64,
    pub cue: Option<CueShotGuide>,
}

/// Enemy projectile. Paired with `Position` + `Velocity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShot {
    pub id: u32,
    pub age: f64,
    pub life: f64,
    pub radius: f64,
}

/// Homing missile. Paired with `Position` + `Velocity`. Collides only with its target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub age: f64,
    pub life: f64,
    pub radius: f64,
    pub target_id: u32,
    pub cue_time: f64,
}

/// Transient beam marker; not a collider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserBeam {
    pub id: u32,
    pub from: Position,
    pub to: Position,
    pub age: f64,
    pub life: f64,
}

/// Cosmetic explosion. Paired with `Position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub age: f64,
    pub life: f64,
    pub variant: u8,
    pub power: f64,
}
