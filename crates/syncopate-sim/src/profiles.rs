//! Archetype and mood tuning tables.
//!
//! Consolidates per-archetype spawn/fire parameters and per-mood cadence scales.

use syncopate_core::constants::*;
use syncopate_core::enums::{EnemyArchetype, MoodProfile, MotionPatternKind};

/// Behavioral profile for an enemy archetype.
pub struct ArchetypeProfile {
    /// Multiplier on `ENEMY_BASE_SPEED`.
    pub speed_scale: f64,
    /// Multiplier on `ENEMY_BASE_RADIUS`.
    pub radius_scale: f64,
    pub can_shoot: bool,
    /// Multiplier on `ENEMY_FIRE_COOLDOWN` (lower fires more often).
    pub cooldown_scale: f64,
    /// Lateral amplitude of the motion pattern.
    pub amplitude: f64,
    /// Multiplier on the pattern's angular frequency.
    pub frequency_scale: f64,
    /// Patterns drawn from at spawn.
    pub patterns: &'static [MotionPatternKind],
}

/// Get the behavioral profile for a given archetype.
pub fn get_profile(archetype: EnemyArchetype) -> ArchetypeProfile {
    match archetype {
        EnemyArchetype::Scout => ArchetypeProfile {
            speed_scale: 1.0,
            radius_scale: 1.0,
            can_shoot: true,
            cooldown_scale: 1.0,
            amplitude: 1.1,
            frequency_scale: 1.0,
            patterns: &[
                MotionPatternKind::Sine,
                MotionPatternKind::Arc,
                MotionPatternKind::Straight,
            ],
        },
        EnemyArchetype::Striker => ArchetypeProfile {
            speed_scale: 1.55,
            radius_scale: 0.85,
            can_shoot: false,
            cooldown_scale: 1.0,
            amplitude: 0.8,
            frequency_scale: 1.3,
            patterns: &[MotionPatternKind::Zigzag, MotionPatternKind::Straight],
        },
        EnemyArchetype::Bruiser => ArchetypeProfile {
            speed_scale: 0.7,
            radius_scale: 1.45,
            can_shoot: true,
            cooldown_scale: 0.7,
            amplitude: 0.6,
            frequency_scale: 0.6,
            patterns: &[MotionPatternKind::Arc, MotionPatternKind::Straight],
        },
        EnemyArchetype::Swarmer => ArchetypeProfile {
            speed_scale: 1.2,
            radius_scale: 0.75,
            can_shoot: true,
            cooldown_scale: 1.4,
            amplitude: 1.5,
            frequency_scale: 1.6,
            patterns: &[MotionPatternKind::Weave, MotionPatternKind::Sine],
        },
    }
}

/// Collision radius for an archetype.
pub fn radius_for(archetype: EnemyArchetype) -> f64 {
    ENEMY_BASE_RADIUS * get_profile(archetype).radius_scale
}

/// Cadence scales applied by a mood profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodTuning {
    /// Multiplier on the ambient spawn interval (higher spawns less often).
    pub spawn_scale: f64,
    /// Multiplier on the enemy bullet rate.
    pub fire_scale: f64,
}

pub fn mood_tuning(mood: MoodProfile) -> MoodTuning {
    match mood {
        MoodProfile::Calm => MoodTuning {
            spawn_scale: 1.35,
            fire_scale: 0.6,
        },
        MoodProfile::Driving => MoodTuning {
            spawn_scale: 1.0,
            fire_scale: 1.0,
        },
        MoodProfile::Aggressive => MoodTuning {
            spawn_scale: 0.75,
            fire_scale: 1.45,
        },
    }
}
