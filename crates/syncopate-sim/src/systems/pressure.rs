//! Combat pressure: spawn and fire multipliers derived from the loadout.
//!
//! A weaker loadout (fewer enabled weapons) stretches the spawn interval; a
//! roster with fewer shooters raises the per-shooter fire rate so the overall
//! bullet pressure holds. The default configuration maps to 1.0 / 1.0.

use serde::{Deserialize, Serialize};

use syncopate_core::config::CombatConfig;
use syncopate_core::enums::{EnemyArchetype, WeaponKind};

use crate::profiles::get_profile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatPressure {
    /// Multiplier on the ambient spawn interval.
    pub spawn_interval_scale: f64,
    /// Multiplier on the enemy bullet rate.
    pub fire_rate_scale: f64,
}

impl Default for CombatPressure {
    fn default() -> Self {
        Self {
            spawn_interval_scale: 1.0,
            fire_rate_scale: 1.0,
        }
    }
}

/// Relative killing power of each weapon.
fn weapon_power(kind: WeaponKind) -> f64 {
    match kind {
        WeaponKind::Blaster => 1.0,
        WeaponKind::Laser => 0.8,
        WeaponKind::Homing => 0.9,
    }
}

/// Share of total weapon power currently enabled, in `0..=1`.
pub fn weapon_share(config: &CombatConfig) -> f64 {
    let total: f64 = WeaponKind::ALL.iter().map(|&k| weapon_power(k)).sum();
    let enabled: f64 = WeaponKind::ALL
        .iter()
        .filter(|&&k| config.ship_weapons.is_enabled(k))
        .map(|&k| weapon_power(k))
        .sum();
    enabled / total
}

/// Spawn-weight share of enabled archetypes that can shoot, or `None` if the
/// enabled roster carries no weight.
pub fn shooter_share(config: &CombatConfig) -> Option<f64> {
    let mut total = 0.0;
    let mut shooters = 0.0;
    for archetype in EnemyArchetype::ALL {
        let settings = config.enemy_roster.get(archetype);
        if !settings.enabled {
            continue;
        }
        total += settings.spawn_weight;
        if get_profile(archetype).can_shoot {
            shooters += settings.spawn_weight;
        }
    }
    (total > 0.0).then(|| shooters / total)
}

/// Recompute pressure for `config`.
pub fn compute(config: &CombatConfig) -> CombatPressure {
    let baseline = CombatConfig::default();

    let weapons = weapon_share(config);
    let spawn_interval_scale = (1.0 + 0.6 * (1.0 - weapons)).clamp(1.0, 1.6);

    // The spawner falls back to a default shooter when the roster is empty.
    let shooters = shooter_share(config).unwrap_or(1.0);
    let base_shooters = shooter_share(&baseline).unwrap_or(1.0);
    let fire_rate_scale = if shooters <= 0.0 {
        1.0
    } else {
        let roster = (base_shooters / shooters).clamp(0.6, 1.6);
        let loadout = 0.7 + 0.3 * weapons;
        roster * loadout
    };

    CombatPressure {
        spawn_interval_scale,
        fire_rate_scale,
    }
}
