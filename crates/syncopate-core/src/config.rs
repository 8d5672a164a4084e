//! Runtime combat configuration and the patch types merged onto it.
//!
//! Patches carry `Option` fields; `None` leaves the current value untouched.

use serde::{Deserialize, Serialize};

use crate::constants::BLASTER_AMBIENT_INTERVAL;
use crate::enums::{EnemyArchetype, WeaponKind};

/// Per-weapon settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponSettings {
    pub enabled: bool,
    /// Repetitions of this weapon in the cue weapon pool.
    pub planning_weight: u32,
    /// Seconds between ambient (non-cue) shots; 0 disables ambient fire.
    pub ambient_interval: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipWeaponsConfig {
    pub blaster: WeaponSettings,
    pub laser: WeaponSettings,
    pub homing: WeaponSettings,
}

/// Per-archetype roster settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeSettings {
    pub enabled: bool,
    pub spawn_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyRosterConfig {
    pub scout: ArchetypeSettings,
    pub striker: ArchetypeSettings,
    pub bruiser: ArchetypeSettings,
    pub swarmer: ArchetypeSettings,
}

/// Complete combat configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    pub ship_weapons: ShipWeaponsConfig,
    pub enemy_roster: EnemyRosterConfig,
    /// Synthesize cues for enemies that slipped past normal planning.
    pub catch_up_enabled: bool,
    /// Spawn support enemies when near-future cues lack candidates.
    pub support_enabled: bool,
}

impl Default for ShipWeaponsConfig {
    fn default() -> Self {
        Self {
            blaster: WeaponSettings {
                enabled: true,
                planning_weight: 2,
                ambient_interval: BLASTER_AMBIENT_INTERVAL,
            },
            laser: WeaponSettings {
                enabled: true,
                planning_weight: 1,
                ambient_interval: 0.0,
            },
            homing: WeaponSettings {
                enabled: true,
                planning_weight: 1,
                ambient_interval: 0.0,
            },
        }
    }
}

impl ShipWeaponsConfig {
    pub fn get(&self, kind: WeaponKind) -> &WeaponSettings {
        match kind {
            WeaponKind::Blaster => &self.blaster,
            WeaponKind::Laser => &self.laser,
            WeaponKind::Homing => &self.homing,
        }
    }

    fn get_mut(&mut self, kind: WeaponKind) -> &mut WeaponSettings {
        match kind {
            WeaponKind::Blaster => &mut self.blaster,
            WeaponKind::Laser => &mut self.laser,
            WeaponKind::Homing => &mut self.homing,
        }
    }

    pub fn is_enabled(&self, kind: WeaponKind) -> bool {
        self.get(kind).enabled
    }

    pub fn apply(&mut self, patch: &ShipWeaponsPatch) {
        for kind in WeaponKind::ALL {
            if let Some(p) = patch.get(kind) {
                self.get_mut(kind).apply(p);
            }
        }
    }
}

impl WeaponSettings {
    fn apply(&mut self, patch: &WeaponPatch) {
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(weight) = patch.planning_weight {
            self.planning_weight = weight;
        }
        if let Some(interval) = patch.ambient_interval {
            if interval.is_finite() {
                self.ambient_interval = interval.max(0.0);
            }
        }
    }
}

impl Default for EnemyRosterConfig {
    fn default() -> Self {
        Self {
            scout: ArchetypeSettings {
                enabled: true,
                spawn_weight: 4.0,
            },
            striker: ArchetypeSettings {
                enabled: true,
                spawn_weight: 2.0,
            },
            bruiser: ArchetypeSettings {
                enabled: true,
                spawn_weight: 1.0,
            },
            swarmer: ArchetypeSettings {
                enabled: true,
                spawn_weight: 2.5,
            },
        }
    }
}

impl EnemyRosterConfig {
    pub fn get(&self, archetype: EnemyArchetype) -> &ArchetypeSettings {
        match archetype {
            EnemyArchetype::Scout => &self.scout,
            EnemyArchetype::Striker => &self.striker,
            EnemyArchetype::Bruiser => &self.bruiser,
            EnemyArchetype::Swarmer => &self.swarmer,
        }
    }

    fn get_mut(&mut self, archetype: EnemyArchetype) -> &mut ArchetypeSettings {
        match archetype {
            EnemyArchetype::Scout => &mut self.scout,
            EnemyArchetype::Striker => &mut self.striker,
            EnemyArchetype::Bruiser => &mut self.bruiser,
            EnemyArchetype::Swarmer => &mut self.swarmer,
        }
    }

    pub fn apply(&mut self, patch: &EnemyRosterPatch) {
        for archetype in EnemyArchetype::ALL {
            if let Some(p) = patch.get(archetype) {
                let settings = self.get_mut(archetype);
                if let Some(enabled) = p.enabled {
                    settings.enabled = enabled;
                }
                if let Some(weight) = p.spawn_weight {
                    if weight.is_finite() {
                        settings.spawn_weight = weight.max(0.0);
                    }
                }
            }
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            ship_weapons: ShipWeaponsConfig::default(),
            enemy_roster: EnemyRosterConfig::default(),
            catch_up_enabled: true,
            support_enabled: true,
        }
    }
}

impl CombatConfig {
    pub fn apply(&mut self, patch: &CombatConfigPatch) {
        if let Some(weapons) = &patch.ship_weapons {
            self.ship_weapons.apply(weapons);
        }
        if let Some(roster) = &patch.enemy_roster {
            self.enemy_roster.apply(roster);
        }
        if let Some(catch_up) = patch.catch_up_enabled {
            self.catch_up_enabled = catch_up;
        }
        if let Some(support) = patch.support_enabled {
            self.support_enabled = support;
        }
    }
}

// --- Patches ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponPatch {
    pub enabled: Option<bool>,
    pub planning_weight: Option<u32>,
    pub ambient_interval: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipWeaponsPatch {
    pub blaster: Option<WeaponPatch>,
    pub laser: Option<WeaponPatch>,
    pub homing: Option<WeaponPatch>,
}

impl ShipWeaponsPatch {
    pub fn get(&self, kind: WeaponKind) -> Option<&WeaponPatch> {
        match kind {
            WeaponKind::Blaster => self.blaster.as_ref(),
            WeaponKind::Laser => self.laser.as_ref(),
            WeaponKind::Homing => self.homing.as_ref(),
        }
    }

    /// Patch that only toggles one weapon.
    pub fn toggle(kind: WeaponKind, enabled: bool) -> Self {
        let p = Some(WeaponPatch {
            enabled: Some(enabled),
            ..Default::default()
        });
        match kind {
            WeaponKind::Blaster => Self {
                blaster: p,
                ..Default::default()
            },
            WeaponKind::Laser => Self {
                laser: p,
                ..Default::default()
            },
            WeaponKind::Homing => Self {
                homing: p,
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypePatch {
    pub enabled: Option<bool>,
    pub spawn_weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRosterPatch {
    pub scout: Option<ArchetypePatch>,
    pub striker: Option<ArchetypePatch>,
    pub bruiser: Option<ArchetypePatch>,
    pub swarmer: Option<ArchetypePatch>,
}

impl EnemyRosterPatch {
    pub fn get(&self, archetype: EnemyArchetype) -> Option<&ArchetypePatch> {
        match archetype {
            EnemyArchetype::Scout => self.scout.as_ref(),
            EnemyArchetype::Striker => self.striker.as_ref(),
            EnemyArchetype::Bruiser => self.bruiser.as_ref(),
            EnemyArchetype::Swarmer => self.swarmer.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfigPatch {
    pub ship_weapons: Option<ShipWeaponsPatch>,
    pub enemy_roster: Option<EnemyRosterPatch>,
    pub catch_up_enabled: Option<bool>,
    pub support_enabled: Option<bool>,
}
