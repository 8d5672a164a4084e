//! Player weapon modules.
//!
//! Each weapon kind implements `WeaponModule`; the scheduler and the fire
//! phase dispatch through `module(kind)` without knowing weapon mechanics.

pub mod blaster;
pub mod homing;
pub mod laser;

use glam::DVec2;

use syncopate_core::config::CombatConfig;
use syncopate_core::constants::*;
use syncopate_core::enums::WeaponKind;

use crate::cue::PlannedCueShot;
use crate::state::SimState;

/// Capabilities every weapon kind provides to the simulation.
pub trait WeaponModule: Sync {
    fn kind(&self) -> WeaponKind;

    fn is_enabled(&self, config: &CombatConfig) -> bool {
        config.ship_weapons.is_enabled(self.kind())
    }

    /// Nominal travel speed, `None` for hitscan. Used to size catch-up leads.
    fn projectile_speed(&self) -> Option<f64>;

    /// Queue whatever this weapon needs so the bound enemy dies at `cue_time`.
    /// Returns `false` if the enemy cannot be served.
    fn plan_cue(&self, state: &mut SimState, enemy_id: u32, cue_time: f64) -> bool;

    /// Fire queued cue shots whose fire time has come.
    fn fire_queued(&self, _state: &mut SimState) {}

    /// Continuous (non-cue) behavior.
    fn step(&self, _state: &mut SimState, _dt: f64) {}
}

static BLASTER: blaster::Blaster = blaster::Blaster;
static LASER: laser::Laser = laser::Laser;
static HOMING: homing::Homing = homing::Homing;

/// Lookup table keyed by weapon kind.
pub fn module(kind: WeaponKind) -> &'static dyn WeaponModule {
    match kind {
        WeaponKind::Blaster => &BLASTER,
        WeaponKind::Laser => &LASER,
        WeaponKind::Homing => &HOMING,
    }
}

/// Weighted round-robin pool over enabled weapons, in `WeaponKind::ALL` order.
pub fn weapon_pool(config: &CombatConfig) -> Vec<WeaponKind> {
    let mut pool = Vec::new();
    for kind in WeaponKind::ALL {
        if !module(kind).is_enabled(config) {
            continue;
        }
        let weight = config.ship_weapons.get(kind).planning_weight;
        pool.extend(std::iter::repeat(kind).take(weight as usize));
    }
    pool
}

/// Fire phase: every enabled module fires its due cue shots, then steps.
pub fn run(state: &mut SimState, dt: f64) {
    for kind in WeaponKind::ALL {
        let weapon = module(kind);
        if !weapon.is_enabled(&state.combat) {
            continue;
        }
        weapon.fire_queued(state);
        weapon.step(state, dt);
    }
}

/// Time at which a projectile of `speed` must leave the muzzle to reach `aim`
/// at `cue_time`. `None` when no fire time strictly inside `(now, cue_time)` works.
pub fn solve_fire_time(state: &SimState, aim: DVec2, cue_time: f64, speed: f64) -> Option<f64> {
    let now = state.now();
    let lead = cue_time - now;
    if lead <= 0.0 || speed <= 0.0 {
        return None;
    }

    let mut fire_time = (cue_time - lead * 0.5).clamp(now, cue_time);
    for _ in 0..FIRE_SOLVE_ITERATIONS {
        let muzzle = state.predict_ship(fire_time - now) + DVec2::new(MUZZLE_OFFSET, 0.0);
        fire_time = cue_time - muzzle.distance(aim) / speed;
    }

    (fire_time > now && fire_time < cue_time).then_some(fire_time)
}

/// Velocity that reaches `aim` in `remaining` seconds, with its speed held
/// inside the cue-shot band around `base_speed`.
pub fn guided_velocity(pos: DVec2, aim: DVec2, remaining: f64, base_speed: f64) -> DVec2 {
    let desired = (aim - pos) / remaining.max(1e-3);
    let min = base_speed * CUE_SHOT_MIN_SPEED_SCALE;
    let max = base_speed * CUE_SHOT_MAX_SPEED_SCALE;
    let speed = desired.length();
    if speed < 1e-9 {
        return DVec2::ZERO;
    }
    desired * (speed.clamp(min, max) / speed)
}

/// Remove and return `kind`'s queued cue shots that are due at `now`.
pub(crate) fn take_due_shots(state: &mut SimState, kind: WeaponKind) -> Vec<PlannedCueShot> {
    let now = state.now();
    let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.planned.shots)
        .into_iter()
        .partition(|s| s.weapon == kind && s.fire_time <= now);
    state.planned.shots = rest;
    due
}
