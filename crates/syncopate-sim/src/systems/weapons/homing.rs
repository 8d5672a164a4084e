//! Homing missiles ("purple"): fire-and-forget. Launched with a lateral
//! kick, guided onto the enemy's predicted cue position, prime on contact.

use glam::DVec2;
use tracing::debug;

use syncopate_core::components::{Enemy, Missile};
use syncopate_core::constants::*;
use syncopate_core::enums::WeaponKind;
use syncopate_core::events::SimEvent;
use syncopate_core::types::{Position, Velocity};

use super::{solve_fire_time, WeaponModule};
use crate::cue::PlannedMissileShot;
use crate::state::{EntityIds, SimState};
use crate::systems::enemy_motion::predict_enemy_position;

pub struct Homing;

impl WeaponModule for Homing {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Homing
    }

    fn projectile_speed(&self) -> Option<f64> {
        Some(MISSILE_SPEED)
    }

    fn plan_cue(&self, state: &mut SimState, enemy_id: u32, cue_time: f64) -> bool {
        let Some((_, enemy, pos)) = state.enemy(enemy_id) else {
            return false;
        };
        let now = state.now();
        let aim = predict_enemy_position(&enemy, &pos, cue_time - now);
        let fire_time = solve_fire_time(state, aim, cue_time, MISSILE_SPEED).unwrap_or(now);

        let side = state.weapons.missile_side;
        state.weapons.missile_side = -side;

        state.planned.missiles.push(PlannedMissileShot {
            enemy_id,
            cue_time,
            fire_time,
            side,
        });
        true
    }

    fn fire_queued(&self, state: &mut SimState) {
        let now = state.now();
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.planned.missiles)
            .into_iter()
            .partition(|m| m.fire_time <= now);
        state.planned.missiles = rest;

        for planned in due {
            if state.find_enemy(planned.enemy_id).is_none() {
                debug!(enemy_id = planned.enemy_id, "Dropped missile launch, target gone");
                continue;
            }
            let velocity = DVec2::new(MISSILE_SPEED * 0.6, planned.side * MISSILE_LAUNCH_KICK);
            let id = EntityIds::next(&mut state.ids.missile);
            let muzzle = state.muzzle();
            state.world.spawn((
                Position::from_vec(muzzle),
                Velocity::from_vec(velocity),
                Missile {
                    id,
                    age: 0.0,
                    life: MISSILE_LIFE,
                    radius: MISSILE_RADIUS,
                    target_id: planned.enemy_id,
                    cue_time: planned.cue_time,
                },
            ));
            state.events.push(SimEvent::WeaponFired {
                weapon: WeaponKind::Homing,
                cue: true,
            });
        }
    }
}

/// Blend factor toward the guided velocity. Rises to 1 as the cue closes so the
/// missile lands on time.
pub fn guidance_blend(remaining: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        return 0.0;
    }
    (MISSILE_GUIDANCE_RATE * dt)
        .max(dt / remaining.max(dt))
        .min(1.0)
}

/// Predicted aim point for a missile chasing `enemy` toward `cue_time`.
pub fn missile_aim(enemy: &Enemy, pos: &Position, now: f64, cue_time: f64) -> DVec2 {
    predict_enemy_position(enemy, pos, (cue_time - now).max(0.0))
}
