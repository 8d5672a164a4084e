//! Laser: hitscan pulse fired exactly at the cue. The beam is a marker only;
//! the pulse primes its enemy directly.

use tracing::debug;

use syncopate_core::components::{Enemy, LaserBeam};
use syncopate_core::constants::*;
use syncopate_core::enums::WeaponKind;
use syncopate_core::events::SimEvent;
use syncopate_core::types::Position;

use super::{take_due_shots, WeaponModule};
use crate::cue::PlannedCueShot;
use crate::state::{EntityIds, SimState};

pub struct Laser;

impl WeaponModule for Laser {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Laser
    }

    fn projectile_speed(&self) -> Option<f64> {
        None
    }

    fn plan_cue(&self, state: &mut SimState, enemy_id: u32, cue_time: f64) -> bool {
        if state.find_enemy(enemy_id).is_none() {
            return false;
        }
        state.planned.shots.push(PlannedCueShot {
            weapon: WeaponKind::Laser,
            enemy_id,
            cue_time,
            fire_time: cue_time,
        });
        true
    }

    fn fire_queued(&self, state: &mut SimState) {
        for planned in take_due_shots(state, WeaponKind::Laser) {
            let Some((entity, enemy, pos)) = state.enemy(planned.enemy_id) else {
                debug!(enemy_id = planned.enemy_id, "Dropped laser pulse, target gone");
                continue;
            };

            let from = Position::from_vec(state.muzzle());
            let in_range = from.distance_to(&pos) <= LASER_RANGE;
            if in_range && enemy.scheduled_cue_time == Some(planned.cue_time) {
                if let Ok(mut e) = state.world.get::<&mut Enemy>(entity) {
                    e.cue_primed = true;
                    e.flash = 1.0;
                }
            }

            let id = EntityIds::next(&mut state.ids.beam);
            state.world.spawn((LaserBeam {
                id,
                from,
                to: pos,
                age: 0.0,
                life: LASER_BEAM_LIFE,
            },));
            state.events.push(SimEvent::WeaponFired {
                weapon: WeaponKind::Laser,
                cue: true,
            });
        }
    }
}
