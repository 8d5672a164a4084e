//! Blaster: guided cue bolts plus ambient fire at unbound enemies.

use glam::DVec2;
use tracing::debug;

use syncopate_core::components::{CueShotGuide, Enemy, PlayerShot};
use syncopate_core::constants::*;
use syncopate_core::enums::WeaponKind;
use syncopate_core::events::SimEvent;
use syncopate_core::types::{direction, Position, Velocity};

use super::{guided_velocity, solve_fire_time, take_due_shots, WeaponModule};
use crate::cue::PlannedCueShot;
use crate::state::{EntityIds, SimState};
use crate::systems::enemy_motion::predict_enemy_position;

pub struct Blaster;

fn spawn_shot(state: &mut SimState, at: DVec2, velocity: DVec2, cue: Option<CueShotGuide>) {
    let id = EntityIds::next(&mut state.ids.shot);
    state.world.spawn((
        Position::from_vec(at),
        Velocity::from_vec(velocity),
        PlayerShot {
            id,
            age: 0.0,
            life: BLASTER_LIFE,
            radius: BLASTER_RADIUS,
            cue,
        },
    ));
}

/// Best ambient target: in view, ahead, not tied to any cue. Lateral offset weighs heavier.
fn ambient_target(state: &SimState) -> Option<u32> {
    let ship = state.ship_pos();
    let mut best: Option<(u32, f64)> = None;
    for (_entity, (enemy, pos)) in state.world.query::<(&Enemy, &Position)>().iter() {
        if !enemy.has_entered_view
            || enemy.scheduled_cue_time.is_some()
            || state.cues.claims(enemy.id)
        {
            continue;
        }
        let dx = pos.x - ship.x;
        if dx <= 0.5 || dx > CUE_MAX_AHEAD {
            continue;
        }
        let score = (pos.y - ship.y).abs() * CUE_LATERAL_WEIGHT + dx * 0.2;
        let better = match best {
            None => true,
            Some((id, s)) => score < s || (score == s && enemy.id < id),
        };
        if better {
            best = Some((enemy.id, score));
        }
    }
    best.map(|(id, _)| id)
}

impl WeaponModule for Blaster {
    fn kind(&self) -> WeaponKind {
        WeaponKind::Blaster
    }

    fn projectile_speed(&self) -> Option<f64> {
        Some(BLASTER_SPEED)
    }

    fn plan_cue(&self, state: &mut SimState, enemy_id: u32, cue_time: f64) -> bool {
        let Some((_, enemy, pos)) = state.enemy(enemy_id) else {
            return false;
        };
        let now = state.now();
        let aim = predict_enemy_position(&enemy, &pos, cue_time - now);
        let fire_time = solve_fire_time(state, aim, cue_time, BLASTER_SPEED).unwrap_or(now);
        state.planned.shots.push(PlannedCueShot {
            weapon: WeaponKind::Blaster,
            enemy_id,
            cue_time,
            fire_time,
        });
        true
    }

    fn fire_queued(&self, state: &mut SimState) {
        let now = state.now();
        for planned in take_due_shots(state, WeaponKind::Blaster) {
            let Some((_, enemy, pos)) = state.enemy(planned.enemy_id) else {
                debug!(enemy_id = planned.enemy_id, "Dropped blaster cue shot, target gone");
                continue;
            };
            let remaining = planned.cue_time - now;
            let aim = predict_enemy_position(&enemy, &pos, remaining.max(0.0));
            let muzzle = state.muzzle();
            let velocity = guided_velocity(muzzle, aim, remaining, BLASTER_SPEED);
            spawn_shot(
                state,
                muzzle,
                velocity,
                Some(CueShotGuide {
                    enemy_id: planned.enemy_id,
                    cue_time: planned.cue_time,
                }),
            );
            state.events.push(SimEvent::WeaponFired {
                weapon: WeaponKind::Blaster,
                cue: true,
            });
        }
    }

    fn step(&self, state: &mut SimState, dt: f64) {
        let interval = state.combat.ship_weapons.blaster.ambient_interval;
        if interval <= 0.0 {
            return;
        }
        state.weapons.blaster_ambient_timer -= dt;
        if state.weapons.blaster_ambient_timer > 0.0 {
            return;
        }

        let Some(target) = ambient_target(state) else {
            state.weapons.blaster_ambient_timer = 0.0;
            return;
        };
        let Some((_, enemy, pos)) = state.enemy(target) else {
            return;
        };

        // Two-pass lead on the bolt's travel time.
        let muzzle = state.muzzle();
        let mut aim = pos.to_vec();
        for _ in 0..2 {
            let travel = muzzle.distance(aim) / BLASTER_SPEED;
            aim = predict_enemy_position(&enemy, &pos, travel);
        }
        spawn_shot(state, muzzle, direction(muzzle, aim) * BLASTER_SPEED, None);
        state.events.push(SimEvent::WeaponFired {
            weapon: WeaponKind::Blaster,
            cue: false,
        });
        state.weapons.blaster_ambient_timer = interval;
    }
}
