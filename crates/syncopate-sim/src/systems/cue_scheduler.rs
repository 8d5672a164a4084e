//! Cue scheduler: binds upcoming cues to enemies, synthesizes catch-up cues
//! and resolves due cues into hits or misses.
//!
//! Binding checks "already assigned" before it writes, so no enemy is ever
//! referenced by two cues at once.

use glam::DVec2;
use tracing::debug;

use syncopate_core::components::{Enemy, PlayerShot};
use syncopate_core::constants::*;
use syncopate_core::enums::{CueMissReason, CueOrigin, WeaponKind};
use syncopate_core::events::SimEvent;
use syncopate_core::types::Position;

use crate::cue::ScheduledCue;
use crate::state::SimState;
use crate::systems::enemy_motion::predict_enemy_position;
use crate::systems::spawner::{is_cue_candidate, spawn_cue_enemy};
use crate::systems::weapons::{module, weapon_pool};

/// Best unbound, unclaimed enemy for a cue `lead` seconds away. The preferred
/// (catch-up) enemy wins outright if it is still free.
fn select_candidate(state: &SimState, preferred: Option<u32>, lead: f64) -> Option<u32> {
    if let Some(id) = preferred {
        return state
            .enemy(id)
            .filter(|(_, e, _)| e.scheduled_cue_time.is_none())
            .map(|_| id);
    }

    let craft = state.predict_ship(lead);
    let mut best: Option<(u32, f64)> = None;
    for (_entity, (enemy, pos)) in state.world.query::<(&Enemy, &Position)>().iter() {
        if !is_cue_candidate(state, enemy, pos, lead) || state.cues.claims(enemy.id) {
            continue;
        }
        let at = predict_enemy_position(enemy, pos, lead);
        let score = (at.y - craft.y).abs() * CUE_LATERAL_WEIGHT
            + ((at.x - craft.x) - CUE_IDEAL_AHEAD).abs() * CUE_LONGITUDINAL_WEIGHT;
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

/// Bind cue `idx` to `enemy_id` using `weapon`. Returns whether the weapon accepted it.
fn bind(state: &mut SimState, idx: usize, enemy_id: u32, weapon: WeaponKind) -> bool {
    let Some(cue_time) = state.cues.as_slice().get(idx).map(|c| c.time) else {
        return false;
    };
    let Some(entity) = state.find_enemy(enemy_id) else {
        return false;
    };

    match state.world.get::<&mut Enemy>(entity) {
        Ok(mut enemy) => {
            if enemy.scheduled_cue_time.is_some() {
                return false;
            }
            enemy.scheduled_cue_time = Some(cue_time);
            enemy.cue_primed = false;
        }
        Err(_) => return false,
    }

    if !module(weapon).plan_cue(state, enemy_id, cue_time) {
        if let Ok(mut enemy) = state.world.get::<&mut Enemy>(entity) {
            enemy.scheduled_cue_time = None;
        }
        return false;
    }

    if let Some(cue) = state.cues.get_mut(idx) {
        cue.planned = true;
        cue.enemy_id = Some(enemy_id);
        cue.weapon = Some(weapon);
    }
    debug!(cue_time, enemy_id, ?weapon, "Bound cue");
    true
}

/// Plan every unplanned cue inside the planning horizon, in time order.
pub fn plan(state: &mut SimState) {
    let now = state.now();
    let pool = weapon_pool(&state.combat);
    if pool.is_empty() {
        return;
    }

    let mut idx = 0;
    while idx < state.cues.len() {
        let cue = &state.cues.as_slice()[idx];
        let (time, planned, origin, preferred) =
            (cue.time, cue.planned, cue.origin, cue.preferred_enemy);
        let lead = time - now;
        if lead > CUE_RESERVE_MAX_LEAD {
            break;
        }
        if planned || lead < CUE_MIN_LEAD {
            idx += 1;
            continue;
        }

        let weapon = pool[state.cue_weapon_cursor % pool.len()];
        let enemy_id = if origin == CueOrigin::CatchUp {
            select_candidate(state, preferred, lead)
        } else if lead > CUE_NATURAL_MAX_LEAD {
            spawn_cue_enemy(state, time)
        } else {
            select_candidate(state, None, lead).or_else(|| spawn_cue_enemy(state, time))
        };

        let bound = enemy_id.is_some_and(|id| bind(state, idx, id, weapon));
        if bound {
            state.cue_weapon_cursor = (state.cue_weapon_cursor + 1) % pool.len();
        } else if origin == CueOrigin::CatchUp {
            // Synthesized for an enemy that is no longer free.
            state.cues.remove(idx);
            continue;
        }
        idx += 1;
    }
}

/// Planning phase: bind track cues, then cover stray enemies with catch-up cues.
pub fn run(state: &mut SimState) {
    plan(state);
    if synthesize_catch_up(state) > 0 {
        plan(state);
    }
}

/// Synthesize cues for in-view enemies near the craft that no cue covers.
/// Returns how many were added.
pub fn synthesize_catch_up(state: &mut SimState) -> usize {
    if !state.combat.catch_up_enabled {
        return 0;
    }
    let pool = weapon_pool(&state.combat);
    let Some(&weapon) = pool.get(state.cue_weapon_cursor % pool.len().max(1)) else {
        return 0;
    };
    let speed = module(weapon).projectile_speed();

    let now = state.now();
    let ship = state.ship_pos();
    let muzzle = state.muzzle();

    let mut candidates: Vec<(f64, u32, DVec2)> = state
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (e, _))| e.has_entered_view && e.scheduled_cue_time.is_none())
        .filter(|(_, (_, p))| (CATCH_UP_BEHIND..=CATCH_UP_AHEAD).contains(&(p.x - ship.x)))
        .map(|(_, (e, p))| (p.x - ship.x, e.id, p.to_vec()))
        .collect();
    candidates.retain(|(_, id, _)| !state.cues.claims(*id));
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    candidates.truncate(CATCH_UP_CAP_PER_TICK);
    let added = candidates.len();
    for (_, enemy_id, pos) in candidates {
        let travel = speed.map_or(0.0, |s| muzzle.distance(pos) / s);
        let lead = (travel + CATCH_UP_LEAD_PAD).clamp(CATCH_UP_MIN_LEAD, CUE_NATURAL_MAX_LEAD);
        state.cues.insert(ScheduledCue::catch_up(now + lead, enemy_id));
        debug!(enemy_id, cue_time = now + lead, "Synthesized catch-up cue");
    }
    added
}

enum Outcome {
    Hit,
    Miss(CueMissReason),
}

fn evaluate(state: &SimState, cue: &ScheduledCue) -> Outcome {
    let Some(weapon) = cue.weapon else {
        return if weapon_pool(&state.combat).is_empty() {
            Outcome::Miss(CueMissReason::WeaponDisabled)
        } else {
            Outcome::Miss(CueMissReason::Unplanned)
        };
    };
    if !module(weapon).is_enabled(&state.combat) {
        return Outcome::Miss(CueMissReason::WeaponDisabled);
    }

    let Some((_, enemy, pos)) = cue.enemy_id.and_then(|id| state.enemy(id)) else {
        // Fire-and-forget: a vanished homing target counts as delivered.
        return if weapon == WeaponKind::Homing {
            Outcome::Hit
        } else {
            Outcome::Miss(CueMissReason::TargetLost)
        };
    };

    if enemy.cue_primed || overlapped_by_shot(state, &enemy, &pos) {
        Outcome::Hit
    } else {
        Outcome::Miss(CueMissReason::NoContact)
    }
}

fn overlapped_by_shot(state: &SimState, enemy: &Enemy, pos: &Position) -> bool {
    let reach = enemy.radius * CUE_HIT_RADIUS_SCALE;
    state
        .world
        .query::<(&PlayerShot, &Position)>()
        .iter()
        .any(|(_, (shot, p))| p.distance_to(pos) <= reach + shot.radius)
}

/// Resolve due cues, oldest first, at most `MAX_CUE_RESOLUTIONS_PER_TICK` per tick.
pub fn resolve(state: &mut SimState) {
    let now = state.now();
    for cue in state.cues.drain_due(now, MAX_CUE_RESOLUTIONS_PER_TICK) {
        let outcome = evaluate(state, &cue);
        if let Some(id) = cue.enemy_id {
            state.planned.drop_cue(id, cue.time);
        }

        match outcome {
            Outcome::Hit => {
                if let Some((entity, _, pos)) = cue.enemy_id.and_then(|id| state.enemy(id)) {
                    let _ = state.world.despawn(entity);
                    state.spawn_explosion(pos);
                }
                let error = (now - cue.time).max(0.0);
                let score_delta = state.score.record_hit(cue.origin, error);
                debug!(cue_time = cue.time, error_ms = error * 1000.0, "Cue hit");
                state.events.push(SimEvent::CueHit {
                    cue_time: cue.time,
                    error_ms: error * 1000.0,
                    combo: state.score.combo,
                    score_delta,
                    origin: cue.origin,
                });
            }
            Outcome::Miss(reason) => {
                if let Some(entity) = cue.enemy_id.and_then(|id| state.find_enemy(id)) {
                    if let Ok(mut enemy) = state.world.get::<&mut Enemy>(entity) {
                        enemy.scheduled_cue_time = None;
                        enemy.cue_primed = false;
                    }
                }
                state.score.record_miss(cue.origin);
                debug!(cue_time = cue.time, ?reason, "Cue missed");
                state.events.push(SimEvent::CueMiss {
                    cue_time: cue.time,
                    reason,
                    origin: cue.origin,
                });
            }
        }
    }
}
