//! Enemy fire: a shared bullet budget serviced round-robin over ready shooters.

use glam::DVec2;
use hecs::Entity;

use syncopate_core::components::{Enemy, EnemyShot};
use syncopate_core::constants::*;
use syncopate_core::types::{Position, Velocity};

use crate::profiles::{get_profile, mood_tuning};
use crate::state::{EntityIds, SimState};

/// Bullets per second at the current intensity, before the budget cap.
pub fn bullet_rate(state: &SimState) -> f64 {
    let base = (BULLET_RATE_BASE + state.intensity_now() * BULLET_RATE_INTENSITY_GAIN)
        .clamp(BULLET_RATE_MIN, BULLET_RATE_MAX);
    base * mood_tuning(state.mood).fire_scale * state.bullet_ratio * state.pressure.fire_rate_scale
}

/// Bullets in one burst.
pub fn burst_size(intensity: f64) -> usize {
    1 + usize::from(intensity >= 0.4) + usize::from(intensity >= 0.75)
}

/// Shooters whose cooldown has elapsed and that sit inside the firing band, sorted by id.
fn ready_shooters(state: &SimState) -> Vec<(u32, Entity, DVec2)> {
    let ship = state.ship_pos();
    let mut ready: Vec<(u32, Entity, DVec2)> = state
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (enemy, pos))| {
            let dx = pos.x - ship.x;
            get_profile(enemy.archetype).can_shoot
                && enemy.fire_cooldown <= 0.0
                && enemy.has_entered_view
                && (ENEMY_FIRE_MIN_AHEAD..=ENEMY_FIRE_MAX_AHEAD).contains(&dx)
        })
        .map(|(entity, (enemy, pos))| (enemy.id, entity, pos.to_vec()))
        .collect();
    ready.sort_by_key(|(id, _, _)| *id);
    ready
}

/// Enemy bullets within `AIM_RELAX_RADIUS` of the craft.
fn local_density(state: &SimState) -> usize {
    let ship = Position::from_vec(state.ship_pos());
    state
        .world
        .query::<(&EnemyShot, &Position)>()
        .iter()
        .filter(|(_, (_, p))| p.distance_to(&ship) <= AIM_RELAX_RADIUS)
        .count()
}

fn near_lateral_edge(ship: DVec2) -> bool {
    ship.y - SHIP_MIN_Y <= AIM_RELAX_EDGE_MARGIN || SHIP_MAX_Y - ship.y <= AIM_RELAX_EDGE_MARGIN
}

/// Craft pinned near a lateral edge inside a dense bullet field.
fn aim_relaxed(state: &SimState) -> bool {
    near_lateral_edge(state.ship_pos()) && local_density(state) >= AIM_RELAX_DENSITY
}

/// `(lead scale, jitter)` for aimed bursts.
fn aim_params(relaxed: bool) -> (f64, f64) {
    if relaxed {
        (
            ENEMY_AIM_LEAD * AIM_RELAX_LEAD_SCALE,
            ENEMY_AIM_JITTER * AIM_RELAX_JITTER_SCALE,
        )
    } else {
        (ENEMY_AIM_LEAD, ENEMY_AIM_JITTER)
    }
}

/// Fire one burst from `from`. Returns the number of bullets spawned.
fn fire_burst(state: &mut SimState, from: DVec2, bullets: usize, relaxed: bool) -> usize {
    let (lead_scale, jitter) = aim_params(relaxed);

    let travel = from.distance(state.ship_pos()) / ENEMY_BULLET_SPEED;
    let aim = state.predict_ship(travel * lead_scale);
    let heading = (aim - from).try_normalize().unwrap_or(DVec2::NEG_X);
    let heading = DVec2::from_angle(state.rng.range(-jitter, jitter)).rotate(heading);

    let mid = (bullets as f64 - 1.0) / 2.0;
    for i in 0..bullets {
        let dir = DVec2::from_angle((i as f64 - mid) * BURST_SPREAD).rotate(heading);
        let id = EntityIds::next(&mut state.ids.enemy_shot);
        state.world.spawn((
            Position::from_vec(from),
            Velocity::from_vec(dir * ENEMY_BULLET_SPEED),
            EnemyShot {
                id,
                age: 0.0,
                life: ENEMY_BULLET_LIFE,
                radius: ENEMY_BULLET_RADIUS,
            },
        ));
    }
    bullets
}

pub fn run(state: &mut SimState, dt: f64) {
    if state.bullet_ratio <= 0.0 {
        state.enemy_fire.budget = 0.0;
        return;
    }

    state.enemy_fire.budget =
        (state.enemy_fire.budget + bullet_rate(state) * dt).min(BULLET_BUDGET_CAP);
    if state.enemy_fire.budget < 1.0 {
        return;
    }

    let ready = ready_shooters(state);
    if ready.is_empty() {
        return;
    }

    let intensity = state.intensity_now();
    let relaxed = aim_relaxed(state);

    let mut serviced = 0;
    while serviced < ready.len() && state.enemy_fire.budget >= 1.0 {
        let idx = state.enemy_fire.cursor % ready.len();
        state.enemy_fire.cursor = (idx + 1) % ready.len();
        serviced += 1;

        let (_, entity, from) = ready[idx];
        let affordable = state.enemy_fire.budget.floor() as usize;
        let bullets = burst_size(intensity).min(affordable);
        let fired = fire_burst(state, from, bullets, relaxed);
        state.enemy_fire.budget -= fired as f64;

        let cooldown = ENEMY_FIRE_COOLDOWN * state.rng.range(0.8, 1.2);
        if let Ok(mut enemy) = state.world.get::<&mut Enemy>(entity) {
            enemy.fire_cooldown = cooldown * get_profile(enemy.archetype).cooldown_scale;
        }
    }
}
