//! Projectile kinematics: guided cue bolts, enemy bullets, missiles, plus
//! aging of beams and explosions.

use hecs::World;

use syncopate_core::components::{Enemy, EnemyShot, Explosion, LaserBeam, Missile, PlayerShot};
use syncopate_core::constants::*;
use syncopate_core::types::{Position, Velocity};

use crate::state::SimState;
use crate::systems::enemy_motion::predict_enemy_position;
use crate::systems::weapons::guided_velocity;
use crate::systems::weapons::homing::{guidance_blend, missile_aim};

/// Enemy state captured before projectiles move, sorted by id.
fn enemy_table(world: &World) -> Vec<(u32, Enemy, Position)> {
    let mut table: Vec<(u32, Enemy, Position)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (e, p))| (e.id, e.clone(), *p))
        .collect();
    table.sort_by_key(|(id, _, _)| *id);
    table
}

fn lookup(table: &[(u32, Enemy, Position)], id: u32) -> Option<(&Enemy, &Position)> {
    table
        .binary_search_by_key(&id, |(eid, _, _)| *eid)
        .ok()
        .map(|i| (&table[i].1, &table[i].2))
}

pub fn run(state: &mut SimState, dt: f64) {
    let now = state.now();
    let enemies = enemy_table(&state.world);

    // Cue bolts re-aim every tick so they arrive at the cue, not before.
    for (_entity, (shot, pos, vel)) in
        state
            .world
            .query_mut::<(&mut PlayerShot, &mut Position, &mut Velocity)>()
    {
        shot.age += dt;
        if let Some(guide) = shot.cue {
            if let Some((enemy, enemy_pos)) = lookup(&enemies, guide.enemy_id) {
                let remaining = guide.cue_time - now;
                if remaining > -dt {
                    let aim = predict_enemy_position(enemy, enemy_pos, remaining.max(0.0));
                    let steer =
                        guided_velocity(pos.to_vec(), aim, remaining.max(dt), BLASTER_SPEED);
                    *vel = Velocity::from_vec(steer);
                }
            }
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }

    for (_entity, (shot, pos, vel)) in state
        .world
        .query_mut::<(&mut EnemyShot, &mut Position, &Velocity)>()
    {
        shot.age += dt;
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }

    // Missiles chase their own target; without one they fly on ballistically.
    for (_entity, (missile, pos, vel)) in
        state
            .world
            .query_mut::<(&mut Missile, &mut Position, &mut Velocity)>()
    {
        missile.age += dt;
        if let Some((enemy, enemy_pos)) = lookup(&enemies, missile.target_id) {
            let remaining = missile.cue_time - now;
            let aim = missile_aim(enemy, enemy_pos, now, missile.cue_time);
            let desired = if remaining > 0.0 {
                guided_velocity(pos.to_vec(), aim, remaining.max(dt), MISSILE_SPEED)
            } else {
                // Past the cue: straight pursuit.
                (aim - pos.to_vec()).normalize_or_zero() * MISSILE_SPEED
            };
            let k = guidance_blend(remaining, dt);
            let current = vel.to_vec();
            *vel = Velocity::from_vec(current + (desired - current) * k);
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }

    for (_entity, beam) in state.world.query_mut::<&mut LaserBeam>() {
        beam.age += dt;
    }
    for (_entity, explosion) in state.world.query_mut::<&mut Explosion>() {
        explosion.age += dt;
    }
}

/// Heading (radians) of a velocity, for renderer rotation.
pub fn rotation(vel: &Velocity) -> f64 {
    if vel.to_vec().length_squared() < 1e-12 {
        0.0
    } else {
        vel.heading()
    }
}
