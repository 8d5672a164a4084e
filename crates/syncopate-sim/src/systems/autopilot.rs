//! Autopilot phase: hands the craft's surroundings to the pilot and writes
//! back the integrated position and velocity.

use hecs::World;

use syncopate_autopilot::{drive, Body, PilotContext};
use syncopate_core::components::{Enemy, EnemyShot};
use syncopate_core::types::{Position, Velocity};

use crate::state::SimState;
use crate::systems::enemy_motion;

/// Enemy bodies sorted by id.
pub fn enemy_bodies(world: &World) -> Vec<Body> {
    let mut bodies: Vec<(u32, Body)> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (enemy, pos))| {
            (
                enemy.id,
                Body {
                    pos: pos.to_vec(),
                    vel: enemy_motion::velocity(enemy),
                    radius: enemy.radius,
                },
            )
        })
        .collect();
    bodies.sort_by_key(|(id, _)| *id);
    bodies.into_iter().map(|(_, b)| b).collect()
}

/// Enemy bullet bodies sorted by id.
pub fn projectile_bodies(world: &World) -> Vec<Body> {
    let mut bodies: Vec<(u32, Body)> = world
        .query::<(&EnemyShot, &Position, &Velocity)>()
        .iter()
        .map(|(_, (shot, pos, vel))| {
            (
                shot.id,
                Body {
                    pos: pos.to_vec(),
                    vel: vel.to_vec(),
                    radius: shot.radius,
                },
            )
        })
        .collect();
    bodies.sort_by_key(|(id, _)| *id);
    bodies.into_iter().map(|(_, b)| b).collect()
}

pub fn run(state: &mut SimState, dt: f64) {
    let enemies = enemy_bodies(&state.world);
    let projectiles = projectile_bodies(&state.world);
    let ctx = PilotContext {
        now: state.now(),
        ship_pos: state.ship_pos(),
        ship_vel: state.ship.velocity.to_vec(),
        enemies: &enemies,
        projectiles: &projectiles,
    };

    let out = drive(&mut state.autopilot, &ctx, &mut state.rng, dt);
    state.ship.position = Position::from_vec(out.position);
    state.ship.velocity = Velocity::from_vec(out.velocity);
}
