//! Cleanup system: removes entities that left the playfield or expired.

use hecs::{Entity, World};

use syncopate_core::components::{Enemy, EnemyShot, Explosion, LaserBeam, Missile, PlayerShot};
use syncopate_core::constants::*;
use syncopate_core::types::Position;

fn out_of_play(pos: &Position) -> bool {
    pos.x.abs() > PROJECTILE_CULL_X || pos.y.abs() > PROJECTILE_CULL_Y
}

/// Remove culled enemies, spent projectiles and finished effects.
/// Cue-bound enemies are never culled; their cue resolves them.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        let gone = pos.x < ENEMY_CULL_BEHIND_X || pos.y.abs() > ENEMY_CULL_Y;
        if gone && enemy.scheduled_cue_time.is_none() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (shot, pos)) in world.query_mut::<(&PlayerShot, &Position)>() {
        if shot.age >= shot.life || out_of_play(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (shot, pos)) in world.query_mut::<(&EnemyShot, &Position)>() {
        if shot.age >= shot.life || out_of_play(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (missile, pos)) in world.query_mut::<(&Missile, &Position)>() {
        if missile.age >= missile.life || out_of_play(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, beam) in world.query_mut::<&LaserBeam>() {
        if beam.age >= beam.life {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.age >= explosion.life {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
