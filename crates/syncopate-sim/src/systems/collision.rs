//! Collision resolution. Contacts are collected against a frozen view of the
//! world first, then applied in id order.

use hecs::Entity;

use syncopate_core::components::{Enemy, EnemyShot, Missile, PlayerShot};
use syncopate_core::constants::*;
use syncopate_core::events::SimEvent;
use syncopate_core::types::Position;

use crate::state::SimState;

#[derive(Debug, Clone, Copy)]
struct EnemyTarget {
    entity: Entity,
    id: u32,
    pos: Position,
    radius: f64,
    bound: bool,
}

/// What a contact does to the enemy it touched.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Contact {
    Prime,
    Destroy,
}

fn enemy_targets(state: &SimState) -> Vec<EnemyTarget> {
    let mut targets: Vec<EnemyTarget> = state
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(entity, (enemy, pos))| EnemyTarget {
            entity,
            id: enemy.id,
            pos: *pos,
            radius: enemy.radius,
            bound: enemy.scheduled_cue_time.is_some(),
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}

fn sorted<T: Copy>(mut items: Vec<(u32, T)>) -> Vec<(u32, T)> {
    items.sort_by_key(|(id, _)| *id);
    items
}

pub fn run(state: &mut SimState) {
    let targets = enemy_targets(state);
    let mut destroyed: Vec<u32> = Vec::new();
    let mut contacts: Vec<(EnemyTarget, Contact)> = Vec::new();
    state.despawn_buffer.clear();

    // Player shots: first enemy in id order wins. A cue bolt passes through
    // enemies bound to other cues.
    let shots = sorted(
        state
            .world
            .query::<(&PlayerShot, &Position)>()
            .iter()
            .map(|(entity, (shot, pos))| {
                let guided = shot.cue.map(|guide| guide.enemy_id);
                (shot.id, (entity, *pos, shot.radius, guided))
            })
            .collect(),
    );
    for (_, (shot_entity, pos, radius, guided)) in shots {
        let hit = targets.iter().find(|t| {
            let passes = matches!(guided, Some(own) if t.bound && t.id != own);
            !passes && !destroyed.contains(&t.id) && t.pos.distance_to(&pos) <= t.radius + radius
        });
        if let Some(target) = hit {
            state.despawn_buffer.push(shot_entity);
            if target.bound {
                contacts.push((*target, Contact::Prime));
            } else {
                destroyed.push(target.id);
                contacts.push((*target, Contact::Destroy));
            }
        }
    }

    // Missiles only touch their own target.
    let missiles = sorted(
        state
            .world
            .query::<(&Missile, &Position)>()
            .iter()
            .map(|(entity, (m, pos))| (m.id, (entity, *pos, m.radius, m.target_id)))
            .collect(),
    );
    for (_, (missile_entity, pos, radius, target_id)) in missiles {
        let Some(target) = targets.iter().find(|t| t.id == target_id) else {
            continue;
        };
        if destroyed.contains(&target.id) || target.pos.distance_to(&pos) > target.radius + radius
        {
            continue;
        }
        state.despawn_buffer.push(missile_entity);
        if target.bound {
            contacts.push((*target, Contact::Prime));
        } else {
            destroyed.push(target.id);
            contacts.push((*target, Contact::Destroy));
        }
    }

    // Enemy bullets against the craft.
    let ship = Position::from_vec(state.ship_pos());
    let shield_hits: Vec<Entity> = sorted(
        state
            .world
            .query::<(&EnemyShot, &Position)>()
            .iter()
            .filter(|(_, (shot, pos))| pos.distance_to(&ship) <= SHIP_HIT_RADIUS + shot.radius)
            .map(|(entity, (shot, _))| (shot.id, entity))
            .collect(),
    )
    .into_iter()
    .map(|(_, entity)| entity)
    .collect();

    // Apply.
    for entity in state.despawn_buffer.drain(..) {
        let _ = state.world.despawn(entity);
    }

    for (target, contact) in contacts {
        match contact {
            Contact::Prime => {
                if let Ok(mut enemy) = state.world.get::<&mut Enemy>(target.entity) {
                    enemy.cue_primed = true;
                    enemy.flash = 1.0;
                }
            }
            Contact::Destroy => {
                if state.world.despawn(target.entity).is_ok() {
                    state.spawn_explosion(target.pos);
                    state.score.record_ambient_kill();
                    state.events.push(SimEvent::EnemyDestroyed {
                        enemy_id: target.id,
                    });
                }
            }
        }
    }

    for entity in shield_hits {
        if state.world.despawn(entity).is_ok() {
            state.ship.shield_flash = 1.0;
            state.score.shield_hits += 1;
            state.events.push(SimEvent::ShieldHit);
        }
    }
}
