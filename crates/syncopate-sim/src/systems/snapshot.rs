//! Snapshot system: projects `SimState` into a `SimulationSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use syncopate_core::components::*;
use syncopate_core::constants::*;
use syncopate_core::enums::WeaponKind;
use syncopate_core::state::*;
use syncopate_core::types::{Position, Velocity};

use crate::state::SimState;
use crate::systems::enemy_motion;
use crate::systems::projectiles::rotation;

/// Build a complete SimulationSnapshot from the current state.
pub fn build_snapshot(state: &SimState) -> SimulationSnapshot {
    let world = &state.world;
    let enemies = build_enemies(world);
    let shots = build_shots(world);
    let enemy_shots = build_enemy_shots(world);
    let missiles = build_missiles(world);
    let beams = build_beams(world);
    let explosions = build_explosions(world);

    let counts = EntityCounts {
        enemy_count: enemies.len() as u32,
        shot_count: shots.len() as u32,
        enemy_shot_count: enemy_shots.len() as u32,
        missile_count: missiles.len() as u32,
        beam_count: beams.len() as u32,
        explosion_count: explosions.len() as u32,
    };

    SimulationSnapshot {
        time: state.time,
        ship: build_ship(state),
        enemies,
        shots,
        enemy_shots,
        missiles,
        beams,
        explosions,
        counts,
        score: build_score(state),
        intensity: IntensityView {
            current: state.intensity_now(),
            relative: state.relative_intensity_now(),
            floor: state.intensity.floor(),
            ceiling: state.intensity.ceiling(),
        },
        mood: state.mood,
        weapons: WeaponKind::ALL
            .iter()
            .map(|&kind| WeaponView {
                kind,
                enabled: state.combat.ship_weapons.is_enabled(kind),
            })
            .collect(),
        pending_cues: state.cues.len() as u32,
        events: state.events.clone(),
    }
}

/// Bank from lateral velocity; banking into the turn.
pub fn bank_angle(velocity: &Velocity) -> f64 {
    let max_speed = SHIP_BASE_SPEED + SHIP_PANIC_SPEED_BONUS;
    -(velocity.y / max_speed).clamp(-1.0, 1.0) * SHIP_MAX_BANK
}

fn build_ship(state: &SimState) -> ShipView {
    ShipView {
        position: state.ship.position,
        velocity: state.ship.velocity,
        bank: bank_angle(&state.ship.velocity),
        shield_alpha: state.ship.shield_flash,
        breakout: state.autopilot.breakout.state,
        panic: state.autopilot.panic,
    }
}

fn build_score(state: &SimState) -> ScoreView {
    let score = &state.score;
    ScoreView {
        score: score.score,
        combo: score.combo,
        max_combo: score.max_combo,
        cue_resolved_count: score.cue_resolved,
        cue_missed_count: score.cue_missed,
        catch_up_resolved_count: score.catch_up_resolved,
        catch_up_missed_count: score.catch_up_missed,
        avg_cue_error_ms: score.avg_cue_error_ms(),
        ambient_kills: score.ambient_kills,
        shield_hits: score.shield_hits,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_, (enemy, pos))| EnemyView {
            id: enemy.id,
            archetype: enemy.archetype,
            position: *pos,
            rotation: enemy_motion::heading(enemy),
            radius: enemy.radius,
            flash_alpha: enemy.flash,
            cue_bound: enemy.scheduled_cue_time.is_some(),
            primed: enemy.cue_primed,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_shots(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&PlayerShot, &Position, &Velocity)>()
        .iter()
        .map(|(_, (shot, pos, vel))| ProjectileView {
            id: shot.id,
            position: *pos,
            rotation: rotation(vel),
            radius: shot.radius,
            cue: shot.cue.is_some(),
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_enemy_shots(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&EnemyShot, &Position, &Velocity)>()
        .iter()
        .map(|(_, (shot, pos, vel))| ProjectileView {
            id: shot.id,
            position: *pos,
            rotation: rotation(vel),
            radius: shot.radius,
            cue: false,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_missiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Missile, &Position, &Velocity)>()
        .iter()
        .map(|(_, (missile, pos, vel))| ProjectileView {
            id: missile.id,
            position: *pos,
            rotation: rotation(vel),
            radius: missile.radius,
            cue: true,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_beams(world: &World) -> Vec<BeamView> {
    let mut views: Vec<BeamView> = world
        .query::<&LaserBeam>()
        .iter()
        .map(|(_, beam)| BeamView {
            id: beam.id,
            from: beam.from,
            to: beam.to,
            alpha: (1.0 - beam.age / beam.life).clamp(0.0, 1.0),
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    let mut views: Vec<ExplosionView> = world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (explosion, pos))| ExplosionView {
            id: explosion.id,
            position: *pos,
            progress: (explosion.age / explosion.life).clamp(0.0, 1.0),
            variant: explosion.variant,
            power: explosion.power,
        })
        .collect();

    views.sort_by_key(|v| v.id);
    views
}
