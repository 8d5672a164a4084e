//! Enemy spawning: ambient waves on an intensity-driven cadence, cue support
//! spawns, and reserved enemies solved to arrive on a specific cue.

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::debug;

use syncopate_core::components::{Enemy, MotionPattern};
use syncopate_core::constants::*;
use syncopate_core::enums::{EnemyArchetype, MotionPatternKind};
use syncopate_core::types::Position;

use crate::profiles::{get_profile, mood_tuning, radius_for};
use crate::state::{EntityIds, SimState};
use crate::systems::enemy_motion::{pattern_offset, predict_enemy_position};

/// Everything needed to put one enemy into the world.
#[derive(Debug, Clone)]
pub struct EnemySpawn {
    pub archetype: EnemyArchetype,
    pub x: f64,
    pub vx: f64,
    pub pattern: MotionPattern,
    pub reserved: bool,
}

/// Spawn an enemy and return its id.
pub fn spawn_enemy(state: &mut SimState, spawn: EnemySpawn) -> u32 {
    let profile = get_profile(spawn.archetype);
    let id = EntityIds::next(&mut state.ids.enemy);
    let fire_cooldown = ENEMY_FIRE_COOLDOWN * profile.cooldown_scale * state.rng.range(0.3, 1.0);
    let y = spawn.pattern.base_y + pattern_offset(&spawn.pattern, 0.0);

    state.world.spawn((
        Position::planar(spawn.x, y),
        Enemy {
            id,
            archetype: spawn.archetype,
            vx: spawn.vx,
            age: 0.0,
            pattern: spawn.pattern,
            fire_cooldown,
            radius: radius_for(spawn.archetype),
            scheduled_cue_time: None,
            cue_primed: false,
            flash: 0.0,
            has_entered_view: spawn.x < VIEW_ENTER_X,
            reserved: spawn.reserved,
        },
    ));
    id
}

/// Weighted draw among enabled archetypes; Scout when nothing carries weight.
pub fn draw_archetype(state: &mut SimState) -> EnemyArchetype {
    let roster = state.combat.enemy_roster;
    let total: f64 = EnemyArchetype::ALL
        .iter()
        .map(|&a| roster.get(a))
        .filter(|s| s.enabled)
        .map(|s| s.spawn_weight)
        .sum();
    if total <= 0.0 {
        return EnemyArchetype::default();
    }

    let mut roll = state.rng.range(0.0, total);
    for archetype in EnemyArchetype::ALL {
        let settings = roster.get(archetype);
        if !settings.enabled || settings.spawn_weight <= 0.0 {
            continue;
        }
        if roll < settings.spawn_weight {
            return archetype;
        }
        roll -= settings.spawn_weight;
    }
    // Floating-point remainder: last enabled archetype with weight.
    EnemyArchetype::ALL
        .into_iter()
        .rev()
        .find(|&a| roster.get(a).enabled && roster.get(a).spawn_weight > 0.0)
        .unwrap_or_default()
}

/// Random pattern for `archetype` centered on `base_y`, kept inside the arena.
fn roll_pattern(state: &mut SimState, archetype: EnemyArchetype, base_y: f64) -> MotionPattern {
    let profile = get_profile(archetype);
    let kind = profile.patterns[state.rng.pick_index(profile.patterns.len())];
    let amplitude = match kind {
        MotionPatternKind::Straight => 0.0,
        _ => profile.amplitude * state.rng.range(0.7, 1.1),
    };
    let frequency = state.rng.range(0.8, 1.6) * profile.frequency_scale;
    let phase = state.rng.range(0.0, TAU);
    let limit = (ARENA_MAX_Y - 1.25 * amplitude).max(0.0);
    MotionPattern {
        kind,
        phase,
        amplitude,
        frequency,
        base_y: base_y.clamp(-limit, limit),
    }
}

fn ambient_enemy_count(state: &SimState) -> usize {
    state
        .world
        .query::<&Enemy>()
        .iter()
        .filter(|(_, e)| !e.reserved)
        .count()
}

/// Seconds until the next ambient wave.
pub fn spawn_interval(state: &mut SimState) -> f64 {
    let intensity = state.intensity_now();
    let jitter = state.rng.range(1.0 - SPAWN_JITTER, 1.0 + SPAWN_JITTER);
    let interval = (0.9 - intensity * 0.5)
        * mood_tuning(state.mood).spawn_scale
        * state.pressure.spawn_interval_scale
        * jitter;
    interval.max(MIN_SPAWN_INTERVAL)
}

/// Size of an ambient wave at the given intensity.
pub fn wave_size(state: &mut SimState, intensity: f64) -> usize {
    let mut size = 1;
    if intensity >= 0.55 {
        size += 1;
    }
    if intensity >= 0.85 && state.rng.chance(0.5) {
        size += 1;
    }
    size
}

fn spawn_ambient(state: &mut SimState) -> u32 {
    let archetype = draw_archetype(state);
    let lane = SPAWN_LANES[state.spawner.lane_cursor % SPAWN_LANES.len()];
    state.spawner.lane_cursor = (state.spawner.lane_cursor + 1) % SPAWN_LANES.len();

    let profile = get_profile(archetype);
    let speed = (ENEMY_BASE_SPEED + state.rng.range(-ENEMY_SPEED_JITTER, ENEMY_SPEED_JITTER))
        * profile.speed_scale;
    let pattern = roll_pattern(state, archetype, lane);
    spawn_enemy(
        state,
        EnemySpawn {
            archetype,
            x: ENEMY_SPAWN_X,
            vx: -speed,
            pattern,
            reserved: false,
        },
    )
}

/// Ambient wave cadence.
pub fn run(state: &mut SimState, dt: f64) {
    state.spawner.timer -= dt;
    if state.spawner.timer > 0.0 {
        return;
    }

    let intensity = state.intensity_now();
    let size = wave_size(state, intensity);
    for _ in 0..size {
        if ambient_enemy_count(state) >= MAX_AMBIENT_ENEMIES {
            break;
        }
        spawn_ambient(state);
    }

    let interval = spawn_interval(state);
    state.spawner.timer = (state.spawner.timer + interval).max(MIN_SPAWN_INTERVAL);
}

/// Could this enemy take a cue landing `lead` seconds from now?
pub fn is_cue_candidate(state: &SimState, enemy: &Enemy, pos: &Position, lead: f64) -> bool {
    if enemy.scheduled_cue_time.is_some() || !enemy.has_entered_view {
        return false;
    }
    let craft = state.predict_ship(lead);
    let at = predict_enemy_position(enemy, pos, lead);
    let dx = at.x - craft.x;
    let dy = (at.y - craft.y).abs();
    (CUE_MIN_AHEAD..=CUE_MAX_AHEAD).contains(&dx) && dy <= CUE_MAX_LATERAL
}

/// Spawn support enemies when near-future cues outnumber viable candidates.
pub fn ensure_cue_support(state: &mut SimState) {
    if !state.combat.support_enabled {
        return;
    }
    let now = state.now();
    let leads: Vec<f64> = state
        .cues
        .as_slice()
        .iter()
        .filter(|c| !c.planned)
        .map(|c| c.time - now)
        .filter(|lead| (CUE_MIN_LEAD..=CUE_SUPPORT_HORIZON).contains(lead))
        .collect();
    // Timeline is ascending, so the first lead is the earliest.
    let Some(&earliest) = leads.first() else {
        return;
    };
    let needed = leads.len();

    let view: &SimState = state;
    let available = view
        .world
        .query::<(&Enemy, &Position)>()
        .iter()
        .filter(|(_, (e, p))| is_cue_candidate(view, e, p, earliest) && !view.cues.claims(e.id))
        .count();

    let deficit = needed.saturating_sub(available).min(SUPPORT_SPAWN_CAP_PER_TICK);
    for _ in 0..deficit {
        let ship = state.ship_pos();
        let archetype = draw_archetype(state);
        let profile = get_profile(archetype);
        let lateral_limit = ARENA_MAX_Y - 1.0;
        let y = (ship.y + state.rng.range(-1.2, 1.2)).clamp(-lateral_limit, lateral_limit);
        let x = (ship.x + CUE_IDEAL_AHEAD + 1.0).min(VIEW_ENTER_X - 0.2);
        let speed = ENEMY_BASE_SPEED * profile.speed_scale.min(1.0);
        let id = spawn_enemy(
            state,
            EnemySpawn {
                archetype,
                x,
                vx: -speed,
                pattern: MotionPattern {
                    kind: MotionPatternKind::Straight,
                    base_y: y,
                    ..Default::default()
                },
                reserved: false,
            },
        );
        debug!(enemy_id = id, "Spawned cue support enemy");
    }
}

/// Spawn an enemy solved to sit `CUE_IDEAL_AHEAD` in front of the craft at `cue_time`.
/// Returns `None` when the cue is not in the future.
pub fn spawn_cue_enemy(state: &mut SimState, cue_time: f64) -> Option<u32> {
    let lead = cue_time - state.now();
    if lead <= 0.0 {
        return None;
    }

    let craft = state.predict_ship(lead);
    let target = DVec2::new(craft.x + CUE_IDEAL_AHEAD, {
        let lateral_limit = ARENA_MAX_Y - 1.0;
        (craft.y + state.rng.range(-0.6, 0.6)).clamp(-lateral_limit, lateral_limit)
    });

    let speed = ((ENEMY_SPAWN_X - target.x) / lead).clamp(RESERVED_MIN_SPEED, RESERVED_MAX_SPEED);
    let start_x = target.x + speed * lead;

    let archetype = draw_archetype(state);
    let profile = get_profile(archetype);
    let mut pattern = MotionPattern {
        kind: MotionPatternKind::Sine,
        phase: state.rng.range(0.0, TAU),
        amplitude: profile.amplitude * 0.6,
        frequency: state.rng.range(0.8, 1.4) * profile.frequency_scale,
        base_y: 0.0,
    };
    // Age at arrival equals the lead.
    pattern.base_y = target.y - pattern_offset(&pattern, lead);

    let id = spawn_enemy(
        state,
        EnemySpawn {
            archetype,
            x: start_x,
            vx: -speed,
            pattern,
            reserved: true,
        },
    );
    debug!(enemy_id = id, cue_time, lead, "Spawned reserved cue enemy");
    Some(id)
}
