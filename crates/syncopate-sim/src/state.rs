//! The single simulation state aggregate.
//!
//! Every phase function takes `&mut SimState`; nothing retains a borrow past
//! its own call.

use glam::DVec2;
use hecs::{Entity, World};

use syncopate_autopilot::AutopilotState;
use syncopate_core::components::{Enemy, Explosion};
use syncopate_core::config::CombatConfig;
use syncopate_core::constants::*;
use syncopate_core::enums::MoodProfile;
use syncopate_core::events::SimEvent;
use syncopate_core::rng::SimRng;
use syncopate_core::types::{Position, SimTime, Velocity};

use crate::cue::{CueTimeline, PlannedShots, ScoreState};
use crate::intensity::IntensityTimeline;
use crate::systems::pressure::{self, CombatPressure};

/// The player craft. Driven by the autopilot, never by the ECS.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipState {
    pub position: Position,
    pub velocity: Velocity,
    /// Shield flash alpha, 1.0 on hit, decays toward 0.
    pub shield_flash: f64,
}

impl Default for ShipState {
    fn default() -> Self {
        Self {
            position: Position::planar(SHIP_START_X, SHIP_START_Y),
            velocity: Velocity::default(),
            shield_flash: 0.0,
        }
    }
}

/// Per-kind incrementing id generators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityIds {
    pub enemy: u32,
    pub shot: u32,
    pub enemy_shot: u32,
    pub missile: u32,
    pub beam: u32,
    pub explosion: u32,
}

impl EntityIds {
    /// Hand out the next id from `counter` (ids start at 1).
    pub fn next(counter: &mut u32) -> u32 {
        *counter += 1;
        *counter
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerState {
    /// Seconds until the next ambient wave.
    pub timer: f64,
    /// Index into `SPAWN_LANES`, wrapped on use.
    pub lane_cursor: usize,
}

impl Default for SpawnerState {
    fn default() -> Self {
        Self {
            timer: FIRST_SPAWN_DELAY,
            lane_cursor: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyFireState {
    /// Shared bullet budget; one bullet costs 1.0.
    pub budget: f64,
    /// Round-robin index into the id-sorted ready list.
    pub cursor: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponState {
    pub blaster_ambient_timer: f64,
    /// Alternates the homing launch kick between sides.
    pub missile_side: f64,
}

impl Default for WeaponState {
    fn default() -> Self {
        Self {
            blaster_ambient_timer: 0.0,
            missile_side: 1.0,
        }
    }
}

/// Everything one simulation run owns.
pub struct SimState {
    pub world: World,
    pub time: SimTime,
    pub rng: SimRng,
    /// Seed restored by `start_track_run`.
    pub seed: u64,
    pub ids: EntityIds,
    pub ship: ShipState,
    pub autopilot: AutopilotState,
    pub cues: CueTimeline,
    /// Index into the weighted weapon pool; advances only on a successful bind.
    pub cue_weapon_cursor: usize,
    pub planned: PlannedShots,
    pub score: ScoreState,
    pub intensity: IntensityTimeline,
    pub mood: MoodProfile,
    pub bullet_ratio: f64,
    pub combat: CombatConfig,
    pub pressure: CombatPressure,
    pub spawner: SpawnerState,
    pub enemy_fire: EnemyFireState,
    pub weapons: WeaponState,
    /// Events produced during the current step.
    pub events: Vec<SimEvent>,
    pub despawn_buffer: Vec<Entity>,
}

impl SimState {
    pub fn new(seed: u64, mood: MoodProfile, bullet_ratio: f64, combat: CombatConfig) -> Self {
        let mut rng = SimRng::new(seed);
        let autopilot = AutopilotState::new(rng.range(0.0, std::f64::consts::TAU));
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng,
            seed,
            ids: EntityIds::default(),
            ship: ShipState::default(),
            autopilot,
            cues: CueTimeline::default(),
            cue_weapon_cursor: 0,
            planned: PlannedShots::default(),
            score: ScoreState::default(),
            intensity: IntensityTimeline::default(),
            mood,
            bullet_ratio: sanitize_bullet_ratio(bullet_ratio),
            pressure: pressure::compute(&combat),
            combat,
            spawner: SpawnerState::default(),
            enemy_fire: EnemyFireState::default(),
            weapons: WeaponState::default(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Reset entities, score, timers, ids and autopilot; reseed from the stored seed.
    /// Intensity, mood, bullet ratio and combat config survive.
    pub fn reset_run(&mut self) {
        let intensity = std::mem::take(&mut self.intensity);
        let mut fresh = Self::new(self.seed, self.mood, self.bullet_ratio, self.combat);
        fresh.intensity = intensity;
        *self = fresh;
    }

    pub fn now(&self) -> f64 {
        self.time.elapsed_secs
    }

    pub fn intensity_now(&self) -> f64 {
        self.intensity.value_at(self.now())
    }

    pub fn relative_intensity_now(&self) -> f64 {
        self.intensity.relative_at(self.now())
    }

    pub fn ship_pos(&self) -> DVec2 {
        self.ship.position.to_vec()
    }

    /// Muzzle point in front of the craft.
    pub fn muzzle(&self) -> DVec2 {
        self.ship_pos() + DVec2::new(MUZZLE_OFFSET, 0.0)
    }

    /// Craft position `lead` seconds ahead under constant velocity, clamped to bounds.
    pub fn predict_ship(&self, lead: f64) -> DVec2 {
        let p = self.ship_pos() + self.ship.velocity.to_vec() * lead.max(0.0);
        DVec2::new(
            p.x.clamp(SHIP_MIN_X, SHIP_MAX_X),
            p.y.clamp(SHIP_MIN_Y, SHIP_MAX_Y),
        )
    }

    /// Entity carrying the enemy with `id`.
    pub fn find_enemy(&self, id: u32) -> Option<Entity> {
        self.world
            .query::<&Enemy>()
            .iter()
            .find(|(_, enemy)| enemy.id == id)
            .map(|(entity, _)| entity)
    }

    /// Copy of the enemy with `id` and its position.
    pub fn enemy(&self, id: u32) -> Option<(Entity, Enemy, Position)> {
        self.world
            .query::<(&Enemy, &Position)>()
            .iter()
            .find(|(_, (enemy, _))| enemy.id == id)
            .map(|(entity, (enemy, pos))| (entity, enemy.clone(), *pos))
    }

    /// Spawn a cosmetic explosion whose size follows the relative intensity.
    pub fn spawn_explosion(&mut self, at: Position) {
        let power = EXPLOSION_BASE_POWER + EXPLOSION_POWER_GAIN * self.relative_intensity_now();
        let variant = self.rng.pick_index(EXPLOSION_VARIANTS as usize) as u8;
        let id = EntityIds::next(&mut self.ids.explosion);
        self.world.spawn((
            at,
            Explosion {
                id,
                age: 0.0,
                life: EXPLOSION_BASE_LIFE + EXPLOSION_POWER_LIFE_GAIN * power,
                variant,
                power,
            },
        ));
    }
}

/// Clamp a bullet ratio into `[0, MAX_BULLET_RATIO]`; non-finite becomes 1.0.
pub fn sanitize_bullet_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(0.0, MAX_BULLET_RATIO)
    } else {
        1.0
    }
}
