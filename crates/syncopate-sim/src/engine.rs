//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the `SimState` aggregate, processes host commands,
//! runs every phase in a fixed order and produces `SimulationSnapshot`s.
//! Completely headless and wall-clock free, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use tracing::{debug, info, warn};

use syncopate_core::commands::SimCommand;
use syncopate_core::components::{Enemy, PlayerShot};
use syncopate_core::config::{CombatConfig, CombatConfigPatch, EnemyRosterPatch, ShipWeaponsPatch};
use syncopate_core::constants::*;
use syncopate_core::enums::MoodProfile;
use syncopate_core::state::SimulationSnapshot;
use syncopate_core::types::{IntensitySample, SimTime};

use crate::cue::{CueTimeline, ScoreState};
use crate::intensity::IntensityTimeline;
use crate::state::{sanitize_bullet_ratio, SimState};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub mood: MoodProfile,
    /// Multiplier on the enemy bullet budget, clamped to `[0, 4]`.
    pub enemy_bullet_ratio: f64,
    pub combat: CombatConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            mood: MoodProfile::default(),
            enemy_bullet_ratio: 1.0,
            combat: CombatConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    state: SimState,
    command_queue: VecDeque<SimCommand>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: SimState::new(
                config.seed,
                config.mood,
                config.enemy_bullet_ratio,
                config.combat,
            ),
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds. Negative or non-finite `dt` is treated as 0.
    pub fn step(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.state.events.clear();
        self.process_commands();

        self.state.time.advance(dt);
        self.run_systems(dt);
    }

    /// Render-ready projection of the current state. Does not mutate anything.
    pub fn snapshot(&self) -> SimulationSnapshot {
        systems::snapshot::build_snapshot(&self.state)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.state.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.state.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.state.world
    }

    /// Pending cues, ascending by time.
    pub fn cues(&self) -> &CueTimeline {
        &self.state.cues
    }

    pub fn combat(&self) -> &CombatConfig {
        &self.state.combat
    }

    pub fn intensity(&self) -> &IntensityTimeline {
        &self.state.intensity
    }

    pub fn bullet_ratio(&self) -> f64 {
        self.state.bullet_ratio
    }

    pub fn seed(&self) -> u64 {
        self.state.seed
    }

    /// Apply a command immediately instead of at the next step.
    pub fn apply_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::SetCueTimeline { times } => self.set_cue_timeline(&times),
            SimCommand::StartTrackRun { times } => self.start_track_run(&times),
            SimCommand::SetIntensityTimeline { samples } => self.set_intensity_timeline(&samples),
            SimCommand::SetRandomSeed { seed } => self.set_random_seed(seed),
            SimCommand::SetMoodProfile { mood } => self.set_mood_profile(mood),
            SimCommand::SetEnemyBulletRatio { ratio } => self.set_enemy_bullet_ratio(ratio),
            SimCommand::PatchShipWeapons { patch } => self.patch_ship_weapons(&patch),
            SimCommand::PatchEnemyRoster { patch } => self.patch_enemy_roster(&patch),
            SimCommand::PatchCombatConfig { patch } => self.patch_combat_config(&patch),
        }
    }

    /// Replace pending cues with `offsets` seconds from now. Clears every
    /// binding, primed flag and queued cue shot; entities and score survive.
    pub fn set_cue_timeline(&mut self, offsets: &[f64]) {
        let now = self.state.now();
        let times = valid_times(offsets);
        self.clear_cue_bookkeeping();
        self.state.cues.replace(times.into_iter().map(|t| now + t));
        debug!(count = self.state.cues.len(), now, "Cue timeline replaced");
    }

    /// Full reset (entities, score, timers, ids, autopilot, RNG from the stored
    /// seed), then install `times` as an absolute timeline.
    pub fn start_track_run(&mut self, times: &[f64]) {
        self.state.reset_run();
        self.state.cues.replace(valid_times(times));
        info!(
            seed = self.state.seed,
            cues = self.state.cues.len(),
            "Track run started"
        );
    }

    pub fn set_intensity_timeline(&mut self, samples: &[IntensitySample]) {
        let (timeline, dropped) = IntensityTimeline::from_samples(samples);
        if dropped > 0 {
            warn!(dropped, "Dropped non-finite intensity samples");
        }
        debug!(
            samples = timeline.samples().len(),
            floor = timeline.floor(),
            ceiling = timeline.ceiling(),
            "Intensity timeline set"
        );
        self.state.intensity = timeline;
    }

    /// Store the seed and reseed the generator.
    pub fn set_random_seed(&mut self, seed: u64) {
        self.state.seed = seed;
        self.state.rng.reseed(seed);
        info!(seed, "Random seed set");
    }

    pub fn set_mood_profile(&mut self, mood: MoodProfile) {
        self.state.mood = mood;
    }

    pub fn set_enemy_bullet_ratio(&mut self, ratio: f64) {
        let clamped = sanitize_bullet_ratio(ratio);
        if clamped != ratio {
            warn!(ratio, clamped, "Enemy bullet ratio clamped");
        }
        self.state.bullet_ratio = clamped;
    }

    pub fn patch_ship_weapons(&mut self, patch: &ShipWeaponsPatch) {
        self.state.combat.ship_weapons.apply(patch);
        self.recompute_pressure();
    }

    pub fn patch_enemy_roster(&mut self, patch: &EnemyRosterPatch) {
        self.state.combat.enemy_roster.apply(patch);
        self.recompute_pressure();
    }

    pub fn patch_combat_config(&mut self, patch: &CombatConfigPatch) {
        self.state.combat.apply(patch);
        self.recompute_pressure();
    }

    fn recompute_pressure(&mut self) {
        self.state.pressure = systems::pressure::compute(&self.state.combat);
        debug!(
            spawn_interval_scale = self.state.pressure.spawn_interval_scale,
            fire_rate_scale = self.state.pressure.fire_rate_scale,
            "Combat pressure recomputed"
        );
    }

    fn clear_cue_bookkeeping(&mut self) {
        let state = &mut self.state;
        state.cues.clear();
        state.planned.clear();
        for (_entity, enemy) in state.world.query_mut::<&mut Enemy>() {
            enemy.scheduled_cue_time = None;
            enemy.cue_primed = false;
        }
        for (_entity, shot) in state.world.query_mut::<&mut PlayerShot>() {
            shot.cue = None;
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.apply_command(command);
        }
    }

    /// Run all phases in order.
    fn run_systems(&mut self, dt: f64) {
        let state = &mut self.state;
        // 1. Autopilot flight
        systems::autopilot::run(state, dt);
        // 2. Ambient spawning + cue support
        systems::spawner::run(state, dt);
        systems::spawner::ensure_cue_support(state);
        // 3. Cue planning (+ catch-up)
        systems::cue_scheduler::run(state);
        // 4. Queued and continuous weapon fire
        systems::weapons::run(state, dt);
        // 5. Enemy motion + enemy fire
        systems::enemy_motion::run(&mut state.world, dt);
        systems::enemy_fire::run(state, dt);
        // 6. Projectile kinematics
        systems::projectiles::run(state, dt);
        // 7. Collisions
        systems::collision::run(state);
        // 8. Cue resolution
        systems::cue_scheduler::resolve(state);
        // 9. Shield flash decay
        state.ship.shield_flash = (state.ship.shield_flash - SHIELD_FLASH_DECAY * dt).max(0.0);
        // 10. Cleanup
        systems::cleanup::run(&mut state.world, &mut state.despawn_buffer);
    }
}

/// Finite, non-negative cue times. Invalid entries are dropped with a warning.
fn valid_times(times: &[f64]) -> Vec<f64> {
    let valid: Vec<f64> = times
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .collect();
    if valid.len() != times.len() {
        warn!(
            dropped = times.len() - valid.len(),
            "Dropped invalid cue times"
        );
    }
    valid
}
