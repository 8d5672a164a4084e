//! Simulation constants and tuning parameters.
//!
//! Distances are arena units, times are seconds.

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 42;

/// Nominal step the caller is expected to use (60 Hz).
pub const NOMINAL_DT: f64 = 1.0 / 60.0;

// --- Arena ---

pub const ARENA_MIN_X: f64 = -10.0;
pub const ARENA_MAX_X: f64 = 10.0;
pub const ARENA_MIN_Y: f64 = -5.6;
pub const ARENA_MAX_Y: f64 = 5.6;

// --- Ship ---

/// Rectangle the craft is confined to.
pub const SHIP_MIN_X: f64 = -8.6;
pub const SHIP_MAX_X: f64 = -1.8;
pub const SHIP_MIN_Y: f64 = -4.7;
pub const SHIP_MAX_Y: f64 = 4.7;

pub const SHIP_START_X: f64 = -6.0;
pub const SHIP_START_Y: f64 = 0.0;

/// Craft collision radius against enemy projectiles.
pub const SHIP_HIT_RADIUS: f64 = 0.32;

/// Shield flash alpha lost per second.
pub const SHIELD_FLASH_DECAY: f64 = 2.5;

/// Bank angle (radians) at full lateral speed, for the renderer.
pub const SHIP_MAX_BANK: f64 = 0.55;

// --- Autopilot: retargeting ---

pub const RETARGET_MIN_SECS: f64 = 0.18;
pub const RETARGET_MAX_SECS: f64 = 0.46;

/// Enemies farther than this are never chosen as the engage target.
pub const ENGAGE_MAX_DIST: f64 = 11.0;

/// The craft lines up this far behind its engage target.
pub const ENGAGE_STANDOFF: f64 = 5.2;

pub const ENGAGE_LONGITUDINAL_WEIGHT: f64 = 0.35;
pub const ENGAGE_LATERAL_WEIGHT: f64 = 1.6;

/// Roam path: base frequencies (rad/s) of the two lateral and one longitudinal terms.
pub const ROAM_FREQ_LATERAL_A: f64 = 0.37;
pub const ROAM_FREQ_LATERAL_B: f64 = 0.91;
pub const ROAM_FREQ_LONGITUDINAL: f64 = 0.23;

// --- Autopilot: threat analysis ---

/// Extrapolation horizon for closest-approach tests.
pub const THREAT_HORIZON_SECS: f64 = 1.1;

/// Enemy projectiles beyond this distance are ignored.
pub const THREAT_PROJECTILE_RANGE: f64 = 5.0;

/// Enemies beyond this distance are ignored.
pub const THREAT_ENEMY_RANGE: f64 = 4.5;

/// Miss distance at which a threat stops contributing.
pub const THREAT_CLEARANCE: f64 = 1.2;

/// Enemy bodies weigh more than bullets.
pub const THREAT_ENEMY_WEIGHT: f64 = 1.4;

/// Aggregate threat at which panic saturates.
pub const PANIC_THREAT_FULL: f64 = 2.5;

/// Dodge vector gain when offsetting the desired point.
pub const DODGE_GAIN: f64 = 1.6;

// --- Autopilot: flight model ---

pub const SHIP_BASE_SPEED: f64 = 4.2;
pub const SHIP_PANIC_SPEED_BONUS: f64 = 3.4;
pub const SHIP_BASE_ACCEL: f64 = 14.0;
pub const SHIP_PANIC_ACCEL_BONUS: f64 = 22.0;

/// Desired velocity per unit of target offset.
pub const SHIP_FOLLOW_GAIN: f64 = 3.0;

/// Exponential drag coefficient (1/s).
pub const SHIP_DRAG: f64 = 1.6;

/// Velocity retained on the clamped axis after hitting a bound.
pub const BOUND_VELOCITY_RETAIN: f64 = 0.2;
pub const BOUND_VELOCITY_RETAIN_BREAKOUT: f64 = 0.6;

// --- Autopilot: edge breakout ---

/// Distance from a lateral bound that counts as "pinned".
pub const EDGE_PIN_MARGIN: f64 = 0.85;

/// Minimum threat for dwell to accumulate.
pub const BREAKOUT_THREAT_MIN: f64 = 0.35;

/// Dwell needed to force a breakout.
pub const BREAKOUT_TRIGGER_SECS: f64 = 0.65;

/// Fraction of the trigger at which pre-breakout begins.
pub const PRE_BREAKOUT_FRACTION: f64 = 0.45;

/// Pre-breakout is left only once dwell decays below this fraction of the trigger.
pub const PRE_BREAKOUT_EXIT_FRACTION: f64 = 0.2;

pub const BREAKOUT_HOLD_SECS: f64 = 0.55;

/// After a breakout, returning to the vacated edge is penalized this long.
pub const EDGE_COOLDOWN_SECS: f64 = 1.4;

/// Inward displacement of the desired point during a breakout.
pub const BREAKOUT_PUSH: f64 = 2.6;
pub const PRE_BREAKOUT_PUSH: f64 = 1.1;

// --- Autopilot: escape search ---

/// Candidate grid is ESCAPE_GRID_SIZE x ESCAPE_GRID_SIZE around the desired point.
pub const ESCAPE_GRID_SIZE: usize = 5;
pub const ESCAPE_SPACING: f64 = 0.9;
pub const ESCAPE_SPACING_PRE_BREAKOUT: f64 = 1.1;
pub const ESCAPE_SPACING_BREAKOUT: f64 = 1.35;

pub const ESCAPE_SIM_STEPS: usize = 8;
pub const ESCAPE_SIM_DT: f64 = 0.08;

pub const ESCAPE_COLLISION_PENALTY: f64 = 400.0;
pub const ESCAPE_NEAR_MISS_RADIUS: f64 = 1.0;
pub const ESCAPE_NEAR_MISS_WEIGHT: f64 = 60.0;
pub const ESCAPE_EDGE_WEIGHT: f64 = 8.0;
pub const ESCAPE_EDGE_MARGIN: f64 = 1.2;
pub const ESCAPE_CENTER_WEIGHT: f64 = 1.2;
pub const ESCAPE_CENTER_LOW_THREAT_BOOST: f64 = 2.5;
pub const ESCAPE_EDGE_RETURN_PENALTY: f64 = 30.0;
pub const ESCAPE_TARGET_WEIGHT: f64 = 0.6;

/// Enemies inside this corridor ahead of the craft trigger the escape search.
pub const LOOKAHEAD_CORRIDOR_AHEAD: f64 = 4.0;
pub const LOOKAHEAD_CORRIDOR_HALF_WIDTH: f64 = 1.6;

// --- Enemies ---

pub const ENEMY_SPAWN_X: f64 = 11.5;

/// Crossing below this x latches `has_entered_view`.
pub const VIEW_ENTER_X: f64 = 9.6;

/// Enemies behind this x are culled unless cue-bound.
pub const ENEMY_CULL_BEHIND_X: f64 = -12.5;
pub const ENEMY_CULL_Y: f64 = 8.0;

pub const ENEMY_BASE_SPEED: f64 = 2.6;
pub const ENEMY_SPEED_JITTER: f64 = 0.5;
pub const ENEMY_BASE_RADIUS: f64 = 0.42;

/// Damage flash decay rate (1/s, exponential).
pub const ENEMY_FLASH_DECAY: f64 = 6.0;

/// Lateral lanes cycled by the ambient spawner.
pub const SPAWN_LANES: [f64; 7] = [-3.2, 1.6, -0.8, 3.4, 0.0, -1.9, 2.5];

pub const FIRST_SPAWN_DELAY: f64 = 0.4;
pub const MIN_SPAWN_INTERVAL: f64 = 0.18;
pub const SPAWN_JITTER: f64 = 0.15;

/// Ambient spawning pauses above this many live enemies.
pub const MAX_AMBIENT_ENEMIES: usize = 40;

/// Reserved (cue) enemies fly within this speed band.
pub const RESERVED_MIN_SPEED: f64 = 1.6;
pub const RESERVED_MAX_SPEED: f64 = 6.0;

pub const SUPPORT_SPAWN_CAP_PER_TICK: usize = 2;

/// Unplanned cues this close need a natural candidate ahead of the craft.
pub const CUE_SUPPORT_HORIZON: f64 = 1.2;

// --- Enemy fire ---

pub const ENEMY_BULLET_SPEED: f64 = 5.2;
pub const ENEMY_BULLET_RADIUS: f64 = 0.12;
pub const ENEMY_BULLET_LIFE: f64 = 4.0;

/// Budget refill rate (bullets/s) before scaling.
pub const BULLET_RATE_BASE: f64 = 0.9;
pub const BULLET_RATE_INTENSITY_GAIN: f64 = 2.4;
pub const BULLET_RATE_MIN: f64 = 0.4;
pub const BULLET_RATE_MAX: f64 = 4.0;

/// Rolling-window cap on banked bullets.
pub const BULLET_BUDGET_CAP: f64 = 4.0;

pub const ENEMY_FIRE_MIN_AHEAD: f64 = 1.5;
pub const ENEMY_FIRE_MAX_AHEAD: f64 = 12.5;
pub const ENEMY_FIRE_COOLDOWN: f64 = 1.6;

pub const ENEMY_AIM_LEAD: f64 = 0.85;
pub const ENEMY_AIM_JITTER: f64 = 0.12;
pub const BURST_SPREAD: f64 = 0.09;

/// Aim relax: craft within this of a lateral bound ...
pub const AIM_RELAX_EDGE_MARGIN: f64 = 1.0;
/// ... with at least this many enemy bullets within AIM_RELAX_RADIUS.
pub const AIM_RELAX_DENSITY: usize = 4;
pub const AIM_RELAX_RADIUS: f64 = 3.0;
pub const AIM_RELAX_LEAD_SCALE: f64 = 0.35;
pub const AIM_RELAX_JITTER_SCALE: f64 = 1.8;

pub const MAX_BULLET_RATIO: f64 = 4.0;

// --- Player weapons ---

pub const MUZZLE_OFFSET: f64 = 0.45;

pub const BLASTER_SPEED: f64 = 16.0;
pub const BLASTER_RADIUS: f64 = 0.14;
pub const BLASTER_LIFE: f64 = 2.2;
pub const BLASTER_AMBIENT_INTERVAL: f64 = 0.42;

/// Guided cue shots keep their speed within these multiples of BLASTER_SPEED.
pub const CUE_SHOT_MIN_SPEED_SCALE: f64 = 0.45;
pub const CUE_SHOT_MAX_SPEED_SCALE: f64 = 2.4;

pub const LASER_RANGE: f64 = 15.0;
pub const LASER_BEAM_LIFE: f64 = 0.16;

pub const MISSILE_SPEED: f64 = 9.0;
pub const MISSILE_RADIUS: f64 = 0.18;
pub const MISSILE_LIFE: f64 = 4.0;

/// Lateral launch velocity of homing missiles before guidance takes over.
pub const MISSILE_LAUNCH_KICK: f64 = 3.0;

/// Guidance blend per second from the launch kick to the intercept course.
pub const MISSILE_GUIDANCE_RATE: f64 = 9.0;

// --- Cue scheduling ---

pub const CUE_MIN_LEAD: f64 = 0.2;
pub const CUE_NATURAL_MAX_LEAD: f64 = 0.8;
pub const CUE_RESERVE_MAX_LEAD: f64 = 2.2;

/// Acceptable box (relative to the predicted craft) for a candidate at cue time.
pub const CUE_MIN_AHEAD: f64 = 1.6;
pub const CUE_MAX_AHEAD: f64 = 12.0;
pub const CUE_IDEAL_AHEAD: f64 = 6.0;
pub const CUE_MAX_LATERAL: f64 = 4.2;

pub const CUE_LATERAL_WEIGHT: f64 = 1.4;
pub const CUE_LONGITUDINAL_WEIGHT: f64 = 0.6;

pub const FIRE_SOLVE_ITERATIONS: usize = 4;

/// Slack on the resolution overlap test.
pub const CUE_HIT_RADIUS_SCALE: f64 = 1.35;

pub const CATCH_UP_CAP_PER_TICK: usize = 2;
pub const CATCH_UP_AHEAD: f64 = 7.5;
pub const CATCH_UP_BEHIND: f64 = -0.5;
pub const CATCH_UP_MIN_LEAD: f64 = 0.25;
pub const CATCH_UP_LEAD_PAD: f64 = 0.12;

pub const MAX_CUE_RESOLUTIONS_PER_TICK: usize = 32;

pub const CUE_BASE_SCORE: u64 = 100;
pub const CUE_COMBO_BONUS_PER: u64 = 10;
pub const CUE_COMBO_BONUS_CAP: u64 = 900;

/// Score for destroying an enemy outside the cue path.
pub const AMBIENT_KILL_SCORE: u64 = 25;

// --- Projectile culling ---

pub const PROJECTILE_CULL_X: f64 = 13.0;
pub const PROJECTILE_CULL_Y: f64 = 8.0;

// --- Explosions ---

pub const EXPLOSION_BASE_LIFE: f64 = 0.45;
pub const EXPLOSION_POWER_LIFE_GAIN: f64 = 0.5;
pub const EXPLOSION_BASE_POWER: f64 = 0.6;
pub const EXPLOSION_POWER_GAIN: f64 = 0.8;
pub const EXPLOSION_VARIANTS: u8 = 4;

// --- Intensity ---

pub const DEFAULT_INTENSITY: f64 = 0.0;
pub const INTENSITY_FLOOR_PERCENTILE: f64 = 0.08;
pub const INTENSITY_CEILING_PERCENTILE: f64 = 0.92;
pub const MIN_INTENSITY_SPREAD: f64 = 0.12;
