//! Per-tick autopilot driver.

use glam::DVec2;

use syncopate_core::constants::*;
use syncopate_core::enums::BreakoutState;
use syncopate_core::rng::SimRng;

use crate::breakout::BreakoutTracker;
use crate::escape::{self, EscapeQuery};
use crate::flight;
use crate::threat;

/// A moving circle the autopilot reasons about.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
}

/// World view handed to the autopilot each tick.
#[derive(Debug, Clone, Copy)]
pub struct PilotContext<'a> {
    pub now: f64,
    pub ship_pos: DVec2,
    pub ship_vel: DVec2,
    pub enemies: &'a [Body],
    pub projectiles: &'a [Body],
}

/// Persistent autopilot state carried between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct AutopilotState {
    pub retarget_timer: f64,
    /// Point the craft is currently steering toward, before dodge and push.
    pub desired: DVec2,
    /// Per-run phase of the roaming Lissajous path.
    pub roam_phase: f64,
    pub breakout: BreakoutTracker,
    pub panic: f64,
    pub threat: f64,
}

impl AutopilotState {
    pub fn new(roam_phase: f64) -> Self {
        Self {
            retarget_timer: 0.0,
            desired: DVec2::new(SHIP_START_X, SHIP_START_Y),
            roam_phase,
            breakout: BreakoutTracker::default(),
            panic: 0.0,
            threat: 0.0,
        }
    }
}

impl Default for AutopilotState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Result of one autopilot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotOutput {
    pub position: DVec2,
    pub velocity: DVec2,
    pub panic: f64,
    pub breakout: BreakoutState,
}

/// Nearest enemy ahead of the craft, scored with lateral offset weighted heavier.
pub fn engage_target(ship_pos: DVec2, enemies: &[Body]) -> Option<&Body> {
    let mut best: Option<(&Body, f64)> = None;
    for enemy in enemies {
        let dx = enemy.pos.x - ship_pos.x;
        if dx <= 0.5 || ship_pos.distance(enemy.pos) > ENGAGE_MAX_DIST {
            continue;
        }
        let score = dx.abs() * ENGAGE_LONGITUDINAL_WEIGHT
            + (enemy.pos.y - ship_pos.y).abs() * ENGAGE_LATERAL_WEIGHT;
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((enemy, score));
        }
    }
    best.map(|(e, _)| e)
}

/// Smooth roaming point when nothing is worth engaging.
pub fn roam_point(now: f64, phase: f64) -> DVec2 {
    let mid_x = (SHIP_MIN_X + SHIP_MAX_X) * 0.5;
    let half_w = (SHIP_MAX_X - SHIP_MIN_X) * 0.5;
    let half_h = (SHIP_MAX_Y - SHIP_MIN_Y) * 0.5;
    let x = mid_x + half_w * 0.55 * (ROAM_FREQ_LONGITUDINAL * now + phase).sin();
    let y = half_h
        * 0.75
        * (0.6 * (ROAM_FREQ_LATERAL_A * now + 1.3 * phase).sin()
            + 0.4 * (ROAM_FREQ_LATERAL_B * now + 0.7 * phase).sin());
    DVec2::new(x, y)
}

fn retarget(state: &mut AutopilotState, ctx: &PilotContext<'_>, rng: &mut SimRng) {
    state.retarget_timer = rng.range(RETARGET_MIN_SECS, RETARGET_MAX_SECS);
    state.desired = match engage_target(ctx.ship_pos, ctx.enemies) {
        Some(enemy) => DVec2::new(
            enemy.pos.x - ENGAGE_STANDOFF,
            enemy.pos.y + enemy.vel.y * 0.3,
        ),
        None => roam_point(ctx.now, state.roam_phase),
    };
    state.desired = flight::clamp_to_bounds(state.desired);
}

/// Advance the autopilot one tick and integrate the craft.
pub fn drive(
    state: &mut AutopilotState,
    ctx: &PilotContext<'_>,
    rng: &mut SimRng,
    dt: f64,
) -> PilotOutput {
    state.retarget_timer -= dt;
    if state.retarget_timer <= 0.0 {
        retarget(state, ctx, rng);
    }

    let assessment = threat::analyze(ctx.ship_pos, ctx.ship_vel, ctx.projectiles, ctx.enemies);
    let panic = assessment.panic();
    state.panic = panic;
    state.threat = assessment.score;

    state.breakout.update(ctx.ship_pos, assessment.score, dt);

    let mut target = state.desired
        + assessment.dodge * DODGE_GAIN * (0.4 + 0.6 * panic)
        + state.breakout.push();
    target = flight::clamp_to_bounds(target);

    if escape::needs_escape(ctx.ship_pos, ctx.projectiles, ctx.enemies) {
        target = escape::search(&EscapeQuery {
            ship_pos: ctx.ship_pos,
            ship_vel: ctx.ship_vel,
            target,
            panic,
            tracker: &state.breakout,
            projectiles: ctx.projectiles,
            enemies: ctx.enemies,
        });
    }

    let (position, velocity) = flight::step(
        ctx.ship_pos,
        ctx.ship_vel,
        target,
        panic,
        state.breakout.state,
        dt,
    );

    PilotOutput {
        position,
        velocity,
        panic,
        breakout: state.breakout.state,
    }
}
