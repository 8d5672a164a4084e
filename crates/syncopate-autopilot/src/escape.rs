//! Escape-target search.
//!
//! When any enemy projectile is live or an enemy sits in the craft's forward
//! corridor, a 5x5 grid of candidate offsets around the steering target is
//! evaluated by flying the craft model forward against linearly extrapolated
//! hazards. The cheapest
//! candidate becomes the new target; ties keep the first in row-major order.

use glam::DVec2;

use syncopate_core::constants::*;
use syncopate_core::enums::LateralEdge;

use crate::breakout::{distance_to_edge, BreakoutTracker};
use crate::flight;
use crate::pilot::Body;

/// Any live enemy projectile, or an enemy inside the lookahead corridor?
pub fn needs_escape(ship_pos: DVec2, projectiles: &[Body], enemies: &[Body]) -> bool {
    !projectiles.is_empty() || enemies.iter().any(|b| in_corridor(ship_pos, b.pos))
}

fn in_corridor(ship_pos: DVec2, p: DVec2) -> bool {
    let dx = p.x - ship_pos.x;
    let dy = (p.y - ship_pos.y).abs();
    (-0.5..=LOOKAHEAD_CORRIDOR_AHEAD).contains(&dx) && dy < LOOKAHEAD_CORRIDOR_HALF_WIDTH
}

/// Inputs to a single escape search.
#[derive(Debug, Clone, Copy)]
pub struct EscapeQuery<'a> {
    pub ship_pos: DVec2,
    pub ship_vel: DVec2,
    pub target: DVec2,
    pub panic: f64,
    pub tracker: &'a BreakoutTracker,
    pub projectiles: &'a [Body],
    pub enemies: &'a [Body],
}

/// Cost of steering toward `candidate` for the simulated horizon.
pub fn candidate_cost(query: &EscapeQuery<'_>, candidate: DVec2) -> f64 {
    let half_h = (SHIP_MAX_Y - SHIP_MIN_Y) * 0.5;
    let mid_y = (SHIP_MAX_Y + SHIP_MIN_Y) * 0.5;
    let breakout = query.tracker.state;

    let mut pos = query.ship_pos;
    let mut vel = query.ship_vel;
    let mut cost = 0.0;

    for step in 1..=ESCAPE_SIM_STEPS {
        let (p, v) = flight::step(pos, vel, candidate, query.panic, breakout, ESCAPE_SIM_DT);
        pos = p;
        vel = v;

        let t = step as f64 * ESCAPE_SIM_DT;
        let horizon = ESCAPE_SIM_STEPS as f64 * ESCAPE_SIM_DT;
        // Earlier steps weigh heavier.
        let imminence = 1.0 - (t - ESCAPE_SIM_DT) / horizon;

        for body in query.projectiles.iter().chain(query.enemies.iter()) {
            let hazard = body.pos + body.vel * t;
            let d = pos.distance(hazard);
            let hit = body.radius + SHIP_HIT_RADIUS;
            if d < hit {
                cost += ESCAPE_COLLISION_PENALTY * imminence;
            } else if d < hit + ESCAPE_NEAR_MISS_RADIUS {
                let k = (hit + ESCAPE_NEAR_MISS_RADIUS - d) / ESCAPE_NEAR_MISS_RADIUS;
                cost += ESCAPE_NEAR_MISS_WEIGHT * k * k * imminence;
            }
        }

        let edge_gap = (pos.y - SHIP_MIN_Y).min(SHIP_MAX_Y - pos.y);
        if edge_gap < ESCAPE_EDGE_MARGIN {
            let k = (ESCAPE_EDGE_MARGIN - edge_gap) / ESCAPE_EDGE_MARGIN;
            cost += ESCAPE_EDGE_WEIGHT * k * k / ESCAPE_SIM_STEPS as f64;
        }
    }

    let center_weight =
        ESCAPE_CENTER_WEIGHT * (1.0 + ESCAPE_CENTER_LOW_THREAT_BOOST * (1.0 - query.panic));
    let off_center = (pos.y - mid_y) / half_h;
    cost += center_weight * off_center * off_center;

    if let Some(edge) = query.tracker.cooldown_edge {
        if returns_to(pos, edge) {
            cost += ESCAPE_EDGE_RETURN_PENALTY;
        }
    }

    cost + ESCAPE_TARGET_WEIGHT * (candidate - query.target).length()
}

fn returns_to(pos: DVec2, edge: LateralEdge) -> bool {
    distance_to_edge(pos, edge) < EDGE_PIN_MARGIN * 1.5
}

/// Best candidate on the grid around `query.target`, clamped into bounds.
pub fn search(query: &EscapeQuery<'_>) -> DVec2 {
    let spacing = query.tracker.grid_spacing();
    let half = (ESCAPE_GRID_SIZE / 2) as i32;

    let mut best = flight::clamp_to_bounds(query.target);
    let mut best_cost = f64::INFINITY;

    for row in -half..=half {
        for col in -half..=half {
            let offset = DVec2::new(col as f64 * spacing, row as f64 * spacing);
            let candidate = flight::clamp_to_bounds(query.target + offset);
            let cost = candidate_cost(query, candidate);
            if cost < best_cost {
                best_cost = cost;
                best = candidate;
            }
        }
    }
    best
}
