//! Threat analysis: closest-approach geometry for every incoming body,
//! folded into one dodge vector and one scalar threat score.

use glam::DVec2;

use syncopate_core::constants::*;

use crate::pilot::Body;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThreatAssessment {
    /// Weighted sum of "away" directions.
    pub dodge: DVec2,
    pub score: f64,
}

impl ThreatAssessment {
    /// Panic factor in `0..=1`.
    pub fn panic(&self) -> f64 {
        (self.score / PANIC_THREAT_FULL).clamp(0.0, 1.0)
    }
}

/// Closest approach of `rel_pos + rel_vel * t` to the origin for `t` in `0..=horizon`.
/// Returns `(t, offset at t)`.
pub fn closest_approach(rel_pos: DVec2, rel_vel: DVec2, horizon: f64) -> (f64, DVec2) {
    let speed_sq = rel_vel.length_squared();
    let t = if speed_sq < 1e-9 {
        0.0
    } else {
        (-rel_pos.dot(rel_vel) / speed_sq).clamp(0.0, horizon)
    };
    (t, rel_pos + rel_vel * t)
}

fn accumulate(
    out: &mut ThreatAssessment,
    ship_pos: DVec2,
    ship_vel: DVec2,
    body: &Body,
    range: f64,
    weight: f64,
) {
    let rel_pos = body.pos - ship_pos;
    if rel_pos.length_squared() > range * range {
        return;
    }
    let rel_vel = body.vel - ship_vel;
    let (t, closest) = closest_approach(rel_pos, rel_vel, THREAT_HORIZON_SECS);

    let clearance = THREAT_CLEARANCE + body.radius + SHIP_HIT_RADIUS;
    let miss = closest.length();
    if miss >= clearance {
        return;
    }

    let closeness = 1.0 - miss / clearance;
    let imminence = 1.0 - t / THREAT_HORIZON_SECS;
    let w = closeness * (0.35 + 0.65 * imminence) * weight;

    // Dead-center: sidestep perpendicular to the approach, toward the arena middle.
    let away = match (-closest).try_normalize() {
        Some(dir) => dir,
        None => {
            let side = rel_vel.perp().try_normalize().unwrap_or(DVec2::Y);
            if side.y * ship_pos.y > 0.0 {
                -side
            } else {
                side
            }
        }
    };

    out.dodge += away * w;
    out.score += w;
}

/// Score every enemy projectile and nearby enemy against the craft.
pub fn analyze(
    ship_pos: DVec2,
    ship_vel: DVec2,
    projectiles: &[Body],
    enemies: &[Body],
) -> ThreatAssessment {
    let mut out = ThreatAssessment::default();
    for body in projectiles {
        accumulate(&mut out, ship_pos, ship_vel, body, THREAT_PROJECTILE_RANGE, 1.0);
    }
    for body in enemies {
        accumulate(
            &mut out,
            ship_pos,
            ship_vel,
            body,
            THREAT_ENEMY_RANGE,
            THREAT_ENEMY_WEIGHT,
        );
    }
    out
}
