//! Velocity-controlled flight model shared by the real craft and the escape search.

use glam::DVec2;

use syncopate_core::constants::*;
use syncopate_core::enums::BreakoutState;

/// Speed and acceleration limits for a panic factor in `0..=1`.
pub fn limits(panic: f64) -> (f64, f64) {
    let panic = panic.clamp(0.0, 1.0);
    (
        SHIP_BASE_SPEED + SHIP_PANIC_SPEED_BONUS * panic,
        SHIP_BASE_ACCEL + SHIP_PANIC_ACCEL_BONUS * panic,
    )
}

/// Clamp a point into the craft rectangle.
pub fn clamp_to_bounds(p: DVec2) -> DVec2 {
    DVec2::new(
        p.x.clamp(SHIP_MIN_X, SHIP_MAX_X),
        p.y.clamp(SHIP_MIN_Y, SHIP_MAX_Y),
    )
}

/// One step toward `target`: proportional desired velocity, acceleration-limited
/// approach, exponential drag, integration, then bound clamping with damping.
pub fn step(
    pos: DVec2,
    vel: DVec2,
    target: DVec2,
    panic: f64,
    breakout: BreakoutState,
    dt: f64,
) -> (DVec2, DVec2) {
    let (max_speed, max_accel) = limits(panic);

    let desired = ((target - pos) * SHIP_FOLLOW_GAIN).clamp_length_max(max_speed);
    let dv = (desired - vel).clamp_length_max(max_accel * dt);
    let mut vel = (vel + dv) * (-SHIP_DRAG * dt).exp();
    let mut pos = pos + vel * dt;

    let retain = if breakout == BreakoutState::Breakout {
        BOUND_VELOCITY_RETAIN_BREAKOUT
    } else {
        BOUND_VELOCITY_RETAIN
    };

    if pos.x < SHIP_MIN_X || pos.x > SHIP_MAX_X {
        pos.x = pos.x.clamp(SHIP_MIN_X, SHIP_MAX_X);
        vel.x *= retain;
    }
    if pos.y < SHIP_MIN_Y || pos.y > SHIP_MAX_Y {
        pos.y = pos.y.clamp(SHIP_MIN_Y, SHIP_MAX_Y);
        vel.y *= retain;
    }

    (pos, vel)
}
