//! Enemy kinematics.
//!
//! Longitudinal position integrates `vx`; lateral position is the closed-form
//! pattern evaluated at the enemy's age. Prediction and per-tick update share
//! the same formula so a cue planned now lands where the enemy really is.

use std::f64::consts::FRAC_2_PI;

use glam::DVec2;
use hecs::World;

use syncopate_core::components::{Enemy, MotionPattern};
use syncopate_core::constants::*;
use syncopate_core::enums::MotionPatternKind;
use syncopate_core::types::Position;

/// Lateral offset of `pattern` at age `t`.
pub fn pattern_offset(pattern: &MotionPattern, t: f64) -> f64 {
    let a = pattern.amplitude;
    let w = pattern.frequency;
    let phi = pattern.phase;
    match pattern.kind {
        MotionPatternKind::Straight => 0.0,
        MotionPatternKind::Sine => a * (phi + w * t).sin(),
        MotionPatternKind::Zigzag => a * FRAC_2_PI * (phi + w * t).sin().asin(),
        MotionPatternKind::Weave => {
            a * (0.7 * (phi + w * t).sin() + 0.3 * (1.7 * phi + 2.3 * w * t).sin())
        }
        MotionPatternKind::Arc => {
            a * (0.6 * (phi + w * t).sin() + 0.4 * (0.5 * phi + 0.5 * w * t).sin())
                + 0.25 * a * (0.21 * w * t + 0.3 * phi).sin()
        }
    }
}

/// Where `enemy` (currently at `pos`) will be `lead` seconds from now.
pub fn predict_enemy_position(enemy: &Enemy, pos: &Position, lead: f64) -> DVec2 {
    DVec2::new(
        pos.x + enemy.vx * lead,
        enemy.pattern.base_y + pattern_offset(&enemy.pattern, enemy.age + lead),
    )
}

/// Instantaneous velocity: `vx` plus the pattern's lateral derivative.
pub fn velocity(enemy: &Enemy) -> DVec2 {
    const PROBE: f64 = 0.05;
    let dy = (pattern_offset(&enemy.pattern, enemy.age + PROBE)
        - pattern_offset(&enemy.pattern, enemy.age))
        / PROBE;
    DVec2::new(enemy.vx, dy)
}

/// Heading of the enemy's motion (radians), for the renderer.
pub fn heading(enemy: &Enemy) -> f64 {
    let v = velocity(enemy);
    v.y.atan2(v.x)
}

/// Advance every enemy by `dt`: position, age, view latch, flash decay, fire cooldown.
pub fn run(world: &mut World, dt: f64) {
    let flash_keep = (-ENEMY_FLASH_DECAY * dt).exp();
    for (_entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &mut Position)>() {
        let next = predict_enemy_position(enemy, pos, dt);
        pos.x = next.x;
        pos.y = next.y;
        enemy.age += dt;

        if !enemy.has_entered_view && pos.x < VIEW_ENTER_X {
            enemy.has_entered_view = true;
        }
        enemy.flash *= flash_keep;
        if enemy.flash < 1e-3 {
            enemy.flash = 0.0;
        }
        enemy.fire_cooldown -= dt;
    }
}
