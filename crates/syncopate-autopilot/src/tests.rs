#[cfg(test)]
mod tests {
    use glam::DVec2;

    use syncopate_core::constants::*;
    use syncopate_core::enums::{BreakoutState, LateralEdge};
    use syncopate_core::rng::SimRng;

    use crate::breakout::{pinned_edge, BreakoutTracker};
    use crate::escape::{self, EscapeQuery};
    use crate::flight;
    use crate::pilot::{drive, engage_target, roam_point, AutopilotState, Body, PilotContext};
    use crate::threat::{analyze, closest_approach};

    fn bullet(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body {
            pos: DVec2::new(x, y),
            vel: DVec2::new(vx, vy),
            radius: ENEMY_BULLET_RADIUS,
        }
    }

    fn in_bounds(p: DVec2) -> bool {
        p.x >= SHIP_MIN_X && p.x <= SHIP_MAX_X && p.y >= SHIP_MIN_Y && p.y <= SHIP_MAX_Y
    }

    #[test]
    fn test_closest_approach_head_on() {
        let (t, offset) = closest_approach(DVec2::new(4.0, 0.0), DVec2::new(-4.0, 0.0), 2.0);
        assert!((t - 1.0).abs() < 1e-12);
        assert!(offset.length() < 1e-12);
    }

    #[test]
    fn test_closest_approach_receding_is_now() {
        let (t, offset) = closest_approach(DVec2::new(2.0, 0.0), DVec2::new(3.0, 0.0), 2.0);
        assert_eq!(t, 0.0);
        assert_eq!(offset, DVec2::new(2.0, 0.0));
    }

    #[test]
    fn test_no_threat_when_empty() {
        let assessment = analyze(DVec2::ZERO, DVec2::ZERO, &[], &[]);
        assert_eq!(assessment.score, 0.0);
        assert_eq!(assessment.panic(), 0.0);
        assert_eq!(assessment.dodge, DVec2::ZERO);
    }

    #[test]
    fn test_bullet_passing_above_pushes_down() {
        let ship = DVec2::new(-5.0, 0.0);
        let b = bullet(-2.0, 0.4, -5.2, 0.0);
        let assessment = analyze(ship, DVec2::ZERO, &[b], &[]);
        assert!(assessment.score > 0.0);
        assert!(assessment.dodge.y < 0.0, "dodge should point away: {:?}", assessment.dodge);
    }

    #[test]
    fn test_far_bullet_ignored() {
        let ship = DVec2::new(-5.0, 0.0);
        let b = bullet(3.0, 0.0, -5.2, 0.0);
        let assessment = analyze(ship, DVec2::ZERO, &[b], &[]);
        assert_eq!(assessment.score, 0.0);
    }

    #[test]
    fn test_enemy_weighs_more_than_bullet() {
        let ship = DVec2::new(-5.0, 0.0);
        let b = bullet(-3.0, 0.2, -3.0, 0.0);
        let e = Body {
            radius: ENEMY_BULLET_RADIUS,
            ..b
        };
        let from_bullet = analyze(ship, DVec2::ZERO, &[b], &[]);
        let from_enemy = analyze(ship, DVec2::ZERO, &[], &[e]);
        assert!(from_enemy.score > from_bullet.score);
    }

    #[test]
    fn test_pinned_edge_detection() {
        assert_eq!(pinned_edge(DVec2::new(-5.0, SHIP_MAX_Y - 0.1)), Some(LateralEdge::High));
        assert_eq!(pinned_edge(DVec2::new(-5.0, SHIP_MIN_Y + 0.1)), Some(LateralEdge::Low));
        assert_eq!(pinned_edge(DVec2::new(-5.0, 0.0)), None);
    }

    /// Sustained threat at an edge walks Normal -> PreBreakout -> Breakout -> Normal.
    #[test]
    fn test_breakout_lifecycle() {
        let mut tracker = BreakoutTracker::default();
        let pinned = DVec2::new(-5.0, SHIP_MAX_Y - 0.2);
        let dt = 1.0 / 60.0;

        let mut saw_pre = false;
        let mut saw_breakout = false;
        for _ in 0..120 {
            tracker.update(pinned, 1.0, dt);
            match tracker.state {
                BreakoutState::PreBreakout => {
                    saw_pre = true;
                    assert!(tracker.push().y < 0.0);
                }
                BreakoutState::Breakout => {
                    saw_breakout = true;
                    assert!(saw_pre, "pre-breakout must come first");
                    assert_eq!(tracker.cooldown_edge, Some(LateralEdge::High));
                    assert!((tracker.push().y + BREAKOUT_PUSH).abs() < 1e-12);
                    break;
                }
                BreakoutState::Normal => {}
            }
        }
        assert!(saw_breakout);

        // Hold expires back to Normal.
        for _ in 0..60 {
            tracker.update(DVec2::new(-5.0, 0.0), 0.0, dt);
        }
        assert_eq!(tracker.state, BreakoutState::Normal);
        assert_eq!(tracker.push(), DVec2::ZERO);
    }

    #[test]
    fn test_breakout_needs_threat() {
        let mut tracker = BreakoutTracker::default();
        let pinned = DVec2::new(-5.0, SHIP_MIN_Y + 0.1);
        for _ in 0..600 {
            tracker.update(pinned, 0.1, 1.0 / 60.0);
        }
        assert_eq!(tracker.state, BreakoutState::Normal);
    }

    /// Pre-breakout has hysteresis: it does not drop out the moment threat lifts.
    #[test]
    fn test_pre_breakout_hysteresis() {
        let mut tracker = BreakoutTracker::default();
        let pinned = DVec2::new(-5.0, SHIP_MIN_Y + 0.1);
        let dt = 0.01;
        while tracker.state != BreakoutState::PreBreakout {
            tracker.update(pinned, 1.0, dt);
        }
        tracker.update(pinned, 0.0, dt);
        assert_eq!(tracker.state, BreakoutState::PreBreakout);
        for _ in 0..100 {
            tracker.update(pinned, 0.0, dt);
        }
        assert_eq!(tracker.state, BreakoutState::Normal);
    }

    #[test]
    fn test_flight_step_stays_in_bounds() {
        let mut pos = DVec2::new(SHIP_MAX_X - 0.05, SHIP_MAX_Y - 0.05);
        let mut vel = DVec2::new(5.0, 5.0);
        for _ in 0..60 {
            let target = DVec2::new(20.0, 20.0);
            let (p, v) = flight::step(pos, vel, target, 1.0, BreakoutState::Normal, 1.0 / 60.0);
            pos = p;
            vel = v;
            assert!(in_bounds(pos));
        }
    }

    #[test]
    fn test_flight_speed_limit() {
        let (max_speed, _) = flight::limits(0.0);
        let mut pos = DVec2::new(-8.0, 0.0);
        let mut vel = DVec2::ZERO;
        for _ in 0..240 {
            let target = DVec2::new(-2.0, 0.0);
            let (p, v) = flight::step(pos, vel, target, 0.0, BreakoutState::Normal, 1.0 / 120.0);
            pos = p;
            vel = v;
            assert!(vel.length() <= max_speed + 1e-9);
        }
    }

    #[test]
    fn test_engage_prefers_lateral_alignment() {
        let ship = DVec2::new(-6.0, 0.0);
        let aligned = Body {
            pos: DVec2::new(4.0, 0.2),
            ..Default::default()
        };
        let offset = Body {
            pos: DVec2::new(0.0, 3.0),
            ..Default::default()
        };
        let behind = Body {
            pos: DVec2::new(-6.2, 0.0),
            ..Default::default()
        };
        let enemies = [offset, behind, aligned];
        let target = engage_target(ship, &enemies).unwrap();
        assert_eq!(target.pos, aligned.pos);
    }

    #[test]
    fn test_roam_point_inside_bounds() {
        for i in 0..500 {
            let p = roam_point(i as f64 * 0.1, 1.7);
            assert!(in_bounds(p), "{p:?}");
        }
    }

    #[test]
    fn test_escape_trigger() {
        let ship = DVec2::new(-5.0, 0.0);
        let enemy = |x: f64, y: f64| Body {
            pos: DVec2::new(x, y),
            vel: DVec2::new(-2.6, 0.0),
            radius: ENEMY_BASE_RADIUS,
        };
        assert!(!escape::needs_escape(ship, &[], &[]));
        // Any live bullet triggers the search, wherever it comes from.
        assert!(escape::needs_escape(ship, &[bullet(-3.0, 0.5, -5.0, 0.0)], &[]));
        assert!(escape::needs_escape(ship, &[bullet(-5.0, 2.0, 0.0, -5.2)], &[]));
        assert!(escape::needs_escape(ship, &[bullet(-7.0, 0.0, 5.0, 0.0)], &[]));
        // Enemies only count inside the forward corridor.
        assert!(escape::needs_escape(ship, &[], &[enemy(-3.0, 0.5)]));
        assert!(!escape::needs_escape(ship, &[], &[enemy(-3.0, 3.0)]));
        assert!(!escape::needs_escape(ship, &[], &[enemy(-7.0, 0.0)]));
    }

    /// A wall of bullets on the craft's lane pushes the escape target off the lane.
    #[test]
    fn test_escape_search_leaves_lane() {
        let ship = DVec2::new(-5.0, 0.0);
        let wall: Vec<Body> = (0..4)
            .map(|i| bullet(-4.0 + i as f64 * 0.8, 0.0, -5.2, 0.0))
            .collect();
        let tracker = BreakoutTracker::default();
        let query = EscapeQuery {
            ship_pos: ship,
            ship_vel: DVec2::ZERO,
            target: ship,
            panic: 0.6,
            tracker: &tracker,
            projectiles: &wall,
            enemies: &[],
        };
        let best = escape::search(&query);
        assert!(in_bounds(best));
        assert!(best.y.abs() > 0.5, "escape target stayed on the lane: {best:?}");
        assert!(escape::candidate_cost(&query, best) < escape::candidate_cost(&query, ship));
    }

    /// Identical inputs and seeds drive identical flights.
    #[test]
    fn test_drive_deterministic() {
        let projectiles = [bullet(-2.0, 0.3, -5.2, 0.0), bullet(0.0, -1.0, -5.2, 0.4)];
        let enemies = [Body {
            pos: DVec2::new(3.0, 1.0),
            vel: DVec2::new(-2.6, 0.0),
            radius: ENEMY_BASE_RADIUS,
        }];

        let run = || {
            let mut rng = SimRng::new(11);
            let mut state = AutopilotState::new(0.4);
            let mut pos = DVec2::new(SHIP_START_X, SHIP_START_Y);
            let mut vel = DVec2::ZERO;
            let mut trail = Vec::new();
            for i in 0..240 {
                let ctx = PilotContext {
                    now: i as f64 / 120.0,
                    ship_pos: pos,
                    ship_vel: vel,
                    enemies: &enemies,
                    projectiles: &projectiles,
                };
                let out = drive(&mut state, &ctx, &mut rng, 1.0 / 120.0);
                pos = out.position;
                vel = out.velocity;
                assert!(in_bounds(pos));
                assert!((0.0..=1.0).contains(&out.panic));
                trail.push((pos.x.to_bits(), pos.y.to_bits()));
            }
            trail
        };

        assert_eq!(run(), run());
    }
}
