//! Tests for the simulation engine, cue scheduling, collisions and the
//! combat phases.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use syncopate_core::commands::SimCommand;
    use syncopate_core::components::{CueShotGuide, Enemy, EnemyShot, MotionPattern, PlayerShot};
    use syncopate_core::config::{CombatConfig, ShipWeaponsPatch};
    use syncopate_core::constants::*;
    use syncopate_core::enums::*;
    use syncopate_core::events::SimEvent;
    use syncopate_core::types::{IntensitySample, Position, Velocity};

    use crate::cue::ScheduledCue;
    use crate::engine::{SimConfig, SimulationEngine};
    use crate::state::SimState;
    use crate::systems::spawner::{spawn_enemy, EnemySpawn};
    use crate::systems::{collision, cue_scheduler, spawner};

    const DT: f64 = 1.0 / 60.0;

    fn laser_only() -> CombatConfig {
        let mut combat = CombatConfig::default();
        combat
            .ship_weapons
            .apply(&ShipWeaponsPatch::toggle(WeaponKind::Blaster, false));
        combat
            .ship_weapons
            .apply(&ShipWeaponsPatch::toggle(WeaponKind::Homing, false));
        combat.catch_up_enabled = false;
        combat
    }

    fn run_until(engine: &mut SimulationEngine, until: f64, dt: f64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        while engine.time().elapsed_secs < until {
            engine.step(dt);
            events.extend(engine.snapshot().events);
        }
        events
    }

    fn blaster_only() -> CombatConfig {
        let mut combat = CombatConfig::default();
        combat
            .ship_weapons
            .apply(&ShipWeaponsPatch::toggle(WeaponKind::Laser, false));
        combat
            .ship_weapons
            .apply(&ShipWeaponsPatch::toggle(WeaponKind::Homing, false));
        combat.catch_up_enabled = false;
        combat
    }

    fn cue_shot(x: f64, y: f64, guide: Option<CueShotGuide>) -> (Position, Velocity, PlayerShot) {
        (
            Position::planar(x, y),
            Velocity::default(),
            PlayerShot {
                id: 1,
                age: 0.0,
                life: BLASTER_LIFE,
                radius: BLASTER_RADIUS,
                cue: guide,
            },
        )
    }

    fn enemy_count(engine: &SimulationEngine) -> usize {
        engine.world().query::<&Enemy>().iter().count()
    }

    fn straight_enemy(state: &mut SimState, x: f64, y: f64) -> u32 {
        spawn_enemy(
            state,
            EnemySpawn {
                archetype: EnemyArchetype::Scout,
                x,
                vx: -2.0,
                pattern: MotionPattern {
                    kind: MotionPatternKind::Straight,
                    base_y: y,
                    ..Default::default()
                },
                reserved: false,
            },
        )
    }

    fn bind_cue(state: &mut SimState, enemy_id: u32, time: f64, weapon: WeaponKind) {
        let entity = state.find_enemy(enemy_id).unwrap();
        state.world.get::<&mut Enemy>(entity).unwrap().scheduled_cue_time = Some(time);
        state.cues.insert(ScheduledCue {
            planned: true,
            enemy_id: Some(enemy_id),
            weapon: Some(weapon),
            ..ScheduledCue::track(time)
        });
    }

    // ---- Determinism ----

    #[test]
    fn test_determinism_same_seed() {
        let script = |engine: &mut SimulationEngine| {
            engine.start_track_run(&[1.0, 1.5, 2.0, 2.25, 3.0, 4.5, 5.0]);
            engine.set_intensity_timeline(&[
                IntensitySample { time: 0.0, intensity: 0.2 },
                IntensitySample { time: 4.0, intensity: 0.9 },
            ]);
        };
        let mut engine_a = SimulationEngine::new(SimConfig {
            seed: 12345,
            ..Default::default()
        });
        let mut engine_b = SimulationEngine::new(SimConfig {
            seed: 12345,
            ..Default::default()
        });
        script(&mut engine_a);
        script(&mut engine_b);

        for _ in 0..420 {
            engine_a.step(DT);
            engine_b.step(DT);

            let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
            let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
            assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
        }
    }

    #[test]
    fn test_determinism_different_seeds() {
        let mut engine_a = SimulationEngine::new(SimConfig {
            seed: 111,
            ..Default::default()
        });
        let mut engine_b = SimulationEngine::new(SimConfig {
            seed: 222,
            ..Default::default()
        });

        let mut diverged = false;
        for _ in 0..120 {
            engine_a.step(DT);
            engine_b.step(DT);
            let json_a = serde_json::to_string(&engine_a.snapshot()).unwrap();
            let json_b = serde_json::to_string(&engine_b.snapshot()).unwrap();
            if json_a != json_b {
                diverged = true;
                break;
            }
        }
        assert!(diverged, "Different seeds should produce divergent output");
    }

    #[test]
    fn test_snapshot_is_pure() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_track_run(&[1.0]);
        run_until(&mut engine, 1.2, DT);

        let a = serde_json::to_string(&engine.snapshot()).unwrap();
        let b = serde_json::to_string(&engine.snapshot()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_start_track_run_replays_identically() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 9,
            ..Default::default()
        });
        engine.start_track_run(&[1.0, 2.0]);
        run_until(&mut engine, 2.5, DT);
        let first = serde_json::to_string(&engine.snapshot()).unwrap();

        engine.start_track_run(&[1.0, 2.0]);
        assert_eq!(engine.time().tick, 0);
        assert_eq!(engine.score().score, 0);
        assert_eq!(enemy_count(&engine), 0);
        run_until(&mut engine, 2.5, DT);
        let second = serde_json::to_string(&engine.snapshot()).unwrap();
        assert_eq!(first, second, "A restarted run must replay the same way");
    }

    // ---- Cue accounting ----

    #[test]
    fn test_track_cue_conservation() {
        let times: Vec<f64> = (0..16).map(|i| 1.0 + i as f64 * 0.37).collect();
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 3,
            ..Default::default()
        });
        engine.start_track_run(&times);
        run_until(&mut engine, times[times.len() - 1] + 1.0, DT);

        let score = engine.score();
        assert_eq!(
            score.cue_resolved + score.cue_missed,
            times.len() as u32,
            "Every track cue resolves exactly once"
        );
        assert!(engine
            .cues()
            .as_slice()
            .iter()
            .all(|c| c.origin == CueOrigin::CatchUp));
    }

    #[test]
    fn test_timing_error_bound() {
        let times: Vec<f64> = (0..10).map(|i| 1.5 + i as f64 * 0.5).collect();
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 21,
            ..Default::default()
        });
        engine.start_track_run(&times);
        run_until(&mut engine, 7.5, 1.0 / 120.0);

        let score = engine.score();
        assert!(score.resolved_total() >= 1, "Expected at least one resolved cue");
        assert!(
            score.avg_cue_error_ms() < 10.0,
            "Average cue error {} ms",
            score.avg_cue_error_ms()
        );
    }

    #[test]
    fn test_laser_cues_land_with_rising_combo() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 5,
            combat: laser_only(),
            ..Default::default()
        });
        engine.start_track_run(&[2.0, 2.5, 3.0]);
        let events = run_until(&mut engine, 3.3, DT);

        let hits: Vec<(u32, u64, f64)> = events
            .iter()
            .filter_map(|e| match e {
                SimEvent::CueHit {
                    combo,
                    score_delta,
                    error_ms,
                    ..
                } => Some((*combo, *score_delta, *error_ms)),
                _ => None,
            })
            .collect();

        assert_eq!(hits.len(), 3, "All laser cues should land: {events:?}");
        for (i, (combo, delta, error_ms)) in hits.iter().enumerate() {
            let expected_combo = i as u32 + 1;
            assert_eq!(*combo, expected_combo);
            assert_eq!(
                *delta,
                CUE_BASE_SCORE + CUE_COMBO_BONUS_PER * expected_combo as u64
            );
            assert!(*error_ms >= 0.0 && *error_ms < DT * 1000.0 + 1e-6);
        }
        assert_eq!(engine.score().max_combo, 3);
        assert_eq!(engine.score().cue_missed, 0);
    }

    #[test]
    fn test_all_weapons_disabled_misses_cue() {
        let mut combat = CombatConfig::default();
        for kind in WeaponKind::ALL {
            combat
                .ship_weapons
                .apply(&ShipWeaponsPatch::toggle(kind, false));
        }
        let mut engine = SimulationEngine::new(SimConfig {
            combat,
            ..Default::default()
        });
        engine.start_track_run(&[1.0]);
        let events = run_until(&mut engine, 1.2, DT);

        assert_eq!(engine.score().cue_missed, 1);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::CueMiss {
                reason: CueMissReason::WeaponDisabled,
                ..
            }
        )));
    }

    #[test]
    fn test_weapon_disabled_after_binding_misses() {
        let mut engine = SimulationEngine::new(SimConfig {
            combat: laser_only(),
            ..Default::default()
        });
        engine.start_track_run(&[2.0]);
        run_until(&mut engine, 1.0, DT);
        assert!(engine.cues().as_slice()[0].planned);

        engine.patch_ship_weapons(&ShipWeaponsPatch::toggle(WeaponKind::Laser, false));
        let events = run_until(&mut engine, 2.2, DT);

        assert_eq!(engine.score().cue_missed, 1);
        assert_eq!(engine.score().combo, 0);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::CueMiss {
                reason: CueMissReason::WeaponDisabled,
                ..
            }
        )));
    }

    #[test]
    fn test_no_double_binding() {
        let times: Vec<f64> = (0..40).map(|i| 0.8 + i as f64 * 0.15).collect();
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 77,
            mood: MoodProfile::Aggressive,
            ..Default::default()
        });
        engine.start_track_run(&times);
        engine.set_intensity_timeline(&[IntensitySample {
            time: 0.0,
            intensity: 1.0,
        }]);

        for _ in 0..480 {
            engine.step(DT);
            let mut seen = HashSet::new();
            for id in engine.cues().as_slice().iter().filter_map(|c| c.enemy_id) {
                assert!(seen.insert(id), "Enemy {id} bound to two cues");
            }
        }
    }

    #[test]
    fn test_simultaneous_blaster_cues_all_land() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 11,
            combat: blaster_only(),
            ..Default::default()
        });
        engine.start_track_run(&[2.0, 2.0, 2.0, 2.0]);
        let events = run_until(&mut engine, 2.3, DT);

        let misses: Vec<&SimEvent> = events
            .iter()
            .filter(|e| matches!(e, SimEvent::CueMiss { .. }))
            .collect();
        assert!(misses.is_empty(), "Simultaneous cues missed: {misses:?}");
        assert_eq!(engine.score().cue_resolved, 4);
        assert_eq!(engine.score().combo, 4);
    }

    // ---- Cue support ----

    #[test]
    fn test_support_spawns_are_capped_per_tick() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        state.cues.replace([0.5, 0.6, 0.7, 0.8, 0.9]);

        let mut counts = Vec::new();
        for _ in 0..4 {
            spawner::ensure_cue_support(&mut state);
            counts.push(state.world.query::<&Enemy>().iter().count());
        }
        assert_eq!(SUPPORT_SPAWN_CAP_PER_TICK, 2);
        assert_eq!(counts, vec![2, 4, 5, 5]);
        assert!(state
            .world
            .query::<&Enemy>()
            .iter()
            .all(|(_, e)| !e.reserved && e.scheduled_cue_time.is_none()));
    }

    #[test]
    fn test_support_ignores_cues_outside_horizon() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        state.cues.replace([0.1, CUE_SUPPORT_HORIZON + 0.5]);
        spawner::ensure_cue_support(&mut state);
        assert_eq!(state.world.query::<&Enemy>().iter().count(), 0);
    }

    #[test]
    fn test_support_disabled_spawns_nothing() {
        let mut combat = CombatConfig::default();
        combat.support_enabled = false;
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, combat);
        state.cues.replace([0.5, 0.6]);
        spawner::ensure_cue_support(&mut state);
        assert_eq!(state.world.query::<&Enemy>().iter().count(), 0);
    }

    /// Candidates are judged where they will be at the cue, not where they are now.
    #[test]
    fn test_support_counts_candidates_at_cue_lead() {
        // In the box now, behind the craft by the cue.
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        straight_enemy(&mut state, SHIP_START_X + 1.8, 0.0);
        state.cues.replace([1.0]);
        spawner::ensure_cue_support(&mut state);
        assert_eq!(state.world.query::<&Enemy>().iter().count(), 2);

        // Still in the box at the cue: no support needed.
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        straight_enemy(&mut state, 2.0, 0.0);
        state.cues.replace([1.0]);
        spawner::ensure_cue_support(&mut state);
        assert_eq!(state.world.query::<&Enemy>().iter().count(), 1);
    }

    // ---- Reference scenarios ----

    #[test]
    fn test_seed_7_empty_timelines() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 7,
            ..Default::default()
        });
        for i in 0..300 {
            engine.step(DT);
            if i == 30 {
                assert!(enemy_count(&engine) >= 1, "First wave should have spawned");
            }
            let x = engine.snapshot().ship.position.x;
            assert!((SHIP_MIN_X - 1e-9..=SHIP_MAX_X + 1e-9).contains(&x));
        }
    }

    #[test]
    fn test_single_cue_spawns_reserved_enemy() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.set_cue_timeline(&[1.0]);
        assert_eq!(enemy_count(&engine), 0);

        engine.step(DT);
        let snap = engine.snapshot();
        assert!(snap.counts.enemy_count >= 1);
        assert!(snap.enemies.iter().any(|e| e.cue_bound));

        run_until(&mut engine, 1.05, DT);
        let score = engine.score();
        assert_eq!(score.cue_resolved + score.cue_missed, 1);
    }

    #[test]
    fn test_intensity_interpolation_through_engine() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.set_intensity_timeline(&[
            IntensitySample { time: 0.0, intensity: 0.0 },
            IntensitySample { time: 1.0, intensity: 1.0 },
        ]);
        assert_eq!(engine.intensity().value_at(-1.0), 0.0);
        assert_eq!(engine.intensity().value_at(5.0), 1.0);

        for _ in 0..30 {
            engine.step(DT);
        }
        let current = engine.snapshot().intensity.current;
        assert!((current - 0.5).abs() < 1e-9, "current = {current}");
    }

    // ---- Bounds ----

    #[test]
    fn test_ship_stays_in_bounds_under_fire() {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 4,
            mood: MoodProfile::Aggressive,
            enemy_bullet_ratio: 4.0,
            ..Default::default()
        });
        engine.set_intensity_timeline(&[IntensitySample {
            time: 0.0,
            intensity: 1.0,
        }]);

        for _ in 0..900 {
            engine.step(DT);
            let p = engine.snapshot().ship.position;
            assert!(p.x >= SHIP_MIN_X - 1e-9 && p.x <= SHIP_MAX_X + 1e-9);
            assert!(p.y >= SHIP_MIN_Y - 1e-9 && p.y <= SHIP_MAX_Y + 1e-9);
        }
    }

    #[test]
    fn test_unbound_enemies_are_culled() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        run_until(&mut engine, 20.0, DT);
        for (_, (enemy, pos)) in engine.world().query::<(&Enemy, &Position)>().iter() {
            if enemy.scheduled_cue_time.is_none() {
                assert!(pos.x >= ENEMY_CULL_BEHIND_X && pos.y.abs() <= ENEMY_CULL_Y);
            }
        }
    }

    // ---- Host operations ----

    #[test]
    fn test_set_cue_timeline_is_relative_and_clears_bindings() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.set_cue_timeline(&[1.5]);
        run_until(&mut engine, 1.0, DT);
        assert!(engine
            .world()
            .query::<&Enemy>()
            .iter()
            .any(|(_, e)| e.scheduled_cue_time.is_some()));

        let now = engine.time().elapsed_secs;
        let score_before = engine.score().clone();
        engine.set_cue_timeline(&[0.5, 0.25, -1.0, f64::NAN]);

        let times: Vec<f64> = engine.cues().as_slice().iter().map(|c| c.time).collect();
        assert_eq!(times, vec![now + 0.25, now + 0.5]);
        assert!(engine.cues().as_slice().iter().all(|c| !c.planned));
        assert!(engine
            .world()
            .query::<&Enemy>()
            .iter()
            .all(|(_, e)| e.scheduled_cue_time.is_none() && !e.cue_primed));
        assert!(engine
            .world()
            .query::<&PlayerShot>()
            .iter()
            .all(|(_, s)| s.cue.is_none()));
        assert_eq!(engine.score(), &score_before);
    }

    #[test]
    fn test_bullet_ratio_is_clamped() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.set_enemy_bullet_ratio(9.0);
        assert_eq!(engine.bullet_ratio(), MAX_BULLET_RATIO);
        engine.set_enemy_bullet_ratio(-2.0);
        assert_eq!(engine.bullet_ratio(), 0.0);
        engine.set_enemy_bullet_ratio(f64::NAN);
        assert_eq!(engine.bullet_ratio(), 1.0);
    }

    #[test]
    fn test_zero_bullet_ratio_silences_enemies() {
        let mut engine = SimulationEngine::new(SimConfig {
            enemy_bullet_ratio: 0.0,
            mood: MoodProfile::Aggressive,
            ..Default::default()
        });
        engine.set_intensity_timeline(&[IntensitySample {
            time: 0.0,
            intensity: 1.0,
        }]);
        for _ in 0..480 {
            engine.step(DT);
            assert_eq!(engine.world().query::<&EnemyShot>().iter().count(), 0);
        }
    }

    #[test]
    fn test_commands_apply_at_next_step() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_commands([
            SimCommand::SetEnemyBulletRatio { ratio: 2.5 },
            SimCommand::SetMoodProfile {
                mood: MoodProfile::Calm,
            },
            SimCommand::SetCueTimeline { times: vec![1.0] },
        ]);
        assert_eq!(engine.bullet_ratio(), 1.0);
        assert!(engine.cues().is_empty());

        engine.step(DT);
        assert_eq!(engine.bullet_ratio(), 2.5);
        assert_eq!(engine.snapshot().mood, MoodProfile::Calm);
        assert_eq!(engine.cues().len(), 1);
    }

    #[test]
    fn test_set_random_seed_is_stored() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.apply_command(SimCommand::SetRandomSeed { seed: 99 });
        assert_eq!(engine.seed(), 99);
    }

    #[test]
    fn test_invalid_dt_does_not_move_clock() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.step(-1.0);
        engine.step(f64::NAN);
        engine.step(f64::INFINITY);
        assert_eq!(engine.time().elapsed_secs, 0.0);
        assert_eq!(engine.snapshot().ship.position.x, SHIP_START_X);
    }

    // ---- Scheduler resolution ----

    #[test]
    fn test_vanished_homing_target_counts_as_hit() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 0.0);
        bind_cue(&mut state, id, 0.5, WeaponKind::Homing);
        let entity = state.find_enemy(id).unwrap();
        state.world.despawn(entity).unwrap();

        state.time.elapsed_secs = 0.5;
        cue_scheduler::resolve(&mut state);

        assert_eq!(state.score.cue_resolved, 1);
        assert!(matches!(state.events[0], SimEvent::CueHit { .. }));
    }

    #[test]
    fn test_vanished_blaster_target_is_lost() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 0.0);
        bind_cue(&mut state, id, 0.5, WeaponKind::Blaster);
        let entity = state.find_enemy(id).unwrap();
        state.world.despawn(entity).unwrap();

        state.time.elapsed_secs = 0.5;
        cue_scheduler::resolve(&mut state);

        assert_eq!(state.score.cue_missed, 1);
        assert!(matches!(
            state.events[0],
            SimEvent::CueMiss {
                reason: CueMissReason::TargetLost,
                ..
            }
        ));
    }

    #[test]
    fn test_primed_enemy_resolves_and_is_removed() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 0.0);
        bind_cue(&mut state, id, 0.5, WeaponKind::Laser);
        let entity = state.find_enemy(id).unwrap();
        state.world.get::<&mut Enemy>(entity).unwrap().cue_primed = true;

        state.time.elapsed_secs = 0.5;
        cue_scheduler::resolve(&mut state);

        assert!(state.find_enemy(id).is_none());
        assert_eq!(state.score.combo, 1);
        assert_eq!(state.score.score, CUE_BASE_SCORE + CUE_COMBO_BONUS_PER);
        assert!(state.cues.is_empty());
    }

    #[test]
    fn test_untouched_enemy_misses_and_is_released() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 0.0);
        bind_cue(&mut state, id, 0.5, WeaponKind::Blaster);
        state.score.combo = 4;

        state.time.elapsed_secs = 0.5;
        cue_scheduler::resolve(&mut state);

        let (_, enemy, _) = state.enemy(id).unwrap();
        assert!(enemy.scheduled_cue_time.is_none());
        assert_eq!(state.score.combo, 0);
        assert_eq!(state.score.cue_missed, 1);
    }

    #[test]
    fn test_resolution_is_capped_per_tick() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        state
            .cues
            .replace((0..40).map(|i| 0.1 + i as f64 * 0.001));
        state.time.elapsed_secs = 1.0;

        cue_scheduler::resolve(&mut state);
        assert_eq!(state.score.cue_missed as usize, MAX_CUE_RESOLUTIONS_PER_TICK);
        assert_eq!(state.cues.len(), 40 - MAX_CUE_RESOLUTIONS_PER_TICK);
    }

    #[test]
    fn test_catch_up_cue_for_stray_enemy() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let ship = state.ship_pos();
        let id = straight_enemy(&mut state, ship.x + 3.0, ship.y + 0.5);

        let added = cue_scheduler::synthesize_catch_up(&mut state);
        assert_eq!(added, 1);
        let cue = &state.cues.as_slice()[0];
        assert_eq!(cue.origin, CueOrigin::CatchUp);
        assert_eq!(cue.preferred_enemy, Some(id));
        let lead = cue.time - state.now();
        assert!((CATCH_UP_MIN_LEAD..=CUE_NATURAL_MAX_LEAD).contains(&lead));

        // Already claimed: nothing new.
        assert_eq!(cue_scheduler::synthesize_catch_up(&mut state), 0);
    }

    // ---- Collisions ----

    #[test]
    fn test_shot_destroys_unbound_enemy() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 1.0);
        state.world.spawn((
            Position::planar(2.0, 1.0),
            Velocity::new(BLASTER_SPEED, 0.0, 0.0),
            PlayerShot {
                id: 1,
                age: 0.0,
                life: BLASTER_LIFE,
                radius: BLASTER_RADIUS,
                cue: None,
            },
        ));

        collision::run(&mut state);

        assert!(state.find_enemy(id).is_none());
        assert_eq!(state.score.ambient_kills, 1);
        assert_eq!(state.score.score, AMBIENT_KILL_SCORE);
        assert_eq!(state.score.combo, 0);
        assert_eq!(state.world.query::<&PlayerShot>().iter().count(), 0);
        assert!(state
            .events
            .contains(&SimEvent::EnemyDestroyed { enemy_id: id }));
    }

    #[test]
    fn test_shot_primes_bound_enemy() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let id = straight_enemy(&mut state, 2.0, 1.0);
        bind_cue(&mut state, id, 3.0, WeaponKind::Blaster);
        state.world.spawn((
            Position::planar(2.1, 1.0),
            Velocity::default(),
            PlayerShot {
                id: 1,
                age: 0.0,
                life: BLASTER_LIFE,
                radius: BLASTER_RADIUS,
                cue: None,
            },
        ));

        collision::run(&mut state);

        let (_, enemy, _) = state.enemy(id).unwrap();
        assert!(enemy.cue_primed);
        assert_eq!(enemy.flash, 1.0);
        assert_eq!(state.world.query::<&PlayerShot>().iter().count(), 0);
        assert_eq!(state.score.ambient_kills, 0);
    }

    #[test]
    fn test_cue_shot_passes_other_bound_enemies() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let first = straight_enemy(&mut state, 2.0, 1.0);
        let second = straight_enemy(&mut state, 2.0, 1.0);
        bind_cue(&mut state, first, 3.0, WeaponKind::Blaster);
        bind_cue(&mut state, second, 3.0, WeaponKind::Blaster);
        state.world.spawn(cue_shot(
            2.1,
            1.0,
            Some(CueShotGuide {
                enemy_id: second,
                cue_time: 3.0,
            }),
        ));

        collision::run(&mut state);

        assert!(!state.enemy(first).unwrap().1.cue_primed);
        assert!(state.enemy(second).unwrap().1.cue_primed);
        assert_eq!(state.world.query::<&PlayerShot>().iter().count(), 0);

        // An unguided shot still primes the first bound enemy it touches.
        state.world.spawn(cue_shot(2.1, 1.0, None));
        collision::run(&mut state);
        assert!(state.enemy(first).unwrap().1.cue_primed);
    }

    #[test]
    fn test_cue_shot_still_destroys_unbound_enemy() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let target = straight_enemy(&mut state, 6.0, -2.0);
        bind_cue(&mut state, target, 3.0, WeaponKind::Blaster);
        let stray = straight_enemy(&mut state, 2.0, 1.0);
        state.world.spawn(cue_shot(
            2.1,
            1.0,
            Some(CueShotGuide {
                enemy_id: target,
                cue_time: 3.0,
            }),
        ));

        collision::run(&mut state);

        assert!(state.find_enemy(stray).is_none());
        assert!(!state.enemy(target).unwrap().1.cue_primed);
        assert_eq!(state.score.ambient_kills, 1);
    }

    #[test]
    fn test_enemy_shot_hits_shield() {
        let mut state = SimState::new(1, MoodProfile::Driving, 1.0, CombatConfig::default());
        let ship = state.ship.position;
        state.world.spawn((
            ship,
            Velocity::new(-ENEMY_BULLET_SPEED, 0.0, 0.0),
            EnemyShot {
                id: 1,
                age: 0.0,
                life: ENEMY_BULLET_LIFE,
                radius: ENEMY_BULLET_RADIUS,
            },
        ));

        collision::run(&mut state);

        assert_eq!(state.ship.shield_flash, 1.0);
        assert_eq!(state.score.shield_hits, 1);
        assert_eq!(state.events, vec![SimEvent::ShieldHit]);
        assert_eq!(state.world.query::<&EnemyShot>().iter().count(), 0);
    }
}
