//! Cue bookkeeping: the scheduled cue timeline, queued cue shots and the
//! running score.
//!
//! Stored on `SimState`, NOT as ECS entities.

use serde::{Deserialize, Serialize};

use syncopate_core::constants::*;
use syncopate_core::enums::{CueOrigin, WeaponKind};

/// One pending cue on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCue {
    /// Absolute simulation time the kill must land at.
    pub time: f64,
    /// A weapon module accepted the binding.
    pub planned: bool,
    /// Enemy sacrificed to this cue.
    pub enemy_id: Option<u32>,
    pub weapon: Option<WeaponKind>,
    pub origin: CueOrigin,
    /// Catch-up cues name the enemy they were synthesized for.
    pub preferred_enemy: Option<u32>,
}

impl ScheduledCue {
    pub fn track(time: f64) -> Self {
        Self {
            time,
            planned: false,
            enemy_id: None,
            weapon: None,
            origin: CueOrigin::Track,
            preferred_enemy: None,
        }
    }

    pub fn catch_up(time: f64, enemy_id: u32) -> Self {
        Self {
            origin: CueOrigin::CatchUp,
            preferred_enemy: Some(enemy_id),
            ..Self::track(time)
        }
    }
}

/// Ordered cue timeline. Always sorted ascending by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueTimeline {
    cues: Vec<ScheduledCue>,
}

impl CueTimeline {
    /// Replace the timeline with track cues at the given absolute times.
    pub fn replace(&mut self, times: impl IntoIterator<Item = f64>) {
        self.cues = times.into_iter().map(ScheduledCue::track).collect();
        self.cues.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Sorted insert; equal times keep insertion order.
    pub fn insert(&mut self, cue: ScheduledCue) {
        let idx = self.cues.partition_point(|c| c.time <= cue.time);
        self.cues.insert(idx, cue);
    }

    pub fn remove(&mut self, idx: usize) -> ScheduledCue {
        self.cues.remove(idx)
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }

    pub fn as_slice(&self) -> &[ScheduledCue] {
        &self.cues
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut ScheduledCue> {
        self.cues.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Number of cues due at `now`.
    pub fn due_count(&self, now: f64) -> usize {
        self.cues.partition_point(|c| c.time <= now)
    }

    /// Remove and return up to `max` due cues, oldest first.
    pub fn drain_due(&mut self, now: f64, max: usize) -> Vec<ScheduledCue> {
        let n = self.due_count(now).min(max);
        self.cues.drain(..n).collect()
    }

    /// Whether any cue currently references `enemy_id`, bound or preferred.
    pub fn claims(&self, enemy_id: u32) -> bool {
        self.cues
            .iter()
            .any(|c| c.enemy_id == Some(enemy_id) || c.preferred_enemy == Some(enemy_id))
    }
}

/// A queued cue shot (blaster bolt or laser pulse) waiting for its fire time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedCueShot {
    pub weapon: WeaponKind,
    pub enemy_id: u32,
    pub cue_time: f64,
    pub fire_time: f64,
}

/// A queued homing missile launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedMissileShot {
    pub enemy_id: u32,
    pub cue_time: f64,
    pub fire_time: f64,
    /// Lateral sign of the launch kick.
    pub side: f64,
}

/// Shots queued for cues, keyed back to their cue by `(enemy_id, cue_time)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedShots {
    pub shots: Vec<PlannedCueShot>,
    pub missiles: Vec<PlannedMissileShot>,
}

impl PlannedShots {
    pub fn clear(&mut self) {
        self.shots.clear();
        self.missiles.clear();
    }

    /// Drop everything queued for the cue bound to `enemy_id` at `cue_time`.
    pub fn drop_cue(&mut self, enemy_id: u32, cue_time: f64) {
        self.shots
            .retain(|s| !(s.enemy_id == enemy_id && s.cue_time == cue_time));
        self.missiles
            .retain(|m| !(m.enemy_id == enemy_id && m.cue_time == cue_time));
    }
}

/// Running score and cue statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub cue_resolved: u32,
    pub cue_missed: u32,
    pub catch_up_resolved: u32,
    pub catch_up_missed: u32,
    /// Sum of `now - cue_time` over every resolved cue.
    pub total_error_secs: f64,
    pub ambient_kills: u32,
    pub shield_hits: u32,
}

impl ScoreState {
    /// Record a resolved cue. Returns the score delta.
    pub fn record_hit(&mut self, origin: CueOrigin, error_secs: f64) -> u64 {
        match origin {
            CueOrigin::Track => self.cue_resolved += 1,
            CueOrigin::CatchUp => self.catch_up_resolved += 1,
        }
        self.total_error_secs += error_secs;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        let delta = cue_score(self.combo);
        self.score += delta;
        delta
    }

    pub fn record_miss(&mut self, origin: CueOrigin) {
        match origin {
            CueOrigin::Track => self.cue_missed += 1,
            CueOrigin::CatchUp => self.catch_up_missed += 1,
        }
        self.combo = 0;
    }

    pub fn record_ambient_kill(&mut self) {
        self.ambient_kills += 1;
        self.score += AMBIENT_KILL_SCORE;
    }

    pub fn resolved_total(&self) -> u32 {
        self.cue_resolved + self.catch_up_resolved
    }

    /// Mean timing error over every resolved cue, in milliseconds.
    pub fn avg_cue_error_ms(&self) -> f64 {
        match self.resolved_total() {
            0 => 0.0,
            n => self.total_error_secs / n as f64 * 1000.0,
        }
    }
}

/// Score awarded for a resolved cue, given the post-increment combo.
pub fn cue_score(combo: u32) -> u64 {
    CUE_BASE_SCORE + (combo as u64 * CUE_COMBO_BONUS_PER).min(CUE_COMBO_BONUS_CAP)
}
