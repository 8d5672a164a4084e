//! Edge-breakout finite state machine.
//!
//! While the craft is pinned against a lateral bound under sustained threat a
//! dwell timer accumulates. Part way to the trigger the craft enters
//! pre-breakout (soft inward bias); at the trigger it is forced inward for a
//! fixed hold and the vacated edge is put on cooldown.

use glam::DVec2;

use syncopate_core::constants::*;
use syncopate_core::enums::{BreakoutState, LateralEdge};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakoutTracker {
    pub state: BreakoutState,
    pub dwell: f64,
    /// Remaining forced hold while in `Breakout`.
    pub hold: f64,
    /// Edge being escaped (pre-breakout or breakout).
    pub edge: Option<LateralEdge>,
    /// Recently vacated edge, penalized by the escape search.
    pub cooldown_edge: Option<LateralEdge>,
    pub cooldown: f64,
}

/// Which lateral bound (if any) the craft is pinned against.
pub fn pinned_edge(ship_pos: DVec2) -> Option<LateralEdge> {
    if ship_pos.y - SHIP_MIN_Y < EDGE_PIN_MARGIN {
        Some(LateralEdge::Low)
    } else if SHIP_MAX_Y - ship_pos.y < EDGE_PIN_MARGIN {
        Some(LateralEdge::High)
    } else {
        None
    }
}

/// Unit direction pointing from `edge` back into the arena.
pub fn inward(edge: LateralEdge) -> DVec2 {
    match edge {
        LateralEdge::Low => DVec2::Y,
        LateralEdge::High => DVec2::NEG_Y,
    }
}

/// Distance from `pos` to the given lateral bound.
pub fn distance_to_edge(pos: DVec2, edge: LateralEdge) -> f64 {
    match edge {
        LateralEdge::Low => pos.y - SHIP_MIN_Y,
        LateralEdge::High => SHIP_MAX_Y - pos.y,
    }
}

impl BreakoutTracker {
    /// Advance the state machine one step.
    pub fn update(&mut self, ship_pos: DVec2, threat: f64, dt: f64) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
            if self.cooldown <= 0.0 {
                self.cooldown = 0.0;
                self.cooldown_edge = None;
            }
        }

        if self.state == BreakoutState::Breakout {
            self.hold -= dt;
            if self.hold <= 0.0 {
                self.hold = 0.0;
                self.state = BreakoutState::Normal;
                self.edge = None;
            }
            return;
        }

        let pinned = pinned_edge(ship_pos);
        match pinned {
            Some(_) if threat >= BREAKOUT_THREAT_MIN => self.dwell += dt,
            _ => self.dwell = (self.dwell - dt * 1.5).max(0.0),
        }

        if self.dwell >= BREAKOUT_TRIGGER_SECS {
            let edge = pinned.or(self.edge);
            self.state = BreakoutState::Breakout;
            self.hold = BREAKOUT_HOLD_SECS;
            self.dwell = 0.0;
            self.edge = edge;
            self.cooldown_edge = edge;
            self.cooldown = BREAKOUT_HOLD_SECS + EDGE_COOLDOWN_SECS;
        } else if self.dwell >= BREAKOUT_TRIGGER_SECS * PRE_BREAKOUT_FRACTION {
            self.state = BreakoutState::PreBreakout;
            if pinned.is_some() {
                self.edge = pinned;
            }
        } else if self.state == BreakoutState::PreBreakout
            && self.dwell < BREAKOUT_TRIGGER_SECS * PRE_BREAKOUT_EXIT_FRACTION
        {
            self.state = BreakoutState::Normal;
            self.edge = None;
        }
    }

    /// Displacement added to the desired point.
    pub fn push(&self) -> DVec2 {
        let Some(edge) = self.edge else {
            return DVec2::ZERO;
        };
        match self.state {
            BreakoutState::Normal => DVec2::ZERO,
            BreakoutState::PreBreakout => inward(edge) * PRE_BREAKOUT_PUSH,
            BreakoutState::Breakout => inward(edge) * BREAKOUT_PUSH,
        }
    }

    /// Escape grid spacing for the current state.
    pub fn grid_spacing(&self) -> f64 {
        match self.state {
            BreakoutState::Normal => ESCAPE_SPACING,
            BreakoutState::PreBreakout => ESCAPE_SPACING_PRE_BREAKOUT,
            BreakoutState::Breakout => ESCAPE_SPACING_BREAKOUT,
        }
    }
}
