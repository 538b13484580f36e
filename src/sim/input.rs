//! Input buffering between host events and simulation ticks
//!
//! Host events land here as soon as they arrive; the simulation consumes one
//! [`TickInput`] per tick via [`InputBuffer::take`].

use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Lane the player should occupy this tick (None keeps the current lane)
    pub lane: Option<u8>,
    /// Fire one bullet from the player's lane
    pub shoot: bool,
}

/// Lane target and pending shot, written by the host between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    lane_target: u8,
    last_lane: u8,
    pending_shoot: bool,
    accepting: bool,
}

impl InputBuffer {
    /// Buffer for the given lane layout. Starts closed until a run begins.
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lane_target: tuning.start_lane,
            last_lane: tuning.last_lane(),
            pending_shoot: false,
            accepting: false,
        }
    }

    /// Re-centre for a new run and start accepting input
    pub fn reset(&mut self, start_lane: u8) {
        self.lane_target = start_lane.min(self.last_lane);
        self.pending_shoot = false;
        self.accepting = true;
    }

    /// Stop accepting input (menu, game over). Drops any pending shot.
    pub fn close(&mut self) {
        self.accepting = false;
        self.pending_shoot = false;
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Current lane target
    pub fn lane_target(&self) -> u8 {
        self.lane_target
    }

    /// Shift one lane left, stopping at lane 0
    pub fn move_left(&mut self) {
        if self.accepting {
            self.lane_target = self.lane_target.saturating_sub(1);
        }
    }

    /// Shift one lane right, stopping at the last lane
    pub fn move_right(&mut self) {
        if self.accepting {
            self.lane_target = (self.lane_target + 1).min(self.last_lane);
        }
    }

    /// Queue a shot. Repeated requests before the next tick still fire once.
    pub fn request_shoot(&mut self) {
        if self.accepting {
            self.pending_shoot = true;
        }
    }

    /// Consume this tick's input. Clears the pending shot.
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            lane: Some(self.lane_target),
            shoot: self.pending_shoot,
        };
        self.pending_shoot = false;
        input
    }
}
