//! Neon Runner - A six-lane infinite runner shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `session`: Menu / Playing / GameOver state machine around the simulation
//! - `platform`: Browser/native input translation
//! - `view`: Presentation-side smoothing (never read by the simulation)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Demo controller for headless and idle runs

pub mod autopilot;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use session::Session;
pub use tuning::{Tuning, TuningError};

/// World X offset of a lane centre.
///
/// Lanes are evenly spaced and centred on x = 0, so the layout is symmetric
/// for any lane count.
#[inline]
pub fn lane_to_x(lane: u8, tuning: &Tuning) -> f32 {
    let center_offset = (tuning.lane_count as f32 - 1.0) * tuning.lane_width / 2.0;
    lane as f32 * tuning.lane_width - center_offset
}

/// Clamp a host-supplied frame delta to something safe for position math.
///
/// Negative and non-finite values become 0.0 (a no-op tick).
#[inline]
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta >= 0.0 {
        delta
    } else {
        log::warn!("Rejected frame delta {}, treating as 0", delta);
        0.0
    }
}
