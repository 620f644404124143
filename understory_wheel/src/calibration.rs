// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive delta calibration shared by every element and alias of a normalizer.
//!
//! Devices report wildly different magnitudes for one "notch" of movement: a
//! trackpad may send 3 while a mouse wheel sends 120. [`Calibration`] tracks the
//! smallest absolute pixel magnitude seen in the current burst and uses it as
//! the divisor for normalized deltas.
//!
//! ## Reset policy
//!
//! Each observation restarts a [`RESET_DELAY_MS`] deadline. Once a deadline
//! passes with no new observation, the divisor is cleared and the next event
//! calibrates from scratch. Time is supplied by the caller in milliseconds;
//! nothing here reads a clock.
//!
//! ```
//! use understory_wheel::calibration::{Calibration, RESET_DELAY_MS};
//!
//! let mut cal = Calibration::new();
//! assert_eq!(cal.observe(120.0, 1000), 120.0);
//! // A smaller magnitude inside the window lowers the divisor.
//! assert_eq!(cal.observe(40.0, 1100), 40.0);
//! // A larger one does not raise it.
//! assert_eq!(cal.observe(80.0, 1150), 40.0);
//! // After a pause, the next event recalibrates.
//! assert_eq!(cal.observe(80.0, 1150 + RESET_DELAY_MS), 80.0);
//! ```

/// Quiet period after which the divisor is forgotten (milliseconds).
pub const RESET_DELAY_MS: u64 = 200;

/// Lowest-delta state with a debounced reset deadline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calibration {
    lowest_delta: Option<f64>,
    deadline: Option<u64>,
}

impl Calibration {
    /// Create an empty calibration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current divisor, if calibrated.
    pub fn lowest_delta(&self) -> Option<f64> {
        self.lowest_delta
    }

    /// Time at which the divisor will be cleared, if one is pending.
    ///
    /// Hosts that run their own timers can schedule a call to [`poll`](Self::poll) here.
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Record a positive pixel magnitude observed at `now` and return the divisor to use.
    ///
    /// Applies any elapsed reset first, then lowers the divisor if `magnitude` is
    /// smaller, then restarts the reset deadline.
    pub fn observe(&mut self, magnitude: f64, now: u64) -> f64 {
        self.poll(now);
        let lowest = match self.lowest_delta {
            Some(lowest) if lowest <= magnitude => lowest,
            _ => magnitude,
        };
        self.lowest_delta = Some(lowest);
        self.deadline = Some(now.saturating_add(RESET_DELAY_MS));
        lowest
    }

    /// Clear the divisor if the reset deadline has passed.
    ///
    /// Returns `true` if this call performed the reset.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                tracing::debug!(
                    lowest_delta = self.lowest_delta,
                    "wheel calibration window elapsed"
                );
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Forget the divisor and any pending deadline.
    pub fn reset(&mut self) {
        self.lowest_delta = None;
        self.deadline = None;
    }
}
