// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-event normalization step.
//!
//! Given an alias, a raw input, the element's unit metrics, and the shared
//! calibration, produce integer deltas or decide that nothing moved.
//!
//! ## Rounding
//!
//! Each value is divided by the calibration divisor and rounded with `floor`
//! when `sign_multiplier * |value| >= 1`, otherwise with `ceil`. For the modern
//! alias this floors any real movement; for the legacy alias (multiplier `-1`)
//! the test never passes and every value is rounded with `ceil`.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::alias::AliasConfig;
use crate::calibration::Calibration;
use crate::metrics::UnitMetrics;
use crate::types::{DeltaMode, LegacyDeltas, WheelInput};

/// Integer deltas produced for one input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalized {
    /// Dominant delta: vertical, or horizontal when there is no vertical motion.
    pub delta: i64,
    /// Normalized horizontal delta.
    pub delta_x: i64,
    /// Normalized vertical delta.
    pub delta_y: i64,
    /// Divisor the deltas were normalized by.
    pub factor: f64,
}

impl Normalized {
    /// The three values the legacy alias passes ahead of the event.
    pub fn legacy_deltas(&self) -> LegacyDeltas {
        LegacyDeltas {
            delta: self.delta,
            delta_x: self.delta_x,
            delta_y: self.delta_y,
        }
    }
}

/// Normalize `input` for `alias`, updating `calibration` at time `now`.
///
/// Returns `None` when there is nothing to dispatch: both deltas are zero, a
/// delta is not finite, or unit conversion left no magnitude (for example page
/// mode on an element with zero height). Suppressed inputs leave the
/// calibration untouched.
pub fn normalize(
    alias: &AliasConfig,
    input: &WheelInput,
    units: UnitMetrics,
    calibration: &mut Calibration,
    now: u64,
) -> Option<Normalized> {
    if !input.delta_x.is_finite() || !input.delta_y.is_finite() {
        return None;
    }
    let multiplier = alias.multiplier();

    let mut delta_y = input.delta_y * multiplier;
    let mut delta_x = input.delta_x;
    let mut delta = if delta_y == 0.0 {
        delta_x * multiplier
    } else {
        delta_y
    };

    if delta_y == 0.0 && delta_x == 0.0 {
        return None;
    }

    let scale = match input.delta_mode {
        DeltaMode::Pixel => 1.0,
        DeltaMode::Line => units.line_height,
        DeltaMode::Page => units.page_height,
    };
    delta *= scale;
    delta_x *= scale;
    delta_y *= scale;

    let magnitude = delta_y.abs().max(delta_x.abs());
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return None;
    }

    let factor = calibration.observe(magnitude, now);
    // Round in f64, then saturate into i64 so extreme ratios keep their sign.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "float to int casts saturate; the quotient is already whole"
    )]
    let round = |v: f64| {
        let q = v / factor;
        let whole = if multiplier * v.abs() >= 1.0 {
            q.floor()
        } else {
            q.ceil()
        };
        whole as i64
    };

    Some(Normalized {
        delta: round(delta),
        delta_x: round(delta_x),
        delta_y: round(delta_y),
        factor,
    })
}
