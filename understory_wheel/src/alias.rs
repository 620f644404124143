// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event aliases: one normalization handler, parameterized per name.

/// Configuration of a subscribable wheel event name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AliasConfig {
    /// Event name listeners subscribe to. Also stamped on [`WheelEvent::kind`](crate::types::WheelEvent::kind).
    pub name: &'static str,
    /// Applied to the raw vertical delta (and to the horizontal fallback). Either `1` or `-1`.
    pub sign_multiplier: i8,
    /// Pass `(delta, delta_x, delta_y)` ahead of the event object.
    pub pass_extra_args: bool,
    /// Emit the one-time deprecation warning on first use.
    pub deprecated: bool,
}

/// The modern alias: deltas keep the host's sign, listeners get `(event)`.
pub const WHEEL: AliasConfig = AliasConfig {
    name: "wheel",
    sign_multiplier: 1,
    pass_extra_args: false,
    deprecated: false,
};

/// The legacy alias: inverted sign, listeners get `(delta, delta_x, delta_y, event)`.
///
/// Deprecated for consumers; new code should subscribe to [`WHEEL`].
pub const MOUSEWHEEL: AliasConfig = AliasConfig {
    name: "mousewheel",
    sign_multiplier: -1,
    pass_extra_args: true,
    deprecated: true,
};

impl AliasConfig {
    pub(crate) fn multiplier(&self) -> f64 {
        if self.sign_multiplier < 0 { -1.0 } else { 1.0 }
    }
}
