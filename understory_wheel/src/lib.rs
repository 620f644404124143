// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_wheel --heading-base-level=0

//! Understory Wheel: deterministic, `no_std` normalization of wheel input.
//!
//! ## Overview
//!
//! Hosts report wheel movement in pixels, lines, or pages, and devices disagree
//! wildly on magnitude. This crate turns raw [`WheelInput`](types::WheelInput)
//! into a [`WheelEvent`](types::WheelEvent) with small integer deltas that mean
//! roughly "one notch" regardless of device.
//!
//! ## Normalization
//!
//! 1. The vertical delta is multiplied by the alias's sign multiplier; when there
//!    is no vertical motion the horizontal delta (times the multiplier) becomes
//!    the dominant `delta`. Inputs without any motion are dropped.
//! 2. Line and page deltas are converted to pixels using the element's cached
//!    line height and page height ([`metrics`]).
//! 3. The largest absolute pixel delta feeds the shared [`Calibration`](calibration::Calibration),
//!    which keeps the smallest magnitude seen in the current burst.
//! 4. Deltas are divided by that magnitude and rounded to whole numbers
//!    ([`normalize`]).
//! 5. The calibration resets after [`RESET_DELAY_MS`](calibration::RESET_DELAY_MS)
//!    without input, so a trackpad burst and a mouse-wheel burst calibrate
//!    independently.
//!
//! ## Aliases
//!
//! Two event names are registered by default, both handled by one code path
//! parameterized by [`AliasConfig`](alias::AliasConfig):
//!
//! - [`WHEEL`](alias::WHEEL): listeners receive `(event)`.
//! - [`MOUSEWHEEL`](alias::MOUSEWHEEL): deprecated. Inverted sign, and listeners
//!   receive `(delta, delta_x, delta_y, event)`. First use logs a one-time
//!   warning through `tracing`.
//!
//! ## Layering
//!
//! [`WheelNormalizer`](normalizer::WheelNormalizer) is the extension an event
//! binding layer calls on attach, detach, and native input.
//! [`Bindings`](bindings::Bindings) is a small listener store built on it for
//! toolkits that have none.
//!
//! ## Time
//!
//! Nothing reads a clock. Every entry point that can touch calibration takes a
//! `now` timestamp in milliseconds from the host.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod alias;
pub mod bindings;
pub mod calibration;
pub mod deprecation;
pub mod metrics;
pub mod normalize;
pub mod normalizer;
pub mod types;

/// Crate version, for hosts that report which normalizer they run.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
