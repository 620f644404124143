// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackpad and mouse-wheel bursts through one normalizer.
//!
//! This example shows:
//! - a trackpad burst (small pixel deltas) calibrating the shared divisor,
//! - a pause that lets the calibration reset,
//! - a mouse-wheel burst (line deltas) calibrating from scratch,
//! - a legacy `mousewheel` listener receiving leading deltas and the one-time warning.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_wheel_demos --example mixed_devices`

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use understory_wheel::bindings::Bindings;
use understory_wheel::calibration::RESET_DELAY_MS;
use understory_wheel::metrics::ElementMetrics;
use understory_wheel::types::{DeltaMode, WheelArgs, WheelInput};

/// Element handles for a two-pane layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
enum Pane {
    List,
    Preview,
}

/// Fixed computed styles for both panes.
struct Styles;

impl ElementMetrics<Pane> for Styles {
    fn parent_font_size(&self, _: &Pane) -> Option<f64> {
        Some(16.0)
    }
    fn font_size(&self, pane: &Pane) -> Option<f64> {
        Some(match pane {
            Pane::List => 14.0,
            Pane::Preview => 18.0,
        })
    }
    fn height(&self, pane: &Pane) -> Option<f64> {
        Some(match pane {
            Pane::List => 640.0,
            Pane::Preview => 480.0,
        })
    }
}

fn describe(pane: Pane) -> impl FnMut(&WheelArgs<'_>) {
    move |args| {
        let ev = args.event;
        match args.legacy {
            Some(l) => println!(
                "{pane:?} {}: delta={} dx={} dy={} factor={:?}",
                ev.kind, l.delta, l.delta_x, l.delta_y, ev.delta_factor
            ),
            None => println!(
                "{pane:?} {}: dx={} dy={} factor={:?} at {:?}",
                ev.kind, ev.delta_x, ev.delta_y, ev.delta_factor, ev.client
            ),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut bindings: Bindings<Pane> = Bindings::new();
    bindings.on(Pane::List, "wheel", &Styles, describe(Pane::List));
    bindings.on(Pane::Preview, "mousewheel", &Styles, describe(Pane::Preview));

    // Trackpad: a run of small pixel deltas, 16ms apart.
    let mut now = 0;
    for dy in [1.5, 3.0, 6.0, 4.5, 1.5] {
        let input = WheelInput {
            delta_y: dy,
            client: Point::new(120.0, 200.0),
            timestamp: now,
            ..WheelInput::default()
        };
        bindings.dispatch_native(Pane::List, &input, now, &Styles);
        now += 16;
    }

    // Let the calibration window lapse.
    now += RESET_DELAY_MS;

    // Mouse wheel: three notches reported in lines.
    for _ in 0..3 {
        let input = WheelInput::pixels(0.0, 3.0).with_mode(DeltaMode::Line);
        bindings.dispatch_native(Pane::List, &input, now, &Styles);
        bindings.dispatch_native(Pane::Preview, &input, now, &Styles);
        now += 40;
    }
}
