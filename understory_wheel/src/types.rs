// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input and output event types.
//!
//! [`WheelInput`] is what the host delivers: raw device deltas plus the usual
//! pointer metadata. [`WheelEvent`] is what listeners see after
//! normalization. Listeners receive a [`WheelArgs`] whose
//! [`positional`](WheelArgs::positional) view mirrors the argument list of the
//! alias they subscribed to.

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

/// Unit of the raw deltas in a [`WheelInput`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeltaMode {
    /// Deltas are in pixels.
    #[default]
    Pixel = 0,
    /// Deltas are in lines.
    Line = 1,
    /// Deltas are in pages.
    Page = 2,
}

impl DeltaMode {
    /// Decode a host `deltaMode` value; unknown values are treated as pixels.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held while the wheel moved.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CONTROL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Windows key.
        const META = 1 << 3;
    }
}

/// A raw wheel event as delivered by the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelInput {
    /// Horizontal delta in `delta_mode` units.
    pub delta_x: f64,
    /// Vertical delta in `delta_mode` units.
    pub delta_y: f64,
    /// Depth delta in `delta_mode` units. Passed through untouched.
    pub delta_z: f64,
    /// Unit of the deltas.
    pub delta_mode: DeltaMode,
    /// Pointer position relative to the viewport.
    pub client: Point,
    /// Pointer position relative to the target's padding edge.
    pub offset: Point,
    /// Pointer position relative to the document.
    pub page: Point,
    /// Pointer position relative to the screen.
    pub screen: Point,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Pressed pointer buttons bitmask.
    pub buttons: u16,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl WheelInput {
    /// A pixel-mode input with the given deltas and everything else defaulted.
    pub fn pixels(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            ..Self::default()
        }
    }

    /// Replace the delta mode.
    pub fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.delta_mode = mode;
        self
    }
}

/// A normalized wheel event handed to listeners.
///
/// Pointer metadata is copied from the raw input as-is, including `offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelEvent {
    /// Alias name the event was delivered under (`"wheel"`, `"mousewheel"`, ...).
    pub kind: &'static str,
    /// Normalized horizontal delta.
    pub delta_x: i64,
    /// Normalized vertical delta.
    pub delta_y: i64,
    /// Divisor used for normalization. `None` for synthetic triggers.
    pub delta_factor: Option<f64>,
    /// Always [`DeltaMode::Pixel`] after conversion.
    pub delta_mode: DeltaMode,
    /// Depth delta copied from the input.
    pub delta_z: f64,
    /// Pointer position relative to the viewport.
    pub client: Point,
    /// Pointer position relative to the target's padding edge.
    pub offset: Point,
    /// Pointer position relative to the document.
    pub page: Point,
    /// Pointer position relative to the screen.
    pub screen: Point,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Pressed pointer buttons bitmask.
    pub buttons: u16,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    /// The input this event was derived from, if it came from the host.
    pub original: Option<WheelInput>,
}

impl WheelEvent {
    /// Copy the pointer metadata of `input` into a pixel-mode event named `kind`.
    pub(crate) fn from_input(kind: &'static str, input: &WheelInput) -> Self {
        Self {
            kind,
            delta_x: 0,
            delta_y: 0,
            delta_factor: None,
            delta_mode: DeltaMode::Pixel,
            delta_z: input.delta_z,
            client: input.client,
            offset: input.offset,
            page: input.page,
            screen: input.screen,
            modifiers: input.modifiers,
            buttons: input.buttons,
            timestamp: input.timestamp,
            original: Some(input.clone()),
        }
    }

    /// A synthetic event with zero deltas and no original input.
    pub fn synthetic(kind: &'static str) -> Self {
        Self {
            original: None,
            ..Self::from_input(kind, &WheelInput::default())
        }
    }
}

/// The three leading values the legacy alias passes ahead of the event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegacyDeltas {
    /// Dominant normalized delta (vertical, or horizontal when there is no vertical motion).
    pub delta: i64,
    /// Normalized horizontal delta.
    pub delta_x: i64,
    /// Normalized vertical delta.
    pub delta_y: i64,
}

/// One positional listener argument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WheelArg<'a> {
    /// A numeric leading argument.
    Delta(i64),
    /// The event object.
    Event(&'a WheelEvent),
}

/// Arguments delivered to a listener.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelArgs<'a> {
    /// The event object.
    pub event: &'a WheelEvent,
    /// Leading deltas, present only for aliases that pass extra arguments.
    pub legacy: Option<LegacyDeltas>,
}

impl<'a> WheelArgs<'a> {
    /// The argument list in call order: `(event)` or `(delta, delta_x, delta_y, event)`.
    pub fn positional(&self) -> SmallVec<[WheelArg<'a>; 4]> {
        match self.legacy {
            Some(l) => smallvec![
                WheelArg::Delta(l.delta),
                WheelArg::Delta(l.delta_x),
                WheelArg::Delta(l.delta_y),
                WheelArg::Event(self.event),
            ],
            None => smallvec![WheelArg::Event(self.event)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_mode_from_raw() {
        assert_eq!(DeltaMode::from_raw(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_raw(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_raw(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_raw(7), DeltaMode::Pixel);
    }

    #[test]
    fn from_input_copies_pointer_fields() {
        let input = WheelInput {
            delta_y: 3.0,
            delta_z: 1.5,
            delta_mode: DeltaMode::Line,
            client: Point::new(342.0, 301.0),
            offset: Point::new(1.0, 2.0),
            modifiers: Modifiers::SHIFT | Modifiers::ALT,
            buttons: 4,
            timestamp: 99,
            ..WheelInput::default()
        };
        let ev = WheelEvent::from_input("wheel", &input);
        assert_eq!(ev.kind, "wheel");
        assert_eq!(ev.delta_mode, DeltaMode::Pixel);
        assert_eq!(ev.client, Point::new(342.0, 301.0));
        assert_eq!(ev.offset, Point::new(1.0, 2.0));
        assert_eq!(ev.modifiers, Modifiers::SHIFT | Modifiers::ALT);
        assert_eq!(ev.buttons, 4);
        assert_eq!(ev.delta_z, 1.5);
        assert_eq!(ev.timestamp, 99);
        assert_eq!(ev.original.as_ref(), Some(&input));
    }

    #[test]
    fn positional_shapes() {
        let ev = WheelEvent::synthetic("wheel");
        let modern = WheelArgs {
            event: &ev,
            legacy: None,
        };
        assert_eq!(modern.positional().as_slice(), &[WheelArg::Event(&ev)]);

        let legacy = WheelArgs {
            event: &ev,
            legacy: Some(LegacyDeltas {
                delta: -4,
                delta_x: 0,
                delta_y: -4,
            }),
        };
        assert_eq!(
            legacy.positional().as_slice(),
            &[
                WheelArg::Delta(-4),
                WheelArg::Delta(0),
                WheelArg::Delta(-4),
                WheelArg::Event(&ev),
            ]
        );
    }
}
