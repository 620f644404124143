// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal listener bindings driving a [`WheelNormalizer`].
//!
//! [`Bindings`] plays the part of an event-binding layer: it keeps listeners per
//! (element, alias), attaches the normalizer on the first listener, detaches on
//! the last, and fans normalized events out to listeners in insertion order.
//! Toolkits with their own listener storage can drive [`WheelNormalizer`]
//! directly instead.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_wheel::bindings::Bindings;
//! use understory_wheel::metrics::NoMetrics;
//! use understory_wheel::types::WheelInput;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bindings: Bindings<u32> = Bindings::new();
//!
//! let sink = seen.clone();
//! bindings.on(7, "wheel", &NoMetrics, move |args| {
//!     sink.borrow_mut().push(args.event.delta_y);
//! });
//!
//! bindings.dispatch_native(7, &WheelInput::pixels(0.0, 2.2), 0, &NoMetrics);
//! bindings.dispatch_native(7, &WheelInput::pixels(0.0, 10.528), 16, &NoMetrics);
//! assert_eq!(*seen.borrow(), vec![1, 4]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::metrics::ElementMetrics;
use crate::normalizer::WheelNormalizer;
use crate::types::{WheelArgs, WheelEvent, WheelInput};

/// Handle returned by [`Bindings::on`], used to remove the listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&WheelArgs<'_>)>;

/// Listener registry wired to a [`WheelNormalizer`].
pub struct Bindings<K> {
    normalizer: WheelNormalizer<K>,
    listeners: HashMap<(K, &'static str), Vec<(ListenerId, Listener)>>,
    next_id: u64,
}

impl<K> fmt::Debug for Bindings<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("normalizer", &self.normalizer)
            .field("listener_lists", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Hash> Default for Bindings<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> Bindings<K> {
    /// Bindings over a normalizer with the default aliases.
    pub fn new() -> Self {
        Self::with_normalizer(WheelNormalizer::new())
    }

    /// Bindings over a caller-configured normalizer.
    pub fn with_normalizer(normalizer: WheelNormalizer<K>) -> Self {
        Self {
            normalizer,
            listeners: HashMap::new(),
            next_id: 0,
        }
    }

    /// The underlying normalizer.
    pub fn normalizer(&self) -> &WheelNormalizer<K> {
        &self.normalizer
    }

    /// Mutable access to the underlying normalizer, e.g. to invalidate metrics.
    pub fn normalizer_mut(&mut self) -> &mut WheelNormalizer<K> {
        &mut self.normalizer
    }

    /// Add `listener` for `alias` on `element`.
    ///
    /// The first listener for a given (element, alias) attaches the normalizer,
    /// measuring the element through `metrics`. Returns `None` for unknown aliases.
    pub fn on(
        &mut self,
        element: K,
        alias: &str,
        metrics: &impl ElementMetrics<K>,
        listener: impl FnMut(&WheelArgs<'_>) + 'static,
    ) -> Option<ListenerId> {
        let name = self.normalizer.alias(alias)?.name;
        let list = self.listeners.entry((element, name)).or_default();
        if list.is_empty() {
            self.normalizer.attach(element, name, metrics);
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        list.push((id, Box::new(listener)));
        Some(id)
    }

    /// Remove the listener `id` for `alias` on `element`.
    ///
    /// Removing the last listener detaches the normalizer. Returns `true` if a
    /// listener was removed.
    pub fn off(&mut self, element: K, alias: &str, id: ListenerId) -> bool {
        let Some(name) = self.normalizer.alias(alias).map(|a| a.name) else {
            return false;
        };
        let Some(list) = self.listeners.get_mut(&(element, name)) else {
            return false;
        };
        let Some(pos) = list.iter().position(|(lid, _)| *lid == id) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.listeners.remove(&(element, name));
            self.normalizer.detach(element, name);
        }
        true
    }

    /// Drop every listener on `element` and detach all of its aliases.
    pub fn remove_element(&mut self, element: K) {
        let names: SmallVec<[&'static str; 2]> = self
            .listeners
            .keys()
            .filter(|(e, _)| *e == element)
            .map(|(_, name)| *name)
            .collect();
        for name in names {
            self.listeners.remove(&(element, name));
            self.normalizer.detach(element, name);
        }
    }

    /// Number of listeners for `alias` on `element`.
    pub fn listener_count(&self, element: K, alias: &str) -> usize {
        self.normalizer
            .alias(alias)
            .and_then(|a| self.listeners.get(&(element, a.name)))
            .map_or(0, Vec::len)
    }

    /// Deliver a native input on `element` at time `now`.
    ///
    /// Every alias attached on the element normalizes the input and invokes its
    /// listeners synchronously, in insertion order. Returns the number of
    /// listener calls made.
    pub fn dispatch_native(
        &mut self,
        element: K,
        input: &WheelInput,
        now: u64,
        metrics: &impl ElementMetrics<K>,
    ) -> usize {
        let names: SmallVec<[&'static str; 2]> =
            self.normalizer.attached_aliases(element).collect();
        let mut calls = 0;
        for name in names {
            let Some(delivery) = self.normalizer.handle(element, name, input, now, metrics) else {
                continue;
            };
            calls += self.invoke(element, name, &delivery.args());
        }
        calls
    }

    /// Fire `alias` on `element` without native input.
    ///
    /// Listeners receive a synthetic event with zero deltas and no factor, as a
    /// single argument; calibration is not touched. Returns the number of
    /// listener calls made.
    pub fn trigger(&mut self, element: K, alias: &str) -> usize {
        let Some(name) = self.normalizer.alias(alias).map(|a| a.name) else {
            return 0;
        };
        let event = WheelEvent::synthetic(name);
        let args = WheelArgs {
            event: &event,
            legacy: None,
        };
        self.invoke(element, name, &args)
    }

    fn invoke(&mut self, element: K, name: &'static str, args: &WheelArgs<'_>) -> usize {
        let Some(list) = self.listeners.get_mut(&(element, name)) else {
            return 0;
        };
        for (_, listener) in list.iter_mut() {
            listener(args);
        }
        list.len()
    }
}
