// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`WheelNormalizer`]: alias registry, per-element metric cache, and shared calibration.
//!
//! The normalizer is the extension an event-binding layer plugs in. The binding
//! layer calls [`attach`](WheelNormalizer::attach) when an element gets its first
//! listener for an alias and [`detach`](WheelNormalizer::detach) when it loses the
//! last one. Native input for the element goes through
//! [`handle`](WheelNormalizer::handle), which returns the event (and the legacy
//! leading deltas, if the alias passes them) ready to hand to listeners.
//!
//! All aliases and elements registered on one normalizer share a single
//! [`Calibration`]. Use one normalizer per input source you want calibrated
//! together, typically one per window.
//!
//! ```
//! use understory_wheel::metrics::NoMetrics;
//! use understory_wheel::normalizer::WheelNormalizer;
//! use understory_wheel::types::WheelInput;
//!
//! let mut normalizer: WheelNormalizer<u32> = WheelNormalizer::new();
//! assert!(normalizer.attach(1, "wheel", &NoMetrics));
//!
//! let calibrate = normalizer.handle(1, "wheel", &WheelInput::pixels(0.0, 2.2), 0, &NoMetrics);
//! assert_eq!(calibrate.unwrap().event.delta_factor, Some(2.2));
//!
//! let out = normalizer
//!     .handle(1, "wheel", &WheelInput::pixels(0.0, 10.528), 16, &NoMetrics)
//!     .unwrap();
//! assert_eq!(out.event.delta_y, 4);
//! assert!(out.legacy.is_none());
//! ```

use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::alias::{AliasConfig, MOUSEWHEEL, WHEEL};
use crate::calibration::Calibration;
use crate::deprecation;
use crate::metrics::{ElementMetrics, UnitMetrics};
use crate::normalize::normalize;
use crate::types::{LegacyDeltas, WheelArgs, WheelEvent, WheelInput};

/// A normalized event plus the leading arguments its alias passes.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    /// Event object for listeners.
    pub event: WheelEvent,
    /// Leading `(delta, delta_x, delta_y)`, for aliases that pass extra arguments.
    pub legacy: Option<LegacyDeltas>,
}

impl Delivery {
    /// Listener arguments borrowing this delivery.
    pub fn args(&self) -> WheelArgs<'_> {
        WheelArgs {
            event: &self.event,
            legacy: self.legacy,
        }
    }
}

/// Wheel normalization extension keyed by element handles `K`.
#[derive(Clone, Debug)]
pub struct WheelNormalizer<K> {
    aliases: SmallVec<[AliasConfig; 2]>,
    subscriptions: HashSet<(K, &'static str)>,
    units: HashMap<(K, &'static str), UnitMetrics>,
    calibration: Calibration,
}

impl<K: Copy + Eq + Hash> Default for WheelNormalizer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> WheelNormalizer<K> {
    /// A normalizer with the modern [`WHEEL`] and legacy [`MOUSEWHEEL`] aliases.
    pub fn new() -> Self {
        Self::with_aliases([WHEEL, MOUSEWHEEL])
    }

    /// A normalizer with exactly the given aliases. Later duplicates of a name replace earlier ones.
    pub fn with_aliases(aliases: impl IntoIterator<Item = AliasConfig>) -> Self {
        let mut this = Self {
            aliases: SmallVec::new(),
            subscriptions: HashSet::new(),
            units: HashMap::new(),
            calibration: Calibration::new(),
        };
        for alias in aliases {
            this.register(alias);
        }
        this
    }

    /// Register an alias, replacing any alias with the same name in place.
    pub fn register(&mut self, alias: AliasConfig) {
        match self.aliases.iter_mut().find(|a| a.name == alias.name) {
            Some(slot) => *slot = alias,
            None => self.aliases.push(alias),
        }
    }

    /// Look up an alias by name.
    pub fn alias(&self, name: &str) -> Option<&AliasConfig> {
        self.aliases.iter().find(|a| a.name == name)
    }

    /// Registered aliases in registration order.
    pub fn aliases(&self) -> impl Iterator<Item = &AliasConfig> {
        self.aliases.iter()
    }

    /// Subscribe `element` to `alias` and cache its line and page heights.
    ///
    /// Idempotent: attaching twice keeps the metrics measured the first time.
    /// Returns `false` if `alias` is not registered.
    pub fn attach(&mut self, element: K, alias: &str, metrics: &impl ElementMetrics<K>) -> bool {
        let Some(name) = self.alias(alias).map(|a| a.name) else {
            return false;
        };
        if self.subscriptions.insert((element, name)) {
            tracing::debug!(alias = name, "wheel alias attached");
        }
        self.units
            .entry((element, name))
            .or_insert_with(|| UnitMetrics::measure(metrics, &element));
        true
    }

    /// Unsubscribe `element` from `alias` and drop its cached metrics.
    ///
    /// Safe to call without a prior attach. Returns `true` if a subscription was removed.
    pub fn detach(&mut self, element: K, alias: &str) -> bool {
        let Some(name) = self.alias(alias).map(|a| a.name) else {
            return false;
        };
        self.units.remove(&(element, name));
        let removed = self.subscriptions.remove(&(element, name));
        if removed {
            tracing::debug!(alias = name, "wheel alias detached");
        }
        removed
    }

    /// Whether `element` is subscribed to `alias`.
    pub fn is_attached(&self, element: K, alias: &str) -> bool {
        self.alias(alias)
            .is_some_and(|a| self.subscriptions.contains(&(element, a.name)))
    }

    /// Names of the aliases `element` is subscribed to, in registration order.
    pub fn attached_aliases(&self, element: K) -> impl Iterator<Item = &'static str> + '_ {
        self.aliases
            .iter()
            .map(|a| a.name)
            .filter(move |name| self.subscriptions.contains(&(element, *name)))
    }

    /// Cached metrics for `element` under `alias`, if measured.
    pub fn unit_metrics(&self, element: K, alias: &str) -> Option<UnitMetrics> {
        let name = self.alias(alias)?.name;
        self.units.get(&(element, name)).copied()
    }

    /// Forget cached metrics for `element` under every alias.
    ///
    /// Subscriptions are kept; the next event re-measures.
    pub fn invalidate_metrics(&mut self, element: K) {
        self.units.retain(|(e, _), _| *e != element);
    }

    /// The shared calibration.
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Apply the calibration reset if its deadline has passed. See [`Calibration::poll`].
    pub fn poll(&mut self, now: u64) -> bool {
        self.calibration.poll(now)
    }

    /// Normalize a native input for `element` under `alias` at time `now`.
    ///
    /// Returns `None` when nothing should be dispatched: the element is not
    /// attached to `alias`, or the input carries no movement. Missing cached
    /// metrics are re-measured through `metrics`.
    pub fn handle(
        &mut self,
        element: K,
        alias: &str,
        input: &WheelInput,
        now: u64,
        metrics: &impl ElementMetrics<K>,
    ) -> Option<Delivery> {
        let config = *self.alias(alias)?;
        if !self.subscriptions.contains(&(element, config.name)) {
            return None;
        }
        if config.deprecated {
            deprecation::warn_once(config.name);
        }

        let units = *self
            .units
            .entry((element, config.name))
            .or_insert_with(|| UnitMetrics::measure(metrics, &element));

        let Some(n) = normalize(&config, input, units, &mut self.calibration, now) else {
            tracing::trace!(alias = config.name, "wheel input suppressed");
            return None;
        };

        let mut event = WheelEvent::from_input(config.name, input);
        event.delta_x = n.delta_x;
        event.delta_y = n.delta_y;
        event.delta_factor = Some(n.factor);

        Some(Delivery {
            event,
            legacy: config.pass_extra_args.then(|| n.legacy_deltas()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{DEFAULT_LINE_HEIGHT, NoMetrics};
    use crate::types::DeltaMode;
    use alloc::vec::Vec;
    use core::cell::Cell;

    struct Counting {
        calls: Cell<u32>,
    }

    impl ElementMetrics<u32> for Counting {
        fn parent_font_size(&self, _: &u32) -> Option<f64> {
            self.calls.set(self.calls.get() + 1);
            Some(20.0)
        }
        fn font_size(&self, _: &u32) -> Option<f64> {
            None
        }
        fn height(&self, _: &u32) -> Option<f64> {
            Some(400.0)
        }
    }

    #[test]
    fn attach_is_idempotent_and_measures_once() {
        let m = Counting { calls: Cell::new(0) };
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        assert!(n.attach(1, "wheel", &m));
        assert!(n.attach(1, "wheel", &m));
        assert_eq!(m.calls.get(), 1);
        assert_eq!(
            n.unit_metrics(1, "wheel"),
            Some(UnitMetrics {
                line_height: 20.0,
                page_height: 400.0,
            })
        );
        assert!(n.unit_metrics(1, "mousewheel").is_none());
    }

    #[test]
    fn unknown_alias_is_rejected() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        assert!(!n.attach(1, "scroll", &NoMetrics));
        assert!(!n.detach(1, "scroll"));
        assert!(
            n.handle(1, "scroll", &WheelInput::pixels(0.0, 1.0), 0, &NoMetrics)
                .is_none()
        );
    }

    #[test]
    fn detach_without_attach_is_a_noop() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        assert!(!n.detach(9, "wheel"));
        assert!(!n.is_attached(9, "wheel"));
    }

    #[test]
    fn detached_element_gets_nothing() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.attach(1, "wheel", &NoMetrics);
        assert!(n.detach(1, "wheel"));
        assert!(n.unit_metrics(1, "wheel").is_none());
        assert!(
            n.handle(1, "wheel", &WheelInput::pixels(0.0, 3.0), 0, &NoMetrics)
                .is_none()
        );
        assert_eq!(n.calibration().lowest_delta(), None);
    }

    #[test]
    fn calibration_is_shared_across_elements_and_aliases() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.attach(1, "wheel", &NoMetrics);
        n.attach(2, "mousewheel", &NoMetrics);
        n.handle(1, "wheel", &WheelInput::pixels(0.0, 3.0), 0, &NoMetrics)
            .unwrap();
        let out = n
            .handle(2, "mousewheel", &WheelInput::pixels(0.0, 12.0), 10, &NoMetrics)
            .unwrap();
        assert_eq!(out.event.delta_factor, Some(3.0));
        assert_eq!(out.event.delta_y, -4);
        assert_eq!(
            out.legacy,
            Some(LegacyDeltas {
                delta: -4,
                delta_x: 0,
                delta_y: -4,
            })
        );
        assert_eq!(out.event.kind, "mousewheel");
    }

    #[test]
    fn invalidated_metrics_are_remeasured_lazily() {
        let m = Counting { calls: Cell::new(0) };
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.attach(1, "wheel", &m);
        n.invalidate_metrics(1);
        assert!(n.unit_metrics(1, "wheel").is_none());
        assert!(n.is_attached(1, "wheel"));

        let input = WheelInput::pixels(0.0, 1.0).with_mode(DeltaMode::Line);
        let out = n.handle(1, "wheel", &input, 0, &m).unwrap();
        assert_eq!(out.event.delta_factor, Some(20.0));
        assert_eq!(m.calls.get(), 2);
    }

    #[test]
    fn event_is_pixel_mode_and_keeps_original() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.attach(1, "wheel", &NoMetrics);
        let input = WheelInput::pixels(0.0, 2.0).with_mode(DeltaMode::Line);
        let out = n.handle(1, "wheel", &input, 0, &NoMetrics).unwrap();
        assert_eq!(out.event.delta_mode, DeltaMode::Pixel);
        assert_eq!(out.event.delta_factor, Some(2.0 * DEFAULT_LINE_HEIGHT));
        assert_eq!(out.event.original, Some(input));
    }

    #[test]
    fn attached_aliases_follow_registration_order() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.attach(1, "mousewheel", &NoMetrics);
        n.attach(1, "wheel", &NoMetrics);
        n.attach(2, "wheel", &NoMetrics);
        let names: Vec<_> = n.attached_aliases(1).collect();
        assert_eq!(names, ["wheel", "mousewheel"]);
    }

    #[test]
    fn register_replaces_by_name() {
        let mut n: WheelNormalizer<u32> = WheelNormalizer::new();
        n.register(AliasConfig {
            sign_multiplier: -1,
            ..WHEEL
        });
        assert_eq!(n.aliases().count(), 2);
        assert_eq!(n.alias("wheel").map(|a| a.sign_multiplier), Some(-1));
    }
}
