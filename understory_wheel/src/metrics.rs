// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element measurements used to convert line and page deltas to pixels.
//!
//! The normalizer does not know about layout. Hosts implement [`ElementMetrics`]
//! for their element handle type; the normalizer measures once at attach time
//! and caches the result as [`UnitMetrics`].

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Line height used when no usable font size is available (pixels).
pub const DEFAULT_LINE_HEIGHT: f64 = 16.0;

/// Host-provided measurements for elements identified by `K`.
pub trait ElementMetrics<K> {
    /// Computed font size (pixels) of the element's offset parent, or of the
    /// document body when the element has no offset parent.
    fn parent_font_size(&self, element: &K) -> Option<f64>;
    /// Computed font size (pixels) of the element itself.
    fn font_size(&self, element: &K) -> Option<f64>;
    /// Rendered content height of the element (pixels).
    fn height(&self, element: &K) -> Option<f64>;
}

/// Metrics source that knows nothing; yields default line height and zero page height.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoMetrics;

impl<K> ElementMetrics<K> for NoMetrics {
    fn parent_font_size(&self, _: &K) -> Option<f64> {
        None
    }
    fn font_size(&self, _: &K) -> Option<f64> {
        None
    }
    fn height(&self, _: &K) -> Option<f64> {
        None
    }
}

/// Cached pixel sizes of one line and one page for an element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitMetrics {
    /// Pixels per line.
    pub line_height: f64,
    /// Pixels per page.
    pub page_height: f64,
}

impl UnitMetrics {
    /// Measure `element` through `metrics`.
    pub fn measure<K>(metrics: &impl ElementMetrics<K>, element: &K) -> Self {
        Self {
            line_height: line_height(metrics, element),
            page_height: page_height(metrics, element),
        }
    }
}

/// Line height for `element`: the offset parent's font size, else the element's
/// own font size, else [`DEFAULT_LINE_HEIGHT`].
///
/// Sizes are truncated to whole pixels; a size that truncates to zero or is not
/// finite falls through to the next candidate.
pub fn line_height<K>(metrics: &impl ElementMetrics<K>, element: &K) -> f64 {
    [
        metrics.parent_font_size(element),
        metrics.font_size(element),
    ]
    .into_iter()
    .flatten()
    .filter(|size| size.is_finite())
    .map(|size| size.trunc())
    .find(|size| *size != 0.0)
    .unwrap_or(DEFAULT_LINE_HEIGHT)
}

/// Page height for `element`: its rendered height, or `0.0` when unknown.
pub fn page_height<K>(metrics: &impl ElementMetrics<K>, element: &K) -> f64 {
    metrics
        .height(element)
        .filter(|h| h.is_finite())
        .unwrap_or(0.0)
}
