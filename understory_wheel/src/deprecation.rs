// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide, one-time deprecation notice for legacy aliases.

use core::sync::atomic::{AtomicBool, Ordering};

static SHOWN: AtomicBool = AtomicBool::new(false);

/// Log the deprecation warning for `alias` unless one was already logged in this process.
///
/// Returns `true` if this call emitted the warning.
pub(crate) fn warn_once(alias: &str) -> bool {
    if SHOWN.swap(true, Ordering::Relaxed) {
        return false;
    }
    tracing::warn!(alias, "the {alias} event is deprecated; use wheel");
    true
}

/// Whether the deprecation warning has been emitted in this process.
pub fn warning_shown() -> bool {
    SHOWN.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_calls_do_not_warn_again() {
        // Other tests in this binary may already have warned; either way only
        // one call can ever report emitting.
        let emitted = (0..4).filter(|_| warn_once("mousewheel")).count();
        assert!(emitted <= 1);
        assert!(warning_shown());
        assert!(!warn_once("mousewheel"));
    }
}
