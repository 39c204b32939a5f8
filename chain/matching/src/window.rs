//! Sliding-window maximum-trade-size tracker
//!
//! Per instrument token, a coarse two-bucket rolling maximum over a
//! configurable window. Mutated only by successful matches; read by the
//! downstream risk logic. The two-bucket scheme trades precision for a
//! constant-size record that is overwritten in place every window.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use types::ids::Address;

/// Default window length in seconds (one hour).
pub const DEFAULT_WINDOW_SECONDS: i64 = 3600;

/// Rolling two-bucket record for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeWindow {
    pub previous_max: u128,
    pub current_max: u128,
    pub bucket_start: i64,
}

/// Maximum-trade-size tracker across instruments.
#[derive(Debug, Clone)]
pub struct TradeSizeTracker {
    windows: HashMap<Address, SizeWindow>,
    window_seconds: i64,
}

impl TradeSizeTracker {
    pub fn new(window_seconds: i64) -> Self {
        Self {
            windows: HashMap::new(),
            window_seconds,
        }
    }

    pub fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    /// Change the window length. Affects subsequent roll decisions only;
    /// existing buckets are not re-anchored. Caller validates positivity.
    pub fn set_window_seconds(&mut self, window_seconds: i64) {
        self.window_seconds = window_seconds;
    }

    /// Record a trade of `size` at time `now`.
    ///
    /// Within the current bucket the running maximum is updated; one
    /// window later the buckets roll; past two windows both buckets reset
    /// and the record is re-anchored to `now` (historical alignment is
    /// intentionally not preserved across long gaps).
    pub fn record(&mut self, instrument: Address, size: u128, now: i64) {
        let window = self.window_seconds;
        let entry = self.windows.entry(instrument).or_insert(SizeWindow {
            previous_max: 0,
            current_max: 0,
            bucket_start: now,
        });

        if now < entry.bucket_start + window {
            entry.current_max = entry.current_max.max(size);
        } else if now < entry.bucket_start + 2 * window {
            entry.previous_max = entry.current_max;
            entry.current_max = size;
            entry.bucket_start += window;
        } else {
            entry.previous_max = 0;
            entry.current_max = size;
            entry.bucket_start = now;
        }
    }

    /// Largest single trade within the trailing window ending at `now`.
    ///
    /// The previous bucket contributes while any part of it can still lie
    /// inside the trailing window; the current bucket contributes for one
    /// further window; past that the record is stale and reads as zero.
    pub fn max_over_window(&self, instrument: &Address, now: i64) -> u128 {
        let Some(entry) = self.windows.get(instrument) else {
            return 0;
        };
        let window = self.window_seconds;
        if now < entry.bucket_start + window {
            entry.previous_max.max(entry.current_max)
        } else if now < entry.bucket_start + 2 * window {
            entry.current_max
        } else {
            0
        }
    }

    /// Raw record for one instrument, if any trade has been recorded.
    pub fn window(&self, instrument: &Address) -> Option<&SizeWindow> {
        self.windows.get(instrument)
    }
}

impl Default for TradeSizeTracker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECONDS)
    }
}
