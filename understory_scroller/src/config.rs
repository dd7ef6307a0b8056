// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for [`MomentumScroller`](crate::MomentumScroller).

use core::time::Duration;

/// Scroller tuning.
///
/// The defaults reproduce the classic feel: a fling throws the content `1.6` times the
/// sampled distance, scaled by how much larger the content is than the viewport, and
/// overscroll is allowed up to half the viewport.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollerConfig {
    /// Fling multiplier.
    pub velocity: f64,
    /// Overscroll allowance as a fraction of the viewport extent.
    pub bump_ratio: f64,
    /// Drop the oldest sample when the pointer rests this long.
    pub debounce: Duration,
    /// Maximum number of retained samples.
    pub history_cap: usize,
    /// Net displacement (px) after which a gesture counts as a drag.
    pub drag_threshold: f64,
    /// A gesture with at most this many samples and no drag is a tap.
    pub tap_max_samples: usize,
    /// Sampled distance (px) above which a release is a fling.
    pub flick_threshold: f64,
    /// Snap-back delay after a fling that lands out of bounds.
    pub flight_snap_delay: Duration,
    /// Snap-back delay after a tap, a plain release, or an in-bounds fling.
    pub settle_snap_delay: Duration,
    /// How long a snap-back animation may run before it is considered settled.
    pub settle_fallback: Duration,
    /// Space kept below an item revealed with [`ScrollTarget::Item`](crate::ScrollTarget::Item).
    pub reveal_margin: f64,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            velocity: 1.6,
            bump_ratio: 0.5,
            debounce: Duration::from_millis(100),
            history_cap: 7,
            drag_threshold: 4.0,
            tap_max_samples: 3,
            flick_threshold: 4.0,
            flight_snap_delay: Duration::from_millis(3000),
            settle_snap_delay: Duration::from_millis(10),
            settle_fallback: Duration::from_millis(500),
            reveal_margin: 80.0,
        }
    }
}

/// Rejected [`ScrollerConfig`] value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A multiplier that must be finite and greater than zero.
    #[error("`{field}` must be finite and positive, got {value}")]
    NotPositive {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A distance that must be finite and not negative.
    #[error("`{field}` must be finite and non-negative, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// `bump_ratio` outside `[0, 1]`.
    #[error("`bump_ratio` must lie in [0, 1], got {0}")]
    BumpRatio(f64),
    /// `history_cap` too small to measure velocity.
    #[error("`history_cap` must retain at least 2 samples, got {0}")]
    HistoryCap(usize),
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl ScrollerConfig {
    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("velocity", self.velocity)?;
        if !(0.0..=1.0).contains(&self.bump_ratio) {
            return Err(ConfigError::BumpRatio(self.bump_ratio));
        }
        if self.history_cap < 2 {
            return Err(ConfigError::HistoryCap(self.history_cap));
        }
        non_negative("drag_threshold", self.drag_threshold)?;
        non_negative("flick_threshold", self.flick_threshold)?;
        non_negative("reveal_margin", self.reveal_margin)?;
        Ok(())
    }
}
