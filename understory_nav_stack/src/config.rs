// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation stack configuration.

use core::time::Duration;

/// Stack behavior and timing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackConfig {
    /// Keep the root frame: `pop` never removes the first frame.
    pub locked: bool,
    /// Delay between mounting a tagged node and starting its transition.
    pub animate_delay: Duration,
    /// Cleanup deadline when the host never reports the end of a transition.
    pub transition_fallback: Duration,
    /// Delay before `show`/`hide` events fire.
    pub visibility_delay: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            locked: true,
            animate_delay: Duration::from_millis(20),
            transition_fallback: Duration::from_millis(500),
            visibility_delay: Duration::from_millis(500),
        }
    }
}

impl StackConfig {
    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_fallback.is_zero() {
            return Err(ConfigError::ZeroFallback);
        }
        Ok(())
    }
}

/// Rejected navigation configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A zero fallback would unmount outgoing nodes before they start moving.
    #[error("`transition_fallback` must be non-zero")]
    ZeroFallback,
    /// Invalid scroller tuning for a [`DualBufferNavigator`](crate::DualBufferNavigator).
    #[error(transparent)]
    Scroller(#[from] understory_scroller::ConfigError),
}
