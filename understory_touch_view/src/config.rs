// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;

use crate::fling::FlingConfig;
use crate::modes::Easing;

/// Tuning for [`crate::TouchImageView`].
///
/// Defaults: a 300 ms double-tap zoom, a 200 ms snap-back after a pinch,
/// accelerate/decelerate easing for both, and [`FlingConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchViewConfig {
    /// Duration of the zoom tween started by a double tap.
    pub double_tap_duration: Duration,
    /// Duration of the snap-back tween started when a pinch ends out of bounds.
    pub reposition_duration: Duration,
    /// Easing applied to both tweens.
    pub tween_easing: Easing,
    /// Fling physics.
    pub fling: FlingConfig,
}

impl Default for TouchViewConfig {
    fn default() -> Self {
        Self {
            double_tap_duration: Duration::from_millis(300),
            reposition_duration: Duration::from_millis(200),
            tween_easing: Easing::AccelerateDecelerate,
            fling: FlingConfig::default(),
        }
    }
}

impl TouchViewConfig {
    /// Returns the config with a different double-tap tween duration.
    #[must_use]
    pub fn with_double_tap_duration(mut self, duration: Duration) -> Self {
        self.double_tap_duration = duration;
        self
    }

    /// Returns the config with a different snap-back tween duration.
    #[must_use]
    pub fn with_reposition_duration(mut self, duration: Duration) -> Self {
        self.reposition_duration = duration;
        self
    }

    /// Returns the config with a different tween easing.
    #[must_use]
    pub fn with_tween_easing(mut self, easing: Easing) -> Self {
        self.tween_easing = easing;
        self
    }

    /// Returns the config with different fling physics.
    #[must_use]
    pub fn with_fling(mut self, fling: FlingConfig) -> Self {
        self.fling = fling;
        self
    }

    /// Checks that the fling physics describe a motion that comes to rest.
    ///
    /// Zero-length tweens are allowed; they complete on their first frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let FlingConfig {
            deceleration,
            max_velocity,
        } = self.fling;
        if !(deceleration.is_finite() && deceleration > 0.0) {
            return Err(ConfigError::Deceleration(deceleration));
        }
        if !(max_velocity.is_finite() && max_velocity > 0.0) {
            return Err(ConfigError::MaxVelocity(max_velocity));
        }
        if Duration::try_from_secs_f64(max_velocity / deceleration).is_err() {
            return Err(ConfigError::FlingTooLong {
                deceleration,
                max_velocity,
            });
        }
        Ok(())
    }
}

/// A [`TouchViewConfig`] rejected by [`TouchViewConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Deceleration must be positive and finite.
    Deceleration(f64),
    /// Maximum fling velocity must be positive and finite.
    MaxVelocity(f64),
    /// The longest possible fling would not fit in a [`Duration`].
    FlingTooLong {
        /// Configured deceleration.
        deceleration: f64,
        /// Configured maximum velocity.
        max_velocity: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deceleration(v) => {
                write!(f, "fling deceleration must be positive and finite, got {v}")
            }
            Self::MaxVelocity(v) => {
                write!(f, "maximum fling velocity must be positive and finite, got {v}")
            }
            Self::FlingTooLong {
                deceleration,
                max_velocity,
            } => write!(
                f,
                "fling of {max_velocity} px/s at {deceleration} px/s² would never come to rest"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}
