// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-parameterized drivers that mutate an [`ImageTransform`] frame by frame.
//!
//! At most one animation is live at a time. It is a plain value: replacing it
//! with [`Animation::Idle`] cancels it, and it never owns the viewport or the
//! image size.

use core::time::Duration;

use kurbo::{Point, Vec2};

use crate::fling::Fling;
use crate::modes::Easing;
use crate::transform::ImageTransform;

/// Scale and translation captured at a point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Uniform scale.
    pub scale: f64,
    /// Translation in viewport pixels.
    pub translation: Vec2,
}

impl TransformSnapshot {
    /// Captures the current values of `transform`.
    #[must_use]
    pub fn of(transform: &ImageTransform) -> Self {
        Self {
            scale: transform.scale(),
            translation: transform.translation(),
        }
    }

    /// Linear interpolation toward `target` by `t`.
    #[must_use]
    pub fn lerp(&self, target: &Self, t: f64) -> Self {
        Self {
            scale: self.scale + t * (target.scale - self.scale),
            translation: self.translation.lerp(target.translation, t),
        }
    }
}

/// Interpolation between two transform snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    initial: TransformSnapshot,
    target: TransformSnapshot,
    duration: Duration,
    easing: Easing,
    repositioning: bool,
}

impl Tween {
    /// Creates a tween from `initial` to `target` over `duration`.
    #[must_use]
    pub fn new(
        initial: TransformSnapshot,
        target: TransformSnapshot,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            initial,
            target,
            duration,
            easing,
            repositioning: false,
        }
    }

    /// Marks this tween as a snap-back after a pinch.
    ///
    /// While a repositioning tween runs, scroll and fling input is ignored.
    #[must_use]
    pub fn repositioning(mut self) -> Self {
        self.repositioning = true;
        self
    }

    /// Snapshot at the start of the tween.
    #[must_use]
    pub fn initial(&self) -> TransformSnapshot {
        self.initial
    }

    /// Snapshot the tween ends on.
    #[must_use]
    pub fn target(&self) -> TransformSnapshot {
        self.target
    }

    fn apply(&self, transform: &mut ImageTransform, progress: f64) {
        let t = progress.min(1.0);
        let want = self.initial.lerp(&self.target, t);

        // Relative to the decoded scale, so anything else composed into the
        // matrix since the last frame is not undone or doubled.
        let current = transform.scale();
        if current > 0.0 {
            transform.compose_scale_about(want.scale / current, Point::ORIGIN);
        }
        let delta = want.translation - transform.translation();
        transform.compose_translate(delta);
    }
}

/// What kind of animation is running, for hosts and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    /// Momentum scroll after a fling.
    Fling,
    /// Scale/translation tween after a double tap.
    Tween,
    /// Snap-back tween after a pinch left the image out of bounds.
    Repositioning,
}

/// Result of advancing the active animation by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// There was nothing to advance.
    Idle,
    /// The animation moved and wants further frames.
    Running,
    /// The animation applied its last frame and has been dropped.
    Finished,
}

/// The single transform-mutating activity, if any.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Animation {
    /// Nothing is animating.
    #[default]
    Idle,
    /// Fling playback with linear time mapping.
    Fling(Fling),
    /// Eased tween between snapshots.
    Tween(Tween),
}

impl Animation {
    /// Returns `true` unless this is [`Animation::Idle`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns `true` while scroll and fling input must be ignored.
    #[must_use]
    pub fn blocks_input(&self) -> bool {
        matches!(self, Self::Tween(t) if t.repositioning)
    }

    /// Kind of the running animation, or `None` when idle.
    #[must_use]
    pub fn kind(&self) -> Option<AnimationKind> {
        match self {
            Self::Idle => None,
            Self::Fling(_) => Some(AnimationKind::Fling),
            Self::Tween(t) if t.repositioning => Some(AnimationKind::Repositioning),
            Self::Tween(_) => Some(AnimationKind::Tween),
        }
    }

    /// Total duration, or `None` when idle.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Idle => None,
            Self::Fling(f) => Some(f.duration()),
            Self::Tween(t) => Some(t.duration),
        }
    }

    /// Converts time since the animation started into a linear fraction.
    ///
    /// A zero-length animation is complete immediately.
    #[must_use]
    pub fn fraction_for_elapsed(&self, elapsed: Duration) -> f64 {
        match self.duration() {
            Some(d) if !d.is_zero() => elapsed.as_secs_f64() / d.as_secs_f64(),
            _ => 1.0,
        }
    }

    /// Applies one frame at linear elapsed `fraction` to `transform`.
    ///
    /// Returns `true` when this was the terminal frame. The caller is
    /// expected to drop the animation at that point.
    pub fn apply(&self, transform: &mut ImageTransform, fraction: f64) -> bool {
        match self {
            Self::Idle => true,
            Self::Fling(fling) => {
                let f = Easing::Linear.apply(fraction);
                let target = fling.position_at(f).to_vec2();
                transform.compose_translate(target - transform.translation());
                f >= 1.0
            }
            Self::Tween(tween) => {
                tween.apply(transform, tween.easing.apply(fraction));
                fraction >= 1.0
            }
        }
    }
}
