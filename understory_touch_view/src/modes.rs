// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Direction argument for the "can scroll further" queries.
///
/// This enum is consulted by [`crate::TouchImageView::can_scroll_horizontally`]
/// and [`crate::TouchImageView::can_scroll_vertically`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the leading (left/top) edge of the image.
    ///
    /// Scrolling backward is possible while part of the image is hidden past
    /// the viewport's leading edge.
    Backward,
    /// Toward the trailing (right/bottom) edge of the image.
    ///
    /// Scrolling forward is possible while part of the image is hidden past
    /// the viewport's trailing edge.
    Forward,
}

/// Mapping from linear elapsed time to animation progress.
///
/// The host clock always reports a linear fraction; each animation applies its
/// own easing before interpolating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Progress equals elapsed fraction.
    ///
    /// Used by fling playback, where the trajectory supplies the deceleration.
    Linear,
    /// Slow start, fast middle, slow finish (smoothstep).
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` to eased progress in `[0, 1]`.
    ///
    /// Inputs outside the unit interval are clamped first.
    #[must_use]
    pub fn apply(self, fraction: f64) -> f64 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => t * t * (3.0 - 2.0 * t),
        }
    }
}
