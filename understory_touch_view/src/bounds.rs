// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds and clamping policy for the image transform.
//!
//! Every function here works on plain scalars for one axis (or on a pair of
//! sizes for [`min_scale`]) so the same policy can be shared by dragging,
//! pinch release, double-tap targeting, and fling.

use core::ops::RangeInclusive;

use kurbo::Size;

/// Largest scale the image may rest at: one image pixel per viewport pixel.
pub const MAX_SCALE: f64 = 1.0;

/// Returns the smallest allowed scale for an image of `image` inside `viewport`.
///
/// This is the scale at which the image exactly fits the viewport on its
/// tighter axis, capped at [`MAX_SCALE`] so small images are never magnified.
/// Degenerate sizes (zero, negative, or non-finite) yield [`MAX_SCALE`].
#[must_use]
pub fn min_scale(viewport: Size, image: Size) -> f64 {
    if !is_usable(viewport) || !is_usable(image) {
        return MAX_SCALE;
    }
    let sx = viewport.width / image.width;
    let sy = viewport.height / image.height;
    sx.min(sy).min(MAX_SCALE)
}

/// Returns the delta that should actually be applied to a translation on one axis.
///
/// - `viewport_len`: viewport extent on this axis.
/// - `image_len`: scaled image extent on this axis.
/// - `translation`: current translation on this axis.
/// - `delta`: proposed movement.
///
/// When the image is smaller than the viewport the result recenters it, no
/// matter what was proposed. Otherwise the result is `delta` unless it would
/// open a gap at either edge, in which case the edge is snapped flush.
#[must_use]
pub fn clamp_translation_delta(
    viewport_len: f64,
    image_len: f64,
    translation: f64,
    delta: f64,
) -> f64 {
    let free_space = (viewport_len - image_len) / 2.0;
    if free_space > 0.0 {
        free_space - translation
    } else if translation + delta > 0.0 {
        -translation
    } else if translation + delta < viewport_len - image_len {
        viewport_len - image_len - translation
    } else {
        delta
    }
}

/// Returns the scale factor that keeps `current * factor` within `[min_scale, MAX_SCALE]`.
#[must_use]
pub fn clamp_scale_delta(min_scale: f64, current: f64, factor: f64) -> f64 {
    if current * factor < min_scale {
        min_scale / current
    } else if current * factor > MAX_SCALE {
        MAX_SCALE / current
    } else {
        factor
    }
}

/// Absolute range of legal translations on one axis.
///
/// This is the same policy as [`clamp_translation_delta`] restated as bounds:
/// a single centered value when the image fits, otherwise the span between
/// trailing-edge and leading-edge alignment.
#[must_use]
pub fn translation_range(viewport_len: f64, image_len: f64) -> RangeInclusive<f64> {
    let free_space = (viewport_len - image_len) / 2.0;
    if free_space > 0.0 {
        free_space..=free_space
    } else {
        (viewport_len - image_len)..=0.0
    }
}

/// Free space on one axis: positive gap on each side, or negative overflow.
#[must_use]
pub fn free_space(viewport_len: f64, image_len: f64) -> f64 {
    (viewport_len - image_len) / 2.0
}

pub(crate) fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
