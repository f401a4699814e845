// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::bounds;

/// Uniform scale + translation mapping image pixels to viewport pixels.
///
/// The transform is stored as a single [`Affine`] and every accessor decodes
/// from it, so there is no separately cached scale or translation that could
/// drift away from the matrix. All mutation composes a new operation after the
/// existing one:
/// - [`ImageTransform::compose_scale_about`] scales around a viewport point.
/// - [`ImageTransform::compose_translate`] shifts in viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageTransform {
    matrix: Affine,
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ImageTransform {
    /// The identity transform: scale `1.0`, no translation.
    pub const IDENTITY: Self = Self {
        matrix: Affine::IDENTITY,
    };

    /// Returns the initial transform for `image` shown in `viewport`.
    ///
    /// The scale is [`bounds::min_scale`] and the image is centered on both
    /// axes. When the image overflows an axis, the translation on that axis is
    /// negative and splits the overflow evenly.
    #[must_use]
    pub fn fitted(viewport: Size, image: Size) -> Self {
        let mut t = Self::IDENTITY;
        t.reset(viewport, image);
        t
    }

    /// Resets to the initial transform for `image` shown in `viewport`.
    ///
    /// See [`ImageTransform::fitted`].
    pub fn reset(&mut self, viewport: Size, image: Size) {
        self.matrix = Affine::IDENTITY;
        if !bounds::is_usable(viewport) || !bounds::is_usable(image) {
            return;
        }
        let min_scale = bounds::min_scale(viewport, image);
        self.compose_scale_about(min_scale, Point::ORIGIN);
        let free = Vec2::new(
            bounds::free_space(viewport.width, image.width * min_scale),
            bounds::free_space(viewport.height, image.height * min_scale),
        );
        self.compose_translate(free);
    }

    /// Multiplies the scale by `factor`, keeping `focal` fixed in viewport space.
    ///
    /// No bounds are checked; callers pre-clamp `factor` with
    /// [`bounds::clamp_scale_delta`].
    pub fn compose_scale_about(&mut self, factor: f64, focal: Point) {
        let focal = focal.to_vec2();
        self.matrix =
            Affine::translate(focal) * Affine::scale(factor) * Affine::translate(-focal) * self.matrix;
    }

    /// Adds `delta` to the translation, unclamped.
    pub fn compose_translate(&mut self, delta: Vec2) {
        self.matrix = Affine::translate(delta) * self.matrix;
    }

    /// Current uniform scale, decoded from the matrix.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.matrix.as_coeffs()[0]
    }

    /// Current translation in viewport pixels, decoded from the matrix.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.matrix.translation()
    }

    /// The image → viewport matrix, for the renderer.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Size of an image of intrinsic size `image` at the current scale.
    #[must_use]
    pub fn scaled_size(&self, image: Size) -> Size {
        image * self.scale()
    }

    /// Rectangle covered by an image of intrinsic size `image`, in viewport space.
    #[must_use]
    pub fn image_rect(&self, image: Size) -> Rect {
        Rect::from_origin_size(self.translation().to_point(), self.scaled_size(image))
    }

    /// Converts an image‑space point into viewport coordinates.
    #[must_use]
    pub fn image_to_view_point(&self, pt: Point) -> Point {
        self.matrix * pt
    }

    /// Converts a viewport point into image‑space coordinates.
    ///
    /// The matrix is never singular while the scale is positive.
    #[must_use]
    pub fn view_to_image_point(&self, pt: Point) -> Point {
        self.matrix.inverse() * pt
    }
}
