// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::animation::{Animation, AnimationKind, AnimationStatus, TransformSnapshot, Tween};
use crate::bounds::{self, clamp_scale_delta, clamp_translation_delta, translation_range};
use crate::config::{ConfigError, TouchViewConfig};
use crate::fling::Fling;
use crate::gesture::{FocalSession, GestureListener, ViewHost};
use crate::modes::ScrollDirection;
use crate::transform::ImageTransform;

/// Movements smaller than this, in viewport pixels, are not worth applying.
const MIN_MOVEMENT: f64 = 1.0;

/// Scales this close to the fitted scale count as fitted.
const SCALE_TOLERANCE: f64 = 1e-6;

/// Touch-driven viewport over a single image.
///
/// `TouchImageView` owns the image → viewport transform and reacts to the
/// semantic gestures of [`GestureListener`]:
/// - One-finger scroll pans, clamped so no gap opens at the image edges.
/// - Fling starts a decelerating scroll that rests inside the legal range.
/// - Pinch zooms around the fingers, between the fitted scale and `1.0`.
/// - Double tap toggles between the fitted scale and `1.0`.
///
/// Animated responses are driven by the host's frame clock through
/// [`TouchImageView::tick`]. Redraw requests and tap pass-through go to the
/// host `H`; use `()` for a headless view.
#[derive(Clone, Debug)]
pub struct TouchImageView<H = ()> {
    host: H,
    config: TouchViewConfig,
    viewport: Size,
    image: Size,
    transform: ImageTransform,
    focal: FocalSession,
    animation: Animation,
}

impl<H: ViewHost + Default> Default for TouchImageView<H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<H: ViewHost> TouchImageView<H> {
    /// Creates an empty view with the default configuration.
    ///
    /// The viewport and image are both zero-sized until the host reports them.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            config: TouchViewConfig::default(),
            viewport: Size::ZERO,
            image: Size::ZERO,
            transform: ImageTransform::IDENTITY,
            focal: FocalSession::default(),
            animation: Animation::Idle,
        }
    }

    /// Creates an empty view with `config`, after validating it.
    pub fn with_config(host: H, config: TouchViewConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut view = Self::new(host);
        view.config = config;
        Ok(view)
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &TouchViewConfig {
        &self.config
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the view, returning the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// Current viewport size in device pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size, resetting the transform if it changed.
    pub fn set_viewport_size(&mut self, size: Size) {
        if self.viewport == size {
            return;
        }
        self.viewport = size;
        self.reset();
    }

    /// Intrinsic size of the attached image, or zero when detached.
    #[must_use]
    pub fn image_size(&self) -> Size {
        self.image
    }

    /// Attaches an image of intrinsic size `size`, or detaches with `None`.
    ///
    /// Attaching resets the transform to the fitted state. Detaching keeps the
    /// matrix but stops any animation; gestures are ignored until an image is
    /// attached again.
    pub fn set_image_size(&mut self, size: Option<Size>) {
        match size {
            Some(size) => {
                self.image = size;
                self.reset();
            }
            None => {
                self.image = Size::ZERO;
                self.clear_animation();
            }
        }
    }

    /// Returns the transform to the fitted, centered state and requests a redraw.
    pub fn reset(&mut self) {
        self.clear_animation();
        self.focal.end();
        self.transform.reset(self.viewport, self.image);
        tracing::debug!(
            viewport_w = self.viewport.width,
            viewport_h = self.viewport.height,
            image_w = self.image.width,
            image_h = self.image.height,
            scale = self.transform.scale(),
            "reset image transform"
        );
        self.host.invalidate();
    }

    /// The image → viewport matrix for the renderer.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.transform.matrix()
    }

    /// The transform model.
    #[must_use]
    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.scale()
    }

    /// Current translation in viewport pixels.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.transform.translation()
    }

    /// Smallest scale the image can rest at in the current viewport.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        bounds::min_scale(self.viewport, self.image)
    }

    /// Rectangle the image currently covers, in viewport coordinates.
    #[must_use]
    pub fn image_rect(&self) -> Rect {
        self.transform.image_rect(self.image)
    }

    /// Image‑space point shown at viewport point `pt`.
    #[must_use]
    pub fn view_to_image_point(&self, pt: Point) -> Point {
        self.transform.view_to_image_point(pt)
    }

    /// Whether the image can still move to reveal content in `direction` horizontally.
    ///
    /// Positions are compared in whole pixels, so sub-pixel slack at an edge
    /// does not count as scrollable.
    #[must_use]
    pub fn can_scroll_horizontally(&self, direction: ScrollDirection) -> bool {
        self.can_scroll_axis(
            self.viewport.width,
            self.image.width,
            self.translation().x,
            direction,
        )
    }

    /// Whether the image can still move to reveal content in `direction` vertically.
    ///
    /// See [`TouchImageView::can_scroll_horizontally`].
    #[must_use]
    pub fn can_scroll_vertically(&self, direction: ScrollDirection) -> bool {
        self.can_scroll_axis(
            self.viewport.height,
            self.image.height,
            self.translation().y,
            direction,
        )
    }

    fn can_scroll_axis(
        &self,
        viewport_len: f64,
        image_len: f64,
        translation: f64,
        direction: ScrollDirection,
    ) -> bool {
        if !self.has_content() {
            return false;
        }
        let scaled = image_len * self.scale();
        // kurbo rounds for us in both std and libm builds.
        let rounded = Vec2::new(translation, scaled).round();
        match direction {
            ScrollDirection::Backward => rounded.x < 0.0,
            ScrollDirection::Forward => rounded.x > viewport_len - rounded.y,
        }
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    /// Returns `true` while the post-pinch snap-back runs and blocks scroll/fling.
    #[must_use]
    pub fn is_repositioning(&self) -> bool {
        self.animation.blocks_input()
    }

    /// The running animation.
    #[must_use]
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Duration of the running animation, for the host clock.
    #[must_use]
    pub fn animation_duration(&self) -> Option<Duration> {
        self.animation.duration()
    }

    /// Stops the running animation where it is.
    pub fn clear_animation(&mut self) {
        if let Some(kind) = self.animation.kind() {
            tracing::trace!(?kind, "animation cleared");
        }
        self.animation = Animation::Idle;
    }

    /// Advances the running animation to linear elapsed `fraction`.
    ///
    /// The host clock calls this once per frame with the fraction of
    /// [`TouchImageView::animation_duration`] that has elapsed. The frame at
    /// `fraction >= 1.0` is the last one; the animation is dropped afterwards.
    /// A NaN fraction is ignored.
    pub fn tick(&mut self, fraction: f64) -> AnimationStatus {
        if !self.animation.is_active() {
            return AnimationStatus::Idle;
        }
        if fraction.is_nan() {
            return AnimationStatus::Running;
        }
        let done = self.animation.apply(&mut self.transform, fraction);
        self.host.invalidate();
        if done {
            tracing::debug!(
                kind = ?self.animation.kind(),
                scale = self.transform.scale(),
                tx = self.transform.translation().x,
                ty = self.transform.translation().y,
                "animation finished"
            );
            self.animation = Animation::Idle;
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    /// Advances the running animation to `elapsed` time since it started.
    ///
    /// Convenience for hosts whose clock reports time rather than fractions.
    pub fn tick_elapsed(&mut self, elapsed: Duration) -> AnimationStatus {
        let fraction = self.animation.fraction_for_elapsed(elapsed);
        self.tick(fraction)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TouchImageViewDebugInfo {
        TouchImageViewDebugInfo {
            viewport: self.viewport,
            image: self.image,
            image_rect: self.image_rect(),
            scale: self.scale(),
            min_scale: self.min_scale(),
            translation: self.translation(),
            animation: self.animation.kind(),
            last_focus: self.focal.last_focus(),
        }
    }

    fn has_content(&self) -> bool {
        bounds::is_usable(self.viewport) && bounds::is_usable(self.image)
    }

    /// Correction that brings `translation` back into the legal range at `scale`.
    fn translation_correction(&self, scale: f64, translation: Vec2, delta: Vec2) -> Vec2 {
        let scaled = self.image * scale;
        Vec2::new(
            clamp_translation_delta(self.viewport.width, scaled.width, translation.x, delta.x),
            clamp_translation_delta(self.viewport.height, scaled.height, translation.y, delta.y),
        )
    }

    /// Keeps the pinch anchor on the image when it leaves a gap on that side.
    fn clamp_focus(&self, mut focus: Point) -> Point {
        let rect = self.image_rect();
        if rect.x0 > 0.0 && focus.x < rect.x0 {
            focus.x = rect.x0;
        } else if rect.x1 < self.viewport.width && focus.x > rect.x1 {
            focus.x = rect.x1;
        }
        if rect.y0 > 0.0 && focus.y < rect.y0 {
            focus.y = rect.y0;
        } else if rect.y1 < self.viewport.height && focus.y > rect.y1 {
            focus.y = rect.y1;
        }
        focus
    }

    fn start(&mut self, animation: Animation) {
        tracing::debug!(
            kind = ?animation.kind(),
            duration_ms = animation.duration().map(|d| d.as_secs_f64() * 1000.0),
            "animation started"
        );
        self.animation = animation;
    }
}

fn below_threshold(delta: Vec2) -> bool {
    delta.x.abs() < MIN_MOVEMENT && delta.y.abs() < MIN_MOVEMENT
}

impl<H: ViewHost> GestureListener for TouchImageView<H> {
    fn on_single_tap_confirmed(&mut self, _at: Point) -> bool {
        self.host.perform_click()
    }

    fn on_long_press(&mut self, _at: Point) {
        self.host.perform_long_click();
    }

    fn on_double_tap(&mut self, at: Point) -> bool {
        if !self.has_content() || !at.is_finite() {
            tracing::trace!(?at, "double tap ignored");
            return false;
        }
        let scale = self.scale();
        let min_scale = self.min_scale();
        let target_scale = if scale - min_scale > SCALE_TOLERANCE {
            min_scale
        } else {
            bounds::MAX_SCALE
        };

        // Keep the tapped content under the finger, then pull the result back
        // into the range legal at the target scale.
        let tap = at.to_vec2();
        let desired = tap - (tap - self.translation()) * (target_scale / scale);
        let target_translation =
            desired + self.translation_correction(target_scale, desired, Vec2::ZERO);

        self.clear_animation();
        let tween = Tween::new(
            TransformSnapshot::of(&self.transform),
            TransformSnapshot {
                scale: target_scale,
                translation: target_translation,
            },
            self.config.double_tap_duration,
            self.config.tween_easing,
        );
        self.start(Animation::Tween(tween));
        true
    }

    fn on_scroll(&mut self, distance: Vec2) -> bool {
        if self.animation.blocks_input() || !self.has_content() || !distance.is_finite() {
            tracing::trace!(?distance, "scroll ignored");
            return false;
        }
        let delta = self.translation_correction(self.scale(), self.translation(), -distance);
        if below_threshold(delta) {
            return false;
        }
        self.clear_animation();
        self.transform.compose_translate(delta);
        self.host.invalidate();
        true
    }

    fn on_fling(&mut self, velocity: Vec2) -> bool {
        if self.animation.blocks_input() || !self.has_content() || !velocity.is_finite() {
            tracing::trace!(?velocity, "fling ignored");
            return false;
        }
        let scaled = self.image * self.scale();
        let x = translation_range(self.viewport.width, scaled.width);
        let y = translation_range(self.viewport.height, scaled.height);
        let legal = Rect::new(*x.start(), *y.start(), *x.end(), *y.end());

        let fling = Fling::new(
            &self.config.fling,
            self.translation().to_point(),
            velocity,
            legal,
        );
        if below_threshold(fling.final_position() - self.translation().to_point()) {
            return false;
        }
        self.clear_animation();
        self.start(Animation::Fling(fling));
        true
    }

    fn on_scale_begin(&mut self, _focus: Point) -> bool {
        self.focal.begin();
        true
    }

    fn on_scale(&mut self, factor: f64, focus: Point) -> bool {
        if !self.has_content() || !focus.is_finite() || !factor.is_finite() || factor <= 0.0 {
            tracing::trace!(factor, ?focus, "scale ignored");
            return false;
        }
        let focus = self.clamp_focus(focus);
        if let Some(pan) = self.focal.update(focus) {
            self.transform.compose_translate(pan);
        }
        let factor = clamp_scale_delta(self.min_scale(), self.scale(), factor);
        self.transform.compose_scale_about(factor, focus);

        self.clear_animation();
        self.host.invalidate();
        true
    }

    fn on_scale_end(&mut self, _focus: Point) {
        self.focal.end();
        if !self.has_content() {
            return;
        }
        let translation = self.translation();
        let delta = self.translation_correction(self.scale(), translation, Vec2::ZERO);
        if below_threshold(delta) {
            return;
        }
        self.clear_animation();
        let current = TransformSnapshot::of(&self.transform);
        let tween = Tween::new(
            current,
            TransformSnapshot {
                scale: current.scale,
                translation: translation + delta,
            },
            self.config.reposition_duration,
            self.config.tween_easing,
        )
        .repositioning();
        self.start(Animation::Tween(tween));
    }
}

/// Debug snapshot of a [`TouchImageView`] state.
#[derive(Clone, Copy, Debug)]
pub struct TouchImageViewDebugInfo {
    /// Viewport size in device pixels.
    pub viewport: Size,
    /// Intrinsic image size, zero when detached.
    pub image: Size,
    /// Rectangle the image covers in viewport coordinates.
    pub image_rect: Rect,
    /// Current scale.
    pub scale: f64,
    /// Fitted (minimum) scale.
    pub min_scale: f64,
    /// Current translation.
    pub translation: Vec2,
    /// Running animation, if any.
    pub animation: Option<AnimationKind>,
    /// Remembered pinch focus, if a pinch is in progress.
    pub last_focus: Option<Point>,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::TouchImageView;
    use crate::animation::{AnimationKind, AnimationStatus};
    use crate::gesture::GestureListener;
    use crate::modes::ScrollDirection;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    /// 1000×1000 viewport showing a 2000×1000 image.
    fn wide_view() -> TouchImageView {
        let mut v = TouchImageView::new(());
        v.set_viewport_size(Size::new(1000.0, 1000.0));
        v.set_image_size(Some(Size::new(2000.0, 1000.0)));
        v
    }

    #[test]
    fn reset_fits_and_centers() {
        let v = wide_view();
        assert!(close(v.min_scale(), 0.5));
        assert!(close(v.scale(), 0.5));
        assert!(close(v.translation().x, 0.0));
        assert!(close(v.translation().y, 250.0));
    }

    #[test]
    fn pinch_factor_is_clamped_to_natural_size() {
        let mut v = wide_view();
        assert!(v.on_scale_begin(Point::new(500.0, 500.0)));
        assert!(v.on_scale(3.0, Point::new(500.0, 500.0)));
        assert!(close(v.scale(), 1.0));
    }

    #[test]
    fn pinch_below_fitted_scale_is_clamped() {
        let mut v = wide_view();
        v.on_scale_begin(Point::new(500.0, 500.0));
        v.on_scale(0.2, Point::new(500.0, 500.0));
        assert!(close(v.scale(), 0.5));
    }

    #[test]
    fn scroll_on_fitting_image_is_ignored() {
        let mut v = TouchImageView::new(());
        v.set_viewport_size(Size::new(1000.0, 1000.0));
        v.set_image_size(Some(Size::new(500.0, 400.0)));
        let before = v.translation();
        assert!(!v.on_scroll(Vec2::new(50.0, 0.0)));
        assert_eq!(v.translation(), before);
        assert_eq!(before, Vec2::new(250.0, 300.0));
    }

    #[test]
    fn double_tap_toggles_and_keeps_tapped_content() {
        let mut v = wide_view();
        let tap = Point::new(500.0, 500.0);
        let content = v.view_to_image_point(tap);

        assert!(v.on_double_tap(tap));
        assert_eq!(v.animation().kind(), Some(AnimationKind::Tween));
        assert_eq!(v.tick(0.5), AnimationStatus::Running);
        assert_eq!(v.tick(1.0), AnimationStatus::Finished);
        assert!(close(v.scale(), 1.0));
        let after = v.view_to_image_point(tap);
        assert!((after - content).hypot() < 1.0);

        assert!(v.on_double_tap(tap));
        v.tick(1.0);
        assert!(close(v.scale(), 0.5));
        assert!(close(v.translation().x, 0.0));
        assert!(close(v.translation().y, 250.0));
    }

    #[test]
    fn scroll_is_clamped_at_edges() {
        let mut v = wide_view();
        v.on_double_tap(Point::new(500.0, 500.0));
        v.tick(1.0);
        // Translation is (-500, 0); finger moves right by 800.
        assert!(v.on_scroll(Vec2::new(-800.0, 0.0)));
        assert!(close(v.translation().x, 0.0));
        assert!(!v.can_scroll_horizontally(ScrollDirection::Backward));
        assert!(v.can_scroll_horizontally(ScrollDirection::Forward));
        // Already flush: further movement that way does nothing.
        assert!(!v.on_scroll(Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn gestures_without_image_are_ignored() {
        let mut v = TouchImageView::new(());
        v.set_viewport_size(Size::new(800.0, 600.0));
        assert!(!v.on_scroll(Vec2::new(10.0, 10.0)));
        assert!(!v.on_fling(Vec2::new(1000.0, 0.0)));
        assert!(!v.on_double_tap(Point::new(1.0, 1.0)));
        assert!(!v.on_scale(2.0, Point::new(1.0, 1.0)));
        v.on_scale_end(Point::ORIGIN);
        assert!(!v.is_animating());
        assert!(!v.can_scroll_vertically(ScrollDirection::Forward));
    }

    #[test]
    fn non_finite_inputs_are_ignored() {
        let mut v = wide_view();
        let before = v.matrix();
        assert!(!v.on_scroll(Vec2::new(f64::NAN, 0.0)));
        assert!(!v.on_fling(Vec2::new(f64::INFINITY, 0.0)));
        assert!(!v.on_scale(f64::NAN, Point::new(1.0, 1.0)));
        assert!(!v.on_scale(2.0, Point::new(f64::NAN, 1.0)));
        assert!(!v.on_double_tap(Point::new(f64::INFINITY, 1.0)));
        assert_eq!(v.matrix(), before);
    }

    #[test]
    fn nan_tick_keeps_the_animation_running() {
        let mut v = wide_view();
        v.on_double_tap(Point::new(500.0, 500.0));
        assert_eq!(v.tick(0.25), AnimationStatus::Running);
        let before = v.matrix();

        assert_eq!(v.tick(f64::NAN), AnimationStatus::Running);
        assert_eq!(v.matrix(), before);
        assert!(v.is_animating());
        assert_eq!(v.tick(1.0), AnimationStatus::Finished);
    }

    #[test]
    fn tick_without_animation_is_idle() {
        let mut v = wide_view();
        assert_eq!(v.tick(0.3), AnimationStatus::Idle);
    }
}
