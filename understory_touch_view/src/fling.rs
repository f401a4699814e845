// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling physics: constant deceleration from a release velocity to rest.
//!
//! A [`Fling`] is computed once when the gesture ends. It records where the
//! motion starts, where it comes to rest (clamped into the legal bounds), and
//! how long it takes. Playback asks for [`Fling::position_at`] with a linear
//! elapsed fraction.
//!
//! Under constant deceleration `a` with initial speed `v`, travel after time
//! `t` is `v·t − a·t²/2` and the motion stops at `T = v/a` after covering
//! `v²/(2a)`. Normalizing by `T` gives `progress(f) = 1 − (1 − f)²`.
//!
//! When a bound clips the travel to a fraction `r` of `v²/(2a)`, the same curve
//! is played over `r·T` instead. That is the motion under the stronger
//! deceleration `a/r`: it leaves at the release speed and still comes to rest
//! exactly at the bound. With both axes moving, `r` is taken from the axis
//! that keeps the most of its travel, so that axis leaves at its release speed.

use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

/// Standard gravity, m/s².
const GRAVITY_EARTH: f64 = 9.806_65;
/// Inches per meter.
const INCHES_PER_METER: f64 = 39.37;
/// Baseline display density, pixels per inch.
const BASELINE_PPI: f64 = 160.0;
/// Dimensionless scroll friction.
const SCROLL_FRICTION: f64 = 0.015;

/// Tuning for fling trajectories.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Deceleration in pixels per second squared.
    pub deceleration: f64,
    /// Release speeds above this (pixels per second) are capped.
    ///
    /// This also bounds the longest fling at `max_velocity / deceleration`.
    pub max_velocity: f64,
}

impl FlingConfig {
    /// Default deceleration at baseline density, about 926.6 px/s².
    pub const DEFAULT_DECELERATION: f64 =
        GRAVITY_EARTH * INCHES_PER_METER * BASELINE_PPI * SCROLL_FRICTION;

    /// Default release speed cap, px/s.
    pub const DEFAULT_MAX_VELOCITY: f64 = 8_000.0;

    /// Deceleration scaled for a display with the given density multiplier.
    ///
    /// A density of `2.0` doubles the pixels per inch, so a fling covers the
    /// same physical distance.
    #[must_use]
    pub fn for_density(density: f64) -> Self {
        Self {
            deceleration: Self::DEFAULT_DECELERATION * density,
            max_velocity: Self::DEFAULT_MAX_VELOCITY * density,
        }
    }

    /// Returns the config with a different deceleration.
    #[must_use]
    pub fn with_deceleration(mut self, deceleration: f64) -> Self {
        self.deceleration = deceleration;
        self
    }

    /// Returns the config with a different release speed cap.
    #[must_use]
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Longest duration any fling under this config can take.
    #[must_use]
    pub fn max_duration(&self) -> Duration {
        duration_for(self.max_velocity, self.deceleration)
    }
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            deceleration: Self::DEFAULT_DECELERATION,
            max_velocity: Self::DEFAULT_MAX_VELOCITY,
        }
    }
}

/// A decelerating trajectory between a start position and a resting position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    start: Point,
    end: Point,
    duration: Duration,
}

impl Fling {
    /// Computes the trajectory for a release at `start` with `velocity`.
    ///
    /// `bounds` holds the legal resting positions (`x0..=x1` by `y0..=y1`); a
    /// zero-width or zero-height rect pins that axis. The resting position is
    /// clamped into `bounds`. A zero or non-finite velocity produces a
    /// zero-duration fling that does not move.
    ///
    /// The config is assumed valid (see [`crate::TouchViewConfig::validate`]).
    #[must_use]
    pub fn new(config: &FlingConfig, start: Point, velocity: Vec2, bounds: Rect) -> Self {
        let speed = velocity.hypot();
        if !speed.is_finite() || speed <= 0.0 {
            return Self {
                start,
                end: start,
                duration: Duration::ZERO,
            };
        }

        let capped = speed.min(config.max_velocity);
        let travel = capped * capped / (2.0 * config.deceleration);
        let full = velocity * (travel / speed);
        let unclamped = start + full;

        let bounds = bounds.abs();
        let end = Point::new(
            unclamped.x.max(bounds.x0).min(bounds.x1),
            unclamped.y.max(bounds.y0).min(bounds.y1),
        );

        let delta = end - start;
        let kept = kept_fraction(delta.x, full.x).max(kept_fraction(delta.y, full.y));

        Self {
            start,
            end,
            duration: duration_for(capped * kept, config.deceleration),
        }
    }

    /// Position at the start of the fling.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Resting position, already clamped into the bounds.
    #[must_use]
    pub fn final_position(&self) -> Point {
        self.end
    }

    /// Total travel from start to rest.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }

    /// Time from release to rest.
    ///
    /// Never longer than the unclipped `speed / deceleration`; shorter when a
    /// bound cut the travel short.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Position after `fraction` of [`Fling::duration`] has elapsed.
    ///
    /// `fraction` is linear in time and clamped to `[0, 1]`; NaN reads as `0`.
    #[must_use]
    pub fn position_at(&self, fraction: f64) -> Point {
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let remaining = 1.0 - f;
        let progress = 1.0 - remaining * remaining;
        self.start + self.delta() * progress
    }
}

/// Share of the unclipped travel on one axis that survives clamping, in `[0, 1]`.
fn kept_fraction(clipped: f64, full: f64) -> f64 {
    if full == 0.0 {
        return 0.0;
    }
    (clipped / full).abs().min(1.0)
}

fn duration_for(speed: f64, deceleration: f64) -> Duration {
    Duration::try_from_secs_f64(speed / deceleration).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Rect, Vec2};

    use super::{Fling, FlingConfig};

    fn wide_bounds() -> Rect {
        Rect::new(-1.0e6, -1.0e6, 1.0e6, 1.0e6)
    }

    #[test]
    fn zero_velocity_is_a_no_op() {
        let start = Point::new(-120.0, 40.0);
        let f = Fling::new(&FlingConfig::default(), start, Vec2::ZERO, wide_bounds());
        assert_eq!(f.duration(), Duration::ZERO);
        assert_eq!(f.final_position(), start);
        assert_eq!(f.position_at(0.5), start);
    }

    #[test]
    fn non_finite_velocity_is_a_no_op() {
        let start = Point::new(3.0, 4.0);
        let cfg = FlingConfig::default();
        for v in [
            Vec2::new(f64::NAN, 0.0),
            Vec2::new(0.0, f64::INFINITY),
            Vec2::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            let f = Fling::new(&cfg, start, v, wide_bounds());
            assert_eq!(f.duration(), Duration::ZERO);
            assert_eq!(f.final_position(), start);
        }
    }

    #[test]
    fn unconstrained_fling_follows_constant_deceleration() {
        let cfg = FlingConfig::default().with_deceleration(1000.0);
        let f = Fling::new(&cfg, Point::ORIGIN, Vec2::new(1000.0, 0.0), wide_bounds());
        // v²/(2a) = 500 px over v/a = 1 s.
        assert!((f.final_position().x - 500.0).abs() < 1e-9);
        assert_eq!(f.final_position().y, 0.0);
        assert_eq!(f.duration(), Duration::from_secs(1));
        // Half the time covers three quarters of the distance.
        assert!((f.position_at(0.5).x - 375.0).abs() < 1e-9);
    }

    #[test]
    fn diagonal_travel_splits_by_direction() {
        let cfg = FlingConfig::default().with_deceleration(1000.0);
        let f = Fling::new(&cfg, Point::ORIGIN, Vec2::new(600.0, -800.0), wide_bounds());
        // |v| = 1000 → 500 px along the direction (0.6, -0.8).
        assert!((f.final_position().x - 300.0).abs() < 1e-9);
        assert!((f.final_position().y + 400.0).abs() < 1e-9);
    }

    #[test]
    fn final_position_respects_bounds() {
        let cfg = FlingConfig::default();
        let bounds = Rect::new(-1000.0, 250.0, 0.0, 250.0);
        let starts = [Point::new(-500.0, 250.0), Point::new(0.0, 250.0), Point::new(-1000.0, 250.0)];
        let speeds = [-20_000.0, -3000.0, -1.0, 0.0, 5.0, 700.0, 9000.0];
        for start in starts {
            for vx in speeds {
                for vy in speeds {
                    let f = Fling::new(&cfg, start, Vec2::new(vx, vy), bounds);
                    let end = f.final_position();
                    assert!((-1000.0..=0.0).contains(&end.x), "{vx},{vy} -> {end:?}");
                    assert_eq!(end.y, 250.0);
                    for step in 0..=10 {
                        let p = f.position_at(f64::from(step) / 10.0);
                        assert!((-1000.0..=0.0).contains(&p.x));
                    }
                }
            }
        }
    }

    #[test]
    fn clipped_fling_decelerates_onto_the_bound() {
        let cfg = FlingConfig::default();
        let bounds = Rect::new(-1000.0, 0.0, 0.0, 0.0);
        let f = Fling::new(&cfg, Point::new(-500.0, 0.0), Vec2::new(-5000.0, 0.0), bounds);
        assert_eq!(f.final_position().x, -1000.0);
        let mut last = f.position_at(0.0).x;
        let mut last_step = f64::INFINITY;
        for step in 1..=20 {
            let x = f.position_at(f64::from(step) / 20.0).x;
            let moved = last - x;
            assert!(moved >= 0.0 && moved <= last_step + 1e-9);
            last_step = moved;
            last = x;
        }
        assert_eq!(last, -1000.0);
    }

    #[test]
    fn clipped_fling_leaves_at_release_speed() {
        let cfg = FlingConfig::default();
        let bounds = Rect::new(-1000.0, 0.0, 0.0, 0.0);
        let release = -8000.0;
        let near = Fling::new(&cfg, Point::new(-990.0, 0.0), Vec2::new(release, 0.0), bounds);
        let far = Fling::new(&cfg, Point::new(-900.0, 0.0), Vec2::new(release, 0.0), bounds);

        // 2·d / v: 10 px at 8000 px/s is 2.5 ms, 100 px is 25 ms.
        assert!((near.duration().as_secs_f64() - 0.0025).abs() < 1e-9);
        assert!((far.duration().as_secs_f64() - 0.025).abs() < 1e-9);
        assert!(near.duration() < far.duration());
        assert!(far.duration() < cfg.max_duration());

        for f in [near, far] {
            let dt = 1e-4;
            let moved = f.position_at(dt).x - f.start().x;
            let speed = moved / (dt * f.duration().as_secs_f64());
            assert!((speed - release).abs() < 0.01 * release.abs(), "{speed}");
            assert_eq!(f.position_at(1.0).x, -1000.0);
        }
    }

    #[test]
    fn pinned_axis_does_not_shorten_the_free_one() {
        let cfg = FlingConfig::default().with_deceleration(1000.0);
        // y is pinned; x travels its full 300 px.
        let bounds = Rect::new(-1.0e6, 0.0, 1.0e6, 0.0);
        let f = Fling::new(&cfg, Point::ORIGIN, Vec2::new(600.0, -800.0), bounds);
        assert_eq!(f.final_position().y, 0.0);
        assert!((f.final_position().x - 300.0).abs() < 1e-9);
        assert_eq!(f.duration(), Duration::from_secs(1));
    }

    #[test]
    fn duration_grows_with_speed_and_is_capped() {
        let cfg = FlingConfig::default();
        let mut last = Duration::ZERO;
        for speed in [10.0, 100.0, 1000.0, 4000.0, 8000.0, 50_000.0] {
            let f = Fling::new(&cfg, Point::ORIGIN, Vec2::new(0.0, speed), wide_bounds());
            assert!(f.duration() >= last);
            assert!(f.duration() <= cfg.max_duration());
            last = f.duration();
        }
        assert_eq!(last, cfg.max_duration());
    }

    #[test]
    fn density_scales_deceleration() {
        let base = FlingConfig::default();
        let hi = FlingConfig::for_density(2.0);
        assert_eq!(hi.deceleration, base.deceleration * 2.0);
        assert_eq!(hi.max_duration(), base.max_duration());
    }
}
