// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture vocabulary shared with the host's recognizer and widget.
//!
//! The recognizer turns raw pointer input into the semantic callbacks of
//! [`GestureListener`]; [`crate::TouchImageView`] implements that trait. The
//! widget side of the host implements [`ViewHost`] to receive redraw requests
//! and tap pass-through.

use kurbo::{Point, Vec2};

/// Callbacks emitted by a touch gesture recognizer.
///
/// Each method returns whether the event was handled, where the recognizer
/// cares about that. Scroll distances follow the usual recognizer convention:
/// `distance` is the previous pointer position minus the current one, so a
/// finger moving right produces a negative `x`.
pub trait GestureListener {
    /// A single tap that is known not to be the first half of a double tap.
    fn on_single_tap_confirmed(&mut self, at: Point) -> bool;

    /// The pointer was held down in place.
    fn on_long_press(&mut self, at: Point);

    /// Two taps in quick succession.
    fn on_double_tap(&mut self, at: Point) -> bool;

    /// One finger moved by `distance` since the previous scroll event.
    fn on_scroll(&mut self, distance: Vec2) -> bool;

    /// One finger lifted while moving at `velocity` pixels per second.
    fn on_fling(&mut self, velocity: Vec2) -> bool;

    /// A second finger went down and a pinch is starting around `focus`.
    fn on_scale_begin(&mut self, focus: Point) -> bool;

    /// The pinch span changed by `factor` since the previous scale event.
    fn on_scale(&mut self, factor: f64, focus: Point) -> bool;

    /// The pinch ended.
    fn on_scale_end(&mut self, focus: Point);

    /// Dispatches a recorded or queued event to the matching callback.
    fn handle(&mut self, event: GestureEvent) -> bool {
        match event {
            GestureEvent::SingleTapConfirmed(at) => self.on_single_tap_confirmed(at),
            GestureEvent::LongPress(at) => {
                self.on_long_press(at);
                true
            }
            GestureEvent::DoubleTap(at) => self.on_double_tap(at),
            GestureEvent::Scroll(distance) => self.on_scroll(distance),
            GestureEvent::Fling(velocity) => self.on_fling(velocity),
            GestureEvent::ScaleBegin(focus) => self.on_scale_begin(focus),
            GestureEvent::Scale { factor, focus } => self.on_scale(factor, focus),
            GestureEvent::ScaleEnd(focus) => {
                self.on_scale_end(focus);
                true
            }
        }
    }
}

/// One semantic gesture, as a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// See [`GestureListener::on_single_tap_confirmed`].
    SingleTapConfirmed(Point),
    /// See [`GestureListener::on_long_press`].
    LongPress(Point),
    /// See [`GestureListener::on_double_tap`].
    DoubleTap(Point),
    /// See [`GestureListener::on_scroll`].
    Scroll(Vec2),
    /// See [`GestureListener::on_fling`].
    Fling(Vec2),
    /// See [`GestureListener::on_scale_begin`].
    ScaleBegin(Point),
    /// See [`GestureListener::on_scale`].
    Scale {
        /// Span ratio since the previous scale event.
        factor: f64,
        /// Midpoint between the fingers.
        focus: Point,
    },
    /// See [`GestureListener::on_scale_end`].
    ScaleEnd(Point),
}

/// Widget-side services the viewport needs from its host.
pub trait ViewHost {
    /// The transform changed; schedule a redraw.
    fn invalidate(&mut self);

    /// Click semantics for a confirmed single tap. Returns whether it was handled.
    fn perform_click(&mut self) -> bool {
        false
    }

    /// Long-click semantics for a long press. Returns whether it was handled.
    fn perform_long_click(&mut self) -> bool {
        false
    }
}

/// Headless host: redraw requests and taps are dropped.
impl ViewHost for () {
    fn invalidate(&mut self) {}
}

/// Focal point tracking for one pinch.
///
/// Mirrors a drag tracker: the first update after [`FocalSession::begin`]
/// only records the focus, later updates report how far it moved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FocalSession {
    last_focus: Option<Point>,
}

impl FocalSession {
    /// Forgets the remembered focus, so the next update yields no pan.
    pub fn begin(&mut self) {
        self.last_focus = None;
    }

    /// Records `focus` and returns how far it moved since the previous update.
    pub fn update(&mut self, focus: Point) -> Option<Vec2> {
        let delta = self.last_focus.map(|last| focus - last);
        self.last_focus = Some(focus);
        delta
    }

    /// Ends the pinch and forgets the focus.
    pub fn end(&mut self) {
        self.last_focus = None;
    }

    /// The most recently recorded focus, if a pinch is in progress.
    #[must_use]
    pub fn last_focus(&self) -> Option<Point> {
        self.last_focus
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{FocalSession, GestureEvent, GestureListener};

    #[test]
    fn first_update_records_without_delta() {
        let mut s = FocalSession::default();
        s.begin();
        assert_eq!(s.update(Point::new(10.0, 20.0)), None);
        assert_eq!(s.update(Point::new(15.0, 18.0)), Some(Vec2::new(5.0, -2.0)));
        assert_eq!(s.last_focus(), Some(Point::new(15.0, 18.0)));
    }

    #[test]
    fn begin_and_end_forget_the_focus() {
        let mut s = FocalSession::default();
        s.update(Point::new(1.0, 1.0));
        s.begin();
        assert_eq!(s.update(Point::new(50.0, 50.0)), None);
        s.end();
        assert_eq!(s.last_focus(), None);
    }

    #[derive(Default)]
    struct Counter {
        scrolls: u32,
        scale_ends: u32,
        long_presses: u32,
    }

    impl GestureListener for Counter {
        fn on_single_tap_confirmed(&mut self, _: Point) -> bool {
            false
        }
        fn on_long_press(&mut self, _: Point) {
            self.long_presses += 1;
        }
        fn on_double_tap(&mut self, _: Point) -> bool {
            false
        }
        fn on_scroll(&mut self, _: Vec2) -> bool {
            self.scrolls += 1;
            true
        }
        fn on_fling(&mut self, _: Vec2) -> bool {
            false
        }
        fn on_scale_begin(&mut self, _: Point) -> bool {
            true
        }
        fn on_scale(&mut self, _: f64, _: Point) -> bool {
            true
        }
        fn on_scale_end(&mut self, _: Point) {
            self.scale_ends += 1;
        }
    }

    #[test]
    fn handle_routes_to_callbacks() {
        let mut c = Counter::default();
        assert!(c.handle(GestureEvent::Scroll(Vec2::new(1.0, 0.0))));
        assert!(!c.handle(GestureEvent::Fling(Vec2::ZERO)));
        assert!(c.handle(GestureEvent::ScaleEnd(Point::ORIGIN)));
        assert!(c.handle(GestureEvent::LongPress(Point::ORIGIN)));
        assert_eq!((c.scrolls, c.scale_ends, c.long_presses), (1, 1, 1));
    }
}
