// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch_view --heading-base-level=0

//! Understory Touch View: a touch-driven viewport over a single image.
//!
//! This crate provides a small, headless controller that maps an image of
//! known intrinsic size into a viewport of known size with a uniform scale
//! plus translation, and updates that mapping from touch gestures:
//! - Pan with one finger, clamped so no gap opens at the image edges.
//! - Fling with momentum that decelerates to rest inside the legal range.
//! - Pinch-zoom around the fingers, between the fitted scale and `1.0`.
//! - Double tap to toggle between fitted and natural size.
//! - Snap back into bounds when a pinch leaves the image misplaced.
//!
//! It does **not** own a gesture recognizer, a renderer, or a clock. Callers
//! are expected to:
//! - Classify raw pointer input into the callbacks of [`GestureListener`].
//! - Implement [`ViewHost`] to redraw with [`TouchImageView::matrix`] when
//!   asked, and to provide click / long-click semantics.
//! - Call [`TouchImageView::tick`] once per frame while
//!   [`TouchImageView::is_animating`] is `true`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_touch_view::{AnimationStatus, GestureListener, TouchImageView};
//!
//! // 1000x1000 viewport showing a 2000x1000 image.
//! let mut view = TouchImageView::new(());
//! view.set_viewport_size(Size::new(1000.0, 1000.0));
//! view.set_image_size(Some(Size::new(2000.0, 1000.0)));
//!
//! // Fitted: the image spans the width and is centered vertically.
//! assert_eq!(view.scale(), 0.5);
//! assert_eq!(view.translation(), Vec2::new(0.0, 250.0));
//!
//! // Double tap zooms to natural size around the tap.
//! view.on_double_tap(Point::new(500.0, 500.0));
//! while view.tick(1.0) == AnimationStatus::Running {}
//! assert!((view.scale() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The transform is one [`kurbo::Affine`]; scale and translation are always
//!   decoded from it rather than stored alongside it.
//! - At most one animation runs. [`Animation`] is a plain enum, and any new
//!   drag, pinch, fling, or double tap replaces it outright.
//! - The clamping policy lives in [`bounds`] as pure functions so it can be
//!   reused and tested on its own.
//! - Degenerate sizes and non-finite gesture input are ignored rather than
//!   reported; nothing in the gesture path panics or returns an error.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
pub mod bounds;
mod config;
mod fling;
mod gesture;
mod modes;
mod transform;
mod view;

pub use animation::{Animation, AnimationKind, AnimationStatus, TransformSnapshot, Tween};
pub use config::{ConfigError, TouchViewConfig};
pub use fling::{Fling, FlingConfig};
pub use gesture::{FocalSession, GestureEvent, GestureListener, ViewHost};
pub use modes::{Easing, ScrollDirection};
pub use transform::ImageTransform;
pub use view::{TouchImageView, TouchImageViewDebugInfo};
