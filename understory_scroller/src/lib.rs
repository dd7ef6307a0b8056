// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroller --heading-base-level=0

//! Understory Scroller: momentum touch/drag scrolling over an abstract surface.
//!
//! ## Overview
//!
//! [`MomentumScroller`] turns a stream of pointer samples into content offsets:
//!
//! - **Drag.** Once a gesture has moved more than a few pixels (or produced more than a few
//!   samples) the content tracks the pointer. Overscroll past either edge is allowed up to a
//!   *bump* of half the viewport.
//! - **Flick.** On release the retained samples (at most seven, thinned while the pointer
//!   rests) give a velocity proxy. A fast release throws the content, scaled by how much
//!   larger the content is than the viewport.
//! - **Snap-back.** Whenever the content comes to rest outside `[true_max, 0]` it is pulled
//!   back in.
//!
//! Rendering stays on the host side of the [`ScrollSurface`] trait: the scroller measures the
//! viewport and content through it and hands back offsets tagged with a [`Motion`] so the host
//! can pick a matching transition. Deferred steps (debounce, snap-back, settle) are queued on
//! an internal [`understory_schedule::Schedule`] and run from
//! [`advance_to`](MomentumScroller::advance_to), so timing is entirely under host control.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_scroller::{GestureOutcome, GestureSample, Motion, MomentumScroller, ScrollSurface};
//!
//! struct List {
//!     offset: Vec2,
//! }
//!
//! impl ScrollSurface for List {
//!     type ItemKey = usize;
//!     fn viewport_size(&self) -> Option<Size> { Some(Size::new(320.0, 480.0)) }
//!     fn content_size(&self) -> Option<Size> { Some(Size::new(320.0, 1920.0)) }
//!     fn item_bounds(&self, row: &usize) -> Option<Rect> {
//!         let top = *row as f64 * 48.0;
//!         Some(Rect::new(0.0, top, 320.0, top + 48.0))
//!     }
//!     fn apply_offset(&mut self, offset: Vec2, _motion: Motion) { self.offset = offset; }
//! }
//!
//! let ms = Duration::from_millis;
//! let sample = |y: f64, t: u64| GestureSample::new(Point::new(0.0, y), ms(t));
//!
//! let mut scroller = MomentumScroller::new(List { offset: Vec2::ZERO });
//! scroller.gesture_start(sample(400.0, 0));
//! for (i, y) in [380.0, 360.0, 340.0].into_iter().enumerate() {
//!     scroller.gesture_move(sample(y, 10 * (i as u64 + 1)));
//! }
//! let outcome = scroller.gesture_end(sample(340.0, 40));
//! assert!(matches!(outcome, Some(GestureOutcome::Flick { .. })));
//! assert!(scroller.surface().offset.y < -40.0);
//!
//! // Let the deferred snap-back run.
//! scroller.advance_to(ms(5000));
//! let max = scroller.true_max().y;
//! assert!((max..=0.0).contains(&scroller.offset().y));
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: emit `tracing` events for gesture outcomes and snap-backs.
//! - `serde`: derive `Serialize`/`Deserialize` for [`ScrollerConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod scroller;
pub mod surface;
pub mod types;

pub use config::{ConfigError, ScrollerConfig};
pub use scroller::MomentumScroller;
pub use surface::ScrollSurface;
pub use types::{GestureOutcome, GestureSample, Motion, ScrollAxes, ScrollPhase, ScrollTarget};
