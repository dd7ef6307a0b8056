// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scroller: axes, gesture samples, outcomes, and motion tags.

use core::time::Duration;

use kurbo::{Point, Vec2};

bitflags::bitflags! {
    /// Axes a scroller is allowed to move along.
    ///
    /// Samples are masked by these flags: a disabled axis always reads `0` and its offset is
    /// held at `0`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ScrollAxes: u8 {
        /// Horizontal scrolling.
        const HORIZONTAL = 0b0000_0001;
        /// Vertical scrolling.
        const VERTICAL   = 0b0000_0010;
    }
}

impl Default for ScrollAxes {
    fn default() -> Self {
        Self::VERTICAL
    }
}

impl ScrollAxes {
    /// Build from per-axis switches.
    pub fn from_switches(horizontal: bool, vertical: bool) -> Self {
        let mut axes = Self::empty();
        axes.set(Self::HORIZONTAL, horizontal);
        axes.set(Self::VERTICAL, vertical);
        axes
    }

    /// Zero the components of `v` whose axis is disabled.
    pub fn mask(self, v: Vec2) -> Vec2 {
        Vec2::new(
            if self.contains(Self::HORIZONTAL) { v.x } else { 0.0 },
            if self.contains(Self::VERTICAL) { v.y } else { 0.0 },
        )
    }
}

/// One normalized pointer sample: position in screen space plus a timestamp.
///
/// The timestamp is a [`Duration`] since the same origin the host uses for
/// [`MomentumScroller::advance_to`](crate::MomentumScroller::advance_to).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Pointer position.
    pub position: Point,
    /// When the sample was taken.
    pub time: Duration,
}

impl GestureSample {
    /// Create a sample.
    pub const fn new(position: Point, time: Duration) -> Self {
        Self { position, time }
    }
}

/// How a finished gesture was classified.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// Too short and too small to be a drag; the host may treat it as a click.
    Tap,
    /// A drag released without enough velocity to fling.
    Release,
    /// A fling; `travel` is the distance the content was thrown.
    Flick {
        /// Offset change applied by the fling.
        travel: Vec2,
    },
}

/// Motion phase of a scroller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    /// At rest.
    #[default]
    Idle,
    /// Following a pointer.
    Dragging,
    /// Thrown by a fling; a snap-back is pending.
    Flinging,
    /// Animating back into bounds.
    Snapping,
}

/// How a surface should animate an offset change.
///
/// Hosts typically map these to transition styles (for example no transition for
/// [`Track`](Self::Track), a long ease-out for [`Flick`](Self::Flick)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Direct manipulation; follow the pointer with no easing.
    Track,
    /// Jump without animation.
    Instant,
    /// Fling that lands in bounds.
    Flick,
    /// Fling that lands out of bounds and will be snapped back.
    FlickFast,
    /// Correction back into bounds.
    FlickBack,
}

/// Where [`MomentumScroller::scroll_to`](crate::MomentumScroller::scroll_to) should go.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget<K> {
    /// A vertical offset (`<= 0`, where `0` is the top).
    Offset(f64),
    /// A child item, brought into view with a margin.
    Item(K),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_axes_are_vertical() {
        assert_eq!(ScrollAxes::default(), ScrollAxes::VERTICAL);
    }

    #[test]
    fn mask_zeroes_disabled_axes() {
        let v = Vec2::new(3.0, -7.0);
        assert_eq!(ScrollAxes::VERTICAL.mask(v), Vec2::new(0.0, -7.0));
        assert_eq!(ScrollAxes::HORIZONTAL.mask(v), Vec2::new(3.0, 0.0));
        assert_eq!(ScrollAxes::all().mask(v), v);
        assert_eq!(ScrollAxes::empty().mask(v), Vec2::ZERO);
    }

    #[test]
    fn from_switches_matches_flags() {
        assert_eq!(ScrollAxes::from_switches(true, true), ScrollAxes::all());
        assert_eq!(
            ScrollAxes::from_switches(true, false),
            ScrollAxes::HORIZONTAL
        );
        assert!(ScrollAxes::from_switches(false, false).is_empty());
    }
}
