// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The momentum scroller state machine.

use alloc::collections::VecDeque;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use understory_schedule::{Schedule, TimerToken};
use understory_signal::Subject;

use crate::config::{ConfigError, ScrollerConfig};
use crate::surface::ScrollSurface;
use crate::types::{GestureOutcome, GestureSample, Motion, ScrollAxes, ScrollPhase, ScrollTarget};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tick {
    /// Drop the oldest sample of a resting drag.
    Debounce,
    /// Bring the content back into bounds.
    Snap,
    /// A snap-back animation has had time to finish.
    Settle,
}

/// Most negative at-rest offset per axis: `min(viewport - content, 0)`.
fn true_max(viewport: Size, content: Size) -> Vec2 {
    Vec2::new(
        (viewport.width - content.width).min(0.0),
        (viewport.height - content.height).min(0.0),
    )
}

/// Touch/drag scroller with flick momentum, elastic overscroll, and snap-back.
///
/// Feed it normalized pointer samples through [`gesture_start`](Self::gesture_start),
/// [`gesture_move`](Self::gesture_move) and [`gesture_end`](Self::gesture_end), and drive its
/// deferred work with [`advance_to`](Self::advance_to). Offsets are pushed to the
/// [`ScrollSurface`] together with a [`Motion`] tag describing how to animate them.
///
/// ## Bounds
///
/// Per axis, the at-rest range is `[true_max, 0]` where `true_max = min(viewport - content, 0)`.
/// While dragging the offset may overshoot by the bump allowance (`bump_ratio` times the
/// viewport extent) on either side. A fling is not clamped; it is corrected by a snap-back
/// after it lands.
pub struct MomentumScroller<S: ScrollSurface> {
    surface: S,
    config: ScrollerConfig,
    axes: ScrollAxes,
    offset: Vec2,
    bump: Vec2,
    // Newest sample first.
    history: VecDeque<Point>,
    start: Point,
    in_motion: bool,
    moved: bool,
    phase: ScrollPhase,
    schedule: Schedule<Tick>,
    debounce: Option<TimerToken>,
    snap: Option<TimerToken>,
    settle: Option<TimerToken>,
    slide_start: Subject<GestureSample>,
    slide_end: Subject<GestureOutcome>,
}

impl<S: ScrollSurface> fmt::Debug for MomentumScroller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MomentumScroller")
            .field("axes", &self.axes)
            .field("offset", &self.offset)
            .field("bump", &self.bump)
            .field("history_len", &self.history.len())
            .field("in_motion", &self.in_motion)
            .field("moved", &self.moved)
            .field("phase", &self.phase)
            .field("pending", &self.schedule.len())
            .finish_non_exhaustive()
    }
}

impl<S: ScrollSurface> MomentumScroller<S> {
    /// Create a vertical scroller over `surface` with the default tuning.
    pub fn new(surface: S) -> Self {
        Self::build(surface, ScrollerConfig::default())
    }

    /// Create a scroller with custom tuning, rejecting invalid values.
    pub fn try_with_config(surface: S, config: ScrollerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(surface, config))
    }

    fn build(surface: S, config: ScrollerConfig) -> Self {
        let history = VecDeque::with_capacity(config.history_cap + 1);
        Self {
            surface,
            config,
            axes: ScrollAxes::default(),
            offset: Vec2::ZERO,
            bump: Vec2::ZERO,
            history,
            start: Point::ORIGIN,
            in_motion: false,
            moved: false,
            phase: ScrollPhase::Idle,
            schedule: Schedule::new(),
            debounce: None,
            snap: None,
            settle: None,
            slide_start: Subject::new(),
            slide_end: Subject::new(),
        }
    }

    /// The surface being scrolled.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, for example to change its content.
    ///
    /// Call [`on_resize`](Self::on_resize) afterwards if extents changed.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Active tuning.
    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// Current content offset; both components are `<= 0` at rest.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current motion phase.
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Returns true between `gesture_start` and `gesture_end`.
    pub fn in_motion(&self) -> bool {
        self.in_motion
    }

    /// Returns true if the current or last gesture became a drag.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Enabled axes.
    pub fn axes(&self) -> ScrollAxes {
        self.axes
    }

    /// Overscroll allowance measured at the last gesture start or resize.
    pub fn bump(&self) -> Vec2 {
        self.bump
    }

    /// Number of retained gesture samples.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Most negative at-rest offset, or zero when the surface reports no extents.
    pub fn true_max(&self) -> Vec2 {
        self.extents()
            .map_or(Vec2::ZERO, |(viewport, content)| true_max(viewport, content))
    }

    /// Fired with the first sample of each gesture.
    pub fn slide_start(&self) -> &Subject<GestureSample> {
        &self.slide_start
    }

    /// Fired with the classification of each finished gesture.
    pub fn slide_end(&self) -> &Subject<GestureOutcome> {
        &self.slide_end
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.schedule.now()
    }

    /// When the next deferred step is due, if any. Hosts can use this to schedule a wakeup.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.schedule.next_deadline()
    }

    /// Enable or disable each axis.
    ///
    /// A disabled axis reads `0` from samples and its offset is reset to `0`.
    pub fn set_scroll(&mut self, horizontal: bool, vertical: bool) {
        self.axes = ScrollAxes::from_switches(horizontal, vertical);
        let held = self.axes.mask(self.offset);
        self.set_offset(held, Motion::Instant);
    }

    /// Begin a gesture.
    pub fn gesture_start(&mut self, sample: GestureSample) {
        self.advance_to(sample.time);
        let Some((viewport, _)) = self.extents() else {
            return;
        };
        self.schedule.cancel_slot(&mut self.snap);
        self.schedule.cancel_slot(&mut self.settle);
        self.schedule.cancel_slot(&mut self.debounce);
        // A grab mid-flight keeps the current offset, which is already within the bump.

        let p = self.mask(sample.position);
        self.history.clear();
        self.history.push_front(p);
        self.start = p;
        self.moved = false;
        self.in_motion = true;
        self.bump = self.bump_for(viewport);
        self.phase = ScrollPhase::Dragging;
        self.slide_start.fire(sample);
    }

    /// Track the pointer. Ignored unless a gesture is in progress.
    pub fn gesture_move(&mut self, sample: GestureSample) {
        if !self.in_motion {
            return;
        }
        self.advance_to(sample.time);
        let Some((viewport, content)) = self.extents() else {
            return;
        };

        let p = self.mask(sample.position);
        let delta = self.history.front().map_or(Vec2::ZERO, |prev| p - *prev);
        self.history.push_front(p);
        self.history.truncate(self.config.history_cap);

        self.schedule.cancel_slot(&mut self.debounce);
        self.debounce = Some(self.schedule.after(self.config.debounce, Tick::Debounce));

        if self.moved {
            let target = self.elastic(self.offset + delta, viewport, content);
            self.set_offset(target, Motion::Track);
        } else {
            let travel = p - self.start;
            if self.history.len() > self.config.tap_max_samples
                || travel.x.abs() > self.config.drag_threshold
                || travel.y.abs() > self.config.drag_threshold
            {
                self.moved = true;
            }
        }
    }

    /// Finish a gesture and classify it.
    ///
    /// Returns `None` when no gesture was in progress (or the surface lost its extents).
    pub fn gesture_end(&mut self, sample: GestureSample) -> Option<GestureOutcome> {
        if !self.in_motion {
            return None;
        }
        self.advance_to(sample.time);
        self.in_motion = false;
        self.schedule.cancel_slot(&mut self.debounce);
        let Some((viewport, content)) = self.extents() else {
            self.history.clear();
            self.phase = ScrollPhase::Idle;
            return None;
        };

        // Successive deltas telescope to newest minus oldest.
        let sampled = match (self.history.front(), self.history.back()) {
            (Some(newest), Some(oldest)) => *newest - *oldest,
            _ => Vec2::ZERO,
        };

        let outcome = if !self.moved && self.history.len() <= self.config.tap_max_samples {
            GestureOutcome::Tap
        } else if self.is_flick(sampled) {
            self.fling(sampled, viewport, content)
        } else {
            GestureOutcome::Release
        };
        if !matches!(outcome, GestureOutcome::Flick { .. }) {
            self.phase = ScrollPhase::Idle;
            self.arm_snap(self.config.settle_snap_delay);
        }
        self.history.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(?outcome, samples = ?sampled, "gesture end");

        self.slide_end.fire(outcome);
        Some(outcome)
    }

    /// Clamp the offset into `[true_max, 0]` on every enabled axis.
    ///
    /// Returns true if the offset changed, in which case the surface receives
    /// [`Motion::FlickBack`] and the phase becomes [`ScrollPhase::Snapping`] until
    /// [`transition_end`](Self::transition_end) or the settle fallback. Calling it again
    /// once in bounds does nothing. Ignored while a gesture is in progress.
    pub fn snap_back(&mut self) -> bool {
        self.schedule.cancel_slot(&mut self.snap);
        if self.in_motion {
            return false;
        }
        let Some((viewport, content)) = self.extents() else {
            self.phase = ScrollPhase::Idle;
            return false;
        };
        let max = true_max(viewport, content);
        let target = self.axes.mask(Vec2::new(
            self.offset.x.clamp(max.x, 0.0),
            self.offset.y.clamp(max.y, 0.0),
        ));
        if self.set_offset(target, Motion::FlickBack) {
            #[cfg(feature = "tracing")]
            tracing::trace!(x = target.x, y = target.y, "snap back");
            self.phase = ScrollPhase::Snapping;
            self.schedule.cancel_slot(&mut self.settle);
            self.settle = Some(
                self.schedule
                    .after(self.config.settle_fallback, Tick::Settle),
            );
            true
        } else {
            if self.settle.is_none() {
                self.phase = ScrollPhase::Idle;
            }
            false
        }
    }

    /// The host finished animating the last offset change.
    ///
    /// A pending snap-back runs immediately; a running snap-back settles.
    pub fn transition_end(&mut self) {
        if self.snap.is_some() {
            self.snap_back();
        } else if self.schedule.cancel_slot(&mut self.settle) {
            self.phase = ScrollPhase::Idle;
        }
    }

    /// Scroll by `delta` with elastic clamping. Axes whose content fits are left alone.
    ///
    /// Outside a gesture an overshoot is corrected by a snap-back shortly after.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        let Some((viewport, content)) = self.extents() else {
            return false;
        };
        if !self.in_motion {
            self.bump = self.bump_for(viewport);
        }
        let target = self.elastic(self.offset + delta, viewport, content);
        let motion = if self.in_motion {
            Motion::Track
        } else {
            Motion::Instant
        };
        let changed = self.set_offset(target, motion);
        if changed && !self.in_motion {
            self.arm_snap(self.config.settle_snap_delay);
        }
        changed
    }

    /// Scroll vertically to an offset or bring an item into view.
    ///
    /// The horizontal offset returns to `0` and the vertical result is clamped into
    /// `[true_max, 0]`. With `instant` the surface receives [`Motion::Instant`], otherwise
    /// [`Motion::Flick`]. Returns true if the offset changed.
    pub fn scroll_to(&mut self, target: ScrollTarget<S::ItemKey>, instant: bool) -> bool {
        let Some((viewport, content)) = self.extents() else {
            return false;
        };
        let y = match target {
            ScrollTarget::Offset(y) => y,
            ScrollTarget::Item(key) => match self.surface.item_bounds(&key) {
                Some(bounds) => self.reveal(bounds, viewport.height),
                None => return false,
            },
        };
        let max = true_max(viewport, content);
        let y = if self.axes.contains(ScrollAxes::VERTICAL) {
            y.clamp(max.y, 0.0)
        } else {
            0.0
        };

        self.schedule.cancel_slot(&mut self.snap);
        self.schedule.cancel_slot(&mut self.settle);
        if !self.in_motion {
            self.phase = ScrollPhase::Idle;
        }
        let motion = if instant {
            Motion::Instant
        } else {
            Motion::Flick
        };
        self.set_offset(Vec2::new(0.0, y), motion)
    }

    /// Re-measure after the viewport or content changed.
    ///
    /// Refreshes the bump allowance and, when at rest, snaps back into the new bounds.
    pub fn on_resize(&mut self) {
        let Some((viewport, _)) = self.extents() else {
            return;
        };
        self.bump = self.bump_for(viewport);
        if !self.in_motion && self.phase != ScrollPhase::Flinging {
            self.snap_back();
        }
    }

    /// Returns whether the last gesture was a drag, clearing the flag.
    ///
    /// Hosts call this from their click handler and swallow the click when it returns true.
    pub fn click_guard(&mut self) -> bool {
        core::mem::take(&mut self.moved)
    }

    /// Run every deferred step due at or before `now`.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((_, tick)) = self.schedule.pop_due(now) {
            match tick {
                Tick::Debounce => {
                    self.debounce = None;
                    if self.in_motion && self.history.len() > 1 {
                        self.history.pop_back();
                    }
                }
                Tick::Snap => {
                    self.snap = None;
                    self.snap_back();
                }
                Tick::Settle => {
                    self.settle = None;
                    if self.phase == ScrollPhase::Snapping {
                        self.phase = ScrollPhase::Idle;
                    }
                }
            }
        }
    }

    fn extents(&self) -> Option<(Size, Size)> {
        let viewport = self.surface.viewport_size()?;
        let content = self.surface.content_size()?;
        if viewport.is_zero_area() {
            return None;
        }
        Some((viewport, content))
    }

    fn mask(&self, p: Point) -> Point {
        Point::ORIGIN + self.axes.mask(p.to_vec2())
    }

    fn bump_for(&self, viewport: Size) -> Vec2 {
        viewport.to_vec2() * self.config.bump_ratio
    }

    /// Enabled axes along which the content overflows the viewport.
    fn movable(&self, viewport: Size, content: Size) -> ScrollAxes {
        let mut axes = self.axes;
        if content.width <= viewport.width {
            axes.remove(ScrollAxes::HORIZONTAL);
        }
        if content.height <= viewport.height {
            axes.remove(ScrollAxes::VERTICAL);
        }
        axes
    }

    /// Clamp `target` into `[true_max - bump, bump]`; immovable axes keep their offset.
    fn elastic(&self, target: Vec2, viewport: Size, content: Size) -> Vec2 {
        let movable = self.movable(viewport, content);
        let max = true_max(viewport, content);
        Vec2::new(
            if movable.contains(ScrollAxes::HORIZONTAL) {
                target.x.clamp(max.x - self.bump.x, self.bump.x)
            } else {
                self.offset.x
            },
            if movable.contains(ScrollAxes::VERTICAL) {
                target.y.clamp(max.y - self.bump.y, self.bump.y)
            } else {
                self.offset.y
            },
        )
    }

    fn is_flick(&self, sampled: Vec2) -> bool {
        let threshold = self.config.flick_threshold;
        (self.axes.contains(ScrollAxes::VERTICAL) && sampled.y.abs() > threshold)
            || (self.axes.contains(ScrollAxes::HORIZONTAL) && sampled.x.abs() > threshold)
    }

    fn fling(&mut self, sampled: Vec2, viewport: Size, content: Size) -> GestureOutcome {
        let scale = Vec2::new(
            content.width / viewport.width,
            content.height / viewport.height,
        );
        let travel = self.movable(viewport, content).mask(Vec2::new(
            sampled.x * scale.x * self.config.velocity,
            sampled.y * scale.y * self.config.velocity,
        ));
        let landing = self.offset + travel;
        let max = true_max(viewport, content);
        let overshoots =
            landing.x > 0.0 || landing.x < max.x || landing.y > 0.0 || landing.y < max.y;

        let (motion, delay) = if overshoots {
            (Motion::FlickFast, self.config.flight_snap_delay)
        } else {
            (Motion::Flick, self.config.settle_snap_delay)
        };
        let landing = self.elastic(landing, viewport, content);
        self.set_offset(landing, motion);
        self.phase = ScrollPhase::Flinging;
        self.arm_snap(delay);
        GestureOutcome::Flick { travel }
    }

    /// Vertical offset that brings `bounds` into view with the reveal margin below it.
    fn reveal(&self, bounds: Rect, viewport_height: f64) -> f64 {
        let item_top = -bounds.y0;
        let item_reach = bounds.height() + self.config.reveal_margin;
        let top = self.offset.y;
        let bottom = top - viewport_height;
        let mut y = top;
        if item_top - item_reach < bottom {
            y = item_top - item_reach + viewport_height;
        }
        y.max(item_top)
    }

    fn arm_snap(&mut self, delay: Duration) {
        self.schedule.cancel_slot(&mut self.snap);
        self.snap = Some(self.schedule.after(delay, Tick::Snap));
    }

    fn set_offset(&mut self, offset: Vec2, motion: Motion) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.surface.apply_offset(offset, motion);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use understory_signal::{Notice, handler};

    #[derive(Debug, Default)]
    struct TestSurface {
        viewport: Option<Size>,
        content: Option<Size>,
        items: Vec<Rect>,
        applied: Vec<(Vec2, Motion)>,
    }

    impl ScrollSurface for TestSurface {
        type ItemKey = usize;

        fn viewport_size(&self) -> Option<Size> {
            self.viewport
        }

        fn content_size(&self) -> Option<Size> {
            self.content
        }

        fn item_bounds(&self, key: &usize) -> Option<Rect> {
            self.items.get(*key).copied()
        }

        fn apply_offset(&mut self, offset: Vec2, motion: Motion) {
            self.applied.push((offset, motion));
        }
    }

    fn scroller(viewport_h: f64, content_h: f64) -> MomentumScroller<TestSurface> {
        MomentumScroller::new(TestSurface {
            viewport: Some(Size::new(320.0, viewport_h)),
            content: Some(Size::new(320.0, content_h)),
            ..TestSurface::default()
        })
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn at(y: f64, t: u64) -> GestureSample {
        GestureSample::new(Point::new(0.0, y), ms(t))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn last_motion(s: &MomentumScroller<TestSurface>) -> Option<Motion> {
        s.surface().applied.last().map(|(_, m)| *m)
    }

    #[test]
    fn short_touch_is_a_tap() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(100.0, 0));
        s.gesture_move(at(101.0, 10));
        assert_eq!(s.gesture_end(at(101.0, 20)), Some(GestureOutcome::Tap));
        assert_eq!(s.offset(), Vec2::ZERO);
        assert!(s.surface().applied.is_empty());
        assert_eq!(s.history_len(), 0);
        assert!(!s.click_guard());
    }

    #[test]
    fn drag_tracks_pointer_once_moved() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(300.0, 0));
        // First move crosses the drag threshold but is not applied.
        s.gesture_move(at(290.0, 16));
        assert!(s.moved());
        assert_eq!(s.offset(), Vec2::ZERO);
        s.gesture_move(at(280.0, 32));
        s.gesture_move(at(270.0, 48));
        s.gesture_move(at(260.0, 64));
        assert_eq!(s.offset().y, -30.0);
        assert_eq!(s.phase(), ScrollPhase::Dragging);
        assert_eq!(last_motion(&s), Some(Motion::Track));
    }

    #[test]
    fn four_samples_count_as_a_drag_without_displacement() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(100.0, 0));
        s.gesture_move(at(101.0, 10));
        s.gesture_move(at(100.0, 20));
        assert!(!s.moved());
        s.gesture_move(at(101.0, 30));
        assert!(s.moved());
    }

    #[test]
    fn drag_overscroll_is_bounded_by_bump() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(0.0, 0));
        for i in 1..=12_u32 {
            s.gesture_move(at(f64::from(i) * 100.0, u64::from(i) * 16));
        }
        assert_eq!(s.bump().y, 250.0);
        assert_eq!(s.offset().y, 250.0);

        s.gesture_start(at(1000.0, 1000));
        for i in 1..=40_u32 {
            s.gesture_move(at(1000.0 - f64::from(i) * 100.0, 1000 + u64::from(i) * 16));
        }
        assert_eq!(s.offset().y, -1500.0 - 250.0);
    }

    #[test]
    fn flick_in_bounds_scales_by_content_ratio() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(400.0, 0));
        s.gesture_move(at(380.0, 10));
        s.gesture_move(at(360.0, 20));
        s.gesture_move(at(340.0, 30));
        assert_eq!(s.offset().y, -40.0);

        let Some(GestureOutcome::Flick { travel }) = s.gesture_end(at(340.0, 40)) else {
            panic!("expected a flick");
        };
        // -60 sampled * 1.6 velocity * (2000 / 500)
        assert!(close(travel.y, -384.0));
        assert!(close(s.offset().y, -424.0));
        assert_eq!(last_motion(&s), Some(Motion::Flick));
        assert_eq!(s.phase(), ScrollPhase::Flinging);

        s.advance_to(ms(50));
        assert_eq!(s.phase(), ScrollPhase::Idle);
        assert!(close(s.offset().y, -424.0));
    }

    #[test]
    fn flick_past_the_top_snaps_back_after_flight() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(100.0, 0));
        s.gesture_move(at(120.0, 10));
        s.gesture_move(at(140.0, 20));
        s.gesture_move(at(160.0, 30));
        let outcome = s.gesture_end(at(160.0, 40));
        assert!(matches!(outcome, Some(GestureOutcome::Flick { .. })));
        assert!(s.offset().y > 0.0);
        assert_eq!(last_motion(&s), Some(Motion::FlickFast));

        s.advance_to(ms(40 + 2999));
        assert_eq!(s.phase(), ScrollPhase::Flinging);
        s.advance_to(ms(40 + 3000));
        assert_eq!(s.offset().y, 0.0);
        assert_eq!(last_motion(&s), Some(Motion::FlickBack));
        assert_eq!(s.phase(), ScrollPhase::Snapping);

        s.advance_to(ms(40 + 3000 + 500));
        assert_eq!(s.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn transition_end_accelerates_snap_and_settles() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(100.0, 0));
        s.gesture_move(at(120.0, 10));
        s.gesture_move(at(140.0, 20));
        s.gesture_move(at(160.0, 30));
        s.gesture_end(at(160.0, 40));

        s.transition_end();
        assert_eq!(s.offset().y, 0.0);
        assert_eq!(s.phase(), ScrollPhase::Snapping);
        s.transition_end();
        assert_eq!(s.phase(), ScrollPhase::Idle);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn slow_drag_releases_without_flick() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(300.0, 0));
        s.gesture_move(at(295.0, 10));
        s.gesture_move(at(290.0, 20));
        // Pointer rests; the debounce drops the oldest sample.
        s.gesture_move(at(289.0, 300));
        assert_eq!(s.history_len(), 3);
        assert_eq!(s.offset().y, -6.0);
        assert_eq!(s.gesture_end(at(289.0, 600)), Some(GestureOutcome::Release));
        assert_eq!(s.phase(), ScrollPhase::Idle);
        assert!(s.click_guard());
        assert!(!s.click_guard());
    }

    #[test]
    fn history_is_capped() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(0.0, 0));
        for i in 1..20_u32 {
            s.gesture_move(at(f64::from(i), u64::from(i)));
        }
        assert_eq!(s.history_len(), 7);
    }

    #[test]
    fn content_that_fits_never_moves() {
        let mut s = scroller(500.0, 300.0);
        s.gesture_start(at(100.0, 0));
        for i in 1..6_u32 {
            s.gesture_move(at(100.0 + f64::from(i) * 30.0, u64::from(i) * 10));
        }
        let outcome = s.gesture_end(at(250.0, 60));
        assert_eq!(
            outcome,
            Some(GestureOutcome::Flick {
                travel: Vec2::ZERO
            })
        );
        assert_eq!(s.offset(), Vec2::ZERO);
        assert!(s.surface().applied.is_empty());
        assert!(!s.scroll_by(Vec2::new(0.0, -50.0)));
    }

    #[test]
    fn disabled_axis_reads_zero() {
        let mut s = MomentumScroller::new(TestSurface {
            viewport: Some(Size::new(300.0, 300.0)),
            content: Some(Size::new(1200.0, 1200.0)),
            ..TestSurface::default()
        });
        let sample = |x: f64, t: u64| GestureSample::new(Point::new(x, 0.0), ms(t));
        s.gesture_start(sample(200.0, 0));
        for i in 1..6_u32 {
            s.gesture_move(sample(200.0 - f64::from(i) * 10.0, u64::from(i) * 10));
        }
        assert_eq!(s.gesture_end(sample(150.0, 60)), Some(GestureOutcome::Release));
        assert_eq!(s.offset(), Vec2::ZERO);

        s.set_scroll(true, false);
        s.gesture_start(sample(200.0, 100));
        for i in 1..6_u32 {
            s.gesture_move(sample(200.0 - f64::from(i) * 10.0, 100 + u64::from(i) * 10));
        }
        assert_eq!(s.offset(), Vec2::new(-40.0, 0.0));
    }

    #[test]
    fn set_scroll_holds_disabled_axis_at_zero() {
        let mut s = scroller(500.0, 2000.0);
        s.scroll_to(ScrollTarget::Offset(-300.0), true);
        s.set_scroll(true, false);
        assert_eq!(s.offset(), Vec2::ZERO);
        assert_eq!(s.axes(), ScrollAxes::HORIZONTAL);
    }

    #[test]
    fn scroll_to_offset_clamps() {
        let mut s = scroller(500.0, 2000.0);
        assert!(s.scroll_to(ScrollTarget::Offset(-5000.0), false));
        assert_eq!(s.offset().y, -1500.0);
        assert_eq!(last_motion(&s), Some(Motion::Flick));
        assert!(s.scroll_to(ScrollTarget::Offset(10.0), true));
        assert_eq!(s.offset().y, 0.0);
        assert_eq!(last_motion(&s), Some(Motion::Instant));
        assert!(!s.scroll_to(ScrollTarget::Offset(0.0), true));
    }

    #[test]
    fn scroll_to_item_reveals_with_margin() {
        let mut s = scroller(500.0, 2000.0);
        s.surface_mut().items = vec![
            Rect::new(0.0, 1000.0, 320.0, 1050.0),
            Rect::new(0.0, 100.0, 320.0, 150.0),
        ];
        assert!(s.scroll_to(ScrollTarget::Item(0), true));
        // Item bottom plus margin lands on the viewport bottom.
        assert_eq!(s.offset().y, -630.0);

        // Already visible: no change.
        assert!(!s.scroll_to(ScrollTarget::Item(0), true));

        // Above the viewport: its top lands on the viewport top.
        assert!(s.scroll_to(ScrollTarget::Item(1), true));
        assert_eq!(s.offset().y, -100.0);

        assert!(!s.scroll_to(ScrollTarget::Item(7), true));
    }

    #[test]
    fn scroll_by_overshoot_snaps_back() {
        let mut s = scroller(500.0, 2000.0);
        assert!(s.scroll_by(Vec2::new(0.0, 400.0)));
        assert_eq!(s.offset().y, 250.0);
        s.advance_to(ms(10));
        assert_eq!(s.offset().y, 0.0);
        assert_eq!(last_motion(&s), Some(Motion::FlickBack));
    }

    #[test]
    fn resize_reclamps_at_rest() {
        let mut s = scroller(500.0, 2000.0);
        s.scroll_to(ScrollTarget::Offset(-1400.0), true);
        s.surface_mut().content = Some(Size::new(320.0, 1000.0));
        s.on_resize();
        assert_eq!(s.offset().y, -500.0);
        assert_eq!(s.phase(), ScrollPhase::Snapping);
    }

    #[test]
    fn snap_back_is_idempotent() {
        let mut s = scroller(500.0, 2000.0);
        s.scroll_by(Vec2::new(0.0, 100.0));
        assert!(s.snap_back());
        let applied = s.surface().applied.len();
        assert!(!s.snap_back());
        assert_eq!(s.surface().applied.len(), applied);
        assert_eq!(s.phase(), ScrollPhase::Snapping);
    }

    #[test]
    fn detached_surface_short_circuits() {
        let mut s = MomentumScroller::new(TestSurface::default());
        s.gesture_start(at(0.0, 0));
        assert!(!s.in_motion());
        s.gesture_move(at(50.0, 10));
        assert_eq!(s.gesture_end(at(50.0, 20)), None);
        assert!(!s.scroll_to(ScrollTarget::Offset(-10.0), true));
        assert!(!s.snap_back());
        assert_eq!(s.true_max(), Vec2::ZERO);
    }

    #[test]
    fn stray_samples_are_ignored() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_move(at(10.0, 0));
        assert_eq!(s.gesture_end(at(10.0, 10)), None);
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn slide_events_bracket_each_gesture() {
        let mut s = scroller(500.0, 2000.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        s.slide_start()
            .subscribe(handler(move |n: &Notice<'_, GestureSample>| {
                l.borrow_mut().push(alloc::format!("start {}", n.data.position.y));
            }));
        let l = log.clone();
        s.slide_end()
            .subscribe(handler(move |n: &Notice<'_, GestureOutcome>| {
                l.borrow_mut().push(alloc::format!("end {:?}", n.data));
            }));
        s.gesture_start(at(5.0, 0));
        s.gesture_end(at(5.0, 5));
        assert_eq!(*log.borrow(), ["start 5", "end Tap"]);
    }

    #[test]
    fn grabbing_during_flight_cancels_snap() {
        let mut s = scroller(500.0, 2000.0);
        s.gesture_start(at(100.0, 0));
        s.gesture_move(at(120.0, 10));
        s.gesture_move(at(140.0, 20));
        s.gesture_move(at(160.0, 30));
        s.gesture_end(at(160.0, 40));
        let landed = s.offset();

        s.gesture_start(at(160.0, 100));
        assert_eq!(s.phase(), ScrollPhase::Dragging);
        s.advance_to(ms(5000));
        assert_eq!(s.offset(), landed);
    }

    #[test]
    fn fast_flick_lands_within_bump() {
        let mut s = scroller(500.0, 5000.0);
        s.gesture_start(at(0.0, 0));
        for i in 1..=6_u32 {
            s.gesture_move(at(f64::from(i) * 20.0, u64::from(i) * 10));
        }
        assert_eq!(s.offset().y, 100.0);
        let outcome = s.gesture_end(at(120.0, 60));
        assert!(matches!(outcome, Some(GestureOutcome::Flick { travel }) if travel.y > 1000.0));
        assert_eq!(s.offset().y, s.bump().y);
        assert!(s.offset().y <= s.bump().y && s.offset().y >= s.true_max().y - s.bump().y);
        assert_eq!(last_motion(&s), Some(Motion::FlickFast));

        s.advance_to(ms(3060));
        assert_eq!(s.offset().y, 0.0);
        assert_eq!(last_motion(&s), Some(Motion::FlickBack));
    }

    #[test]
    fn grab_after_out_of_bounds_flick_snaps_back_on_release() {
        let mut s = scroller(500.0, 5000.0);
        s.gesture_start(at(0.0, 0));
        for i in 1..=6_u32 {
            s.gesture_move(at(f64::from(i) * 20.0, u64::from(i) * 10));
        }
        s.gesture_end(at(120.0, 60));
        assert_eq!(s.offset().y, 250.0);

        s.gesture_start(at(300.0, 200));
        assert_eq!(s.phase(), ScrollPhase::Dragging);
        assert_eq!(s.offset().y, 250.0);
        s.advance_to(ms(5000));
        assert_eq!(s.offset().y, 250.0);

        assert_eq!(s.gesture_end(at(300.0, 5000)), Some(GestureOutcome::Tap));
        s.advance_to(ms(5010));
        assert_eq!(s.offset(), Vec2::ZERO);
        assert_eq!(last_motion(&s), Some(Motion::FlickBack));
    }

    #[test]
    fn scroll_to_resets_horizontal_offset() {
        let mut s = MomentumScroller::new(TestSurface {
            viewport: Some(Size::new(300.0, 300.0)),
            content: Some(Size::new(1200.0, 1200.0)),
            ..TestSurface::default()
        });
        s.set_scroll(true, true);
        assert!(s.scroll_by(Vec2::new(-200.0, -200.0)));
        s.advance_to(ms(10));
        assert_eq!(s.offset(), Vec2::new(-200.0, -200.0));

        assert!(s.scroll_to(ScrollTarget::Offset(-100.0), true));
        assert_eq!(s.offset(), Vec2::new(0.0, -100.0));
        assert!(s.scroll_to(ScrollTarget::Offset(0.0), true));
        assert_eq!(s.offset(), Vec2::ZERO);
    }

    #[test]
    fn try_with_config_rejects_invalid_tuning() {
        let bad = ScrollerConfig {
            history_cap: 0,
            ..ScrollerConfig::default()
        };
        let err = MomentumScroller::try_with_config(TestSurface::default(), bad).unwrap_err();
        assert_eq!(err, ConfigError::HistoryCap(0));
    }
}
