// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A navigation stack whose frames scroll, backed by two alternating scrollers.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::marker::PhantomData;
use core::time::Duration;

use kurbo::Vec2;
use understory_scroller::{
    GestureOutcome, GestureSample, MomentumScroller, ScrollTarget, ScrollerConfig,
};
use understory_signal::Gestures;

use crate::back::{BackCapture, weak_handler};
use crate::config::{ConfigError, StackConfig};
use crate::stack::NavigationStack;
use crate::surface::{BufferSurface, FrameHost, StackSurface};
use crate::types::{Frame, StackEvents, TransitionTag};

/// Two scrollers plus the outer surface that mounts their containers.
///
/// As a [`StackSurface`] it delegates to the outer surface; as a [`FrameHost`] it hands the
/// frame to the active scroller and returns that scroller's container node.
pub struct BufferedSurface<B: BufferSurface<F>, O, F> {
    scrollers: [MomentumScroller<B>; 2],
    active: usize,
    outer: O,
    frame: PhantomData<fn(&F)>,
}

impl<B: BufferSurface<F>, O, F> fmt::Debug for BufferedSurface<B, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedSurface")
            .field("active", &self.active)
            .field("scrollers", &self.scrollers)
            .finish_non_exhaustive()
    }
}

impl<B: BufferSurface<F>, O, F> BufferedSurface<B, O, F> {
    fn new(scrollers: [MomentumScroller<B>; 2], outer: O) -> Self {
        Self {
            scrollers,
            active: 0,
            outer,
            frame: PhantomData,
        }
    }

    /// Make the other scroller active.
    fn switch(&mut self) {
        self.active ^= 1;
    }

    /// The scroller displaying the current frame.
    pub fn active(&self) -> &MomentumScroller<B> {
        &self.scrollers[self.active]
    }

    /// Mutable access to the active scroller.
    pub fn active_mut(&mut self) -> &mut MomentumScroller<B> {
        &mut self.scrollers[self.active]
    }

    /// The scroller holding the previously displayed frame.
    pub fn inactive(&self) -> &MomentumScroller<B> {
        &self.scrollers[self.active ^ 1]
    }

    /// The outer surface.
    pub fn outer(&self) -> &O {
        &self.outer
    }

    /// Mutable access to the outer surface.
    pub fn outer_mut(&mut self) -> &mut O {
        &mut self.outer
    }
}

impl<B: BufferSurface<F>, O: StackSurface, F> StackSurface for BufferedSurface<B, O, F> {
    type Node = O::Node;

    fn mount(&mut self, node: &O::Node) {
        self.outer.mount(node);
    }

    fn unmount(&mut self, node: &O::Node) {
        self.outer.unmount(node);
    }

    fn set_transition(&mut self, node: &O::Node, tag: Option<TransitionTag>) {
        self.outer.set_transition(node, tag);
    }

    fn set_shown(&mut self, shown: bool) {
        self.outer.set_shown(shown);
    }
}

impl<B, O, F> FrameHost<F> for BufferedSurface<B, O, F>
where
    B: BufferSurface<F>,
    O: StackSurface<Node = <B as BufferSurface<F>>::Node>,
{
    fn host(&mut self, frame: &F) -> Option<O::Node> {
        let scroller = self.active_mut();
        scroller.surface_mut().adopt(frame);
        scroller.on_resize();
        Some(scroller.surface().node())
    }
}

/// A [`NavigationStack`] of scrolling frames.
///
/// Every navigation step that changes the current frame first switches to the other of two
/// [`MomentumScroller`]s, so the outgoing frame keeps its scroll position while it slides out
/// and the incoming one gets a fresh container. A pushed frame always starts scrolled to the
/// top.
pub struct DualBufferNavigator<F, B: BufferSurface<F>, O: StackSurface> {
    stack: NavigationStack<F, BufferedSurface<B, O, F>>,
}

impl<F, B: BufferSurface<F>, O: StackSurface> fmt::Debug for DualBufferNavigator<F, B, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualBufferNavigator")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl<F, B, O> DualBufferNavigator<F, B, O>
where
    F: Frame + PartialEq,
    B: BufferSurface<F>,
    O: StackSurface<Node = <B as BufferSurface<F>>::Node>,
{
    /// Create a navigator with default stack and scroller configuration.
    pub fn new(buffers: [B; 2], outer: O) -> Self {
        let [first, second] = buffers;
        let scrollers = [MomentumScroller::new(first), MomentumScroller::new(second)];
        Self {
            stack: NavigationStack::new(BufferedSurface::new(scrollers, outer)),
        }
    }

    /// Create a navigator with custom configuration, rejecting invalid values.
    pub fn try_with_config(
        buffers: [B; 2],
        outer: O,
        stack: StackConfig,
        scroller: &ScrollerConfig,
    ) -> Result<Self, ConfigError> {
        let [first, second] = buffers;
        let scrollers = [
            MomentumScroller::try_with_config(first, scroller.clone())?,
            MomentumScroller::try_with_config(second, scroller.clone())?,
        ];
        let surface = BufferedSurface::new(scrollers, outer);
        Ok(Self {
            stack: NavigationStack::try_with_config(surface, stack)?,
        })
    }

    /// The underlying stack.
    pub fn stack(&self) -> &NavigationStack<F, BufferedSurface<B, O, F>> {
        &self.stack
    }

    /// Event subjects of the underlying stack.
    pub fn events(&self) -> &StackEvents {
        self.stack.events()
    }

    /// Both scrollers and the outer surface.
    pub fn buffers(&self) -> &BufferedSurface<B, O, F> {
        self.stack.surface()
    }

    /// The scroller displaying the current frame.
    pub fn active_scroller(&self) -> &MomentumScroller<B> {
        self.stack.surface().active()
    }

    /// Mutable access to the active scroller.
    pub fn active_scroller_mut(&mut self) -> &mut MomentumScroller<B> {
        self.stack.surface_mut().active_mut()
    }

    /// Push `frame` into a fresh buffer scrolled to the top.
    pub fn push(&mut self, frame: F) -> bool {
        if self.stack.top() == Some(&frame) {
            return false;
        }
        let buffers = self.stack.surface_mut();
        buffers.switch();
        let scroller = buffers.active_mut();
        scroller.surface_mut().adopt(&frame);
        scroller.scroll_to(ScrollTarget::Offset(0.0), true);
        self.stack.push(frame)
    }

    /// Pop the top frame.
    pub fn pop(&mut self) -> Option<F> {
        if self.stack.can_pop() {
            self.stack.surface_mut().switch();
        }
        self.stack.pop()
    }

    /// Return to the root frame.
    pub fn home(&mut self) -> Vec<F> {
        if self.stack.can_home() {
            self.stack.surface_mut().switch();
        }
        self.stack.home()
    }

    /// Return to the root frame and show immediately.
    pub fn show_home(&mut self) -> Vec<F> {
        if self.stack.can_home() {
            self.stack.surface_mut().switch();
        }
        self.stack.show_home()
    }

    /// Move to the next frame of the existing stack.
    pub fn forward(&mut self) -> bool {
        if self.stack.index() + 1 < self.stack.len() {
            self.stack.surface_mut().switch();
        }
        self.stack.forward()
    }

    /// Move to the previous frame without removing anything.
    pub fn back(&mut self) -> bool {
        if self.stack.index() > 0 {
            self.stack.surface_mut().switch();
        }
        self.stack.back()
    }

    /// Show the stack.
    pub fn show(&mut self) -> bool {
        self.stack.show()
    }

    /// Hide the stack.
    pub fn hide(&mut self) -> bool {
        self.stack.hide()
    }

    /// Keep or allow popping the root frame.
    pub fn set_locked(&mut self, locked: bool) {
        self.stack.set_locked(locked);
    }

    /// Scroll the current frame.
    pub fn scroll_to(&mut self, target: ScrollTarget<B::ItemKey>, instant: bool) -> bool {
        self.active_scroller_mut().scroll_to(target, instant)
    }

    /// Scroll the current frame by `delta`.
    pub fn scroll_by(&mut self, delta: Vec2) -> bool {
        self.active_scroller_mut().scroll_by(delta)
    }

    /// Forward a gesture start to the active scroller.
    pub fn gesture_start(&mut self, sample: GestureSample) {
        self.active_scroller_mut().gesture_start(sample);
    }

    /// Forward a gesture move to the active scroller.
    pub fn gesture_move(&mut self, sample: GestureSample) {
        self.active_scroller_mut().gesture_move(sample);
    }

    /// Forward a gesture end to the active scroller.
    pub fn gesture_end(&mut self, sample: GestureSample) -> Option<GestureOutcome> {
        self.active_scroller_mut().gesture_end(sample)
    }

    /// Host signal that a stack transition bringing in `node` finished.
    pub fn transition_end(&mut self, node: &O::Node) -> bool {
        self.stack.transition_end(node)
    }

    /// Run deferred steps of the stack and both scrollers.
    pub fn advance_to(&mut self, now: Duration) {
        self.stack.advance_to(now);
        for scroller in &mut self.stack.surface_mut().scrollers {
            scroller.advance_to(now);
        }
    }

    /// Let a shared navigator pop itself (switching buffers) on the back gesture.
    pub fn bind_back(this: &Rc<RefCell<Self>>, gestures: &Gestures)
    where
        F: 'static,
        B: 'static,
        O: 'static,
    {
        let capture = BackCapture::new(
            &gestures.back,
            weak_handler(this, |nav: &mut Self| {
                nav.pop();
            }),
        );
        this.borrow_mut()
            .stack
            .attach_back(capture, gestures.back_guard.clone());
    }
}
