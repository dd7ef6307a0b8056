// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigation stack state machine.

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

use understory_schedule::{Schedule, TimerToken};
use understory_signal::{BackGuard, Gestures, Handler, Subject, SubscriptionId};

use crate::back::{BackCapture, weak_handler};
use crate::config::{ConfigError, StackConfig};
use crate::surface::{FrameHost, StackSurface};
use crate::types::{Frame, StackChange, StackEvents, TransitionTag};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tick {
    /// Swap tags from the incoming to the outgoing node.
    Animate(u64),
    /// Transition-end fallback.
    Cleanup(u64),
    Show,
    Hide,
}

#[derive(Debug)]
struct Transition<N> {
    id: u64,
    incoming: N,
    incoming_tag: Option<TransitionTag>,
    outgoing: Option<N>,
    outgoing_tag: Option<TransitionTag>,
    /// Armed once the transition is animating.
    fallback: Option<TimerToken>,
}

/// An ordered stack of frames with a current index, animated transitions between them, and
/// back-gesture arbitration.
///
/// ## Navigation
///
/// - [`push`](Self::push) appends a frame and makes it current.
/// - [`pop`](Self::pop) removes the *top* frame and makes the new top current; frames below
///   the locked depth are never removed.
/// - [`home`](Self::home) truncates back to the root.
/// - [`forward`](Self::forward)/[`back`](Self::back) move the current index within the
///   existing frames without removing any.
///
/// ## Transitions
///
/// Each change of the current frame mounts its node tagged with the travel direction. After
/// `animate_delay` the tag moves to the outgoing node; once the host reports
/// [`transition_end`](Self::transition_end) for the incoming node (or after
/// `transition_fallback`) tags are cleared and the outgoing node is unmounted.
///
/// ## Re-entrancy
///
/// Events fire while the stack is mutably borrowed. Subscribers must not call back into a
/// stack shared through `Rc<RefCell<_>>` from inside an event handler; doing so panics.
/// Everything a subscriber usually needs is carried by the [`StackChange`].
pub struct NavigationStack<F, S: StackSurface> {
    frames: Vec<F>,
    index: usize,
    last_index: usize,
    last_node: Option<S::Node>,
    locked_depth: usize,
    visible: bool,
    surface: S,
    config: StackConfig,
    schedule: Schedule<Tick>,
    transitions: Vec<Transition<S::Node>>,
    next_transition: u64,
    events: StackEvents,
    back: Option<BackCapture>,
    guard: Option<BackGuard>,
}

impl<F, S: StackSurface> fmt::Debug for NavigationStack<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStack")
            .field("len", &self.frames.len())
            .field("index", &self.index)
            .field("last_index", &self.last_index)
            .field("locked_depth", &self.locked_depth)
            .field("visible", &self.visible)
            .field("transitions", &self.transitions.len())
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

impl<F: Frame + PartialEq, S: FrameHost<F>> NavigationStack<F, S> {
    /// Create an empty, hidden, locked stack over `surface`.
    pub fn new(surface: S) -> Self {
        Self::build(surface, StackConfig::default())
    }

    /// Create a stack with custom configuration, rejecting invalid values.
    pub fn try_with_config(surface: S, config: StackConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(surface, config))
    }

    fn build(surface: S, config: StackConfig) -> Self {
        Self {
            frames: Vec::new(),
            index: 0,
            last_index: 0,
            last_node: None,
            locked_depth: usize::from(config.locked),
            visible: false,
            surface,
            config,
            schedule: Schedule::new(),
            transitions: Vec::new(),
            next_transition: 1,
            events: StackEvents::default(),
            back: None,
            guard: None,
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the stack holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the current frame.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Frames in navigation order, root first.
    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    /// The current frame.
    pub fn current(&self) -> Option<&F> {
        self.frames.get(self.index)
    }

    /// The most recently pushed frame.
    pub fn top(&self) -> Option<&F> {
        self.frames.last()
    }

    /// Title of the current frame.
    pub fn title(&self) -> Option<&str> {
        self.current().and_then(Frame::title)
    }

    /// Snapshot of the current position, as carried by events.
    pub fn change(&self) -> StackChange {
        StackChange {
            index: self.index,
            depth: self.frames.len(),
            title: self.title().map(ToOwned::to_owned),
        }
    }

    /// Number of frames `pop` will never remove.
    pub fn locked_depth(&self) -> usize {
        self.locked_depth
    }

    /// Keep (`true`) or allow popping (`false`) the root frame.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked_depth = usize::from(locked);
    }

    /// Returns true while the stack is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true while a transition has not been cleaned up.
    pub fn in_transition(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Event subjects.
    pub fn events(&self) -> &StackEvents {
        &self.events
    }

    /// Active configuration.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// The rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns true if [`home`](Self::home) would change anything.
    pub fn can_home(&self) -> bool {
        self.frames.len() > 1 && self.index > 0
    }

    /// Returns true if [`pop`](Self::pop) would remove a frame.
    pub fn can_pop(&self) -> bool {
        self.frames.len() > self.locked_depth
    }

    /// Push `frame` and make it current.
    ///
    /// Pushing the frame that is already on top does nothing and returns false.
    pub fn push(&mut self, frame: F) -> bool {
        if self.frames.last() == Some(&frame) {
            return false;
        }
        self.frames.push(frame);
        self.index = self.frames.len() - 1;
        self.draw();
        #[cfg(feature = "tracing")]
        tracing::debug!(index = self.index, depth = self.frames.len(), "push");
        self.events.push.fire(self.change());
        self.capture_back();
        true
    }

    /// Remove the top frame and return it, deactivated.
    ///
    /// Returns `None` without firing anything when only locked frames remain. Popping the
    /// last frame of an unlocked stack hides it.
    pub fn pop(&mut self) -> Option<F> {
        if !self.can_pop() {
            return None;
        }
        let mut frame = self.frames.pop()?;
        self.index = self.frames.len().saturating_sub(1);
        self.draw();
        frame.deactivate();
        if self.frames.is_empty() {
            if let Some(node) = self.last_node.take() {
                self.surface.unmount(&node);
            }
            self.last_index = 0;
            self.hide();
        }
        self.capture_back();
        #[cfg(feature = "tracing")]
        tracing::debug!(index = self.index, depth = self.frames.len(), "pop");
        if !self.frames.is_empty() {
            self.events.pop.fire(self.change());
        }
        Some(frame)
    }

    /// Return to the root frame, removing every other frame.
    ///
    /// The removed frames are deactivated (top first) and returned in stack order. Does
    /// nothing when the root is already current.
    pub fn home(&mut self) -> Vec<F> {
        if !self.can_home() {
            return Vec::new();
        }
        let mut removed: Vec<F> = self.frames.drain(1..).collect();
        self.last_index = 1;
        self.index = 0;
        self.draw();
        for frame in removed.iter_mut().rev() {
            frame.deactivate();
        }
        self.capture_back();
        #[cfg(feature = "tracing")]
        tracing::debug!(removed = removed.len(), "home");
        let change = self.change();
        self.events.pop.fire(change.clone());
        self.events.home.fire(change);
        removed
    }

    /// [`home`](Self::home), then show the stack immediately.
    ///
    /// Unlike [`show`](Self::show), the `show` event fires without delay.
    pub fn show_home(&mut self) -> Vec<F> {
        let removed = self.home();
        if !self.visible {
            self.visible = true;
            self.surface.set_shown(true);
            self.events.show.fire(());
        }
        removed
    }

    /// Move to the next frame of the existing stack.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.frames.len() {
            return false;
        }
        self.index += 1;
        self.draw();
        #[cfg(feature = "tracing")]
        tracing::debug!(index = self.index, "forward");
        self.events.forward.fire(self.change());
        self.capture_back();
        true
    }

    /// Move to the previous frame without removing anything.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.draw();
        #[cfg(feature = "tracing")]
        tracing::debug!(index = self.index, "back");
        self.events.back.fire(self.change());
        self.capture_back();
        true
    }

    /// Show the stack. The `show` event fires after `visibility_delay`.
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.surface.set_shown(true);
        self.schedule.after(self.config.visibility_delay, Tick::Show);
        true
    }

    /// Hide the stack. The `hide` event fires after `visibility_delay`.
    pub fn hide(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.surface.set_shown(false);
        self.schedule.after(self.config.visibility_delay, Tick::Hide);
        true
    }

    /// Host signal that the transition of `node` (the incoming node) finished.
    ///
    /// Returns false if no running transition brings in `node`.
    pub fn transition_end(&mut self, node: &S::Node) -> bool {
        let Some(pos) = self
            .transitions
            .iter()
            .position(|t| t.fallback.is_some() && t.incoming == *node)
        else {
            return false;
        };
        let t = self.transitions.remove(pos);
        if let Some(token) = t.fallback {
            self.schedule.cancel(token);
        }
        self.finish(t);
        true
    }

    /// Run every deferred step due at or before `now`.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((_, tick)) = self.schedule.pop_due(now) {
            match tick {
                Tick::Animate(id) => self.animate(id),
                Tick::Cleanup(id) => {
                    if let Some(pos) = self.transitions.iter().position(|t| t.id == id) {
                        let t = self.transitions.remove(pos);
                        self.finish(t);
                    }
                }
                Tick::Show => {
                    self.events.show.fire(());
                }
                Tick::Hide => {
                    self.events.hide.fire(());
                }
            }
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.schedule.now()
    }

    /// When the next deferred step is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.schedule.next_deadline()
    }

    /// Install the capture used to claim the back signal while the stack can go back.
    ///
    /// `guard` mirrors the same condition for platform code. Most callers want
    /// [`bind_back`](Self::bind_back) instead.
    pub fn attach_back(&mut self, capture: BackCapture, guard: BackGuard) {
        self.back = Some(capture);
        self.guard = Some(guard);
        self.capture_back();
    }

    /// Re-evaluate the back capture: held while `index > 0`, released otherwise.
    pub fn capture_back(&mut self) {
        let can_go_back = self.index > 0;
        if let Some(guard) = &self.guard {
            guard.set(can_go_back);
        }
        if let Some(back) = &mut self.back {
            back.set(can_go_back);
        }
    }

    /// Let a shared stack pop itself on the back gesture while it can go back.
    pub fn bind_back(this: &Rc<RefCell<Self>>, gestures: &Gestures)
    where
        F: 'static,
        S: 'static,
    {
        let capture = BackCapture::new(
            &gestures.back,
            weak_handler(this, |stack: &mut Self| {
                stack.pop();
            }),
        );
        this.borrow_mut()
            .attach_back(capture, gestures.back_guard.clone());
    }

    fn draw(&mut self) {
        let Some(frame) = self.frames.get(self.index) else {
            return;
        };
        let Some(incoming) = self.surface.host(frame) else {
            return;
        };

        let (outgoing_tag, incoming_tag) = match self.index.cmp(&self.last_index) {
            Ordering::Greater => (Some(TransitionTag::Prev), Some(TransitionTag::Next)),
            Ordering::Less => (Some(TransitionTag::Next), Some(TransitionTag::Prev)),
            Ordering::Equal => (None, None),
        };
        if incoming_tag.is_some() {
            self.surface.set_transition(&incoming, incoming_tag);
        }
        self.surface.mount(&incoming);

        let outgoing = self
            .last_node
            .replace(incoming.clone())
            .filter(|node| *node != incoming);
        let id = self.next_transition;
        self.next_transition += 1;
        self.schedule
            .after(self.config.animate_delay, Tick::Animate(id));
        self.transitions.push(Transition {
            id,
            incoming,
            incoming_tag,
            outgoing,
            outgoing_tag,
            fallback: None,
        });

        if let Some(frame) = self.frames.get_mut(self.index) {
            frame.activate();
        }
        self.last_index = self.index;
    }

    fn animate(&mut self, id: u64) {
        let Some(t) = self.transitions.iter_mut().find(|t| t.id == id) else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(id, "transition animate");
        if t.incoming_tag.is_some() {
            self.surface.set_transition(&t.incoming, None);
        }
        if let (Some(tag), Some(node)) = (t.outgoing_tag, &t.outgoing) {
            self.surface.set_transition(node, Some(tag));
        }
        t.fallback = Some(
            self.schedule
                .after(self.config.transition_fallback, Tick::Cleanup(id)),
        );
    }

    fn finish(&mut self, t: Transition<S::Node>) {
        #[cfg(feature = "tracing")]
        tracing::trace!(id = t.id, "transition cleanup");
        if let Some(node) = &t.outgoing {
            self.surface.set_transition(node, None);
            // A later transition may have brought the same node back.
            if self.last_node.as_ref() != Some(node) {
                self.surface.unmount(node);
            }
        }
        if t.incoming_tag.is_some() {
            self.surface.set_transition(&t.incoming, None);
        }
    }
}

/// Shared handle to a navigation stack, as used with [`NavigationStack::bind_back`].
pub type SharedStack<F, S> = Rc<RefCell<NavigationStack<F, S>>>;

/// Subscribe `f` to every navigation event of `events` (push, pop, home, forward, back).
///
/// Returns the subscriptions so they can be removed again.
pub fn subscribe_navigation(
    events: &StackEvents,
    f: &Handler<StackChange>,
) -> Vec<(Subject<StackChange>, SubscriptionId)> {
    [
        &events.push,
        &events.pop,
        &events.home,
        &events.forward,
        &events.back,
    ]
    .into_iter()
    .map(|subject| (subject.clone(), subject.subscribe(f.clone())))
    .collect()
}
