// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A navigation bar that follows a stack.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use understory_signal::{Handler, Notice, Subject, SubscriptionId, handler};

use crate::stack::subscribe_navigation;
use crate::types::{StackChange, StackEvents};

#[derive(Debug, Default)]
struct BarState {
    first_title: String,
    title: Option<String>,
    depth: usize,
}

impl BarState {
    fn apply(&mut self, change: &StackChange) {
        self.title.clone_from(&change.title);
        self.depth = change.depth;
    }
}

/// Title and back-button state for a [`NavigationStack`](crate::NavigationStack).
///
/// The bar listens to the stack's navigation events and keeps the current frame's title. The
/// back button is visible while the stack is deeper than its root. Pressing it fires
/// [`back_requested`](Self::back_requested); the host wires that to the stack.
///
/// ```
/// use understory_nav_stack::{NavBar, StackChange, StackEvents};
///
/// let events = StackEvents::default();
/// let mut bar = NavBar::new("Home");
/// bar.bind(&events, &StackChange::default());
/// assert_eq!(bar.title(), "Home");
///
/// events.push.fire(StackChange { index: 1, depth: 2, title: Some("Inbox".into()) });
/// assert_eq!(bar.title(), "Inbox");
/// assert!(bar.back_visible());
/// ```
pub struct NavBar {
    state: Rc<RefCell<BarState>>,
    back_requested: Subject<()>,
    bindings: Vec<(Subject<StackChange>, SubscriptionId)>,
}

impl fmt::Debug for NavBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavBar")
            .field("state", &self.state.borrow())
            .field("bound", &!self.bindings.is_empty())
            .finish_non_exhaustive()
    }
}

impl NavBar {
    /// Create an unbound bar that shows `first_title` for untitled frames.
    pub fn new(first_title: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(BarState {
                first_title: first_title.into(),
                ..BarState::default()
            })),
            back_requested: Subject::new(),
            bindings: Vec::new(),
        }
    }

    /// Follow `events`, starting from `current`. Replaces any previous binding.
    pub fn bind(&mut self, events: &StackEvents, current: &StackChange) {
        self.unbind();
        self.state.borrow_mut().apply(current);
        let state = Rc::downgrade(&self.state);
        let follow: Handler<StackChange> = handler(move |n: &Notice<'_, StackChange>| {
            if let Some(state) = state.upgrade() {
                state.borrow_mut().apply(n.data);
            }
        });
        self.bindings = subscribe_navigation(events, &follow);
    }

    /// Stop following the stack.
    pub fn unbind(&mut self) {
        for (subject, id) in self.bindings.drain(..) {
            subject.unsubscribe(id);
        }
    }

    /// Returns true while the bar follows a stack.
    pub fn is_bound(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// The current frame's title, or the first title if it has none.
    pub fn title(&self) -> String {
        let state = self.state.borrow();
        state
            .title
            .clone()
            .unwrap_or_else(|| state.first_title.clone())
    }

    /// Override the displayed title until the next navigation event.
    pub fn set_title(&mut self, title: Option<String>) {
        self.state.borrow_mut().title = title;
    }

    /// Returns true when the back button should be shown.
    pub fn back_visible(&self) -> bool {
        self.state.borrow().depth > 1
    }

    /// Fires when the back button is pressed.
    pub fn back_requested(&self) -> &Subject<()> {
        &self.back_requested
    }

    /// Press the back button. Does nothing while it is hidden.
    pub fn back(&self) -> bool {
        if !self.back_visible() {
            return false;
        }
        self.back_requested.fire(());
        true
    }
}

impl Drop for NavBar {
    fn drop(&mut self) {
        self.unbind();
    }
}
