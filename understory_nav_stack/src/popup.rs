// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal content that claims the back gesture while shown.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use understory_schedule::{Schedule, TimerToken};
use understory_signal::{Gestures, Subject};

use crate::back::{BackCapture, weak_handler};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tick {
    Show,
    Hide,
}

/// Events produced by a [`Popup`].
#[derive(Clone, Debug, Default)]
pub struct PopupEvents {
    /// The popup was shown.
    pub show: Subject<()>,
    /// The popup was hidden.
    pub hide: Subject<()>,
}

/// A modal wrapper around some content.
///
/// While shown, a bound popup holds the newest capture on the back signal, so a back gesture
/// hides the popup instead of reaching whatever captured the signal before it. The `show` and
/// `hide` events fire after the default deferral of the clock (see
/// [`Schedule::defer`]); only the latest of a quick show/hide sequence fires.
pub struct Popup<C> {
    content: C,
    visible: bool,
    schedule: Schedule<Tick>,
    pending: Option<TimerToken>,
    events: PopupEvents,
    back: Option<BackCapture>,
}

impl<C: fmt::Debug> fmt::Debug for Popup<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popup")
            .field("content", &self.content)
            .field("visible", &self.visible)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

impl<C> Popup<C> {
    /// Wrap `content` in a hidden popup.
    pub fn new(content: C) -> Self {
        Self {
            content,
            visible: false,
            schedule: Schedule::new(),
            pending: None,
            events: PopupEvents::default(),
            back: None,
        }
    }

    /// The wrapped content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Mutable access to the wrapped content.
    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Returns true while the popup is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Event subjects.
    pub fn events(&self) -> &PopupEvents {
        &self.events
    }

    /// Show the popup and claim the back signal. Returns false if already shown.
    pub fn show(&mut self) -> bool {
        self.set_visible(true)
    }

    /// Hide the popup and give the back signal back. Returns false if already hidden.
    pub fn hide(&mut self) -> bool {
        self.set_visible(false)
    }

    /// Use `capture` to claim the back signal while shown.
    pub fn attach_back(&mut self, mut capture: BackCapture) {
        capture.set(self.visible);
        self.back = Some(capture);
    }

    /// Let a shared popup hide itself on the back gesture.
    pub fn bind_back(this: &Rc<RefCell<Self>>, gestures: &Gestures)
    where
        C: 'static,
    {
        let capture = BackCapture::new(
            &gestures.back,
            weak_handler(this, |popup: &mut Self| {
                popup.hide();
            }),
        );
        this.borrow_mut().attach_back(capture);
    }

    /// Fire the deferred events due at or before `now`.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((_, tick)) = self.schedule.pop_due(now) {
            self.pending = None;
            match tick {
                Tick::Show => self.events.show.fire(()),
                Tick::Hide => self.events.hide.fire(()),
            };
        }
    }

    /// When the next deferred event is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.schedule.next_deadline()
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        if let Some(back) = &mut self.back {
            back.set(visible);
        }
        self.schedule.cancel_slot(&mut self.pending);
        let tick = if visible { Tick::Show } else { Tick::Hide };
        self.pending = Some(self.schedule.defer(tick));
        #[cfg(feature = "tracing")]
        tracing::debug!(visible, "popup visibility changed");
        true
    }
}
