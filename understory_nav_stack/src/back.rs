// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Holding an exclusive capture on the back signal.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use understory_signal::{GestureKind, Handler, Notice, Subject, SubscriptionId, handler};

/// A capture on a back signal that can be taken and given back repeatedly.
///
/// The capture is held at most once, no matter how often [`set`](Self::set) is called with
/// `true`. Dropping a `BackCapture` releases it.
pub struct BackCapture {
    signal: Subject<GestureKind>,
    handler: Handler<GestureKind>,
    held: Option<SubscriptionId>,
}

impl fmt::Debug for BackCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackCapture")
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

impl BackCapture {
    /// Prepare a capture of `signal` that runs `handler`. Nothing is captured yet.
    pub fn new(signal: &Subject<GestureKind>, handler: Handler<GestureKind>) -> Self {
        Self {
            signal: signal.clone(),
            handler,
            held: None,
        }
    }

    /// Returns true while the capture is held.
    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    /// Take (`true`) or release (`false`) the capture.
    pub fn set(&mut self, hold: bool) {
        match (hold, self.held) {
            (true, None) => self.held = Some(self.signal.capture(self.handler.clone())),
            (false, Some(id)) => {
                self.held = None;
                self.signal.release(id);
            }
            _ => {}
        }
    }
}

impl Drop for BackCapture {
    fn drop(&mut self) {
        self.set(false);
    }
}

/// A back handler that runs `action` on the value behind a weak reference.
///
/// The handler does nothing once the value is gone, and skips the gesture when the value is
/// already borrowed (a back gesture delivered while the component is mid-operation).
pub fn weak_handler<T: 'static>(
    target: &Rc<RefCell<T>>,
    action: impl Fn(&mut T) + 'static,
) -> Handler<GestureKind> {
    let weak = Rc::downgrade(target);
    handler(move |_: &Notice<'_, GestureKind>| {
        let Some(cell) = weak.upgrade() else {
            return;
        };
        let Ok(mut guard) = cell.try_borrow_mut() else {
            #[cfg(feature = "tracing")]
            tracing::trace!("back gesture skipped: target busy");
            return;
        };
        action(&mut *guard);
    })
}
