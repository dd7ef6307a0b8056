// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subjects: ordered subscribers, a capture stack, and a resume cursor.
//!
//! ## Dispatch order
//!
//! A [`Subject`] keeps plain subscribers in an ordered list and exclusive captures in a LIFO
//! stack. Dispatch walks the captures from newest to oldest, then the plain subscribers from
//! oldest to newest:
//!
//! ```text
//! [capture N, …, capture 1] ++ [subscriber 1, …, subscriber M]
//! ```
//!
//! Dispatch stops right after the first exclusive entry it invokes and remembers the next
//! position. [`Subject::resume`] continues from there, so a capturing handler can decide to
//! pass the event along. The cursor counts positions in the dispatch order; it does not track
//! any particular subscriber.
//!
//! ## Re-entrancy
//!
//! Every `fire`/`resume` call walks its own snapshot of the dispatch order with its own
//! position. Handlers may fire the same subject again, subscribe, unsubscribe, capture or
//! release while they run. Entries removed mid-dispatch are skipped; entries added
//! mid-dispatch are first seen by the next dispatch.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Shared handler invoked for every delivered notice.
///
/// Handlers are compared by `Rc` identity in [`Subject::unsubscribe_handler`], so keep the
/// `Rc` around if you intend to unsubscribe that way.
pub type Handler<T, P = ()> = Rc<dyn Fn(&Notice<'_, T, P>)>;

/// Wrap a closure as a [`Handler`].
pub fn handler<T, P>(f: impl Fn(&Notice<'_, T, P>) + 'static) -> Handler<T, P> {
    Rc::new(f)
}

/// Handle returned by subscribe and capture calls.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Identity of the object a subscription acts on behalf of.
///
/// Two subscriptions may share a handler and differ only by owner;
/// [`Subject::unsubscribe_handler`] uses the owner to tell them apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct OwnerId(usize);

impl OwnerId {
    /// An owner identity from an arbitrary number.
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// The identity of the allocation behind `rc`.
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>().addr())
    }
}

/// What a handler receives when a subject fires.
pub struct Notice<'a, T, P = ()> {
    /// Data passed to [`Subject::fire`] or [`Subject::resume`].
    pub data: &'a T,
    /// The subject being dispatched; call [`Subject::resume`] on it to continue a captured chain.
    pub subject: &'a Subject<T, P>,
    /// Fixed payload registered with the subscription.
    pub payload: Option<&'a P>,
    /// Owner registered with the subscription.
    pub owner: Option<OwnerId>,
    /// Owner the subject was created with, see [`Subject::with_owner`].
    pub subject_owner: Option<OwnerId>,
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for Notice<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notice")
            .field("data", self.data)
            .field("payload", &self.payload)
            .field("owner", &self.owner)
            .field("subject_owner", &self.subject_owner)
            .finish_non_exhaustive()
    }
}

struct Entry<T, P> {
    id: SubscriptionId,
    handler: Handler<T, P>,
    owner: Option<OwnerId>,
    payload: Option<P>,
    exclusive: bool,
    live: Cell<bool>,
}

impl<T, P> Entry<T, P> {
    fn matches(&self, handler: &Handler<T, P>, owner: Option<OwnerId>) -> bool {
        // An entry registered without an owner matches any owner.
        Rc::ptr_eq(&self.handler, handler) && (self.owner.is_none() || self.owner == owner)
    }
}

struct Inner<T, P> {
    subscribers: Vec<Rc<Entry<T, P>>>,
    // Top of the stack is the last element.
    captures: Vec<Rc<Entry<T, P>>>,
    cursor: Option<usize>,
    next_id: u64,
    owner: Option<OwnerId>,
}

impl<T, P> Inner<T, P> {
    fn next_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    fn dispatch_order(&self) -> Vec<Rc<Entry<T, P>>> {
        self.captures
            .iter()
            .rev()
            .chain(self.subscribers.iter())
            .cloned()
            .collect()
    }

    fn remove_where(&mut self, pred: impl Fn(&Entry<T, P>) -> bool) -> bool {
        // Search in dispatch order: captures (newest first), then subscribers.
        if let Some(i) = self.captures.iter().rposition(|e| pred(Rc::as_ref(e))) {
            self.captures.remove(i).live.set(false);
            return true;
        }
        if let Some(i) = self.subscribers.iter().position(|e| pred(Rc::as_ref(e))) {
            self.subscribers.remove(i).live.set(false);
            return true;
        }
        false
    }
}

/// A single event source with plain subscribers and exclusive captures.
///
/// `Subject` is a cheap handle: clones share the same subscriptions. It is meant for
/// single-threaded UI code and is neither `Send` nor `Sync`.
///
/// ## Example
///
/// ```
/// use core::cell::RefCell;
/// use std::rc::Rc;
/// use understory_signal::{handler, Subject};
///
/// let back: Subject<&'static str> = Subject::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let l = log.clone();
/// back.subscribe(handler(move |n| l.borrow_mut().push(("stack", *n.data))));
///
/// // A modal steals the signal while it is open.
/// let l = log.clone();
/// let modal = back.capture(handler(move |n| l.borrow_mut().push(("modal", *n.data))));
/// back.fire("back");
/// assert_eq!(*log.borrow(), [("modal", "back")]);
///
/// // Once released, the stack sees it again.
/// back.release(modal);
/// back.fire("back");
/// assert_eq!(log.borrow()[1], ("stack", "back"));
/// ```
pub struct Subject<T, P = ()> {
    inner: Rc<RefCell<Inner<T, P>>>,
}

impl<T, P> Clone for Subject<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, P> Default for Subject<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> fmt::Debug for Subject<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscribers", &inner.subscribers.len())
            .field("captures", &inner.captures.len())
            .field("cursor", &inner.cursor)
            .field("owner", &inner.owner)
            .finish_non_exhaustive()
    }
}

impl<T, P> Subject<T, P> {
    /// Create a subject with no subscribers.
    pub fn new() -> Self {
        Self::from_owner(None)
    }

    /// Create a subject that belongs to `owner`.
    ///
    /// Every notice it dispatches carries `owner` in [`Notice::subject_owner`], whatever the
    /// owner of the receiving subscription.
    pub fn with_owner(owner: OwnerId) -> Self {
        Self::from_owner(Some(owner))
    }

    fn from_owner(owner: Option<OwnerId>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                subscribers: Vec::new(),
                captures: Vec::new(),
                cursor: None,
                next_id: 1,
                owner,
            })),
        }
    }

    /// The owner given to [`with_owner`](Self::with_owner), if any.
    pub fn owner(&self) -> Option<OwnerId> {
        self.inner.borrow().owner
    }

    /// Returns true if both handles refer to the same subject.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Total number of subscriptions, captures included.
    pub fn len(&self) -> usize {
        let inner = self.inner.borrow();
        inner.subscribers.len() + inner.captures.len()
    }

    /// Returns true if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of active captures.
    pub fn capture_count(&self) -> usize {
        self.inner.borrow().captures.len()
    }

    /// Returns true if at least one capture is active.
    pub fn has_capture(&self) -> bool {
        self.capture_count() > 0
    }

    /// Position [`resume`](Self::resume) would continue from, if a dispatch stopped at a capture.
    pub fn resume_cursor(&self) -> Option<usize> {
        self.inner.borrow().cursor
    }

    /// Append a plain subscriber.
    pub fn subscribe(&self, handler: Handler<T, P>) -> SubscriptionId {
        self.subscribe_with(handler, None, None)
    }

    /// Append a plain subscriber with an owner identity and a fixed payload.
    pub fn subscribe_with(
        &self,
        handler: Handler<T, P>,
        owner: Option<OwnerId>,
        payload: Option<P>,
    ) -> SubscriptionId {
        self.insert(handler, owner, payload, false)
    }

    /// Push an exclusive capture to the front of the dispatch order.
    ///
    /// The most recent capture is dispatched first and stops the chain.
    pub fn capture(&self, handler: Handler<T, P>) -> SubscriptionId {
        self.capture_with(handler, None, None)
    }

    /// Push an exclusive capture with an owner identity and a fixed payload.
    pub fn capture_with(
        &self,
        handler: Handler<T, P>,
        owner: Option<OwnerId>,
        payload: Option<P>,
    ) -> SubscriptionId {
        self.insert(handler, owner, payload, true)
    }

    fn insert(
        &self,
        handler: Handler<T, P>,
        owner: Option<OwnerId>,
        payload: Option<P>,
        exclusive: bool,
    ) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        let entry = Rc::new(Entry {
            id,
            handler,
            owner,
            payload,
            exclusive,
            live: Cell::new(true),
        });
        if exclusive {
            inner.captures.push(entry);
        } else {
            inner.subscribers.push(entry);
        }
        id
    }

    /// Remove a subscription or capture by handle. Unknown handles are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().remove_where(|e| e.id == id)
    }

    /// Remove the first subscription, in dispatch order, registered with `handler`.
    ///
    /// If the subscription was registered with an owner, `owner` must match it; one
    /// registered without an owner matches regardless of `owner`.
    pub fn unsubscribe_handler(&self, handler: &Handler<T, P>, owner: Option<OwnerId>) -> bool {
        self.inner
            .borrow_mut()
            .remove_where(|e| e.matches(handler, owner))
    }

    /// Release a capture by handle. Same as [`unsubscribe`](Self::unsubscribe).
    pub fn release(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(id)
    }

    /// Release a capture by handler identity. Same as
    /// [`unsubscribe_handler`](Self::unsubscribe_handler).
    pub fn release_handler(&self, handler: &Handler<T, P>, owner: Option<OwnerId>) -> bool {
        self.unsubscribe_handler(handler, owner)
    }

    /// Dispatch `data` from the start of the dispatch order.
    ///
    /// Clears any pending resume cursor first. Returns the number of handlers invoked.
    /// Panics raised by handlers propagate to the caller.
    pub fn fire(&self, data: T) -> usize {
        self.inner.borrow_mut().cursor = None;
        self.dispatch(&data, 0)
    }

    /// Continue a dispatch that stopped at a capture.
    ///
    /// Does nothing (and returns 0) when no dispatch stopped since the last `fire` or
    /// `resume`. The cursor is consumed, so resuming twice does not deliver twice.
    pub fn resume(&self, data: T) -> usize {
        let Some(start) = self.inner.borrow_mut().cursor.take() else {
            return 0;
        };
        self.dispatch(&data, start)
    }

    fn dispatch(&self, data: &T, start: usize) -> usize {
        let (order, subject_owner) = {
            let inner = self.inner.borrow();
            (inner.dispatch_order(), inner.owner)
        };
        let mut invoked = 0;
        for (i, entry) in order.iter().enumerate().skip(start) {
            if !entry.live.get() {
                continue;
            }
            if entry.exclusive {
                // Set before the call so the capturing handler can resume from inside.
                self.inner.borrow_mut().cursor = Some(i + 1);
            }
            let notice = Notice {
                data,
                subject: self,
                payload: entry.payload.as_ref(),
                owner: entry.owner,
                subject_owner,
            };
            (entry.handler)(&notice);
            invoked += 1;
            if entry.exclusive {
                break;
            }
        }
        invoked
    }
}
