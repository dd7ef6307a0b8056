// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_signal --heading-base-level=0

//! Understory Signal: publish/subscribe subjects with exclusive capture.
//!
//! ## Overview
//!
//! A [`Subject`] is one event source. Components subscribe handlers to it and fire it when
//! something happens. Two things set it apart from a plain observer list:
//!
//! - **Capture.** [`Subject::capture`] pushes an exclusive handler in front of everyone else.
//!   While it is held, [`Subject::fire`] invokes only that handler. Captures stack: the most
//!   recent one wins, which gives modal UI a natural way to steal a global signal such as the
//!   hardware back button and give it back on release.
//! - **Resume.** A capturing handler can pass the event on with [`Subject::resume`], which
//!   continues from the next position in the dispatch order.
//!
//! [`Gestures`] bundles the application-wide subjects (back, resize, …) that platform code feeds
//! and components capture. It is an ordinary value created by your composition root, not a
//! global.
//!
//! ## Failure semantics
//!
//! Firing with no subscribers, unsubscribing an unknown handler, and resuming without a
//! stopped dispatch are no-ops. Panics raised by handlers are not caught; isolate subscribers
//! in a wrapping layer if you need that.
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_signal::{handler, GestureKind, Gestures, Notice};
//!
//! let gestures = Gestures::new();
//! let pops = Rc::new(Cell::new(0));
//!
//! // A navigation stack listens for back.
//! let p = pops.clone();
//! gestures.back.subscribe(handler(move |_: &Notice<'_, GestureKind>| p.set(p.get() + 1)));
//!
//! // A popup captures it while shown, then passes the event along.
//! let popup = gestures.back.capture(handler(|n: &Notice<'_, GestureKind>| {
//!     n.subject.resume(*n.data);
//! }));
//! gestures.emit(GestureKind::Back);
//! assert_eq!(pops.get(), 1);
//!
//! gestures.back.release(popup);
//! gestures.emit(GestureKind::Back);
//! assert_eq!(pops.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod gestures;
pub mod subject;

pub use gestures::{BackGuard, Extent, GestureKind, Gestures};
pub use subject::{Handler, Notice, OwnerId, Subject, SubscriptionId, handler};
