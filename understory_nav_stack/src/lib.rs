// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_nav_stack --heading-base-level=0

//! Understory Nav Stack: a navigation stack with animated transitions and back arbitration.
//!
//! ## Overview
//!
//! [`NavigationStack`] keeps an ordered list of frames and the index of the current one. It
//! supports `push`, `pop`, `home`, and non-destructive `forward`/`back` moves, and drives a
//! host [`StackSurface`] through a two-phase slide:
//!
//! 1. The incoming node is tagged with its origin ([`TransitionTag`]) and mounted.
//! 2. Shortly after, the tag moves from the incoming node to the outgoing one, so the host's
//!    transitions animate both.
//! 3. When the host reports [`transition_end`](NavigationStack::transition_end) (or after a
//!    fallback), the outgoing node is unmounted.
//!
//! Every deferred step runs from [`advance_to`](NavigationStack::advance_to); the host owns
//! the clock.
//!
//! While it can go back, a stack bound with [`NavigationStack::bind_back`] holds a capture on
//! the shared back signal of [`understory_signal::Gestures`]. A [`Popup`] shown on top of it
//! captures later and therefore wins; once the popup is hidden the stack gets the back
//! gesture again.
//!
//! [`DualBufferNavigator`] layers two [`understory_scroller::MomentumScroller`]s on a stack:
//! each navigation switches to the other scroller, so the outgoing frame keeps its scroll
//! position while a pushed frame starts at the top. [`NavBar`] follows a stack's events to
//! show the current title and the back button.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_nav_stack::{Frame, FrameHost, NavigationStack, Popup, StackSurface, TransitionTag};
//! use understory_signal::Gestures;
//!
//! #[derive(Debug, PartialEq)]
//! struct Page(&'static str);
//! impl Frame for Page {}
//!
//! #[derive(Default)]
//! struct Host {
//!     mounted: Vec<&'static str>,
//! }
//!
//! impl StackSurface for Host {
//!     type Node = &'static str;
//!     fn mount(&mut self, node: &&'static str) {
//!         self.mounted.retain(|n| n != node);
//!         self.mounted.push(node);
//!     }
//!     fn unmount(&mut self, node: &&'static str) { self.mounted.retain(|n| n != node); }
//!     fn set_transition(&mut self, _: &&'static str, _: Option<TransitionTag>) {}
//!     fn set_shown(&mut self, _: bool) {}
//! }
//!
//! impl FrameHost<Page> for Host {
//!     fn host(&mut self, page: &Page) -> Option<&'static str> { Some(page.0) }
//! }
//!
//! let gestures = Gestures::new();
//! let stack = Rc::new(RefCell::new(NavigationStack::new(Host::default())));
//! NavigationStack::bind_back(&stack, &gestures);
//! let popup = Rc::new(RefCell::new(Popup::new("menu")));
//! Popup::bind_back(&popup, &gestures);
//!
//! stack.borrow_mut().push(Page("inbox"));
//! stack.borrow_mut().push(Page("message"));
//! popup.borrow_mut().show();
//!
//! // The popup captured last, so it handles the first back gesture.
//! assert!(gestures.emit_back());
//! assert!(!popup.borrow().is_visible());
//! assert_eq!(stack.borrow().len(), 2);
//!
//! // Now the stack pops.
//! assert!(gestures.emit_back());
//! assert_eq!(stack.borrow().len(), 1);
//! assert!(!gestures.emit_back());
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: emit `tracing` events for navigation and transition stages.
//! - `serde`: derive `Serialize`/`Deserialize` for [`StackConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod back;
pub mod buffered;
pub mod config;
pub mod navbar;
pub mod popup;
pub mod stack;
pub mod surface;
pub mod types;

pub use back::{BackCapture, weak_handler};
pub use buffered::{BufferedSurface, DualBufferNavigator};
pub use config::{ConfigError, StackConfig};
pub use navbar::NavBar;
pub use popup::{Popup, PopupEvents};
pub use stack::{NavigationStack, SharedStack, subscribe_navigation};
pub use surface::{BufferSurface, FrameHost, StackSurface};
pub use types::{Frame, StackChange, StackEvents, TransitionTag};
