// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application-wide gesture signals.
//!
//! [`Gestures`] groups the subjects that platform code feeds (hardware back button, escape
//! key, window resize, …) so components can subscribe to or capture them. Create one in your
//! composition root and hand clones of the subjects to the components that need them; there is
//! no global instance.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::subject::Subject;

/// Which global gesture fired.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GestureKind {
    /// Hardware back button, escape key, or an OS back gesture.
    Back,
    /// Forward navigation.
    Forward,
    /// The default action (return/enter).
    Default,
    /// Home navigation.
    Home,
    /// The application is closing.
    Close,
    /// Directional input.
    Up,
    /// Directional input.
    Down,
    /// Directional input.
    Left,
    /// Directional input.
    Right,
    /// The application window gained focus.
    Activate,
    /// The application window lost focus.
    Deactivate,
}

/// Size of the application viewport, carried by the resize signal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Extent {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

/// Shared flag telling platform code whether the app will handle a back gesture itself.
///
/// A navigation stack raises it while it can go back; platform glue checks it before letting
/// the OS act on the back button.
#[derive(Clone, Debug, Default)]
pub struct BackGuard(Rc<Cell<bool>>);

impl BackGuard {
    /// Set whether the application consumes back gestures.
    pub fn set(&self, consume: bool) {
        self.0.set(consume);
    }

    /// Returns true if the application consumes back gestures.
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// The set of global gesture subjects.
#[derive(Clone, Debug, Default)]
pub struct Gestures {
    /// Back button / escape.
    pub back: Subject<GestureKind>,
    /// Forward navigation.
    pub forward: Subject<GestureKind>,
    /// Return/enter.
    pub default_action: Subject<GestureKind>,
    /// Home navigation.
    pub home: Subject<GestureKind>,
    /// Application close.
    pub close: Subject<GestureKind>,
    /// Directional up.
    pub up: Subject<GestureKind>,
    /// Directional down.
    pub down: Subject<GestureKind>,
    /// Directional left.
    pub left: Subject<GestureKind>,
    /// Directional right.
    pub right: Subject<GestureKind>,
    /// Window focus gained.
    pub activate: Subject<GestureKind>,
    /// Window focus lost.
    pub deactivate: Subject<GestureKind>,
    /// Viewport size changed.
    pub resize: Subject<Extent>,
    /// Whether back gestures are currently consumed by the application.
    pub back_guard: BackGuard,
}

impl Gestures {
    /// Create a hub with fresh subjects.
    pub fn new() -> Self {
        Self::default()
    }

    /// The subject that carries `kind`.
    pub fn signal(&self, kind: GestureKind) -> &Subject<GestureKind> {
        match kind {
            GestureKind::Back => &self.back,
            GestureKind::Forward => &self.forward,
            GestureKind::Default => &self.default_action,
            GestureKind::Home => &self.home,
            GestureKind::Close => &self.close,
            GestureKind::Up => &self.up,
            GestureKind::Down => &self.down,
            GestureKind::Left => &self.left,
            GestureKind::Right => &self.right,
            GestureKind::Activate => &self.activate,
            GestureKind::Deactivate => &self.deactivate,
        }
    }

    /// Fire the subject for `kind`. Returns the number of handlers invoked.
    pub fn emit(&self, kind: GestureKind) -> usize {
        self.signal(kind).fire(kind)
    }

    /// Fire the back signal and report whether the platform should suppress its own back action.
    ///
    /// The guard is sampled before dispatch, since handling the gesture may change it.
    pub fn emit_back(&self) -> bool {
        let consume = self.back_guard.get();
        self.back.fire(GestureKind::Back);
        consume
    }

    /// Fire the resize signal.
    pub fn emit_resize(&self, extent: Extent) -> usize {
        self.resize.fire(extent)
    }
}
