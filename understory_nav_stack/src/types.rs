// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the navigation stack: frames, transition tags, and events.

use alloc::string::String;

use understory_signal::Subject;

/// A unit of navigation content.
///
/// All hooks are optional. The stack calls [`activate`](Self::activate) every time the frame
/// becomes current and [`deactivate`](Self::deactivate) when it is removed from the stack.
pub trait Frame {
    /// The frame became the current one.
    fn activate(&mut self) {}

    /// The frame was removed from the stack.
    fn deactivate(&mut self) {}

    /// Title shown by a navigation bar.
    fn title(&self) -> Option<&str> {
        None
    }
}

/// Direction tag applied to nodes while they slide.
///
/// The incoming node starts tagged, then the tag moves to the outgoing node: a host maps
/// `Next` to "offscreen after" and `Prev` to "offscreen before" and lets its transition
/// animate the change.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionTag {
    /// Forward navigation (push, forward).
    Next,
    /// Backward navigation (pop, back, home).
    Prev,
}

/// Snapshot of the stack carried by navigation events.
///
/// Subscribers get everything they usually need without reaching back into the stack, which
/// is still mutably borrowed while its events fire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StackChange {
    /// Index of the current frame.
    pub index: usize,
    /// Number of frames on the stack.
    pub depth: usize,
    /// Title of the current frame.
    pub title: Option<String>,
}

/// Events produced by a [`NavigationStack`](crate::NavigationStack).
#[derive(Clone, Debug, Default)]
pub struct StackEvents {
    /// A frame was pushed.
    pub push: Subject<StackChange>,
    /// A frame was popped, or `home` truncated the stack.
    pub pop: Subject<StackChange>,
    /// `home` returned to the root.
    pub home: Subject<StackChange>,
    /// `forward` moved up the existing stack.
    pub forward: Subject<StackChange>,
    /// `back` moved down the existing stack.
    pub back: Subject<StackChange>,
    /// The stack became visible.
    pub show: Subject<()>,
    /// The stack was hidden.
    pub hide: Subject<()>,
}
