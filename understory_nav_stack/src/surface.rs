// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendering surfaces consumed by the navigation stack.

use understory_scroller::ScrollSurface;

use crate::types::TransitionTag;

/// The container that displays the stack's nodes.
///
/// Nodes are opaque handles owned by the host. The stack mounts the node of each frame it
/// draws and unmounts the previous one once its transition finished.
///
/// Hosts must tolerate redundant calls: mounting a node that is already mounted raises it to
/// the top, and unmounting a node that is not mounted does nothing.
pub trait StackSurface {
    /// Handle to a displayed node.
    type Node: Clone + PartialEq;

    /// Attach `node` on top of the container.
    fn mount(&mut self, node: &Self::Node);

    /// Detach `node`.
    fn unmount(&mut self, node: &Self::Node);

    /// Tag `node` with a transition direction, or clear its tag.
    fn set_transition(&mut self, node: &Self::Node, tag: Option<TransitionTag>);

    /// Show or hide the whole stack.
    fn set_shown(&mut self, shown: bool);
}

/// Resolves the node that displays a frame.
pub trait FrameHost<F>: StackSurface {
    /// Prepare and return the node for `frame`, or `None` if it cannot be displayed.
    fn host(&mut self, frame: &F) -> Option<Self::Node>;
}

/// A scrollable container that can take over displaying a frame.
///
/// [`DualBufferNavigator`](crate::DualBufferNavigator) keeps two of these and alternates
/// between them so the outgoing frame keeps its scroll position while it slides away.
pub trait BufferSurface<F>: ScrollSurface {
    /// Handle to the container node, as mounted by the outer [`StackSurface`].
    type Node: Clone + PartialEq;

    /// Make `frame` the scrolled content.
    fn adopt(&mut self, frame: &F);

    /// The container node.
    fn node(&self) -> Self::Node;
}
