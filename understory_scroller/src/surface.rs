// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface a scroller drives.

use kurbo::{Rect, Size, Vec2};

use crate::types::Motion;

/// A clipped viewport over a larger content node.
///
/// The scroller never touches rendering directly: it measures through this trait and pushes
/// offsets back through [`apply_offset`](Self::apply_offset). Offsets are translations of
/// the content relative to the viewport, so both components are `<= 0` at rest.
pub trait ScrollSurface {
    /// Key identifying a child item of the content.
    type ItemKey;

    /// Size of the visible viewport, or `None` if the surface is not attached.
    fn viewport_size(&self) -> Option<Size>;

    /// Size of the scrolled content, or `None` if there is nothing to scroll.
    fn content_size(&self) -> Option<Size>;

    /// Bounds of a child item in content coordinates.
    fn item_bounds(&self, key: &Self::ItemKey) -> Option<Rect>;

    /// Move the content to `offset`, animating as described by `motion`.
    fn apply_offset(&mut self, offset: Vec2, motion: Motion);
}
