// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform tree contract the search is written against.

use kurbo::{Insets, Point, Size};

use crate::profile::BackendProfile;

/// Read-only view of a rendering backend's widget tree.
///
/// One implementation exists per backend. Implementations must re-read the
/// live tree on every call: the search may run long after it was scheduled
/// and the tree can be restructured in between.
pub trait TreeAdapter {
    /// Non-owning handle to a widget.
    type Node: Copy + Eq + core::fmt::Debug;
    /// Requested widget type.
    type Kind;
    /// Coordinate space that global frames are expressed in (a window's
    /// content view, a screen).
    type Space: Copy;

    /// Constants for this backend.
    fn profile(&self) -> &BackendProfile;

    /// Parent of `node`, or `None` at the root.
    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of `node` in tree order.
    fn children_of(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Returns true if `node` can be used where `kind` is requested.
    fn is_kind(&self, node: Self::Node, kind: &Self::Kind) -> bool;

    /// The global coordinate space `node` is displayed in, or `None` when the
    /// node is no longer attached to a window or scene.
    fn root_space(&self, node: Self::Node) -> Option<Self::Space>;

    /// Converts the origin of `node` into `space`.
    ///
    /// Returns `None` when the conversion is not possible right now, for
    /// example while `node` or `space` has not been laid out. Such nodes are
    /// never matched.
    fn origin_in(&self, node: Self::Node, space: Self::Space) -> Option<Point>;

    /// Size of `node`'s local frame.
    fn size_of(&self, node: Self::Node) -> Size;

    /// Decoration around `node`'s content. Only consulted when the profile
    /// supports alignment rectangles.
    fn alignment_insets(&self, node: Self::Node) -> Insets {
        let _ = node;
        Insets::ZERO
    }
}
