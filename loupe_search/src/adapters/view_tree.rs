// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Loupe View Tree.
//!
//! ## Feature
//!
//! Enable with `view_tree_adapter`.
//!
//! ## Notes
//!
//! - The search space of a view is the window root above it; views under a
//!   detached root have no space and are never searched.
//! - Only views that have been through at least one layout pass are
//!   candidates. Frames are read from the last [`ViewTree::commit`], so a
//!   frame edited after that pass is not seen until the next one.
//! - [`WidgetClass::is_a`] decides whether a view satisfies the requested kind.

use kurbo::{Insets, Point, Size};
use loupe_view_tree::{ControllerId, NodeId, Responder, ViewTree, WidgetClass};

use crate::adapter::TreeAdapter;
use crate::owner::{OwnerChain, find_owner};
use crate::profile::BackendProfile;

/// A [`ViewTree`] paired with the profile of the backend it mirrors.
pub struct ViewTreeAdapter<K> {
    tree: ViewTree<K>,
    profile: BackendProfile,
}

impl<K: WidgetClass> core::fmt::Debug for ViewTreeAdapter<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewTreeAdapter")
            .field("tree", &self.tree)
            .field("profile", &self.profile.kind)
            .finish()
    }
}

impl<K: WidgetClass> ViewTreeAdapter<K> {
    /// Wrap `tree` for searching with `profile`.
    pub fn new(tree: ViewTree<K>, profile: BackendProfile) -> Self {
        Self { tree, profile }
    }

    /// The wrapped tree.
    pub fn tree(&self) -> &ViewTree<K> {
        &self.tree
    }

    /// The wrapped tree, for edits and layout passes between searches.
    pub fn tree_mut(&mut self) -> &mut ViewTree<K> {
        &mut self.tree
    }

    /// Unwrap the tree.
    pub fn into_inner(self) -> ViewTree<K> {
        self.tree
    }

    /// Find the nearest controller of class `kind` on the owner chain above `node`.
    pub fn controller_of(&self, node: NodeId, kind: K) -> Option<ControllerId> {
        find_owner(self, Responder::View(node), |r| match r {
            Responder::Controller(c)
                if self.tree.controller_kind(c).is_some_and(|k| k.is_a(kind)) =>
            {
                Some(c)
            }
            _ => None,
        })
    }
}

impl<K: WidgetClass> TreeAdapter for ViewTreeAdapter<K> {
    type Node = NodeId;
    type Kind = K;
    type Space = NodeId;

    fn profile(&self) -> &BackendProfile {
        &self.profile
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent_of(node)
    }

    fn children_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.children_of(node).iter().copied()
    }

    fn is_kind(&self, node: NodeId, kind: &K) -> bool {
        self.tree.global_frame(node).is_some()
            && self.tree.kind_of(node).is_some_and(|k| k.is_a(*kind))
    }

    fn root_space(&self, node: NodeId) -> Option<NodeId> {
        self.tree.window_of(node)
    }

    fn origin_in(&self, node: NodeId, space: NodeId) -> Option<Point> {
        self.tree.origin_in(node, space)
    }

    fn size_of(&self, node: NodeId) -> Size {
        self.tree
            .global_frame(node)
            .map(|r| r.size())
            .unwrap_or(Size::ZERO)
    }

    fn alignment_insets(&self, node: NodeId) -> Insets {
        self.tree.alignment_insets(node).unwrap_or(Insets::ZERO)
    }
}

impl<K: WidgetClass> OwnerChain for ViewTreeAdapter<K> {
    type Owner = Responder;

    fn next_owner(&self, owner: Responder) -> Option<Responder> {
        self.tree.next_responder(owner)
    }
}
