// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: identifiers, widget classes, and local geometry.

use kurbo::{Insets, Rect, Vec2};

/// Identifier for a view in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier for a controller attached to the tree.
///
/// Controllers are never removed, so the identifier is a plain index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ControllerId(pub(crate) u32);

impl ControllerId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A link in the owner chain: either a view or the controller that owns one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Responder {
    /// A view in the tree.
    View(NodeId),
    /// A controller attached with [`ViewTree::add_controller`](crate::ViewTree::add_controller).
    Controller(ControllerId),
}

/// Runtime type tag carried by every view and controller.
///
/// The default [`WidgetClass::is_a`] is plain equality. Override it to model a
/// class hierarchy, for example so that a table view also answers to a
/// request for a scroll view.
///
/// ```rust
/// use loupe_view_tree::WidgetClass;
///
/// #[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// enum Class {
///     View,
///     ScrollView,
///     TableView,
/// }
///
/// impl WidgetClass for Class {
///     fn is_a(self, class: Self) -> bool {
///         match class {
///             Self::View => true,
///             Self::ScrollView => matches!(self, Self::ScrollView | Self::TableView),
///             Self::TableView => self == Self::TableView,
///         }
///     }
/// }
///
/// assert!(Class::TableView.is_a(Class::ScrollView));
/// assert!(!Class::ScrollView.is_a(Class::TableView));
/// ```
pub trait WidgetClass: Copy + Eq + core::fmt::Debug {
    /// Returns true if a widget of class `self` can be used where `class` is requested.
    fn is_a(self, class: Self) -> bool {
        self == class
    }
}

/// Local data for a view.
#[derive(Clone, Debug)]
pub struct LocalView<K> {
    /// Runtime class of the view.
    pub kind: K,
    /// Frame in the parent's content space (origin and size).
    pub frame: Rect,
    /// Scroll offset applied to children; a child at local origin `p` sits at
    /// `p - content_offset` in this view's frame space.
    pub content_offset: Vec2,
    /// Platform-reported alignment insets (the part of the frame that is
    /// decoration rather than content).
    pub alignment_insets: Insets,
}

impl<K> LocalView<K> {
    /// Create a view of class `kind` with the given frame and no offset or insets.
    pub fn new(kind: K, frame: Rect) -> Self {
        Self {
            kind,
            frame,
            content_offset: Vec2::ZERO,
            alignment_insets: Insets::ZERO,
        }
    }
}
