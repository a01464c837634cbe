// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree search coordinator.
//!
//! ## Traversal
//!
//! Starting at the anchor, climb one level at a time. At each level, search
//! the parent's subtree in pre-order (the parent itself first), skipping the
//! child that was just climbed out of. The first node that matches wins.
//!
//! The anchor's own subtree is never searched, and the walk ends at the root.
//! Nodes closer to the anchor in tree distance always win over nodes further
//! away, regardless of how well their frames fit.
//!
//! ## Matching
//!
//! A node matches when all of the following hold:
//!
//! 1. the adapter reports it as the requested kind;
//! 2. its global frame (with alignment insets removed when requested)
//!    satisfies the [`FramePredicate`];
//! 3. the optional side check accepts it.
//!
//! A side check rejection is not terminal; the walk continues past the node.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::adapter::TreeAdapter;
use crate::options::{FramePredicate, MatchOptions, build_predicate};

/// Extra acceptance test applied after the geometric rule.
pub type SideCheck<'a, A> = &'a dyn Fn(&A, <A as TreeAdapter>::Node) -> bool;

/// One search: what to look for and how to match it.
pub struct SearchRequest<'a, A: TreeAdapter> {
    /// Target rectangle in global coordinates (see [`crate::build_target_frame`]).
    pub target: Rect,
    /// Requested widget kind.
    pub kind: A::Kind,
    /// Match policy.
    pub options: MatchOptions,
    /// Optional side check.
    pub check: Option<SideCheck<'a, A>>,
}

impl<A: TreeAdapter> core::fmt::Debug for SearchRequest<'_, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SearchRequest")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("check", &self.check.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a, A: TreeAdapter> SearchRequest<'a, A> {
    /// Create a request without a side check.
    pub fn new(target: Rect, kind: A::Kind, options: MatchOptions) -> Self {
        Self {
            target,
            kind,
            options,
            check: None,
        }
    }

    /// Attach a side check.
    pub fn with_check(mut self, check: SideCheck<'a, A>) -> Self {
        self.check = Some(check);
        self
    }
}

/// Find the nearest node around `anchor` that matches `request`.
///
/// Returns `None` when the anchor is detached from any window, when the
/// target is empty, or when the climb reaches the root without a match.
/// None of these are errors; a later layout pass may succeed.
pub fn find_ancestor_match<A: TreeAdapter>(
    adapter: &A,
    anchor: A::Node,
    request: &SearchRequest<'_, A>,
) -> Option<A::Node> {
    let Some(space) = adapter.root_space(anchor) else {
        log::trace!("anchor {anchor:?} is detached; skipping search");
        return None;
    };
    if request.target.width() <= 0.0 || request.target.height() <= 0.0 {
        log::trace!("empty target {:?}; skipping search", request.target);
        return None;
    }
    let matcher = Matcher::new(adapter, space, request);

    let mut current = anchor;
    while let Some(parent) = adapter.parent_of(current) {
        log::trace!("searching under {parent:?} excluding {current:?}");
        if let Some(found) = matcher.descend(parent, Some(current)) {
            log::debug!("found {found:?} for anchor {anchor:?}");
            return Some(found);
        }
        current = parent;
    }
    None
}

/// Search `root` and its subtree in pre-order.
///
/// `excluding` is skipped among `root`'s immediate children only; deeper
/// nodes are never excluded.
pub fn find_descendant_match<A: TreeAdapter>(
    adapter: &A,
    space: A::Space,
    root: A::Node,
    excluding: Option<A::Node>,
    request: &SearchRequest<'_, A>,
) -> Option<A::Node> {
    Matcher::new(adapter, space, request).descend(root, excluding)
}

/// Returns true if `node` satisfies `request` in `space`.
pub fn matches<A: TreeAdapter>(
    adapter: &A,
    space: A::Space,
    node: A::Node,
    request: &SearchRequest<'_, A>,
) -> bool {
    Matcher::new(adapter, space, request).test(node)
}

/// Global frame of `node` in `space`, as compared against the target.
///
/// With [`MatchOptions::REMOVE_ALIGNMENT_RECT`] on a backend that reports
/// alignment insets, the insets are stripped from every edge. Returns `None`
/// when the adapter cannot place `node` in `space`.
pub fn global_frame<A: TreeAdapter>(
    adapter: &A,
    space: A::Space,
    node: A::Node,
    options: MatchOptions,
) -> Option<Rect> {
    let origin = adapter.origin_in(node, space)?;
    let frame = Rect::from_origin_size(origin, adapter.size_of(node));
    if options.contains(MatchOptions::REMOVE_ALIGNMENT_RECT) && adapter.profile().alignment_rect {
        let r = adapter.alignment_insets(node);
        Some(Rect::new(
            frame.x0 + r.x0,
            frame.y0 + r.y0,
            frame.x1 - r.x1,
            frame.y1 - r.y1,
        ))
    } else {
        Some(frame)
    }
}

struct Matcher<'r, 'a, A: TreeAdapter> {
    adapter: &'r A,
    space: A::Space,
    predicate: FramePredicate,
    request: &'r SearchRequest<'a, A>,
}

impl<'r, 'a, A: TreeAdapter> Matcher<'r, 'a, A> {
    fn new(adapter: &'r A, space: A::Space, request: &'r SearchRequest<'a, A>) -> Self {
        Self {
            adapter,
            space,
            predicate: build_predicate(
                request.options,
                request.target,
                adapter.profile().tolerance,
            ),
            request,
        }
    }

    fn test(&self, node: A::Node) -> bool {
        if !self.adapter.is_kind(node, &self.request.kind) {
            return false;
        }
        let Some(frame) = global_frame(self.adapter, self.space, node, self.request.options) else {
            log::trace!("{node:?} has no frame in the search space; skipping");
            return false;
        };
        if !self.predicate.accepts(frame) {
            return false;
        }
        self.request
            .check
            .is_none_or(|check| check(self.adapter, node))
    }

    fn descend(&self, root: A::Node, excluding: Option<A::Node>) -> Option<A::Node> {
        if self.test(root) {
            return Some(root);
        }
        let mut stack = Vec::new();
        self.push_children(&mut stack, root, excluding);
        while let Some(node) = stack.pop() {
            if self.test(node) {
                return Some(node);
            }
            self.push_children(&mut stack, node, None);
        }
        None
    }

    /// Push children so that the first child is popped first.
    fn push_children(&self, stack: &mut Vec<A::Node>, node: A::Node, excluding: Option<A::Node>) {
        let start = stack.len();
        stack.extend(
            self.adapter
                .children_of(node)
                .filter(|&child| Some(child) != excluding),
        );
        stack[start..].reverse();
    }
}
