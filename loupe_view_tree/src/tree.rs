// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, layout, queries.

use alloc::{vec, vec::Vec};
use kurbo::{Insets, Point, Rect, Vec2};

use crate::error::TreeError;
use crate::layout::LayoutPass;
use crate::types::{ControllerId, LocalView, NodeId, Responder, WidgetClass};

/// Retained tree of native views.
///
/// Structure changes (insert, remove, reparent) are visible immediately.
/// Geometry changes (frames, content offsets) do **not** affect global frames
/// until [`ViewTree::commit`] runs the layout pass, which mirrors how a
/// native toolkit only reports final positions once layout has settled.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use loupe_view_tree::{LocalView, ViewTree, WidgetClass};
///
/// #[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// enum Class {
///     View,
///     TextField,
/// }
/// impl WidgetClass for Class {}
///
/// let mut tree = ViewTree::new();
/// let window = tree.insert_window(LocalView::new(
///     Class::View,
///     Rect::new(0.0, 0.0, 400.0, 300.0),
/// ));
/// let field = tree
///     .insert(
///         Some(window),
///         LocalView::new(Class::TextField, Rect::new(20.0, 30.0, 220.0, 60.0)),
///     )
///     .unwrap();
///
/// // Global frames only exist after a layout pass.
/// assert_eq!(tree.global_frame(field), None);
/// tree.commit();
/// assert_eq!(tree.global_frame(field), Some(Rect::new(20.0, 30.0, 220.0, 60.0)));
/// assert_eq!(tree.origin_in(field, window), Some(Point::new(20.0, 30.0)));
/// ```
pub struct ViewTree<K> {
    /// slots
    nodes: Vec<Option<Node<K>>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    controllers: Vec<Controller<K>>,
    epoch: u64,
}

impl<K: WidgetClass> core::fmt::Debug for ViewTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("ViewTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("controllers", &self.controllers.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl<K: WidgetClass> Default for ViewTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node<K> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalView<K>,
    window: bool,
    owner: Option<ControllerId>,
    /// Global frame as of the last commit; `None` until first laid out.
    global: Option<Rect>,
}

impl<K> Node<K> {
    fn new(generation: u32, local: LocalView<K>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            window: false,
            owner: None,
            global: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Controller<K> {
    kind: K,
    view: NodeId,
    parent: Option<ControllerId>,
}

impl<K: WidgetClass> ViewTree<K> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            controllers: Vec::new(),
            epoch: 0,
        }
    }

    /// Insert a new view as the last child of `parent` (or as a detached root if `None`).
    ///
    /// The view is live immediately but has no global frame until the next
    /// [`ViewTree::commit`].
    pub fn insert(
        &mut self,
        parent: Option<NodeId>,
        local: LocalView<K>,
    ) -> Result<NodeId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleNode(p));
        }
        let id = self.alloc(local);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        Ok(id)
    }

    /// Insert a root view that is attached to a window (or scene).
    pub fn insert_window(&mut self, local: LocalView<K>) -> NodeId {
        let id = self.alloc(local);
        self.node_mut(id).window = true;
        id
    }

    /// Attach or detach a root view from its window.
    ///
    /// Tearing down a window leaves its views alive but unreachable from any
    /// window, which is how a pending search learns it should give up.
    pub fn set_window(&mut self, id: NodeId, attached: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.window = attached;
        }
    }

    /// Remove a view and its subtree.
    ///
    /// Identifiers for the removed views become stale immediately.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes[cur.idx()].take() else {
                continue;
            };
            stack.extend(node.children);
            self.free_list.push(cur.idx());
        }
    }

    /// Move `id` under `new_parent` (or make it a detached root when `None`).
    ///
    /// Fails without changing anything if either view is stale or if
    /// `new_parent` is `id` itself or one of its descendants.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleNode(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::StaleNode(p));
            }
            let mut cur = Some(p);
            while let Some(c) = cur {
                if c == id {
                    return Err(TreeError::Cycle {
                        node: id,
                        parent: p,
                    });
                }
                cur = self.parent_of(c);
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        Ok(())
    }

    /// Update the frame of a view in its parent's content space.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.frame = frame;
        }
    }

    /// Update the scroll offset applied to a view's children.
    pub fn set_content_offset(&mut self, id: NodeId, offset: Vec2) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.content_offset = offset;
        }
    }

    /// Update the alignment insets reported for a view.
    pub fn set_alignment_insets(&mut self, id: NodeId, insets: Insets) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.alignment_insets = insets;
        }
    }

    /// Run the layout pass.
    ///
    /// Recomputes the global frame of every live view reachable from a root
    /// and reports which views moved. A child's global origin is its parent's
    /// global origin, minus the parent's content offset, plus the child's
    /// local origin.
    pub fn commit(&mut self) -> LayoutPass {
        self.epoch += 1;
        let mut pass = LayoutPass {
            epoch: self.epoch,
            moved: Vec::new(),
        };
        let roots: Vec<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId uses 32-bit indices by design."
                    )]
                    Some(NodeId::new(i as u32, n.generation))
                }
                _ => None,
            })
            .collect();

        for root in roots {
            let mut stack = vec![(root, Point::ZERO)];
            while let Some((id, content_origin)) = stack.pop() {
                let node = self.node_mut(id);
                let frame = node.local.frame;
                let origin = content_origin + frame.origin().to_vec2();
                let global = Rect::from_origin_size(origin, frame.size());
                if node.global != Some(global) {
                    node.global = Some(global);
                    pass.moved.push(id);
                }
                let child_origin = global.origin() - node.local.content_offset;
                stack.extend(node.children.iter().rev().map(|&c| (c, child_origin)));
            }
        }
        log::trace!(
            "layout pass {} moved {} views",
            pass.epoch,
            pass.moved.len()
        );
        pass
    }

    /// Attach a controller of class `kind` that owns `view`.
    ///
    /// `parent` is the controller that contains this one, if any.
    pub fn add_controller(
        &mut self,
        kind: K,
        view: NodeId,
        parent: Option<ControllerId>,
    ) -> Result<ControllerId, TreeError> {
        if !self.is_alive(view) {
            return Err(TreeError::StaleNode(view));
        }
        if let Some(p) = parent
            && p.idx() >= self.controllers.len()
        {
            return Err(TreeError::UnknownController(p));
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ControllerId uses 32-bit indices by design."
        )]
        let id = ControllerId(self.controllers.len() as u32);
        self.controllers.push(Controller { kind, view, parent });
        self.node_mut(view).owner = Some(id);
        Ok(id)
    }

    /// Returns the next link of the owner chain after `responder`.
    ///
    /// A view hands over to the controller that owns it, otherwise to its
    /// parent view. A controller hands over to the parent of its view,
    /// otherwise to its parent controller.
    pub fn next_responder(&self, responder: Responder) -> Option<Responder> {
        match responder {
            Responder::View(id) => {
                if !self.is_alive(id) {
                    return None;
                }
                let node = self.node(id);
                node.owner
                    .map(Responder::Controller)
                    .or_else(|| node.parent.map(Responder::View))
            }
            Responder::Controller(c) => {
                let ctrl = self.controllers.get(c.idx())?;
                self.parent_of(ctrl.view)
                    .map(Responder::View)
                    .or_else(|| ctrl.parent.map(Responder::Controller))
            }
        }
    }

    /// Returns the class of a controller.
    pub fn controller_kind(&self, id: ControllerId) -> Option<K> {
        self.controllers.get(id.idx()).map(|c| c.kind)
    }

    /// Returns the view owned by a controller if it is still alive.
    pub fn controller_view(&self, id: ControllerId) -> Option<NodeId> {
        let view = self.controllers.get(id.idx())?.view;
        self.is_alive(view).then_some(view)
    }

    /// Returns the epoch of the last layout pass (0 before the first commit).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns true if `id` refers to a live view.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the class of a live view.
    pub fn kind_of(&self, id: NodeId) -> Option<K> {
        self.node_opt(id).map(|n| n.local.kind)
    }

    /// Returns the parent of a view, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a view in order, or an empty slice if it is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the local frame of a view, including uncommitted changes.
    pub fn local_frame(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.local.frame)
    }

    /// Returns the alignment insets of a view.
    pub fn alignment_insets(&self, id: NodeId) -> Option<Insets> {
        self.node_opt(id).map(|n| n.local.alignment_insets)
    }

    /// Returns true if `id` is a root attached to a window.
    pub fn is_window(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(|n| n.window)
    }

    /// Returns the window root above `id` (or `id` itself), or `None` if the
    /// view is stale or its root is not attached to a window.
    pub fn window_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut cur = id;
        while let Some(p) = self.parent_of(cur) {
            cur = p;
        }
        self.is_window(cur).then_some(cur)
    }

    /// Returns the global frame of a view as of the last [`ViewTree::commit`].
    pub fn global_frame(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).and_then(|n| n.global)
    }

    /// Converts the origin of `id` into the frame space of `space`.
    ///
    /// Both views must have been laid out.
    pub fn origin_in(&self, id: NodeId, space: NodeId) -> Option<Point> {
        let origin = self.global_frame(id)?.origin();
        let base = self.global_frame(space)?.origin();
        Some((origin - base).to_point())
    }

    // --- internals ---

    fn alloc(&mut self, local: LocalView<K>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<K>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<K> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
