// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markers and deferred inspections.
//!
//! A marker is an invisible probe the declarative layer inserts next to the
//! element it wants to customize. Every layout pass hands the marker a fresh
//! [`Placement`]; the search itself has to wait until that pass has fully
//! settled, so placements are queued and [`InspectionQueue::run`] executes
//! them on the next turn of the event loop.
//!
//! ## Rules
//!
//! - At most one placement is pending per marker. A newer placement replaces
//!   the older one instead of queuing behind it.
//! - Pending inspections run in no particular order relative to each other.
//! - Tree structure is read when the inspection runs, never when it is
//!   scheduled. A marker whose tree lost its window in the meantime is
//!   reported as detached and its callback is not invoked.
//! - A missing match is silent: the callback simply does not fire.
//! - A placement with zero width or height is a miss, before any leeway is
//!   added to it.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Insets, Point, Rect, Size};
//! use loupe_search::marker::{InspectionQueue, Marker, Placement};
//! use loupe_search::{BackendProfile, MatchOptions, TreeAdapter};
//!
//! // Two siblings under a window root: 1 is the marker, 2 a text field.
//! struct Flat;
//! impl TreeAdapter for Flat {
//!     type Node = u32;
//!     type Kind = &'static str;
//!     type Space = ();
//!     fn profile(&self) -> &BackendProfile { &BackendProfile::TOUCH }
//!     fn parent_of(&self, n: u32) -> Option<u32> { (n != 0).then_some(0) }
//!     fn children_of(&self, n: u32) -> impl Iterator<Item = u32> + '_ {
//!         (if n == 0 { 1..3 } else { 0..0 }).into_iter()
//!     }
//!     fn is_kind(&self, n: u32, kind: &&'static str) -> bool {
//!         *kind == if n == 2 { "text-field" } else { "view" }
//!     }
//!     fn root_space(&self, _: u32) -> Option<()> { Some(()) }
//!     fn origin_in(&self, _: u32, _: ()) -> Option<Point> { Some(Point::new(10.0, 10.0)) }
//!     fn size_of(&self, _: u32) -> Size { Size::new(100.0, 40.0) }
//! }
//!
//! let mut queue = InspectionQueue::new();
//! let marker = queue.insert(Marker::new(1, "text-field", MatchOptions::empty(), |_: &Flat, node| {
//!     assert_eq!(node, 2);
//! }));
//! let frame = Rect::from_origin_size((10.0, 10.0), (100.0, 40.0));
//! queue.schedule(marker, Placement::new(frame, Insets::ZERO));
//! let summary = queue.run(&Flat);
//! assert_eq!(summary.found, 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Insets, Rect};

use crate::adapter::TreeAdapter;
use crate::options::MatchOptions;
use crate::search::{SearchRequest, find_ancestor_match};
use crate::target::build_target_frame;

/// Identifier of a marker registered with an [`InspectionQueue`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MarkerId(u64);

/// Geometry a marker receives from one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Raw global frame computed by the layout system.
    pub frame: Rect,
    /// Safe-area insets (`x0` leading, `y0` top, `x1` trailing, `y1` bottom).
    pub safe_area: Insets,
}

impl Placement {
    /// Create a placement.
    pub fn new(frame: Rect, safe_area: Insets) -> Self {
        Self { frame, safe_area }
    }
}

type Check<A> = Box<dyn Fn(&A, <A as TreeAdapter>::Node) -> bool>;
type Customize<A> = Box<dyn FnMut(&A, <A as TreeAdapter>::Node)>;

/// What a marker looks for and what to do with it.
pub struct Marker<A: TreeAdapter> {
    /// The marker's own node in the tree.
    pub anchor: A::Node,
    /// Requested widget kind.
    pub kind: A::Kind,
    /// Match policy.
    pub options: MatchOptions,
    check: Option<Check<A>>,
    customize: Customize<A>,
}

impl<A: TreeAdapter> core::fmt::Debug for Marker<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Marker")
            .field("anchor", &self.anchor)
            .field("options", &self.options)
            .field("check", &self.check.is_some())
            .finish_non_exhaustive()
    }
}

impl<A: TreeAdapter> Marker<A> {
    /// Create a marker anchored at `anchor` that calls `customize` with each match.
    pub fn new(
        anchor: A::Node,
        kind: A::Kind,
        options: MatchOptions,
        customize: impl FnMut(&A, A::Node) + 'static,
    ) -> Self {
        Self {
            anchor,
            kind,
            options,
            check: None,
            customize: Box::new(customize),
        }
    }

    /// Require candidates to also pass `check`.
    pub fn with_check(mut self, check: impl Fn(&A, A::Node) -> bool + 'static) -> Self {
        self.check = Some(Box::new(check));
        self
    }
}

/// Result of one inspection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A node matched and the callback ran.
    Found,
    /// The search completed without a match.
    Missed,
    /// The marker was no longer attached to a window.
    Detached,
}

/// Counters for one [`InspectionQueue::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Inspections whose callback ran.
    pub found: usize,
    /// Inspections without a match.
    pub missed: usize,
    /// Inspections skipped because their marker was detached.
    pub detached: usize,
}

/// Markers plus at most one pending placement each.
pub struct InspectionQueue<A: TreeAdapter> {
    markers: HashMap<MarkerId, Marker<A>>,
    pending: HashMap<MarkerId, Placement>,
    next_id: u64,
}

impl<A: TreeAdapter> core::fmt::Debug for InspectionQueue<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InspectionQueue")
            .field("markers", &self.markers.len())
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl<A: TreeAdapter> Default for InspectionQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: TreeAdapter> InspectionQueue<A> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            markers: HashMap::new(),
            pending: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a marker.
    pub fn insert(&mut self, marker: Marker<A>) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(id, marker);
        id
    }

    /// Unregister a marker and drop its pending placement.
    pub fn remove(&mut self, id: MarkerId) -> Option<Marker<A>> {
        self.pending.remove(&id);
        self.markers.remove(&id)
    }

    /// Queue an inspection for `id` with the geometry of the latest layout pass.
    ///
    /// Returns true if this replaced a placement that had not run yet.
    /// Placements for unknown markers are ignored.
    pub fn schedule(&mut self, id: MarkerId, placement: Placement) -> bool {
        if !self.markers.contains_key(&id) {
            return false;
        }
        let replaced = self.pending.insert(id, placement).is_some();
        if replaced {
            log::debug!("placement for {id:?} superseded before it ran");
        }
        replaced
    }

    /// Drop the pending placement for `id`, if any.
    pub fn cancel(&mut self, id: MarkerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Returns true if `id` has a placement waiting to run.
    pub fn is_scheduled(&self, id: MarkerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of placements waiting to run.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns the registered marker for `id`.
    pub fn marker(&self, id: MarkerId) -> Option<&Marker<A>> {
        self.markers.get(&id)
    }
}

impl<A: TreeAdapter> InspectionQueue<A>
where
    A::Kind: Clone,
{
    /// Run every pending inspection against the settled tree.
    ///
    /// Call this after the layout pass that produced the placements has
    /// completed. The queue is empty afterwards.
    pub fn run(&mut self, adapter: &A) -> RunSummary {
        let mut summary = RunSummary::default();
        let pending: Vec<(MarkerId, Placement)> = self.pending.drain().collect();
        for (id, placement) in pending {
            let Some(marker) = self.markers.get_mut(&id) else {
                continue;
            };
            match inspect(adapter, marker, placement) {
                Outcome::Found => summary.found += 1,
                Outcome::Missed => summary.missed += 1,
                Outcome::Detached => summary.detached += 1,
            }
        }
        summary
    }

    /// Run the inspection for `id` immediately, bypassing the queue.
    ///
    /// Any pending placement for `id` is left untouched.
    pub fn run_now(&mut self, adapter: &A, id: MarkerId, placement: Placement) -> Option<Outcome> {
        let marker = self.markers.get_mut(&id)?;
        Some(inspect(adapter, marker, placement))
    }
}

fn inspect<A: TreeAdapter>(adapter: &A, marker: &mut Marker<A>, placement: Placement) -> Outcome
where
    A::Kind: Clone,
{
    if adapter.root_space(marker.anchor).is_none() {
        log::trace!("marker at {:?} is detached", marker.anchor);
        return Outcome::Detached;
    }
    // Checked on the raw frame, before any leeway is added.
    if placement.frame.width() <= 0.0 || placement.frame.height() <= 0.0 {
        log::trace!("empty placement {:?} for {:?}", placement.frame, marker.anchor);
        return Outcome::Missed;
    }
    let target = build_target_frame(
        placement.frame,
        placement.safe_area,
        marker.options,
        adapter.profile(),
    );
    let mut request = SearchRequest::new(target, marker.kind.clone(), marker.options);
    request.check = marker.check.as_deref();
    match find_ancestor_match(adapter, marker.anchor, &request) {
        Some(node) => {
            (marker.customize)(adapter, node);
            Outcome::Found
        }
        None => Outcome::Missed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BackendProfile;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};
    use kurbo::{Point, Size};

    /// Star: node 0 is the root, every other node is its child.
    struct Star {
        frames: Vec<Rect>,
        kinds: Vec<u8>,
        attached: Cell<bool>,
    }

    impl TreeAdapter for Star {
        type Node = usize;
        type Kind = u8;
        type Space = ();

        fn profile(&self) -> &BackendProfile {
            &BackendProfile::DESKTOP
        }
        fn parent_of(&self, node: usize) -> Option<usize> {
            (node != 0).then_some(0)
        }
        fn children_of(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
            let end = if node == 0 { self.frames.len() } else { 1 };
            1..end
        }
        fn is_kind(&self, node: usize, kind: &u8) -> bool {
            self.kinds[node] == *kind
        }
        fn root_space(&self, _node: usize) -> Option<()> {
            self.attached.get().then_some(())
        }
        fn origin_in(&self, node: usize, _space: ()) -> Option<Point> {
            Some(self.frames[node].origin())
        }
        fn size_of(&self, node: usize) -> Size {
            self.frames[node].size()
        }
    }

    fn star() -> Star {
        Star {
            frames: vec![
                Rect::new(0.0, 0.0, 500.0, 500.0),
                Rect::new(10.0, 10.0, 110.0, 50.0),
                Rect::new(10.0, 10.0, 110.0, 50.0),
                Rect::new(200.0, 10.0, 300.0, 50.0),
            ],
            kinds: vec![0, 0, 1, 1],
            attached: Cell::new(true),
        }
    }

    fn recording(found: &Rc<RefCell<Vec<usize>>>) -> impl FnMut(&Star, usize) + 'static {
        let found = Rc::clone(found);
        move |_, node| found.borrow_mut().push(node)
    }

    #[test]
    fn run_invokes_callback_and_drains() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));

        assert!(!queue.schedule(id, Placement::new(tree.frames[1], Insets::ZERO)));
        assert!(queue.is_scheduled(id));
        let summary = queue.run(&tree);
        assert_eq!(
            summary,
            RunSummary {
                found: 1,
                missed: 0,
                detached: 0
            }
        );
        assert_eq!(*found.borrow(), vec![2]);
        assert_eq!(queue.pending(), 0);

        // Nothing pending: the callback does not fire again.
        assert_eq!(queue.run(&tree), RunSummary::default());
        assert_eq!(found.borrow().len(), 1);
    }

    #[test]
    fn newer_placement_supersedes_older() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));

        queue.schedule(id, Placement::new(tree.frames[1], Insets::ZERO));
        assert!(queue.schedule(id, Placement::new(tree.frames[3], Insets::ZERO)));
        assert_eq!(queue.pending(), 1);

        let summary = queue.run(&tree);
        assert_eq!(summary.found, 1);
        assert_eq!(*found.borrow(), vec![3], "only the latest placement runs");
    }

    #[test]
    fn detached_marker_skips_callback() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));
        queue.schedule(id, Placement::new(tree.frames[1], Insets::ZERO));

        tree.attached.set(false);
        let summary = queue.run(&tree);
        assert_eq!(summary.detached, 1);
        assert!(found.borrow().is_empty());
    }

    #[test]
    fn miss_is_silent() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));
        queue.schedule(id, Placement::new(Rect::new(400.0, 400.0, 450.0, 450.0), Insets::ZERO));

        assert_eq!(queue.run(&tree).missed, 1);
        assert!(found.borrow().is_empty());
    }

    #[test]
    fn marker_check_filters_candidates() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let options = MatchOptions::SUB_FRAME | MatchOptions::SUPER_FRAME;
        let marker = Marker::new(1, 1, options, recording(&found))
            .with_check(|_: &Star, node| node == 3);
        let id = queue.insert(marker);
        queue.schedule(id, Placement::new(Rect::new(0.0, 0.0, 400.0, 100.0), Insets::ZERO));

        assert_eq!(queue.run(&tree).found, 1);
        assert_eq!(*found.borrow(), vec![3]);
    }

    #[test]
    fn removed_and_cancelled_markers_do_not_run() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let a = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));
        let b = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));
        queue.schedule(a, Placement::new(tree.frames[1], Insets::ZERO));
        queue.schedule(b, Placement::new(tree.frames[1], Insets::ZERO));

        assert!(queue.remove(a).is_some());
        assert!(queue.cancel(b));
        assert!(!queue.cancel(b));
        assert!(!queue.schedule(a, Placement::new(tree.frames[1], Insets::ZERO)));
        assert_eq!(queue.run(&tree), RunSummary::default());
        assert!(found.borrow().is_empty());
        assert!(queue.marker(b).is_some());
    }

    #[test]
    fn empty_placement_misses_even_with_leeway() {
        let mut tree = star();
        tree.frames.push(Rect::new(12.0, 12.0, 18.0, 18.0));
        tree.kinds.push(1);
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::SUB_FRAME, recording(&found)));

        let empty = Placement::new(Rect::new(15.0, 15.0, 15.0, 15.0), Insets::ZERO);
        assert_eq!(queue.run_now(&tree, id, empty), Some(Outcome::Missed));
        assert!(found.borrow().is_empty());

        let small = Placement::new(Rect::new(13.0, 13.0, 17.0, 17.0), Insets::ZERO);
        assert_eq!(queue.run_now(&tree, id, small), Some(Outcome::Found));
        assert_eq!(*found.borrow(), vec![4]);
    }

    #[test]
    fn run_now_bypasses_queue() {
        let tree = star();
        let found = Rc::new(RefCell::new(Vec::new()));
        let mut queue = InspectionQueue::new();
        let id = queue.insert(Marker::new(1, 1, MatchOptions::empty(), recording(&found)));
        let outcome = queue.run_now(&tree, id, Placement::new(tree.frames[3], Insets::ZERO));
        assert_eq!(outcome, Some(Outcome::Found));
        assert_eq!(*found.borrow(), vec![3]);
        assert_eq!(queue.pending(), 0);
    }
}
