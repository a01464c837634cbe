// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Search: find the native widget behind a declared element.
//!
//! ## Overview
//!
//! Declarative UI layers render through native widgets they do not expose.
//! To reach one, place an invisible marker next to the declared element. Once
//! layout has settled, the marker knows where the element was laid out, and
//! this crate finds the native widget of the requested kind whose frame lines
//! up with it.
//!
//! ## Search
//!
//! [`find_ancestor_match`] climbs from the marker's node towards the root.
//! At each ancestor it searches that ancestor's subtree in pre-order, skipping
//! the branch it just climbed out of, and returns the first node that
//!
//! - is of the requested kind ([`TreeAdapter::is_kind`]),
//! - has a frame accepted by the [`FramePredicate`] the [`MatchOptions`] select,
//! - and passes the optional side check on the [`SearchRequest`].
//!
//! Frames are compared in the coordinate space of the marker's root
//! ([`TreeAdapter::root_space`]). A marker without one is detached and never
//! matches.
//!
//! ## Target frame
//!
//! The raw frame a marker receives is rarely the native widget's frame. Safe
//! areas, scroll-view chrome and alignment rects all get in the way.
//! [`build_target_frame`] folds the marker's safe-area insets and the
//! backend's sub-frame leeway into the target, and [`presets`] records which
//! options work for common controls on each [`BackendProfile`].
//!
//! ```rust
//! use kurbo::{Insets, Rect};
//! use loupe_search::{
//!     BackendProfile, MatchOptions, MatchRule, build_predicate, build_target_frame,
//! };
//!
//! let profile = BackendProfile::TOUCH;
//! let options = MatchOptions::CONTAINING_SAFE_AREA;
//! let target = build_target_frame(
//!     Rect::new(0.0, 47.0, 390.0, 810.0),
//!     Insets::new(0.0, 47.0, 0.0, 34.0),
//!     options,
//!     &profile,
//! );
//! assert_eq!(target, Rect::new(0.0, 0.0, 390.0, 844.0));
//!
//! let predicate = build_predicate(options, target, profile.tolerance);
//! assert_eq!(predicate.rule, MatchRule::Exact);
//! assert!(predicate.accepts(Rect::new(0.5, 0.0, 390.0, 844.5)));
//! ```
//!
//! ## Deferred inspection
//!
//! Markers learn their geometry during layout, but the tree is only safe to
//! read after layout finishes. The [`marker`] module queues one inspection per
//! marker and runs them against the settled tree.
//!
//! ## Owners
//!
//! Some widgets are reached through their owning controller rather than as
//! views. [`owner::find_owner`] walks an [`owner::OwnerChain`] until a link
//! narrows to the wanted type.
//!
//! ## Adapters
//!
//! The [`adapters`] module provides integration with concrete trees:
//!
//! - **View Tree Adapter** (`view_tree_adapter` feature): searches a
//!   `loupe_view_tree::ViewTree` and exposes its view/controller owner chain.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
pub mod adapters;
mod geometry;
pub mod marker;
mod options;
pub mod owner;
pub mod presets;
mod profile;
mod search;
mod target;

pub use adapter::TreeAdapter;
pub use geometry::{Tolerance, contains_rect, frames_approx_eq, intersects_rect};
pub use options::{FramePredicate, MatchOptions, MatchRule, build_predicate};
pub use presets::Control;
pub use profile::{BackendKind, BackendProfile, SizeInsets};
pub use search::{
    SearchRequest, SideCheck, find_ancestor_match, find_descendant_match, global_frame, matches,
};
pub use target::build_target_frame;
