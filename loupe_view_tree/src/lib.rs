// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe View Tree: a retained tree of typed native views.
//!
//! This crate models the tree a platform toolkit renders into: every view has
//! a runtime class, a frame in its parent's content space, an optional scroll
//! offset for its children, and platform-reported alignment insets. Roots may
//! be attached to a window; views under a detached root have no usable
//! coordinate space.
//!
//! It is the reference backing store for the `loupe_search` tree adapter, and a
//! convenient way to build trees in tests.
//!
//! ## Not a layout engine
//!
//! Frames are supplied by the caller. [`ViewTree::commit`] only propagates
//! them into global coordinates, and until it runs, global frames reflect the
//! previous pass, so readers only ever observe settled geometry.
//!
//! ## Structure
//!
//! - [`ViewTree::insert`], [`ViewTree::remove`] and [`ViewTree::reparent`]
//!   edit structure immediately. Invalid edits return a [`TreeError`].
//! - Setters such as [`ViewTree::set_frame`] ignore stale identifiers.
//! - [`NodeId`] is generational: removing a view invalidates its id even if
//!   the slot is reused.
//!
//! ## Owner chain
//!
//! Controllers attached with [`ViewTree::add_controller`] own a view.
//! [`ViewTree::next_responder`] walks the chain of views and controllers in
//! the order events would be offered to them, which lets callers recover the
//! controller that owns a view they found.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod layout;
mod tree;
mod types;

pub use error::TreeError;
pub use layout::LayoutPass;
pub use tree::ViewTree;
pub use types::{ControllerId, LocalView, NodeId, Responder, WidgetClass};
