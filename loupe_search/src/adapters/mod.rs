// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with concrete view trees.
//!
//! Each adapter is gated behind a feature flag to keep the core lightweight and `no_std` by
//! default.
//!
//! ## Available Adapters
//!
//! - [`view_tree`] (`view_tree_adapter` feature): Searches a [`loupe_view_tree::ViewTree`] and
//!   walks its owner chain of views and controllers.

#[cfg(feature = "view_tree_adapter")]
pub mod view_tree;
