// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout pass summary returned from commit.

use alloc::vec::Vec;

use crate::types::NodeId;

/// What changed during one [`crate::ViewTree::commit`].
#[derive(Clone, Debug, Default)]
pub struct LayoutPass {
    /// Epoch of the tree after this pass.
    pub epoch: u64,
    /// Live views whose global frame differs from the previous pass,
    /// including views laid out for the first time.
    pub moved: Vec<NodeId>,
}

impl LayoutPass {
    /// Returns true if no view moved or resized.
    pub fn is_settled(&self) -> bool {
        self.moved.is_empty()
    }
}
