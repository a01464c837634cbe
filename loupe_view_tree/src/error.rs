// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for structural mutations.

use crate::types::{ControllerId, NodeId};

/// A structural mutation that would leave the tree inconsistent.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The node identifier does not refer to a live view.
    #[error("view {0:?} is not alive")]
    StaleNode(NodeId),
    /// The controller identifier was not issued by this tree.
    #[error("controller {0:?} does not exist")]
    UnknownController(ControllerId),
    /// The requested parent is the node itself or one of its descendants.
    #[error("reparenting {node:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Node being moved.
        node: NodeId,
        /// Requested new parent.
        parent: NodeId,
    },
}
