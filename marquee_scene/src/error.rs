// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by hierarchy edits on a [`Scene`](crate::Scene).

use crate::types::NodeId;

/// Programmer errors reported by [`Scene`](crate::Scene) hierarchy operations.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneError {
    /// Attaching would make a node its own ancestor.
    #[error("cannot add {child:?} under {parent:?}: it would become its own ancestor")]
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },
    /// The node is not a direct child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent that was searched.
        parent: NodeId,
        /// The node that was expected among its children.
        child: NodeId,
    },
    /// A child index is outside the valid range.
    #[error("child index {index} is out of range for {len} children")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children (insertion accepts `index == len`).
        len: usize,
    },
    /// The identifier refers to a destroyed node.
    #[error("{0:?} does not refer to a live node")]
    StaleNode(NodeId),
    /// The stage cannot be attached under another node or destroyed.
    #[error("the stage is the scene root and cannot be moved or destroyed")]
    Stage,
}
