// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers, display properties, and pick modes.

use crate::transform::Placement;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// This is a small, copyable handle. It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - Detaching a node from its parent does not invalidate its identifier; the node stays
///   alive, parentless, until [`Scene::destroy`](crate::Scene::destroy) frees it.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness.
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

/// Display properties of a node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeProps {
    /// Local transform relative to the parent.
    pub placement: Placement,
    /// Opacity in `0.0..=1.0`. A node with alpha `<= 0` is skipped by picking.
    pub alpha: f64,
    /// Hidden nodes and their subtrees are skipped by picking.
    pub visible: bool,
}

impl Default for NodeProps {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            alpha: 1.0,
            visible: true,
        }
    }
}

impl NodeProps {
    /// Properties for a visible, opaque node placed at (`x`, `y`).
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            placement: Placement::at(x, y),
            ..Self::default()
        }
    }

    /// Returns true if the node can be seen and therefore hit: visible, with positive
    /// alpha and a non-zero scale on both axes.
    pub fn is_pickable(&self) -> bool {
        self.visible && self.alpha > 0.0 && !self.placement.is_degenerate()
    }
}

/// Selects which nodes [`Scene::pick`](crate::Scene::pick) may traverse.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PickMode {
    /// Only visibility gates traversal; input flags on containers are ignored.
    All,
    /// Also honor each node's [`PointerFlags`](crate::PointerFlags): a node with both
    /// flags cleared is skipped together with its subtree, and a node without
    /// [`PointerFlags::CHILDREN`](crate::PointerFlags::CHILDREN) hides its children.
    #[default]
    PointerInput,
}
