// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pooled root→leaf chains.
//!
//! A [`Chain`] is a doubly linked list of node references stored in a [`ChainPool`]. Links
//! are recycled through a free list, so once the pool has grown to the deepest pair of
//! chains a frame needs, building and tearing down chains allocates nothing.
//!
//! Freeing a link clears its node reference before the slot goes back on the free list;
//! a pooled link never refers to a scene node.

use alloc::vec::Vec;

use marquee_scene::{NodeId, Scene};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct LinkId(u32);

impl LinkId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct Link {
    node: Option<NodeId>,
    rootward: Option<LinkId>,
    leafward: Option<LinkId>,
}

/// An ordered sequence of nodes from a tree root down to a leaf, backed by a [`ChainPool`].
///
/// A chain is only meaningful together with the pool that built it. It is intentionally
/// not `Clone`: use [`ChainPool::copy`] to duplicate one and [`ChainPool::free`] to give its
/// links back.
#[derive(Debug, Default)]
pub struct Chain {
    root: Option<LinkId>,
    leaf: Option<LinkId>,
    len: usize,
}

impl Chain {
    /// An empty chain.
    pub const fn new() -> Self {
        Self {
            root: None,
            leaf: None,
            len: 0,
        }
    }

    /// Number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Leaf→root cursor over a chain that does not borrow the pool between steps.
///
/// Handlers run between steps and may need the pool's owner mutably, so the walk only
/// borrows the pool inside [`ChainWalk::next`].
#[derive(Copy, Clone, Debug)]
pub(crate) struct ChainWalk {
    link: Option<LinkId>,
    depth: usize,
}

impl ChainWalk {
    /// Returns the next node toward the root with its depth (root is `0`).
    pub(crate) fn next(&mut self, pool: &ChainPool) -> Option<(usize, NodeId)> {
        let link = self.link?;
        let entry = &pool.links[link.idx()];
        self.link = entry.rootward;
        self.depth = self.depth.saturating_sub(1);
        entry.node.map(|n| (self.depth, n))
    }
}

/// Slab of reusable chain links.
#[derive(Debug, Default)]
pub struct ChainPool {
    links: Vec<Link>,
    free_list: Vec<LinkId>,
}

impl ChainPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of links the pool tracks, in use or free.
    pub fn allocated(&self) -> usize {
        self.links.len()
    }

    /// Number of free links ready for reuse.
    pub fn available(&self) -> usize {
        self.free_list.len()
    }

    /// Number of links currently owned by chains.
    pub fn in_use(&self) -> usize {
        self.links.len() - self.free_list.len()
    }

    /// Build the chain from the root of `target`'s tree down to `target`.
    ///
    /// `None` yields an empty chain.
    pub fn build(&mut self, scene: &Scene, target: Option<NodeId>) -> Chain {
        let mut chain = Chain::new();
        let mut cur = target;
        while let Some(node) = cur {
            self.push_root(&mut chain, node);
            cur = scene.parent(node);
        }
        chain
    }

    /// Duplicate `chain` into freshly acquired links.
    pub fn copy(&mut self, chain: &Chain) -> Chain {
        let mut out = Chain::new();
        let mut cur = chain.leaf;
        while let Some(link) = cur {
            let Link { node, rootward, .. } = self.links[link.idx()];
            if let Some(node) = node {
                self.push_root(&mut out, node);
            }
            cur = rootward;
        }
        out
    }

    /// Return every link of `chain` to the pool, leaving it empty.
    pub fn free(&mut self, chain: &mut Chain) {
        while self.pop_leaf(chain).is_some() {}
    }

    /// Detach the leaf of `chain`, return its link to the pool and yield the node it held.
    pub fn pop_leaf(&mut self, chain: &mut Chain) -> Option<NodeId> {
        let link = chain.leaf?;
        let entry = core::mem::take(&mut self.links[link.idx()]);
        chain.leaf = entry.rootward;
        match entry.rootward {
            Some(parent) => self.links[parent.idx()].leafward = None,
            None => chain.root = None,
        }
        chain.len -= 1;
        self.free_list.push(link);
        entry.node
    }

    /// The leaf node of `chain`.
    pub fn leaf(&self, chain: &Chain) -> Option<NodeId> {
        self.links[chain.leaf?.idx()].node
    }

    /// The root node of `chain`.
    pub fn root(&self, chain: &Chain) -> Option<NodeId> {
        self.links[chain.root?.idx()].node
    }

    /// Nodes of `chain` from root to leaf.
    pub fn iter<'a>(&'a self, chain: &Chain) -> impl Iterator<Item = NodeId> + use<'a> {
        let mut cur = chain.root;
        core::iter::from_fn(move || {
            let link = &self.links[cur?.idx()];
            cur = link.leafward;
            link.node
        })
    }

    /// Number of leading nodes, counted from the root, that `a` and `b` share.
    ///
    /// The deepest shared node is the common ancestor; it sits at depth `result - 1`.
    pub fn common_depth(&self, a: &Chain, b: &Chain) -> usize {
        let mut depth = 0;
        let (mut x, mut y) = (a.root, b.root);
        while let (Some(la), Some(lb)) = (x, y) {
            let (la, lb) = (&self.links[la.idx()], &self.links[lb.idx()]);
            if la.node != lb.node {
                break;
            }
            depth += 1;
            x = la.leafward;
            y = lb.leafward;
        }
        depth
    }

    /// Returns true if `a` and `b` hold the same nodes in the same order.
    pub fn same(&self, a: &Chain, b: &Chain) -> bool {
        a.len == b.len && self.common_depth(a, b) == a.len
    }

    pub(crate) fn walk(&self, chain: &Chain) -> ChainWalk {
        ChainWalk {
            link: chain.leaf,
            depth: chain.len,
        }
    }

    fn push_root(&mut self, chain: &mut Chain, node: NodeId) {
        let link = self.acquire(node);
        self.links[link.idx()].leafward = chain.root;
        match chain.root {
            Some(old) => self.links[old.idx()].rootward = Some(link),
            None => chain.leaf = Some(link),
        }
        chain.root = Some(link);
        chain.len += 1;
    }

    fn acquire(&mut self, node: NodeId) -> LinkId {
        let link = if let Some(link) = self.free_list.pop() {
            link
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Chain links use 32-bit indices by design."
            )]
            let idx = self.links.len() as u32;
            self.links.push(Link::default());
            LinkId(idx)
        };
        self.links[link.idx()] = Link {
            node: Some(node),
            rootward: None,
            leafward: None,
        };
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use marquee_scene::NodeProps;

    fn deep_scene(depth: usize) -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new();
        let mut path = vec![scene.stage()];
        for _ in 0..depth {
            let parent = *path.last().unwrap();
            path.push(scene.create_child(parent, NodeProps::default()).unwrap());
        }
        (scene, path)
    }

    #[test]
    fn build_orders_root_to_leaf() {
        let (scene, path) = deep_scene(3);
        let mut pool = ChainPool::new();
        let mut chain = pool.build(&scene, path.last().copied());
        assert_eq!(chain.len(), 4);
        assert_eq!(pool.iter(&chain).collect::<Vec<_>>(), path);
        assert_eq!(pool.root(&chain), Some(path[0]));
        assert_eq!(pool.leaf(&chain), Some(path[3]));
        pool.free(&mut chain);
        assert!(chain.is_empty());
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn empty_target_builds_empty_chain() {
        let (scene, _) = deep_scene(1);
        let mut pool = ChainPool::new();
        let chain = pool.build(&scene, None);
        assert!(chain.is_empty());
        assert_eq!(pool.leaf(&chain), None);
        assert_eq!(pool.allocated(), 0);
    }

    #[test]
    fn pop_leaf_walks_toward_root_and_recycles() {
        let (scene, path) = deep_scene(2);
        let mut pool = ChainPool::new();
        let mut chain = pool.build(&scene, Some(path[2]));
        assert_eq!(pool.pop_leaf(&mut chain), Some(path[2]));
        assert_eq!(pool.available(), 1);
        assert_eq!(pool.leaf(&chain), Some(path[1]));
        assert_eq!(pool.pop_leaf(&mut chain), Some(path[1]));
        assert_eq!(pool.pop_leaf(&mut chain), Some(path[0]));
        assert_eq!(pool.pop_leaf(&mut chain), None);
        assert_eq!(pool.root(&chain), None);
        assert_eq!(pool.available(), 3);
        assert!(
            pool.links.iter().all(|l| l.node.is_none()),
            "free links must not keep node references"
        );
    }

    #[test]
    fn copy_is_independent() {
        let (scene, path) = deep_scene(2);
        let mut pool = ChainPool::new();
        let mut a = pool.build(&scene, Some(path[2]));
        let mut b = pool.copy(&a);
        assert!(pool.same(&a, &b));
        assert_eq!(pool.in_use(), 6);
        pool.free(&mut a);
        assert_eq!(pool.iter(&b).collect::<Vec<_>>(), path);
        pool.free(&mut b);
        assert_eq!(pool.in_use(), 0);
    }

    #[test]
    fn common_depth_and_sameness() {
        let (mut scene, path) = deep_scene(2);
        let sibling = scene.create_child(path[1], NodeProps::default()).unwrap();
        let mut pool = ChainPool::new();
        let a = pool.build(&scene, Some(path[2]));
        let b = pool.build(&scene, Some(sibling));
        let c = pool.build(&scene, Some(path[1]));
        let empty = Chain::new();
        assert_eq!(pool.common_depth(&a, &b), 2);
        assert_eq!(pool.common_depth(&a, &c), 2);
        assert_eq!(pool.common_depth(&a, &empty), 0);
        assert!(!pool.same(&a, &b));
        assert!(!pool.same(&a, &c), "a prefix is not the same chain");
        assert!(pool.same(&empty, &Chain::new()));
    }

    #[test]
    fn links_are_reused_without_growth() {
        let (scene, path) = deep_scene(4);
        let mut pool = ChainPool::new();
        for _ in 0..50 {
            let mut chain = pool.build(&scene, path.last().copied());
            pool.free(&mut chain);
        }
        assert_eq!(pool.allocated(), 5);
        assert_eq!(pool.available(), 5);
    }
}
