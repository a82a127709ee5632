// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: node storage, hierarchy edits, transforms, picking.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Affine, Point};

use crate::error::SceneError;
use crate::input::{InputCapability, PointerFlags};
use crate::transform::AffineExt;
use crate::types::{NodeId, NodeProps, PickMode};

/// A hierarchy of positioned nodes rooted at a stage.
///
/// Nodes are stored in generational slots. Children are owned by their parent in the sense
/// that they are ordered in its child list and follow it through transforms, but detaching
/// a node never frees it: a detached node keeps its identifier, its children and its input
/// capability until [`Scene::destroy`] is called.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    stage: NodeId,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    props: NodeProps,
    input: Option<InputCapability>,
    payload: Option<Box<dyn Any>>,
}

impl Node {
    fn new(generation: u32, props: NodeProps) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            props,
            input: None,
            payload: None,
        }
    }
}

impl Scene {
    /// Create a scene containing only the stage.
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            stage: NodeId::new(0, 0),
        };
        scene.stage = scene.create_node(NodeProps::default());
        scene
    }

    /// The root of the scene.
    pub fn stage(&self) -> NodeId {
        self.stage
    }

    /// Create a detached node.
    pub fn create_node(&mut self, props: NodeProps) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, props));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, props)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Create a node and append it to `parent`.
    pub fn create_child(
        &mut self,
        parent: NodeId,
        props: NodeProps,
    ) -> Result<NodeId, SceneError> {
        self.live(parent)?;
        let id = self.create_node(props);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Free `id` and its whole subtree.
    ///
    /// This is the only operation that invalidates identifiers. The node is detached from
    /// its parent first.
    pub fn destroy(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.live(id)?;
        if id == self.stage {
            return Err(SceneError::Stage);
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink(parent, id);
        }
        self.free_subtree(id);
        Ok(())
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes[id.idx()].take() else {
            return;
        };
        self.free_list.push(id.idx());
        for child in node.children {
            self.free_subtree(child);
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Parent of `id`, or `None` for the stage, detached nodes and stale identifiers.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in stacking order (last is topmost). Empty for stale identifiers.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Child of `parent` at `index`.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Position of `child` among the children of `parent`.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Returns true if `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Returns true if `node` is attached (directly or indirectly) to the stage.
    pub fn is_on_stage(&self, node: NodeId) -> bool {
        self.is_alive(node) && self.contains(self.stage, node)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let len = self.live(parent)?.children.len();
        self.add_child_at(parent, child, len)
    }

    /// Insert `child` into `parent` at `index`, detaching it from any previous parent.
    ///
    /// `index` may equal the current number of children. Fails with
    /// [`SceneError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        let len = self.live(parent)?.children.len();
        self.live(child)?;
        if child == self.stage {
            return Err(SceneError::Stage);
        }
        if self.contains(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }
        if index > len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        if let Some(old) = self.node(child).parent {
            self.unlink(old, child);
        }
        let siblings = &mut self.node_mut(parent).children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        tracing::trace!(?parent, ?child, index, "attached node");
        Ok(())
    }

    /// Detach `child` from `parent` and return it.
    pub fn remove_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<NodeId, SceneError> {
        let index = self
            .live(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(SceneError::NotAChild { parent, child })?;
        self.remove_child_at(parent, index)
    }

    /// Detach the child of `parent` at `index` and return it.
    pub fn remove_child_at(
        &mut self,
        parent: NodeId,
        index: usize,
    ) -> Result<NodeId, SceneError> {
        let len = self.live(parent)?.children.len();
        if index >= len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        let child = self.node_mut(parent).children.remove(index);
        if let Some(node) = self.node_opt_mut(child) {
            node.parent = None;
        }
        tracing::trace!(?parent, ?child, "detached node");
        Ok(child)
    }

    /// Detach every child of `parent`, returning them in their former order.
    pub fn remove_all_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, SceneError> {
        self.live(parent)?;
        let children = core::mem::take(&mut self.node_mut(parent).children);
        for &child in &children {
            if let Some(node) = self.node_opt_mut(child) {
                node.parent = None;
            }
        }
        Ok(children)
    }

    /// Move `child` to `index` within its parent's child list (restacking).
    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        let current = self
            .live(parent)?
            .children
            .iter()
            .position(|c| *c == child)
            .ok_or(SceneError::NotAChild { parent, child })?;
        let siblings = &mut self.node_mut(parent).children;
        let len = siblings.len();
        if index >= len {
            return Err(SceneError::IndexOutOfRange { index, len });
        }
        let moved = siblings.remove(current);
        siblings.insert(index, moved);
        Ok(())
    }

    /// Display properties of `id`.
    pub fn props(&self, id: NodeId) -> Option<&NodeProps> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Mutable display properties of `id`.
    pub fn props_mut(&mut self, id: NodeId) -> Option<&mut NodeProps> {
        self.node_opt_mut(id).map(|n| &mut n.props)
    }

    /// Input capability of `id`, if it has one.
    pub fn input(&self, id: NodeId) -> Option<&InputCapability> {
        self.node_opt(id)?.input.as_ref()
    }

    /// Mutable input capability of `id`, if it has one.
    pub fn input_mut(&mut self, id: NodeId) -> Option<&mut InputCapability> {
        self.node_opt_mut(id)?.input.as_mut()
    }

    /// Attach or remove the input capability of `id`, returning the previous one.
    pub fn set_input(
        &mut self,
        id: NodeId,
        input: Option<InputCapability>,
    ) -> Result<Option<InputCapability>, SceneError> {
        self.live(id)?;
        Ok(core::mem::replace(&mut self.node_mut(id).input, input))
    }

    /// Attach an opaque render payload to `id`, returning the previous one.
    pub fn set_payload(
        &mut self,
        id: NodeId,
        payload: Option<Box<dyn Any>>,
    ) -> Result<Option<Box<dyn Any>>, SceneError> {
        self.live(id)?;
        Ok(core::mem::replace(&mut self.node_mut(id).payload, payload))
    }

    /// Render payload of `id` if it is a `T`.
    pub fn payload<T: Any>(&self, id: NodeId) -> Option<&T> {
        self.node_opt(id)?.payload.as_ref()?.downcast_ref()
    }

    /// Local matrix of `id` (node space to parent space).
    pub fn local_transform(&self, id: NodeId) -> Option<Affine> {
        Some(self.node_opt(id)?.props.placement.to_affine())
    }

    /// Matrix mapping `id`'s local space to the space of its topmost ancestor.
    ///
    /// For nodes on stage this is the global transform used by renderers and for inverse
    /// hit testing.
    pub fn concatenated_transform(&self, id: NodeId) -> Option<Affine> {
        let mut node = self.node_opt(id)?;
        let mut m = node.props.placement.to_affine();
        while let Some(parent) = node.parent.and_then(|p| self.node_opt(p)) {
            m = m.prepend_affine(parent.props.placement.to_affine());
            node = parent;
        }
        Some(m)
    }

    /// Map a point from `id`'s local space to global space.
    pub fn local_to_global(&self, id: NodeId, p: Point) -> Option<Point> {
        Some(self.concatenated_transform(id)?.transform_point(p))
    }

    /// Map a global point into `id`'s local space. `None` if the transform is singular.
    pub fn global_to_local(&self, id: NodeId, p: Point) -> Option<Point> {
        Some(
            self.concatenated_transform(id)?
                .checked_invert()?
                .transform_point(p),
        )
    }

    /// Find the topmost node at `point` within the subtree of `id`.
    ///
    /// `accumulated` maps `id`'s local space to global space (for the stage, its own local
    /// transform). Children are tested front to back, last child first; the first hit wins.
    /// A child is skipped with its subtree when it is hidden, fully transparent or has a
    /// zero scale; see [`PickMode`] for how input flags gate traversal. If no descendant is
    /// hit, `id` itself is returned when it has [`PointerFlags::ENABLED`] and its hit area
    /// contains the point mapped into local space.
    pub fn pick(
        &self,
        id: NodeId,
        accumulated: Affine,
        point: Point,
        mode: PickMode,
    ) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        let traverse_children = match (mode, &node.input) {
            (PickMode::PointerInput, Some(input)) => input.pointer_children_enabled(),
            _ => true,
        };
        if traverse_children {
            for &child_id in node.children.iter().rev() {
                let Some(child) = self.node_opt(child_id) else {
                    continue;
                };
                if !child.props.is_pickable() {
                    continue;
                }
                if mode == PickMode::PointerInput
                    && let Some(input) = &child.input
                    && !input
                        .flags
                        .intersects(PointerFlags::ENABLED | PointerFlags::CHILDREN)
                {
                    continue;
                }
                let child_tf = accumulated.append_affine(child.props.placement.to_affine());
                if let Some(hit) = self.pick(child_id, child_tf, point, mode) {
                    return Some(hit);
                }
            }
        }
        let input = node.input.as_ref()?;
        if !input.pointer_enabled() {
            return None;
        }
        let area = input.hit_area.as_ref()?;
        let local = accumulated.checked_invert()?.transform_point(point);
        area.contains_point(local).then_some(id)
    }

    /// Pick from the stage at a global point.
    pub fn hit_test(&self, point: Point, mode: PickMode) -> Option<NodeId> {
        let stage = self.node_opt(self.stage)?;
        if !stage.props.is_pickable() {
            return None;
        }
        self.pick(self.stage, stage.props.placement.to_affine(), point, mode)
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn live(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.node_opt(id).ok_or(SceneError::StaleNode(id))
    }

    /// Access a node that was already validated; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably that was already validated; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.node_opt_mut(child) {
            c.parent = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::HitArea;
    use crate::transform::Placement;
    use alloc::vec;

    fn button(scene: &mut Scene, parent: NodeId, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        let id = scene.create_child(parent, NodeProps::at(x, y)).unwrap();
        let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, w, h));
        scene.set_input(id, Some(input)).unwrap();
        id
    }

    #[test]
    fn add_child_reparents() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let a = scene.create_child(stage, NodeProps::default()).unwrap();
        let b = scene.create_child(stage, NodeProps::default()).unwrap();
        let n = scene.create_child(a, NodeProps::default()).unwrap();
        scene.add_child(b, n).unwrap();
        assert_eq!(scene.parent(n), Some(b));
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[n]);
    }

    #[test]
    fn ancestors_cannot_become_children() {
        let mut scene = Scene::new();
        let mut chain = vec![scene.stage()];
        for _ in 0..6 {
            let parent = *chain.last().unwrap();
            chain.push(scene.create_child(parent, NodeProps::default()).unwrap());
        }
        let leaf = *chain.last().unwrap();
        assert_eq!(
            scene.add_child(leaf, leaf),
            Err(SceneError::Cycle {
                parent: leaf,
                child: leaf
            })
        );
        for &ancestor in &chain[1..chain.len() - 1] {
            assert_eq!(
                scene.add_child(leaf, ancestor),
                Err(SceneError::Cycle {
                    parent: leaf,
                    child: ancestor
                })
            );
        }
        assert_eq!(scene.add_child(leaf, scene.stage()), Err(SceneError::Stage));
        // Nothing moved.
        assert_eq!(scene.parent(leaf), Some(chain[chain.len() - 2]));
    }

    #[test]
    fn add_child_at_validates_index() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let a = scene.create_child(stage, NodeProps::default()).unwrap();
        let b = scene.create_node(NodeProps::default());
        let c = scene.create_node(NodeProps::default());
        assert_eq!(
            scene.add_child_at(stage, b, 2),
            Err(SceneError::IndexOutOfRange { index: 2, len: 1 })
        );
        scene.add_child_at(stage, b, 0).unwrap();
        scene.add_child_at(stage, c, 1).unwrap();
        assert_eq!(scene.children(stage), &[b, c, a]);
        // Re-adding an existing child at the end moves it to the top.
        scene.add_child_at(stage, b, 3).unwrap();
        assert_eq!(scene.children(stage), &[c, a, b]);
    }

    #[test]
    fn remove_child_errors() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let a = scene.create_child(stage, NodeProps::default()).unwrap();
        let stray = scene.create_node(NodeProps::default());
        assert_eq!(
            scene.remove_child(stage, stray),
            Err(SceneError::NotAChild {
                parent: stage,
                child: stray
            })
        );
        assert_eq!(
            scene.remove_child_at(stage, 1),
            Err(SceneError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(scene.remove_child(stage, a), Ok(a));
        assert_eq!(scene.parent(a), None);
        assert!(scene.is_alive(a), "detaching must not destroy");
    }

    #[test]
    fn detaching_is_shallow() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let group = scene.create_child(stage, NodeProps::default()).unwrap();
        let inner = scene.create_child(group, NodeProps::default()).unwrap();
        scene.remove_child(stage, group).unwrap();
        assert_eq!(scene.parent(inner), Some(group));
        assert!(!scene.is_on_stage(inner));
        scene.add_child(stage, group).unwrap();
        assert!(scene.is_on_stage(inner));
    }

    #[test]
    fn destroy_frees_subtree_and_bumps_generation() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let group = scene.create_child(stage, NodeProps::default()).unwrap();
        let inner = scene.create_child(group, NodeProps::default()).unwrap();
        scene.destroy(group).unwrap();
        assert!(!scene.is_alive(group));
        assert!(!scene.is_alive(inner));
        assert!(scene.children(stage).is_empty());
        assert_eq!(scene.destroy(group), Err(SceneError::StaleNode(group)));
        assert_eq!(scene.destroy(stage), Err(SceneError::Stage));

        let reused = scene.create_node(NodeProps::default());
        assert!(reused != group && reused != inner);
        assert!(!scene.is_alive(inner));
    }

    #[test]
    fn set_child_index_restacks() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let a = scene.create_child(stage, NodeProps::default()).unwrap();
        let b = scene.create_child(stage, NodeProps::default()).unwrap();
        let c = scene.create_child(stage, NodeProps::default()).unwrap();
        scene.set_child_index(stage, a, 2).unwrap();
        assert_eq!(scene.children(stage), &[b, c, a]);
        assert_eq!(scene.child_index(stage, c), Some(1));
        assert_eq!(scene.child_at(stage, 0), Some(b));
        assert_eq!(
            scene.set_child_index(stage, a, 3),
            Err(SceneError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn concatenated_transform_applies_root_last() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let group = scene
            .create_child(
                stage,
                NodeProps {
                    placement: Placement {
                        x: 100.0,
                        scale_x: 2.0,
                        scale_y: 2.0,
                        ..Placement::default()
                    },
                    ..NodeProps::default()
                },
            )
            .unwrap();
        let leaf = scene.create_child(group, NodeProps::at(10.0, 5.0)).unwrap();
        let p = scene.local_to_global(leaf, Point::new(1.0, 1.0)).unwrap();
        assert_eq!(p, Point::new(122.0, 12.0));
        let back = scene.global_to_local(leaf, p).unwrap();
        assert!((back - Point::new(1.0, 1.0)).hypot() < 1e-12);
    }

    #[test]
    fn later_sibling_is_picked_first() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let a = button(&mut scene, stage, 0.0, 0.0, 100.0, 100.0);
        let b = button(&mut scene, stage, 50.0, 50.0, 100.0, 100.0);
        let p = Point::new(75.0, 75.0);
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(b));
        let corner = Point::new(10.0, 10.0);
        assert_eq!(scene.hit_test(corner, PickMode::PointerInput), Some(a));
        scene.set_child_index(stage, b, 0).unwrap();
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(a));
    }

    #[test]
    fn picking_is_deterministic() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let _a = button(&mut scene, stage, 0.0, 0.0, 40.0, 40.0);
        let b = button(&mut scene, stage, 20.0, 20.0, 40.0, 40.0);
        let p = Point::new(30.0, 30.0);
        for _ in 0..10 {
            assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(b));
        }
    }

    #[test]
    fn hidden_transparent_and_flat_nodes_are_skipped() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let under = button(&mut scene, stage, 0.0, 0.0, 100.0, 100.0);
        let over = button(&mut scene, stage, 0.0, 0.0, 100.0, 100.0);
        let p = Point::new(10.0, 10.0);

        scene.props_mut(over).unwrap().visible = false;
        assert_eq!(scene.hit_test(p, PickMode::All), Some(under));
        scene.props_mut(over).unwrap().visible = true;

        scene.props_mut(over).unwrap().alpha = 0.0;
        assert_eq!(scene.hit_test(p, PickMode::All), Some(under));
        scene.props_mut(over).unwrap().alpha = 0.5;

        scene.props_mut(over).unwrap().placement.scale_x = 0.0;
        assert_eq!(scene.hit_test(p, PickMode::All), Some(under));
        scene.props_mut(over).unwrap().placement.scale_x = 1.0;

        assert_eq!(scene.hit_test(p, PickMode::All), Some(over));
    }

    #[test]
    fn pointer_flags_gate_traversal_in_pointer_mode() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let under = button(&mut scene, stage, 0.0, 0.0, 100.0, 100.0);
        let group = scene.create_child(stage, NodeProps::default()).unwrap();
        let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 100.0, 100.0));
        scene.set_input(group, Some(input)).unwrap();
        let inner = button(&mut scene, group, 0.0, 0.0, 50.0, 50.0);
        let p = Point::new(10.0, 10.0);

        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(inner));

        // Children disabled: the group itself becomes the leaf.
        scene
            .input_mut(group)
            .unwrap()
            .set_pointer_children_enabled(false);
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(group));
        assert_eq!(scene.hit_test(p, PickMode::All), Some(inner));

        // Both disabled: the whole subtree is skipped.
        scene.input_mut(group).unwrap().set_pointer_enabled(false);
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(under));
        // The group still cannot be a leaf in geometry mode.
        scene.input_mut(inner).unwrap().set_pointer_enabled(false);
        assert_eq!(scene.hit_test(p, PickMode::All), Some(under));
    }

    #[test]
    fn nodes_without_hit_area_pass_through() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let group = scene.create_child(stage, NodeProps::at(10.0, 10.0)).unwrap();
        scene.set_input(group, Some(InputCapability::new())).unwrap();
        let p = Point::new(15.0, 15.0);
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), None);
        let leaf = button(&mut scene, group, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(scene.hit_test(p, PickMode::PointerInput), Some(leaf));
        let edge = Point::new(20.0, 15.0);
        assert_eq!(scene.hit_test(edge, PickMode::PointerInput), None);
    }

    #[test]
    fn picking_uses_inverse_transform() {
        let mut scene = Scene::new();
        let stage = scene.stage();
        let id = scene
            .create_child(
                stage,
                NodeProps {
                    placement: Placement {
                        x: 100.0,
                        y: 100.0,
                        rotation: 45.0,
                        reg_x: 10.0,
                        reg_y: 10.0,
                        ..Placement::default()
                    },
                    ..NodeProps::default()
                },
            )
            .unwrap();
        let input = InputCapability::new().with_hit_area(HitArea::circle(10.0, 10.0, 5.0));
        scene.set_input(id, Some(input)).unwrap();
        let pick = |x, y| scene.hit_test(Point::new(x, y), PickMode::PointerInput);
        assert_eq!(pick(100.0, 100.0), Some(id));
        assert_eq!(pick(103.0, 103.0), Some(id));
        assert_eq!(pick(104.0, 104.0), None);
    }

    #[test]
    fn payload_round_trip() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeProps::default());
        scene.set_payload(id, Some(Box::new(42_u32))).unwrap();
        assert_eq!(scene.payload::<u32>(id), Some(&42));
        assert_eq!(scene.payload::<i64>(id), None);
    }
}
