// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame interaction chain state machine.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use marquee_scene::{NodeId, PickMode, PointerEvent, PointerEventKind, Scene};
use marquee_signal::EventError;

use crate::cursor::resolve_cursor;
use crate::error::InteractionError;
use crate::pointer::{CursorSink, PrimaryPointer};
use crate::pool::{Chain, ChainPool};

/// Construction-time settings for an [`InteractionChainManager`].
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    /// Cursor applied when no node in the current chain declares one.
    pub default_cursor: String,
    /// How picking treats input flags.
    pub pick_mode: PickMode,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            default_cursor: String::from("default"),
            pick_mode: PickMode::PointerInput,
        }
    }
}

/// Tracks the chain under the primary pointer and turns its changes into pointer signals.
///
/// Call [`point`](Self::point) once per frame and forward raw transitions to
/// [`press`](Self::press), [`release`](Self::release) and [`cancel`](Self::cancel).
/// Every walk runs leaf→root. Within one node of a changing chain `out` precedes
/// `roll-out` and `roll-over` precedes `over`.
///
/// Chains hold [`NodeId`]s, so a node detached from the scene during a press still receives
/// its `cancel` or `release`. A node destroyed in the meantime is skipped.
#[derive(Debug)]
pub struct InteractionChainManager<P, S = ()> {
    pointer: P,
    cursor_sink: S,
    config: InteractionConfig,
    pool: ChainPool,
    current: Chain,
    press: Option<Chain>,
    active_cursor: Option<String>,
    position: Option<Point>,
}

impl<P: PrimaryPointer, S: CursorSink> InteractionChainManager<P, S> {
    /// Create a manager with the default configuration.
    pub fn new(pointer: P, cursor_sink: S) -> Self {
        Self::with_config(pointer, cursor_sink, InteractionConfig::default())
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(pointer: P, cursor_sink: S, config: InteractionConfig) -> Self {
        Self {
            pointer,
            cursor_sink,
            config,
            pool: ChainPool::new(),
            current: Chain::new(),
            press: None,
            active_cursor: None,
            position: None,
        }
    }

    /// The pointer source.
    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    /// Mutable access to the pointer source, for hosts that feed it directly.
    pub fn pointer_mut(&mut self) -> &mut P {
        &mut self.pointer
    }

    /// The cursor sink.
    pub fn cursor_sink(&self) -> &S {
        &self.cursor_sink
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The chain link pool.
    pub fn pool(&self) -> &ChainPool {
        &self.pool
    }

    /// Pointer position sampled by the last [`point`](Self::point).
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Leaf of the current chain.
    pub fn hovered(&self) -> Option<NodeId> {
        self.pool.leaf(&self.current)
    }

    /// Snapshot of the current chain, root to leaf.
    pub fn current_chain(&self) -> Vec<NodeId> {
        self.pool.iter(&self.current).collect()
    }

    /// Returns true while a press is outstanding.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Leaf of the press chain, if a press is outstanding over a node.
    pub fn pressed_target(&self) -> Option<NodeId> {
        self.press.as_ref().and_then(|c| self.pool.leaf(c))
    }

    /// Snapshot of the press chain, root to leaf. Empty when no press is outstanding.
    pub fn pressed_chain(&self) -> Vec<NodeId> {
        self.press
            .as_ref()
            .map(|c| self.pool.iter(c).collect())
            .unwrap_or_default()
    }

    /// Cursor most recently applied to the sink.
    pub fn active_cursor(&self) -> Option<&str> {
        self.active_cursor.as_deref()
    }

    /// Re-pick under the pointer and fire the chain transitions.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn point(&mut self, scene: &mut Scene) -> Result<(), InteractionError> {
        let mut firing = Firing::new(self.position);
        self.point_with(scene, &mut firing);
        firing.finish()
    }

    /// Start a press over the current chain.
    ///
    /// An outstanding press is cancelled first. The press chain is recorded before any
    /// `press` handler runs.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn press(&mut self, scene: &mut Scene) -> Result<(), InteractionError> {
        let mut firing = Firing::new(self.position);
        if self.press.is_some() {
            tracing::warn!("press while already pressed; cancelling the outstanding press");
            self.cancel_with(scene, &mut firing);
        }
        self.point_with(scene, &mut firing);
        let press = self.press.insert(self.pool.copy(&self.current));
        tracing::debug!(leaf = ?self.pool.leaf(press), depth = press.len(), "press");
        fire_chain(&self.pool, scene, &mut firing, press, PointerEventKind::Press);
        firing.finish()
    }

    /// Finish the outstanding press.
    ///
    /// If the chain under the pointer is exactly the press chain, every pressed node gets
    /// `release` and then `click`. Otherwise pressed nodes below the common ancestor get
    /// `cancel` and every node of the current chain gets `release`, pressed or not.
    /// Without a press this only refreshes the chain.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn release(&mut self, scene: &mut Scene) -> Result<(), InteractionError> {
        let mut firing = Firing::new(self.position);
        self.point_with(scene, &mut firing);
        let Some(press) = self.press.take() else {
            tracing::debug!("release without press");
            return firing.finish();
        };
        let mut press = Lease::new(&mut self.pool, press);
        if press.pool.same(&press.chain, &self.current) {
            tracing::debug!(leaf = ?press.leaf(), "release over press chain");
            press.fire(scene, &mut firing, PointerEventKind::Release);
            press.fire(scene, &mut firing, PointerEventKind::Click);
        } else {
            let depth = press.pool.common_depth(&press.chain, &self.current);
            tracing::debug!(
                pressed = ?press.leaf(),
                hovered = ?press.pool.leaf(&self.current),
                depth,
                "release away from press chain"
            );
            press.drain(scene, &mut firing, &[PointerEventKind::Cancel], depth);
            drop(press);
            fire_chain(&self.pool, scene, &mut firing, &self.current, PointerEventKind::Release);
        }
        firing.finish()
    }

    /// Abandon the outstanding press, firing `cancel` on every pressed node.
    ///
    /// Hosts call this when the pointer leaves the surface or the window loses focus.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn cancel(&mut self, scene: &mut Scene) -> Result<(), InteractionError> {
        let mut firing = Firing::new(self.position);
        self.cancel_with(scene, &mut firing);
        firing.finish()
    }

    /// Cancel any press and leave the whole current chain, returning to idle.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn reset(&mut self, scene: &mut Scene) -> Result<(), InteractionError> {
        let mut firing = Firing::new(self.position);
        self.cancel_with(scene, &mut firing);
        let current = core::mem::take(&mut self.current);
        let mut current = Lease::new(&mut self.pool, current);
        tracing::debug!(leaf = ?current.leaf(), "reset");
        current.drain(
            scene,
            &mut firing,
            &[PointerEventKind::Out, PointerEventKind::RollOut],
            0,
        );
        drop(current);
        self.position = None;
        self.update_cursor(scene);
        firing.finish()
    }

    fn point_with(&mut self, scene: &mut Scene, firing: &mut Firing) {
        self.position = self.pointer.position();
        firing.position = self.position;
        let target = self
            .position
            .and_then(|p| scene.hit_test(p, self.config.pick_mode));
        let next = self.pool.build(scene, target);
        let depth = self.pool.common_depth(&self.current, &next);
        let changed = !self.pool.same(&self.current, &next);
        if changed {
            tracing::trace!(
                from = ?self.pool.leaf(&self.current),
                to = ?target,
                depth,
                "pointer chain changed"
            );
        }

        let old = core::mem::take(&mut self.current);
        let mut swap = ChainSwap {
            pool: &mut self.pool,
            current: &mut self.current,
            old,
            next,
        };
        swap.leave(scene, firing, depth, changed);
        swap.enter(scene, firing, depth, changed);
        drop(swap);
        self.update_cursor(scene);
    }

    fn cancel_with(&mut self, scene: &mut Scene, firing: &mut Firing) {
        let Some(press) = self.press.take() else {
            return;
        };
        let mut press = Lease::new(&mut self.pool, press);
        tracing::debug!(leaf = ?press.leaf(), "cancel");
        press.drain(scene, firing, &[PointerEventKind::Cancel], 0);
    }

    fn update_cursor(&mut self, scene: &Scene) {
        let cursor = resolve_cursor(scene, &self.pool, &self.current)
            .unwrap_or(self.config.default_cursor.as_str());
        if self.active_cursor.as_deref() == Some(cursor) {
            return;
        }
        tracing::trace!(cursor, "cursor changed");
        self.cursor_sink.set_cursor(cursor);
        self.active_cursor = Some(String::from(cursor));
    }
}

/// Fire `kind` on every node of `chain`, leaf→root, targeting its leaf.
fn fire_chain(
    pool: &ChainPool,
    scene: &mut Scene,
    firing: &mut Firing,
    chain: &Chain,
    kind: PointerEventKind,
) {
    let Some(target) = pool.leaf(chain) else {
        return;
    };
    let mut walk = pool.walk(chain);
    while let Some((_, node)) = walk.next(pool) {
        firing.fire(scene, node, kind, target);
    }
}

/// A chain taken out of the manager for one walk.
///
/// Its links go back to the pool on drop, whether the walk finished or a handler unwound.
struct Lease<'a> {
    pool: &'a mut ChainPool,
    chain: Chain,
}

impl<'a> Lease<'a> {
    fn new(pool: &'a mut ChainPool, chain: Chain) -> Self {
        Self { pool, chain }
    }

    fn leaf(&self) -> Option<NodeId> {
        self.pool.leaf(&self.chain)
    }

    fn fire(&self, scene: &mut Scene, firing: &mut Firing, kind: PointerEventKind) {
        fire_chain(&*self.pool, scene, firing, &self.chain, kind);
    }

    /// Pop every link leaf→root, firing `kinds` on nodes at depth `from_depth` or deeper.
    fn drain(
        &mut self,
        scene: &mut Scene,
        firing: &mut Firing,
        kinds: &[PointerEventKind],
        from_depth: usize,
    ) {
        let Some(target) = self.leaf() else {
            return;
        };
        let mut pos = self.chain.len();
        while let Some(node) = self.pool.pop_leaf(&mut self.chain) {
            pos -= 1;
            if pos >= from_depth {
                for &kind in kinds {
                    firing.fire(scene, node, kind, target);
                }
            }
        }
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.pool.free(&mut self.chain);
    }
}

/// The old and new chains of one [`point`](InteractionChainManager::point).
///
/// On drop, whatever is left of the old chain is freed and the new chain is published as
/// the current one, so a handler unwinding mid-walk leaves the pool balanced.
struct ChainSwap<'a> {
    pool: &'a mut ChainPool,
    current: &'a mut Chain,
    old: Chain,
    next: Chain,
}

impl ChainSwap<'_> {
    /// Pop the old chain leaf→root: `out` on every node if the chain changed, `roll-out`
    /// below the common ancestor.
    fn leave(&mut self, scene: &mut Scene, firing: &mut Firing, depth: usize, changed: bool) {
        let Some(target) = self.pool.leaf(&self.old) else {
            return;
        };
        let mut pos = self.old.len();
        while let Some(node) = self.pool.pop_leaf(&mut self.old) {
            pos -= 1;
            if changed {
                firing.fire(scene, node, PointerEventKind::Out, target);
            }
            if pos >= depth {
                firing.fire(scene, node, PointerEventKind::RollOut, target);
            }
        }
    }

    /// Walk the new chain leaf→root: `roll-over` below the common ancestor, `over` on every
    /// node if the chain changed.
    fn enter(&self, scene: &mut Scene, firing: &mut Firing, depth: usize, changed: bool) {
        let pool: &ChainPool = &*self.pool;
        let Some(target) = pool.leaf(&self.next) else {
            return;
        };
        let mut walk = pool.walk(&self.next);
        while let Some((pos, node)) = walk.next(pool) {
            if pos >= depth {
                firing.fire(scene, node, PointerEventKind::RollOver, target);
            }
            if changed {
                firing.fire(scene, node, PointerEventKind::Over, target);
            }
        }
    }
}

impl Drop for ChainSwap<'_> {
    fn drop(&mut self) {
        self.pool.free(&mut self.old);
        *self.current = core::mem::take(&mut self.next);
    }
}

/// Fires pointer signals for one entry point and records the first dispatch failure.
///
/// After a failure no further handlers run, but callers keep walking so that links are
/// freed and chains are published.
#[derive(Debug)]
struct Firing {
    position: Option<Point>,
    error: Option<EventError>,
}

impl Firing {
    fn new(position: Option<Point>) -> Self {
        Self {
            position,
            error: None,
        }
    }

    fn fire(&mut self, scene: &mut Scene, node: NodeId, kind: PointerEventKind, target: NodeId) {
        if self.error.is_some() {
            return;
        }
        let Some(signal) = scene.input(node).map(|input| Rc::clone(input.signal(kind))) else {
            return;
        };
        let event = PointerEvent {
            kind,
            target,
            current: node,
            position: self.position,
        };
        if let Err(err) = signal.invoke(scene, &event) {
            tracing::debug!(?node, ?kind, %err, "pointer signal dispatch failed");
            self.error = Some(err);
        }
    }

    fn finish(self) -> Result<(), InteractionError> {
        match self.error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}
