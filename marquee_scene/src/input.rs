// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input capability attached to scene nodes.
//!
//! A node that wants pointer interaction carries an [`InputCapability`]: flags that say
//! whether the node and its children take part in picking, an optional [`HitArea`], an
//! optional cursor, and eight [`PointerSignal`]s that the interaction layer fires.
//!
//! Signals are reference counted so that a dispatcher can clone one out of the scene and
//! invoke it while handing the handlers mutable access to that same scene.

use alloc::rc::Rc;
use alloc::string::String;

use kurbo::Point;
use marquee_signal::MulticastEvent;

use crate::shape::HitArea;
use crate::types::NodeId;
use crate::Scene;

bitflags::bitflags! {
    /// Flags controlling pointer picking for a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerFlags: u8 {
        /// The node itself can be the picked leaf (it also needs a hit area).
        const ENABLED  = 0b0000_0001;
        /// The node's children are tested.
        const CHILDREN = 0b0000_0010;
    }
}

impl Default for PointerFlags {
    fn default() -> Self {
        Self::ENABLED | Self::CHILDREN
    }
}

/// Which of the eight pointer signals is being fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// The pointer entered the node's chain (fired on every node of a changed chain).
    Over,
    /// The pointer left the node's chain (fired on every node of a changed chain).
    Out,
    /// The pointer crossed into the node's subtree.
    RollOver,
    /// The pointer crossed out of the node's subtree.
    RollOut,
    /// The primary pointer was pressed over the node's chain.
    Press,
    /// The primary pointer was released.
    Release,
    /// A press and release happened over the same chain.
    Click,
    /// A press was abandoned.
    Cancel,
}

/// Payload handed to every pointer signal handler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which signal is firing.
    pub kind: PointerEventKind,
    /// Leaf of the chain being dispatched; the same for every handler of one walk.
    pub target: NodeId,
    /// Node whose handlers are running.
    pub current: NodeId,
    /// Global pointer position, or `None` when the pointer is not present.
    pub position: Option<Point>,
}

/// Signal type carried by an [`InputCapability`].
pub type PointerSignal = MulticastEvent<Scene, PointerEvent>;

/// Pointer interaction data for one node.
#[derive(Debug)]
pub struct InputCapability {
    /// Picking flags.
    pub flags: PointerFlags,
    /// Local-space hit shape. Without one the node is only a pass-through container.
    pub hit_area: Option<HitArea>,
    /// Cursor requested while this node is the deepest cursor-bearing node under the pointer.
    pub cursor: Option<String>,
    /// Fired on every node of the new chain when the chain changes.
    pub over: Rc<PointerSignal>,
    /// Fired on every node of the old chain when the chain changes.
    pub out: Rc<PointerSignal>,
    /// Fired on nodes newly entered below the common ancestor.
    pub roll_over: Rc<PointerSignal>,
    /// Fired on nodes left below the common ancestor.
    pub roll_out: Rc<PointerSignal>,
    /// Fired on every node of the press chain.
    pub press: Rc<PointerSignal>,
    /// Fired on release.
    pub release: Rc<PointerSignal>,
    /// Fired after release when the chain did not change since the press.
    pub click: Rc<PointerSignal>,
    /// Fired on pressed nodes when a press is abandoned.
    pub cancel: Rc<PointerSignal>,
}

impl Default for InputCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCapability {
    /// Capability with both flags set, no hit area and no cursor.
    pub fn new() -> Self {
        Self {
            flags: PointerFlags::default(),
            hit_area: None,
            cursor: None,
            over: Rc::default(),
            out: Rc::default(),
            roll_over: Rc::default(),
            roll_out: Rc::default(),
            press: Rc::default(),
            release: Rc::default(),
            click: Rc::default(),
            cancel: Rc::default(),
        }
    }

    /// Set the hit area.
    pub fn with_hit_area(mut self, area: impl Into<HitArea>) -> Self {
        self.hit_area = Some(area.into());
        self
    }

    /// Set the cursor.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Replace the picking flags.
    pub fn with_flags(mut self, flags: PointerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether the node itself can be a picked leaf.
    pub fn pointer_enabled(&self) -> bool {
        self.flags.contains(PointerFlags::ENABLED)
    }

    /// Whether the node's children are tested.
    pub fn pointer_children_enabled(&self) -> bool {
        self.flags.contains(PointerFlags::CHILDREN)
    }

    /// Toggle [`PointerFlags::ENABLED`].
    pub fn set_pointer_enabled(&mut self, enabled: bool) {
        self.flags.set(PointerFlags::ENABLED, enabled);
    }

    /// Toggle [`PointerFlags::CHILDREN`].
    pub fn set_pointer_children_enabled(&mut self, enabled: bool) {
        self.flags.set(PointerFlags::CHILDREN, enabled);
    }

    /// The signal fired for `kind`.
    pub fn signal(&self, kind: PointerEventKind) -> &Rc<PointerSignal> {
        match kind {
            PointerEventKind::Over => &self.over,
            PointerEventKind::Out => &self.out,
            PointerEventKind::RollOver => &self.roll_over,
            PointerEventKind::RollOut => &self.roll_out,
            PointerEventKind::Press => &self.press,
            PointerEventKind::Release => &self.release,
            PointerEventKind::Click => &self.click,
            PointerEventKind::Cancel => &self.cancel,
        }
    }
}
