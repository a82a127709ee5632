// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator interfaces: the primary pointer source and the cursor sink.

use kurbo::Point;

/// Source of the single logical pointer driving interaction.
///
/// Mouse and touch arbitration happens upstream; the implementation reports where the
/// primary pointer is, in the same coordinate space as the stage, and whether it is present
/// at all. Raw press, release and cancel transitions are forwarded by the host to
/// [`InteractionChainManager`](crate::InteractionChainManager).
pub trait PrimaryPointer {
    /// Current position, or `None` when no pointer is present.
    fn position(&self) -> Option<Point>;
}

/// Receives the cursor chosen for the current chain.
pub trait CursorSink {
    /// Apply `cursor`. Only called when the resolved cursor changes.
    fn set_cursor(&mut self, cursor: &str);
}

/// Discards cursor changes, for hosts without a cursor.
impl CursorSink for () {
    fn set_cursor(&mut self, _cursor: &str) {}
}

/// A plain pointer sample the host updates from its input events.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    position: Option<Point>,
}

impl PointerState {
    /// A pointer that is not present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pointer present at `p`.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.position = Some(p.into());
    }

    /// Mark the pointer absent (it left the surface or the touch ended).
    pub fn leave(&mut self) {
        self.position = None;
    }

    /// Returns true if the pointer is present.
    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}

impl PrimaryPointer for PointerState {
    fn position(&self) -> Option<Point> {
        self.position
    }
}
