// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Interaction: per-frame pointer chains over a Marquee scene.
//!
//! Each frame the [`InteractionChainManager`] picks the topmost node under the primary
//! pointer, builds the chain from the stage down to it, diffs that chain against the
//! previous frame's and fires the node-level pointer signals that describe the change.
//! Raw press, release and cancel transitions are forwarded by the host and become
//! `press`, `release`, `click` and `cancel` signals on the chain.
//!
//! ## Signal protocol
//!
//! All walks run leaf→root, and every handler of one walk sees the same
//! [`PointerEvent::target`](marquee_scene::PointerEvent::target).
//!
//! - Chain change: the old chain gets `out` on every node and `roll-out` below the common
//!   ancestor; the new chain gets `roll-over` below the common ancestor and `over` on every
//!   node.
//! - Press: `press` on every node of a copy of the current chain.
//! - Release over the press chain: `release` then `click` on every pressed node.
//! - Release elsewhere: `cancel` on pressed nodes below the common ancestor, then
//!   `release` on every node of the current chain. No `click`.
//! - Cancel: `cancel` on every pressed node.
//!
//! The cursor of the deepest node declaring one is pushed to a [`CursorSink`] whenever it
//! changes, falling back to [`InteractionConfig::default_cursor`].
//!
//! ## Pooling
//!
//! Chains are linked lists in a [`ChainPool`]. Once the pool has grown to the chains a
//! frame needs, steady-state frames allocate nothing.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use marquee_interaction::{InteractionChainManager, PointerState};
//! use marquee_scene::{HitArea, InputCapability, NodeProps, PointerEvent, Scene};
//!
//! struct Clicks(Cell<u32>);
//!
//! fn on_click(clicks: &Clicks, _scene: &mut Scene, _event: &PointerEvent) {
//!     clicks.0.set(clicks.0.get() + 1);
//! }
//!
//! let mut scene = Scene::new();
//! let button = scene.create_child(scene.stage(), NodeProps::at(10.0, 10.0)).unwrap();
//! let input = InputCapability::new()
//!     .with_hit_area(HitArea::rect(0.0, 0.0, 80.0, 24.0))
//!     .with_cursor("pointer");
//! let clicks = Rc::new(Clicks(Cell::new(0)));
//! input.click.add(on_click, &clicks).unwrap();
//! scene.set_input(button, Some(input)).unwrap();
//!
//! let mut manager = InteractionChainManager::new(PointerState::new(), ());
//! manager.pointer_mut().move_to((20.0, 20.0));
//! manager.point(&mut scene).unwrap();
//! assert_eq!(manager.hovered(), Some(button));
//! assert_eq!(manager.active_cursor(), Some("pointer"));
//!
//! manager.press(&mut scene).unwrap();
//! manager.release(&mut scene).unwrap();
//! assert_eq!(clicks.0.get(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cursor;
mod error;
mod manager;
mod pointer;
mod pool;

pub use cursor::resolve_cursor;
pub use error::InteractionError;
pub use manager::{InteractionChainManager, InteractionConfig};
pub use pointer::{CursorSink, PointerState, PrimaryPointer};
pub use pool::{Chain, ChainPool};
