// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Scene: a Kurbo-native scene graph with front-to-back picking.
//!
//! Marquee Scene is the display-list half of the Marquee engine's interaction core.
//!
//! - Represents a hierarchy of nodes with a decomposed local [`Placement`] (position, scale,
//!   rotation, skew, registration point), alpha and visibility.
//! - Composes local transforms into global ones with plain [`kurbo::Affine`] math.
//! - Finds the topmost interactive node under a point by walking the tree front to back and
//!   testing each candidate's [`HitArea`] in its own local space.
//!
//! ## Where this fits
//!
//! - Scene: structure, geometry, picking and per-node input signals (this crate).
//! - Interaction: per-frame pointer chains and the over/out/press/release protocol
//!   (`marquee_interaction`).
//! - Rendering: out of scope. A renderer reads [`Scene::concatenated_transform`] and each
//!   node's opaque payload (see [`Scene::set_payload`]).
//!
//! ## Not a retained layout system
//!
//! There is no measurement, no dirty tracking and no spatial index. Picking walks the live
//! tree on demand, so edits are visible immediately and hit tests always reflect the current
//! transforms.
//!
//! ## API overview
//!
//! - [`Scene`]: generational node storage rooted at a stage; hierarchy edits and picking.
//! - [`NodeId`]: copyable handle of a node. Detaching keeps it valid; only
//!   [`Scene::destroy`] invalidates it.
//! - [`NodeProps`]: placement, alpha and visibility.
//! - [`InputCapability`]: pointer flags, hit area, cursor and the eight [`PointerSignal`]s.
//! - [`HitArea`]: rectangle (half-open) or circle (strict) containment.
//! - [`AffineExt`]: append/prepend/invert vocabulary on [`kurbo::Affine`].
//! - [`SceneError`]: cycle, index, membership and liveness errors.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use marquee_scene::{HitArea, InputCapability, NodeProps, PickMode, Scene};
//!
//! let mut scene = Scene::new();
//! let stage = scene.stage();
//!
//! let panel = scene.create_child(stage, NodeProps::at(100.0, 100.0)).unwrap();
//! let back = scene.create_child(panel, NodeProps::default()).unwrap();
//! let front = scene.create_child(panel, NodeProps::at(20.0, 0.0)).unwrap();
//! for id in [back, front] {
//!     let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 50.0, 50.0));
//!     scene.set_input(id, Some(input)).unwrap();
//! }
//!
//! // Both cover (130, 110); the later sibling is on top.
//! assert_eq!(scene.hit_test(Point::new(130.0, 110.0), PickMode::PointerInput), Some(front));
//! assert_eq!(scene.hit_test(Point::new(110.0, 110.0), PickMode::PointerInput), Some(back));
//!
//! // An ancestor can never become a child.
//! assert!(scene.add_child(front, panel).is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod input;
mod scene;
mod shape;
mod transform;
mod types;

pub use error::SceneError;
pub use input::{InputCapability, PointerEvent, PointerEventKind, PointerFlags, PointerSignal};
pub use scene::Scene;
pub use shape::HitArea;
pub use transform::{AffineExt, Placement};
pub use types::{NodeId, NodeProps, PickMode};
