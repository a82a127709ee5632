// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor resolution over an interaction chain.

use marquee_scene::Scene;

use crate::pool::{Chain, ChainPool};

/// Cursor of the deepest node in `chain` that declares one.
///
/// Returns `None` when no node in the chain has a cursor; callers fall back to their
/// stage-level default.
pub fn resolve_cursor<'a>(scene: &'a Scene, pool: &ChainPool, chain: &Chain) -> Option<&'a str> {
    let mut walk = pool.walk(chain);
    while let Some((_, node)) = walk.next(pool) {
        if let Some(cursor) = scene.input(node).and_then(|i| i.cursor.as_deref()) {
            return Some(cursor);
        }
    }
    None
}
