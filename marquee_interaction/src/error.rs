// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the interaction chain manager.

use marquee_signal::EventError;

/// Failure reported by an [`InteractionChainManager`](crate::InteractionChainManager) entry point.
///
/// Chain bookkeeping is always completed before an error is returned: every pooled link
/// is freed or published, so the manager stays usable.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InteractionError {
    /// A pointer signal refused to dispatch.
    #[error("pointer signal dispatch failed: {0}")]
    Event(#[from] EventError),
}
