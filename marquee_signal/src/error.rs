// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by [`MulticastEvent`](crate::MulticastEvent).

/// Programmer errors reported by [`MulticastEvent`](crate::MulticastEvent).
///
/// None of these are recoverable runtime conditions; they indicate misuse of
/// the registry and are reported immediately.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventError {
    /// The exact (callback, receiver) pair is already registered.
    #[error("listener is already registered")]
    DuplicateRegistration,
    /// The (callback, receiver) pair was never registered, or was already removed.
    #[error("listener is not registered")]
    NotRegistered,
    /// `invoke` was called while the same event was already dispatching.
    #[error("event is already being invoked")]
    ReentrantInvocation,
}
