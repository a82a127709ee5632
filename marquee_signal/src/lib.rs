// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee Signal: an ordered multicast callback registry.
//!
//! A [`MulticastEvent`] holds (callback, receiver) pairs and calls them in registration
//! order. It is the primitive behind every pointer event a scene node exposes, but it has
//! no knowledge of scenes and can be used for any single-threaded notification.
//!
//! ## Guarantees
//!
//! - Registration order is dispatch order.
//! - A pair is registered at most once; pair identity is the callback's address together
//!   with the receiver's allocation. Function addresses are not guaranteed unique: the
//!   compiler may merge functions with identical bodies, which then count as the same
//!   callback. Callbacks that behave differently never share an address.
//! - Listeners may be added or removed from inside a callback. Removing a listener that has
//!   not yet been called in the current cycle prevents the call; removing one that already
//!   ran has no effect on the cycle; no remaining listener is skipped.
//! - Listeners added during a dispatch are first called by the next [`MulticastEvent::invoke`].
//! - Re-entrant invocation of the same event is rejected with
//!   [`EventError::ReentrantInvocation`]. Different events may be invoked from inside each
//!   other's callbacks.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use marquee_signal::MulticastEvent;
//!
//! struct Counter(Cell<u32>);
//!
//! fn bump(counter: &Counter, total: &mut u32, step: &u32) {
//!     counter.0.set(counter.0.get() + 1);
//!     *total += *step;
//! }
//!
//! let event: MulticastEvent<u32, u32> = MulticastEvent::new();
//! let counter = Rc::new(Counter(Cell::new(0)));
//! event.add(bump, &counter).unwrap();
//!
//! let mut total = 0;
//! event.invoke(&mut total, &5).unwrap();
//! event.invoke(&mut total, &5).unwrap();
//! assert_eq!(total, 10);
//! assert_eq!(counter.0.get(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;

pub use error::EventError;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// Callback signature accepted by [`MulticastEvent::add`].
///
/// The receiver is bound as the first argument, followed by the invocation context and the
/// event payload.
pub type Callback<R, C, E> = fn(&R, &mut C, &E);

/// Identity of a (callback, receiver) pair.
///
/// The callback half has the same meaning as [`core::ptr::fn_addr_eq`]: equal for the same
/// function, and possibly equal for distinct functions the compiler merged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ListenerKey {
    callback: *const (),
    receiver: *const (),
}

impl ListenerKey {
    fn of<R, C: ?Sized, E: ?Sized>(callback: Callback<R, C, E>, receiver: &Rc<R>) -> Self {
        Self {
            callback: callback as *const (),
            receiver: Rc::as_ptr(receiver).cast::<()>(),
        }
    }
}

struct Entry<C: ?Sized, E: ?Sized> {
    key: ListenerKey,
    call: Rc<dyn Fn(&mut C, &E)>,
}

/// Progress through an in-flight `invoke`.
///
/// `next` is the index of the next entry to call, `end` the exclusive bound captured at the
/// start of the cycle (adjusted by removals).
#[derive(Copy, Clone, Debug)]
struct Cursor {
    next: usize,
    end: usize,
}

/// Clears the dispatch cursor when an invocation finishes or unwinds.
struct CursorGuard<'a>(&'a Cell<Option<Cursor>>);

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.0.set(None);
    }
}

/// Ordered registry of (callback, receiver) pairs.
///
/// `C` is the mutable context handed to every callback for the duration of an
/// [`invoke`](Self::invoke); `E` is the event payload.
///
/// All methods take `&self` so that callbacks, which usually reach the event through an
/// [`Rc`], can add and remove listeners while a dispatch is in progress.
pub struct MulticastEvent<C: ?Sized, E: ?Sized> {
    entries: RefCell<Vec<Entry<C, E>>>,
    cursor: Cell<Option<Cursor>>,
}

impl<C: ?Sized, E: ?Sized> core::fmt::Debug for MulticastEvent<C, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MulticastEvent")
            .field("listeners", &self.entries.borrow().len())
            .field("invoking", &self.cursor.get().is_some())
            .finish()
    }
}

impl<C: ?Sized + 'static, E: ?Sized + 'static> Default for MulticastEvent<C, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static, E: ?Sized + 'static> MulticastEvent<C, E> {
    /// Create an event with no listeners.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            cursor: Cell::new(None),
        }
    }

    /// Register `callback` bound to `receiver`.
    ///
    /// Fails with [`EventError::DuplicateRegistration`] if the same pair is already present.
    /// Two functions with identical bodies may be merged into one address and are then the
    /// same callback for this check; bind such callbacks to distinct receivers.
    pub fn add<R: 'static>(
        &self,
        callback: Callback<R, C, E>,
        receiver: &Rc<R>,
    ) -> Result<(), EventError> {
        let key = ListenerKey::of(callback, receiver);
        let mut entries = self.entries.borrow_mut();
        if entries.iter().any(|e| e.key == key) {
            return Err(EventError::DuplicateRegistration);
        }
        let receiver = Rc::clone(receiver);
        entries.push(Entry {
            key,
            call: Rc::new(move |cx: &mut C, event: &E| callback(&receiver, cx, event)),
        });
        Ok(())
    }

    /// Unregister the pair previously added with [`add`](Self::add).
    ///
    /// Fails with [`EventError::NotRegistered`] if the pair is absent. Safe to call from
    /// inside a callback of this event, including for the callback currently running.
    /// Pairs are matched by callback address, with the merging caveat of
    /// [`add`](Self::add).
    pub fn remove<R: 'static>(
        &self,
        callback: Callback<R, C, E>,
        receiver: &Rc<R>,
    ) -> Result<(), EventError> {
        let key = ListenerKey::of(callback, receiver);
        let index = {
            let mut entries = self.entries.borrow_mut();
            let index = entries
                .iter()
                .position(|e| e.key == key)
                .ok_or(EventError::NotRegistered)?;
            entries.remove(index);
            index
        };
        if let Some(mut cursor) = self.cursor.get() {
            if index < cursor.next {
                // Already called this cycle; shift the window left.
                cursor.next -= 1;
                cursor.end -= 1;
            } else if index < cursor.end {
                cursor.end -= 1;
            }
            self.cursor.set(Some(cursor));
        }
        Ok(())
    }

    /// Remove every listener.
    ///
    /// If called during a dispatch, listeners not yet called in that cycle are dropped.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        if self.cursor.get().is_some() {
            self.cursor.set(Some(Cursor { next: 0, end: 0 }));
        }
    }

    /// Returns true if the pair is registered.
    pub fn contains<R: 'static>(&self, callback: Callback<R, C, E>, receiver: &Rc<R>) -> bool {
        let key = ListenerKey::of(callback, receiver);
        self.entries.borrow().iter().any(|e| e.key == key)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns true while [`invoke`](Self::invoke) is running.
    pub fn is_invoking(&self) -> bool {
        self.cursor.get().is_some()
    }

    /// Call every listener registered at the time of the call, in registration order.
    ///
    /// Fails with [`EventError::ReentrantInvocation`] if this event is already dispatching;
    /// in that case no listener is called.
    pub fn invoke(&self, cx: &mut C, event: &E) -> Result<(), EventError> {
        if self.cursor.get().is_some() {
            tracing::debug!("rejected re-entrant invoke");
            return Err(EventError::ReentrantInvocation);
        }
        let end = self.entries.borrow().len();
        self.cursor.set(Some(Cursor { next: 0, end }));
        let _guard = CursorGuard(&self.cursor);

        while let Some(mut cursor) = self.cursor.get() {
            if cursor.next >= cursor.end {
                break;
            }
            // The entry list must not stay borrowed while the callback runs.
            let call = Rc::clone(&self.entries.borrow()[cursor.next].call);
            cursor.next += 1;
            self.cursor.set(Some(cursor));
            call(cx, event);
        }
        Ok(())
    }
}
