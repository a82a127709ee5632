// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `MulticastEvent` on its own: ordering, self-removal and the re-entrancy guard.
//!
//! Run:
//! - `cargo run -p marquee_demos --example signal_basics`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use marquee_signal::{EventError, MulticastEvent};

type Tick = MulticastEvent<Vec<&'static str>, u32>;

struct Named(&'static str);

fn push(named: &Named, out: &mut Vec<&'static str>, _: &u32) {
    out.push(named.0);
}

/// Removes itself after its first call.
struct Once {
    event: RefCell<Option<Rc<Tick>>>,
    me: RefCell<Option<Rc<Once>>>,
}

fn once(o: &Once, out: &mut Vec<&'static str>, _: &u32) {
    out.push("once");
    if let (Some(event), Some(me)) = (o.event.borrow().as_ref(), o.me.borrow().as_ref()) {
        event.remove(once, me).unwrap();
    }
}

/// Tries to invoke the event it is registered on.
struct Nested {
    event: Rc<Tick>,
    seen: Cell<Option<EventError>>,
}

fn nested(n: &Nested, out: &mut Vec<&'static str>, tick: &u32) {
    if let Err(err) = n.event.invoke(out, tick) {
        n.seen.set(Some(err));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let event = Rc::new(Tick::new());
    let first = Rc::new(Named("first"));
    let second = Rc::new(Named("second"));
    event.add(push, &first).unwrap();
    event.add(push, &second).unwrap();
    assert_eq!(event.add(push, &first), Err(EventError::DuplicateRegistration));

    let o = Rc::new(Once {
        event: RefCell::new(Some(Rc::clone(&event))),
        me: RefCell::new(None),
    });
    *o.me.borrow_mut() = Some(Rc::clone(&o));
    event.add(once, &o).unwrap();

    let n = Rc::new(Nested {
        event: Rc::clone(&event),
        seen: Cell::new(None),
    });
    event.add(nested, &n).unwrap();

    let mut out = Vec::new();
    event.invoke(&mut out, &1).unwrap();
    println!("tick 1: {out:?}");
    out.clear();
    event.invoke(&mut out, &2).unwrap();
    println!("tick 2: {out:?}");

    assert_eq!(out, ["first", "second"]);
    assert_eq!(n.seen.get(), Some(EventError::ReentrantInvocation));

    // Break the receiver cycles before exit.
    o.me.borrow_mut().take();
    o.event.borrow_mut().take();
    event.clear();
}
