// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Over/out and roll-over/roll-out as the pointer moves across a small tree.
//!
//! The stage holds a toolbar with two buttons. The pointer visits one button, its sibling,
//! the toolbar background and finally leaves the surface. Each frame prints the signals it
//! produced and the cursor pushed to the sink.
//!
//! Run:
//! - `cargo run -p marquee_demos --example interaction_hover`

use std::cell::RefCell;
use std::rc::Rc;

use marquee_interaction::{CursorSink, InteractionChainManager, PointerState};
use marquee_scene::{
    HitArea, InputCapability, NodeId, NodeProps, PointerEvent, PointerEventKind, Scene,
};

#[derive(Default)]
struct Log(RefCell<Vec<String>>);

struct Named {
    name: &'static str,
    log: Rc<Log>,
}

fn record(named: &Named, _: &mut Scene, e: &PointerEvent) {
    named
        .log
        .0
        .borrow_mut()
        .push(format!("{:?}@{}", e.kind, named.name));
}

struct PrintCursor;

impl CursorSink for PrintCursor {
    fn set_cursor(&mut self, cursor: &str) {
        println!("  cursor -> {cursor}");
    }
}

fn listen(scene: &Scene, node: NodeId, name: &'static str, log: &Rc<Log>) {
    let receiver = Rc::new(Named {
        name,
        log: Rc::clone(log),
    });
    let input = scene.input(node).unwrap();
    for kind in [
        PointerEventKind::Over,
        PointerEventKind::Out,
        PointerEventKind::RollOver,
        PointerEventKind::RollOut,
    ] {
        input.signal(kind).add(record, &receiver).unwrap();
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .init();

    let log = Rc::new(Log::default());
    let mut scene = Scene::new();
    let stage = scene.stage();
    scene.set_input(stage, Some(InputCapability::new())).unwrap();

    let toolbar = scene.create_child(stage, NodeProps::at(0.0, 0.0)).unwrap();
    scene
        .set_input(
            toolbar,
            Some(InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 200.0, 40.0))),
        )
        .unwrap();
    let mut buttons = Vec::new();
    for (i, name) in ["save", "open"].into_iter().enumerate() {
        let b = scene
            .create_child(toolbar, NodeProps::at(10.0 + i as f64 * 60.0, 5.0))
            .unwrap();
        let input = InputCapability::new()
            .with_hit_area(HitArea::rect(0.0, 0.0, 50.0, 30.0))
            .with_cursor("pointer");
        scene.set_input(b, Some(input)).unwrap();
        buttons.push((b, name));
    }

    listen(&scene, stage, "stage", &log);
    listen(&scene, toolbar, "toolbar", &log);
    for &(b, name) in &buttons {
        listen(&scene, b, name, &log);
    }

    let mut manager = InteractionChainManager::new(PointerState::new(), PrintCursor);
    let frames: [(&str, Option<(f64, f64)>); 5] = [
        ("enter save", Some((20.0, 10.0))),
        ("stay on save", Some((25.0, 12.0))),
        ("move to open", Some((80.0, 10.0))),
        ("toolbar background", Some((150.0, 20.0))),
        ("leave surface", None),
    ];
    for (label, pos) in frames {
        match pos {
            Some(p) => manager.pointer_mut().move_to(p),
            None => manager.pointer_mut().leave(),
        }
        println!("{label}:");
        manager.point(&mut scene).unwrap();
        let fired = std::mem::take(&mut *log.0.borrow_mut());
        println!("  {}", if fired.is_empty() { "-".to_string() } else { fired.join(" ") });
    }
    assert_eq!(manager.hovered(), None);
    assert_eq!(manager.pool().in_use(), 0);
}
