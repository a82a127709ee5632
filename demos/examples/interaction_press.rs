// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press, release, click and cancel on a pair of buttons.
//!
//! A click handler toggles a counter stored in the button's payload, showing that handlers
//! receive the scene mutably. The second half drags off the pressed button before
//! releasing, which cancels it and releases the chain under the pointer instead.
//!
//! Run:
//! - `cargo run -p marquee_demos --example interaction_press`

use std::any::Any;
use std::rc::Rc;

use marquee_interaction::{InteractionChainManager, PointerState};
use marquee_scene::{HitArea, InputCapability, NodeProps, PointerEvent, PointerEventKind, Scene};

struct Reporter;

fn report(_: &Reporter, _: &mut Scene, e: &PointerEvent) {
    println!("  {:?} current={:?} target={:?}", e.kind, e.current, e.target);
}

fn count_click(_: &Reporter, scene: &mut Scene, e: &PointerEvent) {
    if e.current != e.target {
        return;
    }
    let clicks = scene.payload::<u32>(e.current).copied().unwrap_or(0);
    let payload: Box<dyn Any> = Box::new(clicks + 1);
    scene.set_payload(e.current, Some(payload)).unwrap();
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let reporter = Rc::new(Reporter);
    let mut scene = Scene::new();
    let stage = scene.stage();
    scene.set_input(stage, Some(InputCapability::new())).unwrap();

    let mut buttons = Vec::new();
    for i in 0..2 {
        let b = scene
            .create_child(stage, NodeProps::at(i as f64 * 100.0, 0.0))
            .unwrap();
        scene
            .set_input(
                b,
                Some(InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 80.0, 30.0))),
            )
            .unwrap();
        buttons.push(b);
    }
    for &node in buttons.iter().chain([&stage]) {
        let input = scene.input(node).unwrap();
        for kind in [
            PointerEventKind::Press,
            PointerEventKind::Release,
            PointerEventKind::Click,
            PointerEventKind::Cancel,
        ] {
            input.signal(kind).add(report, &reporter).unwrap();
        }
        input.click.add(count_click, &reporter).unwrap();
    }

    let mut manager = InteractionChainManager::new(PointerState::new(), ());

    println!("click on the first button:");
    manager.pointer_mut().move_to((10.0, 10.0));
    manager.press(&mut scene).unwrap();
    manager.release(&mut scene).unwrap();
    assert_eq!(scene.payload::<u32>(buttons[0]), Some(&1));

    println!("press the first button, release over the second:");
    manager.press(&mut scene).unwrap();
    manager.pointer_mut().move_to((110.0, 10.0));
    manager.release(&mut scene).unwrap();
    assert_eq!(scene.payload::<u32>(buttons[1]), None);

    println!("press, then the window loses focus:");
    manager.press(&mut scene).unwrap();
    manager.cancel(&mut scene).unwrap();
    assert!(!manager.is_pressed());
}
