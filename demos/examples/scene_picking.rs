// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picking through nested, rotated and scaled nodes.
//!
//! Builds a small scene, then probes a few global points and prints which node is on top
//! along with the point mapped into that node's local space.
//!
//! Run:
//! - `cargo run -p marquee_demos --example scene_picking`

use kurbo::Point;
use marquee_scene::{HitArea, InputCapability, NodeId, NodeProps, PickMode, Placement, Scene};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .init();

    let mut scene = Scene::new();
    let stage = scene.stage();

    // A panel rotated 90° about its own center.
    let panel_props = NodeProps {
        placement: Placement {
            x: 200.0,
            y: 200.0,
            rotation: 90.0,
            reg_x: 50.0,
            reg_y: 50.0,
            ..Placement::default()
        },
        ..NodeProps::default()
    };
    let panel = scene.create_child(stage, panel_props).unwrap();
    scene
        .set_input(
            panel,
            Some(InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 100.0, 100.0))),
        )
        .unwrap();

    // A double-size round knob inside the panel's top-left corner.
    let knob_props = NodeProps {
        placement: Placement {
            x: 20.0,
            y: 20.0,
            scale_x: 2.0,
            scale_y: 2.0,
            ..Placement::default()
        },
        ..NodeProps::default()
    };
    let knob = scene.create_child(panel, knob_props).unwrap();
    scene
        .set_input(
            knob,
            Some(InputCapability::new().with_hit_area(HitArea::circle(0.0, 0.0, 5.0))),
        )
        .unwrap();

    // A hidden overlay never wins.
    let overlay = scene
        .create_child(
            stage,
            NodeProps {
                visible: false,
                ..NodeProps::default()
            },
        )
        .unwrap();
    scene
        .set_input(
            overlay,
            Some(InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 1000.0, 1000.0))),
        )
        .unwrap();

    let names = [(stage, "stage"), (panel, "panel"), (knob, "knob"), (overlay, "overlay")];
    let name_of = |id: NodeId| {
        names
            .iter()
            .find(|(n, _)| *n == id)
            .map_or("?", |(_, name)| *name)
    };

    let knob_center = scene.local_to_global(knob, Point::ZERO).unwrap();
    println!("knob center in stage space: {knob_center:?}");
    let knob_area = scene
        .input(knob)
        .and_then(|input| input.hit_area.as_ref())
        .map(HitArea::bounds)
        .unwrap();
    let knob_box = scene
        .concatenated_transform(knob)
        .unwrap()
        .transform_rect_bbox(knob_area);
    println!("knob hit bounds in stage space: {knob_box:?}");
    assert!(knob_box.contains(knob_center));

    for probe in [
        knob_center,
        Point::new(knob_center.x, knob_center.y + 9.0),
        Point::new(200.0, 200.0),
        Point::new(10.0, 10.0),
    ] {
        match scene.hit_test(probe, PickMode::PointerInput) {
            Some(hit) => {
                let local = scene.global_to_local(hit, probe).unwrap();
                println!("{probe:?} -> {} at local {local:?}", name_of(hit));
            }
            None => println!("{probe:?} -> nothing"),
        }
    }

    assert_eq!(scene.hit_test(knob_center, PickMode::PointerInput), Some(knob));
    assert_eq!(scene.hit_test(Point::new(10.0, 10.0), PickMode::All), None);

    // Restacking: bring the knob's parent behind a new sibling covering it.
    let cover = scene.create_child(stage, NodeProps::at(150.0, 150.0)).unwrap();
    scene
        .set_input(
            cover,
            Some(InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 200.0, 200.0))),
        )
        .unwrap();
    assert_eq!(scene.hit_test(knob_center, PickMode::PointerInput), Some(cover));
    let top = scene.children(stage).len() - 1;
    scene.set_child_index(stage, panel, top).unwrap();
    assert_eq!(scene.hit_test(knob_center, PickMode::PointerInput), Some(knob));
    println!("after restack the knob is on top again");
}
