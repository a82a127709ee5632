// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use marquee_interaction::{InteractionChainManager, PointerState};
use marquee_scene::{HitArea, InputCapability, NodeId, NodeProps, PointerEvent, Scene};

fn noop(_: &(), _: &mut Scene, _: &PointerEvent) {}

/// Two sibling towers `depth` nodes tall, every node listening to every signal.
fn towers(depth: usize) -> Scene {
    let mut scene = Scene::new();
    let receiver = std::rc::Rc::new(());
    let stage = scene.stage();
    for tower in 0..2 {
        let mut parent: NodeId = stage;
        for level in 0..depth {
            let offset = if level == 0 { tower as f64 * 100.0 } else { 0.0 };
            parent = scene.create_child(parent, NodeProps::at(offset, 0.0)).unwrap();
            let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 50.0, 50.0));
            for signal in [&input.over, &input.out, &input.roll_over, &input.roll_out] {
                signal.add(noop, &receiver).unwrap();
            }
            for signal in [&input.press, &input.release, &input.click, &input.cancel] {
                signal.add(noop, &receiver).unwrap();
            }
            scene.set_input(parent, Some(input)).unwrap();
        }
    }
    scene
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_frames");
    for &depth in &[4_usize, 16, 64] {
        let mut scene = towers(depth);
        let mut manager = InteractionChainManager::new(PointerState::new(), ());

        group.bench_function(format!("steady_point_depth{}", depth), |b| {
            manager.pointer_mut().move_to((10.0, 10.0));
            b.iter(|| black_box(manager.point(&mut scene)));
        });

        group.bench_function(format!("alternate_towers_depth{}", depth), |b| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let x = if flip { 110.0 } else { 10.0 };
                manager.pointer_mut().move_to((x, 10.0));
                black_box(manager.point(&mut scene))
            });
        });

        group.bench_function(format!("click_depth{}", depth), |b| {
            manager.pointer_mut().move_to((10.0, 10.0));
            b.iter(|| {
                black_box(manager.press(&mut scene)).ok();
                black_box(manager.release(&mut scene))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
