// Copyright 2025 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use marquee_scene::{HitArea, InputCapability, NodeProps, PickMode, Placement, Scene};

/// A `n`×`n` grid of rotated cells, each with a circular knob child.
fn grid_scene(n: usize, cell: f64) -> Scene {
    let mut scene = Scene::new();
    let stage = scene.stage();
    for y in 0..n {
        for x in 0..n {
            let props = NodeProps {
                placement: Placement {
                    x: x as f64 * cell,
                    y: y as f64 * cell,
                    rotation: 5.0,
                    ..Placement::default()
                },
                ..NodeProps::default()
            };
            let cell_id = scene.create_child(stage, props).unwrap();
            let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, cell, cell));
            scene.set_input(cell_id, Some(input)).unwrap();

            let knob = scene
                .create_child(cell_id, NodeProps::at(cell * 0.5, cell * 0.5))
                .unwrap();
            let input = InputCapability::new().with_hit_area(HitArea::circle(0.0, 0.0, cell * 0.2));
            scene.set_input(knob, Some(input)).unwrap();
        }
    }
    scene
}

/// A single chain `depth` nodes deep with the hit area on the leaf.
fn deep_scene(depth: usize) -> Scene {
    let mut scene = Scene::new();
    let mut parent = scene.stage();
    for _ in 0..depth {
        parent = scene.create_child(parent, NodeProps::at(1.0, 1.0)).unwrap();
    }
    let input = InputCapability::new().with_hit_area(HitArea::rect(0.0, 0.0, 10.0, 10.0));
    scene.set_input(parent, Some(input)).unwrap();
    scene
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_grid");
    for &n in &[8_usize, 32, 64] {
        let scene = grid_scene(n, 20.0);
        let probes: Vec<Point> = (0..64)
            .map(|i| Point::new((i * 37 % (n * 20)) as f64, (i * 53 % (n * 20)) as f64))
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("hit_test_n{}", n), |b| {
            b.iter(|| {
                for p in &probes {
                    black_box(scene.hit_test(*p, PickMode::PointerInput));
                }
            });
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_deep");
    for &depth in &[8_usize, 64, 256] {
        let scene = deep_scene(depth);
        let p = Point::new(depth as f64 + 5.0, depth as f64 + 5.0);
        group.bench_function(format!("hit_test_depth{}", depth), |b| {
            b.iter(|| black_box(scene.hit_test(black_box(p), PickMode::All)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_deep);
criterion_main!(benches);
