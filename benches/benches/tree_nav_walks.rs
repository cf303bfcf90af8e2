// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_outline::{NodeId, Outline, OutlineNode};
use understory_tree_nav::adapters::outline::OutlineHost;
use understory_tree_nav::navigator::Navigator;
use understory_tree_nav::traverse::{first_descendant, next_sibling, previous_sibling};
use understory_tree_nav::types::{Key, KeyEvent};

/// A root group holding `n` items, each item wrapped in `depth` nested groups.
fn gen_wrapped_level(n: usize, depth: usize) -> (Outline, NodeId) {
    let mut o = Outline::new();
    let root = o.insert(None, OutlineNode::group("root"));
    for i in 0..n {
        let mut parent = root;
        for d in 0..depth {
            parent = o.insert(Some(parent), OutlineNode::group(format!("g{i}-{d}")));
        }
        o.insert(Some(parent), OutlineNode::item(format!("item{i}")));
    }
    (o, root)
}

/// `n` items in a flat list, each with `k` child items below a group.
fn gen_two_levels(n: usize, k: usize) -> Outline {
    let mut o = Outline::new();
    let root = o.insert(None, OutlineNode::group("ws"));
    for i in 0..n {
        let item = o.insert(Some(root), OutlineNode::item(format!("b{i}")));
        let list = o.insert(Some(item), OutlineNode::group(format!("b{i}-list")));
        for j in 0..k {
            o.insert(Some(list), OutlineNode::item(format!("b{i}-{j}")));
        }
    }
    o
}

fn bench_sibling_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("sibling_walk");
    for &(n, depth) in &[(64_usize, 0_usize), (64, 4), (512, 0), (512, 4)] {
        let (o, root) = gen_wrapped_level(n, depth);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("next_n{n}_depth{depth}"), |b| {
            b.iter(|| {
                let mut cur = first_descendant(&o, root);
                let mut steps = 0_usize;
                while let Some(c) = cur {
                    steps += 1;
                    cur = next_sibling(&o, c);
                }
                black_box(steps);
            });
        });
        group.bench_function(format!("previous_n{n}_depth{depth}"), |b| {
            let last = o.find(&format!("item{}", n - 1));
            b.iter(|| {
                let mut cur = last;
                let mut steps = 0_usize;
                while let Some(c) = cur {
                    steps += 1;
                    cur = previous_sibling(&o, c);
                }
                black_box(steps);
            });
        });
    }
    group.finish();
}

fn bench_keypress(c: &mut Criterion) {
    let mut group = c.benchmark_group("keypress");
    let down = KeyEvent::new(Key::ArrowDown);
    let right = KeyEvent::new(Key::ArrowRight);
    let left = KeyEvent::new(Key::ArrowLeft);
    for &n in &[32_usize, 256] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("arrow_walk_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut host = OutlineHost::new(gen_two_levels(n, 4));
                    let mut nav = Navigator::new("toolbox");
                    nav.regions_mut().add_workspace_tree("ws");
                    nav.set_active_descendant(&mut host, "b0", "ws");
                    (host, nav)
                },
                |(mut host, mut nav)| {
                    for _ in 0..n {
                        nav.on_keypress(&mut host, &right, "ws");
                        nav.on_keypress(&mut host, &down, "ws");
                        nav.on_keypress(&mut host, &left, "ws");
                        nav.on_keypress(&mut host, &down, "ws");
                    }
                    black_box(nav.active_descendant("ws").len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_preserving_focus(c: &mut Criterion) {
    c.bench_function("preserving_focus_reinsert", |b| {
        b.iter_batched(
            || {
                let mut host = OutlineHost::new(gen_two_levels(128, 2));
                let mut nav = Navigator::new("toolbox");
                nav.regions_mut().add_workspace_tree("ws");
                nav.set_active_descendant(&mut host, "b64", "ws");
                (host, nav)
            },
            |(mut host, mut nav)| {
                nav.run_preserving_focus(&mut host, "ws", |h| {
                    if let (Some(root), Some(b)) = (h.outline.find("ws"), h.outline.find("b64")) {
                        h.outline.reparent(b, root, 0);
                    }
                });
                black_box(nav.run_deferred(&mut host));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_sibling_walk,
    bench_keypress,
    bench_preserving_focus
);
criterion_main!(benches);
