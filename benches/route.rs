// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mapwright::config::RenderConfig;
use mapwright::layout::{route_edges, CoordinateMapper, ObstacleMap};
use mapwright::model::Scope;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `route.obstacles`, `route.edges`
// - Case IDs come from `fixtures::Case::id` and must not be renamed.
fn benches_route(c: &mut Criterion) {
    let cfg = RenderConfig::export();
    let cases = [
        fixtures::Case::Small,
        fixtures::Case::MediumDense,
        fixtures::Case::CurveHeavy,
    ];

    let mut group = c.benchmark_group("route.obstacles");
    for case in cases {
        let doc = fixtures::fixture(case);
        let cfg = cfg.clone();
        group.bench_function(case.id(), move |b| {
            let rooms = doc.rooms_in_scope(&Scope::area(fixtures::area(), 0));
            let positions = CoordinateMapper::content_fit(&rooms, &cfg).positions(&rooms, 0.0);
            b.iter(|| {
                let map = ObstacleMap::build(
                    rooms
                        .iter()
                        .map(|room| (&room.vnum, positions[&room.vnum], room.display_label())),
                    black_box(&cfg),
                );
                black_box(map.labels().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("route.edges");
    for case in cases {
        let doc = fixtures::fixture(case);
        let cfg = cfg.clone();
        group.bench_function(case.id(), move |b| {
            let rooms = doc.rooms_in_scope(&Scope::area(fixtures::area(), 0));
            let positions = CoordinateMapper::content_fit(&rooms, &cfg).positions(&rooms, 0.0);
            let obstacles = ObstacleMap::build(
                rooms
                    .iter()
                    .map(|room| (&room.vnum, positions[&room.vnum], room.display_label())),
                &cfg,
            );
            b.iter(|| {
                let edges = route_edges(
                    black_box(&rooms),
                    0,
                    black_box(&positions),
                    black_box(&obstacles),
                    &cfg,
                );
                black_box(edges.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_route
}
criterion_main!(benches);
